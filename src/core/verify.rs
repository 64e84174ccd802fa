//! Global-phase equivalence and size feasibility checks.
use num_complex::Complex64 as C64;

use crate::core::error::{Result, SimError};

/// True iff `a ≈ φ·b` elementwise for some unit-modulus `φ`.
///
/// The phase is read off the largest-magnitude component of `b`. Vectors of
/// different length are a [`SimError::ShapeMismatch`], not a `false`.
pub fn equivalent_up_to_global_phase(a: &[C64], b: &[C64], tolerance: f64) -> Result<bool> {
    if a.len() != b.len() {
        return Err(SimError::length(a.len(), b.len()));
    }
    let Some((k, bk)) = b
        .iter()
        .enumerate()
        .max_by(|(_, x), (_, y)| x.norm_sqr().total_cmp(&y.norm_sqr()))
    else {
        return Ok(true);
    };
    let ak = a[k];
    if bk.norm() <= tolerance {
        // b is numerically zero, so a must be too.
        return Ok(a.iter().all(|z| z.norm() <= tolerance));
    }
    if (ak.norm() - bk.norm()).abs() > tolerance {
        return Ok(false);
    }
    let ratio = ak / bk;
    let phase = ratio / ratio.norm();
    Ok(a.iter().zip(b).all(|(x, y)| (x - phase * y).norm() <= tolerance))
}

/// True iff every `(rows, cols)` shape fits within `max_dim × max_dim`.
pub fn feasible<I>(shapes: I, max_dim: usize) -> bool
where
    I: IntoIterator<Item = (usize, usize)>,
{
    shapes.into_iter().all(|(r, c)| r <= max_dim && c <= max_dim)
}

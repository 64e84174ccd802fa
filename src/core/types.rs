//! State-vector and operator value types.
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64 as C64;

use crate::core::error::{Result, SimError};

/// Tolerance used when validating caller-supplied states and operators.
pub const EPS: f64 = 1e-9;

/// Normalized amplitude vector over `2^n` basis states.
#[derive(Clone, Debug, PartialEq)]
pub struct QState {
    pub(crate) data: DVector<C64>,
}

impl QState {
    /// Create from raw vector; rejects non-normalized unless `auto_normalize = true`.
    pub fn try_new(vec: DVector<C64>, auto_normalize: bool) -> Result<Self> {
        let mut v = vec;
        if v.is_empty() || !v.len().is_power_of_two() {
            return Err(SimError::invalid_argument(format!(
                "state length {} is not a power of two",
                v.len()
            )));
        }
        let norm = v.norm();
        if (norm - 1.0).abs() < EPS {
            Ok(Self { data: v })
        } else if auto_normalize {
            if norm < EPS {
                return Err(SimError::NotNormalized("QState norm ~ 0".into()));
            }
            v /= C64::from(norm);
            Ok(Self { data: v })
        } else {
            Err(SimError::NotNormalized(format!("||ψ|| = {norm}")))
        }
    }

    /// |0…0⟩ over `n_qubits`.
    pub fn ground(n_qubits: usize) -> Result<Self> {
        let dim = crate::core::basis::register_dimension(n_qubits)?;
        let mut data = DVector::from_element(dim, C64::new(0.0, 0.0));
        data[0] = C64::new(1.0, 0.0);
        Ok(Self { data })
    }

    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    pub fn n_qubits(&self) -> usize { self.data.len().trailing_zeros() as usize }

    pub fn norm(&self) -> f64 { self.data.norm() }

    pub fn as_slice(&self) -> &[C64] { self.data.as_slice() }

    pub fn into_inner(self) -> DVector<C64> { self.data }
}

/// Square unitary operator on the full register.
#[derive(Clone, Debug, PartialEq)]
pub struct QOp {
    pub m: DMatrix<C64>,
}

impl QOp {
    pub fn try_new_unitary(m: DMatrix<C64>) -> Result<Self> {
        if m.nrows() != m.ncols() {
            return Err(SimError::NotUnitary(format!("{}x{} is not square", m.nrows(), m.ncols())));
        }
        let max_diff = unitarity_defect(&m);
        if max_diff > 1e-8 {
            return Err(SimError::NotUnitary(format!("‖UᴴU−I‖∞={max_diff:e}")));
        }
        Ok(Self { m })
    }

    pub fn dim(&self) -> usize { self.m.nrows() }

    pub fn shape(&self) -> (usize, usize) { self.m.shape() }

    /// Apply to a full state vector (dimensions must match).
    pub fn apply(&self, psi: &QState) -> Result<QState> {
        if self.m.ncols() != psi.len() {
            return Err(SimError::shape((psi.len(), psi.len()), self.shape()));
        }
        Ok(QState { data: &self.m * &psi.data })
    }
}

/// Largest entry of |UᴴU − I|; zero for an exact unitary.
pub fn unitarity_defect(m: &DMatrix<C64>) -> f64 {
    let u_dag_u = m.adjoint() * m;
    let i = DMatrix::<C64>::identity(m.nrows(), m.ncols());
    (u_dag_u - i).iter().map(|z| z.norm()).fold(0.0_f64, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_state_has_single_amplitude() {
        let psi = QState::ground(3).unwrap();
        assert_eq!(psi.len(), 8);
        assert_eq!(psi.n_qubits(), 3);
        assert_eq!(psi.data[0], C64::new(1.0, 0.0));
        assert!(psi.data.iter().skip(1).all(|z| z.norm() == 0.0));
    }

    #[test]
    fn rejects_unnormalized_unless_asked() {
        let raw = DVector::from_vec(vec![C64::new(3.0, 0.0), C64::new(4.0, 0.0)]);
        assert!(matches!(QState::try_new(raw.clone(), false), Err(SimError::NotNormalized(_))));
        let psi = QState::try_new(raw, true).unwrap();
        assert!((psi.data[0].re - 0.6).abs() < 1e-12);
        assert!((psi.data[1].re - 0.8).abs() < 1e-12);
    }

    #[test]
    fn ground_rejects_oversized_registers() {
        assert!(matches!(QState::ground(0), Err(SimError::InvalidArgument(_))));
        assert!(matches!(QState::ground(62), Err(SimError::Range(_))));
    }

    #[test]
    fn rejects_odd_lengths() {
        let raw = DVector::from_element(3, C64::new(1.0, 0.0));
        assert!(matches!(QState::try_new(raw, true), Err(SimError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_non_unitary() {
        let m = DMatrix::from_element(2, 2, C64::new(1.0, 0.0));
        assert!(matches!(QOp::try_new_unitary(m), Err(SimError::NotUnitary(_))));
        let m = DMatrix::from_element(2, 3, C64::new(0.0, 0.0));
        assert!(matches!(QOp::try_new_unitary(m), Err(SimError::NotUnitary(_))));
    }

    #[test]
    fn apply_checks_dimension() {
        let op = QOp::try_new_unitary(DMatrix::identity(4, 4)).unwrap();
        let psi = QState::ground(1).unwrap();
        assert!(matches!(op.apply(&psi), Err(SimError::ShapeMismatch { .. })));
    }
}

//! Kronecker products and full-register lifts of library gates.
//!
//! Factors are tensored in qubit order 0..n-1 left to right, so qubit 0 is
//! the leftmost factor and the most significant bit of a basis index,
//! matching [`crate::core::basis`].
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;
use tracing::debug;

use crate::core::basis::{bit_at, register_dimension, shift_of};
use crate::core::error::{Result, SimError};
use crate::core::gates::{Gate, TwoQubit};
use crate::core::types::QOp;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

/// Kronecker product A ⊗ B
pub fn kron(a: &DMatrix<C64>, b: &DMatrix<C64>) -> DMatrix<C64> {
    let (ar, ac) = (a.nrows(), a.ncols());
    let (br, bc) = (b.nrows(), b.ncols());
    let mut out = DMatrix::<C64>::from_element(ar * br, ac * bc, c(0.0, 0.0));
    for i in 0..ar {
        for j in 0..ac {
            let aij = a[(i, j)];
            if aij == c(0.0, 0.0) {
                continue;
            }
            for k in 0..br {
                for l in 0..bc {
                    out[(i * br + k, j * bc + l)] = aij * b[(k, l)];
                }
            }
        }
    }
    out
}

fn check_pair(n_qubits: usize, first: usize, second: usize) -> Result<(usize, usize)> {
    let a = shift_of(n_qubits, first)?;
    let b = shift_of(n_qubits, second)?;
    if first == second {
        return Err(SimError::invalid_argument(format!(
            "two-qubit gate needs distinct qubits, got {first} twice"
        )));
    }
    Ok((a, b))
}

/// Promote a 1-qubit gate `u` onto `n_qubits`, acting on qubit `target`.
pub fn lift_1q(u: &DMatrix<C64>, n_qubits: usize, target: usize) -> Result<QOp> {
    if u.shape() != (2, 2) {
        return Err(SimError::shape((2, 2), u.shape()));
    }
    register_dimension(n_qubits)?;
    shift_of(n_qubits, target)?;

    let i2 = DMatrix::<C64>::identity(2, 2);
    let mut acc = DMatrix::<C64>::from_element(1, 1, c(1.0, 0.0));
    for q in 0..n_qubits {
        let m = if q == target { u } else { &i2 };
        acc = kron(&acc, m);
    }
    Ok(QOp { m: acc })
}

/// Permutation operator sending basis index `i` to `f(i)`.
///
/// `f` must be a bijection on `0..dim`; callers in this module build it from
/// XORs and bit swaps, which always are.
fn permutation(dim: usize, f: impl Fn(usize) -> usize) -> DMatrix<C64> {
    let mut m = DMatrix::<C64>::from_element(dim, dim, c(0.0, 0.0));
    for basis in 0..dim {
        m[(f(basis), basis)] = c(1.0, 0.0);
    }
    m
}

/// n-qubit CNOT as a full 2^n unitary (control -> target).
pub fn cnot_n(n_qubits: usize, control: usize, target: usize) -> Result<QOp> {
    let dim = register_dimension(n_qubits)?;
    let (sc, st) = check_pair(n_qubits, control, target)?;
    let m = permutation(dim, |basis| basis ^ (((basis >> sc) & 1) << st));
    Ok(QOp { m })
}

/// n-qubit SWAP of qubits `a` and `b`.
pub fn swap_n(n_qubits: usize, a: usize, b: usize) -> Result<QOp> {
    let dim = register_dimension(n_qubits)?;
    let (sa, sb) = check_pair(n_qubits, a, b)?;
    let m = permutation(dim, |basis| {
        let diff = ((basis >> sa) ^ (basis >> sb)) & 1;
        basis ^ ((diff << sa) | (diff << sb))
    });
    Ok(QOp { m })
}

/// n-qubit controlled-Z; symmetric in its two qubits.
pub fn cz_n(n_qubits: usize, control: usize, target: usize) -> Result<QOp> {
    let dim = register_dimension(n_qubits)?;
    check_pair(n_qubits, control, target)?;
    let mut m = DMatrix::<C64>::identity(dim, dim);
    for basis in 0..dim {
        if bit_at(basis, n_qubits, control)? == 1 && bit_at(basis, n_qubits, target)? == 1 {
            m[(basis, basis)] = c(-1.0, 0.0);
        }
    }
    Ok(QOp { m })
}

/// Full-register operator for `gate` on an `n_qubits` register.
pub fn compose(n_qubits: usize, gate: &Gate) -> Result<QOp> {
    let op = match gate {
        Gate::Single { kind, qubit } => lift_1q(&kind.matrix(), n_qubits, *qubit)?,
        Gate::Pair { kind: TwoQubit::Cx, first, second } => cnot_n(n_qubits, *first, *second)?,
        Gate::Pair { kind: TwoQubit::Swap, first, second } => swap_n(n_qubits, *first, *second)?,
        Gate::Pair { kind: TwoQubit::Cz, first, second } => cz_n(n_qubits, *first, *second)?,
    };
    debug!(gate = %gate, rows = op.m.nrows(), cols = op.m.ncols(), "composed operator");
    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gates;
    use crate::core::types::unitarity_defect;

    fn approx_eq(a: &DMatrix<C64>, b: &DMatrix<C64>) -> bool {
        a.shape() == b.shape() && (a - b).iter().all(|z| z.norm() < 1e-12)
    }

    #[test]
    fn kron_places_left_operand_outermost() {
        let hx = kron(&gates::h(), &gates::i2());
        // H on qubit 0 mixes |00⟩ with |10⟩ (indices 0 and 2).
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!((hx[(2, 0)].re - s).abs() < 1e-12);
        assert!(hx[(1, 0)].norm() < 1e-12);
    }

    #[test]
    fn lift_matches_explicit_kron() {
        let lifted = lift_1q(&gates::x(), 2, 1).unwrap();
        assert!(approx_eq(&lifted.m, &kron(&gates::i2(), &gates::x())));
        let lifted = lift_1q(&gates::h(), 3, 0).unwrap();
        let expect = kron(&kron(&gates::h(), &gates::i2()), &gates::i2());
        assert!(approx_eq(&lifted.m, &expect));
    }

    #[test]
    fn cnot_two_qubit_special_case() {
        let cnot = cnot_n(2, 0, 1).unwrap().m;
        let expect = DMatrix::from_row_slice(4, 4, &[
            c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0),
            c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0),
            c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0),
            c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0),
        ]);
        assert!(approx_eq(&cnot, &expect));
    }

    #[test]
    fn reversed_cnot_flips_qubit_zero() {
        let cnot = cnot_n(2, 1, 0).unwrap().m;
        // |01⟩ (index 1) -> |11⟩ (index 3)
        assert_eq!(cnot[(3, 1)], c(1.0, 0.0));
        assert_eq!(cnot[(0, 0)], c(1.0, 0.0));
    }

    #[test]
    fn swap_exchanges_bits() {
        let swap = swap_n(3, 0, 2).unwrap().m;
        // |100⟩ (4) <-> |001⟩ (1); |010⟩ (2) fixed
        assert_eq!(swap[(1, 4)], c(1.0, 0.0));
        assert_eq!(swap[(4, 1)], c(1.0, 0.0));
        assert_eq!(swap[(2, 2)], c(1.0, 0.0));
    }

    #[test]
    fn cz_is_symmetric() {
        assert!(approx_eq(&cz_n(3, 0, 2).unwrap().m, &cz_n(3, 2, 0).unwrap().m));
        assert_eq!(cz_n(2, 0, 1).unwrap().m[(3, 3)], c(-1.0, 0.0));
    }

    #[test]
    fn every_library_gate_is_unitary_up_to_four_qubits() {
        for n in 1..=4 {
            for q in 0..n {
                for g in [gates::i2(), gates::x(), gates::y(), gates::z(), gates::h(),
                          gates::s(), gates::t(), gates::rx(0.7), gates::ry(-1.3), gates::rz(2.2)] {
                    let op = lift_1q(&g, n, q).unwrap();
                    assert_eq!(op.shape(), (1 << n, 1 << n));
                    assert!(unitarity_defect(&op.m) < 1e-10);
                }
            }
            for a in 0..n {
                for b in (0..n).filter(|&b| b != a) {
                    assert!(unitarity_defect(&cnot_n(n, a, b).unwrap().m) < 1e-12);
                    assert!(unitarity_defect(&swap_n(n, a, b).unwrap().m) < 1e-12);
                    assert!(unitarity_defect(&cz_n(n, a, b).unwrap().m) < 1e-12);
                }
            }
        }
    }

    #[test]
    fn rejects_bad_targets() {
        assert!(matches!(lift_1q(&gates::x(), 2, 2), Err(SimError::Range(_))));
        assert!(matches!(lift_1q(&gates::x(), 0, 0), Err(SimError::InvalidArgument(_))));
        assert!(matches!(cnot_n(2, 1, 1), Err(SimError::InvalidArgument(_))));
        assert!(matches!(cnot_n(2, 0, 5), Err(SimError::Range(_))));
        assert!(matches!(lift_1q(&DMatrix::identity(4, 4), 2, 0), Err(SimError::ShapeMismatch { .. })));
        let wide = crate::core::basis::MAX_QUBITS + 1;
        assert!(matches!(lift_1q(&gates::x(), wide, 0), Err(SimError::Range(_))));
        assert!(matches!(cz_n(62, 0, 1), Err(SimError::Range(_))));
    }
}

//! Gate library and gate descriptors.
use std::fmt;

use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

use crate::core::error::{Result, SimError};
use crate::core::types::unitarity_defect;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

pub fn i2() -> DMatrix<C64> {
    DMatrix::identity(2, 2)
}
pub fn x() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)])
}
pub fn y() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(0.0, -1.0), c(0.0, 1.0), c(0.0, 0.0)])
}
pub fn z() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0)])
}
pub fn h() -> DMatrix<C64> {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    DMatrix::from_row_slice(2, 2, &[c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)])
}
pub fn s() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 1.0)])
}
pub fn t() -> DMatrix<C64> {
    let phase = C64::from_polar(1.0, std::f64::consts::FRAC_PI_4);
    DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), phase])
}
pub fn rx(theta: f64) -> DMatrix<C64> {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    DMatrix::from_row_slice(2, 2, &[c(c0, 0.0), c(0.0, -s0), c(0.0, -s0), c(c0, 0.0)])
}
pub fn ry(theta: f64) -> DMatrix<C64> {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    DMatrix::from_row_slice(2, 2, &[c(c0, 0.0), c(-s0, 0.0), c(s0, 0.0), c(c0, 0.0)])
}
pub fn rz(theta: f64) -> DMatrix<C64> {
    let e_m = C64::from_polar(1.0, -theta / 2.0);
    let e_p = C64::from_polar(1.0, theta / 2.0);
    DMatrix::from_row_slice(2, 2, &[e_m, c(0.0, 0.0), c(0.0, 0.0), e_p])
}

/// A labelled, user-supplied 2×2 unitary.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomGate {
    label: String,
    matrix: DMatrix<C64>,
}

impl CustomGate {
    pub fn new(label: impl Into<String>, matrix: DMatrix<C64>) -> Result<Self> {
        if matrix.shape() != (2, 2) {
            return Err(SimError::shape((2, 2), matrix.shape()));
        }
        let defect = unitarity_defect(&matrix);
        if defect > 1e-8 {
            return Err(SimError::NotUnitary(format!("custom gate defect {defect:e}")));
        }
        Ok(Self { label: label.into(), matrix })
    }

    pub fn label(&self) -> &str { &self.label }

    pub fn matrix(&self) -> &DMatrix<C64> { &self.matrix }
}

/// Single-qubit gate kinds. Rotation angles are in radians.
#[derive(Clone, Debug, PartialEq)]
pub enum OneQubit {
    I,
    X,
    Y,
    Z,
    H,
    S,
    T,
    Rx(f64),
    Ry(f64),
    Rz(f64),
    Custom(CustomGate),
}

impl OneQubit {
    pub fn matrix(&self) -> DMatrix<C64> {
        match self {
            OneQubit::I => i2(),
            OneQubit::X => x(),
            OneQubit::Y => y(),
            OneQubit::Z => z(),
            OneQubit::H => h(),
            OneQubit::S => s(),
            OneQubit::T => t(),
            OneQubit::Rx(theta) => rx(*theta),
            OneQubit::Ry(theta) => ry(*theta),
            OneQubit::Rz(theta) => rz(*theta),
            OneQubit::Custom(g) => g.matrix().clone(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OneQubit::I => "id",
            OneQubit::X => "x",
            OneQubit::Y => "y",
            OneQubit::Z => "z",
            OneQubit::H => "h",
            OneQubit::S => "s",
            OneQubit::T => "t",
            OneQubit::Rx(_) => "rx",
            OneQubit::Ry(_) => "ry",
            OneQubit::Rz(_) => "rz",
            OneQubit::Custom(g) => g.label(),
        }
    }
}

/// Two-qubit gate kinds. For `Cx` and `Cz` the first qubit is the control.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TwoQubit {
    Cx,
    Swap,
    Cz,
}

impl TwoQubit {
    pub fn name(&self) -> &'static str {
        match self {
            TwoQubit::Cx => "cx",
            TwoQubit::Swap => "swap",
            TwoQubit::Cz => "cz",
        }
    }
}

/// A gate kind together with the qubit(s) it acts on.
#[derive(Clone, Debug, PartialEq)]
pub enum Gate {
    Single { kind: OneQubit, qubit: usize },
    Pair { kind: TwoQubit, first: usize, second: usize },
}

impl Gate {
    pub fn single(kind: OneQubit, qubit: usize) -> Self { Gate::Single { kind, qubit } }
    pub fn id(qubit: usize) -> Self { Self::single(OneQubit::I, qubit) }
    pub fn x(qubit: usize) -> Self { Self::single(OneQubit::X, qubit) }
    pub fn y(qubit: usize) -> Self { Self::single(OneQubit::Y, qubit) }
    pub fn z(qubit: usize) -> Self { Self::single(OneQubit::Z, qubit) }
    pub fn h(qubit: usize) -> Self { Self::single(OneQubit::H, qubit) }
    pub fn s(qubit: usize) -> Self { Self::single(OneQubit::S, qubit) }
    pub fn t(qubit: usize) -> Self { Self::single(OneQubit::T, qubit) }
    pub fn rx(theta: f64, qubit: usize) -> Self { Self::single(OneQubit::Rx(theta), qubit) }
    pub fn ry(theta: f64, qubit: usize) -> Self { Self::single(OneQubit::Ry(theta), qubit) }
    pub fn rz(theta: f64, qubit: usize) -> Self { Self::single(OneQubit::Rz(theta), qubit) }
    pub fn custom(gate: CustomGate, qubit: usize) -> Self { Self::single(OneQubit::Custom(gate), qubit) }

    pub fn cx(control: usize, target: usize) -> Self {
        Gate::Pair { kind: TwoQubit::Cx, first: control, second: target }
    }
    pub fn cz(control: usize, target: usize) -> Self {
        Gate::Pair { kind: TwoQubit::Cz, first: control, second: target }
    }
    pub fn swap(a: usize, b: usize) -> Self {
        Gate::Pair { kind: TwoQubit::Swap, first: a, second: b }
    }

    pub fn name(&self) -> &str {
        match self {
            Gate::Single { kind, .. } => kind.name(),
            Gate::Pair { kind, .. } => kind.name(),
        }
    }

    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Gate::Single { qubit, .. } => vec![*qubit],
            Gate::Pair { first, second, .. } => vec![*first, *second],
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Single { kind: OneQubit::Rx(a) | OneQubit::Ry(a) | OneQubit::Rz(a), qubit } => {
                write!(f, "{}({:.4})@{}", self.name(), a, qubit)
            }
            Gate::Single { qubit, .. } => write!(f, "{}@{}", self.name(), qubit),
            Gate::Pair { first, second, .. } => write!(f, "{}@{}:{}", self.name(), first, second),
        }
    }
}

/// Names accepted by the gate-list parser, for `qstate gates`.
pub const LIBRARY: &[(&str, &str)] = &[
    ("id", "identity"),
    ("x", "Pauli-X (NOT)"),
    ("y", "Pauli-Y"),
    ("z", "Pauli-Z"),
    ("h", "Hadamard"),
    ("s", "phase S = diag(1, i)"),
    ("t", "phase T = diag(1, e^(iπ/4))"),
    ("rx(deg)", "rotation about X"),
    ("ry(deg)", "rotation about Y"),
    ("rz(deg)", "rotation about Z"),
    ("cx", "controlled-NOT (control:target)"),
    ("cz", "controlled-Z (control:target)"),
    ("swap", "swap two qubits"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_matrices_are_unitary() {
        let all = [i2(), x(), y(), z(), h(), s(), t(), rx(0.3), ry(1.1), rz(-2.0)];
        for m in all.iter() {
            assert!(unitarity_defect(m) < 1e-12);
        }
    }

    #[test]
    fn rotation_by_pi_matches_pauli_up_to_phase() {
        let m = rx(std::f64::consts::PI);
        // Rx(π) = -i X
        assert!((m[(0, 1)] - c(0.0, -1.0)).norm() < 1e-12);
        assert!(m[(0, 0)].norm() < 1e-12);
    }

    #[test]
    fn t_squared_is_s() {
        let tt = t() * t();
        assert!((tt - s()).iter().all(|z| z.norm() < 1e-12));
    }

    #[test]
    fn custom_gate_validation() {
        assert!(CustomGate::new("philip", x()).is_ok());
        let bad = DMatrix::from_element(2, 2, c(1.0, 0.0));
        assert!(matches!(CustomGate::new("bad", bad), Err(SimError::NotUnitary(_))));
        assert!(matches!(CustomGate::new("big", DMatrix::identity(4, 4)), Err(SimError::ShapeMismatch { .. })));
    }

    #[test]
    fn display_and_names() {
        assert_eq!(Gate::h(0).to_string(), "h@0");
        assert_eq!(Gate::cx(0, 1).to_string(), "cx@0:1");
        assert_eq!(Gate::rz(0.5, 2).to_string(), "rz(0.5000)@2");
        let g = Gate::custom(CustomGate::new("philip", x()).unwrap(), 1);
        assert_eq!(g.name(), "philip");
        assert_eq!(g.qubits(), vec![1]);
        assert_eq!(Gate::swap(2, 0).qubits(), vec![2, 0]);
    }
}

//! Dense state-vector engine.
use nalgebra::DVector;
use num_complex::Complex64 as C64;
use rand::Rng;
use tracing::{debug, trace};

use crate::core::basis::register_dimension;
use crate::core::error::{Result, SimError};
use crate::core::gates::Gate;
use crate::core::ops;
use crate::core::types::{QOp, QState};

/// Label and shape of one full-register operator the engine has applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedOp {
    pub label: String,
    pub rows: usize,
    pub cols: usize,
}

/// Owns the amplitude vector of an `n`-qubit register and evolves it in place.
#[derive(Clone, Debug)]
pub struct Engine {
    n_qubits: usize,
    state: QState,
    history: Vec<AppliedOp>,
}

impl Engine {
    /// Register of `n_qubits` in |0…0⟩. At most [`MAX_QUBITS`](crate::core::basis::MAX_QUBITS) qubits.
    pub fn new(n_qubits: usize) -> Result<Self> {
        Ok(Self { n_qubits, state: QState::ground(n_qubits)?, history: Vec::new() })
    }

    /// Start from an arbitrary state. The vector must already be normalized
    /// and span a whole register of at most [`MAX_QUBITS`](crate::core::basis::MAX_QUBITS) qubits.
    pub fn from_state(state: QState) -> Result<Self> {
        let state = QState::try_new(state.into_inner(), false)?;
        let n_qubits = state.n_qubits();
        register_dimension(n_qubits)?;
        Ok(Self { n_qubits, state, history: Vec::new() })
    }

    pub fn n_qubits(&self) -> usize { self.n_qubits }

    pub fn dim(&self) -> usize { self.state.len() }

    /// Compose `gate` onto the full register and left-multiply it into the state.
    pub fn apply_gate(&mut self, gate: &Gate) -> Result<()> {
        let op = ops::compose(self.n_qubits, gate)?;
        self.evolve(gate.to_string(), &op);
        Ok(())
    }

    /// Apply gates in order. On error, gates before the failing one stay applied.
    pub fn apply_all<'a>(&mut self, gates: impl IntoIterator<Item = &'a Gate>) -> Result<()> {
        for gate in gates {
            self.apply_gate(gate)?;
        }
        Ok(())
    }

    /// Apply a prebuilt full-register operator, e.g. an oracle.
    pub fn apply_operator(&mut self, label: &str, op: &QOp) -> Result<()> {
        let dim = self.dim();
        if op.shape() != (dim, dim) {
            return Err(SimError::shape((dim, dim), op.shape()));
        }
        self.evolve(label.to_string(), op);
        Ok(())
    }

    fn evolve(&mut self, label: String, op: &QOp) {
        self.state.data = &op.m * &self.state.data;
        let (rows, cols) = op.shape();
        trace!(op = %label, norm = self.state.norm(), "applied");
        self.history.push(AppliedOp { label, rows, cols });
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> QState {
        self.state.clone()
    }

    pub fn amplitudes(&self) -> &[C64] {
        self.state.as_slice()
    }

    /// |amplitude|² for each basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.data.iter().map(|z| z.norm_sqr()).collect()
    }

    pub fn norm(&self) -> f64 {
        self.state.norm()
    }

    /// Operators applied since construction or the last [`reset`](Self::reset).
    pub fn history(&self) -> &[AppliedOp] {
        &self.history
    }

    pub fn reset(&mut self) {
        let dim = self.dim();
        let mut data = DVector::from_element(dim, C64::new(0.0, 0.0));
        data[0] = C64::new(1.0, 0.0);
        self.state = QState { data };
        self.history.clear();
        debug!(n_qubits = self.n_qubits, "engine reset");
    }

    /// Draw one basis index from [`probabilities`](Self::probabilities).
    /// The state is left untouched.
    pub fn sample_basis<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let probs = self.probabilities();
        let total: f64 = probs.iter().sum();
        let mut r = rng.gen::<f64>() * total;
        for (i, p) in probs.iter().enumerate() {
            if r < *p {
                return i;
            }
            r -= p;
        }
        // Rounding can leave `r` just above the last bucket.
        probs.iter().rposition(|p| *p > 0.0).unwrap_or(0)
    }
}

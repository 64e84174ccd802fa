//! Reversible oracles |x, y⟩ → |x, y ⊕ f(x)⟩ built from a truth table.
//!
//! The combined register is `2n` bits wide with `x` in the high `n` bits
//! (qubits `0..n`) and `y` in the low `n` bits (qubits `n..2n`).
use std::collections::BTreeMap;

use nalgebra::DMatrix;
use num_complex::Complex64 as C64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::basis::{bits_to_index, dimension, index_to_bits, register_dimension};
use crate::core::error::{Result, SimError};
use crate::core::types::QOp;

/// Mapping from every `n`-bit input string to a 1-bit or `n`-bit output string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionTable {
    entries: BTreeMap<String, String>,
}

impl FunctionTable {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, input: impl Into<String>, output: impl Into<String>) -> Option<String> {
        self.entries.insert(input.into(), output.into())
    }

    pub fn get(&self, input: &str) -> Option<&str> {
        self.entries.get(input).map(String::as_str)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Input width implied by the keys, if they agree on one.
    pub fn input_width(&self) -> Option<usize> {
        let mut widths = self.entries.keys().map(String::len);
        let first = widths.next()?;
        widths.all(|w| w == first).then_some(first)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FunctionTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// 0/1 permutation matrix of an oracle over `2n` bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleMatrix {
    n: usize,
    m: DMatrix<u8>,
}

impl OracleMatrix {
    /// Input width `n`; the matrix acts on `2n` bits.
    pub fn input_bits(&self) -> usize { self.n }

    pub fn dim(&self) -> usize { self.m.nrows() }

    pub fn matrix(&self) -> &DMatrix<u8> { &self.m }

    /// Entry at `(row, col)`, or `None` outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> { self.m.get((row, col)).copied() }

    /// Exactly one 1 per row and per column, zeros elsewhere.
    pub fn is_permutation(&self) -> bool {
        self.m.row_iter().all(|r| r.iter().map(|v| *v as usize).sum::<usize>() == 1)
            && self.m.column_iter().all(|c| c.iter().map(|v| *v as usize).sum::<usize>() == 1)
    }

    /// Complex-valued copy usable with `Engine::apply_operator`.
    pub fn to_operator(&self) -> QOp {
        QOp { m: self.m.map(|v| C64::new(f64::from(v), 0.0)) }
    }

    /// Labels of the `2n`-bit basis states in index order.
    pub fn labels(&self) -> Vec<String> {
        basis_labels(2 * self.n).unwrap_or_default()
    }
}

/// `width`-bit labels of every basis state, in index order.
pub fn basis_labels(width: usize) -> Result<Vec<String>> {
    (0..dimension(width)?).map(|i| index_to_bits(i, width)).collect()
}

fn check_value(input: &str, value: &str, n: usize) -> Result<()> {
    if value.len() != n && value.len() != 1 {
        return Err(SimError::validation(format!(
            "f({input}) = '{value}' must be {n}-bit or 1-bit"
        )));
    }
    if !value.chars().all(|ch| ch == '0' || ch == '1') {
        return Err(SimError::validation(format!("f({input}) = '{value}' is not a binary string")));
    }
    Ok(())
}

/// Check that `table` defines a 1-bit or `n`-bit value for every `n`-bit input
/// and nothing else.
pub fn validate_table(table: &FunctionTable, n: usize) -> Result<()> {
    if n == 0 {
        return Err(SimError::validation("input width must be at least 1"));
    }
    // The doubled register must fit the dense engine.
    let domain = dimension(n)?;
    register_dimension(2 * n)?;
    for x in 0..domain {
        let input = index_to_bits(x, n)?;
        match table.get(&input) {
            None => return Err(SimError::validation(format!("missing f({input})"))),
            Some(value) => check_value(&input, value, n)?,
        }
    }
    if table.len() != domain {
        let stray = table
            .iter()
            .map(|(k, _)| k)
            .find(|k| k.len() != n || bits_to_index(k).is_err())
            .unwrap_or("?");
        return Err(SimError::validation(format!(
            "unexpected input '{stray}' in a table over {n}-bit inputs"
        )));
    }
    Ok(())
}

/// Permutation matrix of |x, y⟩ → |x, y ⊕ f(x)⟩. 1-bit outputs are
/// zero-padded on the left to `n` bits.
pub fn build_oracle_matrix(table: &FunctionTable, n: usize) -> Result<OracleMatrix> {
    validate_table(table, n)?;
    let domain = dimension(n)?;
    let fx: Vec<usize> = (0..domain)
        .map(|x| {
            let input = index_to_bits(x, n)?;
            let value = table.get(&input).ok_or_else(|| SimError::validation(format!("missing f({input})")))?;
            bits_to_index(value)
        })
        .collect::<Result<_>>()?;

    let dim = dimension(2 * n)?;
    let mask = domain - 1;
    let mut m = DMatrix::<u8>::zeros(dim, dim);
    for i in 0..dim {
        let (x, y) = (i >> n, i & mask);
        let j = (x << n) | (y ^ fx[x]);
        m[(j, i)] = 1;
    }
    debug!(n, dim, "built oracle matrix");
    Ok(OracleMatrix { n, m })
}

/// Text table of the oracle with basis labels on both axes.
pub fn render_oracle_table(oracle: &OracleMatrix) -> String {
    let labels = oracle.labels();
    let width = (2 * oracle.input_bits()).max(4) + 2;
    let mut lines = Vec::with_capacity(labels.len() + 1);
    let mut header = " ".repeat(width);
    for label in &labels {
        header.push_str(&format!("{label:<width$}"));
    }
    lines.push(header);
    for (i, label) in labels.iter().enumerate() {
        let mut row = format!("{label:<width$}");
        for j in 0..oracle.dim() {
            row.push_str(&format!("{:^width$}", oracle.m[(i, j)]));
        }
        lines.push(row);
    }
    let mut out = String::new();
    for line in lines {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

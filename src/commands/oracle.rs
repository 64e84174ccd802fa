//! `qstate oracle`: build and print the permutation matrix of a function table.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::oracle::{build_oracle_matrix, render_oracle_table, FunctionTable, OracleMatrix};

/// On-disk form of a function table:
///
/// ```toml
/// n = 2            # optional, inferred from the keys
/// [table]
/// "00" = "01"
/// "01" = "10"
/// "10" = "10"
/// "11" = "01"
/// ```
#[derive(Debug, Deserialize)]
pub struct TableFile {
    pub n: Option<usize>,
    pub table: FunctionTable,
}

#[derive(Debug, Serialize)]
pub struct OracleReport {
    pub n: usize,
    pub dim: usize,
    pub labels: Vec<String>,
    pub rows: Vec<Vec<u8>>,
}

impl OracleReport {
    fn from_matrix(oracle: &OracleMatrix) -> Self {
        let rows = oracle
            .matrix()
            .row_iter()
            .map(|r| r.iter().copied().collect())
            .collect();
        Self { n: oracle.input_bits(), dim: oracle.dim(), labels: oracle.labels(), rows }
    }
}

pub fn load_table(path: &Path) -> Result<TableFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Read table {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Parse table {}", path.display()))
}

/// Resolve the input width: explicit flag, then file, then key length.
pub fn resolve_width(flag: Option<usize>, file: &TableFile) -> Result<usize> {
    flag.or(file.n)
        .or_else(|| file.table.input_width())
        .ok_or_else(|| anyhow!("cannot infer input width; pass --bits or set n in the table file"))
}

pub fn build_from_file(path: &Path, bits: Option<usize>) -> Result<OracleMatrix> {
    let file = load_table(path)?;
    let n = resolve_width(bits, &file)?;
    let oracle = build_oracle_matrix(&file.table, n)
        .with_context(|| format!("invalid function table {}", path.display()))?;
    info!(n, dim = oracle.dim(), "oracle built");
    Ok(oracle)
}

pub fn main(table: &Path, bits: Option<usize>, json: bool) -> Result<()> {
    let oracle = build_from_file(table, bits)?;
    if json {
        let report = OracleReport::from_matrix(&oracle);
        println!("{}", serde_json::to_string_pretty(&report).context("serialize oracle")?);
        return Ok(());
    }
    let dim = oracle.dim();
    println!("{}", format!("Uf matrix ({dim}x{dim})").bold());
    print!("{}", render_oracle_table(&oracle));
    Ok(())
}

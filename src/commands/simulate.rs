//! `qstate simulate`: run a gate list on |0…0⟩ and report the final state.
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::SimConfig;
use crate::core::basis::{index_to_bits, register_dimension};
use crate::core::engine::Engine;
use crate::core::parse::parse_gate_list;
use crate::core::verify::feasible;

#[derive(Debug, Serialize)]
pub struct Amplitude {
    pub basis: String,
    pub re: f64,
    pub im: f64,
    pub probability: f64,
}

#[derive(Debug, Serialize)]
pub struct Shape {
    pub gate: String,
    pub rows: usize,
    pub cols: usize,
}

/// Everything the front end shows after a run.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub qubits: usize,
    pub gates: Vec<String>,
    pub amplitudes: Vec<Amplitude>,
    pub shapes: Vec<Shape>,
    pub norm: f64,
    pub max_dim: usize,
    pub feasible: bool,
}

pub fn run_simulation(qubits: usize, gates: &str, cfg: &SimConfig) -> Result<SimulationReport> {
    let gates = parse_gate_list(gates).context("failed to parse gate list")?;
    let dim = register_dimension(qubits).context("failed to create register")?;
    // Every gate lifts to a (dim, dim) operator, so the verdict is known up front.
    let feasible = feasible(gates.iter().map(|_| (dim, dim)), cfg.max_dim);
    if !feasible {
        warn!(dim, max_dim = cfg.max_dim, "operator size exceeds the feasibility bound");
    }
    let mut engine = Engine::new(qubits).context("failed to create register")?;
    for gate in &gates {
        engine
            .apply_gate(gate)
            .with_context(|| format!("failed to apply {gate}"))?;
        let norm = engine.norm();
        if (norm - 1.0).abs() > cfg.tolerance {
            warn!(%gate, norm, "state norm drifted beyond tolerance");
        }
    }
    info!(qubits, gates = gates.len(), "simulation finished");

    let amplitudes = engine
        .amplitudes()
        .iter()
        .zip(engine.probabilities())
        .enumerate()
        .map(|(i, (z, p))| {
            Ok(Amplitude { basis: index_to_bits(i, qubits)?, re: z.re, im: z.im, probability: p })
        })
        .collect::<crate::core::Result<Vec<_>>>()?;
    let shapes: Vec<Shape> = engine
        .history()
        .iter()
        .map(|op| Shape { gate: op.label.clone(), rows: op.rows, cols: op.cols })
        .collect();

    Ok(SimulationReport {
        qubits,
        gates: gates.iter().map(ToString::to_string).collect(),
        amplitudes,
        shapes,
        norm: engine.norm(),
        max_dim: cfg.max_dim,
        feasible,
    })
}

pub fn print_text(report: &SimulationReport, precision: usize) {
    let title = if report.gates.is_empty() {
        "Final state vector (no gates):".to_string()
    } else {
        format!("Final state vector after {}:", report.gates.join(", "))
    };
    println!("{}", title.bold());
    for amp in &report.amplitudes {
        let line = format!(
            "  |{}⟩  {:>w$.p$} {:+.p$}i   p={:.4}",
            amp.basis,
            amp.re,
            amp.im,
            amp.probability,
            w = precision + 3,
            p = precision
        );
        if amp.probability > 0.0 {
            println!("{}", line.cyan());
        } else {
            println!("{}", line.dimmed());
        }
    }

    println!("\n{}", "Matrix shapes:".bold());
    let pad = report.shapes.iter().map(|s| s.gate.len()).max().unwrap_or(0);
    for s in &report.shapes {
        println!("  {:<pad$} : ({}, {})", s.gate, s.rows, s.cols);
    }

    println!();
    if report.feasible {
        println!(
            "{} All matrices are feasible (do not exceed {d}x{d}).",
            "ok:".green().bold(),
            d = report.max_dim
        );
    } else {
        println!(
            "{} One or more matrices exceed {d}x{d}.",
            "warn:".yellow().bold(),
            d = report.max_dim
        );
    }
}

pub fn main(qubits: usize, gates: String, json: bool, cfg: &SimConfig) -> Result<()> {
    let report = run_simulation(qubits, &gates, cfg)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report).context("serialize report")?);
    } else {
        print_text(&report, cfg.precision);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2 as S;

    #[test]
    fn classroom_run() {
        let report = run_simulation(2, "h@0, x@1, cx@0:1", &SimConfig::default()).unwrap();
        let re: Vec<f64> = report.amplitudes.iter().map(|a| a.re).collect();
        for (got, want) in re.iter().zip([0.0, S, S, 0.0]) {
            assert!((got - want).abs() < 1e-12);
        }
        assert_eq!(report.shapes.len(), 3);
        assert!(report.shapes.iter().all(|s| (s.rows, s.cols) == (4, 4)));
        assert!(report.feasible);
        assert_eq!(report.amplitudes[2].basis, "10");
    }

    #[test]
    fn three_qubits_exceed_default_bound() {
        let report = run_simulation(3, "h@2", &SimConfig::default()).unwrap();
        assert!(!report.feasible);
    }

    #[test]
    fn oversized_register_fails_before_allocating() {
        let err = run_simulation(62, "h@0", &SimConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("Range Error"));
    }

    #[test]
    fn bad_gate_is_reported() {
        let err = run_simulation(2, "cx@0:0", &SimConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid Argument"));
    }
}

//! qstate binary: parse flags, set up logging and config, dispatch.
use anyhow::Context;
use clap::Parser; // trait import enables QstateCli::parse()
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

use qstate::cli::{Command, QstateCli};
use qstate::commands;
use qstate::config::load_config;

fn init_logging(level: LevelFilter, debug: bool) {
    let filter = if debug { LevelFilter::DEBUG } else { level };
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = QstateCli::parse();
    init_logging(args.log_level, args.debug);

    let cfg = load_config(&args.config)
        .context("failed to load configuration")?
        .with_overrides(args.tolerance, args.max_dim)?;
    debug!(?cfg, "effective configuration");

    match args.cmd {
        Command::Simulate { qubits, gates, json } => commands::simulate::main(qubits, gates, json, &cfg),
        Command::Oracle { table, bits, json } => commands::oracle::main(&table, bits, json),
        Command::Gates => {
            commands::list_gates();
            Ok(())
        }
    }
}

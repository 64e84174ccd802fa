use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "qstate",
    about = "Dense state-vector simulator and truth-table oracle builder",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct QstateCli {
    /// Global: path to config (TOML); default: ~/.qstate/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: log level for stderr (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    pub log_level: LevelFilter,

    /// Global: shorthand for --log-level debug
    #[arg(long = "debug", action = ArgAction::SetTrue, global = true)]
    pub debug: bool,

    /// Global: override the configured tolerance
    #[arg(long = "tolerance", value_name = "EPS", global = true)]
    pub tolerance: Option<f64>,

    /// Global: override the configured feasibility bound on matrix size
    #[arg(long = "max-dim", value_name = "N", global = true)]
    pub max_dim: Option<usize>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a gate sequence on |0…0⟩ and print the final state
    ///
    /// Examples:
    ///   qstate simulate --qubits 2 --gates "h@0, x@1, cx@0:1"
    ///   qstate simulate -n 1 -g "rx(90)@0" --json
    Simulate {
        /// Number of qubits
        #[arg(short = 'n', long = "qubits", value_name = "N")]
        qubits: usize,

        /// Gate list, e.g. "h@0, cx@0:1, ry(45)@1" (angles in degrees)
        #[arg(short = 'g', long = "gates", value_name = "LIST", default_value = "")]
        gates: String,

        /// Emit a JSON document instead of text
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Build the oracle |x,y⟩ → |x, y⊕f(x)⟩ for a TOML function table
    ///
    /// The table file maps every n-bit input to an n-bit or 1-bit output:
    ///   [table]
    ///   "00" = "01"
    ///   "01" = "10"
    Oracle {
        #[arg(value_name = "TABLE")]
        table: PathBuf,

        /// Input width; inferred from the table keys when omitted
        #[arg(short = 'n', long = "bits", value_name = "N")]
        bits: Option<usize>,

        /// Emit a JSON document instead of text
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// List the gate library
    Gates,
}

//! qstate: a dense N-qubit state-vector simulator.
//!
//! The library half holds the simulator core (`core`) plus the pieces the
//! `qstate` binary shares with integration tests (`cli`, `commands`, `config`).
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;

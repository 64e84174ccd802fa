//! Simulator core: basis arithmetic, gate library, operator composition,
//! the state-vector engine, truth-table oracles and verification helpers.

pub mod basis;
pub mod engine;
pub mod error;
pub mod gates;
pub mod ops;
pub mod oracle;
pub mod parse;
pub mod types;
pub mod verify;

pub use engine::Engine;
pub use error::{Result, SimError};
pub use gates::Gate;

//! Registers models requested through issue reports.
//!
//! A CI job hands the issue body to [`registrar::run`], which extracts the
//! model id and name ([`issue`]), exports them to the runner's environment
//! file, and appends the model to each JSON registry that lacks it
//! ([`registry`]).

pub mod config;
pub mod error;
pub mod issue;
pub mod models;
pub mod registrar;
pub mod registry;

pub use config::RegistrarConfig;
pub use error::RegistrarError;
pub use registrar::{run, RunOutcome};

//! CLI support for docsieve
//!
//! Provides programmatic access to the `docsieve` commands so they can be
//! embedded in other tools and tested without spawning the binary.

mod compile;
mod docs;
mod run;

pub use compile::{CompileOptions, execute_compile};
pub use docs::get_operator_reference;
pub use run::{RunOptions, execute_run};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid schema: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Compile error: {0}")]
    Compile(#[from] crate::CompileError),

    #[error("Execution error: {0}")]
    Store(#[from] crate::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No records provided. Use --records or pipe JSON to stdin.")]
    NoInput,

    #[error("Records must be a JSON array, got {0}")]
    NotAnArray(&'static str),
}

/// Read and parse a schema file's contents.
pub(crate) fn load_schema(text: &str) -> Result<crate::Schema, CliError> {
    crate::Schema::from_json(text).map_err(CliError::Schema)
}

//! Compile a where-clause into a predicate document

use super::{CliError, load_schema};
use crate::{Compiler, parse_where};

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Schema JSON (contents of the schema file)
    pub schema: String,
    /// The where-clause as JSON
    pub filter: String,
}

/// Execute a compile operation and return the predicate document
pub fn execute_compile(options: &CompileOptions) -> Result<serde_json::Value, CliError> {
    let schema = load_schema(&options.schema)?;
    let input: serde_json::Value = serde_json::from_str(&options.filter)?;

    let tree = parse_where(&input, &schema)?;
    let predicate = Compiler::new(&schema).compile(&tree)?;
    Ok(predicate.to_document())
}

//! Compile a where-clause and run it against records held in memory

use super::{CliError, load_schema};
use crate::{Compiler, MemoryCollection, parse_where, parser::json_kind};

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Schema JSON (contents of the schema file)
    pub schema: String,
    /// The where-clause as JSON
    pub filter: String,
    /// JSON array of records
    pub records: Option<String>,
}

/// Execute a run operation and return the matching records
pub fn execute_run(options: &RunOptions) -> Result<Vec<serde_json::Value>, CliError> {
    let schema = load_schema(&options.schema)?;
    let input: serde_json::Value = serde_json::from_str(&options.filter)?;

    let tree = parse_where(&input, &schema)?;
    let predicate = Compiler::new(&schema).compile(&tree)?;

    let records_json = options.records.as_ref().ok_or(CliError::NoInput)?;
    let parsed: serde_json::Value = serde_json::from_str(records_json)?;
    let records = match parsed {
        serde_json::Value::Array(items) => items,
        other => return Err(CliError::NotAnArray(json_kind(&other))),
    };

    let collection = MemoryCollection::with_records(schema.collection.clone(), records);
    Ok(collection.execute(&predicate)?)
}

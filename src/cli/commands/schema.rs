//! Schema command implementation.
//!
//! Emits JSON Schema documents for the records `export` writes and the
//! pages `list --json` prints.

use super::print_json;
use crate::error::Result;
use crate::model::Issue;
use crate::query::PageResult;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::Serialize;

/// Schemas keyed by the output they describe.
#[derive(Debug, Serialize)]
pub struct SchemaDocument {
    pub issue: RootSchema,
    pub page_result: RootSchema,
}

/// Build the schema document.
#[must_use]
pub fn schema_document() -> SchemaDocument {
    SchemaDocument {
        issue: schema_for!(Issue),
        page_result: schema_for!(PageResult<Issue>),
    }
}

/// Execute the schema command.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn execute() -> Result<()> {
    print_json(&schema_document())
}

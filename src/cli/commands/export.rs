//! Export command implementation.

use crate::error::Result;
use crate::storage::{MemoryStorage, write_jsonl};
use std::io;
use tracing::info;

/// Write every loaded issue to stdout as JSONL.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn execute(storage: &MemoryStorage) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let count = write_jsonl(&mut stdout, storage.issues())?;
    info!(count, "Exported issues");
    Ok(())
}

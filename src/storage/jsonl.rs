//! JSONL snapshots: one issue per line.

use crate::error::{DeskError, Result};
use crate::model::Issue;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

/// Read every issue from a JSONL file. Blank lines are skipped.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or `JsonlParse` with the
/// 1-based line number of the first malformed record.
pub fn read_jsonl(path: &Path) -> Result<Vec<Issue>> {
    let file = File::open(path)?;
    let issues = parse_jsonl(BufReader::new(file))?;
    debug!(path = %path.display(), count = issues.len(), "Read JSONL snapshot");
    Ok(issues)
}

/// Parse issues from any buffered reader.
///
/// # Errors
///
/// Same as [`read_jsonl`].
pub fn parse_jsonl<R: BufRead>(reader: R) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let issue: Issue = serde_json::from_str(&line).map_err(|e| DeskError::JsonlParse {
            line: line_num + 1,
            reason: e.to_string(),
        })?;
        issues.push(issue);
    }

    Ok(issues)
}

/// Write issues as compact JSON, one per line. Returns the number written.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_jsonl<W: Write>(writer: &mut W, issues: &[Issue]) -> Result<usize> {
    for issue in issues {
        let json = serde_json::to_string(issue)?;
        writeln!(writer, "{json}")?;
    }
    writer.flush()?;
    Ok(issues.len())
}

//! Storage layer for `issue_desk`.
//!
//! Records live in memory for the lifetime of a process. Snapshots are
//! loaded from JSONL files or generated by the demo dataset.

pub mod demo;
pub mod jsonl;
mod memory;

pub use demo::{DEFAULT_DEMO_COUNT, demo_issues};
pub use jsonl::{read_jsonl, write_jsonl};
pub use memory::MemoryStorage;

//! `issue_desk` - a small issue tracker with a deterministic query engine.
//!
//! The crate is split into a record store that owns issue lifecycles and a
//! stateless query engine that pages through a snapshot of that store:
//!
//! - [`storage`] - in-memory record store, JSONL snapshots, demo dataset
//! - [`query`] - filter, search, sort and paginate over a snapshot
//! - [`model`] - `Issue`, `Status`, `Priority` and their create/update shapes
//! - [`config`] - layered configuration (YAML, env, CLI)
//! - [`cli`] - the `idesk` command-line front end

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod query;
pub mod storage;
pub mod util;
pub mod validation;

pub use error::{DeskError, ErrorCode, Result, StructuredError};
pub use model::{Issue, IssueUpdate, NewIssue, Priority, Status};
pub use query::{PageResult, QueryEngine, QueryRequest, SortDirection, SortField, query};
pub use storage::MemoryStorage;

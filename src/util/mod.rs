//! Shared utilities for `issue_desk`.
//!
//! - ID generation (base36 hash with adaptive length)
//! - Locale-aware date labels (month names, locale date string)

pub mod id;
pub mod time;

pub use id::{IdConfig, IdGenerator, compute_id_hash};
pub use time::{DateLabeler, DisplayZone, parse_locale};

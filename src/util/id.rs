//! ID generation for issues.
//!
//! IDs have the form `<prefix>-<hash>` where hash is base36 lowercase
//! (0-9, a-z) whose length grows with the store size to keep collisions
//! unlikely. Callers treat IDs as opaque strings.

use crate::error::{DeskError, Result};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Nonces tried at each short hash length.
const NONCES_PER_LENGTH: u32 = 10;
/// Hash length of the last-resort candidates.
const WIDE_HASH_LENGTH: usize = 12;
/// Last-resort candidates tried before giving up.
const WIDE_ATTEMPTS: u32 = 1_000;

/// ID generation configuration.
#[derive(Debug, Clone)]
pub struct IdConfig {
    /// Issue ID prefix (e.g., "iss").
    pub prefix: String,
    /// Minimum hash length.
    pub min_hash_length: usize,
    /// Maximum hash length.
    pub max_hash_length: usize,
    /// Maximum collision probability before increasing length.
    pub max_collision_prob: f64,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            prefix: "iss".to_string(),
            min_hash_length: 3,
            max_hash_length: 8,
            max_collision_prob: 0.25,
        }
    }
}

impl IdConfig {
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }
}

/// ID generator that produces unique issue IDs.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    config: IdConfig,
}

impl IdGenerator {
    #[must_use]
    pub const fn new(config: IdConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }

    /// Compute the shortest hash length whose collision probability for
    /// `issue_count` IDs stays under the configured bound.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn optimal_length(&self, issue_count: usize) -> usize {
        let n = issue_count as f64;
        let max_prob = self.config.max_collision_prob;

        for len in self.config.min_hash_length..=self.config.max_hash_length {
            let space = 36_f64.powi(len as i32);
            // Birthday bound: P(collision) ~ 1 - e^(-n^2/2d)
            let prob = 1.0 - (-n * n / (2.0 * space)).exp();
            if prob < max_prob {
                return len;
            }
        }
        self.config.max_hash_length
    }

    /// Generate a candidate ID with the given parameters.
    #[must_use]
    pub fn generate_candidate(
        &self,
        title: &str,
        description: &str,
        created_at: DateTime<Utc>,
        nonce: u32,
        hash_length: usize,
    ) -> String {
        let seed = generate_id_seed(title, description, created_at, nonce);
        let hash_str = compute_id_hash(&seed, hash_length);
        format!("{}-{hash_str}", self.config.prefix)
    }

    /// Generate an ID, retrying while `exists` reports a collision.
    ///
    /// Candidates run from the optimal length up to `max_hash_length`, then
    /// through a bounded set of wide hashes.
    ///
    /// # Errors
    ///
    /// Returns `IdCollision` with the last candidate when every attempt is
    /// taken.
    pub fn generate<F>(
        &self,
        title: &str,
        description: &str,
        created_at: DateTime<Utc>,
        issue_count: usize,
        exists: F,
    ) -> Result<String>
    where
        F: Fn(&str) -> bool,
    {
        let short = (self.optimal_length(issue_count)..=self.config.max_hash_length)
            .flat_map(|length| (0..NONCES_PER_LENGTH).map(move |nonce| (length, nonce)));
        let wide = (NONCES_PER_LENGTH..NONCES_PER_LENGTH + WIDE_ATTEMPTS)
            .map(|nonce| (WIDE_HASH_LENGTH, nonce));

        let mut last = String::new();
        for (length, nonce) in short.chain(wide) {
            let id = self.generate_candidate(title, description, created_at, nonce, length);
            if !exists(&id) {
                return Ok(id);
            }
            last = id;
        }
        Err(DeskError::IdCollision { id: last })
    }
}

/// Seed string for ID generation: `title | description | created_at (ns) | nonce`.
#[must_use]
pub fn generate_id_seed(
    title: &str,
    description: &str,
    created_at: DateTime<Utc>,
    nonce: u32,
) -> String {
    format!(
        "{}|{}|{}|{}",
        title,
        description,
        created_at.timestamp_nanos_opt().unwrap_or(0),
        nonce
    )
}

/// Compute a base36 hash of the input string with a specific length.
///
/// Uses the first 8 bytes of the SHA256 digest as a `u64`.
#[must_use]
pub fn compute_id_hash(input: &str, length: usize) -> String {
    let digest = Sha256::digest(input.as_bytes());

    let mut num = 0u64;
    for &byte in digest.iter().take(8) {
        num = (num << 8) | u64::from(byte);
    }

    let encoded = base36_encode(num);
    let padded = if encoded.len() < length {
        format!("{encoded:0>length$}")
    } else {
        encoded
    };

    padded.chars().take(length).collect()
}

fn base36_encode(mut num: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while num > 0 {
        chars.push(ALPHABET[(num % 36) as usize] as char);
        num /= 36;
    }
    chars.into_iter().rev().collect()
}

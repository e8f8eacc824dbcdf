//! # Credential Identifiers
//!
//! [`CredentialId`] is the newtype carried in a credential's `id` field, and
//! [`IdGenerator`] is the issuer-controlled source that mints them.
//!
//! ## Invariant
//!
//! A generator never returns the same id twice for the lifetime of the
//! process. [`UuidIdGenerator`] relies on 122 random bits per id;
//! [`SequentialIdGenerator`] relies on an atomic fetch-add.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Prefix used when no issuer profile supplies one.
pub const DEFAULT_ID_PREFIX: &str = "urn:uuid:";

/// Identifier of a single issued credential (URN or URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(String);

impl CredentialId {
    /// Wrap an identifier string, rejecting empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::InvalidCredentialId(
                "credential id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Borrow the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty. Only reachable through deserialization.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CredentialId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Issuer-controlled source of fresh credential identifiers.
pub trait IdGenerator: Send + Sync {
    /// Mint a new identifier. Must never repeat within the process.
    fn next_id(&self) -> CredentialId;
}

/// Random UUID v4 identifiers behind a configurable prefix.
#[derive(Debug, Clone)]
pub struct UuidIdGenerator {
    prefix: String,
}

impl UuidIdGenerator {
    /// Generator producing `<prefix><uuid>`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for UuidIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> CredentialId {
        CredentialId(format!("{}{}", self.prefix, Uuid::new_v4()))
    }
}

/// Monotonic counter identifiers behind a configurable prefix.
///
/// Unique only within one process lifetime: a restart resets the counter.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Generator producing `<prefix>1`, `<prefix>2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// Generator whose first id ends in `start`.
    pub fn starting_at(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> CredentialId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        CredentialId(format!("{}{}", self.prefix, n))
    }
}

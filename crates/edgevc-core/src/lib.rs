//! # edgevc-core: Foundational Types for edge-vc
//!
//! The leaf crate of the workspace. Defines the primitives the credential
//! pipeline depends on but does not own:
//!
//! 1. **UTC-only, second-precision timestamps.** [`Timestamp`] truncates
//!    sub-second components at construction and renders as
//!    `YYYY-MM-DDTHH:MM:SSZ`, the form carried in `issuanceDate`.
//!
//! 2. **Injected time.** The pipeline never calls `Utc::now()` directly; it
//!    reads a [`Clock`]. Production uses [`SystemClock`], tests pin time with
//!    [`FixedClock`].
//!
//! 3. **Injected identifiers.** Every issued credential receives a fresh
//!    [`CredentialId`] from an [`IdGenerator`]. Both shipped generators are
//!    `Send + Sync` and never hand out the same id twice within a process.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `edgevc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod clock;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CoreError;
pub use identity::{
    CredentialId, IdGenerator, SequentialIdGenerator, UuidIdGenerator, DEFAULT_ID_PREFIX,
};
pub use temporal::Timestamp;

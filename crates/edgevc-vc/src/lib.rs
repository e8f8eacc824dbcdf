//! # edgevc-vc: Verifiable Credential Issuance
//!
//! Turns an untrusted claim set into a validated, unsigned W3C Verifiable
//! Credential.
//!
//! ```text
//! ClaimInput ──build──▶ CandidateCredential ──validate──▶ Credential
//!              (clock, id source)              (rules 1-6)
//! ```
//!
//! - [`claims`]: request shape, with lenient absent-field decoding.
//! - [`credential`]: the VC envelope and its two typestates.
//! - [`builder`]: infallible assembly of issuer-controlled fields.
//! - [`validator`]: ordered rule checks ending in JSON Schema conformance.
//! - [`schema`]: the embedded VC JSON Schema.
//! - [`pipeline`]: build-then-validate over shared collaborators.
//!
//! Signing, storage, and revocation are outside this crate.

pub mod builder;
pub mod claims;
pub mod credential;
pub mod pipeline;
pub mod schema;
pub mod validator;

pub use builder::build;
pub use claims::{ClaimInput, Issuer, Subject};
pub use credential::{
    CandidateCredential, Credential, CredentialDocument, TypedId, BASE_CONTEXT, VC_TYPE,
};
pub use pipeline::IssuancePipeline;
pub use validator::{validate, ValidationError};

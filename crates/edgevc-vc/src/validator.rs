//! # Credential Validator
//!
//! Promotes a [`CandidateCredential`] to a [`Credential`] or rejects it with
//! the first rule it violates. Rules run in a fixed order and short-circuit:
//!
//! | # | Rule | Error |
//! |---|------|-------|
//! | 1 | subject carries a non-empty string `id` | [`ValidationError::MissingSubjectId`] |
//! | 2 | issuer `id` non-empty after trimming | [`ValidationError::MissingIssuerId`] |
//! | 3 | at least one type | [`ValidationError::EmptyType`] |
//! | 4 | first context is the base context | [`ValidationError::InvalidContext`] |
//! | 5 | issuance date not in the future | [`ValidationError::InvalidIssuanceDate`] |
//! | 6 | document conforms to the embedded schema | [`ValidationError::SchemaViolation`] |
//!
//! Validation is a pure function of the candidate and `now`.

use thiserror::Error;

use edgevc_core::Timestamp;

use crate::credential::{CandidateCredential, Credential, BASE_CONTEXT};
use crate::schema;

/// The rule a candidate credential violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("credentialSubject must contain a non-empty string id")]
    MissingSubjectId,

    #[error("issuer id must not be empty")]
    MissingIssuerId,

    #[error("type must contain at least one entry")]
    EmptyType,

    #[error(
        "first @context entry must be {expected}, found {}",
        found.as_deref().unwrap_or("nothing")
    )]
    InvalidContext {
        expected: String,
        found: Option<String>,
    },

    #[error("issuanceDate {issued} is later than the current time {now}")]
    InvalidIssuanceDate { issued: Timestamp, now: Timestamp },

    #[error("credential does not conform to the VC schema: {0}")]
    SchemaViolation(String),
}

impl ValidationError {
    /// Machine-readable code naming the violated rule.
    pub fn rule(&self) -> &'static str {
        match self {
            Self::MissingSubjectId => "MISSING_SUBJECT_ID",
            Self::MissingIssuerId => "MISSING_ISSUER_ID",
            Self::EmptyType => "EMPTY_TYPE",
            Self::InvalidContext { .. } => "INVALID_CONTEXT",
            Self::InvalidIssuanceDate { .. } => "INVALID_ISSUANCE_DATE",
            Self::SchemaViolation(_) => "SCHEMA_VIOLATION",
        }
    }
}

/// Validate `candidate` as of `now`.
pub fn validate(candidate: CandidateCredential, now: Timestamp) -> Result<Credential, ValidationError> {
    let doc = candidate.document();

    match doc.subject.id() {
        Some(id) if !id.trim().is_empty() => {}
        _ => return Err(ValidationError::MissingSubjectId),
    }

    if doc.issuer.id.trim().is_empty() {
        return Err(ValidationError::MissingIssuerId);
    }

    if doc.types.is_empty() {
        return Err(ValidationError::EmptyType);
    }

    let first = doc.context.first();
    if first.map(String::as_str) != Some(BASE_CONTEXT) {
        return Err(ValidationError::InvalidContext {
            expected: BASE_CONTEXT.to_string(),
            found: first.cloned(),
        });
    }

    if doc.issuance_date > now {
        return Err(ValidationError::InvalidIssuanceDate {
            issued: doc.issuance_date,
            now,
        });
    }

    let value = serde_json::to_value(doc)
        .map_err(|e| ValidationError::SchemaViolation(format!("not representable as JSON: {e}")))?;
    schema::check(&value).map_err(ValidationError::SchemaViolation)?;

    Ok(candidate.into_validated())
}

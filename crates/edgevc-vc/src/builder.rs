//! # Credential Builder
//!
//! Assembles a [`CandidateCredential`] from caller claims plus the fields the
//! issuer controls: identifier, issuance time, and base context. Building is
//! infallible and performs no I/O; every judgement is left to the validator.

use edgevc_core::{IdGenerator, Timestamp};

use crate::claims::ClaimInput;
use crate::credential::{CandidateCredential, CredentialDocument, BASE_CONTEXT, VC_TYPE};

/// Build a candidate credential issued at `now` with an id from `ids`.
pub fn build(input: ClaimInput, now: Timestamp, ids: &dyn IdGenerator) -> CandidateCredential {
    let ClaimInput {
        subject,
        issuer,
        types,
        context,
    } = input;

    CandidateCredential::new(CredentialDocument {
        context: contexts(context),
        id: ids.next_id(),
        types: with_base_type(types),
        issuer,
        subject,
        issuance_date: now,
        schemas: Vec::new(),
    })
}

fn contexts(extra: Option<String>) -> Vec<String> {
    let mut out = vec![BASE_CONTEXT.to_string()];
    if let Some(extra) = extra {
        let extra = extra.trim();
        if !extra.is_empty() && extra != BASE_CONTEXT {
            out.push(extra.to_string());
        }
    }
    out
}

fn with_base_type(mut types: Vec<String>) -> Vec<String> {
    if !types.iter().any(|t| t == VC_TYPE) {
        types.insert(0, VC_TYPE.to_string());
    }
    types
}

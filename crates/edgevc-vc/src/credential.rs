//! # Credential Document
//!
//! The W3C VC envelope in two typestates:
//!
//! - [`CandidateCredential`]: assembled by the builder, not yet checked.
//! - [`Credential`]: a candidate that passed every validation rule.
//!
//! Both wrap the same [`CredentialDocument`], so promotion from one to the
//! other is a move. `Credential` has no public constructor and does not
//! implement `Deserialize`; the only way to obtain one is
//! [`crate::validator::validate`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use edgevc_core::{CredentialId, Timestamp};

use crate::claims::{Issuer, Subject};

/// The mandatory first `@context` entry of every credential.
pub const BASE_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// The base type every credential carries.
pub const VC_TYPE: &str = "VerifiableCredential";

/// A `{id, type}` reference, as used by `credentialSchema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TypedId {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The credential envelope as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CredentialDocument {
    /// JSON-LD contexts. Element 0 is [`BASE_CONTEXT`].
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Issuer-assigned identifier, unique per issuance.
    #[schema(value_type = String)]
    pub id: CredentialId,

    /// Credential types, `VerifiableCredential` first.
    #[serde(rename = "type")]
    pub types: Vec<String>,

    pub issuer: Issuer,

    #[serde(rename = "credentialSubject")]
    #[schema(value_type = Object)]
    pub subject: Subject,

    /// UTC, whole seconds, `YYYY-MM-DDTHH:MM:SSZ`.
    #[serde(rename = "issuanceDate")]
    #[schema(value_type = String, example = "2026-03-01T08:00:00Z")]
    pub issuance_date: Timestamp,

    /// Schema references. Always serialized, empty by default.
    #[serde(rename = "credentialSchema", default)]
    pub schemas: Vec<TypedId>,
}

/// A credential document that has not been validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateCredential(CredentialDocument);

impl CandidateCredential {
    pub fn new(document: CredentialDocument) -> Self {
        Self(document)
    }

    pub fn document(&self) -> &CredentialDocument {
        &self.0
    }

    pub fn document_mut(&mut self) -> &mut CredentialDocument {
        &mut self.0
    }

    pub fn into_document(self) -> CredentialDocument {
        self.0
    }

    /// Promote to a [`Credential`]. Only the validator calls this.
    pub(crate) fn into_validated(self) -> Credential {
        Credential(self.0)
    }
}

/// A validated credential, ready to encode.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Credential(CredentialDocument);

impl Credential {
    pub fn document(&self) -> &CredentialDocument {
        &self.0
    }

    pub fn id(&self) -> &CredentialId {
        &self.0.id
    }

    pub fn issuance_date(&self) -> Timestamp {
        self.0.issuance_date
    }

    pub fn context(&self) -> &[String] {
        &self.0.context
    }

    pub fn types(&self) -> &[String] {
        &self.0.types
    }

    pub fn issuer(&self) -> &Issuer {
        &self.0.issuer
    }

    pub fn subject(&self) -> &Subject {
        &self.0.subject
    }

    /// Demote back to a candidate, e.g. to re-run validation.
    pub fn into_candidate(self) -> CandidateCredential {
        CandidateCredential(self.0)
    }
}

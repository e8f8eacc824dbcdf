//! # Issuance Pipeline
//!
//! Binds the builder and validator to the two shared collaborators, a
//! [`Clock`] and an [`IdGenerator`]. One pipeline is created at startup
//! and shared by every request handler; it holds no other state.

use std::fmt;
use std::sync::Arc;

use edgevc_core::{Clock, IdGenerator, SystemClock, UuidIdGenerator};

use crate::builder::build;
use crate::claims::ClaimInput;
use crate::credential::Credential;
use crate::validator::{validate, ValidationError};

/// Build-then-validate over injected time and identifiers.
#[derive(Clone)]
pub struct IssuancePipeline {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl IssuancePipeline {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Issue one credential from caller claims.
    ///
    /// The clock is read once to stamp `issuanceDate` and again as the
    /// validator's notion of "now", so a credential is never judged against
    /// an instant earlier than its own issuance.
    pub fn issue(&self, input: ClaimInput) -> Result<Credential, ValidationError> {
        let candidate = build(input, self.clock.now(), self.ids.as_ref());
        tracing::debug!(id = %candidate.document().id, "built candidate credential");

        let credential = validate(candidate, self.clock.now())?;
        tracing::debug!(id = %credential.id(), "credential validated");
        Ok(credential)
    }
}

impl Default for IssuancePipeline {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidIdGenerator::default()))
    }
}

impl fmt::Debug for IssuancePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuancePipeline")
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}

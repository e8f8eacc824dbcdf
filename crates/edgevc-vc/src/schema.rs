//! # Embedded VC JSON Schema
//!
//! The W3C Verifiable Credential envelope schema (Draft 7) is compiled into
//! the binary and built into a [`jsonschema::Validator`] on first use. The
//! validator applies it as its final rule, after the cheaper field checks.

use std::sync::OnceLock;

use jsonschema::{Draft, Validator};
use serde_json::Value;

/// Raw text of the embedded schema.
pub const VC_SCHEMA: &str = include_str!("../schemas/verifiable-credential.schema.json");

static COMPILED: OnceLock<Result<Validator, String>> = OnceLock::new();

fn compiled() -> Result<&'static Validator, String> {
    COMPILED
        .get_or_init(|| {
            let schema: Value = serde_json::from_str(VC_SCHEMA)
                .map_err(|e| format!("embedded schema is not valid JSON: {e}"))?;
            jsonschema::options()
                .with_draft(Draft::Draft7)
                .build(&schema)
                .map_err(|e| format!("embedded schema failed to compile: {e}"))
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// Check a serialized credential against the embedded schema.
///
/// Returns the first violation as `<json-pointer>: <message>`.
pub fn check(document: &Value) -> Result<(), String> {
    let validator = compiled()?;
    match validator.iter_errors(document).next() {
        None => Ok(()),
        Some(err) => {
            let path = err.instance_path.to_string();
            let path = if path.is_empty() { "/".to_string() } else { path };
            Err(format!("{path}: {err}"))
        }
    }
}

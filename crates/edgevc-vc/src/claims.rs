//! # Claim Model
//!
//! The untrusted request shape ([`ClaimInput`]) and its two structured parts,
//! [`Subject`] and [`Issuer`].
//!
//! Every field decodes to its empty value when absent or `null`. A claim set
//! without a subject id or issuer id is therefore well-formed JSON that the
//! validator rejects with a precise rule, rather than an opaque decode
//! failure. Fields with the wrong JSON shape still fail to decode, and the
//! error names the field.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Caller-supplied claims for one credential.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClaimInput {
    /// Claims about the entity the credential describes. Must carry `id`.
    #[serde(
        rename = "credentialSubject",
        default,
        deserialize_with = "null_as_default"
    )]
    #[schema(value_type = Object)]
    pub subject: Subject,

    /// The asserting party.
    #[serde(default, deserialize_with = "null_as_default")]
    pub issuer: Issuer,

    /// Credential subtypes, e.g. `UniversityDegreeCredential`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,

    /// One extra JSON-LD context URI, appended after the base context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Open-ended claim mapping about the credential subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(Map<String, Value>);

impl Subject {
    /// Empty subject.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Subject with only an `id` claim.
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut claims = Map::new();
        claims.insert("id".to_string(), Value::String(id.into()));
        Self(claims)
    }

    /// The subject's `id` claim, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Look up an arbitrary claim.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a claim, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove a claim.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Number of claims, `id` included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the subject carries no claims at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Subject {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

/// The issuing entity.
///
/// Accepts either the object form `{"id": ..., "name": ...}` or a bare id
/// string on input; always serializes as the object form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Issuer {
    /// Stable issuer identifier, typically a DID.
    pub id: String,

    /// Optional display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Issuer {
    /// Issuer with an id and no display name.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

struct IssuerVisitor;

impl<'de> Visitor<'de> for IssuerVisitor {
    type Value = Issuer;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(r#"issuer as a string id or an object with string "id""#)
    }

    fn visit_str<E: de::Error>(self, id: &str) -> Result<Issuer, E> {
        Ok(Issuer::new(id))
    }

    fn visit_string<E: de::Error>(self, id: String) -> Result<Issuer, E> {
        Ok(Issuer::new(id))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Issuer, E> {
        Ok(Issuer::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Issuer, A::Error> {
        let mut issuer = Issuer::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "id" => {
                    issuer.id = match map.next_value::<Value>()? {
                        Value::String(id) => id,
                        Value::Null => String::new(),
                        _ => return Err(de::Error::custom("issuer id must be a string")),
                    };
                }
                "name" => {
                    issuer.name = match map.next_value::<Value>()? {
                        Value::String(name) => Some(name),
                        Value::Null => None,
                        _ => return Err(de::Error::custom("issuer name must be a string")),
                    };
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(issuer)
    }
}

impl<'de> Deserialize<'de> for Issuer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IssuerVisitor)
    }
}

//! Metadata records written by the training executable (`info.txt`).
//!
//! A record is treated as an opaque JSON object except for the handful of
//! fields compared during result location. Lookups are read-only.

use serde_json::{Map, Value};

use crate::grid::ParamValue;
use crate::identity::ExperimentIdentity;

/// A parsed run-metadata document.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    fields: Map<String, Value>,
}

impl MetadataRecord {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_str(raw)?;
        Ok(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Exact numeric equality against a recorded field. The writer may store
    /// `50` or `50.0`; both compare equal to an integer 50.
    pub fn matches_number(&self, key: &str, expected: ParamValue) -> bool {
        self.fields.get(key).and_then(Value::as_f64) == Some(expected.as_f64())
    }

    /// Whether this record describes `identity`: the environment name plus
    /// every field the identity carries must match exactly.
    pub fn matches_identity(&self, identity: &ExperimentIdentity) -> bool {
        if self.get_str("env_name") != Some(identity.env.as_str()) {
            return false;
        }
        identity
            .fields()
            .into_iter()
            .all(|(key, expected)| self.matches_number(key, expected))
    }
}

//! Experiment identities and override sets.
//!
//! An [`ExperimentIdentity`] is the tuple of parameter values that uniquely
//! designates one training run. A single ordered field list
//! ([`ExperimentIdentity::fields`]) drives command-line serialization, run
//! naming, and metadata matching, so adding a new identity field (as happened
//! with `seed`) stays a one-place change.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{SweepError, SweepResult};
use crate::grid::ParamValue;

/// Identifies exactly one training run. Equality is structural; two
/// identities with different `env` are never the same run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentIdentity {
    pub env: String,
    pub theta: f64,
    pub frac: f64,
    pub time_steps: i64,
    pub k: i64,
    /// Only carried by later-revision runs; absent identities match any
    /// recorded seed.
    pub seed: Option<i64>,
}

impl ExperimentIdentity {
    /// The ordered `(metadata key, value)` list for every grid-driven field.
    ///
    /// `seed` appears only when the identity carries one. `env` is kept
    /// separate because it is a string and is matched against the `env_name`
    /// metadata key.
    pub fn fields(&self) -> Vec<(&'static str, ParamValue)> {
        let mut fields = vec![
            ("theta", ParamValue::Float(self.theta)),
            ("frac", ParamValue::Float(self.frac)),
            ("time_steps", ParamValue::Int(self.time_steps)),
            ("K", ParamValue::Int(self.k)),
        ];
        if let Some(seed) = self.seed {
            fields.push(("seed", ParamValue::Int(seed)));
        }
        fields
    }

    /// Set one grid-named field. Fails with a validation error for names the
    /// identity does not know or values of the wrong kind.
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> SweepResult<()> {
        match (name, value) {
            ("theta", ParamValue::Float(v)) => self.theta = v,
            ("frac", ParamValue::Float(v)) => self.frac = v,
            ("time_steps", ParamValue::Int(v)) => self.time_steps = v,
            ("K", ParamValue::Int(v)) => self.k = v,
            ("seed", ParamValue::Int(v)) => self.seed = Some(v),
            ("theta" | "frac", ParamValue::Int(_)) => {
                return Err(SweepError::Validation(format!(
                    "{name} expects a float value"
                )))
            }
            ("time_steps" | "K" | "seed", ParamValue::Float(_)) => {
                return Err(SweepError::Validation(format!(
                    "{name} expects an integer value"
                )))
            }
            _ => {
                return Err(SweepError::UnknownParameter {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Human-readable run name matching the directory-name scheme the
    /// training executable uses.
    pub fn run_name(&self) -> String {
        let mut name = format!(
            "Steps_{}_theta_{}_frac_p_{}_random_K_{}_{}",
            self.time_steps, self.theta, self.frac, self.k, self.env
        );
        if let Some(seed) = self.seed {
            name.push_str(&format!("_seed_{seed}"));
        }
        name
    }
}

impl fmt::Display for ExperimentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.run_name())
    }
}

/// Caller-supplied explicit values for non-swept axes. Absent entries fall
/// back to the grid baseline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideSet {
    entries: Vec<(String, ParamValue)>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn set(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ExperimentIdentity {
        ExperimentIdentity {
            env: "h1-walk-v0".to_string(),
            theta: 0.3,
            frac: 0.2,
            time_steps: 50,
            k: 1,
            seed: None,
        }
    }

    #[test]
    fn run_name_without_seed() {
        assert_eq!(
            identity().run_name(),
            "Steps_50_theta_0.3_frac_p_0.2_random_K_1_h1-walk-v0"
        );
    }

    #[test]
    fn run_name_with_seed() {
        let mut id = identity();
        id.seed = Some(7);
        assert_eq!(
            id.run_name(),
            "Steps_50_theta_0.3_frac_p_0.2_random_K_1_h1-walk-v0_seed_7"
        );
    }

    #[test]
    fn fields_include_seed_only_when_carried() {
        let mut id = identity();
        assert_eq!(id.fields().len(), 4);

        id.seed = Some(3);
        let fields = id.fields();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[4], ("seed", ParamValue::Int(3)));
    }

    #[test]
    fn set_param_enforces_kinds() {
        let mut id = identity();
        id.set_param("theta", ParamValue::Float(0.8)).unwrap();
        assert_eq!(id.theta, 0.8);

        assert!(matches!(
            id.set_param("theta", ParamValue::Int(1)),
            Err(SweepError::Validation(_))
        ));
        assert!(matches!(
            id.set_param("K", ParamValue::Float(3.0)),
            Err(SweepError::Validation(_))
        ));
        assert!(matches!(
            id.set_param("bogus", ParamValue::Int(1)),
            Err(SweepError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn override_set_last_write_wins() {
        let mut overrides = OverrideSet::new().set("theta", ParamValue::Float(0.3));
        overrides.insert("theta", ParamValue::Float(0.7));
        assert_eq!(overrides.get("theta"), Some(ParamValue::Float(0.7)));
        assert!(overrides.is_set("theta"));
        assert!(!overrides.is_set("frac"));
    }

    #[test]
    fn identities_differing_in_env_are_distinct() {
        let a = identity();
        let mut b = identity();
        b.env = "h1-run-v0".to_string();
        assert_ne!(a, b);
    }
}

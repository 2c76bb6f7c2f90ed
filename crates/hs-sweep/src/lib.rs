//! Grid validation, identity expansion, and process orchestration for
//! HyperSweep.
//!
//! Provides:
//! - The positional override validation rule ([`validate_overrides`])
//! - Deterministic grid-to-identity expansion ([`expand_identities`])
//! - A bounded worker pool that launches one training process per identity
//!   and collects outcomes in completion order ([`ProcessRunner`])

mod expand;
mod runner;
mod validate;

pub use expand::expand_identities;
pub use runner::{ProcessRunner, RunnerConfig};
pub use validate::validate_overrides;

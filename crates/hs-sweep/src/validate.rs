//! The positional override rule.
//!
//! Walking the grid in declaration order, every axis strictly *before* the
//! optimized one must be overridden explicitly, and the optimized axis plus
//! every axis *after* it must not be. The rule depends only on declaration
//! order, not on any semantic ranking of the parameters; it is kept in one
//! pure function so the policy can be tested (and, if ever relaxed, changed)
//! in isolation.

use hs_types::{OverrideSet, SweepError, SweepGrid, SweepResult};

/// Check an override set against the grid for the given optimized axis.
///
/// Pure; no side effects. Fails before anything is launched.
pub fn validate_overrides(
    grid: &SweepGrid,
    optimized: &str,
    overrides: &OverrideSet,
) -> SweepResult<()> {
    if !grid.contains(optimized) {
        return Err(SweepError::UnknownParameter {
            name: optimized.to_string(),
        });
    }

    for name in overrides.names() {
        if !grid.contains(name) {
            return Err(SweepError::Validation(format!(
                "override for {name} does not name a grid parameter"
            )));
        }
    }

    let mut should_be_set = true;
    for axis in &grid.axes {
        if axis.name == optimized {
            should_be_set = false;
        }
        if overrides.is_set(&axis.name) != should_be_set {
            return Err(SweepError::Validation(format!(
                "only hyperparameters before the optimized one must be set explicitly (error for {})",
                axis.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hs_types::ParamValue;

    fn grid() -> SweepGrid {
        SweepGrid::new()
            .axis_floats("theta", &[0.3, 0.5, 0.7, 0.8])
            .axis_floats("frac", &[0.2, 0.5, 0.7, 1.0])
            .axis_ints("time_steps", &[50, 200])
            .axis_ints("K", &[1, 3])
    }

    #[test]
    fn first_axis_needs_no_overrides() {
        assert!(validate_overrides(&grid(), "theta", &OverrideSet::new()).is_ok());
    }

    #[test]
    fn every_earlier_axis_must_be_set() {
        let overrides = OverrideSet::new()
            .set("theta", ParamValue::Float(0.3))
            .set("frac", ParamValue::Float(0.2))
            .set("time_steps", ParamValue::Int(50));
        assert!(validate_overrides(&grid(), "K", &overrides).is_ok());

        // Dropping any one earlier axis breaks the pattern.
        let partial = OverrideSet::new()
            .set("theta", ParamValue::Float(0.3))
            .set("time_steps", ParamValue::Int(50));
        assert!(matches!(
            validate_overrides(&grid(), "K", &partial),
            Err(SweepError::Validation(_))
        ));
    }

    #[test]
    fn optimized_axis_must_not_be_set() {
        let overrides = OverrideSet::new().set("theta", ParamValue::Float(0.3));
        assert!(matches!(
            validate_overrides(&grid(), "theta", &overrides),
            Err(SweepError::Validation(_))
        ));
    }

    #[test]
    fn later_axes_are_forbidden_not_optional() {
        let overrides = OverrideSet::new()
            .set("theta", ParamValue::Float(0.3))
            .set("K", ParamValue::Int(3));
        assert!(matches!(
            validate_overrides(&grid(), "frac", &overrides),
            Err(SweepError::Validation(_))
        ));
    }

    #[test]
    fn middle_axis_accepts_exactly_the_prefix() {
        let overrides = OverrideSet::new()
            .set("theta", ParamValue::Float(0.5))
            .set("frac", ParamValue::Float(0.7));
        assert!(validate_overrides(&grid(), "time_steps", &overrides).is_ok());
    }

    #[test]
    fn unknown_optimized_parameter_is_rejected() {
        assert!(matches!(
            validate_overrides(&grid(), "gamma", &OverrideSet::new()),
            Err(SweepError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn unknown_override_name_is_rejected() {
        let overrides = OverrideSet::new().set("gamma", ParamValue::Float(0.99));
        assert!(matches!(
            validate_overrides(&grid(), "theta", &overrides),
            Err(SweepError::Validation(_))
        ));
    }
}

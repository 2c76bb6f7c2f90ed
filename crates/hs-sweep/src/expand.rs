//! Grid-to-identity expansion.

use hs_types::{ExperimentIdentity, OverrideSet, SweepError, SweepGrid, SweepResult};

/// Expand a sweep into concrete run identities: one per value of the
/// optimized axis, in that axis's declared order.
///
/// Every non-optimized axis takes its override if present, else the grid
/// baseline. Pure function, no I/O. The caller is expected to have run
/// [`crate::validate_overrides`] first; expansion itself only requires that
/// the optimized axis exists.
pub fn expand_identities(
    grid: &SweepGrid,
    optimized: &str,
    overrides: &OverrideSet,
    env: &str,
    seed: Option<i64>,
) -> SweepResult<Vec<ExperimentIdentity>> {
    let axis = grid
        .axis(optimized)
        .ok_or_else(|| SweepError::UnknownParameter {
            name: optimized.to_string(),
        })?;

    let mut identities = Vec::with_capacity(axis.values.len());
    for value in &axis.values {
        let mut identity = baseline_identity(grid, overrides, env, seed)?;
        identity.set_param(optimized, *value)?;
        identities.push(identity);
    }
    Ok(identities)
}

fn baseline_identity(
    grid: &SweepGrid,
    overrides: &OverrideSet,
    env: &str,
    seed: Option<i64>,
) -> SweepResult<ExperimentIdentity> {
    let mut identity = ExperimentIdentity {
        env: env.to_string(),
        theta: 0.0,
        frac: 0.0,
        time_steps: 0,
        k: 0,
        seed,
    };
    for axis in &grid.axes {
        let value = overrides.get(&axis.name).unwrap_or_else(|| axis.baseline());
        identity.set_param(&axis.name, value)?;
    }
    Ok(identity)
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
    fn one_identity_per_grid_value() {
        let identities =
            expand_identities(&grid(), "theta", &OverrideSet::new(), "h1-walk-v0", None).unwrap();
        assert_eq!(identities.len(), 4);

        let thetas: Vec<f64> = identities.iter().map(|id| id.theta).collect();
        assert_eq!(thetas, vec![0.3, 0.5, 0.7, 0.8]);
    }

    #[test]
    fn identities_differ_only_in_the_swept_field() {
        let identities =
            expand_identities(&grid(), "theta", &OverrideSet::new(), "h1-walk-v0", None).unwrap();
        for id in &identities {
            assert_eq!(id.env, "h1-walk-v0");
            assert_eq!(id.frac, 0.2);
            assert_eq!(id.time_steps, 50);
            assert_eq!(id.k, 1);
            assert_eq!(id.seed, None);
        }
    }

    #[test]
    fn overrides_replace_baselines() {
        let overrides = OverrideSet::new()
            .set("theta", ParamValue::Float(0.7))
            .set("frac", ParamValue::Float(1.0))
            .set("time_steps", ParamValue::Int(200));
        let identities =
            expand_identities(&grid(), "K", &overrides, "h1-walk-v0", None).unwrap();

        assert_eq!(identities.len(), 2);
        let ks: Vec<i64> = identities.iter().map(|id| id.k).collect();
        assert_eq!(ks, vec![1, 3]);
        for id in &identities {
            assert_eq!(id.theta, 0.7);
            assert_eq!(id.frac, 1.0);
            assert_eq!(id.time_steps, 200);
        }
    }

    #[test]
    fn seed_threads_through_to_every_identity() {
        let identities =
            expand_identities(&grid(), "theta", &OverrideSet::new(), "h1-walk-v0", Some(5))
                .unwrap();
        assert!(identities.iter().all(|id| id.seed == Some(5)));
    }

    #[test]
    fn single_axis_grid_expands_to_its_values() {
        let grid = SweepGrid::new().axis_floats("theta", &[0.3, 0.5]);
        let identities =
            expand_identities(&grid, "theta", &OverrideSet::new(), "h1-walk-v0", None).unwrap();
        assert_eq!(identities.len(), 2);
        assert_eq!(identities[0].theta, 0.3);
        assert_eq!(identities[1].theta, 0.5);
    }

    #[test]
    fn unknown_axis_fails() {
        assert!(matches!(
            expand_identities(&grid(), "gamma", &OverrideSet::new(), "env", None),
            Err(SweepError::UnknownParameter { .. })
        ));
    }
}

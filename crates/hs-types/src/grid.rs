//! Sweep grid: ordered axes of candidate hyperparameter values.
//!
//! Axis insertion order is significant — it defines both the override
//! validation order and which value is the baseline (index 0 of each axis).
//! The grid is an explicitly constructed value passed into every operation,
//! so sweeps over different grids can coexist in one process.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete hyperparameter value carried by grids, overrides, and
/// identities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
}

impl ParamValue {
    /// Numeric view used for metadata comparison, where JSON writers may
    /// store `50` or `50.0` interchangeably.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Float(v) => v,
            Self::Int(v) => v as f64,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
        }
    }
}

/// One parameter dimension: a name and its ordered, non-empty candidate
/// values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridAxis {
    pub name: String,
    pub values: Vec<ParamValue>,
}

impl GridAxis {
    /// The default value used when an axis is neither swept nor overridden.
    pub fn baseline(&self) -> ParamValue {
        self.values[0]
    }
}

/// The full sweep grid: an ordered list of axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    pub axes: Vec<GridAxis>,
}

impl SweepGrid {
    pub fn new() -> Self {
        Self { axes: Vec::new() }
    }

    pub fn axis_floats(mut self, name: impl Into<String>, values: &[f64]) -> Self {
        assert!(!values.is_empty(), "grid axis must have at least one value");
        self.axes.push(GridAxis {
            name: name.into(),
            values: values.iter().copied().map(ParamValue::Float).collect(),
        });
        self
    }

    pub fn axis_ints(mut self, name: impl Into<String>, values: &[i64]) -> Self {
        assert!(!values.is_empty(), "grid axis must have at least one value");
        self.axes.push(GridAxis {
            name: name.into(),
            values: values.iter().copied().map(ParamValue::Int).collect(),
        });
        self
    }

    pub fn axis(&self, name: &str) -> Option<&GridAxis> {
        self.axes.iter().find(|axis| axis.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.axis(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_order_and_baseline() {
        let grid = SweepGrid::new()
            .axis_floats("theta", &[0.3, 0.5])
            .axis_ints("K", &[1, 3]);

        let names: Vec<&str> = grid.axes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["theta", "K"]);
        assert_eq!(grid.axis("theta").unwrap().baseline(), ParamValue::Float(0.3));
        assert_eq!(grid.axis("K").unwrap().baseline(), ParamValue::Int(1));
        assert!(grid.axis("missing").is_none());
    }

    #[test]
    fn param_value_display_matches_flag_format() {
        assert_eq!(ParamValue::Float(0.3).to_string(), "0.3");
        assert_eq!(ParamValue::Int(50).to_string(), "50");
    }

    #[test]
    fn int_and_float_compare_numerically() {
        assert_eq!(ParamValue::Int(50).as_f64(), ParamValue::Float(50.0).as_f64());
    }
}

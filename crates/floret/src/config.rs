use crate::DEFAULT_RADIUS_FACTOR;
use crate::Result;
use crate::order::Ordering;
use floret_core::{BatchOptions, Canvas, IdentityScale, LinearScale, RadiusScale};
use floret_sim::SimulationOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Radius scale selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScaleConfig {
    #[default]
    Identity,
    Linear { domain: [f64; 2], range: [f64; 2] },
}

impl RadiusScale for ScaleConfig {
    fn scale(&self, value: f64) -> f64 {
        match *self {
            ScaleConfig::Identity => IdentityScale.scale(value),
            ScaleConfig::Linear { domain, range } => LinearScale::new(domain, range).scale(value),
        }
    }
}

/// Every tunable of a layout run. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub batch: BatchOptions,
    pub radius_scale: ScaleConfig,
    pub canvas: Canvas,
    /// Clearance multiplier applied to cluster radii when packing or declumping.
    pub radius_factor: f64,
    pub ordering: Ordering,
    pub simulation: SimulationOptions,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            batch: BatchOptions::default(),
            radius_scale: ScaleConfig::default(),
            canvas: Canvas::default(),
            radius_factor: DEFAULT_RADIUS_FACTOR,
            ordering: Ordering::default(),
            simulation: SimulationOptions::default(),
        }
    }
}

impl LayoutConfig {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_is_the_default_config() {
        let cfg = LayoutConfig::from_value(json!({})).expect("config");
        assert_eq!(cfg, LayoutConfig::default());
        assert_eq!(cfg.radius_factor, 1.2);
    }

    #[test]
    fn nested_fields_override_defaults() {
        let cfg = LayoutConfig::from_json_str(
            r#"{
                "canvas": {"width": 1200, "height": 900},
                "radius_scale": {"kind": "linear", "domain": [0, 1], "range": [0, 3]},
                "batch": {"phyllotaxis": {"spacing": 4.0}},
                "ordering": "input",
                "simulation": {"max_iterations": 50}
            }"#,
        )
        .expect("config");
        assert_eq!(cfg.canvas, Canvas::new(1200.0, 900.0));
        assert_eq!(cfg.radius_scale.scale(2.0), 6.0);
        assert_eq!(cfg.batch.phyllotaxis.spacing, 4.0);
        assert_eq!(cfg.batch.phyllotaxis.point_radius, 2.0);
        assert_eq!(cfg.ordering, Ordering::Input);
        assert_eq!(cfg.simulation.max_iterations, 50);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(LayoutConfig::from_json_str(r#"{"canvas": 3}"#).is_err());
    }
}

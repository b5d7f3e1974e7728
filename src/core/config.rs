//! Options for path overlays.
//!
//! Everything here deserializes from JSON with defaults for missing keys, so a
//! host can hand over a partial options object (`{"maxLimit": 2000}`) and get
//! the same result as filling in every field by hand.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Stroke and fill styling shared by every vector path overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    /// Whether to draw the outline
    pub stroke: bool,
    /// Stroke color (CSS color string)
    pub color: String,
    /// Stroke width in pixels
    pub weight: f32,
    /// Stroke opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Whether to fill the shape. Closed shapes are the only paths here, so
    /// this defaults to `true`.
    pub fill: bool,
    /// Fill color, falls back to `color` when unset
    #[serde(alias = "fillColor")]
    pub fill_color: Option<String>,
    /// Fill opacity (0.0 to 1.0)
    #[serde(alias = "fillOpacity")]
    pub fill_opacity: f32,
    /// Whether the path reacts to pointer events
    pub clickable: bool,
}

impl PathOptions {
    /// Effective fill color
    pub fn fill_color(&self) -> &str {
        self.fill_color.as_deref().unwrap_or(&self.color)
    }
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            stroke: true,
            color: "#0033ff".to_string(),
            weight: 5.0,
            opacity: 0.5,
            fill: true,
            fill_color: None,
            fill_opacity: 0.2,
            clickable: true,
        }
    }
}

/// Options accepted by [`crate::layers::circle::CircleOverlay`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleOptions {
    #[serde(flatten)]
    pub path: PathOptions,
    /// Enable the drag handler on construction (if one is injected)
    pub draggable: bool,
    /// Enable the resize handler on construction (if one is injected)
    pub resizable: bool,
    /// Smallest radius in meters; `None` leaves the lower side unbounded
    #[serde(alias = "minLimit")]
    pub min_limit: Option<f64>,
    /// Largest radius in meters; `None` leaves the upper side unbounded
    #[serde(alias = "maxLimit")]
    pub max_limit: Option<f64>,
}

impl CircleOptions {
    /// Sets both radius limits
    pub fn with_limits(mut self, min_limit: f64, max_limit: f64) -> Self {
        self.min_limit = Some(min_limit);
        self.max_limit = Some(max_limit);
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Parses options from a JSON value and validates them
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let options: CircleOptions = serde_json::from_value(value).map_err(Error::from)?;
        options.validate()?;
        Ok(options)
    }

    /// Rejects limit pairs that cannot hold any radius and out-of-range opacities
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_limit, self.max_limit) {
            if min > max {
                return Err(Error::Config(format!(
                    "min_limit ({min}) is greater than max_limit ({max})"
                ))
                .into());
            }
        }

        for (name, value) in [
            ("opacity", self.path.opacity),
            ("fill_opacity", self.path.fill_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!("{name} must be within 0..=1, got {value}")).into());
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_circle_defaults_fill() {
        let options = CircleOptions::default();
        assert!(options.path.fill);
        assert!(!options.draggable);
        assert!(!options.resizable);
        assert_eq!(options.min_limit, None);
        assert_eq!(options.max_limit, None);
    }

    #[test]
    fn test_from_json_accepts_camel_case_limits() {
        let options =
            CircleOptions::from_json(json!({ "minLimit": 100.0, "maxLimit": 2000.0, "draggable": true }))
                .unwrap();
        assert_eq!(options.min_limit, Some(100.0));
        assert_eq!(options.max_limit, Some(2000.0));
        assert!(options.draggable);
        assert!(options.path.fill);
    }

    #[test]
    fn test_from_json_snake_case_and_style() {
        let options = CircleOptions::from_json(json!({
            "min_limit": 5.0,
            "color": "#ff0000",
            "fill": false,
        }))
        .unwrap();
        assert_eq!(options.min_limit, Some(5.0));
        assert_eq!(options.path.color, "#ff0000");
        assert_eq!(options.path.fill_color(), "#ff0000");
        assert!(!options.path.fill);
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let result = CircleOptions::from_json(json!({ "minLimit": 10.0, "maxLimit": 1.0 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_opacity_rejected() {
        let mut options = CircleOptions::default();
        options.path.fill_opacity = 1.5;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_limits() {
        let options = CircleOptions::default().with_limits(1.0, 2.0).resizable(true);
        let back = CircleOptions::from_json(options.to_json()).unwrap();
        assert_eq!(back, options);
    }
}

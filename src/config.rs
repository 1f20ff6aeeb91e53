// User-facing options. Everything is optional; JavaScript hands us a plain
// object which is read as camelCase JSON.

use crate::color::Color;
use serde::Deserialize;
use thiserror::Error;

/// Logical size of the simulation, independent of how big the canvas is on screen.
pub const RESOLUTION_WIDTH: f64 = 1000.0;
pub const RESOLUTION_HEIGHT: f64 = 200.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must be a positive number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: String,
    /// Passed straight to the canvas, so any CSS color works here.
    pub stroke_color: String,
    pub left_color: Color,
    pub right_color: Color,
    pub particle_radius: f64,
    #[serde(alias = "particleDistance")]
    pub particle_spacing: f64,
    /// Fixed radius for pointer-spawned particles, random when unset.
    pub transient_radius: Option<f64>,
    pub cycle_edge_colors: bool,
    pub display_width: f64,
    pub display_height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            font_size: 120.0,
            font_family: "Helvetica Neue".to_owned(),
            font_weight: "bold".to_owned(),
            stroke_color: "#000000".to_owned(),
            left_color: Color::from_hex("#578fb1"),
            right_color: Color::from_hex("#ff0000"),
            particle_radius: 4.0,
            particle_spacing: 10.0,
            transient_radius: None,
            cycle_edge_colors: false,
            display_width: 800.0,
            display_height: 150.0,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut fields = vec![
            ("fontSize", self.font_size),
            ("particleRadius", self.particle_radius),
            ("particleSpacing", self.particle_spacing),
            ("displayWidth", self.display_width),
            ("displayHeight", self.display_height),
        ];
        if let Some(radius) = self.transient_radius {
            fields.push(("transientRadius", radius));
        }
        for (field, value) in fields {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    /// CSS font shorthand used for both text passes.
    pub fn font(&self) -> String {
        format!("{} {}px {}", self.font_weight, self.font_size, self.font_family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.font(), "bold 120px Helvetica Neue");
        assert_eq!(config.left_color.to_hex(), "#578fb1");
        assert_eq!(config.right_color.to_hex(), "#ff0000");
    }

    #[test]
    fn camel_case_overrides() {
        let config = Config::from_json(
            r##"{
                "fontSize": 64,
                "fontFamily": "Inter",
                "strokeColor": "#222",
                "leftColor": "#000000",
                "rightColor": "#fff",
                "particleDistance": 8,
                "transientRadius": 2,
                "cycleEdgeColors": true
            }"##,
        )
        .unwrap();
        assert_eq!(config.font(), "bold 64px Inter");
        assert_eq!(config.stroke_color, "#222");
        assert_eq!(config.left_color, Color::BLACK);
        assert_eq!(config.right_color, Color::WHITE);
        assert_eq!(config.particle_spacing, 8.0);
        assert_eq!(config.transient_radius, Some(2.0));
        assert!(config.cycle_edge_colors);
        assert_eq!(config.particle_radius, 4.0);
    }

    #[test]
    fn zero_spacing_is_rejected() {
        match Config::from_json(r#"{"particleSpacing": 0}"#) {
            Err(ConfigError::NonPositive { field, value }) => {
                assert_eq!(field, "particleSpacing");
                assert_eq!(value, 0.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(Config::from_json(r#"{"transientRadius": -1}"#).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = Config::from_json(r#"{"fontSize": "big"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("invalid options"));
    }
}

use std::path::{Path, PathBuf};

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::command::DEFAULT_HISTORY_CAPACITY;
use crate::effect::Effect;
use crate::error::ConfigError;

/// A named palette entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub name: String,
    pub rgb: [u8; 3],
}

impl PaletteColor {
    pub fn new(name: &str, rgb: [u8; 3]) -> Self {
        Self {
            name: name.to_owned(),
            rgb,
        }
    }

    pub fn color(&self) -> Rgb<u8> {
        Rgb(self.rgb)
    }
}

/// Startup constants for the palette tool.
///
/// Every field has a default, so a JSON file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: [u8; 3],
    /// Height of the control strip above the canvas
    pub chrome_height: f32,
    pub colors: Vec<PaletteColor>,
    pub brush_sizes: Vec<u32>,
    pub default_brush_index: usize,
    pub effects: Vec<Effect>,
    pub history_capacity: usize,
    pub export_dir: PathBuf,
    /// File extension, also selects the encoder
    pub export_extension: String,
    /// Drop an in-progress stroke when undo, redo or clear replaces the canvas
    pub abort_stroke_on_canvas_swap: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1024,
            canvas_height: 768,
            background: [255, 255, 255],
            chrome_height: 120.0,
            colors: vec![
                PaletteColor::new("Black", [0, 0, 0]),
                PaletteColor::new("White", [255, 255, 255]),
                PaletteColor::new("Red", [255, 0, 0]),
                PaletteColor::new("Green", [0, 255, 0]),
                PaletteColor::new("Blue", [0, 0, 255]),
                PaletteColor::new("Yellow", [255, 255, 0]),
                PaletteColor::new("Cyan", [0, 255, 255]),
                PaletteColor::new("Magenta", [255, 0, 255]),
                PaletteColor::new("Orange", [255, 165, 0]),
                PaletteColor::new("Purple", [128, 0, 128]),
                PaletteColor::new("Brown", [165, 42, 42]),
                PaletteColor::new("Pink", [255, 192, 203]),
            ],
            brush_sizes: vec![2, 5, 10, 15, 20, 30],
            default_brush_index: 1,
            effects: Effect::ALL.to_vec(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            export_dir: PathBuf::from("."),
            export_extension: "png".to_owned(),
            abort_stroke_on_canvas_swap: false,
        }
    }
}

impl PaletteConfig {
    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loading palette config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn background_color(&self) -> Rgb<u8> {
        Rgb(self.background)
    }

    /// Reject values the controller cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.colors.is_empty() {
            return Err(ConfigError::Invalid("palette has no colors".to_owned()));
        }
        if self.brush_sizes.is_empty() || self.brush_sizes.contains(&0) {
            return Err(ConfigError::Invalid("brush sizes must be non-empty and positive".to_owned()));
        }
        if self.default_brush_index >= self.brush_sizes.len() {
            return Err(ConfigError::Invalid(format!(
                "default brush index {} out of range for {} sizes",
                self.default_brush_index,
                self.brush_sizes.len()
            )));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid("history capacity must be positive".to_owned()));
        }
        if !(self.chrome_height > 0.0) {
            return Err(ConfigError::Invalid("chrome height must be positive".to_owned()));
        }
        if image::ImageFormat::from_extension(&self.export_extension).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unsupported export extension '{}'",
                self.export_extension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PaletteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.colors.len(), 12);
        assert_eq!(config.brush_sizes[config.default_brush_index], 5);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config =
            PaletteConfig::from_json_str(r#"{ "canvas_width": 800, "canvas_height": 600, "effects": ["Normal", "Grayscale"] }"#)
                .unwrap();
        assert_eq!((config.canvas_width, config.canvas_height), (800, 600));
        assert_eq!(config.effects, vec![Effect::Normal, Effect::Grayscale]);
        assert_eq!(config.history_capacity, DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            PaletteConfig::from_json_str(r#"{ "canvas_width": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PaletteConfig::from_json_str(r#"{ "default_brush_index": 6 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PaletteConfig::from_json_str(r#"{ "export_extension": "doc" }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(PaletteConfig::from_json_str("{ not json"), Err(ConfigError::Json(_))));
    }
}

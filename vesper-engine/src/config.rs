//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use vesper_core::{RenderContext, SlideResult, SlideSize, Theme, ValidationConfig};
use vesper_layout::{HeuristicMeasurer, SizingConfig, SizingEngine};

/// Top-level engine settings. Every field has a default, so partial JSON
/// documents are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Font size search settings.
    pub sizing: SizingConfig,
    /// Validation limits.
    pub validation: ValidationConfig,
    /// Fallback measurement settings.
    pub heuristic: HeuristicMeasurer,
    /// Visible region used for render contexts.
    pub viewport: SlideSize,
    /// Default output size for generated slides.
    pub slide_size: SlideSize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sizing: SizingConfig::default(),
            validation: ValidationConfig::default(),
            heuristic: HeuristicMeasurer::default(),
            viewport: SlideSize::HD,
            slide_size: SlideSize::HD,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json_str(json: &str) -> SlideResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> SlideResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Sizing engine backed by the heuristic measurer.
    #[must_use]
    pub fn heuristic_sizing_engine(&self) -> SizingEngine {
        SizingEngine::new(Box::new(self.heuristic), self.sizing)
    }

    /// Render context covering the configured viewport.
    #[must_use]
    pub fn render_context(&self, theme: Theme) -> RenderContext {
        RenderContext::new(self.viewport.bounds(), theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.sizing.max_iterations, 10);
        assert_eq!(config.validation.max_text_length, 500);
        assert!((config.heuristic.char_width_ratio - 0.6).abs() < f32::EPSILON);
        assert!((config.viewport.width - 1920.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json() {
        let config =
            EngineConfig::from_json_str(r#"{"sizing": {"max_iterations": 6}}"#).unwrap();
        assert_eq!(config.sizing.max_iterations, 6);
        assert!((config.sizing.default_max_size - 120.0).abs() < f32::EPSILON);
        assert_eq!(config.validation, ValidationConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        assert!(EngineConfig::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"viewport": {{"width": 1280, "height": 720}}, "heuristic": {{"char_width_ratio": 0.5}}}}"#
        )
        .unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert!((config.viewport.width - 1280.0).abs() < f32::EPSILON);
        assert!((config.heuristic.char_width_ratio - 0.5).abs() < f32::EPSILON);

        let engine = config.heuristic_sizing_engine();
        assert_eq!(engine.measurer_name(), "heuristic");
    }

    #[test]
    fn test_missing_file() {
        assert!(EngineConfig::from_file("/nonexistent/vesper.json").is_err());
    }
}

//! # Vesper Preview
//!
//! Renders one slide's content through the full pipeline and prints the
//! resolved slide as JSON.
//!
//! ## Usage
//!
//! ```bash
//! vesper-preview --content john-3-16.json
//! vesper-preview --content notice.json --template announcement --theme light --scale 0.5
//! vesper-preview --validate-template scripture
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `PreviewConfig` - What to render and how, built from `CliArgs`
//! - `run` - Builds the registry, sizing engine, and pipeline, then renders

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use vesper_core::{Slide, SlideContent, SlideId};
use vesper_engine::{EngineConfig, RenderPipeline, TemplateRegistry};
use vesper_layout::SizingEngine;

/// Command-line arguments for vesper-preview.
#[derive(Debug, Clone, Parser)]
#[command(name = "vesper-preview")]
#[command(about = "Render slide content to resolved slide JSON")]
#[command(version)]
pub struct CliArgs {
    /// Slide content JSON file (a tagged scripture/song/note/announcement/custom object)
    #[arg(long, short, env = "VESPER_CONTENT")]
    pub content: Option<PathBuf>,

    /// Template id; defaults to the built-in template for the content's category
    #[arg(long, short, env = "VESPER_TEMPLATE")]
    pub template: Option<String>,

    /// Extra templates to register (JSON array)
    #[arg(long, env = "VESPER_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Engine configuration JSON file
    #[arg(long, env = "VESPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Theme id
    #[arg(long, env = "VESPER_THEME")]
    pub theme: Option<String>,

    /// Render as a preview (skips animations)
    #[arg(long)]
    pub preview: bool,

    /// Device scale factor
    #[arg(long, default_value = "1.0")]
    pub scale: f32,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print the integrity report for a template instead of rendering
    #[arg(long, value_name = "ID")]
    pub validate_template: Option<String>,

    /// Font file for exact measurement, as FAMILY=PATH (repeatable)
    #[cfg(feature = "glyph-metrics")]
    #[arg(long = "font", value_name = "FAMILY=PATH", value_parser = parse_font)]
    pub fonts: Vec<(String, PathBuf)>,
}

#[cfg(feature = "glyph-metrics")]
fn parse_font(value: &str) -> Result<(String, PathBuf), String> {
    let (family, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected FAMILY=PATH, got '{value}'"))?;
    if family.trim().is_empty() || path.trim().is_empty() {
        return Err(format!("expected FAMILY=PATH, got '{value}'"));
    }
    Ok((family.trim().to_string(), PathBuf::from(path.trim())))
}

/// What the previewer should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Render a content file.
    Render {
        /// Content JSON file.
        content: PathBuf,
    },
    /// Report on a template's integrity.
    ValidateTemplate(String),
}

/// Previewer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    /// Operation to run; `None` when neither content nor a template to validate was given.
    pub mode: Option<Mode>,
    /// Template override.
    pub template: Option<String>,
    /// Extra templates file.
    pub templates: Option<PathBuf>,
    /// Engine configuration file.
    pub config: Option<PathBuf>,
    /// Theme override.
    pub theme: Option<String>,
    /// Preview render.
    pub preview: bool,
    /// Device scale factor.
    pub scale: f32,
    /// Pretty-print output.
    pub pretty: bool,
    /// Fonts for exact measurement, as `(family, path)`.
    pub fonts: Vec<(String, PathBuf)>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            mode: None,
            template: None,
            templates: None,
            config: None,
            theme: None,
            preview: false,
            scale: 1.0,
            pretty: false,
            fonts: Vec::new(),
        }
    }
}

impl From<CliArgs> for PreviewConfig {
    fn from(args: CliArgs) -> Self {
        let mode = match (args.validate_template, args.content) {
            (Some(id), _) => Some(Mode::ValidateTemplate(id)),
            (None, Some(content)) => Some(Mode::Render { content }),
            (None, None) => None,
        };
        Self {
            mode,
            template: args.template,
            templates: args.templates,
            config: args.config,
            theme: args.theme,
            preview: args.preview,
            scale: args.scale,
            pretty: args.pretty,
            #[cfg(feature = "glyph-metrics")]
            fonts: args.fonts,
            #[cfg(not(feature = "glyph-metrics"))]
            fonts: Vec::new(),
        }
    }
}

/// Result of a run: the JSON to print and whether it reports success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// JSON document.
    pub output: String,
    /// `false` for error slides and failed integrity checks.
    pub success: bool,
}

/// Execute the configured operation.
///
/// # Errors
///
/// Returns an error if no operation was requested or an input file cannot
/// be read or parsed.
pub fn run(config: &PreviewConfig) -> anyhow::Result<Report> {
    let engine_config = match &config.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let registry = TemplateRegistry::with_defaults();
    registry.set_slide_size(engine_config.slide_size);
    if let Some(path) = &config.templates {
        let count = registry
            .load_templates_file(path)
            .with_context(|| format!("Failed to load templates {}", path.display()))?;
        tracing::info!("Registered {count} templates from {}", path.display());
    }

    match &config.mode {
        Some(Mode::ValidateTemplate(id)) => {
            let result = registry.validate_template_integrity(id);
            Ok(Report {
                output: to_json(&result, config.pretty)?,
                success: result.is_valid,
            })
        }
        Some(Mode::Render { content }) => render(config, &engine_config, registry, content),
        None => anyhow::bail!("Nothing to do: pass --content or --validate-template"),
    }
}

fn render(
    config: &PreviewConfig,
    engine_config: &EngineConfig,
    registry: TemplateRegistry,
    content_path: &Path,
) -> anyhow::Result<Report> {
    let json = std::fs::read_to_string(content_path)
        .with_context(|| format!("Failed to read content {}", content_path.display()))?;
    let content: SlideContent = serde_json::from_str(&json)
        .with_context(|| format!("Invalid slide content in {}", content_path.display()))?;

    let theme = match &config.theme {
        Some(id) => registry
            .get_theme(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown theme: {id}"))?,
        None => registry.default_theme(),
    };

    let sizing = sizing_engine(config, engine_config)?;
    tracing::debug!("Measuring with {}", sizing.measurer_name());
    let pipeline = RenderPipeline::new(registry, Arc::new(sizing), engine_config.validation);

    let id = content_path
        .file_stem()
        .map_or_else(|| "slide".to_string(), |s| s.to_string_lossy().into_owned());
    let mut slide = Slide::with_id(SlideId::new(id), content);
    if let Some(template) = &config.template {
        slide = slide.with_template(template.clone());
    }

    let mut context = engine_config.render_context(theme).with_scale(config.scale);
    if config.preview {
        context = context.preview();
    }

    let slide_id = slide.id.clone();
    let resolved = pipeline.process_slide(slide, &context);
    if let Some(validation) = pipeline.analysis(&slide_id).and_then(|a| a.validation) {
        for warning in &validation.warnings {
            tracing::warn!("{warning}");
        }
        for suggestion in &validation.suggestions {
            tracing::info!("Suggestion: {suggestion}");
        }
    }

    Ok(Report {
        output: to_json(&resolved, config.pretty)?,
        success: !resolved.is_error(),
    })
}

#[cfg(feature = "glyph-metrics")]
fn sizing_engine(config: &PreviewConfig, engine_config: &EngineConfig) -> anyhow::Result<SizingEngine> {
    if config.fonts.is_empty() {
        return Ok(engine_config.heuristic_sizing_engine());
    }
    let measurer = vesper_layout::GlyphMetricsMeasurer::from_files(config.fonts.iter().cloned())
        .context("Failed to load fonts")?;
    Ok(SizingEngine::new(Box::new(measurer), engine_config.sizing))
}

#[cfg(not(feature = "glyph-metrics"))]
#[allow(clippy::unnecessary_wraps)]
fn sizing_engine(config: &PreviewConfig, engine_config: &EngineConfig) -> anyhow::Result<SizingEngine> {
    if !config.fonts.is_empty() {
        tracing::warn!("Built without glyph-metrics; ignoring font files");
    }
    Ok(engine_config.heuristic_sizing_engine())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = CliArgs::parse_from([
            "vesper-preview",
            "--content",
            "slide.json",
            "--theme",
            "light",
            "--preview",
            "--scale",
            "0.5",
        ]);
        let config = PreviewConfig::from(args);
        assert_eq!(
            config.mode,
            Some(Mode::Render {
                content: PathBuf::from("slide.json")
            })
        );
        assert_eq!(config.theme.as_deref(), Some("light"));
        assert!(config.preview);
        assert!((config.scale - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_validate_mode_wins() {
        let args = CliArgs::parse_from([
            "vesper-preview",
            "--content",
            "slide.json",
            "--validate-template",
            "lyrics",
        ]);
        let config = PreviewConfig::from(args);
        assert_eq!(config.mode, Some(Mode::ValidateTemplate("lyrics".to_string())));
    }

    #[test]
    fn test_nothing_to_do() {
        assert!(run(&PreviewConfig::default()).is_err());
    }

    #[cfg(feature = "glyph-metrics")]
    #[test]
    fn test_parse_font() {
        assert_eq!(
            parse_font("Inter=/fonts/Inter.ttf").unwrap(),
            ("Inter".to_string(), PathBuf::from("/fonts/Inter.ttf"))
        );
        assert!(parse_font("Inter").is_err());
        assert!(parse_font("=x.ttf").is_err());
    }
}

//! Template and theme registry.
//!
//! Provides a thread-safe [`TemplateRegistry`] handle that the host builds
//! once and passes to the render pipeline and any UI surfaces. Clones share
//! the same state.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use vesper_core::{
    ResolvedStyle, Shape, ShapeKind, SlideCategory, SlideContent, SlideError,
    SlideResult, SlideSize, SlideTemplate, Theme, ValidationResult,
};

use crate::defaults;
use crate::style::themed_formatting;

/// A request to fill a template with content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateSlideRequest {
    /// Template to fill.
    pub template_id: String,
    /// Content for the template's placeholders.
    pub content: SlideContent,
    /// Theme override; defaults to the template's theme, then the registry default.
    #[serde(default)]
    pub theme_id: Option<String>,
    /// Output size override; defaults to the registry's slide size.
    #[serde(default)]
    pub slide_size: Option<SlideSize>,
}

impl GenerateSlideRequest {
    /// Request with the registry's default theme and size.
    pub fn new(template_id: impl Into<String>, content: SlideContent) -> Self {
        Self {
            template_id: template_id.into(),
            content,
            theme_id: None,
            slide_size: None,
        }
    }

    /// Use a specific theme.
    #[must_use]
    pub fn with_theme(mut self, theme_id: impl Into<String>) -> Self {
        self.theme_id = Some(theme_id.into());
        self
    }

    /// Use a specific output size.
    #[must_use]
    pub fn with_size(mut self, size: SlideSize) -> Self {
        self.slide_size = Some(size);
        self
    }
}

/// Metadata attached to a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Human-readable template name.
    pub template_name: String,
    /// Generation time (ms since Unix epoch).
    pub generated_at_ms: u64,
    /// Number of shapes produced.
    pub shape_count: usize,
}

/// Outcome of [`TemplateRegistry::generate_slide`]. Failures are reported
/// here rather than as an `Err`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateSlideResult {
    /// Whether shapes were produced.
    pub success: bool,
    /// Generated shapes, empty on failure.
    pub shapes: Vec<Shape>,
    /// Blocking problems.
    pub errors: Vec<String>,
    /// Non-blocking findings.
    pub warnings: Vec<String>,
    /// Present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GenerationMetadata>,
}

impl GenerateSlideResult {
    fn failure(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            shapes: Vec::new(),
            errors,
            warnings,
            metadata: None,
        }
    }
}

#[derive(Debug)]
struct RegistryState {
    templates: HashMap<String, SlideTemplate>,
    themes: HashMap<String, Theme>,
    default_theme: String,
    slide_size: SlideSize,
}

/// Thread-safe registry of slide templates and themes.
///
/// # Example
///
/// ```
/// use vesper_core::SlideContent;
/// use vesper_engine::{GenerateSlideRequest, TemplateRegistry};
///
/// let registry = TemplateRegistry::with_defaults();
/// let content = SlideContent::Note {
///     title: Some("Grace".to_string()),
///     body: "Unearned favor".to_string(),
/// };
///
/// let result = registry.generate_slide(&GenerateSlideRequest::new("note", content));
/// assert!(result.success);
/// ```
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// Create a registry with no templates and the dark theme as default.
    #[must_use]
    pub fn new() -> Self {
        let dark = Theme::dark();
        let default_theme = dark.id.clone();
        let mut themes = HashMap::new();
        themes.insert(dark.id.clone(), dark);
        Self {
            state: Arc::new(RwLock::new(RegistryState {
                templates: HashMap::new(),
                themes,
                default_theme,
                slide_size: SlideSize::HD,
            })),
        }
    }

    /// Create a registry holding the built-in templates and themes.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        for theme in defaults::themes() {
            registry.register_theme(theme);
        }
        for template in defaults::templates() {
            registry.replace_template(template);
        }
        registry
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, RegistryState> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, RegistryState> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Register a new template.
    ///
    /// # Errors
    ///
    /// Returns [`SlideError::DuplicateTemplate`] if the id is taken, or
    /// [`SlideError::InvalidTemplate`] if the id is blank.
    pub fn register_template(&self, template: SlideTemplate) -> SlideResult<()> {
        if template.id.trim().is_empty() {
            return Err(SlideError::InvalidTemplate(
                "template id must not be empty".to_string(),
            ));
        }
        let mut state = self.write();
        if state.templates.contains_key(&template.id) {
            return Err(SlideError::DuplicateTemplate(template.id));
        }
        tracing::debug!("Registered template {}", template.id);
        state.templates.insert(template.id.clone(), template);
        Ok(())
    }

    /// Register a template, replacing any with the same id.
    pub fn replace_template(&self, template: SlideTemplate) -> Option<SlideTemplate> {
        self.write().templates.insert(template.id.clone(), template)
    }

    /// Remove a template.
    pub fn unregister_template(&self, id: &str) -> Option<SlideTemplate> {
        let removed = self.write().templates.remove(id);
        if removed.is_some() {
            tracing::debug!("Unregistered template {id}");
        }
        removed
    }

    /// Look up a template by id.
    #[must_use]
    pub fn get_template(&self, id: &str) -> Option<SlideTemplate> {
        self.read().templates.get(id).cloned()
    }

    /// Registered template ids, sorted.
    #[must_use]
    pub fn template_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().templates.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of registered templates.
    #[must_use]
    pub fn template_count(&self) -> usize {
        self.read().templates.len()
    }

    fn collect_sorted<F>(&self, predicate: F) -> Vec<SlideTemplate>
    where
        F: Fn(&SlideTemplate) -> bool,
    {
        let mut templates: Vec<SlideTemplate> = self
            .read()
            .templates
            .values()
            .filter(|t| predicate(t))
            .cloned()
            .collect();
        templates.sort_by(|a, b| a.id.cmp(&b.id));
        templates
    }

    /// Templates of one category, sorted by id.
    #[must_use]
    pub fn get_templates_by_category(&self, category: SlideCategory) -> Vec<SlideTemplate> {
        self.collect_sorted(|t| t.category == category)
    }

    /// Templates whose name, category, description, or tags contain `query`
    /// (case-insensitive). A blank query matches everything.
    #[must_use]
    pub fn search_templates(&self, query: &str) -> Vec<SlideTemplate> {
        let query = query.trim().to_lowercase();
        self.collect_sorted(|t| {
            query.is_empty()
                || t.name.to_lowercase().contains(&query)
                || t.category.as_str().contains(&query)
                || t.description.to_lowercase().contains(&query)
                || t.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
        })
    }

    /// Register templates from a JSON array. All or nothing: on any error no
    /// template is registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or an id is blank, already
    /// registered, or repeated in the document.
    pub fn load_templates_json(&self, json: &str) -> SlideResult<usize> {
        let templates: Vec<SlideTemplate> = serde_json::from_str(json)?;
        let mut state = self.write();

        let mut seen = HashSet::new();
        for template in &templates {
            if template.id.trim().is_empty() {
                return Err(SlideError::InvalidTemplate(
                    "template id must not be empty".to_string(),
                ));
            }
            if state.templates.contains_key(&template.id) || !seen.insert(template.id.as_str()) {
                return Err(SlideError::DuplicateTemplate(template.id.clone()));
            }
        }

        let count = templates.len();
        for template in templates {
            state.templates.insert(template.id.clone(), template);
        }
        tracing::info!("Loaded {count} templates");
        Ok(count)
    }

    /// Register templates from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or
    /// [`TemplateRegistry::load_templates_json`] fails.
    pub fn load_templates_file(&self, path: impl AsRef<Path>) -> SlideResult<usize> {
        let json = std::fs::read_to_string(path)?;
        self.load_templates_json(&json)
    }

    /// Register or replace a theme.
    pub fn register_theme(&self, theme: Theme) {
        tracing::debug!("Registered theme {}", theme.id);
        self.write().themes.insert(theme.id.clone(), theme);
    }

    /// Look up a theme by id.
    #[must_use]
    pub fn get_theme(&self, id: &str) -> Option<Theme> {
        self.read().themes.get(id).cloned()
    }

    /// Choose the default theme.
    ///
    /// # Errors
    ///
    /// Returns [`SlideError::ThemeNotFound`] if the theme is not registered.
    pub fn set_default_theme(&self, id: &str) -> SlideResult<()> {
        let mut state = self.write();
        if !state.themes.contains_key(id) {
            return Err(SlideError::ThemeNotFound(id.to_string()));
        }
        state.default_theme = id.to_string();
        Ok(())
    }

    /// Register a theme and make it the default.
    pub fn set_theme(&self, theme: Theme) {
        let mut state = self.write();
        state.default_theme = theme.id.clone();
        state.themes.insert(theme.id.clone(), theme);
    }

    /// The default theme.
    #[must_use]
    pub fn default_theme(&self) -> Theme {
        let state = self.read();
        state
            .themes
            .get(&state.default_theme)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolve a theme for a template: explicit id, then the template's own
    /// theme, then the default.
    ///
    /// # Errors
    ///
    /// Returns [`SlideError::ThemeNotFound`] if the chosen id is not registered.
    pub fn resolve_theme(
        &self,
        template: &SlideTemplate,
        theme_id: Option<&str>,
    ) -> SlideResult<Theme> {
        let state = self.read();
        let id = theme_id
            .or(template.theme_id.as_deref())
            .unwrap_or(&state.default_theme);
        state
            .themes
            .get(id)
            .cloned()
            .ok_or_else(|| SlideError::ThemeNotFound(id.to_string()))
    }

    /// Set the default output size for generated slides.
    pub fn set_slide_size(&self, size: SlideSize) {
        self.write().slide_size = size;
    }

    /// The default output size.
    #[must_use]
    pub fn slide_size(&self) -> SlideSize {
        self.read().slide_size
    }

    /// Fill a template's placeholders with content.
    ///
    /// Never fails with an `Err`: unknown templates or themes and invalid
    /// content produce `success: false` with the reasons in `errors`.
    #[must_use]
    pub fn generate_slide(&self, request: &GenerateSlideRequest) -> GenerateSlideResult {
        let Some(template) = self.get_template(&request.template_id) else {
            tracing::warn!("Cannot generate slide: unknown template {}", request.template_id);
            return GenerateSlideResult::failure(
                vec![SlideError::TemplateNotFound(request.template_id.clone()).to_string()],
                Vec::new(),
            );
        };
        let theme = match self.resolve_theme(&template, request.theme_id.as_deref()) {
            Ok(theme) => theme,
            Err(e) => return GenerateSlideResult::failure(vec![e.to_string()], Vec::new()),
        };

        let validation = template.validate_content(&request.content);
        if !validation.is_valid {
            tracing::debug!(
                "Content rejected by template {}: {:?}",
                template.id,
                validation.errors
            );
            return GenerateSlideResult::failure(validation.errors, validation.warnings);
        }

        let size = request.slide_size.unwrap_or_else(|| self.slide_size());
        let (shapes, compose_warnings) = compose_shapes(&template, &theme, &request.content, size);
        let mut warnings = validation.warnings;
        warnings.extend(compose_warnings);

        let metadata = GenerationMetadata {
            template_name: template.name.clone(),
            generated_at_ms: now_ms(),
            shape_count: shapes.len(),
        };
        GenerateSlideResult {
            success: true,
            shapes,
            errors: Vec::new(),
            warnings,
            metadata: Some(metadata),
        }
    }

    /// Check a template for structural problems.
    ///
    /// Errors: unknown template, no placeholders, placeholders pointing at
    /// missing zones, zones with no area, and a theme without background or
    /// text colors or a primary font. Zones outside the template's base size
    /// are warnings.
    #[must_use]
    pub fn validate_template_integrity(&self, id: &str) -> ValidationResult {
        let Some(template) = self.get_template(id) else {
            return ValidationResult::failure(SlideError::TemplateNotFound(id.to_string()).to_string());
        };
        let mut result = ValidationResult::new();

        if template.placeholders.is_empty() {
            result.add_error(format!("Template '{id}' declares no placeholders"));
        }
        for placeholder in &template.placeholders {
            if template.has_zone(&placeholder.zone_id) {
                continue;
            }
            if placeholder.required {
                result.add_error(format!(
                    "Required placeholder '{}' has no zone '{}'",
                    placeholder.id, placeholder.zone_id
                ));
            } else {
                result.add_error(format!(
                    "Placeholder '{}' references unknown zone '{}'",
                    placeholder.id, placeholder.zone_id
                ));
            }
        }

        match self.resolve_theme(&template, None) {
            Ok(theme) => {
                if theme.colors.background.trim().is_empty() {
                    result.add_error(format!("Theme '{}' has no background color", theme.id));
                }
                if theme.colors.text.trim().is_empty() {
                    result.add_error(format!("Theme '{}' has no text color", theme.id));
                }
                if theme.fonts.primary.trim().is_empty() {
                    result.add_error(format!("Theme '{}' has no primary font", theme.id));
                }
            }
            Err(e) => result.add_error(e.to_string()),
        }

        let canvas = template.base_size.bounds();
        let zones = template
            .text_zones
            .iter()
            .map(|z| (&z.id, &z.bounds))
            .chain(template.media_zones.iter().map(|z| (&z.id, &z.bounds)));
        for (zone_id, bounds) in zones {
            if bounds.is_empty() {
                result.add_error(format!("Zone '{zone_id}' has no area"));
            } else if !canvas.contains_rect(bounds) {
                result.add_warning(format!("Zone '{zone_id}' extends outside the slide"));
            }
        }

        result
    }
}

/// Background, placeholder text, and media shapes for a template at `size`.
fn compose_shapes(
    template: &SlideTemplate,
    theme: &Theme,
    content: &SlideContent,
    size: SlideSize,
) -> (Vec<Shape>, Vec<String>) {
    let (sx, sy) = template.base_size.scale_to(&size);
    let font_scale = if template.constraints.responsive_scaling {
        sx.min(sy)
    } else {
        1.0
    };
    let mut warnings = Vec::new();
    let mut shapes = vec![Shape::new(
        "background",
        size.bounds(),
        i32::MIN,
        ShapeKind::Rect {
            fill: theme.background_fill(),
        },
    )];

    for zone in &template.media_zones {
        shapes.push(Shape::new(
            format!("media-{}", zone.id),
            zone.bounds.scaled(sx, sy),
            -1,
            ShapeKind::Media {
                zone_id: zone.id.clone(),
                media_kind: zone.kind,
            },
        ));
    }

    let mut z_index = 0;
    for placeholder in &template.placeholders {
        let Some(text) = placeholder.text_for(content) else {
            continue;
        };
        let Some(zone) = template.text_zone(&placeholder.zone_id) else {
            warnings.push(format!(
                "Placeholder '{}' has no text zone '{}'",
                placeholder.id, placeholder.zone_id
            ));
            continue;
        };

        let element_type = placeholder.role.element_type();
        let formatting = themed_formatting(&template.default_formatting, theme, element_type);
        let mut font_size = formatting.font.size;
        if let Some(max) = zone.auto_resize.max_size {
            font_size = font_size.min(max);
        }
        if let Some(min) = zone.auto_resize.min_size {
            font_size = font_size.max(min);
        }
        let formatting = formatting.with_font_size(font_size * font_scale);

        z_index += 1;
        shapes.push(Shape::new(
            placeholder.id.clone(),
            zone.bounds.scaled(sx, sy),
            z_index,
            ShapeKind::Text {
                content: text,
                style: ResolvedStyle::from_formatting(&formatting, 1.0),
            },
        ));
    }

    (shapes, warnings)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::{
        LyricSection, Placeholder, PlaceholderRole, SectionKind, TextElementType, TextZone, Verse,
    };

    fn john_3_16() -> SlideContent {
        SlideContent::Scripture {
            reference: "John 3:16".to_string(),
            translation: Some("KJV".to_string()),
            verses: vec![Verse {
                number: 16,
                text: "For God so loved the world".to_string(),
            }],
        }
    }

    #[test]
    fn test_unknown_template() {
        let registry = TemplateRegistry::with_defaults();
        let result = registry.generate_slide(&GenerateSlideRequest::new("missing", john_3_16()));
        assert!(!result.success);
        assert_eq!(result.errors, vec!["Template not found: missing".to_string()]);
        assert!(result.shapes.is_empty());
        assert!(result.metadata.is_none());
    }

    #[test]
    fn test_generate_scripture() {
        let registry = TemplateRegistry::with_defaults();
        let result = registry.generate_slide(&GenerateSlideRequest::new("scripture", john_3_16()));
        assert!(result.success, "{:?}", result.errors);

        let metadata = result.metadata.unwrap();
        assert_eq!(metadata.template_name, "Scripture");
        assert_eq!(metadata.shape_count, result.shapes.len());
        assert_eq!(result.shapes.len(), 3);
        assert_eq!(result.shapes[0].z_index, i32::MIN);

        let reference = result.shapes.iter().find(|s| s.id == "reference").unwrap();
        assert_eq!(reference.text(), Some("John 3:16 (KJV)"));
        let body = result.shapes.iter().find(|s| s.id == "body").unwrap();
        assert_eq!(body.text(), Some("16 For God so loved the world"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let registry = TemplateRegistry::with_defaults();
        let request = GenerateSlideRequest::new("scripture", john_3_16());
        let first = registry.generate_slide(&request);
        let second = registry.generate_slide(&request);
        assert_eq!(first.shapes, second.shapes);
    }

    #[test]
    fn test_missing_required_content_fails() {
        let registry = TemplateRegistry::with_defaults();
        let content = SlideContent::Song {
            title: Some("Amazing Grace".to_string()),
            sections: vec![],
        };
        let result = registry.generate_slide(&GenerateSlideRequest::new("lyrics", content));
        assert!(!result.success);
        assert!(result.errors[0].contains("'lyrics'"));
        assert!(result.shapes.is_empty());
    }

    #[test]
    fn test_category_mismatch_warns() {
        let registry = TemplateRegistry::with_defaults();
        let content = SlideContent::Note {
            title: None,
            body: "Text on a scripture template".to_string(),
        };
        let result = registry.generate_slide(&GenerateSlideRequest::new("note", content.clone()));
        assert!(result.success);
        assert!(result.warnings.is_empty());

        let result = registry.generate_slide(&GenerateSlideRequest::new("lyrics", content));
        assert!(result.success);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_scaled_output() {
        let registry = TemplateRegistry::with_defaults();
        let request = GenerateSlideRequest::new("scripture", john_3_16())
            .with_size(SlideSize::new(960.0, 540.0));
        let result = registry.generate_slide(&request);
        let body = result.shapes.iter().find(|s| s.id == "body").unwrap();
        assert!((body.x - 50.0).abs() < 1e-4);
        assert!((body.width - 860.0).abs() < 1e-4);
        assert!((body.style().unwrap().font_size - 28.0).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_theme_fails() {
        let registry = TemplateRegistry::with_defaults();
        let request = GenerateSlideRequest::new("scripture", john_3_16()).with_theme("neon");
        let result = registry.generate_slide(&request);
        assert_eq!(result.errors, vec!["Theme not found: neon".to_string()]);
    }

    #[test]
    fn test_theme_colors_applied() {
        let registry = TemplateRegistry::with_defaults();
        registry.set_default_theme("light").unwrap();
        let result = registry.generate_slide(&GenerateSlideRequest::new("scripture", john_3_16()));
        let body = result.shapes.iter().find(|s| s.id == "body").unwrap();
        assert_eq!(body.style().unwrap().color, "#1A1A1A");
        match &result.shapes[0].kind {
            ShapeKind::Rect { fill } => assert_eq!(fill, &Theme::light().background_fill()),
            other => panic!("expected background rect, got {other:?}"),
        }
    }

    #[test]
    fn test_register_duplicate() {
        let registry = TemplateRegistry::new();
        let template = SlideTemplate::new("t", "T", SlideCategory::Custom);
        registry.register_template(template.clone()).unwrap();
        assert!(matches!(
            registry.register_template(template.clone()),
            Err(SlideError::DuplicateTemplate(id)) if id == "t"
        ));
        assert!(registry.replace_template(template).is_some());
        assert!(registry.unregister_template("t").is_some());
        assert!(registry.get_template("t").is_none());
    }

    #[test]
    fn test_search_and_category() {
        let registry = TemplateRegistry::with_defaults();
        let found: Vec<String> = registry
            .search_templates("WORSHIP")
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(found, vec!["lyrics".to_string()]);
        assert_eq!(registry.search_templates("").len(), registry.template_count());
        assert!(registry.search_templates("scripture").iter().any(|t| t.id == "scripture"));

        let songs = registry.get_templates_by_category(SlideCategory::Song);
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, "lyrics");
    }

    #[test]
    fn test_default_theme_management() {
        let registry = TemplateRegistry::new();
        assert_eq!(registry.default_theme().id, "dark");
        assert!(matches!(
            registry.set_default_theme("light"),
            Err(SlideError::ThemeNotFound(_))
        ));
        registry.set_theme(Theme::light());
        assert_eq!(registry.default_theme().id, "light");
        assert!(registry.get_theme("dark").is_some());
    }

    #[test]
    fn test_clones_share_state() {
        let registry = TemplateRegistry::new();
        let handle = registry.clone();
        handle.set_slide_size(SlideSize::new(1280.0, 720.0));
        assert!((registry.slide_size().width - 1280.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_templates_json_all_or_nothing() {
        let registry = TemplateRegistry::with_defaults();
        let json = r#"[
            {"id": "welcome", "name": "Welcome", "category": "title",
             "text_zones": [{"id": "main", "bounds": {"x": 0, "y": 0, "width": 1920, "height": 1080},
                             "content_rules": {"allowed_types": ["heading"]}}],
             "placeholders": [{"id": "main", "zone_id": "main", "role": "title", "required": true}]},
            {"id": "scripture", "name": "Dup", "category": "scripture", "text_zones": []}
        ]"#;
        assert!(matches!(
            registry.load_templates_json(json),
            Err(SlideError::DuplicateTemplate(id)) if id == "scripture"
        ));
        assert!(registry.get_template("welcome").is_none());

        let json = r#"[{"id": "welcome", "name": "Welcome", "category": "title",
            "text_zones": [{"id": "main", "bounds": {"x": 0, "y": 0, "width": 1920, "height": 1080},
                            "content_rules": {"allowed_types": ["heading"]}}],
            "placeholders": [{"id": "main", "zone_id": "main", "role": "title", "required": true}]}]"#;
        assert_eq!(registry.load_templates_json(json).unwrap(), 1);
        assert!(registry.validate_template_integrity("welcome").is_valid);
    }

    #[test]
    fn test_integrity_of_defaults() {
        let registry = TemplateRegistry::with_defaults();
        for id in registry.template_ids() {
            let result = registry.validate_template_integrity(&id);
            assert!(result.is_clean(), "{id}: {result:?}");
        }
    }

    #[test]
    fn test_integrity_errors() {
        let registry = TemplateRegistry::new();
        assert!(!registry.validate_template_integrity("nope").is_valid);

        let template = SlideTemplate::new("broken", "Broken", SlideCategory::Song)
            .with_text_zone(TextZone::new(
                "wide",
                vesper_core::Rectangle::new(1000.0, 0.0, 1500.0, 200.0),
                &[TextElementType::Verse],
            ))
            .with_placeholder(Placeholder::new("body", "missing", PlaceholderRole::Body, true));
        registry.register_template(template).unwrap();
        let result = registry.validate_template_integrity("broken");
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("'missing'"));
        assert!(result.warnings.iter().any(|w| w.contains("'wide'")));

        let empty = SlideTemplate::new("empty", "Empty", SlideCategory::Custom);
        registry.register_template(empty).unwrap();
        let result = registry.validate_template_integrity("empty");
        assert!(result.errors[0].contains("no placeholders"));
    }

    #[test]
    fn test_loaded_negative_zone_is_clamped_and_flagged() {
        let registry = TemplateRegistry::with_defaults();
        let json = r#"[{"id": "inverted", "name": "Inverted", "category": "note",
            "text_zones": [{"id": "body", "bounds": {"x": 100, "y": 100, "width": -500, "height": -50},
                            "content_rules": {"allowed_types": ["text"]}}],
            "placeholders": [{"id": "body", "zone_id": "body", "role": "body", "required": true}]}]"#;
        assert_eq!(registry.load_templates_json(json).unwrap(), 1);

        let template = registry.get_template("inverted").unwrap();
        let bounds = template.text_zones[0].bounds;
        assert!(bounds.width >= 0.0 && bounds.height >= 0.0);

        let result = registry.validate_template_integrity("inverted");
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("'body' has no area")));
    }

    #[test]
    fn test_integrity_checks_theme() {
        let registry = TemplateRegistry::new();
        let mut theme = Theme::dark();
        theme.id = "bare".to_string();
        theme.fonts.primary = String::new();
        registry.set_theme(theme);
        let template = SlideTemplate::new("lyric", "Lyric", SlideCategory::Song)
            .with_text_zone(TextZone::new(
                "body",
                vesper_core::Rectangle::new(0.0, 0.0, 100.0, 100.0),
                &[TextElementType::Verse],
            ))
            .with_placeholder(Placeholder::new("body", "body", PlaceholderRole::Body, true));
        registry.register_template(template).unwrap();
        let result = registry.validate_template_integrity("lyric");
        assert!(result.errors.iter().any(|e| e.contains("primary font")));

        let content = SlideContent::Song {
            title: None,
            sections: vec![LyricSection {
                kind: SectionKind::Chorus,
                label: None,
                lines: vec!["Hallelujah".to_string()],
            }],
        };
        assert!(registry.generate_slide(&GenerateSlideRequest::new("lyric", content)).success);
    }
}

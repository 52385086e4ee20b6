//! Slide templates - reusable zone layouts with constraints and default styling.

use serde::{Deserialize, Serialize};

use crate::{
    Insets, Rectangle, SlideCategory, SlideContent, SlideSize, TextElementType, TextFormatting,
    TextZone, ValidationResult,
};

/// Role a placeholder plays in a generated slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderRole {
    /// Slide title.
    Title,
    /// Main body text.
    Body,
    /// Scripture reference line.
    Reference,
    /// Footer line.
    Footer,
    /// Media (image/video) slot.
    Media,
}

impl PlaceholderRole {
    /// Lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
            Self::Reference => "reference",
            Self::Footer => "footer",
            Self::Media => "media",
        }
    }

    /// Text element type used for this role's content.
    #[must_use]
    pub const fn element_type(self) -> TextElementType {
        match self {
            Self::Title | Self::Reference => TextElementType::Heading,
            Self::Footer => TextElementType::Emphasis,
            Self::Body | Self::Media => TextElementType::Text,
        }
    }
}

/// A named slot bound to a template zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    /// Placeholder identifier.
    pub id: String,
    /// Zone the placeholder fills (text or media zone id).
    pub zone_id: String,
    /// Role.
    pub role: PlaceholderRole,
    /// Whether content for this role is mandatory.
    #[serde(default)]
    pub required: bool,
}

impl Placeholder {
    /// Create a placeholder.
    pub fn new(
        id: impl Into<String>,
        zone_id: impl Into<String>,
        role: PlaceholderRole,
        required: bool,
    ) -> Self {
        Self {
            id: id.into(),
            zone_id: zone_id.into(),
            role,
            required,
        }
    }

    /// Text this placeholder shows for the given content.
    #[must_use]
    pub fn text_for(&self, content: &SlideContent) -> Option<String> {
        let text = match self.role {
            PlaceholderRole::Title | PlaceholderRole::Reference => content.title(),
            PlaceholderRole::Footer => content.footer().map(str::to_string),
            PlaceholderRole::Body => {
                let body = content
                    .body_blocks()
                    .into_iter()
                    .filter(|(kind, _)| *kind != TextElementType::Emphasis)
                    .map(|(_, text)| text)
                    .collect::<Vec<_>>()
                    .join("\n\n");
                (!body.trim().is_empty()).then_some(body)
            }
            PlaceholderRole::Media => None,
        };
        text.filter(|text| !text.trim().is_empty())
    }
}

/// Kind of media a media zone holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Video.
    Video,
    /// Full-slide background media.
    Background,
}

/// A region for images or video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaZone {
    /// Zone identifier.
    pub id: String,
    /// Region in slide-pixel space.
    pub bounds: Rectangle,
    /// Media kind.
    pub kind: MediaKind,
}

/// Template-wide constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConstraints {
    /// Maximum number of text elements.
    pub max_text_elements: usize,
    /// Smallest font size any element may use.
    pub min_font_size: f32,
    /// Largest font size any element may use.
    pub max_font_size: f32,
    /// Whether font sizes scale with the output slide size.
    pub responsive_scaling: bool,
}

impl Default for TemplateConstraints {
    fn default() -> Self {
        Self {
            max_text_elements: 8,
            min_font_size: 12.0,
            max_font_size: 120.0,
            responsive_scaling: true,
        }
    }
}

/// Layout metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetadata {
    /// Inner padding.
    pub padding: Insets,
    /// Outer margins.
    pub margins: Insets,
    /// Title-safe area; text zones should stay inside it.
    pub safe_area: Option<Rectangle>,
}

/// A reusable, named slide layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideTemplate {
    /// Template identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category of content this template is designed for.
    pub category: SlideCategory,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Text zones, in priority order.
    pub text_zones: Vec<TextZone>,
    /// Media zones.
    #[serde(default)]
    pub media_zones: Vec<MediaZone>,
    /// Placeholders bound to zones.
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
    /// Global constraints.
    #[serde(default)]
    pub constraints: TemplateConstraints,
    /// Layout metadata.
    #[serde(default)]
    pub layout: LayoutMetadata,
    /// Default formatting for generated text.
    #[serde(default)]
    pub default_formatting: TextFormatting,
    /// Slide size zone coordinates are authored against.
    #[serde(default)]
    pub base_size: SlideSize,
    /// Theme this template prefers.
    #[serde(default)]
    pub theme_id: Option<String>,
}

impl SlideTemplate {
    /// Create an empty template.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: SlideCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: String::new(),
            tags: Vec::new(),
            text_zones: Vec::new(),
            media_zones: Vec::new(),
            placeholders: Vec::new(),
            constraints: TemplateConstraints::default(),
            layout: LayoutMetadata::default(),
            default_formatting: TextFormatting::default(),
            base_size: SlideSize::default(),
            theme_id: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| (*t).to_string()).collect();
        self
    }

    /// Add a text zone.
    #[must_use]
    pub fn with_text_zone(mut self, zone: TextZone) -> Self {
        self.text_zones.push(zone);
        self
    }

    /// Add a media zone.
    #[must_use]
    pub fn with_media_zone(mut self, zone: MediaZone) -> Self {
        self.media_zones.push(zone);
        self
    }

    /// Add a placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholders.push(placeholder);
        self
    }

    /// Set the default formatting.
    #[must_use]
    pub fn with_default_formatting(mut self, formatting: TextFormatting) -> Self {
        self.default_formatting = formatting;
        self
    }

    /// Look up a text zone by id.
    #[must_use]
    pub fn text_zone(&self, id: &str) -> Option<&TextZone> {
        self.text_zones.iter().find(|z| z.id == id)
    }

    /// Look up a media zone by id.
    #[must_use]
    pub fn media_zone(&self, id: &str) -> Option<&MediaZone> {
        self.media_zones.iter().find(|z| z.id == id)
    }

    /// Whether any text or media zone has the given id.
    #[must_use]
    pub fn has_zone(&self, id: &str) -> bool {
        self.text_zone(id).is_some() || self.media_zone(id).is_some()
    }

    /// Whether this template accepts content of the given category.
    ///
    /// Custom and title templates accept everything. No content is itself a
    /// title; a title template shows the title of whatever content it is given.
    #[must_use]
    pub fn accepts_category(&self, category: SlideCategory) -> bool {
        matches!(self.category, SlideCategory::Custom | SlideCategory::Title)
            || self.category == category
    }

    /// Check content against this template.
    ///
    /// Missing required content is an error; category mismatches and
    /// over-long zone text are warnings.
    #[must_use]
    pub fn validate_content(&self, content: &SlideContent) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !self.accepts_category(content.category()) {
            tracing::debug!(
                "Template {} ({}) used for {} content",
                self.id,
                self.category,
                content.category()
            );
            result.add_warning(format!(
                "Template '{}' is designed for {} slides, got {}",
                self.id,
                self.category,
                content.category()
            ));
            result.add_suggestion(format!(
                "Choose a {} template for this content",
                content.category()
            ));
        }

        for placeholder in &self.placeholders {
            let text = placeholder.text_for(content);
            match text {
                None if placeholder.required => {
                    result.add_error(format!(
                        "Missing required content for placeholder '{}' ({})",
                        placeholder.id,
                        placeholder.role.as_str()
                    ));
                }
                Some(text) => {
                    let limit = self
                        .text_zone(&placeholder.zone_id)
                        .and_then(|z| z.content_rules.max_characters);
                    let count = text.chars().count();
                    if let Some(limit) = limit.filter(|&limit| count > limit) {
                        result.add_warning(format!(
                            "Placeholder '{}' has {count} characters (zone limit {limit})",
                            placeholder.id
                        ));
                        result.add_suggestion("Split the content across multiple slides");
                    }
                }
                None => {}
            }
        }

        result
    }
}

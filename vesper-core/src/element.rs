//! Text elements - the building blocks of a slide's text content.

use serde::{Deserialize, Serialize};

use crate::{ElementPosition, TextFormatting};

/// Identifier of a text element within one render pass.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create an element id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Semantic type of a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextElementType {
    /// Plain body text.
    Text,
    /// Title or reference line.
    Heading,
    /// Highlighted text such as a footer or call-out.
    Emphasis,
    /// Scripture verse or song verse.
    Verse,
    /// Song chorus.
    Chorus,
    /// Song bridge.
    Bridge,
}

impl TextElementType {
    /// All element types, in declaration order.
    pub const ALL: [TextElementType; 6] = [
        Self::Text,
        Self::Heading,
        Self::Emphasis,
        Self::Verse,
        Self::Chorus,
        Self::Bridge,
    ];

    /// Lower-case name used in templates and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Heading => "heading",
            Self::Emphasis => "emphasis",
            Self::Verse => "verse",
            Self::Chorus => "chorus",
            Self::Bridge => "bridge",
        }
    }

    /// Whether this is lyric/scripture body text (verse, chorus, bridge).
    #[must_use]
    pub const fn is_lyric(self) -> bool {
        matches!(self, Self::Verse | Self::Chorus | Self::Bridge)
    }
}

impl std::fmt::Display for TextElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-element font size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeConstraints {
    /// Smallest allowed font size.
    #[serde(default)]
    pub min_font_size: Option<f32>,
    /// Largest allowed font size.
    #[serde(default)]
    pub max_font_size: Option<f32>,
    /// Whether the engine may resize this element.
    #[serde(default = "SizeConstraints::default_auto_resize")]
    pub auto_resize: bool,
    /// Whether the block keeps its aspect ratio when scaled.
    #[serde(default)]
    pub preserve_aspect_ratio: bool,
}

impl SizeConstraints {
    const fn default_auto_resize() -> bool {
        true
    }

    /// Constraints bounding the font size to `[min, max]`.
    #[must_use]
    pub fn between(min: f32, max: f32) -> Self {
        Self {
            min_font_size: Some(min),
            max_font_size: Some(max),
            auto_resize: true,
            preserve_aspect_ratio: false,
        }
    }
}

/// A block of text on a slide.
///
/// The content string is fixed at construction. Sizing changes only the font
/// size and zone mapping changes only the position and assigned zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// Unique identifier within the slide.
    pub id: ElementId,
    /// Semantic type.
    #[serde(rename = "type")]
    pub element_type: TextElementType,
    content: String,
    /// Formatting, owned by this element.
    #[serde(default)]
    pub formatting: TextFormatting,
    #[serde(default)]
    position: ElementPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zone_id: Option<String>,
    /// Optional font size constraints.
    #[serde(default)]
    pub constraints: Option<SizeConstraints>,
}

impl TextElement {
    /// Create an element with default formatting and an empty position.
    pub fn new(
        id: impl Into<ElementId>,
        element_type: TextElementType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            element_type,
            content: content.into(),
            formatting: TextFormatting::default(),
            position: ElementPosition::default(),
            zone_id: None,
            constraints: None,
        }
    }

    /// Set the formatting.
    #[must_use]
    pub fn with_formatting(mut self, formatting: TextFormatting) -> Self {
        self.formatting = formatting;
        self
    }

    /// Set the constraints.
    #[must_use]
    pub fn with_constraints(mut self, constraints: SizeConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Set the initial position.
    #[must_use]
    pub fn with_position(mut self, position: ElementPosition) -> Self {
        self.position = position;
        self
    }

    /// The text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Current font size in pixels.
    #[must_use]
    pub fn font_size(&self) -> f32 {
        self.formatting.font.size
    }

    /// Update the font size.
    pub fn set_font_size(&mut self, size: f32) {
        self.formatting.font.size = size;
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> &ElementPosition {
        &self.position
    }

    /// Update the position.
    pub fn set_position(&mut self, position: ElementPosition) {
        self.position = position;
    }

    /// Zone this element was placed in, once zone mapping has run.
    #[must_use]
    pub fn zone_id(&self) -> Option<&str> {
        self.zone_id.as_deref()
    }

    /// Place the element in a zone.
    pub fn place(&mut self, zone_id: impl Into<String>, position: ElementPosition) {
        self.zone_id = Some(zone_id.into());
        self.position = position;
    }

    /// Number of characters in the content.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether the content is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

//! Slides as they move through the render pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Background, Rectangle, SlideCategory, SlideContent, TextElement, Theme};

/// Unique identifier for a slide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(String);

impl SlideId {
    /// Create a new random slide ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlideId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Canonical text content: the slide's text elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextContent {
    /// Text elements in reading order.
    pub elements: Vec<TextElement>,
}

impl RichTextContent {
    /// Wrap a list of elements.
    #[must_use]
    pub fn new(elements: Vec<TextElement>) -> Self {
        Self { elements }
    }

    /// Total characters across all elements.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.elements.iter().map(TextElement::char_count).sum()
    }
}

/// Rough rendering cost of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Few short elements.
    Low,
    /// Moderate element count or text volume.
    Medium,
    /// Many elements or a lot of text.
    High,
}

impl Complexity {
    /// Estimate complexity from element and character counts.
    #[must_use]
    pub const fn estimate(element_count: usize, char_count: usize) -> Self {
        if element_count > 8 || char_count > 1000 {
            Self::High
        } else if element_count > 4 || char_count > 400 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A slide: raw content plus whatever the pipeline has resolved so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Slide identifier.
    pub id: SlideId,
    /// Template to lay the slide out with.
    #[serde(default)]
    pub template_id: Option<String>,
    /// Raw content.
    pub content: SlideContent,
    /// Canonical text elements, once analyzed.
    #[serde(default)]
    pub rich_text: Option<RichTextContent>,
    /// Background override.
    #[serde(default)]
    pub background: Option<Background>,
}

impl Slide {
    /// Create a slide with a generated id.
    #[must_use]
    pub fn new(content: SlideContent) -> Self {
        Self::with_id(SlideId::generate(), content)
    }

    /// Create a slide with a given id.
    pub fn with_id(id: impl Into<SlideId>, content: SlideContent) -> Self {
        Self {
            id: id.into(),
            template_id: None,
            content,
            rich_text: None,
            background: None,
        }
    }

    /// Set the template.
    #[must_use]
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Content category.
    #[must_use]
    pub fn category(&self) -> SlideCategory {
        self.content.category()
    }

    /// Text elements, empty until analyzed.
    #[must_use]
    pub fn elements(&self) -> &[TextElement] {
        match &self.rich_text {
            Some(rich) => &rich.elements,
            None => &[],
        }
    }

    /// Mutable text elements, empty until analyzed.
    pub fn elements_mut(&mut self) -> &mut [TextElement] {
        match &mut self.rich_text {
            Some(rich) => &mut rich.elements,
            None => &mut [],
        }
    }
}

/// Per-render-pass context shared by every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderContext {
    /// Visible region in slide-pixel space.
    pub viewport: Rectangle,
    /// Preview renders skip effects.
    #[serde(default)]
    pub is_preview: bool,
    /// Device pixel scale applied to the resolved slide.
    #[serde(default = "RenderContext::default_scale")]
    pub scale_factor: f32,
    /// Theme for this pass.
    #[serde(default)]
    pub theme: Theme,
}

impl RenderContext {
    const fn default_scale() -> f32 {
        1.0
    }

    /// Context for a full-quality render of the given viewport.
    #[must_use]
    pub fn new(viewport: Rectangle, theme: Theme) -> Self {
        Self {
            viewport,
            is_preview: false,
            scale_factor: 1.0,
            theme,
        }
    }

    /// Mark as a preview render.
    #[must_use]
    pub fn preview(mut self) -> Self {
        self.is_preview = true;
        self
    }

    /// Set the scale factor.
    #[must_use]
    pub fn with_scale(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Rectangle::from_size(1920.0, 1080.0), Theme::default())
    }
}

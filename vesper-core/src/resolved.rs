//! Resolved slides: every shape has an absolute position, size, and style.
//!
//! This is the hand-off document for a drawing surface or a cross-process
//! transport to the second display.

use serde::{Deserialize, Serialize};

use crate::{
    Animation, Background, ElementPosition, FontStyle, HorizontalAlign, MediaKind, Rectangle,
    Shadow, SlideCategory, SlideError, SlideId, SlideResult, TextFormatting, TextTransform,
    VerticalAlign,
};

/// Fully resolved text style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStyle {
    /// Font family.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Numeric font weight.
    pub font_weight: u16,
    /// Whether the font is italic.
    pub italic: bool,
    /// Text color as hex.
    pub color: String,
    /// Line height in pixels.
    pub line_height: f32,
    /// Letter spacing in pixels.
    pub letter_spacing: f32,
    /// Horizontal alignment.
    pub horizontal_align: HorizontalAlign,
    /// Vertical alignment.
    pub vertical_align: VerticalAlign,
    /// Case transform.
    pub text_transform: TextTransform,
    /// Drop shadow.
    #[serde(default)]
    pub shadow: Option<Shadow>,
    /// Entrance animation.
    #[serde(default)]
    pub entrance: Option<Animation>,
    /// Emphasis animation.
    #[serde(default)]
    pub emphasis: Option<Animation>,
}

impl ResolvedStyle {
    /// Resolve formatting at the given device scale.
    #[must_use]
    pub fn from_formatting(formatting: &TextFormatting, scale: f32) -> Self {
        let font_size = formatting.font.size * scale;
        Self {
            font_family: formatting.font.family.clone(),
            font_size,
            font_weight: formatting.font.weight.value(),
            italic: formatting.font.style == FontStyle::Italic,
            color: formatting.font.color.clone(),
            line_height: font_size * formatting.spacing.line,
            letter_spacing: formatting.spacing.letter * scale,
            horizontal_align: formatting.alignment.horizontal,
            vertical_align: formatting.alignment.vertical,
            text_transform: formatting.effects.transform,
            shadow: formatting.effects.shadow.clone(),
            entrance: formatting.effects.entrance.clone(),
            emphasis: formatting.effects.emphasis.clone(),
        }
    }
}

/// What a shape draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ShapeKind {
    /// A block of text.
    Text {
        /// Text content.
        content: String,
        /// Resolved style.
        style: ResolvedStyle,
    },

    /// A filled rectangle (backgrounds, panels).
    Rect {
        /// Fill.
        fill: Background,
    },

    /// A media slot filled by the drawing surface.
    Media {
        /// Template media zone id.
        zone_id: String,
        /// Media kind.
        media_kind: MediaKind,
    },
}

/// A positioned, styled shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Shape identifier.
    pub id: String,
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Z-index for layering.
    pub z_index: i32,
    /// Shape content.
    pub kind: ShapeKind,
}

impl Shape {
    /// Create a shape occupying `bounds`.
    pub fn new(id: impl Into<String>, bounds: Rectangle, z_index: i32, kind: ShapeKind) -> Self {
        Self {
            id: id.into(),
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            z_index,
            kind,
        }
    }

    /// Create a shape from an element position.
    pub fn at(id: impl Into<String>, position: &ElementPosition, kind: ShapeKind) -> Self {
        Self::new(id, position.bounds(), position.z_index, kind)
    }

    /// The rectangle this shape occupies.
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width, self.height)
    }

    /// Text content, for text shapes.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Resolved style, for text shapes.
    #[must_use]
    pub fn style(&self) -> Option<&ResolvedStyle> {
        match &self.kind {
            ShapeKind::Text { style, .. } => Some(style),
            _ => None,
        }
    }
}

/// A slide ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSlide {
    /// Slide identifier.
    pub id: SlideId,
    /// Slide category.
    #[serde(rename = "type")]
    pub slide_type: SlideCategory,
    /// Shapes in z-order.
    pub shapes: Vec<Shape>,
    /// Background fill.
    pub background: Background,
    /// Render failure message, set on error slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolvedSlide {
    /// Create an empty resolved slide.
    #[must_use]
    pub fn new(id: SlideId, slide_type: SlideCategory, background: Background) -> Self {
        Self {
            id,
            slide_type,
            shapes: Vec::new(),
            background,
            error: None,
        }
    }

    /// Visible placeholder for a slide that failed to render.
    #[must_use]
    pub fn error_slide(id: SlideId, message: &str, viewport: Rectangle) -> Self {
        let background = Background::Solid {
            color: "#400000".to_string(),
        };
        let style = ResolvedStyle {
            font_family: "sans-serif".to_string(),
            font_size: 32.0,
            font_weight: 700,
            italic: false,
            color: "#FFFFFF".to_string(),
            line_height: 40.0,
            letter_spacing: 0.0,
            horizontal_align: HorizontalAlign::Center,
            vertical_align: VerticalAlign::Middle,
            text_transform: TextTransform::None,
            shadow: None,
            entrance: None,
            emphasis: None,
        };
        let text = format!("Render error on slide {id}: {message}");
        let mut slide = Self::new(id, SlideCategory::Custom, background.clone());
        slide.shapes.push(Shape::new(
            "background",
            viewport,
            i32::MIN,
            ShapeKind::Rect { fill: background },
        ));
        slide.shapes.push(Shape::new(
            "error-message",
            viewport,
            0,
            ShapeKind::Text {
                content: text,
                style,
            },
        ));
        slide.error = Some(message.to_string());
        slide
    }

    /// Whether this is an error placeholder.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Sort shapes by z-index, keeping insertion order for ties.
    pub fn sort_shapes(&mut self) {
        self.shapes.sort_by_key(|s| s.z_index);
    }

    /// Find a shape by id.
    #[must_use]
    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Text shapes in z-order.
    pub fn text_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|s| matches!(s.kind, ShapeKind::Text { .. }))
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> SlideResult<String> {
        serde_json::to_string(self).map_err(SlideError::Serialization)
    }

    /// Deserialize from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> SlideResult<Self> {
        serde_json::from_str(json).map_err(SlideError::Serialization)
    }
}

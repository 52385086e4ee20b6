//! Text formatting: font, spacing, alignment, and effects.
//!
//! Formatting is owned by value. Assigning one element's formatting to another
//! clones it, so no two elements ever share a formatting record.

use serde::{Deserialize, Serialize};

/// Font selection for a text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font family name.
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
    /// Font weight.
    #[serde(default)]
    pub weight: FontWeight,
    /// Font style.
    #[serde(default)]
    pub style: FontStyle,
    /// Text color as hex.
    pub color: String,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Inter".to_string(),
            size: 48.0,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
            color: "#FFFFFF".to_string(),
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Light (300).
    Light,
    /// Regular (400).
    #[default]
    Normal,
    /// Semi-bold (600).
    Semibold,
    /// Bold (700).
    Bold,
}

impl FontWeight {
    /// Numeric CSS-style weight.
    #[must_use]
    pub const fn value(self) -> u16 {
        match self {
            Self::Light => 300,
            Self::Normal => 400,
            Self::Semibold => 600,
            Self::Bold => 700,
        }
    }
}

/// Font style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

/// Spacing between glyphs, words, lines, and paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Extra space between characters in pixels.
    pub letter: f32,
    /// Line height as a multiple of font size.
    pub line: f32,
    /// Extra space after a paragraph in pixels.
    pub paragraph: f32,
    /// Extra space between words in pixels.
    pub word: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            letter: 0.0,
            line: 1.2,
            paragraph: 0.0,
            word: 0.0,
        }
    }
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
    /// Justified.
    Justify,
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    /// Top of the region.
    Top,
    /// Middle of the region.
    #[default]
    Middle,
    /// Bottom of the region.
    Bottom,
}

/// Horizontal and vertical alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alignment {
    /// Horizontal alignment.
    pub horizontal: HorizontalAlign,
    /// Vertical alignment.
    pub vertical: VerticalAlign,
}

/// Drop shadow behind text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Shadow color as hex.
    pub color: String,
    /// Horizontal offset in pixels.
    pub offset_x: f32,
    /// Vertical offset in pixels.
    pub offset_y: f32,
    /// Blur radius in pixels.
    pub blur: f32,
}

/// Case transform applied when drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// Draw as written.
    #[default]
    None,
    /// Upper case.
    Uppercase,
    /// Lower case.
    Lowercase,
    /// Capitalize each word.
    Capitalize,
}

/// Kind of animation applied to a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    /// Opacity from 0 to 1.
    FadeIn,
    /// Slide in from below while fading in.
    SlideUp,
    /// Scale up from smaller.
    ZoomIn,
    /// Gentle scale pulse (emphasis).
    Pulse,
    /// Glow around the glyphs (emphasis).
    Glow,
}

/// Easing curve for an animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and end.
    #[default]
    EaseInOut,
    /// Slow end.
    EaseOut,
}

/// Animation descriptor resolved by the effects stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// What to animate.
    pub kind: AnimationKind,
    /// Duration in milliseconds.
    pub duration_ms: u32,
    /// Delay before starting in milliseconds.
    #[serde(default)]
    pub delay_ms: u32,
    /// Easing curve.
    #[serde(default)]
    pub easing: Easing,
}

impl Animation {
    /// Create an animation with no delay and the default easing.
    #[must_use]
    pub fn new(kind: AnimationKind, duration_ms: u32) -> Self {
        Self {
            kind,
            duration_ms,
            delay_ms: 0,
            easing: Easing::default(),
        }
    }

    /// Set the delay.
    #[must_use]
    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Visual effects on a text element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextEffects {
    /// Optional drop shadow.
    pub shadow: Option<Shadow>,
    /// Case transform.
    pub transform: TextTransform,
    /// Entrance animation.
    pub entrance: Option<Animation>,
    /// Emphasis animation.
    pub emphasis: Option<Animation>,
}

/// Complete formatting for one text element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFormatting {
    /// Font selection.
    pub font: FontSpec,
    /// Spacing.
    pub spacing: Spacing,
    /// Alignment.
    pub alignment: Alignment,
    /// Effects and animations.
    pub effects: TextEffects,
}

impl TextFormatting {
    /// Copy of this formatting with a different font size.
    #[must_use]
    pub fn with_font_size(&self, size: f32) -> Self {
        let mut formatting = self.clone();
        formatting.font.size = size;
        formatting
    }
}

//! Text measurement backends.

use serde::{Deserialize, Serialize};
use vesper_core::FontSpec;

/// Measures the rendered size of text.
///
/// Implementations must be deterministic: the same text and font always
/// produce the same width.
pub trait TextMeasurer: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Whether widths come from real glyph metrics.
    ///
    /// Inexact backends cannot tell whether text truly overflows, so
    /// measurements taken with them always report `overflow = false`.
    fn is_exact(&self) -> bool;

    /// Width of a single line of text.
    fn measure_width(&self, text: &str, font: &FontSpec, letter_spacing: f32) -> f32;

    /// Height of one line at the font's size.
    fn line_height(&self, font: &FontSpec, multiplier: f32) -> f32 {
        font.size * multiplier
    }
}

/// Result of measuring one element at one candidate font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMeasurement {
    /// Width of the widest wrapped line.
    pub width: f32,
    /// Total height of all wrapped lines.
    pub height: f32,
    /// Number of wrapped lines.
    pub line_count: usize,
    /// Font size that was measured.
    pub font_size: f32,
    /// Whether the text exceeds the zone. Always `false` with inexact backends.
    pub overflow: bool,
}

/// Deterministic fallback that assumes every character is `ratio × size` wide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicMeasurer {
    /// Average character width as a fraction of font size.
    pub char_width_ratio: f32,
}

impl HeuristicMeasurer {
    /// Create a measurer with a custom width ratio.
    #[must_use]
    pub const fn new(char_width_ratio: f32) -> Self {
        Self { char_width_ratio }
    }
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn is_exact(&self) -> bool {
        false
    }

    #[allow(clippy::cast_precision_loss)] // Line lengths are far below f32 precision limits
    fn measure_width(&self, text: &str, font: &FontSpec, letter_spacing: f32) -> f32 {
        let chars = text.chars().count() as f32;
        chars * (font.size * self.char_width_ratio + letter_spacing)
    }
}

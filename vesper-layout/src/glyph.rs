//! Glyph-metric text measurement backed by fontdue.

use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings};
use vesper_core::FontSpec;

use crate::{HeuristicMeasurer, LayoutError, LayoutResult, TextMeasurer};

/// Measures text with real advance widths and kerning from loaded fonts.
///
/// Fonts are keyed by family name. A family that was never loaded is measured
/// with the first registered font; with no fonts at all the measurer falls
/// back to [`HeuristicMeasurer`].
pub struct GlyphMetricsMeasurer {
    fonts: HashMap<String, Font>,
    default_family: Option<String>,
    fallback: HeuristicMeasurer,
}

impl std::fmt::Debug for GlyphMetricsMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut families: Vec<_> = self.fonts.keys().collect();
        families.sort();
        f.debug_struct("GlyphMetricsMeasurer")
            .field("families", &families)
            .field("default_family", &self.default_family)
            .finish_non_exhaustive()
    }
}

impl Default for GlyphMetricsMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphMetricsMeasurer {
    /// Create a measurer with no fonts loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            default_family: None,
            fallback: HeuristicMeasurer::default(),
        }
    }

    /// Load font files, given as `(family, path)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NoFonts`] if `fonts` is empty, or the first
    /// read or parse failure.
    pub fn from_files<I, S, P>(fonts: I) -> LayoutResult<Self>
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: AsRef<Path>,
    {
        let mut measurer = Self::new();
        for (family, path) in fonts {
            measurer.add_font_file(family, path)?;
        }
        if measurer.fonts.is_empty() {
            return Err(LayoutError::NoFonts);
        }
        Ok(measurer)
    }

    /// Register font data under a family name. The first family becomes the default.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::FontLoad`] if the data is not a parseable font.
    pub fn add_font(&mut self, family: impl Into<String>, data: &[u8]) -> LayoutResult<()> {
        let family = family.into();
        let font = Font::from_bytes(data, FontSettings::default()).map_err(|reason| {
            LayoutError::FontLoad {
                family: family.clone(),
                reason: reason.to_string(),
            }
        })?;
        tracing::info!("Loaded font family '{family}' ({} glyphs)", font.glyph_count());
        if self.default_family.is_none() {
            self.default_family = Some(family.clone());
        }
        self.fonts.insert(family, font);
        Ok(())
    }

    /// Read and register a font file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`LayoutError::FontLoad`] if it is not a parseable font.
    pub fn add_font_file(
        &mut self,
        family: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> LayoutResult<()> {
        let data = std::fs::read(path.as_ref())?;
        self.add_font(family, &data)
    }

    /// Registered family names, sorted.
    #[must_use]
    pub fn families(&self) -> Vec<&str> {
        let mut families: Vec<&str> = self.fonts.keys().map(String::as_str).collect();
        families.sort_unstable();
        families
    }

    fn font_for(&self, spec: &FontSpec) -> Option<&Font> {
        self.fonts.get(&spec.family).or_else(|| {
            self.default_family
                .as_ref()
                .and_then(|family| self.fonts.get(family))
        })
    }
}

impl TextMeasurer for GlyphMetricsMeasurer {
    fn name(&self) -> &str {
        "glyph-metrics"
    }

    fn is_exact(&self) -> bool {
        !self.fonts.is_empty()
    }

    fn measure_width(&self, text: &str, font: &FontSpec, letter_spacing: f32) -> f32 {
        let Some(face) = self.font_for(font) else {
            return self.fallback.measure_width(text, font, letter_spacing);
        };

        let mut width = 0.0;
        let mut previous: Option<char> = None;
        for c in text.chars() {
            if let Some(left) = previous {
                width += face.horizontal_kern(left, c, font.size).unwrap_or(0.0);
            }
            width += face.metrics(c, font.size).advance_width + letter_spacing;
            previous = Some(c);
        }
        width
    }

    fn line_height(&self, font: &FontSpec, multiplier: f32) -> f32 {
        self.font_for(font)
            .and_then(|face| face.horizontal_line_metrics(font.size))
            .map_or(font.size * multiplier, |metrics| {
                (metrics.ascent - metrics.descent) * multiplier
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_font_data() {
        let mut measurer = GlyphMetricsMeasurer::new();
        let result = measurer.add_font("Broken", b"not a font");
        assert!(matches!(result, Err(LayoutError::FontLoad { ref family, .. }) if family == "Broken"));
        assert!(measurer.families().is_empty());
    }

    #[test]
    fn test_missing_font_file() {
        let mut measurer = GlyphMetricsMeasurer::new();
        let result = measurer.add_font_file("Inter", "/nonexistent/inter.ttf");
        assert!(matches!(result, Err(LayoutError::Io(_))));
    }

    #[test]
    fn test_no_fonts_error() {
        let fonts: Vec<(String, String)> = Vec::new();
        assert!(matches!(
            GlyphMetricsMeasurer::from_files(fonts),
            Err(LayoutError::NoFonts)
        ));
    }

    #[test]
    fn test_empty_measurer_falls_back() {
        let measurer = GlyphMetricsMeasurer::new();
        let font = FontSpec::default();
        assert!(!measurer.is_exact());
        let expected = HeuristicMeasurer::default().measure_width("Grace", &font, 0.0);
        assert!((measurer.measure_width("Grace", &font, 0.0) - expected).abs() < f32::EPSILON);
        assert!((measurer.line_height(&font, 1.2) - font.size * 1.2).abs() < f32::EPSILON);
    }
}

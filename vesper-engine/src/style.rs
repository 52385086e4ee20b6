//! Theme application to element formatting.

use vesper_core::{FontWeight, TextElementType, TextFormatting, Theme};

/// Template formatting with the theme's fonts and colors applied.
///
/// Headings take the theme's heading font and color in bold; every other
/// element takes the primary font and text color.
#[must_use]
pub fn themed_formatting(
    base: &TextFormatting,
    theme: &Theme,
    element_type: TextElementType,
) -> TextFormatting {
    let mut formatting = base.clone();
    if element_type == TextElementType::Heading {
        formatting.font.family = theme.heading_font().to_string();
        formatting.font.color = theme.heading_color().to_string();
        formatting.font.weight = FontWeight::Bold;
    } else {
        formatting.font.family.clone_from(&theme.fonts.primary);
        formatting.font.color.clone_from(&theme.colors.text);
    }
    if element_type == TextElementType::Emphasis {
        formatting.font.color.clone_from(&theme.colors.accent);
    }
    formatting
}

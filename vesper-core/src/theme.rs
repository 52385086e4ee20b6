//! Visual themes shared by templates.

use serde::{Deserialize, Serialize};

/// Theme color palette (hex strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Slide background color.
    pub background: String,
    /// Body text color.
    pub text: String,
    /// Accent color for emphasis.
    pub accent: String,
    /// Heading color; falls back to `text`.
    #[serde(default)]
    pub heading: Option<String>,
}

/// Theme fonts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeFonts {
    /// Primary (body) font family.
    pub primary: String,
    /// Heading font family; falls back to `primary`.
    #[serde(default)]
    pub heading: Option<String>,
}

/// Slide background fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    /// Solid color.
    Solid {
        /// Hex color.
        color: String,
    },
    /// Linear gradient.
    Gradient {
        /// Start color.
        from: String,
        /// End color.
        to: String,
        /// Angle in degrees.
        #[serde(default)]
        angle: f32,
    },
    /// Background image.
    Image {
        /// Image source URI.
        src: String,
    },
}

/// A named visual theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Color palette.
    pub colors: ThemeColors,
    /// Fonts.
    pub fonts: ThemeFonts,
    /// Background fill; defaults to a solid `colors.background`.
    #[serde(default)]
    pub background: Option<Background>,
}

impl Theme {
    /// Dark theme used when nothing else is configured.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            id: "dark".to_string(),
            name: "Dark".to_string(),
            colors: ThemeColors {
                background: "#000000".to_string(),
                text: "#FFFFFF".to_string(),
                accent: "#F5C542".to_string(),
                heading: Some("#F2F2F2".to_string()),
            },
            fonts: ThemeFonts {
                primary: "Inter".to_string(),
                heading: Some("Inter".to_string()),
            },
            background: None,
        }
    }

    /// Light theme for well-lit rooms.
    #[must_use]
    pub fn light() -> Self {
        Self {
            id: "light".to_string(),
            name: "Light".to_string(),
            colors: ThemeColors {
                background: "#FAFAF7".to_string(),
                text: "#1A1A1A".to_string(),
                accent: "#8A4B08".to_string(),
                heading: None,
            },
            fonts: ThemeFonts {
                primary: "Source Serif".to_string(),
                heading: None,
            },
            background: None,
        }
    }

    /// Effective background fill.
    #[must_use]
    pub fn background_fill(&self) -> Background {
        self.background.clone().unwrap_or_else(|| Background::Solid {
            color: self.colors.background.clone(),
        })
    }

    /// Heading color.
    #[must_use]
    pub fn heading_color(&self) -> &str {
        self.colors.heading.as_deref().unwrap_or(&self.colors.text)
    }

    /// Heading font family.
    #[must_use]
    pub fn heading_font(&self) -> &str {
        self.fonts.heading.as_deref().unwrap_or(&self.fonts.primary)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks() {
        let theme = Theme::light();
        assert_eq!(theme.heading_color(), "#1A1A1A");
        assert_eq!(theme.heading_font(), "Source Serif");
        assert_eq!(
            theme.background_fill(),
            Background::Solid {
                color: "#FAFAF7".to_string()
            }
        );
    }

    #[test]
    fn test_background_tagged_json() {
        let bg: Background =
            serde_json::from_str(r##"{"type": "gradient", "from": "#000", "to": "#333"}"##)
                .expect("parse");
        assert!(matches!(bg, Background::Gradient { .. }));
    }
}

//! Text zones - template regions that text elements are assigned to.

use serde::{Deserialize, Serialize};

use crate::{Rectangle, TextElementType};

/// Which content a zone accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRules {
    /// Element types allowed in this zone.
    pub allowed_types: Vec<TextElementType>,
    /// Maximum characters before the validator warns.
    #[serde(default)]
    pub max_characters: Option<usize>,
    /// Maximum wrapped lines a fitting size may produce.
    #[serde(default)]
    pub max_lines: Option<usize>,
    /// Whether the zone must receive content.
    #[serde(default)]
    pub require_content: bool,
}

impl ContentRules {
    /// Rules allowing the given types with no limits.
    #[must_use]
    pub fn allowing(types: &[TextElementType]) -> Self {
        Self {
            allowed_types: types.to_vec(),
            max_characters: None,
            max_lines: None,
            require_content: false,
        }
    }

    /// Whether an element type may be placed here.
    #[must_use]
    pub fn allows(&self, element_type: TextElementType) -> bool {
        self.allowed_types.contains(&element_type)
    }
}

/// How a zone adapts font size to content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeStrategy {
    /// Largest size that fits.
    #[default]
    Fit,
    /// Only shrink from the formatted size.
    ShrinkOnly,
}

/// Auto-resize settings for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoResize {
    /// Whether the sizing engine may change font sizes in this zone.
    pub enabled: bool,
    /// Resize strategy.
    #[serde(default)]
    pub strategy: ResizeStrategy,
    /// Smallest font size.
    #[serde(default)]
    pub min_size: Option<f32>,
    /// Largest font size.
    #[serde(default)]
    pub max_size: Option<f32>,
    /// Whether scaling preserves the block's aspect ratio.
    #[serde(default)]
    pub maintain_aspect_ratio: bool,
}

impl AutoResize {
    /// Auto-resize enabled between `min` and `max`.
    #[must_use]
    pub fn between(min: f32, max: f32) -> Self {
        Self {
            enabled: true,
            strategy: ResizeStrategy::Fit,
            min_size: Some(min),
            max_size: Some(max),
            maintain_aspect_ratio: false,
        }
    }

    /// Auto-resize turned off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            strategy: ResizeStrategy::Fit,
            min_size: None,
            max_size: None,
            maintain_aspect_ratio: false,
        }
    }
}

impl Default for AutoResize {
    fn default() -> Self {
        Self {
            enabled: true,
            strategy: ResizeStrategy::Fit,
            min_size: None,
            max_size: None,
            maintain_aspect_ratio: false,
        }
    }
}

/// What happens when text does not fit its zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowBehavior {
    /// Cut off at the zone edge.
    Clip,
    /// Wrap onto more lines.
    #[default]
    Wrap,
    /// Scroll within the zone.
    Scroll,
    /// Recompute a smaller font size.
    ScaleDown,
}

/// Overflow handling for a zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowRule {
    /// Overflow behavior.
    pub behavior: OverflowBehavior,
    /// Whether clipped text shows an ellipsis.
    #[serde(default)]
    pub show_ellipsis: bool,
}

/// A named rectangular region that text can be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextZone {
    /// Zone identifier, unique within its template.
    pub id: String,
    /// Region in slide-pixel space.
    pub bounds: Rectangle,
    /// Content rules.
    pub content_rules: ContentRules,
    /// Auto-resize settings.
    #[serde(default)]
    pub auto_resize: AutoResize,
    /// Overflow handling.
    #[serde(default)]
    pub overflow: OverflowRule,
    /// Priority; template authors order zones by it.
    #[serde(default)]
    pub priority: i32,
}

impl TextZone {
    /// Create a zone with default resize and overflow rules.
    pub fn new(id: impl Into<String>, bounds: Rectangle, allowed: &[TextElementType]) -> Self {
        Self {
            id: id.into(),
            bounds,
            content_rules: ContentRules::allowing(allowed),
            auto_resize: AutoResize::default(),
            overflow: OverflowRule::default(),
            priority: 0,
        }
    }

    /// Set the auto-resize settings.
    #[must_use]
    pub fn with_auto_resize(mut self, auto_resize: AutoResize) -> Self {
        self.auto_resize = auto_resize;
        self
    }

    /// Set the overflow behavior.
    #[must_use]
    pub fn with_overflow(mut self, behavior: OverflowBehavior) -> Self {
        self.overflow.behavior = behavior;
        self
    }

    /// Set the maximum line count.
    #[must_use]
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.content_rules.max_lines = Some(max_lines);
        self
    }

    /// Set the maximum character count.
    #[must_use]
    pub fn with_max_characters(mut self, max_characters: usize) -> Self {
        self.content_rules.max_characters = Some(max_characters);
        self
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether an element type may be placed here.
    #[must_use]
    pub fn accepts(&self, element_type: TextElementType) -> bool {
        self.content_rules.allows(element_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_from_json_with_defaults() {
        let json = r#"{
            "id": "body",
            "bounds": {"x": 100.0, "y": 200.0, "width": 1720.0, "height": 600.0},
            "content_rules": {"allowed_types": ["verse", "chorus"]}
        }"#;
        let zone: TextZone = serde_json::from_str(json).expect("parse");
        assert!(zone.accepts(TextElementType::Verse));
        assert!(!zone.accepts(TextElementType::Heading));
        assert!(zone.auto_resize.enabled);
        assert_eq!(zone.overflow.behavior, OverflowBehavior::Wrap);
    }

    #[test]
    fn test_overflow_behavior_kebab_case() {
        let rule: OverflowRule =
            serde_json::from_str(r#"{"behavior": "scale-down"}"#).expect("parse");
        assert_eq!(rule.behavior, OverflowBehavior::ScaleDown);
        assert!(!rule.show_ellipsis);
    }
}

//! Structural and performance linting of slides.
//!
//! Findings are informational: only structural problems (missing ids,
//! unanalyzed content, duplicate element ids) count as errors.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Complexity, Slide, SlideTemplate};

/// Outcome of a validation pass.
///
/// Built fresh per call; findings are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether no errors were found.
    pub is_valid: bool,
    /// Problems that make the slide unusable.
    pub errors: Vec<String>,
    /// Problems worth surfacing to the operator.
    pub warnings: Vec<String>,
    /// Suggested fixes.
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    /// An empty, valid result.
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// A result holding a single error.
    pub fn failure(error: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.add_error(error);
        result
    }

    /// Record an error.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(error.into());
    }

    /// Record a warning.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Record a suggestion, skipping exact duplicates.
    pub fn add_suggestion(&mut self, suggestion: impl Into<String>) {
        let suggestion = suggestion.into();
        if !self.suggestions.contains(&suggestion) {
            self.suggestions.push(suggestion);
        }
    }

    /// Append another result's findings.
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        for suggestion in other.suggestions {
            self.add_suggestion(suggestion);
        }
    }

    /// Whether there are no findings at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Limits used by [`ContentValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Characters in one element before it is considered too long.
    pub max_text_length: usize,
    /// Elements on one slide before it is considered crowded.
    pub max_elements: usize,
    /// Characters across the slide before it is considered crowded.
    pub max_total_characters: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_text_length: 500,
            max_elements: 12,
            max_total_characters: 1200,
        }
    }
}

/// Lints slides for missing fields, empty or oversized text, template
/// mismatches, and complexity.
#[derive(Debug, Clone, Default)]
pub struct ContentValidator {
    config: ValidationConfig,
}

impl ContentValidator {
    /// Create a validator with the given limits.
    #[must_use]
    pub const fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// The active limits.
    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a slide, optionally against its template and a complexity estimate.
    #[must_use]
    pub fn validate_slide(
        &self,
        slide: &Slide,
        template: Option<&SlideTemplate>,
        complexity: Option<Complexity>,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        self.check_structure(slide, &mut result);
        self.check_elements(slide, template, &mut result);
        if let Some(template) = template {
            Self::check_template(slide, template, &mut result);
        } else if slide.template_id.is_some() {
            result.add_warning("Slide template could not be resolved");
        }
        if let Some(complexity) = complexity {
            Self::check_complexity(complexity, &mut result);
        }

        tracing::debug!(
            "Validated slide {}: {} errors, {} warnings, {} suggestions",
            slide.id,
            result.errors.len(),
            result.warnings.len(),
            result.suggestions.len()
        );
        result
    }

    fn check_structure(&self, slide: &Slide, result: &mut ValidationResult) {
        if slide.id.as_str().trim().is_empty() {
            result.add_error("Slide id is missing");
        }
        let Some(rich) = &slide.rich_text else {
            result.add_error("Slide content has not been analyzed into text elements");
            return;
        };
        if rich.elements.is_empty() {
            result.add_warning("Slide has no text content");
        }

        let mut seen = HashSet::new();
        for element in &rich.elements {
            if !seen.insert(&element.id) {
                result.add_error(format!("Duplicate element id: {}", element.id));
            }
        }

        if rich.elements.len() > self.config.max_elements {
            result.add_warning(format!(
                "Slide has {} text elements (recommended max {})",
                rich.elements.len(),
                self.config.max_elements
            ));
            result.add_suggestion("Split the content across multiple slides");
        }

        let total = rich.char_count();
        if total > self.config.max_total_characters {
            result.add_warning(format!(
                "Slide has {total} characters (recommended max {})",
                self.config.max_total_characters
            ));
            result.add_suggestion("Split the content across multiple slides");
        }
    }

    fn check_elements(
        &self,
        slide: &Slide,
        template: Option<&SlideTemplate>,
        result: &mut ValidationResult,
    ) {
        for element in slide.elements() {
            if element.is_blank() {
                result.add_warning(format!("Element '{}' has empty text", element.id));
                continue;
            }
            let count = element.char_count();
            if count > self.config.max_text_length {
                result.add_warning(format!(
                    "Element '{}' is {count} characters long (max {})",
                    element.id, self.config.max_text_length
                ));
                result.add_suggestion("Shorten long text blocks or split them across slides");
            }
            if let Some(template) = template {
                let size = element.font_size();
                let bounds = &template.constraints;
                if size < bounds.min_font_size || size > bounds.max_font_size {
                    result.add_warning(format!(
                        "Element '{}' font size {size} is outside template bounds [{}, {}]",
                        element.id, bounds.min_font_size, bounds.max_font_size
                    ));
                }
            }
        }
    }

    fn check_template(slide: &Slide, template: &SlideTemplate, result: &mut ValidationResult) {
        if !template.accepts_category(slide.category()) {
            result.add_warning(format!(
                "Template '{}' ({}) does not match slide category {}",
                template.id,
                template.category,
                slide.category()
            ));
            result.add_suggestion(format!("Use a {} template", slide.category()));
        }

        let count = slide.elements().len();
        if count > template.constraints.max_text_elements {
            result.add_warning(format!(
                "Template '{}' allows {} text elements, slide has {count}",
                template.id, template.constraints.max_text_elements
            ));
        }

        for zone in template.text_zones.iter().filter(|z| z.content_rules.require_content) {
            let filled = slide.elements().iter().any(|e| zone.accepts(e.element_type));
            if !filled {
                result.add_warning(format!("Zone '{}' requires content but has none", zone.id));
            }
        }
    }

    fn check_complexity(complexity: Complexity, result: &mut ValidationResult) {
        if complexity == Complexity::High {
            result.add_warning("High complexity slide may render slowly");
            result.add_suggestion("Reduce the number of text elements or the amount of text");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Rectangle, RichTextContent, SlideCategory, SlideContent, TextElement, TextElementType,
        TextZone,
    };

    fn note_slide(elements: Vec<TextElement>) -> Slide {
        let mut slide = Slide::with_id(
            "note-1",
            SlideContent::Note {
                title: None,
                body: "Body".to_string(),
            },
        );
        slide.rich_text = Some(RichTextContent::new(elements));
        slide
    }

    #[test]
    fn test_clean_slide_is_valid() {
        let slide = note_slide(vec![TextElement::new("e0", TextElementType::Text, "Grace")]);
        let result = ContentValidator::default().validate_slide(&slide, None, Some(Complexity::Low));
        assert!(result.is_valid);
        assert!(result.is_clean());
    }

    #[test]
    fn test_unanalyzed_slide_is_error() {
        let slide = Slide::with_id(
            "raw",
            SlideContent::Note {
                title: None,
                body: "Body".to_string(),
            },
        );
        let result = ContentValidator::default().validate_slide(&slide, None, None);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_empty_text_is_warning() {
        let slide = note_slide(vec![TextElement::new("e0", TextElementType::Text, "   ")]);
        let result = ContentValidator::default().validate_slide(&slide, None, None);
        assert!(result.is_valid);
        assert!(result.warnings[0].contains("empty text"));
    }

    #[test]
    fn test_long_text_warns_and_suggests() {
        let slide = note_slide(vec![TextElement::new(
            "e0",
            TextElementType::Text,
            "a".repeat(600),
        )]);
        let result = ContentValidator::default().validate_slide(&slide, None, None);
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("600 characters")));
        assert!(!result.suggestions.is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_errors() {
        let slide = note_slide(vec![
            TextElement::new("dup", TextElementType::Text, "one"),
            TextElement::new("dup", TextElementType::Text, "two"),
        ]);
        let result = ContentValidator::default().validate_slide(&slide, None, None);
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("dup"));
    }

    #[test]
    fn test_template_mismatch_and_complexity() {
        let template = SlideTemplate::new("lyrics", "Lyrics", SlideCategory::Song).with_text_zone(
            TextZone::new(
                "body",
                Rectangle::new(0.0, 0.0, 100.0, 100.0),
                &[TextElementType::Verse],
            ),
        );
        let mut element = TextElement::new("e0", TextElementType::Text, "Note");
        element.set_font_size(40.0);
        let slide = note_slide(vec![element]);
        let result = ContentValidator::default().validate_slide(
            &slide,
            Some(&template),
            Some(Complexity::High),
        );
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("does not match")));
        assert!(result.warnings.iter().any(|w| w.contains("High complexity")));
    }

    #[test]
    fn test_merge_keeps_invalid() {
        let mut a = ValidationResult::new();
        a.add_suggestion("same");
        let mut b = ValidationResult::failure("broken");
        b.add_suggestion("same");
        a.merge(b);
        assert!(!a.is_valid);
        assert_eq!(a.suggestions.len(), 1);
    }
}

//! Greedy line wrapping.

use vesper_core::{FontSpec, Spacing};

use crate::TextMeasurer;

/// One wrapped line.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    /// Line text.
    pub text: String,
    /// Measured width.
    pub width: f32,
    /// Whether this line starts a paragraph (follows an explicit line break).
    pub paragraph_start: bool,
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// Words are packed greedily. Explicit newlines always start a new line. A
/// word wider than `max_width` is kept whole on its own line, so the result
/// can be wider than `max_width`. Blank text yields no lines.
#[must_use]
pub fn wrap_lines(
    measurer: &dyn TextMeasurer,
    text: &str,
    font: &FontSpec,
    spacing: &Spacing,
    max_width: f32,
) -> Vec<WrappedLine> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let space_width = measurer.measure_width(" ", font, spacing.letter) + spacing.word;
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;
        let mut paragraph_start = true;

        for word in paragraph.split_whitespace() {
            let word_width = measurer.measure_width(word, font, spacing.letter);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
                continue;
            }
            let candidate = current_width + space_width + word_width;
            if candidate <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width = candidate;
            } else {
                lines.push(WrappedLine {
                    text: std::mem::take(&mut current),
                    width: current_width,
                    paragraph_start,
                });
                paragraph_start = false;
                current.push_str(word);
                current_width = word_width;
            }
        }

        lines.push(WrappedLine {
            text: current,
            width: current_width,
            paragraph_start,
        });
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeuristicMeasurer;

    fn font(size: f32) -> FontSpec {
        FontSpec {
            size,
            ..FontSpec::default()
        }
    }

    #[test]
    fn test_short_text_single_line() {
        let lines = wrap_lines(
            &HeuristicMeasurer::default(),
            "John 3:16",
            &font(80.0),
            &Spacing::default(),
            1720.0,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "John 3:16");
    }

    #[test]
    fn test_wraps_at_width() {
        // Each char is 6px wide at size 10; 10 chars per 60px line.
        let lines = wrap_lines(
            &HeuristicMeasurer::default(),
            "aaaa bbbb cccc dddd",
            &font(10.0),
            &Spacing::default(),
            60.0,
        );
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["aaaa bbbb", "cccc dddd"]);
        assert!(lines.iter().all(|l| l.width <= 60.0));
        assert!(lines[0].paragraph_start);
        assert!(!lines[1].paragraph_start);
    }

    #[test]
    fn test_explicit_newlines_start_paragraphs() {
        let lines = wrap_lines(
            &HeuristicMeasurer::default(),
            "Amazing grace\nHow sweet the sound",
            &font(10.0),
            &Spacing::default(),
            1000.0,
        );
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.paragraph_start));
    }

    #[test]
    fn test_long_word_kept_whole() {
        let lines = wrap_lines(
            &HeuristicMeasurer::default(),
            "supercalifragilistic",
            &font(10.0),
            &Spacing::default(),
            30.0,
        );
        assert_eq!(lines.len(), 1);
        assert!(lines[0].width > 30.0);
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        let lines = wrap_lines(
            &HeuristicMeasurer::default(),
            "  \n ",
            &font(10.0),
            &Spacing::default(),
            100.0,
        );
        assert!(lines.is_empty());
    }
}

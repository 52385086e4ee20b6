//! Built-in templates and themes.
//!
//! All templates are laid out on a 1920x1080 canvas with a 100px side margin.

use vesper_core::{
    AutoResize, FontSpec, FontWeight, Insets, MediaKind, MediaZone, OverflowBehavior, Placeholder,
    PlaceholderRole, Rectangle, SlideCategory, SlideTemplate, TextElementType, TextFormatting,
    TextZone, Theme,
};

/// Id of the template used for a category when a slide names none.
#[must_use]
pub const fn default_template_id(category: SlideCategory) -> &'static str {
    match category {
        SlideCategory::Title => "title",
        SlideCategory::Scripture => "scripture",
        SlideCategory::Song => "lyrics",
        SlideCategory::Note => "note",
        SlideCategory::Announcement => "announcement",
        SlideCategory::Custom => "blank",
    }
}

/// Built-in themes: dark first (the default), then light.
#[must_use]
pub fn themes() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// All built-in templates.
#[must_use]
pub fn templates() -> Vec<SlideTemplate> {
    vec![
        title(),
        scripture(),
        lyrics(),
        announcement(),
        note(),
        blank(),
    ]
}

fn formatting(size: f32) -> TextFormatting {
    TextFormatting {
        font: FontSpec {
            size,
            ..FontSpec::default()
        },
        ..TextFormatting::default()
    }
}

fn title() -> SlideTemplate {
    let mut template = SlideTemplate::new("title", "Title", SlideCategory::Title)
        .with_description("Large centered title with an optional subtitle")
        .with_tags(&["title", "welcome", "heading"])
        .with_text_zone(
            TextZone::new(
                "title",
                Rectangle::new(160.0, 340.0, 1600.0, 240.0),
                &[TextElementType::Heading],
            )
            .with_auto_resize(AutoResize::between(48.0, 120.0))
            .with_max_lines(2),
        )
        .with_text_zone(
            TextZone::new(
                "subtitle",
                Rectangle::new(160.0, 620.0, 1600.0, 140.0),
                &[TextElementType::Text, TextElementType::Emphasis],
            )
            .with_auto_resize(AutoResize::between(24.0, 64.0)),
        )
        .with_placeholder(Placeholder::new("title", "title", PlaceholderRole::Title, true))
        .with_placeholder(Placeholder::new("subtitle", "subtitle", PlaceholderRole::Body, false))
        .with_default_formatting(formatting(96.0));
    template.constraints.max_text_elements = 2;
    template
}

fn scripture() -> SlideTemplate {
    SlideTemplate::new("scripture", "Scripture", SlideCategory::Scripture)
        .with_description("Bible reading with the reference above the verse text")
        .with_tags(&["bible", "verse", "reading"])
        .with_text_zone(
            TextZone::new(
                "reference",
                Rectangle::new(100.0, 60.0, 1720.0, 140.0),
                &[TextElementType::Heading],
            )
            .with_auto_resize(AutoResize::between(32.0, 72.0))
            .with_max_lines(1)
            .with_priority(1),
        )
        .with_text_zone(
            TextZone::new(
                "body",
                Rectangle::new(100.0, 240.0, 1720.0, 600.0),
                &[TextElementType::Verse, TextElementType::Text],
            )
            .with_auto_resize(AutoResize::between(16.0, 80.0))
            .with_overflow(OverflowBehavior::ScaleDown)
            .with_max_characters(1200),
        )
        .with_placeholder(Placeholder::new(
            "reference",
            "reference",
            PlaceholderRole::Reference,
            true,
        ))
        .with_placeholder(Placeholder::new("body", "body", PlaceholderRole::Body, true))
        .with_default_formatting(formatting(56.0))
}

fn lyrics() -> SlideTemplate {
    SlideTemplate::new("lyrics", "Song Lyrics", SlideCategory::Song)
        .with_description("Song sections with an optional title line")
        .with_tags(&["song", "lyrics", "worship", "music"])
        .with_text_zone(
            TextZone::new(
                "title",
                Rectangle::new(100.0, 40.0, 1720.0, 120.0),
                &[TextElementType::Heading],
            )
            .with_auto_resize(AutoResize::between(28.0, 64.0))
            .with_max_lines(1),
        )
        .with_text_zone(
            TextZone::new(
                "lyrics",
                Rectangle::new(100.0, 200.0, 1720.0, 720.0),
                &[
                    TextElementType::Verse,
                    TextElementType::Chorus,
                    TextElementType::Bridge,
                    TextElementType::Text,
                ],
            )
            .with_auto_resize(AutoResize::between(24.0, 96.0))
            .with_max_lines(12),
        )
        .with_placeholder(Placeholder::new("title", "title", PlaceholderRole::Title, false))
        .with_placeholder(Placeholder::new("lyrics", "lyrics", PlaceholderRole::Body, true))
        .with_default_formatting(formatting(64.0))
}

fn announcement() -> SlideTemplate {
    let mut template = SlideTemplate::new("announcement", "Announcement", SlideCategory::Announcement)
        .with_description("Headline, details, and a footer line beside an image")
        .with_tags(&["announcement", "event", "news"])
        .with_text_zone(
            TextZone::new(
                "title",
                Rectangle::new(100.0, 80.0, 1080.0, 160.0),
                &[TextElementType::Heading],
            )
            .with_auto_resize(AutoResize::between(40.0, 96.0))
            .with_max_lines(2),
        )
        .with_text_zone(
            TextZone::new(
                "body",
                Rectangle::new(100.0, 280.0, 1080.0, 520.0),
                &[TextElementType::Text],
            )
            .with_auto_resize(AutoResize::between(20.0, 56.0))
            .with_max_characters(600),
        )
        .with_text_zone(
            TextZone::new(
                "footer",
                Rectangle::new(100.0, 860.0, 1720.0, 120.0),
                &[TextElementType::Emphasis],
            )
            .with_auto_resize(AutoResize::between(20.0, 48.0))
            .with_max_lines(1),
        )
        .with_media_zone(MediaZone {
            id: "image".to_string(),
            bounds: Rectangle::new(1240.0, 80.0, 580.0, 720.0),
            kind: MediaKind::Image,
        })
        .with_placeholder(Placeholder::new("title", "title", PlaceholderRole::Title, true))
        .with_placeholder(Placeholder::new("body", "body", PlaceholderRole::Body, true))
        .with_placeholder(Placeholder::new("footer", "footer", PlaceholderRole::Footer, false))
        .with_placeholder(Placeholder::new("image", "image", PlaceholderRole::Media, false))
        .with_default_formatting(formatting(48.0));
    template.layout.padding = Insets::uniform(40.0);
    template
}

fn note() -> SlideTemplate {
    let mut formatting = formatting(44.0);
    formatting.font.weight = FontWeight::Light;
    SlideTemplate::new("note", "Sermon Note", SlideCategory::Note)
        .with_description("Sermon point or note with an optional heading")
        .with_tags(&["sermon", "note", "point"])
        .with_text_zone(
            TextZone::new(
                "title",
                Rectangle::new(100.0, 80.0, 1720.0, 140.0),
                &[TextElementType::Heading],
            )
            .with_auto_resize(AutoResize::between(32.0, 80.0)),
        )
        .with_text_zone(
            TextZone::new(
                "body",
                Rectangle::new(100.0, 260.0, 1720.0, 700.0),
                &[TextElementType::Text, TextElementType::Emphasis],
            )
            .with_auto_resize(AutoResize::between(20.0, 72.0)),
        )
        .with_placeholder(Placeholder::new("title", "title", PlaceholderRole::Title, false))
        .with_placeholder(Placeholder::new("body", "body", PlaceholderRole::Body, true))
        .with_default_formatting(formatting)
}

fn blank() -> SlideTemplate {
    SlideTemplate::new("blank", "Blank", SlideCategory::Custom)
        .with_description("One full-screen zone for any content")
        .with_tags(&["blank", "custom", "freeform"])
        .with_text_zone(
            TextZone::new(
                "content",
                Rectangle::new(100.0, 60.0, 1720.0, 960.0),
                &TextElementType::ALL,
            )
            .with_auto_resize(AutoResize::between(16.0, 96.0)),
        )
        .with_placeholder(Placeholder::new("content", "content", PlaceholderRole::Body, false))
        .with_default_formatting(formatting(48.0))
}

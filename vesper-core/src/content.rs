//! Slide content supplied by the content-access layer.
//!
//! Content is a closed union over the slide shapes a service uses. The
//! content-analysis stage matches on it to build text elements.
//!
//! ## Example JSON
//!
//! ```json
//! {
//!   "type": "scripture",
//!   "reference": "John 3:16",
//!   "translation": "KJV",
//!   "verses": [{ "number": 16, "text": "For God so loved the world..." }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::TextElementType;

/// A single numbered verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Verse number within its chapter.
    pub number: u32,
    /// Verse text.
    pub text: String,
}

/// Kind of song section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Verse.
    Verse,
    /// Chorus / refrain.
    Chorus,
    /// Bridge.
    Bridge,
}

impl SectionKind {
    /// Text element type used for this section.
    #[must_use]
    pub const fn element_type(self) -> TextElementType {
        match self {
            Self::Verse => TextElementType::Verse,
            Self::Chorus => TextElementType::Chorus,
            Self::Bridge => TextElementType::Bridge,
        }
    }
}

/// A block of song lyrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricSection {
    /// Section kind.
    pub kind: SectionKind,
    /// Optional label such as "Verse 2".
    #[serde(default)]
    pub label: Option<String>,
    /// Lyric lines.
    pub lines: Vec<String>,
}

/// A free-form typed text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBlock {
    /// Element type for the block.
    pub kind: TextElementType,
    /// Block text.
    pub text: String,
}

/// Category of a slide, used to match templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideCategory {
    /// Title slide.
    Title,
    /// Scripture passage.
    Scripture,
    /// Song lyrics.
    Song,
    /// Sermon note.
    Note,
    /// Announcement.
    Announcement,
    /// Anything else.
    Custom,
}

impl SlideCategory {
    /// Lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Scripture => "scripture",
            Self::Song => "song",
            Self::Note => "note",
            Self::Announcement => "announcement",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for SlideCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlideContent {
    /// A scripture passage.
    Scripture {
        /// Reference such as "John 3:16-17".
        reference: String,
        /// Optional translation abbreviation.
        #[serde(default)]
        translation: Option<String>,
        /// The verses shown on this slide.
        verses: Vec<Verse>,
    },

    /// Song lyrics.
    Song {
        /// Song title.
        #[serde(default)]
        title: Option<String>,
        /// Sections shown on this slide.
        sections: Vec<LyricSection>,
    },

    /// A sermon or teaching note.
    Note {
        /// Optional note title.
        #[serde(default)]
        title: Option<String>,
        /// Note body.
        body: String,
    },

    /// An announcement.
    Announcement {
        /// Headline.
        title: String,
        /// Details.
        body: String,
        /// Optional footer (date, location, link).
        #[serde(default)]
        footer: Option<String>,
    },

    /// Free-form content.
    Custom {
        /// Optional title.
        #[serde(default)]
        title: Option<String>,
        /// Typed text blocks.
        blocks: Vec<CustomBlock>,
    },
}

impl SlideContent {
    /// Category of this content.
    #[must_use]
    pub const fn category(&self) -> SlideCategory {
        match self {
            Self::Scripture { .. } => SlideCategory::Scripture,
            Self::Song { .. } => SlideCategory::Song,
            Self::Note { .. } => SlideCategory::Note,
            Self::Announcement { .. } => SlideCategory::Announcement,
            Self::Custom { .. } => SlideCategory::Custom,
        }
    }

    /// Human-readable title, if the content has one.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match self {
            Self::Scripture {
                reference,
                translation,
                ..
            } => Some(match translation {
                Some(t) if !t.is_empty() => format!("{reference} ({t})"),
                _ => reference.clone(),
            }),
            Self::Song { title, .. } | Self::Note { title, .. } | Self::Custom { title, .. } => {
                title.clone()
            }
            Self::Announcement { title, .. } => Some(title.clone()),
        }
    }

    /// Typed body blocks, excluding the title.
    #[must_use]
    pub fn body_blocks(&self) -> Vec<(TextElementType, String)> {
        match self {
            Self::Scripture { verses, .. } => {
                if verses.is_empty() {
                    return Vec::new();
                }
                let text = verses
                    .iter()
                    .map(|v| format!("{} {}", v.number, v.text.trim()))
                    .collect::<Vec<_>>()
                    .join(" ");
                vec![(TextElementType::Verse, text)]
            }
            Self::Song { sections, .. } => sections
                .iter()
                .map(|s| (s.kind.element_type(), s.lines.join("\n")))
                .collect(),
            Self::Note { body, .. } => vec![(TextElementType::Text, body.clone())],
            Self::Announcement { body, footer, .. } => {
                let mut blocks = vec![(TextElementType::Text, body.clone())];
                if let Some(footer) = footer {
                    blocks.push((TextElementType::Emphasis, footer.clone()));
                }
                blocks
            }
            Self::Custom { blocks, .. } => blocks.iter().map(|b| (b.kind, b.text.clone())).collect(),
        }
    }

    /// Footer text, if the content has one.
    #[must_use]
    pub fn footer(&self) -> Option<&str> {
        match self {
            Self::Announcement { footer, .. } => footer.as_deref(),
            _ => None,
        }
    }

    /// All human-readable text, title first, joined by newlines.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut parts: Vec<String> = self.title().into_iter().collect();
        parts.extend(self.body_blocks().into_iter().map(|(_, text)| text));
        parts.join("\n")
    }
}

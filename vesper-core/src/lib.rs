//! # Vesper Core
//!
//! Core slide model for presenting service content (scripture, song lyrics,
//! notes, announcements) on a secondary display.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                vesper-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Content         │  Templates               │
//! │  - Slide union   │  - Text / media zones    │
//! │  - Text elements │  - Constraints, layout   │
//! │  - Formatting    │  - Themes                │
//! ├─────────────────────────────────────────────┤
//! │  Validation      │  Resolved slides         │
//! │  - Lint findings │  - Absolute shapes       │
//! │  - Complexity    │  - JSON transport        │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod content;
pub mod element;
pub mod error;
pub mod format;
pub mod geometry;
pub mod resolved;
pub mod slide;
pub mod template;
pub mod theme;
pub mod validation;
pub mod zone;

pub use content::{CustomBlock, LyricSection, SectionKind, SlideCategory, SlideContent, Verse};
pub use element::{ElementId, SizeConstraints, TextElement, TextElementType};
pub use error::{SlideError, SlideResult};
pub use format::{
    Alignment, Animation, AnimationKind, Easing, FontSpec, FontStyle, FontWeight,
    HorizontalAlign, Shadow, Spacing, TextEffects, TextFormatting, TextTransform, VerticalAlign,
};
pub use geometry::{ElementPosition, Insets, Rectangle, SlideSize};
pub use resolved::{ResolvedSlide, ResolvedStyle, Shape, ShapeKind};
pub use slide::{Complexity, RenderContext, RichTextContent, Slide, SlideId};
pub use template::{
    LayoutMetadata, MediaKind, MediaZone, Placeholder, PlaceholderRole, SlideTemplate,
    TemplateConstraints,
};
pub use theme::{Background, Theme, ThemeColors, ThemeFonts};
pub use validation::{ContentValidator, ValidationConfig, ValidationResult};
pub use zone::{AutoResize, ContentRules, OverflowBehavior, OverflowRule, ResizeStrategy, TextZone};

/// Vesper core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Vesper Layout
//!
//! Adaptive text fitting: finds the largest font size at which each text
//! element fits its template zone, then harmonizes sizes across elements of
//! the same type.
//!
//! ## Measurement Backends
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             TextMeasurer Trait              │
//! ├──────────────────────┬──────────────────────┤
//! │ Glyph metrics        │ Heuristic fallback   │
//! │ (fontdue, exact)     │ (0.6 × size / char)  │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! The host chooses a backend when it builds the [`SizingEngine`]; the engine
//! owns it for its whole lifetime.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
#[cfg(feature = "glyph-metrics")]
pub mod glyph;
pub mod measure;
pub mod sizing;
pub mod wrap;
pub mod zones;

pub use error::{LayoutError, LayoutResult};
#[cfg(feature = "glyph-metrics")]
pub use glyph::GlyphMetricsMeasurer;
pub use measure::{HeuristicMeasurer, TextMeasurement, TextMeasurer};
pub use sizing::{SizeSearch, SizingConfig, SizingEngine};
pub use wrap::wrap_lines;
pub use zones::ZoneMapper;

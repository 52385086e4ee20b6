//! # Vesper Engine
//!
//! Turns service content into resolved slides.
//!
//! ## Data Flow
//!
//! ```text
//! SlideContent + template id
//!         │
//!         ▼
//! ┌──────────────────────────────────────────────┐
//! │               RenderPipeline                 │
//! │  1 content-analysis    → TextElements        │
//! │  2 template-application → ZoneMapper         │
//! │  3 text-sizing-layout  → SizingEngine        │
//! │  4 effects-animations                        │
//! │  5 final-composition   → ContentValidator    │
//! └──────────────────────────────────────────────┘
//!         │
//!         ▼
//! ResolvedSlide (shapes + background, JSON-ready)
//! ```
//!
//! Templates and themes come from a [`TemplateRegistry`], which can also
//! generate placeholder-filled slides directly without adaptive fitting.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod defaults;
pub mod pipeline;
pub mod registry;
pub mod stages;
pub mod style;

pub use cache::{AnalysisCache, SlideAnalysis};
pub use config::EngineConfig;
pub use pipeline::{RenderPipeline, RenderStage};
pub use registry::{GenerateSlideRequest, GenerateSlideResult, GenerationMetadata, TemplateRegistry};

/// Vesper engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

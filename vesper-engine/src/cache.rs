//! Per-slide analysis results shared between pipeline stages.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use vesper_core::{Complexity, SlideId, ValidationResult};

/// What the pipeline learned about one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideAnalysis {
    /// Complexity estimate from content analysis.
    pub complexity: Complexity,
    /// Number of text elements.
    pub element_count: usize,
    /// Characters across all elements.
    pub char_count: usize,
    /// Final validation result, once composition has run.
    pub validation: Option<ValidationResult>,
}

impl SlideAnalysis {
    /// Analysis for a slide's element statistics.
    #[must_use]
    pub fn new(element_count: usize, char_count: usize) -> Self {
        Self {
            complexity: Complexity::estimate(element_count, char_count),
            element_count,
            char_count,
            validation: None,
        }
    }
}

/// Thread-safe analysis cache keyed by slide id.
///
/// Entries are replaced on each analysis pass. Overlapping renders of the
/// same slide id race on their entry; callers must not issue them.
#[derive(Debug, Clone, Default)]
pub struct AnalysisCache {
    entries: Arc<RwLock<HashMap<SlideId, SlideAnalysis>>>,
}

impl AnalysisCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new analysis pass for a slide, replacing any previous entry.
    pub fn begin(&self, id: &SlideId, analysis: SlideAnalysis) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(id.clone(), analysis);
    }

    /// Attach a validation result to a slide's entry.
    ///
    /// Returns `false` if the slide has not been analyzed.
    pub fn record_validation(&self, id: &SlideId, validation: ValidationResult) -> bool {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match entries.get_mut(id) {
            Some(entry) => {
                entry.validation = Some(validation);
                true
            }
            None => false,
        }
    }

    /// Get a slide's analysis.
    #[must_use]
    pub fn get(&self, id: &SlideId) -> Option<SlideAnalysis> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.get(id).cloned()
    }

    /// Complexity estimate for a slide.
    #[must_use]
    pub fn complexity(&self, id: &SlideId) -> Option<Complexity> {
        self.get(id).map(|a| a.complexity)
    }

    /// Drop a slide's entry.
    pub fn remove(&self, id: &SlideId) -> Option<SlideAnalysis> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.remove(id)
    }

    /// Number of cached slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

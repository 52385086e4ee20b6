//! Stage 5: final composition.

use vesper_core::{ContentValidator, RenderContext, Slide, SlideResult};

use super::resolve_template;
use crate::cache::AnalysisCache;
use crate::pipeline::RenderStage;
use crate::TemplateRegistry;

/// Validates the fully resolved slide. Findings are logged and cached but
/// never stop the render.
#[derive(Debug, Clone)]
pub struct FinalCompositionStage {
    registry: TemplateRegistry,
    cache: AnalysisCache,
    validator: ContentValidator,
}

impl FinalCompositionStage {
    /// Stage name.
    pub const NAME: &'static str = "final-composition";

    /// Create the stage.
    #[must_use]
    pub fn new(registry: TemplateRegistry, cache: AnalysisCache, validator: ContentValidator) -> Self {
        Self {
            registry,
            cache,
            validator,
        }
    }
}

impl RenderStage for FinalCompositionStage {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        5
    }

    fn process(&self, slide: Slide, _context: &RenderContext) -> SlideResult<Slide> {
        let template = resolve_template(&self.registry, &slide)?;
        let complexity = self.cache.complexity(&slide.id);
        let validation = self
            .validator
            .validate_slide(&slide, template.as_ref(), complexity);

        if validation.is_valid {
            for warning in &validation.warnings {
                tracing::debug!("Slide {}: {warning}", slide.id);
            }
        } else {
            tracing::warn!(
                "Slide {} failed validation: {}",
                slide.id,
                validation.errors.join("; ")
            );
        }

        self.cache.record_validation(&slide.id, validation);
        Ok(slide)
    }
}

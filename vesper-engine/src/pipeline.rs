//! Priority-ordered render pipeline.
//!
//! Each stage receives the slide produced by the previous one together with
//! the same [`RenderContext`]. [`RenderPipeline::process_slide`] never fails:
//! a stage error or panic becomes a visible error slide.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use vesper_core::{
    ContentValidator, ElementPosition, RenderContext, ResolvedSlide, ResolvedStyle, Shape,
    ShapeKind, Slide, SlideError, SlideId, SlideResult, ValidationConfig,
};
use vesper_layout::SizingEngine;

use crate::cache::{AnalysisCache, SlideAnalysis};
use crate::stages::{
    resolve_template, ContentAnalysisStage, EffectsStage, FinalCompositionStage,
    TemplateApplicationStage, TextSizingStage,
};
use crate::{EngineConfig, TemplateRegistry};

/// One step of the render pipeline.
pub trait RenderStage: Send + Sync {
    /// Stage name, unique within a pipeline.
    fn name(&self) -> &str;

    /// Execution order; lower runs first.
    fn priority(&self) -> u32;

    /// Transform a slide.
    ///
    /// # Errors
    ///
    /// Returns an error if the slide cannot be processed; the pipeline turns
    /// it into an error slide.
    fn process(&self, slide: Slide, context: &RenderContext) -> SlideResult<Slide>;
}

/// Runs slides through an ordered list of [`RenderStage`]s and composes the
/// result into a [`ResolvedSlide`].
pub struct RenderPipeline {
    stages: Vec<Box<dyn RenderStage>>,
    registry: TemplateRegistry,
    cache: AnalysisCache,
}

impl std::fmt::Debug for RenderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPipeline")
            .field("stages", &self.stage_names())
            .field("cached_slides", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl RenderPipeline {
    /// Create a pipeline with the five built-in stages.
    #[must_use]
    pub fn new(
        registry: TemplateRegistry,
        sizing: Arc<SizingEngine>,
        validation: ValidationConfig,
    ) -> Self {
        let mut pipeline = Self::bare(registry.clone());
        let cache = pipeline.cache.clone();
        pipeline.add_stage(Box::new(ContentAnalysisStage::new(registry.clone(), cache.clone())));
        pipeline.add_stage(Box::new(TemplateApplicationStage::new(registry.clone())));
        pipeline.add_stage(Box::new(TextSizingStage::new(registry.clone(), sizing)));
        pipeline.add_stage(Box::new(EffectsStage));
        pipeline.add_stage(Box::new(FinalCompositionStage::new(
            registry,
            cache,
            ContentValidator::new(validation),
        )));
        pipeline
    }

    /// Create a pipeline from configuration, measuring with the heuristic backend.
    #[must_use]
    pub fn from_config(registry: TemplateRegistry, config: &EngineConfig) -> Self {
        Self::new(
            registry,
            Arc::new(config.heuristic_sizing_engine()),
            config.validation,
        )
    }

    /// Create a pipeline with no stages.
    #[must_use]
    pub fn bare(registry: TemplateRegistry) -> Self {
        Self {
            stages: Vec::new(),
            registry,
            cache: AnalysisCache::new(),
        }
    }

    /// The shared analysis cache, for building custom stages.
    #[must_use]
    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// The template registry.
    #[must_use]
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Insert a stage by priority. Stages with equal priority keep insertion order.
    pub fn add_stage(&mut self, stage: Box<dyn RenderStage>) {
        let priority = stage.priority();
        let index = self
            .stages
            .iter()
            .position(|s| s.priority() > priority)
            .unwrap_or(self.stages.len());
        tracing::debug!("Adding stage {} at priority {priority}", stage.name());
        self.stages.insert(index, stage);
    }

    /// Replace the stage called `name`. Returns `false` (and adds nothing) if
    /// there is no such stage.
    pub fn replace_stage(&mut self, name: &str, stage: Box<dyn RenderStage>) -> bool {
        if self.remove_stage(name).is_none() {
            return false;
        }
        self.add_stage(stage);
        true
    }

    /// Remove the stage called `name`.
    pub fn remove_stage(&mut self, name: &str) -> Option<Box<dyn RenderStage>> {
        let index = self.stages.iter().position(|s| s.name() == name)?;
        Some(self.stages.remove(index))
    }

    /// Stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Cached analysis for a slide.
    #[must_use]
    pub fn analysis(&self, id: &SlideId) -> Option<SlideAnalysis> {
        self.cache.get(id)
    }

    /// Run every stage in order.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure as [`SlideError::Stage`].
    pub fn run_stages(&self, mut slide: Slide, context: &RenderContext) -> SlideResult<Slide> {
        for stage in &self.stages {
            tracing::trace!("Running stage {} on slide {}", stage.name(), slide.id);
            slide = stage.process(slide, context).map_err(|e| match e {
                SlideError::Stage { .. } => e,
                other => SlideError::stage(stage.name(), other.to_string()),
            })?;
        }
        Ok(slide)
    }

    /// Render a slide.
    ///
    /// Never fails: stage errors and panics produce an error slide carrying
    /// the slide id and message.
    #[must_use]
    pub fn process_slide(&self, slide: Slide, context: &RenderContext) -> ResolvedSlide {
        let id = slide.id.clone();
        let scale = effective_scale(context.scale_factor);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_stages(slide, context)
                .and_then(|slide| self.compose(&slide, context, scale))
        }));
        let result = outcome.unwrap_or_else(|payload| {
            Err(SlideError::stage("pipeline", panic_message(payload.as_ref())))
        });

        match result {
            Ok(resolved) => {
                tracing::debug!("Rendered slide {id} with {} shapes", resolved.shapes.len());
                resolved
            }
            Err(e) => {
                tracing::error!("Failed to render slide {id}: {e}");
                ResolvedSlide::error_slide(id, &e.to_string(), context.viewport.scaled(scale, scale))
            }
        }
    }

    fn compose(
        &self,
        slide: &Slide,
        context: &RenderContext,
        scale: f32,
    ) -> SlideResult<ResolvedSlide> {
        let template = resolve_template(&self.registry, slide)?;
        let background = slide
            .background
            .clone()
            .unwrap_or_else(|| context.theme.background_fill());

        let mut resolved = ResolvedSlide::new(slide.id.clone(), slide.category(), background.clone());
        resolved.shapes.push(Shape::new(
            "background",
            context.viewport.scaled(scale, scale),
            i32::MIN,
            ShapeKind::Rect { fill: background },
        ));

        if let Some(template) = &template {
            for zone in &template.media_zones {
                resolved.shapes.push(Shape::new(
                    format!("media-{}", zone.id),
                    zone.bounds.scaled(scale, scale),
                    -1,
                    ShapeKind::Media {
                        zone_id: zone.id.clone(),
                        media_kind: zone.kind,
                    },
                ));
            }
        }

        for element in slide.elements() {
            let position = element.position();
            let scaled = ElementPosition::from_bounds(
                position.bounds().scaled(scale, scale),
                position.z_index,
            );
            resolved.shapes.push(Shape::at(
                element.id.as_str(),
                &scaled,
                ShapeKind::Text {
                    content: element.content().to_string(),
                    style: ResolvedStyle::from_formatting(&element.formatting, scale),
                },
            ));
        }

        resolved.sort_shapes();
        Ok(resolved)
    }
}

fn effective_scale(scale_factor: f32) -> f32 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "stage panicked".to_string())
}

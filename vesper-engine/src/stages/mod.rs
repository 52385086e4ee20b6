//! Built-in render pipeline stages, in execution order.

mod analysis;
mod composition;
mod effects;
mod sizing;
mod template;

pub use analysis::{content_elements, ContentAnalysisStage};
pub use composition::FinalCompositionStage;
pub use effects::{EffectsStage, MAX_ANIMATION_MS};
pub use sizing::TextSizingStage;
pub use template::TemplateApplicationStage;

use vesper_core::{Slide, SlideError, SlideResult, SlideTemplate};

use crate::defaults::default_template_id;
use crate::TemplateRegistry;

/// Template for a slide: its own template id, or the category default.
///
/// # Errors
///
/// Returns [`SlideError::TemplateNotFound`] when the slide names a template
/// that is not registered. A missing category default is not an error.
pub fn resolve_template(
    registry: &TemplateRegistry,
    slide: &Slide,
) -> SlideResult<Option<SlideTemplate>> {
    match &slide.template_id {
        Some(id) => registry
            .get_template(id)
            .map(Some)
            .ok_or_else(|| SlideError::TemplateNotFound(id.clone())),
        None => Ok(registry.get_template(default_template_id(slide.category()))),
    }
}

//! Stage 2: template application.

use vesper_core::{RenderContext, Slide, SlideResult};
use vesper_layout::ZoneMapper;

use super::resolve_template;
use crate::pipeline::RenderStage;
use crate::TemplateRegistry;

/// Places text elements into the template's zones.
#[derive(Debug, Clone)]
pub struct TemplateApplicationStage {
    registry: TemplateRegistry,
}

impl TemplateApplicationStage {
    /// Stage name.
    pub const NAME: &'static str = "template-application";

    /// Create the stage.
    #[must_use]
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }
}

impl RenderStage for TemplateApplicationStage {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        2
    }

    fn process(&self, mut slide: Slide, _context: &RenderContext) -> SlideResult<Slide> {
        let Some(template) = resolve_template(&self.registry, &slide)? else {
            tracing::warn!("No template for slide {}, positions left unchanged", slide.id);
            return Ok(slide);
        };

        let assigned = ZoneMapper::position_elements(slide.elements_mut(), &template.text_zones);
        tracing::debug!(
            "Slide {}: placed {} elements using template {}",
            slide.id,
            assigned.len(),
            template.id
        );
        Ok(slide)
    }
}

//! Stage 3: text sizing and layout.

use std::sync::Arc;

use vesper_core::{RenderContext, Slide, SlideResult};
use vesper_layout::SizingEngine;

use super::resolve_template;
use crate::pipeline::RenderStage;
use crate::TemplateRegistry;

/// Fits and harmonizes font sizes, then clamps them to the template's bounds.
#[derive(Debug, Clone)]
pub struct TextSizingStage {
    registry: TemplateRegistry,
    sizing: Arc<SizingEngine>,
}

impl TextSizingStage {
    /// Stage name.
    pub const NAME: &'static str = "text-sizing-layout";

    /// Create the stage.
    #[must_use]
    pub fn new(registry: TemplateRegistry, sizing: Arc<SizingEngine>) -> Self {
        Self { registry, sizing }
    }
}

impl RenderStage for TextSizingStage {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        3
    }

    fn process(&self, mut slide: Slide, context: &RenderContext) -> SlideResult<Slide> {
        let Some(template) = resolve_template(&self.registry, &slide)? else {
            return Ok(slide);
        };

        let sizes = self.sizing.adapt_for_multiple_elements(
            slide.elements(),
            &template.text_zones,
            &context.viewport,
        );
        let min = template.constraints.min_font_size;
        let max = template.constraints.max_font_size;

        for element in slide.elements_mut() {
            if let Some(size) = sizes.get(&element.id) {
                element.set_font_size(size.max(min).min(max));
            }
        }
        Ok(slide)
    }
}

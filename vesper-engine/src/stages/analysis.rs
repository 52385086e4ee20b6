//! Stage 1: content analysis.

use vesper_core::{
    ElementId, RenderContext, RichTextContent, Slide, SlideContent, SlideId, SlideResult,
    TextElement, TextElementType, TextFormatting, Theme,
};

use super::resolve_template;
use crate::cache::{AnalysisCache, SlideAnalysis};
use crate::pipeline::RenderStage;
use crate::style::themed_formatting;
use crate::TemplateRegistry;

/// Converts slide content into text elements and records a complexity estimate.
#[derive(Debug, Clone)]
pub struct ContentAnalysisStage {
    registry: TemplateRegistry,
    cache: AnalysisCache,
}

impl ContentAnalysisStage {
    /// Stage name.
    pub const NAME: &'static str = "content-analysis";

    /// Create the stage.
    #[must_use]
    pub fn new(registry: TemplateRegistry, cache: AnalysisCache) -> Self {
        Self { registry, cache }
    }
}

impl RenderStage for ContentAnalysisStage {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        1
    }

    fn process(&self, mut slide: Slide, context: &RenderContext) -> SlideResult<Slide> {
        if slide.rich_text.is_none() {
            let base = resolve_template(&self.registry, &slide)?
                .map(|t| t.default_formatting)
                .unwrap_or_default();
            let elements = content_elements(&slide.id, &slide.content, &base, &context.theme);
            slide.rich_text = Some(RichTextContent::new(elements));
        }

        let (count, chars) = slide
            .rich_text
            .as_ref()
            .map_or((0, 0), |rich| (rich.elements.len(), rich.char_count()));
        let analysis = SlideAnalysis::new(count, chars);
        tracing::debug!(
            "Slide {}: {count} elements, {chars} chars, {:?} complexity",
            slide.id,
            analysis.complexity
        );
        self.cache.begin(&slide.id, analysis);
        Ok(slide)
    }
}

/// Text elements for a content union: the title as a heading, then the body
/// blocks. Ids are `{slide_id}-{index}`.
#[must_use]
pub fn content_elements(
    slide_id: &SlideId,
    content: &SlideContent,
    base: &TextFormatting,
    theme: &Theme,
) -> Vec<TextElement> {
    let title = content
        .title()
        .filter(|t| !t.trim().is_empty())
        .map(|t| (TextElementType::Heading, t));

    title
        .into_iter()
        .chain(content.body_blocks())
        .enumerate()
        .map(|(index, (element_type, text))| {
            TextElement::new(
                ElementId::new(format!("{slide_id}-{index}")),
                element_type,
                text,
            )
            .with_formatting(themed_formatting(base, theme, element_type))
        })
        .collect()
}

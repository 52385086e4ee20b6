//! Stage 4: effects and animations.

use vesper_core::{Animation, AnimationKind, RenderContext, Slide, SlideResult, TextElementType};

use crate::pipeline::RenderStage;

/// Longest allowed animation duration or delay.
pub const MAX_ANIMATION_MS: u32 = 5000;

const HEADING_FADE_MS: u32 = 400;
const LYRIC_SLIDE_MS: u32 = 500;
const LYRIC_STAGGER_MS: u32 = 150;
const EMPHASIS_PULSE_MS: u32 = 1000;

/// Fills in default entrance and emphasis animations. Skipped for previews.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectsStage;

impl EffectsStage {
    /// Stage name.
    pub const NAME: &'static str = "effects-animations";
}

fn clamp(mut animation: Animation) -> Animation {
    animation.duration_ms = animation.duration_ms.min(MAX_ANIMATION_MS);
    animation.delay_ms = animation.delay_ms.min(MAX_ANIMATION_MS);
    animation
}

impl RenderStage for EffectsStage {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        4
    }

    fn process(&self, mut slide: Slide, context: &RenderContext) -> SlideResult<Slide> {
        if context.is_preview {
            return Ok(slide);
        }

        let mut lyric_index = 0_u32;
        for element in slide.elements_mut() {
            let element_type = element.element_type;
            let effects = &mut element.formatting.effects;

            if effects.entrance.is_none() {
                effects.entrance = match element_type {
                    TextElementType::Heading => {
                        Some(Animation::new(AnimationKind::FadeIn, HEADING_FADE_MS))
                    }
                    t if t.is_lyric() => Some(
                        Animation::new(AnimationKind::SlideUp, LYRIC_SLIDE_MS)
                            .with_delay(lyric_index.saturating_mul(LYRIC_STAGGER_MS)),
                    ),
                    _ => None,
                };
            }
            if element_type.is_lyric() {
                lyric_index += 1;
            }
            if element_type == TextElementType::Emphasis && effects.emphasis.is_none() {
                effects.emphasis = Some(Animation::new(AnimationKind::Pulse, EMPHASIS_PULSE_MS));
            }

            effects.entrance = effects.entrance.take().map(clamp);
            effects.emphasis = effects.emphasis.take().map(clamp);
        }
        Ok(slide)
    }
}

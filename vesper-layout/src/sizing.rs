//! Adaptive text sizing.
//!
//! For one element, a bounded integer binary search finds the largest font
//! size whose wrapped text fits the zone. For a set of elements, sizes are
//! then harmonized per element type so sibling blocks match.
//!
//! ```text
//!   min ─────────── mid ─────────── max
//!                    │
//!          fits? ────┴──── yes: best = mid, search [mid+1, max]
//!                          no:  search [min, mid-1]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vesper_core::{
    ElementId, OverflowBehavior, Rectangle, ResizeStrategy, TextElement, TextElementType,
    TextZone,
};

use crate::wrap::wrap_lines;
use crate::{HeuristicMeasurer, TextMeasurement, TextMeasurer, ZoneMapper};

/// Sizing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// Maximum probes per binary search.
    pub max_iterations: u32,
    /// Minimum font size when neither element nor zone sets one.
    pub default_min_size: f32,
    /// Maximum font size when neither element nor zone sets one.
    pub default_max_size: f32,
    /// Readability floor for harmonized non-heading groups.
    pub harmonize_floor: f32,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            default_min_size: 12.0,
            default_max_size: 120.0,
            harmonize_floor: 14.0,
        }
    }
}

/// Outcome of one font size search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeSearch {
    /// Chosen font size.
    pub font_size: f32,
    /// Number of sizes measured during the search.
    pub probes: u32,
    /// Measurement at the chosen size; `None` when auto-resize is off.
    pub measurement: Option<TextMeasurement>,
}

/// Finds font sizes that fit text into zones.
///
/// Owns its [`TextMeasurer`]; the measurer is never exposed.
pub struct SizingEngine {
    measurer: Box<dyn TextMeasurer>,
    config: SizingConfig,
}

impl std::fmt::Debug for SizingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SizingEngine")
            .field("measurer", &self.measurer.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for SizingEngine {
    fn default() -> Self {
        Self::new(Box::new(HeuristicMeasurer::default()), SizingConfig::default())
    }
}

impl SizingEngine {
    /// Create an engine with the given measurement backend.
    #[must_use]
    pub fn new(measurer: Box<dyn TextMeasurer>, config: SizingConfig) -> Self {
        tracing::debug!("Sizing engine using {} measurer", measurer.name());
        Self { measurer, config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SizingConfig {
        &self.config
    }

    /// Name of the measurement backend.
    #[must_use]
    pub fn measurer_name(&self) -> &str {
        self.measurer.name()
    }

    /// Font size bounds for an element in a zone.
    ///
    /// Element constraints win over zone settings, which win over the
    /// configured defaults.
    #[must_use]
    pub fn size_bounds(&self, element: &TextElement, zone: &TextZone) -> (f32, f32) {
        let constraints = element.constraints.as_ref();
        let min = constraints
            .and_then(|c| c.min_font_size)
            .or(zone.auto_resize.min_size)
            .unwrap_or(self.config.default_min_size);
        let max = constraints
            .and_then(|c| c.max_font_size)
            .or(zone.auto_resize.max_size)
            .unwrap_or(self.config.default_max_size);
        (min, max)
    }

    /// Measure an element's wrapped text in a zone at one font size.
    #[must_use]
    pub fn measure_text(
        &self,
        element: &TextElement,
        zone: &TextZone,
        font_size: f32,
    ) -> TextMeasurement {
        self.measure_in(element, &zone.bounds, zone.content_rules.max_lines, font_size)
            .0
    }

    fn measure_in(
        &self,
        element: &TextElement,
        bounds: &Rectangle,
        max_lines: Option<usize>,
        font_size: f32,
    ) -> (TextMeasurement, bool) {
        let formatting = element.formatting.with_font_size(font_size);
        let spacing = &formatting.spacing;
        let lines = wrap_lines(
            self.measurer.as_ref(),
            element.content(),
            &formatting.font,
            spacing,
            bounds.width,
        );

        let line_height = self.measurer.line_height(&formatting.font, spacing.line);
        let paragraph_breaks = lines
            .iter()
            .filter(|l| l.paragraph_start)
            .count()
            .saturating_sub(1);
        #[allow(clippy::cast_precision_loss)] // Line counts are tiny
        let height =
            lines.len() as f32 * line_height + paragraph_breaks as f32 * spacing.paragraph;
        let width = lines.iter().map(|l| l.width).fold(0.0_f32, f32::max);

        let fits = width <= bounds.width
            && height <= bounds.height
            && max_lines.map_or(true, |max| lines.len() <= max);

        let measurement = TextMeasurement {
            width,
            height,
            line_count: lines.len(),
            font_size,
            overflow: self.measurer.is_exact() && !fits,
        };
        (measurement, fits)
    }

    /// The region text may occupy: the zone clipped to a non-empty viewport.
    fn effective_bounds(zone: &TextZone, viewport: &Rectangle) -> Rectangle {
        if viewport.is_empty() {
            return zone.bounds;
        }
        zone.bounds
            .intersection(viewport)
            .unwrap_or_else(|| Rectangle::new(zone.bounds.x, zone.bounds.y, 0.0, 0.0))
    }

    /// Binary-search the largest font size at which `element` fits `zone`.
    ///
    /// Returns the element's current size untouched when the zone (or the
    /// element's constraints) disable auto-resize. Otherwise the result lies in
    /// `[min, max]` and at most `max_iterations` sizes are probed; when nothing
    /// fits, the minimum is returned.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )] // Font sizes are small positive numbers
    pub fn search_optimal_size(
        &self,
        element: &TextElement,
        zone: &TextZone,
        viewport: &Rectangle,
        max_iterations: Option<u32>,
    ) -> SizeSearch {
        let opted_out = element.constraints.as_ref().is_some_and(|c| !c.auto_resize);
        if !zone.auto_resize.enabled || opted_out {
            return SizeSearch {
                font_size: element.font_size(),
                probes: 0,
                measurement: None,
            };
        }

        let (min_size, mut max_size) = self.size_bounds(element, zone);
        if zone.auto_resize.strategy == ResizeStrategy::ShrinkOnly {
            max_size = max_size.min(element.font_size()).max(min_size);
        }
        let bounds = Self::effective_bounds(zone, viewport);
        let max_lines = zone.content_rules.max_lines;

        if min_size > max_size {
            tracing::warn!(
                "Element {} has inverted size bounds [{min_size}, {max_size}], using minimum",
                element.id
            );
            return SizeSearch {
                font_size: min_size,
                probes: 0,
                measurement: Some(self.measure_in(element, &bounds, max_lines, min_size).0),
            };
        }

        let iterations = max_iterations.unwrap_or(self.config.max_iterations);
        let mut low = min_size.max(0.0).ceil() as u32;
        let mut high = max_size.max(0.0).floor() as u32;
        let mut best: Option<TextMeasurement> = None;
        let mut probes = 0;

        while low <= high && probes < iterations {
            let mid = low + (high - low) / 2;
            probes += 1;
            let (measurement, fits) = self.measure_in(element, &bounds, max_lines, mid as f32);
            tracing::trace!(
                "Probe {probes} for {}: size {mid} -> {}x{} ({} lines) fits={fits}",
                element.id,
                measurement.width,
                measurement.height,
                measurement.line_count
            );
            if fits {
                best = Some(measurement);
                low = mid + 1;
            } else if mid == 0 {
                break;
            } else {
                high = mid - 1;
            }
        }

        let measurement = best.unwrap_or_else(|| {
            self.measure_in(element, &bounds, max_lines, min_size).0
        });
        tracing::debug!(
            "Element {} in zone {}: size {} after {probes} probes",
            element.id,
            zone.id,
            measurement.font_size
        );

        SizeSearch {
            font_size: measurement.font_size,
            probes,
            measurement: Some(measurement),
        }
    }

    /// Largest font size at which `element` fits `zone`.
    ///
    /// `max_iterations` defaults to the configured cap (10).
    #[must_use]
    pub fn calculate_optimal_size(
        &self,
        element: &TextElement,
        zone: &TextZone,
        viewport: &Rectangle,
        max_iterations: Option<u32>,
    ) -> f32 {
        self.search_optimal_size(element, zone, viewport, max_iterations)
            .font_size
    }

    /// Size a set of elements against template zones.
    ///
    /// Each element is first sized independently in its mapped zone, then
    /// sizes are harmonized per element type (see [`SizingEngine::harmonize`]).
    /// Elements with no zone keep their current size.
    #[must_use]
    pub fn adapt_for_multiple_elements(
        &self,
        elements: &[TextElement],
        zones: &[TextZone],
        viewport: &Rectangle,
    ) -> BTreeMap<ElementId, f32> {
        let assignment = ZoneMapper::map_elements_to_zones(elements, zones);

        let mut sizes: BTreeMap<ElementId, f32> = elements
            .iter()
            .map(|element| {
                let size = assignment.get(&element.id).map_or(element.font_size(), |zone| {
                    self.calculate_optimal_size(element, zone, viewport, None)
                });
                (element.id.clone(), size)
            })
            .collect();

        self.harmonize(elements, &mut sizes);
        sizes
    }

    /// Unify sizes within each element-type group.
    ///
    /// Headings take the group maximum; every other type takes the group
    /// median, floored at the configured readability minimum.
    pub fn harmonize(&self, elements: &[TextElement], sizes: &mut BTreeMap<ElementId, f32>) {
        let mut groups: BTreeMap<TextElementType, Vec<&ElementId>> = BTreeMap::new();
        for element in elements {
            if sizes.contains_key(&element.id) {
                groups.entry(element.element_type).or_default().push(&element.id);
            }
        }

        for (element_type, ids) in groups {
            let mut group: Vec<f32> = ids.iter().filter_map(|id| sizes.get(*id).copied()).collect();
            if group.is_empty() {
                continue;
            }
            let harmonized = if element_type == TextElementType::Heading {
                group.iter().copied().fold(f32::MIN, f32::max)
            } else {
                median(&mut group).max(self.config.harmonize_floor)
            };
            tracing::debug!(
                "Harmonized {} {element_type} elements to {harmonized}",
                ids.len()
            );
            for id in ids {
                sizes.insert(id.clone(), harmonized);
            }
        }
    }

    /// Apply the zone's overflow behavior to an element.
    ///
    /// `scale-down` recomputes the font size; `wrap`, `clip` and `scroll` are
    /// left to the drawing surface and return the element unchanged.
    #[must_use]
    pub fn handle_overflow(
        &self,
        element: &TextElement,
        zone: &TextZone,
        viewport: &Rectangle,
    ) -> TextElement {
        let mut handled = element.clone();
        match zone.overflow.behavior {
            OverflowBehavior::ScaleDown => {
                let size = self.calculate_optimal_size(element, zone, viewport, None);
                handled.formatting = element.formatting.with_font_size(size);
            }
            OverflowBehavior::Wrap | OverflowBehavior::Clip | OverflowBehavior::Scroll => {}
        }
        handled
    }
}

/// Median of a non-empty slice; the mean of the middle pair for even lengths.
fn median(values: &mut [f32]) -> f32 {
    values.sort_by(f32::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::{AutoResize, SizeConstraints};

    fn viewport() -> Rectangle {
        Rectangle::from_size(1920.0, 1080.0)
    }

    fn body_zone() -> TextZone {
        TextZone::new(
            "body",
            Rectangle::new(100.0, 240.0, 1720.0, 600.0),
            &[TextElementType::Verse, TextElementType::Text],
        )
        .with_auto_resize(AutoResize::between(16.0, 80.0))
    }

    fn verse(id: &str, text: &str) -> TextElement {
        TextElement::new(id, TextElementType::Verse, text)
    }

    #[test]
    fn test_short_text_gets_max_size() {
        let engine = SizingEngine::default();
        let search = engine.search_optimal_size(&verse("v", "John 3:16"), &body_zone(), &viewport(), None);
        assert!((search.font_size - 80.0).abs() < f32::EPSILON);
        assert!(search.probes <= 10);
    }

    #[test]
    fn test_long_text_shrinks() {
        let engine = SizingEngine::default();
        let text = "word ".repeat(100);
        let element = verse("v", text.trim());
        let zone = body_zone();
        let size = engine.calculate_optimal_size(&element, &zone, &viewport(), None);
        assert!(size < 80.0);
        assert!(size >= 16.0);
        assert!(!engine.measure_text(&element, &zone, size).overflow);
    }

    #[test]
    fn test_disabled_zone_keeps_size() {
        let engine = SizingEngine::default();
        let mut element = verse("v", &"long ".repeat(300));
        element.set_font_size(37.0);
        let zone = body_zone().with_auto_resize(AutoResize::disabled());
        let search = engine.search_optimal_size(&element, &zone, &viewport(), None);
        assert!((search.font_size - 37.0).abs() < f32::EPSILON);
        assert_eq!(search.probes, 0);
    }

    #[test]
    fn test_element_constraints_override_zone() {
        let engine = SizingEngine::default();
        let element = verse("v", "Short").with_constraints(SizeConstraints::between(20.0, 40.0));
        let (min, max) = engine.size_bounds(&element, &body_zone());
        assert!((min - 20.0).abs() < f32::EPSILON);
        assert!((max - 40.0).abs() < f32::EPSILON);
        let size = engine.calculate_optimal_size(&element, &body_zone(), &viewport(), None);
        assert!((size - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_default_bounds() {
        let engine = SizingEngine::default();
        let zone = TextZone::new("z", Rectangle::from_size(100.0, 100.0), &[TextElementType::Text]);
        let (min, max) = engine.size_bounds(&verse("v", "x"), &zone);
        assert!((min - 12.0).abs() < f32::EPSILON);
        assert!((max - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_nothing_fits_returns_min() {
        let engine = SizingEngine::default();
        let zone = TextZone::new(
            "tiny",
            Rectangle::new(0.0, 0.0, 10.0, 10.0),
            &[TextElementType::Verse],
        )
        .with_auto_resize(AutoResize::between(16.0, 80.0));
        let size = engine.calculate_optimal_size(&verse("v", "Unfittable"), &zone, &viewport(), None);
        assert!((size - 16.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_max_lines_limits_size() {
        let engine = SizingEngine::default();
        let text = "line one\nline two\nline three";
        let free = engine.calculate_optimal_size(&verse("v", text), &body_zone(), &viewport(), None);
        let capped = engine.calculate_optimal_size(
            &verse("v", text),
            &body_zone().with_max_lines(2),
            &viewport(),
            None,
        );
        assert!(free > capped);
        assert!((capped - 16.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_iteration_cap_is_respected() {
        let engine = SizingEngine::default();
        let search = engine.search_optimal_size(&verse("v", "Hi"), &body_zone(), &viewport(), Some(2));
        assert!(search.probes <= 2);
        assert!(search.font_size >= 16.0 && search.font_size <= 80.0);
    }

    #[test]
    fn test_shrink_only_caps_at_current_size() {
        let engine = SizingEngine::default();
        let mut element = verse("v", "Short");
        element.set_font_size(30.0);
        let mut zone = body_zone();
        zone.auto_resize.strategy = ResizeStrategy::ShrinkOnly;
        let size = engine.calculate_optimal_size(&element, &zone, &viewport(), None);
        assert!((size - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_viewport_clips_zone() {
        let engine = SizingEngine::default();
        let text = "word ".repeat(40);
        let element = verse("v", text.trim());
        let full = engine.calculate_optimal_size(&element, &body_zone(), &viewport(), None);
        let clipped = engine.calculate_optimal_size(
            &element,
            &body_zone(),
            &Rectangle::from_size(960.0, 540.0),
            None,
        );
        assert!(clipped < full);
    }

    #[test]
    fn test_harmonize_headings_take_max() {
        let engine = SizingEngine::default();
        let elements = vec![
            TextElement::new("h1", TextElementType::Heading, "A"),
            TextElement::new("h2", TextElementType::Heading, "B"),
        ];
        let mut sizes: BTreeMap<ElementId, f32> = BTreeMap::from([("h1".into(), 40.0), ("h2".into(), 64.0)]);
        engine.harmonize(&elements, &mut sizes);
        assert!((sizes[&ElementId::from("h1")] - 64.0).abs() < f32::EPSILON);
        assert!((sizes[&ElementId::from("h2")] - 64.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_harmonize_verses_take_median() {
        let engine = SizingEngine::default();
        let elements = vec![verse("a", "x"), verse("b", "y"), verse("c", "z")];
        let mut sizes: BTreeMap<ElementId, f32> = BTreeMap::from([
            ("a".into(), 20.0),
            ("b".into(), 24.0),
            ("c".into(), 28.0),
        ]);
        engine.harmonize(&elements, &mut sizes);
        for id in ["a", "b", "c"] {
            assert!((sizes[&ElementId::from(id)] - 24.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_harmonize_floor() {
        let engine = SizingEngine::default();
        let elements = vec![verse("a", "x"), verse("b", "y")];
        let mut sizes: BTreeMap<ElementId, f32> = BTreeMap::from([("a".into(), 10.0), ("b".into(), 12.0)]);
        engine.harmonize(&elements, &mut sizes);
        assert!((sizes[&ElementId::from("a")] - 14.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_even_median_is_mean_of_middle() {
        let mut values = vec![30.0, 20.0, 24.0, 28.0];
        assert!((median(&mut values) - 26.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_adapt_multiple_elements() {
        let engine = SizingEngine::default();
        let zones = vec![
            TextZone::new(
                "title",
                Rectangle::new(100.0, 60.0, 1720.0, 140.0),
                &[TextElementType::Heading],
            )
            .with_auto_resize(AutoResize::between(24.0, 96.0)),
            body_zone(),
        ];
        let elements = vec![
            TextElement::new("t", TextElementType::Heading, "Amazing Grace"),
            verse("v1", "Amazing grace how sweet the sound"),
            verse("v2", &"that saved a wretch like me ".repeat(8)),
        ];
        let sizes = engine.adapt_for_multiple_elements(&elements, &zones, &viewport());
        assert_eq!(sizes.len(), 3);
        assert!((sizes[&ElementId::from("v1")] - sizes[&ElementId::from("v2")]).abs() < f32::EPSILON);
        assert!(sizes[&ElementId::from("t")] <= 96.0);
    }

    #[test]
    fn test_sizes_against_placed_zone() {
        let engine = SizingEngine::default();
        let zones = vec![
            TextZone::new("a", Rectangle::new(0.0, 0.0, 1000.0, 100.0), &[TextElementType::Text])
                .with_auto_resize(AutoResize::between(16.0, 120.0)),
            TextZone::new("b", Rectangle::new(0.0, 100.0, 1000.0, 900.0), &[TextElementType::Text])
                .with_auto_resize(AutoResize::between(16.0, 120.0)),
        ];
        let mut elements = vec![
            TextElement::new("e0", TextElementType::Text, "one"),
            TextElement::new("e1", TextElementType::Text, "two"),
            TextElement::new("e2", TextElementType::Text, "three"),
        ];
        ZoneMapper::position_elements(&mut elements, &zones);

        let sizes = engine.adapt_for_multiple_elements(&elements, &zones, &viewport());
        for element in &elements {
            let size = sizes[&element.id];
            // One line must fit zone a's 100px height.
            assert!(size * 1.2 <= 100.0, "{} sized {size}", element.id);
        }
    }

    #[test]
    fn test_handle_overflow_scale_down() {
        let engine = SizingEngine::default();
        let mut element = verse("v", &"overflowing text ".repeat(30));
        element.set_font_size(80.0);
        let zone = body_zone().with_overflow(OverflowBehavior::ScaleDown);
        let handled = engine.handle_overflow(&element, &zone, &viewport());
        assert!(handled.font_size() < 80.0);
        assert_eq!(handled.content(), element.content());
    }

    #[test]
    fn test_handle_overflow_wrap_unchanged() {
        let engine = SizingEngine::default();
        let element = verse("v", &"overflowing text ".repeat(30));
        let handled = engine.handle_overflow(&element, &body_zone(), &viewport());
        assert_eq!(handled, element);
    }
}

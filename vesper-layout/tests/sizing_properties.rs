//! Property tests for the font size search and harmonization.

use std::collections::BTreeMap;

use proptest::prelude::*;
use vesper_core::{AutoResize, Rectangle, TextElement, TextElementType, TextZone};
use vesper_layout::{SizingEngine, ZoneMapper};

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,12}", 1..80).prop_map(|words| words.join(" "))
}

fn arb_zone() -> impl Strategy<Value = TextZone> {
    (50.0f32..1900.0, 20.0f32..1000.0, 8u32..60, 0u32..100).prop_map(
        |(width, height, min, span)| {
            #[allow(clippy::cast_precision_loss)]
            let (min, max) = (min as f32, (min + span) as f32);
            TextZone::new(
                "zone",
                Rectangle::new(0.0, 0.0, width, height),
                &TextElementType::ALL,
            )
            .with_auto_resize(AutoResize::between(min, max))
        },
    )
}

fn viewport() -> Rectangle {
    Rectangle::from_size(1920.0, 1080.0)
}

fn fits(engine: &SizingEngine, element: &TextElement, zone: &TextZone, size: f32) -> bool {
    let m = engine.measure_text(element, zone, size);
    m.width <= zone.bounds.width && m.height <= zone.bounds.height
}

proptest! {
    #[test]
    fn prop_search_terminates_within_bounds(
        text in arb_text(),
        zone in arb_zone(),
        iterations in 1u32..16,
    ) {
        let engine = SizingEngine::default();
        let element = TextElement::new("e", TextElementType::Verse, text);
        let search = engine.search_optimal_size(&element, &zone, &viewport(), Some(iterations));
        let (min, max) = engine.size_bounds(&element, &zone);

        prop_assert!(search.probes <= iterations, "{} probes > {}", search.probes, iterations);
        prop_assert!(search.font_size >= min && search.font_size <= max,
            "size {} outside [{}, {}]", search.font_size, min, max);
    }

    #[test]
    fn prop_fit_is_monotonic(
        text in arb_text(),
        zone in arb_zone(),
        smaller in 8u32..80,
        delta in 1u32..60,
    ) {
        let engine = SizingEngine::default();
        let element = TextElement::new("e", TextElementType::Text, text);
        #[allow(clippy::cast_precision_loss)]
        let (small, large) = (smaller as f32, (smaller + delta) as f32);
        if fits(&engine, &element, &zone, large) {
            prop_assert!(fits(&engine, &element, &zone, small),
                "fits at {} but not at {}", large, small);
        }
    }

    #[test]
    fn prop_found_size_fits_unless_minimum(
        text in arb_text(),
        zone in arb_zone(),
    ) {
        let engine = SizingEngine::default();
        let element = TextElement::new("e", TextElementType::Verse, text);
        let size = engine.calculate_optimal_size(&element, &zone, &viewport(), Some(32));
        let (min, _) = engine.size_bounds(&element, &zone);
        prop_assert!((size - min).abs() < f32::EPSILON || fits(&engine, &element, &zone, size));
    }

    #[test]
    fn prop_harmonized_groups_are_uniform(
        sizes in prop::collection::vec(8.0f32..120.0, 1..8),
        heading in any::<bool>(),
    ) {
        let engine = SizingEngine::default();
        let element_type = if heading { TextElementType::Heading } else { TextElementType::Verse };
        let elements: Vec<TextElement> = (0..sizes.len())
            .map(|i| TextElement::new(format!("e{i}"), element_type, "text"))
            .collect();
        let mut map: BTreeMap<_, _> = elements
            .iter()
            .zip(&sizes)
            .map(|(e, s)| (e.id.clone(), *s))
            .collect();

        engine.harmonize(&elements, &mut map);

        let first = map[&elements[0].id];
        prop_assert!(map.values().all(|s| (s - first).abs() < f32::EPSILON));
        if heading {
            let max = sizes.iter().copied().fold(f32::MIN, f32::max);
            prop_assert!((first - max).abs() < f32::EPSILON);
        } else {
            prop_assert!(first >= 14.0);
        }
    }

    #[test]
    fn prop_every_element_mapped_when_zones_exist(
        types in prop::collection::vec(0usize..TextElementType::ALL.len(), 0..10),
    ) {
        let zones = vec![
            TextZone::new("title", Rectangle::new(0.0, 0.0, 1920.0, 200.0), &[TextElementType::Heading]),
            TextZone::new("body", Rectangle::new(0.0, 200.0, 1920.0, 800.0), &[TextElementType::Verse]),
        ];
        let elements: Vec<TextElement> = types
            .iter()
            .enumerate()
            .map(|(i, t)| TextElement::new(format!("e{i}"), TextElementType::ALL[*t], "x"))
            .collect();
        let mapped = ZoneMapper::map_elements_to_zones(&elements, &zones);
        prop_assert_eq!(mapped.len(), elements.len());
    }
}

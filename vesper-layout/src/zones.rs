//! Element-to-zone assignment.

use std::collections::BTreeMap;

use vesper_core::{ElementId, ElementPosition, Rectangle, TextElement, TextZone};

/// Vertical offset between elements stacked in one zone.
pub const STACK_OFFSET: f32 = 50.0;

/// Assigns text elements to template zones.
///
/// Selection is order-dependent: templates list zones by priority and the
/// first compatible zone wins. Once an element has been placed, its recorded
/// zone wins over any fresh selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneMapper;

impl ZoneMapper {
    /// Select the zone for one element.
    ///
    /// An element already placed in a zone that is still present keeps it.
    /// Otherwise, among zones accepting the element's type, one that fully contains the
    /// element's current (non-empty) bounds is preferred. Otherwise the first
    /// accepting zone is used, then `zones[0]`. Returns `None` only when
    /// `zones` is empty.
    #[must_use]
    pub fn select_zone<'z>(element: &TextElement, zones: &'z [TextZone]) -> Option<&'z TextZone> {
        if let Some(placed) = element
            .zone_id()
            .and_then(|id| zones.iter().find(|z| z.id == id))
        {
            return Some(placed);
        }

        let bounds = element.position().bounds();
        let element_type = element.element_type;
        let compatible = move || zones.iter().filter(move |z| z.accepts(element_type));

        let contained = if bounds.is_empty() {
            None
        } else {
            compatible().find(|z| z.bounds.contains_rect(&bounds))
        };

        contained.or_else(|| compatible().next()).or_else(|| {
            let fallback = zones.first();
            if let Some(zone) = fallback {
                tracing::debug!(
                    "No zone accepts {} element {}, falling back to {}",
                    element.element_type,
                    element.id,
                    zone.id
                );
            }
            fallback
        })
    }

    /// Map every element to its zone. Elements are omitted when there are no zones.
    #[must_use]
    pub fn map_elements_to_zones<'z>(
        elements: &[TextElement],
        zones: &'z [TextZone],
    ) -> BTreeMap<ElementId, &'z TextZone> {
        elements
            .iter()
            .filter_map(|element| {
                Self::select_zone(element, zones).map(|zone| (element.id.clone(), zone))
            })
            .collect()
    }

    /// Assign zones and rewrite element positions, recording each element's
    /// zone so later sizing measures against the same region.
    ///
    /// Elements sharing a zone are stacked: each starts [`STACK_OFFSET`] below
    /// the previous one and, when more than one shares the zone, gets an equal
    /// share of its height. Returns the chosen zone id per element.
    pub fn position_elements(
        elements: &mut [TextElement],
        zones: &[TextZone],
    ) -> BTreeMap<ElementId, String> {
        let assignment: Vec<Option<usize>> = elements
            .iter()
            .map(|element| {
                Self::select_zone(element, zones)
                    .and_then(|zone| zones.iter().position(|z| std::ptr::eq(z, zone)))
            })
            .collect();

        let mut occupancy = vec![0_usize; zones.len()];
        for index in assignment.iter().flatten() {
            occupancy[*index] += 1;
        }

        let mut placed = vec![0_usize; zones.len()];
        let mut zone_ids = BTreeMap::new();

        for (order, (element, zone_index)) in elements.iter_mut().zip(assignment).enumerate() {
            let Some(zone_index) = zone_index else {
                continue;
            };
            let zone = &zones[zone_index];
            let sharing = occupancy[zone_index];
            let slot = placed[zone_index];
            placed[zone_index] += 1;

            #[allow(clippy::cast_precision_loss)] // Element counts are tiny
            let (offset, height) = (
                slot as f32 * STACK_OFFSET,
                if sharing > 1 {
                    zone.bounds.height / sharing as f32
                } else {
                    zone.bounds.height
                },
            );
            let bounds = Rectangle::new(
                zone.bounds.x,
                zone.bounds.y + offset,
                zone.bounds.width,
                height,
            );
            let z_index = i32::try_from(order).unwrap_or(i32::MAX);
            element.place(zone.id.clone(), ElementPosition::from_bounds(bounds, z_index));
            zone_ids.insert(element.id.clone(), zone.id.clone());
        }

        zone_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::TextElementType;

    fn zones() -> Vec<TextZone> {
        vec![
            TextZone::new(
                "title",
                Rectangle::new(100.0, 60.0, 1720.0, 140.0),
                &[TextElementType::Heading],
            ),
            TextZone::new(
                "body",
                Rectangle::new(100.0, 240.0, 1720.0, 600.0),
                &[TextElementType::Verse, TextElementType::Text],
            ),
            TextZone::new(
                "footer",
                Rectangle::new(100.0, 900.0, 1720.0, 100.0),
                &[TextElementType::Text, TextElementType::Emphasis],
            ),
        ]
    }

    #[test]
    fn test_first_compatible_zone() {
        let zones = zones();
        let text = TextElement::new("t", TextElementType::Text, "body");
        assert_eq!(ZoneMapper::select_zone(&text, &zones).map(|z| z.id.as_str()), Some("body"));
        let heading = TextElement::new("h", TextElementType::Heading, "Title");
        assert_eq!(
            ZoneMapper::select_zone(&heading, &zones).map(|z| z.id.as_str()),
            Some("title")
        );
    }

    #[test]
    fn test_fallback_to_first_zone() {
        let zones = zones();
        let chorus = TextElement::new("c", TextElementType::Chorus, "la la");
        assert_eq!(ZoneMapper::select_zone(&chorus, &zones).map(|z| z.id.as_str()), Some("title"));
    }

    #[test]
    fn test_no_zones() {
        let element = TextElement::new("t", TextElementType::Text, "x");
        assert!(ZoneMapper::select_zone(&element, &[]).is_none());
        assert!(ZoneMapper::map_elements_to_zones(&[element], &[]).is_empty());
    }

    #[test]
    fn test_containment_preferred() {
        let zones = zones();
        let element = TextElement::new("t", TextElementType::Text, "small print").with_position(
            ElementPosition::from_bounds(Rectangle::new(200.0, 920.0, 400.0, 40.0), 0),
        );
        assert_eq!(
            ZoneMapper::select_zone(&element, &zones).map(|z| z.id.as_str()),
            Some("footer")
        );
    }

    #[test]
    fn test_stacking_in_shared_zone() {
        let zones = zones();
        let mut elements = vec![
            TextElement::new("h", TextElementType::Heading, "Title"),
            TextElement::new("a", TextElementType::Verse, "one"),
            TextElement::new("b", TextElementType::Verse, "two"),
        ];
        let assigned = ZoneMapper::position_elements(&mut elements, &zones);
        assert_eq!(assigned[&ElementId::from("a")], "body");

        let title = elements[0].position();
        assert!((title.y - 60.0).abs() < f32::EPSILON);
        assert!((title.height - 140.0).abs() < f32::EPSILON);

        let first = elements[1].position();
        let second = elements[2].position();
        assert!((first.y - 240.0).abs() < f32::EPSILON);
        assert!((second.y - 290.0).abs() < f32::EPSILON);
        assert!((first.height - 300.0).abs() < f32::EPSILON);
        assert!((second.width - 1720.0).abs() < f32::EPSILON);
        assert_eq!(second.z_index, 2);
    }

    #[test]
    fn test_placed_zone_survives_remapping() {
        let zones = vec![
            TextZone::new("a", Rectangle::new(0.0, 0.0, 1000.0, 100.0), &[TextElementType::Text]),
            TextZone::new("b", Rectangle::new(0.0, 100.0, 1000.0, 900.0), &[TextElementType::Text]),
        ];
        let mut elements = vec![
            TextElement::new("e0", TextElementType::Text, "one"),
            TextElement::new("e1", TextElementType::Text, "two"),
            TextElement::new("e2", TextElementType::Text, "three"),
        ];
        let placed = ZoneMapper::position_elements(&mut elements, &zones);

        // e2 is stacked at y = 100, which lies inside zone b.
        assert!(zones[1].bounds.contains_rect(&elements[2].position().bounds()));

        let remapped = ZoneMapper::map_elements_to_zones(&elements, &zones);
        for element in &elements {
            assert_eq!(placed[&element.id], "a");
            assert_eq!(remapped[&element.id].id, "a", "element {}", element.id);
        }
    }

    #[test]
    fn test_stale_zone_falls_back_to_selection() {
        let zones = zones();
        let mut element = TextElement::new("t", TextElementType::Text, "body");
        element.place("removed", ElementPosition::default());
        assert_eq!(ZoneMapper::select_zone(&element, &zones).map(|z| z.id.as_str()), Some("body"));
    }
}

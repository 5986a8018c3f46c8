// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement of newly created elements
//!
//! Elements are placed along a single axis (the wall span, or the hall
//! length for roof elements). The planner tries a fixed candidate list,
//! then a slot next to the most recent element, then a random offset.
//! Only the first step guarantees no overlap.

use crate::attachment::{clamp_centered, facade_bounds};
use crate::outline::wall_clear_height;
use crate::roof::{derive_roof_geometry, RoofGeometry};
use hall_envelope_core::{
    ElementId, EnvelopeSettings, FacadeElement, FacadeElementKind, HallDimensions, RoofElement,
    RoofElementKind, Wall,
};
use nalgebra::Point2;
use rand::Rng;

/// Interval occupied by an existing element along the placement axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccupiedSpan {
    pub center: f64,
    pub width: f64,
}

impl OccupiedSpan {
    pub fn new(center: f64, width: f64) -> Self {
        Self { center, width }
    }

    /// Touching intervals count as overlapping
    #[inline]
    pub fn overlaps(&self, center: f64, width: f64) -> bool {
        (self.center - center).abs() <= (self.width + width) / 2.0
    }
}

/// Which step of the planner produced an offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// A fixed candidate clear of every existing element
    Candidate,
    /// Next to the most recently added element; bounds-checked only
    Adjacent,
    /// Uniformly random within bounds; may overlap
    RandomFallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub offset: f64,
    pub strategy: PlacementStrategy,
}

/// Newly planned element plus how its position was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct Planned<E> {
    pub element: E,
    pub strategy: PlacementStrategy,
}

/// Choose an offset for an element of `width` on an axis of `span`.
///
/// `existing` is in creation order; the last entry is the most recent.
pub fn place_new_element<R: Rng + ?Sized>(
    width: f64,
    span: f64,
    existing: &[OccupiedSpan],
    margin: f64,
    rng: &mut R,
) -> Placement {
    let limit = if width >= span {
        0.0
    } else {
        span / 2.0 - width / 2.0
    };
    let in_bounds = |c: f64| c.abs() <= limit + 1e-9;

    let candidates = [
        -span / 4.0,
        span / 4.0,
        -span / 3.0,
        span / 3.0,
        -2.0,
        2.0,
        0.0,
    ];
    if let Some(&offset) = candidates
        .iter()
        .find(|&&c| in_bounds(c) && !existing.iter().any(|e| e.overlaps(c, width)))
    {
        return Placement {
            offset,
            strategy: PlacementStrategy::Candidate,
        };
    }

    if let Some(last) = existing.last() {
        let step = last.width / 2.0 + width / 2.0 + margin;
        for offset in [last.center + step, last.center - step] {
            if in_bounds(offset) {
                return Placement {
                    offset,
                    strategy: PlacementStrategy::Adjacent,
                };
            }
        }
    }

    let offset = if limit > 0.0 {
        rng.random_range(-limit..=limit)
    } else {
        0.0
    };
    tracing::warn!(
        span,
        width,
        existing = existing.len(),
        offset,
        "No free slot for new element, placed at random offset"
    );
    Placement {
        offset,
        strategy: PlacementStrategy::RandomFallback,
    }
}

/// Create a facade element of `kind` on `wall` with default size, a planned
/// offset and the kind's default elevation.
///
/// Returns `None` for degenerate dimensions.
pub fn plan_facade_element<R: Rng + ?Sized>(
    id: impl Into<ElementId>,
    kind: FacadeElementKind,
    wall: Wall,
    dims: &HallDimensions,
    existing: &[FacadeElement],
    settings: &EnvelopeSettings,
    rng: &mut R,
) -> Option<Planned<FacadeElement>> {
    let clear = wall_clear_height(wall, &derive_roof_geometry(dims))?;
    let span = wall.span(dims);
    let size = kind.clamp_size(kind.default_size(span));

    let occupied: Vec<OccupiedSpan> = existing
        .iter()
        .filter(|e| e.wall == wall)
        .map(|e| OccupiedSpan::new(e.offset, e.size.width))
        .collect();
    let placement = place_new_element(size.width, span, &occupied, settings.placement_margin, rng);

    let elevation = kind.default_elevation(size.height, clear);
    let local = facade_bounds(kind, size, wall, dims)?.clamp(Point2::new(placement.offset, elevation));

    tracing::debug!(
        kind = %kind,
        wall = %wall,
        offset = local.x,
        elevation = local.y,
        strategy = ?placement.strategy,
        "Planned facade element"
    );

    Some(Planned {
        element: FacadeElement::new(id, kind, wall, size).at(local.x, local.y),
        strategy: placement.strategy,
    })
}

/// Default cross position of a new roof element, before clamping
fn default_roof_z(kind: RoofElementKind, roof: &RoofGeometry, dims: &HallDimensions) -> f64 {
    match (kind, roof) {
        // Quarter width: halfway down the front slope
        (RoofElementKind::RoofWindow, RoofGeometry::Gable { .. }) => -dims.width / 4.0,
        (RoofElementKind::RidgeSkylight, _) => roof.ridge_line_z().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Create a roof element of `kind` with default size and a planned position
/// along the hall length.
///
/// Only elements whose cross extent overlaps the new element's row count
/// as occupied. Returns `None` for degenerate dimensions.
pub fn plan_roof_element<R: Rng + ?Sized>(
    id: impl Into<ElementId>,
    kind: RoofElementKind,
    dims: &HallDimensions,
    existing: &[RoofElement],
    settings: &EnvelopeSettings,
    rng: &mut R,
) -> Option<Planned<RoofElement>> {
    let roof = derive_roof_geometry(dims);
    if roof.is_degenerate() {
        return None;
    }

    let candidate = RoofElement::new(id, kind, kind.default_size(dims));
    let (along_x, along_z) = candidate.footprint();
    let z = clamp_centered(default_roof_z(kind, &roof, dims), dims.width, along_z);

    let occupied: Vec<OccupiedSpan> = existing
        .iter()
        .filter(|e| {
            let (_, other_z) = e.footprint();
            (e.z - z).abs() < (other_z + along_z) / 2.0
        })
        .map(|e| OccupiedSpan::new(e.x, e.footprint().0))
        .collect();
    let placement = place_new_element(along_x, dims.length, &occupied, settings.placement_margin, rng);

    tracing::debug!(
        kind = %kind,
        x = placement.offset,
        z,
        strategy = ?placement.strategy,
        "Planned roof element"
    );

    Some(Planned {
        element: candidate.at(placement.offset, z),
        strategy: placement.strategy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hall_envelope_core::RoofType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_first_candidate_on_empty_wall() {
        let placement = place_new_element(1.2, 20.0, &[], 0.5, &mut rng());
        assert_eq!(placement.offset, -5.0);
        assert_eq!(placement.strategy, PlacementStrategy::Candidate);
    }

    #[test]
    fn test_candidate_avoids_existing() {
        let existing = [OccupiedSpan::new(-5.0, 3.0), OccupiedSpan::new(5.0, 3.0)];
        let placement = place_new_element(1.2, 20.0, &existing, 0.5, &mut rng());
        // Quarter and third span positions all collide
        assert_eq!(placement.offset, -2.0);
        assert_eq!(placement.strategy, PlacementStrategy::Candidate);
        for e in &existing {
            assert!(!e.overlaps(placement.offset, 1.2));
        }
    }

    #[test]
    fn test_touching_counts_as_overlap() {
        // 2.5 is exactly (1 + 6) / 2 away from -1
        let existing = [OccupiedSpan::new(-1.0, 6.0)];
        let placement = place_new_element(1.0, 10.0, &existing, 0.5, &mut rng());
        assert_relative_eq!(placement.offset, 10.0 / 3.0);
    }

    #[test]
    fn test_adjacent_to_last_element() {
        let existing = [OccupiedSpan::new(-1.0, 6.0), OccupiedSpan::new(3.5, 2.0)];
        let placement = place_new_element(1.0, 10.0, &existing, 0.5, &mut rng());
        // Right side (5.5) is out of bounds, left side is not
        assert_eq!(placement.strategy, PlacementStrategy::Adjacent);
        assert_relative_eq!(placement.offset, 1.5);
    }

    #[test]
    fn test_random_fallback_stays_in_bounds() {
        let existing = [OccupiedSpan::new(0.0, 10.0)];
        let mut rng = rng();
        for _ in 0..50 {
            let placement = place_new_element(1.0, 10.0, &existing, 0.5, &mut rng);
            assert_eq!(placement.strategy, PlacementStrategy::RandomFallback);
            assert!(placement.offset.abs() <= 4.5);
        }
    }

    #[test]
    fn test_wider_than_span_is_centered() {
        let placement = place_new_element(12.0, 10.0, &[], 0.5, &mut rng());
        assert_eq!(placement.offset, 0.0);

        let existing = [OccupiedSpan::new(0.0, 2.0)];
        let placement = place_new_element(12.0, 10.0, &existing, 0.5, &mut rng());
        assert_eq!(placement.offset, 0.0);
        assert_eq!(placement.strategy, PlacementStrategy::RandomFallback);
    }

    #[test]
    fn test_plan_facade_window() {
        let dims = HallDimensions::default();
        let settings = EnvelopeSettings::default();
        let planned = plan_facade_element(
            "w1",
            FacadeElementKind::Window,
            Wall::North,
            &dims,
            &[],
            &settings,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(planned.element.offset, -5.0);
        assert_relative_eq!(planned.element.elevation, 1.6);
        assert_eq!(planned.element.size.width, 1.2);
    }

    #[test]
    fn test_plan_facade_ignores_other_walls() {
        let dims = HallDimensions::default();
        let settings = EnvelopeSettings::default();
        let on_east = FacadeElement::new(
            "e",
            FacadeElementKind::Door,
            Wall::East,
            FacadeElementKind::Door.default_size(15.0),
        )
        .at(-5.0, 1.05);
        let planned = plan_facade_element(
            "d2",
            FacadeElementKind::Door,
            Wall::North,
            &dims,
            &[on_east],
            &settings,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(planned.element.offset, -5.0);
        assert_relative_eq!(planned.element.elevation, 1.05);
    }

    #[test]
    fn test_plan_light_band_below_eave() {
        let dims = HallDimensions::new(40.0, 20.0, 8.0, RoofType::Monopitch, 10.0);
        let settings = EnvelopeSettings::default();
        let planned = plan_facade_element(
            "lb",
            FacadeElementKind::LightBand,
            Wall::South,
            &dims,
            &[],
            &settings,
            &mut rng(),
        )
        .unwrap();
        // South wall of a monopitch rises to 10 m
        assert_relative_eq!(planned.element.elevation, 10.0 - 0.5 - 0.3);
        assert_eq!(planned.element.size.width, 8.0);
    }

    #[test]
    fn test_plan_roof_defaults() {
        let settings = EnvelopeSettings::default();

        let gable = HallDimensions::new(20.0, 12.0, 6.0, RoofType::Gable, 20.0);
        let window = plan_roof_element("r", RoofElementKind::RoofWindow, &gable, &[], &settings, &mut rng())
            .unwrap()
            .element;
        assert_eq!(window.z, -3.0);
        assert_eq!(window.x, -5.0);

        let mono = HallDimensions::new(20.0, 12.0, 6.0, RoofType::Monopitch, 20.0);
        let sky = plan_roof_element("s", RoofElementKind::RidgeSkylight, &mono, &[], &settings, &mut rng())
            .unwrap()
            .element;
        assert_eq!(sky.z, 5.5);
        assert_eq!(sky.size.length, Some(8.0));
    }

    #[test]
    fn test_plan_roof_only_checks_same_row() {
        let settings = EnvelopeSettings::default();
        let dims = HallDimensions::new(20.0, 12.0, 6.0, RoofType::Gable, 20.0);
        let size = RoofElementKind::RoofWindow.default_size(&dims);
        // Back slope element at the first candidate does not block the front row
        let back = RoofElement::new("b", RoofElementKind::RoofWindow, size).at(-5.0, 3.0);
        let front = RoofElement::new("f", RoofElementKind::RoofWindow, size).at(5.0, -3.0);

        let planned = plan_roof_element(
            "n",
            RoofElementKind::RoofWindow,
            &dims,
            &[back, front],
            &settings,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(planned.element.x, -5.0);
        assert_eq!(planned.strategy, PlacementStrategy::Candidate);
    }

    #[test]
    fn test_plan_degenerate() {
        let dims = HallDimensions::flat(0.0, 10.0, 5.0);
        let settings = EnvelopeSettings::default();
        assert!(plan_roof_element("r", RoofElementKind::RoofWindow, &dims, &[], &settings, &mut rng()).is_none());
        assert!(plan_facade_element(
            "w",
            FacadeElementKind::Window,
            Wall::North,
            &dims,
            &[],
            &settings,
            &mut rng()
        )
        .is_none());
    }
}

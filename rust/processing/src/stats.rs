// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Envelope surface areas and element counts.

use crate::types::EnvelopeSnapshot;
use hall_envelope_core::{FacadeElementKind, RoofElementKind};
use hall_envelope_geometry::derive_roof_geometry;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Element counts by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementCounts {
    pub windows: usize,
    pub doors: usize,
    pub sectional_doors: usize,
    pub windowed_sectional_doors: usize,
    pub light_bands: usize,
    pub roof_windows: usize,
    pub ridge_skylights: usize,
}

/// Summary figures for one snapshot. Areas are in m², rounded to 2 decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingStats {
    /// Length times developed roof width.
    pub roof_area: f64,
    /// Gross perimeter wall area up to the eave height.
    pub wall_area: f64,
    pub total_area: f64,
    pub elements: ElementCounts,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute stats for a snapshot. Degenerate dimensions yield zeroed areas.
pub fn calculate_stats(snapshot: &EnvelopeSnapshot) -> BuildingStats {
    let dims = &snapshot.dimensions;
    let roof = derive_roof_geometry(dims);

    let (roof_area, wall_area) = if roof.is_degenerate() {
        (0.0, 0.0)
    } else {
        (
            dims.length * roof.developed_width(),
            2.0 * (dims.length + dims.width) * dims.height,
        )
    };

    BuildingStats {
        roof_area: round2(roof_area),
        wall_area: round2(wall_area),
        total_area: round2(roof_area + wall_area),
        elements: count_elements(snapshot),
    }
}

fn count_elements(snapshot: &EnvelopeSnapshot) -> ElementCounts {
    let mut facade: FxHashMap<FacadeElementKind, usize> = FxHashMap::default();
    for el in &snapshot.facade_elements {
        *facade.entry(el.kind).or_insert(0) += 1;
    }
    let mut roof: FxHashMap<RoofElementKind, usize> = FxHashMap::default();
    for el in &snapshot.roof_elements {
        *roof.entry(el.kind).or_insert(0) += 1;
    }

    let facade_count = |kind| facade.get(&kind).copied().unwrap_or(0);
    let roof_count = |kind| roof.get(&kind).copied().unwrap_or(0);

    ElementCounts {
        windows: facade_count(FacadeElementKind::Window),
        doors: facade_count(FacadeElementKind::Door),
        sectional_doors: facade_count(FacadeElementKind::SectionalDoor),
        windowed_sectional_doors: facade_count(FacadeElementKind::WindowedSectionalDoor),
        light_bands: facade_count(FacadeElementKind::LightBand),
        roof_windows: roof_count(RoofElementKind::RoofWindow),
        ridge_skylights: roof_count(RoofElementKind::RidgeSkylight),
    }
}

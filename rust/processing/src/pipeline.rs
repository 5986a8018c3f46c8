// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene recomputation from a snapshot.
//!
//! The whole scene is rebuilt from scratch for every snapshot. Elements whose
//! pose cannot be derived are left out of the scene and logged.

use crate::error::Result;
use crate::stats::calculate_stats;
use crate::types::{EnvelopeScene, EnvelopeSnapshot, PlacedElement, RoofPanelData, WallData, WallMesh};
use hall_envelope_core::{EnvelopeSettings, Wall};
use hall_envelope_geometry::{
    derive_roof_geometry, extrude_profile, roof_panels, transform_facade_element,
    transform_roof_element, wall_outline, wall_placement, Matrix4, Opening, Point2, Pose,
    WallOutline,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::time::Instant;

/// Build the renderable scene for a snapshot.
pub fn build_scene(snapshot: &EnvelopeSnapshot, settings: &EnvelopeSettings) -> EnvelopeScene {
    let start = Instant::now();
    let dims = snapshot.dimensions;
    let roof = derive_roof_geometry(&dims);

    if roof.is_degenerate() {
        tracing::warn!(
            length = dims.length,
            width = dims.width,
            height = dims.height,
            pitch = dims.roof_pitch,
            "Degenerate hall dimensions, emitting empty scene"
        );
        return EnvelopeScene::degenerate(dims);
    }

    let walls: Vec<WallData> = Wall::ALL
        .iter()
        .filter_map(|&wall| wall_outline(wall, &roof, &dims))
        .map(|outline| {
            let placement = wall_placement(outline.wall, &dims, settings.wall_thickness);
            WallData::new(&outline, settings.wall_thickness, &placement)
        })
        .collect();

    let roof_panels: Vec<RoofPanelData> = roof_panels(&dims, settings.roof_thickness)
        .iter()
        .map(RoofPanelData::from)
        .collect();

    let mut skipped = 0usize;

    let facade_elements: Vec<PlacedElement> = snapshot
        .facade_elements
        .iter()
        .filter_map(|el| {
            let placed = transform_facade_element(el, &dims, settings.wall_thickness)
                .filter(Pose::is_finite)
                .map(|pose| PlacedElement::facade(el, &pose));
            if placed.is_none() {
                tracing::debug!(id = %el.id, wall = %el.wall, "No pose for facade element");
                skipped += 1;
            }
            placed
        })
        .collect();

    let roof_elements: Vec<PlacedElement> = snapshot
        .roof_elements
        .iter()
        .filter_map(|el| {
            let placed = transform_roof_element(el, &dims)
                .filter(Pose::is_finite)
                .map(|pose| PlacedElement::roof(el, &pose));
            if placed.is_none() {
                tracing::debug!(id = %el.id, "No pose for roof element");
                skipped += 1;
            }
            placed
        })
        .collect();

    let stats = calculate_stats(snapshot);

    tracing::info!(
        roof_type = %dims.roof_type,
        walls = walls.len(),
        roof_panels = roof_panels.len(),
        facade_elements = facade_elements.len(),
        roof_elements = roof_elements.len(),
        skipped,
        total_time_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Scene built"
    );

    EnvelopeScene {
        degenerate: false,
        dimensions: dims,
        walls,
        roof_panels,
        facade_elements,
        roof_elements,
        stats,
    }
}

/// Collect the openings each wall needs from the placed facade elements.
fn openings_by_wall(scene: &EnvelopeScene) -> FxHashMap<Wall, SmallVec<[Opening; 8]>> {
    let mut openings: FxHashMap<Wall, SmallVec<[Opening; 8]>> = FxHashMap::default();
    for el in &scene.facade_elements {
        let Some(wall) = el.wall else { continue };
        openings.entry(wall).or_default().push(Opening {
            center: Point2::new(el.local[0], el.local[1]),
            width: el.size.width,
            height: el.size.height,
        });
    }
    openings
}

/// Extrude every wall of the scene with its facade openings cut out.
pub fn build_wall_meshes(scene: &EnvelopeScene) -> Result<Vec<WallMesh>> {
    let start = Instant::now();
    let openings = openings_by_wall(scene);
    let mut meshes = Vec::with_capacity(scene.walls.len());

    for data in &scene.walls {
        let outline = WallOutline {
            wall: data.wall,
            points: data.outline.iter().map(|p| Point2::new(p[0], p[1])).collect(),
        };
        let profile = match openings.get(&data.wall) {
            Some(holes) => outline.to_profile_with_openings(holes),
            None => outline.to_profile(),
        };
        let placement = Matrix4::from_column_slice(&data.placement);
        let mesh = extrude_profile(&profile, data.thickness, Some(placement))?;
        meshes.push(WallMesh::new(data.wall, mesh));
    }

    tracing::debug!(
        walls = meshes.len(),
        triangles = meshes.iter().map(WallMesh::triangle_count).sum::<usize>(),
        total_time_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Wall meshes extruded"
    );

    Ok(meshes)
}

/// Parse a JSON snapshot and return the scene as JSON.
///
/// Settings are validated first; invalid dimensions still produce a
/// degenerate scene rather than an error.
pub fn process_snapshot_json(json: &str, settings: &EnvelopeSettings) -> Result<String> {
    settings.validate()?;
    let snapshot = EnvelopeSnapshot::from_json(json)?;
    build_scene(&snapshot, settings).to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hall_envelope_core::{
        ElementSize, FacadeElement, FacadeElementKind, HallDimensions, RoofElement,
        RoofElementKind, RoofType,
    };

    fn gable_snapshot() -> EnvelopeSnapshot {
        EnvelopeSnapshot::new(HallDimensions::new(20.0, 10.0, 5.0, RoofType::Gable, 20.0))
    }

    #[test]
    fn test_empty_gable_scene() {
        let scene = build_scene(&gable_snapshot(), &EnvelopeSettings::default());
        assert!(!scene.degenerate);
        assert_eq!(scene.walls.len(), 4);
        assert!(!scene.roof_panels.is_empty());
        assert!(scene.facade_elements.is_empty());
        assert!(scene.roof_elements.is_empty());

        // Gable end walls carry the pentagon
        let east = scene.walls.iter().find(|w| w.wall == Wall::East).unwrap();
        assert_eq!(east.outline.len(), 5);
        assert!((east.peak_height - 7.0).abs() < 1e-12);
        let north = scene.walls.iter().find(|w| w.wall == Wall::North).unwrap();
        assert_eq!(north.outline.len(), 4);
    }

    #[test]
    fn test_degenerate_scene_is_empty() {
        let snapshot = EnvelopeSnapshot::new(HallDimensions::flat(20.0, -1.0, 5.0));
        let scene = build_scene(&snapshot, &EnvelopeSettings::default());
        assert!(scene.degenerate);
        assert!(scene.walls.is_empty());
        assert!(scene.roof_panels.is_empty());
        assert!(build_wall_meshes(&scene).unwrap().is_empty());
    }

    #[test]
    fn test_elements_are_placed() {
        let mut snapshot = gable_snapshot();
        snapshot.facade_elements.push(
            FacadeElement::new("w1", FacadeElementKind::Window, Wall::North, ElementSize::new(1.5, 1.2))
                .at(2.0, 2.5),
        );
        snapshot.roof_elements.push(
            RoofElement::new("r1", RoofElementKind::RoofWindow, ElementSize::new(1.3, 0.08)).at(0.0, -2.0),
        );

        let scene = build_scene(&snapshot, &EnvelopeSettings::default());
        assert_eq!(scene.facade_elements.len(), 1);
        assert_eq!(scene.roof_elements.len(), 1);

        let window = &scene.facade_elements[0];
        assert_eq!(window.wall, Some(Wall::North));
        assert_eq!(window.local, [2.0, 2.5]);
        assert_eq!(window.kind, "window");

        let roof_window = &scene.roof_elements[0];
        assert_eq!(roof_window.wall, None);
        assert!(roof_window.rotation[0] < 0.0);
        assert_eq!(scene.stats.elements.windows, 1);
        assert_eq!(scene.stats.elements.roof_windows, 1);
    }

    #[test]
    fn test_openings_grouped_by_wall() {
        let size = ElementSize::new(1.0, 1.0);
        let mut snapshot = gable_snapshot();
        snapshot.facade_elements = vec![
            FacadeElement::new("a", FacadeElementKind::Window, Wall::North, size).at(-3.0, 2.0),
            FacadeElement::new("b", FacadeElementKind::Window, Wall::North, size).at(3.0, 2.0),
            FacadeElement::new("c", FacadeElementKind::Window, Wall::West, size).at(0.0, 2.0),
        ];
        let scene = build_scene(&snapshot, &EnvelopeSettings::default());
        let openings = openings_by_wall(&scene);
        assert_eq!(openings[&Wall::North].len(), 2);
        assert_eq!(openings[&Wall::West].len(), 1);
        assert!(!openings.contains_key(&Wall::South));
    }

    #[test]
    fn test_wall_meshes_with_openings() {
        let mut snapshot = gable_snapshot();
        let plain = build_wall_meshes(&build_scene(&snapshot, &EnvelopeSettings::default())).unwrap();

        snapshot.facade_elements.push(
            FacadeElement::new("w1", FacadeElementKind::Window, Wall::South, ElementSize::new(1.5, 1.2))
                .at(0.0, 2.5),
        );
        let cut = build_wall_meshes(&build_scene(&snapshot, &EnvelopeSettings::default())).unwrap();

        assert_eq!(plain.len(), 4);
        assert_eq!(cut.len(), 4);
        let tris = |meshes: &[WallMesh], wall| {
            meshes.iter().find(|m| m.wall == wall).map(WallMesh::triangle_count).unwrap()
        };
        assert!(tris(&cut, Wall::South) > tris(&plain, Wall::South));
        assert_eq!(tris(&cut, Wall::North), tris(&plain, Wall::North));
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{
            "dimensions": {"length": 30.0, "width": 12.0, "height": 6.0, "roofType": "flat", "roofPitch": 0.0},
            "facadeElements": [],
            "roofElements": []
        }"#;
        let out = process_snapshot_json(json, &EnvelopeSettings::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["degenerate"], false);
        assert_eq!(value["walls"].as_array().unwrap().len(), 4);
        assert_eq!(value["stats"]["roofArea"], 360.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            process_snapshot_json("{", &EnvelopeSettings::default()),
            Err(crate::Error::Serialization(_))
        ));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = EnvelopeSettings {
            wall_thickness: 0.0,
            ..EnvelopeSettings::default()
        };
        let json = r#"{"dimensions": {"length": 30.0, "width": 12.0, "height": 6.0, "roofType": "flat", "roofPitch": 0.0}}"#;
        assert!(matches!(
            process_snapshot_json(json, &settings),
            Err(crate::Error::Core(_))
        ));
    }

    fn has_vertex(mesh: &WallMesh, expected: [f64; 3]) -> bool {
        mesh.positions
            .chunks_exact(3)
            .any(|p| (0..3).all(|i| (p[i] as f64 - expected[i]).abs() < 1e-4))
    }

    #[test]
    fn test_opening_lands_at_element_position() {
        let dims = HallDimensions::flat(20.0, 10.0, 6.0);
        let settings = EnvelopeSettings::default();
        let half_t = settings.wall_thickness / 2.0;
        let mut snapshot = EnvelopeSnapshot::new(dims);
        snapshot.facade_elements.push(
            FacadeElement::new("w1", FacadeElementKind::Window, Wall::East, ElementSize::new(1.2, 1.0))
                .at(2.0, 3.0),
        );

        let scene = build_scene(&snapshot, &settings);
        let meshes = build_wall_meshes(&scene).unwrap();
        let east = meshes.iter().find(|m| m.wall == Wall::East).unwrap();

        // East wall: outline u runs along world z, the solid straddles x = 10
        for [u, v] in [[1.4, 2.5], [2.6, 2.5], [2.6, 3.5], [1.4, 3.5]] {
            assert!(has_vertex(east, [10.0 + half_t, v, u]));
            assert!(has_vertex(east, [10.0 - half_t, v, u]));
        }
        let west = meshes.iter().find(|m| m.wall == Wall::West).unwrap();
        assert!(!has_vertex(west, [-10.0 + half_t, 2.5, 1.4]));
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot input and scene output types for serialization.

use crate::error::Result;
use crate::stats::BuildingStats;
use hall_envelope_core::{ElementId, ElementSize, FacadeElement, HallDimensions, RoofElement, Wall};
use hall_envelope_geometry::{Matrix4, Mesh, Pose, RoofPanel, RoofPanelKind, WallOutline};
use serde::{Deserialize, Serialize};

/// Immutable input for one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSnapshot {
    pub dimensions: HallDimensions,
    #[serde(default)]
    pub facade_elements: Vec<FacadeElement>,
    #[serde(default)]
    pub roof_elements: Vec<RoofElement>,
}

impl EnvelopeSnapshot {
    pub fn new(dimensions: HallDimensions) -> Self {
        Self {
            dimensions,
            facade_elements: Vec::new(),
            roof_elements: Vec::new(),
        }
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One extruded wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallData {
    pub wall: Wall,
    /// Outline in the wall's `(u, v)` frame, counter-clockwise.
    pub outline: Vec<[f64; 2]>,
    pub thickness: f64,
    pub clear_height: f64,
    pub peak_height: f64,
    /// Column-major 4x4 placement of the outline plane in world space.
    pub placement: [f64; 16],
}

impl WallData {
    pub fn new(outline: &WallOutline, thickness: f64, placement: &Matrix4<f64>) -> Self {
        let mut matrix = [0.0; 16];
        matrix.copy_from_slice(placement.as_slice());
        Self {
            wall: outline.wall,
            outline: outline.points.iter().map(|p| [p.x, p.y]).collect(),
            thickness,
            clear_height: outline.clear_height(),
            peak_height: outline.peak_height(),
            placement: matrix,
        }
    }
}

/// One roof slab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoofPanelData {
    pub kind: String,
    pub center: [f64; 3],
    /// Rotation about the X axis in radians.
    pub pitch: f64,
    /// `[length, thickness, run]`
    pub size: [f64; 3],
    pub top_corners: [[f64; 3]; 4],
}

impl From<&RoofPanel> for RoofPanelData {
    fn from(panel: &RoofPanel) -> Self {
        let kind = match panel.kind {
            RoofPanelKind::Flat => "flat",
            RoofPanelKind::FrontSlope => "frontSlope",
            RoofPanelKind::BackSlope => "backSlope",
            RoofPanelKind::Slope => "slope",
            RoofPanelKind::RidgeCap => "ridgeCap",
        };
        Self {
            kind: kind.to_string(),
            center: [panel.center.x, panel.center.y, panel.center.z],
            pitch: panel.pitch,
            size: [panel.length, panel.thickness, panel.run],
            top_corners: panel.top_corners().map(|p| [p.x, p.y, p.z]),
        }
    }
}

/// Element with its resolved world pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedElement {
    pub id: ElementId,
    /// Element kind name (e.g. "window", "ridgeSkylight").
    pub kind: String,
    /// Host wall; `None` for roof elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall: Option<Wall>,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    /// Clamped local coordinates: `(offset, elevation)` or `(x, z)`.
    pub local: [f64; 2],
    pub size: ElementSize,
}

impl PlacedElement {
    pub fn facade(element: &FacadeElement, pose: &Pose) -> Self {
        let offset = if element.wall.is_length_wall() {
            pose.position.x
        } else {
            pose.position.z
        };
        Self {
            id: element.id.clone(),
            kind: element.kind.as_str().to_string(),
            wall: Some(element.wall),
            position: pose.position.coords.into(),
            rotation: pose.rotation.into(),
            local: [offset, pose.position.y],
            size: element.size,
        }
    }

    pub fn roof(element: &RoofElement, pose: &Pose) -> Self {
        Self {
            id: element.id.clone(),
            kind: element.kind.as_str().to_string(),
            wall: None,
            position: pose.position.coords.into(),
            rotation: pose.rotation.into(),
            local: [pose.position.x, pose.position.z],
            size: element.size,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeScene {
    /// Set when the dimensions cannot produce geometry; all lists are empty.
    pub degenerate: bool,
    pub dimensions: HallDimensions,
    pub walls: Vec<WallData>,
    pub roof_panels: Vec<RoofPanelData>,
    pub facade_elements: Vec<PlacedElement>,
    pub roof_elements: Vec<PlacedElement>,
    pub stats: BuildingStats,
}

impl EnvelopeScene {
    /// Empty scene for dimensions that cannot be rendered.
    pub fn degenerate(dimensions: HallDimensions) -> Self {
        Self {
            degenerate: true,
            dimensions,
            walls: Vec::new(),
            roof_panels: Vec::new(),
            facade_elements: Vec::new(),
            roof_elements: Vec::new(),
            stats: BuildingStats::default(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Extruded wall solid ready for upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallMesh {
    pub wall: Wall,
    /// Vertex positions (x, y, z triplets).
    pub positions: Vec<f32>,
    /// Vertex normals (x, y, z triplets).
    pub normals: Vec<f32>,
    /// Triangle indices.
    pub indices: Vec<u32>,
}

impl WallMesh {
    pub fn new(wall: Wall, mesh: Mesh) -> Self {
        Self {
            wall,
            positions: mesh.positions,
            normals: mesh.normals,
            indices: mesh.indices,
        }
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

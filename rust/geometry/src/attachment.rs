// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attachment transforms
//!
//! Converts an element's logical attachment (a wall, or the roof) plus its
//! local coordinates into a world pose. Poses are never stored; they are
//! recomputed from the dimensions and the element every time.
//!
//! Facade local frame: `offset` along the wall (same axis as the wall
//! outline's `u`), `elevation` above ground. Roof local frame: plan position
//! `(x, z)`, with the vertical coordinate always derived from the roof shape.

use crate::outline::wall_clear_height;
use crate::roof::{derive_roof_geometry, RoofGeometry};
use hall_envelope_core::{
    ElementSize, FacadeElement, FacadeElementKind, HallDimensions, RoofElement, RoofElementKind,
    Wall,
};
use nalgebra::{Matrix4, Point2, Point3, Rotation3, Translation3, Vector3};

/// Gap between a facade element and the outer wall face
pub const FACADE_CLEARANCE: f64 = 0.01;

/// Gap between a roof element and the roof surface
pub const ROOF_CLEARANCE: f64 = 0.05;

/// World position and XYZ-order Euler rotation in radians (matrix `Rx * Ry * Rz`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Point3<f64>,
    pub rotation: Vector3<f64>,
}

impl Pose {
    pub fn new(position: Point3<f64>, rotation: Vector3<f64>) -> Self {
        Self { position, rotation }
    }

    /// Homogeneous transform `T * Rx * Ry * Rz`
    pub fn to_matrix(&self) -> Matrix4<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.rotation.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.rotation.z);
        Translation3::from(self.position.coords).to_homogeneous()
            * (rx * ry * rz).to_homogeneous()
    }

    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|v| v.is_finite()) && self.rotation.iter().all(|v| v.is_finite())
    }
}

/// Axis-aligned bounds for an element's local centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalBounds {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl LocalBounds {
    pub fn clamp(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(
            clamp_finite(p.x, self.min.x, self.max.x),
            clamp_finite(p.y, self.min.y, self.max.y),
        )
    }
}

/// Clamp a centre coordinate so an element of `size` stays within `span`.
///
/// Elements wider than the span are centred.
#[inline]
pub fn clamp_centered(value: f64, span: f64, size: f64) -> f64 {
    let (lo, hi) = centered_range(span, size);
    clamp_finite(value, lo, hi)
}

#[inline]
fn centered_range(span: f64, size: f64) -> (f64, f64) {
    if size >= span {
        (0.0, 0.0)
    } else {
        let limit = span / 2.0 - size / 2.0;
        (-limit, limit)
    }
}

/// Non-finite input falls back to the middle of the range
#[inline]
fn clamp_finite(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// Vertical range for an element of `height` on a wall with `clear_height`
#[inline]
fn vertical_range(kind: FacadeElementKind, height: f64, clear_height: f64) -> (f64, f64) {
    if kind.is_ground_anchored() {
        (height / 2.0, height / 2.0)
    } else if height >= clear_height {
        (clear_height / 2.0, clear_height / 2.0)
    } else {
        (height / 2.0, clear_height - height / 2.0)
    }
}

/// Valid `(offset, elevation)` centres for a facade element.
///
/// Ground-anchored kinds collapse the vertical range to `height / 2`.
pub fn facade_bounds(
    kind: FacadeElementKind,
    size: ElementSize,
    wall: Wall,
    dims: &HallDimensions,
) -> Option<LocalBounds> {
    let roof = derive_roof_geometry(dims);
    facade_bounds_for(kind, size, wall, dims, &roof)
}

fn facade_bounds_for(
    kind: FacadeElementKind,
    size: ElementSize,
    wall: Wall,
    dims: &HallDimensions,
    roof: &RoofGeometry,
) -> Option<LocalBounds> {
    let clear = wall_clear_height(wall, roof)?;
    let (x_lo, x_hi) = centered_range(wall.span(dims), size.width);
    let (y_lo, y_hi) = vertical_range(kind, size.height, clear);
    Some(LocalBounds {
        min: Point2::new(x_lo, y_lo),
        max: Point2::new(x_hi, y_hi),
    })
}

/// Valid plan centres `(x, z)` for a roof element
pub fn roof_bounds(element: &RoofElement, dims: &HallDimensions) -> Option<LocalBounds> {
    if dims.is_degenerate() {
        return None;
    }
    let (along_x, along_z) = element.footprint();
    let (x_lo, x_hi) = centered_range(dims.length, along_x);
    let (z_lo, z_hi) = centered_range(dims.width, along_z);
    Some(LocalBounds {
        min: Point2::new(x_lo, z_lo),
        max: Point2::new(x_hi, z_hi),
    })
}

/// World pose of a facade element.
///
/// The element is pushed out to the outer wall face plus [`FACADE_CLEARANCE`]
/// and turned to face outward. Doors always stand on the ground. Returns
/// `None` for degenerate dimensions.
pub fn transform_facade_element(
    element: &FacadeElement,
    dims: &HallDimensions,
    wall_thickness: f64,
) -> Option<Pose> {
    let roof = derive_roof_geometry(dims);
    let bounds = facade_bounds_for(element.kind, element.size, element.wall, dims, &roof)?;
    let local = bounds.clamp(Point2::new(element.offset, element.elevation));

    let y = if element.kind.is_ground_anchored() {
        element.size.height / 2.0
    } else {
        local.y
    };

    let wall = element.wall;
    let depth = wall.outward_sign() * (wall.half_depth(dims) + wall_thickness / 2.0 + FACADE_CLEARANCE);
    let position = if wall.is_length_wall() {
        Point3::new(local.x, y, depth)
    } else {
        Point3::new(depth, y, local.x)
    };

    Some(Pose::new(position, Vector3::new(0.0, wall.outward_yaw(), 0.0)))
}

/// World pose of a roof element.
///
/// Roof windows follow the slope under them. Ridge skylights keep an
/// identity rotation and sit on the ridge (gable), the high edge
/// (monopitch) or the roof plane (flat). Returns `None` for degenerate
/// dimensions.
pub fn transform_roof_element(element: &RoofElement, dims: &HallDimensions) -> Option<Pose> {
    let roof = derive_roof_geometry(dims);
    let local = roof_bounds(element, dims)?.clamp(Point2::new(element.x, element.z));
    roof_pose(&roof, element.kind, local)
}

fn roof_pose(
    roof: &RoofGeometry,
    kind: RoofElementKind,
    local: Point2<f64>,
) -> Option<Pose> {
    let (x, z) = (local.x, local.y);

    let (surface, pitch) = match kind {
        RoofElementKind::RoofWindow => (roof.surface_height_at(z)?, roof.slope_rotation_at(z)),
        RoofElementKind::RidgeSkylight => (roof.ridge_line_height()?, 0.0),
    };

    Some(Pose::new(
        Point3::new(x, surface + ROOF_CLEARANCE, z),
        Vector3::new(pitch, 0.0, 0.0),
    ))
}

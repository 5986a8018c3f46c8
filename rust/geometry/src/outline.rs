// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall outlines
//!
//! Each wall is a planar polygon in its own `(u, v)` frame: `u` runs along
//! the wall (world X for North/South, world Z for East/West), `v` is the
//! height above ground, origin at the wall's ground centre. The outline is
//! extruded by the wall thickness and placed with [`wall_placement`].

use crate::profile::{create_rectangle, Profile2D};
use crate::roof::RoofGeometry;
use hall_envelope_core::{HallDimensions, Wall};
use nalgebra::{Matrix4, Point2, Vector4};
use smallvec::SmallVec;

/// Slack when testing whether an opening lies within the clear area
const EDGE_TOLERANCE: f64 = 1e-9;

/// Minimum gap between a hole and the wall outline
const HOLE_INSET: f64 = 1e-3;

/// Closed, counter-clockwise wall polygon (at most a pentagon)
#[derive(Debug, Clone, PartialEq)]
pub struct WallOutline {
    pub wall: Wall,
    pub points: SmallVec<[Point2<f64>; 5]>,
}

/// Rectangular opening in outline coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opening {
    pub center: Point2<f64>,
    pub width: f64,
    pub height: f64,
}

impl Opening {
    fn min(&self) -> Point2<f64> {
        Point2::new(self.center.x - self.width / 2.0, self.center.y - self.height / 2.0)
    }

    fn max(&self) -> Point2<f64> {
        Point2::new(self.center.x + self.width / 2.0, self.center.y + self.height / 2.0)
    }

    fn overlaps(&self, other: &Opening) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}

/// Height available for elements along the whole span of `wall`.
///
/// Matches `WallOutline::clear_height` without building the polygon.
pub fn wall_clear_height(wall: Wall, roof: &RoofGeometry) -> Option<f64> {
    match *roof {
        RoofGeometry::Flat { eave_height, .. } | RoofGeometry::Gable { eave_height, .. } => {
            Some(eave_height)
        }
        RoofGeometry::Monopitch {
            low_eave_height,
            high_eave_height,
            ..
        } => Some(if wall == Wall::South {
            high_eave_height
        } else {
            low_eave_height
        }),
        RoofGeometry::Degenerate => None,
    }
}

/// Outline of `wall` for the given roof shape.
///
/// Returns `None` for degenerate geometry.
pub fn wall_outline(wall: Wall, roof: &RoofGeometry, dims: &HallDimensions) -> Option<WallOutline> {
    let half = wall.span(dims) / 2.0;
    let rect = |top: f64| -> SmallVec<[Point2<f64>; 5]> {
        SmallVec::from_slice(&[
            Point2::new(-half, 0.0),
            Point2::new(half, 0.0),
            Point2::new(half, top),
            Point2::new(-half, top),
        ])
    };

    let points = match *roof {
        RoofGeometry::Degenerate => return None,
        RoofGeometry::Flat { eave_height, .. } => rect(eave_height),
        RoofGeometry::Gable {
            eave_height,
            ridge_height,
            ..
        } => {
            if wall.is_length_wall() {
                rect(eave_height)
            } else {
                SmallVec::from_slice(&[
                    Point2::new(-half, 0.0),
                    Point2::new(half, 0.0),
                    Point2::new(half, eave_height),
                    Point2::new(0.0, ridge_height),
                    Point2::new(-half, eave_height),
                ])
            }
        }
        RoofGeometry::Monopitch {
            low_eave_height,
            high_eave_height,
            ..
        } => match wall {
            Wall::North => rect(low_eave_height),
            Wall::South => rect(high_eave_height),
            // u follows world Z, so +half is the high (south) edge
            Wall::East | Wall::West => SmallVec::from_slice(&[
                Point2::new(-half, 0.0),
                Point2::new(half, 0.0),
                Point2::new(half, high_eave_height),
                Point2::new(-half, low_eave_height),
            ]),
        },
    };

    Some(WallOutline { wall, points })
}

impl WallOutline {
    /// Lowest top edge, i.e. the height available along the whole span
    pub fn clear_height(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.y)
            .filter(|&v| v > 0.0)
            .fold(f64::INFINITY, f64::min)
    }

    /// Highest point of the outline
    pub fn peak_height(&self) -> f64 {
        self.points.iter().map(|p| p.y).fold(0.0, f64::max)
    }

    /// Horizontal extent of the outline
    pub fn span(&self) -> f64 {
        let (min, max) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
        max - min
    }

    pub fn to_profile(&self) -> Profile2D {
        Profile2D::new(self.points.to_vec())
    }

    /// Profile with openings cut as holes.
    ///
    /// Openings that leave the clear area or overlap an earlier opening are
    /// skipped so triangulation stays valid.
    pub fn to_profile_with_openings(&self, openings: &[Opening]) -> Profile2D {
        let mut profile = self.to_profile();
        let half = self.span() / 2.0;
        let clear = self.clear_height();
        let mut accepted: Vec<Opening> = Vec::with_capacity(openings.len());

        for opening in openings {
            let (min, max) = (opening.min(), opening.max());
            let inside = min.x >= -half - EDGE_TOLERANCE
                && max.x <= half + EDGE_TOLERANCE
                && min.y >= -EDGE_TOLERANCE
                && max.y <= clear + EDGE_TOLERANCE;
            if !inside || accepted.iter().any(|o| o.overlaps(opening)) {
                tracing::debug!(
                    wall = %self.wall,
                    u = opening.center.x,
                    v = opening.center.y,
                    "Skipping opening outside wall or overlapping another"
                );
                continue;
            }

            // Hole edges on the outline are pulled inwards so the hole never
            // shares an edge with the outer boundary
            let lo = Point2::new(min.x.max(-half + HOLE_INSET), min.y.max(HOLE_INSET));
            let hi = Point2::new(max.x.min(half - HOLE_INSET), max.y.min(clear - HOLE_INSET));
            if hi.x <= lo.x || hi.y <= lo.y {
                continue;
            }
            let mut hole = create_rectangle(nalgebra::center(&lo, &hi), hi.x - lo.x, hi.y - lo.y);
            hole.reverse();
            profile.add_hole(hole);
            accepted.push(*opening);
        }

        profile
    }
}

/// World placement of a wall's outline plane.
///
/// Maps `(u, v, d)` with extrusion depth `d ∈ [0, thickness]` to world space,
/// centring the solid on the wall line.
pub fn wall_placement(wall: Wall, dims: &HallDimensions, thickness: f64) -> Matrix4<f64> {
    let line = wall.outward_sign() * wall.half_depth(dims);
    let half_t = thickness / 2.0;

    if wall.is_length_wall() {
        // u -> x, v -> y, d -> z
        Matrix4::new_translation(&nalgebra::Vector3::new(0.0, 0.0, line - half_t))
    } else {
        // u -> z, v -> y, d -> -x
        Matrix4::from_columns(&[
            Vector4::new(0.0, 0.0, 1.0, 0.0),
            Vector4::new(0.0, 1.0, 0.0, 0.0),
            Vector4::new(-1.0, 0.0, 0.0, 0.0),
            Vector4::new(line + half_t, 0.0, 0.0, 1.0),
        ])
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roof geometry derived from hall dimensions
//!
//! `derive_roof_geometry` is the single place where roof-type branching
//! happens. Every other module consumes the resulting `RoofGeometry` and
//! matches on its variants, so a formula for one roof type cannot leak into
//! another.
//!
//! Coordinate frame: Y up, hall centred on the origin, length along X,
//! width along Z. North wall at `z = -width/2`.

use hall_envelope_core::{HallDimensions, RoofType};
use nalgebra::{Point3, Rotation3, Vector3};

/// Derived roof shape, one variant per roof type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoofGeometry {
    /// Horizontal plane at the eave
    Flat { eave_height: f64, width: f64 },
    /// Two symmetric slopes meeting at the ridge (`z = 0`)
    Gable {
        eave_height: f64,
        roof_height: f64,
        ridge_height: f64,
        slope_angle: f64,
        slope_panel_length: f64,
        half_width: f64,
    },
    /// Single slope, low eave at `z = -width/2`, high eave at `z = +width/2`
    Monopitch {
        low_eave_height: f64,
        high_eave_height: f64,
        roof_height: f64,
        slope_angle: f64,
        slope_panel_length: f64,
        width: f64,
    },
    /// Dimensions cannot produce a renderable roof
    Degenerate,
}

/// Derive the roof shape from the hall dimensions.
///
/// Pure: the same dimensions always produce the same result. A zero pitch
/// yields a sloped variant with zero rise that coincides with the flat case.
pub fn derive_roof_geometry(dims: &HallDimensions) -> RoofGeometry {
    if dims.is_degenerate() {
        return RoofGeometry::Degenerate;
    }

    let roof_height = dims.roof_height();

    match dims.roof_type {
        RoofType::Flat => RoofGeometry::Flat {
            eave_height: dims.height,
            width: dims.width,
        },
        RoofType::Gable => {
            // width > 0 is guaranteed by the degenerate check above
            let half_width = dims.width / 2.0;
            RoofGeometry::Gable {
                eave_height: dims.height,
                roof_height,
                ridge_height: dims.height + roof_height,
                slope_angle: (roof_height / half_width).atan(),
                slope_panel_length: half_width.hypot(roof_height),
                half_width,
            }
        }
        RoofType::Monopitch => RoofGeometry::Monopitch {
            low_eave_height: dims.height,
            high_eave_height: dims.height + roof_height,
            roof_height,
            slope_angle: (roof_height / dims.width).atan(),
            slope_panel_length: dims.width.hypot(roof_height),
            width: dims.width,
        },
    }
}

impl RoofGeometry {
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, RoofGeometry::Degenerate)
    }

    /// Rise of the roof above the (low) eave
    pub fn roof_height(&self) -> f64 {
        match *self {
            RoofGeometry::Gable { roof_height, .. } | RoofGeometry::Monopitch { roof_height, .. } => {
                roof_height
            }
            RoofGeometry::Flat { .. } | RoofGeometry::Degenerate => 0.0,
        }
    }

    /// Slope angle in radians (0 for flat roofs)
    pub fn slope_angle(&self) -> f64 {
        match *self {
            RoofGeometry::Gable { slope_angle, .. } | RoofGeometry::Monopitch { slope_angle, .. } => {
                slope_angle
            }
            RoofGeometry::Flat { .. } | RoofGeometry::Degenerate => 0.0,
        }
    }

    /// Height of the ridge (gable), the high eave (monopitch) or the roof plane (flat)
    pub fn ridge_line_height(&self) -> Option<f64> {
        match *self {
            RoofGeometry::Flat { eave_height, .. } => Some(eave_height),
            RoofGeometry::Gable { ridge_height, .. } => Some(ridge_height),
            RoofGeometry::Monopitch { high_eave_height, .. } => Some(high_eave_height),
            RoofGeometry::Degenerate => None,
        }
    }

    /// Position of the ridge line across the width
    pub fn ridge_line_z(&self) -> Option<f64> {
        match *self {
            RoofGeometry::Flat { .. } | RoofGeometry::Gable { .. } => Some(0.0),
            RoofGeometry::Monopitch { width, .. } => Some(width / 2.0),
            RoofGeometry::Degenerate => None,
        }
    }

    /// Height of the roof surface at `z`, before any clearance offset.
    ///
    /// Positions beyond the eaves are held at eave height.
    pub fn surface_height_at(&self, z: f64) -> Option<f64> {
        match *self {
            RoofGeometry::Flat { eave_height, .. } => Some(eave_height),
            RoofGeometry::Gable {
                ridge_height,
                roof_height,
                half_width,
                ..
            } => {
                let ratio = (z.abs() / half_width).min(1.0);
                Some(ridge_height - ratio * roof_height)
            }
            RoofGeometry::Monopitch {
                low_eave_height,
                roof_height,
                width,
                ..
            } => {
                let ratio = ((z + width / 2.0) / width).clamp(0.0, 1.0);
                Some(low_eave_height + ratio * roof_height)
            }
            RoofGeometry::Degenerate => None,
        }
    }

    /// Rotation about the X axis that aligns a roof-mounted element with the slope at `z`.
    ///
    /// Gable: front slope (`z < 0`) gets `-slope_angle`, back slope `+slope_angle`,
    /// so both tilt down away from the ridge. Monopitch: `-slope_angle` everywhere.
    pub fn slope_rotation_at(&self, z: f64) -> f64 {
        match *self {
            RoofGeometry::Gable { slope_angle, .. } => {
                if z < 0.0 {
                    -slope_angle
                } else {
                    slope_angle
                }
            }
            RoofGeometry::Monopitch { slope_angle, .. } => -slope_angle,
            RoofGeometry::Flat { .. } | RoofGeometry::Degenerate => 0.0,
        }
    }

    /// Sloped (unfolded) width of the roof cladding
    pub fn developed_width(&self) -> f64 {
        match *self {
            RoofGeometry::Flat { width, .. } => width,
            RoofGeometry::Gable {
                slope_panel_length, ..
            } => 2.0 * slope_panel_length,
            RoofGeometry::Monopitch {
                slope_panel_length, ..
            } => slope_panel_length,
            RoofGeometry::Degenerate => 0.0,
        }
    }
}

/// Role of a roof panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoofPanelKind {
    Flat,
    FrontSlope,
    BackSlope,
    Slope,
    RidgeCap,
}

/// A roof slab for the rendering collaborator.
///
/// The slab is a box of `length × thickness × run` centred on `center`,
/// rotated by `pitch` about the X axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoofPanel {
    pub kind: RoofPanelKind,
    pub center: Point3<f64>,
    pub pitch: f64,
    /// Extent along X
    pub length: f64,
    pub thickness: f64,
    /// Extent along the slope before rotation
    pub run: f64,
}

impl RoofPanel {
    /// Corners of the panel's mid-plane in world space.
    ///
    /// Order: (-x, outer run), (+x, outer run), (+x, inner run), (-x, inner run),
    /// where "outer" is local `-run/2`.
    pub fn mid_plane_corners(&self) -> [Point3<f64>; 4] {
        self.corners_at(0.0)
    }

    /// Corners of the upper face in world space
    pub fn top_corners(&self) -> [Point3<f64>; 4] {
        self.corners_at(self.thickness / 2.0)
    }

    fn corners_at(&self, local_y: f64) -> [Point3<f64>; 4] {
        let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch);
        let hl = self.length / 2.0;
        let hr = self.run / 2.0;
        [
            Vector3::new(-hl, local_y, -hr),
            Vector3::new(hl, local_y, -hr),
            Vector3::new(hl, local_y, hr),
            Vector3::new(-hl, local_y, hr),
        ]
        .map(|local| self.center + rotation * local)
    }
}

/// Roof slabs for the current dimensions.
///
/// Flat: one horizontal slab. Gable: two slope slabs plus a ridge cap.
/// Monopitch: one slope slab. Degenerate dimensions produce no panels.
pub fn roof_panels(dims: &HallDimensions, thickness: f64) -> Vec<RoofPanel> {
    let geometry = derive_roof_geometry(dims);

    match geometry {
        RoofGeometry::Flat { eave_height, width } => vec![RoofPanel {
            kind: RoofPanelKind::Flat,
            center: Point3::new(0.0, eave_height, 0.0),
            pitch: 0.0,
            length: dims.length,
            thickness,
            run: width,
        }],
        RoofGeometry::Gable {
            eave_height,
            roof_height,
            ridge_height,
            slope_angle,
            slope_panel_length,
            half_width,
        } => {
            let mid_y = eave_height + roof_height / 2.0;
            vec![
                RoofPanel {
                    kind: RoofPanelKind::FrontSlope,
                    center: Point3::new(0.0, mid_y, -half_width / 2.0),
                    pitch: -slope_angle,
                    length: dims.length,
                    thickness,
                    run: slope_panel_length,
                },
                RoofPanel {
                    kind: RoofPanelKind::BackSlope,
                    center: Point3::new(0.0, mid_y, half_width / 2.0),
                    pitch: slope_angle,
                    length: dims.length,
                    thickness,
                    run: slope_panel_length,
                },
                RoofPanel {
                    kind: RoofPanelKind::RidgeCap,
                    center: Point3::new(0.0, ridge_height, 0.0),
                    pitch: 0.0,
                    length: dims.length,
                    thickness,
                    run: thickness * 2.0,
                },
            ]
        }
        RoofGeometry::Monopitch {
            low_eave_height,
            roof_height,
            slope_angle,
            slope_panel_length,
            ..
        } => vec![RoofPanel {
            kind: RoofPanelKind::Slope,
            center: Point3::new(0.0, low_eave_height + roof_height / 2.0, 0.0),
            pitch: -slope_angle,
            length: dims.length,
            thickness,
            run: slope_panel_length,
        }],
        RoofGeometry::Degenerate => Vec::new(),
    }
}

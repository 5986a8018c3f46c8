// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facade and roof elements
//!
//! Elements only store their logical attachment (a wall, or the roof) and
//! local coordinates. World poses are always derived by the geometry crate
//! and never stored here.

use crate::dimensions::HallDimensions;
use crate::error::{Error, Result};
use crate::wall::Wall;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest width or height the editors accept for any element
pub const MIN_ELEMENT_SIZE: f64 = 0.5;

/// Stable element identifier, owned by the state container
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element dimensions in meters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementSize {
    pub width: f64,
    pub height: f64,
    /// Run along the ridge; only meaningful for ridge skylights
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub length: Option<f64>,
}

impl ElementSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            length: None,
        }
    }

    pub fn with_length(width: f64, height: f64, length: f64) -> Self {
        Self {
            width,
            height,
            length: Some(length),
        }
    }
}

/// Kinds of element attached to a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FacadeElementKind {
    Window,
    Door,
    SectionalDoor,
    WindowedSectionalDoor,
    LightBand,
}

impl FacadeElementKind {
    pub const ALL: [FacadeElementKind; 5] = [
        FacadeElementKind::Window,
        FacadeElementKind::Door,
        FacadeElementKind::SectionalDoor,
        FacadeElementKind::WindowedSectionalDoor,
        FacadeElementKind::LightBand,
    ];

    /// Doors always stand on the ground; their stored elevation is ignored
    #[inline]
    pub fn is_ground_anchored(self) -> bool {
        matches!(
            self,
            FacadeElementKind::Door
                | FacadeElementKind::SectionalDoor
                | FacadeElementKind::WindowedSectionalDoor
        )
    }

    /// Size given to a freshly created element on a wall of `span` meters
    pub fn default_size(self, span: f64) -> ElementSize {
        match self {
            FacadeElementKind::Window => ElementSize::new(1.2, 1.2),
            FacadeElementKind::Door => ElementSize::new(0.9, 2.1),
            FacadeElementKind::SectionalDoor | FacadeElementKind::WindowedSectionalDoor => {
                ElementSize::new(3.0, 3.0)
            }
            FacadeElementKind::LightBand => {
                ElementSize::new((span * 0.8).min(8.0).max(MIN_ELEMENT_SIZE), 0.6)
            }
        }
    }

    pub fn max_width(self) -> f64 {
        match self {
            FacadeElementKind::LightBand => 35.0,
            _ => 5.0,
        }
    }

    pub fn max_height(self) -> f64 {
        match self {
            FacadeElementKind::SectionalDoor | FacadeElementKind::WindowedSectionalDoor => 5.0,
            _ => 3.0,
        }
    }

    /// Clamp a size into the editor limits for this kind
    pub fn clamp_size(self, size: ElementSize) -> ElementSize {
        ElementSize {
            width: size.width.clamp(MIN_ELEMENT_SIZE, self.max_width()),
            height: size.height.clamp(MIN_ELEMENT_SIZE, self.max_height()),
            length: size.length,
        }
    }

    /// Centre elevation for a new element of height `element_height`.
    ///
    /// Windows get a 1 m sill, light bands sit 0.5 m below the top of the
    /// wall, doors stand on the ground.
    pub fn default_elevation(self, element_height: f64, wall_height: f64) -> f64 {
        match self {
            FacadeElementKind::Window => 1.0 + element_height / 2.0,
            FacadeElementKind::LightBand => wall_height - 0.5 - element_height / 2.0,
            _ => element_height / 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FacadeElementKind::Window => "window",
            FacadeElementKind::Door => "door",
            FacadeElementKind::SectionalDoor => "sectionalDoor",
            FacadeElementKind::WindowedSectionalDoor => "windowedSectionalDoor",
            FacadeElementKind::LightBand => "lightBand",
        }
    }
}

impl fmt::Display for FacadeElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacadeElementKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FacadeElementKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownElementKind(s.to_string()))
    }
}

/// Kinds of element attached to the roof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum RoofElementKind {
    RoofWindow,
    RidgeSkylight,
}

impl RoofElementKind {
    pub const ALL: [RoofElementKind; 2] = [RoofElementKind::RoofWindow, RoofElementKind::RidgeSkylight];

    /// Size given to a freshly created roof element.
    ///
    /// Ridge skylights run 12 m shorter than the hall, but at least 3 m.
    pub fn default_size(self, dims: &HallDimensions) -> ElementSize {
        match self {
            RoofElementKind::RoofWindow => ElementSize::new(1.3, 0.08),
            RoofElementKind::RidgeSkylight => {
                ElementSize::with_length(1.0, 0.4, (dims.length - 12.0).max(3.0))
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoofElementKind::RoofWindow => "roofWindow",
            RoofElementKind::RidgeSkylight => "ridgeSkylight",
        }
    }
}

impl fmt::Display for RoofElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoofElementKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RoofElementKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownElementKind(s.to_string()))
    }
}

/// Door, window or light band attached to one wall
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FacadeElement {
    pub id: ElementId,
    pub kind: FacadeElementKind,
    pub wall: Wall,
    /// Centre offset along the wall span (0 = wall centre)
    pub offset: f64,
    /// Centre height above ground; ignored for ground-anchored kinds
    pub elevation: f64,
    pub size: ElementSize,
}

impl FacadeElement {
    /// Element centred on the wall, resting on the ground
    pub fn new(id: impl Into<ElementId>, kind: FacadeElementKind, wall: Wall, size: ElementSize) -> Self {
        Self {
            id: id.into(),
            kind,
            wall,
            offset: 0.0,
            elevation: size.height / 2.0,
            size,
        }
    }

    /// Builder-style local position
    pub fn at(mut self, offset: f64, elevation: f64) -> Self {
        self.offset = offset;
        self.elevation = elevation;
        self
    }
}

/// Roof window or ridge skylight
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoofElement {
    pub id: ElementId,
    pub kind: RoofElementKind,
    /// Position along the hall length
    pub x: f64,
    /// Position across the hall width (ridge at 0)
    pub z: f64,
    pub size: ElementSize,
}

impl RoofElement {
    pub fn new(id: impl Into<ElementId>, kind: RoofElementKind, size: ElementSize) -> Self {
        Self {
            id: id.into(),
            kind,
            x: 0.0,
            z: 0.0,
            size,
        }
    }

    pub fn at(mut self, x: f64, z: f64) -> Self {
        self.x = x;
        self.z = z;
        self
    }

    /// Plan extent as `(along x, along z)`.
    ///
    /// Ridge skylights run along the ridge, so their `length` is the x extent.
    pub fn footprint(&self) -> (f64, f64) {
        match self.kind {
            RoofElementKind::RoofWindow => (self.size.width, self.size.width),
            RoofElementKind::RidgeSkylight => {
                (self.size.length.unwrap_or(self.size.width), self.size.width)
            }
        }
    }
}

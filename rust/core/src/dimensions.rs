// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hall dimensions and roof type
//!
//! The four scalar dimensions plus the roof type are the only inputs the
//! envelope geometry is derived from. Everything else (ridge height, slope
//! angle, wall outlines) is recomputed from a `HallDimensions` value.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Roof shape of the hall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RoofType {
    Flat,
    Gable,
    Monopitch,
}

impl RoofType {
    pub const ALL: [RoofType; 3] = [RoofType::Flat, RoofType::Gable, RoofType::Monopitch];

    /// Maximum roof pitch in percent accepted by the editors.
    ///
    /// Keeps slope angles well away from vertical.
    #[inline]
    pub fn max_pitch(self) -> f64 {
        match self {
            RoofType::Flat | RoofType::Gable => 45.0,
            RoofType::Monopitch => 30.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoofType::Flat => "flat",
            RoofType::Gable => "gable",
            RoofType::Monopitch => "monopitch",
        }
    }
}

impl fmt::Display for RoofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoofType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(RoofType::Flat),
            "gable" | "saddle" => Ok(RoofType::Gable),
            "monopitch" | "mono" | "shed" => Ok(RoofType::Monopitch),
            other => Err(Error::UnknownRoofType(other.to_string())),
        }
    }
}

/// Overall hall dimensions in meters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HallDimensions {
    /// Extent along world X (North/South walls span this)
    pub length: f64,
    /// Extent along world Z (East/West walls span this)
    pub width: f64,
    /// Eave height (top of the walls at the low edge)
    pub height: f64,
    pub roof_type: RoofType,
    /// Rise over run in percent
    pub roof_pitch: f64,
}

impl Default for HallDimensions {
    fn default() -> Self {
        Self {
            length: 20.0,
            width: 15.0,
            height: 6.0,
            roof_type: RoofType::Gable,
            roof_pitch: 20.0,
        }
    }
}

impl HallDimensions {
    /// Create dimensions without validation
    pub fn new(length: f64, width: f64, height: f64, roof_type: RoofType, roof_pitch: f64) -> Self {
        Self {
            length,
            width,
            height,
            roof_type,
            roof_pitch,
        }
    }

    /// Flat-roofed hall of the given size
    pub fn flat(length: f64, width: f64, height: f64) -> Self {
        Self::new(length, width, height, RoofType::Flat, 0.0)
    }

    /// Copy with a different roof type, keeping the pitch
    pub fn with_roof(self, roof_type: RoofType, roof_pitch: f64) -> Self {
        Self {
            roof_type,
            roof_pitch,
            ..self
        }
    }

    /// Rise of the roof above the eave.
    ///
    /// The pitch is applied over the full width for both sloped roof types;
    /// flat roofs always have zero rise.
    #[inline]
    pub fn roof_height(&self) -> f64 {
        match self.roof_type {
            RoofType::Flat => 0.0,
            RoofType::Gable | RoofType::Monopitch => self.width * self.roof_pitch / 100.0,
        }
    }

    /// Highest point of the envelope
    #[inline]
    pub fn total_height(&self) -> f64 {
        self.height + self.roof_height()
    }

    /// Whether any dimension would produce undefined geometry
    pub fn is_degenerate(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        !(positive(self.length)
            && positive(self.width)
            && positive(self.height)
            && self.roof_pitch.is_finite()
            && self.roof_pitch >= 0.0)
    }

    /// Validate against the editor input bounds
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidDimension { field, value });
            }
        }

        let max = self.roof_type.max_pitch();
        if !self.roof_pitch.is_finite() || self.roof_pitch < 0.0 || self.roof_pitch > max {
            return Err(Error::PitchOutOfRange {
                roof_type: self.roof_type,
                pitch: self.roof_pitch,
                max,
            });
        }

        Ok(())
    }
}

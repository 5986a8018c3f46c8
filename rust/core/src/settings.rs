// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Envelope settings, optionally loaded from environment variables.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable envelope parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct EnvelopeSettings {
    /// Thickness of the extruded wall solids in meters.
    pub wall_thickness: f64,
    /// Thickness of the roof panels in meters.
    pub roof_thickness: f64,
    /// Gap kept between a new element and its neighbour in meters.
    pub placement_margin: f64,
    /// Padding subtracted from an editor container before fitting the canvas, in pixels.
    pub editor_padding: f64,
}

impl Default for EnvelopeSettings {
    fn default() -> Self {
        Self {
            wall_thickness: 0.15,
            roof_thickness: 0.15,
            placement_margin: 0.5,
            editor_padding: 40.0,
        }
    }
}

impl EnvelopeSettings {
    /// Load settings from environment variables.
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            wall_thickness: env_f64("HALL_WALL_THICKNESS").unwrap_or(defaults.wall_thickness),
            roof_thickness: env_f64("HALL_ROOF_THICKNESS").unwrap_or(defaults.roof_thickness),
            placement_margin: env_f64("HALL_PLACEMENT_MARGIN")
                .unwrap_or(defaults.placement_margin),
            editor_padding: env_f64("HALL_EDITOR_PADDING").unwrap_or(defaults.editor_padding),
        }
    }

    /// Reject values that would produce inside-out solids.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("wall_thickness", self.wall_thickness),
            ("roof_thickness", self.roof_thickness),
        ];
        for (key, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidSetting {
                    key,
                    value: value.to_string(),
                });
            }
        }

        let non_negative = [
            ("placement_margin", self.placement_margin),
            ("editor_padding", self.editor_padding),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidSetting {
                    key,
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = EnvelopeSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.wall_thickness, 0.15);
    }

    #[test]
    fn test_validate_rejects_zero_thickness() {
        let settings = EnvelopeSettings {
            wall_thickness: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSetting { key: "wall_thickness", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_margin() {
        let settings = EnvelopeSettings {
            placement_margin: -1.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    // The only test in the workspace that touches these variables
    #[test]
    fn test_from_env_parses_and_falls_back() {
        std::env::set_var("HALL_WALL_THICKNESS", " 0.3 ");
        std::env::set_var("HALL_ROOF_THICKNESS", "thick");
        std::env::set_var("HALL_PLACEMENT_MARGIN", "inf");
        std::env::remove_var("HALL_EDITOR_PADDING");

        let settings = EnvelopeSettings::from_env();
        assert_eq!(settings.wall_thickness, 0.3);
        assert_eq!(settings.roof_thickness, 0.15);
        assert_eq!(settings.placement_margin, 0.5);
        assert_eq!(settings.editor_padding, 40.0);

        for key in ["HALL_WALL_THICKNESS", "HALL_ROOF_THICKNESS", "HALL_PLACEMENT_MARGIN"] {
            std::env::remove_var(key);
        }
        assert_eq!(EnvelopeSettings::from_env(), EnvelopeSettings::default());
    }
}

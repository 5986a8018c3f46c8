// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The four vertical faces of the rectangular footprint

use crate::dimensions::HallDimensions;
use crate::error::{Error, Result};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wall of the hall
///
/// North sits at `z = -width/2`, South at `z = +width/2`, East at
/// `x = +length/2`, West at `x = -length/2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Wall {
    North,
    South,
    East,
    West,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::North, Wall::South, Wall::East, Wall::West];

    /// North and South run along the hall length
    #[inline]
    pub fn is_length_wall(self) -> bool {
        matches!(self, Wall::North | Wall::South)
    }

    /// Horizontal extent of the wall
    #[inline]
    pub fn span(self, dims: &HallDimensions) -> f64 {
        if self.is_length_wall() {
            dims.length
        } else {
            dims.width
        }
    }

    /// Distance from the hall centre to the wall line
    #[inline]
    pub fn half_depth(self, dims: &HallDimensions) -> f64 {
        if self.is_length_wall() {
            dims.width / 2.0
        } else {
            dims.length / 2.0
        }
    }

    /// Fixed yaw (rotation about +Y) that makes an attached element face outward
    #[inline]
    pub fn outward_yaw(self) -> f64 {
        match self {
            Wall::North => PI,
            Wall::South => 0.0,
            Wall::East => -FRAC_PI_2,
            Wall::West => FRAC_PI_2,
        }
    }

    /// Sign of the outward normal along its axis (Z for North/South, X for East/West)
    #[inline]
    pub fn outward_sign(self) -> f64 {
        match self {
            Wall::North | Wall::West => -1.0,
            Wall::South | Wall::East => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Wall::North => "North",
            Wall::South => "South",
            Wall::East => "East",
            Wall::West => "West",
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Wall {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Wall::North),
            "south" | "s" => Ok(Wall::South),
            "east" | "e" => Ok(Wall::East),
            "west" | "w" => Ok(Wall::West),
            other => Err(Error::UnknownWall(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans() {
        let dims = HallDimensions::flat(30.0, 12.0, 6.0);
        assert_eq!(Wall::North.span(&dims), 30.0);
        assert_eq!(Wall::South.span(&dims), 30.0);
        assert_eq!(Wall::East.span(&dims), 12.0);
        assert_eq!(Wall::West.span(&dims), 12.0);
        assert_eq!(Wall::North.half_depth(&dims), 6.0);
        assert_eq!(Wall::East.half_depth(&dims), 15.0);
    }

    #[test]
    fn test_outward_yaw() {
        assert_eq!(Wall::North.outward_yaw(), PI);
        assert_eq!(Wall::South.outward_yaw(), 0.0);
        assert_eq!(Wall::East.outward_yaw(), -FRAC_PI_2);
        assert_eq!(Wall::West.outward_yaw(), FRAC_PI_2);
    }

    #[test]
    fn test_parse_round_trip() {
        for wall in Wall::ALL {
            assert_eq!(wall.to_string().parse::<Wall>().unwrap(), wall);
        }
        assert_eq!("e".parse::<Wall>().unwrap(), Wall::East);
        assert!("up".parse::<Wall>().is_err());
    }
}

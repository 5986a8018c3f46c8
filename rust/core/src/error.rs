// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the envelope data model.

/// Result type alias for data model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing or validating envelope inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A length, width or height is non-positive or not finite.
    #[error("invalid {field}: {value} (must be a positive, finite number)")]
    InvalidDimension { field: &'static str, value: f64 },

    /// Roof pitch is negative, not finite, or above the cap for its roof type.
    #[error("roof pitch {pitch}% out of range for {roof_type} roof (0..={max}%)")]
    PitchOutOfRange {
        roof_type: crate::RoofType,
        pitch: f64,
        max: f64,
    },

    #[error("unknown roof type: {0}")]
    UnknownRoofType(String),

    #[error("unknown wall: {0}")]
    UnknownWall(String),

    #[error("unknown element kind: {0}")]
    UnknownElementKind(String),

    /// A configuration value could not be accepted.
    #[error("invalid setting {key}: {value}")]
    InvalidSetting { key: &'static str, value: String },
}

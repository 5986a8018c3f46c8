// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the scene pipeline.

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Envelope model error: {0}")]
    Core(#[from] hall_envelope_core::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] hall_envelope_geometry::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

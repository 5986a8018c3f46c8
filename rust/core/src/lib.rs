// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Hall Envelope Core
//!
//! Data model for a parametric industrial hall: the four scalar dimensions
//! and roof type, the walls of the rectangular footprint, and the facade and
//! roof elements attached to them.
//!
//! This crate holds plain values only. Derived geometry (roof slopes, wall
//! outlines, element world poses) lives in `hall-envelope-geometry` and is
//! always recomputed from these inputs.
//!
//! ## Quick Start
//!
//! ```rust
//! use hall_envelope_core::{HallDimensions, RoofType, Wall};
//!
//! let dims = HallDimensions::new(20.0, 15.0, 6.0, RoofType::Gable, 20.0);
//! dims.validate().unwrap();
//!
//! assert_eq!(dims.roof_height(), 3.0);
//! assert_eq!(Wall::East.span(&dims), 15.0);
//! ```
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for all public records

pub mod dimensions;
pub mod element;
pub mod error;
pub mod settings;
pub mod wall;

pub use dimensions::{HallDimensions, RoofType};
pub use element::{
    ElementId, ElementSize, FacadeElement, FacadeElementKind, RoofElement, RoofElementKind,
    MIN_ELEMENT_SIZE,
};
pub use error::{Error, Result};
pub use settings::EnvelopeSettings;
pub use wall::Wall;

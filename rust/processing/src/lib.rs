//! Hall Envelope Processing
//!
//! Turns an [`EnvelopeSnapshot`] (dimensions plus placed elements) into an
//! [`EnvelopeScene`]: wall outlines with their world placement, roof
//! panels, element poses and building statistics. Wall solids with
//! openings cut out are produced on demand by [`build_wall_meshes`].
//!
//! ```rust
//! use hall_envelope_core::{EnvelopeSettings, HallDimensions};
//! use hall_envelope_processing::{build_scene, EnvelopeSnapshot};
//!
//! let snapshot = EnvelopeSnapshot::new(HallDimensions::flat(30.0, 12.0, 6.0));
//! let scene = build_scene(&snapshot, &EnvelopeSettings::default());
//! assert_eq!(scene.walls.len(), 4);
//! assert_eq!(scene.stats.roof_area, 360.0);
//! ```

pub mod error;
pub mod pipeline;
pub mod stats;
pub mod types;

pub use error::{Error, Result};
pub use pipeline::{build_scene, build_wall_meshes, process_snapshot_json};
pub use stats::{calculate_stats, BuildingStats, ElementCounts};
pub use types::{EnvelopeScene, EnvelopeSnapshot, PlacedElement, RoofPanelData, WallData, WallMesh};

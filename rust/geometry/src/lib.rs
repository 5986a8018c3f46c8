//! Hall Envelope Geometry
//!
//! Parametric envelope geometry for a rectangular hall, using earcutr
//! triangulation and nalgebra for transformations.
//!
//! - [`roof`]: roof shape derived from the dimensions, plus roof panels
//! - [`outline`]: wall outlines and their world placement
//! - [`attachment`]: world poses of facade and roof elements
//! - [`editor`]: 2D editor canvas mapping, hit testing and dragging
//! - [`placement`]: positions for newly created elements
//!
//! Every function is pure over its inputs; nothing here holds state between
//! calls.
//!
//! ```rust
//! use hall_envelope_core::{HallDimensions, RoofElement, RoofElementKind, ElementSize, RoofType};
//! use hall_envelope_geometry::{derive_roof_geometry, transform_roof_element};
//!
//! let dims = HallDimensions::new(20.0, 10.0, 5.0, RoofType::Gable, 20.0);
//! assert_eq!(derive_roof_geometry(&dims).ridge_line_height(), Some(7.0));
//!
//! let window = RoofElement::new("r1", RoofElementKind::RoofWindow, ElementSize::new(1.3, 0.08))
//!     .at(0.0, -2.0);
//! let pose = transform_roof_element(&window, &dims).unwrap();
//! assert!(pose.rotation.x < 0.0);
//! ```

pub mod attachment;
pub mod editor;
pub mod error;
pub mod extrusion;
pub mod mesh;
pub mod outline;
pub mod placement;
pub mod profile;
pub mod roof;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};

pub use attachment::{
    clamp_centered, facade_bounds, roof_bounds, transform_facade_element, transform_roof_element,
    LocalBounds, Pose, FACADE_CLEARANCE, ROOF_CLEARANCE,
};
pub use editor::{fit_canvas, CanvasSize, Dragged, FacadeCanvas, PixelRect, RoofCanvas};
pub use error::{Error, Result};
pub use extrusion::extrude_profile;
pub use mesh::Mesh;
pub use outline::{wall_clear_height, wall_outline, wall_placement, Opening, WallOutline};
pub use placement::{
    place_new_element, plan_facade_element, plan_roof_element, OccupiedSpan, Placement,
    PlacementStrategy, Planned,
};
pub use profile::{Profile2D, Triangulation};
pub use roof::{derive_roof_geometry, roof_panels, RoofGeometry, RoofPanel, RoofPanelKind};

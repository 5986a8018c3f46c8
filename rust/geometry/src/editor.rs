// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Editor coordinate mapping
//!
//! Two 2D editors project the envelope onto a pixel canvas with the origin
//! at the top-left corner:
//!
//! - [`FacadeCanvas`] shows one wall, local `(offset, elevation)`, Y inverted.
//! - [`RoofCanvas`] shows the roof footprint, local `(x, z)`, north at the top.
//!
//! `to_local` is the exact inverse of `to_canvas`. Committed positions are
//! always clamped to the element bounds, and roof heights are re-derived
//! from the roof shape instead of being read back from the canvas.

use crate::attachment::{
    facade_bounds, roof_bounds, transform_facade_element, transform_roof_element, Pose,
};
use crate::outline::wall_clear_height;
use crate::roof::{derive_roof_geometry, RoofGeometry};
use hall_envelope_core::{EnvelopeSettings, FacadeElement, HallDimensions, RoofElement, Wall};
use nalgebra::{Point2, Vector2};

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Largest canvas that fits `container` minus `padding` while keeping the
/// `span_w : span_h` aspect ratio
pub fn fit_canvas(container: CanvasSize, span_w: f64, span_h: f64, padding: f64) -> Option<CanvasSize> {
    let available = CanvasSize::new(container.width - padding, container.height - padding);
    if !available.is_drawable() || !(span_w > 0.0 && span_h > 0.0) {
        return None;
    }

    let scale = (available.width / span_w).min(available.height / span_h);
    Some(CanvasSize::new(span_w * scale, span_h * scale))
}

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl PixelRect {
    fn around(center: Point2<f64>, width: f64, height: f64) -> Self {
        let half = Vector2::new(width / 2.0, height / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Point2<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Point2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Result of one drag step: the element with its new local position and
/// the pose derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct Dragged<E> {
    pub element: E,
    pub pose: Pose,
}

/// Facade editor for one wall
#[derive(Debug, Clone, Copy)]
pub struct FacadeCanvas {
    wall: Wall,
    dims: HallDimensions,
    canvas: CanvasSize,
    span: Vector2<f64>,
    wall_thickness: f64,
}

impl FacadeCanvas {
    /// Editor for `wall`. The vertical span is the wall's clear height.
    ///
    /// Returns `None` for degenerate dimensions or an empty canvas.
    pub fn new(
        wall: Wall,
        dims: HallDimensions,
        canvas: CanvasSize,
        wall_thickness: f64,
    ) -> Option<Self> {
        if !canvas.is_drawable() {
            return None;
        }
        let clear = wall_clear_height(wall, &derive_roof_geometry(&dims))?;
        Some(Self {
            wall,
            dims,
            canvas,
            span: Vector2::new(wall.span(&dims), clear),
            wall_thickness,
        })
    }

    /// Editor fitted into `container` with the configured padding and wall
    /// thickness, see [`fit_canvas`]
    pub fn fitted(
        wall: Wall,
        dims: HallDimensions,
        container: CanvasSize,
        settings: &EnvelopeSettings,
    ) -> Option<Self> {
        let clear = wall_clear_height(wall, &derive_roof_geometry(&dims))?;
        let canvas = fit_canvas(container, wall.span(&dims), clear, settings.editor_padding)?;
        Self::new(wall, dims, canvas, settings.wall_thickness)
    }

    pub fn wall(&self) -> Wall {
        self.wall
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// `(span along the wall, clear height)` in meters
    pub fn span(&self) -> Vector2<f64> {
        self.span
    }

    /// Pixels per meter
    pub fn scale(&self) -> Vector2<f64> {
        Vector2::new(self.canvas.width / self.span.x, self.canvas.height / self.span.y)
    }

    // Shifts the centred vertical frame so local y equals the elevation
    #[inline]
    fn ground_offset(&self) -> f64 {
        self.span.y / 2.0
    }

    pub fn to_canvas(&self, local: Point2<f64>) -> Point2<f64> {
        let scale = self.scale();
        Point2::new(
            (local.x + self.span.x / 2.0) * scale.x,
            self.canvas.height - ((local.y - self.ground_offset()) + self.span.y / 2.0) * scale.y,
        )
    }

    /// Exact inverse of [`Self::to_canvas`], without clamping
    pub fn to_local(&self, pixel: Point2<f64>) -> Point2<f64> {
        let scale = self.scale();
        Point2::new(
            pixel.x / scale.x - self.span.x / 2.0,
            (self.canvas.height - pixel.y) / scale.y - self.span.y / 2.0 + self.ground_offset(),
        )
    }

    /// Inverse mapping clamped to the bounds of `element`
    pub fn to_local_clamped(&self, pixel: Point2<f64>, element: &FacadeElement) -> Point2<f64> {
        let local = self.to_local(pixel);
        match facade_bounds(element.kind, element.size, self.wall, &self.dims) {
            Some(bounds) => bounds.clamp(local),
            None => local,
        }
    }

    /// Pixel rectangle of an element as drawn, using its clamped position
    pub fn element_rect(&self, element: &FacadeElement) -> Option<PixelRect> {
        let bounds = facade_bounds(element.kind, element.size, self.wall, &self.dims)?;
        let local = bounds.clamp(Point2::new(element.offset, element.elevation));
        let scale = self.scale();
        Some(PixelRect::around(
            self.to_canvas(local),
            element.size.width * scale.x,
            element.size.height * scale.y,
        ))
    }

    /// Topmost element on this wall under `pixel` (later elements draw on top)
    pub fn hit_test<'a>(
        &self,
        pixel: Point2<f64>,
        elements: &'a [FacadeElement],
    ) -> Option<&'a FacadeElement> {
        elements
            .iter()
            .rev()
            .filter(|e| e.wall == self.wall)
            .find(|e| self.element_rect(e).is_some_and(|r| r.contains(pixel)))
    }

    /// Move `element` so its centre follows `pixel`.
    ///
    /// The element is re-attached to this editor's wall.
    pub fn drag_to(&self, element: &FacadeElement, pixel: Point2<f64>) -> Option<Dragged<FacadeElement>> {
        let mut moved = element.clone();
        moved.wall = self.wall;
        let local = self.to_local_clamped(pixel, &moved);
        moved.offset = local.x;
        moved.elevation = local.y;

        let pose = transform_facade_element(&moved, &self.dims, self.wall_thickness)?;
        Some(Dragged { element: moved, pose })
    }
}

/// Roof editor over the hall footprint
#[derive(Debug, Clone, Copy)]
pub struct RoofCanvas {
    dims: HallDimensions,
    roof: RoofGeometry,
    canvas: CanvasSize,
}

impl RoofCanvas {
    /// Returns `None` for degenerate dimensions or an empty canvas
    pub fn new(dims: HallDimensions, canvas: CanvasSize) -> Option<Self> {
        let roof = derive_roof_geometry(&dims);
        if roof.is_degenerate() || !canvas.is_drawable() {
            return None;
        }
        Some(Self { dims, roof, canvas })
    }

    /// Editor fitted into `container` with the configured padding
    pub fn fitted(dims: HallDimensions, container: CanvasSize, settings: &EnvelopeSettings) -> Option<Self> {
        let canvas = fit_canvas(container, dims.length, dims.width, settings.editor_padding)?;
        Self::new(dims, canvas)
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn roof(&self) -> &RoofGeometry {
        &self.roof
    }

    /// `(length, width)` in meters
    pub fn span(&self) -> Vector2<f64> {
        Vector2::new(self.dims.length, self.dims.width)
    }

    /// Pixels per meter
    pub fn scale(&self) -> Vector2<f64> {
        Vector2::new(
            self.canvas.width / self.dims.length,
            self.canvas.height / self.dims.width,
        )
    }

    /// Map plan position `(x, z)` to pixels
    pub fn to_canvas(&self, local: Point2<f64>) -> Point2<f64> {
        let scale = self.scale();
        let (x, z) = (local.x, local.y);
        let mid = self.canvas.height / 2.0;

        let py = match self.roof {
            // Top half is the front slope, measured from the ridge
            RoofGeometry::Gable { .. } => {
                if z < 0.0 {
                    mid - (-z) * scale.y
                } else {
                    mid + z * scale.y
                }
            }
            _ => (z + self.dims.width / 2.0) * scale.y,
        };

        Point2::new((x + self.dims.length / 2.0) * scale.x, py)
    }

    /// Exact inverse of [`Self::to_canvas`], without clamping
    pub fn to_local(&self, pixel: Point2<f64>) -> Point2<f64> {
        let scale = self.scale();
        let mid = self.canvas.height / 2.0;

        let z = match self.roof {
            RoofGeometry::Gable { .. } => {
                if pixel.y < mid {
                    -(mid - pixel.y) / scale.y
                } else {
                    (pixel.y - mid) / scale.y
                }
            }
            _ => pixel.y / scale.y - self.dims.width / 2.0,
        };

        Point2::new(pixel.x / scale.x - self.dims.length / 2.0, z)
    }

    /// Inverse mapping clamped to the footprint bounds of `element`
    pub fn to_local_clamped(&self, pixel: Point2<f64>, element: &RoofElement) -> Point2<f64> {
        let local = self.to_local(pixel);
        match roof_bounds(element, &self.dims) {
            Some(bounds) => bounds.clamp(local),
            None => local,
        }
    }

    /// Pixel rectangle of an element's footprint, using its clamped position
    pub fn element_rect(&self, element: &RoofElement) -> Option<PixelRect> {
        let bounds = roof_bounds(element, &self.dims)?;
        let local = bounds.clamp(Point2::new(element.x, element.z));
        let (along_x, along_z) = element.footprint();
        let scale = self.scale();
        Some(PixelRect::around(
            self.to_canvas(local),
            along_x * scale.x,
            along_z * scale.y,
        ))
    }

    /// Topmost roof element under `pixel`
    pub fn hit_test<'a>(&self, pixel: Point2<f64>, elements: &'a [RoofElement]) -> Option<&'a RoofElement> {
        elements
            .iter()
            .rev()
            .find(|e| self.element_rect(e).is_some_and(|r| r.contains(pixel)))
    }

    /// Move `element` so its centre follows `pixel`; the height is re-derived
    /// from the roof under the new position
    pub fn drag_to(&self, element: &RoofElement, pixel: Point2<f64>) -> Option<Dragged<RoofElement>> {
        let local = self.to_local_clamped(pixel, element);
        let moved = element.clone().at(local.x, local.y);
        let pose = transform_roof_element(&moved, &self.dims)?;
        Some(Dragged { element: moved, pose })
    }
}

//! The drawing surface abstraction.
//!
//! A [`Layer`] is one rendering target. Figures are described through
//! its primitive operations; [`Layer::render`] serializes the collected
//! fragments into a document. Two kinds of primitives exist:
//!
//! - *edge commands* (line, polyline, edge) paint first, in the z-index
//!   0 bucket by default;
//! - *shape commands* (text, rectangle, circle, polygon, shape, picture)
//!   paint after them, in the z-index 1 bucket by default, so their
//!   fills sit over connecting lines.
//!
//! Either default can be overridden per call with
//! [`Style::with_z_index`].
//!
//! [`MultiLayer`] broadcasts one figure description to several owned
//! layers at once, which is how a figure is emitted as SVG and TikZ in a
//! single pass.

use std::io::Write;
use std::path::Path as FilePath;

use indexmap::IndexMap;

use vellum_core::draw::{Label, SHAPE_Z_INDEX};
use vellum_core::geometry::{Point, Rect, Waypoint};
use vellum_core::style::Style;

use crate::error::VellumError;

/// Document-level options for [`Layer::render`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Clip the output to the requested rectangle. On by default; draw
    /// order is unaffected either way.
    pub clip: bool,
    /// Align the TikZ baseline with the picture center.
    pub center: bool,
    /// Verbatim backend options for the document environment.
    pub extra: IndexMap<String, Option<String>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            clip: true,
            center: false,
            extra: IndexMap::new(),
        }
    }
}

/// A rendering target for figure primitives.
///
/// All coordinates are in figure space; the layer applies its configured
/// transform (and, for SVG, a device transform) when emitting.
pub trait Layer {
    /// Draw a straight line between two points (edge command).
    fn line(
        &mut self,
        p1: Point,
        p2: Point,
        labels: &[Label],
        style: Style,
    ) -> Result<(), VellumError>;

    /// Draw line segments from one point to the next (edge command).
    ///
    /// With `closed`, a final segment returns to the first point *and*
    /// that wrap-around counts as a corner: a rounded closed polyline
    /// rounds it like any other. Appending the first point manually does
    /// not.
    fn polyline(
        &mut self,
        points: &[Point],
        labels: &[Label],
        closed: bool,
        style: Style,
    ) -> Result<(), VellumError>;

    /// Draw a closed polyline painted with the shapes (shape command).
    fn polygon(
        &mut self,
        points: &[Point],
        labels: &[Label],
        style: Style,
    ) -> Result<(), VellumError> {
        self.polyline(points, labels, true, shape_default(style))
    }

    /// Draw a smooth curve through the waypoints (edge command).
    ///
    /// Waypoints may pin the tangent angle the curve passes through them
    /// with; see [`Waypoint::with_angle`].
    fn edge(
        &mut self,
        points: &[Waypoint],
        labels: &[Label],
        closed: bool,
        style: Style,
    ) -> Result<(), VellumError>;

    /// Draw a closed curve painted with the shapes (shape command).
    fn shape(
        &mut self,
        points: &[Waypoint],
        labels: &[Label],
        style: Style,
    ) -> Result<(), VellumError> {
        self.edge(points, labels, true, shape_default(style))
    }

    /// Draw a circle around a center point (shape command).
    ///
    /// The circle is subject to the transform: under uneven scaling it
    /// becomes an ellipse.
    fn circle(
        &mut self,
        center: Point,
        radius: f64,
        labels: &[Label],
        style: Style,
    ) -> Result<(), VellumError>;

    /// Draw an axis-aligned rectangle between two corners (shape
    /// command). The emitted outline is subject to the transform, so a
    /// rotated figure rotates its rectangles too.
    fn rectangle(&mut self, p1: Point, p2: Point, style: Style) -> Result<(), VellumError>;

    /// Place text at a point (shape command).
    ///
    /// Only the position is transformed; the text itself stays
    /// horizontal and unstretched.
    fn text(&mut self, point: Point, text: &str, style: Style) -> Result<(), VellumError>;

    /// Place a raster image centered on a point (shape command). Only
    /// the position is transformed.
    fn picture(
        &mut self,
        point: Point,
        image: &FilePath,
        width: f64,
        height: f64,
        style: Style,
    ) -> Result<(), VellumError>;

    /// Serialize the collected figure into `out`.
    ///
    /// `rect` bounds the visible area (its transformed corners define
    /// the viewport). With `preamble`, a standalone document is written;
    /// otherwise a fragment suitable for embedding.
    fn render(
        &mut self,
        rect: Rect,
        out: &mut dyn Write,
        options: &RenderOptions,
        preamble: bool,
    ) -> Result<(), VellumError>;
}

/// Applies the shape-command paint order unless the caller overrode it.
fn shape_default(style: Style) -> Style {
    if style.z_index().is_none() {
        style.with_z_index(SHAPE_Z_INDEX)
    } else {
        style
    }
}

/// A layer that discards everything drawn on it.
#[derive(Debug, Default)]
pub struct NoLayer;

impl Layer for NoLayer {
    fn line(
        &mut self,
        _p1: Point,
        _p2: Point,
        _labels: &[Label],
        _style: Style,
    ) -> Result<(), VellumError> {
        Ok(())
    }

    fn polyline(
        &mut self,
        _points: &[Point],
        _labels: &[Label],
        _closed: bool,
        _style: Style,
    ) -> Result<(), VellumError> {
        Ok(())
    }

    fn edge(
        &mut self,
        _points: &[Waypoint],
        _labels: &[Label],
        _closed: bool,
        _style: Style,
    ) -> Result<(), VellumError> {
        Ok(())
    }

    fn circle(
        &mut self,
        _center: Point,
        _radius: f64,
        _labels: &[Label],
        _style: Style,
    ) -> Result<(), VellumError> {
        Ok(())
    }

    fn rectangle(&mut self, _p1: Point, _p2: Point, _style: Style) -> Result<(), VellumError> {
        Ok(())
    }

    fn text(&mut self, _point: Point, _text: &str, _style: Style) -> Result<(), VellumError> {
        Ok(())
    }

    fn picture(
        &mut self,
        _point: Point,
        _image: &FilePath,
        _width: f64,
        _height: f64,
        _style: Style,
    ) -> Result<(), VellumError> {
        Ok(())
    }

    fn render(
        &mut self,
        _rect: Rect,
        _out: &mut dyn Write,
        _options: &RenderOptions,
        _preamble: bool,
    ) -> Result<(), VellumError> {
        Ok(())
    }
}

/// Several layers driven as one.
///
/// Every primitive is forwarded to each owned layer, so a single figure
/// description lands in all of them. Serialization goes through
/// [`MultiLayer::render_all`], which pairs each layer with its own
/// writer; the single-writer [`Layer::render`] is not available on a
/// `MultiLayer`.
pub struct MultiLayer {
    layers: Vec<Box<dyn Layer>>,
}

impl MultiLayer {
    /// Creates a broadcast layer over the given targets.
    pub fn new(layers: Vec<Box<dyn Layer>>) -> Self {
        Self { layers }
    }

    /// Serializes every owned layer into its paired writer.
    ///
    /// Layers and writers are paired positionally; extra writers are
    /// ignored, missing ones skip their layer.
    pub fn render_all(
        &mut self,
        rect: Rect,
        outs: &mut [&mut dyn Write],
        options: &RenderOptions,
        preamble: bool,
    ) -> Result<(), VellumError> {
        for (layer, out) in self.layers.iter_mut().zip(outs.iter_mut()) {
            layer.render(rect, *out, options, preamble)?;
        }
        Ok(())
    }
}

impl Layer for MultiLayer {
    fn line(
        &mut self,
        p1: Point,
        p2: Point,
        labels: &[Label],
        style: Style,
    ) -> Result<(), VellumError> {
        for layer in &mut self.layers {
            layer.line(p1, p2, labels, style.clone())?;
        }
        Ok(())
    }

    fn polyline(
        &mut self,
        points: &[Point],
        labels: &[Label],
        closed: bool,
        style: Style,
    ) -> Result<(), VellumError> {
        for layer in &mut self.layers {
            layer.polyline(points, labels, closed, style.clone())?;
        }
        Ok(())
    }

    fn edge(
        &mut self,
        points: &[Waypoint],
        labels: &[Label],
        closed: bool,
        style: Style,
    ) -> Result<(), VellumError> {
        for layer in &mut self.layers {
            layer.edge(points, labels, closed, style.clone())?;
        }
        Ok(())
    }

    fn circle(
        &mut self,
        center: Point,
        radius: f64,
        labels: &[Label],
        style: Style,
    ) -> Result<(), VellumError> {
        for layer in &mut self.layers {
            layer.circle(center, radius, labels, style.clone())?;
        }
        Ok(())
    }

    fn rectangle(&mut self, p1: Point, p2: Point, style: Style) -> Result<(), VellumError> {
        for layer in &mut self.layers {
            layer.rectangle(p1, p2, style.clone())?;
        }
        Ok(())
    }

    fn text(&mut self, point: Point, text: &str, style: Style) -> Result<(), VellumError> {
        for layer in &mut self.layers {
            layer.text(point, text, style.clone())?;
        }
        Ok(())
    }

    fn picture(
        &mut self,
        point: Point,
        image: &FilePath,
        width: f64,
        height: f64,
        style: Style,
    ) -> Result<(), VellumError> {
        for layer in &mut self.layers {
            layer.picture(point, image, width, height, style.clone())?;
        }
        Ok(())
    }

    fn render(
        &mut self,
        _rect: Rect,
        _out: &mut dyn Write,
        _options: &RenderOptions,
        _preamble: bool,
    ) -> Result<(), VellumError> {
        Err(VellumError::Unsupported(
            "a MultiLayer renders through render_all, one writer per layer",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nolayer_accepts_everything() {
        let mut layer = NoLayer;
        layer
            .line(
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                &[],
                Style::new(),
            )
            .unwrap();
        layer
            .polyline(
                &[Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
                &[],
                false,
                Style::new(),
            )
            .unwrap();
        let mut out = Vec::new();
        layer
            .render(
                Rect::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
                &mut out,
                &RenderOptions::default(),
                true,
            )
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_multilayer_single_render_is_unsupported() {
        let mut multi = MultiLayer::new(vec![Box::new(NoLayer), Box::new(NoLayer)]);
        let mut out = Vec::new();
        let result = multi.render(
            Rect::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
            &mut out,
            &RenderOptions::default(),
            false,
        );
        assert!(matches!(result, Err(VellumError::Unsupported(_))));
    }
}

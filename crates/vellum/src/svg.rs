//! The SVG rendering target.
//!
//! Figure coordinates pass straight through to SVG user units; a fixed
//! device transform flips the y-axis (figure y grows upwards, SVG y
//! grows downwards) and composes with the caller's transform. Emitted
//! fragments collect in a z-ordered [`LayerStack`] and serialize into
//! one `<svg>` document with a `viewBox` derived from the transformed
//! bounding rectangle.
//!
//! Labels ride on their path via `<textPath>`. When a path runs
//! right-to-left, a hidden reversed companion path (`r-<id>`) is emitted
//! and start/end labels anchor to whichever direction keeps the text
//! reading left-to-right.

mod markers;
mod style;

use std::fs;
use std::io::Write;
use std::path::Path as FilePath;

use base64::Engine as _;
use log::debug;
use svg::node::element::{
    ClipPath, Definitions, Group, Image, Marker, Path as PathElement, Rectangle as SvgRect, Text,
    TextPath,
};
use svg::Document;

use vellum_core::draw::{Label, LayerStack, EDGE_Z_INDEX, SHAPE_Z_INDEX};
use vellum_core::geometry::{Point, Rect, Transform, Waypoint};
use vellum_core::path::{builder, Path, Segment};
use vellum_core::style::{Style, TextPosition};

use crate::config::RenderConfig;
use crate::error::VellumError;
use crate::layer::{Layer, RenderOptions};

/// A boxed SVG document node.
type SvgNode = Box<dyn svg::Node>;

/// Serializes a path into SVG path data (`M`/`L`/`A`/`C`/`Q`), with all
/// coordinates pinned to three decimal places.
pub(crate) fn path_data(path: &Path) -> String {
    use std::fmt::Write as _;

    let mut data = format!("M {}", path.start());
    for segment in path.segments() {
        match *segment {
            Segment::Line { to, .. } => {
                let _ = write!(data, " L {to}");
            }
            Segment::Arc {
                to,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                ..
            } => {
                let _ = write!(
                    data,
                    " A {rx:.3} {ry:.3} {x_axis_rotation:.3} {} {} {to}",
                    large_arc as u8, sweep as u8
                );
            }
            Segment::Cubic {
                to, ctrl1, ctrl2, ..
            } => {
                let _ = write!(data, " C {ctrl1} {ctrl2} {to}");
            }
            Segment::Quadratic { to, ctrl, .. } => {
                let _ = write!(data, " Q {ctrl} {to}");
            }
        }
    }
    data
}

/// The SVG [`Layer`].
#[derive(Debug)]
pub struct SvgLayer {
    transform: Transform,
    device: Transform,
    config: RenderConfig,
    stack: LayerStack<SvgNode>,
    names: u32,
}

impl SvgLayer {
    /// Creates an SVG layer with the identity figure transform and stock
    /// configuration.
    pub fn new() -> Self {
        Self::with_config(Transform::identity(), RenderConfig::new())
    }

    /// Creates an SVG layer with the given figure transform.
    pub fn with_transform(transform: Transform) -> Self {
        Self::with_config(transform, RenderConfig::new())
    }

    /// Creates an SVG layer with an explicit transform and configuration.
    pub fn with_config(transform: Transform, config: RenderConfig) -> Self {
        Self {
            transform,
            device: Transform::scale(1.0, -1.0),
            config,
            stack: LayerStack::new(),
            names: 0,
        }
    }

    /// Returns a fresh document-unique identifier.
    fn new_name(&mut self) -> String {
        self.names += 1;
        self.names.to_string()
    }

    /// The full figure-to-pixel transform.
    fn full_transform(&self) -> Transform {
        self.device * self.transform
    }

    /// The size of one typographic point in device units.
    fn pt(&self) -> f64 {
        style::pt_to_cm(1.0) * self.device.apply(Point::new(1.0, 1.0)).x()
    }

    /// Emits a finished path with its style, markers, and labels.
    fn emit_path(&mut self, path: Path, labels: &[Label], mut style: Style, default_z: i32) {
        let reverse_start = path.is_right_to_left().unwrap_or(false);
        let reverse_end = !path.reversed().is_right_to_left().unwrap_or(true);

        let z = style.take_z_index().unwrap_or(default_z);
        let pt = self.pt();
        let sw = style::stroke_width(&mut style, pt);

        let default_stroke = self.config.draw_color().to_string();
        let mut attrs = style::path_attributes(&mut style, sw, pt, &default_stroke);
        let stroke = attrs
            .get("stroke")
            .cloned()
            .unwrap_or_else(|| default_stroke.clone());

        let default_text = self.config.text_color().to_string();
        let text_attrs = style::text_attributes(&mut style, &default_text);

        let arrow = style.take_arrow();
        for (key, value) in style.drain_extra() {
            attrs.insert(key, value.unwrap_or_default());
        }

        let id = self.new_name();
        let mut group = Group::new();
        for (key, value) in attrs {
            group = group.set(key, value);
        }

        let mut path_element = PathElement::new()
            .set("id", id.clone())
            .set("d", path_data(&path));

        let mut arrow_markers: Vec<Marker> = Vec::new();
        if let Some(spec) = arrow {
            if let Some(marker) = markers::marker_for_tip(spec.end, sw, pt, &stroke) {
                let marker_id = format!("marker_{}", self.new_name());
                path_element = path_element.set("marker-end", format!("url(#{marker_id})"));
                arrow_markers.push(marker.set("id", marker_id));
            }
            if let Some(marker) = markers::marker_for_tip(spec.start, sw, pt, &stroke) {
                let marker_id = format!("marker_{}", self.new_name());
                path_element = path_element.set("marker-start", format!("url(#{marker_id})"));
                arrow_markers.push(marker.set("id", marker_id));
            }
        }

        group = group.add(path_element);
        for marker in arrow_markers {
            group = group.add(marker);
        }
        self.stack.add(z, Box::new(group));

        if reverse_start || reverse_end {
            // Hidden companion running the other way; flipped labels
            // anchor to it.
            let reversed = PathElement::new()
                .set("id", format!("r-{id}"))
                .set("d", path_data(&path.reversed()))
                .set("display", "none");
            self.stack.add(z, Box::new(reversed));
        }

        for label in labels {
            let mut text = Text::new("");
            for (key, value) in &text_attrs {
                text = text.set(key.as_str(), value.as_str());
            }
            if label.position.is_above() {
                text = text.set("dy", "-5");
            } else {
                text = text.set("dy", "5").set("dominant-baseline", "hanging");
            }

            let mut text_path = TextPath::new(label.text.as_str());
            if label.position.is_start() {
                text = text.set("text-anchor", if reverse_start { "end" } else { "start" });
                text_path = text_path
                    .set("startOffset", if reverse_start { "100%" } else { "0%" })
                    .set(
                        "href",
                        if reverse_start {
                            format!("#r-{id}")
                        } else {
                            format!("#{id}")
                        },
                    );
            } else if label.position.is_end() {
                text = text.set("text-anchor", if reverse_end { "start" } else { "end" });
                text_path = text_path
                    .set("startOffset", if reverse_end { "0%" } else { "100%" })
                    .set(
                        "href",
                        if reverse_end {
                            format!("#r-{id}")
                        } else {
                            format!("#{id}")
                        },
                    );
            } else {
                let reversed = if label.position.is_above() {
                    reverse_start
                } else {
                    reverse_end
                };
                text = text.set("text-anchor", "middle");
                text_path = text_path.set("startOffset", "50%").set(
                    "href",
                    if reversed {
                        format!("#r-{id}")
                    } else {
                        format!("#{id}")
                    },
                );
            }

            self.stack.add(z, Box::new(text.add(text_path)));
        }
    }
}

impl Default for SvgLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for SvgLayer {
    fn line(
        &mut self,
        p1: Point,
        p2: Point,
        labels: &[Label],
        style: Style,
    ) -> Result<(), VellumError> {
        let tf = self.full_transform();
        let mut path = Path::new(tf.apply(p1));
        path.line_to(tf.apply(p2));
        self.emit_path(path, labels, style, EDGE_Z_INDEX);
        Ok(())
    }

    fn polyline(
        &mut self,
        points: &[Point],
        labels: &[Label],
        closed: bool,
        style: Style,
    ) -> Result<(), VellumError> {
        let path = builder::polyline(points, closed, style.is_rounded(), &self.full_transform())?;
        self.emit_path(path, labels, style, EDGE_Z_INDEX);
        Ok(())
    }

    fn edge(
        &mut self,
        points: &[Waypoint],
        labels: &[Label],
        closed: bool,
        mut style: Style,
    ) -> Result<(), VellumError> {
        let looseness = style.take_looseness().unwrap_or(1.0);
        let path = builder::curve_through(points, closed, looseness, &self.full_transform())?;
        self.emit_path(path, labels, style, EDGE_Z_INDEX);
        Ok(())
    }

    fn circle(
        &mut self,
        center: Point,
        radius: f64,
        labels: &[Label],
        style: Style,
    ) -> Result<(), VellumError> {
        let tf = self.full_transform();
        let rx = tf
            .apply(center)
            .distance(tf.apply(center + Point::new(radius, 0.0)));
        let ry = tf
            .apply(center)
            .distance(tf.apply(center + Point::new(0.0, radius)));
        let rotation = tf.apply(Point::new(radius, 0.0)).angle().to_degrees();

        let east = tf.apply(center + Point::new(radius, 0.0));
        let west = tf.apply(center - Point::new(radius, 0.0));

        let mut path = Path::new(east);
        path.arc_to(west, rx, ry, rotation, true, true);
        path.arc_to(east, rx, ry, rotation, true, true);
        self.emit_path(path, labels, style, SHAPE_Z_INDEX);
        Ok(())
    }

    fn rectangle(&mut self, p1: Point, p2: Point, style: Style) -> Result<(), VellumError> {
        let r = Rect::new(p1, p2);
        let corners = [r.northwest(), r.northeast(), r.southeast(), r.southwest()];
        let path = builder::polyline(&corners, true, style.is_rounded(), &self.full_transform())?;
        self.emit_path(path, &[], style, SHAPE_Z_INDEX);
        Ok(())
    }

    fn text(&mut self, point: Point, content: &str, mut style: Style) -> Result<(), VellumError> {
        let z = style.take_z_index().unwrap_or(SHAPE_Z_INDEX);
        let position = style.take_position().unwrap_or_default();
        let (x, y, align, valign) = anchors(position);

        let default_text = self.config.text_color().to_string();
        let mut attrs = style::text_attributes(&mut style, &default_text);
        for (key, value) in style.drain_extra() {
            attrs.insert(key, value.unwrap_or_default());
        }

        let mut node = Text::new(content).set("x", x).set("y", y);
        for (key, value) in attrs {
            node = node.set(key, value);
        }
        node = node
            .set("text-anchor", align)
            .set("dominant-baseline", valign)
            .set(
                "transform",
                format!("translate({})", self.full_transform().apply(point)),
            );

        self.stack.add(z, Box::new(node));
        Ok(())
    }

    fn picture(
        &mut self,
        point: Point,
        image: &FilePath,
        width: f64,
        height: f64,
        mut style: Style,
    ) -> Result<(), VellumError> {
        let z = style.take_z_index().unwrap_or(SHAPE_Z_INDEX);

        // Only the position is transformed; the image box itself maps
        // through the device transform alone.
        let frame = Rect::new(
            Point::new(0.0, 0.0),
            self.device.apply(Point::new(width, -height)),
        );
        let bytes = fs::read(image)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        debug!(image = image.display().to_string(), bytes = bytes.len(); "embedding picture");

        let position = self.full_transform().apply(point) - frame.center();
        let node = Image::new()
            .set("width", format!("{:.3}", frame.width()))
            .set("height", format!("{:.3}", frame.height()))
            .set("xlink:href", format!("data:image/png;base64,{encoded}"))
            .set("transform", format!("translate({position})"))
            .set("preserveAspectRatio", "none");

        self.stack.add(z, Box::new(node));
        Ok(())
    }

    fn render(
        &mut self,
        rect: Rect,
        out: &mut dyn Write,
        options: &RenderOptions,
        preamble: bool,
    ) -> Result<(), VellumError> {
        let tf = self.full_transform();
        let corners = [
            tf.apply(rect.northwest()),
            tf.apply(rect.northeast()),
            tf.apply(rect.southeast()),
            tf.apply(rect.southwest()),
        ];
        let viewport = Rect::bounding_box(&corners)?;

        let mut document = Document::new()
            .set("width", format!("{:.3}", viewport.width()))
            .set("height", format!("{:.3}", viewport.height()))
            .set(
                "viewBox",
                format!(
                    "{:.3} {:.3} {:.3} {:.3}",
                    viewport.min().x(),
                    viewport.min().y(),
                    viewport.width(),
                    viewport.height()
                ),
            )
            .set("xmlns:xlink", "http://www.w3.org/1999/xlink");
        for (key, value) in &options.extra {
            document = document.set(key.as_str(), value.clone().unwrap_or_default());
        }

        let layers = std::mem::take(&mut self.stack).into_layers();
        debug!(layers = layers.len(); "serializing SVG document");

        let mut content = Group::new();
        if options.clip {
            let clip_id = format!("clip_{}", self.new_name());
            let clip_rect = SvgRect::new()
                .set("x", format!("{:.3}", viewport.min().x()))
                .set("y", format!("{:.3}", viewport.min().y()))
                .set("width", format!("{:.3}", viewport.width()))
                .set("height", format!("{:.3}", viewport.height()));
            document =
                document.add(Definitions::new().add(ClipPath::new().set("id", clip_id.clone()).add(clip_rect)));
            content = content.set("clip-path", format!("url(#{clip_id})"));
        }

        for (z, fragments) in layers {
            let mut group = Group::new().set("data-layer", z.to_string());
            for node in fragments {
                group = group.add(node);
            }
            content = content.add(group);
        }
        document = document.add(content);

        if preamble {
            writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        }
        svg::write(&mut *out, &document)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Text anchoring offsets and alignment for a placement, mirroring the
/// TikZ node positions.
fn anchors(position: TextPosition) -> (i32, i32, &'static str, &'static str) {
    use TextPosition::*;

    if position == Center {
        return (0, 0, "middle", "central");
    }

    let (x, align) = match position {
        Above | Below => (0, "middle"),
        Left | AboveLeft | BelowLeft => (-5, "end"),
        _ => (5, "start"),
    };
    let (y, valign) = match position {
        Left | Right => (0, "middle"),
        Below | BelowLeft | BelowRight => (5, "hanging"),
        _ => (-5, "text-top"),
    };
    (x, y, align, valign)
}

//! The TikZ rendering target.
//!
//! Every primitive becomes one `\path[options] ...;` (or `\node`)
//! statement collected in a z-ordered [`LayerStack`]; [`Layer::render`]
//! writes them inside a `tikzpicture` environment with a `\clip` derived
//! from the bounding rectangle, optionally wrapped in a standalone
//! document preamble.
//!
//! Curves between waypoints use TikZ's own `to[out=..., in=...]`
//! operator, so the curve tension matches the SVG backend's explicit
//! control points.

mod options;

use std::f64::consts::FRAC_PI_2;
use std::io::Write;
use std::path::Path as FilePath;

use log::debug;

use vellum_core::draw::{Label, LabelPos, LayerStack, EDGE_Z_INDEX, SHAPE_Z_INDEX};
use vellum_core::fmt::sig;
use vellum_core::geometry::{Point, Rect, Transform, Waypoint};
use vellum_core::path::angles::resolve_angles;
use vellum_core::style::Style;

use crate::config::RenderConfig;
use crate::error::VellumError;
use crate::layer::{Layer, RenderOptions};
use options::{escape, OptionList};

/// Angles this close to vertical are treated as neither direction when
/// deciding whether to flip a line's label anchors.
const ALMOST_ZERO: f64 = 0.01;

/// The TikZ [`Layer`].
#[derive(Debug)]
pub struct TikzLayer {
    transform: Transform,
    config: RenderConfig,
    stack: LayerStack<String>,
}

impl TikzLayer {
    /// Creates a TikZ layer with the identity figure transform and stock
    /// configuration.
    pub fn new() -> Self {
        Self::with_config(Transform::identity(), RenderConfig::new())
    }

    /// Creates a TikZ layer with the given figure transform.
    pub fn with_transform(transform: Transform) -> Self {
        Self::with_config(transform, RenderConfig::new())
    }

    /// Creates a TikZ layer with an explicit transform and configuration.
    pub fn with_config(transform: Transform, config: RenderConfig) -> Self {
        Self {
            transform,
            config,
            stack: LayerStack::new(),
        }
    }

    /// Maps a tangent angle through the transform and rounds it to a
    /// tenth of a degree.
    fn convert_angle(&self, degrees: f64) -> f64 {
        let p = self.transform.apply(Point::polar(1.0, degrees.to_radians()));
        let a = p.angle().to_degrees();
        ((a * 10.0 + 0.5) as i64) as f64 / 10.0
    }

    fn default_draw(&self) -> String {
        self.config.draw_color().to_string()
    }

    fn path_style(&self, style: &mut Style) -> Result<OptionList, VellumError> {
        let mut opts = options::style_options(style, &self.default_draw())?;
        opts.extend(style.drain_extra());
        Ok(opts)
    }
}

impl Default for TikzLayer {
    fn default() -> Self {
        Self::new()
    }
}

/// The label node placed at the start/middle/end of an edge statement.
fn label_node(position: LabelPos, text: &str, reverse_start: bool, reverse_end: bool) -> String {
    let text = escape(text);
    match position {
        LabelPos::Above => format!("node [sloped,pos=0.5,above]{{{text}}} "),
        LabelPos::Below => format!("node [sloped,pos=0.5,below]{{{text}}} "),
        LabelPos::AboveStart => format!(
            "node [sloped,pos=0,above {}]{{{text}}} ",
            if reverse_start { "left" } else { "right" }
        ),
        LabelPos::BelowStart => format!(
            "node [sloped,pos=0,below {}]{{{text}}} ",
            if reverse_start { "left" } else { "right" }
        ),
        LabelPos::AboveEnd => format!(
            " node [sloped,pos=1,above {}]{{{text}}}",
            if reverse_end { "right" } else { "left" }
        ),
        LabelPos::BelowEnd => format!(
            " node [sloped,pos=1,below {}]{{{text}}}",
            if reverse_end { "right" } else { "left" }
        ),
    }
}

/// Index of the path element that carries a middle label: the central
/// `--`/`to` operator of the element list.
fn middle_element(len: usize) -> usize {
    let n = (len - 1) / 2;
    2 * (n / 2) + 1
}

impl Layer for TikzLayer {
    fn line(
        &mut self,
        p1: Point,
        p2: Point,
        labels: &[Label],
        mut style: Style,
    ) -> Result<(), VellumError> {
        let z = style.take_z_index().unwrap_or(EDGE_Z_INDEX);
        let (p1, p2) = (self.transform.apply(p1), self.transform.apply(p2));
        let opts = self.path_style(&mut style)?;

        let mut statement = format!("\\path[{opts}] ({p1}) -- ({p2})");

        let chord = (p2 - p1).angle().abs();
        // Near-vertical lines read the same either way; skip the flip.
        let reverse = if (chord - FRAC_PI_2).abs() < ALMOST_ZERO {
            false
        } else {
            chord > FRAC_PI_2
        };

        for label in labels {
            let node = match label.position {
                LabelPos::Above => " node [sloped,pos=0.5,above]".to_string(),
                LabelPos::Below => " node [sloped,pos=0.5,below]".to_string(),
                LabelPos::AboveStart => format!(
                    " node [sloped,pos=0,above {}]",
                    if reverse { "left" } else { "right" }
                ),
                LabelPos::BelowStart => format!(
                    " node [sloped,pos=0,below {}]",
                    if reverse { "left" } else { "right" }
                ),
                LabelPos::AboveEnd => format!(
                    " node [sloped,pos=1,above {}]",
                    if reverse { "right" } else { "left" }
                ),
                LabelPos::BelowEnd => format!(
                    " node [sloped,pos=1,below {}]",
                    if reverse { "right" } else { "left" }
                ),
            };
            statement += &node;
            statement += &format!("{{{}}}", escape(&label.text));
        }

        self.stack.add(z, statement + ";");
        Ok(())
    }

    fn polyline(
        &mut self,
        points: &[Point],
        labels: &[Label],
        closed: bool,
        mut style: Style,
    ) -> Result<(), VellumError> {
        if points.len() < 2 {
            return Err(vellum_core::error::PathError::TooFewPoints {
                needed: 2,
                got: points.len(),
            }
            .into());
        }
        let z = style.take_z_index().unwrap_or(EDGE_Z_INDEX);
        let points: Vec<Point> = points.iter().map(|p| self.transform.apply(*p)).collect();
        let opts = self.path_style(&mut style)?;

        let reverse_start = (points[1] - points[0]).angle().abs() > FRAC_PI_2;
        let reverse_end = if closed {
            (points[0] - points[points.len() - 1]).angle().abs() > FRAC_PI_2
        } else {
            (points[points.len() - 1] - points[points.len() - 2])
                .angle()
                .abs()
                > FRAC_PI_2
        };

        let mut elements = vec![format!("({})", points[0])];
        for point in &points[1..] {
            elements.push("--".to_string());
            elements.push(format!("({point})"));
        }
        if closed {
            elements.push("--".to_string());
            elements.push("cycle".to_string());
        }

        for label in labels {
            let code = label_node(label.position, &label.text, reverse_start, reverse_end);
            let index = match label.position {
                LabelPos::AboveStart | LabelPos::BelowStart => 1,
                LabelPos::Above | LabelPos::Below => middle_element(elements.len()),
                LabelPos::AboveEnd | LabelPos::BelowEnd => elements.len() - 2,
            };
            elements[index] += &code;
        }

        self.stack
            .add(z, format!("\\path[{opts}] {};", elements.join(" ")));
        Ok(())
    }

    fn edge(
        &mut self,
        points: &[Waypoint],
        labels: &[Label],
        closed: bool,
        mut style: Style,
    ) -> Result<(), VellumError> {
        let z = style.take_z_index().unwrap_or(EDGE_Z_INDEX);
        let mut angles = resolve_angles(points, closed)?;
        let mut points: Vec<Point> = points.iter().map(|w| w.point()).collect();
        if closed {
            points.push(points[0]);
            angles.push(angles[0]);
        }
        let points: Vec<Point> = points.iter().map(|p| self.transform.apply(*p)).collect();

        let looseness = style.take_looseness().unwrap_or(1.0);
        let opts = self.path_style(&mut style)?;

        let mut elements = vec![format!("({})", points[0])];
        for i in 0..points.len() - 1 {
            let out_angle = self.convert_angle(angles[i]);
            let in_angle = self.convert_angle(180.0 + angles[i + 1]);
            let mut operator = format!(
                " to[out={}, in={}",
                sig(out_angle, 3),
                sig(in_angle, 3)
            );
            if looseness != 1.0 {
                operator += &format!(", looseness={}", sig(looseness, 3));
            }
            operator += "]";
            elements.push(operator);
            elements.push(format!("({})", points[i + 1]));
        }

        let reverse_start = (points[1] - points[0]).angle().abs() > FRAC_PI_2;
        let reverse_end = (points[points.len() - 1] - points[points.len() - 2])
            .angle()
            .abs()
            > FRAC_PI_2;

        for label in labels {
            let code = label_node(label.position, &label.text, reverse_start, reverse_end);
            let index = match label.position {
                LabelPos::AboveStart | LabelPos::BelowStart => 1,
                LabelPos::Above | LabelPos::Below => middle_element(elements.len()),
                LabelPos::AboveEnd | LabelPos::BelowEnd => elements.len() - 2,
            };
            elements[index] += &code;
        }

        self.stack
            .add(z, format!("\\path[{opts}] {};", elements.join(" ")));
        Ok(())
    }

    fn circle(
        &mut self,
        center: Point,
        radius: f64,
        _labels: &[Label],
        mut style: Style,
    ) -> Result<(), VellumError> {
        let z = style.take_z_index().unwrap_or(SHAPE_Z_INDEX);
        let tf = self.transform;

        let at = tf.apply(center);
        let rx = at.distance(tf.apply(center + Point::new(radius, 0.0)));
        let ry = at.distance(tf.apply(center + Point::new(0.0, radius)));
        let rotation = tf.apply(Point::new(radius, 0.0)).angle().to_degrees();

        let opts = self.path_style(&mut style)?;
        let statement = if rx != ry {
            format!(
                "\\path[{opts}] ({at}) circle[x radius={rx:.3}, y radius={ry:.3}, rotate={rotation:.3}];"
            )
        } else {
            format!("\\path[{opts}] ({at}) circle[radius={rx:.3}];")
        };
        self.stack.add(z, statement);
        Ok(())
    }

    fn rectangle(&mut self, p1: Point, p2: Point, mut style: Style) -> Result<(), VellumError> {
        let z = style.take_z_index().unwrap_or(SHAPE_Z_INDEX);
        let r = Rect::new(p1, p2);
        let opts = self.path_style(&mut style)?;
        let (sw, se, nw, ne) = (
            self.transform.apply(r.southwest()),
            self.transform.apply(r.southeast()),
            self.transform.apply(r.northwest()),
            self.transform.apply(r.northeast()),
        );
        self.stack.add(
            z,
            format!("\\path[{opts}]({sw}) -- ({se}) -- ({ne}) -- ({nw}) -- cycle;"),
        );
        Ok(())
    }

    fn text(&mut self, point: Point, content: &str, mut style: Style) -> Result<(), VellumError> {
        let z = style.take_z_index().unwrap_or(SHAPE_Z_INDEX);

        let mut opts = OptionList::new();
        let default_text = self.config.text_color().to_string();
        options::text_options(&mut style, &mut opts, Some(&default_text))?;
        if let Some(position) = style.take_position() {
            if !position.is_center() {
                opts.insert(position.to_string(), None);
            }
        }
        opts.extend(style.drain_extra());

        // Only the position is transformed; the text itself stays
        // horizontal.
        self.stack.add(
            z,
            format!(
                "\\node[{opts}] at ({}){{{}}};",
                self.transform.apply(point),
                escape(content)
            ),
        );
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
        // The TeX toolchain embeds the file; only the path is referenced.
        self.stack.add(
            z,
            format!(
                "\\node at ({}) {{\\includegraphics[width={width:.3}cm, height={height:.3}cm]{{{}}}}};",
                self.transform.apply(point),
                image.display()
            ),
        );
        Ok(())
    }

    fn render(
        &mut self,
        rect: Rect,
        out: &mut dyn Write,
        options: &RenderOptions,
        preamble: bool,
    ) -> Result<(), VellumError> {
        if preamble {
            writeln!(out, "\\documentclass{{standalone}}")?;
            writeln!(out, "\\usepackage[svgnames]{{xcolor}}")?;
            writeln!(out, "\\usepackage{{tikz}}")?;
            writeln!(out, "\\usepackage{{mathtools}}")?;
            writeln!(
                out,
                "\\usetikzlibrary{{backgrounds,shapes.geometric,arrows.meta}}"
            )?;
            writeln!(out)?;
            writeln!(out, "\\begin{{document}}")?;
        }

        let mut env_opts = OptionList::new();
        if options.center {
            env_opts.insert("baseline", Some("(current bounding box.center)".to_string()));
        }
        env_opts.extend(options.extra.clone());

        if env_opts.is_empty() {
            writeln!(out, "\\begin{{tikzpicture}}")?;
        } else {
            writeln!(out, "\\begin{{tikzpicture}}[{env_opts}]")?;
        }

        let tf = self.transform;
        let corners = [
            tf.apply(rect.northwest()),
            tf.apply(rect.northeast()),
            tf.apply(rect.southeast()),
            tf.apply(rect.southwest()),
        ];
        let viewport = Rect::bounding_box(&corners)?;

        if options.clip {
            writeln!(
                out,
                "\\clip ({}) rectangle ({});",
                viewport.northwest(),
                viewport.southeast()
            )?;
        }

        let layers = std::mem::take(&mut self.stack).into_layers();
        debug!(layers = layers.len(); "serializing TikZ document");
        for (_, statements) in layers {
            for statement in statements {
                writeln!(out, "{statement}")?;
            }
        }

        writeln!(out, "\\end{{tikzpicture}}")?;
        if preamble {
            writeln!(out, "\\end{{document}}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(layer: &mut TikzLayer, rect: Rect, preamble: bool) -> String {
        let mut out = Vec::new();
        layer
            .render(rect, &mut out, &RenderOptions::default(), preamble)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn unit_rect() -> Rect {
        Rect::new(Point::new(-1.0, -1.0), Point::new(7.0, 2.0))
    }

    #[test]
    fn test_line_statement() {
        let mut layer = TikzLayer::new();
        layer
            .line(
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                &[],
                Style::new(),
            )
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(
            output.contains("\\path[draw=black] (0.000,0.000) -- (5.000,0.000);"),
            "{output}"
        );
    }

    #[test]
    fn test_clip_statement_from_bounding_rectangle() {
        let mut layer = TikzLayer::new();
        let output = render_to_string(
            &mut layer,
            Rect::new(Point::new(0.0, 0.0), Point::new(2.0, 1.0)),
            false,
        );
        assert!(
            output.contains("\\clip (0.000,1.000) rectangle (2.000,0.000);"),
            "{output}"
        );
    }

    #[test]
    fn test_preamble_wraps_document() {
        let mut layer = TikzLayer::new();
        let output = render_to_string(&mut layer, unit_rect(), true);
        assert!(output.starts_with("\\documentclass{standalone}"), "{output}");
        assert!(output.contains("\\usetikzlibrary{backgrounds,shapes.geometric,arrows.meta}"));
        assert!(output.contains("\\begin{document}"));
        assert!(output.trim_end().ends_with("\\end{document}"), "{output}");
    }

    #[test]
    fn test_fragment_has_no_preamble() {
        let mut layer = TikzLayer::new();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(output.starts_with("\\begin{tikzpicture}"), "{output}");
        assert!(output.trim_end().ends_with("\\end{tikzpicture}"), "{output}");
    }

    #[test]
    fn test_edge_uses_out_in_angles() {
        let mut layer = TikzLayer::new();
        layer
            .edge(
                &[
                    Waypoint::new(Point::new(0.0, 0.0)),
                    Waypoint::new(Point::new(5.0, 0.0)),
                ],
                &[],
                false,
                Style::new(),
            )
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(
            output.contains("(0.000,0.000)  to[out=0, in=180] (5.000,0.000)"),
            "{output}"
        );
    }

    #[test]
    fn test_edge_with_looseness() {
        let mut layer = TikzLayer::new();
        layer
            .edge(
                &[
                    Waypoint::new(Point::new(0.0, 0.0)),
                    Waypoint::new(Point::new(5.0, 0.0)),
                ],
                &[],
                false,
                Style::new().with_looseness(2.0),
            )
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(output.contains("looseness=2]"), "{output}");
    }

    #[test]
    fn test_polyline_closes_with_cycle() {
        let mut layer = TikzLayer::new();
        layer
            .polyline(
                &[
                    Point::new(0.0, 0.0),
                    Point::new(1.0, 0.0),
                    Point::new(1.0, 1.0),
                ],
                &[],
                true,
                Style::new(),
            )
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(
            output.contains("(0.000,0.000) -- (1.000,0.000) -- (1.000,1.000) -- cycle;"),
            "{output}"
        );
    }

    #[test]
    fn test_label_flips_on_right_to_left_line() {
        let mut layer = TikzLayer::new();
        layer
            .line(
                Point::new(5.0, 0.0),
                Point::new(0.0, 0.0),
                &[Label::new(LabelPos::AboveStart, "origin")],
                Style::new(),
            )
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(
            output.contains("node [sloped,pos=0,above left]{origin}"),
            "{output}"
        );

        let mut layer = TikzLayer::new();
        layer
            .line(
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                &[Label::new(LabelPos::AboveStart, "origin")],
                Style::new(),
            )
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(
            output.contains("node [sloped,pos=0,above right]{origin}"),
            "{output}"
        );
    }

    #[test]
    fn test_label_text_is_escaped() {
        let mut layer = TikzLayer::new();
        layer
            .text(
                Point::new(0.0, 0.0),
                "foo_bar^2",
                Style::new(),
            )
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(output.contains(r"{foo\_bar\^{}2}"), "{output}");
    }

    #[test]
    fn test_text_position_option() {
        let mut layer = TikzLayer::new();
        layer
            .text(
                Point::new(1.0, 2.0),
                "name",
                Style::new().with_position("above left".parse().unwrap()),
            )
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(
            output.contains("\\node[above left] at (1.000,2.000){name};"),
            "{output}"
        );
    }

    #[test]
    fn test_circle_statement() {
        let mut layer = TikzLayer::new();
        layer
            .circle(Point::new(1.0, 1.0), 0.5, &[], Style::new())
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(
            output.contains("(1.000,1.000) circle[radius=0.500];"),
            "{output}"
        );
    }

    #[test]
    fn test_circle_becomes_ellipse_under_uneven_scale() {
        let mut layer = TikzLayer::with_transform(Transform::scale(2.0, 1.0));
        layer
            .circle(Point::new(0.0, 0.0), 1.0, &[], Style::new())
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(
            output.contains("circle[x radius=2.000, y radius=1.000"),
            "{output}"
        );
    }

    #[test]
    fn test_shapes_paint_after_edges() {
        let mut layer = TikzLayer::new();
        layer
            .rectangle(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Style::new())
            .unwrap();
        layer
            .line(
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                &[],
                Style::new(),
            )
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        let line_at = output.find("-- (5.000,0.000);").unwrap();
        let rect_at = output.find("-- cycle;").unwrap();
        assert!(line_at < rect_at, "{output}");
    }

    #[test]
    fn test_picture_references_file() {
        let mut layer = TikzLayer::new();
        layer
            .picture(
                Point::new(0.0, 0.0),
                FilePath::new("img/logo.png"),
                2.0,
                1.0,
                Style::new(),
            )
            .unwrap();
        let output = render_to_string(&mut layer, unit_rect(), false);
        assert!(
            output.contains(
                "\\node at (0.000,0.000) {\\includegraphics[width=2.000cm, height=1.000cm]{img/logo.png}};"
            ),
            "{output}"
        );
    }
}

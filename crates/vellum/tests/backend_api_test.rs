//! Integration tests for the public drawing API.
//!
//! These tests drive both backends through the `Layer` trait the way a
//! caller would and check the emitted documents.

use vellum::{
    Label, LabelPos, Layer, MultiLayer, Point, Rect, RenderOptions, Style, SvgLayer, TikzLayer,
    Waypoint,
};

fn bounds() -> Rect {
    Rect::new(Point::new(-1.0, -1.0), Point::new(7.0, 4.0))
}

fn render(layer: &mut dyn Layer, preamble: bool) -> String {
    let mut out = Vec::new();
    layer
        .render(bounds(), &mut out, &RenderOptions::default(), preamble)
        .expect("render failed");
    String::from_utf8(out).expect("output is not UTF-8")
}

#[test]
fn test_dashed_line_svg() {
    let mut layer = SvgLayer::new();
    layer
        .line(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            &[],
            Style::new().with_dash("dashed".parse().unwrap()),
        )
        .unwrap();

    let svg = render(&mut layer, false);
    assert!(
        svg.contains("M 0.000,0.000 L 5.000,0.000"),
        "path data missing: {svg}"
    );
    assert!(svg.contains(r#"stroke="black""#), "{svg}");
    // A dashed line resolves to a non-empty dasharray.
    let dasharray = svg
        .split("stroke-dasharray=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .expect("no stroke-dasharray attribute");
    assert!(!dasharray.is_empty() && dasharray != "none", "{svg}");
}

#[test]
fn test_dashed_line_tikz() {
    let mut layer = TikzLayer::new();
    layer
        .line(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            &[],
            Style::new().with_dash("dashed".parse().unwrap()),
        )
        .unwrap();

    let tikz = render(&mut layer, false);
    assert!(
        tikz.contains("\\path[dashed,draw=black] (0.000,0.000) -- (5.000,0.000);"),
        "{tikz}"
    );
}

#[test]
fn test_same_figure_on_both_backends() {
    let mut multi = MultiLayer::new(vec![Box::new(SvgLayer::new()), Box::new(TikzLayer::new())]);
    multi
        .edge(
            &[
                Waypoint::with_angle(Point::new(0.0, 0.0), 60.0),
                Waypoint::new(Point::new(2.0, 1.0)),
                Waypoint::new(Point::new(5.0, 0.0)),
            ],
            &[Label::new(LabelPos::AboveEnd, "done")],
            false,
            Style::new().with_arrow("->".parse().unwrap()),
        )
        .unwrap();
    multi
        .circle(Point::new(3.0, 2.0), 0.5, &[], Style::new())
        .unwrap();

    let mut svg_out = Vec::new();
    let mut tikz_out = Vec::new();
    {
        let mut writers: Vec<&mut dyn std::io::Write> = vec![&mut svg_out, &mut tikz_out];
        multi
            .render_all(bounds(), &mut writers, &RenderOptions::default(), true)
            .unwrap();
    }

    let svg = String::from_utf8(svg_out).unwrap();
    let tikz = String::from_utf8(tikz_out).unwrap();

    assert!(svg.contains("<svg"), "{svg}");
    assert!(svg.contains("marker-end"), "{svg}");
    assert!(svg.contains("textPath"), "{svg}");

    assert!(tikz.contains("\\begin{tikzpicture}"), "{tikz}");
    assert!(tikz.contains("to[out=60,"), "{tikz}");
    assert!(tikz.contains("circle[radius=0.500]"), "{tikz}");
    assert!(tikz.contains("node [sloped,pos=1,above left]{done}"), "{tikz}");
}

#[test]
fn test_edge_through_colinear_points_is_straight() {
    let mut layer = SvgLayer::new();
    layer
        .edge(
            &[
                Waypoint::new(Point::new(0.0, 0.0)),
                Waypoint::new(Point::new(1.0, 0.0)),
                Waypoint::new(Point::new(2.0, 0.0)),
            ],
            &[],
            false,
            Style::new(),
        )
        .unwrap();

    let svg = render(&mut layer, false);
    // Control points sit on the chord: every emitted y is 0 (the device
    // transform flips y but 0 stays 0).
    assert!(
        svg.contains("C 0.390,0.000 0.610,0.000 1.000,0.000"),
        "{svg}"
    );
    assert!(
        svg.contains("C 1.390,0.000 1.610,0.000 2.000,0.000"),
        "{svg}"
    );
}

#[test]
fn test_rounded_polyline_quadratics_on_both_backends() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
    ];

    let mut svg_layer = SvgLayer::new();
    svg_layer
        .polyline(&points, &[], false, Style::new().rounded())
        .unwrap();
    let svg = render(&mut svg_layer, false);
    // The corner is bridged by a quadratic controlled by the corner
    // point itself.
    assert!(svg.contains("Q 2.000,0.000"), "{svg}");
    assert!(svg.contains(r#"stroke-linejoin="round""#), "{svg}");

    let mut tikz_layer = TikzLayer::new();
    tikz_layer
        .polyline(&points, &[], false, Style::new().rounded())
        .unwrap();
    let tikz = render(&mut tikz_layer, false);
    // TikZ rounds natively through an option.
    assert!(tikz.contains("rounded corners"), "{tikz}");
    assert!(
        tikz.contains("(0.000,0.000) -- (2.000,0.000) -- (2.000,2.000);"),
        "{tikz}"
    );
}

#[test]
fn test_unknown_vocabulary_fails_loudly() {
    assert!("wavy".parse::<vellum::Dash>().is_err());
    assert!("o->".parse::<vellum::ArrowSpec>().is_err());
}

#[test]
fn test_residual_style_keys_pass_through() {
    let mut layer = SvgLayer::new();
    layer
        .line(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            &[],
            Style::new().with_extra("stroke-linecap", Some("round".into())),
        )
        .unwrap();
    let svg = render(&mut layer, false);
    assert!(svg.contains(r#"stroke-linecap="round""#), "{svg}");

    let mut layer = TikzLayer::new();
    layer
        .line(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            &[],
            Style::new().with_extra("line cap", Some("round".into())),
        )
        .unwrap();
    let tikz = render(&mut layer, false);
    assert!(tikz.contains("line cap=round"), "{tikz}");
}

#[test]
fn test_polygon_and_shape_paint_with_the_shapes() {
    let mut layer = TikzLayer::new();
    layer
        .polygon(
            &[
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.5, 1.0),
            ],
            &[],
            Style::new().with_fill("red"),
        )
        .unwrap();
    layer
        .shape(
            &[
                Waypoint::new(Point::new(2.0, 0.0)),
                Waypoint::new(Point::new(3.0, 0.0)),
                Waypoint::new(Point::new(2.5, 1.0)),
            ],
            &[],
            Style::new(),
        )
        .unwrap();
    layer
        .line(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            &[],
            Style::new(),
        )
        .unwrap();

    let tikz = render(&mut layer, false);
    // The line is an edge command: it serializes before both closed
    // shapes even though it was drawn last.
    let line_at = tikz.find("-- (5.000,0.000);").unwrap();
    let polygon_at = tikz.find("fill=red").unwrap();
    let shape_at = tikz.find("to[out=").unwrap();
    assert!(line_at < polygon_at, "{tikz}");
    assert!(line_at < shape_at, "{tikz}");
    // The closed curve returns to its first waypoint.
    assert_eq!(tikz.matches("(2.000,0.000)").count(), 2, "{tikz}");
}

#[test]
fn test_too_few_points_fail() {
    let mut layer = SvgLayer::new();
    assert!(layer
        .polyline(&[Point::new(0.0, 0.0)], &[], false, Style::new())
        .is_err());
    assert!(layer
        .edge(
            &[Waypoint::new(Point::new(0.0, 0.0))],
            &[],
            false,
            Style::new()
        )
        .is_err());
}

#[test]
fn test_picture_embeds_bytes_on_svg_and_references_path_on_tikz() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("pixel.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]).unwrap();

    let mut layer = SvgLayer::new();
    layer
        .picture(Point::new(1.0, 1.0), &image, 2.0, 1.0, Style::new())
        .unwrap();
    let svg = render(&mut layer, false);
    assert!(svg.contains("data:image/png;base64,"), "{svg}");
    assert!(svg.contains(r#"preserveAspectRatio="none""#), "{svg}");

    let mut layer = TikzLayer::new();
    layer
        .picture(Point::new(1.0, 1.0), &image, 2.0, 1.0, Style::new())
        .unwrap();
    let tikz = render(&mut layer, false);
    assert!(
        tikz.contains("\\includegraphics[width=2.000cm, height=1.000cm]"),
        "{tikz}"
    );
    assert!(tikz.contains("pixel.png"), "{tikz}");

    // A missing file is an I/O error, not silence.
    let mut layer = SvgLayer::new();
    assert!(layer
        .picture(
            Point::new(0.0, 0.0),
            std::path::Path::new("no/such/file.png"),
            1.0,
            1.0,
            Style::new()
        )
        .is_err());
}

#[test]
fn test_zindex_override_moves_fragment() {
    let mut layer = SvgLayer::new();
    // Text usually paints last; push it under everything instead.
    layer
        .text(
            Point::new(0.0, 0.0),
            "watermark",
            Style::new().with_z_index(-10),
        )
        .unwrap();
    layer
        .line(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            &[],
            Style::new(),
        )
        .unwrap();
    let svg = render(&mut layer, false);
    let text_at = svg.find("watermark").unwrap();
    let line_at = svg.find("L 1.000,0.000").unwrap();
    assert!(text_at < line_at, "{svg}");
}

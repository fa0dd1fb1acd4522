//! CLI logic for the Vellum demo renderer.
//!
//! Draws a small built-in figure exercising the drawing surface — lines
//! with arrowheads, a smooth edge through angle-pinned waypoints, a
//! rounded polyline, shapes, and labels — and writes it through the
//! selected backend.

mod args;

pub use args::Args;

use std::fs::File;
use std::io::BufWriter;

use log::info;

use vellum::{
    Label, LabelPos, Layer, Point, Rect, RenderConfig, RenderOptions, Style, SvgLayer, TikzLayer,
    VellumError, Waypoint,
};

/// Run the Vellum CLI application.
///
/// Builds the demo figure on the backend selected by `--tex`, using the
/// dark color scheme when `--dark` is set, and writes a standalone
/// document to the output path.
///
/// # Errors
///
/// Returns [`VellumError`] for file I/O failures and configuration
/// problems.
pub fn run(args: &Args) -> Result<(), VellumError> {
    let config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None if args.dark => RenderConfig::dark(),
        None => RenderConfig::new(),
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| {
            if args.tex {
                "out.tex".to_string()
            } else {
                "out.svg".to_string()
            }
        });

    info!(output_path = output, tex = args.tex, dark = args.dark; "Rendering demo figure");

    let mut layer: Box<dyn Layer> = if args.tex {
        Box::new(TikzLayer::with_config(Default::default(), config))
    } else {
        Box::new(SvgLayer::with_config(Default::default(), config))
    };
    draw_demo(layer.as_mut())?;

    let file = File::create(&output)?;
    let mut writer = BufWriter::new(file);
    layer.render(
        Rect::new(Point::new(-6.0, -1.0), Point::new(8.0, 7.0)),
        &mut writer,
        &RenderOptions::default(),
        true,
    )?;

    info!(output_file = output; "Figure exported successfully");
    Ok(())
}

/// The built-in demo figure.
fn draw_demo(layer: &mut dyn Layer) -> Result<(), VellumError> {
    for (i, arrow) in [">-<", "<->", "latex-xetal", "x-x", "xetal-latex"]
        .iter()
        .enumerate()
    {
        let y = i as f64;
        layer.line(
            Point::new(0.0, y),
            Point::new(5.0, y + 0.5),
            &[],
            Style::new().with_arrow(arrow.parse()?),
        )?;
        layer.text(
            Point::new(-3.0, y),
            &format!("arrow = {arrow}"),
            Style::new(),
        )?;
    }

    layer.edge(
        &[
            Waypoint::with_angle(Point::new(-5.0, 0.0), 60.0),
            Waypoint::new(Point::new(-3.0, 3.0)),
            Waypoint::with_angle(Point::new(-1.0, 0.5), 180.0),
        ],
        &[Label::new(LabelPos::Above, "bytes 0..499")],
        false,
        Style::new().with_looseness(1.2),
    )?;

    layer.polyline(
        &[
            Point::new(0.0, 5.5),
            Point::new(2.0, 6.5),
            Point::new(4.0, 5.5),
            Point::new(6.0, 6.5),
        ],
        &[Label::new(LabelPos::BelowEnd, "ACK")],
        false,
        Style::new().rounded().with_dash("dashed".parse()?),
    )?;

    layer.rectangle(
        Point::new(-5.0, 4.0),
        Point::new(-2.0, 6.0),
        Style::new().with_fill("lightgray").with_opacity(0.5),
    )?;
    layer.circle(
        Point::new(-3.5, 5.0),
        0.75,
        &[],
        Style::new().with_thickness(2.0),
    )?;
    layer.text(
        Point::new(-3.5, 6.0),
        "demo",
        Style::new().with_position("above".parse()?),
    )?;

    Ok(())
}

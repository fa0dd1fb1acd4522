//! Arrowhead marker definitions.
//!
//! Each tip family becomes a reusable `<marker>` element sized from the
//! stroke width, so arrowheads scale with line thickness. Tips pointing
//! against the path direction use a horizontally mirrored glyph with the
//! reference point moved to the mirrored tip. Every marker gets a
//! document-unique id from the layer's naming counter before it is
//! attached.

use svg::node::element::{Marker, Path as PathElement, Polyline};

use vellum_core::geometry::Point;
use vellum_core::path::Path;
use vellum_core::style::Tip;

use crate::svg::path_data;

/// Builds the marker for a tip, or `None` for an empty side.
///
/// `stroke` is the resolved stroke color of the path; the filled
/// families paint with it.
pub(crate) fn marker_for_tip(tip: Tip, sw: f64, pt: f64, stroke: &str) -> Option<Marker> {
    match tip {
        Tip::None => None,
        Tip::Forward => Some(chevron(sw, pt, false)),
        Tip::Backward => Some(chevron(sw, pt, true)),
        Tip::Latex => Some(latex(sw, pt, stroke, false)),
        Tip::Xetal => Some(latex(sw, pt, stroke, true)),
        Tip::Cross => Some(cross(sw, pt)),
    }
}

/// Shared marker frame: user-space units and automatic orientation along
/// the path tangent.
fn frame(width: f64, height: f64, ref_x: f64, ref_y: f64) -> Marker {
    Marker::new()
        .set("markerUnits", "userSpaceOnUse")
        .set("markerWidth", format!("{width:.3}"))
        .set("markerHeight", format!("{height:.3}"))
        .set("refX", format!("{ref_x:.3}"))
        .set("refY", format!("{ref_y:.3}"))
        .set("orient", "auto")
}

/// The open rounded chevron (`>` / `<`).
fn chevron(sw: f64, pt: f64, mirrored: bool) -> Marker {
    let x = 0.28 * pt + 0.3 * sw;
    let width = 5.0 * x;
    let height = 10.0 * x;

    // Glyph drawn with its tip at the origin, pointing +x, then shifted
    // into the marker box (or mirrored around x = 0).
    let place = move |p: Point| {
        if mirrored {
            Point::new(-p.x(), p.y() + height / 2.0)
        } else {
            Point::new(p.x() + width, p.y() + height / 2.0)
        }
    };

    let mut glyph = Path::new(place(Point::new(-3.75 * x, 4.0 * x)));
    glyph.curve_to(
        place(Point::new(0.0, 0.0)),
        place(Point::new(-3.5 * x, 2.5 * x)),
        place(Point::new(-0.75 * x, 0.25 * x)),
    );
    glyph.curve_to(
        place(Point::new(-3.75 * x, -4.0 * x)),
        place(Point::new(-0.75 * x, -0.25 * x)),
        place(Point::new(-3.5 * x, -2.5 * x)),
    );

    let ref_x = if mirrored {
        0.4 * sw
    } else {
        width - 0.4 * sw
    };

    frame(width, height, ref_x, height / 2.0)
        .set("stroke-width", format!("{:.3}", 0.8 * sw))
        .add(
            PathElement::new()
                .set("d", path_data(&glyph))
                .set("stroke-linecap", "round")
                .set("stroke-linejoin", "round")
                .set("stroke-dasharray", "none"),
        )
}

/// The filled bevelled arrow (`latex` / `xetal`).
fn latex(sw: f64, pt: f64, stroke: &str, mirrored: bool) -> Marker {
    let x = 0.28 * pt + 0.3 * sw;
    let width = 11.0 * x;
    let height = 10.0 * x;

    let place = move |p: Point| {
        if mirrored {
            Point::new(-p.x(), p.y() + height / 2.0)
        } else {
            Point::new(p.x() + width, p.y() + height / 2.0)
        }
    };

    let mut glyph = Path::new(place(Point::new(0.0, 0.0)));
    glyph.curve_to(
        place(Point::new(-10.0 * x, 3.75 * x)),
        place(Point::new(-8.0 * x / 3.0, 0.5 * x)),
        place(Point::new(-7.0 * x, 2.0 * x)),
    );
    glyph.line_to(place(Point::new(-10.0 * x, -3.75 * x)));
    glyph.curve_to(
        place(Point::new(0.0, 0.0)),
        place(Point::new(-7.0 * x, -2.0 * x)),
        place(Point::new(-8.0 * x / 3.0, -0.5 * x)),
    );

    let ref_x = if mirrored {
        0.5 * sw
    } else {
        width - 0.5 * sw
    };

    frame(width, height, ref_x, height / 2.0)
        .set("stroke-width", format!("{sw:.3}"))
        .add(
            PathElement::new()
                .set("d", path_data(&glyph))
                .set("fill", stroke),
        )
}

/// The X mark (`x`), symmetric so orientation does not matter.
fn cross(sw: f64, pt: f64) -> Marker {
    let width = 3.0 * pt + 4.0 * sw;
    frame(width, width, width / 2.0, width / 2.0)
        .add(Polyline::new().set(
            "points",
            format!(
                "{} {}",
                Point::new(0.0, 0.0),
                Point::new(width, width)
            ),
        ))
        .add(Polyline::new().set(
            "points",
            format!(
                "{} {}",
                Point::new(width, 0.0),
                Point::new(0.0, width)
            ),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(marker: Marker) -> String {
        marker.to_string()
    }

    #[test]
    fn test_empty_side_has_no_marker() {
        assert!(marker_for_tip(Tip::None, 0.7, 1.76, "black").is_none());
    }

    #[test]
    fn test_chevron_scales_with_stroke_width() {
        let thin = render(chevron(0.5, 1.76, false));
        let thick = render(chevron(2.0, 1.76, false));
        assert_ne!(thin, thick);
        // 5 * (0.28*pt + 0.3*sw)
        assert!(thin.contains(r#"markerWidth="3.214""#), "{thin}");
        assert!(thick.contains(r#"markerWidth="5.464""#), "{thick}");
    }

    #[test]
    fn test_chevron_mirrored_moves_reference_to_left_tip() {
        let forward = render(chevron(1.0, 1.76, false));
        let mirrored = render(chevron(1.0, 1.76, true));
        assert!(forward.contains(r#"refX="3.564""#), "{forward}");
        assert!(mirrored.contains(r#"refX="0.400""#), "{mirrored}");
    }

    #[test]
    fn test_latex_fills_with_stroke_color() {
        let marker = render(latex(1.0, 1.76, "red", false));
        assert!(marker.contains(r#"fill="red""#), "{marker}");
    }

    #[test]
    fn test_cross_is_two_diagonals() {
        let marker = render(cross(1.0, 1.76));
        // 3*pt + 4*sw
        assert!(marker.contains(r#"markerWidth="9.280""#), "{marker}");
        assert_eq!(marker.matches("<polyline").count(), 2);
    }
}

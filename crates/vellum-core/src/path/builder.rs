//! Path construction: smooth curves through waypoints and polylines with
//! optional corner rounding.
//!
//! Control-point math runs in the caller's figure space; the supplied
//! transform is applied to every emitted point, so distances and
//! tangents are not distorted by the device mapping.

use log::trace;

use crate::error::PathError;
use crate::geometry::{Point, Transform, Waypoint};
use crate::path::angles::resolve_angles;
use crate::path::Path;

/// How far control points are pulled from their anchors, as a fraction
/// of the anchor distance. Chosen to visually match the curve tension of
/// TikZ `to[out=,in=]` edges; scaled by the caller's looseness factor.
pub const CURVE_TENSION: f64 = 0.3902;

/// Base fraction of a polyline segment given up to corner rounding.
const CORNER_FRACTION: f64 = 0.04;

/// Cap on the adjacent-segment length ratio, so a rounded corner never
/// swallows more than `CORNER_FRACTION * CORNER_RATIO_CAP` of a segment.
const CORNER_RATIO_CAP: f64 = 12.0;

/// Builds a cubic-Bezier curve visiting every waypoint in order.
///
/// For each consecutive pair the control points sit on the resolved
/// tangent directions, at a distance of
/// `looseness * CURVE_TENSION * |Q - P|` from their anchors. A closed
/// curve continues from the last waypoint back to the first with the
/// same smoothing.
///
/// # Errors
///
/// Returns [`PathError::TooFewPoints`] for fewer than two waypoints.
pub fn curve_through(
    points: &[Waypoint],
    closed: bool,
    looseness: f64,
    tf: &Transform,
) -> Result<Path, PathError> {
    let mut angles = resolve_angles(points, closed)?;

    let mut points: Vec<Waypoint> = points.to_vec();
    if closed {
        points.push(points[0]);
        angles.push(angles[0]);
    }
    let radians: Vec<f64> = angles.iter().map(|a| a.to_radians()).collect();

    let mut path = Path::new(tf.apply(points[0].point()));
    for i in 0..points.len() - 1 {
        let p = points[i].point();
        let q = points[i + 1].point();
        let dst = looseness * CURVE_TENSION * q.distance(p);
        let ctrl1 = p + Point::polar(dst, radians[i]);
        let ctrl2 = q - Point::polar(dst, radians[i + 1]);
        path.curve_to(tf.apply(q), tf.apply(ctrl1), tf.apply(ctrl2));
    }

    trace!(segments = path.segments().len(); "built curve path");
    Ok(path)
}

/// Builds a polyline through the given points.
///
/// With `rounded` set and more than two points on the path, each
/// interior corner is replaced by a short line to a point just before
/// the corner followed by a quadratic curve (control point: the corner
/// itself) to a point just after it. Closed polylines treat the
/// first/last point as one more corner and wrap around.
///
/// # Errors
///
/// Returns [`PathError::TooFewPoints`] for fewer than two points.
pub fn polyline(
    points: &[Point],
    closed: bool,
    rounded: bool,
    tf: &Transform,
) -> Result<Path, PathError> {
    if points.len() < 2 {
        return Err(PathError::TooFewPoints {
            needed: 2,
            got: points.len(),
        });
    }

    let mut points: Vec<Point> = points.to_vec();
    if closed {
        points.push(points[0]);
    }

    let path = if rounded && points.len() != 2 {
        let mut path = if closed {
            // The path starts after the wrap-around corner so that the
            // corner itself can be rounded at the end.
            let (_, after) = corner_points(points[points.len() - 2], points[0], points[1]);
            Path::new(tf.apply(after))
        } else {
            Path::new(tf.apply(points[0]))
        };
        for i in 0..points.len() - 2 {
            let (before, after) = corner_points(points[i], points[i + 1], points[i + 2]);
            path.line_to(tf.apply(before));
            path.quadratic_to(tf.apply(after), tf.apply(points[i + 1]));
        }
        if closed {
            let (before, after) = corner_points(points[points.len() - 2], points[0], points[1]);
            path.line_to(tf.apply(before));
            path.quadratic_to(tf.apply(after), tf.apply(points[0]));
        } else {
            path.line_to(tf.apply(points[points.len() - 1]));
        }
        path
    } else {
        let mut path = Path::new(tf.apply(points[0]));
        for point in &points[1..] {
            path.line_to(tf.apply(*point));
        }
        path
    };

    trace!(segments = path.segments().len(); "built polyline path");
    Ok(path)
}

/// Returns the two points near `p1` that bound its rounded corner.
///
/// The base fraction applies to the longer adjacent segment; the shorter
/// side scales its fraction by the length ratio so both offsets come out
/// equal, capped so the rounding never overshoots the shorter segment.
fn corner_points(p0: Point, p1: Point, p2: Point) -> (Point, Point) {
    let incoming = p0.distance(p1);
    let outgoing = p1.distance(p2);
    let (t1, t2) = if outgoing > incoming {
        let ratio = (outgoing / incoming).min(CORNER_RATIO_CAP);
        (CORNER_FRACTION * ratio, CORNER_FRACTION)
    } else {
        let ratio = (incoming / outgoing).min(CORNER_RATIO_CAP);
        (CORNER_FRACTION, CORNER_FRACTION * ratio)
    };
    let before = p0 * t1 + p1 * (1.0 - t1);
    let after = p1 * (1.0 - t2) + p2 * t2;
    (before, after)
}

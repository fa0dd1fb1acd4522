//! Tangent-angle resolution for curve waypoints.
//!
//! Every waypoint of a curve needs a tangent direction. A caller may pin
//! one with an explicit hint; the rest are derived from the neighboring
//! points so the curve passes through smoothly.

use crate::error::PathError;
use crate::geometry::{Point, Waypoint};

/// Computes the tangent angle, in degrees, for each waypoint.
///
/// - An explicit hint is used verbatim.
/// - Otherwise the angle at an interior point is the direction from its
///   predecessor to its successor.
/// - The endpoints of an open sequence only see their single neighbor:
///   the first point takes the direction towards the second, the last
///   point the direction arriving from its predecessor.
/// - In a closed sequence the neighbors wrap around: the last point acts
///   as the first point's predecessor and vice versa.
///
/// Derived angles are rounded to the nearest whole degree; hints are
/// never rounded.
///
/// # Errors
///
/// Returns [`PathError::TooFewPoints`] when fewer than two waypoints are
/// supplied, since no direction can be determined.
pub fn resolve_angles(points: &[Waypoint], closed: bool) -> Result<Vec<f64>, PathError> {
    if points.len() < 2 {
        return Err(PathError::TooFewPoints {
            needed: 2,
            got: points.len(),
        });
    }

    let mut angles = Vec::with_capacity(points.len());

    let first = points[0];
    let second = points[1];
    let angle = match first.angle() {
        Some(hint) => hint,
        None if closed => direction(points[points.len() - 1].point(), second.point()),
        None => direction(first.point(), second.point()),
    };
    angles.push(angle);

    for i in 0..points.len() - 1 {
        let prev = points[i];
        let current = points[i + 1];
        let next = if i != points.len() - 2 {
            Some(points[i + 2])
        } else if closed {
            Some(points[0])
        } else {
            None
        };
        let angle = match current.angle() {
            Some(hint) => hint,
            None => direction(
                prev.point(),
                next.map_or(current.point(), Waypoint::point),
            ),
        };
        angles.push(angle);
    }

    Ok(angles)
}

/// Direction from one point to another, in whole degrees.
fn direction(from: Point, to: Point) -> f64 {
    let delta = to - from;
    delta.y().atan2(delta.x()).to_degrees().round()
}

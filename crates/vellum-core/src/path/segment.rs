use std::f64::consts::FRAC_PI_2;

use crate::error::PathError;
use crate::geometry::Point;

/// One piece of a path.
///
/// Every variant records its own start and end point, so a segment can be
/// reversed in isolation and a sequence of segments can be checked for
/// continuity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// A straight line.
    Line { from: Point, to: Point },
    /// An elliptical arc in SVG parameterization.
    Arc {
        from: Point,
        to: Point,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
    },
    /// A cubic Bezier curve.
    Cubic {
        from: Point,
        to: Point,
        ctrl1: Point,
        ctrl2: Point,
    },
    /// A quadratic Bezier curve.
    Quadratic { from: Point, to: Point, ctrl: Point },
}

impl Segment {
    /// Returns the point the segment starts at.
    pub fn start(&self) -> Point {
        match *self {
            Segment::Line { from, .. }
            | Segment::Arc { from, .. }
            | Segment::Cubic { from, .. }
            | Segment::Quadratic { from, .. } => from,
        }
    }

    /// Returns the point the segment ends at.
    pub fn end(&self) -> Point {
        match *self {
            Segment::Line { to, .. }
            | Segment::Arc { to, .. }
            | Segment::Cubic { to, .. }
            | Segment::Quadratic { to, .. } => to,
        }
    }

    /// Returns the segment traversed in the opposite direction.
    ///
    /// Endpoints swap; a cubic additionally swaps its control points, an
    /// arc flips its sweep flag, and a quadratic keeps its single control
    /// point.
    pub fn reversed(&self) -> Segment {
        match *self {
            Segment::Line { from, to } => Segment::Line { from: to, to: from },
            Segment::Arc {
                from,
                to,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
            } => Segment::Arc {
                from: to,
                to: from,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep: !sweep,
            },
            Segment::Cubic {
                from,
                to,
                ctrl1,
                ctrl2,
            } => Segment::Cubic {
                from: to,
                to: from,
                ctrl1: ctrl2,
                ctrl2: ctrl1,
            },
            Segment::Quadratic { from, to, ctrl } => Segment::Quadratic {
                from: to,
                to: from,
                ctrl,
            },
        }
    }

    /// Returns true when the segment runs predominantly right-to-left.
    ///
    /// Decided by the chord from start to end: an absolute angle above
    /// 90 degrees points leftwards. Arcs use their sweep flag instead of
    /// the chord.
    pub fn is_right_to_left(&self) -> bool {
        match *self {
            Segment::Arc { sweep, .. } => sweep,
            _ => (self.end() - self.start()).angle().abs() > FRAC_PI_2,
        }
    }
}

/// A path: an ordered sequence of segments plus a running current point.
///
/// Construction keeps the continuity invariant: every `*_to` method
/// starts its segment at the current point and moves the current point to
/// the new endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    current: Point,
    segments: Vec<Segment>,
}

impl Path {
    /// Creates an empty path anchored at `start`.
    pub fn new(start: Point) -> Self {
        Self {
            current: start,
            segments: Vec::new(),
        }
    }

    /// Adds a straight line from the current point.
    pub fn line_to(&mut self, to: Point) {
        self.segments.push(Segment::Line {
            from: self.current,
            to,
        });
        self.current = to;
    }

    /// Adds an elliptical arc from the current point.
    pub fn arc_to(
        &mut self,
        to: Point,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
    ) {
        self.segments.push(Segment::Arc {
            from: self.current,
            to,
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
        });
        self.current = to;
    }

    /// Adds a cubic Bezier curve from the current point.
    pub fn curve_to(&mut self, to: Point, ctrl1: Point, ctrl2: Point) {
        self.segments.push(Segment::Cubic {
            from: self.current,
            to,
            ctrl1,
            ctrl2,
        });
        self.current = to;
    }

    /// Adds a quadratic Bezier curve from the current point.
    pub fn quadratic_to(&mut self, to: Point, ctrl: Point) {
        self.segments.push(Segment::Quadratic {
            from: self.current,
            to,
            ctrl,
        });
        self.current = to;
    }

    /// Returns the segments in drawing order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the point the path starts at.
    pub fn start(&self) -> Point {
        self.segments
            .first()
            .map(Segment::start)
            .unwrap_or(self.current)
    }

    /// Returns the current point (the end of the last segment).
    pub fn end(&self) -> Point {
        self.current
    }

    /// Returns the path traversed in the opposite direction.
    ///
    /// Segment order reverses and every segment reverses itself. An empty
    /// path reverses to an empty path anchored at the same point.
    pub fn reversed(&self) -> Path {
        if self.segments.is_empty() {
            return Path::new(self.current);
        }
        let segments: Vec<Segment> = self.segments.iter().rev().map(Segment::reversed).collect();
        let current = segments.last().map(Segment::end).unwrap_or(self.current);
        Path { current, segments }
    }

    /// Returns true when the path starts off running right-to-left.
    ///
    /// Backends flip start-anchored label alignment when this holds so
    /// the text still reads left-to-right.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptyPath`] on a path with no segments.
    pub fn is_right_to_left(&self) -> Result<bool, PathError> {
        self.segments
            .first()
            .map(Segment::is_right_to_left)
            .ok_or(PathError::EmptyPath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_path() -> Path {
        let mut path = Path::new(Point::new(0.0, 0.0));
        path.line_to(Point::new(1.0, 0.0));
        path.curve_to(
            Point::new(3.0, 2.0),
            Point::new(1.5, 0.5),
            Point::new(2.5, 1.5),
        );
        path.quadratic_to(Point::new(4.0, 2.0), Point::new(3.5, 2.5));
        path.arc_to(Point::new(5.0, 1.0), 1.0, 1.0, 0.0, false, true);
        path
    }

    #[test]
    fn test_segments_share_current_point() {
        let path = sample_path();
        for pair in path.segments().windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    #[test]
    fn test_segment_reversal_rules() {
        let cubic = Segment::Cubic {
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 1.0),
            ctrl1: Point::new(0.2, 0.0),
            ctrl2: Point::new(0.8, 1.0),
        };
        match cubic.reversed() {
            Segment::Cubic {
                from,
                to,
                ctrl1,
                ctrl2,
            } => {
                assert_eq!(from, Point::new(1.0, 1.0));
                assert_eq!(to, Point::new(0.0, 0.0));
                assert_eq!(ctrl1, Point::new(0.8, 1.0));
                assert_eq!(ctrl2, Point::new(0.2, 0.0));
            }
            other => panic!("expected cubic, got {other:?}"),
        }

        let arc = Segment::Arc {
            from: Point::new(0.0, 0.0),
            to: Point::new(2.0, 0.0),
            rx: 1.0,
            ry: 1.0,
            x_axis_rotation: 0.0,
            large_arc: false,
            sweep: true,
        };
        match arc.reversed() {
            Segment::Arc { sweep, from, .. } => {
                assert!(!sweep);
                assert_eq!(from, Point::new(2.0, 0.0));
            }
            other => panic!("expected arc, got {other:?}"),
        }

        let quad = Segment::Quadratic {
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 0.0),
            ctrl: Point::new(0.5, 1.0),
        };
        match quad.reversed() {
            Segment::Quadratic { ctrl, .. } => assert_eq!(ctrl, Point::new(0.5, 1.0)),
            other => panic!("expected quadratic, got {other:?}"),
        }
    }

    #[test]
    fn test_path_reverse_roundtrip() {
        let path = sample_path();
        assert_eq!(path.reversed().reversed(), path);
    }

    #[test]
    fn test_reverse_empty_path_keeps_anchor() {
        let path = Path::new(Point::new(2.0, 3.0));
        let reversed = path.reversed();
        assert!(reversed.is_empty());
        assert_eq!(reversed.end(), Point::new(2.0, 3.0));
    }

    #[test]
    fn test_reversed_endpoints_swap() {
        let path = sample_path();
        let reversed = path.reversed();
        assert_eq!(reversed.start(), path.end());
        assert_eq!(reversed.end(), path.start());
    }

    #[test]
    fn test_direction_left_to_right() {
        let mut path = Path::new(Point::new(0.0, 0.0));
        path.line_to(Point::new(5.0, 1.0));
        assert_eq!(path.is_right_to_left(), Ok(false));
    }

    #[test]
    fn test_direction_right_to_left() {
        let mut path = Path::new(Point::new(5.0, 0.0));
        path.line_to(Point::new(0.0, 1.0));
        assert_eq!(path.is_right_to_left(), Ok(true));
    }

    #[test]
    fn test_direction_of_empty_path_fails() {
        let path = Path::new(Point::new(0.0, 0.0));
        assert_eq!(path.is_right_to_left(), Err(PathError::EmptyPath));
    }

    fn arb_point() -> impl Strategy<Value = Point> {
        (-100.0..100.0, -100.0..100.0).prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_reverse_roundtrip(points in prop::collection::vec(arb_point(), 2..10)) {
            let mut path = Path::new(points[0]);
            for chunk in points[1..].chunks(2) {
                match chunk {
                    [to] => path.line_to(*to),
                    [ctrl, to] => path.quadratic_to(*to, *ctrl),
                    _ => unreachable!(),
                }
            }
            prop_assert_eq!(path.reversed().reversed(), path);
        }
    }
}

//! Geometric primitives: points, affine transforms, and rectangles.
//!
//! All types are small `Copy` values; arithmetic never mutates in place.
//! Coordinates are in the caller's figure space; backends compose their
//! own device transform on top.

use std::fmt;
use std::ops::{Add, BitOr, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A point in 2D.
///
/// Supports `+`, `-`, scalar `*` (both orders), and `|`: `a | b` keeps
/// the horizontal position of `a` and the vertical position of `b`.
///
/// Formatting pins both coordinates to three decimal places so emitted
/// documents are byte-stable:
///
/// ```
/// use vellum_core::geometry::Point;
///
/// assert_eq!(Point::new(1.0, -2.5).to_string(), "1.000,-2.500");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a point from polar coordinates (angle in radians).
    pub fn polar(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    /// Returns the x-coordinate of the point.
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point.
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the distance between this point and another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns the angle (in radians) of the ray from the origin to this
    /// point.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Returns the midpoint between this point and another point.
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;

    fn mul(self, point: Point) -> Point {
        point * self
    }
}

impl BitOr for Point {
    type Output = Point;

    /// `a | b` is the point with the x-coordinate of `a` and the
    /// y-coordinate of `b`.
    fn bitor(self, other: Point) -> Point {
        Point::new(self.x, other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3},{:.3}", self.x, self.y)
    }
}

/// A point on a curve, optionally annotated with the tangent angle (in
/// degrees) the curve should have while passing through it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    point: Point,
    angle: Option<f64>,
}

impl Waypoint {
    /// Creates a waypoint with no tangent hint.
    pub fn new(point: Point) -> Self {
        Self { point, angle: None }
    }

    /// Creates a waypoint that forces the curve tangent to `degrees`.
    pub fn with_angle(point: Point, degrees: f64) -> Self {
        Self {
            point,
            angle: Some(degrees),
        }
    }

    /// Returns the position of the waypoint.
    pub fn point(self) -> Point {
        self.point
    }

    /// Returns the tangent hint, if any, in degrees.
    pub fn angle(self) -> Option<f64> {
        self.angle
    }
}

impl From<Point> for Waypoint {
    fn from(point: Point) -> Self {
        Self::new(point)
    }
}

impl From<(Point, f64)> for Waypoint {
    fn from((point, degrees): (Point, f64)) -> Self {
        Self::with_angle(point, degrees)
    }
}

/// A 2D affine transformation
///
/// ```text
/// | a  b  e |
/// | c  d  f |
/// | 0  0  1 |
/// ```
///
/// Transforms compose with `*`, applying right-to-left: `(t1 * t2)(p)`
/// equals `t1(t2(p))`. [`Transform::inverse`] fails on a zero
/// determinant rather than producing a garbage transform.
///
/// Applying a transform to a point includes the translation part; to
/// transform a direction, apply it to a difference of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Transform {
    /// Creates a transform from its six coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Returns the identity transform.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Returns a rotation by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin(), -angle.sin(), angle.cos(), 0.0, 0.0)
    }

    /// Returns a rescaling of the x-axis by `x` and the y-axis by `y`.
    pub fn scale(x: f64, y: f64) -> Self {
        Self::new(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    /// Returns a translation by `(e, f)`.
    pub fn translation(e: f64, f: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, e, f)
    }

    /// Applies the transform to a point.
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.b * point.y + self.e,
            self.c * point.x + self.d * point.y + self.f,
        )
    }

    /// Returns the inverse of the transform.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonInvertibleTransform`] when the
    /// determinant is zero.
    pub fn inverse(&self) -> Result<Transform, GeometryError> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 {
            return Err(GeometryError::NonInvertibleTransform);
        }
        Ok(Transform::new(
            self.d / det,
            -self.b / det,
            -self.c / det,
            self.a / det,
            (self.b * self.f - self.d * self.e) / det,
            (self.c * self.e - self.a * self.f) / det,
        ))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, other: Transform) -> Transform {
        Transform::new(
            self.a * other.a + self.b * other.c,
            self.a * other.b + self.b * other.d,
            self.c * other.a + self.d * other.c,
            self.c * other.b + self.d * other.d,
            self.a * other.e + self.b * other.f + self.e,
            self.c * other.e + self.d * other.f + self.f,
        )
    }
}

/// An axis-aligned rectangle given by two corner points.
///
/// The constructor reorders its inputs so that `min.x <= max.x` and
/// `min.y <= max.y` always hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    /// Creates a rectangle from two opposite corners, in any order.
    pub fn new(fst: Point, snd: Point) -> Self {
        let (x1, x2) = if fst.x > snd.x {
            (snd.x, fst.x)
        } else {
            (fst.x, snd.x)
        };
        let (y1, y2) = if fst.y > snd.y {
            (snd.y, fst.y)
        } else {
            (fst.y, snd.y)
        };
        Self {
            min: Point::new(x1, y1),
            max: Point::new(x2, y2),
        }
    }

    /// Returns the smallest rectangle containing every point in the list.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPointList`] on an empty list.
    pub fn bounding_box(points: &[Point]) -> Result<Rect, GeometryError> {
        let first = points.first().ok_or(GeometryError::EmptyPointList)?;
        let mut x0 = first.x;
        let mut x1 = first.x;
        let mut y0 = first.y;
        let mut y1 = first.y;
        for p in &points[1..] {
            x0 = x0.min(p.x);
            x1 = x1.max(p.x);
            y0 = y0.min(p.y);
            y1 = y1.max(p.y);
        }
        Ok(Rect::new(Point::new(x0, y0), Point::new(x1, y1)))
    }

    /// Returns the corner with the smallest coordinates.
    pub fn min(self) -> Point {
        self.min
    }

    /// Returns the corner with the largest coordinates.
    pub fn max(self) -> Point {
        self.max
    }

    /// Returns the width of the rectangle.
    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the height of the rectangle.
    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the center of the rectangle.
    pub fn center(self) -> Point {
        self.min.midpoint(self.max)
    }

    /// Returns true if the point lies inside the rectangle (edges
    /// included).
    pub fn contains(self, p: Point) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Returns the southwest corner of the rectangle.
    pub fn southwest(self) -> Point {
        self.min
    }

    /// Returns the southeast corner of the rectangle.
    pub fn southeast(self) -> Point {
        Point::new(self.max.x, self.min.y)
    }

    /// Returns the northwest corner of the rectangle.
    pub fn northwest(self) -> Point {
        Point::new(self.min.x, self.max.y)
    }

    /// Returns the northeast corner of the rectangle.
    pub fn northeast(self) -> Point {
        self.max
    }

    /// Returns the point at the center of the south side.
    pub fn south(self) -> Point {
        Point::new((self.min.x + self.max.x) / 2.0, self.min.y)
    }

    /// Returns the point at the center of the north side.
    pub fn north(self) -> Point {
        Point::new((self.min.x + self.max.x) / 2.0, self.max.y)
    }

    /// Returns the point at the center of the west side.
    pub fn west(self) -> Point {
        Point::new(self.min.x, (self.min.y + self.max.y) / 2.0)
    }

    /// Returns the point at the center of the east side.
    pub fn east(self) -> Point {
        Point::new(self.max.x, (self.min.y + self.max.y) / 2.0)
    }

    /// Splits the rectangle into stacked sub-rectangles whose heights are
    /// proportional to the given weights, from the bottom up. The
    /// sub-rectangles share the full width and tile the rectangle with no
    /// gap or overlap.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidWeights`] unless every weight is
    /// positive.
    pub fn vertical_split(self, weights: &[f64]) -> Result<Vec<Rect>, GeometryError> {
        let total = validate_weights(weights)?;
        let height = self.height();
        let mut cumulative = 0.0;
        let mut output = Vec::with_capacity(weights.len());
        for &w in weights {
            let y1 = self.min.y + cumulative * height / total;
            cumulative += w;
            let y2 = self.min.y + cumulative * height / total;
            output.push(Rect::new(
                Point::new(self.min.x, y1),
                Point::new(self.max.x, y2),
            ));
        }
        Ok(output)
    }

    /// Splits the rectangle into side-by-side sub-rectangles whose widths
    /// are proportional to the given weights, from left to right.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidWeights`] unless every weight is
    /// positive.
    pub fn horizontal_split(self, weights: &[f64]) -> Result<Vec<Rect>, GeometryError> {
        let total = validate_weights(weights)?;
        let width = self.width();
        let mut cumulative = 0.0;
        let mut output = Vec::with_capacity(weights.len());
        for &w in weights {
            let x1 = self.min.x + cumulative * width / total;
            cumulative += w;
            let x2 = self.min.x + cumulative * width / total;
            output.push(Rect::new(
                Point::new(x1, self.min.y),
                Point::new(x2, self.max.y),
            ));
        }
        Ok(output)
    }

    /// Returns a sub-rectangle of at most the requested size, centered in
    /// this rectangle. Each dimension is only shrunk, never grown.
    pub fn fit(self, width: f64, height: f64) -> Rect {
        let (x1, x2) = if self.width() > width {
            (
                (self.min.x + self.max.x - width) / 2.0,
                (self.min.x + self.max.x + width) / 2.0,
            )
        } else {
            (self.min.x, self.max.x)
        };
        let (y1, y2) = if self.height() > height {
            (
                (self.min.y + self.max.y - height) / 2.0,
                (self.min.y + self.max.y + height) / 2.0,
            )
        } else {
            (self.min.y, self.max.y)
        };
        Rect::new(Point::new(x1, y1), Point::new(x2, y2))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.min, self.max)
    }
}

fn validate_weights(weights: &[f64]) -> Result<f64, GeometryError> {
    if weights.is_empty() || weights.iter().any(|&w| w <= 0.0) {
        return Err(GeometryError::InvalidWeights);
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(GeometryError::InvalidWeights);
    }
    Ok(total)
}

//! Vellum Core Types and Definitions
//!
//! This crate provides the foundational types for the Vellum figure
//! library. It includes:
//!
//! - **Geometry**: points, affine transforms, and rectangles
//!   ([`geometry`] module)
//! - **Paths**: backend-agnostic path segments and the curve and
//!   rounded-polyline builders ([`path`] module)
//! - **Styles**: the typed style record and its dash, arrow, and text
//!   vocabularies ([`style`] module)
//! - **Colors**: configured-color handling with CSS color support
//!   ([`color::Color`])
//! - **Draw**: z-ordered fragment collection and label types
//!   ([`draw`] module)

pub mod color;
pub mod draw;
pub mod error;
pub mod fmt;
pub mod geometry;
pub mod path;
pub mod style;

pub use self::color::Color;
pub use error::{GeometryError, PathError, StyleError};
pub use geometry::{Point, Rect, Transform, Waypoint};
pub use path::{Path, Segment};
pub use style::{ArrowSpec, Dash, Paint, Style};

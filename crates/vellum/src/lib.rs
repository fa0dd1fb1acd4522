//! Vellum: describe a vector figure once, render it everywhere.
//!
//! A figure is drawn through the [`Layer`] trait — lines, smooth curves
//! through waypoints, polylines with rounded corners, circles,
//! rectangles, text, and embedded pictures — and serialized by one of
//! two backends:
//!
//! - [`SvgLayer`] emits a scalable-vector-graphics document;
//! - [`TikzLayer`] emits TikZ macros for a TeX document.
//!
//! The two produce visually equivalent output from the same calls, and
//! [`MultiLayer`] drives both in a single pass.
//!
//! # Example
//!
//! ```
//! use vellum::{Layer, Point, Rect, RenderOptions, Style, SvgLayer};
//!
//! # fn main() -> Result<(), vellum::VellumError> {
//! let mut layer = SvgLayer::new();
//! layer.line(
//!     Point::new(0.0, 0.0),
//!     Point::new(5.0, 0.0),
//!     &[],
//!     Style::new().with_arrow("->".parse().unwrap()),
//! )?;
//!
//! let mut out = Vec::new();
//! layer.render(
//!     Rect::new(Point::new(-1.0, -1.0), Point::new(6.0, 1.0)),
//!     &mut out,
//!     &RenderOptions::default(),
//!     true,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod layer;
pub mod svg;
pub mod tikz;

pub use config::RenderConfig;
pub use error::VellumError;
pub use layer::{Layer, MultiLayer, NoLayer, RenderOptions};
pub use self::svg::SvgLayer;
pub use tikz::TikzLayer;

// The core vocabulary, re-exported so callers need a single dependency.
pub use vellum_core::draw::{Label, LabelPos};
pub use vellum_core::geometry::{Point, Rect, Transform, Waypoint};
pub use vellum_core::style::{ArrowSpec, Dash, Paint, Style};

//! Drawing support shared by every backend: the z-ordered fragment
//! collection and path label types.

pub mod label;
pub mod stack;

pub use label::{Label, LabelPos};
pub use stack::LayerStack;

/// Default paint-order bucket for edge-like primitives (lines, polylines,
/// edges). Drawn first, underneath shapes.
pub const EDGE_Z_INDEX: i32 = 0;

/// Default paint-order bucket for shape-like primitives (text,
/// rectangles, circles, pictures, polygons, shapes). Drawn after edges so
/// fills sit over connecting lines.
pub const SHAPE_Z_INDEX: i32 = 1;

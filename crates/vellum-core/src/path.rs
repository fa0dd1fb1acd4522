//! Backend-agnostic path model and construction.
//!
//! A [`Path`] is an ordered run of [`Segment`]s sharing a current point:
//! each segment starts where the previous one ended. Paths know how to
//! reverse themselves and whether they run predominantly right-to-left,
//! which backends use to keep labels reading left-to-right.
//!
//! The [`builder`] submodule turns point sequences into paths: smooth
//! curves through waypoints (with tangent hints resolved by [`angles`])
//! and polylines with optional corner rounding.

pub mod angles;
pub mod builder;
mod segment;

pub use segment::{Path, Segment};

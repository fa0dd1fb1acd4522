//! The typed style record and its vocabularies.
//!
//! A [`Style`] carries every recognized styling property as an explicit
//! optional field, plus an ordered escape-hatch map of backend-native
//! attributes that are passed through verbatim. Backends *consume* the
//! fields they interpret via the `take_*` methods, so a style that has
//! been resolved once contributes nothing on a second pass and anything
//! left in the escape hatch is, by construction, unrecognized.
//!
//! # Example
//!
//! ```
//! use vellum_core::style::{Dash, Style};
//!
//! let style = Style::new()
//!     .with_thickness(2.0)
//!     .with_dash("dashed".parse::<Dash>().unwrap())
//!     .with_draw("red")
//!     .rounded();
//! ```

pub mod arrow;
pub mod dash;
pub mod text;

use indexmap::IndexMap;

pub use arrow::{ArrowSpec, Tip};
pub use dash::Dash;
pub use text::{TextPosition, TextSize};

/// Ink selection for a stroke or fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paint {
    /// Explicitly no ink (`draw: none` / `fill: none`).
    None,
    /// A color name passed to the backend verbatim. Each backend has its
    /// own vocabulary of legal values; no validation happens here.
    Color(String),
}

impl Paint {
    /// Creates a verbatim color paint.
    pub fn color(name: impl Into<String>) -> Self {
        Paint::Color(name.into())
    }
}

/// The styling properties of one drawing call.
///
/// Every field is optional; an absent field means "backend default".
/// See the crate-level docs for the consumption discipline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    thickness: Option<f64>,
    dash: Option<Dash>,
    draw: Option<Paint>,
    fill: Option<Paint>,
    opacity: Option<f64>,
    rounded: bool,
    arrow: Option<ArrowSpec>,
    looseness: Option<f64>,
    z_index: Option<i32>,
    text_size: Option<TextSize>,
    font_family: Option<String>,
    text_color: Option<String>,
    position: Option<TextPosition>,
    extra: IndexMap<String, Option<String>>,
}

impl Style {
    /// Creates an empty style (all backend defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Line thickness as a multiple of the base stroke width (default 1).
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }

    /// Dash pattern for strokes.
    pub fn with_dash(mut self, dash: Dash) -> Self {
        self.dash = Some(dash);
        self
    }

    /// Stroke color, passed to the backend verbatim.
    pub fn with_draw(mut self, color: impl Into<String>) -> Self {
        self.draw = Some(Paint::Color(color.into()));
        self
    }

    /// Suppresses the stroke entirely.
    pub fn without_draw(mut self) -> Self {
        self.draw = Some(Paint::None);
        self
    }

    /// Fill color, passed to the backend verbatim.
    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(Paint::Color(color.into()));
        self
    }

    /// Fill opacity in `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Rounds corners and line joins; for polylines this also switches
    /// the geometric corner-rounding construction on.
    pub fn rounded(mut self) -> Self {
        self.rounded = true;
        self
    }

    /// Arrow tips for the two ends of the path.
    pub fn with_arrow(mut self, arrow: ArrowSpec) -> Self {
        self.arrow = Some(arrow);
        self
    }

    /// Curvature factor for multi-point edges (default 1).
    pub fn with_looseness(mut self, looseness: f64) -> Self {
        self.looseness = Some(looseness);
        self
    }

    /// Paint-order bucket override.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Text size for text primitives.
    pub fn with_text_size(mut self, size: TextSize) -> Self {
        self.text_size = Some(size);
        self
    }

    /// Font family for text primitives.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Text color for text primitives, passed verbatim.
    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    /// Placement of a text primitive relative to its anchor point.
    pub fn with_position(mut self, position: TextPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Adds a backend-native attribute passed through verbatim.
    ///
    /// A `None` value emits a bare flag (TikZ) or an empty attribute
    /// value (SVG).
    pub fn with_extra(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Consumes the thickness, if set.
    pub fn take_thickness(&mut self) -> Option<f64> {
        self.thickness.take()
    }

    /// Consumes the dash pattern, if set.
    pub fn take_dash(&mut self) -> Option<Dash> {
        self.dash.take()
    }

    /// Consumes the stroke paint, if set.
    pub fn take_draw(&mut self) -> Option<Paint> {
        self.draw.take()
    }

    /// Consumes the fill paint, if set.
    pub fn take_fill(&mut self) -> Option<Paint> {
        self.fill.take()
    }

    /// Consumes the fill opacity, if set.
    pub fn take_opacity(&mut self) -> Option<f64> {
        self.opacity.take()
    }

    /// Consumes the rounded flag, leaving it unset.
    pub fn take_rounded(&mut self) -> bool {
        std::mem::take(&mut self.rounded)
    }

    /// Consumes the arrow specification, if set.
    pub fn take_arrow(&mut self) -> Option<ArrowSpec> {
        self.arrow.take()
    }

    /// Consumes the looseness factor, if set.
    pub fn take_looseness(&mut self) -> Option<f64> {
        self.looseness.take()
    }

    /// Consumes the z-index override, if set.
    pub fn take_z_index(&mut self) -> Option<i32> {
        self.z_index.take()
    }

    /// Consumes the text size, if set.
    pub fn take_text_size(&mut self) -> Option<TextSize> {
        self.text_size.take()
    }

    /// Consumes the font family, if set.
    pub fn take_font_family(&mut self) -> Option<String> {
        self.font_family.take()
    }

    /// Consumes the text color, if set.
    pub fn take_text_color(&mut self) -> Option<String> {
        self.text_color.take()
    }

    /// Consumes the text position, if set.
    pub fn take_position(&mut self) -> Option<TextPosition> {
        self.position.take()
    }

    /// Returns the rounded flag without consuming it (the path builder
    /// needs to see it before the style resolver runs).
    pub fn is_rounded(&self) -> bool {
        self.rounded
    }

    /// Returns the z-index override without consuming it (primitives
    /// need it to pick their paint-order default).
    pub fn z_index(&self) -> Option<i32> {
        self.z_index
    }

    /// Drains the backend passthrough attributes, preserving insertion
    /// order.
    pub fn drain_extra(&mut self) -> IndexMap<String, Option<String>> {
        std::mem::take(&mut self.extra)
    }

    /// Returns true once every recognized field and passthrough entry has
    /// been consumed.
    pub fn is_consumed(&self) -> bool {
        self.thickness.is_none()
            && self.dash.is_none()
            && self.draw.is_none()
            && self.fill.is_none()
            && self.opacity.is_none()
            && !self.rounded
            && self.arrow.is_none()
            && self.looseness.is_none()
            && self.z_index.is_none()
            && self.text_size.is_none()
            && self.font_family.is_none()
            && self.text_color.is_none()
            && self.position.is_none()
            && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let mut style = Style::new()
            .with_thickness(2.0)
            .with_draw("red")
            .with_fill("blue")
            .with_opacity(0.5)
            .rounded()
            .with_looseness(1.5)
            .with_z_index(3);

        assert_eq!(style.take_thickness(), Some(2.0));
        assert_eq!(style.take_draw(), Some(Paint::Color("red".into())));
        assert_eq!(style.take_fill(), Some(Paint::Color("blue".into())));
        assert_eq!(style.take_opacity(), Some(0.5));
        assert!(style.take_rounded());
        assert_eq!(style.take_looseness(), Some(1.5));
        assert_eq!(style.take_z_index(), Some(3));
        assert!(style.is_consumed());
    }

    #[test]
    fn test_take_consumes() {
        let mut style = Style::new().with_thickness(2.0);
        assert_eq!(style.take_thickness(), Some(2.0));
        // The second pass finds nothing.
        assert_eq!(style.take_thickness(), None);
    }

    #[test]
    fn test_without_draw_is_explicit_none() {
        let mut style = Style::new().without_draw();
        assert_eq!(style.take_draw(), Some(Paint::None));
    }

    #[test]
    fn test_extra_preserves_insertion_order() {
        let mut style = Style::new()
            .with_extra("stroke-linecap", Some("round".into()))
            .with_extra("marker-mid", None)
            .with_extra("class", Some("wire".into()));
        let extra: Vec<String> = style.drain_extra().into_keys().collect();
        assert_eq!(extra, vec!["stroke-linecap", "marker-mid", "class"]);
        assert!(style.is_consumed());
    }

    #[test]
    fn test_empty_style_is_consumed() {
        assert!(Style::new().is_consumed());
    }
}

//! SVG attribute resolution.
//!
//! Translates the recognized style fields into SVG presentation
//! attributes, consuming them from the style as it goes. Lengths are
//! derived from the device point size and formatted with two significant
//! digits so the output stays byte-stable.

use indexmap::IndexMap;

use vellum_core::fmt::sig;
use vellum_core::style::{Paint, Style, TextSize};

/// Converts typographic points to centimeters.
pub(crate) fn pt_to_cm(x: f64) -> f64 {
    x * 2.54 / 72.27
}

/// Resolves the stroke width in device units: thickness 1 corresponds to
/// a 0.4pt stroke.
pub(crate) fn stroke_width(style: &mut Style, pt: f64) -> f64 {
    0.4 * pt * style.take_thickness().unwrap_or(1.0)
}

/// Resolves the stroke/fill attributes of a path, consuming the
/// recognized fields. Returns the attributes in emission order.
pub(crate) fn path_attributes(
    style: &mut Style,
    sw: f64,
    pt: f64,
    default_stroke: &str,
) -> IndexMap<String, String> {
    let mut attrs = IndexMap::new();
    attrs.insert("stroke-width".to_string(), sig(sw, 2));

    if let Some(dash) = style.take_dash() {
        attrs.insert("stroke-dasharray".to_string(), dash.svg_dasharray(sw, pt));
    }

    let stroke = match style.take_draw() {
        None => default_stroke.to_string(),
        Some(Paint::None) => "none".to_string(),
        Some(Paint::Color(color)) => color,
    };
    attrs.insert("stroke".to_string(), stroke);

    let fill = match style.take_fill() {
        None => "none".to_string(),
        Some(paint) => {
            // Opacity rides along with an explicit fill, even `none`.
            if let Some(opacity) = style.take_opacity() {
                attrs.insert("fill-opacity".to_string(), format!("{opacity}"));
            }
            match paint {
                Paint::None => "none".to_string(),
                Paint::Color(color) => color,
            }
        }
    };
    attrs.insert("fill".to_string(), fill);

    if style.take_rounded() {
        attrs.insert("stroke-linejoin".to_string(), "round".to_string());
    }

    attrs
}

/// Resolves the text attributes, consuming the recognized fields.
pub(crate) fn text_attributes(
    style: &mut Style,
    default_color: &str,
) -> IndexMap<String, String> {
    let mut attrs = IndexMap::new();
    if let Some(size) = style.take_text_size() {
        let font_size = match size {
            TextSize::Small => "x-small",
            TextSize::Large => "x-large",
        };
        attrs.insert("font-size".to_string(), font_size.to_string());
    }
    attrs.insert(
        "font-family".to_string(),
        style
            .take_font_family()
            .unwrap_or_else(|| "sans-serif".to_string()),
    );
    attrs.insert(
        "fill".to_string(),
        style
            .take_text_color()
            .unwrap_or_else(|| default_color.to_string()),
    );
    attrs
}

//! Box sizes for table layout.
//!
//! There is no layout engine here. A [`BoxMeasurer`] reports the rendered size of an element
//! when the host knows it; the default [`StyleBoxMeasurer`] reads pixel sizes declared in the
//! markup itself.

use crate::dom::{node, style};
use markup5ever_rcdom::Handle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

pub trait BoxMeasurer {
    /// Size of the element's border box, or `None` when unknown.
    fn measure(&self, element: &Handle) -> Option<BoxSize>;
}

/// Reads `width`/`height` in pixels from the inline style or the legacy attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleBoxMeasurer;

impl BoxMeasurer for StyleBoxMeasurer {
    fn measure(&self, element: &Handle) -> Option<BoxSize> {
        let width = declared_pixels(element, "width");
        let height = declared_pixels(element, "height");
        if width.is_none() && height.is_none() {
            return None;
        }
        Some(BoxSize {
            width: width.unwrap_or(0.0),
            height: height.unwrap_or(0.0),
        })
    }
}

fn declared_pixels(element: &Handle, name: &str) -> Option<f64> {
    style::get_style(element, name)
        .and_then(|v| parse_pixels(&v))
        .or_else(|| node::get_attribute(element, name).and_then(|v| parse_pixels(&v)))
}

/// `12px` or a bare number; anything else (percentages, `em`) is unknown.
pub fn parse_pixels(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite() && *n >= 0.0)
}

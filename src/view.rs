//! Narrow rendering interface used by the carousel and zoom state machines.

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlImageElement};

/// Cursor hint shown over the whole page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Auto,
    ZoomIn,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Auto => "auto",
            Cursor::ZoomIn => "zoom-in",
        }
    }
}

/// Side effects a widget may have on its rendering target.
pub trait ViewEffects {
    /// CSS `transform-origin` and `transform` values.
    fn set_transform(&mut self, origin: &str, transform: &str);
    /// Horizontal scroll offset of a strip, in pixels.
    fn set_scroll_offset(&mut self, offset_px: f64);
    fn set_image_source(&mut self, src: &str);
    fn set_cursor(&mut self, cursor: Cursor);
}

/// [`ViewEffects`] applied to a live DOM element.
pub struct DomView {
    target: HtmlElement,
}

impl DomView {
    pub fn new(target: HtmlElement) -> Self {
        Self { target }
    }

    fn set_style(element: &HtmlElement, property: &str, value: &str) {
        if let Err(e) = element.style().set_property(property, value) {
            warn!("Failed to set {}={} : {:?}", property, value, e);
        }
    }
}

impl ViewEffects for DomView {
    fn set_transform(&mut self, origin: &str, transform: &str) {
        Self::set_style(&self.target, "transform-origin", origin);
        Self::set_style(&self.target, "transform", transform);
    }

    fn set_scroll_offset(&mut self, offset_px: f64) {
        Self::set_style(
            &self.target,
            "transform",
            &format!("translateX(-{}px)", offset_px),
        );
    }

    fn set_image_source(&mut self, src: &str) {
        match self.target.dyn_ref::<HtmlImageElement>() {
            Some(img) => img.set_src(src),
            None => {
                if let Err(e) = self.target.set_attribute("src", src) {
                    warn!("Failed to set image source: {:?}", e);
                }
            }
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        Self::set_style(&gloo_utils::body(), "cursor", cursor.as_css());
    }
}

/// Records effects instead of applying them.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingView {
    pub transforms: Vec<(String, String)>,
    pub offsets: Vec<f64>,
    pub sources: Vec<String>,
    pub cursors: Vec<Cursor>,
}

#[cfg(test)]
impl ViewEffects for RecordingView {
    fn set_transform(&mut self, origin: &str, transform: &str) {
        self.transforms.push((origin.to_string(), transform.to_string()));
    }

    fn set_scroll_offset(&mut self, offset_px: f64) {
        self.offsets.push(offset_px);
    }

    fn set_image_source(&mut self, src: &str) {
        self.sources.push(src.to_string());
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursors.push(cursor);
    }
}

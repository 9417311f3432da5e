//! Hover zoom for product images.

use crate::config::ZOOM_SCALE;
use crate::view::{Cursor, ViewEffects};

/// Viewport-relative bounding box of the hovered element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Origin {
    Center,
    Point { x: f64, y: f64 },
}

impl Origin {
    pub fn as_css(&self) -> String {
        match self {
            Origin::Center => "center".to_string(),
            Origin::Point { x, y } => format!("{}px {}px", x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub origin: Origin,
    pub scale: f64,
    pub cursor: Cursor,
}

impl ZoomTransform {
    pub fn transform_css(&self) -> String {
        format!("scale({})", self.scale)
    }

    pub fn apply<V: ViewEffects>(&self, view: &mut V) {
        view.set_transform(&self.origin.as_css(), &self.transform_css());
        view.set_cursor(self.cursor);
    }
}

/// Magnify around the pointer (`client_x`, `client_y`) inside `bounds`.
pub fn zoom_in(client_x: f64, client_y: f64, bounds: Bounds) -> ZoomTransform {
    ZoomTransform {
        origin: Origin::Point {
            x: client_x - bounds.left,
            y: client_y - bounds.top,
        },
        scale: ZOOM_SCALE,
        cursor: Cursor::ZoomIn,
    }
}

pub fn zoom_out() -> ZoomTransform {
    ZoomTransform {
        origin: Origin::Center,
        scale: 1.0,
        cursor: Cursor::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RecordingView;

    #[test_log::test]
    fn zoom_in_is_relative_to_the_element() {
        let zoom = zoom_in(130.0, 250.0, Bounds { left: 100.0, top: 200.0 });
        assert_eq!(zoom.origin, Origin::Point { x: 30.0, y: 50.0 });
        assert_eq!(zoom.origin.as_css(), "30px 50px");
        assert_eq!(zoom.transform_css(), "scale(2.5)");
        assert_eq!(zoom.cursor, Cursor::ZoomIn);
    }

    #[test_log::test]
    fn zoom_out_restores_defaults() {
        let mut view = RecordingView::default();
        zoom_in(10.0, 10.0, Bounds { left: 0.0, top: 0.0 }).apply(&mut view);
        zoom_out().apply(&mut view);
        assert_eq!(
            view.transforms,
            vec![
                ("10px 10px".to_string(), "scale(2.5)".to_string()),
                ("center".to_string(), "scale(1)".to_string()),
            ]
        );
        assert_eq!(view.cursors, vec![Cursor::ZoomIn, Cursor::Auto]);
    }
}

//! Image carousels: a scrolling strip and a single-image viewer.

use crate::config::CAROUSEL_MARGIN_PX;
use crate::view::ViewEffects;
use log::{debug, warn};

/// Horizontally scrolled strip of thumbnails, paged one item at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCarousel {
    offset: f64,
    max_offset: f64,
    pitch: f64,
    margin: f64,
}

impl Default for StaticCarousel {
    fn default() -> Self {
        Self::new(CAROUSEL_MARGIN_PX)
    }
}

impl StaticCarousel {
    pub fn new(margin: f64) -> Self {
        Self {
            offset: 0.0,
            max_offset: 0.0,
            pitch: 0.0,
            margin,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn max_offset(&self) -> f64 {
        self.max_offset
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Recompute how far the strip can scroll from the container's
    /// `scrollWidth` and `clientWidth`.
    pub fn update_max_offset(&mut self, scroll_width: f64, client_width: f64) {
        self.max_offset = (scroll_width - client_width).max(0.0);
        self.offset = self.offset.min(self.max_offset);
    }

    /// Recompute the pitch from the first item's width. Keeps the old pitch
    /// when the strip has no item.
    pub fn update_item_width(&mut self, item_width: Option<f64>) {
        if let Some(width) = item_width {
            self.pitch = width + self.margin;
        }
    }

    pub fn decrease(&mut self) {
        self.offset = (self.offset - self.pitch).max(0.0);
        debug!("Carousel offset {}", self.offset);
    }

    pub fn increase(&mut self) {
        self.offset = (self.offset + self.pitch).min(self.max_offset);
        debug!("Carousel offset {}", self.offset);
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    pub fn can_decrease(&self) -> bool {
        self.offset > 0.0
    }

    pub fn can_increase(&self) -> bool {
        self.offset < self.max_offset
    }

    pub fn present<V: ViewEffects>(&self, view: &mut V) {
        view.set_scroll_offset(self.offset);
    }
}

/// One large image with previous/next buttons that wrap around.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicCarousel {
    images: Vec<String>,
    current: usize,
}

impl DynamicCarousel {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, current: 0 }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_image(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.images.len() > self.current + 1
    }

    pub fn next(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.current = if self.has_next() { self.current + 1 } else { 0 };
    }

    pub fn previous(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.current = if self.has_previous() {
            self.current - 1
        } else {
            self.images.len() - 1
        };
    }

    /// Jump to a thumbnail. Returns `false` and stays put if out of range.
    pub fn pick(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            warn!(
                "Ignoring image index {} for a carousel of {} images",
                index,
                self.images.len()
            );
            return false;
        }
        self.current = index;
        true
    }

    pub fn present<V: ViewEffects>(&self, view: &mut V) {
        if let Some(src) = self.current_image() {
            view.set_image_source(src);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RecordingView;

    fn three_images() -> DynamicCarousel {
        DynamicCarousel::new(vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()])
    }

    #[test_log::test]
    fn next_wraps_to_first() {
        let mut carousel = three_images();
        carousel.pick(2);
        carousel.next();
        assert_eq!(carousel.current(), 0);
    }

    #[test_log::test]
    fn previous_wraps_to_last() {
        let mut carousel = three_images();
        carousel.previous();
        assert_eq!(carousel.current(), 2);
        assert_eq!(carousel.current_image(), Some("c.jpg"));
    }

    #[test_log::test]
    fn pick_out_of_range_is_ignored() {
        let mut carousel = three_images();
        assert!(carousel.pick(1));
        assert!(!carousel.pick(3));
        assert_eq!(carousel.current(), 1);
    }

    #[test_log::test]
    fn empty_carousel_does_not_move() {
        let mut carousel = DynamicCarousel::new(Vec::new());
        carousel.next();
        carousel.previous();
        assert_eq!(carousel.current(), 0);
        assert_eq!(carousel.current_image(), None);

        let mut view = RecordingView::default();
        carousel.present(&mut view);
        assert!(view.sources.is_empty());
    }

    #[test_log::test]
    fn presenting_sets_the_image_source() {
        let mut carousel = three_images();
        let mut view = RecordingView::default();
        carousel.present(&mut view);
        carousel.next();
        carousel.present(&mut view);
        assert_eq!(view.sources, vec!["a.jpg", "b.jpg"]);
    }

    #[test_log::test]
    fn strip_pages_by_pitch_and_clamps() {
        let mut strip = StaticCarousel::default();
        strip.update_item_width(Some(120.0));
        strip.update_max_offset(1000.0, 400.0);
        assert_eq!(strip.pitch(), 128.0);

        for _ in 0..10 {
            strip.increase();
        }
        assert_eq!(strip.offset(), 600.0);
        assert!(!strip.can_increase());

        strip.decrease();
        assert_eq!(strip.offset(), 472.0);
        for _ in 0..10 {
            strip.decrease();
        }
        assert_eq!(strip.offset(), 0.0);
        assert!(!strip.can_decrease());
    }

    #[test_log::test]
    fn strip_narrower_than_viewport_never_scrolls() {
        let mut strip = StaticCarousel::default();
        strip.update_item_width(Some(100.0));
        strip.update_max_offset(300.0, 400.0);
        strip.increase();
        assert_eq!(strip.offset(), 0.0);
    }

    #[test_log::test]
    fn missing_item_keeps_pitch() {
        let mut strip = StaticCarousel::new(8.0);
        strip.update_item_width(Some(50.0));
        strip.update_item_width(None);
        assert_eq!(strip.pitch(), 58.0);
    }

    #[test_log::test]
    fn reset_and_present() {
        let mut strip = StaticCarousel::default();
        strip.update_item_width(Some(92.0));
        strip.update_max_offset(500.0, 200.0);
        strip.increase();
        let mut view = RecordingView::default();
        strip.present(&mut view);
        strip.reset();
        strip.present(&mut view);
        assert_eq!(view.offsets, vec![100.0, 0.0]);
    }
}

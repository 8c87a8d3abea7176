//! Headless viewport for native runs and tests

use crate::sim::Viewport;

/// An in-memory page: fixed viewport size over a document of known height
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessViewport {
    width: f32,
    height: f32,
    document_height: f32,
    scroll_y: f32,
}

impl HeadlessViewport {
    pub fn new(width: f32, height: f32, document_height: f32) -> Self {
        Self {
            width,
            height,
            document_height,
            scroll_y: 0.0,
        }
    }

    /// Largest scroll offset the document allows
    pub fn max_scroll(&self) -> f32 {
        (self.document_height - self.height).max(0.0)
    }

    /// Simulate the visitor scrolling the page
    pub fn set_scroll(&mut self, y: f32) {
        self.scroll_y = y.min(self.max_scroll()).max(0.0);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.set_scroll(self.scroll_y);
    }
}

impl Viewport for HeadlessViewport {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f32) {
        self.set_scroll(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_clamps_to_document() {
        let mut vp = HeadlessViewport::new(1200.0, 1000.0, 3000.0);
        vp.scroll_to(-50.0);
        assert_eq!(vp.scroll_y(), 0.0);
        vp.scroll_to(2500.0);
        assert_eq!(vp.scroll_y(), 2000.0);
        vp.resize(1200.0, 2800.0);
        assert_eq!(vp.scroll_y(), 200.0);
    }
}

//! Horizontal viewport over a picker strip
//!
//! Tracks the visible region of a strip and keeps the scroll offset inside
//! `[0, content_width - width]` whenever it is changed.

use std::ops::Range;

use super::sync::ScrollIntent;

/// Viewport that scrolls horizontally through strip content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalViewport {
    /// Current scroll offset from the left edge
    offset: f64,
    /// Width of the visible area
    width: f64,
    /// Total width of the content
    content_width: f64,
}

impl HorizontalViewport {
    /// Create a viewport, clamping the initial offset
    pub fn new(offset: f64, width: f64, content_width: f64) -> Self {
        let mut viewport = Self {
            offset: 0.0,
            width: width.max(0.0),
            content_width: content_width.max(0.0),
        };
        viewport.set_offset(offset);
        viewport
    }

    /// Largest valid offset
    pub fn max_offset(&self) -> f64 {
        (self.content_width - self.width).max(0.0)
    }

    /// Visible span of content coordinates
    pub fn visible_range(&self) -> Range<f64> {
        self.offset..(self.offset + self.width).min(self.content_width)
    }

    /// Set a new offset directly
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    /// Perform a scroll intent emitted by the synchronizer
    pub fn scroll_to(&mut self, intent: &ScrollIntent) {
        self.set_offset(intent.offset);
    }

    /// Set the viewport width (e.g., on resize)
    pub fn set_width(&mut self, width: f64) {
        self.width = width.max(0.0);
        self.set_offset(self.offset);
    }

    /// Set the content width (e.g., when the window is rebuilt)
    pub fn set_content_width(&mut self, content_width: f64) {
        self.content_width = content_width.max(0.0);
        self.set_offset(self.offset);
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    pub fn is_at_start(&self) -> bool {
        self.offset <= 0.0
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.max_offset()
    }
}

use std::time::Instant;

use tracing::{debug, info};

use mandeltouch_core::Viewport;
use mandeltouch_render::{DebugMarker, RenderMode, RenderScheduler};

use crate::config::GestureTuning;

/// Monotonic millisecond clock measured from application start.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Clock {
    start: Instant,
}

impl Clock {
    pub(crate) fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub(crate) fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Everything a frame needs that outlives a single event: the view, the
/// render scheduler, the surface size, and the tap marker.
///
/// Gesture recognizers get `&mut AppContext` and go through the helpers
/// below, so every view change also marks the frame dirty.
pub(crate) struct AppContext {
    pub(crate) viewport: Viewport,
    pub(crate) scheduler: RenderScheduler,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) marker: Option<DebugMarker>,
    pub(crate) show_tap_marker: bool,
    pub(crate) tuning: GestureTuning,
}

impl AppContext {
    pub(crate) fn new(
        viewport: Viewport,
        width: u32,
        height: u32,
        mode: RenderMode,
        tuning: GestureTuning,
    ) -> Self {
        Self {
            viewport,
            scheduler: RenderScheduler::new(mode),
            width: width.max(1),
            height: height.max(1),
            marker: None,
            show_tap_marker: true,
            tuning,
        }
    }

    /// Zoom by `factor` anchored at a surface pixel, clamping to the bounds.
    pub(crate) fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
        self.viewport
            .zoom_at_screen(sx, sy, self.width, self.height, factor);
        self.scheduler.mark_dirty();
    }

    /// Like [`zoom_at`](Self::zoom_at) but does nothing if the result would
    /// leave the zoom bounds. Returns whether the zoom happened.
    pub(crate) fn try_zoom_at(&mut self, sx: f64, sy: f64, factor: f64) -> bool {
        if !self.viewport.zoom_in_bounds(factor) {
            debug!(zoom = self.viewport.zoom, factor, "Zoom skipped at bound");
            return false;
        }
        self.zoom_at(sx, sy, factor);
        true
    }

    /// Move the content by a screen-space delta in pixels.
    pub(crate) fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_pixels(dx, dy, self.width);
        self.scheduler.mark_dirty();
    }

    pub(crate) fn reset_view(&mut self) {
        self.viewport.reset();
        self.scheduler.mark_dirty();
    }

    /// Record the surface's new size. The viewport is left alone.
    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == (self.width, self.height) {
            return;
        }
        info!(width, height, "Surface resized");
        self.width = width;
        self.height = height;
        self.scheduler.mark_dirty();
    }

    pub(crate) fn place_marker(&mut self, x: f64, y: f64, now_ms: u64) {
        if self.show_tap_marker {
            self.marker = Some(DebugMarker::new(x as i64, y as i64, now_ms));
            self.scheduler.mark_dirty();
        }
    }
}

#[cfg(test)]
impl AppContext {
    /// Default view on an 800×600 surface, as used throughout the gesture tests.
    pub(crate) fn for_tests() -> Self {
        Self::new(
            Viewport::default(),
            800,
            600,
            RenderMode::Sequential,
            GestureTuning::default(),
        )
    }
}

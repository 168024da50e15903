use mandeltouch_core::Viewport;
use tracing::debug;

use crate::buffer::DisplaySurface;
use crate::overlay::DebugMarker;
use crate::renderer::{render, RenderMode, RenderStats};

/// Decides when a frame must be recomputed and drives the render pass.
///
/// Anything that changes what the surface should show (pan, zoom, reset,
/// resize, a new or expired marker) calls [`mark_dirty`](Self::mark_dirty);
/// [`tick`](Self::tick) then redraws at most once per frame.
#[derive(Debug)]
pub struct RenderScheduler {
    dirty: bool,
    mode: RenderMode,
    frames_rendered: u64,
    last_stats: Option<RenderStats>,
}

impl RenderScheduler {
    /// A new scheduler starts dirty so the first frame is drawn.
    pub fn new(mode: RenderMode) -> Self {
        Self {
            dirty: true,
            mode,
            frames_rendered: 0,
            last_stats: None,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn last_stats(&self) -> Option<&RenderStats> {
        self.last_stats.as_ref()
    }

    /// Run one frame: expire the marker, re-render if dirty, then present.
    ///
    /// Returns the stats of the render pass if one ran.
    pub fn tick<S: DisplaySurface>(
        &mut self,
        viewport: &mut Viewport,
        surface: &mut S,
        marker: &mut Option<DebugMarker>,
        now_ms: u64,
    ) -> Option<RenderStats> {
        if marker.as_ref().is_some_and(|m| !m.is_active(now_ms)) {
            debug!("Tap marker expired");
            *marker = None;
            self.dirty = true;
        }

        let stats = if self.dirty {
            let stats = render(viewport, surface.buffer_mut(), self.mode);
            if let Some(m) = marker {
                m.draw(surface.buffer_mut());
            }
            self.dirty = false;
            self.frames_rendered += 1;
            self.last_stats = Some(stats);
            Some(stats)
        } else {
            None
        };

        surface.present();
        stats
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(RenderMode::default())
    }
}

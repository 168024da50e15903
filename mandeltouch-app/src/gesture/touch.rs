use tracing::debug;

use mandeltouch_core::Complex;

use crate::context::AppContext;
use crate::gesture::Point;

/// Fingers beyond this are ignored.
const MAX_FINGERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Finger {
    id: u64,
    /// Normalized `[0, 1]` position.
    pos: Point,
}

/// Baseline captured when the second finger lands.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    /// Finger separation in surface pixels.
    distance: f64,
    zoom: f64,
    /// World point under the midpoint at pinch start; stays under the
    /// midpoint for the rest of the pinch.
    anchor: Complex,
}

/// A qualifying tap, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    at_ms: u64,
    pos: Point,
}

/// What a finger-up classified as a tap ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TapOutcome {
    DoubleTapReset,
    Debounced,
    Zoomed,
    /// Single tap that would have passed `MAX_ZOOM`.
    AtMaxZoom,
}

/// Turns finger events into tap-zoom, double-tap reset, one-finger pan,
/// hold-zoom and two-finger pinch.
#[derive(Debug)]
pub(crate) struct TouchGestures {
    fingers: Vec<Finger>,
    panning: bool,
    /// Normalized position of the last applied pan step.
    last_pan: Point,
    /// Normalized position where the current one-finger session began.
    tap_origin: Point,
    pinch: Option<Pinch>,
    /// `None` once movement has cancelled the hold for this session.
    hold_started_at_ms: Option<u64>,
    hold_active: bool,
    /// Normalized hold anchor.
    hold_pos: Point,
    last_tap: Option<Tap>,
    last_zoom_at_ms: Option<u64>,
}

impl TouchGestures {
    pub(crate) fn new() -> Self {
        Self {
            fingers: Vec::with_capacity(MAX_FINGERS),
            panning: false,
            last_pan: Point::default(),
            tap_origin: Point::default(),
            pinch: None,
            hold_started_at_ms: None,
            hold_active: false,
            hold_pos: Point::default(),
            last_tap: None,
            last_zoom_at_ms: None,
        }
    }

    /// Whether any finger is down.
    pub(crate) fn is_active(&self) -> bool {
        !self.fingers.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn finger_count(&self) -> usize {
        self.fingers.len()
    }

    #[cfg(test)]
    pub(crate) fn is_panning(&self) -> bool {
        self.panning
    }

    pub(crate) fn finger_down(&mut self, ctx: &mut AppContext, id: u64, pos: Point, now_ms: u64) {
        if self.fingers.len() >= MAX_FINGERS || self.fingers.iter().any(|f| f.id == id) {
            return;
        }
        self.fingers.push(Finger { id, pos });

        if self.fingers.len() == 1 {
            self.panning = false;
            self.last_pan = pos;
            self.tap_origin = pos;
            self.pinch = None;
            self.hold_started_at_ms = Some(now_ms);
            self.hold_active = false;
            self.hold_pos = pos;
            debug!(id, x = pos.x, y = pos.y, "Touch session started");
            return;
        }

        self.panning = false;
        self.hold_active = false;
        self.hold_started_at_ms = None;
        let (a, b) = (self.fingers[0].pos, self.fingers[1].pos);
        let distance = pixel_distance(a, b, ctx.width, ctx.height);
        let mid = to_pixels(a.midpoint(b), ctx.width, ctx.height);
        self.pinch = (distance > 0.0).then(|| Pinch {
            distance,
            zoom: ctx.viewport.zoom,
            anchor: ctx.viewport.screen_to_world(mid.x, mid.y, ctx.width, ctx.height),
        });
        debug!(distance, zoom = ctx.viewport.zoom, "Pinch started");
    }

    pub(crate) fn finger_move(&mut self, ctx: &mut AppContext, id: u64, pos: Point) {
        let Some(finger) = self.fingers.iter_mut().find(|f| f.id == id) else {
            return;
        };
        finger.pos = pos;

        match self.fingers.len() {
            1 => self.one_finger_move(ctx, pos),
            2 => self.pinch_move(ctx),
            _ => {}
        }
    }

    fn one_finger_move(&mut self, ctx: &mut AppContext, pos: Point) {
        let moved = pixel_distance(pos, self.tap_origin, ctx.width, ctx.height);
        if moved > ctx.tuning.hold_cancel_px && self.hold_started_at_ms.is_some() {
            self.hold_active = false;
            self.hold_started_at_ms = None;
        }
        if moved > ctx.tuning.touch_pan_threshold_px && !self.panning {
            debug!(moved, "Touch pan started");
            self.panning = true;
            self.last_pan = pos;
        }
        if self.panning {
            let dx = (pos.x - self.last_pan.x) * ctx.width as f64;
            let dy = (pos.y - self.last_pan.y) * ctx.height as f64;
            if dx != 0.0 || dy != 0.0 {
                ctx.pan(dx, dy);
            }
            self.last_pan = pos;
        }
    }

    fn pinch_move(&mut self, ctx: &mut AppContext) {
        let Some(pinch) = self.pinch else {
            return;
        };
        let (a, b) = (self.fingers[0].pos, self.fingers[1].pos);
        let (w, h) = (ctx.width, ctx.height);
        let current = pixel_distance(a, b, w, h);
        let mid = to_pixels(a.midpoint(b), w, h);

        ctx.viewport.zoom = pinch.zoom * (current / pinch.distance);
        ctx.viewport.clamp_zoom();
        let scale = ctx.viewport.scale(w);
        ctx.viewport.center = Complex::new(
            pinch.anchor.re - (mid.x - w as f64 / 2.0) * scale,
            pinch.anchor.im - (mid.y - h as f64 / 2.0) * scale,
        );
        ctx.scheduler.mark_dirty();
    }

    /// Handle a finger lifting. Returns the tap outcome when the release
    /// counted as a tap.
    pub(crate) fn finger_up(
        &mut self,
        ctx: &mut AppContext,
        id: u64,
        pos: Point,
        now_ms: u64,
    ) -> Option<TapOutcome> {
        let index = self.fingers.iter().position(|f| f.id == id)?;

        if self.fingers.len() == MAX_FINGERS {
            self.drop_pinch_finger(index);
            return None;
        }

        let travel_x = (pos.x - self.tap_origin.x).abs() * ctx.width as f64;
        let travel_y = (pos.y - self.tap_origin.y).abs() * ctx.height as f64;
        let max_travel = ctx.tuning.tap_max_travel_px;
        let is_tap = !self.panning && travel_x < max_travel && travel_y < max_travel;
        self.end_session();

        is_tap.then(|| self.process_tap(ctx, to_pixels(pos, ctx.width, ctx.height), now_ms))
    }

    /// The platform took a contact away. Nothing it did so far counts as a
    /// tap.
    pub(crate) fn finger_cancel(&mut self, id: u64) {
        let Some(index) = self.fingers.iter().position(|f| f.id == id) else {
            return;
        };
        if self.fingers.len() == MAX_FINGERS {
            self.drop_pinch_finger(index);
        } else {
            debug!(id, "Touch cancelled");
            self.end_session();
        }
    }

    /// Leave a pinch: the other finger carries on panning.
    fn drop_pinch_finger(&mut self, index: usize) {
        self.fingers.remove(index);
        let remaining = self.fingers[0].pos;
        self.panning = true;
        self.last_pan = remaining;
        self.tap_origin = remaining;
        self.pinch = None;
        debug!("Pinch ended, panning with remaining finger");
    }

    fn end_session(&mut self) {
        self.fingers.clear();
        self.panning = false;
        self.pinch = None;
        self.hold_started_at_ms = None;
        self.hold_active = false;
    }

    /// Double-tap is checked before debounce; both use the same clock.
    fn process_tap(&mut self, ctx: &mut AppContext, tap: Point, now_ms: u64) -> TapOutcome {
        ctx.place_marker(tap.x, tap.y, now_ms);
        let tuning = ctx.tuning;

        let is_double = self.last_tap.is_some_and(|last| {
            now_ms.saturating_sub(last.at_ms) < tuning.double_tap_time_ms
                && tap.distance_to(last.pos) < tuning.double_tap_dist_px
        });
        if is_double {
            debug!("Double tap, resetting view");
            ctx.reset_view();
            self.last_zoom_at_ms = Some(now_ms);
            self.last_tap = None;
            return TapOutcome::DoubleTapReset;
        }

        let debounced = self
            .last_zoom_at_ms
            .is_some_and(|at| now_ms.saturating_sub(at) < tuning.tap_debounce_ms);
        self.last_tap = Some(Tap { at_ms: now_ms, pos: tap });
        if debounced {
            debug!("Tap debounced");
            return TapOutcome::Debounced;
        }

        if ctx.viewport.zoom * tuning.click_zoom_factor > mandeltouch_core::MAX_ZOOM {
            return TapOutcome::AtMaxZoom;
        }
        ctx.zoom_at(tap.x, tap.y, tuning.click_zoom_factor);
        self.last_zoom_at_ms = Some(now_ms);
        debug!(zoom = ctx.viewport.zoom, "Tap zoom");
        TapOutcome::Zoomed
    }

    /// Per-frame update: start and apply one-finger hold-zoom. Touch hold
    /// only ever zooms in.
    pub(crate) fn tick(&mut self, ctx: &mut AppContext, now_ms: u64) {
        if self.fingers.len() != 1 || self.panning {
            return;
        }
        if !self.hold_active {
            match self.hold_started_at_ms {
                Some(start) if now_ms.saturating_sub(start) >= ctx.tuning.hold_zoom_delay_ms => {
                    debug!("Touch hold-zoom started");
                    self.hold_active = true;
                }
                _ => return,
            }
        }
        let anchor = to_pixels(self.hold_pos, ctx.width, ctx.height);
        if ctx.viewport.zoom * ctx.tuning.hold_zoom_rate <= mandeltouch_core::MAX_ZOOM {
            ctx.zoom_at(anchor.x, anchor.y, ctx.tuning.hold_zoom_rate);
        }
    }
}

fn to_pixels(p: Point, width: u32, height: u32) -> Point {
    Point::new(p.x * width as f64, p.y * height as f64)
}

/// Distance between two normalized points, measured in surface pixels.
fn pixel_distance(a: Point, b: Point, width: u32, height: u32) -> f64 {
    to_pixels(a, width, height).distance_to(to_pixels(b, width, height))
}

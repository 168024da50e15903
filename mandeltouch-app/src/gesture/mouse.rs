use tracing::debug;

use crate::context::AppContext;
use crate::gesture::Point;
use crate::input::PointerButton;

/// Where the mouse gesture currently stands. At most one button is tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MouseState {
    Idle,
    /// Primary or secondary is down and the pointer has stayed put.
    Pressed {
        button: PointerButton,
        origin: Point,
        pressed_at_ms: u64,
    },
    /// Dragging; the view follows the pointer.
    Panning { button: PointerButton, last: Point },
    /// Held still long enough; zooming every frame until release.
    HoldZooming { button: PointerButton },
}

/// Turns mouse events into click-zoom, drag-pan, hold-zoom and wheel-zoom.
#[derive(Debug)]
pub(crate) struct MouseGestures {
    state: MouseState,
    /// Latest known pointer position; hold-zoom anchors here.
    pointer: Point,
}

impl MouseGestures {
    pub(crate) fn new() -> Self {
        Self {
            state: MouseState::Idle,
            pointer: Point::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> MouseState {
        self.state
    }

    pub(crate) fn button_down(&mut self, button: PointerButton, at: Point, now_ms: u64) {
        if self.state != MouseState::Idle {
            return;
        }
        self.pointer = at;
        self.state = match button {
            PointerButton::Middle => MouseState::Panning { button, last: at },
            PointerButton::Primary | PointerButton::Secondary => MouseState::Pressed {
                button,
                origin: at,
                pressed_at_ms: now_ms,
            },
        };
        debug!(?button, x = at.x, y = at.y, state = ?self.state, "Mouse down");
    }

    pub(crate) fn button_up(&mut self, ctx: &mut AppContext, button: PointerButton, at: Point) {
        self.pointer = at;
        match self.state {
            MouseState::Pressed { button: held, .. } if held == button => {
                let factor = zoom_factor(button, ctx.tuning.click_zoom_factor);
                if ctx.try_zoom_at(at.x, at.y, factor) {
                    debug!(zoom = ctx.viewport.zoom, "Click zoom");
                }
                self.state = MouseState::Idle;
            }
            MouseState::Panning { button: held, .. } | MouseState::HoldZooming { button: held }
                if held == button =>
            {
                self.state = MouseState::Idle;
            }
            _ => {}
        }
    }

    pub(crate) fn pointer_move(&mut self, ctx: &mut AppContext, at: Point) {
        self.pointer = at;
        match self.state {
            MouseState::Pressed { button, origin, .. } => {
                let threshold = ctx.tuning.drag_threshold_px;
                if (at.x - origin.x).abs() > threshold || (at.y - origin.y).abs() > threshold {
                    debug!(?button, "Press became a drag");
                    self.state = MouseState::Panning { button, last: at };
                }
            }
            MouseState::Panning { button, last } => {
                ctx.pan(at.x - last.x, at.y - last.y);
                self.state = MouseState::Panning { button, last: at };
            }
            MouseState::Idle | MouseState::HoldZooming { .. } => {}
        }
    }

    /// Wheel up zooms in, wheel down zooms out, anchored at the pointer.
    pub(crate) fn wheel(&mut self, ctx: &mut AppContext, delta_y: f64, at: Point) {
        if delta_y == 0.0 {
            return;
        }
        let rate = ctx.tuning.wheel_zoom_factor;
        let factor = if delta_y > 0.0 { rate } else { 1.0 / rate };
        ctx.zoom_at(at.x, at.y, factor);
    }

    /// Per-frame update: promote a still press to hold-zoom and apply one
    /// step of hold-zoom.
    pub(crate) fn tick(&mut self, ctx: &mut AppContext, now_ms: u64) {
        let button = match self.state {
            MouseState::Pressed {
                button,
                pressed_at_ms,
                ..
            } => {
                if now_ms.saturating_sub(pressed_at_ms) < ctx.tuning.hold_zoom_delay_ms {
                    return;
                }
                debug!(?button, "Hold-zoom started");
                self.state = MouseState::HoldZooming { button };
                button
            }
            MouseState::HoldZooming { button } => button,
            MouseState::Idle | MouseState::Panning { .. } => return,
        };

        let factor = zoom_factor(button, ctx.tuning.hold_zoom_rate);
        ctx.try_zoom_at(self.pointer.x, self.pointer.y, factor);
    }
}

/// Primary zooms in by `rate`, secondary zooms out by its inverse.
fn zoom_factor(button: PointerButton, rate: f64) -> f64 {
    match button {
        PointerButton::Secondary => 1.0 / rate,
        _ => rate,
    }
}

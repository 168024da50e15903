//! Mouse and touch gesture recognizers sharing one [`AppContext`].

mod mouse;
mod touch;

pub(crate) use mouse::MouseGestures;
pub(crate) use touch::TouchGestures;

use crate::context::AppContext;
use crate::input::{normalize_touch, InputEvent};

/// A 2D position, in surface pixels or normalized units depending on use.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub(crate) const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub(crate) fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Routes input events to the recognizer for their modality.
#[derive(Debug)]
pub(crate) struct Gestures {
    pub(crate) mouse: MouseGestures,
    pub(crate) touch: TouchGestures,
}

impl Gestures {
    pub(crate) fn new() -> Self {
        Self {
            mouse: MouseGestures::new(),
            touch: TouchGestures::new(),
        }
    }

    /// Feed one event. Window-level events (`Resize`, `Quit`, `KeyEscape`)
    /// are not gestures and are ignored here.
    pub(crate) fn handle(&mut self, ctx: &mut AppContext, event: InputEvent, now_ms: u64) {
        match event {
            InputEvent::PointerDown { button, x, y } => {
                self.mouse.button_down(button, Point::new(x, y), now_ms)
            }
            InputEvent::PointerUp { button, x, y } => {
                self.mouse.button_up(ctx, button, Point::new(x, y))
            }
            InputEvent::PointerMove { x, y } => self.mouse.pointer_move(ctx, Point::new(x, y)),
            InputEvent::Wheel { delta_y, x, y } => self.mouse.wheel(ctx, delta_y, Point::new(x, y)),
            InputEvent::TouchDown { finger_id, x, y } => {
                let pos = touch_point(ctx, x, y);
                self.touch.finger_down(ctx, finger_id, pos, now_ms);
            }
            InputEvent::TouchMove { finger_id, x, y } => {
                let pos = touch_point(ctx, x, y);
                self.touch.finger_move(ctx, finger_id, pos);
            }
            InputEvent::TouchUp { finger_id, x, y } => {
                let pos = touch_point(ctx, x, y);
                self.touch.finger_up(ctx, finger_id, pos, now_ms);
            }
            InputEvent::TouchCancel { finger_id } => self.touch.finger_cancel(finger_id),
            InputEvent::Resize { .. } | InputEvent::Quit | InputEvent::KeyEscape => {}
        }
    }

    /// Continuous hold-zoom for whichever modality is active.
    pub(crate) fn tick(&mut self, ctx: &mut AppContext, now_ms: u64) {
        self.mouse.tick(ctx, now_ms);
        self.touch.tick(ctx, now_ms);
    }
}

fn touch_point(ctx: &AppContext, x: f64, y: f64) -> Point {
    let (x, y) = normalize_touch(x, y, ctx.width, ctx.height);
    Point::new(x, y)
}

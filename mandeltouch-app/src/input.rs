use eframe::egui;
use tracing::warn;

/// Mouse buttons the recognizers care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    fn from_egui(button: egui::PointerButton) -> Option<Self> {
        match button {
            egui::PointerButton::Primary => Some(Self::Primary),
            egui::PointerButton::Secondary => Some(Self::Secondary),
            egui::PointerButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

/// One discrete input notification.
///
/// Pointer coordinates are surface pixels; touch coordinates are normalized
/// to `[0, 1]` across the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum InputEvent {
    PointerDown { button: PointerButton, x: f64, y: f64 },
    PointerUp { button: PointerButton, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    Wheel { delta_y: f64, x: f64, y: f64 },
    TouchDown { finger_id: u64, x: f64, y: f64 },
    TouchUp { finger_id: u64, x: f64, y: f64 },
    TouchMove { finger_id: u64, x: f64, y: f64 },
    /// The platform withdrew a contact; it must not count as a release.
    TouchCancel { finger_id: u64 },
    Resize { width: u32, height: u32 },
    Quit,
    KeyEscape,
}

/// Some platforms report touch positions in pixels. Anything above 1.0 is
/// taken as pixels and divided by the window size.
pub(crate) fn normalize_touch(x: f64, y: f64, width: u32, height: u32) -> (f64, f64) {
    if x > 1.0 || y > 1.0 {
        warn!(x, y, "Touch coordinates not normalized, normalizing");
        (x / width.max(1) as f64, y / height.max(1) as f64)
    } else {
        (x, y)
    }
}

// ---------------------------------------------------------------------------
// egui adapter
// ---------------------------------------------------------------------------

/// The parts of one egui frame's input the adapter reads.
#[derive(Debug, Clone, Default)]
pub(crate) struct FrameInput {
    pub(crate) events: Vec<egui::Event>,
    pub(crate) scroll_y: f32,
    pub(crate) hover: Option<egui::Pos2>,
    pub(crate) close_requested: bool,
    pub(crate) pixels_per_point: f32,
}

impl FrameInput {
    pub(crate) fn capture(ctx: &egui::Context) -> Self {
        ctx.input(|i| Self {
            events: i.events.clone(),
            scroll_y: i.raw_scroll_delta.y,
            hover: i.pointer.hover_pos(),
            close_requested: i.viewport().close_requested(),
            pixels_per_point: i.pixels_per_point,
        })
    }
}

/// Translate this frame's egui input into [`InputEvent`]s local to `canvas`.
pub(crate) fn collect_events(
    ctx: &egui::Context,
    canvas: egui::Rect,
    touch_active: bool,
) -> Vec<InputEvent> {
    translate(&FrameInput::capture(ctx), canvas, touch_active)
}

/// Windowing backends also emit pointer events for the first finger of a
/// touch. Those are dropped whenever a touch gesture is in progress
/// (`touch_active`) or the frame carries touch events, so the two
/// recognizers never see the same contact twice.
///
/// Pointer positions come out in physical pixels, matching the surface.
pub(crate) fn translate(frame: &FrameInput, canvas: egui::Rect, touch_active: bool) -> Vec<InputEvent> {
    let suppress_pointer = touch_active
        || frame
            .events
            .iter()
            .any(|e| matches!(e, egui::Event::Touch { .. }));
    let ppp = if frame.pixels_per_point > 0.0 {
        frame.pixels_per_point as f64
    } else {
        1.0
    };
    let local = |pos: egui::Pos2| {
        (
            (pos.x - canvas.min.x) as f64 * ppp,
            (pos.y - canvas.min.y) as f64 * ppp,
        )
    };

    let mut out = Vec::with_capacity(frame.events.len() + 1);
    for event in &frame.events {
        match *event {
            egui::Event::Touch { id, phase, pos, .. } => {
                let x = ((pos.x - canvas.min.x) / canvas.width().max(1.0)).clamp(0.0, 1.0) as f64;
                let y = ((pos.y - canvas.min.y) / canvas.height().max(1.0)).clamp(0.0, 1.0) as f64;
                let finger_id = id.0;
                out.push(match phase {
                    egui::TouchPhase::Start => InputEvent::TouchDown { finger_id, x, y },
                    egui::TouchPhase::Move => InputEvent::TouchMove { finger_id, x, y },
                    egui::TouchPhase::End => InputEvent::TouchUp { finger_id, x, y },
                    egui::TouchPhase::Cancel => InputEvent::TouchCancel { finger_id },
                });
            }
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } if !suppress_pointer => {
                let Some(button) = PointerButton::from_egui(button) else {
                    continue;
                };
                let (x, y) = local(pos);
                if pressed {
                    if canvas.contains(pos) {
                        out.push(InputEvent::PointerDown { button, x, y });
                    }
                } else {
                    out.push(InputEvent::PointerUp { button, x, y });
                }
            }
            egui::Event::PointerMoved(pos) if !suppress_pointer => {
                let (x, y) = local(pos);
                out.push(InputEvent::PointerMove { x, y });
            }
            egui::Event::Key {
                key: egui::Key::Escape,
                pressed: true,
                ..
            } => out.push(InputEvent::KeyEscape),
            _ => {}
        }
    }

    if frame.scroll_y != 0.0 && !suppress_pointer {
        if let Some(pos) = frame.hover.filter(|p| canvas.contains(*p)) {
            let (x, y) = local(pos);
            out.push(InputEvent::Wheel {
                delta_y: frame.scroll_y as f64,
                x,
                y,
            });
        }
    }

    if frame.close_requested {
        out.push(InputEvent::Quit);
    }
    out
}

use crate::buffer::PixelBuffer;

/// How long a tap marker stays on screen.
pub const MARKER_LIFETIME_MS: u64 = 2000;

const MARKER_COLOR: u32 = 0xFF00_FF00;
const MARKER_ARM: i64 = 20;

/// Diagnostic cross drawn where the last tap landed. Purely visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugMarker {
    pub x: i64,
    pub y: i64,
    pub created_at_ms: u64,
}

impl DebugMarker {
    pub fn new(x: i64, y: i64, created_at_ms: u64) -> Self {
        Self {
            x,
            y,
            created_at_ms,
        }
    }

    pub fn is_active(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_at_ms) < MARKER_LIFETIME_MS
    }

    /// Paint a green cross centred on the marker, clipped to the buffer.
    pub fn draw(&self, buffer: &mut PixelBuffer) {
        for i in -MARKER_ARM..=MARKER_ARM {
            buffer.put_clipped(self.x + i, self.y, MARKER_COLOR);
            buffer.put_clipped(self.x, self.y + i, MARKER_COLOR);
        }
    }
}

use mandeltouch_core::is_interior;

/// Packed ARGB for points inside the set.
pub const INTERIOR: u32 = 0xFF00_0000;

/// Map an iteration count to a packed `0xAARRGGBB` color.
///
/// Interior points are opaque black. Everything else goes through a fixed
/// polynomial gradient of `t = iterations / max_iterations`:
/// `r = 9(1-t)t³`, `g = 15(1-t)²t²`, `b = 8.5(1-t)³t`, each scaled by 255,
/// truncated and clamped to a byte.
#[inline]
pub fn color_of(iterations: u32, max_iterations: u32) -> u32 {
    if is_interior(iterations, max_iterations) {
        return INTERIOR;
    }

    let t = iterations as f64 / max_iterations as f64;
    let s = 1.0 - t;

    let r = channel(9.0 * s * t * t * t * 255.0);
    let g = channel(15.0 * s * s * t * t * 255.0);
    let b = channel(8.5 * s * s * s * t * 255.0);

    INTERIOR | (r << 16) | (g << 8) | b
}

#[inline]
fn channel(v: f64) -> u32 {
    (v as i32).clamp(0, 255) as u32
}

/// Unpack `0xAARRGGBB` into `[r, g, b, a]` bytes for texture upload.
#[inline]
pub fn argb_to_rgba(argb: u32) -> [u8; 4] {
    [
        (argb >> 16) as u8,
        (argb >> 8) as u8,
        argb as u8,
        (argb >> 24) as u8,
    ]
}

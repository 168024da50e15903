use crate::complex::Complex;

/// Squared bailout radius: an orbit with `|z|² > 4` has escaped.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Escape-time iteration of `z ← z² + c` from `z₀ = 0`.
///
/// Returns the number of steps taken before `|z|²` exceeded
/// [`ESCAPE_RADIUS_SQ`], or `max_iterations` if the orbit stayed bounded
/// (the point is treated as inside the set). The bound is tested before
/// each step, so the result is always in `[0, max_iterations]`.
#[inline]
pub fn iterate(c: Complex, max_iterations: u32) -> u32 {
    let mut z = Complex::ZERO;
    let mut n = 0;

    while z.norm_sq() <= ESCAPE_RADIUS_SQ && n < max_iterations {
        z = z.square() + c;
        n += 1;
    }
    n
}

/// `true` if `iterations` means the point never escaped.
#[inline]
pub fn is_interior(iterations: u32, max_iterations: u32) -> bool {
    iterations >= max_iterations
}

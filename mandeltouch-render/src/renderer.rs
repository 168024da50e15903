use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::debug;

use mandeltouch_core::{iterate, Viewport};

use crate::buffer::PixelBuffer;
use crate::palette::color_of;

/// How the per-pixel loop is scheduled.
///
/// Both modes produce bit-identical buffers: every pixel is a pure function
/// of the viewport and its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One row after another on the calling thread.
    #[default]
    Sequential,
    /// Rows are spread across the Rayon thread pool.
    Parallel,
}

/// Summary of one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub width: u32,
    pub height: u32,
    pub elapsed: Duration,
    /// The viewport was corrupt and had to be reset before rendering.
    pub recovered: bool,
}

// ---------------------------------------------------------------------------
// Full-frame render
// ---------------------------------------------------------------------------

/// Fill every pixel of `buffer` from the current viewport.
///
/// The viewport is validated first and reset to its defaults if any field
/// is non-finite or non-positive.
pub fn render(viewport: &mut Viewport, buffer: &mut PixelBuffer, mode: RenderMode) -> RenderStats {
    let start = Instant::now();
    let recovered = viewport.sanitize();

    let view = *viewport;
    let (width, height) = (buffer.width, buffer.height);
    let row_len = width as usize;

    match mode {
        RenderMode::Sequential => buffer
            .pixels
            .chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(py, row)| fill_row(&view, width, height, py as u32, row)),
        RenderMode::Parallel => buffer
            .pixels
            .par_chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(py, row)| fill_row(&view, width, height, py as u32, row)),
    }

    let elapsed = start.elapsed();
    debug!(
        center_re = view.center.re,
        center_im = view.center.im,
        zoom = view.zoom,
        scale = view.scale(width),
        width,
        height,
        ?mode,
        elapsed_ms = elapsed.as_millis(),
        "Render complete"
    );

    RenderStats {
        width,
        height,
        elapsed,
        recovered,
    }
}

fn fill_row(view: &Viewport, width: u32, height: u32, py: u32, row: &mut [u32]) {
    let max_iter = view.max_iterations;
    for (px, out) in row.iter_mut().enumerate() {
        let c = view.screen_to_world(px as f64, py as f64, width, height);
        *out = color_of(iterate(c, max_iter), max_iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandeltouch_core::Complex;

    #[test]
    fn fills_whole_buffer() {
        let mut vp = Viewport::default();
        let mut buf = PixelBuffer::new(64, 48).unwrap();
        let stats = render(&mut vp, &mut buf, RenderMode::Sequential);

        assert_eq!((stats.width, stats.height), (64, 48));
        assert!(!stats.recovered);
        assert!(buf.pixels.iter().all(|&p| p >> 24 == 0xFF));
        assert!(buf.pixels.iter().any(|&p| p != 0xFF00_0000));
    }

    #[test]
    fn centre_pixel_of_default_view_is_interior() {
        // (-0.5, 0) lies in the main cardioid.
        let mut vp = Viewport::default();
        let mut buf = PixelBuffer::new(80, 60).unwrap();
        render(&mut vp, &mut buf, RenderMode::Sequential);
        assert_eq!(buf.pixels[30 * 80 + 40], 0xFF00_0000);
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut vp = Viewport::new(25.0, Complex::new(-0.743, 0.131), 300).unwrap();
        let mut seq = PixelBuffer::new(97, 53).unwrap();
        let mut par = PixelBuffer::new(97, 53).unwrap();
        render(&mut vp, &mut seq, RenderMode::Sequential);
        render(&mut vp, &mut par, RenderMode::Parallel);
        assert_eq!(seq, par);
    }

    #[test]
    fn corrupt_viewport_is_reset_before_rendering() {
        let mut vp = Viewport::default();
        vp.center.re = f64::NAN;
        let mut buf = PixelBuffer::new(16, 16).unwrap();
        let stats = render(&mut vp, &mut buf, RenderMode::Sequential);

        assert!(stats.recovered);
        assert_eq!(vp, Viewport::default());

        let mut expected = PixelBuffer::new(16, 16).unwrap();
        render(&mut Viewport::default(), &mut expected, RenderMode::Sequential);
        assert_eq!(buf, expected);
    }
}

use tracing::warn;

use crate::complex::Complex;
use crate::error::CoreError;

/// Smallest allowed zoom factor (zoomed out).
pub const MIN_ZOOM: f64 = 0.1;
/// Largest allowed zoom factor. Beyond this `f64` runs out of detail.
pub const MAX_ZOOM: f64 = 1e14;

pub const DEFAULT_ZOOM: f64 = 1.0;
pub const DEFAULT_CENTER: Complex = Complex::new(-0.5, 0.0);
pub const DEFAULT_MAX_ITERATIONS: u32 = 256;

/// Visible real-axis span, in complex-plane units, at `zoom == 1`.
const BASE_SPAN: f64 = 4.0;

/// The logical view onto the complex plane.
///
/// A viewport carries no pixel dimensions of its own: every transform takes
/// the current surface size, so resizing the window never touches it. The
/// scale is uniform in x and y, and screen-y grows in the same direction as
/// the imaginary axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Magnification, kept within `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f64,

    /// Point of the complex plane shown at the surface centre.
    pub center: Complex,

    /// Iteration budget per pixel.
    pub max_iterations: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            center: DEFAULT_CENTER,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl Viewport {
    /// Create a viewport with explicit parameters.
    pub fn new(zoom: f64, center: Complex, max_iterations: u32) -> crate::Result<Self> {
        if !zoom.is_finite() || !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            return Err(CoreError::InvalidZoom(zoom));
        }
        if max_iterations == 0 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self {
            zoom,
            center,
            max_iterations,
        })
    }

    /// Default view with a different iteration budget.
    pub fn with_max_iterations(max_iterations: u32) -> crate::Result<Self> {
        Self::new(DEFAULT_ZOOM, DEFAULT_CENTER, max_iterations)
    }

    /// Complex-plane units per pixel for a surface `width` pixels wide.
    #[inline]
    pub fn scale(&self, width: u32) -> f64 {
        BASE_SPAN / (width as f64 * self.zoom)
    }

    /// Map a (possibly fractional) pixel position to the complex plane.
    #[inline]
    pub fn screen_to_world(&self, px: f64, py: f64, width: u32, height: u32) -> Complex {
        self.center + offset_from_centre(px, py, width, height) * self.scale(width)
    }

    /// Multiply the zoom by `factor` and re-centre so that `world` stays
    /// under the screen point `(sx, sy)`.
    pub fn zoom_toward(
        &mut self,
        world: Complex,
        sx: f64,
        sy: f64,
        width: u32,
        height: u32,
        factor: f64,
    ) {
        self.zoom *= factor;
        self.clamp_zoom();
        self.center = world - offset_from_centre(sx, sy, width, height) * self.scale(width);
    }

    /// Zoom by `factor` anchored at the screen point `(sx, sy)`.
    pub fn zoom_at_screen(&mut self, sx: f64, sy: f64, width: u32, height: u32, factor: f64) {
        let world = self.screen_to_world(sx, sy, width, height);
        self.zoom_toward(world, sx, sy, width, height, factor);
    }

    /// Whether `zoom * factor` would stay inside the zoom bounds.
    #[inline]
    pub fn zoom_in_bounds(&self, factor: f64) -> bool {
        (MIN_ZOOM..=MAX_ZOOM).contains(&(self.zoom * factor))
    }

    /// Translate the view by a screen-space delta, so the content follows
    /// the pointer.
    pub fn pan_pixels(&mut self, dx: f64, dy: f64, width: u32) {
        self.center = self.center - Complex::new(dx, dy) * self.scale(width);
    }

    /// Restore the default zoom and centre. The iteration budget is kept.
    pub fn reset(&mut self) {
        self.zoom = DEFAULT_ZOOM;
        self.center = DEFAULT_CENTER;
    }

    pub fn clamp_zoom(&mut self) {
        self.zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// `true` when every field is usable for rendering.
    pub fn is_sane(&self) -> bool {
        self.zoom.is_finite() && self.zoom > 0.0 && self.center.is_finite() && self.max_iterations > 0
    }

    /// Reset the viewport if it has become corrupted. Returns `true` if a
    /// reset happened.
    pub fn sanitize(&mut self) -> bool {
        if self.is_sane() {
            return false;
        }
        warn!(
            zoom = self.zoom,
            center_re = self.center.re,
            center_im = self.center.im,
            max_iterations = self.max_iterations,
            "Invalid viewport, resetting to defaults"
        );
        self.reset();
        if self.max_iterations == 0 {
            self.max_iterations = DEFAULT_MAX_ITERATIONS;
        }
        true
    }
}

/// Pixel offset of `(px, py)` from the surface centre.
#[inline]
fn offset_from_centre(px: f64, py: f64, width: u32, height: u32) -> Complex {
    Complex::new(px - width as f64 / 2.0, py - height as f64 / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn close(a: Complex, b: Complex) -> bool {
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
    }

    #[test]
    fn default_viewport() {
        let vp = Viewport::default();
        assert_eq!(vp.zoom, 1.0);
        assert_eq!(vp.center, Complex::new(-0.5, 0.0));
        assert_eq!(vp.max_iterations, 256);
    }

    #[test]
    fn scale_spans_four_units_at_unit_zoom() {
        let vp = Viewport::default();
        assert!((vp.scale(800) * 800.0 - 4.0).abs() < EPSILON);
    }

    #[test]
    fn centre_pixel_maps_to_centre() {
        let vp = Viewport::default();
        let w = vp.screen_to_world(400.0, 300.0, 800, 600);
        assert!(close(w, vp.center));
    }

    #[test]
    fn corners_use_uniform_scale() {
        let vp = Viewport::default();
        let tl = vp.screen_to_world(0.0, 0.0, 800, 600);
        assert!(close(tl, Complex::new(-2.5, -1.5)));
        let br = vp.screen_to_world(800.0, 600.0, 800, 600);
        assert!(close(br, Complex::new(1.5, 1.5)));
    }

    #[test]
    fn zoom_keeps_anchor_under_cursor() {
        let mut vp = Viewport::default();
        for &(px, py, f) in &[(10.0, 20.0, 1.5), (799.0, 0.0, 0.5), (123.4, 456.7, 3.0)] {
            let before = vp.screen_to_world(px, py, 800, 600);
            vp.zoom_toward(before, px, py, 800, 600, f);
            let after = vp.screen_to_world(px, py, 800, 600);
            assert!(close(before, after), "{before} != {after}");
        }
    }

    #[test]
    fn identity_zoom_is_noop() {
        let mut vp = Viewport::new(7.0, Complex::new(-0.7, 0.3), 100).unwrap();
        let before = vp;
        vp.zoom_at_screen(17.0, 590.0, 800, 600, 1.0);
        assert_eq!(vp.zoom, before.zoom);
        assert!(close(vp.center, before.center));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = Viewport::default();
        vp.zoom_at_screen(400.0, 300.0, 800, 600, 1e20);
        assert_eq!(vp.zoom, MAX_ZOOM);
        vp.zoom_at_screen(400.0, 300.0, 800, 600, 1e-30);
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn zoom_in_bounds_checks_product() {
        let vp = Viewport::new(MAX_ZOOM / 1.2, DEFAULT_CENTER, 10).unwrap();
        assert!(!vp.zoom_in_bounds(1.5));
        assert!(vp.zoom_in_bounds(1.1));
        let vp = Viewport::new(0.12, DEFAULT_CENTER, 10).unwrap();
        assert!(!vp.zoom_in_bounds(1.0 / 1.5));
    }

    #[test]
    fn pan_moves_opposite_to_drag() {
        let mut vp = Viewport::default();
        vp.pan_pixels(100.0, -50.0, 800);
        assert!(close(vp.center, Complex::new(-1.0, 0.25)));
    }

    #[test]
    fn reset_keeps_iterations() {
        let mut vp = Viewport::new(1e6, Complex::new(0.3, 0.2), 999).unwrap();
        vp.reset();
        assert_eq!(vp.zoom, 1.0);
        assert_eq!(vp.center, DEFAULT_CENTER);
        assert_eq!(vp.max_iterations, 999);
    }

    #[test]
    fn sanitize_recovers_from_corruption() {
        let mut vp = Viewport::default();
        vp.zoom = f64::NAN;
        assert!(vp.sanitize());
        assert_eq!(vp, Viewport::default());

        vp.center.im = f64::INFINITY;
        assert!(vp.sanitize());
        assert_eq!(vp.center, DEFAULT_CENTER);

        vp.zoom = -3.0;
        assert!(vp.sanitize());
        assert_eq!(vp.zoom, 1.0);

        assert!(!vp.sanitize());
    }

    #[test]
    fn invalid_construction() {
        assert_eq!(
            Viewport::new(0.0, DEFAULT_CENTER, 10),
            Err(CoreError::InvalidZoom(0.0))
        );
        assert!(Viewport::new(f64::INFINITY, DEFAULT_CENTER, 10).is_err());
        assert_eq!(
            Viewport::with_max_iterations(0),
            Err(CoreError::InvalidMaxIterations(0))
        );
    }
}

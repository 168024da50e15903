use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use mandeltouch_core::{Complex, Viewport, DEFAULT_CENTER, DEFAULT_MAX_ITERATIONS, DEFAULT_ZOOM};
use mandeltouch_render::RenderMode;

const CONFIG_FILE: &str = "mandeltouch.json";

// ---------------------------------------------------------------------------
// Gesture tuning
// ---------------------------------------------------------------------------

/// Timing and distance thresholds shared by the mouse and touch recognizers.
///
/// Times are milliseconds, distances are surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTuning {
    /// Stillness required before a held button or finger starts zooming.
    pub hold_zoom_delay_ms: u64,
    /// Per-frame zoom factor while holding.
    pub hold_zoom_rate: f64,
    /// One-shot zoom for a click or tap.
    pub click_zoom_factor: f64,
    pub wheel_zoom_factor: f64,
    /// Per-axis mouse travel that turns a press into a drag.
    pub drag_threshold_px: f64,
    /// Finger travel that cancels a pending hold-zoom.
    pub hold_cancel_px: f64,
    /// Finger travel that turns a touch into a pan.
    pub touch_pan_threshold_px: f64,
    /// Per-axis finger travel still accepted as a tap on release.
    pub tap_max_travel_px: f64,
    pub double_tap_time_ms: u64,
    pub double_tap_dist_px: f64,
    /// Minimum gap between two zooming taps.
    pub tap_debounce_ms: u64,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            hold_zoom_delay_ms: 150,
            hold_zoom_rate: 1.16,
            click_zoom_factor: 1.5,
            wheel_zoom_factor: 1.15,
            drag_threshold_px: 10.0,
            hold_cancel_px: 5.0,
            touch_pan_threshold_px: 15.0,
            tap_max_travel_px: 20.0,
            double_tap_time_ms: 800,
            double_tap_dist_px: 200.0,
            tap_debounce_ms: 500,
        }
    }
}

impl GestureTuning {
    /// Zoom factors must be finite and > 1 (the inverse is used for zooming
    /// out); distances must be finite and non-negative.
    pub fn is_valid(&self) -> bool {
        let factor_ok = |f: f64| f.is_finite() && f > 1.0;
        let dist_ok = |d: f64| d.is_finite() && d >= 0.0;
        factor_ok(self.hold_zoom_rate)
            && factor_ok(self.click_zoom_factor)
            && factor_ok(self.wheel_zoom_factor)
            && dist_ok(self.drag_threshold_px)
            && dist_ok(self.hold_cancel_px)
            && dist_ok(self.touch_pan_threshold_px)
            && dist_ok(self.tap_max_travel_px)
            && dist_ok(self.double_tap_dist_px)
    }
}

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Startup settings. Read once; the app never writes this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Where the first frame looks. Reset still returns to the default view.
    #[serde(default)]
    pub start_center: Option<Complex>,
    #[serde(default)]
    pub start_zoom: Option<f64>,
    /// Spread the per-pixel loop over all cores.
    #[serde(default)]
    pub parallel_render: bool,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Draw a short-lived cross where each tap lands.
    #[serde(default = "default_true")]
    pub show_tap_marker: bool,
    #[serde(default = "default_true")]
    pub show_hud: bool,
    #[serde(default)]
    pub gestures: GestureTuning,
}

fn default_window_width() -> f32 {
    800.0
}
fn default_window_height() -> f32 {
    600.0
}
fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}
fn default_frame_interval_ms() -> u64 {
    16
}
fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            max_iterations: default_max_iterations(),
            start_center: None,
            start_zoom: None,
            parallel_render: false,
            frame_interval_ms: default_frame_interval_ms(),
            show_tap_marker: true,
            show_hud: true,
            gestures: GestureTuning::default(),
        }
    }
}

impl AppConfig {
    /// Load `mandeltouch.json` from next to the executable, falling back to
    /// defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<AppConfig>(&json) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    error!("Failed to parse config: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read config file: {e}");
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.max_iterations == 0 {
            warn!("max_iterations must be >= 1, using {}", defaults.max_iterations);
            self.max_iterations = defaults.max_iterations;
        }
        if !(self.window_width >= 1.0 && self.window_height >= 1.0) {
            warn!("Invalid window size, using defaults");
            self.window_width = defaults.window_width;
            self.window_height = defaults.window_height;
        }
        if self.frame_interval_ms == 0 {
            self.frame_interval_ms = defaults.frame_interval_ms;
        }
        if !self.gestures.is_valid() {
            warn!("Invalid gesture tuning, using defaults");
            self.gestures = GestureTuning::default();
        }
        self
    }

    /// The viewport the session opens with. An unusable start view is
    /// logged and replaced by the default one.
    pub fn start_viewport(&self) -> Viewport {
        let zoom = self.start_zoom.unwrap_or(DEFAULT_ZOOM);
        let center = self.start_center.unwrap_or(DEFAULT_CENTER);
        match Viewport::new(zoom, center, self.max_iterations) {
            Ok(viewport) if viewport.is_sane() => viewport,
            Ok(_) => {
                warn!("Start view is not finite, using the default view");
                self.default_viewport()
            }
            Err(e) => {
                warn!("Invalid start view: {e}");
                self.default_viewport()
            }
        }
    }

    fn default_viewport(&self) -> Viewport {
        Viewport {
            max_iterations: self.max_iterations.max(1),
            ..Viewport::default()
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.parallel_render {
            RenderMode::Parallel
        } else {
            RenderMode::Sequential
        }
    }
}

/// The config file sits next to the executable, or in the working
/// directory when the executable path is unavailable.
fn config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_iterations, 256);
        assert_eq!(config.frame_interval_ms, 16);
        assert!(config.show_tap_marker);
        assert!(!config.parallel_render);
        assert_eq!(config.gestures, GestureTuning::default());
    }

    #[test]
    fn partial_gesture_table_keeps_other_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "gestures": { "hold_zoom_delay_ms": 300 } }"#).unwrap();
        assert_eq!(config.gestures.hold_zoom_delay_ms, 300);
        assert_eq!(config.gestures.double_tap_time_ms, 800);
        assert_eq!(config.gestures.hold_zoom_rate, 1.16);
    }

    #[test]
    fn sanitize_replaces_bad_values() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "max_iterations": 0, "frame_interval_ms": 0,
                 "gestures": { "click_zoom_factor": 0.5 } }"#,
        )
        .unwrap();
        let config = config.sanitized();
        assert_eq!(config.max_iterations, 256);
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.gestures, GestureTuning::default());
    }

    #[test]
    fn start_view_is_applied() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "max_iterations": 1000,
                 "start_center": { "re": -0.743643, "im": 0.131825 },
                 "start_zoom": 5000.0 }"#,
        )
        .unwrap();
        let vp = config.start_viewport();
        assert_eq!(vp.zoom, 5000.0);
        assert_eq!(vp.center, Complex::new(-0.743643, 0.131825));
        assert_eq!(vp.max_iterations, 1000);
    }

    #[test]
    fn out_of_range_start_zoom_uses_default_view() {
        let config: AppConfig = serde_json::from_str(r#"{ "start_zoom": 1e20 }"#).unwrap();
        assert_eq!(config.start_viewport(), Viewport::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/mandeltouch.json"));
        assert_eq!(config.max_iterations, 256);
        assert_eq!(config.render_mode(), RenderMode::Sequential);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "mandeltouch-config-test-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").unwrap();
        let config = AppConfig::load_from(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(config.window_width, 800.0);
    }
}

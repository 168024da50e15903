pub mod buffer;
pub mod error;
pub mod overlay;
pub mod palette;
pub mod renderer;
pub mod scheduler;

pub use buffer::{DisplaySurface, PixelBuffer};
pub use error::RenderError;
pub use overlay::{DebugMarker, MARKER_LIFETIME_MS};
pub use palette::{argb_to_rgba, color_of};
pub use renderer::{render, RenderMode, RenderStats};
pub use scheduler::RenderScheduler;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;

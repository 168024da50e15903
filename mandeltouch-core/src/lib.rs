pub mod complex;
pub mod error;
pub mod fractal;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{is_interior, iterate, ESCAPE_RADIUS_SQ};
pub use viewport::{
    Viewport, DEFAULT_CENTER, DEFAULT_MAX_ITERATIONS, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM,
};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;

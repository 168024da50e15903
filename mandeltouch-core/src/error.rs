use thiserror::Error;

/// Errors originating from the core fractal engine.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid zoom: {0} (must be finite and within [{min}, {max}])", min = crate::MIN_ZOOM, max = crate::MAX_ZOOM)]
    InvalidZoom(f64),
}

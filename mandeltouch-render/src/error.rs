use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("invalid surface dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

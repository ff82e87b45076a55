//! Error types for patchscale.

use thiserror::Error;

/// Result alias for patchscale operations.
pub type UpscaleResult<T> = std::result::Result<T, UpscaleError>;

/// Errors that can occur when configuring or running the upscaler.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UpscaleError {
    /// Width or height is zero, or the pixel count overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is too short for the requested layout.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Upscale factor must be at least 1.
    #[error("scale must be at least 1, got {scale}")]
    InvalidScale { scale: usize },
    /// Context diameter must be odd so the patch has a center pixel.
    #[error("context diameter must be odd, got {diameter}")]
    EvenContextDiameter { diameter: usize },
    /// At least one candidate must be retained per pixel.
    #[error("top-k must be at least 1")]
    InvalidTopK,
    /// Color preservation strength must lie in `[0, 1]`.
    #[error("color preservation must be within [0, 1], got {value}")]
    ColorPreservationOutOfRange { value: f64 },
    /// Fewer context weights than rings in the patch.
    #[error("context weights: need {needed} entries (one per ring), got {got}")]
    MissingContextWeights { needed: usize, got: usize },
    /// Image decode or encode failed.
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
}

impl UpscaleError {
    /// Returns true for errors caused by the parameter bundle rather than pixel data.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            UpscaleError::InvalidScale { .. }
                | UpscaleError::EvenContextDiameter { .. }
                | UpscaleError::InvalidTopK
                | UpscaleError::ColorPreservationOutOfRange { .. }
                | UpscaleError::MissingContextWeights { .. }
        )
    }
}

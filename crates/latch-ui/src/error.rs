//! Errors raised while building images.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBuffer { expected: usize, actual: usize },

    #[error("image scale must be positive, got {0}")]
    Scale(f32),
}

pub type Result<T> = std::result::Result<T, Error>;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for writing and reading rendered images
#[derive(Error, Debug)]
pub enum RenderError {
    /// Writing or reading the image file failed
    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Pixel buffer length does not match `width * height * 4`
    #[error("RGBA buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Image too large for the target container
    #[error("{width}x{height} does not fit the image container")]
    Dimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// TGA data that this crate cannot read back
    #[error("invalid TGA: {0}")]
    InvalidTga(String),
}

/// Result type using RenderError
pub type Result<T> = std::result::Result<T, RenderError>;

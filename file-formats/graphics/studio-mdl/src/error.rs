use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for studio model decoding
#[derive(Error, Debug)]
pub enum MdlError {
    /// The model file (or a required companion) could not be read
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The model file exists but contains no bytes
    #[error("'{0}' is empty")]
    EmptyFile(PathBuf),

    /// Invalid magic number in a header
    #[error("Invalid magic number: expected {expected:#010x}, got {actual:#010x}")]
    InvalidMagic { expected: u32, actual: u32 },

    /// Header version differs from the only supported one
    #[error("Unsupported version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: i32, actual: i32 },

    /// An offset-derived read would leave the buffer
    #[error("{what} at offset {offset} with size {size} exceeds buffer of {len} bytes")]
    OutOfBounds {
        what: &'static str,
        offset: i64,
        size: usize,
        len: usize,
    },

    /// A record count field is negative
    #[error("negative {what} count: {count}")]
    NegativeCount { what: &'static str, count: i32 },

    /// A bone names a parent that does not exist
    #[error("bone {bone} has invalid parent index {parent} ({count} bones)")]
    InvalidBoneParent { bone: usize, parent: i32, count: usize },

    /// Following parent links from a bone leads back to it
    #[error("bone hierarchy contains a cycle through bone {0}")]
    BoneCycle(usize),

    /// Reference error: an index into another table is out of range
    #[error("Reference error: {0}")]
    ReferenceError(String),

    /// A triangle command stream ended before its terminator
    #[error("triangle command stream truncated: {0}")]
    Truncated(String),

    /// Decoding finished without a single body part
    #[error("model has no body parts")]
    NoBodyParts,
}

/// Broad classification of [`MdlError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MdlErrorKind {
    /// The file system refused the read
    Io,
    /// The bytes do not form a valid model
    Format,
}

impl MdlError {
    /// Returns whether this is an I/O failure or a malformed file.
    pub fn kind(&self) -> MdlErrorKind {
        match self {
            Self::Io { .. } | Self::EmptyFile(_) => MdlErrorKind::Io,
            _ => MdlErrorKind::Format,
        }
    }
}

/// Result type using MdlError
pub type Result<T> = std::result::Result<T, MdlError>;

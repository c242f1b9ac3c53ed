//! Error types for tinct

use thiserror::Error;

/// Result type for tinct operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tinct operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The ICC bytestream failed a signature or structure check
    #[error("ICC parse error: {0}")]
    Icc(#[from] crate::icc::IccError),

    /// Profile has no media white point tag
    #[error("profile has no media white point")]
    MissingWhitePoint,

    /// Profile has neither colorant tags nor a usable A2B0 matrix
    #[error("profile has no colorant tags and no usable A2B0 matrix")]
    MissingColorants,

    /// A matrix that must be inverted is singular
    #[error("matrix is singular")]
    SingularMatrix,

    /// Profile cannot be expressed as an NCLX descriptor
    #[error("profile not representable as NCLX: {0}")]
    NclxUnrepresentable(&'static str),

    /// Unknown stock primaries name
    #[error("unknown stock primaries: {0}")]
    UnknownStock(String),

    /// Pixel buffer is too small for the requested pixel count
    #[error("pixel buffer too small: need {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// External engine path failed or is unavailable
    #[error("external engine: {0}")]
    Engine(&'static str),
}

//! ICC wire-format errors

use thiserror::Error;

/// Errors raised while decoding or encoding ICC profile bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IccError {
    /// Profile data is smaller than the structure requires
    #[error("profile too small: expected {expected} bytes, got {actual}")]
    TooSmall { expected: usize, actual: usize },

    /// Profile signature is not 'acsp'
    #[error("invalid profile signature: 0x{0:08X} (expected 'acsp')")]
    InvalidSignature(u32),

    /// Header size field disagrees with the data length
    #[error("size mismatch: header says {header_size} bytes, data is {actual_size} bytes")]
    SizeMismatch { header_size: u32, actual_size: usize },

    /// A tag table entry points outside the profile
    #[error("tag 0x{tag:08X} out of bounds: offset {offset} + size {size} > {profile_size}")]
    TagOutOfBounds {
        tag: u32,
        offset: u32,
        size: u32,
        profile_size: usize,
    },

    /// Unrecognized color space signature
    #[error("invalid color space: 0x{0:08X}")]
    InvalidColorSpace(u32),

    /// Unrecognized device class signature
    #[error("invalid profile class: 0x{0:08X}")]
    InvalidProfileClass(u32),

    /// Rendering intent out of range
    #[error("invalid rendering intent: {0}")]
    InvalidRenderingIntent(u32),

    /// Structurally invalid tag data
    #[error("corrupted tag data: {0}")]
    CorruptedData(String),
}

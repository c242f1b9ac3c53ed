//! ICC profile wire format
//!
//! Parses and emits the subset of ICC v2/v4 this crate needs:
//!
//! 1. The 128-byte header
//! 2. The tag table
//! 3. Tag data for `rXYZ/gXYZ/bXYZ`, `wtpt`, `chad`, `lumi`, `desc`,
//!    `cprt`, `rTRC/gTRC/bTRC`, `cicp`, plus raw access to `A2B0`
//!
//! Everything on the wire is big-endian; fixed-point values are s15.16.
//! Parsed profiles keep each tag's raw bytes so a parse → pack round trip
//! reproduces the semantic content byte for byte.

pub mod header;
pub mod tags;

mod error;
mod parser;
mod types;
mod writer;

pub use error::IccError;
pub use header::{ColorSpaceSignature, IccHeader, ProfileClass, RenderingIntent};
pub use parser::IccProfile;
pub use types::{DateTimeNumber, S15Fixed16, TagSignature, XyzNumber};

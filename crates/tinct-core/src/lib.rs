//! # tinct - color management core
//!
//! The color engine of an image-processing toolkit: ICC profile parsing and
//! synthesis, HDR transfer curves (PQ, HLG), and a data-parallel pixel
//! transform pipeline.
//!
//! ## What lives here
//!
//! - **Profiles**: parse an ICC byte blob, or build a display-class
//!   matrix/TRC profile from primaries + curve + luminance, then query those
//!   semantics back out of any profile.
//! - **Transforms**: derive the 3×3 linear RGB→RGB matrix between two
//!   profiles through XYZ and run it over pixel buffers in every combination
//!   of {u8, u16 (9–16 bit), f32} × {RGB, RGBA}.
//! - **NCLX**: map between compact container color descriptors and profiles.
//!
//! Codecs, image objects, and the CLI are external collaborators; they hand
//! this crate raw pixel buffers and profile bytes.
//!
//! With the `lcms2` feature enabled, transforms whose built-in path is
//! disallowed are routed through Little CMS instead.

#![forbid(unsafe_code)]

pub mod color;
pub mod context;
pub mod error;
pub mod icc;
pub mod math;
pub mod nclx;
pub mod primaries;
pub mod profile;
pub mod raw;
pub mod transform;

mod convert;
#[cfg(feature = "lcms2")]
mod engine;

pub use context::Context;
pub use error::{Error, Result};
pub use nclx::Nclx;
pub use primaries::{Curve, CurveKind, Primaries};
pub use profile::{Profile, ProfileQuery, StockProfile};
pub use raw::Raw;
pub use transform::{PixelFormat, Transform};

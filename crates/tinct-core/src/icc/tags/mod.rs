//! ICC tag data codecs
//!
//! Each codec works on a complete tag blob: 4-byte type signature, 4
//! reserved bytes, then type-specific data. Parsers are lenient (a damaged
//! tag reads as absent); encoders always produce well-formed blobs.

mod cicp;
mod curves;
mod lut;
mod text;
mod xyz;

pub use cicp::Cicp;
pub use curves::TrcTag;
pub use lut::{a2b_matrix, a2b_matrix_curve_scale};
pub use text::MluTag;
pub use xyz::{encode_xyz, parse_xyz};

use super::types::S15Fixed16;
use crate::math::Matrix3x3;

/// Parse an 'sf32' tag holding a 3×3 chromatic adaptation matrix
pub fn parse_sf32_matrix(tag: &[u8]) -> Option<Matrix3x3> {
    if tag.len() < 8 + 36 {
        return None;
    }
    let data = &tag[8..];
    let mut m = Matrix3x3::zero();
    for row in 0..3 {
        for col in 0..3 {
            let o = (row * 3 + col) * 4;
            m.m[row][col] =
                S15Fixed16::from_be_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]])
                    .to_f64();
        }
    }
    Some(m)
}

/// Encode a 3×3 matrix as an 'sf32' tag
pub fn encode_sf32_matrix(m: &Matrix3x3) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + 36);
    out.extend_from_slice(b"sf32");
    out.extend_from_slice(&[0; 4]);
    for row in 0..3 {
        for col in 0..3 {
            out.extend_from_slice(&S15Fixed16::from_f64(m.m[row][col]).to_be_bytes());
        }
    }
    out
}

//! 'XYZ ' tag type
//!
//! Holds one or more XYZNumbers. Used by the colorant tags, the media
//! white point, and the luminance tag.

use crate::color::Xyz;
use crate::icc::types::XyzNumber;

/// Parse an 'XYZ ' tag and return its first value
pub fn parse_xyz(tag: &[u8]) -> Option<Xyz> {
    if tag.len() < 8 + 12 || &tag[0..4] != b"XYZ " {
        return None;
    }
    XyzNumber::from_bytes(&tag[8..20]).map(|n| n.to_xyz())
}

/// Encode a single XYZ value as an 'XYZ ' tag
pub fn encode_xyz(xyz: Xyz) -> Vec<u8> {
    let mut out = Vec::with_capacity(20);
    out.extend_from_slice(b"XYZ ");
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&XyzNumber::from_xyz(xyz).to_bytes());
    out
}

//! Raw A2B0 harvesting
//!
//! Some profiles omit the colorant tags and only describe their gamut
//! through an 'mAB ' LUT. Full LUT interpolation is out of scope, but the
//! embedded 3×3 matrix (and the scale its matrix curve applies to linear
//! light) can be recovered straight from the tag bytes:
//!
//! - bytes 16..20: big-endian offset of the matrix (12 × s15.16; the three
//!   trailing translation entries are ignored)
//! - bytes 20..24: big-endian offset of the matrix curve block
//!
//! An offset of zero means the element is absent. Typed accessors are
//! deliberately not used here; this works on any conforming byte layout.

use crate::icc::types::S15Fixed16;
use crate::math::Matrix3x3;

fn be_u32(data: &[u8], off: usize) -> u32 {
    u32::from_be_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
}

fn s15f16(data: &[u8], off: usize) -> f64 {
    S15Fixed16::from_be_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]]).to_f64()
}

/// Recover the 3×3 matrix from a raw A2B0 tag. Matrix rows map linear RGB
/// to XYZ, so each column is one colorant.
pub fn a2b_matrix(tag: &[u8]) -> Option<Matrix3x3> {
    if tag.len() < 32 {
        return None;
    }
    let offset = be_u32(tag, 16) as usize;
    if offset == 0 || offset + 36 > tag.len() {
        return None;
    }
    let mut m = Matrix3x3::zero();
    for i in 0..9 {
        m.m[i / 3][i % 3] = s15f16(tag, offset + i * 4);
    }
    Some(m)
}

/// Recover the implicit scale the A2B0 matrix curve applies to linear
/// light. Parametric types 1..=4 are guaranteed a g and an a argument;
/// the scale is a^g.
pub fn a2b_matrix_curve_scale(tag: &[u8]) -> Option<f32> {
    if tag.len() < 32 {
        return None;
    }
    let offset = be_u32(tag, 20) as usize;
    if offset == 0 || offset + 20 > tag.len() {
        return None;
    }
    if &tag[offset..offset + 4] != b"para" {
        return None;
    }
    let function = u16::from_be_bytes([tag[offset + 8], tag[offset + 9]]);
    if function == 0 || function > 4 {
        return None;
    }
    let g = s15f16(tag, offset + 12);
    let a = s15f16(tag, offset + 16);
    Some(a.powf(g) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal synthetic 'mAB ' tag with a matrix and a matrix curve
    fn synthetic_a2b(matrix: Option<&Matrix3x3>, curve_ga: Option<(f64, f64)>) -> Vec<u8> {
        let mut tag = vec![0u8; 32];
        tag[0..4].copy_from_slice(b"mAB ");

        if let Some(m) = matrix {
            let offset = tag.len() as u32;
            tag[16..20].copy_from_slice(&offset.to_be_bytes());
            for i in 0..9 {
                tag.extend_from_slice(&S15Fixed16::from_f64(m.m[i / 3][i % 3]).to_be_bytes());
            }
            // translation entries
            for _ in 0..3 {
                tag.extend_from_slice(&[0; 4]);
            }
        }

        if let Some((g, a)) = curve_ga {
            let offset = tag.len() as u32;
            tag[20..24].copy_from_slice(&offset.to_be_bytes());
            tag.extend_from_slice(b"para");
            tag.extend_from_slice(&[0; 4]);
            tag.extend_from_slice(&1u16.to_be_bytes()); // function type 1
            tag.extend_from_slice(&[0; 2]);
            tag.extend_from_slice(&S15Fixed16::from_f64(g).to_be_bytes());
            tag.extend_from_slice(&S15Fixed16::from_f64(a).to_be_bytes());
            tag.extend_from_slice(&S15Fixed16::from_f64(0.0).to_be_bytes());
        }

        tag
    }

    #[test]
    fn test_matrix_harvest() {
        let m = Matrix3x3::new([
            [0.4124, 0.3576, 0.1805],
            [0.2126, 0.7152, 0.0722],
            [0.0193, 0.1192, 0.9503],
        ]);
        let tag = synthetic_a2b(Some(&m), None);
        let harvested = a2b_matrix(&tag).unwrap();
        assert!(harvested.approx_eq(&m, 1e-4));
    }

    #[test]
    fn test_missing_matrix_offset() {
        let tag = synthetic_a2b(None, None);
        assert!(a2b_matrix(&tag).is_none());
    }

    #[test]
    fn test_matrix_curve_scale() {
        // scale = a^g = 2^2 = 4
        let tag = synthetic_a2b(None, Some((2.0, 2.0)));
        let scale = a2b_matrix_curve_scale(&tag).unwrap();
        assert!((scale - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_short_tag_rejected() {
        assert!(a2b_matrix(b"mAB ").is_none());
        assert!(a2b_matrix_curve_scale(b"mAB ").is_none());
    }
}

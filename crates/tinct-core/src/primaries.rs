//! Primaries, curves, and the stock table
//!
//! A profile's semantics distill to eight chromaticity floats, a tagged
//! curve, and a luminance. Names map to primaries through a static table.

use crate::color::Xyz;
use crate::error::{Error, Result};
use crate::math::Matrix3x3;

/// CIE xy chromaticities of the red, green, blue, and white points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Primaries {
    pub red: [f32; 2],
    pub green: [f32; 2],
    pub blue: [f32; 2],
    pub white: [f32; 2],
}

impl Primaries {
    /// A non-positive red x is the "unset" sentinel
    pub fn is_unset(&self) -> bool {
        self.red[0] <= 0.0
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        let pairs = [
            (self.red, other.red),
            (self.green, other.green),
            (self.blue, other.blue),
            (self.white, other.white),
        ];
        pairs
            .iter()
            .all(|(a, b)| (a[0] - b[0]).abs() < epsilon && (a[1] - b[1]).abs() < epsilon)
    }

    /// White point as XYZ with Y normalized to 1
    pub fn white_xyz(&self) -> Xyz {
        Xyz::from_xyy(self.white[0] as f64, self.white[1] as f64, 1.0)
    }

    /// Linear RGB → XYZ matrix for these primaries at their own white,
    /// from Hoffmann's derivation (docs-hoffmann.de, CIE XYZ §11.4):
    ///
    /// ```text
    /// P = [ Rx Gx Bx ; Ry Gy By ; Rz Gz Bz ]   (z = 1 - x - y)
    /// U = P⁻¹ · W
    /// toXYZ = P · diag(U / Wy)
    /// ```
    ///
    /// `toXYZ · (1,1,1)` is the white point XYZ with Y = 1.
    pub fn to_xyz_matrix(&self) -> Result<Matrix3x3> {
        let col = |xy: [f32; 2]| {
            let (x, y) = (xy[0] as f64, xy[1] as f64);
            [x, y, 1.0 - x - y]
        };
        let p = Matrix3x3::from_columns(col(self.red), col(self.green), col(self.blue));
        let p_inv = p.inverse().ok_or(Error::SingularMatrix)?;

        let w = col(self.white);
        let u = p_inv.multiply_vec(w);

        let wy = self.white[1] as f64;
        let d = Matrix3x3::diagonal(u[0] / wy, u[1] / wy, u[2] / wy);
        Ok(p.multiply(&d))
    }
}

/// How a profile's tone curve was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveKind {
    /// No TRC and no way to guess
    #[default]
    Unknown,
    /// A pure power function
    Gamma,
    /// A table or multi-segment curve; `gamma` holds a best-fit estimate,
    /// or -1 when even that is unavailable
    Complex,
    /// Hybrid log-gamma (ARIB STD-B67)
    Hlg,
    /// Perceptual quantizer (SMPTE ST.2084)
    Pq,
}

/// A profile's tone curve semantics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Curve {
    pub kind: CurveKind,
    pub gamma: f32,
    /// Implicit scale a profile's A2B0 matrix curve applies to linear
    /// light; 0 means none. Reported for diagnostics only.
    pub matrix_curve_scale: f32,
}

impl Curve {
    pub fn gamma(gamma: f32) -> Self {
        Self {
            kind: CurveKind::Gamma,
            gamma,
            matrix_curve_scale: 0.0,
        }
    }

    pub fn pq() -> Self {
        Self {
            kind: CurveKind::Pq,
            gamma: 1.0,
            matrix_curve_scale: 0.0,
        }
    }

    pub fn hlg() -> Self {
        Self {
            kind: CurveKind::Hlg,
            gamma: 1.0,
            matrix_curve_scale: 0.0,
        }
    }
}

/// BT.709 / sRGB primaries, D65 white
pub const BT709: Primaries = Primaries {
    red: [0.64, 0.33],
    green: [0.30, 0.60],
    blue: [0.15, 0.06],
    white: [0.3127, 0.3290],
};

/// BT.2020 primaries, D65 white
pub const BT2020: Primaries = Primaries {
    red: [0.708, 0.292],
    green: [0.170, 0.797],
    blue: [0.131, 0.046],
    white: [0.3127, 0.3290],
};

/// Display P3 primaries, D65 white
pub const P3: Primaries = Primaries {
    red: [0.680, 0.320],
    green: [0.265, 0.690],
    blue: [0.150, 0.060],
    white: [0.3127, 0.3290],
};

/// Adobe RGB (1998) primaries, D65 white
pub const ADOBE_RGB: Primaries = Primaries {
    red: [0.64, 0.33],
    green: [0.21, 0.71],
    blue: [0.15, 0.06],
    white: [0.3127, 0.3290],
};

/// Look up a named set of stock primaries. Unknown names are an error
/// rather than silently mapping to sRGB.
pub fn stock_primaries(name: &str) -> Result<Primaries> {
    match name {
        "bt709" | "srgb" => Ok(BT709),
        "bt2020" => Ok(BT2020),
        "p3" => Ok(P3),
        "adobe-rgb" => Ok(ADOBE_RGB),
        _ => Err(Error::UnknownStock(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_lookup() {
        assert!(stock_primaries("bt709").is_ok());
        assert!(stock_primaries("bt2020").is_ok());
        assert!(stock_primaries("p3").is_ok());
        assert!(stock_primaries("adobe-rgb").is_ok());
        assert!(matches!(
            stock_primaries("ntsc"),
            Err(Error::UnknownStock(_))
        ));
    }

    #[test]
    fn test_unset_sentinel() {
        assert!(Primaries::default().is_unset());
        assert!(!BT709.is_unset());
    }

    #[test]
    fn test_bt709_matrix_matches_srgb_reference() {
        // IEC 61966-2-1 sRGB→XYZ matrix
        let expected = Matrix3x3::new([
            [0.4124564, 0.3575761, 0.1804375],
            [0.2126729, 0.7151522, 0.0721750],
            [0.0193339, 0.1191920, 0.9503041],
        ]);
        let m = BT709.to_xyz_matrix().unwrap();
        assert!(m.approx_eq(&expected, 1e-3), "derived {m:?}");
    }

    #[test]
    fn test_white_maps_to_white() {
        for primaries in [BT709, BT2020, P3, ADOBE_RGB] {
            let m = primaries.to_xyz_matrix().unwrap();
            let white = m.multiply_vec([1.0, 1.0, 1.0]);
            let expected = primaries.white_xyz();
            assert!((white[0] - expected.x).abs() < 1e-6);
            assert!((white[1] - 1.0).abs() < 1e-6);
            assert!((white[2] - expected.z).abs() < 1e-6);
        }
    }

    #[test]
    fn test_degenerate_primaries_rejected() {
        let collinear = Primaries {
            red: [0.3, 0.3],
            green: [0.3, 0.3],
            blue: [0.3, 0.3],
            white: [0.3127, 0.3290],
        };
        assert!(collinear.to_xyz_matrix().is_err());
    }
}

//! Bradford chromatic adaptation
//!
//! Adapts XYZ colors from one adopted white to another. Bradford is the ICC
//! default and the only method profile creation needs: colorants written to
//! a profile are D50-relative, so the native white point is adapted on the
//! way in and recovered through the `chad` tag on the way out.

use crate::color::Xyz;
use crate::math::Matrix3x3;

/// Bradford cone response matrix: XYZ → LMS
const BRADFORD: Matrix3x3 = Matrix3x3::new([
    [0.8951000, 0.2664000, -0.1614000],
    [-0.7502000, 1.7135000, 0.0367000],
    [0.0389000, -0.0685000, 1.0296000],
]);

/// Inverse Bradford matrix: LMS → XYZ
const BRADFORD_INV: Matrix3x3 = Matrix3x3::new([
    [0.9869929, -0.1470543, 0.1599627],
    [0.4323053, 0.5183603, 0.0492912],
    [-0.0085287, 0.0400428, 0.9684867],
]);

/// Bradford adaptation matrix from `src_white` to `dst_white`.
///
/// The result M satisfies `M × src_white ≈ dst_white`; apply it to any XYZ
/// color viewed under `src_white` to re-express it under `dst_white`.
pub fn bradford_adaptation(src_white: Xyz, dst_white: Xyz) -> Matrix3x3 {
    let src_lms = BRADFORD.multiply_vec(src_white.to_array());
    let dst_lms = BRADFORD.multiply_vec(dst_white.to_array());

    let ratio = |d: f64, s: f64| if s.abs() > 1e-10 { d / s } else { 1.0 };
    let scale = Matrix3x3::diagonal(
        ratio(dst_lms[0], src_lms[0]),
        ratio(dst_lms[1], src_lms[1]),
        ratio(dst_lms[2], src_lms[2]),
    );

    BRADFORD_INV.multiply(&scale.multiply(&BRADFORD))
}

//! White-point adaptation matrices
//!
//! When a profile carries no `chad` tag, display-class profiles get a
//! von-Kries-style adaptation from the PCS illuminant to the media white
//! point: scale in a cone-response space, bracketed by the forward and
//! inverse cone matrices. The Bradford cone space is used, as ICC.1
//! Annex E recommends.

use crate::color::Xyz;
use crate::math::Matrix3x3;

/// Bradford cone-response matrix: XYZ → LMS
const BRADFORD_XYZ_TO_LMS: Matrix3x3 = Matrix3x3::new([
    [0.8951000, 0.2664000, -0.1614000],
    [-0.7502000, 1.7135000, 0.0367000],
    [0.0389000, -0.0685000, 1.0296000],
]);

/// Bradford cone-response matrix: LMS → XYZ (inverse)
const BRADFORD_LMS_TO_XYZ: Matrix3x3 = Matrix3x3::new([
    [0.9869929, -0.1470543, 0.1599627],
    [0.4323053, 0.5183603, 0.0492912],
    [-0.0085287, 0.0400428, 0.9684867],
]);

/// Compute the adaptation matrix taking colors measured under `src_white`
/// to their appearance under `dst_white`: XYZ_dst = M × XYZ_src
pub fn adaptation_matrix(src_white: Xyz, dst_white: Xyz) -> Matrix3x3 {
    let src_lms = BRADFORD_XYZ_TO_LMS.multiply_vec(src_white.to_array());
    let dst_lms = BRADFORD_XYZ_TO_LMS.multiply_vec(dst_white.to_array());

    let ratio = |dst: f64, src: f64| if src.abs() > 1e-10 { dst / src } else { 1.0 };
    let scale = Matrix3x3::diagonal(
        ratio(dst_lms[0], src_lms[0]),
        ratio(dst_lms[1], src_lms[1]),
        ratio(dst_lms[2], src_lms[2]),
    );

    BRADFORD_LMS_TO_XYZ.multiply(&scale.multiply(&BRADFORD_XYZ_TO_LMS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{D50, D65};

    #[test]
    fn test_same_white_is_identity() {
        let m = adaptation_matrix(D65.xyz, D65.xyz);
        assert!(m.is_identity(1e-6));
    }

    #[test]
    fn test_d65_to_d50_known_matrix() {
        // Bradford D65→D50, as tabulated by Lindbloom
        let expected = Matrix3x3::new([
            [1.0478112, 0.0228866, -0.0501270],
            [0.0295424, 0.9904844, -0.0170491],
            [-0.0092345, 0.0150436, 0.7521316],
        ]);
        let computed = adaptation_matrix(D65.xyz, D50.xyz);
        assert!(
            computed.approx_eq(&expected, 1e-2),
            "D65→D50 mismatch: {computed:?}"
        );
    }

    #[test]
    fn test_roundtrip_is_identity() {
        let fwd = adaptation_matrix(D65.xyz, D50.xyz);
        let back = adaptation_matrix(D50.xyz, D65.xyz);
        assert!(fwd.multiply(&back).is_identity(1e-5));
    }

    #[test]
    fn test_white_maps_to_white() {
        let m = adaptation_matrix(D65.xyz, D50.xyz);
        let adapted = Xyz::from_array(m.multiply_vec(D65.xyz.to_array()));
        assert!(adapted.approx_eq(&D50.xyz, 1e-4));
    }
}

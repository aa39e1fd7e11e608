use glam::{Quat, Vec3};

const DEGENERATE_EPSILON: f32 = 1e-6;

/// Rotate `v` by `angle` radians around `axis` through the origin.
///
/// Works for both directions and points, since the pivot is the origin.
/// A zero-length axis leaves `v` unchanged.
pub fn rotate_about(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let Some(axis) = axis.try_normalize() else {
        return v;
    };
    Quat::from_axis_angle(axis, angle) * v
}

/// Gram-Schmidt the camera basis, keeping `right`'s direction and bending
/// `up` to be perpendicular to it. Degenerate input is returned as is.
pub fn orthonormalize(up: Vec3, right: Vec3) -> (Vec3, Vec3) {
    let Some(right_n) = right.try_normalize() else {
        return (up, right);
    };
    let up_perp = up - right_n * up.dot(right_n);
    if up_perp.length() < DEGENERATE_EPSILON {
        return (up, right);
    }
    (up_perp.normalize(), right_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rotate_quarter_turn_about_y() {
        let v = rotate_about(Vec3::X, Vec3::Y, FRAC_PI_2);
        assert!(v.abs_diff_eq(Vec3::NEG_Z, 1e-6), "got {v}");
    }

    #[test]
    fn rotate_zero_axis_is_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(rotate_about(v, Vec3::ZERO, 1.0), v);
    }

    #[test]
    fn orthonormalize_removes_skew() {
        let (up, right) = orthonormalize(Vec3::new(0.1, 1.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        assert!(right.abs_diff_eq(Vec3::X, 1e-6));
        assert!(up.abs_diff_eq(Vec3::Y, 1e-6));
        assert!(up.dot(right).abs() < 1e-6);
    }

    #[test]
    fn orthonormalize_parallel_input_untouched() {
        let (up, right) = orthonormalize(Vec3::X, Vec3::X);
        assert_eq!(up, Vec3::X);
        assert_eq!(right, Vec3::X);
    }
}

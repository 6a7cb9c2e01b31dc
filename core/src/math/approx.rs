//! Approximate equality of floats, vectors and matrices.
//!
//! The pipeline accumulates rounding error at every stage: composing the
//! camera matrix with its inverse, interpolating clipped vertices, and
//! dividing by `w`. Results are compared with a tolerance relative to
//! their magnitude, floored at one so that values near zero are compared
//! absolutely.

use core::fmt::Debug;

/// The default tolerance, a few ulps above what a chain of 4×4 matrix
/// products loses in `f32`.
pub const EPSILON: f32 = 1e-5;

/// Approximate equality with a relative tolerance.
pub trait ApproxEq {
    /// Returns whether `self` and `other` differ by at most `eps` times
    /// the magnitude of `self`, or `eps` if the magnitude is below one.
    ///
    /// All components must be within tolerance for aggregates.
    fn approx_eq_eps(&self, other: &Self, eps: f32) -> bool;

    /// Returns whether `self` and `other` are equal within [`EPSILON`].
    fn approx_eq(&self, other: &Self) -> bool {
        self.approx_eq_eps(other, EPSILON)
    }
}

impl ApproxEq for f32 {
    fn approx_eq_eps(&self, other: &Self, eps: f32) -> bool {
        use super::float::f32;
        // NaN fails the comparison, as it should
        f32::abs(self - other) <= eps * f32::abs(*self).max(1.0)
    }
}

impl<T: ApproxEq, const N: usize> ApproxEq for [T; N] {
    fn approx_eq_eps(&self, other: &Self, eps: f32) -> bool {
        self.iter()
            .zip(other)
            .all(|(s, o)| s.approx_eq_eps(o, eps))
    }
}

/// Panics unless `left` and `right` are equal within `eps`.
///
/// Prefer the [`assert_approx_eq`][crate::assert_approx_eq] macro.
#[track_caller]
pub fn assert_within<T: ApproxEq + Debug>(left: &T, right: &T, eps: f32) {
    if !left.approx_eq_eps(right, eps) {
        panic!("assertion failed: `{left:?} ≅ {right:?}` (eps = {eps:e})");
    }
}

/// Asserts that two values are approximately equal, using [`EPSILON`]
/// or the tolerance given with `eps =`.
///
/// # Panics
/// If the values are not approximately equal.
///
/// # Examples
/// ```
/// # use glyphcast_core::assert_approx_eq;
/// assert_ne!(0.1f32 + 0.2, 0.3);
/// assert_approx_eq!(0.1f32 + 0.2, 0.3);
/// // Screen coordinates after a perspective divide
/// assert_approx_eq!(79.9996f32, 80.0, eps = 1e-4);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr, eps = $eps:expr $(,)?) => {
        $crate::math::approx::assert_within(&$a, &$b, $eps)
    };
    ($a:expr, $b:expr $(,)?) => {
        $crate::math::approx::assert_within(
            &$a,
            &$b,
            $crate::math::approx::EPSILON,
        )
    };
}

#[cfg(test)]
mod tests {
    use core::f32::consts::FRAC_PI_3;

    use crate::math::{
        Lerp,
        mat::{Mat4x4, rotate_x, rotate_y, translate},
        vec::{pt3, vec3},
    };

    use super::*;

    #[test]
    fn tolerance_is_absolute_below_one() {
        assert!(0.0f32.approx_eq(&9e-6));
        assert!(!0.0f32.approx_eq(&2e-5));
        assert!((-0.0f32).approx_eq(&0.0));
    }

    #[test]
    fn tolerance_scales_with_magnitude() {
        // One cell off in a far-away depth value is noise...
        assert!(1e6f32.approx_eq(&(1e6 + 5.0)));
        // ...but not on the character grid
        assert!(!80.0f32.approx_eq(&81.0));
        assert!(80.0f32.approx_eq_eps(&80.5, 0.01));
    }

    #[test]
    fn nan_never_equal() {
        assert!(!f32::NAN.approx_eq(&f32::NAN));
        assert!(!pt3::<()>(0.0, f32::NAN, 0.0).approx_eq(&pt3(0.0, 0.0, 0.0)));
    }

    #[test]
    fn arrays_compare_componentwise() {
        assert!([1.0f32, 2.0, 3.0].approx_eq(&[1.000_001, 2.0, 3.0]));
        assert!(![1.0f32, 2.0, 3.0].approx_eq(&[1.0, 2.1, 3.0]));
    }

    #[test]
    fn edge_intersection_within_default_eps() {
        // An edge crossing y = 0 at a third of its length
        let (a, b) = (pt3::<()>(0.0, 1.0, 3.0), pt3(3.0, -2.0, 0.0));
        let t = 1.0 / 3.0;
        assert_approx_eq!(a.lerp(&b, t), pt3(1.0, 0.0, 2.0));
    }

    #[test]
    fn composed_inverse_needs_looser_eps() {
        let m: Mat4x4<()> = rotate_y(FRAC_PI_3)
            .then(&rotate_x(0.4))
            .then(&translate(vec3(3.0, -7.0, 12.5)));
        let id = m.then(&m.fast_inverse());
        assert_approx_eq!(id, Mat4x4::identity(), eps = 1e-4);
    }

    #[test]
    #[should_panic(expected = "eps = 1e-5")]
    fn failure_reports_tolerance() {
        assert_approx_eq!(0.0f32, 1.0);
    }
}

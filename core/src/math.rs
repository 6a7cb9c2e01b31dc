//! Linear algebra and other useful mathematics.
//!
//! Includes [vectors][self::vec], [matrices][mat], and utilities such as
//! [approximate equality][approx] comparisons and a
//! [floating-point compatibility][float] layer for `no_std` targets.
//!
//! Vectors are tagged with a type that represents the *space* they are
//! embedded in, and values in different spaces cannot be mixed without an
//! explicit conversion (transformation). Matrices, similarly, are tagged by
//! both source and destination space, and can only be applied to matching
//! vectors. This catches at compile time mistakes that would otherwise only
//! show up as garbled frames, such as projecting a world-space point that
//! was never taken through the view transform.

pub use {
    approx::ApproxEq,
    mat::{
        Mat4x4, RealToReal, perspective, point_at, rotate_x, rotate_y, scale,
        translate, viewport,
    },
    vec::{Vec3, Vec4, Vector, pt3, vec3, vec4},
};

pub mod approx;
pub mod float;
pub mod mat;
pub mod vec;

/// Trait for linear interpolation between two values.
pub trait Lerp: Sized {
    /// Linearly interpolates between `self` and `other`.
    ///
    /// if `t` = 0, returns `self`; if `t` = 1, returns `other`.
    /// For 0 < `t` < 1, returns the weighted average of `self` and `other`
    /// ```text
    /// (1 - t) * self + t * other
    /// ```
    ///
    /// This method does not panic if `t < 0.0` or `t > 1.0`, or if `t`
    /// is `NaN`, but the return value in those cases is unspecified.
    ///
    /// # Examples
    /// ```
    /// use glyphcast_core::math::Lerp;
    ///
    /// assert_eq!(f32::lerp(&1.0, &5.0, 0.25), 2.0);
    /// ```
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Returns the (unweighted) average of `self` and `other`.
    fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }
}

/// Linearly interpolates between two values.
///
/// For examples and more information, see [`Lerp::lerp`].
#[inline]
pub fn lerp<T: Lerp>(t: f32, from: T, to: T) -> T {
    from.lerp(&to, t)
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + t * (other - self)
    }
}

//! Real vectors tagged with a coordinate space.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{Add, Index, Mul, Neg, Sub};

use super::{ApproxEq, Lerp};

/// A generic vector type, parameterized by its representation and the
/// coordinate space it belongs to.
///
/// The `Sp` tag is a zero-sized marker type. Two vectors can only be combined
/// if they share the same space; moving a vector to another space is done
/// either by applying a matrix with a matching [map][super::RealToReal], or
/// explicitly with [`Vector::to`].
#[repr(transparent)]
pub struct Vector<Repr, Sp = ()>(pub Repr, PhantomData<Sp>);

/// A 3D real vector in space `Sp`. Used for texture coordinates.
pub type Vec3<Sp = ()> = Vector<[f32; 3], Sp>;
/// A homogeneous 4D real vector in space `Sp`.
///
/// The arithmetic operators, as well as [`dot`][Self::dot],
/// [`cross`][Self::cross], [`len`][Self::len] and
/// [`normalize`][Self::normalize], only consider the x, y and z components.
/// Where a vector is returned, its w is copied from the left-hand operand.
pub type Vec4<Sp = ()> = Vector<[f32; 4], Sp>;

/// Returns a 3D vector with components `x`, `y`, and `z`.
#[inline]
pub const fn vec3<Sp>(x: f32, y: f32, z: f32) -> Vec3<Sp> {
    Vector([x, y, z], PhantomData)
}

/// Returns a 4D vector with components `x`, `y`, `z`, and `w`.
#[inline]
pub const fn vec4<Sp>(x: f32, y: f32, z: f32, w: f32) -> Vec4<Sp> {
    Vector([x, y, z, w], PhantomData)
}

/// Returns a homogeneous point with coordinates `x`, `y`, `z`, and w = 1.
#[inline]
pub const fn pt3<Sp>(x: f32, y: f32, z: f32) -> Vec4<Sp> {
    vec4(x, y, z, 1.0)
}

//
// Inherent impls
//

impl<R, Sp> Vector<R, Sp> {
    /// Returns `self` reinterpreted as a vector in another space.
    ///
    /// This is a no-op at runtime; it only changes the type-level tag.
    #[inline]
    pub fn to<S2>(self) -> Vector<R, S2> {
        Vector(self.0, PhantomData)
    }
}

impl<Sp, const N: usize> Vector<[f32; N], Sp> {
    /// Returns a vector with all components zero.
    #[inline]
    pub const fn zero() -> Self {
        Self([0.0; N], PhantomData)
    }

    /// Returns the components of `self` as an array.
    #[inline]
    pub const fn array(&self) -> [f32; N] {
        self.0
    }
}

impl<Sp> Vec3<Sp> {
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }
}

impl<Sp> Vec4<Sp> {
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }
    #[inline]
    pub const fn w(&self) -> f32 {
        self.0[3]
    }

    /// Returns `self` with the w component replaced by `w`.
    #[inline]
    pub fn with_w(self, w: f32) -> Self {
        let [x, y, z, _] = self.0;
        vec4(x, y, z, w)
    }

    /// Returns the dot product of the xyz parts of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Returns the cross product of the xyz parts of `self` and `other`.
    ///
    /// The result is perpendicular to both operands and follows the
    /// right-hand rule: `x × y = z`.
    ///
    /// # Examples
    /// ```
    /// use glyphcast_core::math::vec::{Vec4, pt3};
    ///
    /// let x: Vec4 = pt3(1.0, 0.0, 0.0);
    /// let y = pt3(0.0, 1.0, 0.0);
    /// assert_eq!(x.cross(&y), pt3(0.0, 0.0, 1.0));
    /// ```
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        let [x0, y0, z0, w] = self.0;
        let [x1, y1, z1, _] = other.0;
        vec4(y0 * z1 - z0 * y1, z0 * x1 - x0 * z1, x0 * y1 - y0 * x1, w)
    }

    /// Returns the Euclidean length of the xyz part of `self`.
    #[inline]
    pub fn len(&self) -> f32 {
        use super::float::f32;
        f32::sqrt(self.dot(self))
    }

    /// Returns `self` scaled to unit length, keeping w.
    ///
    /// The result is unspecified (has non-finite components) if `self` has
    /// zero length; see [`try_normalize`][Self::try_normalize] for a checked
    /// version.
    #[inline]
    pub fn normalize(&self) -> Self {
        *self * self.len().recip()
    }

    /// Returns `self` scaled to unit length, or `None` if the length of
    /// `self` is too close to zero to be normalized.
    pub fn try_normalize(&self) -> Option<Self> {
        let len = self.len();
        (len > NORMALIZE_EPSILON).then(|| *self * len.recip())
    }

    /// Divides x, y, and z by w, and sets w to 1.
    ///
    /// Returns `None` if w is too close to zero.
    pub fn perspective_divide(&self) -> Option<Self> {
        use super::float::f32;
        let [x, y, z, w] = self.0;
        if f32::abs(w) <= VANISHING_W {
            return None;
        }
        let rw = w.recip();
        Some(vec4(x * rw, y * rw, z * rw, 1.0))
    }
}

/// Lengths at or below this are considered zero by `try_normalize`.
const NORMALIZE_EPSILON: f32 = 1e-12;
/// Values of w at or below this in magnitude cannot be divided by.
const VANISHING_W: f32 = f32::EPSILON;

//
// Operator impls
//

impl<Sp> Add for Vec4<Sp> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let [x0, y0, z0, w] = self.0;
        let [x1, y1, z1, _] = rhs.0;
        vec4(x0 + x1, y0 + y1, z0 + z1, w)
    }
}

impl<Sp> Sub for Vec4<Sp> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let [x0, y0, z0, w] = self.0;
        let [x1, y1, z1, _] = rhs.0;
        vec4(x0 - x1, y0 - y1, z0 - z1, w)
    }
}

impl<Sp> Mul<f32> for Vec4<Sp> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        let [x, y, z, w] = self.0;
        vec4(x * rhs, y * rhs, z * rhs, w)
    }
}

impl<Sp> Neg for Vec4<Sp> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        let [x, y, z, w] = self.0;
        vec4(-x, -y, -z, w)
    }
}

impl<Sp, const N: usize> Index<usize> for Vector<[f32; N], Sp> {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl<Sp, const N: usize> Lerp for Vector<[f32; N], Sp> {
    /// Interpolates every component, including w.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let mut res = *self;
        for (r, o) in res.0.iter_mut().zip(&other.0) {
            *r = r.lerp(o, t);
        }
        res
    }
}

impl<Sp, const N: usize> ApproxEq for Vector<[f32; N], Sp> {
    fn approx_eq_eps(&self, other: &Self, eps: f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
}

//
// Manual impls to avoid spurious bounds on `Sp`
//

impl<R: Copy, Sp> Copy for Vector<R, Sp> {}

impl<R: Clone, Sp> Clone for Vector<R, Sp> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<R: PartialEq, Sp> PartialEq for Vector<R, Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Default, Sp> Default for Vector<R, Sp> {
    fn default() -> Self {
        Self(R::default(), PhantomData)
    }
}

impl<R, Sp> From<R> for Vector<R, Sp> {
    #[inline]
    fn from(repr: R) -> Self {
        Self(repr, PhantomData)
    }
}

impl<Sp, const N: usize> Debug for Vector<[f32; N], Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Vec{}{:?}", N, self.0)
    }
}

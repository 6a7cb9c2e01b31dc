//! Matrices and linear transforms.
//!
//! Matrices are stored row-major and follow the column-vector convention:
//! applying `M` to `v` computes `M·v`, and `a.then(&b)` is the matrix `B·A`
//! that first applies `a` and then `b`.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use super::approx::ApproxEq;
use super::vec::{Vec3, Vec4, vec4};

/// A type-level tag describing what a matrix maps from and to.
pub trait LinearMap {
    /// The space of the vectors the map is applied to.
    type Source;
    /// The space of the vectors the map produces.
    type Dest;
    /// The map going in the opposite direction.
    type Inverse: LinearMap;
}

/// Tag for a map from real space `Src` to real space `Dst`.
pub struct RealToReal<Src, Dst>(PhantomData<(Src, Dst)>);

impl<F, T> LinearMap for RealToReal<F, T> {
    type Source = F;
    type Dest = T;
    type Inverse = RealToReal<T, F>;
}

/// The unit type represents an untagged map from `()` to `()`.
impl LinearMap for () {
    type Source = ();
    type Dest = ();
    type Inverse = ();
}

#[repr(transparent)]
pub struct Matrix<Repr, Map>(pub Repr, PhantomData<Map>);

/// A 4×4 matrix of `f32`, tagged with its map type.
pub type Mat4x4<Map = ()> = Matrix<[[f32; 4]; 4], Map>;

impl<M> Mat4x4<M> {
    pub const fn new(els: [[f32; 4]; 4]) -> Self {
        Self(els, PhantomData)
    }

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        self.0[i].into()
    }

    #[inline]
    pub fn col(&self, i: usize) -> Vec4 {
        vec4(self.0[0][i], self.0[1][i], self.0[2][i], self.0[3][i])
    }

    /// Returns `self` with its map tag replaced by `N`.
    pub fn to<N>(&self) -> Mat4x4<N> {
        Matrix(self.0, PhantomData)
    }

    /// Returns the transpose of `self`. The map tag is unchanged.
    pub fn transpose(&self) -> Self {
        let mut els = [[0.0; 4]; 4];
        for (r, row) in els.iter_mut().enumerate() {
            for (c, e) in row.iter_mut().enumerate() {
                *e = self.0[c][r];
            }
        }
        Self::new(els)
    }

    /// Returns the matrix product `other · self`.
    fn premul(&self, other: &[[f32; 4]; 4]) -> [[f32; 4]; 4] {
        let mut els = [[0.0; 4]; 4];
        for (r, row) in els.iter_mut().enumerate() {
            for (c, e) in row.iter_mut().enumerate() {
                *e = (0..4).map(|k| other[r][k] * self.0[k][c]).sum();
            }
        }
        els
    }
}

impl<M: LinearMap> Mat4x4<M> {
    /// Applies `self` to `v`, returning `M·v`.
    ///
    /// All four components take part in the product.
    pub fn apply(&self, v: &Vec4<M::Source>) -> Vec4<M::Dest> {
        let mut res = [0.0; 4];
        for (r, e) in res.iter_mut().enumerate() {
            *e = (0..4).map(|c| self.0[r][c] * v[c]).sum();
        }
        res.into()
    }

    /// Returns the inverse of a rigid transform (rotation + translation).
    ///
    /// The rotation block is transposed and the translation becomes
    /// `-(t·x, t·y, t·z)`, where x, y and z are the basis vectors of `self`.
    /// The result is unspecified if `self` is not orthonormal.
    pub fn fast_inverse(&self) -> Mat4x4<M::Inverse> {
        let t = self.col(3);
        let [x, y, z] = [self.col(0), self.col(1), self.col(2)];
        [
            [x[0], x[1], x[2], -t.dot(&x)],
            [y[0], y[1], y[2], -t.dot(&y)],
            [z[0], z[1], z[2], -t.dot(&z)],
            [0.0, 0.0, 0.0, 1.0],
        ]
        .into()
    }

    /// Returns the inverse of `self`, or `None` if `self` is singular.
    ///
    /// Uses Gauss–Jordan elimination with partial pivoting.
    pub fn inverse(&self) -> Option<Mat4x4<M::Inverse>> {
        use super::float::f32;

        let mut a = self.0;
        let mut inv = Mat4x4::<()>::identity().0;

        for col in 0..4 {
            let pivot = (col..4).max_by(|&i, &j| {
                f32::abs(a[i][col]).total_cmp(&f32::abs(a[j][col]))
            })?;
            if f32::abs(a[pivot][col]) <= SINGULAR_EPSILON {
                return None;
            }
            a.swap(col, pivot);
            inv.swap(col, pivot);

            let recip = a[col][col].recip();
            for c in 0..4 {
                a[col][c] *= recip;
                inv[col][c] *= recip;
            }
            for r in (0..4).filter(|&r| r != col) {
                let factor = a[r][col];
                for c in 0..4 {
                    a[r][c] -= factor * a[col][c];
                    inv[r][c] -= factor * inv[col][c];
                }
            }
        }
        Some(inv.into())
    }
}

/// Pivots at or below this in magnitude make a matrix non-invertible.
const SINGULAR_EPSILON: f32 = f32::EPSILON;

impl<F, T> Mat4x4<RealToReal<F, T>> {
    /// Returns the composite map that first applies `self`, then `other`.
    pub fn then<U>(
        &self,
        other: &Mat4x4<RealToReal<T, U>>,
    ) -> Mat4x4<RealToReal<F, U>> {
        self.premul(&other.0).into()
    }
}

impl Mat4x4 {
    /// Returns the composite map that first applies `self`, then `other`.
    pub fn then(&self, other: &Mat4x4) -> Mat4x4 {
        self.premul(&other.0).into()
    }
}

//
// Constructor functions
//

/// Returns a matrix that scales by `s` along each axis.
pub fn scale(s: Vec3) -> Mat4x4 {
    [
        [s[0], 0.0, 0.0, 0.0],
        [0.0, s[1], 0.0, 0.0],
        [0.0, 0.0, s[2], 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
    .into()
}

/// Returns a matrix that translates by `t`.
pub fn translate(t: Vec3) -> Mat4x4 {
    [
        [1.0, 0.0, 0.0, t[0]],
        [0.0, 1.0, 0.0, t[1]],
        [0.0, 0.0, 1.0, t[2]],
        [0.0, 0.0, 0.0, 1.0],
    ]
    .into()
}

/// Returns a matrix that rotates by `a` radians about the x axis.
///
/// Positive angles rotate y toward z.
pub fn rotate_x(a: f32) -> Mat4x4 {
    use super::float::f32;
    let (s, c) = (f32::sin(a), f32::cos(a));
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
    .into()
}

/// Returns a matrix that rotates by `a` radians about the y axis.
///
/// Positive angles rotate z toward x.
pub fn rotate_y(a: f32) -> Mat4x4 {
    use super::float::f32;
    let (s, c) = (f32::sin(a), f32::cos(a));
    [
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
    .into()
}

/// Returns a perspective projection matrix.
///
/// `aspect` is the width of the viewport divided by its height, and `fov`
/// the vertical field of view in radians. The projected w equals the
/// view-space z, so that after the perspective divide z is mapped to 0 at
/// `near` and to 1 at `far`.
///
/// # Panics
/// If any parameter value is nonpositive, or if `near >= far`.
pub fn perspective(aspect: f32, fov: f32, near: f32, far: f32) -> Mat4x4 {
    use super::float::f32;
    assert!(aspect > 0.0, "aspect ratio cannot be nonpositive: {aspect}");
    assert!(fov > 0.0, "field of view cannot be nonpositive: {fov}");
    assert!(
        0.0 < near && near < far,
        "near and far must satisfy 0 < near < far: {near}, {far}"
    );
    let f = f32::tan(fov / 2.0).recip();
    let q = far / (far - near);
    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, q, -near * q],
        [0.0, 0.0, 1.0, 0.0],
    ]
    .into()
}

/// Returns a matrix mapping normalized device coordinates to a `width` by
/// `height` screen.
///
/// Both axes are mirrored: `x' = (1 - x) · width / 2` and
/// `y' = (1 - y) · height / 2`, so that +y is up in NDC and down on screen.
/// The z coordinate passes through unchanged.
pub fn viewport(width: f32, height: f32) -> Mat4x4 {
    let (h, v) = (width / 2.0, height / 2.0);
    [
        [-h, 0.0, 0.0, h],
        [0.0, -v, 0.0, v],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
    .into()
}

/// Returns a matrix that places an observer at `pos`, facing `target`.
///
/// The basis of the result is the orthonormal triple `right, up, forward`,
/// where `up` is the component of the given `up` orthogonal to the look
/// direction. The translation is `pos`. The inverse of the result is thus
/// a view matrix; see [`Mat4x4::fast_inverse`].
///
/// Returns `None` if `target` coincides with `pos`, or if `up` is parallel
/// to the look direction.
pub fn point_at<V, W>(
    pos: &Vec4<W>,
    target: &Vec4<W>,
    up: &Vec4<W>,
) -> Option<Mat4x4<RealToReal<V, W>>> {
    let fwd = (*target - *pos).try_normalize()?;
    let up = (*up - fwd * up.dot(&fwd)).try_normalize()?;
    let right = up.cross(&fwd);
    Some(
        [
            [right[0], up[0], fwd[0], pos[0]],
            [right[1], up[1], fwd[1], pos[1]],
            [right[2], up[2], fwd[2], pos[2]],
            [0.0, 0.0, 0.0, 1.0],
        ]
        .into(),
    )
}

//
// Trait impls
//

impl<R: Copy, M> Copy for Matrix<R, M> {}

impl<R: Clone, M> Clone for Matrix<R, M> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<R: PartialEq, M> PartialEq for Matrix<R, M> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<M> Debug for Mat4x4<M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mat4x4[")?;
        for row in &self.0 {
            writeln!(f, "    {:6.2?}", row)?;
        }
        write!(f, "]")
    }
}

impl<M> From<[[f32; 4]; 4]> for Mat4x4<M> {
    fn from(els: [[f32; 4]; 4]) -> Self {
        Self(els, PhantomData)
    }
}

impl<M> ApproxEq for Mat4x4<M> {
    fn approx_eq_eps(&self, other: &Self, eps: f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
}

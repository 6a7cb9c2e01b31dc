//! Basic geometric primitives.

use core::fmt::{self, Debug, Formatter};

use crate::math::{Lerp, Vec3, Vec4, vec3};

pub use mesh::{Builder, Mesh};

pub mod mesh;

/// Vertex with a position, texture coordinates and a surface normal.
///
/// The position is tagged with the space `Sp` it is currently in. The normal
/// is untagged and unit-length when loaded; it is carried through the
/// pipeline but not transformed.
pub struct Vertex<Sp> {
    pub pos: Vec4<Sp>,
    pub uv: Vec3,
    pub normal: Vec4,
}

/// Triangle with three vertices, a face normal, and a glyph.
///
/// Each pipeline stage produces a new triangle in the next space rather
/// than mutating the previous one.
pub struct Tri<Sp> {
    pub vs: [Vertex<Sp>; 3],
    /// The face normal. Recomputed in world space by the shading stage.
    pub normal: Vec4,
    /// The glyph the triangle is drawn with.
    pub glyph: char,
}

/// The glyph of a triangle that has not been shaded.
pub const BLANK: char = ' ';

/// Creates a `Vertex` with the given position, texture coordinates, and
/// normal.
pub const fn vertex<Sp>(pos: Vec4<Sp>, uv: Vec3, normal: Vec4) -> Vertex<Sp> {
    Vertex { pos, uv, normal }
}

/// Creates a `Tri` with the given vertices and a blank glyph.
///
/// The face normal is `normalize((b - a) × (c - a))`, or zero if the
/// triangle is degenerate.
pub fn tri<Sp>(a: Vertex<Sp>, b: Vertex<Sp>, c: Vertex<Sp>) -> Tri<Sp> {
    let normal = face_normal(&[a.pos, b.pos, c.pos]).unwrap_or_default();
    Tri { vs: [a, b, c], normal: normal.to(), glyph: BLANK }
}

/// Returns the unit normal of the face with vertices `a`, `b`, `c`
/// in counter-clockwise order, or `None` if the face has zero area.
pub fn face_normal<Sp>([a, b, c]: &[Vec4<Sp>; 3]) -> Option<Vec4<Sp>> {
    (*b - *a).cross(&(*c - *a)).with_w(0.0).try_normalize()
}

impl<Sp> Vertex<Sp> {
    /// Returns `self` with its position replaced by `pos`.
    pub fn with_pos<S2>(&self, pos: Vec4<S2>) -> Vertex<S2> {
        vertex(pos, self.uv, self.normal)
    }
}

impl<Sp> Tri<Sp> {
    /// Creates a triangle with the given vertices, face normal and glyph.
    pub const fn new(vs: [Vertex<Sp>; 3], normal: Vec4, glyph: char) -> Self {
        Self { vs, normal, glyph }
    }

    /// Returns the positions of the vertices of `self`.
    pub fn positions(&self) -> [Vec4<Sp>; 3] {
        self.vs.each_ref().map(|v| v.pos)
    }

    /// Returns a triangle with each vertex position mapped by `f`.
    ///
    /// Other vertex attributes, the normal, and the glyph are copied.
    pub fn map_pos<S2>(
        &self,
        mut f: impl FnMut(&Vec4<Sp>) -> Vec4<S2>,
    ) -> Tri<S2> {
        let vs = self.vs.each_ref().map(|v| v.with_pos(f(&v.pos)));
        Tri::new(vs, self.normal, self.glyph)
    }

    /// Like [`map_pos`][Self::map_pos], but returns the first error
    /// returned by `f`, if any.
    pub fn try_map_pos<S2, E>(
        &self,
        mut f: impl FnMut(&Vec4<Sp>) -> Result<Vec4<S2>, E>,
    ) -> Result<Tri<S2>, E> {
        let [a, b, c] = &self.vs;
        let vs = [
            a.with_pos(f(&a.pos)?),
            b.with_pos(f(&b.pos)?),
            c.with_pos(f(&c.pos)?),
        ];
        Ok(Tri::new(vs, self.normal, self.glyph))
    }

    /// Returns the mean z coordinate of the vertices of `self`.
    pub fn avg_z(&self) -> f32 {
        let [a, b, c] = &self.vs;
        (a.pos.z() + b.pos.z() + c.pos.z()) / 3.0
    }

    /// Returns the area of `self`.
    pub fn area(&self) -> f32 {
        let [a, b, c] = self.positions();
        (b - a).cross(&(c - a)).len() / 2.0
    }

    /// Returns `self` with its glyph replaced by `glyph`.
    pub fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }
}

impl<Sp> Lerp for Vertex<Sp> {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        vertex(
            self.pos.lerp(&other.pos, t),
            self.uv.lerp(&other.uv, t),
            self.normal.lerp(&other.normal, t),
        )
    }
}

impl<Sp> Default for Vertex<Sp> {
    fn default() -> Self {
        vertex(Vec4::zero(), vec3(0.0, 0.0, 0.0), Vec4::zero())
    }
}

//
// Manual impls to avoid spurious bounds on `Sp`
//

impl<Sp> Copy for Vertex<Sp> {}
impl<Sp> Clone for Vertex<Sp> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<Sp> PartialEq for Vertex<Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
            && self.uv == other.uv
            && self.normal == other.normal
    }
}
impl<Sp> Debug for Vertex<Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("pos", &self.pos)
            .field("uv", &self.uv)
            .field("normal", &self.normal)
            .finish()
    }
}

impl<Sp> Copy for Tri<Sp> {}
impl<Sp> Clone for Tri<Sp> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<Sp> PartialEq for Tri<Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.vs == other.vs
            && self.normal == other.normal
            && self.glyph == other.glyph
    }
}
impl<Sp> Debug for Tri<Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tri")
            .field("vs", &self.vs)
            .field("normal", &self.normal)
            .field("glyph", &self.glyph)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::{Vec4, pt3, vec4};

    use super::*;

    fn v(x: f32, y: f32, z: f32) -> Vertex<()> {
        vertex(pt3(x, y, z), vec3(x, y, 0.0), Vec4::zero())
    }

    #[test]
    fn tri_face_normal_is_ccw() {
        let t = tri(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0));
        assert_eq!(t.normal, vec4(0.0, 0.0, 1.0, 0.0));
        assert_eq!(t.glyph, BLANK);
    }

    #[test]
    fn tri_degenerate_normal_is_zero() {
        let t = tri(v(0.0, 0.0, 0.0), v(1.0, 1.0, 1.0), v(2.0, 2.0, 2.0));
        assert_eq!(t.normal, Vec4::zero());
        assert_eq!(t.area(), 0.0);
    }

    #[test]
    fn area_and_avg_z() {
        let t = tri(v(0.0, 0.0, 1.0), v(4.0, 0.0, 2.0), v(0.0, 3.0, 3.0));
        assert_eq!(t.avg_z(), 2.0);

        let t = tri(v(0.0, 0.0, 1.0), v(4.0, 0.0, 1.0), v(0.0, 3.0, 1.0));
        assert_eq!(t.area(), 6.0);
    }

    #[test]
    fn map_pos_keeps_attributes() {
        struct Other;
        let t = tri(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0))
            .with_glyph('#');
        let u: Tri<Other> = t.map_pos(|p| (*p * 2.0).to());

        assert_eq!(u.glyph, '#');
        assert_eq!(u.normal, t.normal);
        assert_eq!(u.vs[1].pos.array(), [2.0, 0.0, 0.0, 1.0]);
        assert_eq!(u.vs[1].uv, t.vs[1].uv);
    }

    #[test]
    fn try_map_pos_propagates_error() {
        let t = tri(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0));
        let res: Result<Tri<()>, &str> =
            t.try_map_pos(|p| if p.x() > 0.5 { Err("oops") } else { Ok(*p) });
        assert_eq!(res, Err("oops"));
    }

    #[test]
    fn vertex_lerp_interpolates_all_attributes() {
        let a: Vertex<()> =
            vertex(pt3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 0.0), pt3(1.0, 0.0, 0.0));
        let b =
            vertex(pt3(2.0, 4.0, 6.0), vec3(1.0, 1.0, 0.0), pt3(0.0, 1.0, 0.0));
        let m = a.midpoint(&b);
        assert_eq!(m.pos, pt3(1.0, 2.0, 3.0));
        assert_eq!(m.uv, vec3(0.5, 0.5, 0.0));
        assert_approx_eq!(m.normal, pt3(0.5, 0.5, 0.0));
    }
}

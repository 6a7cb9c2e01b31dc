//! Transforming, backface culling and flat shading of triangles.
//!
//! Each triangle is moved to world space, its face normal computed, and its
//! facing determined relative to the camera position. Visible triangles get
//! a single glyph from a [`Ramp`], chosen by the dot product of the face
//! normal and the light direction.

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use crate::geom::{self, Tri};
use crate::math::{Mat4x4, Vec4};

use super::{DegenerateGeometry, Model, ModelToWorld, World, ctx::Config};

/// The default glyphs, from darkest to brightest.
pub const DEFAULT_RAMP: &str = "`.-':_,^=;><+!rc*/z?sLTv)J7(|Fi{C}fI31tlu\
    [neoZ5Yxjya]2ESwqkP6h9d4VpOGbUAKXHm8RD#$Bg0MNWQ%&@";

/// A sequence of glyphs of increasing visual density.
///
/// A light intensity `i` maps to the glyph at index `round(i · (n + 1))`,
/// clamped to `0..n`, where `n` is the number of glyphs. Intensities
/// at or below zero give the first glyph, and intensities close to one
/// give the last.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ramp(Vec<char>);

impl Ramp {
    /// Creates a ramp from the characters of `glyphs`.
    ///
    /// # Panics
    /// If `glyphs` is empty.
    pub fn new(glyphs: &str) -> Self {
        assert!(!glyphs.is_empty(), "glyph ramp cannot be empty");
        Self(glyphs.chars().collect())
    }

    /// Returns the number of glyphs in `self`.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always returns `false`; ramps are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the index of the glyph for light intensity `i`.
    pub fn index(&self, i: f32) -> usize {
        let scale = (self.len() + 1) as f32;
        let max = (self.len() - 1) as f32;
        let i = {
            use crate::math::float::f32;
            f32::round(i * scale)
        };
        // NaN saturates to zero
        i.clamp(0.0, max) as usize
    }

    /// Returns the glyph for light intensity `i`.
    pub fn glyph(&self, i: f32) -> char {
        self.0[self.index(i)]
    }

    /// Returns the glyphs of `self`.
    pub fn glyphs(&self) -> &[char] {
        &self.0
    }
}

impl Default for Ramp {
    /// Returns the 91-glyph ramp [`DEFAULT_RAMP`].
    fn default() -> Self {
        Self::new(DEFAULT_RAMP)
    }
}

impl Display for Ramp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Returns the unit face normal `(v2 - v1) × (v0 - v1)` of a triangle.
///
/// This is the normal pointing toward the viewer when the vertices appear in
/// counter-clockwise order.
pub fn face_normal(
    [v0, v1, v2]: &[Vec4<World>; 3],
) -> Result<Vec4<World>, DegenerateGeometry> {
    geom::face_normal(&[*v1, *v2, *v0]).ok_or(DegenerateGeometry::ZeroAreaFace)
}

/// Returns whether a face with normal `n` and a vertex `v0` faces a viewer
/// located at `eye`.
///
/// Faces seen exactly edge-on are not facing the viewer.
#[inline]
pub fn is_facing(n: &Vec4<World>, v0: &Vec4<World>, eye: &Vec4<World>) -> bool {
    n.dot(&(*v0 - *eye)) < 0.0
}

/// Returns the light intensity of a face with normal `n`.
///
/// There is no attenuation; the light is directional and `light` need not
/// be a unit vector.
#[inline]
pub fn intensity(n: &Vec4<World>, light: &Vec4<World>) -> f32 {
    n.dot(light)
}

/// Transforms a model-space triangle to world space and shades it.
///
/// Returns `Ok(None)` if the triangle is culled according to
/// `cfg.face_cull`, and an error if the triangle is degenerate.
pub fn shade(
    tri: &Tri<Model>,
    to_world: &Mat4x4<ModelToWorld>,
    eye: &Vec4<World>,
    cfg: &Config,
) -> Result<Option<Tri<World>>, DegenerateGeometry> {
    let tri = tri.map_pos(|p| to_world.apply(p));
    let vs = tri.positions();
    let n = face_normal(&vs)?;

    if cfg.face_cull(!is_facing(&n, &vs[0], eye)) {
        return Ok(None);
    }
    let glyph = cfg.ramp.glyph(intensity(&n, &cfg.light));
    Ok(Some(Tri::new(tri.vs, n.to(), glyph)))
}

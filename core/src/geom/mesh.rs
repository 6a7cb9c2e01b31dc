//! Triangle meshes.

use core::fmt::{self, Debug, Formatter};

use alloc::vec::Vec;

use crate::math::{Vec3, Vec4, pt3, vec3};
use crate::render::Model;

use super::{Tri, face_normal, vertex};

/// A triangle mesh in model space.
///
/// Unlike an indexed mesh, each triangle owns copies of its vertices, so the
/// pipeline can read consecutive triangles without indirection. The order
/// of the triangles is the order they were added in.
#[derive(Clone, Default)]
pub struct Mesh {
    tris: Vec<Tri<Model>>,
}

/// Builder for meshes given as a vertex list and indexed faces.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    verts: Vec<(Vec4<Model>, Vec3)>,
    faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Creates a new mesh with the given triangles.
    ///
    /// # Examples
    /// ```
    /// # use glyphcast_core::geom::{Mesh, tri, vertex};
    /// # use glyphcast_core::math::{Vec4, pt3, vec3};
    /// let v = |x, y| vertex(pt3(x, y, 0.0), vec3(x, y, 0.0), Vec4::zero());
    /// let mesh = Mesh::new([
    ///     tri(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)),
    ///     tri(v(0.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)),
    /// ]);
    /// assert_eq!(mesh.len(), 2);
    /// ```
    pub fn new(tris: impl IntoIterator<Item = Tri<Model>>) -> Self {
        Self { tris: tris.into_iter().collect() }
    }

    /// Returns a new mesh builder.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the triangles of `self`, in order.
    pub fn triangles(&self) -> &[Tri<Model>] {
        &self.tris
    }

    /// Returns the number of triangles in `self`.
    pub fn len(&self) -> usize {
        self.tris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tris.is_empty()
    }

    /// Appends a triangle to `self`.
    pub fn push(&mut self, tri: Tri<Model>) {
        self.tris.push(tri);
    }
}

impl Builder {
    /// Appends a vertex with the given position and texture coordinates.
    pub fn push_vert(&mut self, pos: Vec3, uv: Vec3) {
        let [x, y, z] = pos.0;
        self.verts.push((pt3(x, y, z), uv));
    }

    /// Appends a face with the given vertex indices, in counter-clockwise
    /// order when seen from the outside.
    pub fn push_face(&mut self, a: usize, b: usize, c: usize) {
        self.faces.push([a, b, c]);
    }

    /// Appends all the faces yielded by the given iterator.
    pub fn push_faces<Fs>(&mut self, faces: Fs)
    where
        Fs: IntoIterator<Item = [usize; 3]>,
    {
        self.faces.extend(faces);
    }

    /// Returns the finished mesh with one triangle per face.
    ///
    /// The face normal of each triangle is also used as its vertex normals.
    ///
    /// # Panics
    /// If any of the vertex indices in the faces ≥ the number of vertices.
    pub fn build(self) -> Mesh {
        let Self { verts, faces } = self;
        faces
            .iter()
            .enumerate()
            .map(|(i, face)| {
                assert!(
                    face.iter().all(|&j| j < verts.len()),
                    "vertex index out of bounds at faces[{i}]: {face:?}"
                );
                let [a, b, c] = face.map(|j| verts[j]);
                let n = face_normal(&[a.0, b.0, c.0])
                    .unwrap_or_default()
                    .to();
                Tri::new(
                    [a, b, c].map(|(pos, uv)| vertex(pos, uv, n)),
                    n,
                    super::BLANK,
                )
            })
            .collect()
    }
}

impl FromIterator<Tri<Model>> for Mesh {
    fn from_iter<I: IntoIterator<Item = Tri<Model>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Extend<Tri<Model>> for Mesh {
    fn extend<I: IntoIterator<Item = Tri<Model>>>(&mut self, iter: I) {
        self.tris.extend(iter);
    }
}

impl Debug for Mesh {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh").field("tris", &self.tris).finish()
    }
}

/// Returns the texture coordinate origin, for vertices that have none.
pub const fn no_uv() -> Vec3 {
    vec3(0.0, 0.0, 0.0)
}

#[cfg(test)]
mod tests {
    use crate::math::vec4;

    use super::*;

    fn square() -> Builder {
        let mut b = Mesh::builder();
        b.push_vert(vec3(0.0, 0.0, 0.0), no_uv());
        b.push_vert(vec3(1.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0));
        b.push_vert(vec3(1.0, 1.0, 0.0), vec3(1.0, 1.0, 0.0));
        b.push_vert(vec3(0.0, 1.0, 0.0), vec3(0.0, 1.0, 0.0));
        b
    }

    #[test]
    fn builder_expands_indexed_faces() {
        let mut b = square();
        b.push_faces([[0, 1, 2], [0, 2, 3]]);
        let mesh = b.build();

        assert_eq!(mesh.len(), 2);
        let [t0, t1] = [mesh.triangles()[0], mesh.triangles()[1]];
        assert_eq!(t0.vs[2].pos, t1.vs[1].pos);
        assert_eq!(t1.vs[2].uv, vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn builder_computes_face_normals() {
        let mut b = square();
        b.push_face(0, 1, 2);
        b.push_face(0, 3, 2);
        let mesh = b.build();

        let [ccw, cw] = [mesh.triangles()[0], mesh.triangles()[1]];
        assert_eq!(ccw.normal, vec4(0.0, 0.0, 1.0, 0.0));
        assert_eq!(cw.normal, vec4(0.0, 0.0, -1.0, 0.0));
        assert!(ccw.vs.iter().all(|v| v.normal == ccw.normal));
    }

    #[test]
    #[should_panic]
    fn builder_panics_if_vertex_index_oob() {
        let mut b = square();
        b.push_faces([[0, 1, 2], [1, 2, 4]]);
        _ = b.build();
    }

    #[test]
    fn mesh_collects_from_iterator() {
        let mut b = square();
        b.push_face(0, 1, 2);
        let tri = b.build().triangles()[0];

        let mut mesh: Mesh = core::iter::repeat_n(tri, 3).collect();
        mesh.push(tri);
        mesh.extend([tri]);
        assert_eq!(mesh.len(), 5);
        assert!(!mesh.is_empty());
        assert!(Mesh::default().is_empty());
    }
}

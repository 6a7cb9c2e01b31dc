//! Meshes of simple geometric shapes.
//!
//! All faces are wound counter-clockwise when seen from the outside, so
//! their face normals point outward.

use core::array::from_fn;

use gc::geom::Mesh;
use gc::math::{Vec3, vec3};

/// A rectangular cuboid, aligned with the coordinate axes.
///
/// Defined by its minimum and maximum corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cuboid {
    /// The left bottom near corner.
    pub min: Vec3,
    /// The right top far corner.
    pub max: Vec3,
}

/// Returns the unit cube with corners at (0, 0, 0) and (1, 1, 1).
///
/// Each of the six faces is split into two triangles. With the default
/// model offset of (-0.5, -0.5, -0.5), the cube is centered on the origin
/// of the world.
pub fn cube() -> Mesh {
    Cuboid { min: vec3(0.0, 0.0, 0.0), max: vec3(1.0, 1.0, 1.0) }.build()
}

impl Cuboid {
    /// Each face as an origin corner and two edge directions `u` and `v`,
    /// given as per-axis selectors, with `u × v` pointing outward.
    #[rustfmt::skip]
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        // -z
        ([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
        // +z
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        // -x
        ([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        // +x
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        // -y
        ([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        // +y
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
    ];

    const UVS: [Vec3; 4] = [
        vec3(0.0, 0.0, 0.0),
        vec3(1.0, 0.0, 0.0),
        vec3(1.0, 1.0, 0.0),
        vec3(0.0, 1.0, 0.0),
    ];

    /// Builds the cuboid mesh, twelve triangles in total.
    pub fn build(self) -> Mesh {
        let min = self.min.0;
        let size: [f32; 3] = from_fn(|i| self.max[i] - self.min[i]);
        let corner = |[o, u, v]: [[f32; 3]; 3]| -> Vec3 {
            let p: [f32; 3] =
                from_fn(|i| min[i] + size[i] * (o[i] + u[i] + v[i]));
            p.into()
        };

        let mut b = Mesh::builder();
        for (i, (o, u, v)) in Self::FACES.into_iter().enumerate() {
            let z = [0.0; 3];
            let corners = [[o, z, z], [o, u, z], [o, u, v], [o, z, v]];
            for (sel, uv) in corners.into_iter().zip(Self::UVS) {
                b.push_vert(corner(sel), uv);
            }
            let j = i * 4;
            b.push_faces([[j, j + 1, j + 2], [j, j + 2, j + 3]]);
        }
        b.build()
    }
}

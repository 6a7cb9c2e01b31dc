//! Clipping triangles against planes.
//!
//! Clipping means converting a shape into another, such that only the points
//! inside a volume enclosed by one or more planes remain; "inside" is defined
//! as the half-space that the plane's normal vector points toward.
//!
//! The renderer clips twice. In view space, triangles are clipped against the
//! near plane so that nothing behind the camera is projected. In screen
//! space, triangles are clipped against the four edges of the viewport so
//! that the rasterizer only ever sees on-screen coordinates.

use alloc::vec::Vec;
use core::mem::swap;

use arrayvec::ArrayVec;

use crate::geom::{Tri, Vertex};
use crate::math::{Lerp, Vec4, pt3, vec4};

use super::{Screen, View};

/// A plane given by a point on the plane and a normal vector.
///
/// The normal need not be of unit length; only the sign of
/// [`signed_dist`][Self::signed_dist] and the ratio of two distances are
/// ever used.
pub struct ClipPlane<Sp> {
    pub point: Vec4<Sp>,
    pub normal: Vec4<Sp>,
}

/// The triangles resulting from clipping a triangle against a single plane.
pub type Clipped<Sp> = ArrayVec<Tri<Sp>, 2>;

impl<Sp> ClipPlane<Sp> {
    pub const fn new(point: Vec4<Sp>, normal: Vec4<Sp>) -> Self {
        Self { point, normal }
    }

    /// Returns the signed distance between `self` and `pt`, scaled by the
    /// length of the normal.
    ///
    /// The result is positive if `pt` is on the side the normal points to,
    /// negative if on the opposite side, and zero if `pt` lies on the plane.
    ///
    /// ```text
    ///                  x
    ///        n       d > 0
    ///        ^         |
    ///        |         | d = 0
    /// -------+---------x-------- self
    ///                  |
    ///                  x
    ///                d < 0
    /// ```
    #[inline]
    pub fn signed_dist(&self, pt: &Vec4<Sp>) -> f32 {
        self.normal.dot(pt) - self.normal.dot(&self.point)
    }

    /// Returns whether `pt` is inside `self` or lies on it.
    #[inline]
    pub fn is_inside(&self, pt: &Vec4<Sp>) -> bool {
        self.signed_dist(pt) >= 0.0
    }

    /// Returns the point where the edge `v0v1` leaves or enters `self`,
    /// if exactly one of `v0` and `v1` is inside.
    ///
    /// A vertex on the plane counts as inside, so an edge from the plane
    /// outward intersects at that vertex. All vertex attributes are
    /// interpolated.
    pub fn intersect(
        &self,
        [v0, v1]: [&Vertex<Sp>; 2],
    ) -> Option<Vertex<Sp>> {
        let d0 = self.signed_dist(&v0.pos);
        let d1 = self.signed_dist(&v1.pos);
        ((d0 >= 0.0) != (d1 >= 0.0)).then(|| {
            // One is negative and the other is not, so d0 - d1 is nonzero
            let t = d0 / (d0 - d1);
            v0.lerp(v1, t)
        })
    }

    /// Clips a triangle against `self`.
    ///
    /// Returns as many triangles as there are vertices of `tri` inside
    /// `self`, where vertices lying on the plane are inside, except that
    /// if all three are inside, `tri` is returned unchanged.
    ///
    /// The triangles share the normal and glyph of `tri` and have the same
    /// winding order. Their total area is the area of the part of `tri`
    /// inside `self`. Vertices on the plane may make some of them zero-area;
    /// those still rasterize as a line or a point along the plane.
    ///
    /// In the diagram below, clipping triangle ABC results in quad ABPQ,
    /// which is returned as the triangles ABP and APQ.
    ///
    /// ```text
    ///
    ///     n
    ///     ^            C
    ///     |           / \         outside
    ///     |         /    \
    /// ----+-------Q-------P--------self-----
    ///           /          \
    ///         A--___        \     inside
    ///               `---__   \
    ///                     `---B
    /// ```
    pub fn clip_tri(&self, tri: &Tri<Sp>) -> Clipped<Sp> {
        let mut res = Clipped::new();
        if tri.vs.iter().all(|v| self.is_inside(&v.pos)) {
            res.push(*tri);
            return res;
        }

        // Sutherland–Hodgman on a single plane: a triangle crosses the
        // plane at most twice, so at most four vertices result.
        let mut poly = ArrayVec::<Vertex<Sp>, 4>::new();
        let [a, b, c] = &tri.vs;
        for [v0, v1] in [[a, b], [b, c], [c, a]] {
            if self.is_inside(&v0.pos) {
                poly.push(*v0);
            }
            if let Some(v) = self.intersect([v0, v1]) {
                poly.push(v);
            }
        }

        // Fan triangulation around the first vertex
        if let Some((first, rest)) = poly.split_first() {
            for pair in rest.windows(2) {
                let vs = [*first, pair[0], pair[1]];
                res.push(Tri::new(vs, tri.normal, tri.glyph));
            }
        }
        res
    }
}

/// Returns the plane at distance `z` in front of the camera, facing away
/// from the camera.
pub fn near_plane(z: f32) -> ClipPlane<View> {
    ClipPlane::new(pt3(0.0, 0.0, z), vec4(0.0, 0.0, 1.0, 0.0))
}

/// Returns the planes bounding a `width` by `height` screen, in the order
/// y = 0, y = height - 1, x = 0, x = width - 1.
///
/// Each plane faces the interior of the screen.
pub fn viewport_planes(width: usize, height: usize) -> [ClipPlane<Screen>; 4] {
    let (w, h) = (width as f32 - 1.0, height as f32 - 1.0);
    [
        ClipPlane::new(pt3(0.0, 0.0, 0.0), vec4(0.0, 1.0, 0.0, 0.0)),
        ClipPlane::new(pt3(0.0, h, 0.0), vec4(0.0, -1.0, 0.0, 0.0)),
        ClipPlane::new(pt3(0.0, 0.0, 0.0), vec4(1.0, 0.0, 0.0, 0.0)),
        ClipPlane::new(pt3(w, 0.0, 0.0), vec4(-1.0, 0.0, 0.0, 0.0)),
    ]
}

/// A double-buffered worklist for clipping triangles against several planes.
///
/// The buffers are kept between calls, so that clipping does not allocate
/// once they have grown large enough.
pub struct Worklist<Sp> {
    front: Vec<Tri<Sp>>,
    back: Vec<Tri<Sp>>,
}

impl<Sp> Worklist<Sp> {
    pub const fn new() -> Self {
        Self { front: Vec::new(), back: Vec::new() }
    }

    /// Clips `tri` against each of `planes` in order, returning the
    /// triangles that remain.
    ///
    /// The input of each plane is the output of the previous one. Clipping
    /// stops early if nothing remains.
    pub fn clip(&mut self, planes: &[ClipPlane<Sp>], tri: Tri<Sp>) -> &[Tri<Sp>] {
        let Self { front, back } = self;
        front.clear();
        front.push(tri);
        for plane in planes {
            back.clear();
            for t in front.drain(..) {
                back.extend(plane.clip_tri(&t));
            }
            swap(front, back);
            if front.is_empty() {
                break;
            }
        }
        front
    }
}

impl<Sp> Default for Worklist<Sp> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::geom::{tri, vertex};
    use crate::math::vec3;

    use super::*;

    /// The plane z = 1, facing toward -z.
    fn far_plane() -> ClipPlane<()> {
        ClipPlane::new(pt3(0.0, 0.0, 1.0), vec4(0.0, 0.0, -1.0, 0.0))
    }

    fn v(x: f32, y: f32, z: f32) -> Vertex<()> {
        vertex(pt3(x, y, z), vec3(x, y, z), Vec4::zero())
    }

    fn is_degenerate(t: &Tri<impl Sized>) -> bool {
        t.area() < 1e-6
    }

    #[test]
    fn signed_distance() {
        let p = far_plane();
        assert_eq!(p.signed_dist(&pt3(0.0, 0.0, 1.0)), 0.0);
        assert_eq!(p.signed_dist(&pt3(3.0, 2.0, 0.0)), 1.0);
        assert_eq!(p.signed_dist(&pt3(3.0, 2.0, 3.0)), -2.0);

        // Unnormalized normal scales the distance, keeps the sign
        let q: ClipPlane<()> =
            ClipPlane::new(pt3(0.0, 0.0, 1.0), vec4(0.0, 0.0, -4.0, 0.0));
        assert_eq!(q.signed_dist(&pt3(3.0, 2.0, 0.0)), 4.0);
    }

    #[test]
    fn edge_intersection() {
        let p = far_plane();
        let (a, b) = (v(0.0, 0.0, 0.0), v(2.0, 4.0, 2.0));

        let i = p.intersect([&a, &b]).unwrap();
        assert_approx_eq!(i.pos, pt3(1.0, 2.0, 1.0));
        assert_approx_eq!(i.uv, vec3(1.0, 2.0, 1.0));

        // Same edge in the other direction gives the same point
        assert_approx_eq!(p.intersect([&b, &a]).unwrap().pos, i.pos);
    }

    #[test]
    fn edge_from_plane_outward_intersects_at_vertex() {
        let p = far_plane();
        let (on, out) = (v(0.0, 0.0, 1.0), v(2.0, 4.0, 2.0));
        assert_approx_eq!(p.intersect([&on, &out]).unwrap().pos, on.pos);
        assert_approx_eq!(p.intersect([&out, &on]).unwrap().pos, on.pos);
    }

    #[test]
    fn edge_on_one_side_has_no_intersection() {
        let p = far_plane();
        let (a, b) = (v(0.0, 0.0, 1.0), v(2.0, 4.0, 0.0));
        assert!(p.intersect([&a, &b]).is_none());
        let (a, b) = (v(0.0, 0.0, 2.0), v(2.0, 4.0, 3.0));
        assert!(p.intersect([&a, &b]).is_none());
        assert!(p.intersect([&b, &b]).is_none());
    }

    #[test]
    fn tri_clip_fully_inside() {
        let t = tri(v(0.0, -1.0, 0.0), v(2.0, 0.0, 0.5), v(-1.0, 1.5, 0.0));
        assert_eq!(far_plane().clip_tri(&t).as_slice(), &[t]);
    }

    #[test]
    fn tri_clip_fully_outside() {
        let t = tri(v(0.0, -1.0, 1.5), v(2.0, 0.0, 1.5), v(-1.0, 1.5, 2.0));
        assert!(far_plane().clip_tri(&t).is_empty());
    }

    #[test]
    fn tri_clip_inside_on_on() {
        //
        // 1.0  --on1------------on2-- plane
        //          \           /
        //           \       /
        //            \   /
        // 0.0         ins
        //       -1.0  0.0  1.0  2.0
        let t = tri(v(0.0, -1.0, 0.0), v(2.0, 0.0, 1.0), v(-1.0, 1.5, 1.0));
        assert_eq!(far_plane().clip_tri(&t).as_slice(), &[t]);
    }

    #[test]
    fn tri_clip_outside_inside_inside() {
        // 2.0      out
        //           | \
        //           |  \
        // 1.0  -----+---+----- plane
        //           |    \
        //           |     \
        // 0.0      in1----in2
        //          0.0    1.0
        let out = v(0.0, 0.0, 2.0);
        let in1 = v(0.0, 1.0, 0.0);
        let in2 = v(1.0, 0.0, 0.0);
        let t = tri(out, in1, in2).with_glyph('x');

        let res = far_plane().clip_tri(&t);
        assert_eq!(res.len(), 2);

        // Clipping `out` leaves a quadrilateral
        let q1 = [pt3(0.0, 0.5, 1.0), in1.pos, in2.pos];
        let q2 = [pt3(0.0, 0.5, 1.0), in2.pos, pt3(0.5, 0.0, 1.0)];
        assert_approx_eq!(res[0].positions(), q1);
        assert_approx_eq!(res[1].positions(), q2);

        for r in &res {
            assert_eq!(r.glyph, 'x');
            assert_eq!(r.normal, t.normal);
            assert!(!is_degenerate(r));
        }
    }

    #[test]
    fn tri_clip_outside_outside_inside() {
        let ins = v(0.0, 0.0, 0.0);
        let out1 = v(0.0, 2.0, 2.0);
        let out2 = v(2.0, 0.0, 2.0);
        let t = tri(out1, ins, out2);

        let res = far_plane().clip_tri(&t);
        assert_eq!(res.len(), 1);
        let expected = [pt3(0.0, 1.0, 1.0), ins.pos, pt3(1.0, 0.0, 1.0)];
        assert_approx_eq!(res[0].positions(), expected);
    }

    #[test]
    fn tri_clip_outside_on_inside() {
        // 2.0      out
        //           | \
        //           |   \
        // 1.0  -----+----on--- plane
        //           |   /
        //           | /
        // 0.0    . ins .  .  .
        //          0.0   1.0
        let out = v(0.0, 0.0, 2.0);
        let on = v(1.0, 0.0, 1.0);
        let ins = v(0.0, -1.0, 0.0);
        let t = tri(out, on, ins);

        // Two inside, so two triangles, one of them on the plane
        let res = far_plane().clip_tri(&t);
        assert_eq!(res.len(), 2);
        assert!(is_degenerate(&res[0]));
        let expected = [on.pos, ins.pos, pt3(0.0, -0.5, 1.0)];
        assert_approx_eq!(res[1].positions(), expected);
    }

    #[test]
    fn tri_clip_outside_on_on() {
        // 2.0      out
        //           | \
        //           |   \
        // 1.0   ---on2---on1-- plane
        //           .
        //           .
        // 0.0    .  o  .  .  .
        //          0.0   1.0
        let t = tri(v(0.0, 0.0, 2.0), v(1.0, 0.0, 1.0), v(0.0, -1.0, 1.0));
        let res = far_plane().clip_tri(&t);
        assert_eq!(res.len(), 2);
        for r in &res {
            assert!(is_degenerate(r), "{r:?}");
            for p in r.positions() {
                assert_approx_eq!(p.z(), 1.0);
            }
        }
    }

    #[test]
    fn tri_clip_outside_outside_on() {
        let on = v(1.0, 0.0, 1.0);
        let t = tri(v(0.0, 0.0, 2.0), on, v(0.0, -1.0, 3.0));
        let res = far_plane().clip_tri(&t);
        assert_eq!(res.len(), 1);
        assert_approx_eq!(res[0].positions(), [on.pos; 3]);
    }

    #[test]
    fn tri_clip_preserves_area_inside() {
        // The plane y = 0, keeping y ≥ 0
        let p: ClipPlane<()> =
            ClipPlane::new(pt3(0.0, 0.0, 0.0), vec4(0.0, 1.0, 0.0, 0.0));
        let xy = |x, y| v(x, y, 0.0);
        let cases = [
            // Inside, on, outside: the part above y = 0 has area 2
            (tri(xy(0.0, 2.0), xy(2.0, 0.0), xy(0.0, -2.0)), 2, 2.0),
            // On, on, outside: nothing above y = 0
            (tri(xy(0.0, 0.0), xy(2.0, 0.0), xy(0.0, -2.0)), 2, 0.0),
            // One inside, two outside
            (tri(xy(0.0, 2.0), xy(2.0, -2.0), xy(-2.0, -2.0)), 1, 2.0),
            // Two inside, one outside
            (tri(xy(-2.0, 2.0), xy(2.0, 2.0), xy(0.0, -2.0)), 2, 6.0),
        ];
        for (t, n, area) in cases {
            let res = p.clip_tri(&t);
            assert_eq!(res.len(), n, "{t:?}");
            let sum: f32 = res.iter().map(|r| r.area()).sum();
            assert_approx_eq!(sum, area, eps = 1e-4);
        }
    }

    #[test]
    fn near_plane_keeps_points_in_front() {
        let p = near_plane(0.1);
        assert!(p.is_inside(&pt3(5.0, -3.0, 0.1)));
        assert!(p.is_inside(&pt3(0.0, 0.0, 10.0)));
        assert!(!p.is_inside(&pt3(0.0, 0.0, 0.0)));
        assert!(!p.is_inside(&pt3(0.0, 0.0, -1.0)));
    }

    #[test]
    fn viewport_planes_bound_the_screen() {
        let planes = viewport_planes(80, 24);
        let inside =
            [pt3(0.0, 0.0, 0.5), pt3(79.0, 23.0, 0.5), pt3(40.0, 12.0, 0.0)];
        for p in &inside {
            assert!(planes.iter().all(|pl| pl.is_inside(p)), "{p:?}");
        }
        let outside = [
            pt3(10.0, -0.5, 0.5),
            pt3(10.0, 23.5, 0.5),
            pt3(-0.5, 10.0, 0.5),
            pt3(79.5, 10.0, 0.5),
        ];
        for (pl, p) in planes.iter().zip(&outside) {
            assert!(!pl.is_inside(p), "{p:?}");
        }
    }

    #[test]
    fn worklist_clips_against_each_plane() {
        let planes = viewport_planes(10, 10);
        let mut wl = Worklist::new();
        let vs = |x, y| vertex(pt3(x, y, 0.5), vec3(0.0, 0.0, 0.0), Vec4::zero());

        // Fully inside
        let t = tri(vs(1.0, 1.0), vs(8.0, 1.0), vs(1.0, 8.0));
        assert_eq!(wl.clip(&planes, t), &[t]);

        // Fully outside to the left
        let t = tri(vs(-5.0, 1.0), vs(-1.0, 1.0), vs(-5.0, 8.0));
        assert!(wl.clip(&planes, t).is_empty());

        // Overlaps the bottom-right corner
        let t = tri(vs(5.0, 5.0), vs(12.0, 5.0), vs(5.0, 12.0));
        let res = wl.clip(&planes, t);
        assert!(res.len() >= 2);
        for r in res {
            assert!(!is_degenerate(r));
            for p in r.positions() {
                assert!((-1e-4..=9.0001).contains(&p.x()), "{p:?}");
                assert!((-1e-4..=9.0001).contains(&p.y()), "{p:?}");
            }
        }
        let area: f32 = res.iter().map(|r| r.area()).sum();
        // The part of the triangle with x, y ≤ 9 is a 4×4 square minus
        // the corner triangle with legs of 1
        assert_approx_eq!(area, 15.5, eps = 1e-4);
    }
}

//! Depth sorting of projected triangles.

use crate::geom::Tri;

use super::{Screen, ctx::DepthSort};

/// Sorts triangles by the average depth of their vertices.
///
/// With [`DepthSort::BackToFront`], drawing the triangles in the resulting
/// order paints nearer faces over farther ones. The sort is not stable;
/// triangles of equal depth may be drawn in any order.
pub fn depth_sort(tris: &mut [Tri<Screen>], order: DepthSort) {
    match order {
        DepthSort::BackToFront => {
            tris.sort_unstable_by(|a, b| b.avg_z().total_cmp(&a.avg_z()))
        }
        DepthSort::FrontToBack => {
            tris.sort_unstable_by(|a, b| a.avg_z().total_cmp(&b.avg_z()))
        }
    }
}

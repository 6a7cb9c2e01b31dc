//! Converting triangles into character cells.
//!
//! Triangles are filled with a contour-tracking scan-line algorithm. Each
//! edge of the triangle is walked cell by cell with a Bresenham stepper, and
//! for each row the leftmost and rightmost cells visited are recorded in a
//! [`Contour`] table. Every row with a nonempty span is then filled from its
//! left end to its right end, inclusive.
//!
//! The vertex coordinates are truncated to integers before tracing, so the
//! result covers the cells whose top-left corners the edges pass through or
//! near. There is no sub-cell precision or anti-aliasing.

use alloc::{vec, vec::Vec};

use crate::geom::Tri;

use super::{Screen, target::Target};

/// Span value of a row that no edge has visited.
const EMPTY: (i32, i32) = (i32::MAX, i32::MIN);

/// A table of the horizontal extents of a triangle, one span per row.
///
/// The table is allocated once and reused for every triangle; it is reset
/// after each fill, so no spans carry over from one triangle to the next.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contour {
    spans: Vec<(i32, i32)>,
    /// The range of rows touched since the last reset.
    dirty: Option<(usize, usize)>,
}

impl Contour {
    /// Creates an empty contour table for a grid with `height` rows.
    pub fn new(height: usize) -> Self {
        Self { spans: vec![EMPTY; height], dirty: None }
    }

    /// Returns the number of rows in `self`.
    pub fn height(&self) -> usize {
        self.spans.len()
    }

    /// Changes the number of rows, discarding any recorded spans.
    pub fn resize(&mut self, height: usize) {
        self.spans.clear();
        self.spans.resize(height, EMPTY);
        self.dirty = None;
    }

    /// Returns the span `(min_x, max_x)` of row `y`, or `None` if the row is
    /// out of bounds or no edge has visited it.
    pub fn span(&self, y: usize) -> Option<(i32, i32)> {
        self.spans.get(y).copied().filter(|&(lo, hi)| hi >= lo)
    }

    /// Walks the line segment from `(x0, y0)` to `(x1, y1)`, widening the
    /// span of each row it passes through.
    ///
    /// Both endpoints are visited. Cells on rows outside the table are
    /// skipped, but the walk continues through them.
    pub fn trace_edge(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32)) {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let (sx, sy) = (dx.signum(), dy.signum());

        // The diagonal step, and the step along the dominant axis only
        let diag = (sx, sy);
        let (major, minor, straight) = if dx.abs() >= dy.abs() {
            (dx.abs(), dy.abs(), (sx, 0))
        } else {
            (dy.abs(), dx.abs(), (0, sy))
        };

        let (mut x, mut y) = (x0, y0);
        let mut err = minor / 2;
        for _ in 0..=major {
            self.visit(x, y);
            err += minor;
            let (ix, iy) = if err < major {
                straight
            } else {
                err -= major;
                diag
            };
            x += ix;
            y += iy;
        }
    }

    /// Fills `tri` with its glyph.
    ///
    /// Returns the number of cells written, including those dropped by
    /// `target` for being out of bounds.
    pub fn fill(
        &mut self,
        tri: &Tri<Screen>,
        target: &mut impl Target,
    ) -> usize {
        let [a, b, c] = tri.positions().map(|p| (p.x() as i32, p.y() as i32));
        self.trace_edge(a, b);
        self.trace_edge(b, c);
        self.trace_edge(c, a);

        let mut cells = 0;
        if let Some((top, bottom)) = self.dirty.take() {
            for y in top..=bottom {
                let (lo, hi) = self.spans[y];
                if hi >= lo {
                    for x in lo..=hi {
                        target.set_glyph(y as i32, x, tri.glyph);
                    }
                    cells += (i64::from(hi) - i64::from(lo) + 1) as usize;
                }
                self.spans[y] = EMPTY;
            }
        }
        cells
    }

    fn visit(&mut self, x: i32, y: i32) {
        let Ok(row) = usize::try_from(y) else {
            return;
        };
        let Some((lo, hi)) = self.spans.get_mut(row) else {
            return;
        };
        *lo = (*lo).min(x);
        *hi = (*hi).max(x);
        self.dirty = Some(match self.dirty {
            Some((top, bottom)) => (top.min(row), bottom.max(row)),
            None => (row, row),
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use crate::geom::{tri, vertex};
    use crate::math::{Vec4, pt3, vec3};
    use crate::render::target::FrameBuffer;

    use super::*;

    fn screen_tri(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Tri<Screen> {
        let v = |(x, y): (f32, f32)| {
            vertex(pt3(x, y, 0.5), vec3(0.0, 0.0, 0.0), Vec4::zero())
        };
        tri(v(a), v(b), v(c)).with_glyph('#')
    }

    fn render(w: usize, h: usize, tris: &[Tri<Screen>]) -> (String, usize) {
        let mut c = Contour::new(h);
        let mut fb = FrameBuffer::new(w, h);
        let cells = tris.iter().map(|t| c.fill(t, &mut fb)).sum();
        (fb.to_string(), cells)
    }

    #[test]
    fn trace_horizontal_edge() {
        let mut c = Contour::new(3);
        c.trace_edge((3, 1), (-2, 1));
        assert_eq!(c.span(0), None);
        assert_eq!(c.span(1), Some((-2, 3)));
        assert_eq!(c.span(2), None);
    }

    #[test]
    fn trace_steep_edge_visits_every_row() {
        let mut c = Contour::new(8);
        c.trace_edge((0, 0), (2, 7));
        for y in 0..8 {
            let (lo, hi) = c.span(y).unwrap();
            assert_eq!(lo, hi, "row {y}");
            assert!((0..=2).contains(&lo), "row {y}");
        }
        assert_eq!(c.span(0), Some((0, 0)));
        assert_eq!(c.span(7), Some((2, 2)));
    }

    #[test]
    fn trace_diagonal_edge() {
        let mut c = Contour::new(5);
        c.trace_edge((4, 0), (0, 4));
        for y in 0..5 {
            let x = 4 - y as i32;
            assert_eq!(c.span(y), Some((x, x)));
        }
    }

    #[test]
    fn trace_skips_rows_outside_table() {
        let mut c = Contour::new(2);
        c.trace_edge((0, -3), (0, 5));
        assert_eq!(c.span(0), Some((0, 0)));
        assert_eq!(c.span(1), Some((0, 0)));
    }

    #[test]
    fn fill_right_triangle() {
        let t = screen_tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0));
        let (s, cells) = render(6, 5, &[t]);
        assert_eq!(
            s,
            "#####_\n\
             ####__\n\
             ###___\n\
             ##____\n\
             #_____"
                .replace('_', " ")
        );
        // The cells with x + y ≤ 4
        assert_eq!(cells, 15);
    }

    #[test]
    fn fill_truncates_coordinates() {
        let a = screen_tri((0.9, 0.9), (2.9, 0.9), (0.9, 2.9));
        let b = screen_tri((0.0, 0.0), (2.0, 0.0), (0.0, 2.0));
        assert_eq!(render(3, 3, &[a]), render(3, 3, &[b]));
    }

    #[test]
    fn fill_is_independent_of_starting_vertex() {
        let (a, b, c) = ((1.0, 1.0), (6.0, 2.0), (3.0, 5.0));
        let expected = render(8, 6, &[screen_tri(a, b, c)]);
        assert_eq!(render(8, 6, &[screen_tri(b, c, a)]), expected);
        assert_eq!(render(8, 6, &[screen_tri(c, a, b)]), expected);
    }

    #[test]
    fn fill_degenerate_triangle_draws_a_line() {
        let t = screen_tri((0.0, 1.0), (3.0, 1.0), (3.0, 1.0));
        let (s, cells) = render(4, 3, &[t]);
        assert_eq!(s, "    \n####\n    ");
        assert_eq!(cells, 4);
    }

    #[test]
    fn spans_do_not_survive_between_triangles() {
        let mut c = Contour::new(4);
        let mut fb = FrameBuffer::new(4, 4);
        c.fill(&screen_tri((0.0, 0.0), (3.0, 0.0), (0.0, 3.0)), &mut fb);
        assert!((0..4).all(|y| c.span(y).is_none()));

        // A single cell; would be wider if the previous spans remained
        let dot = screen_tri((3.0, 3.0), (3.0, 3.0), (3.0, 3.0));
        assert_eq!(c.fill(&dot, &mut fb), 1);
    }

    #[test]
    fn resize_clears_spans() {
        let mut c = Contour::new(2);
        c.trace_edge((0, 0), (1, 1));
        c.resize(4);
        assert_eq!(c.height(), 4);
        assert!((0..4).all(|y| c.span(y).is_none()));
    }
}

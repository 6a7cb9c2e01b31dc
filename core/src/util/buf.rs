//! Two-dimensional buffers.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};

/// A rectangular 2D buffer that owns its elements, backed by a `Vec`.
///
/// `Buf2` stores its elements contiguously, in standard row-major order,
/// such that element (x, y) maps to element at index
/// ```text
/// buf.width() * y + x
/// ```
/// in the backing vector.
///
/// # Examples
/// ```
/// # use glyphcast_core::util::buf::*;
/// let mut buf = Buf2::new_with(4, 3, |x, y| 10 * y + x);
/// // Positions are column first, row second
/// assert_eq!(buf.get(2, 1), Some(&12));
/// // Out of bounds, including negative, is `None`
/// assert_eq!(buf.get(4, 0), None);
/// assert_eq!(buf.get(0, -1), None);
///
/// if let Some(e) = buf.get_mut(3, 2) {
///     *e = 0;
/// }
/// assert_eq!(buf.rows().last(), Some(&[20, 21, 22, 0][..]));
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct Buf2<T> {
    w: usize,
    h: usize,
    data: Vec<T>,
}

impl<T> Buf2<T> {
    /// Returns a buffer with size `w` × `h`, with every element
    /// initialized by calling `init_fn(x, y)` where x is the column index
    /// and y the row index of the element being initialized.
    pub fn new_with<F>(w: usize, h: usize, mut init_fn: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            data.extend((0..w).map(|x| init_fn(x, y)));
        }
        Self { w, h, data }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Returns a reference to the element at column `x`, row `y`,
    /// or `None` if the position is out of bounds.
    ///
    /// Negative coordinates are always out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        let idx = self.to_index_checked(x, y)?;
        Some(&self.data[idx])
    }
    /// Returns a mutable reference to the element at column `x`, row `y`,
    /// or `None` if the position is out of bounds.
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
        let idx = self.to_index_checked(x, y)?;
        Some(&mut self.data[idx])
    }

    /// Returns an iterator over the rows of `self` as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on zero
        self.data.chunks_exact(self.w.max(1))
    }

    /// Fills `self` with clones of `val`.
    pub fn fill(&mut self, val: T)
    where
        T: Clone,
    {
        self.data.fill(val);
    }

    fn to_index_checked(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.w && y < self.h).then(|| self.w * y + x)
    }
}

impl<T> Debug for Buf2<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buf2")
            .field("w", &self.w)
            .field("h", &self.h)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buf_new_with() {
        let buf = Buf2::new_with(3, 2, |x, y| x + y);
        let rows: Vec<_> = buf.rows().collect();
        assert_eq!(rows, [&[0, 1, 2], &[1, 2, 3]]);
    }

    #[test]
    fn buf_extents() {
        let buf = Buf2::new_with(8, 10, |_, _| ());
        assert_eq!(buf.width(), 8);
        assert_eq!(buf.height(), 10);
        assert_eq!(buf.rows().count(), 10);
    }

    #[test]
    fn buf_get() {
        let buf = Buf2::new_with(4, 5, |x, y| x * 10 + y);

        assert_eq!(buf.get(0, 0), Some(&0));
        assert_eq!(buf.get(1, 0), Some(&10));
        assert_eq!(buf.get(3, 4), Some(&34));
        assert_eq!(buf.get(4, 4), None);
        assert_eq!(buf.get(3, 5), None);
        assert_eq!(buf.get(-1, 0), None);
        assert_eq!(buf.get(0, -1), None);
        assert_eq!(buf.get(i32::MIN, i32::MAX), None);
    }

    #[test]
    fn buf_get_mut() {
        let mut buf = Buf2::new_with(4, 5, |x, y| x * 10 + y);

        *buf.get_mut(3, 4).unwrap() = 123;
        assert_eq!(buf.get(3, 4), Some(&123));
        assert_eq!(buf.get_mut(4, 4), None);
        assert_eq!(buf.get_mut(-1, -1), None);
    }

    #[test]
    fn buf_fill() {
        let mut buf = Buf2::new_with(3, 2, |x, y| x + 3 * y);
        buf.fill(7);
        assert!(buf.rows().all(|r| r == [7; 3]));
    }

    #[test]
    fn empty_buf_has_no_elements() {
        let buf: Buf2<char> = Buf2::new_with(0, 0, |_, _| ' ');
        assert_eq!(buf.rows().count(), 0);
        assert_eq!(buf.get(0, 0), None);
    }

    #[test]
    fn zero_width_buf_has_no_rows() {
        let buf: Buf2<char> = Buf2::new_with(0, 3, |_, _| ' ');
        assert!(buf.rows().next().is_none());
        assert_eq!(buf.get(0, 0), None);
    }
}

//! Render targets and display surfaces.
//!
//! A render target is anything glyphs can be written into, typically a
//! [`FrameBuffer`]. A [`Surface`] is where finished frames are shown, such
//! as a terminal.

use core::fmt::{self, Display, Formatter};

use crate::geom::BLANK;
use crate::util::buf::Buf2;

/// Trait for types that can be used as render targets.
pub trait Target {
    /// Returns the number of columns in `self`.
    fn width(&self) -> usize;

    /// Returns the number of rows in `self`.
    fn height(&self) -> usize;

    /// Resets every cell of `self` to the blank glyph.
    fn clear(&mut self);

    /// Writes `ch` into the cell at `row`, `col`.
    ///
    /// Writes outside the bounds of `self`, including those with negative
    /// indices, must be silently ignored.
    fn set_glyph(&mut self, row: i32, col: i32, ch: char);
}

/// Trait for displaying finished frames.
pub trait Surface {
    /// The error type returned if presenting fails.
    type Error;

    /// Shows `frame` in its entirety.
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}

/// A grid of glyphs, stored in row-major order.
#[derive(Clone, Eq, PartialEq)]
pub struct FrameBuffer(Buf2<char>);

impl FrameBuffer {
    /// Creates a blank frame buffer with `width` columns and `height` rows.
    pub fn new(width: usize, height: usize) -> Self {
        Self(Buf2::new_with(width, height, |_, _| BLANK))
    }

    /// Returns the glyph at `row`, `col`, or `None` if out of bounds.
    pub fn get(&self, row: i32, col: i32) -> Option<char> {
        self.0.get(col, row).copied()
    }

    /// Returns an iterator over the rows of `self`.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.0.rows()
    }
}

impl Target for FrameBuffer {
    fn width(&self) -> usize {
        self.0.width()
    }

    fn height(&self) -> usize {
        self.0.height()
    }

    fn clear(&mut self) {
        self.0.fill(BLANK);
    }

    #[inline]
    fn set_glyph(&mut self, row: i32, col: i32, ch: char) {
        if let Some(c) = self.0.get_mut(col, row) {
            *c = ch;
        }
    }
}

impl<T: Target + ?Sized> Target for &mut T {
    fn width(&self) -> usize {
        (**self).width()
    }
    fn height(&self) -> usize {
        (**self).height()
    }
    fn clear(&mut self) {
        (**self).clear();
    }
    fn set_glyph(&mut self, row: i32, col: i32, ch: char) {
        (**self).set_glyph(row, col, ch);
    }
}

impl Display for FrameBuffer {
    /// Writes the rows of `self` separated by newlines, with no trailing
    /// newline.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            row.iter().try_for_each(|c| write!(f, "{c}"))?;
        }
        Ok(())
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

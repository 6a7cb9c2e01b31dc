//! Presenting frames on a terminal.
//!
//! The first frame, and the first one after [`Terminal::invalidate`] or a
//! change of size, is drawn in full. After that only the runs of cells
//! that differ from the previous frame are redrawn.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    event::{DisableFocusChange, EnableFocusChange},
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal,
};

use gc::render::target::{FrameBuffer, Surface, Target};

/// A terminal in raw mode, showing the alternate screen.
///
/// The original terminal state is restored when the `Terminal` is dropped.
pub struct Terminal {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    active: bool,
}

impl Terminal {
    /// Enters raw mode and switches to the alternate screen.
    pub fn enter() -> io::Result<Self> {
        let mut term = Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            active: false,
        };
        terminal::enable_raw_mode()?;
        term.active = true;
        term.buf.queue(terminal::EnterAlternateScreen)?;
        term.buf.queue(cursor::Hide)?;
        term.buf.queue(terminal::DisableLineWrap)?;
        term.buf.queue(EnableFocusChange)?;
        term.flush_buf()?;

        let (w, h) = Self::size()?;
        log::info!("entered terminal of {w}×{h} cells");
        Ok(term)
    }

    /// Returns the number of columns and rows of the terminal.
    pub fn size() -> io::Result<(usize, usize)> {
        let (w, h) = terminal::size()?;
        Ok((w.into(), h.into()))
    }

    /// Forces the next frame to be drawn in full.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Restores the terminal to its original state.
    ///
    /// Called automatically on drop; calling it more than once is a no-op.
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(DisableFocusChange)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        log::info!("left terminal");
        Ok(())
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()
    }
}

impl Surface for Terminal {
    type Error = io::Error;

    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        self.buf.clear();
        match &mut self.last {
            Some(prev)
                if prev.width() == frame.width()
                    && prev.height() == frame.height() =>
            {
                encode_diff_into(prev, frame, &mut self.buf)?;
                prev.clone_from(frame);
            }
            last => {
                encode_full_into(frame, &mut self.buf)?;
                *last = Some(frame.clone());
            }
        }
        self.flush_buf()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Nothing sensible to do if restoring fails
        let _ = self.exit();
    }
}

/// Encodes a full redraw of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    for (y, row) in fb.rows().enumerate() {
        if y > 0 {
            out.queue(Print("\r\n"))?;
        }
        out.queue(Print(row.iter().collect::<String>()))?;
    }
    Ok(())
}

/// Encodes a redraw of the cells of `next` that differ from `prev`.
///
/// `prev` and `next` must have the same dimensions.
pub fn encode_diff_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    for (y, (a, b)) in prev.rows().zip(next.rows()).enumerate() {
        for (x, run) in changed_runs(a, b) {
            out.queue(cursor::MoveTo(to_u16(x), to_u16(y)))?;
            out.queue(Print(run.iter().collect::<String>()))?;
        }
    }
    Ok(())
}

/// Returns the maximal runs of cells where `next` differs from `prev`, as
/// pairs of starting column and the new cells.
pub fn changed_runs<'a>(
    prev: &'a [char],
    next: &'a [char],
) -> impl Iterator<Item = (usize, &'a [char])> + 'a {
    let mut x = 0;
    let w = next.len().min(prev.len());
    core::iter::from_fn(move || {
        while x < w && prev[x] == next[x] {
            x += 1;
        }
        if x == w {
            return None;
        }
        let start = x;
        while x < w && prev[x] != next[x] {
            x += 1;
        }
        Some((start, &next[start..x]))
    })
}

fn to_u16(i: usize) -> u16 {
    u16::try_from(i).unwrap_or(u16::MAX)
}

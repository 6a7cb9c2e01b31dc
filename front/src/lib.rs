//! Terminal frontend for running `glyphcast` programs.
//!
//! [`run`] drives the main loop: it polls keyboard and resize events,
//! invokes a callback to draw each frame, and presents the result on a
//! [`Terminal`][term::Terminal].

use std::{
    ops::ControlFlow::{self, Break},
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyEventKind};

use gc::render::target::{FrameBuffer, Surface};

use keys::{HeldKeys, should_quit};
use term::Terminal;

pub mod keys;
pub mod logger;
pub mod term;

/// Per-frame state. [`run`] passes an instance of `Frame` to the callback
/// function on every iteration of the main loop.
pub struct Frame<'a> {
    /// Elapsed time since the start of the first frame.
    pub t: Duration,
    /// Elapsed time since the start of the previous frame.
    pub dt: Duration,
    /// Character buffer in which to draw, the size of the terminal.
    pub buf: &'a mut FrameBuffer,
    /// The camera controls currently held down.
    pub input: &'a HeldKeys,
    /// Whether the terminal was resized since the previous frame.
    pub resized: bool,
}

/// Options of the main loop.
#[derive(Copy, Clone, Debug)]
pub struct Options {
    /// The frame rate cap. `None` means the loop runs as fast as it can.
    pub target_fps: Option<u32>,
}

impl Default for Options {
    fn default() -> Self {
        Self { target_fps: Some(30) }
    }
}

/// Runs the main loop of the program, invoking the callback on each
/// iteration to draw the next frame.
///
/// The main loop stops and this function returns if:
/// * a quit key is pressed (see [`keys::should_quit`]); or
/// * the callback returns `ControlFlow::Break`.
///
/// # Errors
/// If reading terminal events or writing to the terminal fails.
pub fn run<F>(
    term: &mut Terminal,
    opts: Options,
    mut frame_fn: F,
) -> anyhow::Result<()>
where
    F: FnMut(&mut Frame) -> ControlFlow<()>,
{
    let frame_time = opts
        .target_fps
        .filter(|&fps| fps > 0)
        .map_or(Duration::ZERO, |fps| Duration::from_secs(1) / fps);

    let (w, h) = Terminal::size()?;
    let mut buf = FrameBuffer::new(w.max(1), h.max(1));
    let mut held = HeldKeys::new();
    let mut resized = false;

    let start = Instant::now();
    let mut last = start;
    loop {
        let deadline = last + frame_time;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(&key) {
                        return Ok(());
                    }
                    held.handle(&key, Instant::now());
                }
                Event::Resize(w, h) => {
                    log::debug!("terminal resized to {w}×{h}");
                    buf = FrameBuffer::new(w.max(1).into(), h.max(1).into());
                    term.invalidate();
                    resized = true;
                }
                Event::FocusLost => held.clear(),
                _ => {}
            }
        }
        let now = Instant::now();
        held.expire(now);

        let frame = &mut Frame {
            t: now - start,
            dt: now - last,
            buf: &mut buf,
            input: &held,
            resized,
        };
        last = now;
        resized = false;

        if let Break(()) = frame_fn(frame) {
            return Ok(());
        }
        term.present(&buf)?;
    }
}

//! Rendering statistics.

use alloc::{format, string::String};
use core::fmt::{self, Display, Formatter};
use core::ops::AddAssign;
use core::time::Duration;
#[cfg(feature = "std")]
use std::time::Instant;

//
// Types
//

/// Collects and accumulates rendering statistics and performance data.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Time spent rendering.
    pub time: Duration,
    /// Number of frames rendered.
    pub frames: f32,

    /// Faces submitted for rendering, and triangles output to the target.
    ///
    /// Clipping may split a face into several triangles, so the output
    /// count may exceed the input count.
    pub faces: Throughput,
    /// Faces discarded by face culling.
    pub culled: usize,
    /// Faces or triangles discarded entirely by clipping.
    pub clipped: usize,
    /// Faces or triangles skipped as degenerate.
    pub degenerate: usize,
    /// Cells written by the rasterizer.
    pub cells: usize,

    #[cfg(feature = "std")]
    start: Option<Instant>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Throughput {
    // Count of items submitted for rendering.
    pub i: usize,
    // Count of items output to the render target.
    pub o: usize,
}

//
// Impls
//

impl Stats {
    /// Creates a new zeroed `Stats` instance.
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates a `Stats` instance that records the time of its creation.
    ///
    /// Call [`finish`][Self::finish] to write the elapsed time to `self.time`.
    ///
    /// Equivalent to [`Stats::new`] if the `std` feature is not enabled.
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            start: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Stops the timer and records the elapsed time to `self.time`.
    ///
    /// No-op if the timer was not running. This method is also no-op unless
    /// the `std` feature is enabled.
    pub fn finish(self) -> Self {
        Self {
            #[cfg(feature = "std")]
            time: self.start.map(|st| st.elapsed()).unwrap_or(self.time),
            #[cfg(feature = "std")]
            start: None,
            ..self
        }
    }

    /// Returns the average per-frame values of `self`.
    pub fn per_frame(&self) -> Self {
        let frames = self.frames.max(1.0);
        let avg = |n: usize| (n as f32 / frames) as usize;
        Self {
            time: self.time.div_f32(frames),
            frames: 1.0,
            faces: Throughput {
                i: avg(self.faces.i),
                o: avg(self.faces.o),
            },
            culled: avg(self.culled),
            clipped: avg(self.clipped),
            degenerate: avg(self.degenerate),
            cells: avg(self.cells),
            #[cfg(feature = "std")]
            start: None,
        }
    }

    /// Returns the average number of frames per second.
    pub fn fps(&self) -> f32 {
        if self.time.is_zero() {
            0.0
        } else {
            self.frames / self.time.as_secs_f32()
        }
    }
}

impl Display for Stats {
    /// Writes a one-line summary of `self`.
    ///
    /// If more than one frame has been recorded, the summary also includes
    /// the frame rate and the average time per frame.
    #[inline(never)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frames {} │ time {}",
            self.frames,
            human_time(self.time)
        )?;
        if self.frames > 1.0 {
            let per_f = self.per_frame();
            write!(
                f,
                " ({}/frame, {:.1} fps)",
                human_time(per_f.time),
                self.fps()
            )?;
        }
        write!(
            f,
            " │ faces {} │ culled {} │ clipped {} │ degenerate {} │ cells {}",
            self.faces,
            human_num(self.culled).trim_start(),
            human_num(self.clipped).trim_start(),
            human_num(self.degenerate).trim_start(),
            human_num(self.cells).trim_start(),
        )
    }
}

impl Display for Throughput {
    #[inline(never)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let &Self { i, o } = self;
        if f.alternate() {
            if i == 0 {
                f.pad("--")
            } else {
                let pct = 100.0 * o as f32 / i as f32;
                f.pad(&format!("{pct:.1}%"))
            }
        } else {
            let (i, o) = (human_num(i), human_num(o));
            f.pad(&format!("{} / {}", i.trim_start(), o.trim_start()))
        }
    }
}

impl AddAssign for Stats {
    /// Appends the stats of `other` to `self`.
    fn add_assign(&mut self, other: Self) {
        self.time += other.time;
        self.frames += other.frames;
        self.faces += other.faces;
        self.culled += other.culled;
        self.clipped += other.clipped;
        self.degenerate += other.degenerate;
        self.cells += other.cells;
    }
}

impl AddAssign for Throughput {
    fn add_assign(&mut self, rhs: Self) {
        self.i += rhs.i;
        self.o += rhs.o;
    }
}

#[inline(never)]
fn human_num(n: usize) -> String {
    if n < 1_000 {
        format!("{n:5}")
    } else if n < 100_000 {
        format!("{:4.1}k", n as f32 / 1_000.)
    } else if n < 1_000_000 {
        format!("{:4}k", n / 1_000)
    } else if n < 100_000_000 {
        format!("{:4.1}M", n as f32 / 1_000_000.)
    } else if n < 1_000_000_000 {
        format!("{:4}M", n / 1_000_000)
    } else {
        format!("{n:5.1e}")
    }
}

#[inline(never)]
fn human_time(d: Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1e-3 {
        format!("{:.1}μs", secs * 1_000_000.)
    } else if secs < 1.0 {
        format!("{:.1}ms", secs * 1_000.)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{}min {:02.0}s", (secs / 60.0) as u32, secs % 60.0)
    }
}

//! Interactive mesh viewer.
//!
//! Usage: `viewer [--spin] [FILE.obj]`
//!
//! Shows the given OBJ mesh, or a unit cube if none is given. Move with
//! W/A/S/D, rise and sink with Space and C, and look around with the arrow
//! keys. Press Q or Esc to quit.

use std::ops::ControlFlow::Continue;

use anyhow::{Context, Result};
use log::info;

use gc::prelude::*;
use gc::render::WorldToWorld;
use gc_front::{Options, logger, run, term::Terminal};
use gc_geom::{io::load_obj, solids::cube};

fn main() -> Result<()> {
    logger::init_from_env()?;

    let mut spin = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--spin" => spin = true,
            _ => path = Some(arg),
        }
    }
    let mesh = match &path {
        Some(p) => load_obj(p).with_context(|| format!("loading {p}"))?,
        None => cube(),
    };

    let (w, h) = Terminal::size()?;
    let cfg = Config {
        width: w.max(1),
        height: h.max(1),
        ..Config::default()
    };
    let mut rdr = Renderer::new(cfg, Camera::default());
    rdr.add_mesh(mesh);

    let mut term = Terminal::enter()?;
    let res = run(&mut term, Options::default(), |frame| {
        let (w, h) = (frame.buf.width(), frame.buf.height());
        if frame.resized || (w, h) != (rdr.config().width, rdr.config().height)
        {
            rdr.resize(w, h);
        }
        if spin {
            let t = frame.t.as_secs_f32();
            let m = rotate_y(t * 0.7).then(&rotate_x(t * 0.3));
            rdr.set_world_transform(m.to::<WorldToWorld>());
        }
        rdr.frame(frame.input, frame.buf);
        Continue(())
    });
    // Restore the terminal before printing anything
    term.exit()?;
    res?;

    let stats = rdr.stats();
    info!("total: {stats}");
    info!("camera left at {:?}", rdr.camera().pos);
    println!("{stats}");
    Ok(())
}

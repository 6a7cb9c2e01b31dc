//! Renders a single frame and prints it to stdout.
//!
//! Usage: `still [--size WxH] [--yaw RADIANS] [FILE.obj]`
//!
//! Renders the given OBJ mesh, or a unit cube, from the default camera
//! position. The frame statistics are printed to stderr.

use anyhow::{Context, Result, bail};

use gc::prelude::*;
use gc_front::logger;
use gc_geom::{io::load_obj, solids::cube};

struct Args {
    size: (usize, usize),
    yaw: f32,
    path: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args { size: (80, 24), yaw: 0.0, path: None };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--size" => {
                let s = it.next().context("--size needs a value")?;
                let (w, h) = s
                    .split_once('x')
                    .with_context(|| format!("invalid size {s:?}"))?;
                args.size = (w.parse()?, h.parse()?);
                if args.size.0 == 0 || args.size.1 == 0 {
                    bail!("size must be positive: {s:?}");
                }
            }
            "--yaw" => {
                let s = it.next().context("--yaw needs a value")?;
                args.yaw = s.parse()?;
            }
            _ => args.path = Some(arg),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    logger::init_from_env()?;
    let Args { size: (width, height), yaw, path } = parse_args()?;

    let mesh = match &path {
        Some(p) => load_obj(p).with_context(|| format!("loading {p}"))?,
        None => cube(),
    };
    let cfg = Config { width, height, ..Config::default() };
    let mut rdr = Renderer::new(cfg, Camera::default());
    rdr.add_mesh(mesh);

    // Turn the mesh rather than the camera, so it stays in view
    rdr.set_world_transform(rotate_y(yaw).to());

    let mut fb = FrameBuffer::new(width, height);
    let stats = rdr.frame(&KeySet::new(), &mut fb);
    println!("{fb}");
    eprintln!("{stats}");
    Ok(())
}

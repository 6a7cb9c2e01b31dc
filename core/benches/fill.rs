//! Fill rate and full-frame benchmarks.

use divan::{Bencher, black_box, counter::ItemsCount};

use glyphcast_core::{prelude::*, render::raster::Contour};

const SIZES: [f32; 4] = [4.0, 16.0, 64.0, 256.0];

fn screen_tri(sz: f32) -> Tri<Screen> {
    let v = |x: f32, y: f32| {
        vertex(pt3(x * sz, y * sz, 0.5), vec3(0.0, 0.0, 0.0), Vec4::zero())
    };
    tri(v(0.1, 0.1), v(0.9, 0.3), v(0.4, 0.9)).with_glyph('#')
}

#[divan::bench(args = SIZES)]
fn flat(b: Bencher, sz: f32) {
    let mut fb = FrameBuffer::new(256, 256);
    let mut contour = Contour::new(256);

    b.with_inputs(|| screen_tri(sz))
        .input_counter(|t| ItemsCount::new(t.area() as usize))
        .bench_local_refs(|t| contour.fill(t, &mut fb));
}

/// A `n` by `n` grid of quads facing the camera, one unit wide.
fn grid(n: usize) -> Mesh {
    let mut b = Mesh::builder();
    for j in 0..=n {
        for i in 0..=n {
            let (x, y) = (i as f32 / n as f32, j as f32 / n as f32);
            b.push_vert(vec3(x, y, 0.0), vec3(x, y, 0.0));
        }
    }
    let idx = |i, j| j * (n + 1) + i;
    for j in 0..n {
        for i in 0..n {
            b.push_face(idx(i, j), idx(i, j + 1), idx(i + 1, j));
            b.push_face(idx(i + 1, j + 1), idx(i + 1, j), idx(i, j + 1));
        }
    }
    b.build()
}

#[divan::bench(args = [1, 4, 16, 64])]
fn frame(b: Bencher, n: usize) {
    let cfg = Config::default();
    let mut fb = FrameBuffer::new(cfg.width, cfg.height);
    let mut rdr = Renderer::new(cfg, Camera::default());
    rdr.add_mesh(grid(n));

    let input = KeySet::new();
    b.counter(ItemsCount::new(2 * n * n))
        .bench_local(|| black_box(rdr.frame(&input, &mut fb)));
}

fn main() {
    divan::main()
}

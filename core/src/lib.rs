//! Core functionality of the `glyphcast` project.
//!
//! Includes a small math library with space-tagged vectors and matrices,
//! triangle and mesh types, and a software 3D renderer that draws flat-shaded
//! triangles as glyphs into a character grid.
//!
//! A frame goes through these stages, in order:
//!
//! 1. [view construction][render::cam] from the camera position, yaw and pitch
//! 2. [transform, backface cull and shade][render::shade] each triangle
//! 3. [clip][render::clip] against the near plane in view space
//! 4. [project][render::proj] to screen space
//! 5. [sort][render::sort] back to front (painter's algorithm)
//! 6. [clip][render::clip] against the four viewport edges
//! 7. [rasterize][render::raster] into the [frame buffer][render::target]
//!
//! # Crate features
//!
//! * `std`:
//!   Uses the floating-point functions of `std`, implements
//!   `std::error::Error` for error types, and enables frame timing.
//!   Enabled by default.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate, for `no_std` targets.
//!
//! One of the two must be enabled.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("either the `std` or the `libm` feature must be enabled");

pub mod geom;
pub mod input;
pub mod math;
pub mod render;
pub mod util;

pub mod prelude {
    pub use crate::math::{
        mat::{
            Mat4x4, RealToReal, perspective, point_at, rotate_x, rotate_y,
            scale, translate, viewport,
        },
        vec::{Vec3, Vec4, pt3, vec3, vec4},
    };

    pub use crate::geom::{Mesh, Tri, Vertex, tri, vertex};

    pub use crate::input::{InputState, Key, KeySet};

    pub use crate::render::{
        Clip, DegenerateGeometry, Model, Ndc, Renderer, Screen, View, World,
        cam::Camera,
        ctx::{Config, DepthSort, FaceCull},
        shade::Ramp,
        stats::Stats,
        target::{FrameBuffer, Surface, Target},
    };

    pub use crate::util::buf::Buf2;
}

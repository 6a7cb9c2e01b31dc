//! Mesh sources for `glyphcast`.
//!
//! * [`io`]: loading meshes from Wavefront OBJ files.
//! * [`solids`]: simple built-in shapes.

pub mod io;
pub mod solids;

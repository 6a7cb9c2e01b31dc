//! Floating-point compatibility API.
//!
//! Most floating-point functions are unavailable in `no_std`. This module
//! provides the few the renderer needs, either from `std` or from the `libm`
//! crate, depending on which feature is enabled. Use it by importing the
//! `f32` item in function scope and calling eg. `f32::sqrt(x)`; this works
//! the same whether `f32` resolves to the primitive type or to the module.

#[cfg(feature = "libm")]
pub mod libm {
    pub use ::libm::fabsf as abs;
    pub use ::libm::roundf as round;
    pub use ::libm::sqrtf as sqrt;

    pub use ::libm::cosf as cos;
    pub use ::libm::sinf as sin;
    pub use ::libm::tanf as tan;
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f32 = core::primitive::f32;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use libm as f32;

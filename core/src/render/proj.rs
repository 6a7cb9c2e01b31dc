//! Perspective projection from view space to the screen.

use crate::geom::Tri;
use crate::math::{Mat4x4, Vec4, perspective, viewport};

use super::{DegenerateGeometry, NdcToScreen, Screen, View, ViewToClip};
use super::ctx::Config;

/// The projection and viewport matrices derived from a [`Config`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    proj: Mat4x4<ViewToClip>,
    viewport: Mat4x4<NdcToScreen>,
}

impl Projection {
    /// Creates the projection for the grid size, field of view and depth
    /// range of `cfg`.
    ///
    /// # Panics
    /// If the parameters are invalid; see [`perspective`].
    pub fn new(cfg: &Config) -> Self {
        let proj = perspective(cfg.aspect_ratio(), cfg.fov, cfg.near, cfg.far);
        let viewport = viewport(cfg.width as f32, cfg.height as f32);
        Self { proj: proj.to(), viewport: viewport.to() }
    }

    /// Projects a view-space point to screen space.
    ///
    /// The screen-space z is in the range 0..1 for points between the near
    /// and far planes, and the w of the result is 1.
    ///
    /// # Errors
    /// [`DegenerateGeometry::VanishingW`] if the projected w is too close to
    /// zero, which happens for points in the plane of the camera.
    pub fn project(
        &self,
        p: &Vec4<View>,
    ) -> Result<Vec4<Screen>, DegenerateGeometry> {
        let ndc = self
            .proj
            .apply(p)
            .perspective_divide()
            .ok_or(DegenerateGeometry::VanishingW)?;
        Ok(self.viewport.apply(&ndc.to()))
    }

    /// Projects each vertex of `tri` to screen space.
    pub fn project_tri(
        &self,
        tri: &Tri<View>,
    ) -> Result<Tri<Screen>, DegenerateGeometry> {
        tri.try_map_pos(|p| self.project(p))
    }

    /// Maps a screen-space point, including its depth, back to view space.
    ///
    /// Returns `None` if the point cannot be unprojected.
    pub fn unproject(&self, p: &Vec4<Screen>) -> Option<Vec4<View>> {
        let ndc = self.viewport.inverse()?.apply(p);
        let clip = ndc.to();
        self.proj.inverse()?.apply(&clip).perspective_divide()
    }
}

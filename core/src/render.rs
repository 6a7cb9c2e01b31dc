//! Turning triangle meshes into glyphs.
//!
//! This module constitutes the rendering pipeline of `glyphcast`. It contains
//! code for [camera control][cam], [shading][shade], [clipping][clip],
//! [projection][proj], [depth sorting][sort], [rasterizing][raster] and
//! [outputting][target] triangles, tied together by [`Renderer`].

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use log::{debug, info, trace, warn};

use crate::geom::{Mesh, Tri};
use crate::input::InputState;
use crate::math::{Mat4x4, RealToReal, translate};

use cam::Camera;
use clip::{ClipPlane, Worklist, near_plane, viewport_planes};
use ctx::Config;
use proj::Projection;
use raster::Contour;
use shade::shade;
use sort::depth_sort;
use stats::Stats;
use target::Target;

pub mod cam;
pub mod clip;
pub mod ctx;
pub mod proj;
pub mod raster;
pub mod shade;
pub mod sort;
pub mod stats;
pub mod target;

/// Model space coordinate basis.
#[derive(Copy, Clone, Debug, Default)]
pub struct Model;

/// World space coordinate basis.
#[derive(Copy, Clone, Debug, Default)]
pub struct World;

/// View (camera) space coordinate basis.
#[derive(Copy, Clone, Debug, Default)]
pub struct View;

/// Clip space coordinate basis, before the perspective divide.
#[derive(Copy, Clone, Debug, Default)]
pub struct Clip;

/// NDC space coordinate basis (normalized device coordinates).
#[derive(Copy, Clone, Debug, Default)]
pub struct Ndc;

/// Screen space coordinate basis, in character cells.
#[derive(Copy, Clone, Debug, Default)]
pub struct Screen;

/// Mapping from model space to world space.
pub type ModelToWorld = RealToReal<Model, World>;

/// Mapping from world space to itself.
pub type WorldToWorld = RealToReal<World, World>;

/// Mapping from world space to view space.
pub type WorldToView = RealToReal<World, View>;

/// Mapping from view space to world space.
pub type ViewToWorld = RealToReal<View, World>;

/// Mapping from view space to clip space.
pub type ViewToClip = RealToReal<View, Clip>;

/// Mapping from NDC space to screen space.
pub type NdcToScreen = RealToReal<Ndc, Screen>;

/// A triangle that could not be rendered.
///
/// Never fatal: the offending triangle is skipped and the frame goes on.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DegenerateGeometry {
    /// The face normal has (nearly) zero length.
    ZeroAreaFace,
    /// A projected vertex has w too close to zero to divide by.
    VanishingW,
}

/// Renders meshes as seen by a camera.
///
/// Owns the meshes, the camera, and all per-frame scratch storage, which is
/// reused from one frame to the next.
pub struct Renderer {
    cfg: Config,
    camera: Camera,
    world: Mat4x4<WorldToWorld>,
    meshes: Vec<Mesh>,

    proj: Projection,
    view: Mat4x4<WorldToView>,
    near: ClipPlane<View>,
    edges: [ClipPlane<Screen>; 4],

    visible: Vec<Tri<Screen>>,
    worklist: Worklist<Screen>,
    contour: Contour,
    stats: Stats,
}

impl Renderer {
    /// Creates a renderer with no meshes.
    ///
    /// # Panics
    /// If `cfg` is invalid; see [`Config::validate`].
    #[track_caller]
    pub fn new(cfg: Config, camera: Camera) -> Self {
        cfg.validate();
        let view = camera.world_to_view().unwrap_or_else(|| {
            warn!("degenerate initial view, using identity");
            Mat4x4::identity()
        });
        info!(
            "renderer created: {}×{}, fov {:.1}°",
            cfg.width,
            cfg.height,
            cfg.fov.to_degrees()
        );
        Self {
            proj: Projection::new(&cfg),
            near: near_plane(cfg.near_clip),
            edges: viewport_planes(cfg.width, cfg.height),
            contour: Contour::new(cfg.height),
            cfg,
            camera,
            world: Mat4x4::identity(),
            meshes: Vec::new(),
            view,
            visible: Vec::new(),
            worklist: Worklist::new(),
            stats: Stats::new(),
        }
    }

    /// Adds a mesh to be drawn on every frame.
    pub fn add_mesh(&mut self, mesh: Mesh) {
        info!("mesh added: {} triangles", mesh.len());
        self.meshes.push(mesh);
    }

    /// Sets the transform applied to every mesh between the model and
    /// world offsets.
    pub fn set_world_transform(&mut self, world: Mat4x4<WorldToWorld>) {
        self.world = world;
    }

    /// Changes the size of the output grid.
    ///
    /// # Panics
    /// If `width` or `height` is zero.
    #[track_caller]
    pub fn resize(&mut self, width: usize, height: usize) {
        self.cfg.width = width;
        self.cfg.height = height;
        self.cfg.validate();
        self.proj = Projection::new(&self.cfg);
        self.edges = viewport_planes(width, height);
        self.contour.resize(height);
        debug!("renderer resized to {width}×{height}");
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Returns the camera for repositioning it directly.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Returns the statistics accumulated over all frames so far.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Returns the matrix mapping model space to world space.
    pub fn model_to_world(&self) -> Mat4x4<ModelToWorld> {
        let model = translate(self.cfg.model_offset).to::<ModelToWorld>();
        let offset = translate(self.cfg.world_offset).to::<WorldToWorld>();
        model.then(&self.world).then(&offset)
    }

    /// Moves the camera according to `input` and rebuilds the view.
    ///
    /// If the view cannot be constructed, the previous one is kept.
    pub fn update(&mut self, input: &impl InputState) {
        self.camera.update(input, &self.cfg);
        match self.camera.world_to_view() {
            Some(view) => self.view = view,
            None => warn!("degenerate view, keeping previous: {:?}", self.camera),
        }
    }

    /// Draws all meshes into `target` using the current view.
    ///
    /// Does not clear `target`. Returns the statistics of this frame; they
    /// are also added to [`stats`][Self::stats].
    pub fn render(&mut self, target: &mut impl Target) -> Stats {
        let mut stats = Stats::start();
        stats.frames = 1.0;

        let to_world = self.model_to_world();
        let eye = self.camera.pos;

        self.visible.clear();
        for tri in self.meshes.iter().flat_map(|m| m.triangles()) {
            stats.faces.i += 1;
            let world = match shade(tri, &to_world, &eye, &self.cfg) {
                Ok(Some(t)) => t,
                Ok(None) => {
                    stats.culled += 1;
                    continue;
                }
                Err(e) => {
                    trace!("skipping triangle: {e}: {tri:?}");
                    stats.degenerate += 1;
                    continue;
                }
            };
            let view = world.map_pos(|p| self.view.apply(p));
            let clipped = self.near.clip_tri(&view);
            if clipped.is_empty() {
                stats.clipped += 1;
            }
            for t in &clipped {
                match self.proj.project_tri(t) {
                    Ok(t) => self.visible.push(t),
                    Err(e) => {
                        trace!("skipping triangle: {e}: {t:?}");
                        stats.degenerate += 1;
                    }
                }
            }
        }

        if let Some(order) = self.cfg.depth_sort {
            depth_sort(&mut self.visible, order);
        }

        for tri in &self.visible {
            let visible = self.worklist.clip(&self.edges, *tri);
            if visible.is_empty() {
                stats.clipped += 1;
            }
            for t in visible {
                stats.cells += self.contour.fill(t, target);
            }
            stats.faces.o += visible.len();
        }

        let stats = stats.finish();
        debug!("{stats}");
        self.stats += stats.clone();
        stats
    }

    /// Runs one whole frame: clears `target`, updates the camera from
    /// `input`, and renders.
    pub fn frame(
        &mut self,
        input: &impl InputState,
        target: &mut impl Target,
    ) -> Stats {
        target.clear();
        self.update(input);
        self.render(target)
    }
}

impl Display for DegenerateGeometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ZeroAreaFace => "face has zero area",
            Self::VanishingW => "vertex has vanishing w",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DegenerateGeometry {}

#[cfg(test)]
mod tests {
    use crate::geom::{tri, vertex};
    use crate::input::{Key, KeySet};
    use crate::math::{Vec4, pt3, vec3};

    use super::target::FrameBuffer;
    use super::*;

    fn cfg(width: usize, height: usize) -> Config {
        Config {
            width,
            height,
            model_offset: vec3(0.0, 0.0, 0.0),
            world_offset: vec3(0.0, 0.0, 0.0),
            ..Config::default()
        }
    }

    /// A triangle facing the origin, lit head-on by the default light.
    fn facing(z: f32) -> Mesh {
        let v = |x, y| vertex(pt3(x, y, z), vec3(0.0, 0.0, 0.0), Vec4::zero());
        Mesh::new([tri(v(-1.0, -1.0), v(-1.0, 1.0), v(1.0, -1.0))])
    }

    #[test]
    fn degenerate_geometry_display() {
        assert_eq!(
            alloc::format!("{}", DegenerateGeometry::ZeroAreaFace),
            "face has zero area"
        );
    }

    #[test]
    fn model_to_world_applies_offsets_around_world() {
        let mut r = Renderer::new(Config::default(), Camera::default());
        r.set_world_transform(translate(vec3(1.0, 0.0, 0.0)).to());

        let p = r.model_to_world().apply(&pt3(0.5, 0.5, 0.5));
        crate::assert_approx_eq!(p, pt3(1.0, 0.0, 5.75));
    }

    #[test]
    fn renders_facing_triangle() {
        let mut r = Renderer::new(cfg(16, 8), Camera::default());
        r.add_mesh(facing(2.0));
        let mut fb = FrameBuffer::new(16, 8);

        let stats = r.frame(&KeySet::new(), &mut fb);

        assert_eq!(stats.faces.i, 1);
        assert!(stats.faces.o >= 1);
        assert!(stats.cells > 0);
        assert_eq!(fb.get(5, 9), Some('@'));
        assert!(fb.rows().flatten().all(|&c| c == ' ' || c == '@'));
    }

    #[test]
    fn triangle_behind_camera_is_clipped_away() {
        // Seen from the origin this is a backface; with culling disabled
        // it must be removed by the near plane instead
        let cfg = Config { face_cull: None, ..cfg(16, 8) };
        let mut r = Renderer::new(cfg, Camera::default());
        r.add_mesh(facing(-2.0));
        let mut fb = FrameBuffer::new(16, 8);

        let stats = r.frame(&KeySet::new(), &mut fb);
        assert_eq!(stats.culled, 0);
        assert_eq!(stats.clipped, 1);
        assert_eq!(stats.faces.o, 0);
        assert!(fb.rows().flatten().all(|&c| c == ' '));
    }

    #[test]
    fn stats_accumulate_over_frames() {
        let mut r = Renderer::new(cfg(16, 8), Camera::default());
        r.add_mesh(facing(2.0));
        let mut fb = FrameBuffer::new(16, 8);
        let keys = KeySet::from([Key::Back]);

        let s1 = r.frame(&keys, &mut fb);
        let s2 = r.frame(&keys, &mut fb);
        assert_eq!(r.stats().frames, 2.0);
        assert_eq!(r.stats().cells, s1.cells + s2.cells);
    }

    #[test]
    fn resize_changes_screen_planes() {
        let mut r = Renderer::new(cfg(16, 8), Camera::default());
        // Covers the whole view at z = 2
        let v = |x, y| vertex(pt3(x, y, 2.0), vec3(0.0, 0.0, 0.0), Vec4::zero());
        let big = tri(v(-10.0, -10.0), v(-10.0, 30.0), v(30.0, -10.0));
        r.add_mesh(Mesh::new([big]));
        r.resize(4, 2);
        assert_eq!((r.config().width, r.config().height), (4, 2));

        let mut fb = FrameBuffer::new(4, 2);
        let stats = r.frame(&KeySet::new(), &mut fb);
        assert!(stats.faces.o >= 1);
        assert_eq!(fb.get(0, 0), Some('@'));
        assert_eq!(fb.get(0, 1), Some('@'));
    }
}

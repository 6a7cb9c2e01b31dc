//! Rendering configuration and parameters.

use core::f32::consts::FRAC_PI_2;

use crate::math::{Vec3, Vec4, pt3, vec3};

use super::World;
use super::shade::Ramp;

/// Configuration used by the renderer.
///
/// All fields are public; start from [`Config::default`] and override what
/// is needed. The configuration is validated when passed to
/// [`Renderer::new`][super::Renderer::new].
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Width of the character grid, in cells.
    pub width: usize,
    /// Height of the character grid, in cells.
    pub height: usize,

    /// Vertical field of view, in radians.
    pub fov: f32,
    /// Distance of the near plane of the projection matrix.
    pub near: f32,
    /// Distance of the far plane of the projection matrix.
    pub far: f32,
    /// Distance of the plane that geometry is clipped against in view space.
    ///
    /// Kept separate from `near` so that clipped vertices never end up with
    /// a w close to zero.
    pub near_clip: f32,

    /// How far the camera moves per frame when a movement key is held.
    pub speeds: Speeds,
    /// How much the camera turns left or right per frame, in radians.
    pub yaw_speed: f32,
    /// How much the camera tilts up or down per frame, in radians.
    pub pitch_speed: f32,
    /// The maximum absolute pitch angle, in radians.
    ///
    /// Must be less than a right angle, or the look direction could become
    /// parallel to the up vector.
    pub max_pitch: f32,

    /// Direction of the light, in world space. Not normalized.
    pub light: Vec4<World>,
    /// Offset added to model-space positions before the world transform.
    pub model_offset: Vec3,
    /// Offset added to positions after the world transform.
    pub world_offset: Vec3,

    /// The glyphs used for shading, from darkest to brightest.
    pub ramp: Ramp,
    /// Whether to cull (discard) faces pointing either away from or towards
    /// the camera.
    ///
    /// Solid meshes without holes can usually have their backfaces culled,
    /// because the front faces always cover them.
    pub face_cull: Option<FaceCull>,
    /// Whether and how to sort visible faces by their depth.
    ///
    /// Without a depth buffer, back-to-front sorting ensures correct
    /// rendering unless there is intersecting or non-orderable geometry
    /// (the so-called "painter's algorithm").
    pub depth_sort: Option<DepthSort>,
}

/// Per-frame camera movement distances, in world units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Speeds {
    pub forward: f32,
    pub back: f32,
    pub left: f32,
    pub right: f32,
    pub up: f32,
    pub down: f32,
}

/// Whether to sort faces front to back or back to front.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DepthSort {
    FrontToBack,
    BackToFront,
}

/// Whether to cull front faces or backfaces.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FaceCull {
    Front,
    Back,
}

impl Config {
    /// Returns the aspect ratio of the grid, width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Returns whether a face should be culled based on the current face
    /// culling setting.
    #[inline]
    pub fn face_cull(&self, is_backface: bool) -> bool {
        match self.face_cull {
            Some(FaceCull::Back) if is_backface => true,
            Some(FaceCull::Front) if !is_backface => true,
            _ => false,
        }
    }

    /// Checks that the parameters are usable.
    ///
    /// # Panics
    /// If either dimension is zero, if `0 < near < far` does not hold,
    /// if `near_clip` is nonpositive, or if `max_pitch` is not less than
    /// a right angle.
    #[track_caller]
    pub fn validate(&self) {
        assert!(
            self.width > 0 && self.height > 0,
            "grid dimensions cannot be zero: {}×{}",
            self.width,
            self.height
        );
        assert!(
            0.0 < self.near && self.near < self.far,
            "near and far must satisfy 0 < near < far: {}, {}",
            self.near,
            self.far
        );
        assert!(
            self.near_clip > 0.0,
            "near clip distance must be positive: {}",
            self.near_clip
        );
        assert!(
            -FRAC_PI_2 < self.max_pitch && self.max_pitch < FRAC_PI_2,
            "max pitch must be less than a right angle: {}",
            self.max_pitch
        );
    }
}

impl Default for Config {
    /// Creates a configuration with default settings.
    ///
    /// The default values are:
    /// * Grid size:      80 × 24
    /// * Field of view:  90°
    /// * Near/far:       0.01 / 100
    /// * Near clip:      0.1
    /// * Speeds:         0.5 per frame in every direction
    /// * Yaw/pitch:      0.1 rad per frame, pitch limited to ±89°
    /// * Light:          (0, 0.45, -1)
    /// * Model offset:   (-0.5, -0.5, -0.5)
    /// * World offset:   (0, 0, 5.75)
    /// * Ramp:           [`Ramp::default`]
    /// * Face culling:   Backfaces
    /// * Depth sorting:  Back to front
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            fov: FRAC_PI_2,
            near: 0.01,
            far: 100.0,
            near_clip: 0.1,
            speeds: Speeds::default(),
            yaw_speed: 0.1,
            pitch_speed: 0.1,
            max_pitch: 89.0f32.to_radians(),
            light: pt3(0.0, 0.45, -1.0),
            model_offset: vec3(-0.5, -0.5, -0.5),
            world_offset: vec3(0.0, 0.0, 5.75),
            ramp: Ramp::default(),
            face_cull: Some(FaceCull::Back),
            depth_sort: Some(DepthSort::BackToFront),
        }
    }
}

impl Default for Speeds {
    fn default() -> Self {
        Self {
            forward: 0.5,
            back: 0.5,
            left: 0.5,
            right: 0.5,
            up: 0.5,
            down: 0.5,
        }
    }
}

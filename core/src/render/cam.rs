//! Camera control and view construction.

use crate::input::{InputState, Key};
use crate::math::{Mat4x4, Vec4, point_at, pt3, vec4};

use super::{ViewToWorld, World, WorldToView, ctx::Config};

/// A first-person camera.
///
/// The camera is defined by its position and two angles. Yaw rotates the
/// look direction about the world y axis, pitch tilts it up or down. At zero
/// yaw and pitch the camera looks towards +z.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// The position of the camera in world space.
    pub pos: Vec4<World>,
    /// The heading angle, in radians. Positive values turn towards +x.
    pub yaw: f32,
    /// The elevation angle, in radians. Positive values look up.
    pub pitch: f32,
    /// The world "up" direction.
    pub up: Vec4<World>,
}

impl Camera {
    /// Creates a camera at `pos` looking towards +z.
    pub const fn new(pos: Vec4<World>) -> Self {
        Self {
            pos,
            yaw: 0.0,
            pitch: 0.0,
            up: vec4(0.0, 1.0, 0.0, 0.0),
        }
    }

    /// Returns the unit vector the camera is looking along.
    ///
    /// This is +z rotated first by `pitch` about the x axis, then by `yaw`
    /// about the y axis.
    pub fn look_dir(&self) -> Vec4<World> {
        use crate::math::float::f32;
        let (sy, cy) = (f32::sin(self.yaw), f32::cos(self.yaw));
        let (sp, cp) = (f32::sin(self.pitch), f32::cos(self.pitch));
        vec4(sy * cp, sp, cy * cp, 0.0)
    }

    /// Returns the horizontal unit vector pointing to the camera's left.
    ///
    /// With +x at the left edge of the screen, this is +x rotated by `yaw`.
    pub fn left_dir(&self) -> Vec4<World> {
        use crate::math::float::f32;
        let (s, c) = (f32::sin(self.yaw), f32::cos(self.yaw));
        vec4(c, 0.0, -s, 0.0)
    }

    /// Returns the point the camera is looking at, one unit away.
    pub fn target(&self) -> Vec4<World> {
        self.pos + self.look_dir()
    }

    /// Moves and turns the camera according to the keys held in `input`.
    ///
    /// Turning is applied before moving, so that forward movement follows
    /// the new heading. Pitch is clamped to `±cfg.max_pitch`.
    pub fn update(&mut self, input: &impl InputState, cfg: &Config) {
        let held = |k| if input.is_pressed(k) { 1.0 } else { 0.0 };

        self.yaw += cfg.yaw_speed * (held(Key::YawLeft) - held(Key::YawRight));
        self.pitch +=
            cfg.pitch_speed * (held(Key::PitchUp) - held(Key::PitchDown));
        self.pitch = self.pitch.clamp(-cfg.max_pitch, cfg.max_pitch);

        let s = &cfg.speeds;
        let fwd = s.forward * held(Key::Forward) - s.back * held(Key::Back);
        let left =
            s.left * held(Key::StrafeLeft) - s.right * held(Key::StrafeRight);
        let up = s.up * held(Key::Up) - s.down * held(Key::Down);

        self.pos = self.pos
            + self.look_dir() * fwd
            + self.left_dir() * left
            + vec4(0.0, up, 0.0, 0.0);
    }

    /// Returns the matrix that maps view space to world space, or `None` if
    /// the look direction is parallel to `up`.
    pub fn camera_matrix(&self) -> Option<Mat4x4<ViewToWorld>> {
        point_at(&self.pos, &self.target(), &self.up)
    }

    /// Returns the view matrix, the inverse of the
    /// [camera matrix][Self::camera_matrix].
    pub fn world_to_view(&self) -> Option<Mat4x4<WorldToView>> {
        self.camera_matrix().map(|m| m.fast_inverse())
    }
}

impl Default for Camera {
    /// Returns a camera at the origin looking towards +z.
    fn default() -> Self {
        Self::new(pt3(0.0, 0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::input::KeySet;

    use super::*;

    fn cam_after(keys: impl Into<KeySet>, frames: usize) -> Camera {
        let (cfg, keys) = (Config::default(), keys.into());
        let mut cam = Camera::default();
        for _ in 0..frames {
            cam.update(&keys, &cfg);
        }
        cam
    }

    #[test]
    fn default_looks_along_z() {
        let cam = Camera::default();
        assert_approx_eq!(cam.look_dir(), vec4(0.0, 0.0, 1.0, 0.0));
        assert_approx_eq!(cam.target(), pt3(0.0, 0.0, 1.0));
    }

    #[test]
    fn default_view_is_identity() {
        let view = Camera::default().world_to_view().unwrap();
        assert_approx_eq!(view, Mat4x4::<WorldToView>::identity());
    }

    #[test]
    fn view_maps_target_to_positive_z() {
        let cam = Camera {
            pos: pt3(1.0, 2.0, 3.0),
            yaw: 0.7,
            pitch: -0.3,
            ..Camera::default()
        };
        let view = cam.world_to_view().unwrap();

        assert_approx_eq!(view.apply(&cam.pos), pt3(0.0, 0.0, 0.0), eps = 1e-5);
        assert_approx_eq!(
            view.apply(&cam.target()),
            pt3(0.0, 0.0, 1.0),
            eps = 1e-5
        );
    }

    #[test]
    fn view_is_inverse_of_camera_matrix() {
        let cam = Camera { yaw: 1.2, pitch: 0.4, ..Camera::default() };
        let (m, v) = (cam.camera_matrix().unwrap(), cam.world_to_view());
        let p = pt3(-2.0, 0.5, 7.0);
        assert_approx_eq!(m.apply(&v.unwrap().apply(&p)), p, eps = 1e-5);
    }

    #[test]
    fn up_parallel_to_look_dir_is_degenerate() {
        let cam = Camera { up: vec4(0.0, 0.0, 1.0, 0.0), ..Camera::default() };
        assert!(cam.camera_matrix().is_none());
        assert!(cam.world_to_view().is_none());
    }

    #[test]
    fn moves_forward_and_back() {
        let cam = cam_after([Key::Forward], 4);
        assert_approx_eq!(cam.pos, pt3(0.0, 0.0, 2.0));

        let cam = cam_after([Key::Forward, Key::Back], 4);
        assert_approx_eq!(cam.pos, pt3(0.0, 0.0, 0.0));
    }

    #[test]
    fn strafes_and_rises() {
        let cam = cam_after([Key::StrafeLeft], 2);
        assert_approx_eq!(cam.pos, pt3(1.0, 0.0, 0.0));

        let cam = cam_after([Key::StrafeRight, Key::Up], 2);
        assert_approx_eq!(cam.pos, pt3(-1.0, 1.0, 0.0));

        let cam = cam_after([Key::Down], 1);
        assert_approx_eq!(cam.pos, pt3(0.0, -0.5, 0.0));
    }

    #[test]
    fn turning_left_turns_towards_plus_x() {
        let cam = cam_after([Key::YawLeft], 3);
        assert_approx_eq!(cam.yaw, 0.3, eps = 1e-6);
        assert!(cam.look_dir().x() > 0.0);

        let cam = cam_after([Key::YawLeft, Key::Forward], 1);
        let expected = pt3(0.0, 0.0, 0.0) + cam.look_dir() * 0.5;
        assert_approx_eq!(cam.pos, expected);
    }

    #[test]
    fn pitch_is_clamped() {
        let max = Config::default().max_pitch;
        assert_eq!(cam_after([Key::PitchUp], 100).pitch, max);
        assert_eq!(cam_after([Key::PitchDown], 100).pitch, -max);

        // The view never degenerates when looking up
        assert!(cam_after([Key::PitchUp], 100).world_to_view().is_some());
    }

    #[test]
    fn no_keys_no_movement() {
        let cam = cam_after(KeySet::new(), 10);
        assert_eq!(cam, Camera::default());
    }
}

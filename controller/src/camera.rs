//! Third-person orbit camera.
//!
//! The camera sits on a sphere of fixed radius around the character and looks at it. Yaw
//! always equals the character's facing, so the rig only owns the pitch.
//!
//! Pitch convention (degrees): positive looks down at the character from above, negative
//! looks up at it. Looking up has a soft buffer: the first `look_up_buffer` degrees of
//! upward look keep the camera level, and only past that does it tilt.

use nalgebra as na;

use crate::config::{CameraConfig, ConfigError};
use crate::input::sanitize_axis;
use crate::types::{Quat, Vec3};

/// World-space camera pose.
///
/// `orientation` maps the camera's local -Z onto its viewing direction and local +Y onto
/// its up direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl CameraTransform {
    /// Unit viewing direction.
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::new(0.0, 0.0, -1.0)
    }
}

/// Pitch seen by the camera placement: inside the look-up buffer the camera stays level.
#[inline]
pub fn pseudo_pitch(pitch: f32, look_up_buffer: f32) -> f32 {
    if pitch < 0.0 {
        (pitch + look_up_buffer).min(0.0)
    } else {
        pitch
    }
}

/// Camera pose for a character at `player` facing `yaw_degrees`, at `pitch_degrees`.
pub fn orbit_transform(
    config: &CameraConfig,
    pitch_degrees: f32,
    player: Vec3,
    yaw_degrees: f32,
) -> CameraTransform {
    let pseudo = pseudo_pitch(pitch_degrees, config.look_up_buffer);
    let planar = config.distance * pseudo.to_radians().cos();
    let vertical = config.distance * pitch_degrees.max(0.0).to_radians().sin();

    let yaw = yaw_degrees.to_radians();
    let position = player + Vec3::new(planar * yaw.sin(), vertical, planar * yaw.cos());

    let mut orientation = Quat::face_towards(&(position - player), &Vec3::y());
    if pitch_degrees < 0.0 {
        // Tilt the view upward by the part of the look that escaped the buffer.
        orientation *= Quat::from_axis_angle(&na::Vector3::x_axis(), -pseudo.to_radians());
    }

    CameraTransform {
        position,
        orientation,
    }
}

/// Orbit camera state: the pitch angle plus the last computed pose.
#[derive(Clone, Debug)]
pub struct OrbitCameraRig {
    config: CameraConfig,
    pitch_degrees: f32,
    transform: Option<CameraTransform>,
}

impl OrbitCameraRig {
    pub fn new(config: CameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pitch_degrees = config
            .start_pitch
            .clamp(config.lowest_pitch(), config.max_pitch);
        Ok(Self {
            config,
            pitch_degrees,
            transform: None,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.pitch_degrees
    }

    /// Last pose computed by [`update`](Self::update), if any.
    pub fn transform(&self) -> Option<CameraTransform> {
        self.transform
    }

    /// Apply vertical look input. Returns whether the camera needs a refresh this frame:
    /// true when the pitch input was nonzero or `force_update` is set.
    ///
    /// With no input, a pitch inside the look-up buffer snaps back to level.
    pub fn move_pitch(&mut self, pitch_input: f32, dt: f32, force_update: bool) -> bool {
        let input = sanitize_axis(pitch_input);

        if input != 0.0 {
            self.pitch_degrees -= self.config.turn_speed * input * dt.max(0.0);
            self.pitch_degrees = self
                .pitch_degrees
                .clamp(self.config.lowest_pitch(), self.config.max_pitch);
            return true;
        }

        if self.pitch_degrees < 0.0 && self.pitch_degrees > -self.config.look_up_buffer {
            self.pitch_degrees = 0.0;
        }
        force_update
    }

    /// Recompute the pose around `player_position`. Identical inputs give identical output.
    pub fn update(&mut self, player_position: Vec3, yaw_degrees: f32) -> CameraTransform {
        let transform = orbit_transform(
            &self.config,
            self.pitch_degrees,
            player_position,
            yaw_degrees,
        );
        self.transform = Some(transform);
        transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-4;

    fn rig() -> OrbitCameraRig {
        OrbitCameraRig::new(CameraConfig::default()).unwrap()
    }

    fn rig_at(pitch: f32) -> OrbitCameraRig {
        OrbitCameraRig::new(CameraConfig {
            start_pitch: pitch,
            ..CameraConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn starts_at_configured_pitch() {
        assert_eq!(rig().pitch_degrees(), 45.0);
        assert!(rig().transform().is_none());
    }

    #[test]
    fn level_camera_sits_behind_the_player() {
        let mut rig = rig_at(0.0);
        let t = rig.update(Vec3::new(1.0, 2.0, 3.0), 0.0);
        assert!((t.position - Vec3::new(1.0, 2.0, 13.0)).norm() < EPS);
        assert!((t.forward() - Vec3::new(0.0, 0.0, -1.0)).norm() < EPS);
    }

    #[test]
    fn camera_looks_at_the_player_from_above() {
        let mut rig = rig_at(45.0);
        let player = Vec3::new(0.0, 0.0, 0.0);
        let t = rig.update(player, 90.0);
        let to_player = (player - t.position).normalize();
        assert!((t.forward() - to_player).norm() < EPS);
        assert!(((t.position - player).norm() - 10.0).abs() < EPS);
        // Yaw 90° puts the camera on +X.
        assert!(t.position.x > 0.0 && t.position.y > 0.0);
    }

    #[test]
    fn upward_look_inside_buffer_keeps_camera_level() {
        let mut level = rig_at(0.0);
        let mut inside = rig_at(-15.0);
        let a = level.update(Vec3::zeros(), 30.0);
        let b = inside.update(Vec3::zeros(), 30.0);
        assert!((a.position - b.position).norm() < EPS);
        assert!((a.forward() - b.forward()).norm() < EPS);
    }

    #[test]
    fn upward_look_past_buffer_tilts_up_at_eye_level() {
        let mut rig = rig_at(-40.0);
        let t = rig.update(Vec3::zeros(), 0.0);
        // pseudo pitch = -20: planar distance shrinks, camera stays at eye height.
        assert!(t.position.y.abs() < EPS);
        assert!((t.position.z - 10.0 * 20f32.to_radians().cos()).abs() < EPS);
        assert!((t.forward().y - 20f32.to_radians().sin()).abs() < EPS);
    }

    #[test]
    fn update_is_idempotent() {
        let mut rig = rig_at(-35.0);
        let a = rig.update(Vec3::new(4.0, 1.0, -2.0), 123.0);
        let b = rig.update(Vec3::new(4.0, 1.0, -2.0), 123.0);
        assert_eq!(a, b);
        assert_eq!(rig.transform(), Some(b));
    }

    #[test]
    fn move_reports_refresh_need() {
        let mut rig = rig();
        assert!(!rig.move_pitch(0.0, 0.016, false));
        assert!(rig.move_pitch(0.0, 0.016, true));
        assert!(rig.move_pitch(0.2, 0.016, false));
    }

    #[test]
    fn pitch_input_lowers_pitch() {
        let mut rig = rig();
        rig.move_pitch(0.5, 0.1, false);
        assert!((rig.pitch_degrees() - (45.0 - 18.0)).abs() < EPS);
    }

    #[test]
    fn soft_band_snaps_to_level_without_input() {
        let mut rig = rig_at(-10.0);
        rig.move_pitch(0.0, 0.016, false);
        assert_eq!(rig.pitch_degrees(), 0.0);

        // Past the buffer the pitch is kept.
        let mut rig = rig_at(-25.0);
        rig.move_pitch(0.0, 0.016, false);
        assert_eq!(rig.pitch_degrees(), -25.0);
    }

    #[test]
    fn pitch_stays_clamped_for_any_input_sequence() {
        let mut rig = rig();
        let low = rig.config().lowest_pitch();
        let high = rig.config().max_pitch;

        // Deterministic pseudo-random walk, including oversized and non-finite input.
        let mut seed: u32 = 0x2545_f491;
        for i in 0..5_000 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let raw = (seed >> 8) as f32 / (1u32 << 24) as f32 * 6.0 - 3.0;
            let input = match i % 97 {
                0 => f32::INFINITY,
                1 => 0.0,
                _ => raw,
            };
            rig.move_pitch(input, 0.05, false);
            let p = rig.pitch_degrees();
            assert!(p >= low && p <= high, "pitch {p} left [{low}, {high}]");
        }
    }
}

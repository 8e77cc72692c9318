use std::f32::consts::{FRAC_PI_2, PI};

use crate::constants::AXIS_EPS;
use crate::input::sanitize_axis;
use crate::types::Vec2;

/// Angle of the input stick relative to the facing direction, in radians.
///
/// Forward is 0, strafing right is π/2, backward is π. `asin` alone cannot tell forward
/// from backward, so backward input is mirrored into `(π/2, 3π/2]`.
///
/// Returns `None` when there is no input.
#[inline]
pub fn input_angle(forward: f32, strafe: f32) -> Option<(f32, f32)> {
    let magnitude = (forward * forward + strafe * strafe).sqrt();
    if magnitude <= AXIS_EPS {
        return None;
    }

    let mut angle = (strafe / magnitude).clamp(-1.0, 1.0).asin();
    if forward < 0.0 {
        angle = PI - angle;
    }
    Some((angle, magnitude))
}

/// Divisor that maps the unit square of two input axes onto the unit disk.
///
/// Measured from the nearest cardinal direction, an input at angle `a` on the edge of the
/// square has length `1 / cos(a) = sqrt(tan²(a) + 1)`; dividing by it makes a full
/// diagonal exactly as fast as a full cardinal input.
#[inline]
pub fn diagonal_correction(angle: f32) -> f32 {
    let off_cardinal = (angle - (angle / FRAC_PI_2).round() * FRAC_PI_2).abs();
    (off_cardinal.tan().powi(2) + 1.0).sqrt()
}

/// Target planar velocity (XZ) for the given axes, facing and speed.
///
/// Axes are clamped to `[-1, 1]`; zero input yields zero velocity.
pub fn planar_target_velocity(forward: f32, strafe: f32, facing_degrees: f32, speed: f32) -> Vec2 {
    let forward = sanitize_axis(forward);
    let strafe = sanitize_axis(strafe);

    let Some((angle, magnitude)) = input_angle(forward, strafe) else {
        return Vec2::zeros();
    };

    let movement_angle = facing_degrees.to_radians() + angle;
    let magnitude = magnitude / diagonal_correction(angle);

    Vec2::new(
        -speed * magnitude * movement_angle.sin(),
        -speed * magnitude * movement_angle.cos(),
    )
}

/// Planar (XZ) components of a 3D vector.
#[inline]
pub fn to_planar(v: &crate::types::Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: f32 = 15.0;

    #[test]
    fn no_input_no_motion() {
        assert_eq!(planar_target_velocity(0.0, 0.0, 30.0, SPEED), Vec2::zeros());
    }

    #[test]
    fn forward_at_zero_facing_moves_down_negative_z() {
        let v = planar_target_velocity(1.0, 0.0, 0.0, SPEED);
        assert!(v.x.abs() < 1.0e-5);
        assert!((v.y + SPEED).abs() < 1.0e-5);
    }

    #[test]
    fn backward_is_opposite_of_forward() {
        let f = planar_target_velocity(1.0, 0.0, 40.0, SPEED);
        let b = planar_target_velocity(-1.0, 0.0, 40.0, SPEED);
        assert!((f + b).norm() < 1.0e-4);
    }

    #[test]
    fn strafe_is_perpendicular_to_forward() {
        let f = planar_target_velocity(1.0, 0.0, 10.0, SPEED);
        let r = planar_target_velocity(0.0, 1.0, 10.0, SPEED);
        assert!(f.dot(&r).abs() < 1.0e-3);
        assert!((r.norm() - SPEED).abs() < 1.0e-4);
    }

    #[test]
    fn full_diagonals_match_cardinal_speed() {
        let cardinal = planar_target_velocity(1.0, 0.0, 0.0, SPEED).norm();
        for (f, s) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
            let diagonal = planar_target_velocity(f, s, 75.0, SPEED).norm();
            assert!(
                (diagonal - cardinal).abs() <= 1.0e-4,
                "({f}, {s}) gave {diagonal}, cardinal {cardinal}"
            );
        }
    }

    #[test]
    fn unit_length_diagonal_walks_at_its_axis_value() {
        // The square-to-disk mapping scales a diagonal by max(|f|, |s|), so a stick pushed
        // to (0.707, 0.707) moves at about 0.707 of the cardinal speed.
        let cardinal = planar_target_velocity(1.0, 0.0, 0.0, SPEED).norm();
        let diagonal = planar_target_velocity(0.707, 0.707, 0.0, SPEED).norm();
        assert!((diagonal - 0.707 * cardinal).abs() < 1.0e-3, "diagonal {diagonal}");
        assert!(diagonal < cardinal);
    }

    #[test]
    fn no_input_in_the_unit_square_is_faster_than_cardinal() {
        let steps = 20;
        for i in -steps..=steps {
            for j in -steps..=steps {
                let f = i as f32 / steps as f32;
                let s = j as f32 / steps as f32;
                let speed = planar_target_velocity(f, s, 0.0, SPEED).norm();
                assert!(speed <= SPEED + 1.0e-3, "({f}, {s}) gave {speed}");
            }
        }
    }

    #[test]
    fn facing_rotates_the_motion() {
        // Facing 90° turns "forward" toward -X.
        let v = planar_target_velocity(1.0, 0.0, 90.0, SPEED);
        assert!((v.x + SPEED).abs() < 1.0e-4);
        assert!(v.y.abs() < 1.0e-4);
    }
}

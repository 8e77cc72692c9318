/*!
Math aliases shared by the controller modules.

Conventions
- +Y is up; the ground plane is XZ.
- A facing (yaw) of 0 degrees looks down -Z; positive yaw turns toward -X.
- Angles stored in state are degrees; trigonometry converts at the call site.
*/

use nalgebra as na;

pub type Vec2 = na::Vector2<f32>;
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// Yaw-only rotation for a facing angle in degrees.
#[inline]
pub fn yaw_rotation(facing_degrees: f32) -> Quat {
    Quat::from_axis_angle(&na::Vector3::y_axis(), facing_degrees.to_radians())
}

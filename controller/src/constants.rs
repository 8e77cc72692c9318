/// Default turning speed for both character yaw and camera pitch (degrees per second).
pub const DEFAULT_TURNING_SPEED_DPS: f32 = 360.0;

/// Default planar movement speed (units per second).
pub const DEFAULT_MOVEMENT_SPEED: f32 = 15.0;

/// Height reached by a jump that is released immediately (units).
pub const DEFAULT_MIN_JUMP_HEIGHT: f32 = 3.0;

/// Height reached by a jump that is held through its apex (units).
pub const DEFAULT_MAX_JUMP_HEIGHT: f32 = 11.0;

/// Time a fully-held jump takes to reach its apex (seconds).
pub const DEFAULT_TIME_TO_APEX: f32 = 1.0;

/// Air-control factor for planar (XZ) steering while airborne.
///
/// Convention:
/// - the airborne velocity closes `air_control * dt` of the gap to the target each tick
/// - 0.0 = no air control (velocity is kept from takeoff)
/// - values above 1.0 are fine as long as `air_control * dt < 1.0`
pub const DEFAULT_AIR_CONTROL: f32 = 1.5;

/// Gravity applied whenever the character is not rising (units per second squared, negative = down).
pub const DEFAULT_GRAVITY_ON_FALLING: f32 = -10.0;

/// Slowest allowed vertical velocity while gliding (negative = down).
pub const DEFAULT_GLIDE_TERMINAL_VELOCITY: f32 = -1.0;

/// Distance from the character to the camera, irrespective of pitch.
pub const DEFAULT_CAMERA_DISTANCE: f32 = 10.0;

/// Pitch bounds in degrees.
///
/// Negative pitch looks up from below the character, positive pitch looks down at it.
pub const DEFAULT_MIN_CAMERA_PITCH: f32 = -30.0;
pub const DEFAULT_MAX_CAMERA_PITCH: f32 = 89.9;

/// Degrees of upward look a player must push past before the camera actually tilts up.
pub const DEFAULT_LOOK_UP_BUFFER: f32 = 20.0;

/// Pitch the camera starts at when the character spawns (degrees).
pub const DEFAULT_START_PITCH: f32 = 45.0;

/// Fixed physics step (seconds).
pub const DEFAULT_FIXED_DT: f32 = 1.0 / 50.0;

/// Displacement difference (meters) above which an axis counts as blocked by the body.
/// Kept well above f32 rounding of world positions far from the origin.
pub const MOVE_BLOCK_EPS: f32 = 1.0e-3;

/// Minimum input magnitude treated as "no input".
pub const AXIS_EPS: f32 = 1.0e-6;

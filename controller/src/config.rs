//! Tunables for the locomotion controller and the orbit camera.
//!
//! Every numeric constant is named configuration. Behavioral differences between
//! controller flavors (checkpoints, variable jump height, glide model, ground detection)
//! are expressed as flags or strategy enums instead of separate types.
//!
//! Configuration is immutable for the lifetime of a controller: derived values such as
//! the [`JumpProfile`](crate::jump::JumpProfile) are computed once at construction.

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    DEFAULT_AIR_CONTROL, DEFAULT_CAMERA_DISTANCE, DEFAULT_GLIDE_TERMINAL_VELOCITY,
    DEFAULT_GRAVITY_ON_FALLING, DEFAULT_LOOK_UP_BUFFER, DEFAULT_MAX_CAMERA_PITCH,
    DEFAULT_MAX_JUMP_HEIGHT, DEFAULT_MIN_CAMERA_PITCH, DEFAULT_MIN_JUMP_HEIGHT,
    DEFAULT_MOVEMENT_SPEED, DEFAULT_START_PITCH, DEFAULT_TIME_TO_APEX, DEFAULT_TURNING_SPEED_DPS,
};

/// Rejected configuration. Returned by `validate()` and by every constructor that
/// derives state from configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A value that must be finite and strictly positive was not.
    #[error("`{field}` must be finite and > 0 (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    /// A value that must be finite and non-negative was not.
    #[error("`{field}` must be finite and >= 0 (got {value})")]
    Negative { field: &'static str, value: f32 },
    /// A value that must be finite and strictly negative (downward) was not.
    #[error("`{field}` must be finite and < 0 (got {value})")]
    NotDownward { field: &'static str, value: f32 },
    /// A fraction that must lie in `[0, 1]` did not.
    #[error("`{field}` must be within [0, 1] (got {value})")]
    OutOfUnitRange { field: &'static str, value: f32 },
    /// `min_jump_height` exceeds `max_jump_height`.
    #[error("min_jump_height ({min}) is greater than max_jump_height ({max})")]
    JumpHeightsInverted { min: f32, max: f32 },
    /// `min_pitch` exceeds `max_pitch`.
    #[error("min_pitch ({min}) is greater than max_pitch ({max})")]
    PitchBoundsInverted { min: f32, max: f32 },
    /// The reachable pitch range touches or crosses straight up/down.
    #[error("reachable pitch range [{low}, {high}] must stay strictly inside (-90, 90)")]
    PitchOutOfRange { low: f32, high: f32 },
}

pub fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn require_downward(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value < 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotDownward { field, value })
    }
}

fn require_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

/// How gliding slows a descent.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub enum GlideMode {
    /// Gliding cannot be toggled on.
    Disabled,
    /// While descending, vertical velocity never drops below `terminal_velocity`.
    Clamp { terminal_velocity: f32 },
    /// Gliding only works with enough horizontal speed.
    ///
    /// - Below `min_speed_fraction * movement_speed`: falling gravity is scaled by `1 - drag`.
    /// - At or above it: vertical velocity approaches `down_speed` at `approach_rate` per second.
    SpeedScaled {
        min_speed_fraction: f32,
        drag: f32,
        down_speed: f32,
        approach_rate: f32,
    },
}

impl Default for GlideMode {
    fn default() -> Self {
        Self::Clamp {
            terminal_velocity: DEFAULT_GLIDE_TERMINAL_VELOCITY,
        }
    }
}

impl GlideMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Disabled => Ok(()),
            Self::Clamp { terminal_velocity } => {
                require_downward("glide.terminal_velocity", terminal_velocity)
            }
            Self::SpeedScaled {
                min_speed_fraction,
                drag,
                down_speed,
                approach_rate,
            } => {
                require_unit("glide.min_speed_fraction", min_speed_fraction)?;
                require_unit("glide.drag", drag)?;
                require_downward("glide.down_speed", down_speed)?;
                require_positive("glide.approach_rate", approach_rate)
            }
        }
    }
}

/// Where the controller learns whether it stands on the ground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub enum GroundDetection {
    /// Use the grounded flag reported by the body after each move.
    #[default]
    Reported,
    /// Degraded mode for bodies that cannot report contact.
    ///
    /// Grounded when `|v.y| <= rest_epsilon`; airborne when rising faster than
    /// `rest_epsilon` or falling faster than `fall_threshold`; unchanged in between.
    /// This misreads the apex of a jump as ground contact.
    VelocityHeuristic {
        rest_epsilon: f32,
        fall_threshold: f32,
    },
}

impl GroundDetection {
    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Reported => Ok(()),
            Self::VelocityHeuristic {
                rest_epsilon,
                fall_threshold,
            } => {
                require_non_negative("ground_detection.rest_epsilon", rest_epsilon)?;
                require_non_negative("ground_detection.fall_threshold", fall_threshold)
            }
        }
    }
}

/// Character locomotion tunables.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Degrees per second at full yaw input.
    pub turning_speed: f32,
    /// Units per second at full planar input.
    pub movement_speed: f32,
    pub min_jump_height: f32,
    pub max_jump_height: f32,
    /// Seconds a fully-held jump takes to reach `max_jump_height`.
    pub time_to_apex: f32,
    /// When false, releasing jump early does not shorten the arc.
    pub variable_jump_height: bool,
    pub air_control: f32,
    /// Gravity while not rising (negative = down).
    pub gravity_on_falling: f32,
    pub glide: GlideMode,
    pub ground_detection: GroundDetection,
    /// Enables the save/restore checkpoint buttons.
    pub checkpoints: bool,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            turning_speed: DEFAULT_TURNING_SPEED_DPS,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            min_jump_height: DEFAULT_MIN_JUMP_HEIGHT,
            max_jump_height: DEFAULT_MAX_JUMP_HEIGHT,
            time_to_apex: DEFAULT_TIME_TO_APEX,
            variable_jump_height: true,
            air_control: DEFAULT_AIR_CONTROL,
            gravity_on_falling: DEFAULT_GRAVITY_ON_FALLING,
            glide: GlideMode::default(),
            ground_detection: GroundDetection::default(),
            checkpoints: true,
        }
    }
}

impl LocomotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("turning_speed", self.turning_speed)?;
        require_positive("movement_speed", self.movement_speed)?;
        require_positive("min_jump_height", self.min_jump_height)?;
        require_positive("max_jump_height", self.max_jump_height)?;
        require_positive("time_to_apex", self.time_to_apex)?;
        if self.min_jump_height > self.max_jump_height {
            return Err(ConfigError::JumpHeightsInverted {
                min: self.min_jump_height,
                max: self.max_jump_height,
            });
        }
        require_non_negative("air_control", self.air_control)?;
        require_downward("gravity_on_falling", self.gravity_on_falling)?;
        self.glide.validate()?;
        self.ground_detection.validate()
    }
}

/// Orbit camera tunables.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the character to the camera, irrespective of pitch.
    pub distance: f32,
    /// Degrees per second at full pitch input.
    pub turn_speed: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub look_up_buffer: f32,
    pub start_pitch: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: DEFAULT_CAMERA_DISTANCE,
            turn_speed: DEFAULT_TURNING_SPEED_DPS,
            min_pitch: DEFAULT_MIN_CAMERA_PITCH,
            max_pitch: DEFAULT_MAX_CAMERA_PITCH,
            look_up_buffer: DEFAULT_LOOK_UP_BUFFER,
            start_pitch: DEFAULT_START_PITCH,
        }
    }
}

impl CameraConfig {
    /// Lowest reachable pitch: `min_pitch - look_up_buffer`.
    pub fn lowest_pitch(&self) -> f32 {
        self.min_pitch - self.look_up_buffer
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("distance", self.distance)?;
        require_non_negative("turn_speed", self.turn_speed)?;
        require_non_negative("look_up_buffer", self.look_up_buffer)?;
        if !(self.min_pitch.is_finite() && self.max_pitch.is_finite())
            || self.min_pitch > self.max_pitch
        {
            return Err(ConfigError::PitchBoundsInverted {
                min: self.min_pitch,
                max: self.max_pitch,
            });
        }
        let low = self.lowest_pitch();
        if low <= -90.0 || self.max_pitch >= 90.0 {
            return Err(ConfigError::PitchOutOfRange {
                low,
                high: self.max_pitch,
            });
        }
        Ok(())
    }
}

use crate::config::{ConfigError, LocomotionConfig};

/// Jump constants solved from the jump-height tunables.
///
/// For a launch speed `v` and constant gravity `g < 0` the apex height is `v² / (-2g)` and
/// is reached after `v / -g` seconds. Solving for a held jump that peaks at
/// `max_jump_height` after `time_to_apex`:
///
/// - `jump_velocity = 2 * max / t`
/// - `gravity_while_held = -jump_velocity / t`
///
/// and for a jump released on its first tick that peaks at `min_jump_height`:
///
/// - `gravity_after_release = -jump_velocity² / (2 * min)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpProfile {
    pub jump_velocity: f32,
    pub gravity_while_held: f32,
    pub gravity_after_release: f32,
}

impl JumpProfile {
    pub fn from_config(config: &LocomotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let jump_velocity = 2.0 * config.max_jump_height / config.time_to_apex;
        let gravity_while_held = -jump_velocity / config.time_to_apex;
        let gravity_after_release = if config.variable_jump_height {
            -(jump_velocity * jump_velocity) / (2.0 * config.min_jump_height)
        } else {
            gravity_while_held
        };

        let profile = Self {
            jump_velocity,
            gravity_while_held,
            gravity_after_release,
        };
        log::debug!(
            "jump profile: velocity {:.3}, held gravity {:.3} (apex {:.2}), released gravity {:.3} (apex {:.2})",
            profile.jump_velocity,
            profile.gravity_while_held,
            profile.apex_height(profile.gravity_while_held),
            profile.gravity_after_release,
            profile.apex_height(profile.gravity_after_release)
        );
        Ok(profile)
    }

    /// Apex height of a jump launched at `jump_velocity` under constant `gravity`.
    pub fn apex_height(&self, gravity: f32) -> f32 {
        self.jump_velocity * self.jump_velocity / (-2.0 * gravity)
    }
}

/// Result of integrating vertical motion over one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalStep {
    /// Vertical velocity at the end of the tick.
    pub velocity: f32,
    /// Exact vertical displacement over the tick.
    pub displacement: f32,
}

/// Integrate vertical motion for `dt` seconds.
///
/// `rising_gravity` applies while the velocity is positive and `falling_gravity` once it
/// is not. Within each phase the acceleration is constant, so the displacement is exact;
/// a tick that crosses the apex is split at the crossing.
pub fn integrate_vertical(
    velocity: f32,
    dt: f32,
    rising_gravity: f32,
    falling_gravity: f32,
) -> VerticalStep {
    let dt = dt.max(0.0);

    if velocity > 0.0 && rising_gravity < 0.0 {
        let to_apex = velocity / -rising_gravity;
        if to_apex < dt {
            let rest = dt - to_apex;
            let rise = 0.5 * velocity * to_apex;
            let fall = 0.5 * falling_gravity * rest * rest;
            return VerticalStep {
                velocity: falling_gravity * rest,
                displacement: rise + fall,
            };
        }

        let end = velocity + rising_gravity * dt;
        return VerticalStep {
            velocity: end,
            displacement: 0.5 * (velocity + end) * dt,
        };
    }

    let gravity = if velocity > 0.0 {
        rising_gravity
    } else {
        falling_gravity
    };
    let end = velocity + gravity * dt;
    VerticalStep {
        velocity: end,
        displacement: 0.5 * (velocity + end) * dt,
    }
}

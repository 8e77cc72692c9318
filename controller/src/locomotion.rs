use crate::{
    body::{CharacterBody, MoveOutcome},
    config::{ConfigError, GlideMode, GroundDetection, LocomotionConfig},
    constants::MOVE_BLOCK_EPS,
    input::{Button, DrainedInput, InputLatch, InputSample, sanitize_axis},
    jump::{JumpProfile, integrate_vertical},
    state::{Checkpoint, LocomotionState, VerticalRegime},
    types::Vec3,
    utils::{planar_target_velocity, to_planar},
};

/// Turns input samples and body feedback into movement.
///
/// Two entry points match the two host cadences:
/// - [`render_tick`](Self::render_tick) every rendered frame: latches button edges and turns
///   the character.
/// - [`physics_tick`](Self::physics_tick) every fixed step: consumes the latched edges once,
///   integrates velocity and moves the body.
///
/// The body is passed into each call; the controller holds no handle to it.
#[derive(Clone, Debug)]
pub struct LocomotionController {
    config: LocomotionConfig,
    profile: JumpProfile,
    state: LocomotionState,
    latch: InputLatch,
}

impl LocomotionController {
    /// Validate `config` and derive the jump profile. Fails on any invalid tunable.
    pub fn new(config: LocomotionConfig) -> Result<Self, ConfigError> {
        let profile = JumpProfile::from_config(&config)?;
        Ok(Self {
            config,
            profile,
            state: LocomotionState::default(),
            latch: InputLatch::default(),
        })
    }

    /// Like [`new`](Self::new), starting from the body's current facing.
    pub fn spawn<B: CharacterBody + ?Sized>(
        config: LocomotionConfig,
        body: &B,
    ) -> Result<Self, ConfigError> {
        let mut controller = Self::new(config)?;
        controller.state.facing_degrees = body.facing_degrees();
        Ok(controller)
    }

    pub fn regime(&self) -> VerticalRegime {
        self.state.regime()
    }

    pub fn facing_degrees(&self) -> f32 {
        self.state.facing_degrees
    }

    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    pub fn is_gliding(&self) -> bool {
        self.state.is_gliding
    }

    pub fn checkpoint(&self) -> Option<Checkpoint> {
        self.state.checkpoint
    }

    /// Latch `sample` and apply turning. Returns true when the facing changed, i.e. the
    /// camera needs a refresh.
    pub fn render_tick<B: CharacterBody + ?Sized>(
        &mut self,
        sample: &InputSample,
        dt: f32,
        body: &mut B,
    ) -> bool {
        self.latch.record(sample);

        let yaw = sanitize_axis(sample.yaw);
        if yaw == 0.0 || dt <= 0.0 {
            return false;
        }

        let delta = self.config.turning_speed * yaw * dt;
        self.state.facing_degrees += delta;
        body.rotate_by(delta);
        true
    }

    /// Run one fixed step of `dt` seconds.
    ///
    /// Edges latched since the previous physics tick are consumed here and nowhere else.
    /// A non-positive `dt` is ignored and leaves the edges latched.
    pub fn physics_tick<B: CharacterBody + ?Sized>(&mut self, dt: f32, body: &mut B) -> MoveOutcome {
        if dt <= 0.0 {
            return MoveOutcome {
                velocity: self.state.velocity,
                grounded: self.state.grounded,
            };
        }

        let input = self.latch.drain();
        let was_grounded = self.state.grounded;
        let mut velocity = self.state.velocity;

        self.steer(&input, was_grounded, dt, &mut velocity);
        self.apply_buttons(&input, was_grounded, &mut velocity);

        let (end_velocity, requested) = self.integrate(velocity, dt);
        let outcome = body.move_by(requested, dt);
        self.state.velocity = reconcile(end_velocity, requested, &outcome, dt);

        self.update_ground(outcome.grounded);

        if self.config.checkpoints {
            if input.pressed(Button::SaveCheckpoint) {
                self.save_checkpoint(&*body);
            }
            if input.pressed(Button::RestoreCheckpoint) {
                self.restore_checkpoint(body);
            }
        }

        outcome
    }

    /// Remember the body's position. Only allowed while grounded; returns whether it saved.
    pub fn save_checkpoint<B: CharacterBody + ?Sized>(&mut self, body: &B) -> bool {
        if !self.state.grounded {
            log::debug!("checkpoint not saved: airborne");
            return false;
        }

        let checkpoint = Checkpoint {
            position: body.position(),
            facing_degrees: self.state.facing_degrees,
        };
        log::debug!("checkpoint saved at {:?}", checkpoint.position);
        self.state.checkpoint = Some(checkpoint);
        true
    }

    /// Teleport back to the saved checkpoint. Returns false when none was saved.
    ///
    /// This places the body directly; motion state (velocity, glide, jump) is reset.
    pub fn restore_checkpoint<B: CharacterBody + ?Sized>(&mut self, body: &mut B) -> bool {
        let Some(checkpoint) = self.state.checkpoint else {
            log::debug!("no checkpoint to restore");
            return false;
        };

        body.teleport(checkpoint.position);
        body.rotate_by(checkpoint.facing_degrees - self.state.facing_degrees);
        self.state.facing_degrees = checkpoint.facing_degrees;
        self.state.velocity = Vec3::zeros();
        self.state.is_gliding = false;
        self.state.jump_held = false;
        self.state.grounded = false;
        log::debug!("checkpoint restored to {:?}", checkpoint.position);
        true
    }

    /// Planar velocity: set directly on the ground, blended toward the target in the air.
    fn steer(&self, input: &DrainedInput, grounded: bool, dt: f32, velocity: &mut Vec3) {
        let target = planar_target_velocity(
            input.forward,
            input.strafe,
            self.state.facing_degrees,
            self.config.movement_speed,
        );

        if grounded {
            velocity.x = target.x;
            velocity.z = target.y;
        } else {
            let blend = (self.config.air_control * dt).min(1.0);
            velocity.x += (target.x - velocity.x) * blend;
            velocity.z += (target.y - velocity.z) * blend;
        }
    }

    /// Glide toggle, jump launch and jump release, in that order.
    fn apply_buttons(&mut self, input: &DrainedInput, grounded: bool, velocity: &mut Vec3) {
        let jump_pressed = input.pressed(Button::Jump);

        // A release followed by a re-press inside one window ends the held jump before the
        // press is looked at, so the press can toggle glide.
        if self.state.jump_held && input.released_before_press(Button::Jump) {
            self.state.jump_held = false;
            log::debug!("jump released");
        }

        if !grounded && self.config.glide.is_enabled() {
            let toggle =
                input.pressed(Button::Glide) || (jump_pressed && !self.state.jump_held);
            if toggle {
                self.state.is_gliding = !self.state.is_gliding;
                if self.state.is_gliding {
                    log::debug!("started gliding");
                } else {
                    log::debug!("stopped gliding");
                }
            }
        }

        if jump_pressed && grounded {
            self.state.jump_held = true;
            velocity.y = self.profile.jump_velocity;
            log::debug!("jumped");
        }

        if self.state.jump_held && (input.released(Button::Jump) || !input.held(Button::Jump)) {
            self.state.jump_held = false;
            log::debug!("jump released");
        }
    }

    /// Vertical integration plus glide. Returns the end-of-tick velocity and the
    /// displacement to request from the body.
    fn integrate(&self, velocity: Vec3, dt: f32) -> (Vec3, Vec3) {
        let rising_gravity = if self.state.jump_held {
            self.profile.gravity_while_held
        } else {
            self.profile.gravity_after_release
        };

        let gliding = self.state.is_gliding;
        let horizontal_speed = to_planar(&velocity).norm();
        let mut falling_gravity = self.config.gravity_on_falling;
        let mut glide_effective = false;
        if gliding {
            if let GlideMode::SpeedScaled {
                min_speed_fraction,
                drag,
                ..
            } = self.config.glide
            {
                if horizontal_speed < min_speed_fraction * self.config.movement_speed {
                    falling_gravity *= 1.0 - drag;
                } else {
                    glide_effective = true;
                }
            }
        }

        let step = integrate_vertical(velocity.y, dt, rising_gravity, falling_gravity);
        let mut vy = step.velocity;
        let mut dy = step.displacement;

        if gliding && vy <= 0.0 {
            match self.config.glide {
                GlideMode::Clamp { terminal_velocity } => {
                    if vy < terminal_velocity {
                        vy = terminal_velocity;
                        dy = dy.max(terminal_velocity * dt);
                    }
                }
                GlideMode::SpeedScaled {
                    down_speed,
                    approach_rate,
                    ..
                } if glide_effective => {
                    let blend = (approach_rate * dt).min(1.0);
                    vy += (down_speed - vy) * blend;
                    dy = 0.5 * (velocity.y.min(0.0) + vy) * dt;
                }
                _ => {}
            }
        }

        let end_velocity = Vec3::new(velocity.x, vy, velocity.z);
        let requested = Vec3::new(velocity.x * dt, dy, velocity.z * dt);
        (end_velocity, requested)
    }

    fn update_ground(&mut self, reported: bool) {
        let grounded = match self.config.ground_detection {
            GroundDetection::Reported => reported,
            GroundDetection::VelocityHeuristic {
                rest_epsilon,
                fall_threshold,
            } => {
                let vy = self.state.velocity.y;
                if vy.abs() <= rest_epsilon {
                    true
                } else if vy > rest_epsilon || vy < -fall_threshold {
                    false
                } else {
                    self.state.grounded
                }
            }
        };

        if grounded {
            if !self.state.grounded {
                log::debug!("landed");
            }
            self.state.land();
            if self.state.velocity.y < 0.0 {
                self.state.velocity.y = 0.0;
            }
        } else {
            self.state.grounded = false;
        }
    }
}

/// Axes the body moved as requested keep the integrated end velocity.
///
/// A blocked axis can only lose speed: it takes the body's reported velocity when that
/// points the same way as the intended one and is slower, and stops otherwise. Depenetration
/// pushes (a resting capsule nudged up off the floor) never become velocity.
fn reconcile(end_velocity: Vec3, requested: Vec3, outcome: &MoveOutcome, dt: f32) -> Vec3 {
    let achieved = outcome.velocity * dt;
    let mut velocity = end_velocity;
    for axis in 0..3 {
        if (achieved[axis] - requested[axis]).abs() > MOVE_BLOCK_EPS {
            let intended = end_velocity[axis];
            let reported = outcome.velocity[axis];
            velocity[axis] = if reported * intended > 0.0 && reported.abs() < intended.abs() {
                reported
            } else {
                0.0
            };
        }
    }
    velocity
}

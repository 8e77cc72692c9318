//! Character body backed by Rapier's kinematic character controller.
//!
//! The capsule slides along the static scene, climbs small steps and snaps down onto
//! ground it walks over. Only fixed colliders are considered.

use controller::{CharacterBody, MoveOutcome, StaticQueryWorld, Vec3, yaw_rotation};
use nalgebra::{Isometry3, Translation3};
use rapier3d::{
    control::{CharacterAutostep, CharacterLength, KinematicCharacterController},
    prelude::{Capsule, QueryFilter},
};

use crate::config::{KccSettings, SimConfig};

pub fn kcc_from_settings(settings: &KccSettings) -> KinematicCharacterController {
    let autostep = (settings.autostep_max_height > 0.0).then(|| CharacterAutostep {
        include_dynamic_bodies: false,
        max_height: CharacterLength::Relative(settings.autostep_max_height),
        min_width: CharacterLength::Relative(settings.autostep_min_width),
        ..CharacterAutostep::default()
    });
    let snap_to_ground = (settings.snap_to_ground > 0.0)
        .then_some(CharacterLength::Relative(settings.snap_to_ground));

    KinematicCharacterController {
        autostep,
        snap_to_ground,
        offset: CharacterLength::Relative(settings.offset),
        slide: settings.slide,
        max_slope_climb_angle: settings.max_slope_climb_deg.to_radians(),
        min_slope_slide_angle: settings.min_slope_slide_deg.to_radians(),
        normal_nudge_factor: settings.normal_nudge_factor,
        ..KinematicCharacterController::default()
    }
}

pub struct RapierCharacterBody {
    world: StaticQueryWorld,
    kcc: KinematicCharacterController,
    shape: Capsule,
    /// Capsule center.
    position: Vec3,
    facing_degrees: f32,
}

impl RapierCharacterBody {
    pub fn new(world: StaticQueryWorld, config: &SimConfig) -> Self {
        let [x, y, z] = config.spawn;
        Self {
            world,
            kcc: kcc_from_settings(&config.kcc),
            shape: Capsule::new_y(config.capsule.half_height, config.capsule.radius),
            position: Vec3::new(x, y, z),
            facing_degrees: config.spawn_facing_degrees,
        }
    }

    fn pose(&self) -> Isometry3<f32> {
        Isometry3::from_parts(
            Translation3::from(self.position),
            yaw_rotation(self.facing_degrees),
        )
    }
}

impl CharacterBody for RapierCharacterBody {
    fn move_by(&mut self, displacement: Vec3, dt: f32) -> MoveOutcome {
        let pose = self.pose();
        let query_pipeline = self.world.as_query_pipeline(QueryFilter::only_fixed());
        let movement =
            self.kcc
                .move_shape(dt, &query_pipeline, &self.shape, &pose, displacement, |_| {});

        self.position += movement.translation;

        let velocity = if dt > 0.0 {
            movement.translation / dt
        } else {
            Vec3::zeros()
        };
        MoveOutcome {
            velocity,
            grounded: movement.grounded,
        }
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn facing_degrees(&self) -> f32 {
        self.facing_degrees
    }

    fn rotate_by(&mut self, delta_degrees: f32) {
        self.facing_degrees += delta_degrees;
    }

    fn teleport(&mut self, position: Vec3) {
        log::trace!("teleport to {position:?}");
        self.position = position;
    }
}

//! Fixed-step driver for one character and its camera.
//!
//! Each rendered frame runs, in order:
//! 1. one render tick (input latch, turning, interaction),
//! 2. as many fixed physics ticks as the accumulated time allows,
//! 3. a camera refresh when the pitch changed or the character moved or turned.

use controller::{
    Button, CameraConfig, CameraTransform, CharacterBody, ConfigError, InputSample,
    Interactable, InteractableId, InteractionZones, LocomotionConfig, LocomotionController,
    OrbitCameraRig, Vec3, VerticalRegime,
};
use controller::config::require_positive;

use crate::config::SimConfig;

/// What happened during one [`FrameScheduler::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub physics_ticks: u32,
    pub position: Vec3,
    pub regime: VerticalRegime,
    /// New camera pose, when it was refreshed this frame.
    pub camera: Option<CameraTransform>,
    pub interacted: Option<InteractableId>,
}

pub struct FrameScheduler<T> {
    fixed_dt: f32,
    max_frame_dt: f32,
    accumulator: f32,
    controller: LocomotionController,
    camera: OrbitCameraRig,
    zones: InteractionZones<T>,
    last_position: Option<Vec3>,
}

impl<T: Interactable> FrameScheduler<T> {
    pub fn new<B: CharacterBody + ?Sized>(
        locomotion: LocomotionConfig,
        camera: CameraConfig,
        sim: &SimConfig,
        body: &B,
    ) -> Result<Self, ConfigError> {
        require_positive("sim.fixed_dt", sim.fixed_dt)?;
        require_positive("sim.max_frame_dt", sim.max_frame_dt)?;
        Ok(Self {
            fixed_dt: sim.fixed_dt,
            max_frame_dt: sim.max_frame_dt,
            accumulator: 0.0,
            controller: LocomotionController::spawn(locomotion, body)?,
            camera: OrbitCameraRig::new(camera)?,
            zones: InteractionZones::new(),
            last_position: None,
        })
    }

    pub fn controller(&self) -> &LocomotionController {
        &self.controller
    }

    pub fn camera(&self) -> &OrbitCameraRig {
        &self.camera
    }

    pub fn zones(&self) -> &InteractionZones<T> {
        &self.zones
    }

    pub fn zones_mut(&mut self) -> &mut InteractionZones<T> {
        &mut self.zones
    }

    /// Advance by one rendered frame of `render_dt` seconds.
    ///
    /// Frames longer than `max_frame_dt` are clamped so a stall cannot queue an unbounded
    /// number of physics ticks.
    pub fn advance<B: CharacterBody + ?Sized>(
        &mut self,
        render_dt: f32,
        sample: &InputSample,
        body: &mut B,
    ) -> FrameReport {
        let mut dt = if render_dt.is_finite() {
            render_dt.max(0.0)
        } else {
            0.0
        };
        if dt > self.max_frame_dt {
            log::warn!(
                "frame took {dt:.3}s, clamping to {:.3}s",
                self.max_frame_dt
            );
            dt = self.max_frame_dt;
        }

        let turned = self.controller.render_tick(sample, dt, body);

        let interacted = if sample.pressed.has(Button::Interact) {
            self.zones.interact_nearest(body.position())
        } else {
            None
        };

        self.accumulator += dt;
        let mut physics_ticks = 0;
        while self.accumulator >= self.fixed_dt {
            self.controller.physics_tick(self.fixed_dt, body);
            self.accumulator -= self.fixed_dt;
            physics_ticks += 1;
        }

        let position = body.position();
        let moved = self.last_position != Some(position);
        self.last_position = Some(position);

        let camera = self
            .camera
            .move_pitch(sample.pitch, dt, turned || moved)
            .then(|| self.camera.update(position, self.controller.facing_degrees()));

        FrameReport {
            physics_ticks,
            position,
            regime: self.controller.regime(),
            camera,
            interacted,
        }
    }
}

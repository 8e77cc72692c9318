//! Headless run of a scripted play session.
//!
//! Usage: `sim_harness [session.ron]`. Without an argument the bundled
//! `assets/session.ron` is used. Set `RUST_LOG=debug` to see jumps, glides and landings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use controller::{Button, InputSample, Interactable, InteractableId, Vec3};
use sim::{
    FrameScheduler, RapierCharacterBody, SessionConfig, TriggerVolume, build_scene,
    sync_trigger_zones,
};

const DEFAULT_SESSION: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/session.ron");
const RENDER_DT: f32 = 1.0 / 60.0;

/// A switch the character can toggle from within a few meters.
struct Beacon {
    id: u32,
    at: Vec3,
    lit: bool,
}

impl Interactable for Beacon {
    fn id(&self) -> InteractableId {
        InteractableId(self.id)
    }

    fn position(&self) -> Vec3 {
        self.at
    }

    fn trigger(&mut self) {
        self.lit = !self.lit;
        log::info!("beacon {} is now {}", self.id, if self.lit { "lit" } else { "dark" });
    }
}

impl TriggerVolume for Beacon {
    fn radius(&self) -> f32 {
        3.0
    }
}

struct Phase {
    name: &'static str,
    frames: u32,
    /// Edges apply to the first frame only; axes and held buttons repeat.
    sample: InputSample,
}

fn phase(name: &'static str, frames: u32, sample: InputSample) -> Phase {
    Phase {
        name,
        frames,
        sample,
    }
}

fn script() -> Vec<Phase> {
    let forward = InputSample::with_axes(1.0, 0.0);
    let mut turn_left = forward;
    turn_left.yaw = 0.25;
    let mut look_up = InputSample::default();
    look_up.pitch = 1.0;

    vec![
        phase("settle", 30, InputSample::default()),
        phase("save checkpoint", 1, InputSample::default().tap(Button::SaveCheckpoint)),
        phase("walk", 90, forward),
        phase("turn while walking", 60, turn_left),
        phase("held jump", 50, forward.press(Button::Jump)),
        phase("glide", 120, forward.release(Button::Jump).tap(Button::Glide)),
        phase("land", 120, forward),
        phase("look up", 40, look_up),
        phase("interact", 1, InputSample::default().tap(Button::Interact)),
        phase("restore checkpoint", 1, InputSample::default().tap(Button::RestoreCheckpoint)),
        phase("fall to ground", 60, InputSample::default()),
    ]
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION));
    let session = SessionConfig::load(&path)?;

    let world = build_scene(&session.scene, session.sim.fixed_dt);
    let mut body = RapierCharacterBody::new(world, &session.sim);
    let mut scheduler = FrameScheduler::new(
        session.locomotion.clone(),
        session.camera.clone(),
        &session.sim,
        &body,
    )
    .context("failed to set up the character")?;

    let mut parked = vec![Beacon {
        id: 1,
        at: Vec3::new(-8.0, 1.0, -20.0),
        lit: false,
    }];

    for Phase {
        name,
        frames,
        sample,
    } in script()
    {
        log::info!("phase: {name}");
        for frame in 0..frames {
            let sample = if frame == 0 {
                sample
            } else {
                sample.without_edges()
            };
            let report = scheduler.advance(RENDER_DT, &sample, &mut body);
            sync_trigger_zones(scheduler.zones_mut(), &mut parked, report.position);

            if let Some(id) = report.interacted {
                log::info!("interacted with {id:?}");
            }
            if frame + 1 == frames {
                let p = report.position;
                log::info!(
                    "  end of {name}: position ({:.2}, {:.2}, {:.2}), {:?}, facing {:.1}°",
                    p.x,
                    p.y,
                    p.z,
                    report.regime,
                    scheduler.controller().facing_degrees()
                );
                if let Some(camera) = scheduler.camera().transform() {
                    let c = camera.position;
                    log::info!(
                        "  camera at ({:.2}, {:.2}, {:.2}), pitch {:.1}°",
                        c.x,
                        c.y,
                        c.z,
                        scheduler.camera().pitch_degrees()
                    );
                }
            }
        }
    }

    let lit = parked
        .iter()
        .chain(scheduler.zones().iter())
        .filter(|beacon| beacon.lit)
        .count();
    log::info!("session finished, {lit} beacon(s) lit");
    Ok(())
}

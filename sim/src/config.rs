//! Session configuration loaded from RON.
//!
//! ```ron
//! (
//!     locomotion: (movement_speed: 12.0),
//!     camera: (distance: 8.0),
//!     sim: (fixed_dt: 0.02),
//!     scene: [
//!         (id: 1, translation: (0.0, 0.0, 0.0), shape: Plane(offset: 0.0)),
//!     ],
//! )
//! ```
//!
//! Every section and field is optional; missing values take their defaults.

use std::path::Path;

use anyhow::{Context, Result};
use controller::config::{ConfigError, require_non_negative, require_positive};
use controller::{CameraConfig, DEFAULT_FIXED_DT, LocomotionConfig};
use serde::Deserialize;

use crate::world::StaticRow;

/// Capsule dimensions of the character collider.
///
/// Total height = `2 * half_height + 2 * radius`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CapsuleSpec {
    pub radius: f32,
    pub half_height: f32,
}

impl Default for CapsuleSpec {
    fn default() -> Self {
        Self {
            radius: 0.35,
            half_height: 0.55,
        }
    }
}

/// Rapier `KinematicCharacterController` settings.
///
/// Lengths are relative to the capsule size unless noted; angles are degrees.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct KccSettings {
    /// Gap kept between the capsule and its surroundings.
    pub offset: f32,
    pub max_slope_climb_deg: f32,
    pub min_slope_slide_deg: f32,
    /// Zero disables autostep.
    pub autostep_max_height: f32,
    pub autostep_min_width: f32,
    /// Zero disables snapping to the ground.
    pub snap_to_ground: f32,
    pub slide: bool,
    /// Increase if the character gets stuck when sliding (meters).
    pub normal_nudge_factor: f32,
}

impl Default for KccSettings {
    fn default() -> Self {
        Self {
            offset: 0.025,
            max_slope_climb_deg: 52.0,
            min_slope_slide_deg: 45.0,
            autostep_max_height: 0.325,
            autostep_min_width: 0.2,
            snap_to_ground: 0.2,
            slide: true,
            normal_nudge_factor: 0.05,
        }
    }
}

/// Host timing and character body settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Physics step (seconds).
    pub fixed_dt: f32,
    /// Longest render frame accepted before clamping (seconds).
    pub max_frame_dt: f32,
    pub capsule: CapsuleSpec,
    pub kcc: KccSettings,
    /// Capsule center at spawn.
    pub spawn: [f32; 3],
    pub spawn_facing_degrees: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_dt: DEFAULT_FIXED_DT,
            max_frame_dt: 0.25,
            capsule: CapsuleSpec::default(),
            kcc: KccSettings::default(),
            spawn: [0.0, 2.0, 0.0],
            spawn_facing_degrees: 0.0,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("sim.fixed_dt", self.fixed_dt)?;
        require_positive("sim.max_frame_dt", self.max_frame_dt)?;
        require_positive("sim.capsule.radius", self.capsule.radius)?;
        require_non_negative("sim.capsule.half_height", self.capsule.half_height)?;
        require_non_negative("sim.kcc.offset", self.kcc.offset)?;
        require_non_negative("sim.kcc.autostep_max_height", self.kcc.autostep_max_height)?;
        require_non_negative("sim.kcc.autostep_min_width", self.kcc.autostep_min_width)?;
        require_non_negative("sim.kcc.snap_to_ground", self.kcc.snap_to_ground)?;
        require_non_negative("sim.kcc.normal_nudge_factor", self.kcc.normal_nudge_factor)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub locomotion: LocomotionConfig,
    pub camera: CameraConfig,
    pub sim: SimConfig,
    pub scene: Vec<StaticRow>,
}

impl SessionConfig {
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).context("failed to parse session RON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session file {}", path.display()))?;
        Self::from_ron_str(&text).with_context(|| format!("invalid session file {}", path.display()))
    }

    /// Validate every section. Invalid tunables are logged and rejected.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("locomotion", self.locomotion.validate()),
            ("camera", self.camera.validate()),
            ("sim", self.sim.validate()),
        ];
        for (section, check) in checks {
            if let Err(err) = check {
                log::warn!("rejected {section} config: {err}");
                return Err(err).with_context(|| format!("invalid {section} config"));
            }
        }
        Ok(())
    }
}

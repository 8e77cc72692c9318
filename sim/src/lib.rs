pub mod body;
pub mod config;
pub mod scheduler;
pub mod triggers;
pub mod world;

pub use body::{RapierCharacterBody, kcc_from_settings};
pub use config::{CapsuleSpec, KccSettings, SessionConfig, SimConfig};
pub use scheduler::{FrameReport, FrameScheduler};
pub use triggers::{TriggerVolume, sync_trigger_zones};
pub use world::{ShapeRow, StaticRow, build_scene, row_to_def};

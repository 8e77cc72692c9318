pub mod bitmask_flags;
pub mod body;
pub mod camera;
pub mod config;
pub mod constants;
pub mod input;
pub mod interaction;
pub mod jump;
pub mod locomotion;
pub mod rapier;
pub mod state;
pub mod types;
pub mod utils;

pub use body::{CharacterBody, FlatFloorBody, MoveOutcome};
pub use camera::{CameraTransform, OrbitCameraRig};
pub use config::{CameraConfig, ConfigError, GlideMode, GroundDetection, LocomotionConfig};
pub use constants::{DEFAULT_FIXED_DT, MOVE_BLOCK_EPS};
pub use input::{Button, Buttons, DrainedInput, InputLatch, InputSample, sanitize_axis};
pub use interaction::{Interactable, InteractableId, InteractionZones};
pub use jump::{JumpProfile, integrate_vertical};
pub use locomotion::LocomotionController;
pub use rapier::{
    ColliderShapeDef, StaticQueryWorld, WorldStaticDef, build_static_query_world,
    collider_from_def,
};
pub use state::{Checkpoint, LocomotionState, VerticalRegime};
pub use types::{Quat, Vec2, Vec3, yaw_rotation};
pub use utils::{planar_target_velocity, to_planar};

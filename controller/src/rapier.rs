//! Static collision scene for the Rapier-backed character body.
//!
//! Statics never move after construction, so the scene is only a collider set with an
//! up-to-date broad phase. It supports scene queries and the Rapier
//! `KinematicCharacterController`; no dynamics are ever stepped.

use nalgebra::{Translation3, UnitQuaternion};
use rapier3d::prelude::*;

/// Definition of an immutable world collider.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    pub id: u32,
    /// World-space translation.
    pub translation: Vector<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
}

/// Supported static collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space) whose normal is `rotation * +Y`, shifted along that
    /// normal by `offset_along_normal` (meters).
    Plane { offset_along_normal: f32 },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },

    Sphere { radius: f32 },

    /// Y-aligned capsule (meters).
    CapsuleY { radius: f32, half_height: f32 },

    /// Y-aligned cylinder (meters).
    CylinderY { radius: f32, half_height: f32 },
}

impl WorldStaticDef {
    /// World pose of the collider.
    pub fn pose(&self) -> Isometry<Real> {
        let translation = match self.shape {
            ColliderShapeDef::Plane {
                offset_along_normal,
            } => self.translation + self.rotation * Vector::y() * offset_along_normal,
            _ => self.translation,
        };
        Isometry::from_parts(Translation3::from(translation), self.rotation)
    }
}

/// Build a Rapier collider for `def`, in its local frame. Place it with [`WorldStaticDef::pose`].
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    match &def.shape {
        // Local +Y normal; the pose rotation turns it into the world normal.
        ColliderShapeDef::Plane { .. } => {
            ColliderBuilder::new(SharedShape::new(HalfSpace::new(Vector::y_axis()))).build()
        }

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius).build(),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius).build(),

        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => ColliderBuilder::cylinder(*half_height, *radius).build(),
    }
}

pub struct StaticQueryWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
}

impl StaticQueryWorld {
    /// Borrowed query view, valid for as long as the world is.
    pub fn as_query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

/// Build the static scene. Definitions are inserted in `id` order so identical inputs
/// always produce identical collider sets.
pub fn build_static_query_world(
    world_statics: impl IntoIterator<Item = WorldStaticDef>,
    dt: f32,
) -> StaticQueryWorld {
    let mut defs: Vec<WorldStaticDef> = world_statics.into_iter().collect();
    defs.sort_by_key(|d| d.id);

    let bodies = RigidBodySet::new();
    let mut colliders = ColliderSet::new();
    let mut modified_colliders = Vec::with_capacity(defs.len());

    for def in &defs {
        let mut collider = collider_from_def(def);
        collider.set_position(def.pose());
        modified_colliders.push(colliders.insert(collider));
    }

    let mut broad_phase = BroadPhaseBvh::new();
    let mut events = Vec::new();
    broad_phase.update(
        &IntegrationParameters {
            dt,
            ..IntegrationParameters::default()
        },
        &colliders,
        &bodies,
        &modified_colliders,
        &[],
        &mut events,
    );

    log::debug!("built static query world with {} colliders", defs.len());

    StaticQueryWorld {
        bodies,
        colliders,
        broad_phase,
        narrow_phase: NarrowPhase::default(),
    }
}

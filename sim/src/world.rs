//! Scene rows from the session file, and the static query world built from them.
//!
//! Rows use plain arrays so the RON stays readable; they are converted to the controller's
//! collider definitions and built once. Statics never change after loading.

use controller::{ColliderShapeDef, StaticQueryWorld, WorldStaticDef, build_static_query_world};
use nalgebra::{UnitQuaternion, Vector3};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub enum ShapeRow {
    /// Half-space; normal is the row rotation applied to +Y.
    Plane { offset: f32 },
    Cuboid { half_extents: [f32; 3] },
    Sphere { radius: f32 },
    Capsule { radius: f32, half_height: f32 },
    Cylinder { radius: f32, half_height: f32 },
}

/// One static collider.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct StaticRow {
    pub id: u32,
    pub translation: (f32, f32, f32),
    /// Rotations about X, Y and Z in degrees, applied in that order.
    #[serde(default)]
    pub rotation_degrees: (f32, f32, f32),
    pub shape: ShapeRow,
}

/// Convert a scene row to a collider definition.
pub fn row_to_def(row: &StaticRow) -> WorldStaticDef {
    let (x, y, z) = row.translation;
    let (rx, ry, rz) = row.rotation_degrees;

    let shape = match row.shape {
        ShapeRow::Plane { offset } => ColliderShapeDef::Plane {
            offset_along_normal: offset,
        },
        ShapeRow::Cuboid { half_extents } => ColliderShapeDef::Cuboid {
            half_extents: Vector3::from(half_extents),
        },
        ShapeRow::Sphere { radius } => ColliderShapeDef::Sphere { radius },
        ShapeRow::Capsule {
            radius,
            half_height,
        } => ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        },
        ShapeRow::Cylinder {
            radius,
            half_height,
        } => ColliderShapeDef::CylinderY {
            radius,
            half_height,
        },
    };

    WorldStaticDef {
        id: row.id,
        translation: Vector3::new(x, y, z),
        rotation: UnitQuaternion::from_euler_angles(
            rx.to_radians(),
            ry.to_radians(),
            rz.to_radians(),
        ),
        shape,
    }
}

/// Build the query world for a scene. Rows with non-finite values or empty shapes are skipped.
pub fn build_scene(rows: &[StaticRow], dt: f32) -> StaticQueryWorld {
    let defs = rows.iter().filter_map(|row| {
        if row_is_valid(row) {
            Some(row_to_def(row))
        } else {
            log::error!("skipping invalid static {}", row.id);
            None
        }
    });
    let world = build_static_query_world(defs, dt);
    log::info!("scene loaded: {} statics", world.collider_count());
    world
}

fn row_is_valid(row: &StaticRow) -> bool {
    let (x, y, z) = row.translation;
    let (a, b, c) = row.rotation_degrees;
    let shape_ok = match row.shape {
        ShapeRow::Plane { offset } => offset.is_finite(),
        ShapeRow::Cuboid { half_extents } => half_extents.iter().all(|v| v.is_finite() && *v > 0.0),
        ShapeRow::Sphere { radius } => radius.is_finite() && radius > 0.0,
        ShapeRow::Capsule {
            radius,
            half_height,
        }
        | ShapeRow::Cylinder {
            radius,
            half_height,
        } => radius.is_finite() && radius > 0.0 && half_height.is_finite() && half_height >= 0.0,
    };
    [x, y, z, a, b, c].iter().all(|v| v.is_finite()) && shape_ok
}

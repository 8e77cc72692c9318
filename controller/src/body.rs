//! The physics capability the controller drives.
//!
//! The controller never solves collisions. Each physics tick it asks the host to move the
//! character by a displacement and reads back what actually happened.

use crate::types::Vec3;

/// What the body reports after a move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveOutcome {
    /// Achieved displacement divided by the tick length.
    pub velocity: Vec3,
    /// Whether the body rests on walkable ground after the move.
    pub grounded: bool,
}

/// Host-supplied character body.
pub trait CharacterBody {
    /// Collision-aware move by `displacement` over `dt` seconds.
    fn move_by(&mut self, displacement: Vec3, dt: f32) -> MoveOutcome;

    /// Current world position.
    fn position(&self) -> Vec3;

    /// Current facing angle in degrees.
    fn facing_degrees(&self) -> f32;

    /// Rotate the heading immediately (no physics).
    fn rotate_by(&mut self, delta_degrees: f32);

    /// Place the body at `position` immediately (no physics).
    fn teleport(&mut self, position: Vec3);
}

/// In-memory body over an infinite flat floor.
///
/// Used by headless tests and as a fallback host with no collision world.
#[derive(Clone, Debug)]
pub struct FlatFloorBody {
    pub position: Vec3,
    pub facing_degrees: f32,
    pub floor_height: f32,
    /// When false, `move_by` always reports `grounded = false` (a body without contact
    /// reporting, for the velocity heuristic).
    pub reports_contact: bool,
}

impl FlatFloorBody {
    pub fn new(position: Vec3, floor_height: f32) -> Self {
        Self {
            position,
            facing_degrees: 0.0,
            floor_height,
            reports_contact: true,
        }
    }
}

impl CharacterBody for FlatFloorBody {
    fn move_by(&mut self, displacement: Vec3, dt: f32) -> MoveOutcome {
        let start = self.position;
        let mut end = start + displacement;
        let mut touching = false;
        if end.y <= self.floor_height {
            end.y = self.floor_height;
            touching = displacement.y <= 0.0;
        }
        self.position = end;

        let velocity = if dt > 0.0 {
            (end - start) / dt
        } else {
            Vec3::zeros()
        };
        MoveOutcome {
            velocity,
            grounded: touching && self.reports_contact,
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
        self.position = position;
    }
}

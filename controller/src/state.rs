use crate::types::Vec3;

/// Vertical phase of the character, derived from [`LocomotionState`] on demand.
///
/// ```text
/// Grounded --jump--> Ascending --release--> Releasing
///    ^                   |                      |
///    |                   +----- v.y <= 0 -------+--> Falling <--toggle--> Gliding
///    +------------------------ ground contact -----------+--------------------+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalRegime {
    Grounded,
    /// Rising with jump held; held-jump gravity applies.
    Ascending,
    /// Rising after jump was released; the steeper release gravity applies.
    Releasing,
    /// Not rising and not gliding.
    Falling,
    /// Descending with glide toggled on.
    Gliding,
}

/// A saved position to return to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checkpoint {
    pub position: Vec3,
    pub facing_degrees: f32,
}

/// Mutable state owned by the [`LocomotionController`](crate::locomotion::LocomotionController).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocomotionState {
    pub facing_degrees: f32,
    /// Velocity at the end of the last physics tick.
    pub velocity: Vec3,
    pub grounded: bool,
    /// Glide toggle. Only ever true while airborne.
    pub is_gliding: bool,
    /// Jump button still held since the jump that launched the current arc.
    pub jump_held: bool,
    pub checkpoint: Option<Checkpoint>,
}

impl LocomotionState {
    pub fn regime(&self) -> VerticalRegime {
        if self.grounded {
            VerticalRegime::Grounded
        } else if self.velocity.y > 0.0 {
            if self.jump_held {
                VerticalRegime::Ascending
            } else {
                VerticalRegime::Releasing
            }
        } else if self.is_gliding {
            VerticalRegime::Gliding
        } else {
            VerticalRegime::Falling
        }
    }

    /// Record ground contact: gliding and jump-held are cleared unconditionally.
    pub(crate) fn land(&mut self) {
        self.grounded = true;
        self.is_gliding = false;
        self.jump_held = false;
    }
}

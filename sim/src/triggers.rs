//! Spherical trigger volumes standing in for engine overlap events.
//!
//! Interactables live in one of two places: parked (character outside their volume) or in
//! the [`InteractionZones`] set. Each frame [`sync_trigger_zones`] moves them between the
//! two, which is what enter/exit overlap callbacks would do in an engine.

use controller::{Interactable, InteractableId, InteractionZones, Vec3};

/// An interactable with a spherical trigger volume around its position.
pub trait TriggerVolume: Interactable {
    fn radius(&self) -> f32;

    fn contains(&self, point: Vec3) -> bool {
        (self.position() - point).norm_squared() <= self.radius() * self.radius()
    }
}

/// Move items whose volume now contains `at` into `zones`, and items whose volume no longer
/// does back into `parked`.
pub fn sync_trigger_zones<T: TriggerVolume>(
    zones: &mut InteractionZones<T>,
    parked: &mut Vec<T>,
    at: Vec3,
) {
    let leaving: Vec<InteractableId> = zones
        .iter()
        .filter(|item| !item.contains(at))
        .map(|item| item.id())
        .collect();
    for id in leaving {
        if let Some(item) = zones.exit(id) {
            parked.push(item);
        }
    }

    let mut index = 0;
    while index < parked.len() {
        if parked[index].contains(at) {
            zones.enter(parked.swap_remove(index));
        } else {
            index += 1;
        }
    }
}

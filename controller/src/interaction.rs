use log::{debug, trace};

use crate::types::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractableId(pub u32);

/// Something the character can trigger while standing inside its zone.
pub trait Interactable {
    fn id(&self) -> InteractableId;
    fn position(&self) -> Vec3;
    fn trigger(&mut self);
}

/// Interactables whose trigger zone currently contains the character.
///
/// Zone membership is driven by the host's overlap events ([`enter`](Self::enter) and
/// [`exit`](Self::exit)); the set only answers "which one is closest" when the interact
/// button is pressed.
#[derive(Debug)]
pub struct InteractionZones<T> {
    inside: Vec<T>,
}

impl<T> Default for InteractionZones<T> {
    fn default() -> Self {
        Self { inside: Vec::new() }
    }
}

impl<T: Interactable> InteractionZones<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Character entered the zone of `item`. Entering twice is a no-op.
    pub fn enter(&mut self, item: T) {
        let id = item.id();
        if self.inside.iter().any(|i| i.id() == id) {
            trace!("interactable {id:?} already in range");
            return;
        }
        debug!("interactable {id:?} in range");
        self.inside.push(item);
    }

    /// Character left the zone of `id`. Returns the item if it was in range.
    pub fn exit(&mut self, id: InteractableId) -> Option<T> {
        let index = self.inside.iter().position(|i| i.id() == id)?;
        debug!("interactable {id:?} out of range");
        Some(self.inside.swap_remove(index))
    }

    pub fn len(&self) -> usize {
        self.inside.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inside.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inside.iter()
    }

    pub fn contains(&self, id: InteractableId) -> bool {
        self.inside.iter().any(|i| i.id() == id)
    }

    fn nearest_index(&self, from: Vec3) -> Option<usize> {
        self.inside
            .iter()
            .enumerate()
            .map(|(index, item)| (index, (item.position() - from).norm_squared()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Closest in-range interactable to `from`.
    pub fn nearest(&self, from: Vec3) -> Option<&T> {
        self.nearest_index(from).map(|i| &self.inside[i])
    }

    /// Trigger the closest in-range interactable. Returns its id, or `None` when nothing is
    /// in range.
    pub fn interact_nearest(&mut self, from: Vec3) -> Option<InteractableId> {
        let index = self.nearest_index(from)?;
        let item = &mut self.inside[index];
        let id = item.id();
        debug!("triggering interactable {id:?}");
        item.trigger();
        Some(id)
    }
}

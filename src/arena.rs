//! Insertion-ordered entity pools with stable ids and deferred removal.
//!
//! Collision resolution marks entities as removed while it scans; nothing is
//! physically dropped until `compact` runs at the end of the tick, so ids
//! stay valid for the whole resolution phase and removing twice is harmless.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

#[derive(Clone, Debug)]
struct Slot<T> {
    id: EntityId,
    removed: bool,
    value: T,
}

#[derive(Clone, Debug)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    next_id: u32,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            removed: false,
            value,
        });
        id
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = T>) {
        for value in values {
            self.insert(value);
        }
    }

    // Ids are handed out in increasing order and compaction keeps the order,
    // so the slot list is always sorted by id.
    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.slots.binary_search_by_key(&id, |slot| slot.id).ok()
    }

    /// Mark an entity for removal. Returns `false` when it was already
    /// removed or never existed.
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.index_of(id) {
            Some(i) if !self.slots[i].removed => {
                self.slots[i].removed = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_live(&self, id: EntityId) -> bool {
        self.index_of(id)
            .map(|i| !self.slots[i].removed)
            .unwrap_or(false)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        let i = self.index_of(id)?;
        let slot = &self.slots[i];
        (!slot.removed).then_some(&slot.value)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        let i = self.index_of(id)?;
        let slot = &mut self.slots[i];
        (!slot.removed).then_some(&mut slot.value)
    }

    /// Live entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots
            .iter()
            .filter(|slot| !slot.removed)
            .map(|slot| (slot.id, &slot.value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.slots
            .iter_mut()
            .filter(|slot| !slot.removed)
            .map(|slot| (slot.id, &mut slot.value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, value)| value)
    }

    /// Snapshot of the live ids, for loops that mutate the pool as they go.
    pub fn live_ids(&self) -> Vec<EntityId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.removed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physically drop every slot marked for removal.
    pub fn compact(&mut self) {
        self.slots.retain(|slot| !slot.removed);
    }
}

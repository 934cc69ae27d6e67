//! Generational slot arena backing the node store.
//!
//! Freed slots go on a free list and have their generation bumped, so a
//! handle to a freed node never resolves to whatever reuses its slot.

use trellis_tree::NodeId;

/// One arena slot.
#[derive(Debug)]
struct Slot<T> {
    /// Bumped every time the slot is freed.
    generation: u32,
    /// The occupant, if any.
    value: Option<T>,
    /// Next free slot when this one is free.
    next_free: Option<u32>,
}

/// Slot storage addressed by [`NodeId`].
#[derive(Debug)]
pub struct Arena<T> {
    /// All slots ever allocated.
    slots: Vec<Slot<T>>,
    /// Head of the free list.
    free_head: Option<u32>,
    /// Number of occupied slots.
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// An empty arena.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// An empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Store `value`, reusing a free slot when one exists.
    pub fn allocate(&mut self, value: T) -> NodeId {
        self.len += 1;
        if let Some(index) = self.free_head
            && let Some(slot) = self.slots.get_mut(index as usize)
        {
            self.free_head = slot.next_free.take();
            slot.value = Some(value);
            return NodeId::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
            next_free: None,
        });
        NodeId::new(index, 0)
    }

    /// The value behind `id`, unless the handle is stale.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        let slot = self.slots.get(id.slot() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    /// Mutable access to the value behind `id`, unless the handle is stale.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let slot = self.slots.get_mut(id.slot() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    /// Remove and return the value behind `id`, invalidating every copy of the handle.
    pub fn deallocate(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.slot() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        slot.next_free = self.free_head;
        self.free_head = Some(id.slot());
        self.len -= 1;
        Some(value)
    }

    /// True when `id` refers to a live value.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live values.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Drop every value and invalidate every handle.
    pub fn clear(&mut self) {
        let total = self.slots.len();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.next_free = (index + 1 < total).then_some((index + 1) as u32);
        }
        self.free_head = (total > 0).then_some(0);
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// # Panics
    /// Panics if a freed handle still resolves after its slot is reused.
    fn stale_handle_does_not_resolve() {
        let mut arena = Arena::new();
        let first = arena.allocate("first");
        assert_eq!(arena.deallocate(first), Some("first"));
        let second = arena.allocate("second");
        assert_eq!(second.slot(), first.slot());
        assert_ne!(second.generation(), first.generation());
        assert_eq!(arena.get(first), None);
        assert_eq!(arena.get(second), Some(&"second"));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    /// # Panics
    /// Panics if clearing leaves handles alive or breaks slot reuse.
    fn clear_invalidates_everything() {
        let mut arena = Arena::with_capacity(4);
        let ids: Vec<NodeId> = (0..3).map(|value| arena.allocate(value)).collect();
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert!(ids.iter().all(|id| !arena.contains(*id)));
        let reused = arena.allocate(9);
        assert_eq!(reused.slot(), 0);
        assert_eq!(arena.get(reused), Some(&9));
        assert_eq!(arena.deallocate(ids.first().copied().unwrap_or(reused)), None);
    }
}

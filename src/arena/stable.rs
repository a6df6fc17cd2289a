use crate::arena::{arena_full, Arena, Removed};

/// A non-relocating arena.
///
/// An index handed out by [`insert`](Arena::insert) keeps its element until
/// that element is removed; removals push the index back onto a free stack
/// and never move other elements. There is deliberately no iteration.
pub struct StableArena<T> {
    slots: Box<[Option<T>]>,
    free: Vec<u32>,
}

impl<T> StableArena<T> {
    /// Returns `true` if an element lives at `index`.
    #[inline]
    pub fn is_occupied(&self, index: u32) -> bool {
        self.slots
            .get(index as usize)
            .map_or(false, |slot| slot.is_some())
    }

    /// Rebuilds the free stack so that index 0 is handed out first.
    fn reset_free(&mut self) {
        self.free.clear();
        self.free.extend((0..self.slots.len() as u32).rev());
    }
}

impl<T: 'static> Arena<T> for StableArena<T> {
    fn with_capacity(capacity: usize) -> Self {
        let mut arena = StableArena {
            slots: (0..capacity).map(|_| None).collect(),
            free: Vec::with_capacity(capacity),
        };
        arena.reset_free();
        arena
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn insert(&mut self, value: T, _bucket: usize) -> u32 {
        let Some(index) = self.free.pop() else {
            arena_full::<T>(self.slots.len());
        };
        self.slots[index as usize] = Some(value);
        index
    }

    #[inline]
    fn get(&self, index: u32) -> Option<&T> {
        self.slots.get(index as usize)?.as_ref()
    }

    #[inline]
    fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.slots.get_mut(index as usize)?.as_mut()
    }

    fn remove(&mut self, index: u32) -> Option<Removed<T>> {
        let value = self.slots.get_mut(index as usize)?.take()?;
        self.free.push(index);
        Some(Removed {
            value,
            relocated: None,
        })
    }

    fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.reset_free();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_handed_out_lowest_first() {
        let mut arena = StableArena::with_capacity(3);
        assert_eq!(arena.insert('a', 0), 0);
        assert_eq!(arena.insert('b', 0), 1);
        assert_eq!(arena.insert('c', 0), 2);
        assert!(arena.is_full());
    }

    #[test]
    fn removal_reuses_the_freed_index_without_moving_others() {
        let mut arena = StableArena::with_capacity(3);
        let a = arena.insert(String::from("a"), 0);
        let b = arena.insert(String::from("b"), 0);
        let c = arena.insert(String::from("c"), 0);
        let c_ptr = arena.get(c).unwrap() as *const String;

        let removed = arena.remove(b).unwrap();
        assert_eq!(removed.value, "b");
        assert!(removed.relocated.is_none());
        assert!(!arena.is_occupied(b));

        let d = arena.insert(String::from("d"), 0);
        assert_eq!(d, b);
        assert_eq!(arena.get(a).unwrap(), "a");
        assert_eq!(arena.get(c).unwrap() as *const String, c_ptr);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn removing_a_vacant_index() {
        let mut arena = StableArena::<u8>::with_capacity(2);
        assert!(arena.remove(0).is_none());
        assert!(arena.remove(7).is_none());
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn clear_restores_every_index() {
        let mut arena = StableArena::with_capacity(2);
        arena.insert(1, 0);
        arena.insert(2, 0);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.insert(3, 0), 0);
    }

    #[test]
    #[should_panic(expected = "capacity exceeded")]
    fn inserting_past_capacity_is_fatal() {
        let mut arena = StableArena::with_capacity(1);
        arena.insert(1u8, 0);
        arena.insert(2u8, 0);
    }
}

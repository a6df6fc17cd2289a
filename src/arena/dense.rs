use crate::arena::{arena_full, Arena, Relocation, Removed};

/// A relocating arena.
///
/// Live elements occupy `[0, len)` without gaps. Each index also stores a
/// back-pointer to the bucket referencing it; removing anything but the last
/// element moves the last one into the hole and reports its bucket so the
/// owner can re-point it.
pub struct DenseArena<T> {
    items: Vec<T>,
    buckets: Vec<usize>,
    capacity: usize,
}

impl<T> DenseArena<T> {
    /// Returns the live elements in dense order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Returns the bucket referencing the element at `index`.
    #[inline]
    pub fn bucket_of(&self, index: u32) -> Option<usize> {
        self.buckets.get(index as usize).copied()
    }

    /// Iterates over `(bucket, element)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.buckets.iter().copied().zip(self.items.iter())
    }
}

impl<T: 'static> Arena<T> for DenseArena<T> {
    fn with_capacity(capacity: usize) -> Self {
        DenseArena {
            items: Vec::with_capacity(capacity),
            buckets: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    fn insert(&mut self, value: T, bucket: usize) -> u32 {
        if self.items.len() == self.capacity {
            arena_full::<T>(self.capacity);
        }
        let index = self.items.len() as u32;
        self.items.push(value);
        self.buckets.push(bucket);
        index
    }

    #[inline]
    fn get(&self, index: u32) -> Option<&T> {
        self.items.get(index as usize)
    }

    #[inline]
    fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.items.get_mut(index as usize)
    }

    fn remove(&mut self, index: u32) -> Option<Removed<T>> {
        let position = index as usize;
        if position >= self.items.len() {
            return None;
        }

        let last = self.items.len() - 1;
        let value = self.items.swap_remove(position);
        self.buckets.swap_remove(position);

        let relocated = (position != last).then(|| Relocation {
            bucket: self.buckets[position],
            index,
        });

        Some(Removed { value, relocated })
    }

    fn clear(&mut self) {
        self.items.clear();
        self.buckets.clear();
    }
}

pub mod dense;
pub mod stable;

pub use dense::DenseArena;
pub use stable::StableArena;

use crate::error::{fatal, CollectionError};

/// Fixed-capacity storage for one component type.
///
/// Elements are addressed by dense index. Inserting records the bucket that
/// references the element so relocating arenas can report who must be
/// re-pointed after a swap-removal.
pub trait Arena<T> {
    /// Creates an empty arena. All memory is reserved here; the arena never
    /// grows afterwards.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    fn capacity(&self) -> usize;

    /// Returns the number of live elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Stores `value` on behalf of `bucket` and returns its index.
    /// Panics if the arena is full.
    fn insert(&mut self, value: T, bucket: usize) -> u32;

    fn get(&self, index: u32) -> Option<&T>;

    fn get_mut(&mut self, index: u32) -> Option<&mut T>;

    /// Removes the element at `index`. Returns `None` if nothing lives there.
    fn remove(&mut self, index: u32) -> Option<Removed<T>>;

    /// Drops every element.
    fn clear(&mut self);
}

/// Selects which arena implementation a collection stores components in.
pub trait ArenaKind: 'static {
    type Arena<T: 'static>: Arena<T>;
}

/// Relocating arenas: contiguous, iterable, swap-removal.
pub enum Dense {}

/// Non-relocating arenas: indices and addresses never move.
pub enum Stable {}

impl ArenaKind for Dense {
    type Arena<T: 'static> = DenseArena<T>;
}

impl ArenaKind for Stable {
    type Arena<T: 'static> = StableArena<T>;
}

/// The outcome of [`Arena::remove`].
pub struct Removed<T> {
    /// The element taken out of the arena.
    pub value: T,
    /// Set when another element moved to fill the vacated index.
    pub relocated: Option<Relocation>,
}

impl<T> Removed<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Removed<U> {
        Removed {
            value: f(self.value),
            relocated: self.relocated,
        }
    }
}

/// A bucket whose slot must now reference `index`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Relocation {
    pub bucket: usize,
    pub index: u32,
}

/// Panics with `CapacityExceeded` for a full arena of `T`.
#[cold]
#[inline(never)]
pub(crate) fn arena_full<T>(capacity: usize) -> ! {
    fatal(CollectionError::CapacityExceeded {
        storage: std::any::type_name::<T>(),
        capacity,
    })
}

/// Unwraps an arena lookup that an occupied slot guarantees to succeed.
#[inline]
pub(crate) fn live<T, V>(value: Option<V>, index: u32) -> V {
    match value {
        Some(value) => value,
        None => fatal(CollectionError::InvalidHandle {
            component: std::any::type_name::<T>(),
            index,
        }),
    }
}

use crate::arena::{arena_full, live, Arena, Dense, Relocation};
use crate::component::{Component, ComponentSet, Handle, Tag};
use crate::error::{fatal, CollectionError, LayoutError};
use crate::hash::{KeyHasher, SquareHasher};
use crate::key::Key;
use crate::layout::CollectionLayout;
use crate::slot_table::SlotTable;
use std::any::type_name;
use std::fmt;

/// The set of component types a key holds, one bit per tag.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TypeMask(u64);

impl TypeMask {
    /// The largest number of component types a mask can track.
    pub const CAPACITY: usize = u64::BITS as usize;

    pub const EMPTY: TypeMask = TypeMask(0);

    #[inline]
    pub fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn contains(self, tag: Tag) -> bool {
        self.0 & (1 << tag) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of types in the mask.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns the smallest tag in the mask.
    #[inline]
    pub fn lowest(self) -> Option<Tag> {
        (!self.is_empty()).then(|| self.0.trailing_zeros() as Tag)
    }

    #[inline]
    fn insert(&mut self, tag: Tag) {
        self.0 |= 1 << tag;
    }

    #[inline]
    fn remove(&mut self, tag: Tag) {
        self.0 &= !(1 << tag);
    }

    /// Iterates over the tags in ascending order.
    pub fn iter(self) -> TypeMaskIter {
        TypeMaskIter(self.0)
    }
}

impl fmt::Debug for TypeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl IntoIterator for TypeMask {
    type Item = Tag;
    type IntoIter = TypeMaskIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Copy, Clone)]
pub struct TypeMaskIter(u64);

impl Iterator for TypeMaskIter {
    type Item = Tag;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let tag = self.0.trailing_zeros() as Tag;
        self.0 &= self.0 - 1;
        Some(tag)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

/// A fixed-capacity map from keys to at most one component of each type of
/// the set `S`.
///
/// Every bucket holds a [`TypeMask`] of the present types and, per type, the
/// dense index into that type's arena. Sets of more than
/// [`TypeMask::CAPACITY`] types are rejected when the collection is built.
///
/// # Examples
/// ```
/// use typed_collection::{CollectionLayout, ComponentSet, MultiCollection};
///
/// #[derive(ComponentSet)]
/// enum Motion {
///     Position([f32; 2]),
///     Velocity(f32),
/// }
///
/// let layout = CollectionLayout::<Motion>::new(64).with_all(8);
/// let mut bodies: MultiCollection<Motion> = MultiCollection::new(&layout);
///
/// bodies.emplace(3, [0.0f32, 1.0]);
/// bodies.emplace(3, 2.5f32);
///
/// let mut visited = 0;
/// bodies.call_all(3, |component| {
///     visited += 1;
///     if let MotionMut::Velocity(v) = component {
///         *v *= 2.0;
///     }
/// });
///
/// assert_eq!(visited, 2);
/// assert_eq!(*bodies.get::<f32>(3), 5.0);
/// ```
pub struct MultiCollection<S, K = u32, H = SquareHasher>
where
    S: ComponentSet,
    K: Key,
    H: KeyHasher,
{
    table: SlotTable<K, TypeMask, H>,
    /// `S::COUNT` dense indices per bucket, valid where the mask bit is set.
    indices: Box<[u32]>,
    arenas: S::Arenas<Dense>,
}

impl<S, K, H> MultiCollection<S, K, H>
where
    S: ComponentSet,
    K: Key,
    H: KeyHasher,
{
    /// Creates an empty collection. Panics if `layout` is invalid.
    pub fn new(layout: &CollectionLayout<S>) -> Self
    where
        H: Default,
    {
        Self::with_hasher(layout, H::default())
    }

    /// Creates an empty collection hashing keys with `hasher`.
    /// Panics if `layout` is invalid.
    pub fn with_hasher(layout: &CollectionLayout<S>, hasher: H) -> Self {
        match Self::try_with_hasher(layout, hasher) {
            Ok(collection) => collection,
            Err(err) => panic!("invalid collection layout: {}", err),
        }
    }

    pub fn try_new(layout: &CollectionLayout<S>) -> Result<Self, LayoutError>
    where
        H: Default,
    {
        Self::try_with_hasher(layout, H::default())
    }

    pub fn try_with_hasher(layout: &CollectionLayout<S>, hasher: H) -> Result<Self, LayoutError> {
        layout.validate(TypeMask::CAPACITY)?;

        tracing::debug!(
            set = type_name::<S>(),
            buckets = layout.buckets(),
            probe_limit = layout.probe_limit(),
            types = S::COUNT,
            "creating multi-collection"
        );

        Ok(MultiCollection {
            table: SlotTable::new(layout.buckets(), layout.probe_limit(), hasher),
            indices: vec![0; layout.buckets() * S::COUNT].into_boxed_slice(),
            arenas: S::new_arenas::<Dense>(layout.capacities()),
        })
    }

    #[inline]
    fn index_slot(bucket: usize, tag: Tag) -> usize {
        bucket * S::COUNT + tag as usize
    }

    /// Returns the number of keys holding at least one component.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    /// Returns the effective probe limit, never more than the bucket count.
    pub fn probe_limit(&self) -> usize {
        self.table.probe_limit()
    }

    /// Returns `true` if `key` holds any component.
    pub fn contains(&self, key: K) -> bool {
        self.table.try_find(key).is_some()
    }

    /// Returns `true` if `key` holds a component of type `C`.
    pub fn contains_type<C: Component<S>>(&self, key: K) -> bool {
        self.types(key).contains(C::TAG)
    }

    /// Returns the types `key` holds, empty if `key` is absent.
    pub fn types(&self, key: K) -> TypeMask {
        self.table
            .try_find(key)
            .map_or(TypeMask::EMPTY, |bucket| *self.table.slot(bucket))
    }

    /// Returns the dense index of `key`'s `C`. Panics if there is none.
    fn index_of<C: Component<S>>(&self, key: K) -> u32 {
        let bucket = self.table.find(key);
        if !self.table.slot(bucket).contains(C::TAG) {
            fatal(CollectionError::ComponentMissing {
                key: key.to_bits(),
                component: type_name::<C>(),
            });
        }
        self.indices[Self::index_slot(bucket, C::TAG)]
    }

    fn try_index_of<C: Component<S>>(&self, key: K) -> Option<u32> {
        let bucket = self.table.try_find(key)?;
        self.table
            .slot(bucket)
            .contains(C::TAG)
            .then(|| self.indices[Self::index_slot(bucket, C::TAG)])
    }

    /// Returns `key`'s `C`. Panics if `key` or its `C` is absent.
    pub fn get<C: Component<S>>(&self, key: K) -> &C {
        let index = self.index_of::<C>(key);
        live::<C, _>(C::arena::<Dense>(&self.arenas).get(index), index)
    }

    pub fn get_mut<C: Component<S>>(&mut self, key: K) -> &mut C {
        let index = self.index_of::<C>(key);
        live::<C, _>(C::arena_mut::<Dense>(&mut self.arenas).get_mut(index), index)
    }

    pub fn try_get<C: Component<S>>(&self, key: K) -> Option<&C> {
        let index = self.try_index_of::<C>(key)?;
        C::arena::<Dense>(&self.arenas).get(index)
    }

    pub fn try_get_mut<C: Component<S>>(&mut self, key: K) -> Option<&mut C> {
        let index = self.try_index_of::<C>(key)?;
        C::arena_mut::<Dense>(&mut self.arenas).get_mut(index)
    }

    /// Stores `value` as `key`'s `C` and returns it. `key` may already hold
    /// components of other types.
    /// Panics if `key` already holds a `C` or `C`'s arena is full.
    pub fn emplace<C: Component<S>>(&mut self, key: K, value: C) -> &mut C {
        let existing = self.vacant_bucket(key, C::TAG);

        let arena = C::arena_mut::<Dense>(&mut self.arenas);
        if arena.is_full() {
            arena_full::<C>(arena.capacity());
        }

        let bucket = match existing {
            Some(bucket) => bucket,
            None => self.table.place(key, TypeMask::EMPTY),
        };
        let index = arena.insert(value, bucket);
        self.table.slot_mut(bucket).insert(C::TAG);
        self.indices[Self::index_slot(bucket, C::TAG)] = index;

        live::<C, _>(arena.get_mut(index), index)
    }

    /// Stores any component of the set under `key`.
    /// Panics if `key` already holds a component of that type or the arena
    /// is full.
    pub fn add(&mut self, key: K, value: impl Into<S>) {
        let value = value.into();
        let tag = value.tag();
        let existing = self.vacant_bucket(key, tag);

        let (len, capacity) = S::occupancy::<Dense>(&self.arenas, tag);
        if len == capacity {
            fatal(CollectionError::CapacityExceeded {
                storage: S::type_name(tag),
                capacity,
            });
        }

        let bucket = match existing {
            Some(bucket) => bucket,
            None => self.table.place(key, TypeMask::EMPTY),
        };
        let index = value.insert_into::<Dense>(&mut self.arenas, bucket);
        self.table.slot_mut(bucket).insert(tag);
        self.indices[Self::index_slot(bucket, tag)] = index;
    }

    /// Returns `key`'s bucket if it exists. Panics if it already holds `tag`.
    fn vacant_bucket(&self, key: K, tag: Tag) -> Option<usize> {
        let bucket = self.table.try_find(key)?;
        if self.table.slot(bucket).contains(tag) {
            fatal(CollectionError::ComponentExists {
                key: key.to_bits(),
                component: S::type_name(tag),
            });
        }
        Some(bucket)
    }

    /// Assigns `value` to `key`'s `C`. Panics if `key` or its `C` is absent.
    pub fn update<C: Component<S>>(&mut self, key: K, value: impl Into<C>) {
        *self.get_mut::<C>(key) = value.into();
    }

    /// Removes and returns `key`'s `C`, leaving its other components.
    /// Panics if `key` or its `C` is absent.
    pub fn remove_type<C: Component<S>>(&mut self, key: K) -> C {
        let index = self.index_of::<C>(key);
        let bucket = self.table.find(key);

        let removed = live::<C, _>(C::arena_mut::<Dense>(&mut self.arenas).remove(index), index);
        self.detach(bucket, C::TAG, removed.relocated);
        removed.value
    }

    pub fn try_remove_type<C: Component<S>>(&mut self, key: K) -> Option<C> {
        self.try_index_of::<C>(key)?;
        Some(self.remove_type::<C>(key))
    }

    /// Removes every component of `key` and returns the types it held.
    /// Panics if `key` is absent.
    pub fn remove(&mut self, key: K) -> TypeMask {
        let bucket = self.table.find(key);
        self.remove_bucket(bucket)
    }

    /// Removes every component of `key`, if any, and returns the types it held.
    pub fn try_remove(&mut self, key: K) -> TypeMask {
        match self.table.try_find(key) {
            Some(bucket) => self.remove_bucket(bucket),
            None => TypeMask::EMPTY,
        }
    }

    fn remove_bucket(&mut self, bucket: usize) -> TypeMask {
        let mask = *self.table.slot(bucket);

        for tag in mask {
            let index = self.indices[Self::index_slot(bucket, tag)];
            let Some(removed) = S::remove_from::<Dense>(&mut self.arenas, tag, index) else {
                dangling::<S>(tag, index);
            };
            self.detach(bucket, tag, removed.relocated);
        }

        mask
    }

    /// Drops `tag` from `bucket`, re-pointing a relocated component and
    /// freeing the bucket once it holds nothing.
    fn detach(&mut self, bucket: usize, tag: Tag, relocated: Option<Relocation>) {
        if let Some(relocation) = relocated {
            tracing::trace!(
                component = S::type_name(tag),
                from_bucket = relocation.bucket,
                to_index = relocation.index,
                "relocated component"
            );
            self.indices[Self::index_slot(relocation.bucket, tag)] = relocation.index;
        }

        let mask = self.table.slot_mut(bucket);
        mask.remove(tag);
        if mask.is_empty() {
            self.table.clear(bucket);
        }
    }

    fn component_mut(&mut self, bucket: usize, tag: Tag) -> S::Mut<'_> {
        let index = self.indices[Self::index_slot(bucket, tag)];
        match S::get_mut::<Dense>(&mut self.arenas, tag, index) {
            Some(component) => component,
            None => dangling::<S>(tag, index),
        }
    }

    /// Hands `key`'s component with the lowest tag to `f`.
    /// Panics if `key` is absent.
    pub fn call<R>(&mut self, key: K, f: impl FnOnce(S::Mut<'_>) -> R) -> R {
        let bucket = self.table.find(key);
        let Some(tag) = self.table.slot(bucket).lowest() else {
            fatal(CollectionError::KeyNotFound { key: key.to_bits() });
        };
        f(self.component_mut(bucket, tag))
    }

    /// Hands `key`'s component with the lowest tag to `f`, or `None` if `key`
    /// is absent.
    pub fn try_call<R>(&mut self, key: K, f: impl FnOnce(Option<S::Mut<'_>>) -> R) -> R {
        let found = self
            .table
            .try_find(key)
            .and_then(|bucket| Some((bucket, self.table.slot(bucket).lowest()?)));

        match found {
            Some((bucket, tag)) => f(Some(self.component_mut(bucket, tag))),
            None => f(None),
        }
    }

    /// Hands `key`'s `C` to `f`. Panics if `key` or its `C` is absent.
    pub fn call_as<C: Component<S>, R>(&mut self, key: K, f: impl FnOnce(&mut C) -> R) -> R {
        f(self.get_mut::<C>(key))
    }

    /// Hands `key`'s `C` to `f`, or `None` if `key` or its `C` is absent.
    pub fn try_call_as<C: Component<S>, R>(
        &mut self,
        key: K,
        f: impl FnOnce(Option<&mut C>) -> R,
    ) -> R {
        f(self.try_get_mut::<C>(key))
    }

    /// Hands each of `key`'s components to `f` in ascending tag order.
    /// Panics if `key` is absent.
    pub fn call_all(&mut self, key: K, mut f: impl FnMut(S::Mut<'_>)) {
        let bucket = self.table.find(key);
        for tag in *self.table.slot(bucket) {
            f(self.component_mut(bucket, tag));
        }
    }

    /// Hands each of `key`'s components to `f` in ascending tag order, or
    /// calls `f(None)` once if `key` is absent.
    pub fn try_call_all(&mut self, key: K, mut f: impl FnMut(Option<S::Mut<'_>>)) {
        let Some(bucket) = self.table.try_find(key) else {
            f(None);
            return;
        };
        for tag in *self.table.slot(bucket) {
            f(Some(self.component_mut(bucket, tag)));
        }
    }

    /// Returns a handle to `key`'s `C`. Panics if `key` or its `C` is absent.
    pub fn handle<C: Component<S>>(&self, key: K) -> Handle<C> {
        Handle::new(self.index_of::<C>(key))
    }

    pub fn try_handle<C: Component<S>>(&self, key: K) -> Option<Handle<C>> {
        Some(Handle::new(self.try_index_of::<C>(key)?))
    }

    pub fn get_by_handle<C: Component<S>>(&self, handle: Handle<C>) -> &C {
        live::<C, _>(
            C::arena::<Dense>(&self.arenas).get(handle.index()),
            handle.index(),
        )
    }

    pub fn get_by_handle_mut<C: Component<S>>(&mut self, handle: Handle<C>) -> &mut C {
        live::<C, _>(
            C::arena_mut::<Dense>(&mut self.arenas).get_mut(handle.index()),
            handle.index(),
        )
    }

    /// Returns the key owning the component behind `handle`.
    /// Panics if `handle` names no live component.
    pub fn get_key<C: Component<S>>(&self, handle: Handle<C>) -> K {
        let bucket = C::arena::<Dense>(&self.arenas).bucket_of(handle.index());
        live::<C, _>(bucket.and_then(|bucket| self.table.key(bucket)), handle.index())
    }

    /// Returns the number of stored `C` components.
    pub fn count<C: Component<S>>(&self) -> usize {
        C::arena::<Dense>(&self.arenas).len()
    }

    /// Returns every stored `C` in dense order.
    pub fn components<C: Component<S>>(&self) -> &[C] {
        C::arena::<Dense>(&self.arenas).as_slice()
    }

    pub fn components_mut<C: Component<S>>(&mut self) -> &mut [C] {
        C::arena_mut::<Dense>(&mut self.arenas).as_mut_slice()
    }

    /// Iterates over every stored `C` with its key, in dense order.
    pub fn iter<C: Component<S>>(&self) -> impl Iterator<Item = (K, &C)> + '_ {
        C::arena::<Dense>(&self.arenas)
            .iter()
            .filter_map(move |(bucket, component)| Some((self.table.key(bucket)?, component)))
    }

    /// Iterates over every key with the types it holds, in bucket order.
    pub fn keys(&self) -> impl Iterator<Item = (K, TypeMask)> + '_ {
        self.table.iter().map(|(_, key, mask)| (key, *mask))
    }

    #[cfg(feature = "rayon")]
    pub fn par_components<C: Component<S> + Sync>(&self) -> rayon::slice::Iter<'_, C> {
        use rayon::prelude::*;
        self.components::<C>().par_iter()
    }

    /// Removes every component.
    pub fn clear(&mut self) {
        S::clear::<Dense>(&mut self.arenas);
        self.table.clear_all();
    }
}

#[cold]
#[inline(never)]
fn dangling<S: ComponentSet>(tag: Tag, index: u32) -> ! {
    fatal(CollectionError::InvalidHandle {
        component: S::type_name(tag),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::TypeMask;
    use crate::{CollectionLayout, ComponentSet, LayoutError, MultiCollection};

    #[derive(Debug, Clone, PartialEq)]
    struct Sprite(&'static str);

    #[derive(Debug, Clone, PartialEq)]
    struct Speed(f32);

    #[derive(Debug, Clone, PartialEq)]
    struct Solid;

    #[derive(ComponentSet)]
    enum Actor {
        Sprite(Sprite),
        Speed(Speed),
        Solid(Solid),
    }

    fn actors() -> MultiCollection<Actor> {
        MultiCollection::new(&CollectionLayout::<Actor>::new(64).with_all(4))
    }

    #[test]
    fn type_mask_iterates_ascending() {
        let mut mask = TypeMask::EMPTY;
        mask.insert(5);
        mask.insert(0);
        mask.insert(63);
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![0, 5, 63]);
        assert_eq!(mask.lowest(), Some(0));
        assert_eq!(mask.len(), 3);

        mask.remove(0);
        assert_eq!(mask.lowest(), Some(5));
        assert!(!mask.contains(0));
        assert_eq!(format!("{:?}", mask), "{5, 63}");
    }

    #[test]
    fn one_of_each_type_per_key() {
        let mut actors = actors();
        actors.emplace(1, Sprite("hero"));
        actors.emplace(1, Speed(1.5));

        assert_eq!(actors.len(), 1);
        assert!(actors.contains_type::<Sprite>(1));
        assert!(actors.contains_type::<Speed>(1));
        assert!(!actors.contains_type::<Solid>(1));
        assert_eq!(actors.types(1).len(), 2);

        assert_eq!(actors.remove_type::<Sprite>(1), Sprite("hero"));
        assert!(!actors.contains_type::<Sprite>(1));
        assert!(actors.contains_type::<Speed>(1));
        assert!(actors.contains(1));

        actors.remove_type::<Speed>(1);
        assert!(!actors.contains(1));
        assert!(actors.is_empty());
    }

    #[test]
    fn remove_drops_every_type() {
        let mut actors = actors();
        actors.emplace(2, Sprite("crate"));
        actors.add(2, Solid);
        actors.emplace(3, Solid);

        let removed = actors.remove(2);
        assert_eq!(removed.iter().collect::<Vec<_>>(), vec![0, 2]);
        assert!(!actors.contains(2));
        assert!(actors.contains_type::<Solid>(3));
        assert_eq!(actors.count::<Solid>(), 1);
        assert!(actors.try_remove(2).is_empty());
    }

    #[test]
    fn relocations_are_tracked_per_type() {
        let mut actors = actors();
        actors.emplace(1, Speed(1.0));
        actors.emplace(2, Speed(2.0));
        actors.emplace(3, Speed(3.0));
        actors.emplace(3, Sprite("three"));

        actors.remove_type::<Speed>(1);

        let handle = actors.handle::<Speed>(3);
        assert_eq!(handle.index(), 0);
        assert_eq!(actors.get_key(handle), 3);
        assert_eq!(actors.get::<Speed>(3), &Speed(3.0));
        assert_eq!(actors.get::<Speed>(2), &Speed(2.0));
        assert_eq!(actors.get::<Sprite>(3), &Sprite("three"));
    }

    #[test]
    fn call_picks_the_lowest_tag() {
        let mut actors = actors();
        actors.emplace(1, Solid);
        actors.emplace(1, Speed(2.0));

        let first = actors.call(1, |actor| match actor {
            ActorMut::Sprite(_) => "sprite",
            ActorMut::Speed(_) => "speed",
            ActorMut::Solid(_) => "solid",
        });
        assert_eq!(first, "speed");
    }

    #[test]
    fn call_all_visits_in_tag_order() {
        let mut actors = actors();
        actors.emplace(1, Solid);
        actors.emplace(1, Sprite("a"));
        actors.emplace(1, Speed(2.0));

        let mut order = Vec::new();
        actors.call_all(1, |actor| {
            order.push(match actor {
                ActorMut::Sprite(_) => 0,
                ActorMut::Speed(speed) => {
                    speed.0 = 4.0;
                    1
                }
                ActorMut::Solid(_) => 2,
            })
        });

        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(actors.get::<Speed>(1), &Speed(4.0));
    }

    #[test]
    fn try_variants_tolerate_missing_components() {
        let mut actors = actors();
        actors.emplace(1, Sprite("a"));

        assert!(actors.try_call(9, |actor| actor.is_none()));
        assert!(actors.try_call_as::<Speed, _>(1, |speed| speed.is_none()));
        assert!(actors.try_call_as::<Sprite, _>(1, |sprite| sprite.is_some()));
        assert_eq!(actors.try_get::<Speed>(1), None);
        assert_eq!(actors.try_remove_type::<Speed>(1), None);

        let mut calls = Vec::new();
        actors.try_call_all(9, |actor| calls.push(actor.is_some()));
        actors.try_call_all(1, |actor| calls.push(actor.is_some()));
        assert_eq!(calls, vec![false, true]);
    }

    #[test]
    fn call_as_and_update() {
        let mut actors = actors();
        actors.emplace(1, Speed(1.0));
        actors.call_as::<Speed, _>(1, |speed| speed.0 += 1.0);
        assert_eq!(actors.get::<Speed>(1), &Speed(2.0));

        actors.update::<Speed>(1, Speed(7.0));
        assert_eq!(actors.get::<Speed>(1), &Speed(7.0));
    }

    #[test]
    fn keys_report_their_types() {
        let mut actors = actors();
        actors.emplace(4, Solid);
        actors.emplace(4, Sprite("x"));

        let keys: Vec<_> = actors.keys().collect();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].0, 4);
        assert_eq!(keys[0].1.iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn more_than_64_types_are_rejected() {
        assert_eq!(TypeMask::CAPACITY, 64);
        let layout = CollectionLayout::<Actor>::new(8).with_all(1);
        assert!(layout.validate(TypeMask::CAPACITY).is_ok());
        assert!(matches!(
            layout.validate(2),
            Err(LayoutError::TooManyTypes { count: 3, max: 2 })
        ));
    }

    #[test]
    #[should_panic(expected = "already holds")]
    fn duplicate_type_is_fatal() {
        let mut actors = actors();
        actors.emplace(1, Solid);
        actors.emplace(1, Solid);
    }

    #[test]
    #[should_panic(expected = "has no")]
    fn getting_an_absent_type_is_fatal() {
        let mut actors = actors();
        actors.emplace(1, Solid);
        actors.get::<Speed>(1);
    }

    #[test]
    #[should_panic(expected = "capacity exceeded")]
    fn arena_capacity_is_enforced() {
        let mut actors = actors();
        for key in 0..5 {
            actors.emplace(key, Solid);
        }
    }
}

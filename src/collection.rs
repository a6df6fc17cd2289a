use crate::arena::{live, Arena, ArenaKind, Dense};
use crate::component::{Component, ComponentSet, Handle, Tag};
use crate::error::{fatal, CollectionError, LayoutError};
use crate::hash::{KeyHasher, SquareHasher};
use crate::key::Key;
use crate::layout::CollectionLayout;
use crate::slot_table::SlotTable;
use std::any::type_name;

/// What a bucket of a single-component collection points at.
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct Slot {
    pub tag: Tag,
    pub index: u32,
}

/// A fixed-capacity map from keys to exactly one component each, the
/// component being any type of the set `S`.
///
/// Components of the same type are stored contiguously. Removing one moves
/// the last component of that type into the hole, so references and
/// [`Handle`]s are only valid until the next mutation of that type. See
/// [`UnorderedCollection`](crate::UnorderedCollection) for stable storage.
///
/// # Examples
/// ```
/// use typed_collection::{Collection, CollectionLayout, ComponentSet};
///
/// struct Label(String);
/// struct Slider { value: f32 }
///
/// #[derive(ComponentSet)]
/// enum Widget {
///     Label(Label),
///     Slider(Slider),
/// }
///
/// let layout = CollectionLayout::<Widget>::new(64).with_all(16);
/// let mut widgets: Collection<Widget> = Collection::new(&layout);
///
/// widgets.emplace(1, Label("volume".to_string()));
/// widgets.add(2, Slider { value: 0.5 });
///
/// widgets.get_mut::<Slider>(2).value = 0.75;
///
/// let described = widgets.call(1, |widget| match widget {
///     WidgetMut::Label(label) => label.0.clone(),
///     WidgetMut::Slider(slider) => format!("{}", slider.value),
/// });
/// assert_eq!(described, "volume");
/// ```
pub struct Collection<S, K = u32, H = SquareHasher, A = Dense>
where
    S: ComponentSet,
    K: Key,
    H: KeyHasher,
    A: ArenaKind,
{
    table: SlotTable<K, Slot, H>,
    arenas: S::Arenas<A>,
}

impl<S, K, H, A> Collection<S, K, H, A>
where
    S: ComponentSet,
    K: Key,
    H: KeyHasher,
    A: ArenaKind,
{
    /// At most this many component types fit a [`Tag`].
    pub const MAX_TYPES: usize = Tag::MAX as usize + 1;

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

    /// Creates an empty collection, or returns why `layout` is invalid.
    pub fn try_new(layout: &CollectionLayout<S>) -> Result<Self, LayoutError>
    where
        H: Default,
    {
        Self::try_with_hasher(layout, H::default())
    }

    pub fn try_with_hasher(layout: &CollectionLayout<S>, hasher: H) -> Result<Self, LayoutError> {
        layout.validate(Self::MAX_TYPES)?;

        tracing::debug!(
            set = type_name::<S>(),
            buckets = layout.buckets(),
            probe_limit = layout.probe_limit(),
            types = S::COUNT,
            "creating collection"
        );

        Ok(Collection {
            table: SlotTable::new(layout.buckets(), layout.probe_limit(), hasher),
            arenas: S::new_arenas::<A>(layout.capacities()),
        })
    }

    /// Returns the number of keys holding a component.
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

    /// Returns `true` if `key` holds a component.
    pub fn contains(&self, key: K) -> bool {
        self.table.try_find(key).is_some()
    }

    /// Returns `true` if `key` holds a component of type `C`.
    pub fn contains_type<C: Component<S>>(&self, key: K) -> bool {
        self.tag_of(key) == Some(C::TAG)
    }

    /// Returns the tag of the component stored under `key`.
    pub fn tag_of(&self, key: K) -> Option<Tag> {
        let bucket = self.table.try_find(key)?;
        Some(self.table.slot(bucket).tag)
    }

    /// Finds `key`'s slot and checks it holds a `C`.
    fn slot_of<C: Component<S>>(&self, key: K) -> Slot {
        let slot = *self.table.slot(self.table.find(key));
        if slot.tag != C::TAG {
            fatal(CollectionError::TypeMismatch {
                key: key.to_bits(),
                requested: type_name::<C>(),
                stored: S::type_name(slot.tag),
            });
        }
        slot
    }

    fn try_slot_of<C: Component<S>>(&self, key: K) -> Option<Slot> {
        let slot = *self.table.slot(self.table.try_find(key)?);
        (slot.tag == C::TAG).then_some(slot)
    }

    /// Returns the `C` stored under `key`.
    /// Panics if `key` is absent or holds another type.
    pub fn get<C: Component<S>>(&self, key: K) -> &C {
        let slot = self.slot_of::<C>(key);
        live::<C, _>(C::arena::<A>(&self.arenas).get(slot.index), slot.index)
    }

    /// Returns the `C` stored under `key` mutably.
    /// Panics if `key` is absent or holds another type.
    pub fn get_mut<C: Component<S>>(&mut self, key: K) -> &mut C {
        let slot = self.slot_of::<C>(key);
        live::<C, _>(C::arena_mut::<A>(&mut self.arenas).get_mut(slot.index), slot.index)
    }

    /// Returns the `C` stored under `key`, `None` if `key` is absent or holds
    /// another type.
    pub fn try_get<C: Component<S>>(&self, key: K) -> Option<&C> {
        let slot = self.try_slot_of::<C>(key)?;
        C::arena::<A>(&self.arenas).get(slot.index)
    }

    pub fn try_get_mut<C: Component<S>>(&mut self, key: K) -> Option<&mut C> {
        let slot = self.try_slot_of::<C>(key)?;
        C::arena_mut::<A>(&mut self.arenas).get_mut(slot.index)
    }

    /// Returns whichever component `key` holds. Panics if `key` is absent.
    pub fn get_any(&self, key: K) -> S::Ref<'_> {
        let slot = *self.table.slot(self.table.find(key));
        match S::get_ref::<A>(&self.arenas, slot.tag, slot.index) {
            Some(component) => component,
            None => dangling_slot::<S>(slot),
        }
    }

    /// Returns whichever component `key` holds mutably.
    /// Panics if `key` is absent.
    pub fn get_any_mut(&mut self, key: K) -> S::Mut<'_> {
        let slot = *self.table.slot(self.table.find(key));
        match S::get_mut::<A>(&mut self.arenas, slot.tag, slot.index) {
            Some(component) => component,
            None => dangling_slot::<S>(slot),
        }
    }

    /// Stores `value` under `key` and returns it.
    /// Panics if `key` already holds a component or `C`'s arena is full.
    pub fn emplace<C: Component<S>>(&mut self, key: K, value: C) -> &mut C {
        self.ensure_vacant(key);

        let arena = C::arena_mut::<A>(&mut self.arenas);
        if arena.is_full() {
            crate::arena::arena_full::<C>(arena.capacity());
        }

        let bucket = self.table.place(key, Slot::default());
        let index = arena.insert(value, bucket);
        *self.table.slot_mut(bucket) = Slot { tag: C::TAG, index };

        live::<C, _>(arena.get_mut(index), index)
    }

    /// Stores any component of the set under `key`. The component type is
    /// picked by the `From` conversion into `S`.
    /// Panics if `key` already holds a component or the arena is full.
    pub fn add(&mut self, key: K, value: impl Into<S>) {
        let value = value.into();
        let tag = value.tag();
        self.ensure_vacant(key);

        let (len, capacity) = S::occupancy::<A>(&self.arenas, tag);
        if len == capacity {
            fatal(CollectionError::CapacityExceeded {
                storage: S::type_name(tag),
                capacity,
            });
        }

        let bucket = self.table.place(key, Slot::default());
        let index = value.insert_into::<A>(&mut self.arenas, bucket);
        *self.table.slot_mut(bucket) = Slot { tag, index };
    }

    fn ensure_vacant(&self, key: K) {
        if let Some(bucket) = self.table.try_find(key) {
            fatal(CollectionError::ComponentExists {
                key: key.to_bits(),
                component: S::type_name(self.table.slot(bucket).tag),
            });
        }
    }

    /// Assigns `value` to the `C` stored under `key`.
    /// Panics if `key` is absent or holds another type.
    pub fn update<C: Component<S>>(&mut self, key: K, value: impl Into<C>) {
        *self.get_mut::<C>(key) = value.into();
    }

    /// Removes the component stored under `key` and returns it.
    /// Panics if `key` is absent.
    pub fn remove(&mut self, key: K) -> S {
        let bucket = self.table.find(key);
        self.remove_bucket(bucket)
    }

    /// Removes the component stored under `key`, if any.
    pub fn try_remove(&mut self, key: K) -> Option<S> {
        let bucket = self.table.try_find(key)?;
        Some(self.remove_bucket(bucket))
    }

    fn remove_bucket(&mut self, bucket: usize) -> S {
        let slot = *self.table.slot(bucket);
        let Some(removed) = S::remove_from::<A>(&mut self.arenas, slot.tag, slot.index) else {
            dangling_slot::<S>(slot);
        };

        if let Some(relocation) = removed.relocated {
            tracing::trace!(
                component = S::type_name(slot.tag),
                from_bucket = relocation.bucket,
                to_index = relocation.index,
                "relocated component"
            );
            self.table.slot_mut(relocation.bucket).index = relocation.index;
        }

        self.table.clear(bucket);
        removed.value
    }

    /// Hands whichever component `key` holds to `f`.
    /// Panics if `key` is absent.
    pub fn call<R>(&mut self, key: K, f: impl FnOnce(S::Mut<'_>) -> R) -> R {
        f(self.get_any_mut(key))
    }

    /// Hands whichever component `key` holds to `f`, or `None` if `key` is
    /// absent.
    pub fn try_call<R>(&mut self, key: K, f: impl FnOnce(Option<S::Mut<'_>>) -> R) -> R {
        match self.table.try_find(key) {
            Some(bucket) => {
                let slot = *self.table.slot(bucket);
                f(Some(
                    match S::get_mut::<A>(&mut self.arenas, slot.tag, slot.index) {
                        Some(component) => component,
                        None => dangling_slot::<S>(slot),
                    },
                ))
            }
            None => f(None),
        }
    }

    /// Returns a handle to the `C` stored under `key`.
    /// Panics if `key` is absent or holds another type.
    pub fn handle<C: Component<S>>(&self, key: K) -> Handle<C> {
        Handle::new(self.slot_of::<C>(key).index)
    }

    pub fn try_handle<C: Component<S>>(&self, key: K) -> Option<Handle<C>> {
        Some(Handle::new(self.try_slot_of::<C>(key)?.index))
    }

    /// Panics if `handle` names no live component.
    pub fn get_by_handle<C: Component<S>>(&self, handle: Handle<C>) -> &C {
        live::<C, _>(self.try_get_by_handle(handle), handle.index())
    }

    pub fn get_by_handle_mut<C: Component<S>>(&mut self, handle: Handle<C>) -> &mut C {
        live::<C, _>(
            C::arena_mut::<A>(&mut self.arenas).get_mut(handle.index()),
            handle.index(),
        )
    }

    pub fn try_get_by_handle<C: Component<S>>(&self, handle: Handle<C>) -> Option<&C> {
        C::arena::<A>(&self.arenas).get(handle.index())
    }

    /// Returns the number of stored `C` components.
    pub fn count<C: Component<S>>(&self) -> usize {
        C::arena::<A>(&self.arenas).len()
    }

    /// Iterates over every key in bucket order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.table.iter().map(|(_, key, _)| key)
    }

    /// Removes every component.
    pub fn clear(&mut self) {
        S::clear::<A>(&mut self.arenas);
        self.table.clear_all();
    }
}

impl<S, K, H> Collection<S, K, H, Dense>
where
    S: ComponentSet,
    K: Key,
    H: KeyHasher,
{
    /// Returns the key owning the component behind `handle`.
    /// Panics if `handle` names no live component.
    pub fn get_key<C: Component<S>>(&self, handle: Handle<C>) -> K {
        let bucket = C::arena::<Dense>(&self.arenas).bucket_of(handle.index());
        live::<C, _>(bucket.and_then(|bucket| self.table.key(bucket)), handle.index())
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

    /// Iterates over every stored `C` in parallel.
    #[cfg(feature = "rayon")]
    pub fn par_components<C: Component<S> + Sync>(&self) -> rayon::slice::Iter<'_, C> {
        use rayon::prelude::*;
        self.components::<C>().par_iter()
    }
}

#[cold]
#[inline(never)]
fn dangling_slot<S: ComponentSet>(slot: Slot) -> ! {
    fatal(CollectionError::InvalidHandle {
        component: S::type_name(slot.tag),
        index: slot.index,
    })
}

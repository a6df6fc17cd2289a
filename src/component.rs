use crate::arena::{ArenaKind, Removed};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Identifies a registered component type within its set.
pub type Tag = u8;

/// A closed set of component types, usually declared with
/// [`#[derive(ComponentSet)]`](macro@crate::ComponentSet) on an enum holding
/// one component per variant.
///
/// The set owns the per-type dispatch: every method taking a [`Tag`] matches
/// it against the registered types and forwards to that type's arena.
pub trait ComponentSet: Sized + 'static {
    /// Number of registered component types.
    const COUNT: usize;

    /// One arena per registered type.
    type Arenas<A: ArenaKind>;

    /// A shared reference to one component of the set.
    type Ref<'a>
    where
        Self: 'a;

    /// A mutable reference to one component of the set.
    type Mut<'a>
    where
        Self: 'a;

    /// Creates the arenas, `capacities` being indexed by tag.
    fn new_arenas<A: ArenaKind>(capacities: &[usize]) -> Self::Arenas<A>;

    /// Returns the tag of the component held by `self`.
    fn tag(&self) -> Tag;

    /// Returns the name of the type registered under `tag`.
    fn type_name(tag: Tag) -> &'static str;

    /// Returns `(len, capacity)` of the arena registered under `tag`.
    fn occupancy<A: ArenaKind>(arenas: &Self::Arenas<A>, tag: Tag) -> (usize, usize);

    /// Moves the held component into its arena on behalf of `bucket`.
    fn insert_into<A: ArenaKind>(self, arenas: &mut Self::Arenas<A>, bucket: usize) -> u32;

    fn get_ref<'a, A: ArenaKind>(
        arenas: &'a Self::Arenas<A>,
        tag: Tag,
        index: u32,
    ) -> Option<Self::Ref<'a>>;

    fn get_mut<'a, A: ArenaKind>(
        arenas: &'a mut Self::Arenas<A>,
        tag: Tag,
        index: u32,
    ) -> Option<Self::Mut<'a>>;

    fn remove_from<A: ArenaKind>(
        arenas: &mut Self::Arenas<A>,
        tag: Tag,
        index: u32,
    ) -> Option<Removed<Self>>;

    fn clear<A: ArenaKind>(arenas: &mut Self::Arenas<A>);
}

/// A type registered in the component set `S`.
pub trait Component<S: ComponentSet>: Sized + 'static {
    const TAG: Tag;

    fn arena<A: ArenaKind>(arenas: &S::Arenas<A>) -> &A::Arena<Self>;

    fn arena_mut<A: ArenaKind>(arenas: &mut S::Arenas<A>) -> &mut A::Arena<Self>;
}

/// The dense index of a component of type `C`.
///
/// Handles from relocating collections stay valid until the next mutation of
/// `C`'s arena. Handles from an
/// [`UnorderedCollection`](crate::UnorderedCollection) stay valid until the
/// component itself is removed.
pub struct Handle<C> {
    index: u32,
    _ty: PhantomData<fn() -> C>,
}

impl<C> Handle<C> {
    #[inline]
    pub(crate) fn new(index: u32) -> Self {
        Handle {
            index,
            _ty: PhantomData,
        }
    }

    /// Returns the dense index.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }
}

impl<C> Clone for Handle<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Handle<C> {}

impl<C> PartialEq for Handle<C> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<C> Eq for Handle<C> {}

impl<C> Hash for Handle<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<C> fmt::Debug for Handle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle")
            .field(&std::any::type_name::<C>())
            .field(&self.index)
            .finish()
    }
}

/// Panics for a tag no registered type answers to.
#[doc(hidden)]
#[cold]
#[inline(never)]
pub fn __unregistered_tag(tag: Tag) -> ! {
    panic!("component tag {} is not registered in this set", tag);
}

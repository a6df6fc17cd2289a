use crate::arena::Stable;
use crate::collection::Collection;
use crate::hash::SquareHasher;

/// A [`Collection`] whose components never move.
///
/// Each component type lives in a [`StableArena`](crate::StableArena):
/// removing a component returns its index to a free stack and leaves every
/// other component where it is. [`Handle`](crate::Handle)s and references to
/// live components therefore survive unrelated `emplace` and `remove` calls.
/// The arenas have gaps, so there is no per-type iteration and no
/// `get_key`.
///
/// # Examples
/// ```
/// use typed_collection::{CollectionLayout, ComponentSet, UnorderedCollection};
///
/// #[derive(Debug, PartialEq)]
/// struct Window { title: &'static str }
///
/// #[derive(ComponentSet)]
/// enum Gui {
///     Window(Window),
/// }
///
/// let layout = CollectionLayout::<Gui>::new(32).with_all(4);
/// let mut gui: UnorderedCollection<Gui> = UnorderedCollection::new(&layout);
///
/// gui.emplace(1, Window { title: "main" });
/// gui.emplace(2, Window { title: "tools" });
/// let tools = gui.handle::<Window>(2);
///
/// gui.remove(1);
/// gui.emplace(3, Window { title: "log" });
///
/// assert_eq!(gui.get_by_handle(tools).title, "tools");
/// ```
pub type UnorderedCollection<S, K = u32, H = SquareHasher> = Collection<S, K, H, Stable>;

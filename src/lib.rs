//! Fixed-capacity, allocation-free containers mapping integer-like keys to
//! components drawn from a closed set of types.
//!
//! The component set is an enum with one component type per variant,
//! registered with `#[derive(ComponentSet)]`. Every component type gets its
//! own contiguous arena; a fixed open-addressing table maps each key to the
//! arena slot(s) it owns. All memory is reserved when a collection is built.
//! Running out of room, probing too far, or asking for a component a key does
//! not hold are treated as defects and panic; the `try_*` methods cover the
//! one legitimate dynamic question, "does this key hold this component?".
//!
//! Three flavours are provided:
//! - [`Collection`]: exactly one component per key, relocating arenas.
//! - [`MultiCollection`]: at most one component of each type per key.
//! - [`UnorderedCollection`]: like `Collection`, but components never move.
//!
//! # Examples
//!
//! ```
//! use typed_collection::{Collection, CollectionLayout, ComponentSet};
//!
//! struct Position {
//!     x: f32,
//!     y: f32,
//! }
//!
//! struct Sound {
//!     clip: String,
//! }
//!
//! #[derive(ComponentSet)]
//! enum Thing {
//!     Position(Position),
//!     Sound(Sound),
//! }
//!
//! fn main() {
//!     let layout = CollectionLayout::<Thing>::new(128)
//!         .with::<Position>(32)
//!         .with::<Sound>(8);
//!     let mut things: Collection<Thing> = Collection::new(&layout);
//!
//!     things.emplace(17, Position { x: 1.0, y: 2.0 });
//!     things.add(18, Sound { clip: "bark.ogg".to_string() });
//!
//!     things.get_mut::<Position>(17).x += 1.0;
//!     assert!(things.contains_type::<Sound>(18));
//!
//!     for key in [17, 18, 19] {
//!         things.try_call(key, |thing| match thing {
//!             Some(ThingMut::Position(p)) => println!("{key} at {}, {}", p.x, p.y),
//!             Some(ThingMut::Sound(s)) => println!("{key} plays {}", s.clip),
//!             None => println!("{key} is empty"),
//!         });
//!     }
//!
//!     let handle = things.handle::<Position>(17);
//!     assert_eq!(things.get_key(handle), 17);
//! }
//! ```

extern crate self as typed_collection;


mod arena;
mod collection;
mod component;
mod error;
mod hash;
mod key;
mod layout;
mod multi;
mod slot_table;
mod unordered;

pub use macros::ComponentSet;

pub use arena::Arena;
pub use arena::ArenaKind;
pub use arena::Dense;
pub use arena::DenseArena;
pub use arena::Relocation;
pub use arena::Removed;
pub use arena::Stable;
pub use arena::StableArena;
pub use collection::Collection;
pub use component::Component;
pub use component::ComponentSet;
pub use component::Handle;
pub use component::Tag;
pub use error::CollectionError;
pub use error::LayoutError;
pub use hash::AHashHasher;
pub use hash::KeyHasher;
pub use hash::SquareHasher;
pub use key::Key;
pub use layout::CollectionLayout;
pub use layout::DEFAULT_PROBE_LIMIT;
pub use layout::MAX_INLINE_CAPACITIES;
pub use multi::MultiCollection;
pub use multi::TypeMask;
pub use multi::TypeMaskIter;
pub use unordered::UnorderedCollection;

#[doc(hidden)]
pub use component::__unregistered_tag;

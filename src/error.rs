use thiserror::Error;

/// Defects a collection refuses to continue past.
///
/// None of these are returned to the caller: they describe a broken call site
/// or an undersized configuration, and the collection panics with the error's
/// message when one occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// An arena or the slot table has no room left.
    #[error("capacity exceeded: `{storage}` storage holds at most {capacity} entries")]
    CapacityExceeded {
        /// The component type name, or `slot table`.
        storage: &'static str,
        /// The configured capacity.
        capacity: usize,
    },

    /// Linear probing found no free bucket within the probe limit.
    #[error("probe limit of {limit} buckets exhausted for key {key} starting at bucket {start}")]
    ProbeExhausted {
        /// Bits of the key being placed.
        key: u64,
        /// The bucket the probe started from.
        start: usize,
        /// The effective probe limit.
        limit: usize,
    },

    /// A key was accessed as a component type it does not hold.
    #[error("type mismatch: key {key} holds `{stored}`, not `{requested}`")]
    TypeMismatch {
        /// Bits of the key.
        key: u64,
        /// The type the caller asked for.
        requested: &'static str,
        /// The type the key actually holds.
        stored: &'static str,
    },

    /// A lookup that requires the key to exist did not find it.
    #[error("key {key} not found")]
    KeyNotFound {
        /// Bits of the key.
        key: u64,
    },

    /// A component was emplaced where one already lives.
    #[error("key {key} already holds a `{component}` component")]
    ComponentExists {
        /// Bits of the key.
        key: u64,
        /// The component already stored.
        component: &'static str,
    },

    /// The key exists but holds no component of the requested type.
    #[error("key {key} has no `{component}` component")]
    ComponentMissing {
        /// Bits of the key.
        key: u64,
        /// The requested component type.
        component: &'static str,
    },

    /// A handle names an index with no live component behind it.
    #[error("handle to `{component}` at index {index} does not refer to a live component")]
    InvalidHandle {
        /// The component type of the handle.
        component: &'static str,
        /// The dense index the handle carries.
        index: u32,
    },
}

/// Rejections of a [`CollectionLayout`](crate::CollectionLayout).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("a collection needs at least one bucket")]
    NoBuckets,

    #[error("the probe limit must be at least one bucket")]
    ZeroProbeLimit,

    #[error("{count} component types registered, at most {max} are supported")]
    TooManyTypes { count: usize, max: usize },

    #[error("no capacity configured for component `{component}`")]
    MissingCapacity { component: &'static str },

    #[error("capacity {capacity} of component `{component}` exceeds the addressable maximum {max}")]
    CapacityTooLarge {
        component: &'static str,
        capacity: usize,
        max: usize,
    },
}

/// Logs and panics. Every fatal path in the crate ends here.
#[cold]
#[inline(never)]
pub(crate) fn fatal(error: CollectionError) -> ! {
    tracing::error!(%error, "fatal collection error");
    panic!("{}", error);
}

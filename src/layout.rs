use crate::component::{Component, ComponentSet};
use crate::error::LayoutError;
use smallvec::{smallvec, SmallVec};
use std::marker::PhantomData;

/// The probe bound every collection uses unless its layout overrides it.
pub const DEFAULT_PROBE_LIMIT: usize = 10;

/// Component sets up to this size keep their capacities on the stack.
pub const MAX_INLINE_CAPACITIES: usize = 16;

/// Sizing of a collection over the component set `S`: the number of buckets,
/// the capacity of every component arena and the probe limit.
///
/// # Examples
/// ```
/// use typed_collection::{CollectionLayout, ComponentSet};
///
/// #[derive(ComponentSet)]
/// enum Body {
///     Sphere(f32),
///     Capsule([f32; 2]),
/// }
///
/// let layout = CollectionLayout::<Body>::new(256)
///     .with::<f32>(64)
///     .with::<[f32; 2]>(16)
///     .with_probe_limit(8);
///
/// assert_eq!(layout.capacity_of::<f32>(), 64);
/// assert_eq!(layout.probe_limit(), 8);
/// ```
pub struct CollectionLayout<S> {
    buckets: usize,
    probe_limit: usize,
    capacities: SmallVec<[usize; MAX_INLINE_CAPACITIES]>,
    _set: PhantomData<fn() -> S>,
}

impl<S: ComponentSet> CollectionLayout<S> {
    /// Creates a layout of `buckets` buckets with no capacities assigned.
    pub fn new(buckets: usize) -> Self {
        CollectionLayout {
            buckets,
            probe_limit: DEFAULT_PROBE_LIMIT,
            capacities: smallvec![0; S::COUNT],
            _set: PhantomData,
        }
    }

    /// Sets the capacity of component `C`.
    pub fn with<C: Component<S>>(mut self, capacity: usize) -> Self {
        self.capacities[C::TAG as usize] = capacity;
        self
    }

    /// Sets the same capacity for every component.
    pub fn with_all(mut self, capacity: usize) -> Self {
        self.capacities.fill(capacity);
        self
    }

    pub fn with_probe_limit(mut self, probe_limit: usize) -> Self {
        self.probe_limit = probe_limit;
        self
    }

    pub fn buckets(&self) -> usize {
        self.buckets
    }

    pub fn probe_limit(&self) -> usize {
        self.probe_limit
    }

    pub fn capacity_of<C: Component<S>>(&self) -> usize {
        self.capacities[C::TAG as usize]
    }

    /// Returns every capacity, indexed by tag.
    pub fn capacities(&self) -> &[usize] {
        &self.capacities
    }

    /// Checks the layout for a collection supporting at most `max_types`
    /// component types.
    pub(crate) fn validate(&self, max_types: usize) -> Result<(), LayoutError> {
        if self.buckets == 0 {
            return Err(LayoutError::NoBuckets);
        }
        if self.probe_limit == 0 {
            return Err(LayoutError::ZeroProbeLimit);
        }
        if S::COUNT > max_types {
            return Err(LayoutError::TooManyTypes {
                count: S::COUNT,
                max: max_types,
            });
        }

        for (tag, &capacity) in self.capacities.iter().enumerate() {
            let component = S::type_name(tag as u8);
            if capacity == 0 {
                return Err(LayoutError::MissingCapacity { component });
            }
            if capacity > u32::MAX as usize {
                return Err(LayoutError::CapacityTooLarge {
                    component,
                    capacity,
                    max: u32::MAX as usize,
                });
            }
        }

        Ok(())
    }
}

impl<S> Clone for CollectionLayout<S> {
    fn clone(&self) -> Self {
        CollectionLayout {
            buckets: self.buckets,
            probe_limit: self.probe_limit,
            capacities: self.capacities.clone(),
            _set: PhantomData,
        }
    }
}

/// A shorthand for building a [`CollectionLayout`].
///
/// # Examples
/// ```
/// use typed_collection::{collection_layout, ComponentSet};
///
/// #[derive(ComponentSet)]
/// enum Audio {
///     Volume(f32),
///     Muted(bool),
/// }
///
/// let layout = collection_layout!(Audio, 128; f32 = 32, bool = 8);
/// assert_eq!(layout.capacities(), &[32, 8]);
/// ```
#[macro_export]
macro_rules! collection_layout {
    ($set: ty, $buckets: expr $(; $($component: ty = $capacity: expr),* $(,)?)?) => {
        $crate::CollectionLayout::<$set>::new($buckets)
        $($(.with::<$component>($capacity))*)?
    };
}

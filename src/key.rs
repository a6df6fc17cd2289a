use std::fmt::Debug;
use std::hash::Hash;

/// An opaque integer-like identifier under which components are grouped.
///
/// Keys are minted by the caller (entity or asset handles); a collection never
/// creates or recycles them. Only equality and the integer projection returned
/// by [`to_bits`](Key::to_bits) are used: the former to confirm probe matches,
/// the latter to pick a starting bucket.
pub trait Key: Copy + Eq + Hash + Debug + 'static {
    /// Returns the integer value the key hashes from.
    fn to_bits(self) -> u64;
}

macro_rules! impl_key {
    ($($ty: ty),*) => {
        $(
            impl Key for $ty {
                #[inline]
                fn to_bits(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

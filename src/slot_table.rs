use crate::error::{fatal, CollectionError};
use crate::hash::KeyHasher;
use crate::key::Key;

/// Fixed open-addressing table of `M` buckets.
///
/// `keys` is the key table: `None` marks an empty bucket, `Some(key)` the key
/// that probed into it. `slots` runs parallel to it and holds the payload the
/// owning collection keeps per bucket (tag + dense index, or a type mask).
pub(crate) struct SlotTable<K, P, H> {
    keys: Box<[Option<K>]>,
    slots: Box<[P]>,
    hasher: H,
    probe_limit: usize,
    len: usize,
}

impl<K: Key, P: Copy + Default, H: KeyHasher> SlotTable<K, P, H> {
    pub fn new(buckets: usize, probe_limit: usize, hasher: H) -> Self {
        SlotTable {
            keys: vec![None; buckets].into_boxed_slice(),
            slots: vec![P::default(); buckets].into_boxed_slice(),
            hasher,
            probe_limit: probe_limit.min(buckets),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn probe_limit(&self) -> usize {
        self.probe_limit
    }

    #[inline]
    fn start(&self, key: K) -> usize {
        self.hasher.bucket(key.to_bits(), self.keys.len())
    }

    /// Buckets examined for `key`, in probe order.
    #[inline]
    fn window(&self, start: usize) -> impl Iterator<Item = usize> {
        let buckets = self.keys.len();
        (0..self.probe_limit).map(move |step| (start + step) % buckets)
    }

    /// Claims the first empty bucket in `key`'s probe window and returns it.
    ///
    /// The caller guarantees `key` is not present yet.
    pub fn place(&mut self, key: K, payload: P) -> usize {
        if self.len == self.keys.len() {
            fatal(CollectionError::CapacityExceeded {
                storage: "slot table",
                capacity: self.keys.len(),
            });
        }

        let start = self.start(key);
        let bucket = self.window(start).find(|&bucket| self.keys[bucket].is_none());

        let Some(bucket) = bucket else {
            fatal(CollectionError::ProbeExhausted {
                key: key.to_bits(),
                start,
                limit: self.probe_limit,
            });
        };

        self.keys[bucket] = Some(key);
        self.slots[bucket] = payload;
        self.len += 1;
        bucket
    }

    /// Returns the bucket holding `key`, if any.
    ///
    /// Removal leaves no tombstones, so the whole window is scanned rather
    /// than stopping at the first empty bucket.
    pub fn try_find(&self, key: K) -> Option<usize> {
        self.window(self.start(key))
            .find(|&bucket| self.keys[bucket] == Some(key))
    }

    /// Returns the bucket holding `key`. The key must exist.
    pub fn find(&self, key: K) -> usize {
        match self.try_find(key) {
            Some(bucket) => bucket,
            None => fatal(CollectionError::KeyNotFound { key: key.to_bits() }),
        }
    }

    /// Returns the key stored in `bucket`, `None` if the bucket is empty.
    #[inline]
    pub fn key(&self, bucket: usize) -> Option<K> {
        self.keys.get(bucket).copied().flatten()
    }

    #[inline]
    pub fn slot(&self, bucket: usize) -> &P {
        &self.slots[bucket]
    }

    #[inline]
    pub fn slot_mut(&mut self, bucket: usize) -> &mut P {
        &mut self.slots[bucket]
    }

    /// Empties an occupied bucket.
    pub fn clear(&mut self, bucket: usize) {
        if self.keys[bucket].take().is_some() {
            self.slots[bucket] = P::default();
            self.len -= 1;
        }
    }

    /// Empties every bucket.
    pub fn clear_all(&mut self) {
        self.keys.fill(None);
        self.slots.fill(P::default());
        self.len = 0;
    }

    /// Iterates over occupied buckets in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, K, &P)> + '_ {
        self.keys
            .iter()
            .zip(self.slots.iter())
            .enumerate()
            .filter_map(|(bucket, (key, slot))| key.map(|key| (bucket, key, slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::SlotTable;
    use crate::hash::SquareHasher;

    fn table(buckets: usize, probe_limit: usize) -> SlotTable<u32, u8, SquareHasher> {
        SlotTable::new(buckets, probe_limit, SquareHasher)
    }

    #[test]
    fn place_starts_at_hashed_bucket() {
        let mut table = table(100, 10);
        assert_eq!(table.place(7, 1), 49);
        assert_eq!(table.place(5, 2), 25);
        assert_eq!(table.find(7), 49);
        assert_eq!(*table.slot(25), 2);
        assert_eq!(table.key(49), Some(7));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn collisions_probe_linearly_and_wrap() {
        let mut table = table(10, 4);
        // 3 * 3 = 9 and 7 * 7 = 49 both start at bucket 9.
        assert_eq!(table.place(3, 0), 9);
        assert_eq!(table.place(7, 0), 0);
        assert_eq!(table.try_find(7), Some(0));
    }

    #[test]
    fn lookups_survive_removal_inside_a_chain() {
        let mut table = table(100, 10);
        let first = table.place(10, 0);
        let second = table.place(20, 0);
        let third = table.place(30, 0);
        assert_eq!((first, second, third), (0, 1, 2));

        table.clear(second);
        assert_eq!(table.try_find(20), None);
        assert_eq!(table.try_find(30), Some(2));
        assert_eq!(table.place(40, 0), 1);
    }

    #[test]
    fn try_find_missing_key() {
        let table = table(16, 4);
        assert_eq!(table.try_find(3), None);
    }

    #[test]
    #[should_panic(expected = "probe limit")]
    fn exceeding_the_probe_limit_is_fatal() {
        let mut table = table(100, 3);
        for key in [0, 10, 20, 30] {
            table.place(key, 0);
        }
    }

    #[test]
    #[should_panic(expected = "capacity exceeded")]
    fn full_table_is_fatal() {
        let mut table = table(2, 2);
        table.place(0, 0);
        table.place(1, 0);
        table.place(2, 0);
    }

    #[test]
    #[should_panic(expected = "not found")]
    fn find_requires_existence() {
        let table = table(8, 4);
        table.find(1);
    }

    #[test]
    fn clear_all_empties_every_bucket() {
        let mut table = table(8, 4);
        table.place(1, 3);
        table.place(2, 4);
        table.clear_all();
        assert_eq!(table.len(), 0);
        assert_eq!(table.iter().count(), 0);
    }
}

//! The hash table itself: an array of locked buckets walked by linear
//! probing, with tombstone reuse and watermark-driven resizing.
//!
//! # Locking discipline
//!
//! One rule covers every operation: the engine-wide reader/writer lock is
//! held in read mode for the full probe of `put`, `get`, `contains_key`,
//! and `delete`, and in write mode by resizing and `clear`. The bucket
//! array therefore can never be replaced while a probe is walking it.
//! Within a probe, each visited bucket's own lock is taken in read mode
//! for inspection and in write mode for mutation; a mutation re-validates
//! the slot after acquiring the write lock and restarts the probe if a
//! concurrent writer got there first. At most one bucket lock is held at
//! a time, so lock ordering cannot deadlock. The item and memory counters
//! are atomics, which lets holders of the read lock update them.

use std::{
    fmt,
    mem,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use crossbeam_utils::CachePadded;
use parking_lot::RwLock;

use crate::{
    bucket::{Bucket, Entry, Slot},
    error::EngineError,
    hash::{self, HashKey},
    probe::ProbeSeq,
    stats::EngineStats,
};

/// Floor for the bucket count; shrinking never goes below it.
pub const MIN_BUCKET_COUNT: usize = 8;

/// Ceiling for the bucket count; growth never goes above it.
pub const MAX_BUCKET_COUNT: usize = 1 << 30;

/// Load factor above which an insert doubles the bucket count.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Load factor below which a delete halves the bucket count.
pub const DEFAULT_MIN_LOAD_FACTOR: f64 = 0.25;

/// Sizing parameters resolved by the builder.
pub(crate) struct EngineConfig {
    pub(crate) min_bucket_count: usize,
    pub(crate) max_bucket_count: usize,
    pub(crate) max_load_factor: f64,
    pub(crate) min_load_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_bucket_count: MIN_BUCKET_COUNT,
            max_bucket_count: MAX_BUCKET_COUNT,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            min_load_factor: DEFAULT_MIN_LOAD_FACTOR,
        }
    }
}

/// The bucket array. Replaced wholesale, under the engine write lock, by
/// resizing; its length is always a power of two.
struct BucketArray {
    buckets: Box<[Bucket]>,
}

impl BucketArray {
    fn alloc(bucket_count: usize) -> Result<Self, EngineError> {
        debug_assert!(bucket_count.is_power_of_two());
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(bucket_count)?;
        buckets.resize_with(bucket_count, Bucket::new);
        Ok(Self {
            buckets: buckets.into_boxed_slice(),
        })
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }
}

/// What a probe step saw in a bucket, captured with the bucket's read lock
/// held and acted on after it is released.
enum Probed {
    Empty,
    Tombstone,
    Match,
    Collision,
}

fn classify(bucket: &Bucket, key: &[u8]) -> Probed {
    match &*bucket.slot.read() {
        Slot::Empty => Probed::Empty,
        Slot::Tombstone => Probed::Tombstone,
        Slot::Occupied(entry) if entry.key_eq(key) => Probed::Match,
        Slot::Occupied(_) => Probed::Collision,
    }
}

/// A process-local, concurrent key/value store over an open-addressing
/// hash table.
///
/// Keys and values are arbitrary non-empty byte strings; the engine owns
/// independent copies of both. Collisions resolve by linear probing, and
/// deletion leaves tombstones so probe chains stay intact. The table
/// doubles or halves its power-of-two bucket count as the load factor
/// crosses the configured watermarks. Bucket placement is driven by a
/// SipHash digest under a per-process random key, so callers cannot craft
/// colliding key sets.
///
/// One engine may be shared across threads; see the module docs for the
/// locking discipline.
///
/// # Examples
///
/// ```rust
/// use cairn::HashEngine;
///
/// let engine = HashEngine::new(8)?;
///
/// engine.put(b"a", b"1")?;
/// engine.put(b"b", b"2")?;
/// assert_eq!(&*engine.get(b"a")?, b"1");
///
/// engine.delete(b"a")?;
/// assert!(engine.get(b"a").is_err());
/// assert_eq!(&*engine.get(b"b")?, b"2");
/// # Ok::<(), cairn::EngineError>(())
/// ```
pub struct HashEngine {
    table: RwLock<BucketArray>,
    item_count: CachePadded<AtomicU64>,
    total_memory: CachePadded<AtomicU64>,
    hash_key: HashKey,
    config: EngineConfig,
}

impl HashEngine {
    /// Creates an engine sized for roughly `capacity` entries with the
    /// default bounds and watermarks.
    ///
    /// The capacity hint is rounded up to the next power of two and
    /// clamped to `[MIN_BUCKET_COUNT, MAX_BUCKET_COUNT]`. The first engine
    /// constructed in a process also establishes the process-wide hash
    /// key.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `capacity` is zero; `AllocationFailed` if the
    /// bucket array cannot be reserved (nothing is leaked on that path).
    pub fn new(capacity: usize) -> Result<Self, EngineError> {
        Self::with_config(capacity, EngineConfig::default(), None)
    }

    pub(crate) fn with_config(
        capacity: usize,
        config: EngineConfig,
        hash_key: Option<HashKey>,
    ) -> Result<Self, EngineError> {
        if capacity == 0 {
            return Err(EngineError::InvalidArgument("capacity hint must be positive"));
        }
        let bucket_count = capacity
            .checked_next_power_of_two()
            .unwrap_or(config.max_bucket_count)
            .clamp(config.min_bucket_count, config.max_bucket_count);
        let table = BucketArray::alloc(bucket_count)?;
        let hash_key = hash_key.unwrap_or_else(hash::process_key);
        Ok(Self {
            table: RwLock::new(table),
            item_count: CachePadded::new(AtomicU64::new(0)),
            total_memory: CachePadded::new(AtomicU64::new(0)),
            hash_key,
            config,
        })
    }

    /// Inserts `value` under `key`, replacing the previous value if the
    /// key is already present.
    ///
    /// May pre-emptively double the table when the insert would push the
    /// load factor over the grow watermark; failure to grow aborts the
    /// insert.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty key or value, `AllocationFailed` if
    /// payload or table memory cannot be reserved, and
    /// `CapacityExhausted` if every bucket is live with another key and
    /// the table cannot grow further.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<(), EngineError> {
        if key.is_empty() {
            return Err(EngineError::InvalidArgument("key must not be empty"));
        }
        if value.is_empty() {
            return Err(EngineError::InvalidArgument("value must not be empty"));
        }
        self.grow_if_needed()?;

        let hash = hash::hash64(&self.hash_key, key);
        let table = self.table.read();
        'probe: loop {
            let mut tombstone = None;
            let mut empty = None;
            for index in ProbeSeq::new(hash, table.len()) {
                match classify(&table.buckets[index], key) {
                    Probed::Empty => {
                        empty = Some(index);
                        break;
                    }
                    Probed::Tombstone => {
                        if tombstone.is_none() {
                            tombstone = Some(index);
                        }
                    }
                    Probed::Match => {
                        let mut slot = table.buckets[index].slot.write();
                        if let Slot::Occupied(entry) = &mut *slot {
                            if entry.key_eq(key) {
                                let old_len = entry.value_len() as i64;
                                entry.replace_value(value)?;
                                drop(slot);
                                self.adjust_memory(value.len() as i64 - old_len);
                                return Ok(());
                            }
                        }
                        // The slot changed between classification and
                        // locking. Start the probe over.
                        continue 'probe;
                    }
                    Probed::Collision => {}
                }
            }

            // A tombstone seen earlier in the sequence takes precedence
            // over the terminating empty slot; reuse keeps probe chains
            // short. A full scan with no empty slot can still land in a
            // recorded tombstone.
            let Some(index) = tombstone.or(empty) else {
                return Err(EngineError::CapacityExhausted);
            };
            let mut slot = table.buckets[index].slot.write();
            if !slot.is_empty() && !slot.is_tombstone() {
                // Claimed by a concurrent insert. Start the probe over.
                continue 'probe;
            }
            let entry = Entry::new(key, value)?;
            let footprint = entry.footprint() as u64;
            *slot = Slot::Occupied(entry);
            drop(slot);
            self.item_count.fetch_add(1, Ordering::AcqRel);
            self.total_memory.fetch_add(footprint, Ordering::AcqRel);
            return Ok(());
        }
    }

    /// Looks up `key` and returns a shared view of its value.
    ///
    /// The view is independently owned: it stays readable even if the
    /// entry is later replaced or deleted.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty key, `NotFound` if the key is
    /// absent.
    pub fn get(&self, key: &[u8]) -> Result<Arc<[u8]>, EngineError> {
        if key.is_empty() {
            return Err(EngineError::InvalidArgument("key must not be empty"));
        }
        let hash = hash::hash64(&self.hash_key, key);
        let table = self.table.read();
        for index in ProbeSeq::new(hash, table.len()) {
            let slot = table.buckets[index].slot.read();
            match &*slot {
                // An empty slot ends the probe chain; the key cannot be
                // stored beyond it.
                Slot::Empty => return Err(EngineError::NotFound),
                // A deleted entry may have live entries probing past it.
                Slot::Tombstone => {}
                Slot::Occupied(entry) if entry.key_eq(key) => return Ok(entry.value()),
                Slot::Occupied(_) => {}
            }
        }
        Err(EngineError::NotFound)
    }

    /// Returns `true` if `key` is present. Empty keys are never present.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        if key.is_empty() {
            return false;
        }
        let hash = hash::hash64(&self.hash_key, key);
        let table = self.table.read();
        for index in ProbeSeq::new(hash, table.len()) {
            match classify(&table.buckets[index], key) {
                Probed::Empty => return false,
                Probed::Match => return true,
                Probed::Tombstone | Probed::Collision => {}
            }
        }
        false
    }

    /// Removes `key`, leaving a tombstone in its slot.
    ///
    /// May halve the table afterwards if the load factor dropped under the
    /// shrink watermark; a failed shrink is logged and swallowed, since
    /// the deletion itself already took effect. Deleting an absent or
    /// already-deleted key is `NotFound`, not success.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty key, `NotFound` if the key is
    /// absent.
    pub fn delete(&self, key: &[u8]) -> Result<(), EngineError> {
        if key.is_empty() {
            return Err(EngineError::InvalidArgument("key must not be empty"));
        }
        let hash = hash::hash64(&self.hash_key, key);
        let table = self.table.read();
        'probe: loop {
            for index in ProbeSeq::new(hash, table.len()) {
                match classify(&table.buckets[index], key) {
                    Probed::Empty => return Err(EngineError::NotFound),
                    Probed::Tombstone | Probed::Collision => {}
                    Probed::Match => {
                        let mut slot = table.buckets[index].slot.write();
                        if let Slot::Occupied(entry) = &mut *slot {
                            if entry.key_eq(key) {
                                let footprint = entry.footprint() as u64;
                                slot.make_tombstone();
                                drop(slot);
                                self.item_count.fetch_sub(1, Ordering::AcqRel);
                                self.total_memory.fetch_sub(footprint, Ordering::AcqRel);
                                drop(table);
                                self.shrink_if_warranted();
                                return Ok(());
                            }
                        }
                        // The slot changed between classification and
                        // locking. Start the probe over.
                        continue 'probe;
                    }
                }
            }
            return Err(EngineError::NotFound);
        }
    }

    /// Removes every entry and resets the counters. The bucket count is
    /// left as-is.
    pub fn clear(&self) {
        let mut table = self.table.write();
        for bucket in table.buckets.iter_mut() {
            *bucket.slot.get_mut() = Slot::Empty;
        }
        self.item_count.store(0, Ordering::Release);
        self.total_memory.store(0, Ordering::Release);
    }

    /// Takes a snapshot of the engine's counters.
    pub fn stats(&self) -> EngineStats {
        let table = self.table.read();
        EngineStats::new(
            self.item_count.load(Ordering::Acquire),
            table.len(),
            self.total_memory.load(Ordering::Acquire),
        )
    }

    /// Number of live entries.
    pub fn len(&self) -> u64 {
        self.item_count.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current number of bucket slots; always a power of two.
    pub fn bucket_count(&self) -> usize {
        self.table.read().len()
    }

    /// Rebuilds the table at `new_bucket_count` buckets, re-probing every
    /// live entry and compacting tombstones away. Holds the engine write
    /// lock for the whole operation; on any failure the live table is
    /// untouched.
    pub(crate) fn resize(&self, new_bucket_count: usize) -> Result<(), EngineError> {
        if !new_bucket_count.is_power_of_two()
            || new_bucket_count < self.config.min_bucket_count
            || new_bucket_count > self.config.max_bucket_count
        {
            return Err(EngineError::InvalidArgument(
                "resize target outside the configured bucket bounds",
            ));
        }
        let mut table = self.table.write();
        self.rebuild(&mut table, new_bucket_count)
    }

    /// Doubles the table if the next insert would push the load factor
    /// over the grow watermark. Re-checks under the write lock so
    /// concurrent inserts cannot double twice for one crossing.
    fn grow_if_needed(&self) -> Result<(), EngineError> {
        {
            let table = self.table.read();
            if !self.wants_grow(table.len()) {
                return Ok(());
            }
        }
        let mut table = self.table.write();
        if !self.wants_grow(table.len()) {
            return Ok(());
        }
        let target = (table.len() * 2).min(self.config.max_bucket_count);
        log::debug!("growing table: {} -> {} buckets", table.len(), target);
        self.rebuild(&mut table, target)
    }

    /// Halves the table if the load factor fell under the shrink
    /// watermark. Best-effort: a failure leaves the table oversized, which
    /// shows up in `stats()`.
    fn shrink_if_warranted(&self) {
        {
            let table = self.table.read();
            if !self.wants_shrink(table.len()) {
                return;
            }
        }
        let mut table = self.table.write();
        if !self.wants_shrink(table.len()) {
            return;
        }
        let target = (table.len() / 2).max(self.config.min_bucket_count);
        log::debug!("shrinking table: {} -> {} buckets", table.len(), target);
        if let Err(e) = self.rebuild(&mut table, target) {
            log::warn!("failed to shrink table to {target} buckets: {e}");
        }
    }

    fn wants_grow(&self, bucket_count: usize) -> bool {
        if bucket_count >= self.config.max_bucket_count {
            return false;
        }
        // Count the incoming insert, so the load factor stays under the
        // watermark after every successful put.
        let projected = self.item_count.load(Ordering::Acquire) + 1;
        projected as f64 / bucket_count as f64 > self.config.max_load_factor
    }

    fn wants_shrink(&self, bucket_count: usize) -> bool {
        if bucket_count <= self.config.min_bucket_count {
            return false;
        }
        let items = self.item_count.load(Ordering::Acquire);
        (items as f64) / (bucket_count as f64) < self.config.min_load_factor
    }

    /// Replaces `table` with a `new_bucket_count`-slot array holding every
    /// live entry. Placements are planned before anything moves, so a
    /// failure (allocation, or a new table too small for the live
    /// entries) leaves the old array fully intact.
    fn rebuild(&self, table: &mut BucketArray, new_bucket_count: usize) -> Result<(), EngineError> {
        if table.len() == new_bucket_count {
            return Ok(());
        }
        let mut next = BucketArray::alloc(new_bucket_count)?;

        let mut taken = Vec::new();
        taken.try_reserve_exact(new_bucket_count)?;
        taken.resize(new_bucket_count, false);

        let mut placements: Vec<(usize, usize)> = Vec::new();
        placements.try_reserve_exact(table.len())?;

        for (index, bucket) in table.buckets.iter_mut().enumerate() {
            // Holding the engine write lock excludes every other slot
            // user, so the per-bucket locks are free here.
            let Slot::Occupied(entry) = bucket.slot.get_mut() else {
                continue;
            };
            let hash = hash::hash64(&self.hash_key, entry.key());
            match ProbeSeq::new(hash, new_bucket_count).find(|&i| !taken[i]) {
                Some(target) => {
                    taken[target] = true;
                    placements.push((index, target));
                }
                None => return Err(EngineError::CapacityExhausted),
            }
        }

        for (from, to) in placements {
            let slot = mem::take(table.buckets[from].slot.get_mut());
            *next.buckets[to].slot.get_mut() = slot;
        }
        *table = next;
        Ok(())
    }

    fn adjust_memory(&self, delta: i64) {
        if delta >= 0 {
            self.total_memory.fetch_add(delta as u64, Ordering::AcqRel);
        } else {
            self.total_memory.fetch_sub(delta.unsigned_abs(), Ordering::AcqRel);
        }
    }
}

impl fmt::Debug for HashEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashEngine")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{HashEngine, DEFAULT_MAX_LOAD_FACTOR};
    use crate::{EngineBuilder, EngineError, HashKey};

    const TEST_KEY: HashKey = HashKey::new(0x5ca1_ab1e, 0x0dd5_ea15);

    fn pinned_engine(buckets: usize) -> HashEngine {
        EngineBuilder::new(buckets)
            .min_bucket_count(buckets)
            .max_bucket_count(buckets)
            .max_load_factor(0.95)
            .min_load_factor(0.0)
            .hash_key(HashKey::new(3, 5))
            .build()
            .unwrap()
    }

    #[test]
    fn put_get_roundtrip() {
        let engine = HashEngine::new(8).unwrap();
        engine.put(b"alpha", b"one").unwrap();
        assert_eq!(&*engine.get(b"alpha").unwrap(), b"one");
    }

    #[test]
    fn rejects_empty_key_and_value() {
        let engine = HashEngine::new(8).unwrap();
        assert!(matches!(
            engine.put(b"", b"v"),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.put(b"k", b""),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.get(b""),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.delete(b""),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn update_replaces_value_without_growing_item_count() {
        let engine = HashEngine::new(8).unwrap();
        engine.put(b"k", b"first").unwrap();
        let before = engine.stats();

        engine.put(b"k", b"second!").unwrap();
        let after = engine.stats();

        assert_eq!(&*engine.get(b"k").unwrap(), b"second!");
        assert_eq!(before.item_count(), after.item_count());
        // "second!" is three bytes longer than "first".
        assert_eq!(before.total_memory() + 3, after.total_memory());
    }

    #[test]
    fn delete_is_not_idempotent_success() {
        let engine = HashEngine::new(8).unwrap();
        engine.put(b"k", b"v").unwrap();
        engine.delete(b"k").unwrap();
        assert_eq!(engine.delete(b"k"), Err(EngineError::NotFound));
        assert_eq!(engine.delete(b"never"), Err(EngineError::NotFound));
    }

    #[test]
    fn memory_accounting_tracks_inserts_and_deletes() {
        let engine = HashEngine::new(8).unwrap();
        engine.put(b"ab", b"cdef").unwrap(); // 6 bytes
        engine.put(b"x", b"y").unwrap(); // 2 bytes
        assert_eq!(engine.stats().total_memory(), 8);

        engine.delete(b"ab").unwrap();
        assert_eq!(engine.stats().total_memory(), 2);
    }

    #[test]
    fn grows_when_watermark_crossed() {
        let engine = EngineBuilder::new(8).hash_key(TEST_KEY).build().unwrap();
        assert_eq!(engine.bucket_count(), 8);

        // The insert that would project past 0.75 doubles the table first.
        for i in 0..7u32 {
            engine.put(&i.to_be_bytes(), b"v").unwrap();
        }
        assert_eq!(engine.bucket_count(), 16);

        let stats = engine.stats();
        assert!(stats.load_factor() <= DEFAULT_MAX_LOAD_FACTOR);
    }

    #[test]
    fn shrinks_after_enough_deletes() {
        let engine = EngineBuilder::new(8).hash_key(TEST_KEY).build().unwrap();
        for i in 0..24u32 {
            engine.put(&i.to_be_bytes(), b"v").unwrap();
        }
        let grown = engine.bucket_count();
        assert!(grown >= 32);

        for i in 0..24u32 {
            engine.delete(&i.to_be_bytes()).unwrap();
        }
        // Empty table shrinks back to the floor.
        assert_eq!(engine.bucket_count(), 8);
        assert!(engine.is_empty());
    }

    #[test]
    fn resize_rejects_out_of_bounds_targets() {
        let engine = HashEngine::new(8).unwrap();
        assert!(matches!(
            engine.resize(4),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.resize(24),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn resize_preserves_entries_and_compacts_tombstones() {
        let engine = EngineBuilder::new(64).hash_key(TEST_KEY).build().unwrap();
        for i in 0..32u32 {
            engine.put(&i.to_be_bytes(), &i.to_le_bytes()).unwrap();
        }
        for i in 0..16u32 {
            engine.delete(&i.to_be_bytes()).unwrap();
        }

        engine.resize(128).unwrap();
        assert_eq!(engine.bucket_count(), 128);
        for i in 16..32u32 {
            assert_eq!(&*engine.get(&i.to_be_bytes()).unwrap(), &i.to_le_bytes());
        }
        assert_eq!(engine.len(), 16);
    }

    #[test]
    fn capacity_exhausted_when_pinned_and_full() {
        let engine = pinned_engine(8);
        for i in 0..8u32 {
            engine.put(&i.to_be_bytes(), b"v").unwrap();
        }
        assert_eq!(
            engine.put(b"one-more", b"v"),
            Err(EngineError::CapacityExhausted)
        );
    }

    #[test]
    fn full_scan_reuses_a_tombstone() {
        let engine = pinned_engine(8);
        for i in 0..8u32 {
            engine.put(&i.to_be_bytes(), b"v").unwrap();
        }
        engine.delete(&3u32.to_be_bytes()).unwrap();

        // No empty slot exists, but the tombstone is reusable.
        engine.put(b"replacement", b"w").unwrap();
        assert_eq!(&*engine.get(b"replacement").unwrap(), b"w");
        assert_eq!(engine.len(), 8);
    }

    #[test]
    fn probing_continues_past_tombstones() {
        let engine = pinned_engine(8);
        for i in 0..8u32 {
            engine.put(&i.to_be_bytes(), &i.to_be_bytes()).unwrap();
        }
        // Delete a few entries; with a full table every remaining key must
        // still be reachable no matter whose slot became a tombstone.
        for i in [1u32, 4, 6] {
            engine.delete(&i.to_be_bytes()).unwrap();
        }
        for i in [0u32, 2, 3, 5, 7] {
            assert_eq!(&*engine.get(&i.to_be_bytes()).unwrap(), &i.to_be_bytes());
        }
    }

    #[test]
    fn contains_key_matches_get() {
        let engine = HashEngine::new(8).unwrap();
        engine.put(b"present", b"v").unwrap();
        assert!(engine.contains_key(b"present"));
        assert!(!engine.contains_key(b"absent"));
        assert!(!engine.contains_key(b""));
    }

    #[test]
    fn clear_resets_counters_but_not_bucket_count() {
        let engine = EngineBuilder::new(8).hash_key(TEST_KEY).build().unwrap();
        for i in 0..24u32 {
            engine.put(&i.to_be_bytes(), b"v").unwrap();
        }
        let buckets = engine.bucket_count();

        engine.clear();
        assert!(engine.is_empty());
        assert_eq!(engine.stats().total_memory(), 0);
        assert_eq!(engine.bucket_count(), buckets);
        assert_eq!(engine.get(b"anything"), Err(EngineError::NotFound));
    }

    #[test]
    fn get_view_survives_replacement_and_delete() {
        let engine = HashEngine::new(8).unwrap();
        engine.put(b"k", b"original").unwrap();
        let view = engine.get(b"k").unwrap();

        engine.put(b"k", b"changed").unwrap();
        engine.delete(b"k").unwrap();
        assert_eq!(&*view, b"original");
    }

    #[test]
    fn debug_formats_through_stats() {
        let engine = HashEngine::new(8).unwrap();
        engine.put(b"k", b"v").unwrap();
        let repr = format!("{engine:?}");
        assert!(repr.contains("HashEngine"));
        assert!(repr.contains("item_count: 1"));
    }
}

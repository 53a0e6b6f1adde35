//! The fixed-size slot abstraction of the table.
//!
//! Each bucket holds one key/value pair or an empty/tombstone marker, and
//! carries its own reader/writer lock so a slot can be inspected and
//! mutated atomically with respect to concurrent probes through it.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::EngineError;

/// One slot of the bucket array.
///
/// All slot access goes through the lock: probes take it in read mode,
/// mutations in write mode. The resize path, which holds the engine-wide
/// write lock and therefore excludes every other slot user, accesses slots
/// through `get_mut` without locking.
pub(crate) struct Bucket {
    pub(crate) slot: RwLock<Slot>,
}

impl Bucket {
    pub(crate) fn new() -> Self {
        Self {
            slot: RwLock::new(Slot::Empty),
        }
    }
}

/// The state machine of a slot.
///
/// `Empty` slots terminate probe sequences. `Tombstone` slots keep probe
/// sequences through them alive for keys inserted beyond the deleted
/// entry, and may be reclaimed by a later insert. A tombstone never
/// participates in key equality against a probe key.
#[derive(Default)]
pub(crate) enum Slot {
    #[default]
    Empty,
    Occupied(Entry),
    Tombstone,
}

impl Slot {
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    /// Drops the owned key/value storage and leaves a tombstone behind.
    pub(crate) fn make_tombstone(&mut self) {
        *self = Slot::Tombstone;
    }
}

/// An occupied slot's payload: independently-allocated copies of the key
/// and value bytes. The entry owns its key exclusively; the value is
/// shared with any views previously handed out by `get`.
pub(crate) struct Entry {
    key: Box<[u8]>,
    value: Arc<[u8]>,
}

impl Entry {
    /// Copies `key` and `value` into fresh allocations. On allocation
    /// failure nothing is retained and the caller's slot is unchanged.
    pub(crate) fn new(key: &[u8], value: &[u8]) -> Result<Self, EngineError> {
        let key = copy_bytes(key)?;
        let value = copy_bytes(value)?;
        Ok(Self {
            key,
            value: Arc::from(value),
        })
    }

    pub(crate) fn key(&self) -> &[u8] {
        &self.key
    }

    pub(crate) fn key_eq(&self, probe: &[u8]) -> bool {
        *self.key == *probe
    }

    /// A shared view of the stored value. The view stays valid even if the
    /// slot is later replaced or tombstoned.
    pub(crate) fn value(&self) -> Arc<[u8]> {
        Arc::clone(&self.value)
    }

    pub(crate) fn value_len(&self) -> usize {
        self.value.len()
    }

    /// Replaces the value bytes, keeping the key. The old value storage is
    /// released once the last outstanding view drops. On allocation
    /// failure the old value stays intact.
    pub(crate) fn replace_value(&mut self, value: &[u8]) -> Result<(), EngineError> {
        let value = copy_bytes(value)?;
        self.value = Arc::from(value);
        Ok(())
    }

    /// Key plus value length, the entry's contribution to the engine's
    /// memory estimate.
    pub(crate) fn footprint(&self) -> usize {
        self.key.len() + self.value.len()
    }
}

fn copy_bytes(src: &[u8]) -> Result<Box<[u8]>, EngineError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())?;
    buf.extend_from_slice(src);
    Ok(buf.into_boxed_slice())
}

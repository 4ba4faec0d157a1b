//! Compiled dialog cache
//!
//! Each compiled dialog lives in a fixed 4 KiB slot, the size of the buffer
//! the guest hands over when it asks for a dialog.

use std::collections::HashMap;
use std::fmt;

use crate::utils::TextId;

/// Size of every blob slot in bytes
pub const SLOT_SIZE: usize = 0x1000;

/// A zero-initialised 4 KiB buffer holding one compiled blob
#[derive(Clone, PartialEq, Eq)]
pub struct BlobSlot(Box<[u8; SLOT_SIZE]>);

impl BlobSlot {
    /// Copy `blob` into a fresh slot, truncating anything past [`SLOT_SIZE`]
    pub fn from_blob(blob: &[u8]) -> Self {
        let mut data = Box::new([0u8; SLOT_SIZE]);
        let copy_len = blob.len().min(SLOT_SIZE);
        data[..copy_len].copy_from_slice(&blob[..copy_len]);
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8; SLOT_SIZE] {
        &self.0
    }
}

impl fmt::Debug for BlobSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let used = self.0.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        f.debug_struct("BlobSlot").field("used", &used).finish()
    }
}

/// Mapping from text id to compiled blob
#[derive(Debug, Default)]
pub struct DialogCache {
    slots: HashMap<TextId, BlobSlot>,
}

impl DialogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Insert or replace the slot for `id`
    pub fn insert(&mut self, id: TextId, slot: BlobSlot) {
        self.slots.insert(id, slot);
    }

    pub fn remove(&mut self, id: TextId) -> Option<BlobSlot> {
        self.slots.remove(&id)
    }

    pub fn get(&self, id: TextId) -> Option<&BlobSlot> {
        self.slots.get(&id)
    }

    pub fn contains(&self, id: TextId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Cached ids in ascending order
    pub fn ids(&self) -> Vec<TextId> {
        let mut ids: Vec<TextId> = self.slots.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Copy the whole slot for `id` into `dest`.
    ///
    /// Returns `false` and leaves `dest` untouched on a miss.
    pub fn copy_into(&self, id: TextId, dest: &mut [u8; SLOT_SIZE]) -> bool {
        match self.slots.get(&id) {
            Some(slot) => {
                dest.copy_from_slice(slot.as_bytes());
                true
            }
            None => false,
        }
    }
}

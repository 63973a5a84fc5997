//! Grow and shrink policy for [`ChainTable`].
//!
//! Growth doubles the bucket array whenever a new key arrives while
//! `len == bucket_count`; the first growth allocates [`MIN_TABLE_SIZE`]
//! buckets. Shrinking halves the array during a removal when the table's
//! [`ShrinkPolicy`] says so, never going below [`MIN_TABLE_SIZE`].
//! Both directions relink existing entries in place; no key or value is
//! copied.

use crate::entry::{self, EntryKey};
use crate::error::{Result, TableError};
use crate::table::ChainTable;

/// Smallest non-zero bucket count.
pub const MIN_TABLE_SIZE: usize = 16;

/// Decides whether a removal halves the bucket array.
///
/// Evaluated with the element count from before the removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShrinkPolicy {
    /// Shrink when `len / 4 <= bucket_count`. Because growth keeps
    /// `len <= bucket_count`, this fires on nearly every removal.
    #[default]
    Eager,
    /// Shrink when `len <= bucket_count / 4`.
    Sparse,
}

impl ShrinkPolicy {
    pub fn should_shrink(self, len: usize, buckets: usize) -> bool {
        match self {
            ShrinkPolicy::Eager => len / 4 <= buckets,
            ShrinkPolicy::Sparse => len <= buckets / 4,
        }
    }
}

fn empty_heads(m: usize) -> Result<Vec<Option<EntryKey>>> {
    let mut heads = Vec::new();
    heads
        .try_reserve_exact(m)
        .map_err(|source| TableError::Allocation {
            what: "bucket array",
            requested: m,
            source,
        })?;
    heads.resize(m, None);
    Ok(heads)
}

impl ChainTable {
    /// Allocates the first bucket array, or doubles the current one.
    pub(crate) fn grow(&mut self) -> Result<()> {
        let m = self.heads.len();
        if m == 0 {
            self.heads = empty_heads(MIN_TABLE_SIZE)?;
            tracing::debug!(buckets = MIN_TABLE_SIZE, "allocated bucket array");
            return Ok(());
        }
        self.rehash(m * 2)?;
        tracing::debug!(from = m, to = m * 2, len = self.len, "grew bucket array");
        Ok(())
    }

    /// Halves the bucket array if the policy allows it. Returns whether the
    /// bucket count changed.
    ///
    /// A failed allocation leaves the table at its current size.
    pub(crate) fn maybe_shrink(&mut self) -> bool {
        let m = self.heads.len();
        if !self.shrink_policy.should_shrink(self.len, m) || m < 2 * MIN_TABLE_SIZE {
            return false;
        }
        match self.rehash(m / 2) {
            Ok(()) => {
                tracing::debug!(from = m, to = m / 2, len = self.len, "shrank bucket array");
                true
            }
            Err(error) => {
                tracing::warn!(%error, buckets = m, "skipping shrink");
                false
            }
        }
    }

    /// Moves every entry into a fresh array of `new_m` heads.
    fn rehash(&mut self, new_m: usize) -> Result<()> {
        let mut heads = empty_heads(new_m)?;
        let old = std::mem::take(&mut self.heads);
        for head in old {
            let mut cursor = head;
            while let Some(k) = cursor {
                let Some(e) = self.slots.get(k) else { break };
                cursor = e.next;
                let slot = self.params.bucket(&e.key, new_m);
                if let Some(new_head) = heads.get_mut(slot) {
                    entry::push_front(&mut self.slots, new_head, k);
                }
            }
        }
        self.heads = heads;
        Ok(())
    }
}

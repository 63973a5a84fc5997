//! ChainTable: string-to-string map with chained buckets.

use crate::config::TableConfig;
use crate::entry::{self, Arena, Chain, Entry, EntryKey};
use crate::error::{try_copy, Result};
use crate::hash_params::HashParams;
use crate::resize::ShrinkPolicy;
use core::fmt;

/// A hash table from `String` keys to `String` values.
///
/// Every operation hashes the key against the current bucket count and walks
/// that bucket's chain. Keys and values are copied in on insert; `search`
/// hands back a copy, `get` a borrow.
///
/// ```
/// use chain_table::ChainTable;
///
/// let mut t = ChainTable::new();
/// t.insert("host", "example.org")?;
/// assert_eq!(t.search("host")?, Some("example.org".to_string()));
/// assert!(!t.contains("accept"));
/// # Ok::<(), chain_table::TableError>(())
/// ```
#[derive(Debug)]
pub struct ChainTable {
    // Field order matters for teardown: entries drop before the bucket array.
    pub(crate) slots: Arena,
    pub(crate) heads: Vec<Option<EntryKey>>,
    pub(crate) len: usize,
    pub(crate) params: HashParams,
    pub(crate) shrink_policy: ShrinkPolicy,
}

impl ChainTable {
    /// Empty, unallocated table using the process-wide hash parameters
    /// (installed on first use).
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Empty, unallocated table hashing with `params`.
    pub fn with_params(params: HashParams) -> Self {
        Self::with_config(TableConfig::new().with_params(params))
    }

    pub fn with_config(config: TableConfig) -> Self {
        let params = config.resolve_params();
        tracing::trace!(policy = ?config.shrink_policy, "created table");
        ChainTable {
            slots: Arena::with_key(),
            heads: Vec::new(),
            len: 0,
            params,
            shrink_policy: config.shrink_policy,
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets: 0 before the first insert, otherwise a
    /// power of two no smaller than [`MIN_TABLE_SIZE`](crate::MIN_TABLE_SIZE).
    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    pub fn params(&self) -> &HashParams {
        &self.params
    }

    pub fn shrink_policy(&self) -> ShrinkPolicy {
        self.shrink_policy
    }

    /// Locates the entry holding `key`.
    fn find(&self, key: &str) -> Option<EntryKey> {
        let m = self.heads.len();
        if m == 0 {
            return None;
        }
        let head = self.heads.get(self.params.bucket(key, m)).copied().flatten();
        Chain::new(&self.slots, head)
            .find(|(_, e)| e.key == key)
            .map(|(k, _)| k)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Borrowed view of the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.find(key)
            .and_then(|k| self.slots.get(k))
            .map(|e| e.value.as_str())
    }

    /// Copy of the value stored under `key`.
    ///
    /// Fails only if the copy cannot be allocated.
    pub fn search(&self, key: &str) -> Result<Option<String>> {
        self.get(key).map(|v| try_copy(v, "value copy")).transpose()
    }

    /// Stores a copy of `value` under `key`, replacing any previous value.
    ///
    /// A new key that arrives while `len() == bucket_count()` grows the table
    /// first. Overwrites never resize. On error the table is unchanged.
    pub fn insert(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(k) = self.find(key) {
            let value = try_copy(value, "value copy")?;
            if let Some(e) = self.slots.get_mut(k) {
                e.value = value;
            }
            return Ok(());
        }

        let node = Entry::new(try_copy(key, "key copy")?, try_copy(value, "value copy")?);
        if self.len == self.heads.len() {
            self.grow()?;
        }
        self.len += 1;
        let slot = self.params.bucket(key, self.heads.len());
        let k = self.slots.insert(node);
        if let Some(head) = self.heads.get_mut(slot) {
            entry::push_front(&mut self.slots, head, k);
        }
        Ok(())
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    ///
    /// The shrink policy is consulted before unlinking.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let k = self.find(key)?;
        self.maybe_shrink();
        // A shrink moves the entry; its bucket is derived under the current size.
        let slot = self.params.bucket(key, self.heads.len());
        self.len -= 1;
        if let Some(head) = self.heads.get_mut(slot) {
            entry::unlink(&mut self.slots, head, k);
        }
        self.slots.remove(k).map(|e| e.value)
    }

    /// Drops every entry and releases the bucket array; the table returns to
    /// its unallocated state and stays usable.
    pub fn clear(&mut self) {
        tracing::trace!(len = self.len, buckets = self.heads.len(), "clearing table");
        self.slots.clear();
        self.heads = Vec::new();
        self.len = 0;
    }

    /// Entries in bucket order, each chain head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: &self.slots,
            heads: self.heads.iter(),
            chain: Chain::new(&self.slots, None),
        }
    }

    /// Debug rendering followed by a newline, e.g. `{"a":"1", }\n`.
    pub fn dump(&self) -> String {
        format!("{self}\n")
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        use std::collections::HashSet;

        let m = self.heads.len();
        assert!(
            m == 0 || (m.is_power_of_two() && m >= crate::MIN_TABLE_SIZE),
            "bad bucket count {m}"
        );
        let mut seen = HashSet::new();
        for (b, head) in self.heads.iter().enumerate() {
            let mut prev = None;
            for (k, e) in Chain::new(&self.slots, *head) {
                assert_eq!(e.prev, prev, "back-link of {:?}", e.key);
                assert_eq!(self.params.bucket(&e.key, m), b, "{:?} in wrong bucket", e.key);
                assert!(seen.insert(e.key.clone()), "duplicate key {:?}", e.key);
                prev = Some(k);
            }
        }
        assert_eq!(seen.len(), self.len, "len differs from reachable entries");
        assert_eq!(self.slots.len(), self.len, "unreachable entries in arena");
    }
}

impl Default for ChainTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `{"k":"v", "k":"v", }`; every entry is followed by `", "`.
impl fmt::Display for ChainTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (k, v) in self.iter() {
            write!(f, "\"{k}\":\"{v}\", ")?;
        }
        f.write_str("}")
    }
}

/// Iterator over `(key, value)` pairs of a [`ChainTable`].
#[derive(Debug)]
pub struct Iter<'a> {
    slots: &'a Arena,
    heads: core::slice::Iter<'a, Option<EntryKey>>,
    chain: Chain<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, e)) = self.chain.next() {
                return Some((e.key.as_str(), e.value.as_str()));
            }
            let head = *self.heads.next()?;
            self.chain = Chain::new(self.slots, head);
        }
    }
}

impl<'a> IntoIterator for &'a ChainTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

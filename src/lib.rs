//! chain-table: a single-threaded string-to-string hash table with
//! universal hashing, chained buckets and power-of-two resizing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: fast exact-match lookup of short text keys (headers, routes)
//!   with amortized O(1) insert/search/remove.
//! - Layers:
//!   - `hash_params`: the universal family `((a * digest + b) mod p) mod m`
//!     over a multiplicative string digest; one random member per process.
//!   - `entry`: chain nodes stored in a `SlotMap` arena and linked by arena
//!     keys into doubly-linked lists; O(1) head insertion and O(1) unlink of
//!     a located node.
//!   - `table`: `ChainTable`, an array of chain heads plus an element count;
//!     every operation hashes against the current bucket count and scans
//!     one chain.
//!   - `resize`: grow on `len == bucket_count`, shrink during removal per
//!     `ShrinkPolicy`; both relink entries without copying them.
//!
//! Constraints
//! - Single accessor: no internal locking. `ChainTable` is `Send`, so a
//!   caller that shares one across threads wraps it in its own mutex.
//! - Bucket count is 0 (never used) or a power of two >= 16.
//! - Each key appears at most once; `len()` equals the number of entries
//!   reachable through the chains.
//! - Every entry sits in bucket `hash(key, bucket_count)`; re-established
//!   by each rehash.
//!
//! Hash parameters
//! - `hash_params::init()` installs random coefficients once per process in
//!   a `OnceCell`; `ChainTable::new()` calls it. Tables may instead be given
//!   an explicit `HashParams` (seeded or hand-picked) through
//!   `ChainTable::with_params` or `TableConfig`.
//!
//! Failure model
//! - Key and value copies and bucket arrays are reserved with
//!   `try_reserve_exact`; failure surfaces as `TableError::Allocation`
//!   before any state changes.
//! - A shrink that cannot allocate is skipped; the removal still happens.
//! - A missing key is a normal outcome (`None` / `false`), never an error.
//!
//! Shrink trigger
//! - The default `ShrinkPolicy::Eager` evaluates `len / 4 <= bucket_count`
//!   before each removal, which holds in almost every state, so most
//!   removals from a table with at least 32 buckets halve it.
//!   `ShrinkPolicy::Sparse` shrinks only at a quarter load.
//!
//! Notes and non-goals
//! - No ordering guarantees beyond bucket order and head-first chains.
//! - No persistence, eviction or expiry.
//! - `Display` renders a debug form `{"k":"v", ...}`; `dump()` appends a
//!   newline.
//!
//! ```
//! use chain_table::ChainTable;
//!
//! let mut headers = ChainTable::new();
//! headers.insert("content-type", "text/html")?;
//! headers.insert("content-type", "text/plain")?;
//! assert_eq!(headers.len(), 1);
//! assert_eq!(headers.get("content-type"), Some("text/plain"));
//! assert_eq!(headers.remove("content-type").as_deref(), Some("text/plain"));
//! assert!(!headers.contains("content-type"));
//! # Ok::<(), chain_table::TableError>(())
//! ```

mod config;
mod entry;
mod error;
pub mod hash_params;
mod resize;
mod table;
mod table_proptest;

// Public surface
pub use config::TableConfig;
pub use error::{Result, TableError};
pub use hash_params::HashParams;
pub use resize::{ShrinkPolicy, MIN_TABLE_SIZE};
pub use table::{ChainTable, Iter};

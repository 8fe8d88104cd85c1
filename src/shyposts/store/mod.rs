//! # Metadata Storage Layer
//!
//! This module defines the abstraction over the host CMS's per-record
//! key/value metadata facility. The [`MetaStore`] trait lets the plugin work
//! against different backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryMetaStore` (no filesystem needed)
//! - Allow **host backends** (database-backed postmeta, etc.) without
//!   changing the flag or filter logic
//! - Keep the save/exclude pipeline **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileMetaStore`]: file-based storage
//!   - All metadata in a single `meta.json`, keyed by record ID
//!   - Read-modify-write of the whole file per mutation, last write wins
//!     (the same durability contract the host facility offers)
//!
//! - [`memory::InMemoryMetaStore`]: in-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Scan Support
//!
//! [`MetaStore::ids_with_meta`] exists for exactly one caller: the full
//! cache rebuild on activation. Nothing on the request path scans; the
//! homepage filter reads either the cached ID set or a predicate the host
//! engine evaluates.

use crate::error::Result;
use crate::model::PostId;

pub mod fs;
pub mod memory;

/// Abstract interface to the host's per-record metadata.
///
/// One value per (record, key); writes overwrite, values are never removed
/// by this plugin (flags are reset to `"0"` instead).
pub trait MetaStore {
    /// Create or overwrite a metadata value for a record
    fn set_meta(&mut self, id: PostId, key: &str, value: &str) -> Result<()>;

    /// Get a metadata value, or `None` if the record has none under this key
    fn get_meta(&self, id: PostId, key: &str) -> Result<Option<String>>;

    /// All record IDs whose metadata under `key` equals `value`, ascending.
    /// Full scan; only the activation-time rebuild may call this.
    fn ids_with_meta(&self, key: &str, value: &str) -> Result<Vec<PostId>>;
}

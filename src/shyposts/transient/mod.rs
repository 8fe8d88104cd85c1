//! # Transient Cache Layer
//!
//! Abstraction over the host's named, time-bounded cache slots. The shy-ID
//! index lives in one such slot under a fixed key with a ~1-year TTL.
//!
//! The contract is deliberately thin:
//! - `get` returns `None` for absent **and** expired entries; callers never
//!   see a stale payload, but they also never get a rebuild for free.
//! - `set` replaces the whole value and restarts the clock. There is no
//!   compare-and-swap; concurrent writers are last-write-wins on the entire
//!   payload, which is the consistency the host facility actually offers.
//!
//! Backends mirror the metadata layer: [`memory::InMemoryTransientStore`]
//! for tests and embedding, [`fs::FileTransientStore`] persisted as JSON.

use crate::error::Result;
use chrono::Duration;

pub mod fs;
pub mod memory;

/// Abstract interface to the host's TTL cache.
pub trait TransientStore {
    /// Get a cached value, or `None` if absent or expired
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Create or replace a cached value, valid for `ttl` from now
    fn set(&mut self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Drop a cached value (absent key is a no-op)
    fn delete(&mut self, key: &str) -> Result<()>;
}

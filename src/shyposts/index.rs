//! # The Shy-ID Index
//!
//! Denormalized cache of every post ID currently flagged shy, held in one
//! transient slot so the homepage filter never scans metadata per request.
//!
//! ## Consistency rules
//!
//! - `load` never rebuilds. Missing, expired, or corrupt payloads read as
//!   the empty set; a listing rendered in that window shows shy posts until
//!   the next rebuild or save. Accepted staleness.
//! - `apply` is the only incremental writer and runs inside the save
//!   operation. Metadata mutated by any other path (bulk editors, direct
//!   database writes) diverges silently until the next `rebuild_full`.
//! - `apply` uses set semantics: inserting an ID already present is a no-op,
//!   as is removing one that is absent.
//! - The whole list is written back per update; concurrent writers are
//!   last-write-wins on the entire list.

use crate::error::Result;
use crate::flag::{FLAG_ON, META_KEY};
use crate::model::PostId;
use crate::store::MetaStore;
use crate::transient::TransientStore;
use chrono::Duration;
use log::{debug, warn};

/// Transient slot the ID list lives under.
pub const CACHE_KEY: &str = "shy_post_ids";

/// The cached shy-ID set and its update rules.
pub struct ShyIndex {
    ttl: Duration,
}

impl ShyIndex {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Read the cached ID set. Absent, expired, or corrupt payloads coerce
    /// to empty; this never triggers a rebuild.
    pub fn load<T: TransientStore>(&self, cache: &T) -> Result<Vec<PostId>> {
        let Some(payload) = cache.get(CACHE_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&payload) {
            Ok(ids) => Ok(ids),
            Err(err) => {
                warn!("coercing corrupt shy-ID payload to empty set: {err}");
                Ok(Vec::new())
            }
        }
    }

    /// Scan the metadata store for every flagged post and overwrite the
    /// cache wholesale. Invoked once, from the activation hook.
    pub fn rebuild_full<S, T>(&self, store: &S, cache: &mut T) -> Result<Vec<PostId>>
    where
        S: MetaStore,
        T: TransientStore,
    {
        let ids = store.ids_with_meta(META_KEY, FLAG_ON)?;
        self.write(cache, &ids)?;
        debug!("rebuilt shy-ID cache with {} entries", ids.len());
        Ok(ids)
    }

    /// Incrementally reflect one flag change in the cache.
    ///
    /// A non-shy value removes the ID (absent ID is a no-op). A shy value
    /// inserts it only if not already present, so repeated saves of the
    /// same post leave exactly one entry.
    pub fn apply<T: TransientStore>(&self, cache: &mut T, id: PostId, value: &str) -> Result<()> {
        let mut ids = self.load(cache)?;
        if value == FLAG_ON {
            if !ids.contains(&id) {
                ids.push(id);
            }
        } else {
            ids.retain(|cached| *cached != id);
        }
        self.write(cache, &ids)
    }

    fn write<T: TransientStore>(&self, cache: &mut T, ids: &[PostId]) -> Result<()> {
        let payload = serde_json::to_string(ids)?;
        cache.set(CACHE_KEY, &payload, self.ttl)
    }
}

//! The per-post flag, stored under one metadata key. `"1"` means shy;
//! anything else (or no value at all) means the post appears everywhere.
//! Flags are overwritten on save and reset to `"0"` rather than deleted.

use crate::error::Result;
use crate::model::PostId;
use crate::store::MetaStore;

/// Metadata key the flag lives under.
pub const META_KEY: &str = "shy_post";

/// Stored value marking a post as shy.
pub const FLAG_ON: &str = "1";

/// Stored value marking a post as visible again.
pub const FLAG_OFF: &str = "0";

/// Write `value` as the post's shy attribute (create or overwrite).
pub fn set_flag<S: MetaStore>(store: &mut S, id: PostId, value: &str) -> Result<()> {
    store.set_meta(id, META_KEY, value)
}

/// Read the post's shy attribute; `None` when no flag was ever saved.
pub fn get_flag<S: MetaStore>(store: &S, id: PostId) -> Result<Option<String>> {
    store.get_meta(id, META_KEY)
}

/// Whether a stored (or raw) flag value marks the post as shy.
pub fn is_shy(value: &str) -> bool {
    value == FLAG_ON
}

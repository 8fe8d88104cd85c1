use crate::error::Result;
use crate::index::ShyIndex;
use crate::store::MetaStore;
use crate::transient::TransientStore;

/// Activation: scan the metadata store and rewrite the shy-ID cache
/// wholesale. The only full scan in the plugin's lifetime; everything after
/// this is incremental. Returns how many flagged posts were found.
pub fn run<S, T>(store: &S, cache: &mut T, index: &ShyIndex) -> Result<usize>
where
    S: MetaStore,
    T: TransientStore,
{
    let ids = index.rebuild_full(store, cache)?;
    Ok(ids.len())
}

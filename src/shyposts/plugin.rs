//! # The Service Object
//!
//! [`ShyPosts`] is the one explicitly-constructed instance a host registers
//! at startup — the replacement for the original's construct-on-load
//! singleton. It owns the storage handles, config, capability checker, and
//! nonce registry, and implements [`HostHooks`] by dispatching to the
//! operation modules.
//!
//! The service is **dispatch only**: validation, cache bookkeeping, and
//! query mutation all live in `ops/*`; storage behavior lives behind the
//! store traits. This layer just wires them together.

use crate::auth::{AllowAll, Capabilities, Nonces};
use crate::config::ShyConfig;
use crate::error::Result;
use crate::flag::META_KEY;
use crate::hooks::{HostHooks, SaveOutcome, SaveRequest};
use crate::index::ShyIndex;
use crate::model::PostId;
use crate::ops;
use crate::query::ListingQuery;
use crate::store::MetaStore;
use crate::transient::TransientStore;
use crate::ui::MetaBox;

/// The shyposts service, generic over the host's metadata and cache
/// facilities.
pub struct ShyPosts<S: MetaStore, T: TransientStore> {
    store: S,
    cache: T,
    config: ShyConfig,
    index: ShyIndex,
    caps: Box<dyn Capabilities>,
    nonces: Nonces,
}

impl<S: MetaStore, T: TransientStore> ShyPosts<S, T> {
    /// Construct with permissive capabilities; hosts that gate editing
    /// themselves can use this directly.
    pub fn new(store: S, cache: T, config: ShyConfig) -> Self {
        let index = ShyIndex::new(config.cache_ttl());
        Self {
            store,
            cache,
            config,
            index,
            caps: Box::new(AllowAll),
            nonces: Nonces::new(),
        }
    }

    /// Swap in the host's permission model.
    pub fn with_capabilities(mut self, caps: Box<dyn Capabilities>) -> Self {
        self.caps = caps;
        self
    }

    pub fn config(&self) -> &ShyConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: MetaStore, T: TransientStore> HostHooks for ShyPosts<S, T> {
    fn on_activate(&mut self) -> Result<()> {
        ops::activate::run(&self.store, &mut self.cache, &self.index)?;
        Ok(())
    }

    fn on_save_post(&mut self, req: &SaveRequest) -> Result<SaveOutcome> {
        ops::save::run(
            &mut self.store,
            &mut self.cache,
            &self.index,
            self.caps.as_ref(),
            &mut self.nonces,
            req,
        )
    }

    fn on_pre_get_posts(&mut self, query: &mut ListingQuery) -> Result<bool> {
        ops::exclude::run(self.config.exclusion_mode, &self.index, &self.cache, query)
    }

    fn is_protected_meta(&self, key: &str) -> bool {
        key == META_KEY
    }

    fn on_render_meta_box(&mut self, post: PostId) -> Result<MetaBox> {
        ops::meta_box::run(&self.store, &mut self.nonces, post)
    }
}

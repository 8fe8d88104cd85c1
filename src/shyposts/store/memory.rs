use super::MetaStore;
use crate::error::Result;
use crate::model::PostId;
use std::collections::HashMap;

/// In-memory metadata storage for testing and embedding.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryMetaStore {
    meta: HashMap<(PostId, String), String>,
}

impl InMemoryMetaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetaStore for InMemoryMetaStore {
    fn set_meta(&mut self, id: PostId, key: &str, value: &str) -> Result<()> {
        self.meta.insert((id, key.to_string()), value.to_string());
        Ok(())
    }

    fn get_meta(&self, id: PostId, key: &str) -> Result<Option<String>> {
        Ok(self.meta.get(&(id, key.to_string())).cloned())
    }

    fn ids_with_meta(&self, key: &str, value: &str) -> Result<Vec<PostId>> {
        let mut ids: Vec<PostId> = self
            .meta
            .iter()
            .filter(|((_, k), v)| k == key && v.as_str() == value)
            .map(|((id, _), _)| *id)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::flag::{FLAG_OFF, FLAG_ON, META_KEY};

    pub struct StoreFixture {
        pub store: InMemoryMetaStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryMetaStore::new(),
            }
        }

        pub fn with_shy_post(mut self, id: u64) -> Self {
            self.store.set_meta(PostId(id), META_KEY, FLAG_ON).unwrap();
            self
        }

        pub fn with_plain_post(mut self, id: u64) -> Self {
            self.store.set_meta(PostId(id), META_KEY, FLAG_OFF).unwrap();
            self
        }
    }
}

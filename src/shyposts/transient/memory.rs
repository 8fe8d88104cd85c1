use super::TransientStore;
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// In-memory transient cache for testing and embedding.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryTransientStore {
    entries: HashMap<String, (String, DateTime<Utc>)>,
}

impl InMemoryTransientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force an entry's expiry into the past. Test hook for TTL behavior.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn expire(&mut self, key: &str) {
        if let Some((_, expires_at)) = self.entries.get_mut(key) {
            *expires_at = Utc::now() - Duration::seconds(1);
        }
    }
}

impl TransientStore for InMemoryTransientStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .get(key)
            .filter(|(_, expires_at)| *expires_at > Utc::now())
            .map(|(value, _)| value.clone()))
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries
            .insert(key.to_string(), (value.to_string(), Utc::now() + ttl));
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

use super::TransientStore;
use crate::error::{Result, ShyError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const TRANSIENTS_FILENAME: &str = "transients.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransientRecord {
    value: String,
    expires_at: DateTime<Utc>,
}

/// File-backed transient cache. One JSON file maps slot names to their
/// payload and expiry; every mutation rewrites the whole file (last write
/// wins on the entire slot map, same as the host facility).
pub struct FileTransientStore {
    root: PathBuf,
}

impl FileTransientStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn transients_file(&self) -> PathBuf {
        self.root.join(TRANSIENTS_FILENAME)
    }

    fn load_all(&self) -> Result<HashMap<String, TransientRecord>> {
        let path = self.transients_file();
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(path).map_err(ShyError::Io)?;
        let entries = serde_json::from_str(&content).map_err(ShyError::Serialization)?;
        Ok(entries)
    }

    fn save_all(&self, entries: &HashMap<String, TransientRecord>) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ShyError::Io)?;
        }
        let content = serde_json::to_string_pretty(entries).map_err(ShyError::Serialization)?;
        fs::write(self.transients_file(), content).map_err(ShyError::Io)?;
        Ok(())
    }
}

impl TransientStore for FileTransientStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.load_all()?;
        Ok(entries
            .get(key)
            .filter(|record| record.expires_at > Utc::now())
            .map(|record| record.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut entries = self.load_all()?;
        entries.insert(
            key.to_string(),
            TransientRecord {
                value: value.to_string(),
                expires_at: Utc::now() + ttl,
            },
        );
        self.save_all(&entries)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load_all()?;
        if entries.remove(key).is_some() {
            self.save_all(&entries)?;
        }
        Ok(())
    }
}

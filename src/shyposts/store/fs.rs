use super::MetaStore;
use crate::error::{Result, ShyError};
use crate::model::PostId;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const META_FILENAME: &str = "meta.json";

/// File-backed metadata storage. One JSON file maps record IDs to their
/// key/value pairs; every mutation rewrites the whole file (last write wins,
/// matching the host facility's contract).
pub struct FileMetaStore {
    root: PathBuf,
}

impl FileMetaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ShyError::Io)?;
        }
        Ok(())
    }

    fn meta_file(&self) -> PathBuf {
        self.root.join(META_FILENAME)
    }

    fn load_all(&self) -> Result<HashMap<PostId, HashMap<String, String>>> {
        let path = self.meta_file();
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(path).map_err(ShyError::Io)?;
        let meta = serde_json::from_str(&content).map_err(ShyError::Serialization)?;
        Ok(meta)
    }

    fn save_all(&self, meta: &HashMap<PostId, HashMap<String, String>>) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(meta).map_err(ShyError::Serialization)?;
        fs::write(self.meta_file(), content).map_err(ShyError::Io)?;
        Ok(())
    }
}

impl MetaStore for FileMetaStore {
    fn set_meta(&mut self, id: PostId, key: &str, value: &str) -> Result<()> {
        let mut meta = self.load_all()?;
        meta.entry(id)
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.save_all(&meta)
    }

    fn get_meta(&self, id: PostId, key: &str) -> Result<Option<String>> {
        let meta = self.load_all()?;
        Ok(meta.get(&id).and_then(|kv| kv.get(key)).cloned())
    }

    fn ids_with_meta(&self, key: &str, value: &str) -> Result<Vec<PostId>> {
        let meta = self.load_all()?;
        let mut ids: Vec<PostId> = meta
            .iter()
            .filter(|(_, kv)| kv.get(key).map(String::as_str) == Some(value))
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

//! Durable (and not-so-durable) implementations of [`Storage`]

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::traits::Storage;


/// A storage that lives in memory only. Useful for tests, or to run without touching the disk
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStorage {
    blobs: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        self.blobs.remove(key);
        Ok(())
    }
}


/// A storage that keeps every key in its own file, inside a folder
#[derive(Clone, Debug, PartialEq)]
pub struct FolderStorage {
    folder: PathBuf,
}

impl FolderStorage {
    /// The folder does not need to exist yet, it will be created on the first write
    pub fn new(folder: &Path) -> Self {
        Self { folder: PathBuf::from(folder) }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// The file that backs `key`. Keys are sanitized, so that they cannot escape the folder
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.folder.join(format!("{}.json", sanitize_filename::sanitize(key)))
    }
}

impl Storage for FolderStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.path_for(key);
        if path.exists() == false {
            return Ok(None);
        }
        match std::fs::read_to_string(&path) {
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
            Ok(content) => Ok(Some(content)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        if let Err(err) = std::fs::create_dir_all(&self.folder) {
            return Err(format!("Unable to create folder {:?}: {}", self.folder, err).into());
        }
        let path = self.path_for(key);
        if let Err(err) = std::fs::write(&path, value) {
            return Err(format!("Unable to write file {:?}: {}", path, err).into());
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Box<dyn Error>> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

//! Checksummed JSON saves behind a pluggable key-value store.
//!
//! The stored document is an envelope:
//!
//! ```json
//! { "version": 1, "savedAt": 1700000000, "checksum": "<sha256 hex>", "character": { ... } }
//! ```
//!
//! The checksum covers the compact JSON of `character`. Object keys are
//! serialized in sorted order, so the digest is stable across saves.

use super::types::Character;
use crate::core::constants::{SAVE_FORMAT_VERSION, SAVE_KEY};
use crate::core::error::SaveError;
use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Durable string storage keyed by name.
pub trait SaveStore {
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    fn write(&mut self, key: &str, contents: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Uses the platform config directory, e.g. `~/.config/idle-rpg`.
    pub fn new() -> Result<Self, SaveError> {
        let project_dirs = ProjectDirs::from("", "", "idle-rpg").ok_or(SaveError::NoSaveDir)?;
        Ok(Self::in_dir(project_dirs.config_dir())?)
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SaveStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> io::Result<()> {
        // Write-then-rename so a crash never leaves a half-written save.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-process store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores raw text, bypassing the envelope.
    pub fn insert_raw(&mut self, key: &str, contents: impl Into<String>) {
        self.entries.insert(key.to_string(), contents.into());
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveEnvelope {
    version: u32,
    saved_at: i64,
    checksum: String,
    character: Value,
}

/// Hex SHA-256 of the compact JSON form of `character`.
pub fn compute_checksum(character: &Value) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_string(character)?;
    let digest = Sha256::digest(canonical.as_bytes());
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

pub fn save_character(store: &mut impl SaveStore, character: &Character) -> Result<(), SaveError> {
    let value = serde_json::to_value(character)?;
    let envelope = SaveEnvelope {
        version: SAVE_FORMAT_VERSION,
        saved_at: chrono::Utc::now().timestamp(),
        checksum: compute_checksum(&value)?,
        character: value,
    };
    store.write(SAVE_KEY, &serde_json::to_string(&envelope)?)?;
    debug!("saved {} at level {}", character.name, character.level);
    Ok(())
}

/// Reads the stored character. A missing, unreadable, tampered or
/// wrong-version save is treated as no save.
pub fn load_character(store: &impl SaveStore) -> Option<Character> {
    let raw = match store.read(SAVE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no saved character");
            return None;
        }
        Err(e) => {
            warn!("could not read save: {}", e);
            return None;
        }
    };

    let envelope: SaveEnvelope = match serde_json::from_str(&raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("discarding malformed save: {}", e);
            return None;
        }
    };

    if envelope.version != SAVE_FORMAT_VERSION {
        warn!(
            "discarding save with format version {} (expected {})",
            envelope.version, SAVE_FORMAT_VERSION
        );
        return None;
    }

    match compute_checksum(&envelope.character) {
        Ok(sum) if sum == envelope.checksum => {}
        _ => {
            warn!("discarding save: checksum mismatch");
            return None;
        }
    }

    match serde_json::from_value(envelope.character) {
        Ok(character) => Some(character),
        Err(e) => {
            warn!("discarding save with unreadable character: {}", e);
            None
        }
    }
}

pub fn clear_save(store: &mut impl SaveStore) -> Result<(), SaveError> {
    store.remove(SAVE_KEY)?;
    Ok(())
}

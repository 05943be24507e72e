//! Persistent key/value area (the client's equivalent of browser local storage).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::StorageError;

/// Synchronous string key/value storage.
pub trait KeyValueStore: Send + Sync {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
	fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Non-persistent storage; the session dies with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Storage pre-populated with one entry.
	pub fn with_entry(key: &str, value: &str) -> Self {
		let storage = Self::new();
		storage.entries.lock().insert(key.to_string(), value.to_string());
		storage
	}
}

impl KeyValueStore for MemoryStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.entries.lock().get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.entries.lock().insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		self.entries.lock().remove(key);
		Ok(())
	}
}

/// Key/value map persisted as a pretty-printed JSON object.
///
/// The whole file is rewritten on every mutation; writes are serialized by an
/// in-process lock.
#[derive(Debug)]
pub struct JsonFileStorage {
	path: PathBuf,
	lock: Mutex<()>,
}

impl JsonFileStorage {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			lock: Mutex::new(()),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
		let content = match fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
			Err(err) => return Err(StorageError::Io(format!("{}: {err}", self.path.display()))),
		};
		if content.trim().is_empty() {
			return Ok(BTreeMap::new());
		}
		serde_json::from_str(&content).map_err(|e| StorageError::Corrupt(format!("{}: {e}", self.path.display())))
	}

	fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
		if let Some(parent) = self.path.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent).map_err(|e| StorageError::Io(format!("{}: {e}", parent.display())))?;
			}
		}
		let json = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Corrupt(e.to_string()))?;
		fs::write(&self.path, json).map_err(|e| StorageError::Io(format!("{}: {e}", self.path.display())))
	}
}

impl KeyValueStore for JsonFileStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		let _guard = self.lock.lock();
		Ok(self.read_all()?.remove(key))
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		let _guard = self.lock.lock();
		// A corrupt file is replaced rather than blocking every login.
		let mut entries = self.read_all().unwrap_or_default();
		entries.insert(key.to_string(), value.to_string());
		self.write_all(&entries)
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		let _guard = self.lock.lock();
		let mut entries = match self.read_all() {
			Ok(entries) => entries,
			Err(StorageError::Corrupt(_)) => return self.write_all(&BTreeMap::new()),
			Err(err) => return Err(err),
		};
		if entries.remove(key).is_none() {
			return Ok(());
		}
		self.write_all(&entries)
	}
}

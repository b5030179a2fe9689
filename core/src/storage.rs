use crate::errors::{ThemeError, ThemeResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Key under which the theme preference is persisted
pub const THEME_KEY: &str = "theme";

/// Synchronous key-value storage for persisted preferences.
///
/// Implementations report every failure as [`ThemeError::StorageUnavailable`];
/// callers decide how to degrade.
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`, `Ok(None)` when nothing is stored
    fn get(&self, key: &str) -> ThemeResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> ThemeResult<()>;
}

/// In-process store, optionally simulating a sandboxed host where reads or
/// writes are refused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.insert(key, value);
        store
    }

    /// Store that refuses both reads and writes
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_fail_reads(true);
        store.set_fail_writes(true);
        store
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Insert bypassing failure injection
    pub fn insert(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    /// Read bypassing failure injection
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> ThemeResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ThemeError::storage("reads are disabled"));
        }
        let entries = self
            .entries
            .lock()
            .map_err(|e| ThemeError::storage(format!("store lock poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ThemeResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ThemeError::storage("writes are disabled"));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| ThemeError::storage(format!("store lock poisoned: {e}")))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat TOML table on disk.
///
/// Keys other than the ones written through this store are left untouched.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_table(&self) -> ThemeResult<Option<toml::Table>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ThemeError::storage(format!(
                    "Failed to read '{}': {e}",
                    self.path.display()
                )));
            }
        };

        content.parse::<toml::Table>().map(Some).map_err(|e| {
            ThemeError::storage(format!("Failed to parse '{}': {e}", self.path.display()))
        })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> ThemeResult<Option<String>> {
        let Some(table) = self.read_table()? else {
            return Ok(None);
        };

        // Non-string values are handed back in their TOML form so the caller
        // rejects them as unrecognized rather than as missing.
        Ok(table.get(key).map(|value| match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&self, key: &str, value: &str) -> ThemeResult<()> {
        let mut table = match self.read_table() {
            Ok(table) => table.unwrap_or_default(),
            Err(e) => {
                log::warn!("Discarding unreadable state file contents: {e}");
                toml::Table::new()
            }
        };
        table.insert(key.to_string(), toml::Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ThemeError::storage(format!(
                        "Failed to create directory '{}': {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let content = toml::to_string(&table)
            .map_err(|e| ThemeError::storage(format!("Failed to serialize state: {e}")))?;

        // Temp file then rename, so a torn write never replaces the table
        let temp_path = self.temp_path();
        fs::write(&temp_path, content).map_err(|e| {
            ThemeError::storage(format!("Failed to write '{}': {e}", temp_path.display()))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ThemeError::storage(format!(
                "Failed to move '{}' into place at '{}': {e}",
                temp_path.display(),
                self.path.display()
            ))
        })
    }
}

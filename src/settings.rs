//! Storage hooks for persisted reader settings.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorPhase, StyleError};
use crate::theme::ThemeSettings;

/// Durable key-value storage for reader settings.
pub trait SettingsStore {
    /// Load persisted settings, if any.
    fn load_theme_settings(&self) -> Option<ThemeSettings> {
        None
    }

    /// Persist settings.
    fn store_theme_settings(&self, _settings: &ThemeSettings) {}
}

/// Process-local store for previews and tests.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    slot: Mutex<Option<ThemeSettings>>,
}

impl MemorySettingsStore {
    /// Store pre-seeded with `settings`.
    pub fn with_settings(settings: ThemeSettings) -> Self {
        Self {
            slot: Mutex::new(Some(settings)),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load_theme_settings(&self) -> Option<ThemeSettings> {
        match self.slot.lock() {
            Ok(slot) => *slot,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn store_theme_settings(&self, settings: &ThemeSettings) {
        match self.slot.lock() {
            Ok(mut slot) => *slot = Some(*settings),
            Err(poisoned) => *poisoned.into_inner() = Some(*settings),
        }
    }
}

const SETTINGS_SCHEMA_VERSION: u8 = 1;
const DEFAULT_MAX_SETTINGS_FILE_BYTES: usize = 16 * 1024;
const SETTINGS_FILE_NAME: &str = "reader-settings.json";
static SETTINGS_WRITE_NONCE: AtomicUsize = AtomicUsize::new(0);

#[derive(Serialize, Deserialize)]
struct PersistedSettingsEnvelope {
    version: u8,
    settings: ThemeSettings,
}

/// File-backed settings store.
///
/// Settings live at `<root>/reader-settings.json` inside a JSON envelope with
/// a schema version. Writes go through a temp file and a rename. `max_file_bytes`
/// is enforced on both reads and writes. The trait methods log and swallow
/// failures; [`read`](Self::read) and [`write`](Self::write) report them.
#[derive(Clone, Debug)]
pub struct FileSettingsStore {
    root: PathBuf,
    max_file_bytes: usize,
}

impl FileSettingsStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_file_bytes: DEFAULT_MAX_SETTINGS_FILE_BYTES,
        }
    }

    /// Set the maximum settings file size in bytes.
    ///
    /// Values of `0` are treated as `1` to keep the cap explicit.
    pub fn with_max_file_bytes(mut self, max_file_bytes: usize) -> Self {
        self.max_file_bytes = max_file_bytes.max(1);
        self
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }

    /// Read persisted settings. `Ok(None)` when no file exists yet.
    pub fn read(&self) -> Result<Option<ThemeSettings>, StyleError> {
        let path = self.settings_path();
        let path_str = path.display().to_string();
        let len = match fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("SETTINGS_READ_ERROR", &e).with_path(path_str)),
        };
        if len > self.max_file_bytes as u64 {
            return Err(too_large(len as usize, self.max_file_bytes).with_path(path_str));
        }
        let file = File::open(&path)
            .map_err(|e| io_error("SETTINGS_READ_ERROR", &e).with_path(path_str.clone()))?;
        let mut reader = file.take(self.max_file_bytes as u64 + 1);
        let mut payload = Vec::with_capacity(len as usize);
        reader
            .read_to_end(&mut payload)
            .map_err(|e| io_error("SETTINGS_READ_ERROR", &e).with_path(path_str.clone()))?;
        if payload.len() > self.max_file_bytes {
            return Err(too_large(payload.len(), self.max_file_bytes).with_path(path_str));
        }
        let envelope: PersistedSettingsEnvelope = serde_json::from_slice(&payload)
            .map_err(|e| StyleError::decode("settings envelope", &e).with_path(path_str.clone()))?;
        if envelope.version != SETTINGS_SCHEMA_VERSION {
            return Err(StyleError::new(
                ErrorPhase::Settings,
                "SETTINGS_SCHEMA_MISMATCH",
                format!(
                    "Unsupported settings schema version {} (expected {})",
                    envelope.version, SETTINGS_SCHEMA_VERSION
                ),
            )
            .with_path(path_str));
        }
        Ok(Some(envelope.settings))
    }

    /// Write settings atomically.
    pub fn write(&self, settings: &ThemeSettings) -> Result<(), StyleError> {
        let final_path = self.settings_path();
        fs::create_dir_all(&self.root).map_err(|e| {
            io_error("SETTINGS_WRITE_ERROR", &e).with_path(self.root.display().to_string())
        })?;
        let envelope = PersistedSettingsEnvelope {
            version: SETTINGS_SCHEMA_VERSION,
            settings: *settings,
        };
        let payload = serde_json::to_vec(&envelope).map_err(|e| {
            StyleError::new(ErrorPhase::Settings, "SETTINGS_ENCODE_ERROR", e.to_string())
        })?;
        if payload.len() > self.max_file_bytes {
            return Err(too_large(payload.len(), self.max_file_bytes)
                .with_path(final_path.display().to_string()));
        }

        let nonce = SETTINGS_WRITE_NONCE.fetch_add(1, Ordering::Relaxed);
        let temp_path = self.root.join(format!(
            "{}.tmp-{}-{}",
            SETTINGS_FILE_NAME,
            std::process::id(),
            nonce
        ));
        let temp_str = temp_path.display().to_string();
        let result = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                writer.write_all(&payload)?;
                writer.flush()?;
                writer.into_inner().map_err(|e| e.into_error())?.sync_all()
            })
            .and_then(|()| fs::rename(&temp_path, &final_path));
        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(io_error("SETTINGS_WRITE_ERROR", &e).with_path(temp_str));
        }
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn load_theme_settings(&self) -> Option<ThemeSettings> {
        match self.read() {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Ignoring persisted reader settings: {}", err);
                None
            }
        }
    }

    fn store_theme_settings(&self, settings: &ThemeSettings) {
        if let Err(err) = self.write(settings) {
            log::warn!("Failed to persist reader settings: {}", err);
        }
    }
}

fn io_error(code: &'static str, err: &std::io::Error) -> StyleError {
    StyleError::new(ErrorPhase::Settings, code, err.to_string())
}

fn too_large(actual: usize, limit: usize) -> StyleError {
    StyleError::new(
        ErrorPhase::Settings,
        "SETTINGS_FILE_TOO_LARGE",
        format!(
            "Settings file exceeds max_file_bytes ({} > {})",
            actual, limit
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ReaderSize, ReaderTheme, ReaderTypeface};

    fn temp_root(label: &str) -> PathBuf {
        let mut root = std::env::temp_dir();
        root.push(format!(
            "lesson-style-settings-{}-{}-{}",
            label,
            std::process::id(),
            SETTINGS_WRITE_NONCE.fetch_add(1, Ordering::Relaxed)
        ));
        root
    }

    fn sample() -> ThemeSettings {
        ThemeSettings {
            theme: ReaderTheme::Sepia,
            size: ReaderSize::Large,
            typeface: ReaderTypeface::Andada,
        }
    }

    #[test]
    fn file_store_roundtrip() {
        let root = temp_root("roundtrip");
        let store = FileSettingsStore::new(&root);
        assert_eq!(store.read().expect("missing file is not an error"), None);

        store.store_theme_settings(&sample());
        assert!(store.settings_path().exists());
        let raw = fs::read_to_string(store.settings_path()).expect("file should be readable");
        let payload: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(payload["version"], 1);
        assert_eq!(payload["settings"]["theme"], "sepia");

        assert_eq!(store.load_theme_settings(), Some(sample()));
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn file_store_rejects_oversized_and_foreign_payloads() {
        let root = temp_root("limits");
        let tiny = FileSettingsStore::new(&root).with_max_file_bytes(8);
        let err = tiny.write(&sample()).expect_err("payload exceeds cap");
        assert_eq!(err.code, "SETTINGS_FILE_TOO_LARGE");
        assert!(tiny.load_theme_settings().is_none());

        let store = FileSettingsStore::new(&root);
        fs::create_dir_all(&root).expect("create root");
        fs::write(
            store.settings_path(),
            br#"{"version": 9, "settings": {"theme": "dark"}}"#,
        )
        .expect("write fixture");
        let err = store.read().expect_err("schema mismatch");
        assert_eq!(err.code, "SETTINGS_SCHEMA_MISMATCH");
        assert_eq!(store.load_theme_settings(), None);

        fs::write(store.settings_path(), b"not json").expect("write fixture");
        assert_eq!(
            store.read().expect_err("garbage").code,
            "STYLE_DECODE_ERROR"
        );
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn memory_store_keeps_last_write() {
        let store = MemorySettingsStore::default();
        assert_eq!(store.load_theme_settings(), None);
        store.store_theme_settings(&sample());
        assert_eq!(store.load_theme_settings(), Some(sample()));
        let seeded = MemorySettingsStore::with_settings(ThemeSettings::default());
        assert_eq!(
            seeded.load_theme_settings(),
            Some(ThemeSettings::default())
        );
    }
}

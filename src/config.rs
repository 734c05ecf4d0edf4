use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

use crate::error::Result;

/// Durable settings shared across sessions
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub best_streak: u32,
    pub is_dark_mode: bool,
}

pub trait SettingsStore {
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "klokka") {
            pd.config_dir().join("settings.json")
        } else {
            PathBuf::from("klokka_settings.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Settings {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Settings::default(),
        };
        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable settings file");
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(settings)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-process store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    slot: Arc<Mutex<(Settings, usize)>>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            slot: Arc::new(Mutex::new((settings, 0))),
        }
    }

    pub fn current(&self) -> Settings {
        self.slot.lock().map(|s| s.0).unwrap_or_default()
    }

    /// Number of completed saves
    pub fn saves(&self) -> usize {
        self.slot.lock().map(|s| s.1).unwrap_or_default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Settings {
        self.current()
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            slot.0 = *settings;
            slot.1 += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileSettingsStore::with_path(&path);
        let settings = Settings::default();
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn save_and_load_custom_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let store = FileSettingsStore::with_path(&path);
        let settings = Settings {
            best_streak: 12,
            is_dark_mode: true,
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileSettingsStore::with_path(&path);
        store
            .save(&Settings {
                best_streak: 3,
                is_dark_mode: false,
            })
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"bestStreak\": 3"));
        assert!(text.contains("\"isDarkMode\": false"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let store = FileSettingsStore::with_path(&path);
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, br#"{"bestStreak": 7}"#).unwrap();
        let store = FileSettingsStore::with_path(&path);
        assert_eq!(
            store.load(),
            Settings {
                best_streak: 7,
                is_dark_mode: false
            }
        );
    }

    #[test]
    fn memory_store_shares_state_between_clones() {
        let store = MemorySettingsStore::new(Settings::default());
        let handle = store.clone();
        store
            .save(&Settings {
                best_streak: 4,
                is_dark_mode: true,
            })
            .unwrap();
        assert_eq!(handle.current().best_streak, 4);
        assert_eq!(handle.saves(), 1);
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Paths ─────────────────────────────────────────────────────────────────────

pub const DATA_DIR_ENV: &str = "PLAYCOVER_SETTINGS_DIR";

pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_dir()
        .map(|d| d.join("playcover-settings"))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn log_file(data_dir: &Path) -> PathBuf {
    data_dir.join("playcover-settings.log")
}

// ── JSON helpers ──────────────────────────────────────────────────────────────

/// Read `path` as JSON. A missing or unreadable file yields `None`.
pub fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Option<T> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), %err, "could not read file");
            }
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring malformed json");
            None
        }
    }
}

pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

// ── App settings ──────────────────────────────────────────────────────────────

pub const REFRESH_RATES: &[u32] = &[60, 120];

/// `(model identifier, label)`
pub const IOS_DEVICES: &[(&str, &str)] = &[
    ("iPad6,7", "iPad Pro (12.9-inch) (1st gen) | A9X | 4GB"),
    ("iPad8,6", "iPad Pro (12.9-inch) (3rd gen) | A12Z | 4GB"),
    ("iPad13,8", "iPad Pro (12.9-inch) (5th gen) | M1 | 8GB"),
];

pub fn device_label(model: &str) -> &str {
    IOS_DEVICES
        .iter()
        .find(|(id, _)| *id == model)
        .map(|(_, label)| *label)
        .unwrap_or(model)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub keymapping: bool,
    pub mouse_mapping: bool,
    pub sensitivity: f32,
    pub disable_timeout: bool,
    pub ios_device_model: String,
    pub refresh_rate: u32,
    pub window_width: i32,
    pub window_height: i32,
    pub bypass: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            keymapping: true,
            mouse_mapping: true,
            sensitivity: 50.0,
            disable_timeout: false,
            ios_device_model: "iPad8,6".into(),
            refresh_rate: 60,
            window_width: 1920,
            window_height: 1080,
            bypass: false,
        }
    }
}

// ── App info ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AppInfo {
    pub display_name: String,
    pub bundle_name: String,
    pub bundle_identifier: String,
    pub bundle_version: String,
    pub executable_name: String,
    #[serde(rename = "minimumOSVersion")]
    pub minimum_os_version: String,
    pub url: String,
    pub is_game: bool,
}

impl AppInfo {
    /// Name shown in the settings header. Falls back through the bundle
    /// name to the identifier.
    pub fn name(&self) -> &str {
        [&self.display_name, &self.bundle_name, &self.bundle_identifier]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("Unknown App")
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// File-backed settings for one installed app.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    data_dir: PathBuf,
    bundle_id: String,
}

impl SettingsStore {
    pub fn new(data_dir: impl Into<PathBuf>, bundle_id: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            bundle_id: bundle_id.into(),
        }
    }

    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }

    pub fn settings_file(&self) -> PathBuf {
        self.data_dir
            .join("App Settings")
            .join(format!("{}.json", self.bundle_id))
    }

    pub fn info_file(&self) -> PathBuf {
        self.data_dir
            .join("Apps")
            .join(&self.bundle_id)
            .join("info.json")
    }

    pub fn load_settings(&self) -> AppSettings {
        load_json(&self.settings_file()).unwrap_or_else(|| {
            tracing::info!(bundle = %self.bundle_id, "no stored settings, using defaults");
            AppSettings::default()
        })
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        save_json(&self.settings_file(), settings)
    }

    /// Overwrite the stored settings with defaults and return them.
    pub fn reset(&self) -> Result<AppSettings> {
        let settings = AppSettings::default();
        self.save_settings(&settings)?;
        tracing::info!(bundle = %self.bundle_id, "settings reset to defaults");
        Ok(settings)
    }

    pub fn load_info(&self) -> AppInfo {
        let mut info: AppInfo = load_json(&self.info_file()).unwrap_or_default();
        if info.bundle_identifier.is_empty() {
            info.bundle_identifier = self.bundle_id.clone();
        }
        info
    }
}

// ── Header ────────────────────────────────────────────────────────────────────

pub const HEADER_LINES: &[&str] = &["PLAYCOVER", "APP SETTINGS"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path(), "com.example.game");
        assert_eq!(store.load_settings(), AppSettings::default());
    }

    #[test]
    fn settings_survive_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path(), "com.example.game");
        let mut settings = AppSettings::default();
        settings.bypass = true;
        settings.refresh_rate = 120;
        settings.window_width = 2304;
        settings.window_height = 1440;
        store.save_settings(&settings).unwrap();
        assert!(store.settings_file().ends_with("App Settings/com.example.game.json"));
        assert_eq!(store.load_settings(), settings);
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path(), "a.b");
        save_json(
            &store.settings_file(),
            &serde_json::json!({ "bypass": true, "sensitivity": 12.0 }),
        )
        .unwrap();
        let loaded = store.load_settings();
        assert!(loaded.bypass);
        assert_eq!(loaded.sensitivity, 12.0);
        assert_eq!(loaded.ios_device_model, "iPad8,6");
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path(), "a.b");
        std::fs::create_dir_all(store.settings_file().parent().unwrap()).unwrap();
        std::fs::write(store.settings_file(), "{not json").unwrap();
        assert_eq!(store.load_settings(), AppSettings::default());
    }

    #[test]
    fn reset_overwrites_stored_settings() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path(), "a.b");
        let mut settings = AppSettings::default();
        settings.keymapping = false;
        store.save_settings(&settings).unwrap();
        assert_eq!(store.reset().unwrap(), AppSettings::default());
        assert_eq!(store.load_settings(), AppSettings::default());
    }

    #[test]
    fn info_defaults_to_requested_bundle_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path(), "com.example.game");
        let info = store.load_info();
        assert_eq!(info.bundle_identifier, "com.example.game");
        assert_eq!(info.name(), "com.example.game");
    }

    #[test]
    fn info_reads_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path(), "com.example.game");
        save_json(
            &store.info_file(),
            &serde_json::json!({
                "displayName": "Example",
                "bundleIdentifier": "com.example.game",
                "minimumOSVersion": "14.0",
                "isGame": true
            }),
        )
        .unwrap();
        let info = store.load_info();
        assert_eq!(info.name(), "Example");
        assert_eq!(info.minimum_os_version, "14.0");
        assert!(info.is_game);
    }

    #[test]
    fn device_label_falls_back_to_raw_model() {
        assert_eq!(
            device_label("iPad13,8"),
            "iPad Pro (12.9-inch) (5th gen) | M1 | 8GB"
        );
        assert_eq!(device_label("iPhone1,1"), "iPhone1,1");
    }
}

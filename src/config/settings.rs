//! Sound presets and theme selection persisted as JSON
//!
//! The store is created once in `main` and handed to the GUI by `&mut`.
//! Every mutation is written to disk before returning.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::door::DEFAULT_MAX_OCCLUSION;
use crate::constants::settings::*;
use crate::types::NameIssue;

/// Named bundle of default door audio values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundPreset {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "Sounds", default)]
    pub sounds: String,
    #[serde(rename = "TuningParams", default)]
    pub tuning_params: String,
    #[serde(rename = "MaxOcclusion", default = "default_max_occlusion")]
    pub max_occlusion: f32,
}

impl SoundPreset {
    pub fn new(
        name: impl Into<String>,
        sounds: impl Into<String>,
        tuning_params: impl Into<String>,
        max_occlusion: f32,
    ) -> Self {
        Self {
            name: name.into(),
            sounds: sounds.into(),
            tuning_params: tuning_params.into(),
            max_occlusion,
        }
    }
}

impl Default for SoundPreset {
    fn default() -> Self {
        Self::new("", "", "", DEFAULT_MAX_OCCLUSION)
    }
}

/// On-disk settings document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "availableDoorSound", default)]
    pub presets: Vec<SoundPreset>,
    #[serde(rename = "selectedThemeIndex", default = "default_theme_index")]
    pub theme_index: usize,
}

// Default value functions
fn default_max_occlusion() -> f32 {
    DEFAULT_MAX_OCCLUSION
}

fn default_theme_index() -> usize {
    DEFAULT_THEME_INDEX
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            presets: Vec::new(),
            theme_index: default_theme_index(),
        }
    }
}

/// Settings bound to the file they are loaded from and saved to
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Store with default settings at `path`; nothing is read
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: Settings::default(),
        }
    }

    /// Resolve the settings path and load it, keeping defaults on failure
    pub fn open(explicit: Option<PathBuf>) -> Self {
        let mut store = Self::new(Self::resolve_path(explicit));
        if let Err(err) = store.load() {
            warn!(path = %store.path.display(), error = %format!("{err:#}"), "Using default settings");
        }
        store
    }

    /// Explicit path, else the first existing relative candidate, else the user config dir
    pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
        if let Some(path) = explicit {
            return path;
        }

        let candidates: Vec<PathBuf> = std::iter::once(PRIMARY_PATH)
            .chain(FALLBACK_PATHS)
            .map(PathBuf::from)
            .collect();

        let fallback = match dirs::config_dir() {
            Some(mut path) => {
                path.push(APP_DIR);
                path.push(FILENAME);
                path
            }
            None => PathBuf::from(PRIMARY_PATH),
        };

        first_existing(&candidates).unwrap_or(fallback)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn presets(&self) -> &[SoundPreset] {
        &self.settings.presets
    }

    pub fn preset(&self, index: usize) -> Option<&SoundPreset> {
        self.settings.presets.get(index)
    }

    pub fn theme_index(&self) -> usize {
        self.settings.theme_index
    }

    /// Replace in-memory settings with the file contents
    /// On any failure the in-memory settings fall back to defaults
    pub fn load(&mut self) -> Result<()> {
        match read_settings(&self.path) {
            Ok(settings) => {
                info!(
                    path = %self.path.display(),
                    presets = settings.presets.len(),
                    theme = settings.theme_index,
                    "Loaded settings"
                );
                self.settings = settings;
                Ok(())
            }
            Err(err) => {
                self.settings = Settings::default();
                Err(err)
            }
        }
    }

    /// Write the full in-memory state, pretty-printed
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.settings
            .serialize(&mut serializer)
            .context("Failed to serialize settings to JSON")?;

        fs::write(&self.path, buf)
            .with_context(|| format!("Failed to write settings to {:?}", self.path))?;

        debug!(path = %self.path.display(), "Saved settings");
        Ok(())
    }

    /// Drop any preset with the same name, then append
    /// An existing preset therefore moves to the end of the list
    pub fn add_or_replace_preset(&mut self, preset: SoundPreset) -> Result<()> {
        let before = self.settings.presets.len();
        self.settings.presets.retain(|p| p.name != preset.name);
        let replaced = before != self.settings.presets.len();

        info!(preset = %preset.name, replaced, "Stored sound preset");
        self.settings.presets.push(preset);
        self.save()
    }

    /// Remove the first preset named `name`; returns whether one was removed
    pub fn remove_preset(&mut self, name: &str) -> Result<bool> {
        let Some(index) = self.settings.presets.iter().position(|p| p.name == name) else {
            return Ok(false);
        };

        self.settings.presets.remove(index);
        info!(preset = %name, "Removed sound preset");
        self.save()?;
        Ok(true)
    }

    pub fn has_preset(&self, name: &str) -> bool {
        self.settings.presets.iter().any(|p| p.name == name)
    }

    /// Replace the preset at `index` without reordering; out of range is ignored
    pub fn update_preset_at(&mut self, index: usize, preset: SoundPreset) -> Result<()> {
        let Some(slot) = self.settings.presets.get_mut(index) else {
            debug!(index, len = self.settings.presets.len(), "Ignoring preset update past end of list");
            return Ok(());
        };

        info!(preset = %preset.name, index, "Updated sound preset");
        *slot = preset;
        self.save()
    }

    pub fn set_theme_index(&mut self, index: usize) -> Result<()> {
        self.settings.theme_index = index;
        info!(theme = index, "Selected theme");
        self.save()
    }

    /// Empty or duplicate check for the preset form
    pub fn preset_name_issue(&self, name: &str, excluding: Option<usize>) -> Option<NameIssue> {
        NameIssue::check(name, |n| match excluding {
            None => self.has_preset(n),
            Some(skip) => self
                .settings
                .presets
                .iter()
                .enumerate()
                .any(|(i, p)| i != skip && p.name == n),
        })
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("No settings file at {:?}", path))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse settings JSON from {:?}", path))
}

fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|path| path.is_file()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("assets").join("settings.json"))
    }

    fn preset(name: &str) -> SoundPreset {
        SoundPreset::new(name, format!("{name}_sounds"), format!("{name}_tuning"), 0.5)
    }

    fn names(store: &SettingsStore) -> Vec<&str> {
        store.presets().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_load_missing_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        assert!(store.load().is_err());
        assert!(store.presets().is_empty());
        assert_eq!(store.theme_index(), 1);
    }

    #[test]
    fn test_load_invalid_json_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = SettingsStore::new(&path);
        store.settings.theme_index = 5;
        assert!(store.load().is_err());
        assert_eq!(store.settings, Settings::default());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_or_replace_preset(preset("heavy")).unwrap();
        store.add_or_replace_preset(SoundPreset::new("light", "dlc \"a\"", "tp", 0.25)).unwrap();
        store.set_theme_index(8).unwrap();

        let mut reloaded = SettingsStore::new(store.path());
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings, store.settings);
    }

    #[test]
    fn test_saved_json_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_or_replace_preset(preset("heavy")).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["selectedThemeIndex"], 1);
        let first = &json["availableDoorSound"][0];
        assert_eq!(first["name"], "heavy");
        assert_eq!(first["Sounds"], "heavy_sounds");
        assert_eq!(first["TuningParams"], "heavy_tuning");
        assert_eq!(first["MaxOcclusion"], 0.5);
        assert!(contents.contains("\n    \""), "expected 4-space indent");
    }

    #[test]
    fn test_load_tolerates_missing_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "availableDoorSound": [ { "name": "bare" } ] }"#).unwrap();

        let mut store = SettingsStore::new(&path);
        store.load().unwrap();
        assert_eq!(store.theme_index(), 1);
        assert_eq!(store.presets(), [SoundPreset::new("bare", "", "", 0.7)]);

        fs::write(&path, "{}").unwrap();
        store.load().unwrap();
        assert!(store.presets().is_empty());
    }

    #[test]
    fn test_add_or_replace_moves_existing_to_end() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        for name in ["a", "b", "c"] {
            store.add_or_replace_preset(preset(name)).unwrap();
        }

        store.add_or_replace_preset(SoundPreset::new("a", "changed", "", 0.1)).unwrap();
        assert_eq!(names(&store), ["b", "c", "a"]);
        assert_eq!(store.preset(2).unwrap().sounds, "changed");
    }

    #[test]
    fn test_update_preset_at_keeps_position() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        for name in ["a", "b", "c"] {
            store.add_or_replace_preset(preset(name)).unwrap();
        }

        store.update_preset_at(0, SoundPreset::new("a2", "x", "y", 0.9)).unwrap();
        assert_eq!(names(&store), ["a2", "b", "c"]);

        store.update_preset_at(7, preset("z")).unwrap();
        assert_eq!(names(&store), ["a2", "b", "c"]);
    }

    #[test]
    fn test_remove_and_has_preset() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_or_replace_preset(preset("a")).unwrap();
        store.add_or_replace_preset(preset("b")).unwrap();

        assert!(store.has_preset("a"));
        assert!(store.remove_preset("a").unwrap());
        assert!(!store.has_preset("a"));
        assert!(!store.remove_preset("a").unwrap());
        assert_eq!(names(&store), ["b"]);

        let mut reloaded = SettingsStore::new(store.path());
        reloaded.load().unwrap();
        assert_eq!(names(&reloaded), ["b"]);
    }

    #[test]
    fn test_preset_name_issue() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add_or_replace_preset(preset("a")).unwrap();
        store.add_or_replace_preset(preset("b")).unwrap();

        assert_eq!(store.preset_name_issue("", None), Some(NameIssue::Empty));
        assert_eq!(store.preset_name_issue("b", None), Some(NameIssue::Duplicate));
        assert_eq!(store.preset_name_issue("b", Some(1)), None);
        assert_eq!(store.preset_name_issue("c", None), None);
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "").unwrap();

        let mut store = SettingsStore::new(blocker.join("settings.json"));
        let result = store.add_or_replace_preset(preset("a"));
        assert!(result.is_err());
        // In-memory state still reflects the mutation
        assert!(store.has_preset("a"));
    }

    #[test]
    fn test_first_existing_candidate() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let present = dir.path().join("present.json");
        fs::write(&present, "{}").unwrap();

        assert_eq!(first_existing(&[missing.clone(), present.clone()]), Some(present));
        assert_eq!(first_existing(&[missing]), None);
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/custom/settings.json");
        assert_eq!(SettingsStore::resolve_path(Some(path.clone())), path);
    }
}

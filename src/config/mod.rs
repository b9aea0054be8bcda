//! Configuration management for the door audio tool
//!
//! - **settings**: SettingsStore holding sound presets and the selected theme (JSON)
//! - **theme**: named theme indices stored in the settings file

pub mod settings;
pub mod theme;

// Re-export commonly used types
pub use settings::{SettingsStore, SoundPreset};
pub use theme::Theme;

//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Door record defaults
pub mod door {
    /// Max occlusion used for new doors, presets and unreadable imports
    pub const DEFAULT_MAX_OCCLUSION: f32 = 0.7;
}

/// Settings file location
pub mod settings {
    /// Primary settings path, relative to the working directory
    pub const PRIMARY_PATH: &str = "assets/settings.json";

    /// Tried in order after PRIMARY_PATH when launched from a build directory
    pub const FALLBACK_PATHS: [&str; 2] = ["../assets/settings.json", "../../assets/settings.json"];

    /// Directory under the user config dir used when no assets file exists
    pub const APP_DIR: &str = "door-audio-tool";

    pub const FILENAME: &str = "settings.json";

    /// Dark
    pub const DEFAULT_THEME_INDEX: usize = 1;
}

/// Dat151 (game audio relation file) XML format
pub mod dat151 {
    pub const ROOT: &str = "Dat151";

    /// Format marker written into `<Version value="..."/>`, never computed
    pub const VERSION: &str = "9458585";

    pub const DOOR_SETTINGS_TYPE: &str = "DoorAudioSettings";
    pub const DOOR_LINK_TYPE: &str = "DoorAudioSettingsLink";

    /// Prefix on DoorAudioSettings names
    pub const DOOR_PREFIX: &str = "d_";

    /// Prefix on DoorAudioSettingsLink names (followed by the hex hash)
    pub const LINK_PREFIX: &str = "dasl_";

    pub const NT_OFFSET: &str = "0";

    pub const DEFAULT_EXPORT_FILENAME: &str = "door_game.dat151.rel.xml";

    pub const FILE_EXTENSION: &str = "xml";
}

//! Named UI themes, stored in settings by index

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Default,
    Dark,
    Bluish,
    Candy,
    Cherry,
    Cyber,
    Jungle,
    Lavanda,
    Terminal,
    Sunny,
    Ashes,
    Enefete,
}

impl Theme {
    /// All themes in index order
    pub const ALL: [Theme; 12] = [
        Theme::Default,
        Theme::Dark,
        Theme::Bluish,
        Theme::Candy,
        Theme::Cherry,
        Theme::Cyber,
        Theme::Jungle,
        Theme::Lavanda,
        Theme::Terminal,
        Theme::Sunny,
        Theme::Ashes,
        Theme::Enefete,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Like [`Self::from_index`] but falls back to Default with a warning
    pub fn from_index_or_default(index: usize) -> Self {
        Self::from_index(index).unwrap_or_else(|| {
            warn!(index, "Theme index out of range, using Default");
            Theme::Default
        })
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Default => "Default",
            Theme::Dark => "Dark",
            Theme::Bluish => "Bluish",
            Theme::Candy => "Candy",
            Theme::Cherry => "Cherry",
            Theme::Cyber => "Cyber",
            Theme::Jungle => "Jungle",
            Theme::Lavanda => "Lavanda",
            Theme::Terminal => "Terminal",
            Theme::Sunny => "Sunny",
            Theme::Ashes => "Ashes",
            Theme::Enefete => "Enefete",
        }
    }
}

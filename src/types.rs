//! Small value types shared by the door list, settings and GUI forms

use std::fmt;

/// Why a name can't be saved (door or preset)
/// Shown inline in forms; the save button stays disabled while present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameIssue {
    Empty,
    Duplicate,
}

impl NameIssue {
    /// Check a candidate name against an existence predicate
    pub fn check(name: &str, taken: impl FnOnce(&str) -> bool) -> Option<Self> {
        if name.is_empty() {
            Some(NameIssue::Empty)
        } else if taken(name) {
            Some(NameIssue::Duplicate)
        } else {
            None
        }
    }
}

impl fmt::Display for NameIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameIssue::Empty => write!(f, "The name cannot be empty"),
            NameIssue::Duplicate => write!(f, "An entry with this name already exists"),
        }
    }
}

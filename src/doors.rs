//! Door records and the ordered in-memory door list
//!
//! The list is never persisted on its own: it is filled by the user or by a
//! Dat151 import and written out only through an explicit export.

use tracing::{debug, info};

use crate::config::SoundPreset;
use crate::constants::door::DEFAULT_MAX_OCCLUSION;
use crate::types::NameIssue;

/// Audio configuration for one openable door
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub name: String,
    /// Sound bank reference (opaque)
    pub sounds: String,
    /// Tuning parameter reference (opaque)
    pub tuning_params: String,
    /// Conventionally in 0.0..=1.0
    pub max_occlusion: f32,
}

impl Default for Door {
    fn default() -> Self {
        Self {
            name: String::new(),
            sounds: String::new(),
            tuning_params: String::new(),
            max_occlusion: DEFAULT_MAX_OCCLUSION,
        }
    }
}

impl Door {
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

    /// Copy a preset's audio values into this door
    /// The door keeps no link to the preset afterwards
    pub fn apply_preset(&mut self, preset: &SoundPreset) {
        self.sounds = preset.sounds.clone();
        self.tuning_params = preset.tuning_params.clone();
        self.max_occlusion = preset.max_occlusion;
    }
}

/// Outcome of [`DoorCollection::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted(usize),
    Replaced(usize),
}

/// Ordered door list; insertion order is display and export order
#[derive(Debug, Clone, Default)]
pub struct DoorCollection {
    doors: Vec<Door>,
}

impl DoorCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append without any uniqueness check
    /// Callers check [`Self::exists`] first
    pub fn add(&mut self, door: Door) {
        info!(door = %door.name, index = self.doors.len(), "Added door");
        self.doors.push(door);
    }

    /// Replace the door at `index`; out of range is ignored
    pub fn edit(&mut self, door: Door, index: usize) {
        if let Some(slot) = self.doors.get_mut(index) {
            info!(door = %door.name, index, "Edited door");
            *slot = door;
        } else {
            debug!(index, len = self.doors.len(), "Ignoring edit past end of door list");
        }
    }

    /// Remove the door at `index`; out of range is ignored
    pub fn delete(&mut self, index: usize) {
        if index < self.doors.len() {
            let door = self.doors.remove(index);
            info!(door = %door.name, index, "Deleted door");
        } else {
            debug!(index, len = self.doors.len(), "Ignoring delete past end of door list");
        }
    }

    /// True if any door other than `excluding` has exactly this name
    pub fn exists(&self, name: &str, excluding: Option<usize>) -> bool {
        self.doors
            .iter()
            .enumerate()
            .any(|(i, door)| Some(i) != excluding && door.name == name)
    }

    pub fn name_issue(&self, name: &str, excluding: Option<usize>) -> Option<NameIssue> {
        NameIssue::check(name, |n| self.exists(n, excluding))
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.doors.iter().position(|door| door.name == name)
    }

    /// Overwrite the door with the same name in place, or append
    pub fn upsert(&mut self, door: Door) -> Upsert {
        match self.find(&door.name) {
            Some(index) => {
                self.doors[index] = door;
                Upsert::Replaced(index)
            }
            None => {
                self.doors.push(door);
                Upsert::Inserted(self.doors.len() - 1)
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&Door> {
        self.doors.get(index)
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Door> {
        self.doors.iter()
    }

    pub fn as_slice(&self) -> &[Door] {
        &self.doors
    }
}

impl<'a> IntoIterator for &'a DoorCollection {
    type Item = &'a Door;
    type IntoIter = std::slice::Iter<'a, Door>;

    fn into_iter(self) -> Self::IntoIter {
        self.doors.iter()
    }
}

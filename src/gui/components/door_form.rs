//! Add/edit door dialog

use eframe::egui;

use crate::config::SoundPreset;
use crate::doors::{Door, DoorCollection};
use crate::gui::constants::*;
use crate::types::NameIssue;

/// Result of one frame of the door dialog
#[derive(Debug, Clone, PartialEq)]
pub enum DoorFormAction {
    None,
    Added(String),
    Edited { index: usize, name: String },
}

pub struct DoorForm {
    open: bool,
    /// Index being edited; None while adding
    editing: Option<usize>,
    draft: Door,
    selected_preset: Option<usize>,
}

impl DoorForm {
    pub fn new() -> Self {
        Self {
            open: false,
            editing: None,
            draft: Door::default(),
            selected_preset: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open an empty form, pre-filled from the first preset if there is one
    pub fn open_new(&mut self, presets: &[SoundPreset]) {
        self.reset();
        self.open = true;
        if !presets.is_empty() {
            self.select_preset(0, presets);
        }
    }

    pub fn open_edit(&mut self, door: &Door, index: usize) {
        self.reset();
        self.open = true;
        self.editing = Some(index);
        self.draft = door.clone();
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    /// Copy a preset's values into the draft; the name is kept
    fn select_preset(&mut self, index: usize, presets: &[SoundPreset]) {
        if let Some(preset) = presets.get(index) {
            self.selected_preset = Some(index);
            self.draft.apply_preset(preset);
        }
    }

    fn name_issue(&self, doors: &DoorCollection) -> Option<NameIssue> {
        doors.name_issue(&self.draft.name, self.editing)
    }

    /// Apply the draft to the collection if its name is valid
    fn submit(&mut self, doors: &mut DoorCollection) -> DoorFormAction {
        if self.name_issue(doors).is_some() {
            return DoorFormAction::None;
        }

        let door = self.draft.clone();
        let name = door.name.clone();
        let action = match self.editing {
            Some(index) => {
                doors.edit(door, index);
                DoorFormAction::Edited { index, name }
            }
            None => {
                doors.add(door);
                DoorFormAction::Added(name)
            }
        };
        self.reset();
        action
    }

    pub fn ui(
        &mut self,
        ctx: &egui::Context,
        doors: &mut DoorCollection,
        presets: &[SoundPreset],
    ) -> DoorFormAction {
        if !self.open {
            return DoorFormAction::None;
        }

        let mut action = DoorFormAction::None;
        let mut open = self.open;
        let title = if self.editing.is_some() { "Edit Door" } else { "Add New Door" };

        egui::Window::new(title)
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Door Name:");
                ui.add(egui::TextEdit::singleline(&mut self.draft.name).char_limit(NAME_MAX_CHARS));

                let issue = self.name_issue(doors);
                if let Some(issue) = issue {
                    ui.colored_label(VALIDATION_ERROR, issue.to_string());
                }

                ui.add_space(ITEM_SPACING);
                ui.label("Sound Preset:");
                let selected_text = match self.selected_preset.and_then(|i| presets.get(i)) {
                    Some(preset) => preset.name.clone(),
                    None if presets.is_empty() => "No presets".to_string(),
                    None => "Custom".to_string(),
                };
                egui::ComboBox::from_id_salt("door_preset")
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        for (idx, preset) in presets.iter().enumerate() {
                            let selected = self.selected_preset == Some(idx);
                            if ui.selectable_label(selected, preset.name.as_str()).clicked() {
                                self.select_preset(idx, presets);
                            }
                        }
                    });

                ui.add_space(ITEM_SPACING);
                egui::Grid::new("door_fields").num_columns(2).show(ui, |ui| {
                    ui.label("Sounds:");
                    ui.add(egui::TextEdit::singleline(&mut self.draft.sounds).char_limit(REFERENCE_MAX_CHARS));
                    ui.end_row();

                    ui.label("Tuning Params:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.draft.tuning_params)
                            .char_limit(REFERENCE_MAX_CHARS),
                    );
                    ui.end_row();

                    ui.label("Max Occlusion:");
                    ui.add(egui::Slider::new(&mut self.draft.max_occlusion, 0.0..=1.0).fixed_decimals(2));
                    ui.end_row();
                });

                ui.add_space(ITEM_SPACING);
                ui.horizontal(|ui| {
                    let label = if self.editing.is_some() { "Save Changes" } else { "Add Door" };
                    if ui.add_enabled(issue.is_none(), egui::Button::new(label)).clicked() {
                        action = self.submit(doors);
                    }

                    if ui.button("Cancel").clicked() {
                        self.reset();
                    }
                });
            });

        // Closed via the title bar or by submit/cancel inside the window
        if !open || !self.open {
            self.reset();
        }

        action
    }
}

impl Default for DoorForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets() -> Vec<SoundPreset> {
        vec![
            SoundPreset::new("heavy", "heavy_sounds", "heavy_tuning", 0.4),
            SoundPreset::new("light", "light_sounds", "light_tuning", 0.9),
        ]
    }

    #[test]
    fn test_open_new_prefills_first_preset() {
        let mut form = DoorForm::new();
        form.open_new(&presets());
        assert!(form.is_open());
        assert_eq!(form.draft.sounds, "heavy_sounds");
        assert_eq!(form.draft.max_occlusion, 0.4);
        assert_eq!(form.selected_preset, Some(0));
    }

    #[test]
    fn test_open_new_without_presets_uses_defaults() {
        let mut form = DoorForm::new();
        form.open_new(&[]);
        assert_eq!(form.draft, Door::default());
        assert_eq!(form.selected_preset, None);
    }

    #[test]
    fn test_preset_selection_keeps_name() {
        let presets = presets();
        let mut form = DoorForm::new();
        form.open_new(&presets);
        form.draft.name = "vault".to_string();
        form.select_preset(1, &presets);
        assert_eq!(form.draft, Door::new("vault", "light_sounds", "light_tuning", 0.9));
    }

    #[test]
    fn test_submit_adds_door() {
        let mut doors = DoorCollection::new();
        let mut form = DoorForm::new();
        form.open_new(&presets());
        form.draft.name = "vault".to_string();

        assert_eq!(form.submit(&mut doors), DoorFormAction::Added("vault".to_string()));
        assert_eq!(doors.len(), 1);
        assert!(!form.is_open());
    }

    #[test]
    fn test_submit_rejects_empty_and_duplicate() {
        let mut doors = DoorCollection::new();
        doors.add(Door::new("vault", "", "", 0.7));

        let mut form = DoorForm::new();
        form.open_new(&[]);
        assert_eq!(form.submit(&mut doors), DoorFormAction::None);

        form.draft.name = "vault".to_string();
        assert_eq!(form.submit(&mut doors), DoorFormAction::None);
        assert!(form.is_open());
        assert_eq!(doors.len(), 1);
    }

    #[test]
    fn test_edit_may_keep_own_name() {
        let mut doors = DoorCollection::new();
        doors.add(Door::new("vault", "a", "b", 0.7));
        doors.add(Door::new("cellar", "c", "d", 0.7));

        let mut form = DoorForm::new();
        form.open_edit(doors.get(0).unwrap(), 0);
        form.draft.sounds = "changed".to_string();
        assert_eq!(
            form.submit(&mut doors),
            DoorFormAction::Edited { index: 0, name: "vault".to_string() }
        );
        assert_eq!(doors.get(0).unwrap().sounds, "changed");

        form.open_edit(doors.get(0).unwrap(), 0);
        form.draft.name = "cellar".to_string();
        assert_eq!(form.submit(&mut doors), DoorFormAction::None);
    }
}

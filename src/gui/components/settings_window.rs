//! Settings window: sound preset management and theme selection

use eframe::egui;
use tracing::error;

use crate::config::{SettingsStore, SoundPreset, Theme};
use crate::gui::constants::*;

/// Result of one frame of the settings window
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    None,
    PresetSaved(String),
    PresetDeleted(String),
    ThemeChanged(Theme),
    /// Theme applies for this session but could not be written
    ThemeNotSaved { theme: Theme, message: String },
    /// Persisting failed; the message is shown in the status line
    Failed(String),
}

/// Add/edit preset dialog state
struct PresetDraft {
    /// Index being edited; None while adding
    editing: Option<usize>,
    preset: SoundPreset,
}

pub struct SettingsWindow {
    open: bool,
    selected: usize,
    draft: Option<PresetDraft>,
    show_delete_confirm: bool,
}

impl SettingsWindow {
    pub fn new() -> Self {
        Self {
            open: false,
            selected: 0,
            draft: None,
            show_delete_confirm: false,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Closing drops any half-finished preset dialog
    fn close(&mut self) {
        self.open = false;
        self.draft = None;
        self.show_delete_confirm = false;
    }

    fn start_add(&mut self) {
        self.draft = Some(PresetDraft {
            editing: None,
            preset: SoundPreset::default(),
        });
    }

    fn start_edit(&mut self, store: &SettingsStore) {
        if let Some(preset) = store.preset(self.selected) {
            self.draft = Some(PresetDraft {
                editing: Some(self.selected),
                preset: preset.clone(),
            });
        }
    }

    /// Persist the open draft if its name is valid
    fn save_draft(&mut self, store: &mut SettingsStore) -> SettingsAction {
        let Some(draft) = &self.draft else {
            return SettingsAction::None;
        };
        if store.preset_name_issue(&draft.preset.name, draft.editing).is_some() {
            return SettingsAction::None;
        }

        let Some(draft) = self.draft.take() else {
            return SettingsAction::None;
        };
        let name = draft.preset.name.clone();
        let result = match draft.editing {
            Some(index) => store.update_preset_at(index, draft.preset),
            None => {
                let result = store.add_or_replace_preset(draft.preset);
                self.selected = store.presets().len().saturating_sub(1);
                result
            }
        };

        match result {
            Ok(()) => SettingsAction::PresetSaved(name),
            Err(err) => failed("save preset", err),
        }
    }

    fn delete_selected(&mut self, store: &mut SettingsStore) -> SettingsAction {
        self.show_delete_confirm = false;
        let Some(name) = store.preset(self.selected).map(|p| p.name.clone()) else {
            return SettingsAction::None;
        };

        let result = store.remove_preset(&name);
        self.selected = self.selected.min(store.presets().len().saturating_sub(1));
        match result {
            Ok(_) => SettingsAction::PresetDeleted(name),
            Err(err) => failed("delete preset", err),
        }
    }

    fn select_theme(&mut self, store: &mut SettingsStore, theme: Theme) -> SettingsAction {
        match store.set_theme_index(theme.index()) {
            Ok(()) => SettingsAction::ThemeChanged(theme),
            Err(err) => {
                error!(error = %format!("{err:#}"), "Failed to save theme selection");
                SettingsAction::ThemeNotSaved {
                    theme,
                    message: format!("Failed to save theme: {err:#}"),
                }
            }
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context, store: &mut SettingsStore) -> SettingsAction {
        if !self.open {
            return SettingsAction::None;
        }

        let mut action = SettingsAction::None;
        let mut open = self.open;

        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                self.preset_manager_ui(ui, store);
                ui.add_space(SECTION_SPACING);
                ui.separator();
                if let Some(theme_action) = self.theme_ui(ui, store) {
                    action = theme_action;
                }
            });
        if !open {
            self.close();
            return action;
        }

        if self.draft.is_some() {
            let dialog_action = self.preset_dialog(ctx, store);
            if dialog_action != SettingsAction::None {
                action = dialog_action;
            }
        }

        if self.show_delete_confirm {
            let confirm_action = self.delete_confirm_dialog(ctx, store);
            if confirm_action != SettingsAction::None {
                action = confirm_action;
            }
        }

        action
    }

    fn preset_manager_ui(&mut self, ui: &mut egui::Ui, store: &SettingsStore) {
        ui.label(egui::RichText::new("Door Presets").strong());
        ui.add_space(ITEM_SPACING);

        let presets = store.presets();
        if self.selected >= presets.len() {
            self.selected = 0;
        }
        let selected_text = presets
            .get(self.selected)
            .map(|p| p.name.as_str())
            .unwrap_or("No presets");

        egui::ComboBox::from_id_salt("settings_presets")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for (idx, preset) in presets.iter().enumerate() {
                    ui.selectable_value(&mut self.selected, idx, preset.name.as_str());
                }
            });

        if let Some(preset) = presets.get(self.selected) {
            ui.label(format!("Sounds: {}", preset.sounds));
            ui.label(format!("Tuning: {}", preset.tuning_params));
            ui.label(format!("Max Occlusion: {:.2}", preset.max_occlusion));
        }

        let has_selection = !presets.is_empty();
        ui.add_space(ITEM_SPACING);
        ui.horizontal(|ui| {
            if ui.button("➕ Add").clicked() {
                self.start_add();
            }
            if ui.add_enabled(has_selection, egui::Button::new("✏ Edit")).clicked() {
                self.start_edit(store);
            }
            if ui.add_enabled(has_selection, egui::Button::new("🗑 Delete")).clicked() {
                self.show_delete_confirm = true;
            }
        });
    }

    fn theme_ui(&mut self, ui: &mut egui::Ui, store: &mut SettingsStore) -> Option<SettingsAction> {
        let current = Theme::from_index(store.theme_index()).unwrap_or(Theme::Default);
        let mut chosen = current;

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Theme:").strong());
            egui::ComboBox::from_id_salt("settings_theme")
                .selected_text(current.name())
                .show_ui(ui, |ui| {
                    for theme in Theme::ALL {
                        ui.selectable_value(&mut chosen, theme, theme.name());
                    }
                });
        });

        (chosen != current).then(|| self.select_theme(store, chosen))
    }

    fn preset_dialog(&mut self, ctx: &egui::Context, store: &mut SettingsStore) -> SettingsAction {
        let mut action = SettingsAction::None;
        let mut cancel = false;

        let title = match self.draft.as_ref().and_then(|d| d.editing) {
            Some(_) => "Edit Preset",
            None => "New Preset",
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let Some(draft) = self.draft.as_mut() else {
                    return;
                };

                egui::Grid::new("preset_fields").num_columns(2).show(ui, |ui| {
                    ui.label("Preset Name:");
                    ui.add(egui::TextEdit::singleline(&mut draft.preset.name).char_limit(NAME_MAX_CHARS));
                    ui.end_row();

                    ui.label("Sounds:");
                    ui.add(
                        egui::TextEdit::singleline(&mut draft.preset.sounds)
                            .char_limit(REFERENCE_MAX_CHARS),
                    );
                    ui.end_row();

                    ui.label("Tuning Params:");
                    ui.add(
                        egui::TextEdit::singleline(&mut draft.preset.tuning_params)
                            .char_limit(REFERENCE_MAX_CHARS),
                    );
                    ui.end_row();

                    ui.label("Max Occlusion:");
                    ui.add(egui::Slider::new(&mut draft.preset.max_occlusion, 0.0..=1.0).fixed_decimals(2));
                    ui.end_row();
                });

                let issue = store.preset_name_issue(&draft.preset.name, draft.editing);
                if let Some(issue) = issue {
                    ui.colored_label(VALIDATION_ERROR, issue.to_string());
                }

                ui.add_space(ITEM_SPACING);
                ui.horizontal(|ui| {
                    if ui.add_enabled(issue.is_none(), egui::Button::new("Save")).clicked() {
                        action = self.save_draft(store);
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if cancel {
            self.draft = None;
        }
        action
    }

    fn delete_confirm_dialog(&mut self, ctx: &egui::Context, store: &mut SettingsStore) -> SettingsAction {
        let mut action = SettingsAction::None;
        let name = store
            .preset(self.selected)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        egui::Window::new("Confirm Delete")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Delete preset '{name}'?"));
                ui.add_space(ITEM_SPACING);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        action = self.delete_selected(store);
                    }
                    if ui.button("Cancel").clicked() {
                        self.show_delete_confirm = false;
                    }
                });
            });

        action
    }
}

impl Default for SettingsWindow {
    fn default() -> Self {
        Self::new()
    }
}

fn failed(what: &str, err: anyhow::Error) -> SettingsAction {
    error!(error = %format!("{err:#}"), "Failed to {what}");
    SettingsAction::Failed(format!("Failed to {what}: {err:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SettingsStore {
        let mut store = SettingsStore::new(dir.path().join("settings.json"));
        store.add_or_replace_preset(SoundPreset::new("heavy", "h", "h", 0.4)).unwrap();
        store.add_or_replace_preset(SoundPreset::new("light", "l", "l", 0.9)).unwrap();
        store
    }

    #[test]
    fn test_add_preset_selects_it() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let mut window = SettingsWindow::new();

        window.start_add();
        window.draft.as_mut().unwrap().preset.name = "medium".to_string();
        assert_eq!(window.save_draft(&mut store), SettingsAction::PresetSaved("medium".to_string()));
        assert_eq!(window.selected, 2);
        assert!(window.draft.is_none());
    }

    #[test]
    fn test_duplicate_preset_not_saved() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let mut window = SettingsWindow::new();

        window.start_add();
        window.draft.as_mut().unwrap().preset.name = "light".to_string();
        assert_eq!(window.save_draft(&mut store), SettingsAction::None);
        assert!(window.draft.is_some());
        assert_eq!(store.presets().len(), 2);
    }

    #[test]
    fn test_edit_preset_in_place() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let mut window = SettingsWindow::new();

        window.start_edit(&store);
        window.draft.as_mut().unwrap().preset.name = "heavier".to_string();
        window.save_draft(&mut store);
        assert_eq!(store.preset(0).unwrap().name, "heavier");
        assert_eq!(store.preset(1).unwrap().name, "light");
    }

    #[test]
    fn test_delete_selected_clamps_selection() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let mut window = SettingsWindow::new();
        window.selected = 1;

        assert_eq!(window.delete_selected(&mut store), SettingsAction::PresetDeleted("light".to_string()));
        assert_eq!(window.selected, 0);
        assert!(!store.has_preset("light"));
    }

    #[test]
    fn test_select_theme_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let mut window = SettingsWindow::new();

        assert_eq!(window.select_theme(&mut store, Theme::Cyber), SettingsAction::ThemeChanged(Theme::Cyber));
        assert_eq!(store.theme_index(), 5);
    }

    #[test]
    fn test_theme_save_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "").unwrap();
        let mut store = SettingsStore::new(blocker.join("settings.json"));
        let mut window = SettingsWindow::new();

        match window.select_theme(&mut store, Theme::Cyber) {
            SettingsAction::ThemeNotSaved { theme, message } => {
                assert_eq!(theme, Theme::Cyber);
                assert!(message.starts_with("Failed to save theme"));
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(store.theme_index(), 5);
    }

    #[test]
    fn test_close_discards_dialogs() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut window = SettingsWindow::new();
        window.open();
        window.start_edit(&store);
        window.show_delete_confirm = true;

        window.close();
        assert!(!window.is_open());
        assert!(window.draft.is_none());
        assert!(!window.show_delete_confirm);

        window.open();
        assert!(window.draft.is_none());
    }
}

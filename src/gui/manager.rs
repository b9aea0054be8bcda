//! Door editor window implemented with egui/eframe and rfd file dialogs

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{error, info};

use super::components::{
    DoorForm, DoorFormAction, DoorListAction, SettingsAction, SettingsWindow, door_list,
};
use super::constants::*;
use super::theme;
use crate::config::{SettingsStore, Theme};
use crate::constants::dat151::{DEFAULT_EXPORT_FILENAME, FILE_EXTENSION};
use crate::dat151;
use crate::doors::DoorCollection;

const APP_TITLE: &str = "GTA V Audio Door Tool";

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

impl StatusMessage {
    fn ok(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: STATUS_OK }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: STATUS_ERROR }
    }
}

struct DoorToolApp {
    store: SettingsStore,
    doors: DoorCollection,
    door_form: DoorForm,
    settings_window: SettingsWindow,
    status_message: Option<StatusMessage>,
}

impl DoorToolApp {
    fn new(cc: &CreationContext<'_>, store: SettingsStore) -> Self {
        info!(settings = %store.path().display(), "Initializing door editor");
        theme::apply(&cc.egui_ctx, Theme::from_index_or_default(store.theme_index()));

        Self {
            store,
            doors: DoorCollection::new(),
            door_form: DoorForm::new(),
            settings_window: SettingsWindow::new(),
            status_message: None,
        }
    }

    fn dialog_open(&self) -> bool {
        self.door_form.is_open() || self.settings_window.is_open()
    }

    fn import_file(&mut self) {
        let Some(path) = xml_dialog().pick_file() else {
            return;
        };

        self.status_message = Some(match dat151::import_into(&mut self.doors, &path) {
            Ok(summary) => StatusMessage::ok(format!(
                "Imported {} new and {} updated door(s)",
                summary.inserted, summary.replaced
            )),
            Err(err) => {
                error!(path = %path.display(), error = %format!("{err:#}"), "Import failed");
                StatusMessage::error(format!("Import failed: {err:#}"))
            }
        });
    }

    fn generate_file(&mut self) {
        let Some(path) = xml_dialog().set_file_name(DEFAULT_EXPORT_FILENAME).save_file() else {
            return;
        };
        let path = with_xml_extension(path);

        self.status_message = Some(match dat151::export_to_file(&path, self.doors.as_slice()) {
            Ok(()) => StatusMessage::ok(format!(
                "Wrote {} door(s) to {}",
                self.doors.len(),
                path.display()
            )),
            Err(err) => {
                error!(path = %path.display(), error = %format!("{err:#}"), "Export failed");
                StatusMessage::error(format!("Export failed: {err:#}"))
            }
        });
    }

    fn handle_list_action(&mut self, action: DoorListAction) {
        match action {
            DoorListAction::None => {}
            DoorListAction::Edit(index) => {
                if let Some(door) = self.doors.get(index) {
                    self.door_form.open_edit(door, index);
                }
            }
            DoorListAction::Delete(index) => self.doors.delete(index),
        }
    }

    fn handle_settings_action(&mut self, ctx: &egui::Context, action: SettingsAction) {
        match action {
            SettingsAction::None => {}
            SettingsAction::PresetSaved(name) => {
                self.status_message = Some(StatusMessage::ok(format!("Saved preset '{name}'")));
            }
            SettingsAction::PresetDeleted(name) => {
                self.status_message = Some(StatusMessage::ok(format!("Deleted preset '{name}'")));
            }
            SettingsAction::ThemeChanged(selected) => theme::apply(ctx, selected),
            SettingsAction::ThemeNotSaved { theme: selected, message } => {
                theme::apply(ctx, selected);
                self.status_message = Some(StatusMessage::error(message));
            }
            SettingsAction::Failed(message) => {
                self.status_message = Some(StatusMessage::error(message));
            }
        }
    }
}

impl eframe::App for DoorToolApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dialog_open = self.dialog_open();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(PADDING / 2.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!dialog_open, egui::Button::new("Import file").min_size(BUTTON_SIZE.into()))
                    .clicked()
                {
                    self.import_file();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!dialog_open, egui::Button::new("Settings").min_size(BUTTON_SIZE.into()))
                        .clicked()
                    {
                        self.settings_window.open();
                    }
                });
            });
            ui.add_space(PADDING / 2.0);
        });

        egui::TopBottomPanel::bottom("bottom_bar").show(ctx, |ui| {
            ui.add_space(PADDING / 2.0);
            if let Some(message) = &self.status_message {
                ui.colored_label(message.color, &message.text);
            }
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!dialog_open, egui::Button::new("Generate file").min_size(BUTTON_SIZE.into()))
                    .clicked()
                {
                    self.generate_file();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!dialog_open, egui::Button::new("Add new door").min_size(BUTTON_SIZE.into()))
                        .clicked()
                    {
                        self.door_form.open_new(self.store.presets());
                    }
                });
            });
            ui.add_space(PADDING / 2.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(egui::RichText::new(format!("Doors ({})", self.doors.len())).strong());
            ui.add_space(ITEM_SPACING);
            let action = door_list::ui(ui, &self.doors, dialog_open);
            self.handle_list_action(action);
        });

        match self.door_form.ui(ctx, &mut self.doors, self.store.presets()) {
            DoorFormAction::None => {}
            DoorFormAction::Added(name) => {
                self.status_message = Some(StatusMessage::ok(format!("Added door '{name}'")));
            }
            DoorFormAction::Edited { index, name } => {
                self.status_message = Some(StatusMessage::ok(format!("Saved door {} '{name}'", index + 1)));
            }
        }

        let action = self.settings_window.ui(ctx, &mut self.store);
        self.handle_settings_action(ctx, action);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(doors = self.doors.len(), "Door editor exiting");
    }
}

fn xml_dialog() -> rfd::FileDialog {
    rfd::FileDialog::new()
        .add_filter("XML", &[FILE_EXTENSION])
        .set_directory(".")
}

/// Save dialogs on some platforms drop the filter's extension
fn with_xml_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(FILE_EXTENSION)
    }
}

pub fn run_gui(store: SettingsStore) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(DoorToolApp::new(cc, store)))),
    )
    .map_err(|err| anyhow!("Failed to launch door editor: {err}"))
}

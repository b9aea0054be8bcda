//! Scrollable list of door cards

use eframe::egui;

use crate::doors::DoorCollection;
use crate::gui::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorListAction {
    None,
    Edit(usize),
    Delete(usize),
}

/// Renders one card per door; card buttons are disabled while a dialog is open
pub fn ui(ui: &mut egui::Ui, doors: &DoorCollection, dialog_open: bool) -> DoorListAction {
    let mut action = DoorListAction::None;

    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if doors.is_empty() {
                    ui.label(
                        egui::RichText::new("(No doors yet: add one or import a file)")
                            .italics()
                            .weak(),
                    );
                }

                for (idx, door) in doors.iter().enumerate() {
                    ui.push_id(idx, |ui| {
                        ui.group(|ui| {
                            ui.set_min_width(ui.available_width());
                            ui.horizontal(|ui| {
                                ui.label(egui::RichText::new(format!("{} | {}", idx + 1, door.name)).strong());
                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                    if ui.add_enabled(!dialog_open, egui::Button::new("Delete")).clicked() {
                                        action = DoorListAction::Delete(idx);
                                    }
                                    if ui.add_enabled(!dialog_open, egui::Button::new("Edit")).clicked() {
                                        action = DoorListAction::Edit(idx);
                                    }
                                });
                            });
                            ui.label(format!("Sound: {}", door.sounds));
                            ui.label(format!("Tuning: {}", door.tuning_params));
                            ui.label(format!("Max Occlusion: {:.2}", door.max_occlusion));
                        });
                    });
                    ui.add_space(ITEM_SPACING / 2.0);
                }
            });
    });

    action
}

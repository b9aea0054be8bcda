//! egui front end: main window, door dialog and settings window

pub mod components;
pub mod constants;
pub mod manager;
mod theme;

pub use manager::run_gui;

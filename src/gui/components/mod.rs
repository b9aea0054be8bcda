pub mod door_form;
pub mod door_list;
pub mod settings_window;

pub use door_form::{DoorForm, DoorFormAction};
pub use door_list::DoorListAction;
pub use settings_window::{SettingsAction, SettingsWindow};

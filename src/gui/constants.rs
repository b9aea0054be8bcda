//! GUI-specific constants for layout, status colors and input limits

use egui;

/// Editor window dimensions
pub const WINDOW_WIDTH: f32 = 500.0;
pub const WINDOW_HEIGHT: f32 = 600.0;
pub const WINDOW_MIN_WIDTH: f32 = 420.0;
pub const WINDOW_MIN_HEIGHT: f32 = 400.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;
pub const PADDING: f32 = 10.0;

/// Button size used in the top and bottom bars
pub const BUTTON_SIZE: [f32; 2] = [110.0, 22.0];

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
pub const VALIDATION_ERROR: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);

/// Text input capacity (characters), matching the game tool's field sizes
pub const NAME_MAX_CHARS: usize = 255;
pub const REFERENCE_MAX_CHARS: usize = 1023;

//! egui visuals for each named theme

use eframe::egui::{self, Color32, Visuals};

use crate::config::Theme;

struct Palette {
    dark: bool,
    background: Color32,
    accent: Color32,
}

fn palette(theme: Theme) -> Palette {
    let (dark, background, accent) = match theme {
        Theme::Default => (false, Color32::from_rgb(245, 245, 245), Color32::from_rgb(0, 121, 241)),
        Theme::Dark => (true, Color32::from_rgb(27, 27, 27), Color32::from_rgb(104, 104, 104)),
        Theme::Bluish => (false, Color32::from_rgb(231, 240, 250), Color32::from_rgb(91, 178, 217)),
        Theme::Candy => (false, Color32::from_rgb(255, 245, 225), Color32::from_rgb(235, 118, 118)),
        Theme::Cherry => (true, Color32::from_rgb(64, 0, 16), Color32::from_rgb(218, 87, 87)),
        Theme::Cyber => (true, Color32::from_rgb(8, 34, 52), Color32::from_rgb(0, 230, 230)),
        Theme::Jungle => (true, Color32::from_rgb(36, 44, 32), Color32::from_rgb(132, 173, 96)),
        Theme::Lavanda => (true, Color32::from_rgb(42, 36, 58), Color32::from_rgb(184, 150, 231)),
        Theme::Terminal => (true, Color32::from_rgb(0, 0, 0), Color32::from_rgb(56, 244, 56)),
        Theme::Sunny => (false, Color32::from_rgb(250, 232, 160), Color32::from_rgb(224, 151, 42)),
        Theme::Ashes => (false, Color32::from_rgb(212, 212, 212), Color32::from_rgb(120, 120, 120)),
        Theme::Enefete => (true, Color32::from_rgb(20, 28, 76), Color32::from_rgb(30, 202, 255)),
    };
    Palette { dark, background, accent }
}

pub fn visuals(theme: Theme) -> Visuals {
    let palette = palette(theme);
    let mut visuals = if palette.dark {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    visuals.panel_fill = palette.background;
    visuals.window_fill = palette.background;
    visuals.selection.bg_fill = palette.accent;
    visuals.hyperlink_color = palette.accent;
    visuals.widgets.active.bg_fill = palette.accent;
    visuals.widgets.hovered.bg_stroke.color = palette.accent;
    visuals
}

pub fn apply(ctx: &egui::Context, theme: Theme) {
    ctx.set_visuals(visuals(theme));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_flag_follows_palette() {
        assert!(visuals(Theme::Dark).dark_mode);
        assert!(!visuals(Theme::Default).dark_mode);
    }

    #[test]
    fn test_accent_applied() {
        let v = visuals(Theme::Terminal);
        assert_eq!(v.selection.bg_fill, Color32::from_rgb(56, 244, 56));
        assert_eq!(v.panel_fill, Color32::BLACK);
    }
}

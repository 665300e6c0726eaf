//! Pad theme: black cells on white, gray outlines
//!
//! Cells only ever use three colors. The window chrome around them (menus,
//! the status bar, the about window) follows the same flat look.

use egui::epaint::Shadow;
use egui::{Color32, FontId, Margin, Rounding, Stroke, TextStyle, Visuals};

pub struct PadColors;

impl PadColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    /// Cell outline.
    pub const GRAY: Color32 = Color32::from_rgb(128, 128, 128);
}

pub struct PadTheme {
    /// Size of menu, button and status text.
    pub font_size: f32,
    /// Outline of windows, menus, widgets and bars.
    pub outline: Stroke,
}

impl Default for PadTheme {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            outline: Stroke::new(1.0, PadColors::BLACK),
        }
    }
}

impl PadTheme {
    /// Flat white visuals with square corners and no shadows.
    pub fn visuals(&self) -> Visuals {
        let mut v = Visuals::light();
        v.panel_fill = PadColors::WHITE;
        v.window_fill = PadColors::WHITE;
        v.window_stroke = self.outline;
        v.window_rounding = Rounding::ZERO;
        v.menu_rounding = Rounding::ZERO;
        v.window_shadow = Shadow::NONE;
        v.popup_shadow = Shadow::NONE;

        let w = &mut v.widgets;
        for state in [
            &mut w.noninteractive,
            &mut w.inactive,
            &mut w.hovered,
            &mut w.active,
            &mut w.open,
        ] {
            state.bg_fill = PadColors::WHITE;
            state.weak_bg_fill = PadColors::WHITE;
            state.bg_stroke = self.outline;
            state.fg_stroke = self.outline;
            state.rounding = Rounding::ZERO;
        }

        v.selection.bg_fill = PadColors::GRAY;
        v.selection.stroke = self.outline;
        v
    }

    pub fn apply(&self, ctx: &egui::Context) {
        let visuals = self.visuals();
        ctx.style_mut(|style| {
            style.visuals = visuals;
            for text in [TextStyle::Body, TextStyle::Button] {
                style.text_styles.insert(text, FontId::proportional(self.font_size));
            }
        });
    }

    /// Outlined white strip for the menu and status bars.
    pub fn bar_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(PadColors::WHITE)
            .stroke(self.outline)
            .inner_margin(Margin::symmetric(6.0, 2.0))
    }
}

//! Panel colours.

use egui::Color32;

pub const BACKGROUND: Color32 = Color32::from_rgb(0x0b, 0x13, 0x30);
pub const PANEL: Color32 = Color32::from_rgb(0x12, 0x1a, 0x33);
pub const TANK_FILL: Color32 = Color32::from_rgb(0x0e, 0x17, 0x34);
pub const TANK_OUTLINE: Color32 = Color32::from_rgb(0x2a, 0x3d, 0x78);
pub const PIPE: Color32 = Color32::from_rgb(0x9b, 0xb0, 0xff);
pub const LIQUID: Color32 = Color32::from_rgba_premultiplied(74, 120, 153, 153);
pub const LEVEL_LINE: Color32 = Color32::from_rgb(0x7c, 0xc8, 0xff);
pub const TEXT: Color32 = Color32::from_rgb(0xe9, 0xf0, 0xff);
pub const OPEN: Color32 = Color32::from_rgb(0x3d, 0xdc, 0x97);
pub const CLOSED: Color32 = Color32::from_rgb(0xff, 0x6b, 0x6b);

/// Dark visuals matching the diagram.
pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = PANEL;
    visuals.window_fill = PANEL;
    visuals.extreme_bg_color = BACKGROUND;
    visuals.override_text_color = Some(TEXT);
    ctx.set_visuals(visuals);
}

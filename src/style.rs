use egui::{Color32, Context, Stroke, Style, Visuals};

// Diff palette shared by the sequence and metadata views
pub const REMOVED_LINE_BG: Color32 = Color32::from_rgb(255, 235, 235);
pub const ADDED_LINE_BG: Color32 = Color32::from_rgb(232, 250, 236);
pub const REMOVED_RUN_BG: Color32 = Color32::from_rgb(254, 202, 202);
pub const ADDED_RUN_BG: Color32 = Color32::from_rgb(187, 247, 208);
pub const REMOVED_TEXT_COLOR: Color32 = Color32::from_rgb(153, 27, 27);
pub const ADDED_TEXT_COLOR: Color32 = Color32::from_rgb(22, 101, 52);
pub const MUTED_BG: Color32 = Color32::from_rgb(248, 250, 252);
pub const MUTED_TEXT_COLOR: Color32 = Color32::from_rgb(148, 163, 184);
pub const NOTICE_BG: Color32 = Color32::from_rgb(236, 253, 245);
pub const NOTICE_TEXT_COLOR: Color32 = Color32::from_rgb(6, 95, 70);
pub const ERROR_BG: Color32 = Color32::from_rgb(254, 242, 242);
pub const ERROR_TEXT_COLOR: Color32 = Color32::from_rgb(153, 27, 27);

pub const MONO_SIZE: f32 = 13.0;

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(12);

    ctx.set_style(style);

    let mut visuals = Visuals::light();
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals.popup_shadow = egui::epaint::Shadow::NONE;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, Color32::from_gray(226));
    visuals.widgets.hovered.bg_fill = Color32::from_gray(240);
    visuals.widgets.active.bg_fill = Color32::from_gray(230);

    visuals.selection.bg_fill = Color32::from_rgb(2, 132, 199);
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

    ctx.set_visuals(visuals);
}

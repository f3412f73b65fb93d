use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Atlas Light".to_string(),
            dark_mode: false,
        }
    }
}

/// Apply the application theme (light panels around the map)
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };

    let panel_bg = if theme.dark_mode {
        Color32::from_rgb(31, 31, 31)
    } else {
        Color32::from_rgb(248, 249, 250)
    };
    let widget_bg = if theme.dark_mode {
        Color32::from_rgb(40, 40, 40)
    } else {
        Color32::WHITE
    };
    let border = Color32::from_rgb(222, 226, 230);

    // Window and panel styling
    visuals.window_fill = panel_bg;
    visuals.panel_fill = panel_bg;
    visuals.faint_bg_color = widget_bg;

    // Widget styling
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, border);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, primary_color());
    visuals.widgets.active.rounding = Rounding::same(4.0);

    // Selection and highlighting
    visuals.selection.bg_fill = primary_color().linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, primary_color());
    visuals.hyperlink_color = primary_color();

    // Apply spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);

    // Font sizes
    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

/// Accent used for default feature outlines and badges
pub fn primary_color() -> Color32 {
    Color32::from_rgb(13, 110, 253)
}

/// Error text and highlighted features
pub fn danger_color() -> Color32 {
    Color32::from_rgb(220, 53, 69)
}

/// Secondary text
pub fn muted_color() -> Color32 {
    Color32::from_rgb(108, 117, 125)
}

/// Card outline
pub fn card_border_color() -> Color32 {
    Color32::from_rgb(222, 226, 230)
}

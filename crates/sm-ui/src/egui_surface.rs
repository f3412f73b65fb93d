//! egui implementation of the display surface

use ahash::AHashMap;
use egui::{Color32, Context, Frame, RichText, Stroke, Ui};

use crate::surface::{DisplaySurface, PanelContent, Region, SampleEntry};
use crate::theme::{card_border_color, danger_color, muted_color, primary_color};

/// Side panel regions drawn with egui widgets
#[derive(Default)]
pub struct EguiSurface {
    regions: AHashMap<Region, PanelContent>,
    loading: bool,
    alert: Option<String>,
}

impl EguiSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self, region: Region) -> Option<&PanelContent> {
        self.regions.get(&region)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Alert waiting to be dismissed
    pub fn pending_alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Draw one region; nothing is drawn for an empty region
    pub fn region_ui(&self, ui: &mut Ui, region: Region) {
        match self.regions.get(&region) {
            Some(PanelContent::Summary { total }) => {
                ui.horizontal(|ui| {
                    ui.label("Total States/Territories:");
                    ui.label(RichText::new(total.to_string()).strong());
                });
            }
            Some(PanelContent::SampleList(entries)) => sample_list_ui(ui, entries),
            Some(PanelContent::Detail { name, population, kind }) => {
                card(ui, |ui| {
                    ui.label(RichText::new(name).heading().strong());
                    ui.label(format!("Population: {population}"));
                    ui.label(format!("Type: {kind}"));
                });
            }
            Some(PanelContent::Error(message)) => {
                ui.label(RichText::new(message).color(danger_color()));
            }
            None => {}
        }
    }

    /// Spinner overlay while the data loads
    pub fn loading_ui(&self, ctx: &Context) {
        if !self.loading {
            return;
        }
        egui::Area::new("loading_indicator")
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading map data...");
                    });
                });
            });
    }

    /// Modal-looking window for the pending alert; closes on OK
    pub fn alert_ui(&mut self, ctx: &Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.alert = None;
                }
            });
    }
}

fn card(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    Frame::none()
        .fill(Color32::WHITE)
        .stroke(Stroke::new(1.0, card_border_color()))
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
}

fn sample_list_ui(ui: &mut Ui, entries: &[SampleEntry]) {
    ui.label(RichText::new("Random State Data:").strong());
    ui.add_space(4.0);
    card(ui, |ui| {
        for (idx, entry) in entries.iter().enumerate() {
            if idx > 0 {
                ui.separator();
            }
            ui.horizontal(|ui| {
                ui.label(&entry.name);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    badge(ui, &entry.population);
                });
            });
        }
        if entries.is_empty() {
            ui.label(RichText::new("No states loaded").color(muted_color()));
        }
    });
}

fn badge(ui: &mut Ui, text: &str) {
    Frame::none()
        .fill(primary_color())
        .rounding(10.0)
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(Color32::WHITE).small());
        });
}

impl DisplaySurface for EguiSurface {
    fn set_content(&mut self, region: Region, content: PanelContent) {
        self.regions.insert(region, content);
    }

    fn show_loading(&mut self) {
        self.loading = true;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_replace_content() {
        let mut surface = EguiSurface::new();
        surface.set_content(Region::Detail, PanelContent::Error("Please enter a state name".to_string()));
        surface.set_content(Region::Detail, PanelContent::Error("State not found. Try another name.".to_string()));

        assert_eq!(
            surface.content(Region::Detail),
            Some(&PanelContent::Error("State not found. Try another name.".to_string()))
        );
        assert!(surface.content(Region::Summary).is_none());
    }

    #[test]
    fn test_loading_and_alert_flags() {
        let mut surface = EguiSurface::new();
        surface.show_loading();
        assert!(surface.is_loading());
        surface.hide_loading();
        assert!(!surface.is_loading());

        surface.alert("Failed to load map data.");
        assert_eq!(surface.pending_alert(), Some("Failed to load map data."));
    }
}

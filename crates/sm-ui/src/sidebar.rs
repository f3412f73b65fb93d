//! Side panel presenter

use sm_core::format_population;
use tracing::debug;

use crate::surface::{DisplaySurface, PanelContent, Region, SampleEntry};

/// Turns viewer results into side panel content.
///
/// Holds no state of its own; every call replaces one region of the surface.
pub struct SidebarPresenter<S: DisplaySurface> {
    surface: S,
}

impl<S: DisplaySurface> SidebarPresenter<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Total number of loaded features
    pub fn show_summary(&mut self, total: usize) {
        self.surface.set_content(Region::Summary, PanelContent::Summary { total });
    }

    /// Name and population pairs for the random sample
    pub fn show_random_sample(&mut self, sample: &[(String, u64)]) {
        let entries = sample
            .iter()
            .map(|(name, population)| SampleEntry {
                name: name.clone(),
                population: format_population(*population),
            })
            .collect();
        self.surface.set_content(Region::RandomSample, PanelContent::SampleList(entries));
    }

    /// Detail card for one feature
    pub fn show_detail(&mut self, name: &str, population: u64, kind: &str) {
        debug!("Showing details for '{}'", name);
        self.surface.set_content(
            Region::Detail,
            PanelContent::Detail {
                name: name.to_string(),
                population: format_population(population),
                kind: kind.to_string(),
            },
        );
    }

    /// Inline error in the detail region
    pub fn show_error(&mut self, message: &str) {
        self.surface.set_content(Region::Detail, PanelContent::Error(message.to_string()));
    }

    pub fn show_loading(&mut self) {
        self.surface.show_loading();
    }

    pub fn hide_loading(&mut self) {
        self.surface.hide_loading();
    }

    pub fn alert(&mut self, message: &str) {
        self.surface.alert(message);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;

    #[derive(Default)]
    struct RecordingSurface {
        regions: AHashMap<Region, PanelContent>,
        writes: usize,
        loading: bool,
        alerts: Vec<String>,
    }

    impl DisplaySurface for RecordingSurface {
        fn set_content(&mut self, region: Region, content: PanelContent) {
            self.writes += 1;
            self.regions.insert(region, content);
        }

        fn show_loading(&mut self) {
            self.loading = true;
        }

        fn hide_loading(&mut self) {
            self.loading = false;
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }
    }

    #[test]
    fn test_summary_and_sample_are_separate_regions() {
        let mut sidebar = SidebarPresenter::new(RecordingSurface::default());
        sidebar.show_summary(36);
        sidebar.show_random_sample(&[("Kerala".to_string(), 34_630_192), ("Goa".to_string(), 1_458_545)]);

        let regions = &sidebar.surface().regions;
        assert_eq!(regions[&Region::Summary], PanelContent::Summary { total: 36 });
        assert_eq!(
            regions[&Region::RandomSample],
            PanelContent::SampleList(vec![
                SampleEntry { name: "Kerala".to_string(), population: "34,630,192".to_string() },
                SampleEntry { name: "Goa".to_string(), population: "1,458,545".to_string() },
            ])
        );
    }

    #[test]
    fn test_detail_replaces_error() {
        let mut sidebar = SidebarPresenter::new(RecordingSurface::default());
        sidebar.show_error("State not found. Try another name.");
        sidebar.show_detail("Sikkim", 690_251, "State");

        assert_eq!(
            sidebar.surface().regions[&Region::Detail],
            PanelContent::Detail {
                name: "Sikkim".to_string(),
                population: "690,251".to_string(),
                kind: "State".to_string(),
            }
        );
        assert_eq!(sidebar.surface().writes, 2);
    }

    #[test]
    fn test_loading_and_alert_pass_through() {
        let mut sidebar = SidebarPresenter::new(RecordingSurface::default());
        sidebar.show_loading();
        assert!(sidebar.surface().loading);

        sidebar.hide_loading();
        sidebar.alert("Failed to load map data.");
        assert!(!sidebar.surface().loading);
        assert_eq!(sidebar.surface().alerts, vec!["Failed to load map data.".to_string()]);
    }
}

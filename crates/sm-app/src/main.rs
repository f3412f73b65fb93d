//! Main application entry point

use std::path::Path;
use std::sync::Arc;
use eframe::egui;
use anyhow::Result;
use parking_lot::Mutex;
use tracing::{info, warn};

use sm_app::Viewer;
use sm_core::{FeatureCollection, ViewerConfig, ViewerError};
use sm_data::{FeatureSource, GeoJsonFileSource};
use sm_ui::{EguiSurface, Region, Theme};
use sm_views::EguiBaseMap;

/// Optional configuration file next to the working directory
const CONFIG_FILE: &str = "statemap.json";

type LoadSlot = Arc<Mutex<Option<Result<FeatureCollection, ViewerError>>>>;

/// Main application state
struct StateMapApp {
    viewer: Viewer<EguiBaseMap, EguiSurface>,

    /// Result of the background load, picked up on the next frame
    pending_load: LoadSlot,

    /// Search box contents
    search_query: String,

    /// Tokio runtime
    runtime: tokio::runtime::Runtime,
}

impl StateMapApp {
    fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig, runtime: tokio::runtime::Runtime) -> Self {
        sm_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        let viewer = Viewer::new(config, EguiBaseMap::new(), EguiSurface::new());
        let app = Self {
            viewer,
            pending_load: Arc::new(Mutex::new(None)),
            search_query: String::new(),
            runtime,
        };
        app.start_load(&cc.egui_ctx);
        app
    }

    /// Read the feature file in the background
    fn start_load(&self, ctx: &egui::Context) {
        let source = GeoJsonFileSource::new(self.viewer.config().data_path.clone());
        info!("Loading map data from {}", source.source_name());

        let slot = self.pending_load.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = source.fetch().await;
            *slot.lock() = Some(result);
            ctx.request_repaint();
        });
    }

    fn sidebar_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("India States Map");
        ui.add_space(8.0);

        let mut submitted = false;
        ui.horizontal(|ui| {
            let width = ui.available_width() - 80.0;
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_query)
                    .hint_text("Enter state name")
                    .desired_width(width),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = true;
            }
            if ui.button("Search").clicked() {
                submitted = true;
            }
        });
        if submitted {
            // Failures are already shown in the detail region
            let _ = self.viewer.search(&self.search_query);
        }

        ui.add_space(8.0);
        if ui.button("Reset view").clicked() {
            self.viewer.reset_view();
        }
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            let surface = self.viewer.sidebar().surface();
            surface.region_ui(ui, Region::Summary);
            ui.add_space(8.0);
            surface.region_ui(ui, Region::RandomSample);
            ui.add_space(12.0);
            ui.label(egui::RichText::new("Search Results").strong());
            surface.region_ui(ui, Region::Detail);
        });
    }
}

impl eframe::App for StateMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let finished = self.pending_load.lock().take();
        if let Some(result) = finished {
            // Errors are logged and alerted by the viewer
            let _ = self.viewer.finish_load(result);
        }

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.sidebar_ui(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.viewer.renderer_mut().base_map_mut().ui(ui);
            });

        if self.viewer.pump_map_events() > 0 {
            ctx.request_repaint();
        }

        let surface = self.viewer.sidebar_mut().surface_mut();
        surface.loading_ui(ctx);
        surface.alert_ui(ctx);
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = match ViewerConfig::load_or_default(Path::new(CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring {}: {}", CONFIG_FILE, e);
            ViewerConfig::default()
        }
    };
    info!("Starting state map viewer with data from {:?}", config.data_path);

    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        default_theme: eframe::Theme::Light,
        ..Default::default()
    };

    eframe::run_native(
        "India States Map",
        options,
        Box::new(move |cc| {
            Box::new(StateMapApp::new(cc, config, runtime))
        }),
    ).map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

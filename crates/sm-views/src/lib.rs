//! Map views for the state map viewer
//!
//! [`MapRenderer`] owns the feature layers and their hover/highlight state;
//! it draws through the [`BaseMap`] capability, implemented for egui by
//! [`EguiBaseMap`].

pub mod base_map;
pub mod egui_map;
pub mod projection;
pub mod renderer;

pub use base_map::{BaseMap, LayerHandle, MapEvent, MapEventKind, PolygonStyle, TileBackdrop};
pub use egui_map::EguiBaseMap;
pub use renderer::{FeatureClickHandler, MapRenderer};

//! User interface components for the state map viewer
//!
//! This crate provides the side panel: the [`SidebarPresenter`], the
//! [`DisplaySurface`] it renders into, and the egui surface and theme.

pub mod egui_surface;
pub mod sidebar;
pub mod surface;
pub mod theme;

/// Re-export commonly used types
pub use egui_surface::EguiSurface;
pub use sidebar::SidebarPresenter;
pub use surface::{DisplaySurface, PanelContent, Region, SampleEntry};
pub use theme::{apply_theme, Theme};

//! State map viewer application
//!
//! Ties the feature store, the map renderer and the sidebar together. The
//! binary in `main.rs` hosts a [`Viewer`] inside an eframe window.

pub mod controller;
pub mod viewer;

pub use controller::SearchController;
pub use viewer::{Viewer, LOAD_FAILED_ALERT};

//! UI layer for desktop GUI: app shell, style picker and map canvas.

pub mod app;
pub mod map_view;
pub mod style_picker;

pub use app::MapMakerApp;

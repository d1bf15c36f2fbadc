//! UI components for the weather map.
//!
//! Overlays drawn on top of the map: header, unit toggle, status line and
//! the city detail window.

pub mod city_details;
pub mod controls;
pub mod viewport;

pub use city_details::render_city_details;
pub use controls::{render_header, render_status_line, render_unit_toggle, StatusLine};
pub use viewport::ViewportWatcher;

//! Map imagery and overlays.
//!
//! This module provides the walkers tile sources for the base map and the
//! plugins that draw the region outline and the city markers on top of it.

pub mod border_layer;
pub mod markers;
pub mod tiles;

pub use border_layer::BorderOverlay;
pub use markers::CityMarkers;
pub use tiles::MapLayers;

// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Base map tile sources.
//!
//! Satellite mode stacks Esri World Imagery with Esri's boundaries-and-places
//! reference layer; street mode uses the Carto light basemap. All layers are
//! cached on disk under the user cache directory.

use std::path::PathBuf;

use eframe::egui;
use walkers::sources::{Attribution, TileSource};
use walkers::{HttpOptions, HttpTiles, TileId, Tiles};

use crate::config::TileProvider;

/// Esri World Imagery satellite tiles
#[derive(Debug)]
pub struct EsriWorldImagery;

impl TileSource for EsriWorldImagery {
    fn tile_url(&self, tile_id: TileId) -> String {
        // Esri services address tiles as {z}/{y}/{x}
        format!(
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{}/{}/{}",
            tile_id.zoom, tile_id.y, tile_id.x
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "Tiles © Esri",
            url: "https://www.esri.com/",
            logo_light: None,
            logo_dark: None,
        }
    }
}

/// Transparent Esri layer with country borders and place names
#[derive(Debug)]
pub struct EsriPlaceLabels;

impl TileSource for EsriPlaceLabels {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://services.arcgisonline.com/ArcGIS/rest/services/Reference/World_Boundaries_and_Places/MapServer/tile/{}/{}/{}",
            tile_id.zoom, tile_id.y, tile_id.x
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "Labels © Esri",
            url: "https://www.esri.com/",
            logo_light: None,
            logo_dark: None,
        }
    }
}

/// Carto CDN light basemap tiles
/// Uses subdomain load balancing across a-d.basemaps.cartocdn.com
#[derive(Debug)]
pub struct CartoLightTileSource;

impl TileSource for CartoLightTileSource {
    fn tile_url(&self, tile_id: TileId) -> String {
        let subdomain = ['a', 'b', 'c', 'd'][((tile_id.x + tile_id.y) % 4) as usize];

        format!(
            "https://{}.basemaps.cartocdn.com/light_all/{}/{}/{}.png",
            subdomain, tile_id.zoom, tile_id.x, tile_id.y
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© OpenStreetMap contributors, © CARTO",
            url: "https://carto.com/attributions",
            logo_light: None,
            logo_dark: None,
        }
    }
}

/// Base layer plus overlays, drawn bottom to top
pub struct MapLayers {
    pub base: Box<dyn Tiles>,
    pub overlays: Vec<Box<dyn Tiles>>,
}

impl std::fmt::Debug for MapLayers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapLayers")
            .field("overlays", &self.overlays.len())
            .finish_non_exhaustive()
    }
}

impl MapLayers {
    pub fn new(provider: TileProvider, show_place_labels: bool, ctx: &egui::Context) -> Self {
        match provider {
            TileProvider::Satellite => {
                let overlays = if show_place_labels {
                    vec![http_tiles(EsriPlaceLabels, "esri_labels", ctx)]
                } else {
                    Vec::new()
                };
                Self {
                    base: http_tiles(EsriWorldImagery, "esri_imagery", ctx),
                    overlays,
                }
            }
            TileProvider::Streets => Self {
                base: http_tiles(CartoLightTileSource, "carto_light", ctx),
                overlays: Vec::new(),
            },
        }
    }
}

fn http_tiles<S>(source: S, name: &str, ctx: &egui::Context) -> Box<dyn Tiles>
where
    S: TileSource + Sync + Send + 'static,
{
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("kurdistan-weather-map")
        .join("tiles")
        .join(name);

    let http_options = HttpOptions {
        cache: Some(cache_dir),
        ..Default::default()
    };

    Box::new(HttpTiles::with_options(source, http_options, ctx.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esri_urls_are_z_y_x() {
        let tile = TileId { x: 39, y: 25, zoom: 6 };
        assert_eq!(
            EsriWorldImagery.tile_url(tile),
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/6/25/39"
        );
        assert!(EsriPlaceLabels.tile_url(tile).ends_with("/World_Boundaries_and_Places/MapServer/tile/6/25/39"));
    }

    #[test]
    fn test_carto_subdomain_rotation() {
        assert_eq!(
            CartoLightTileSource.tile_url(TileId { x: 39, y: 25, zoom: 6 }),
            "https://a.basemaps.cartocdn.com/light_all/6/39/25.png"
        );
        assert_eq!(
            CartoLightTileSource.tile_url(TileId { x: 40, y: 25, zoom: 6 }),
            "https://b.basemaps.cartocdn.com/light_all/6/40/25.png"
        );
    }
}

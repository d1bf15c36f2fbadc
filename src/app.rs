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

use city_weather::{CityDetails, CityId, CityRegistry};
use eframe::egui;
use log::{info, warn};
use walkers::{lat_lon, Map, MapMemory};

use crate::config::AppConfig;
use crate::fetch_cycle::FetchCycles;
use crate::map::{BorderOverlay, CityMarkers, MapLayers};
use crate::ui::{self, StatusLine, ViewportWatcher};

/// Place-label layer drawn at full opacity over the imagery
const OVERLAY_TRANSPARENCY: f32 = 1.0;

pub struct WeatherMapApp {
    config: AppConfig,
    registry: CityRegistry,
    border: BorderOverlay,
    layers: MapLayers,
    map_memory: MapMemory,
    fetch: FetchCycles,
    selected: Option<CityId>,
    viewport: ViewportWatcher,
}

impl WeatherMapApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        registry: CityRegistry,
        border: BorderOverlay,
        mut fetch: FetchCycles,
    ) -> Self {
        let ctx = &cc.egui_ctx;

        let layers = MapLayers::new(config.tile_provider, config.show_place_labels, ctx);

        let mut map_memory = MapMemory::default();
        if let Err(e) = map_memory.set_zoom(config.default_zoom) {
            warn!("Invalid zoom level {} in config: {:?}", config.default_zoom, e);
        }

        info!(
            "Map centered at {:.2}, {:.2} with {} cities",
            config.map_center_lat,
            config.map_center_lon,
            registry.len()
        );

        fetch.start(ctx);

        Self {
            config,
            registry,
            border,
            layers,
            map_memory,
            fetch,
            selected: None,
            viewport: ViewportWatcher::default(),
        }
    }

    fn draw_map(&mut self, ui: &mut egui::Ui) {
        let center = lat_lon(self.config.map_center_lat, self.config.map_center_lon);

        let mut map = Map::new(Some(self.layers.base.as_mut()), &mut self.map_memory, center);
        for overlay in &mut self.layers.overlays {
            map = map.with_layer(overlay.as_mut(), OVERLAY_TRANSPARENCY);
        }

        let map = map.with_plugin(&self.border).with_plugin(CityMarkers {
            cities: self.registry.cities(),
            weather: self.fetch.weather(),
            unit: self.fetch.weather_unit(),
            capital: &self.config.capital_city,
            selected: &mut self.selected,
        });

        ui.add(map);
    }

    fn status_line(&self) -> StatusLine {
        StatusLine {
            state: self.fetch.state(),
            has_api_key: self.fetch.has_api_key(),
            reported: self.fetch.weather().len(),
            total: self.fetch.city_count(),
            last_updated: self.fetch.last_updated(),
        }
    }

    fn selected_details(&self) -> Option<CityDetails> {
        let city = self.registry.get(self.selected?)?;
        Some(CityDetails::new(
            city,
            self.fetch.weather().get(city.id),
            self.fetch.weather_unit(),
            &self.config.capital_city,
        ))
    }
}

impl eframe::App for WeatherMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.viewport.track(ctx);

        if self.fetch.poll() {
            ctx.request_repaint();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_map(ui);
            });

        ui::render_header(ctx);

        if ui::render_unit_toggle(ctx, self.fetch.unit(), self.fetch.is_loading()) {
            self.fetch.toggle_unit(ctx);
        }

        ui::render_status_line(ctx, &self.status_line());

        if let Some(details) = self.selected_details() {
            if !ui::render_city_details(ctx, &details) {
                self.selected = None;
            }
        }
    }
}

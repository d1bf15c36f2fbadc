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

mod app;
mod config;
mod fetch_cycle;
mod map;
mod ui;

use std::error::Error;

use city_weather::{BorderPolygon, CityRegistry, GeoPoint, WeatherClient};
use eframe::egui;
use log::{info, warn};
use mimalloc::MiMalloc;

use app::WeatherMapApp;
use config::AppConfig;
use fetch_cycle::FetchCycles;
use map::BorderOverlay;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Kurdistan Weather Map...");

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    if let Ok(path) = AppConfig::get_config_path() {
        info!("Config file: {}", path.display());
    }

    let registry = CityRegistry::bundled()?;
    let border = BorderPolygon::bundled()?;

    for city in &registry {
        if !border.contains(GeoPoint::new(city.lat, city.lon)) {
            warn!("{} lies outside the region outline", city.name);
        }
    }

    let api_key = config.resolve_api_key();
    if api_key.is_none() {
        warn!(
            "No OpenWeatherMap API key found; set {} or openweather_api_key in the config file",
            config::API_KEY_ENV
        );
    }

    let client = WeatherClient::new(&config.weather_api_url)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let fetch = FetchCycles::new(
        runtime.handle().clone(),
        client,
        registry.cities().to_vec(),
        api_key,
        config.initial_unit,
    );

    let overlay = BorderOverlay::new(&border);
    info!(
        "Region outline: {} ring(s), {} fill triangles",
        overlay.ring_count(),
        overlay.triangle_count()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_title("Kurdistan Weather Map"),
        ..Default::default()
    };

    eframe::run_native(
        "Kurdistan Weather Map",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(WeatherMapApp::new(cc, config, registry, overlay, fetch)))
        }),
    )?;

    Ok(())
}

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

//! Application configuration management.
//!
//! Configuration is read from a TOML file through `confy` at start-up and is
//! never written back. Every field has a serde default so a missing or partial
//! file still yields a complete configuration.

use city_weather::client::OPENWEATHERMAP_BASE_URL;
use city_weather::UnitSystem;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "kurdistan-weather-map";
const CONFIG_NAME: &str = "config";

/// Environment variable holding the OpenWeatherMap API key
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Base map imagery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileProvider {
    /// Esri World Imagery with an Esri place-label layer
    #[default]
    Satellite,
    /// Carto light street map
    Streets,
}

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Configuration schema version
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// OpenWeatherMap API key (optional, env var takes precedence)
    #[serde(default)]
    pub openweather_api_key: Option<String>,

    /// Weather provider base URL
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,

    /// Unit system used on start-up
    #[serde(default)]
    pub initial_unit: UnitSystem,

    /// Base map imagery
    #[serde(default)]
    pub tile_provider: TileProvider,

    /// Draw the place-label layer over satellite imagery
    #[serde(default = "default_true")]
    pub show_place_labels: bool,

    /// Initial map center latitude
    #[serde(default = "default_center_lat")]
    pub map_center_lat: f64,

    /// Initial map center longitude
    #[serde(default = "default_center_lon")]
    pub map_center_lon: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,

    /// City drawn with the capital star (case- and diacritic-insensitive)
    #[serde(default = "default_capital_city")]
    pub capital_city: String,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    1
}

fn default_weather_api_url() -> String {
    OPENWEATHERMAP_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_center_lat() -> f64 {
    36.5
}

fn default_center_lon() -> f64 {
    43.0
}

fn default_zoom() -> f64 {
    6.0
}

fn default_capital_city() -> String {
    "Diyarbakır".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            openweather_api_key: None,
            weather_api_url: default_weather_api_url(),
            initial_unit: UnitSystem::default(),
            tile_provider: TileProvider::default(),
            show_place_labels: true,
            map_center_lat: default_center_lat(),
            map_center_lon: default_center_lon(),
            default_zoom: default_zoom(),
            capital_city: default_capital_city(),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk, creating the default file if absent
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Resolve the API key: environment variable first, then the config file
    pub fn resolve_api_key(&self) -> Option<String> {
        Self::resolve_api_key_from(std::env::var(API_KEY_ENV).ok(), self.openweather_api_key.as_deref())
    }

    fn resolve_api_key_from(env_key: Option<String>, config_key: Option<&str>) -> Option<String> {
        env_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| config_key.map(str::to_string).filter(|k| !k.trim().is_empty()))
    }
}

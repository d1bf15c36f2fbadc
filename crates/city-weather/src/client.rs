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

//! Current-weather fetcher for the OpenWeatherMap API.
//!
//! One request is issued per city, all in parallel, and the cycle finishes
//! only when every request has settled. Failed cities are left out of the
//! result; nothing is retried or cached.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tokio::task::JoinSet;

use crate::registry::{City, CityId};
use crate::units::UnitSystem;

/// Default OpenWeatherMap API endpoint
pub const OPENWEATHERMAP_BASE_URL: &str = "https://api.openweathermap.org";

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// Errors constructing the client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Errors for a single city's request. These never escape [`WeatherClient::fetch_all`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(StatusCode),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Current weather for one city
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherObservation {
    pub temperature: Option<f64>,
    pub condition: Option<String>,
}

/// Observations of one fetch cycle, keyed by city id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherMap {
    observations: HashMap<CityId, WeatherObservation>,
}

impl WeatherMap {
    pub fn get(&self, id: CityId) -> Option<&WeatherObservation> {
        self.observations.get(&id)
    }

    pub fn insert(&mut self, id: CityId, observation: WeatherObservation) {
        self.observations.insert(id, observation);
    }

    pub fn ids(&self) -> impl Iterator<Item = CityId> + '_ {
        self.observations.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl FromIterator<(CityId, WeatherObservation)> for WeatherMap {
    fn from_iter<T: IntoIterator<Item = (CityId, WeatherObservation)>>(iter: T) -> Self {
        Self {
            observations: iter.into_iter().collect(),
        }
    }
}

// Subset of the provider's current-weather payload
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    main: Option<MainBlock>,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: Option<String>,
}

impl From<CurrentWeatherResponse> for WeatherObservation {
    fn from(response: CurrentWeatherResponse) -> Self {
        Self {
            temperature: response.main.and_then(|m| m.temp),
            condition: response.weather.into_iter().next().and_then(|w| w.description),
        }
    }
}

/// HTTP client for the provider's current-weather endpoint
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: Arc<str>,
}

impl WeatherClient {
    /// Create a client against `base_url` (scheme and host, no path)
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(concat!("kurdistan-weather-map/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    /// Client against the public OpenWeatherMap API
    pub fn openweathermap() -> Result<Self, ClientError> {
        Self::new(OPENWEATHERMAP_BASE_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch current weather for every city in parallel.
    ///
    /// A missing or blank `api_key` returns an empty map without any request.
    /// Cities whose request fails are absent from the result.
    pub async fn fetch_all(&self, cities: &[City], unit: UnitSystem, api_key: Option<&str>) -> WeatherMap {
        let Some(api_key) = api_key.map(str::trim).filter(|k| !k.is_empty()) else {
            warn!("OpenWeatherMap API key missing; weather will not load");
            return WeatherMap::default();
        };
        let api_key: Arc<str> = Arc::from(api_key);

        let mut tasks = JoinSet::new();
        for city in cities {
            let client = self.clone();
            let city = city.clone();
            let api_key = Arc::clone(&api_key);
            tasks.spawn(async move {
                let result = client.fetch_city(&city, unit, &api_key).await;
                (city, result)
            });
        }

        let mut weather = WeatherMap::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((city, Ok(observation))) => {
                    debug!("Weather for {}: {:?}", city.name, observation);
                    weather.insert(city.id, observation);
                }
                Ok((city, Err(e))) => {
                    warn!("Weather fetch error for {}: {}", city.name, e);
                }
                Err(e) => {
                    warn!("Weather fetch task did not complete: {}", e);
                }
            }
        }

        weather
    }

    /// Fetch current weather for a single city
    pub async fn fetch_city(&self, city: &City, unit: UnitSystem, api_key: &str) -> Result<WeatherObservation, FetchError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", city.lat.to_string()),
                ("lon", city.lon.to_string()),
                ("units", unit.query_value().to_string()),
                ("appid", api_key.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;
        let body: CurrentWeatherResponse = serde_json::from_slice(&bytes)?;
        Ok(body.into())
    }
}

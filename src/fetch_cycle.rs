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

//! Fetch-cycle driver connecting the weather fetcher to the UI thread.
//!
//! Each cycle runs on the shared tokio runtime and hands its result back over
//! a channel. The UI thread applies results in arrival order inside
//! [`FetchCycles::poll`], so every mutation of display state happens between
//! frames. Superseded cycles are not cancelled: whichever finishes last wins.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use chrono::{DateTime, Local};
use city_weather::{City, UnitSystem, WeatherClient, WeatherMap};
use eframe::egui;
use log::{debug, info};
use tokio::runtime::Handle;

/// Lifecycle of the displayed weather data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Populated,
    Empty,
}

#[derive(Debug)]
struct CycleResult {
    cycle: u64,
    unit: UnitSystem,
    weather: WeatherMap,
}

/// Owns the active unit system and the weather map currently on screen
#[derive(Debug)]
pub struct FetchCycles {
    runtime: Handle,
    client: WeatherClient,
    cities: Arc<[City]>,
    api_key: Option<String>,
    unit: UnitSystem,
    state: FetchState,
    weather: WeatherMap,
    weather_unit: UnitSystem,
    latest_cycle: u64,
    last_updated: Option<DateTime<Local>>,
    tx: Sender<CycleResult>,
    rx: Receiver<CycleResult>,
}

impl FetchCycles {
    pub fn new(
        runtime: Handle,
        client: WeatherClient,
        cities: Vec<City>,
        api_key: Option<String>,
        unit: UnitSystem,
    ) -> Self {
        let (tx, rx) = channel();
        Self {
            runtime,
            client,
            cities: cities.into(),
            api_key,
            unit,
            state: FetchState::Idle,
            weather: WeatherMap::default(),
            weather_unit: unit,
            latest_cycle: 0,
            last_updated: None,
            tx,
            rx,
        }
    }

    /// Start a new cycle for every city with the active unit system
    pub fn start(&mut self, ctx: &egui::Context) {
        self.latest_cycle += 1;
        self.state = FetchState::Loading;

        let cycle = self.latest_cycle;
        let unit = self.unit;
        info!(
            "Starting fetch cycle {} for {} cities ({})",
            cycle,
            self.cities.len(),
            unit.query_value()
        );

        let client = self.client.clone();
        let cities = Arc::clone(&self.cities);
        let api_key = self.api_key.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let weather = client.fetch_all(&cities, unit, api_key.as_deref()).await;
            if tx.send(CycleResult { cycle, unit, weather }).is_err() {
                debug!("Fetch cycle {} finished after the UI went away", cycle);
                return;
            }
            ctx.request_repaint();
        });
    }

    /// Swap metric and imperial and refetch everything
    pub fn toggle_unit(&mut self, ctx: &egui::Context) {
        self.unit = self.unit.toggled();
        info!("Unit system changed to {}", self.unit.query_value());
        self.start(ctx);
    }

    /// Apply finished cycles. Returns true if the displayed data changed.
    pub fn poll(&mut self) -> bool {
        let mut applied = false;

        while let Ok(result) = self.rx.try_recv() {
            if result.cycle != self.latest_cycle {
                debug!(
                    "Applying fetch cycle {} ({}) although cycle {} was started after it",
                    result.cycle,
                    result.unit.query_value(),
                    self.latest_cycle
                );
            }

            info!(
                "Fetch cycle {} complete: weather for {}/{} cities",
                result.cycle,
                result.weather.len(),
                self.cities.len()
            );

            self.state = if result.weather.is_empty() {
                FetchState::Empty
            } else {
                FetchState::Populated
            };
            self.weather = result.weather;
            self.weather_unit = result.unit;
            self.last_updated = Some(Local::now());
            applied = true;
        }

        applied
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    pub fn weather(&self) -> &WeatherMap {
        &self.weather
    }

    /// Unit the displayed weather was fetched in. Differs from [`Self::unit`]
    /// while a newer cycle is in flight or after an older cycle landed last.
    pub fn weather_unit(&self) -> UnitSystem {
        self.weather_unit
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use city_weather::CityId;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cities() -> Vec<City> {
        vec![
            City {
                id: CityId(1),
                name: "Erbil".to_string(),
                lat: 36.19,
                lon: 44.01,
                region: "Kurdistan Region".to_string(),
                country: "Iraq".to_string(),
                population: 1_612_700,
            },
            City {
                id: CityId(2),
                name: "Van".to_string(),
                lat: 38.5,
                lon: 43.37,
                region: "Eastern Anatolia".to_string(),
                country: "Turkey".to_string(),
                population: 1_128_749,
            },
        ]
    }

    fn payload(temp: f64) -> serde_json::Value {
        serde_json::json!({
            "weather": [{ "description": "clear sky" }],
            "main": { "temp": temp }
        })
    }

    fn poll_until(fetch: &mut FetchCycles, mut done: impl FnMut(&FetchCycles) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            fetch.poll();
            if done(fetch) {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("fetch cycle did not settle, state {:?}", fetch.state());
    }

    fn temperature_of(fetch: &FetchCycles, id: u32) -> Option<f64> {
        fetch.weather().get(CityId(id)).and_then(|o| o.temperature)
    }

    #[test]
    fn test_missing_key_settles_empty() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = WeatherClient::new("http://127.0.0.1:9").unwrap();
        let mut fetch = FetchCycles::new(runtime.handle().clone(), client, cities(), None, UnitSystem::Metric);
        let ctx = egui::Context::default();

        assert_eq!(fetch.state(), FetchState::Idle);
        assert!(!fetch.has_api_key());

        fetch.start(&ctx);
        assert!(fetch.is_loading());

        poll_until(&mut fetch, |f| !f.is_loading());
        assert_eq!(fetch.state(), FetchState::Empty);
        assert!(fetch.weather().is_empty());
        assert!(fetch.last_updated().is_some());
    }

    #[test]
    fn test_cycle_populates_weather() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/data/2.5/weather"))
                .respond_with(ResponseTemplate::new(200).set_body_json(payload(21.0)))
                .mount(&server)
                .await;
            server
        });

        let client = WeatherClient::new(&server.uri()).unwrap();
        let mut fetch = FetchCycles::new(
            runtime.handle().clone(),
            client,
            cities(),
            Some("test-key".to_string()),
            UnitSystem::Metric,
        );
        let ctx = egui::Context::default();

        fetch.start(&ctx);
        poll_until(&mut fetch, |f| !f.is_loading());

        assert_eq!(fetch.state(), FetchState::Populated);
        assert_eq!(fetch.weather().len(), 2);
        assert_eq!(temperature_of(&fetch, 1), Some(21.0));
    }

    #[test]
    fn test_toggle_unit_refetches_everything() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(query_param("units", "metric"))
                .respond_with(ResponseTemplate::new(200).set_body_json(payload(20.0)))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(query_param("units", "imperial"))
                .respond_with(ResponseTemplate::new(200).set_body_json(payload(68.0)))
                .mount(&server)
                .await;
            server
        });

        let client = WeatherClient::new(&server.uri()).unwrap();
        let mut fetch = FetchCycles::new(
            runtime.handle().clone(),
            client,
            cities(),
            Some("test-key".to_string()),
            UnitSystem::Metric,
        );
        let ctx = egui::Context::default();

        fetch.start(&ctx);
        poll_until(&mut fetch, |f| !f.is_loading());
        assert_eq!(temperature_of(&fetch, 2), Some(20.0));

        fetch.toggle_unit(&ctx);
        assert_eq!(fetch.unit(), UnitSystem::Imperial);
        assert_eq!(fetch.weather_unit(), UnitSystem::Metric);
        assert!(fetch.is_loading());

        poll_until(&mut fetch, |f| !f.is_loading());
        assert_eq!(temperature_of(&fetch, 1), Some(68.0));
        assert_eq!(temperature_of(&fetch, 2), Some(68.0));
        assert_eq!(fetch.weather_unit(), UnitSystem::Imperial);
    }

    #[test]
    fn test_late_cycle_overwrites_newer_result() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(query_param("units", "metric"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(payload(20.0))
                        .set_delay(Duration::from_millis(500)),
                )
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(query_param("units", "imperial"))
                .respond_with(ResponseTemplate::new(200).set_body_json(payload(68.0)))
                .mount(&server)
                .await;
            server
        });

        let client = WeatherClient::new(&server.uri()).unwrap();
        let mut fetch = FetchCycles::new(
            runtime.handle().clone(),
            client,
            cities(),
            Some("test-key".to_string()),
            UnitSystem::Metric,
        );
        let ctx = egui::Context::default();

        // Slow metric cycle, then an immediate switch to imperial
        fetch.start(&ctx);
        fetch.toggle_unit(&ctx);

        poll_until(&mut fetch, |f| temperature_of(f, 1) == Some(68.0));
        assert_eq!(fetch.weather_unit(), UnitSystem::Imperial);
        poll_until(&mut fetch, |f| temperature_of(f, 1) == Some(20.0));

        // No cancellation: the older cycle landed last and its data is shown,
        // still labelled with the unit it was fetched in
        assert_eq!(fetch.unit(), UnitSystem::Imperial);
        assert_eq!(fetch.weather_unit(), UnitSystem::Metric);
        assert_eq!(fetch.state(), FetchState::Populated);
    }
}

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

//! City weather library for the Kurdistan weather map.
//!
//! This library holds everything the map needs that is not drawing code. It
//! is split into layers that can be used on their own:
//!
//! - **Static data**: the bundled city registry ([`CityRegistry`]) and the
//!   region outline ([`BorderPolygon`])
//! - **Fetcher**: one current-weather request per city against the
//!   OpenWeatherMap API, fanned out and joined ([`WeatherClient`])
//! - **Visual mapping**: temperature to color, city to marker size, and the
//!   text shown in a city's detail panel
//!
//! # Quick Start
//!
//! ```no_run
//! use city_weather::{CityRegistry, UnitSystem, WeatherClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = CityRegistry::bundled()?;
//!     let client = WeatherClient::openweathermap()?;
//!
//!     let key = std::env::var("OPENWEATHER_API_KEY").ok();
//!     let weather = client
//!         .fetch_all(registry.cities(), UnitSystem::Metric, key.as_deref())
//!         .await;
//!
//!     for city in registry.iter() {
//!         let temp = weather.get(city.id).and_then(|o| o.temperature);
//!         println!("{}: {:?}", city.name, temp);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Visual Mapping Only
//!
//! ```
//! use city_weather::{temperature_to_color, Hsl, UnitSystem};
//!
//! assert_eq!(temperature_to_color(None, UnitSystem::Metric), Hsl::NEUTRAL);
//! assert_eq!(
//!     temperature_to_color(Some(32.0), UnitSystem::Imperial),
//!     temperature_to_color(Some(0.0), UnitSystem::Metric),
//! );
//! ```

pub mod border;
pub mod client;
pub mod marker;
pub mod registry;
pub mod units;
pub mod visual;

pub use border::{BorderError, BorderPolygon, GeoPoint};
pub use client::{ClientError, FetchError, WeatherClient, WeatherMap, WeatherObservation};
pub use marker::{resolve_marker, CityDetails, MarkerStyle};
pub use registry::{City, CityId, CityRegistry, RegistryError};
pub use units::UnitSystem;
pub use visual::{is_capital, marker_radius, temperature_to_color, Hsl, MAJOR_CITIES};

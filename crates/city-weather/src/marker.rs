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

//! Per-city marker resolution and detail text.

use crate::client::WeatherObservation;
use crate::registry::City;
use crate::units::UnitSystem;
use crate::visual::{is_capital, marker_radius, temperature_to_color, Hsl};

const NOT_AVAILABLE: &str = "N/A";

/// How a single city is drawn on the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerStyle {
    /// Fixed star icon for the designated capital
    Capital,
    /// Temperature-colored circle
    Circle { radius: u32, fill: Hsl },
}

/// Resolve the marker for a city from its current observation (if any)
pub fn resolve_marker(
    city: &City,
    observation: Option<&WeatherObservation>,
    unit: UnitSystem,
    capital: &str,
) -> MarkerStyle {
    if is_capital(&city.name, capital) {
        return MarkerStyle::Capital;
    }

    let temperature = observation.and_then(|o| o.temperature);
    MarkerStyle::Circle {
        radius: marker_radius(city),
        fill: temperature_to_color(temperature, unit),
    }
}

/// Text shown in the click-triggered detail panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityDetails {
    pub title: String,
    pub region: String,
    pub country: String,
    pub temperature: String,
    pub condition: String,
}

impl CityDetails {
    pub fn new(
        city: &City,
        observation: Option<&WeatherObservation>,
        unit: UnitSystem,
        capital: &str,
    ) -> Self {
        let title = if is_capital(&city.name, capital) {
            format!("{} (Capital)", city.name)
        } else {
            city.name.clone()
        };

        let temperature = observation
            .and_then(|o| o.temperature)
            .filter(|t| t.is_finite())
            .map_or_else(|| NOT_AVAILABLE.to_string(), |t| format!("{t:.1}{}", unit.symbol()));

        let condition = observation
            .and_then(|o| o.condition.clone())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Self {
            title,
            region: city.region.clone(),
            country: city.country.clone(),
            temperature,
            condition,
        }
    }
}

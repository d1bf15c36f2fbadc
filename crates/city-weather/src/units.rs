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

//! Temperature unit system shared by the fetch request and the display.

use serde::{Deserialize, Serialize};

/// Metric (Celsius) or imperial (Fahrenheit) temperature convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Value of the provider's `units` query parameter
    pub fn query_value(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Degree suffix used when displaying a temperature
    pub fn symbol(self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    /// The other unit system
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    /// Convert a temperature expressed in this unit system to Celsius
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => (value - 32.0) * 5.0 / 9.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_involution() {
        assert_eq!(UnitSystem::Metric.toggled(), UnitSystem::Imperial);
        assert_eq!(UnitSystem::Metric.toggled().toggled(), UnitSystem::Metric);
    }

    #[test]
    fn test_fahrenheit_to_celsius() {
        assert!((UnitSystem::Imperial.to_celsius(32.0)).abs() < 1e-9);
        assert!((UnitSystem::Imperial.to_celsius(212.0) - 100.0).abs() < 1e-9);
        assert!((UnitSystem::Metric.to_celsius(21.5) - 21.5).abs() < 1e-9);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&UnitSystem::Imperial).unwrap();
        assert_eq!(json, "\"imperial\"");
        let unit: UnitSystem = serde_json::from_str("\"metric\"").unwrap();
        assert_eq!(unit, UnitSystem::Metric);
    }
}

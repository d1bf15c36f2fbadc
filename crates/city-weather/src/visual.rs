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

//! Temperature-to-color and city-to-size mapping.
//!
//! Both mappings are pure and total: any float, including NaN and the
//! infinities, produces a color.

use crate::registry::City;
use crate::units::UnitSystem;

/// Coldest temperature on the gradient, in Celsius
pub const MIN_CELSIUS: f64 = -10.0;

/// Hottest temperature on the gradient, in Celsius
pub const MAX_CELSIUS: f64 = 40.0;

/// Hue at the cold end of the gradient (blue)
const COLD_HUE: f64 = 240.0;

/// Cities always drawn with the largest marker, regardless of population
pub const MAJOR_CITIES: [&str; 6] = ["Erbil", "Hewler", "Kermanshah", "Batman", "Van", "Diyarbakır"];

const MAJOR_RADIUS: u32 = 12;
const LARGE_RADIUS: u32 = 10;
const SMALL_RADIUS: u32 = 6;
const LARGE_POPULATION: u64 = 500_000;

/// Color in HSL space; saturation and lightness are percentages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// Gray used when no temperature is available
    pub const NEUTRAL: Hsl = Hsl {
        hue: 0.0,
        saturation: 0.0,
        lightness: 50.0,
    };

    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Convert to 8-bit sRGB
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "channels are clamped to 0..=255 before the cast"
    )]
    pub fn to_rgb(self) -> [u8; 3] {
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);
        let h = self.hue.rem_euclid(360.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(r), channel(g), channel(b)]
    }
}

/// Map a temperature to a blue (cold) to red (hot) color.
///
/// `None` and NaN produce [`Hsl::NEUTRAL`]. Imperial values are converted to
/// Celsius, clamped to [-10, 40], and mapped linearly onto hue 240..0 at 85%
/// saturation and 50% lightness.
pub fn temperature_to_color(temp: Option<f64>, unit: UnitSystem) -> Hsl {
    let Some(temp) = temp.filter(|t| !t.is_nan()) else {
        return Hsl::NEUTRAL;
    };

    let celsius = unit.to_celsius(temp).clamp(MIN_CELSIUS, MAX_CELSIUS);
    let ratio = (celsius - MIN_CELSIUS) / (MAX_CELSIUS - MIN_CELSIUS);
    let hue = COLD_HUE - COLD_HUE * ratio;

    Hsl::new(hue, 85.0, 50.0)
}

/// Marker radius in pixels: listed major cities first, then population tiers
pub fn marker_radius(city: &City) -> u32 {
    if MAJOR_CITIES.contains(&city.name.as_str()) {
        MAJOR_RADIUS
    } else if city.population > LARGE_POPULATION {
        LARGE_RADIUS
    } else {
        SMALL_RADIUS
    }
}

/// Case-insensitive substring match of `capital` within `name`, ignoring diacritics.
///
/// "DİYARBAKIR", "Diyarbakir" and "Diyarbakır" all match "Diyarbakır".
pub fn is_capital(name: &str, capital: &str) -> bool {
    let needle = fold(capital);
    !needle.is_empty() && fold(name).contains(&needle)
}

/// Lowercase and strip the diacritics used in Kurdish and Turkish place names
fn fold(text: &str) -> String {
    text.chars()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .flat_map(char::to_lowercase)
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .map(|c| match c {
            'ı' | 'î' | 'ï' | 'í' | 'ì' => 'i',
            'ş' | 'ș' => 's',
            'ç' | 'ć' => 'c',
            'ğ' => 'g',
            'ö' | 'ô' | 'ó' | 'ò' => 'o',
            'ü' | 'û' | 'ú' | 'ù' => 'u',
            'ê' | 'é' | 'è' | 'ë' => 'e',
            'â' | 'á' | 'à' | 'ä' => 'a',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CityId;

    fn city(name: &str, population: u64) -> City {
        City {
            id: CityId(1),
            name: name.to_string(),
            lat: 36.0,
            lon: 44.0,
            region: "Region".to_string(),
            country: "Country".to_string(),
            population,
        }
    }

    #[test]
    fn test_missing_temperature_is_neutral() {
        assert_eq!(temperature_to_color(None, UnitSystem::Metric), Hsl::NEUTRAL);
        assert_eq!(temperature_to_color(None, UnitSystem::Imperial), Hsl::NEUTRAL);
        assert_eq!(temperature_to_color(Some(f64::NAN), UnitSystem::Metric), Hsl::NEUTRAL);
    }

    #[test]
    fn test_gradient_endpoints() {
        let cold = temperature_to_color(Some(-10.0), UnitSystem::Metric);
        let hot = temperature_to_color(Some(40.0), UnitSystem::Metric);
        assert!((cold.hue - 240.0).abs() < 1e-9);
        assert!(hot.hue.abs() < 1e-9);
        assert!((cold.saturation - 85.0).abs() < 1e-9);
        assert!((cold.lightness - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_hue_for_25_celsius() {
        // ratio (25 - -10) / 50 = 0.7, hue 240 - 168
        let color = temperature_to_color(Some(25.0), UnitSystem::Metric);
        assert!((color.hue - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_in_celsius() {
        let mut previous = f64::INFINITY;
        for tenth in -100..=400 {
            let t = f64::from(tenth) / 10.0;
            let hue = temperature_to_color(Some(t), UnitSystem::Metric).hue;
            assert!(hue <= previous, "hue rose at {t}");
            previous = hue;
        }
    }

    #[test]
    fn test_monotonic_in_fahrenheit() {
        // 14 °F to 104 °F spans the full -10 °C to 40 °C gradient
        let mut previous = f64::INFINITY;
        for tenth in 140..=1040 {
            let t = f64::from(tenth) / 10.0;
            let hue = temperature_to_color(Some(t), UnitSystem::Imperial).hue;
            assert!(hue <= previous, "hue rose at {t}°F");
            previous = hue;
        }
        let cold = temperature_to_color(Some(14.0), UnitSystem::Imperial);
        let hot = temperature_to_color(Some(104.0), UnitSystem::Imperial);
        assert!((cold.hue - 240.0).abs() < 1e-9);
        assert!(hot.hue.abs() < 1e-9);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(
            temperature_to_color(Some(-50.0), UnitSystem::Metric),
            temperature_to_color(Some(-10.0), UnitSystem::Metric)
        );
        assert_eq!(
            temperature_to_color(Some(100.0), UnitSystem::Metric),
            temperature_to_color(Some(40.0), UnitSystem::Metric)
        );
        assert_eq!(
            temperature_to_color(Some(f64::INFINITY), UnitSystem::Imperial),
            temperature_to_color(Some(40.0), UnitSystem::Metric)
        );
        assert_eq!(
            temperature_to_color(Some(f64::NEG_INFINITY), UnitSystem::Metric),
            temperature_to_color(Some(-10.0), UnitSystem::Metric)
        );
    }

    #[test]
    fn test_imperial_freezing_matches_metric() {
        assert_eq!(
            temperature_to_color(Some(32.0), UnitSystem::Imperial),
            temperature_to_color(Some(0.0), UnitSystem::Metric)
        );
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(Hsl::new(240.0, 100.0, 50.0).to_rgb(), [0, 0, 255]);
        assert_eq!(Hsl::new(0.0, 100.0, 50.0).to_rgb(), [255, 0, 0]);
        assert_eq!(Hsl::new(120.0, 100.0, 50.0).to_rgb(), [0, 255, 0]);
        assert_eq!(Hsl::NEUTRAL.to_rgb(), [128, 128, 128]);
    }

    #[test]
    fn test_marker_radius_tiers() {
        assert_eq!(marker_radius(&city("Erbil", 10)), 12);
        assert_eq!(marker_radius(&city("Diyarbakır", 0)), 12);
        assert_eq!(marker_radius(&city("Mardin", 600_000)), 10);
        assert_eq!(marker_radius(&city("Mardin", 500_000)), 6);
        assert_eq!(marker_radius(&city("Amuda", 100)), 6);
    }

    #[test]
    fn test_major_list_is_exact_match() {
        // Listed names match whole names only
        assert_eq!(marker_radius(&city("Vanadzor", 100)), 6);
        assert_eq!(marker_radius(&city("erbil", 100)), 6);
    }

    #[test]
    fn test_capital_matching() {
        assert!(is_capital("Diyarbakır", "Diyarbakır"));
        assert!(is_capital("DİYARBAKIR", "Diyarbakır"));
        assert!(is_capital("Diyarbakir", "Diyarbakır"));
        assert!(is_capital("Diyarbakır (Amed)", "diyarbakir"));
        assert!(!is_capital("Batman", "Diyarbakır"));
        assert!(!is_capital("Diyarbakır", ""));
    }
}

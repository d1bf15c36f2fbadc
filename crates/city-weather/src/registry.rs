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

//! Static city registry.
//!
//! The registry is a CSV file compiled into the binary. Each row becomes an
//! immutable [`City`]; ids must be unique and file order is preserved so the
//! map draws markers in a stable order.

use std::collections::HashSet;
use std::fmt;
use std::io::Read;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUNDLED_CITIES: &str = include_str!("../data/cities.csv");

/// Errors that can occur while loading a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("malformed city row: {0}")]
    Csv(#[from] csv::Error),

    #[error("duplicate city id {0}")]
    DuplicateId(CityId),
}

/// Stable identifier of a city in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(pub u32);

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named location shown on the map
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub region: String,
    pub country: String,
    pub population: u64,
}

/// Ordered, id-unique collection of cities
#[derive(Debug, Clone, Default)]
pub struct CityRegistry {
    cities: Vec<City>,
}

impl CityRegistry {
    /// Load the registry bundled with the crate
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::from_reader(BUNDLED_CITIES.as_bytes())
    }

    /// Load a registry from CSV with columns `id,name,lat,lon,region,country,population`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut seen = HashSet::new();
        let mut cities = Vec::new();
        for result in csv_reader.deserialize() {
            let city: City = result?;
            if !seen.insert(city.id) {
                return Err(RegistryError::DuplicateId(city.id));
            }
            cities.push(city);
        }

        info!("Loaded {} cities", cities.len());
        Ok(Self { cities })
    }

    /// Build a registry from already constructed cities
    pub fn from_cities(cities: Vec<City>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for city in &cities {
            if !seen.insert(city.id) {
                return Err(RegistryError::DuplicateId(city.id));
            }
        }
        Ok(Self { cities })
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn iter(&self) -> std::slice::Iter<'_, City> {
        self.cities.iter()
    }

    pub fn get(&self, id: CityId) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl<'a> IntoIterator for &'a CityRegistry {
    type Item = &'a City;
    type IntoIter = std::slice::Iter<'a, City>;

    fn into_iter(self) -> Self::IntoIter {
        self.cities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_registry_loads() {
        let registry = CityRegistry::bundled().unwrap();
        assert!(registry.len() > 20);

        let erbil = registry.iter().find(|c| c.name == "Erbil").unwrap();
        assert_eq!(erbil.country, "Iraq");
        assert!((erbil.lat - 36.1911).abs() < 1e-6);
    }

    #[test]
    fn test_bundled_registry_has_capital_with_diacritics() {
        let registry = CityRegistry::bundled().unwrap();
        assert!(registry.iter().any(|c| c.name == "Diyarbakır"));
    }

    #[test]
    fn test_from_reader_preserves_order() {
        let csv = "id,name,lat,lon,region,country,population\n\
                   7,Van,38.5,43.37,Eastern Anatolia,Turkey,1128749\n\
                   3,Duhok,36.87,42.95,Kurdistan Region,Iraq,340900\n";
        let registry = CityRegistry::from_reader(csv.as_bytes()).unwrap();

        let ids: Vec<CityId> = registry.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CityId(7), CityId(3)]);
        assert_eq!(registry.get(CityId(3)).unwrap().name, "Duhok");
        assert!(registry.get(CityId(99)).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let csv = "id,name,lat,lon,region,country,population\n\
                   1,Erbil,36.19,44.01,Kurdistan Region,Iraq,1612700\n\
                   1,Hewler,36.19,44.01,Kurdistan Region,Iraq,1612700\n";
        let err = CityRegistry::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId(CityId(1))));
    }

    #[test]
    fn test_malformed_row_rejected() {
        let csv = "id,name,lat,lon,region,country,population\n\
                   1,Erbil,north,44.01,Kurdistan Region,Iraq,1612700\n";
        assert!(matches!(
            CityRegistry::from_reader(csv.as_bytes()),
            Err(RegistryError::Csv(_))
        ));
    }
}

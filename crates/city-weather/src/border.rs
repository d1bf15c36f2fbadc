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

//! Region outline overlay data.
//!
//! The outline ships as GeoJSON and is parsed once at start-up into a
//! [`geo::MultiPolygon`]. Only the outer ring of each polygon is kept; holes
//! are not drawn.

use geo::{Area, Contains, Geometry, MultiPolygon, Point, Polygon, TriangulateEarcut};
use geojson::GeoJson;
use log::info;
use thiserror::Error;

const BUNDLED_BORDER: &str = include_str!("../data/kurdistan_border.geojson");

/// Errors that can occur while parsing the outline.
#[derive(Debug, Error)]
pub enum BorderError {
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("no Polygon or MultiPolygon geometry found")]
    NoPolygon,
}

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

impl From<geo::Coord<f64>> for GeoPoint {
    fn from(c: geo::Coord<f64>) -> Self {
        GeoPoint::new(c.y, c.x)
    }
}

/// Static outline of the region (x = lon, y = lat)
#[derive(Debug, Clone)]
pub struct BorderPolygon {
    shape: MultiPolygon<f64>,
}

impl BorderPolygon {
    /// Outline bundled with the crate
    pub fn bundled() -> Result<Self, BorderError> {
        Self::from_geojson(BUNDLED_BORDER)
    }

    /// Parse a FeatureCollection, Feature, or bare Polygon/MultiPolygon geometry
    pub fn from_geojson(json: &str) -> Result<Self, BorderError> {
        let raw: GeoJson = json.parse()?;

        let values = match raw {
            GeoJson::FeatureCollection(fc) => fc
                .features
                .into_iter()
                .filter_map(|f| f.geometry)
                .map(|g| g.value)
                .collect(),
            GeoJson::Feature(f) => f.geometry.into_iter().map(|g| g.value).collect(),
            GeoJson::Geometry(g) => vec![g.value],
        };

        let mut polygons = Vec::new();
        for value in values {
            let geom: Geometry<f64> = value.try_into()?;
            match geom {
                Geometry::Polygon(p) => polygons.push(p),
                Geometry::MultiPolygon(m) => polygons.extend(m.0),
                _ => {}
            }
        }

        let border = Self::from_polygons(polygons).ok_or(BorderError::NoPolygon)?;
        info!(
            "Loaded border outline: {} ring(s), {} points",
            border.polygon_count(),
            border.outlines().iter().map(Vec::len).sum::<usize>()
        );
        Ok(border)
    }

    /// Keep the exterior of every polygon with at least three distinct points
    pub fn from_polygons(polygons: impl IntoIterator<Item = Polygon<f64>>) -> Option<Self> {
        let outers: Vec<Polygon<f64>> = polygons
            .into_iter()
            .map(|p| Polygon::new(p.exterior().clone(), Vec::new()))
            // a closed triangle has 4 coordinates
            .filter(|p| p.exterior().0.len() >= 4)
            .collect();

        if outers.is_empty() {
            None
        } else {
            Some(Self {
                shape: MultiPolygon(outers),
            })
        }
    }

    pub fn polygon_count(&self) -> usize {
        self.shape.0.len()
    }

    /// Outer ring of each polygon, without the closing point
    pub fn outlines(&self) -> Vec<Vec<GeoPoint>> {
        self.shape
            .0
            .iter()
            .map(|p| {
                let coords = &p.exterior().0;
                let open = coords.len().saturating_sub(1);
                coords[..open].iter().copied().map(GeoPoint::from).collect()
            })
            .collect()
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        self.shape.contains(&Point::from(point))
    }

    /// Area in square degrees
    pub fn area(&self) -> f64 {
        self.shape.unsigned_area()
    }

    /// Ear-clipping triangulation of every polygon.
    ///
    /// egui can only fill convex shapes, so the renderer fills the outline
    /// with a mesh built from these triangles.
    pub fn triangles(&self) -> Vec<[GeoPoint; 3]> {
        self.shape
            .0
            .iter()
            .flat_map(|p| p.earcut_triangles_iter())
            .map(|t| t.to_array().map(GeoPoint::from))
            .collect()
    }
}

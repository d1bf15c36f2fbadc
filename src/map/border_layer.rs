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

//! Region outline overlay.

use city_weather::{BorderPolygon, GeoPoint};
use eframe::egui;
use egui::epaint::Mesh;
use walkers::{lat_lon, MapMemory, Plugin, Position, Projector};

const BORDER_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);
const BORDER_WIDTH: f32 = 2.0;

// Red at 10% opacity
const BORDER_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(26, 0, 0, 26);

/// Outline and fill triangles in map positions
#[derive(Debug, Clone)]
pub struct BorderOverlay {
    rings: Vec<Vec<Position>>,
    triangles: Vec<[Position; 3]>,
}

fn position(point: GeoPoint) -> Position {
    lat_lon(point.lat, point.lon)
}

impl BorderOverlay {
    pub fn new(border: &BorderPolygon) -> Self {
        let rings = border
            .outlines()
            .into_iter()
            .map(|ring| ring.into_iter().map(position).collect())
            .collect();

        let triangles = border
            .triangles()
            .into_iter()
            .map(|triangle| triangle.map(position))
            .collect();

        Self { rings, triangles }
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl Plugin for &BorderOverlay {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let painter = ui.painter_at(response.rect);
        let project = |position: &Position| projector.project(*position).to_pos2();

        let mut mesh = Mesh::default();
        for triangle in &self.triangles {
            // Vertices are not shared between triangles
            let base = u32::try_from(mesh.vertices.len()).unwrap_or(u32::MAX);
            for position in triangle {
                mesh.colored_vertex(project(position), BORDER_FILL);
            }
            mesh.add_triangle(base, base + 1, base + 2);
        }
        painter.add(egui::Shape::mesh(mesh));

        for ring in &self.rings {
            let points: Vec<egui::Pos2> = ring.iter().map(project).collect();
            painter.add(egui::Shape::closed_line(
                points,
                egui::Stroke::new(BORDER_WIDTH, BORDER_COLOR),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_outline_is_triangulated() {
        let border = BorderPolygon::bundled().unwrap();
        let overlay = BorderOverlay::new(&border);

        assert_eq!(overlay.ring_count(), border.polygon_count());
        assert_eq!(overlay.triangle_count(), border.triangles().len());
        assert!(overlay.triangle_count() > 0);
    }
}

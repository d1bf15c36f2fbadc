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

//! City marker layer: capital star, temperature-colored circles, hover labels
//! and click selection.

use city_weather::{resolve_marker, City, CityId, Hsl, MarkerStyle, UnitSystem, WeatherMap};
use eframe::egui;
use walkers::{lat_lon, MapMemory, Plugin, Projector};

/// Edge length of the capital star icon in points
const CAPITAL_ICON_SIZE: f32 = 48.0;

/// Extra pointer tolerance around a marker
const HIT_SLOP: f32 = 3.0;

const LABEL_OFFSET: f32 = 10.0;

/// Walkers plugin drawing one marker per city
#[derive(Debug)]
pub struct CityMarkers<'a> {
    pub cities: &'a [City],
    pub weather: &'a WeatherMap,
    pub unit: UnitSystem,
    pub capital: &'a str,
    pub selected: &'a mut Option<CityId>,
}

impl Plugin for CityMarkers<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let Self {
            cities,
            weather,
            unit,
            capital,
            selected,
        } = *self;

        let painter = ui.painter_at(response.rect);
        let visible = response.rect.expand(CAPITAL_ICON_SIZE);
        let hover_pos = response.hover_pos();
        let click_pos = if response.clicked() {
            response.interact_pointer_pos()
        } else {
            None
        };

        let mut hovered: Option<(&City, egui::Pos2, f32)> = None;

        for city in cities {
            let pos = projector.project(lat_lon(city.lat, city.lon)).to_pos2();
            if !visible.contains(pos) {
                continue;
            }

            let hit_radius = match resolve_marker(city, weather.get(city.id), unit, capital) {
                MarkerStyle::Capital => {
                    let rect = egui::Rect::from_center_size(pos, egui::Vec2::splat(CAPITAL_ICON_SIZE));
                    egui::Image::new(egui::include_image!("../../assets/capital_star.svg")).paint_at(ui, rect);
                    CAPITAL_ICON_SIZE / 2.0
                }
                MarkerStyle::Circle { radius, fill } => {
                    let radius = pixels(radius);
                    painter.circle(pos, radius, marker_fill(fill), egui::Stroke::new(1.0, egui::Color32::BLACK));
                    radius
                }
            };

            if *selected == Some(city.id) {
                painter.circle_stroke(pos, hit_radius + 3.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
            }

            let hit = |p: egui::Pos2| p.distance(pos) <= hit_radius + HIT_SLOP;

            if hover_pos.is_some_and(hit) {
                hovered = Some((city, pos, hit_radius));
            }

            if click_pos.is_some_and(hit) {
                *selected = Some(city.id);
            }
        }

        // Label drawn last so it sits above neighbouring markers
        if let Some((city, pos, radius)) = hovered {
            draw_label(&painter, pos - egui::vec2(0.0, radius + LABEL_OFFSET), &city.name);
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
    }
}

/// Fill color at 90% opacity
fn marker_fill(color: Hsl) -> egui::Color32 {
    let [r, g, b] = color.to_rgb();
    egui::Color32::from_rgba_unmultiplied(r, g, b, 230)
}

#[allow(clippy::cast_precision_loss, reason = "marker radii are a handful of pixels")]
fn pixels(radius: u32) -> f32 {
    radius as f32
}

fn draw_label(painter: &egui::Painter, anchor: egui::Pos2, text: &str) {
    let font = egui::FontId::proportional(12.0);
    let galley = painter.layout_no_wrap(text.to_string(), font.clone(), egui::Color32::WHITE);

    let padding = egui::vec2(4.0, 2.0);
    let box_rect = egui::Rect::from_center_size(
        anchor - egui::vec2(0.0, galley.size().y / 2.0),
        galley.size() + padding * 2.0,
    );
    painter.rect_filled(box_rect, 3.0, egui::Color32::from_rgba_unmultiplied(0, 0, 0, 210));

    painter.text(
        box_rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        font,
        egui::Color32::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_fill_is_mostly_opaque() {
        let fill = marker_fill(Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(fill.a(), 230);
        assert_eq!(marker_fill(Hsl::NEUTRAL).a(), 230);
    }
}

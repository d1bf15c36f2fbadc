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

use city_weather::CityDetails;
use eframe::egui;

/// Floating panel with the details of the clicked city.
/// Returns false once the user closes the window.
pub fn render_city_details(ctx: &egui::Context, details: &CityDetails) -> bool {
    let mut open = true;

    egui::Window::new(egui::RichText::new(&details.title).strong())
        .id(egui::Id::new("city_details"))
        .open(&mut open)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-10.0, -10.0))
        .resizable(false)
        .collapsible(false)
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(egui::Color32::from_rgba_unmultiplied(25, 30, 35, 230))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(60, 80, 100)))
                .corner_radius(6.0),
        )
        .show(ctx, |ui| {
            egui::Grid::new("city_details_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    row(ui, "Region", &details.region);
                    row(ui, "Country", &details.country);
                    row(ui, "Temp", &details.temperature);
                    row(ui, "Condition", &details.condition);
                });
        });

    open
}

fn row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(
        egui::RichText::new(label)
            .color(egui::Color32::from_rgb(150, 150, 150))
            .size(11.0),
    );
    ui.label(egui::RichText::new(value).color(egui::Color32::WHITE));
    ui.end_row();
}

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

use chrono::{DateTime, Local};
use city_weather::UnitSystem;
use eframe::egui;

use crate::fetch_cycle::FetchState;

const PANEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(22, 26, 30, 210);
const PANEL_STROKE: egui::Color32 = egui::Color32::from_rgb(60, 80, 100);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(100, 180, 220);

fn overlay_frame(ctx: &egui::Context) -> egui::Frame {
    egui::Frame::window(&ctx.style())
        .fill(PANEL_FILL)
        .stroke(egui::Stroke::new(1.0, PANEL_STROKE))
        .corner_radius(6.0)
        .shadow(egui::epaint::Shadow::NONE)
}

const FLAG_SIZE: egui::Vec2 = egui::vec2(36.0, 24.0);

fn flag_image() -> egui::ImageSource<'static> {
    egui::include_image!("../../assets/kurdistan_flag.svg")
}

fn flag(ui: &mut egui::Ui) {
    ui.add(egui::Image::new(flag_image()).fit_to_exact_size(FLAG_SIZE));
}

/// Title banner at the top of the map, flanked by the flag
pub fn render_header(ctx: &egui::Context) {
    egui::Area::new(egui::Id::new("map_header"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 10.0))
        .interactable(false)
        .show(ctx, |ui| {
            overlay_frame(ctx).show(ui, |ui| {
                ui.horizontal(|ui| {
                    flag(ui);
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new("Kurdistan Weather Map")
                                .color(egui::Color32::WHITE)
                                .size(20.0)
                                .strong(),
                        );
                        ui.label(
                            egui::RichText::new("Live temperatures across Kurdish regions")
                                .color(ACCENT)
                                .size(11.0),
                        );
                    });
                    ui.add_space(8.0);
                    flag(ui);
                });
            });
        });
}

/// Unit toggle button. Returns true when clicked.
pub fn render_unit_toggle(ctx: &egui::Context, unit: UnitSystem, loading: bool) -> bool {
    let mut clicked = false;

    egui::Area::new(egui::Id::new("unit_toggle"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .show(ctx, |ui| {
            overlay_frame(ctx).show(ui, |ui| {
                let label = toggle_label(unit);
                let button = ui.add(egui::Button::new(
                    egui::RichText::new(label).size(14.0).color(egui::Color32::WHITE),
                ));
                let hover = if loading {
                    "Refetches weather, overlapping the fetch in progress"
                } else {
                    "Switch units and refetch weather"
                };
                clicked = button.on_hover_text(hover).clicked();
            });
        });

    clicked
}

fn toggle_label(unit: UnitSystem) -> String {
    format!("Show in {}", unit.toggled().symbol())
}

/// Snapshot of the fetch cycle shown in the bottom-left status line
#[derive(Debug, Clone, Copy)]
pub struct StatusLine {
    pub state: FetchState,
    pub has_api_key: bool,
    pub reported: usize,
    pub total: usize,
    pub last_updated: Option<DateTime<Local>>,
}

impl StatusLine {
    pub fn text(&self) -> String {
        if !self.has_api_key {
            return format!(
                "No OpenWeatherMap API key set ({}); markers show no temperature",
                crate::config::API_KEY_ENV
            );
        }

        match self.state {
            FetchState::Idle => "Waiting for weather".to_string(),
            FetchState::Loading => "Fetching weather…".to_string(),
            FetchState::Empty => "No weather data".to_string(),
            FetchState::Populated => {
                let time = self
                    .last_updated
                    .map_or_else(|| "--:--".to_string(), |t| t.format("%H:%M").to_string());
                format!("Updated {time} · {}/{} cities", self.reported, self.total)
            }
        }
    }

    fn color(&self) -> egui::Color32 {
        match (self.has_api_key, self.state) {
            (false, _) | (true, FetchState::Empty) => egui::Color32::from_rgb(255, 200, 80),
            (true, FetchState::Populated) => egui::Color32::from_rgb(100, 220, 120),
            _ => ACCENT,
        }
    }
}

pub fn render_status_line(ctx: &egui::Context, status: &StatusLine) {
    egui::Area::new(egui::Id::new("status_line"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
        .interactable(false)
        .show(ctx, |ui| {
            overlay_frame(ctx).show(ui, |ui| {
                ui.horizontal(|ui| {
                    if status.state == FetchState::Loading {
                        ui.spinner();
                    }
                    ui.label(egui::RichText::new(status.text()).color(status.color()).size(11.0));
                });
            });
        });
}

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

//! Repaint on window resize so the map re-lays out its tiles and markers.

use eframe::egui;
use log::debug;

#[derive(Debug, Default)]
pub struct ViewportWatcher {
    last_size: Option<egui::Vec2>,
}

impl ViewportWatcher {
    /// Record the current size; true on the first frame and whenever it
    /// differs from the last one seen.
    pub fn observe(&mut self, size: egui::Vec2) -> bool {
        let changed = self.last_size != Some(size);
        self.last_size = Some(size);
        changed
    }

    pub fn track(&mut self, ctx: &egui::Context) {
        let size = ctx.screen_rect().size();
        if self.observe(size) {
            debug!("Viewport size now {:.0}x{:.0}", size.x, size.y);
            ctx.request_repaint();
        }
    }
}

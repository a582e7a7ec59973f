// SPDX-License-Identifier: GPL-3.0-only

//! Menu handlers

use crate::app::state::CameraController;
use tracing::info;

impl CameraController {
    pub(crate) fn handle_menu_toggle(&mut self) {
        self.menu = self.menu.toggle_mode();
        info!(menu = ?self.menu, "Mode menu toggled");
    }

    pub(crate) fn handle_exposure_toggle(&mut self) {
        self.menu = self.menu.toggle_exposure();
        info!(menu = ?self.menu, "Exposure panel toggled");
    }

    pub(crate) fn handle_tap_away(&mut self) {
        if self.menu.is_expanded() {
            self.menu = self.menu.tap_away();
            info!("Menu collapsed by tap away");
        }
    }
}

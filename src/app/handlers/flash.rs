// SPDX-License-Identifier: GPL-3.0-only

//! Flash handlers

use crate::app::popup::PopupOwner;
use crate::app::state::CameraController;
use tracing::info;

impl CameraController {
    pub(crate) fn handle_flash_toggle(&mut self) {
        let mode = self.flash_mode.next();
        self.flash_mode = mode;
        // Mirror first so a capture issued right after the toggle sees it
        self.cells.flash.store(mode);
        info!(flash_mode = ?mode, "Flash toggled");

        self.popup.preempt(PopupOwner::Flash, mode.label().to_string());
        self.popup
            .schedule_release(PopupOwner::Flash, self.config.popup_release(), &self.tx);
    }
}

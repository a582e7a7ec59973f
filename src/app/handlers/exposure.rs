// SPDX-License-Identifier: GPL-3.0-only

//! Exposure handlers

use crate::app::state::CameraController;
use tracing::debug;

impl CameraController {
    pub(crate) fn handle_exposure_committed(&mut self, slider: f64) {
        let offset = self.cells.exposure_offset();
        debug!(slider, offset, "Exposure committed");
        self.apply_exposure(offset);
    }

    /// Return the slider to neutral and clear the device bias
    pub(crate) fn reset_exposure(&mut self) {
        let offset = self.cells.commit_exposure(0.0);
        self.apply_exposure(offset);
    }

    fn apply_exposure(&mut self, offset: f64) {
        if let Err(e) = self.backend.set_exposure_offset(offset) {
            self.report_backend_error("exposure", e);
        }
    }
}

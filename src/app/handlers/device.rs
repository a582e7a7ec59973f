// SPDX-License-Identifier: GPL-3.0-only

//! Device lifecycle handlers

use crate::app::state::CameraController;
use crate::backends::camera::DeviceDescriptor;
use crate::flash::FlashMode;
use tracing::{error, info};

impl CameraController {
    /// A new device or lens became active: every parameter returns to its default
    pub(crate) fn handle_device_changed(&mut self, descriptor: DeviceDescriptor) {
        info!(?descriptor, "Camera device changed");
        self.descriptor = descriptor;
        if self.recovery.is_recovering() {
            // The new device starts with a fresh stream
            if let Err(e) = self.backend.set_active(true) {
                error!(error = %e, "Failed to resume camera stream");
            }
        }
        self.clear_transient_state();

        self.cells.reset_to_device(&descriptor);
        self.flash_mode = FlashMode::default();

        let neutral = self.cells.zoom_range().neutral;
        self.apply_zoom(neutral);
        self.reset_exposure();
    }

    /// Cancel every timer and in-flight operation of the session
    pub(crate) fn teardown(&mut self) {
        info!("Camera session closing");
        self.clear_transient_state();
        if let Err(e) = self.backend.set_active(false) {
            error!(error = %e, "Failed to stop camera stream");
        }
    }

    fn clear_transient_state(&mut self) {
        self.popup.reset();
        self.focus_ring.reset();
        // Pending focus completions now belong to a previous device
        self.focus_tap = self.focus_tap.wrapping_add(1);
        self.capture.reset();
        self.recovery.reset();
    }
}

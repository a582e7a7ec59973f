// SPDX-License-Identifier: GPL-3.0-only

//! Hardware recovery handlers
//!
//! A recovery cycle pauses the stream, waits out the cooldown, then resets
//! zoom to neutral and resumes.

use crate::app::params::{format_zoom_label, zoom_to_logical};
use crate::app::popup::PopupOwner;
use crate::app::recovery::FaultDisposition;
use crate::app::state::{CameraController, SessionEvent};
use crate::backends::camera::BackendError;
use std::fmt::Display;
use tracing::{debug, error, info, warn};

impl CameraController {
    /// Log a failed backend call and recover if it was a hardware fault
    ///
    /// Transient failures are not retried; the gesture simply has no effect.
    pub(crate) fn report_backend_error(&mut self, operation: &'static str, err: BackendError) {
        if err.is_hardware_fault() {
            self.start_recovery(operation, &err);
        } else {
            warn!(operation, error = %err, "Camera operation failed");
        }
    }

    pub(crate) fn start_recovery(&mut self, source: &'static str, cause: &dyn Display) {
        let disposition = self
            .recovery
            .report_fault(self.config.recovery_cooldown(), &self.tx);

        match disposition {
            FaultDisposition::Coalesced => {
                debug!(source, error = %cause, "Fault during recovery coalesced");
            }
            FaultDisposition::Started => {
                warn!(
                    source,
                    error = %cause,
                    cooldown_ms = self.config.recovery_cooldown_ms,
                    "Hardware fault detected, pausing camera"
                );
                if let Err(e) = self.backend.set_active(false) {
                    error!(error = %e, "Failed to pause camera stream");
                }
                let _ = self.events.send(SessionEvent::RecoveryStarted);
            }
        }
    }

    pub(crate) fn handle_recovery_cooldown_elapsed(&mut self, generation: u64) {
        if !self.recovery.on_cooldown_elapsed(generation) {
            debug!(generation, "Stale recovery cooldown ignored");
            return;
        }

        let range = self.cells.zoom_range();
        let neutral = range.neutral;
        self.cells.set_zoom(neutral);
        // A zoom popup still up from before the fault must not show the old level
        let label = format_zoom_label(zoom_to_logical(neutral, &range));
        self.popup.refresh(PopupOwner::Zoom, label);
        if let Err(e) = self.backend.set_zoom(neutral) {
            error!(error = %e, "Failed to reset zoom after recovery");
        }
        if let Err(e) = self.backend.set_active(true) {
            error!(error = %e, "Failed to resume camera stream");
        }

        info!(
            zoom = neutral,
            cycles = self.recovery.completed_cycles(),
            "Camera recovered"
        );
        let _ = self.events.send(SessionEvent::RecoveryFinished);
    }
}

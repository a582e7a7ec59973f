// SPDX-License-Identifier: GPL-3.0-only

//! Tap-to-focus handlers

use crate::app::gestures::Point;
use crate::app::state::{CameraController, Message, SessionEvent};
use crate::backends::camera::BackendResult;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl CameraController {
    // =========================================================================
    // Focus Handlers
    // =========================================================================

    pub(crate) fn handle_focus_tap(&mut self, point: Point) {
        if !point.is_finite() {
            return;
        }
        if !self.descriptor.supports_focus {
            debug!("Device cannot focus, tap ignored");
            return;
        }
        if self.recovery.is_recovering() {
            debug!("Camera recovering, tap ignored");
            return;
        }
        if self
            .layout
            .is_reserved(point, self.menu.exposure_panel_open())
        {
            debug!(x = point.x, y = point.y, "Tap on control region ignored");
            return;
        }

        info!(x = point.x, y = point.y, "Focus tap");

        // Focusing re-meters the scene, so any manual bias is dropped
        self.reset_exposure();

        self.focus_tap = self.focus_tap.wrapping_add(1);
        let tap = self.focus_tap;
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.focus(point.x, point.y).await;
            let _ = tx.send(Message::FocusFinished { tap, result });
        });

        self.focus_ring
            .show(point, self.config.focus_ring_hide(), &self.tx);
    }

    pub(crate) fn handle_focus_finished(&mut self, tap: u64, result: BackendResult<()>) {
        let Err(e) = result else {
            debug!(tap, "Focus completed");
            return;
        };

        if tap != self.focus_tap {
            debug!(tap, current = self.focus_tap, error = %e, "Superseded focus failed");
        } else {
            warn!(tap, error = %e, "Focus failed");
            let _ = self.events.send(SessionEvent::FocusFailed(e.clone()));
        }
        if e.is_hardware_fault() {
            self.start_recovery("focus", &e);
        }
    }

    pub(crate) fn handle_focus_ring_elapsed(&mut self, generation: u64) {
        if !self.focus_ring.on_hide_elapsed(generation) {
            debug!(generation, "Stale focus ring timer ignored");
        }
    }
}

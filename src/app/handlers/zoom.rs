// SPDX-License-Identifier: GPL-3.0-only

//! Zoom handlers
//!
//! The pinch itself runs on the sampling path and writes the zoom cell; these
//! handlers push the value to the device, arbitrate the popup and perform
//! the snap-to-neutral when the pinch ends.

use crate::app::params::{format_zoom_label, logical_to_zoom, zoom_to_logical};
use crate::app::popup::PopupOwner;
use crate::app::state::CameraController;
use crate::backends::haptics::{HapticIntensity, pulse_quietly};
use crate::constants::zoom;
use tracing::{debug, info};

impl CameraController {
    // =========================================================================
    // Zoom Handlers
    // =========================================================================

    pub(crate) fn handle_zoom_sampled(&mut self, sampled: f64) {
        // A newer sample may already be in the cell; always use the freshest value
        let actual = self.cells.zoom();
        debug!(sampled, actual, "Zoom sample");
        self.apply_zoom(actual);
        self.show_zoom_popup(actual);
    }

    pub(crate) fn handle_pinch_ended(&mut self) {
        let range = self.cells.zoom_range();
        let actual = self.cells.zoom();

        if self.cells.pinch_active() {
            // A new pinch started before this end was processed; it owns the
            // zoom and its own end arms the release
            debug!("Pinch restarted, skipping snap");
            return;
        }

        if (actual - range.neutral).abs() <= zoom::SNAP_TO_NEUTRAL_DISTANCE
            && actual != range.neutral
        {
            info!(from = actual, to = range.neutral, "Snapping zoom to neutral");
            self.cells.set_zoom(range.neutral);
            self.apply_zoom(range.neutral);
            self.show_zoom_popup(range.neutral);
            if self.config.haptics_enabled {
                pulse_quietly(self.haptics.as_ref(), HapticIntensity::Light);
            }
        }

        self.popup
            .schedule_release(PopupOwner::Zoom, self.config.popup_release(), &self.tx);
    }

    pub(crate) fn handle_zoom_preset(&mut self, logical: f64) {
        if !logical.is_finite() {
            return;
        }
        let range = self.cells.zoom_range();
        let actual = logical_to_zoom(logical, &range).min(range.display_max());
        info!(logical, actual, "Zoom preset");

        self.cells.set_zoom(actual);
        self.apply_zoom(actual);
        self.show_zoom_popup(actual);
        self.popup
            .schedule_release(PopupOwner::Zoom, self.config.popup_release(), &self.tx);
    }

    /// Push a zoom factor to the device
    pub(crate) fn apply_zoom(&mut self, actual: f64) {
        if let Err(e) = self.backend.set_zoom(actual) {
            self.report_backend_error("zoom", e);
        }
    }

    /// Show the zoom value unless flash currently holds the popup
    fn show_zoom_popup(&mut self, actual: f64) {
        let logical = zoom_to_logical(actual, &self.cells.zoom_range());
        self.popup
            .claim(PopupOwner::Zoom, format_zoom_label(logical));
    }
}

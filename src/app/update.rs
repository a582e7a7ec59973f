// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher, while specific handlers
//! are implemented in the `handlers` submodules organized by interaction.
//!
//! # Handler Modules
//!
//! - `handlers::zoom`: Pinch samples, snap-to-neutral, presets
//! - `handlers::focus`: Tap-to-focus and the focus ring
//! - `handlers::exposure`: Exposure bias
//! - `handlers::flash`: Flash cycling
//! - `handlers::ui`: Mode menu and exposure panel
//! - `handlers::capture`: Capture sequencing
//! - `handlers::recovery`: Hardware fault recovery
//! - `handlers::device`: Device changes and teardown

use crate::app::state::{CameraController, Message};
use tracing::debug;

impl CameraController {
    /// Route a message to its handler
    pub fn update(&mut self, message: Message) {
        match message {
            // ===== Sampling path =====
            Message::ZoomSampled { actual } => self.handle_zoom_sampled(actual),
            Message::PinchEnded => self.handle_pinch_ended(),
            Message::ExposureCommitted { slider } => self.handle_exposure_committed(slider),

            // ===== Commands =====
            Message::FocusTap(point) => self.handle_focus_tap(point),
            Message::FlashToggle => self.handle_flash_toggle(),
            Message::MenuToggle => self.handle_menu_toggle(),
            Message::ExposureToggle => self.handle_exposure_toggle(),
            Message::TapAway => self.handle_tap_away(),
            Message::Capture => self.handle_capture(),
            Message::ZoomPreset(logical) => self.handle_zoom_preset(logical),
            Message::DeviceChanged(descriptor) => self.handle_device_changed(descriptor),

            // ===== Async completions =====
            Message::FocusFinished { tap, result } => self.handle_focus_finished(tap, result),
            Message::CaptureFinished { session, result } => {
                self.handle_capture_finished(session, result)
            }

            // ===== Timers =====
            Message::PopupReleaseElapsed { owner, generation } => {
                if self.popup.on_release_elapsed(owner, generation) {
                    debug!(?owner, "Popup released");
                }
            }
            Message::FocusRingElapsed { generation } => self.handle_focus_ring_elapsed(generation),
            Message::RecoveryCooldownElapsed { generation } => {
                self.handle_recovery_cooldown_elapsed(generation)
            }

            // ===== Session =====
            Message::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            Message::Shutdown => self.teardown(),
        }
    }
}

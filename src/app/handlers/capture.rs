// SPDX-License-Identifier: GPL-3.0-only

//! Capture sequencing
//!
//! One capture at a time. The capture primitive runs in its own task and a
//! watchdog task races it against the configured timeout; whichever way it
//! ends, exactly one `CaptureFinished` comes back to the control loop and
//! releases the slot. Resetting the slot aborts both tasks.

use crate::app::state::{CameraController, CaptureRejection, Message, SessionEvent};
use crate::backends::camera::{CaptureOptions, PhotoResult};
use crate::errors::CaptureError;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl CameraController {
    // =========================================================================
    // Capture Handlers
    // =========================================================================

    pub(crate) fn handle_capture(&mut self) {
        if self.recovery.is_recovering() {
            info!("Capture rejected: camera recovering");
            let _ = self
                .events
                .send(SessionEvent::CaptureRejected(CaptureRejection::Recovering));
            return;
        }

        // Read the mirror, not `flash_mode`: it is what the user last saw
        let flash = self.cells.flash.load();
        let Some(session) = self.capture.begin(flash.feedback()) else {
            info!("Capture rejected: capture already in flight");
            let _ = self
                .events
                .send(SessionEvent::CaptureRejected(CaptureRejection::InFlight));
            return;
        };

        info!(session, ?flash, "Capturing photo...");

        let backend = Arc::clone(&self.backend);
        let options = CaptureOptions { flash };
        // Own task so a panicking backend still produces a completion
        let capture = tokio::spawn(async move { backend.capture(options).await });
        let capture_abort = capture.abort_handle();

        let tx = self.tx.clone();
        let timeout = self.config.capture_timeout();
        let watchdog_capture = capture.abort_handle();
        let watchdog = tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, capture).await {
                Ok(Ok(Ok(photo))) => Ok(photo),
                Ok(Ok(Err(e))) => Err(CaptureError::classify(&e)),
                Ok(Err(join_error)) => Err(CaptureError::Other(join_error.to_string())),
                Err(_) => {
                    watchdog_capture.abort();
                    Err(CaptureError::Timeout)
                }
            };
            let _ = tx.send(Message::CaptureFinished { session, result });
        });
        self.capture
            .attach_tasks(capture_abort, watchdog.abort_handle());
    }

    pub(crate) fn handle_capture_finished(
        &mut self,
        session: u64,
        result: Result<PhotoResult, CaptureError>,
    ) {
        if !self.capture.finish(session) {
            debug!(session, "Stale capture completion ignored");
            return;
        }

        match result {
            Ok(photo) => {
                info!(session, path = %photo.path.display(), "Photo captured");
                let _ = self.events.send(SessionEvent::PhotoCaptured(photo));
            }
            Err(error) => {
                warn!(session, error = %error, "Capture failed");
                if error.needs_recovery() {
                    self.start_recovery("capture", &error);
                }
                let retryable = error.is_retryable();
                let _ = self
                    .events
                    .send(SessionEvent::CaptureFailed { error, retryable });
            }
        }
    }
}

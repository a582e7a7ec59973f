// SPDX-License-Identifier: GPL-3.0-only

//! Camera interaction coordinator
//!
//! Two execution contexts cooperate here:
//!
//! ```text
//!  touch samples                         control loop (tokio task)
//! ┌──────────────┐   atomic cells    ┌──────────────────────────────┐
//! │GestureSampler│ ─────────────────►│ CameraController::update()   │
//! │  (sampling)  │   Message (mpsc)  │  popup / menu / capture /    │
//! └──────────────┘ ─────────────────►│  recovery / focus ring       │
//!                                    └───────┬───────────┬──────────┘
//!                      timers, async results │           │ snapshots, events
//!                         (back into mpsc) ◄─┘           ▼
//!                                                   view layer
//! ```
//!
//! The sampling side never blocks and never decides anything that involves
//! discrete shared state; it writes parameter cells and posts messages. All
//! arbitration happens in [`CameraController::update`], one message at a time.

pub mod cells;
pub mod gestures;
pub mod handlers;
pub mod menu;
pub mod params;
pub mod popup;
pub mod recovery;
pub mod session;
pub mod state;
pub mod timer;
pub mod update;

pub use gestures::{GestureSampler, Point, Rect, ScreenLayout, TapRecognizer};
pub use menu::MenuState;
pub use popup::{PopupAnchor, PopupOwner, PopupView};
pub use recovery::CameraHealth;
pub use session::SessionHandle;
pub use state::{CameraController, CaptureRejection, ControlSnapshot, Message, SessionEvent};

use crate::app::params::{format_zoom_label, zoom_to_logical};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

impl CameraController {
    /// Build the render snapshot from the current state and cells
    pub fn snapshot(&self) -> ControlSnapshot {
        let zoom_actual = self.cells.zoom();
        let zoom_logical = zoom_to_logical(zoom_actual, &self.cells.zoom_range());
        ControlSnapshot {
            zoom_actual,
            zoom_logical,
            zoom_label: format_zoom_label(zoom_logical),
            popup: self.popup.view(),
            focus_ring: self.focus_ring.view(),
            menu: self.menu,
            menu_expansion: self.menu.expansion_factor(),
            exposure_panel: self.menu.exposure_panel_factor(),
            exposure_slider: self.cells.exposure_slider(),
            exposure_offset: self.cells.exposure_offset(),
            flash_mode: self.flash_mode,
            flash_icon: self.flash_mode.icon_name(),
            capture_in_flight: self.capture.in_flight(),
            flash_feedback: self.capture.feedback(),
            health: self.recovery.health(),
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }

    /// Process messages until shutdown
    pub async fn run(mut self, mut rx: UnboundedReceiver<Message>) {
        info!(descriptor = ?self.descriptor, "Camera control loop started");
        while let Some(message) = rx.recv().await {
            let shutdown = matches!(message, Message::Shutdown);
            self.update(message);
            if shutdown {
                break;
            }
            self.publish();
        }
        info!("Camera control loop stopped");
    }
}

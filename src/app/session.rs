// SPDX-License-Identifier: GPL-3.0-only

//! Session handle exposed to the view layer
//!
//! A [`SessionHandle`] owns one camera session: spawning it starts the control
//! loop, dropping the last clone (or calling [`SessionHandle::shutdown`])
//! cancels every timer and stops the loop.

use crate::app::cells::ParameterCells;
use crate::app::gestures::{GestureSampler, Point, ScreenLayout, TapRecognizer};
use crate::app::menu::MenuState;
use crate::app::popup::PopupArbitrator;
use crate::app::recovery::RecoverySupervisor;
use crate::app::state::{
    CameraController, CaptureSession, ControlSnapshot, FocusRing, Message, SessionEvent,
};
use crate::backends::camera::{CameraBackend, DeviceDescriptor};
use crate::backends::haptics::HapticFeedback;
use crate::config::Config;
use crate::constants::zoom;
use crate::errors::{AppError, AppResult};
use crate::flash::FlashMode;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::{oneshot, watch};
use tracing::debug;

/// Stops the control loop when the last handle goes away
#[derive(Debug)]
struct ShutdownGuard(UnboundedSender<Message>);

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        let _ = self.0.send(Message::Shutdown);
    }
}

/// Commands and render state of one camera session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: UnboundedSender<Message>,
    sampler: GestureSampler,
    tap: Arc<Mutex<TapRecognizer>>,
    snapshots: watch::Receiver<ControlSnapshot>,
    _guard: Arc<ShutdownGuard>,
}

impl SessionHandle {
    /// Start a session for `backend`'s current device
    ///
    /// Must be called within a tokio runtime. Returns the handle and the
    /// stream of outcomes the application should present to the user.
    pub fn spawn(
        backend: Arc<dyn CameraBackend>,
        haptics: Arc<dyn HapticFeedback>,
        config: Config,
        layout: ScreenLayout,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let config = config.validated();
        let tap = TapRecognizer::new(config.focus_min_hold());
        let descriptor = backend.descriptor();
        let cells = Arc::new(ParameterCells::new(
            &descriptor,
            config.exposure_conservative_fraction,
        ));

        let (tx, rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(ControlSnapshot::default());

        let mut controller = CameraController {
            backend,
            haptics,
            config,
            layout,
            cells: Arc::clone(&cells),
            tx: tx.clone(),
            events: events_tx,
            snapshots: snapshots_tx,
            descriptor,
            flash_mode: FlashMode::default(),
            popup: PopupArbitrator::new(),
            menu: MenuState::default(),
            focus_ring: FocusRing::default(),
            focus_tap: 0,
            capture: CaptureSession::default(),
            recovery: RecoverySupervisor::new(),
        };

        // Bring the device in line with the freshly reset cells
        controller.apply_zoom(cells.zoom());
        controller.reset_exposure();
        controller.snapshots.send_replace(controller.snapshot());

        tokio::spawn(controller.run(rx));

        let handle = Self {
            sampler: GestureSampler::new(cells, tx.clone()),
            tap: Arc::new(Mutex::new(tap)),
            _guard: Arc::new(ShutdownGuard(tx.clone())),
            tx,
            snapshots: snapshots_rx,
        };
        (handle, events_rx)
    }

    fn send(&self, message: Message) {
        if self.tx.send(message).is_err() {
            debug!("Camera session closed, command dropped");
        }
    }

    /// Sampling-path handle for continuous gestures
    ///
    /// Cheap to clone and safe to move to whatever thread delivers touches.
    pub fn sampler(&self) -> GestureSampler {
        self.sampler.clone()
    }

    // ===== Continuous gestures =====

    pub fn pinch_begin(&self) {
        self.sampler.pinch_begin();
    }

    pub fn pinch_update(&self, scale: f64) -> bool {
        self.sampler.pinch_update(scale)
    }

    pub fn pinch_end(&self) {
        self.sampler.pinch_end();
    }

    pub fn exposure_drag(&self, value: f64) -> bool {
        self.sampler.exposure_drag(value)
    }

    // ===== Focus taps =====

    fn tap(&self) -> MutexGuard<'_, TapRecognizer> {
        self.tap.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A recognized focus tap at screen coordinates
    pub fn focus_tap(&self, x: f64, y: f64) {
        self.send(Message::FocusTap(Point::new(x, y)));
    }

    /// Raw touch down for delayed focus recognition
    pub fn focus_press(&self, x: f64, y: f64) {
        self.tap().press(Point::new(x, y), now());
    }

    pub fn focus_move(&self, x: f64, y: f64) {
        self.tap().move_to(Point::new(x, y));
    }

    /// Check a held touch; posts the focus tap once the minimum hold passed
    pub fn focus_poll(&self) -> bool {
        let recognized = self.tap().poll(now());
        self.post_tap(recognized)
    }

    /// Touch up; returns whether this touch produced a focus tap
    pub fn focus_release(&self) -> bool {
        let recognized = self.tap().release(now());
        self.post_tap(recognized)
    }

    fn post_tap(&self, recognized: Option<Point>) -> bool {
        match recognized {
            Some(point) => {
                self.send(Message::FocusTap(point));
                true
            }
            None => false,
        }
    }

    // ===== Discrete commands =====

    pub fn flash_toggle(&self) {
        self.send(Message::FlashToggle);
    }

    pub fn menu_toggle(&self) {
        self.send(Message::MenuToggle);
    }

    pub fn exposure_toggle(&self) {
        self.send(Message::ExposureToggle);
    }

    pub fn tap_away(&self) {
        self.send(Message::TapAway);
    }

    pub fn capture(&self) {
        self.send(Message::Capture);
    }

    /// Jump to a logical zoom level
    pub fn zoom_preset(&self, logical: f64) {
        self.send(Message::ZoomPreset(logical));
    }

    /// Back to the 1x level
    pub fn zoom_reset(&self) {
        self.zoom_preset(zoom::LOGICAL_NEUTRAL);
    }

    /// The platform switched device or lens
    pub fn set_device(&self, descriptor: DeviceDescriptor) {
        self.send(Message::DeviceChanged(descriptor));
    }

    /// Tear the session down; further commands are dropped
    pub fn shutdown(&self) {
        self.send(Message::Shutdown);
    }

    // ===== Render state =====

    /// Snapshot taken after every previously sent command was processed
    pub async fn snapshot(&self) -> AppResult<ControlSnapshot> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Message::Snapshot(reply))
            .map_err(|_| AppError::SessionClosed)?;
        response.await.map_err(|_| AppError::SessionClosed)
    }

    /// Latest published snapshot without waiting for the control loop
    pub fn current(&self) -> ControlSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified whenever the control loop publishes a new snapshot
    pub fn subscribe(&self) -> watch::Receiver<ControlSnapshot> {
        self.snapshots.clone()
    }
}

/// Touch timestamps follow the runtime clock so paused-time tests can hold a press
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

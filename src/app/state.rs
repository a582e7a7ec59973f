// SPDX-License-Identifier: GPL-3.0-only

//! Control-context state and messages

use crate::app::cells::ParameterCells;
use crate::app::gestures::{Point, ScreenLayout};
use crate::app::menu::MenuState;
use crate::app::popup::{PopupArbitrator, PopupOwner, PopupView};
use crate::app::recovery::{CameraHealth, RecoverySupervisor};
use crate::app::timer::TimerSlot;
use crate::backends::camera::{BackendError, BackendResult, CameraBackend, DeviceDescriptor, PhotoResult};
use crate::backends::haptics::HapticFeedback;
use crate::config::Config;
use crate::errors::CaptureError;
use crate::flash::{FlashFeedback, FlashMode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::{oneshot, watch};
use tokio::task::AbortHandle;

/// Messages processed by the control loop
#[derive(Debug)]
pub enum Message {
    // ===== From the gesture sampling path =====
    /// A pinch sample changed the zoom cell
    ZoomSampled { actual: f64 },
    /// The pinch gesture ended
    PinchEnded,
    /// An exposure drag committed a new slider value
    ExposureCommitted { slider: f64 },

    // ===== Commands =====
    FocusTap(Point),
    FlashToggle,
    MenuToggle,
    ExposureToggle,
    TapAway,
    Capture,
    /// Jump to a logical zoom level (0.5x, 1x, 2x buttons)
    ZoomPreset(f64),
    /// A different device or lens became active
    DeviceChanged(DeviceDescriptor),

    // ===== Async completions =====
    FocusFinished {
        tap: u64,
        result: BackendResult<()>,
    },
    CaptureFinished {
        session: u64,
        result: Result<PhotoResult, CaptureError>,
    },

    // ===== Timers =====
    PopupReleaseElapsed {
        owner: PopupOwner,
        generation: u64,
    },
    FocusRingElapsed {
        generation: u64,
    },
    RecoveryCooldownElapsed {
        generation: u64,
    },

    // ===== Session =====
    Snapshot(oneshot::Sender<ControlSnapshot>),
    Shutdown,
}

/// Why a capture request was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRejection {
    /// Another capture has not finished yet
    InFlight,
    /// The camera is paused for hardware recovery
    Recovering,
}

/// Outcomes handed to the surrounding application
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PhotoCaptured(PhotoResult),
    CaptureFailed {
        error: CaptureError,
        retryable: bool,
    },
    CaptureRejected(CaptureRejection),
    FocusFailed(BackendError),
    RecoveryStarted,
    RecoveryFinished,
}

/// Focus ring shown where the user tapped
#[derive(Debug, Default)]
pub struct FocusRing {
    position: Option<Point>,
    hide: TimerSlot,
}

impl FocusRing {
    /// Show the ring at `position`, superseding any previous ring
    pub fn show(&mut self, position: Point, hide_after: Duration, tx: &UnboundedSender<Message>) {
        self.position = Some(position);
        self.hide
            .arm(hide_after, tx, |generation| Message::FocusRingElapsed { generation });
    }

    /// Hide the ring if `generation` is the live auto-hide timer
    pub fn on_hide_elapsed(&mut self, generation: u64) -> bool {
        if self.hide.fire(generation) {
            self.position = None;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.hide.cancel();
        self.position = None;
    }

    pub fn view(&self) -> FocusRingView {
        FocusRingView {
            position: self.position,
            visible: self.position.is_some(),
        }
    }
}

/// Render view of the focus ring
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FocusRingView {
    pub position: Option<Point>,
    pub visible: bool,
}

/// The single capture slot
///
/// Each accepted capture gets a fresh session id; completions carrying any
/// other id are stale and ignored.
#[derive(Debug, Default)]
pub struct CaptureSession {
    session: u64,
    in_flight: bool,
    feedback: FlashFeedback,
    /// The backend capture and the watchdog awaiting it
    tasks: Vec<AbortHandle>,
}

impl CaptureSession {
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn feedback(&self) -> FlashFeedback {
        self.feedback
    }

    /// Reserve the slot; `None` if a capture is already in flight
    pub fn begin(&mut self, feedback: FlashFeedback) -> Option<u64> {
        if self.in_flight {
            return None;
        }
        self.session = self.session.wrapping_add(1);
        self.in_flight = true;
        self.feedback = feedback;
        Some(self.session)
    }

    pub fn attach_tasks(&mut self, capture: AbortHandle, watchdog: AbortHandle) {
        self.tasks = vec![capture, watchdog];
    }

    /// Release the slot for a completed capture; `false` if `session` is stale
    pub fn finish(&mut self, session: u64) -> bool {
        if !self.in_flight || session != self.session {
            return false;
        }
        self.clear();
        true
    }

    /// Abort any in-flight capture and release the slot
    pub fn reset(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        // Invalidate completions that are already queued
        self.session = self.session.wrapping_add(1);
        self.clear();
    }

    fn clear(&mut self) {
        self.in_flight = false;
        self.feedback = FlashFeedback::None;
        self.tasks.clear();
    }
}

/// Read-only values the view layer renders from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControlSnapshot {
    pub zoom_actual: f64,
    pub zoom_logical: f64,
    pub zoom_label: String,
    pub popup: PopupView,
    pub focus_ring: FocusRingView,
    pub menu: MenuState,
    pub menu_expansion: f32,
    pub exposure_panel: f32,
    pub exposure_slider: f64,
    pub exposure_offset: f64,
    pub flash_mode: FlashMode,
    pub flash_icon: &'static str,
    pub capture_in_flight: bool,
    pub flash_feedback: FlashFeedback,
    pub health: CameraHealth,
}

/// State owned by the control context of one camera session
pub struct CameraController {
    pub(crate) backend: Arc<dyn CameraBackend>,
    pub(crate) haptics: Arc<dyn HapticFeedback>,
    pub(crate) config: Config,
    pub(crate) layout: ScreenLayout,
    pub(crate) cells: Arc<ParameterCells>,
    /// Loops back into this controller's own queue (timers, async completions)
    pub(crate) tx: UnboundedSender<Message>,
    pub(crate) events: UnboundedSender<SessionEvent>,
    pub(crate) snapshots: watch::Sender<ControlSnapshot>,

    pub(crate) descriptor: DeviceDescriptor,
    pub(crate) flash_mode: FlashMode,
    pub(crate) popup: PopupArbitrator,
    pub(crate) menu: MenuState,
    pub(crate) focus_ring: FocusRing,
    /// Id of the latest accepted focus tap
    pub(crate) focus_tap: u64,
    pub(crate) capture: CaptureSession,
    pub(crate) recovery: RecoverySupervisor,
}

impl std::fmt::Debug for CameraController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraController")
            .field("descriptor", &self.descriptor)
            .field("flash_mode", &self.flash_mode)
            .field("popup", &self.popup.owner())
            .field("menu", &self.menu)
            .field("capture_in_flight", &self.capture.in_flight())
            .field("health", &self.recovery.health())
            .finish()
    }
}

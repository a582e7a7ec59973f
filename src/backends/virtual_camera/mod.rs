// SPDX-License-Identifier: GPL-3.0-only

//! Virtual camera backend
//!
//! An in-process device that behaves like a phone camera without any
//! hardware. Capture latency and failures can be scripted, and every call is
//! recorded so callers can inspect what the coordinator asked the device to do.
//! Used by the `simulate` CLI command and by the test suite.

use crate::backends::camera::{
    BackendError, BackendResult, CameraBackend, CaptureOptions, DeviceDescriptor, PhotoResult,
    default_photo_directory,
};
use crate::backends::haptics::{HapticFeedback, HapticIntensity};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

/// Scripted outcome of the next capture
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    /// Succeed after the given latency
    Succeed(Duration),
    /// Fail after the given latency
    Fail(Duration, BackendError),
    /// Never complete; only an abort ends the capture
    Hang,
}

/// Mutable device state behind the virtual camera
#[derive(Debug)]
struct VirtualState {
    descriptor: DeviceDescriptor,
    /// Outcomes consumed one per capture; empty means succeed after `default_latency`
    capture_script: VecDeque<CaptureOutcome>,
    default_latency: Duration,
    focus_error: Option<BackendError>,
    focus_latency: Duration,
    zoom_error: Option<BackendError>,
    active: bool,
    zoom: f64,
    exposure_offset: f64,
    zoom_history: Vec<f64>,
    activation_history: Vec<bool>,
    photo_directory: PathBuf,
}

/// Simulated camera device
#[derive(Debug)]
pub struct VirtualCamera {
    state: Mutex<VirtualState>,
    capture_calls: AtomicUsize,
    focus_calls: AtomicUsize,
    captures_running: AtomicUsize,
}

/// Counts a capture as running until its future completes or is dropped
struct RunningCapture<'a>(&'a AtomicUsize);

impl<'a> RunningCapture<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for RunningCapture<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl VirtualCamera {
    /// Create a virtual camera exposing the given capabilities
    pub fn new(descriptor: DeviceDescriptor) -> Self {
        info!(?descriptor, "Creating virtual camera");
        Self {
            state: Mutex::new(VirtualState {
                descriptor,
                capture_script: VecDeque::new(),
                default_latency: Duration::from_millis(120),
                focus_error: None,
                focus_latency: Duration::ZERO,
                zoom_error: None,
                active: true,
                zoom: descriptor.neutral_zoom,
                exposure_offset: 0.0,
                zoom_history: Vec::new(),
                activation_history: Vec::new(),
                photo_directory: default_photo_directory(),
            }),
            capture_calls: AtomicUsize::new(0),
            focus_calls: AtomicUsize::new(0),
            captures_running: AtomicUsize::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, VirtualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Scripting =====

    /// Queue the outcome of a future capture
    pub fn push_capture_outcome(&self, outcome: CaptureOutcome) {
        self.state().capture_script.push_back(outcome);
    }

    /// Latency of unscripted captures
    pub fn set_default_latency(&self, latency: Duration) {
        self.state().default_latency = latency;
    }

    /// Make every focus call fail with `error` (or succeed again with `None`)
    pub fn set_focus_error(&self, error: Option<BackendError>) {
        self.state().focus_error = error;
    }

    /// Delay before focus calls complete
    pub fn set_focus_latency(&self, latency: Duration) {
        self.state().focus_latency = latency;
    }

    /// Make every zoom call fail with `error` (or succeed again with `None`)
    pub fn set_zoom_error(&self, error: Option<BackendError>) {
        self.state().zoom_error = error;
    }

    /// Swap the attached device (lens switch)
    pub fn set_descriptor(&self, descriptor: DeviceDescriptor) {
        self.state().descriptor = descriptor;
    }

    /// Directory synthesized photos are placed in
    pub fn set_photo_directory(&self, directory: PathBuf) {
        self.state().photo_directory = directory;
    }

    // ===== Inspection =====

    pub fn capture_calls(&self) -> usize {
        self.capture_calls.load(Ordering::SeqCst)
    }

    pub fn focus_calls(&self) -> usize {
        self.focus_calls.load(Ordering::SeqCst)
    }

    /// Captures started but not yet completed or dropped
    pub fn captures_running(&self) -> usize {
        self.captures_running.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.state().active
    }

    /// Last zoom factor applied
    pub fn zoom(&self) -> f64 {
        self.state().zoom
    }

    /// Last exposure bias applied
    pub fn exposure_offset(&self) -> f64 {
        self.state().exposure_offset
    }

    /// Every zoom factor applied, in order
    pub fn zoom_history(&self) -> Vec<f64> {
        self.state().zoom_history.clone()
    }

    /// Every stream activation change, in order
    pub fn activation_history(&self) -> Vec<bool> {
        self.state().activation_history.clone()
    }
}

impl Default for VirtualCamera {
    fn default() -> Self {
        Self::new(DeviceDescriptor::default())
    }
}

#[async_trait]
impl CameraBackend for VirtualCamera {
    fn descriptor(&self) -> DeviceDescriptor {
        self.state().descriptor
    }

    async fn capture(&self, options: CaptureOptions) -> BackendResult<PhotoResult> {
        self.capture_calls.fetch_add(1, Ordering::SeqCst);
        let _running = RunningCapture::enter(&self.captures_running);

        let (outcome, directory, active) = {
            let mut state = self.state();
            let outcome = state
                .capture_script
                .pop_front()
                .unwrap_or(CaptureOutcome::Succeed(state.default_latency));
            (outcome, state.photo_directory.clone(), state.active)
        };

        if !active {
            return Err(BackendError::Other("session/camera-not-ready".into()));
        }

        debug!(flash = ?options.flash, ?outcome, "Virtual capture started");
        match outcome {
            CaptureOutcome::Succeed(latency) => {
                tokio::time::sleep(latency).await;
                Ok(PhotoResult::new(directory, 4032, 3024))
            }
            CaptureOutcome::Fail(latency, error) => {
                tokio::time::sleep(latency).await;
                Err(error)
            }
            CaptureOutcome::Hang => std::future::pending().await,
        }
    }

    async fn focus(&self, x: f64, y: f64) -> BackendResult<()> {
        self.focus_calls.fetch_add(1, Ordering::SeqCst);
        let (error, latency) = {
            let state = self.state();
            (state.focus_error.clone(), state.focus_latency)
        };
        debug!(x, y, "Virtual focus");
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        match error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn set_zoom(&self, factor: f64) -> BackendResult<()> {
        let mut state = self.state();
        if let Some(e) = state.zoom_error.clone() {
            return Err(e);
        }
        state.zoom = factor;
        state.zoom_history.push(factor);
        Ok(())
    }

    fn set_exposure_offset(&self, offset: f64) -> BackendResult<()> {
        self.state().exposure_offset = offset;
        Ok(())
    }

    fn set_active(&self, active: bool) -> BackendResult<()> {
        let mut state = self.state();
        state.active = active;
        state.activation_history.push(active);
        Ok(())
    }
}

/// Haptic engine that counts pulses
#[derive(Debug, Default)]
pub struct VirtualHaptics {
    pulses: AtomicUsize,
    failing: AtomicBool,
}

impl VirtualHaptics {
    /// Pulses requested, including failed ones
    pub fn pulses(&self) -> usize {
        self.pulses.load(Ordering::SeqCst)
    }

    /// Make every pulse fail, like a device without a haptic engine
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl HapticFeedback for VirtualHaptics {
    fn pulse(&self, intensity: HapticIntensity) -> BackendResult<()> {
        debug!(?intensity, "Virtual haptic pulse");
        self.pulses.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendError::NotSupported("haptic engine unavailable".into()));
        }
        Ok(())
    }
}

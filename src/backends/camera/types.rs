// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use crate::constants::HARDWARE_FAULT_SIGNATURES;
use crate::flash::FlashMode;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Static capabilities of the attached camera device
///
/// Supplied by the platform whenever a device (or lens) becomes active and
/// immutable for the lifetime of that device session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Smallest hardware zoom factor (ultra-wide when below neutral)
    pub min_zoom: f64,
    /// Hardware zoom factor that corresponds to 1× logical zoom
    pub neutral_zoom: f64,
    /// Largest hardware zoom factor
    pub max_zoom: f64,
    /// Lowest exposure bias the device accepts
    pub min_exposure: f64,
    /// Highest exposure bias the device accepts
    pub max_exposure: f64,
    /// Whether the device can focus on a point
    pub supports_focus: bool,
}

impl Default for DeviceDescriptor {
    /// Typical triple-lens phone module
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            neutral_zoom: 2.0,
            max_zoom: 16.0,
            min_exposure: -8.0,
            max_exposure: 8.0,
            supports_focus: true,
        }
    }
}

/// Options passed to the capture primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Flash mode in effect when the shutter fires
    pub flash: FlashMode,
}

/// A photo produced by the capture primitive
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoResult {
    /// Unique identifier of the capture
    pub id: Uuid,
    /// Where the platform stored the photo
    pub path: PathBuf,
    /// Pixel dimensions
    pub width: u32,
    pub height: u32,
    /// Wall-clock time the capture completed
    pub captured_at: DateTime<Local>,
}

impl PhotoResult {
    /// Build a result with a fresh id and the conventional file name
    pub fn new(directory: PathBuf, width: u32, height: u32) -> Self {
        let captured_at = Local::now();
        let path = directory.join(photo_file_name(&captured_at));
        Self {
            id: Uuid::new_v4(),
            path,
            width,
            height,
            captured_at,
        }
    }
}

/// Conventional file name for a photo taken at `time`
pub fn photo_file_name(time: &DateTime<Local>) -> String {
    format!("photo_{}.jpg", time.format("%Y%m%d_%H%M%S"))
}

/// Default directory photos are placed in
pub fn default_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("camera")
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Camera device disappeared
    Disconnected,
    /// Backend crashed or became unresponsive
    Crashed(String),
    /// Capture session was interrupted by the system
    SessionInterrupted,
    /// Device momentarily busy (another operation in progress)
    Busy,
    /// Operation cancelled by the user or the system
    Cancelled,
    /// Operation not supported by this device
    NotSupported(String),
    /// Other errors
    Other(String),
}

impl BackendError {
    /// Whether this error indicates the camera stack itself failed
    ///
    /// Messages of otherwise unclassified errors are matched against
    /// [`HARDWARE_FAULT_SIGNATURES`].
    pub fn is_hardware_fault(&self) -> bool {
        match self {
            BackendError::Disconnected
            | BackendError::Crashed(_)
            | BackendError::SessionInterrupted => true,
            BackendError::Busy | BackendError::Cancelled | BackendError::NotSupported(_) => false,
            BackendError::Other(msg) => {
                let msg = msg.to_lowercase();
                HARDWARE_FAULT_SIGNATURES
                    .iter()
                    .any(|signature| msg.contains(signature))
            }
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Disconnected => write!(f, "Camera disconnected"),
            BackendError::Crashed(msg) => write!(f, "Backend crashed: {}", msg),
            BackendError::SessionInterrupted => write!(f, "Camera session interrupted"),
            BackendError::Busy => write!(f, "Camera is busy"),
            BackendError::Cancelled => write!(f, "Operation cancelled"),
            BackendError::NotSupported(msg) => write!(f, "Not supported: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

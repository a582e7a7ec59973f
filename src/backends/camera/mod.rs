// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  CameraController   │  ← Gesture arbitration, capture sequencing, recovery
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraBackend Trait│  ← Common interface
//! └──────────┬──────────┘
//!            │
//!            ▼
//!   ┌────────────────┐
//!   │ Platform / VCam│  ← Concrete implementation
//!   └────────────────┘
//! ```

pub mod types;

pub use types::*;

use async_trait::async_trait;

/// Camera device primitives consumed by the coordinator
///
/// Parameter setters are expected to return quickly; they are called from the
/// control context, never from the gesture sampling path. Capture and focus
/// may take arbitrarily long and are always awaited off the control loop.
#[async_trait]
pub trait CameraBackend: Send + Sync {
    /// Capabilities of the currently attached device
    fn descriptor(&self) -> DeviceDescriptor;

    // ===== Capture =====

    /// Take a photo with the given options
    ///
    /// # Returns
    /// * `Ok(PhotoResult)` - Photo captured and stored by the platform
    /// * `Err(BackendError)` - Capture failed
    async fn capture(&self, options: CaptureOptions) -> BackendResult<PhotoResult>;

    /// Focus on a point given in screen coordinates
    async fn focus(&self, x: f64, y: f64) -> BackendResult<()>;

    // ===== Parameters =====

    /// Apply a hardware zoom factor
    fn set_zoom(&self, factor: f64) -> BackendResult<()>;

    /// Apply an exposure bias in device units
    fn set_exposure_offset(&self, offset: f64) -> BackendResult<()>;

    // ===== Lifecycle =====

    /// Start or stop the camera stream
    fn set_active(&self, active: bool) -> BackendResult<()>;
}

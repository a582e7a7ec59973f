// SPDX-License-Identifier: GPL-3.0-only

//! Camera Interaction Coordinator - the control layer of a mobile camera screen
//!
//! This library turns raw touch gestures and button presses into camera
//! parameter changes, arbitrates the transient UI elements that compete for
//! the same screen space, sequences photo captures and recovers from
//! hardware faults.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Gesture sampling, the control loop and its handlers
//! - [`backends`]: Camera device and haptics abstraction, plus a virtual device
//! - [`config`]: User configuration handling
//! - [`constants`]: Zoom, exposure and timing constants
//! - [`errors`]: Error types shared across the crate
//! - [`flash`]: Flash mode cycle
//!
//! # Example
//!
//! ```ignore
//! let camera = Arc::new(VirtualCamera::default());
//! let (session, mut events) = SessionHandle::spawn(
//!     camera,
//!     Arc::new(NoHaptics),
//!     Config::load(),
//!     ScreenLayout::default(),
//! );
//! session.pinch_begin();
//! session.pinch_update(1.5);
//! session.pinch_end();
//! session.capture();
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod flash;

// Re-export commonly used types
pub use app::{ControlSnapshot, GestureSampler, ScreenLayout, SessionEvent, SessionHandle};
pub use backends::camera::{CameraBackend, DeviceDescriptor, PhotoResult};
pub use config::Config;
pub use errors::{AppError, AppResult, CaptureError};
pub use flash::FlashMode;

// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for the platform camera services
//!
//! The coordinator never talks to hardware directly. Everything it needs from
//! the platform goes through the traits defined here:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           CameraController (app)             │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌─────────────┐    ┌──────────────────┐   │
//! │  │   Haptics   │    │  CameraBackend   │   │
//! │  └─────────────┘    └──────────────────┘   │
//! │                     ┌──────────────────┐   │
//! │                     │ Virtual Camera   │   │
//! │                     │ (simulation)     │   │
//! │                     └──────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Capture, focus and parameter primitives of the live device
//! - [`haptics`]: Fire-and-forget haptic pulses
//! - [`virtual_camera`]: Scriptable in-process device used by the CLI and tests

pub mod camera;
pub mod haptics;
pub mod virtual_camera;

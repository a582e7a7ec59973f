// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! Handlers are grouped by the interaction they serve; all of them are
//! `impl CameraController` blocks and run on the control context only.

pub mod capture;
pub mod device;
pub mod exposure;
pub mod flash;
pub mod focus;
pub mod recovery;
pub mod ui;
pub mod zoom;

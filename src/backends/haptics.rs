// SPDX-License-Identifier: GPL-3.0-only

//! Haptic feedback primitive

use crate::backends::camera::BackendResult;
use tracing::debug;

/// Strength of a haptic pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticIntensity {
    /// Detent tick, e.g. zoom snapping back to 1x
    Light,
}

/// Platform haptic engine
pub trait HapticFeedback: Send + Sync {
    fn pulse(&self, intensity: HapticIntensity) -> BackendResult<()>;
}

/// Haptics for platforms without a haptic engine
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl HapticFeedback for NoHaptics {
    fn pulse(&self, _intensity: HapticIntensity) -> BackendResult<()> {
        Ok(())
    }
}

/// Fire a pulse, swallowing failures
pub fn pulse_quietly(haptics: &dyn HapticFeedback, intensity: HapticIntensity) {
    if let Err(e) = haptics.pulse(intensity) {
        debug!(?intensity, error = %e, "Haptic pulse failed");
    }
}

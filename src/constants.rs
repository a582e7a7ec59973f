// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants
//!
//! Defaults for everything the coordinator times or maps. Most timing values
//! can be overridden through [`crate::config::Config`].

use std::time::Duration;

/// Zoom mapping and gesture constants
pub mod zoom {
    /// Logical zoom shown for anything at or below the hardware minimum (ultra-wide)
    pub const LOGICAL_FLOOR: f64 = 0.5;

    /// Logical zoom at the neutral (lens switchover) hardware factor
    pub const LOGICAL_NEUTRAL: f64 = 1.0;

    /// Highest logical zoom the display scale goes up to
    pub const LOGICAL_CEILING: f64 = 16.0;

    /// Hardware factor the upper segment of the logical scale is normalized against
    pub const DISPLAY_MAX_FACTOR: f64 = 16.0;

    /// Pinch gestures never drive the hardware past this factor
    pub const PINCH_MAX_FACTOR: f64 = 10.0;

    /// Pinch samples closer than this to the current zoom are dropped
    pub const PINCH_DEBOUNCE: f64 = 0.01;

    /// Pinch end snaps back to neutral when within this distance of it
    pub const SNAP_TO_NEUTRAL_DISTANCE: f64 = 0.5;
}

/// Exposure slider constants
pub mod exposure {
    /// Slider values within this distance of zero commit as exactly zero
    pub const NEUTRAL_SNAP: f64 = 0.2;

    /// Slider bounds
    pub const SLIDER_MIN: f64 = -1.0;
    pub const SLIDER_MAX: f64 = 1.0;

    /// Default share of the hardware exposure range the slider spans
    pub const DEFAULT_CONSERVATIVE_FRACTION: f64 = 0.25;

    /// Allowed band for the conservative fraction
    pub const CONSERVATIVE_FRACTION_MIN: f64 = 0.25;
    pub const CONSERVATIVE_FRACTION_MAX: f64 = 0.30;
}

/// Timing constants
pub mod timing {
    use super::Duration;

    /// Popup auto-release delay after the owning interaction last touched it
    pub const POPUP_RELEASE: Duration = Duration::from_secs(2);

    /// Focus ring auto-hide delay
    pub const FOCUS_RING_HIDE: Duration = Duration::from_secs(2);

    /// Cooldown between stream deactivation and reactivation during recovery
    pub const RECOVERY_COOLDOWN: Duration = Duration::from_secs(2);

    /// A capture that has not completed after this long counts as failed
    pub const CAPTURE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Minimum press duration before a touch counts as a focus tap
    pub const FOCUS_MIN_HOLD: Duration = Duration::from_millis(150);
}

/// Screen layout constants used for hit-testing reserved regions
pub mod layout {
    /// Height of the bottom control bar (capture button, gallery, mode switch)
    pub const BOTTOM_BAR_HEIGHT: f64 = 160.0;

    /// Finger travel allowed during a focus press before it stops being a tap
    pub const TAP_MAX_TRAVEL: f64 = 12.0;
}

/// Substrings identifying hardware-level camera failures in backend messages
pub const HARDWARE_FAULT_SIGNATURES: &[&str] = &[
    "camera-has-been-disconnected",
    "camera-is-restricted",
    "camera-in-use",
    "session/camera-not-ready",
    "device/configuration-error",
    "device/no-device",
    "hardware",
];

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposure_fraction_band_contains_default() {
        assert!(exposure::DEFAULT_CONSERVATIVE_FRACTION >= exposure::CONSERVATIVE_FRACTION_MIN);
        assert!(exposure::DEFAULT_CONSERVATIVE_FRACTION <= exposure::CONSERVATIVE_FRACTION_MAX);
    }

    #[test]
    fn test_pinch_cap_below_display_cap() {
        assert!(zoom::PINCH_MAX_FACTOR <= zoom::DISPLAY_MAX_FACTOR);
    }
}

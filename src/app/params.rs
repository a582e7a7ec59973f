// SPDX-License-Identifier: GPL-3.0-only

//! Parameter mapping between hardware units and the user-facing scale
//!
//! Zoom uses a three-segment piecewise linear map:
//!
//! ```text
//!   hardware:  min ........ neutral ..................... 16
//!   logical:   0.5× ....... 1.0× ......................... 16×
//! ```
//!
//! Everything at or below `min` shows as the 0.5× ultra-wide floor. All
//! functions here are pure, total and monotonic non-decreasing.

use crate::backends::camera::DeviceDescriptor;
use crate::constants::{exposure, zoom};

/// Hardware zoom range of the active device
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    pub min: f64,
    pub neutral: f64,
    pub max: f64,
}

impl ZoomRange {
    /// Build a range, repairing inverted or non-finite bounds
    pub fn new(min: f64, neutral: f64, max: f64) -> Self {
        let min = if min.is_finite() { min } else { 1.0 };
        let neutral = if neutral.is_finite() { neutral.max(min) } else { min };
        let max = if max.is_finite() { max.max(neutral) } else { neutral };
        Self { min, neutral, max }
    }

    pub fn from_descriptor(descriptor: &DeviceDescriptor) -> Self {
        Self::new(
            descriptor.min_zoom,
            descriptor.neutral_zoom,
            descriptor.max_zoom,
        )
    }

    /// Highest factor a pinch may reach
    pub fn pinch_max(&self) -> f64 {
        self.max.min(zoom::PINCH_MAX_FACTOR).max(self.min)
    }

    /// Highest factor shown on the display scale
    pub fn display_max(&self) -> f64 {
        self.max.min(zoom::DISPLAY_MAX_FACTOR)
    }

    /// Clamp a candidate factor into what pinch gestures may drive
    pub fn clamp_pinch(&self, factor: f64) -> f64 {
        factor.clamp(self.min, self.pinch_max())
    }
}

/// Map a hardware zoom factor to the logical 0.5×–16× scale
pub fn zoom_to_logical(actual: f64, range: &ZoomRange) -> f64 {
    if !actual.is_finite() {
        return zoom::LOGICAL_FLOOR;
    }

    if actual >= range.neutral {
        let upper_span = zoom::DISPLAY_MAX_FACTOR - range.neutral;
        if upper_span <= f64::EPSILON {
            return zoom::LOGICAL_NEUTRAL;
        }
        let logical = zoom::LOGICAL_NEUTRAL
            + (actual - range.neutral) / upper_span
                * (zoom::LOGICAL_CEILING - zoom::LOGICAL_NEUTRAL);
        return logical.min(zoom::LOGICAL_CEILING);
    }

    if actual <= range.min {
        return zoom::LOGICAL_FLOOR;
    }

    // min < actual < neutral, so the span is strictly positive
    zoom::LOGICAL_FLOOR
        + (actual - range.min) / (range.neutral - range.min)
            * (zoom::LOGICAL_NEUTRAL - zoom::LOGICAL_FLOOR)
}

/// Inverse of [`zoom_to_logical`], clamped to the device range
pub fn logical_to_zoom(logical: f64, range: &ZoomRange) -> f64 {
    if !logical.is_finite() {
        return range.neutral;
    }
    let logical = logical.clamp(zoom::LOGICAL_FLOOR, zoom::LOGICAL_CEILING);

    let actual = if logical >= zoom::LOGICAL_NEUTRAL {
        range.neutral
            + (logical - zoom::LOGICAL_NEUTRAL) / (zoom::LOGICAL_CEILING - zoom::LOGICAL_NEUTRAL)
                * (zoom::DISPLAY_MAX_FACTOR - range.neutral).max(0.0)
    } else {
        range.min
            + (logical - zoom::LOGICAL_FLOOR) / (zoom::LOGICAL_NEUTRAL - zoom::LOGICAL_FLOOR)
                * (range.neutral - range.min)
    };
    actual.clamp(range.min, range.max)
}

/// Popup/label text for a logical zoom value
pub fn format_zoom_label(logical: f64) -> String {
    format!("{:.1}x", logical)
}

/// Map the [-1, 1] exposure slider into a conservative slice of the device range
///
/// The slider spans `(max - min) * fraction`, centred on zero.
pub fn exposure_to_device(slider: f64, min_exp: f64, max_exp: f64, fraction: f64) -> f64 {
    if !slider.is_finite() {
        return 0.0;
    }
    let span = (max_exp - min_exp) * fraction;
    if !span.is_finite() || span <= 0.0 {
        return 0.0;
    }
    slider.clamp(exposure::SLIDER_MIN, exposure::SLIDER_MAX) * span / 2.0
}

/// Clamp and neutral-snap a raw slider value
///
/// Returns `None` for non-finite input, which is dropped rather than committed.
pub fn normalize_exposure_slider(raw: f64) -> Option<f64> {
    if !raw.is_finite() {
        return None;
    }
    let clamped = raw.clamp(exposure::SLIDER_MIN, exposure::SLIDER_MAX);
    if clamped.abs() <= exposure::NEUTRAL_SNAP {
        Some(0.0)
    } else {
        Some(clamped)
    }
}

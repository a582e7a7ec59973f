// SPDX-License-Identifier: GPL-3.0-only

//! Lock-free parameter cells shared between the gesture sampling path and
//! the control context
//!
//! The sampling path writes these at gesture frequency; the control context
//! reads them when it arbitrates and writes them on snap/reset. A single cell
//! is last-writer-wins.

use crate::app::params::{ZoomRange, exposure_to_device};
use crate::backends::camera::DeviceDescriptor;
use crate::flash::{FlashCell, FlashMode};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// `f64` stored in an `AtomicU64` by bit pattern
#[derive(Debug, Default)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

/// All parameter cells of one camera session
#[derive(Debug)]
pub struct ParameterCells {
    // Zoom range of the current device, written only by the control context
    zoom_min: AtomicF64,
    zoom_neutral: AtomicF64,
    zoom_max: AtomicF64,
    /// Hardware zoom factor, the source of truth for zoom
    zoom_actual: AtomicF64,
    /// Zoom at pinch begin
    pinch_baseline: AtomicF64,
    pinch_active: AtomicBool,

    exposure_min: AtomicF64,
    exposure_max: AtomicF64,
    exposure_fraction: AtomicF64,
    exposure_slider: AtomicF64,
    exposure_offset: AtomicF64,

    /// Reference mirror of the flash mode read by the capture path
    pub flash: FlashCell,
}

impl ParameterCells {
    pub fn new(descriptor: &DeviceDescriptor, exposure_fraction: f64) -> Self {
        let cells = Self {
            zoom_min: AtomicF64::default(),
            zoom_neutral: AtomicF64::default(),
            zoom_max: AtomicF64::default(),
            zoom_actual: AtomicF64::default(),
            pinch_baseline: AtomicF64::default(),
            pinch_active: AtomicBool::new(false),
            exposure_min: AtomicF64::default(),
            exposure_max: AtomicF64::default(),
            exposure_fraction: AtomicF64::new(exposure_fraction),
            exposure_slider: AtomicF64::default(),
            exposure_offset: AtomicF64::default(),
            flash: FlashCell::new(FlashMode::default()),
        };
        cells.reset_to_device(descriptor);
        cells
    }

    /// Load a new device's ranges and reset every parameter to its default
    pub fn reset_to_device(&self, descriptor: &DeviceDescriptor) {
        let range = ZoomRange::from_descriptor(descriptor);
        self.zoom_min.store(range.min);
        self.zoom_neutral.store(range.neutral);
        self.zoom_max.store(range.max);
        self.zoom_actual.store(range.neutral);
        self.pinch_baseline.store(range.neutral);
        self.pinch_active.store(false, Ordering::Release);

        self.exposure_min.store(descriptor.min_exposure);
        self.exposure_max.store(descriptor.max_exposure);
        self.exposure_slider.store(0.0);
        self.exposure_offset.store(0.0);

        self.flash.store(FlashMode::default());
    }

    // ===== Zoom =====

    pub fn zoom_range(&self) -> ZoomRange {
        ZoomRange {
            min: self.zoom_min.load(),
            neutral: self.zoom_neutral.load(),
            max: self.zoom_max.load(),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom_actual.load()
    }

    pub fn set_zoom(&self, actual: f64) {
        self.zoom_actual.store(actual);
    }

    pub fn begin_pinch(&self) -> f64 {
        let baseline = self.zoom();
        self.pinch_baseline.store(baseline);
        self.pinch_active.store(true, Ordering::Release);
        baseline
    }

    pub fn end_pinch(&self) -> bool {
        self.pinch_active.swap(false, Ordering::AcqRel)
    }

    pub fn pinch_active(&self) -> bool {
        self.pinch_active.load(Ordering::Acquire)
    }

    pub fn pinch_baseline(&self) -> f64 {
        self.pinch_baseline.load()
    }

    // ===== Exposure =====

    pub fn exposure_slider(&self) -> f64 {
        self.exposure_slider.load()
    }

    pub fn exposure_offset(&self) -> f64 {
        self.exposure_offset.load()
    }

    /// Commit an already-normalized slider value and its device offset
    pub fn commit_exposure(&self, slider: f64) -> f64 {
        let offset = exposure_to_device(
            slider,
            self.exposure_min.load(),
            self.exposure_max.load(),
            self.exposure_fraction.load(),
        );
        self.exposure_slider.store(slider);
        self.exposure_offset.store(offset);
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_f64_round_trip() {
        let cell = AtomicF64::new(1.5);
        assert_eq!(cell.load(), 1.5);
        cell.store(-0.25);
        assert_eq!(cell.load(), -0.25);
    }

    #[test]
    fn test_reset_to_device() {
        let descriptor = DeviceDescriptor::default();
        let cells = ParameterCells::new(&descriptor, 0.25);
        cells.set_zoom(5.0);
        cells.commit_exposure(0.8);
        cells.flash.store(FlashMode::On);

        let lens = DeviceDescriptor {
            min_zoom: 1.0,
            neutral_zoom: 1.0,
            max_zoom: 6.0,
            ..descriptor
        };
        cells.reset_to_device(&lens);
        assert_eq!(cells.zoom(), 1.0);
        assert_eq!(cells.zoom_range().max, 6.0);
        assert_eq!(cells.exposure_slider(), 0.0);
        assert_eq!(cells.exposure_offset(), 0.0);
        assert_eq!(cells.flash.load(), FlashMode::Auto);
    }

    #[test]
    fn test_commit_exposure_derives_offset() {
        let cells = ParameterCells::new(&DeviceDescriptor::default(), 0.25);
        assert_eq!(cells.commit_exposure(1.0), 2.0);
        assert_eq!(cells.exposure_offset(), 2.0);
    }
}

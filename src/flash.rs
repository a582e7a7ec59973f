// SPDX-License-Identifier: GPL-3.0-only

//! Flash mode and capture flash feedback
//!
//! The flash mode is owned by the control context but mirrored into a
//! [`FlashCell`] so an in-flight capture always reads the value the user
//! last selected, even when the toggle happened a moment before the shutter.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// Flash operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlashMode {
    /// Device decides per capture
    #[default]
    Auto,
    /// Flash fires on every capture
    On,
    /// Flash never fires
    Off,
}

impl FlashMode {
    /// Cycle to the next mode: Auto -> On -> Off -> Auto
    pub fn next(self) -> Self {
        match self {
            FlashMode::Auto => FlashMode::On,
            FlashMode::On => FlashMode::Off,
            FlashMode::Off => FlashMode::Auto,
        }
    }

    /// Text shown in the popup while flash owns it
    pub fn label(self) -> &'static str {
        match self {
            FlashMode::Auto => "Flash Auto",
            FlashMode::On => "Flash On",
            FlashMode::Off => "Flash Off",
        }
    }

    /// Icon selector for the flash button
    pub fn icon_name(self) -> &'static str {
        match self {
            FlashMode::Auto => "flash-auto",
            FlashMode::On => "flash-on",
            FlashMode::Off => "flash-off",
        }
    }

    /// Screen feedback shown while a capture with this mode is in flight
    pub fn feedback(self) -> FlashFeedback {
        match self {
            FlashMode::On => FlashFeedback::Full,
            FlashMode::Auto => FlashFeedback::Dim,
            FlashMode::Off => FlashFeedback::None,
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            FlashMode::Auto => 0,
            FlashMode::On => 1,
            FlashMode::Off => 2,
        }
    }

    fn from_bits(bits: u8) -> Self {
        match bits {
            1 => FlashMode::On,
            2 => FlashMode::Off,
            _ => FlashMode::Auto,
        }
    }
}

/// Intensity of the white overlay flashed during capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashFeedback {
    /// No overlay
    #[default]
    None,
    /// Partial dim overlay
    Dim,
    /// Brief full-intensity overlay
    Full,
}

impl FlashFeedback {
    /// Overlay opacity for the view layer
    pub fn opacity(self) -> f32 {
        match self {
            FlashFeedback::None => 0.0,
            FlashFeedback::Dim => 0.4,
            FlashFeedback::Full => 1.0,
        }
    }
}

/// Immediately-consistent mirror of the current flash mode
#[derive(Debug, Default)]
pub struct FlashCell(AtomicU8);

impl FlashCell {
    pub fn new(mode: FlashMode) -> Self {
        Self(AtomicU8::new(mode.to_bits()))
    }

    pub fn load(&self) -> FlashMode {
        FlashMode::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, mode: FlashMode) {
        self.0.store(mode.to_bits(), Ordering::Release);
    }
}

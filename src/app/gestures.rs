// SPDX-License-Identifier: GPL-3.0-only

//! Gesture interpretation on the sampling path
//!
//! [`GestureSampler`] runs wherever touch samples arrive. It only performs
//! atomic reads/writes on the shared [`ParameterCells`] and non-blocking
//! sends to the control loop; every decision that involves shared discrete
//! state (popup ownership, haptics, hardware calls) is left to the control
//! context.
//!
//! [`TapRecognizer`] is the delayed-recognition front end for focus taps:
//! a touch only becomes a focus tap once it has been held for the minimum
//! duration, which keeps quick button presses in the same screen area from
//! moving the focus point.

use crate::app::cells::ParameterCells;
use crate::app::params::normalize_exposure_slider;
use crate::app::state::Message;
use crate::constants::{layout, zoom};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;

/// Screen position in view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Screen regions occupied by controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLayout {
    pub width: f64,
    pub height: f64,
    /// Height of the bottom control bar, measured from the bottom edge
    pub bottom_bar_height: f64,
    /// Bounds of the exposure panel while it is open
    pub exposure_panel: Rect,
}

impl ScreenLayout {
    pub fn new(width: f64, height: f64) -> Self {
        let bottom_bar_height = layout::BOTTOM_BAR_HEIGHT;
        Self {
            width,
            height,
            bottom_bar_height,
            // Panel slides out just above the bottom bar
            exposure_panel: Rect::new(0.0, height - bottom_bar_height - 96.0, width, 96.0),
        }
    }

    pub fn bottom_bar(&self) -> Rect {
        Rect::new(
            0.0,
            self.height - self.bottom_bar_height,
            self.width,
            self.bottom_bar_height,
        )
    }

    /// Whether a tap at `point` lands on a control rather than the preview
    pub fn is_reserved(&self, point: Point, exposure_panel_open: bool) -> bool {
        if self.bottom_bar().contains(point) {
            return true;
        }
        exposure_panel_open && self.exposure_panel.contains(point)
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::new(390.0, 844.0)
    }
}

/// Delayed-recognition tap for focus
///
/// Feed it the raw touch stream; it reports a focus point once per touch,
/// either as soon as the minimum hold elapses ([`TapRecognizer::poll`]) or
/// on release after a long enough hold.
#[derive(Debug, Clone)]
pub struct TapRecognizer {
    min_hold: Duration,
    max_travel: f64,
    press: Option<Press>,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Point,
    at: Instant,
    recognized: bool,
    cancelled: bool,
}

impl TapRecognizer {
    pub fn new(min_hold: Duration) -> Self {
        Self {
            min_hold,
            max_travel: layout::TAP_MAX_TRAVEL,
            press: None,
        }
    }

    pub fn press(&mut self, point: Point, at: Instant) {
        self.press = Some(Press {
            origin: point,
            at,
            recognized: false,
            cancelled: !point.is_finite(),
        });
    }

    /// Finger moved; too much travel turns the touch into something else
    pub fn move_to(&mut self, point: Point) {
        if let Some(press) = self.press.as_mut() {
            if !point.is_finite() || press.origin.distance_to(point) > self.max_travel {
                press.cancelled = true;
            }
        }
    }

    /// Recognize the tap once the hold threshold passes while still pressed
    pub fn poll(&mut self, now: Instant) -> Option<Point> {
        let min_hold = self.min_hold;
        let press = self.press.as_mut()?;
        if press.cancelled || press.recognized {
            return None;
        }
        if now.saturating_duration_since(press.at) >= min_hold {
            press.recognized = true;
            return Some(press.origin);
        }
        None
    }

    /// Finger lifted; a short press is left to whatever button is underneath
    pub fn release(&mut self, now: Instant) -> Option<Point> {
        let recognized = self.poll(now);
        self.press = None;
        recognized
    }

    pub fn cancel(&mut self) {
        self.press = None;
    }
}

/// Sampling-path entry points for continuous gestures
#[derive(Debug, Clone)]
pub struct GestureSampler {
    cells: Arc<ParameterCells>,
    tx: UnboundedSender<Message>,
}

impl GestureSampler {
    pub(crate) fn new(cells: Arc<ParameterCells>, tx: UnboundedSender<Message>) -> Self {
        Self { cells, tx }
    }

    /// Record the zoom baseline for a new pinch
    pub fn pinch_begin(&self) {
        self.cells.begin_pinch();
    }

    /// Apply a pinch sample; returns whether the zoom cell changed
    ///
    /// `scale` is the cumulative scale factor since the pinch began.
    pub fn pinch_update(&self, scale: f64) -> bool {
        if !self.cells.pinch_active() || !scale.is_finite() || scale <= 0.0 {
            return false;
        }
        let range = self.cells.zoom_range();
        let candidate = range.clamp_pinch(self.cells.pinch_baseline() * scale);
        if (candidate - self.cells.zoom()).abs() <= zoom::PINCH_DEBOUNCE {
            return false;
        }
        self.cells.set_zoom(candidate);
        let _ = self.tx.send(Message::ZoomSampled { actual: candidate });
        true
    }

    pub fn pinch_end(&self) {
        if self.cells.end_pinch() {
            let _ = self.tx.send(Message::PinchEnded);
        }
    }

    /// Apply a raw exposure slider value; returns whether it was committed
    pub fn exposure_drag(&self, raw: f64) -> bool {
        let Some(slider) = normalize_exposure_slider(raw) else {
            return false;
        };
        self.cells.commit_exposure(slider);
        let _ = self.tx.send(Message::ExposureCommitted { slider });
        true
    }

    /// Current hardware zoom factor
    pub fn zoom(&self) -> f64 {
        self.cells.zoom()
    }

    /// Current committed exposure slider position
    pub fn exposure_slider(&self) -> f64 {
        self.cells.exposure_slider()
    }
}

// SPDX-License-Identifier: GPL-3.0-only

//! Popup arbitration
//!
//! The popup is a single transient indicator shared by the zoom and flash
//! interactions. Exactly one of them may own it at a time:
//!
//! ```text
//!          claim(Zoom)                 preempt(Flash)
//!   Idle ──────────────► Zoom ───────────────────────► Flash
//!    ▲  ◄────────────── │  ▲                            │
//!    │   release timer  │  └──── claim(Zoom) refused ───┘ (display suppressed)
//!    └──────────────────┴──────── release timer ────────┘
//! ```
//!
//! Each owner arms its own release timer. A timer that fires after the
//! popup changed hands, or after being superseded, does nothing.

use crate::app::state::Message;
use crate::app::timer::TimerSlot;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Interaction that can own the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupOwner {
    Zoom,
    Flash,
}

/// Where the view layer anchors the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAnchor {
    /// Above the zoom controls, near the bottom bar
    AboveZoomControls,
    /// Under the top toolbar, next to the flash button
    BelowTopBar,
}

impl PopupOwner {
    pub fn anchor(self) -> PopupAnchor {
        match self {
            PopupOwner::Zoom => PopupAnchor::AboveZoomControls,
            PopupOwner::Flash => PopupAnchor::BelowTopBar,
        }
    }
}

/// Render view of the popup
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopupView {
    pub owner: Option<PopupOwner>,
    pub value: String,
    pub visible: bool,
    pub anchor: Option<PopupAnchor>,
}

#[derive(Debug, Default)]
pub struct PopupArbitrator {
    owner: Option<PopupOwner>,
    value: String,
    zoom_release: TimerSlot,
    flash_release: TimerSlot,
}

impl PopupArbitrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<PopupOwner> {
        self.owner
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_visible(&self) -> bool {
        self.owner.is_some()
    }

    pub fn view(&self) -> PopupView {
        PopupView {
            owner: self.owner,
            value: if self.owner.is_some() {
                self.value.clone()
            } else {
                String::new()
            },
            visible: self.is_visible(),
            anchor: self.owner.map(PopupOwner::anchor),
        }
    }

    fn slot(&mut self, owner: PopupOwner) -> &mut TimerSlot {
        match owner {
            PopupOwner::Zoom => &mut self.zoom_release,
            PopupOwner::Flash => &mut self.flash_release,
        }
    }

    /// Claim or refresh the popup without preempting another owner
    ///
    /// Returns `false` when the other interaction owns the popup; the caller's
    /// value is then not displayed. A successful claim cancels the claimant's
    /// pending release so the popup stays up while the interaction continues.
    pub fn claim(&mut self, owner: PopupOwner, value: String) -> bool {
        match self.owner {
            Some(current) if current != owner => {
                debug!(?owner, ?current, "Popup update suppressed");
                false
            }
            _ => {
                self.owner = Some(owner);
                self.value = value;
                self.slot(owner).cancel();
                true
            }
        }
    }

    /// Replace the displayed value if `owner` currently holds the popup
    ///
    /// Leaves ownership and release timers untouched.
    pub fn refresh(&mut self, owner: PopupOwner, value: String) -> bool {
        if self.owner != Some(owner) {
            return false;
        }
        self.value = value;
        true
    }

    /// Take the popup regardless of the current owner
    ///
    /// Cancels every pending release timer.
    pub fn preempt(&mut self, owner: PopupOwner, value: String) {
        self.zoom_release.cancel();
        self.flash_release.cancel();
        if let Some(previous) = self.owner.filter(|current| *current != owner) {
            debug!(?owner, ?previous, "Popup preempted");
        }
        self.owner = Some(owner);
        self.value = value;
    }

    /// Arm `owner`'s release timer
    ///
    /// Must be called within a tokio runtime.
    pub fn schedule_release(
        &mut self,
        owner: PopupOwner,
        delay: Duration,
        tx: &UnboundedSender<Message>,
    ) -> u64 {
        self.slot(owner)
            .arm(delay, tx, |generation| Message::PopupReleaseElapsed {
                owner,
                generation,
            })
    }

    /// Handle a fired release timer
    ///
    /// Hides the popup only if the timer is current for `owner` and `owner`
    /// still holds the popup. Returns whether the popup was hidden.
    pub fn on_release_elapsed(&mut self, owner: PopupOwner, generation: u64) -> bool {
        if !self.slot(owner).fire(generation) {
            debug!(?owner, generation, "Stale popup release ignored");
            return false;
        }
        if self.owner != Some(owner) {
            debug!(?owner, current = ?self.owner, "Popup release for previous owner ignored");
            return false;
        }
        self.owner = None;
        self.value.clear();
        true
    }

    /// Hide the popup and cancel all timers
    pub fn reset(&mut self) {
        self.zoom_release.cancel();
        self.flash_release.cancel();
        self.owner = None;
        self.value.clear();
    }
}

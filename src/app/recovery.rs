// SPDX-License-Identifier: GPL-3.0-only

//! Hardware recovery supervisor
//!
//! ```text
//!           fault                       cooldown elapsed
//!   Active ───────► Recovering ─────────────────────────► Active
//!                    │    ▲                (zoom reset, stream resumed)
//!                    └────┘ further faults coalesced
//! ```

use crate::app::state::Message;
use crate::app::timer::TimerSlot;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Health of the camera stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraHealth {
    #[default]
    Active,
    Recovering,
}

/// What happened to a reported fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultDisposition {
    /// A new recovery cycle started
    Started,
    /// A cycle is already running; the fault was absorbed
    Coalesced,
}

#[derive(Debug, Default)]
pub struct RecoverySupervisor {
    health: CameraHealth,
    cooldown: TimerSlot,
    completed_cycles: u64,
    coalesced_faults: u64,
}

impl RecoverySupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn health(&self) -> CameraHealth {
        self.health
    }

    pub fn is_recovering(&self) -> bool {
        self.health == CameraHealth::Recovering
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    pub fn coalesced_faults(&self) -> u64 {
        self.coalesced_faults
    }

    /// Register a hardware fault and arm the cooldown if a cycle starts
    ///
    /// Must be called within a tokio runtime.
    pub fn report_fault(
        &mut self,
        cooldown: Duration,
        tx: &UnboundedSender<Message>,
    ) -> FaultDisposition {
        if self.is_recovering() {
            self.coalesced_faults += 1;
            return FaultDisposition::Coalesced;
        }
        self.health = CameraHealth::Recovering;
        self.cooldown.arm(cooldown, tx, |generation| {
            Message::RecoveryCooldownElapsed { generation }
        });
        FaultDisposition::Started
    }

    /// Finish the cycle if `generation` is the live cooldown
    pub fn on_cooldown_elapsed(&mut self, generation: u64) -> bool {
        if !self.cooldown.fire(generation) || !self.is_recovering() {
            return false;
        }
        self.health = CameraHealth::Active;
        self.completed_cycles += 1;
        true
    }

    /// Abandon any running cycle
    pub fn reset(&mut self) {
        self.cooldown.cancel();
        self.health = CameraHealth::Active;
    }
}

// SPDX-License-Identifier: GPL-3.0-only

//! Cancellable one-shot timers that post a message back to the control loop
//!
//! A [`TimerSlot`] holds at most one pending timer. Arming it aborts the
//! previous timer and bumps a generation counter; the posted message carries
//! the generation so a timer that was already in the channel when it got
//! superseded can be recognized as stale with [`TimerSlot::fire`].

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

#[derive(Debug, Default)]
pub struct TimerSlot {
    generation: u64,
    pending: Option<AbortHandle>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, replacing any pending one
    ///
    /// `message` receives the new generation and builds what gets posted
    /// to `tx` once `delay` has elapsed. Must be called within a tokio runtime.
    pub fn arm<M, F>(&mut self, delay: Duration, tx: &UnboundedSender<M>, message: F) -> u64
    where
        M: Send + 'static,
        F: FnOnce(u64) -> M,
    {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let message = message(generation);
        let tx = tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(message);
        });
        self.pending = Some(task.abort_handle());
        generation
    }

    /// Abort the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume a fired timer
    ///
    /// Returns `true` only if `generation` is the currently pending timer;
    /// stale or cancelled generations return `false` and change nothing.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.pending.is_some() && generation == self.generation {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

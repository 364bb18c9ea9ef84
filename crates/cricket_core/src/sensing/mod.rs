//! Hold-to-confirm gate between a per-frame gesture classifier and the engine.
//!
//! The classifier reports what it sees on every frame. A symbol is only
//! forwarded once it has been held steadily for the confirmation delay,
//! and the same symbol is not forwarded twice in a row until the hand
//! leaves the frame.

use std::time::Duration;

use crate::models::{EventSymbol, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfirmStatus {
    /// No hand in view. The caller should clear the engine's last event.
    NoHand,
    Holding {
        symbol: EventSymbol,
        remaining: Duration,
        /// 0.0 at the start of the hold, 1.0 when confirmed.
        progress: f64,
    },
    /// Held long enough; forward to the engine.
    Confirmed(EventSymbol),
    /// Held long enough, but it repeats the previous confirmation.
    Suppressed(EventSymbol),
}

#[derive(Debug, Clone)]
pub struct GestureConfirmer {
    delay: Duration,
    candidate: Option<(EventSymbol, Timestamp)>,
    last_confirmed: Option<EventSymbol>,
}

impl GestureConfirmer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, candidate: None, last_confirmed: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn last_confirmed(&self) -> Option<EventSymbol> {
        self.last_confirmed
    }

    /// Feed one classified frame.
    pub fn observe(&mut self, frame: Option<EventSymbol>, now: Timestamp) -> ConfirmStatus {
        let Some(symbol) = frame else {
            self.candidate = None;
            self.last_confirmed = None;
            return ConfirmStatus::NoHand;
        };

        let started = match self.candidate {
            Some((held, started)) if held == symbol => started,
            _ => {
                self.candidate = Some((symbol, now));
                now
            }
        };

        let held_for = now.saturating_since(started);
        if held_for < self.delay {
            let progress = held_for.as_secs_f64() / self.delay.as_secs_f64();
            return ConfirmStatus::Holding {
                symbol,
                remaining: self.delay - held_for,
                progress: progress.clamp(0.0, 1.0),
            };
        }

        // restart the hold either way
        self.candidate = None;
        if self.last_confirmed == Some(symbol) {
            return ConfirmStatus::Suppressed(symbol);
        }
        self.last_confirmed = Some(symbol);
        tracing::debug!(symbol = %symbol, held_ms = held_for.as_millis() as u64, "gesture confirmed");
        ConfirmStatus::Confirmed(symbol)
    }
}

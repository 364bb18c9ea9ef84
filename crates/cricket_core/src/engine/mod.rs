//! # Scoring Rules Engine
//!
//! Turns classified event symbols into score mutations.
//!
//! ## Flow
//! 1. `apply(event, now)` gates the event (match over, cooldown, duplicate)
//! 2. `rules` dispatches the symbol into counter changes and one `DeliveryRecord`
//! 3. `completion` checks for the innings split or the end of the match
//! 4. `undo_last()` pops the newest record and applies its inverse
//!
//! Gate rejections are ordinary return values: a held gesture is sampled
//! many times per second, so they are the steady state, not failures.

mod completion;
mod rules;
mod undo;

pub use completion::{check_innings_completion, CompletionEvent};

use std::time::Duration;

use crate::config::{ScoringConfig, MAX_OVERS};
use crate::error::{Result, ScoringError};
use crate::models::{EventSymbol, Innings, MatchSetup, MatchState, MatchStateView, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyDecision {
    Applied,
    /// Arrived before the cooldown since the last accepted event elapsed.
    RejectedCooldown,
    /// Same symbol as the last accepted event; the gesture has to change first.
    RejectedDuplicate,
    /// A result has already been reached.
    RejectedMatchComplete,
}

impl ApplyDecision {
    pub fn is_applied(self) -> bool {
        self == ApplyDecision::Applied
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoDecision {
    Applied,
    EmptyHistory,
}

/// Owns the match state; every mutation goes through here.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    state: MatchState,
    config: ScoringConfig,
    setup: Option<MatchSetup>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::from_valid(ScoringConfig::default())
    }
}

impl ScoringEngine {
    /// Validates the config before building the first match.
    pub fn new(config: ScoringConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            tracing::error!(error = %err, "rejected scoring config");
            return Err(err.into());
        }
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: ScoringConfig) -> Self {
        Self { state: MatchState::new(config.overs_limit), config, setup: None }
    }

    /// Start a match for the given teams; the setup's overs override the config.
    pub fn with_setup(setup: MatchSetup, config: ScoringConfig) -> Result<Self> {
        setup.validate()?;
        let mut engine = Self::new(config.with_overs(setup.overs))?;
        engine.setup = Some(setup);
        Ok(engine)
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn setup(&self) -> Option<&MatchSetup> {
        self.setup.as_ref()
    }

    /// Set the overs per innings.
    ///
    /// Takes effect immediately while no delivery of the match has been
    /// bowled, otherwise at the next `reset`.
    pub fn configure(&mut self, overs_limit: u32) -> Result<()> {
        if overs_limit == 0 || overs_limit > MAX_OVERS {
            tracing::error!(overs_limit, "rejected overs limit");
            return Err(ScoringError::InvalidOversLimit { overs: overs_limit, max: MAX_OVERS });
        }
        self.config.overs_limit = overs_limit;
        if let Some(setup) = self.setup.as_mut() {
            setup.overs = overs_limit;
        }

        let not_started = self.state.innings == Innings::First
            && self.state.ball_history.is_empty()
            && !self.state.match_complete;
        if not_started {
            self.state.match_overs_limit = overs_limit;
        }
        tracing::info!(overs_limit, applied_now = not_started, "overs limit configured");
        Ok(())
    }

    /// Throw away the current match and start a fresh one with the configured overs.
    pub fn reset(&mut self) {
        self.state = MatchState::new(self.config.overs_limit);
        self.state.last_action = "Match Reset".to_string();
        tracing::info!(
            match_id = %self.state.match_id,
            overs_limit = self.config.overs_limit,
            "match reset"
        );
    }

    /// Reset into a new match between the given teams.
    pub fn reset_with_setup(&mut self, setup: MatchSetup) -> Result<()> {
        setup.validate()?;
        self.config.overs_limit = setup.overs;
        self.setup = Some(setup);
        self.reset();
        Ok(())
    }

    /// Hand withdrawn from view: the next gesture may repeat the last one.
    pub fn clear_last_event(&mut self) {
        self.state.last_event_symbol = None;
    }

    pub fn cooldown_remaining(&self, now: Timestamp) -> Duration {
        match self.state.last_event_time {
            Some(last) => self.config.cooldown().saturating_sub(now.saturating_since(last)),
            None => Duration::ZERO,
        }
    }

    pub fn snapshot(&self, now: Timestamp) -> MatchStateView {
        MatchStateView::new(&self.state, self.setup.as_ref(), self.cooldown_remaining(now))
    }

    pub fn apply(&mut self, event: EventSymbol, now: Timestamp) -> ApplyDecision {
        if self.state.match_complete {
            tracing::debug!(symbol = %event, "ignored: match complete");
            return ApplyDecision::RejectedMatchComplete;
        }

        if let Some(last) = self.state.last_event_time {
            if now.saturating_since(last) < self.config.cooldown() {
                tracing::debug!(symbol = %event, "ignored: cooldown active");
                return ApplyDecision::RejectedCooldown;
            }
        }

        if self.state.last_event_symbol == Some(event) {
            tracing::debug!(symbol = %event, "ignored: duplicate gesture");
            return ApplyDecision::RejectedDuplicate;
        }

        self.state.last_event_time = Some(now);
        self.state.last_event_symbol = Some(event);

        let record = rules::apply_delivery(&mut self.state, event, now);
        tracing::debug!(
            symbol = %event,
            delivery = %record.notation(),
            runs = self.state.runs,
            wickets = self.state.wickets,
            legal_balls = self.state.legal_balls,
            "delivery applied"
        );

        if let Some(completion) = check_innings_completion(&mut self.state) {
            tracing::info!(?completion, match_id = %self.state.match_id, "{}", self.state.last_action);
        }

        self.audit();
        ApplyDecision::Applied
    }

    /// Parse a raw classifier symbol and apply it.
    ///
    /// Unknown symbols mean the sensing layer is broken, so they are
    /// logged as errors and returned as `InvalidEvent`; nothing is mutated.
    pub fn apply_raw(&mut self, symbol: &str, now: Timestamp) -> Result<ApplyDecision> {
        match symbol.parse::<EventSymbol>() {
            Ok(event) => Ok(self.apply(event, now)),
            Err(err) => {
                tracing::error!(symbol, "classifier produced an invalid event symbol");
                Err(err)
            }
        }
    }

    pub fn apply_fingers(&mut self, fingers: u8, now: Timestamp) -> Result<ApplyDecision> {
        match EventSymbol::from_finger_count(fingers) {
            Ok(event) => Ok(self.apply(event, now)),
            Err(err) => {
                tracing::error!(fingers, "classifier produced an invalid finger count");
                Err(err)
            }
        }
    }

    pub fn undo_last(&mut self) -> UndoDecision {
        match undo::undo_last(&mut self.state) {
            Some(record) => {
                tracing::debug!(
                    delivery = %record.notation(),
                    runs = self.state.runs,
                    wickets = self.state.wickets,
                    legal_balls = self.state.legal_balls,
                    "delivery undone"
                );
                self.audit();
                UndoDecision::Applied
            }
            None => {
                tracing::debug!("nothing to undo");
                UndoDecision::EmptyHistory
            }
        }
    }

    /// Debug builds panic, `strict_contracts` panics, release logs.
    fn audit(&self) {
        let result = self.state.check_invariants();
        debug_assert!(result.is_ok(), "scoring ledger inconsistent: {result:?}");

        if let Err(err) = result {
            #[cfg(feature = "strict_contracts")]
            panic!("STRICT: scoring ledger inconsistent: {err}");

            #[cfg(not(feature = "strict_contracts"))]
            tracing::error!(error = %err, match_id = %self.state.match_id, "scoring ledger inconsistent");
        }
    }
}

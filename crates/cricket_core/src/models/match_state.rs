//! Match State
//!
//! The single source of truth for one match: score counters, the
//! ball-by-ball history of the current innings, and the first-innings
//! snapshot used to set the target. Only the scoring engine mutates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::{DeliveryKind, DeliveryRecord, EventSymbol, Timestamp};
use crate::error::{Result, ScoringError};

pub const BALLS_PER_OVER: u32 = 6;
pub const MAX_WICKETS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Innings {
    #[default]
    First,
    Second,
}

impl Innings {
    pub fn number(self) -> u8 {
        match self {
            Innings::First => 1,
            Innings::Second => 2,
        }
    }
}

/// Outcome of the match from the point of view of the second innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchWinner {
    #[default]
    None,
    /// Batting second, reached the target.
    ChasingTeam,
    /// Batting first, defended the target.
    DefendingTeam,
    Tie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub match_id: Uuid,
    pub started_at: DateTime<Utc>,

    pub runs: u32,
    pub wickets: u32,
    /// Legal deliveries in the current innings.
    pub legal_balls: u32,

    pub extras: u32,
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,

    /// Set by a no-ball, cleared by the next legal delivery.
    pub free_hit: bool,

    pub innings: Innings,
    pub first_innings_runs: u32,
    pub first_innings_wickets: u32,
    pub first_innings_balls: u32,

    pub match_overs_limit: u32,
    pub match_complete: bool,
    pub winner: MatchWinner,

    /// Every delivery of the current innings, in the order applied.
    pub ball_history: Vec<DeliveryRecord>,

    /// Display text only.
    pub last_action: String,
    pub last_event_symbol: Option<EventSymbol>,
    pub last_event_time: Option<Timestamp>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(20)
    }
}

impl MatchState {
    pub fn new(match_overs_limit: u32) -> Self {
        Self {
            match_id: Uuid::new_v4(),
            started_at: Utc::now(),
            runs: 0,
            wickets: 0,
            legal_balls: 0,
            extras: 0,
            wides: 0,
            no_balls: 0,
            byes: 0,
            leg_byes: 0,
            free_hit: false,
            innings: Innings::First,
            first_innings_runs: 0,
            first_innings_wickets: 0,
            first_innings_balls: 0,
            match_overs_limit,
            match_complete: false,
            winner: MatchWinner::None,
            ball_history: Vec::new(),
            last_action: "Match Started".to_string(),
            last_event_symbol: None,
            last_event_time: None,
        }
    }

    /// Completed overs in the current innings.
    pub fn overs(&self) -> u32 {
        self.legal_balls / BALLS_PER_OVER
    }

    /// Legal balls bowled in the current over (0-5).
    pub fn ball_in_over(&self) -> u32 {
        self.legal_balls % BALLS_PER_OVER
    }

    pub fn max_balls(&self) -> u32 {
        self.match_overs_limit.saturating_mul(BALLS_PER_OVER)
    }

    pub fn balls_remaining(&self) -> u32 {
        self.max_balls().saturating_sub(self.legal_balls)
    }

    /// Runs the chasing side needs to win; only defined in the second innings.
    pub fn target(&self) -> Option<u32> {
        match self.innings {
            Innings::First => None,
            Innings::Second => Some(self.first_innings_runs + 1),
        }
    }

    pub fn runs_needed(&self) -> Option<u32> {
        self.target().map(|target| target.saturating_sub(self.runs))
    }

    /// `runs * 6 / legal_balls`, undefined before the first legal ball.
    pub fn current_run_rate(&self) -> Option<f64> {
        (self.legal_balls > 0)
            .then(|| f64::from(self.runs) * f64::from(BALLS_PER_OVER) / f64::from(self.legal_balls))
    }

    pub fn required_run_rate(&self) -> Option<f64> {
        if self.match_complete {
            return None;
        }
        let needed = self.runs_needed()?;
        let remaining = self.balls_remaining();
        (remaining > 0)
            .then(|| f64::from(needed) * f64::from(BALLS_PER_OVER) / f64::from(remaining))
    }

    /// Batting side has used up its balls or its wickets.
    pub fn resources_exhausted(&self) -> bool {
        self.legal_balls >= self.max_balls() || self.wickets >= MAX_WICKETS
    }

    pub fn is_over_boundary(&self) -> bool {
        self.legal_balls > 0 && self.legal_balls % BALLS_PER_OVER == 0
    }

    /// "First Innings - 20 Overs" / "Second Innings - Need 12 runs in 9 balls" / "Match Complete"
    pub fn match_status(&self) -> String {
        if self.match_complete {
            return "Match Complete".to_string();
        }
        match self.innings {
            Innings::First => format!("First Innings - {} Overs", self.match_overs_limit),
            Innings::Second => format!(
                "Second Innings - Need {} runs in {} balls",
                self.runs_needed().unwrap_or(0),
                self.balls_remaining()
            ),
        }
    }

    pub fn ball_by_ball(&self) -> Vec<String> {
        self.ball_history.iter().map(DeliveryRecord::notation).collect()
    }

    /// Ledger consistency checks; every accepted event must leave these true.
    pub fn check_invariants(&self) -> Result<()> {
        let extras_sum = self.wides + self.no_balls + self.byes + self.leg_byes;
        if self.extras != extras_sum {
            return Err(ScoringError::InvariantViolation(format!(
                "extras {} != wides {} + no_balls {} + byes {} + leg_byes {}",
                self.extras, self.wides, self.no_balls, self.byes, self.leg_byes
            )));
        }
        if self.wickets > MAX_WICKETS {
            return Err(ScoringError::InvariantViolation(format!(
                "wickets {} exceeds {}",
                self.wickets, MAX_WICKETS
            )));
        }
        if self.legal_balls > self.max_balls() {
            return Err(ScoringError::InvariantViolation(format!(
                "legal_balls {} exceeds {} for a {}-over innings",
                self.legal_balls,
                self.max_balls(),
                self.match_overs_limit
            )));
        }
        let expected_len = (self.legal_balls + self.wides + self.no_balls) as usize;
        if self.ball_history.len() != expected_len {
            return Err(ScoringError::InvariantViolation(format!(
                "ball_history has {} entries, expected {}",
                self.ball_history.len(),
                expected_len
            )));
        }
        // Wides do not use up a pending free hit.
        let pending_no_ball = self
            .ball_history
            .iter()
            .rev()
            .find(|record| record.kind != DeliveryKind::Wide)
            .is_some_and(|record| record.kind == DeliveryKind::NoBall);
        if self.free_hit && !pending_no_ball {
            return Err(ScoringError::InvariantViolation(
                "free hit pending without a preceding no-ball".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_consistent() {
        let state = MatchState::new(5);
        assert_eq!(state.max_balls(), 30);
        assert_eq!(state.innings, Innings::First);
        assert_eq!(state.winner, MatchWinner::None);
        assert!(state.check_invariants().is_ok());
        assert_eq!(state.current_run_rate(), None);
        assert_eq!(state.target(), None);
    }

    #[test]
    fn test_overs_and_ball_in_over() {
        let mut state = MatchState::new(20);
        state.legal_balls = 14;
        assert_eq!(state.overs(), 2);
        assert_eq!(state.ball_in_over(), 2);
        assert!(!state.is_over_boundary());
        state.legal_balls = 18;
        assert!(state.is_over_boundary());
    }

    #[test]
    fn test_max_balls_saturates() {
        let state = MatchState::new(u32::MAX);
        assert_eq!(state.max_balls(), u32::MAX);
        assert_eq!(state.balls_remaining(), u32::MAX);
        assert!(!state.resources_exhausted());
    }

    #[test]
    fn test_run_rates() {
        let mut state = MatchState::new(2);
        state.runs = 9;
        state.legal_balls = 6;
        assert_eq!(state.current_run_rate(), Some(9.0));

        state.innings = Innings::Second;
        state.first_innings_runs = 20;
        assert_eq!(state.target(), Some(21));
        assert_eq!(state.runs_needed(), Some(12));
        // 12 runs from 6 balls
        assert_eq!(state.required_run_rate(), Some(12.0));
    }

    #[test]
    fn test_match_status_text() {
        let mut state = MatchState::new(20);
        assert_eq!(state.match_status(), "First Innings - 20 Overs");

        state.innings = Innings::Second;
        state.first_innings_runs = 100;
        state.runs = 90;
        state.legal_balls = 111;
        assert_eq!(state.match_status(), "Second Innings - Need 11 runs in 9 balls");

        state.match_complete = true;
        assert_eq!(state.match_status(), "Match Complete");
    }

    #[test]
    fn test_invariant_violation_detected() {
        let mut state = MatchState::new(1);
        state.extras = 1;
        assert!(matches!(state.check_invariants(), Err(ScoringError::InvariantViolation(_))));

        let mut state = MatchState::new(1);
        state.legal_balls = 7;
        assert!(state.check_invariants().is_err());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use super::event::{DeliveryRecord, EventSymbol};
use super::match_state::{MatchState, MatchWinner};
use super::setup::MatchSetup;

/// Read-only projection of the match for display collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStateView {
    pub match_id: Uuid,
    pub started_at: DateTime<Utc>,

    pub runs: u32,
    pub wickets: u32,
    pub legal_balls: u32,
    pub overs: u32,
    pub ball_in_over: u32,

    pub extras: u32,
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
    pub free_hit: bool,

    pub innings: u8,
    pub first_innings_runs: u32,
    pub first_innings_wickets: u32,
    pub first_innings_balls: u32,

    pub match_overs_limit: u32,
    pub match_complete: bool,
    pub winner: MatchWinner,
    pub match_status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_run_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs_needed: Option<u32>,
    pub balls_remaining: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_run_rate: Option<f64>,

    pub ball_history: Vec<DeliveryRecord>,
    /// Scorecard notation of `ball_history`.
    pub ball_by_ball: Vec<String>,
    pub last_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event_symbol: Option<EventSymbol>,
    pub cooldown_remaining_secs: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batting_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_team: Option<String>,
}

impl MatchStateView {
    pub fn new(state: &MatchState, setup: Option<&MatchSetup>, cooldown_remaining: Duration) -> Self {
        Self {
            match_id: state.match_id,
            started_at: state.started_at,
            runs: state.runs,
            wickets: state.wickets,
            legal_balls: state.legal_balls,
            overs: state.overs(),
            ball_in_over: state.ball_in_over(),
            extras: state.extras,
            wides: state.wides,
            no_balls: state.no_balls,
            byes: state.byes,
            leg_byes: state.leg_byes,
            free_hit: state.free_hit,
            innings: state.innings.number(),
            first_innings_runs: state.first_innings_runs,
            first_innings_wickets: state.first_innings_wickets,
            first_innings_balls: state.first_innings_balls,
            match_overs_limit: state.match_overs_limit,
            match_complete: state.match_complete,
            winner: state.winner,
            match_status: state.match_status(),
            current_run_rate: state.current_run_rate(),
            target: state.target(),
            runs_needed: state.runs_needed(),
            balls_remaining: state.balls_remaining(),
            required_run_rate: state.required_run_rate(),
            ball_history: state.ball_history.clone(),
            ball_by_ball: state.ball_by_ball(),
            last_action: state.last_action.clone(),
            last_event_symbol: state.last_event_symbol,
            cooldown_remaining_secs: cooldown_remaining.as_secs_f64(),
            batting_team: setup.map(|s| s.batting_team(state.innings).to_string()),
            winner_team: setup.and_then(|s| s.winner_team(state.winner)).map(str::to_string),
        }
    }

    /// "45/3 (7.2 ov)"
    pub fn score_line(&self) -> String {
        format!("{}/{} ({}.{} ov)", self.runs, self.wickets, self.overs, self.ball_in_over)
    }

    /// One-line scoreboard for terminals and logs.
    pub fn summary_line(&self) -> String {
        let mut line = format!("{} | {} | {}", self.score_line(), self.match_status, self.last_action);
        if self.free_hit {
            line.push_str(" | FREE HIT");
        }
        line
    }
}

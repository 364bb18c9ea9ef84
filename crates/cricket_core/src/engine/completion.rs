use serde::{Deserialize, Serialize};

use crate::models::{Innings, MatchState, MatchWinner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CompletionEvent {
    /// First innings over; the counters were rolled into the first-innings snapshot.
    InningsComplete { target: u32 },
    ChaseWon { balls_remaining: u32 },
    Tied,
    Defended { runs_short: u32 },
}

/// Check for the end of an innings or of the match after an accepted delivery.
///
/// In the second innings the target check runs before the exhaustion
/// check, so reaching the target on the final ball is still a win.
pub fn check_innings_completion(state: &mut MatchState) -> Option<CompletionEvent> {
    if state.match_complete {
        return None;
    }

    match state.innings {
        Innings::First => {
            if !state.resources_exhausted() {
                return None;
            }
            start_second_innings(state);
            let target = state.first_innings_runs + 1;
            state.last_action = format!("First Innings Complete! Target: {target} runs");
            Some(CompletionEvent::InningsComplete { target })
        }
        Innings::Second => {
            let target = state.first_innings_runs + 1;
            if state.runs >= target {
                let balls_remaining = state.balls_remaining();
                finish(state, MatchWinner::ChasingTeam);
                state.last_action =
                    format!("Match Won! Target achieved with {balls_remaining} balls remaining!");
                return Some(CompletionEvent::ChaseWon { balls_remaining });
            }

            if !state.resources_exhausted() {
                return None;
            }

            if state.runs == state.first_innings_runs {
                finish(state, MatchWinner::Tie);
                state.last_action = "Match Tied!".to_string();
                Some(CompletionEvent::Tied)
            } else {
                let runs_short = target - state.runs;
                finish(state, MatchWinner::DefendingTeam);
                state.last_action = format!("Match Lost! Fell short by {runs_short} runs!");
                Some(CompletionEvent::Defended { runs_short })
            }
        }
    }
}

fn start_second_innings(state: &mut MatchState) {
    state.first_innings_runs = state.runs;
    state.first_innings_wickets = state.wickets;
    state.first_innings_balls = state.legal_balls;

    state.innings = Innings::Second;
    state.runs = 0;
    state.wickets = 0;
    state.legal_balls = 0;
    state.extras = 0;
    state.wides = 0;
    state.no_balls = 0;
    state.byes = 0;
    state.leg_byes = 0;
    state.ball_history.clear();
    state.free_hit = false;
}

fn finish(state: &mut MatchState, winner: MatchWinner) {
    state.match_complete = true;
    state.winner = winner;
}

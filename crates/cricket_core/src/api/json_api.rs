use serde::{Deserialize, Serialize};

use crate::engine::{ApplyDecision, UndoDecision};
use crate::models::{EventSymbol, MatchStateView};
use crate::state::Scoreboard;

pub const API_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreAction {
    Apply,
    Undo,
    Reset,
    /// Hand left the frame.
    Withdraw,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub schema_version: u8,
    pub action: ScoreAction,
    /// Required for `apply`: a finger count "0".."5" or an extras keyword.
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDecision {
    Applied,
    RejectedCooldown,
    RejectedDuplicate,
    RejectedMatchComplete,
    EmptyHistory,
    Reset,
    Withdrawn,
}

impl From<ApplyDecision> for ScoreDecision {
    fn from(decision: ApplyDecision) -> Self {
        match decision {
            ApplyDecision::Applied => ScoreDecision::Applied,
            ApplyDecision::RejectedCooldown => ScoreDecision::RejectedCooldown,
            ApplyDecision::RejectedDuplicate => ScoreDecision::RejectedDuplicate,
            ApplyDecision::RejectedMatchComplete => ScoreDecision::RejectedMatchComplete,
        }
    }
}

impl From<UndoDecision> for ScoreDecision {
    fn from(decision: UndoDecision) -> Self {
        match decision {
            UndoDecision::Applied => ScoreDecision::Applied,
            UndoDecision::EmptyHistory => ScoreDecision::EmptyHistory,
        }
    }
}

/// A validated request, ready to run under the scoreboard lock.
enum Command {
    Apply(EventSymbol),
    Undo,
    Reset,
    Withdraw,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub schema_version: u8,
    pub decision: ScoreDecision,
    pub snapshot: MatchStateView,
}

/// Handle one request from a presentation layer and return the response JSON.
///
/// Errors come back as `"<reason>: <detail>"` strings.
pub fn apply_event_json(scoreboard: &Scoreboard, request_json: &str) -> Result<String, String> {
    let request: ScoreRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;

    if request.schema_version != API_SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {}", request.schema_version));
    }

    let command = match request.action {
        ScoreAction::Apply => {
            let symbol = request
                .symbol
                .as_deref()
                .ok_or_else(|| "Missing symbol: apply requires a symbol".to_string())?;
            let event: EventSymbol = symbol.parse().map_err(|e| {
                tracing::error!(symbol, "rejected invalid symbol from JSON request");
                format!("Invalid event: {}", e)
            })?;
            Command::Apply(event)
        }
        ScoreAction::Undo => Command::Undo,
        ScoreAction::Reset => Command::Reset,
        ScoreAction::Withdraw => Command::Withdraw,
    };

    let (decision, snapshot) = scoreboard.update(|engine, now| match command {
        Command::Apply(event) => ScoreDecision::from(engine.apply(event, now)),
        Command::Undo => ScoreDecision::from(engine.undo_last()),
        Command::Reset => {
            engine.reset();
            ScoreDecision::Reset
        }
        Command::Withdraw => {
            engine.clear_last_event();
            ScoreDecision::Withdrawn
        }
    });

    let response = ScoreResponse { schema_version: API_SCHEMA_VERSION, decision, snapshot };
    serde_json::to_string(&response).map_err(|e| format!("Serialization failed: {}", e))
}

pub fn snapshot_json(scoreboard: &Scoreboard) -> Result<String, String> {
    serde_json::to_string(&scoreboard.snapshot()).map_err(|e| format!("Serialization failed: {}", e))
}

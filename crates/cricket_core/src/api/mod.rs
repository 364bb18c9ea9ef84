pub mod json_api;

pub use json_api::{
    apply_event_json, snapshot_json, ScoreAction, ScoreDecision, ScoreRequest, ScoreResponse,
    API_SCHEMA_VERSION,
};

//! # cricket_core - Gesture-Driven Cricket Scoring Engine
//!
//! Keeps the live state of a two-innings limited-overs match and turns
//! classified gestures (finger counts and umpire signals) into score
//! changes.
//!
//! ## Features
//! - Delivery legality, extras and the no-ball free hit
//! - Innings split, target chase, tie detection
//! - Single-step undo of the last delivery
//! - Cooldown and duplicate suppression for held gestures
//! - Shared handle and JSON API for display layers
//!
//! ## Usage
//! ```rust
//! use cricket_core::{ApplyDecision, EventSymbol, ScoringConfig, ScoringEngine, Timestamp};
//!
//! let mut engine = ScoringEngine::new(ScoringConfig::default().with_overs(1))?;
//! assert_eq!(engine.apply(EventSymbol::NoBall, Timestamp::ZERO), ApplyDecision::Applied);
//! assert!(engine.state().free_hit);
//!
//! // a fist on the free hit is a dot ball, not a wicket
//! engine.apply(EventSymbol::Wicket, Timestamp::from_secs_f64(4.0));
//! assert_eq!(engine.state().wickets, 0);
//! # Ok::<(), cricket_core::ScoringError>(())
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod sensing;
pub mod state;

pub use api::{apply_event_json, snapshot_json, ScoreRequest, ScoreResponse};
pub use config::{ConfigError, ScoringConfig};
pub use engine::{ApplyDecision, CompletionEvent, ScoringEngine, UndoDecision};
pub use error::{Result, ScoringError};
pub use models::{
    DeliveryKind, DeliveryRecord, EventSymbol, Innings, MatchSetup, MatchState, MatchStateView,
    MatchWinner, Timestamp,
};
pub use sensing::{ConfirmStatus, GestureConfirmer};
pub use state::{Clock, ManualClock, MonotonicClock, Scoreboard};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

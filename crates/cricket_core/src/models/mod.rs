pub mod event;
pub mod match_state;
pub mod setup;
pub mod view;

pub use event::{DeliveryKind, DeliveryRecord, EventSymbol, Timestamp};
pub use match_state::{Innings, MatchState, MatchWinner, BALLS_PER_OVER, MAX_WICKETS};
pub use setup::MatchSetup;
pub use view::MatchStateView;

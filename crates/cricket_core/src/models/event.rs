use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ScoringError;

/// Monotonic instant, measured from an arbitrary origin shared by the engine
/// and whoever feeds it events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp(Duration);

impl Timestamp {
    pub const ZERO: Self = Self(Duration::ZERO);

    pub fn from_duration(since_origin: Duration) -> Self {
        Self(since_origin)
    }

    /// Negative or unrepresentable inputs clamp to the origin.
    pub fn from_secs_f64(secs: f64) -> Self {
        Duration::try_from_secs_f64(secs).map(Self).unwrap_or(Self::ZERO)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn as_duration(self) -> Duration {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }

    /// Time elapsed since `earlier`, zero if the clock appears to have gone backwards.
    pub fn saturating_since(self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0 + rhs)
    }
}

/// A classified gesture or manual button press.
///
/// The finger-count gestures map 0 to a wicket and 5 (open palm) to a six;
/// there is no five-run symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventSymbol {
    /// Fist, zero fingers.
    Wicket,
    One,
    Two,
    Three,
    Four,
    /// Open palm, five fingers.
    Six,
    DotBall,
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl EventSymbol {
    pub const ALL: [EventSymbol; 11] = [
        EventSymbol::Wicket,
        EventSymbol::One,
        EventSymbol::Two,
        EventSymbol::Three,
        EventSymbol::Four,
        EventSymbol::Six,
        EventSymbol::DotBall,
        EventSymbol::Wide,
        EventSymbol::NoBall,
        EventSymbol::Bye,
        EventSymbol::LegBye,
    ];

    pub fn from_finger_count(fingers: u8) -> Result<Self, ScoringError> {
        match fingers {
            0 => Ok(EventSymbol::Wicket),
            1 => Ok(EventSymbol::One),
            2 => Ok(EventSymbol::Two),
            3 => Ok(EventSymbol::Three),
            4 => Ok(EventSymbol::Four),
            5 => Ok(EventSymbol::Six),
            other => Err(ScoringError::invalid_event(other.to_string())),
        }
    }

    pub fn finger_count(self) -> Option<u8> {
        match self {
            EventSymbol::Wicket => Some(0),
            EventSymbol::One => Some(1),
            EventSymbol::Two => Some(2),
            EventSymbol::Three => Some(3),
            EventSymbol::Four => Some(4),
            EventSymbol::Six => Some(5),
            _ => None,
        }
    }

    /// Runs credited to the batter for a finger-count gesture.
    pub fn bat_runs(self) -> Option<u32> {
        match self {
            EventSymbol::One => Some(1),
            EventSymbol::Two => Some(2),
            EventSymbol::Three => Some(3),
            EventSymbol::Four => Some(4),
            EventSymbol::Six => Some(6),
            _ => None,
        }
    }

    /// Wides and no-balls are re-bowled and do not count toward the over.
    pub fn is_legal_delivery(self) -> bool {
        !matches!(self, EventSymbol::Wide | EventSymbol::NoBall)
    }

    /// Wire form: the finger count for scoring gestures, a keyword otherwise.
    pub fn as_str(self) -> &'static str {
        match self {
            EventSymbol::Wicket => "0",
            EventSymbol::One => "1",
            EventSymbol::Two => "2",
            EventSymbol::Three => "3",
            EventSymbol::Four => "4",
            EventSymbol::Six => "5",
            EventSymbol::DotBall => "dot_ball",
            EventSymbol::Wide => "wide",
            EventSymbol::NoBall => "no_ball",
            EventSymbol::Bye => "bye",
            EventSymbol::LegBye => "leg_bye",
        }
    }
}

impl fmt::Display for EventSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventSymbol {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
            .collect();

        if let Ok(fingers) = normalized.parse::<u8>() {
            return EventSymbol::from_finger_count(fingers);
        }

        match normalized.as_str() {
            "wicket" => Ok(EventSymbol::Wicket),
            "dot_ball" | "dot" => Ok(EventSymbol::DotBall),
            "wide" => Ok(EventSymbol::Wide),
            "no_ball" | "noball" => Ok(EventSymbol::NoBall),
            "bye" => Ok(EventSymbol::Bye),
            "leg_bye" | "legbye" => Ok(EventSymbol::LegBye),
            _ => Err(ScoringError::invalid_event(s)),
        }
    }
}

impl TryFrom<String> for EventSymbol {
    type Error = ScoringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventSymbol> for String {
    fn from(symbol: EventSymbol) -> Self {
        symbol.as_str().to_string()
    }
}

/// What actually happened on a delivery, after free-hit rules were applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "runs", rename_all = "snake_case")]
pub enum DeliveryKind {
    Wicket,
    Runs(u32),
    DotBall,
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl DeliveryKind {
    /// Runs added to the team total.
    pub fn runs(self) -> u32 {
        match self {
            DeliveryKind::Runs(n) => n,
            DeliveryKind::Wide | DeliveryKind::NoBall | DeliveryKind::Bye | DeliveryKind::LegBye => 1,
            DeliveryKind::Wicket | DeliveryKind::DotBall => 0,
        }
    }

    pub fn is_legal(self) -> bool {
        !matches!(self, DeliveryKind::Wide | DeliveryKind::NoBall)
    }

    pub fn is_extra(self) -> bool {
        matches!(
            self,
            DeliveryKind::Wide | DeliveryKind::NoBall | DeliveryKind::Bye | DeliveryKind::LegBye
        )
    }

    /// Scorecard notation.
    pub fn notation(self) -> String {
        match self {
            DeliveryKind::Wicket => "W".to_string(),
            DeliveryKind::Runs(n) => n.to_string(),
            DeliveryKind::DotBall => "•".to_string(),
            DeliveryKind::Wide => "WD".to_string(),
            DeliveryKind::NoBall => "NB".to_string(),
            DeliveryKind::Bye => "B1".to_string(),
            DeliveryKind::LegBye => "LB1".to_string(),
        }
    }
}

/// One entry of the ball-by-ball history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub kind: DeliveryKind,
    /// Symbol that produced this delivery.
    pub symbol: EventSymbol,
    /// The delivery was bowled as a free hit (and consumed it).
    pub free_hit: bool,
    pub at: Timestamp,
}

impl DeliveryRecord {
    pub fn notation(&self) -> String {
        self.kind.notation()
    }

    /// A fist shown on a free hit: scored as a dot, no dismissal.
    pub fn is_denied_wicket(&self) -> bool {
        self.symbol == EventSymbol::Wicket && self.kind == DeliveryKind::DotBall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_palm_is_six_not_five() {
        assert_eq!(EventSymbol::from_finger_count(5).unwrap(), EventSymbol::Six);
        assert_eq!(EventSymbol::Six.bat_runs(), Some(6));
        assert_eq!(EventSymbol::Six.finger_count(), Some(5));
    }

    #[test]
    fn test_finger_count_out_of_range_is_invalid() {
        assert!(matches!(
            EventSymbol::from_finger_count(6),
            Err(ScoringError::InvalidEvent { .. })
        ));
    }

    #[test]
    fn test_parse_keywords_and_digits() {
        assert_eq!("0".parse::<EventSymbol>().unwrap(), EventSymbol::Wicket);
        assert_eq!("3".parse::<EventSymbol>().unwrap(), EventSymbol::Three);
        assert_eq!("no_ball".parse::<EventSymbol>().unwrap(), EventSymbol::NoBall);
        assert_eq!("Leg-Bye".parse::<EventSymbol>().unwrap(), EventSymbol::LegBye);
        assert_eq!(" dot ball ".parse::<EventSymbol>().unwrap(), EventSymbol::DotBall);
        assert!("five".parse::<EventSymbol>().is_err());
        assert!("7".parse::<EventSymbol>().is_err());
        assert!("".parse::<EventSymbol>().is_err());
    }

    #[test]
    fn test_wire_form_parses_back() {
        for symbol in EventSymbol::ALL {
            assert_eq!(symbol.as_str().parse::<EventSymbol>().unwrap(), symbol);
        }
    }

    #[test]
    fn test_serde_uses_wire_form() {
        let json = serde_json::to_string(&EventSymbol::LegBye).unwrap();
        assert_eq!(json, "\"leg_bye\"");
        let parsed: EventSymbol = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(parsed, EventSymbol::Six);
        assert!(serde_json::from_str::<EventSymbol>("\"googly\"").is_err());
    }

    #[test]
    fn test_legality() {
        assert!(!EventSymbol::Wide.is_legal_delivery());
        assert!(!EventSymbol::NoBall.is_legal_delivery());
        assert!(EventSymbol::Bye.is_legal_delivery());
        assert!(EventSymbol::Wicket.is_legal_delivery());
        assert!(!DeliveryKind::NoBall.is_legal());
        assert!(DeliveryKind::LegBye.is_legal());
    }

    #[test]
    fn test_delivery_runs_and_extras() {
        assert_eq!(DeliveryKind::Runs(4).runs(), 4);
        assert_eq!(DeliveryKind::Wide.runs(), 1);
        assert_eq!(DeliveryKind::Wicket.runs(), 0);
        assert!(DeliveryKind::Bye.is_extra());
        assert!(!DeliveryKind::Runs(1).is_extra());
        assert!(!DeliveryKind::DotBall.is_extra());
    }

    #[test]
    fn test_notation() {
        assert_eq!(DeliveryKind::Wicket.notation(), "W");
        assert_eq!(DeliveryKind::Runs(6).notation(), "6");
        assert_eq!(DeliveryKind::DotBall.notation(), "•");
        assert_eq!(DeliveryKind::Bye.notation(), "B1");
        assert_eq!(DeliveryKind::LegBye.notation(), "LB1");
    }

    #[test]
    fn test_timestamp_saturates() {
        let early = Timestamp::from_secs_f64(1.0);
        let late = Timestamp::from_secs_f64(4.0);
        assert_eq!(late.saturating_since(early), Duration::from_secs(3));
        assert_eq!(early.saturating_since(late), Duration::ZERO);
    }
}

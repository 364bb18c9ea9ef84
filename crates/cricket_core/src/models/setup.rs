use serde::{Deserialize, Serialize};

use super::match_state::{Innings, MatchWinner};
use crate::config::MAX_OVERS;
use crate::error::{Result, ScoringError};

/// Teams and format chosen before the first ball.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub team_one: String,
    pub team_two: String,
    /// Must equal `team_one` or `team_two`.
    pub batting_first: String,
    pub overs: u32,
}

impl MatchSetup {
    pub fn new(
        team_one: impl Into<String>,
        team_two: impl Into<String>,
        batting_first: impl Into<String>,
        overs: u32,
    ) -> Result<Self> {
        let setup = Self {
            team_one: team_one.into(),
            team_two: team_two.into(),
            batting_first: batting_first.into(),
            overs,
        };
        setup.validate()?;
        Ok(setup)
    }

    pub fn validate(&self) -> Result<()> {
        if self.team_one.trim().is_empty() || self.team_two.trim().is_empty() {
            return Err(ScoringError::InvalidSetup("team names must not be empty".to_string()));
        }
        if self.team_one == self.team_two {
            return Err(ScoringError::InvalidSetup(format!(
                "teams must differ, both are {:?}",
                self.team_one
            )));
        }
        if self.batting_first != self.team_one && self.batting_first != self.team_two {
            return Err(ScoringError::InvalidSetup(format!(
                "{:?} is not playing in this match",
                self.batting_first
            )));
        }
        if self.overs == 0 || self.overs > MAX_OVERS {
            return Err(ScoringError::InvalidOversLimit { overs: self.overs, max: MAX_OVERS });
        }
        Ok(())
    }

    pub fn bowling_first(&self) -> &str {
        if self.batting_first == self.team_one {
            &self.team_two
        } else {
            &self.team_one
        }
    }

    pub fn batting_team(&self, innings: Innings) -> &str {
        match innings {
            Innings::First => &self.batting_first,
            Innings::Second => self.bowling_first(),
        }
    }

    /// Name of the winning side, `None` for a tie or an unfinished match.
    pub fn winner_team(&self, winner: MatchWinner) -> Option<&str> {
        match winner {
            MatchWinner::ChasingTeam => Some(self.bowling_first()),
            MatchWinner::DefendingTeam => Some(&self.batting_first),
            MatchWinner::Tie | MatchWinner::None => None,
        }
    }
}

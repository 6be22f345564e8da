//! Frozen records for the render and report boundary.
//!
//! A live [`Innings`] is mutable engine state; once it closes, the
//! controller freezes it into an [`InningsSummary`]. The fully populated
//! [`MatchSummary`] is what the (out-of-scope) text formatter consumes —
//! no scoring logic happens downstream of these types.

use crate::{Batsman, Bowler, Innings, Runs, TeamName, Toss};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A completed innings, frozen for display and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsSummary {
    pub batting_team: TeamName,
    pub bowling_team: TeamName,
    pub total: Runs,
    pub wickets: u32,
    /// Overs faced, figures style, e.g. "19.4".
    pub overs: String,
    pub batsmen: Vec<Batsman>,
    pub bowlers: Vec<Bowler>,
}

impl InningsSummary {
    /// Freeze a closed innings. Bowler part-overs are normalized so an
    /// interrupted over shows as overs-and-remainder.
    pub(crate) fn from_innings(innings: &Innings) -> Self {
        let mut bowlers = innings.bowlers.clone();
        for bowler in &mut bowlers {
            bowler.normalize_overs();
        }
        Self {
            batting_team: innings.batting_team.clone(),
            bowling_team: innings.bowling_team.clone(),
            total: innings.total,
            wickets: innings.wickets,
            overs: innings.overs_display(),
            batsmen: innings.batsmen.clone(),
            bowlers,
        }
    }
}

/// The final verdict of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatchResult {
    /// The side batting first defended its total.
    WonByRuns { team: TeamName, margin: Runs },
    /// The chasing side reached the target.
    WonByWickets { team: TeamName, margin: u32 },
    Tied,
}

impl MatchResult {
    /// The winning team, if the match was not tied.
    pub fn winner(&self) -> Option<&TeamName> {
        match self {
            MatchResult::WonByRuns { team, .. } | MatchResult::WonByWickets { team, .. } => {
                Some(team)
            }
            MatchResult::Tied => None,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::WonByRuns { team, margin } => {
                write!(f, "{team} won by {margin} runs")
            }
            MatchResult::WonByWickets { team, margin } => {
                write!(f, "{team} won by {margin} wickets")
            }
            MatchResult::Tied => f.write_str("Match Tied"),
        }
    }
}

/// The complete match record handed to the report layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub teams: [TeamName; 2],
    pub overs_limit: u32,
    pub toss: Toss,
    /// First-innings total plus one.
    pub target: Runs,
    pub first_innings: InningsSummary,
    pub second_innings: InningsSummary,
    pub result: MatchResult,
    pub player_of_match: crate::PlayerImpact,
    pub top_performers: Vec<crate::PlayerImpact>,
}

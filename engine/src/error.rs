//! Error types for the crease engine.

use crate::{PlayerName, TeamName};
use thiserror::Error;

/// All possible errors from the crease engine.
///
/// Variants fall into three groups. Validation errors reject bad setup
/// input before any state exists. Invalid-state errors reject an operation
/// that is not legal right now; the state is left untouched and the caller
/// may correct and retry. Invariant violations indicate a caller bug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Validation errors
    #[error("team '{team}' needs at least 2 players, got {got}")]
    RosterTooSmall { team: TeamName, got: usize },

    #[error("duplicate player '{0}' in roster")]
    DuplicatePlayer(PlayerName),

    #[error("empty player name in roster")]
    EmptyPlayerName,

    #[error("overs limit must be at least 1")]
    InvalidOversLimit,

    #[error("both teams are named '{0}'")]
    DuplicateTeamName(TeamName),

    #[error("toss winner '{0}' is not one of the two teams")]
    UnknownTossWinner(TeamName),

    // Invalid state
    #[error("expected {expected}, but the match is {actual}")]
    PhaseMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("no bowler has been selected for this over")]
    NoActiveBowler,

    #[error("no batsmen are at the crease")]
    NoBatsmen,

    #[error("innings is already closed")]
    InningsClosed,

    #[error("a wicket cannot be recorded on a wide or no-ball")]
    WicketOnExtra,

    #[error("a wide or no-ball cannot carry runs off the bat")]
    RunsOnExtra,

    #[error("run out requires the name of the dismissed batsman")]
    MissingRunOutBatsman,

    #[error("player '{0}' is not in the batting team's roster")]
    NotInBattingTeam(PlayerName),

    #[error("player '{0}' is not in the bowling team's roster")]
    NotInBowlingTeam(PlayerName),

    #[error("batsman '{0}' has already batted")]
    AlreadyBatted(PlayerName),

    #[error("opening batsmen must be two different players")]
    IdenticalOpeners,

    #[error("bowler '{0}' bowled the previous over")]
    ConsecutiveOver(PlayerName),

    #[error("match result has not been determined yet")]
    MatchNotComplete,

    // Invariant violations
    #[error("batsman '{0}' is not at the crease")]
    BatsmanNotAtCrease(PlayerName),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

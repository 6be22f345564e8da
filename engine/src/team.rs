//! Team rosters and the toss.

use crate::{error::Result, Error, PlayerName, TeamName};
use serde::{Deserialize, Serialize};

/// A validated team roster: a name and an ordered list of players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSheet {
    pub name: TeamName,
    pub players: Vec<PlayerName>,
}

impl TeamSheet {
    /// Build a roster, rejecting empty names, duplicates, and fewer than
    /// two players. Surrounding whitespace is trimmed.
    pub fn new(
        name: impl Into<TeamName>,
        players: impl IntoIterator<Item = impl Into<PlayerName>>,
    ) -> Result<Self> {
        let name = name.into();
        let mut cleaned: Vec<PlayerName> = Vec::new();
        for player in players {
            let player = player.into().trim().to_string();
            if player.is_empty() {
                return Err(Error::EmptyPlayerName);
            }
            if cleaned.contains(&player) {
                return Err(Error::DuplicatePlayer(player));
            }
            cleaned.push(player);
        }
        if cleaned.len() < 2 {
            return Err(Error::RosterTooSmall {
                team: name,
                got: cleaned.len(),
            });
        }
        Ok(Self {
            name,
            players: cleaned,
        })
    }

    pub fn contains(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    pub fn size(&self) -> u32 {
        self.players.len() as u32
    }
}

/// What the toss winner chose to do first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TossDecision {
    Bat,
    Bowl,
}

/// The toss outcome, supplied by the caller.
///
/// The coin flip itself lives outside the engine; the engine only consumes
/// its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toss {
    pub winner: TeamName,
    pub decision: TossDecision,
}

impl Toss {
    pub fn new(winner: impl Into<TeamName>, decision: TossDecision) -> Self {
        Self {
            winner: winner.into(),
            decision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_roster() {
        let team = TeamSheet::new("Lions", ["Asif", "Babar", "Rizwan"]).unwrap();
        assert_eq!(team.size(), 3);
        assert!(team.contains("Babar"));
        assert!(!team.contains("Kohli"));
    }

    #[test]
    fn trims_whitespace() {
        let team = TeamSheet::new("Lions", ["  Asif ", "Babar"]).unwrap();
        assert_eq!(team.players, vec!["Asif".to_string(), "Babar".to_string()]);
    }

    #[test]
    fn rejects_small_roster() {
        let err = TeamSheet::new("Lions", ["Asif"]).unwrap_err();
        assert_eq!(
            err,
            Error::RosterTooSmall {
                team: "Lions".into(),
                got: 1
            }
        );
    }

    #[test]
    fn rejects_duplicates() {
        let err = TeamSheet::new("Lions", ["Asif", "Asif"]).unwrap_err();
        assert_eq!(err, Error::DuplicatePlayer("Asif".into()));
    }

    #[test]
    fn rejects_empty_names() {
        let err = TeamSheet::new("Lions", ["Asif", "   "]).unwrap_err();
        assert_eq!(err, Error::EmptyPlayerName);
    }

    #[test]
    fn toss_serialization() {
        let toss = Toss::new("Lions", TossDecision::Bat);
        let json = serde_json::to_string(&toss).unwrap();
        assert!(json.contains("\"bat\""));
        let parsed: Toss = serde_json::from_str(&json).unwrap();
        assert_eq!(toss, parsed);
    }
}

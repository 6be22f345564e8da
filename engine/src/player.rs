//! Batting and bowling tally records.

use crate::{DismissalKind, PlayerName, Runs};
use serde::{Deserialize, Serialize};

/// One batsman's figures within a single innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batsman {
    pub name: PlayerName,
    pub runs: Runs,
    /// Legal balls faced. Wides and no-balls do not count.
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub out: bool,
    pub dismissal: Option<DismissalKind>,
}

impl Batsman {
    /// A batsman who has just walked in.
    pub fn new(name: impl Into<PlayerName>) -> Self {
        Self {
            name: name.into(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            out: false,
            dismissal: None,
        }
    }

    /// Record one legal delivery faced.
    pub(crate) fn record_ball(&mut self, runs: Runs) {
        self.runs += runs;
        self.balls += 1;
        if runs == 4 {
            self.fours += 1;
        } else if runs == 6 {
            self.sixes += 1;
        }
    }

    pub(crate) fn dismiss(&mut self, kind: DismissalKind) {
        self.out = true;
        self.dismissal = Some(kind);
    }

    /// Runs per 100 balls faced; 0 before the first ball.
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            f64::from(self.runs) / f64::from(self.balls) * 100.0
        }
    }
}

/// One bowler's figures within a single innings.
///
/// `overs` and `balls` together hold the balls bowled in overs-and-remainder
/// form; `balls` stays below 6 except transiently at an over boundary,
/// before the over is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bowler {
    pub name: PlayerName,
    pub overs: u32,
    pub balls: u32,
    /// Runs conceded, including the single run for each wide and no-ball.
    pub runs: Runs,
    pub wickets: u32,
    pub maidens: u32,
}

impl Bowler {
    pub fn new(name: impl Into<PlayerName>) -> Self {
        Self {
            name: name.into(),
            overs: 0,
            balls: 0,
            runs: 0,
            wickets: 0,
            maidens: 0,
        }
    }

    /// Total legal balls bowled.
    pub fn balls_bowled(&self) -> u32 {
        self.overs * 6 + self.balls
    }

    /// Convert the accumulated ball count back to overs and remainder.
    pub(crate) fn normalize_overs(&mut self) {
        let total = self.balls_bowled();
        self.overs = total / 6;
        self.balls = total % 6;
    }

    /// Runs conceded per 6 legal balls; 0 before the first ball.
    pub fn economy(&self) -> f64 {
        let balls = self.balls_bowled();
        if balls == 0 {
            0.0
        } else {
            f64::from(self.runs) / (f64::from(balls) / 6.0)
        }
    }

    /// Figures-style overs display, e.g. "3.4".
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.overs, self.balls)
    }
}

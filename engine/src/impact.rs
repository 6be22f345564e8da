//! Post-match performance-impact ranking.
//!
//! Consumes the two frozen innings of a completed match and aggregates
//! every player's batting and bowling contributions into a single impact
//! score. Rates are weighted by balls actually faced or bowled, never by
//! the number of scorecard entries.
//!
//! Scores:
//!
//! ```text
//! batting = runs + fours + 2*sixes + max(0, strikeRate - 120) * 0.7
//! bowling = wickets*18 + (economy > 0 ? 25 - economy*2.5 : 0) + maidens*8
//! impact  = (batting + bowling) * (1.25 if on the winning team)
//! ```
//!
//! Ties on impact go to the first player encountered during aggregation
//! (first-innings batting order onward) — deterministic, but an arbitrary
//! rule.

use crate::{InningsSummary, MatchResult, PlayerName, Runs, TeamName, TeamSheet};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How many ranked players a [`Ranking`] keeps by default.
pub const DEFAULT_TOP_PERFORMERS: usize = 3;

/// One player's aggregated match figures and impact score.
///
/// All exposed rates and scores are rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerImpact {
    pub name: PlayerName,
    /// The roster the player appears on; `None` when no roster lists the
    /// name. Never a fatal condition.
    pub team: Option<TeamName>,
    pub runs: Runs,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
    pub wickets: u32,
    pub maidens: u32,
    pub runs_conceded: Runs,
    pub balls_bowled: u32,
    pub economy: f64,
    pub batting_score: f64,
    pub bowling_score: f64,
    pub impact: f64,
}

/// The outcome of ranking a completed match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub player_of_match: PlayerImpact,
    pub top_performers: Vec<PlayerImpact>,
}

#[derive(Default)]
struct Tally {
    runs: Runs,
    balls_faced: u32,
    fours: u32,
    sixes: u32,
    wickets: u32,
    maidens: u32,
    runs_conceded: Runs,
    balls_bowled: u32,
}

/// Rank every player who appears in either innings.
///
/// Returns `None` only if the innings contain no players, which cannot
/// happen for a match produced by the scorer.
pub fn rank(
    first: &InningsSummary,
    second: &InningsSummary,
    rosters: &[TeamSheet; 2],
    result: &MatchResult,
    count: usize,
) -> Option<Ranking> {
    // Aggregation order fixes the tie-break, so keep a Vec rather than a
    // map.
    let mut names: Vec<PlayerName> = Vec::new();
    let mut tallies: Vec<Tally> = Vec::new();

    let mut entry = |names: &mut Vec<PlayerName>, tallies: &mut Vec<Tally>, name: &str| -> usize {
        match names.iter().position(|n| n == name) {
            Some(idx) => idx,
            None => {
                names.push(name.to_string());
                tallies.push(Tally::default());
                tallies.len() - 1
            }
        }
    };

    for innings in [first, second] {
        for batsman in &innings.batsmen {
            let idx = entry(&mut names, &mut tallies, &batsman.name);
            let tally = &mut tallies[idx];
            tally.runs += batsman.runs;
            tally.balls_faced += batsman.balls;
            tally.fours += batsman.fours;
            tally.sixes += batsman.sixes;
        }
        for bowler in &innings.bowlers {
            let idx = entry(&mut names, &mut tallies, &bowler.name);
            let tally = &mut tallies[idx];
            tally.wickets += bowler.wickets;
            tally.maidens += bowler.maidens;
            tally.runs_conceded += bowler.runs;
            tally.balls_bowled += bowler.balls_bowled();
        }
    }

    let winner = result.winner();
    let mut players: Vec<PlayerImpact> = names
        .into_iter()
        .zip(tallies)
        .map(|(name, tally)| score_player(name, &tally, rosters, winner))
        .collect();

    // Stable sort: equal impacts keep aggregation order.
    players.sort_by(|a, b| b.impact.partial_cmp(&a.impact).unwrap_or(Ordering::Equal));

    let player_of_match = players.first().cloned()?;
    players.truncate(count);
    Some(Ranking {
        player_of_match,
        top_performers: players,
    })
}

fn score_player(
    name: PlayerName,
    tally: &Tally,
    rosters: &[TeamSheet; 2],
    winner: Option<&TeamName>,
) -> PlayerImpact {
    let strike_rate = if tally.balls_faced == 0 {
        0.0
    } else {
        f64::from(tally.runs) / f64::from(tally.balls_faced) * 100.0
    };
    let economy = if tally.balls_bowled == 0 {
        0.0
    } else {
        f64::from(tally.runs_conceded) / (f64::from(tally.balls_bowled) / 6.0)
    };

    let batting_score = f64::from(tally.runs)
        + f64::from(tally.fours)
        + f64::from(tally.sixes) * 2.0
        + if strike_rate > 120.0 {
            (strike_rate - 120.0) * 0.7
        } else {
            0.0
        };
    let bowling_score = f64::from(tally.wickets) * 18.0
        + if economy > 0.0 { 25.0 - economy * 2.5 } else { 0.0 }
        + f64::from(tally.maidens) * 8.0;

    let team = rosters
        .iter()
        .find(|roster| roster.contains(&name))
        .map(|roster| roster.name.clone());
    let on_winning_team = matches!((team.as_ref(), winner), (Some(t), Some(w)) if t == w);
    let multiplier = if on_winning_team { 1.25 } else { 1.0 };
    let impact = (batting_score + bowling_score) * multiplier;

    PlayerImpact {
        name,
        team,
        runs: tally.runs,
        balls_faced: tally.balls_faced,
        fours: tally.fours,
        sixes: tally.sixes,
        strike_rate: round2(strike_rate),
        wickets: tally.wickets,
        maidens: tally.maidens,
        runs_conceded: tally.runs_conceded,
        balls_bowled: tally.balls_bowled,
        economy: round2(economy),
        batting_score: round2(batting_score),
        bowling_score: round2(bowling_score),
        impact: round2(impact),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

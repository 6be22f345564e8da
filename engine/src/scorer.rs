//! The match controller: a phase machine over two innings.
//!
//! [`MatchScorer`] owns the live [`Innings`] and sequences the whole match:
//! openers in, bowler in, balls scored, replacements brought on, innings
//! swapped at the break, and a verdict reached. Every public operation
//! checks the current [`MatchPhase`] first and returns a
//! [`PhaseMismatch`](Error::PhaseMismatch) when called out of turn, so the
//! scorer can never be driven into an inconsistent state.

use crate::{
    impact, DeliveryInput, DeliveryOutcome, Error, Innings, InningsNumber, InningsSummary,
    MatchResult, MatchSummary, PlayerName, Ranking, Result, Runs, TeamSheet, Toss, TossDecision,
};
use serde::{Deserialize, Serialize};

/// What the scorer is waiting for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchPhase {
    AwaitingOpeningBatsmen,
    AwaitingBowler,
    Scoring,
    AwaitingNewBatsman,
    AwaitingNewBowler,
    Complete,
}

impl MatchPhase {
    /// Short prose form, used in phase-mismatch errors.
    pub fn describe(self) -> &'static str {
        match self {
            MatchPhase::AwaitingOpeningBatsmen => "awaiting opening batsmen",
            MatchPhase::AwaitingBowler => "awaiting a bowler",
            MatchPhase::Scoring => "scoring a ball",
            MatchPhase::AwaitingNewBatsman => "awaiting a new batsman",
            MatchPhase::AwaitingNewBowler => "awaiting a new bowler",
            MatchPhase::Complete => "complete",
        }
    }
}

/// Drives a two-innings limited-overs match from toss to verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScorer {
    teams: [TeamSheet; 2],
    overs_limit: u32,
    toss: Toss,
    phase: MatchPhase,
    innings: Innings,
    first_innings: Option<InningsSummary>,
    second_innings: Option<InningsSummary>,
    target: Option<Runs>,
    result: Option<MatchResult>,
}

impl MatchScorer {
    /// Set up a match. The toss decides which side bats first; the first
    /// innings opens immediately, awaiting its opening batsmen.
    pub fn new(teams: [TeamSheet; 2], overs_limit: u32, toss: Toss) -> Result<Self> {
        if overs_limit == 0 {
            return Err(Error::InvalidOversLimit);
        }
        if teams[0].name == teams[1].name {
            return Err(Error::DuplicateTeamName(teams[0].name.clone()));
        }
        let winner_idx = teams
            .iter()
            .position(|t| t.name == toss.winner)
            .ok_or_else(|| Error::UnknownTossWinner(toss.winner.clone()))?;
        let batting_idx = match toss.decision {
            TossDecision::Bat => winner_idx,
            TossDecision::Bowl => 1 - winner_idx,
        };
        let batting = &teams[batting_idx];
        let bowling = &teams[1 - batting_idx];
        let innings = Innings::new(
            InningsNumber::First,
            batting.name.clone(),
            bowling.name.clone(),
            batting.size(),
            overs_limit,
            None,
        );
        Ok(Self {
            teams,
            overs_limit,
            toss,
            phase: MatchPhase::AwaitingOpeningBatsmen,
            innings,
            first_innings: None,
            second_innings: None,
            target: None,
            result: None,
        })
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// The innings currently in progress (or, once complete, the second).
    pub fn innings(&self) -> &Innings {
        &self.innings
    }

    pub fn teams(&self) -> &[TeamSheet; 2] {
        &self.teams
    }

    pub fn toss(&self) -> &Toss {
        &self.toss
    }

    pub fn overs_limit(&self) -> u32 {
        self.overs_limit
    }

    /// The chase target, set at the innings break.
    pub fn target(&self) -> Option<Runs> {
        self.target
    }

    pub fn first_innings(&self) -> Option<&InningsSummary> {
        self.first_innings.as_ref()
    }

    pub fn second_innings(&self) -> Option<&InningsSummary> {
        self.second_innings.as_ref()
    }

    /// The verdict, once the match is complete.
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    fn batting_sheet(&self) -> &TeamSheet {
        if self.teams[0].name == self.innings.batting_team {
            &self.teams[0]
        } else {
            &self.teams[1]
        }
    }

    fn bowling_sheet(&self) -> &TeamSheet {
        if self.teams[0].name == self.innings.bowling_team {
            &self.teams[0]
        } else {
            &self.teams[1]
        }
    }

    /// Batting-side players who have not yet batted this innings.
    pub fn available_batsmen(&self) -> Vec<&str> {
        self.batting_sheet()
            .players
            .iter()
            .map(String::as_str)
            .filter(|p| !self.innings.batsmen.iter().any(|b| b.name == *p))
            .collect()
    }

    /// Bowling-side players allowed to bowl the next over. Excludes the
    /// bowler of the previous over.
    pub fn eligible_bowlers(&self) -> Vec<&str> {
        self.bowling_sheet()
            .players
            .iter()
            .map(String::as_str)
            .filter(|p| self.innings.previous_bowler() != Some(*p))
            .collect()
    }

    fn require_phase(&self, expected: MatchPhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Error::PhaseMismatch {
                expected: expected.describe(),
                actual: self.phase.describe(),
            })
        }
    }

    fn require_batting_member(&self, name: &str) -> Result<()> {
        if self.batting_sheet().contains(name) {
            Ok(())
        } else {
            Err(Error::NotInBattingTeam(name.to_string()))
        }
    }

    /// Put the two opening batsmen at the crease.
    pub fn select_opening_batsmen(
        &mut self,
        striker: impl Into<PlayerName>,
        non_striker: impl Into<PlayerName>,
    ) -> Result<()> {
        self.require_phase(MatchPhase::AwaitingOpeningBatsmen)?;
        let striker = striker.into();
        let non_striker = non_striker.into();
        self.require_batting_member(&striker)?;
        self.require_batting_member(&non_striker)?;
        if striker == non_striker {
            return Err(Error::IdenticalOpeners);
        }
        self.innings.open_batting(striker, non_striker);
        self.phase = MatchPhase::AwaitingBowler;
        Ok(())
    }

    /// Hand the ball to `bowler` for the coming over.
    pub fn select_bowler(&mut self, bowler: impl Into<PlayerName>) -> Result<()> {
        if !matches!(
            self.phase,
            MatchPhase::AwaitingBowler | MatchPhase::AwaitingNewBowler
        ) {
            return Err(Error::PhaseMismatch {
                expected: MatchPhase::AwaitingBowler.describe(),
                actual: self.phase.describe(),
            });
        }
        let bowler = bowler.into();
        if !self.bowling_sheet().contains(&bowler) {
            return Err(Error::NotInBowlingTeam(bowler));
        }
        if self.innings.previous_bowler() == Some(bowler.as_str()) {
            return Err(Error::ConsecutiveOver(bowler));
        }
        self.innings.set_bowler(bowler);
        self.phase = MatchPhase::Scoring;
        Ok(())
    }

    /// Bring in the replacement for a fallen batsman.
    pub fn select_next_batsman(&mut self, batsman: impl Into<PlayerName>) -> Result<()> {
        self.require_phase(MatchPhase::AwaitingNewBatsman)?;
        let batsman = batsman.into();
        self.require_batting_member(&batsman)?;
        if self.innings.batsmen.iter().any(|b| b.name == batsman) {
            return Err(Error::AlreadyBatted(batsman));
        }
        self.innings.enter_batsman(batsman);
        if self.innings.over_break_pending() {
            // The wicket fell on the over's final ball; the break was held
            // until the newcomer arrived.
            match self.innings.resolve_over_break() {
                DeliveryOutcome::InningsComplete => self.conclude_innings(),
                _ => self.phase = MatchPhase::AwaitingNewBowler,
            }
        } else {
            self.phase = MatchPhase::Scoring;
        }
        Ok(())
    }

    /// Score one delivery. The returned outcome always agrees with the
    /// scorer's new phase.
    pub fn score_ball(&mut self, input: &DeliveryInput) -> Result<DeliveryOutcome> {
        self.require_phase(MatchPhase::Scoring)?;
        let outcome = self.innings.apply(input)?;
        match outcome {
            DeliveryOutcome::ContinueSameOver => Ok(outcome),
            DeliveryOutcome::NeedNewBowler => {
                self.phase = MatchPhase::AwaitingNewBowler;
                Ok(outcome)
            }
            DeliveryOutcome::NeedNewBatsman => {
                if self.available_batsmen().is_empty() {
                    // Nobody left to send in. Cannot happen with a validated
                    // roster, but never leave the scorer stuck waiting.
                    self.innings.force_close();
                    self.conclude_innings();
                    return Ok(DeliveryOutcome::InningsComplete);
                }
                self.phase = MatchPhase::AwaitingNewBatsman;
                Ok(outcome)
            }
            DeliveryOutcome::AwaitWithinOver => {
                // Last batsman standing took the wicket on the over's final
                // ball: no replacement is due, so resolve the break now.
                match self.innings.resolve_over_break() {
                    DeliveryOutcome::InningsComplete => {
                        self.conclude_innings();
                        Ok(DeliveryOutcome::InningsComplete)
                    }
                    _ => {
                        self.phase = MatchPhase::AwaitingNewBowler;
                        Ok(DeliveryOutcome::NeedNewBowler)
                    }
                }
            }
            DeliveryOutcome::InningsComplete => {
                self.conclude_innings();
                Ok(outcome)
            }
        }
    }

    /// Manual strike correction between deliveries.
    pub fn switch_strike(&mut self) -> Result<()> {
        self.require_phase(MatchPhase::Scoring)?;
        self.innings.switch_strike();
        Ok(())
    }

    fn conclude_innings(&mut self) {
        let summary = InningsSummary::from_innings(&self.innings);
        match self.innings.number {
            InningsNumber::First => {
                let target = summary.total + 1;
                self.target = Some(target);
                let chasing = self.bowling_sheet();
                let second = Innings::new(
                    InningsNumber::Second,
                    chasing.name.clone(),
                    self.innings.batting_team.clone(),
                    chasing.size(),
                    self.overs_limit,
                    Some(target),
                );
                self.first_innings = Some(summary);
                self.innings = second;
                self.phase = MatchPhase::AwaitingOpeningBatsmen;
            }
            InningsNumber::Second => {
                self.result = Some(self.decide_result(&summary));
                self.second_innings = Some(summary);
                self.phase = MatchPhase::Complete;
            }
        }
    }

    fn decide_result(&self, second: &InningsSummary) -> MatchResult {
        let first_total = self
            .first_innings
            .as_ref()
            .map(|s| s.total)
            .unwrap_or_default();
        if self.target.is_some_and(|t| second.total >= t) {
            MatchResult::WonByWickets {
                team: second.batting_team.clone(),
                margin: self.innings.wickets_remaining(),
            }
        } else if first_total > second.total {
            MatchResult::WonByRuns {
                team: second.bowling_team.clone(),
                margin: first_total - second.total,
            }
        } else {
            MatchResult::Tied
        }
    }

    /// Rank every participant of a completed match.
    pub fn performance_ranking(&self, count: usize) -> Result<Ranking> {
        let (Some(first), Some(second), Some(result)) = (
            self.first_innings.as_ref(),
            self.second_innings.as_ref(),
            self.result.as_ref(),
        ) else {
            return Err(Error::MatchNotComplete);
        };
        impact::rank(first, second, &self.teams, result, count).ok_or(Error::MatchNotComplete)
    }

    /// The full frozen record of a completed match.
    pub fn summary(&self) -> Result<MatchSummary> {
        let ranking = self.performance_ranking(impact::DEFAULT_TOP_PERFORMERS)?;
        let (Some(first), Some(second), Some(result), Some(target)) = (
            self.first_innings.clone(),
            self.second_innings.clone(),
            self.result.clone(),
            self.target,
        ) else {
            return Err(Error::MatchNotComplete);
        };
        Ok(MatchSummary {
            teams: [self.teams[0].name.clone(), self.teams[1].name.clone()],
            overs_limit: self.overs_limit,
            toss: self.toss.clone(),
            target,
            first_innings: first,
            second_innings: second,
            result,
            player_of_match: ranking.player_of_match,
            top_performers: ranking.top_performers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DismissalKind;

    fn teams() -> [TeamSheet; 2] {
        [
            TeamSheet::new("Lions", ["Asif", "Babar", "Rizwan"]).unwrap(),
            TeamSheet::new("Tigers", ["Finch", "Warner", "Smith"]).unwrap(),
        ]
    }

    fn scorer(overs: u32) -> MatchScorer {
        MatchScorer::new(teams(), overs, Toss::new("Lions", TossDecision::Bat)).unwrap()
    }

    #[test]
    fn toss_decides_the_batting_side() {
        let m = scorer(2);
        assert_eq!(m.innings().batting_team, "Lions");

        let m = MatchScorer::new(teams(), 2, Toss::new("Lions", TossDecision::Bowl)).unwrap();
        assert_eq!(m.innings().batting_team, "Tigers");

        let m = MatchScorer::new(teams(), 2, Toss::new("Tigers", TossDecision::Bat)).unwrap();
        assert_eq!(m.innings().batting_team, "Tigers");
    }

    #[test]
    fn rejects_invalid_setup() {
        assert_eq!(
            MatchScorer::new(teams(), 0, Toss::new("Lions", TossDecision::Bat)).unwrap_err(),
            Error::InvalidOversLimit
        );

        let same = [
            TeamSheet::new("Lions", ["A", "B"]).unwrap(),
            TeamSheet::new("Lions", ["C", "D"]).unwrap(),
        ];
        assert_eq!(
            MatchScorer::new(same, 2, Toss::new("Lions", TossDecision::Bat)).unwrap_err(),
            Error::DuplicateTeamName("Lions".into())
        );

        assert_eq!(
            MatchScorer::new(teams(), 2, Toss::new("Eagles", TossDecision::Bat)).unwrap_err(),
            Error::UnknownTossWinner("Eagles".into())
        );
    }

    #[test]
    fn operations_are_phase_gated() {
        let mut m = scorer(2);
        assert_eq!(
            m.score_ball(&DeliveryInput::dot()).unwrap_err(),
            Error::PhaseMismatch {
                expected: "scoring a ball",
                actual: "awaiting opening batsmen",
            }
        );
        assert_eq!(
            m.select_bowler("Finch").unwrap_err(),
            Error::PhaseMismatch {
                expected: "awaiting a bowler",
                actual: "awaiting opening batsmen",
            }
        );
        assert!(m.switch_strike().is_err());
    }

    #[test]
    fn opener_validation() {
        let mut m = scorer(2);
        assert_eq!(
            m.select_opening_batsmen("Finch", "Asif").unwrap_err(),
            Error::NotInBattingTeam("Finch".into())
        );
        assert_eq!(
            m.select_opening_batsmen("Asif", "Asif").unwrap_err(),
            Error::IdenticalOpeners
        );
        m.select_opening_batsmen("Asif", "Babar").unwrap();
        assert_eq!(m.phase(), MatchPhase::AwaitingBowler);
    }

    #[test]
    fn bowler_validation_and_rotation() {
        let mut m = scorer(2);
        m.select_opening_batsmen("Asif", "Babar").unwrap();
        assert_eq!(
            m.select_bowler("Asif").unwrap_err(),
            Error::NotInBowlingTeam("Asif".into())
        );
        m.select_bowler("Finch").unwrap();

        for _ in 0..6 {
            m.score_ball(&DeliveryInput::dot()).unwrap();
        }
        assert_eq!(m.phase(), MatchPhase::AwaitingNewBowler);
        assert!(!m.eligible_bowlers().contains(&"Finch"));
        assert_eq!(
            m.select_bowler("Finch").unwrap_err(),
            Error::ConsecutiveOver("Finch".into())
        );
        m.select_bowler("Warner").unwrap();
        assert_eq!(m.phase(), MatchPhase::Scoring);
    }

    #[test]
    fn replacement_batsman_flow() {
        let mut m = scorer(2);
        m.select_opening_batsmen("Asif", "Babar").unwrap();
        m.select_bowler("Finch").unwrap();
        assert_eq!(m.available_batsmen(), vec!["Rizwan"]);

        m.score_ball(&DeliveryInput::wicket(DismissalKind::Bowled))
            .unwrap();
        assert_eq!(m.phase(), MatchPhase::AwaitingNewBatsman);
        assert_eq!(
            m.select_next_batsman("Asif").unwrap_err(),
            Error::AlreadyBatted("Asif".into())
        );
        m.select_next_batsman("Rizwan").unwrap();
        assert_eq!(m.phase(), MatchPhase::Scoring);
        assert!(m.available_batsmen().is_empty());
    }

    #[test]
    fn wicket_on_final_ball_defers_the_over_break() {
        let mut m = scorer(2);
        m.select_opening_batsmen("Asif", "Babar").unwrap();
        m.select_bowler("Finch").unwrap();
        for _ in 0..5 {
            m.score_ball(&DeliveryInput::dot()).unwrap();
        }
        m.score_ball(&DeliveryInput::wicket(DismissalKind::Caught))
            .unwrap();
        assert_eq!(m.phase(), MatchPhase::AwaitingNewBatsman);

        // The over break resolves only once the newcomer is in.
        m.select_next_batsman("Rizwan").unwrap();
        assert_eq!(m.phase(), MatchPhase::AwaitingNewBowler);
        assert_eq!(m.innings().over_number, 1);
    }

    #[test]
    fn chase_win_by_wickets() {
        let mut m = scorer(1);
        m.select_opening_batsmen("Asif", "Babar").unwrap();
        m.select_bowler("Finch").unwrap();
        for runs in [4, 6, 0, 0, 2, 1] {
            m.score_ball(&DeliveryInput::runs(runs)).unwrap();
        }
        assert_eq!(m.phase(), MatchPhase::AwaitingOpeningBatsmen);
        assert_eq!(m.target(), Some(14));
        assert_eq!(m.first_innings().unwrap().total, 13);
        assert_eq!(m.innings().batting_team, "Tigers");

        m.select_opening_batsmen("Finch", "Warner").unwrap();
        m.select_bowler("Asif").unwrap();
        m.score_ball(&DeliveryInput::runs(6)).unwrap();
        m.score_ball(&DeliveryInput::runs(6)).unwrap();
        let outcome = m.score_ball(&DeliveryInput::runs(2)).unwrap();
        assert_eq!(outcome, DeliveryOutcome::InningsComplete);
        assert_eq!(m.phase(), MatchPhase::Complete);
        assert_eq!(
            m.result(),
            Some(&MatchResult::WonByWickets {
                team: "Tigers".into(),
                margin: 3,
            })
        );

        let summary = m.summary().unwrap();
        assert_eq!(summary.target, 14);
        assert_eq!(summary.second_innings.total, 14);
        assert_eq!(summary.player_of_match.name, "Finch");
        assert_eq!(summary.player_of_match.team.as_deref(), Some("Tigers"));
    }

    #[test]
    fn defended_total_wins_by_runs() {
        let mut m = scorer(1);
        m.select_opening_batsmen("Asif", "Babar").unwrap();
        m.select_bowler("Finch").unwrap();
        for runs in [2, 0, 0, 0, 0, 0] {
            m.score_ball(&DeliveryInput::runs(runs)).unwrap();
        }
        m.select_opening_batsmen("Finch", "Warner").unwrap();
        m.select_bowler("Asif").unwrap();
        for _ in 0..6 {
            m.score_ball(&DeliveryInput::dot()).unwrap();
        }
        assert_eq!(
            m.result(),
            Some(&MatchResult::WonByRuns {
                team: "Lions".into(),
                margin: 2,
            })
        );
    }

    #[test]
    fn equal_totals_tie() {
        let mut m = scorer(1);
        m.select_opening_batsmen("Asif", "Babar").unwrap();
        m.select_bowler("Finch").unwrap();
        for runs in [2, 0, 0, 0, 0, 0] {
            m.score_ball(&DeliveryInput::runs(runs)).unwrap();
        }
        m.select_opening_batsmen("Finch", "Warner").unwrap();
        m.select_bowler("Asif").unwrap();
        for runs in [0, 2, 0, 0, 0, 0] {
            m.score_ball(&DeliveryInput::runs(runs)).unwrap();
        }
        assert_eq!(m.result(), Some(&MatchResult::Tied));
    }

    #[test]
    fn summary_requires_a_complete_match() {
        let m = scorer(2);
        assert_eq!(m.summary().unwrap_err(), Error::MatchNotComplete);
        assert_eq!(m.performance_ranking(3).unwrap_err(), Error::MatchNotComplete);
    }

    #[test]
    fn scorer_serialization_roundtrip() {
        let mut m = scorer(2);
        m.select_opening_batsmen("Asif", "Babar").unwrap();
        m.select_bowler("Finch").unwrap();
        m.score_ball(&DeliveryInput::runs(4)).unwrap();

        let json = serde_json::to_string(&m).unwrap();
        let parsed: MatchScorer = serde_json::from_str(&json).unwrap();
        assert_eq!(m, parsed);
    }
}

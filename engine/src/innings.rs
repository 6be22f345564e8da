//! One team's batting turn, and the delivery processor that advances it.
//!
//! [`Innings::apply`] is the heart of the engine: it consumes one
//! [`DeliveryInput`], performs every downstream state change in a fixed
//! order, and hands back a [`DeliveryOutcome`] telling the controller what
//! is required next. All validation happens before the first mutation, so a
//! failed call leaves the innings exactly as it was.

use crate::{
    delivery::WicketInput, error::Result, Batsman, Bowler, Delivery, DeliveryInput,
    DeliveryOutcome, Error, ExtraKind, PlayerName, Runs, TeamName,
};
use serde::{Deserialize, Serialize};

/// Legal balls per over.
pub const BALLS_PER_OVER: u8 = 6;

/// Which of the match's two innings this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InningsNumber {
    First,
    Second,
}

/// The live state of one innings.
///
/// Striker and non-striker are indices into `batsmen`; `None` marks a
/// vacancy awaiting the next batsman (or, for the non-striker, the
/// single-batsman-remaining mode where no partner exists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Innings {
    pub number: InningsNumber,
    pub batting_team: TeamName,
    pub bowling_team: TeamName,
    roster_size: u32,
    overs_limit: u32,
    /// Second innings only: the score that wins the chase.
    pub target: Option<Runs>,
    pub total: Runs,
    pub wickets: u32,
    pub over_number: u32,
    pub balls_in_over: u8,
    pub deliveries: Vec<Delivery>,
    pub batsmen: Vec<Batsman>,
    striker: Option<usize>,
    non_striker: Option<usize>,
    pub bowlers: Vec<Bowler>,
    current_bowler: Option<usize>,
    previous_bowler: Option<PlayerName>,
    pub free_hit: bool,
    over_break_pending: bool,
    closed: bool,
}

impl Innings {
    pub(crate) fn new(
        number: InningsNumber,
        batting_team: impl Into<TeamName>,
        bowling_team: impl Into<TeamName>,
        roster_size: u32,
        overs_limit: u32,
        target: Option<Runs>,
    ) -> Self {
        Self {
            number,
            batting_team: batting_team.into(),
            bowling_team: bowling_team.into(),
            roster_size,
            overs_limit,
            target,
            total: 0,
            wickets: 0,
            over_number: 0,
            balls_in_over: 0,
            deliveries: Vec::new(),
            batsmen: Vec::new(),
            striker: None,
            non_striker: None,
            bowlers: Vec::new(),
            current_bowler: None,
            previous_bowler: None,
            free_hit: false,
            over_break_pending: false,
            closed: false,
        }
    }

    /// The batsman currently on strike.
    pub fn striker(&self) -> Option<&Batsman> {
        self.striker.map(|i| &self.batsmen[i])
    }

    /// The batsman at the other end, if one exists.
    pub fn non_striker(&self) -> Option<&Batsman> {
        self.non_striker.map(|i| &self.batsmen[i])
    }

    /// The bowler of the over in progress.
    pub fn current_bowler(&self) -> Option<&Bowler> {
        self.current_bowler.map(|i| &self.bowlers[i])
    }

    /// The bowler who bowled the previous over, excluded from the next
    /// selection.
    pub fn previous_bowler(&self) -> Option<&str> {
        self.previous_bowler.as_deref()
    }

    /// Batsmen still available to be dismissed.
    pub fn wickets_remaining(&self) -> u32 {
        self.roster_size - self.wickets
    }

    pub fn roster_size(&self) -> u32 {
        self.roster_size
    }

    pub fn overs_limit(&self) -> u32 {
        self.overs_limit
    }

    /// Whether the innings has ended.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Figures-style progress display, e.g. "12.4".
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.over_number, self.balls_in_over)
    }

    /// Runs per over so far; 0 before the first legal ball.
    pub fn run_rate(&self) -> f64 {
        let balls = self.over_number * 6 + u32::from(self.balls_in_over);
        if balls == 0 {
            0.0
        } else {
            f64::from(self.total) / f64::from(balls) * 6.0
        }
    }

    pub(crate) fn over_break_pending(&self) -> bool {
        self.over_break_pending
    }

    /// Put the two opening batsmen at the crease.
    pub(crate) fn open_batting(&mut self, striker: PlayerName, non_striker: PlayerName) {
        self.batsmen.push(Batsman::new(striker));
        self.batsmen.push(Batsman::new(non_striker));
        self.striker = Some(0);
        self.non_striker = Some(1);
    }

    /// Hand the ball to `bowler` for the over about to start, creating the
    /// tally record on first appearance.
    pub(crate) fn set_bowler(&mut self, bowler: PlayerName) {
        let idx = match self.bowlers.iter().position(|b| b.name == bowler) {
            Some(idx) => idx,
            None => {
                self.bowlers.push(Bowler::new(bowler.clone()));
                self.bowlers.len() - 1
            }
        };
        self.current_bowler = Some(idx);
        self.previous_bowler = Some(bowler);
    }

    /// Bring in a replacement batsman at the vacant end.
    ///
    /// If neither end is flagged vacant (re-entry edge case), the newcomer
    /// takes the end held by the most recently dismissed batsman.
    pub(crate) fn enter_batsman(&mut self, name: PlayerName) {
        self.batsmen.push(Batsman::new(name));
        let idx = self.batsmen.len() - 1;
        if self.striker.is_none() {
            self.striker = Some(idx);
        } else if self.non_striker.is_none() {
            self.non_striker = Some(idx);
        } else if self.striker.map(|i| self.batsmen[i].out) == Some(true) {
            self.striker = Some(idx);
        } else {
            self.non_striker = Some(idx);
        }
    }

    fn rotate_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    /// Manual strike correction, mirroring the scorer's switch-strike
    /// control. A no-op when only one batsman remains.
    pub(crate) fn switch_strike(&mut self) {
        if self.non_striker.is_some() {
            self.rotate_strike();
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }

    /// Force the innings shut without a qualifying ball. Used only for the
    /// defensive roster-exhausted terminal case.
    pub(crate) fn force_close(&mut self) {
        self.close();
    }

    fn target_reached(&self) -> bool {
        self.number == InningsNumber::Second
            && self.target.is_some_and(|t| self.total >= t)
    }

    /// Apply one delivery and report what the controller must do next.
    pub(crate) fn apply(&mut self, input: &DeliveryInput) -> Result<DeliveryOutcome> {
        // Validate everything up front; no partial mutation on failure.
        if self.closed {
            return Err(Error::InningsClosed);
        }
        let bowler_idx = self.current_bowler.ok_or(Error::NoActiveBowler)?;
        let striker_idx = self.striker.ok_or(Error::NoBatsmen)?;
        if input.extra.is_some() && input.runs != 0 {
            return Err(Error::RunsOnExtra);
        }
        if let Some(wicket) = &input.wicket {
            if input.extra.is_some() {
                return Err(Error::WicketOnExtra);
            }
            if wicket.kind.is_run_out() {
                let name = wicket
                    .run_out_batsman
                    .as_ref()
                    .ok_or(Error::MissingRunOutBatsman)?;
                let at_crease = self.batsmen[striker_idx].name == *name
                    || self.non_striker.is_some_and(|i| self.batsmen[i].name == *name);
                if !at_crease {
                    return Err(Error::BatsmanNotAtCrease(name.clone()));
                }
            }
        }

        let legal = input.is_legal();
        if legal {
            self.balls_in_over += 1;
        }

        // Bowler tally: each extra costs exactly 1, bat runs only on legal
        // deliveries.
        {
            let bowler = &mut self.bowlers[bowler_idx];
            if legal {
                bowler.balls += 1;
            }
            bowler.runs += if input.extra.is_some() { 1 } else { input.runs };
        }

        if legal {
            self.batsmen[striker_idx].record_ball(input.runs);
        }

        self.total += if input.extra.is_some() { 1 } else { input.runs };

        // Free-hit gate: only a run out survives, and the flag clears
        // whatever happens on this ball.
        let mut wicket = input.wicket.clone();
        if self.free_hit {
            if let Some(w) = &wicket {
                if !w.kind.is_run_out() {
                    wicket = None;
                }
            }
            self.free_hit = false;
        }
        if input.extra == Some(ExtraKind::NoBall) {
            self.free_hit = true;
        }

        // Log after the free-hit adjustment so a nullified dismissal shows
        // as no wicket.
        self.deliveries.push(Delivery {
            over: self.over_number,
            ball: self.balls_in_over,
            striker: self.batsmen[striker_idx].name.clone(),
            bowler: self.bowlers[bowler_idx].name.clone(),
            runs: input.runs,
            wicket: wicket.as_ref().map(|w| w.kind),
            extra: input.extra,
        });

        if let Some(wicket) = wicket {
            return Ok(self.handle_wicket(&wicket, input.runs, striker_idx, bowler_idx));
        }

        // Second innings: the chase can end mid-over.
        if self.target_reached() {
            self.close();
            return Ok(DeliveryOutcome::InningsComplete);
        }

        if self.wickets_remaining() > 1
            && input.runs % 2 == 1
            && input.extra != Some(ExtraKind::Wide)
        {
            self.rotate_strike();
        }

        if self.balls_in_over >= BALLS_PER_OVER {
            self.finish_over();
            if self.wickets_remaining() > 1 {
                self.rotate_strike();
            }
            if self.innings_over() {
                self.close();
                return Ok(DeliveryOutcome::InningsComplete);
            }
            return Ok(DeliveryOutcome::NeedNewBowler);
        }

        Ok(DeliveryOutcome::ContinueSameOver)
    }

    fn handle_wicket(
        &mut self,
        wicket: &WicketInput,
        runs: Runs,
        striker_idx: usize,
        bowler_idx: usize,
    ) -> DeliveryOutcome {
        self.wickets += 1;

        let run_out = wicket.kind.is_run_out();
        let out_idx = if run_out {
            // Validated at the top of apply(): the name is at the crease.
            let name = wicket.run_out_batsman.as_deref().unwrap_or_default();
            if self.batsmen[striker_idx].name == name {
                striker_idx
            } else {
                self.non_striker.unwrap_or(striker_idx)
            }
        } else {
            striker_idx
        };
        self.batsmen[out_idx].dismiss(wicket.kind);
        if !run_out {
            self.bowlers[bowler_idx].wickets += 1;
        }

        if self.wickets >= self.roster_size {
            self.close();
            return DeliveryOutcome::InningsComplete;
        }

        if self.wickets_remaining() == 1 {
            // Last batsman standing: the survivor takes strike, no partner.
            let survivor = if out_idx == striker_idx {
                self.non_striker
            } else {
                Some(striker_idx)
            };
            self.striker = survivor;
            self.non_striker = None;
            if self.balls_in_over >= BALLS_PER_OVER {
                self.over_break_pending = true;
                return DeliveryOutcome::AwaitWithinOver;
            }
            return DeliveryOutcome::ContinueSameOver;
        }

        // A replacement is due: work out which end is vacant. For run outs
        // the surviving batsman keeps the end implied by run parity.
        if run_out {
            let odd = runs % 2 == 1;
            if out_idx == striker_idx {
                if odd {
                    self.striker = self.non_striker;
                    self.non_striker = None;
                } else {
                    self.striker = None;
                }
            } else if odd {
                self.non_striker = Some(striker_idx);
                self.striker = None;
            } else {
                self.non_striker = None;
            }
        } else {
            self.striker = None;
        }

        if self.balls_in_over >= BALLS_PER_OVER {
            self.over_break_pending = true;
            // Pre-rotate so the ends are already correct for the next over
            // once the newcomer fills the vacancy.
            self.rotate_strike();
        }
        DeliveryOutcome::NeedNewBatsman
    }

    /// Over-completion bookkeeping: finalize the bowler's over, detect a
    /// maiden, and advance the over counter.
    fn finish_over(&mut self) {
        if let Some(idx) = self.current_bowler {
            let over_runs: Runs = self
                .deliveries
                .iter()
                .rev()
                .filter(|d| d.is_legal())
                .take(usize::from(BALLS_PER_OVER))
                .map(|d| d.runs)
                .sum();
            let bowler = &mut self.bowlers[idx];
            bowler.normalize_overs();
            if over_runs == 0 {
                bowler.maidens += 1;
            }
        }
        self.over_number += 1;
        self.balls_in_over = 0;
    }

    /// Resolve an over boundary that was deferred by a wicket on the over's
    /// final ball. Strike was already settled at the wicket.
    pub(crate) fn resolve_over_break(&mut self) -> DeliveryOutcome {
        self.over_break_pending = false;
        self.finish_over();
        if self.innings_over() {
            self.close();
            return DeliveryOutcome::InningsComplete;
        }
        DeliveryOutcome::NeedNewBowler
    }

    fn innings_over(&self) -> bool {
        self.over_number >= self.overs_limit
            || self.wickets >= self.roster_size
            || self.target_reached()
    }
}

//! Delivery types: the input for one ball, the logged record, and the
//! signal the processor hands back to the controller.
//!
//! A delivery is the engine's unit of change. Callers never mutate an
//! innings directly; they describe one ball's outcome as a [`DeliveryInput`]
//! and the processor derives every downstream state change from it.

use crate::{PlayerName, Runs};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of illegal delivery.
///
/// Both concede exactly 1 run and neither counts toward the over's six
/// legal balls. Runs beyond the mandatory single are deliberately out of
/// scope for extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtraKind {
    Wide,
    NoBall,
}

/// How a batsman was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DismissalKind {
    Bowled,
    Caught,
    Lbw,
    Stumped,
    HitWicket,
    RunOut,
}

impl DismissalKind {
    /// Run outs are the only dismissal not credited to the bowler, and the
    /// only dismissal that stands on a free hit.
    pub fn is_run_out(&self) -> bool {
        matches!(self, DismissalKind::RunOut)
    }
}

impl fmt::Display for DismissalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DismissalKind::Bowled => "bowled",
            DismissalKind::Caught => "caught",
            DismissalKind::Lbw => "lbw",
            DismissalKind::Stumped => "stumped",
            DismissalKind::HitWicket => "hit wicket",
            DismissalKind::RunOut => "run out",
        };
        f.write_str(s)
    }
}

/// A wicket claimed on a delivery.
///
/// `run_out_batsman` is required for run outs (either batsman at the crease
/// may be out, regardless of who was on strike) and ignored otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WicketInput {
    pub kind: DismissalKind,
    pub run_out_batsman: Option<PlayerName>,
}

/// One ball's outcome, as reported by the caller.
///
/// `runs` is runs off the bat — or, for a run out, the runs completed
/// before the wicket fell. Extras carry no bat runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInput {
    pub runs: Runs,
    pub extra: Option<ExtraKind>,
    pub wicket: Option<WicketInput>,
}

impl DeliveryInput {
    /// A legal delivery scoring `runs` off the bat.
    pub fn runs(runs: Runs) -> Self {
        Self {
            runs,
            extra: None,
            wicket: None,
        }
    }

    /// A legal delivery with no runs.
    pub fn dot() -> Self {
        Self::runs(0)
    }

    /// A wide.
    pub fn wide() -> Self {
        Self {
            runs: 0,
            extra: Some(ExtraKind::Wide),
            wicket: None,
        }
    }

    /// A no-ball. The next delivery becomes a free hit.
    pub fn no_ball() -> Self {
        Self {
            runs: 0,
            extra: Some(ExtraKind::NoBall),
            wicket: None,
        }
    }

    /// A wicket falling to the bowler (any dismissal except run out).
    pub fn wicket(kind: DismissalKind) -> Self {
        Self {
            runs: 0,
            extra: None,
            wicket: Some(WicketInput {
                kind,
                run_out_batsman: None,
            }),
        }
    }

    /// A run out of `batsman` after `runs` completed runs.
    pub fn run_out(runs: Runs, batsman: impl Into<PlayerName>) -> Self {
        Self {
            runs,
            extra: None,
            wicket: Some(WicketInput {
                kind: DismissalKind::RunOut,
                run_out_batsman: Some(batsman.into()),
            }),
        }
    }

    /// Whether this delivery counts toward the over's six legal balls.
    pub fn is_legal(&self) -> bool {
        self.extra.is_none()
    }
}

/// One ball as recorded in the innings log.
///
/// The wicket field reflects the free-hit adjustment: a dismissal nullified
/// by a free hit is logged as no wicket. Extras repeat the previous legal
/// ball's number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub over: u32,
    pub ball: u8,
    pub striker: PlayerName,
    pub bowler: PlayerName,
    pub runs: Runs,
    pub wicket: Option<DismissalKind>,
    pub extra: Option<ExtraKind>,
}

impl Delivery {
    /// Whether this delivery counted toward the over.
    pub fn is_legal(&self) -> bool {
        self.extra.is_none()
    }
}

/// What the controller must do next after a delivery is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryOutcome {
    /// Keep scoring: the over is still in progress.
    ContinueSameOver,
    /// A wicket fell and a replacement batsman must be selected.
    NeedNewBatsman,
    /// The over is complete; a bowler must be selected for the next one.
    NeedNewBowler,
    /// The last batsman fell on the over's final ball: no replacement is
    /// due, but the deferred over boundary must be resolved before play.
    AwaitWithinOver,
    /// The innings is over.
    InningsComplete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let ball = DeliveryInput::runs(4);
        assert_eq!(ball.runs, 4);
        assert!(ball.is_legal());
        assert!(ball.wicket.is_none());

        let wide = DeliveryInput::wide();
        assert_eq!(wide.extra, Some(ExtraKind::Wide));
        assert!(!wide.is_legal());

        let wicket = DeliveryInput::wicket(DismissalKind::Bowled);
        assert_eq!(wicket.wicket.as_ref().unwrap().kind, DismissalKind::Bowled);
        assert!(wicket.wicket.as_ref().unwrap().run_out_batsman.is_none());

        let run_out = DeliveryInput::run_out(1, "Asif");
        assert!(run_out.wicket.as_ref().unwrap().kind.is_run_out());
        assert_eq!(
            run_out.wicket.as_ref().unwrap().run_out_batsman.as_deref(),
            Some("Asif")
        );
    }

    #[test]
    fn dismissal_display() {
        assert_eq!(DismissalKind::Bowled.to_string(), "bowled");
        assert_eq!(DismissalKind::HitWicket.to_string(), "hit wicket");
        assert_eq!(DismissalKind::RunOut.to_string(), "run out");
    }

    #[test]
    fn only_run_out_skips_bowler_credit() {
        assert!(DismissalKind::RunOut.is_run_out());
        assert!(!DismissalKind::Caught.is_run_out());
        assert!(!DismissalKind::Stumped.is_run_out());
    }

    #[test]
    fn serialization_format() {
        let input = DeliveryInput::no_ball();
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"noBall\""));

        let record = Delivery {
            over: 3,
            ball: 2,
            striker: "Rohit".into(),
            bowler: "Starc".into(),
            runs: 6,
            wicket: None,
            extra: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"striker\":\"Rohit\""));

        let parsed: Delivery = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }

    #[test]
    fn serialization_roundtrip_input() {
        let input = DeliveryInput::run_out(2, "Dhoni");
        let json = serde_json::to_string(&input).unwrap();
        let parsed: DeliveryInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, parsed);
    }
}

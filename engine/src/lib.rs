//! # Crease Engine
//!
//! A deterministic ball-by-ball scoring engine for limited-overs cricket.
//!
//! This crate provides the core logic for scoring a two-innings match:
//! rosters and the toss, delivery processing, strike rotation, overs and
//! bowling figures, dismissals, the chase, and the final verdict with a
//! performance ranking. The same delivery sequence always produces the same
//! match state.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of files, network, or platform
//! - **Deterministic**: Same inputs always produce same outputs
//! - **Testable**: Pure logic, no mocks needed
//! - **Fail-safe**: Invalid input is rejected before any state changes
//!
//! ## Core Concepts
//!
//! ### Deliveries
//!
//! Changes are expressed as deliveries, not direct mutations. Each
//! [`DeliveryInput`] describes one ball: runs off the bat, an optional
//! extra (wide or no-ball), and an optional wicket. The processor derives
//! every downstream state change from it and answers with a
//! [`DeliveryOutcome`] telling the caller what happens next.
//!
//! ### Phases
//!
//! The [`MatchScorer`] sequences the match through [`MatchPhase`]s:
//! opening batsmen in, bowler in, balls scored, replacements between
//! wickets and overs, the innings break, and completion. Operations called
//! out of phase fail without touching state.
//!
//! ### The Verdict
//!
//! Once both innings close, the scorer decides the [`MatchResult`] and can
//! produce a [`MatchSummary`] with full scorecards, the player of the
//! match, and a ranked list of top performers.
//!
//! ## Quick Start
//!
//! ```rust
//! use crease_engine::{DeliveryInput, MatchScorer, TeamSheet, Toss, TossDecision};
//!
//! let teams = [
//!     TeamSheet::new("Lions", ["Asif", "Babar"]).unwrap(),
//!     TeamSheet::new("Tigers", ["Finch", "Warner"]).unwrap(),
//! ];
//! let mut scorer = MatchScorer::new(teams, 1, Toss::new("Lions", TossDecision::Bat)).unwrap();
//!
//! // First innings: one over.
//! scorer.select_opening_batsmen("Asif", "Babar").unwrap();
//! scorer.select_bowler("Finch").unwrap();
//! for runs in [1, 0, 4, 0, 1, 0] {
//!     scorer.score_ball(&DeliveryInput::runs(runs)).unwrap();
//! }
//! assert_eq!(scorer.target(), Some(7));
//!
//! // The chase.
//! scorer.select_opening_batsmen("Finch", "Warner").unwrap();
//! scorer.select_bowler("Asif").unwrap();
//! scorer.score_ball(&DeliveryInput::runs(6)).unwrap();
//! scorer.score_ball(&DeliveryInput::runs(1)).unwrap();
//!
//! let summary = scorer.summary().unwrap();
//! assert_eq!(summary.result.to_string(), "Tigers won by 2 wickets");
//! assert_eq!(summary.player_of_match.name, "Finch");
//! ```
//!
//! ## Persistence
//!
//! Every engine type serializes to JSON via serde, [`MatchScorer`]
//! included, so a match can be snapshotted mid-over and resumed later.

pub mod delivery;
pub mod error;
pub mod impact;
pub mod innings;
pub mod player;
pub mod scorer;
pub mod summary;
pub mod team;

// Re-export main types at crate root
pub use delivery::{
    Delivery, DeliveryInput, DeliveryOutcome, DismissalKind, ExtraKind, WicketInput,
};
pub use error::{Error, Result};
pub use impact::{PlayerImpact, Ranking, DEFAULT_TOP_PERFORMERS};
pub use innings::{Innings, InningsNumber, BALLS_PER_OVER};
pub use player::{Batsman, Bowler};
pub use scorer::{MatchPhase, MatchScorer};
pub use summary::{InningsSummary, MatchResult, MatchSummary};
pub use team::{TeamSheet, Toss, TossDecision};

/// Type aliases for clarity
pub type PlayerName = String;
pub type TeamName = String;
pub type Runs = u32;

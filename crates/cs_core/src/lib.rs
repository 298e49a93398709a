//! # cs_core - Deterministic CS2 Match & Tournament Simulation Engine
//!
//! Simulation core of a CS2 team-management game: given two rosters and a
//! map it produces a round-by-round match outcome (score, economy trace,
//! kill feed, round messages), and at a higher level resolves tournament
//! formats (Swiss, GSL groups, single elimination) as results arrive.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same result)
//! - Per-round economy: buy decisions, loss bonus ladder, halftime resets
//! - Bomb plant/defuse timing and duel-by-duel kill feeds
//! - Swiss standings with qualification cutoff into a seeded bracket
//!
//! The crate is a pure library. The calendar/scheduler layer owns match
//! scheduling and team mutation; teams enter simulation read-only.

// Game simulation APIs accumulate parameters for round context.
#![allow(clippy::too_many_arguments)]

pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod rating;
pub mod tournament;

// Re-export the simulation surface
pub use engine::{
    decide_loadout, resolve_round, simulate_match, simulate_match_seeded, LoadoutDecision,
    RoundInput, RoundOutcome, SideAssignment, TeamSlot,
};
pub use error::{Result, SimError, TournamentError};
pub use models::{
    KillEvent, LoadoutKind, MapInfo, MatchResult, Player, PlayerAttributes, PlayerRole,
    RoundEndReason, RoundLog, Side, Team, TeamIdentity, TeamTier,
};

// Re-export the tournament control surface
pub use tournament::{
    generate_gsl_opening, generate_playoffs, generate_swiss_pairings, get_participants,
    ActiveTournament, EventStatus, InviteEvent, MatchPairing, SwissStanding, TierRequirement,
    TournamentFormat, TournamentStage,
};

// Re-export the data boundary
pub use data::{load_teams, DataError, PlayerIdentity};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

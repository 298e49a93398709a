//! Simulation engine: loadout policy, round resolution, match orchestration.

pub mod economy;
pub mod match_sim;
pub mod narrative;
pub mod round;
pub mod side;

pub use economy::{decide_loadout, LoadoutDecision};
pub use match_sim::{
    draw_seed, simulate_match, simulate_match_seeded, HALFTIME_ROUND, MATCH_WIN_SCORE, MONEY_CAP,
    START_MONEY, WIN_REWARD,
};
pub use narrative::StatsTracker;
pub use round::{resolve_round, RoundInput, RoundOutcome, BOMB_TIMER_SECONDS, ROUND_CLOCK_SECONDS};
pub use side::{SideAssignment, TeamSlot};

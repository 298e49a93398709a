//! Tournament structure and progression: pairing generation, standings
//! bookkeeping, and stage transitions driven by reported match results.

pub mod inviter;
pub mod progression;
pub mod structure;
pub mod types;

pub use inviter::{get_participants, EventStatus, InviteEvent, TierRequirement};
pub use structure::{generate_gsl_opening, generate_playoffs, generate_swiss_pairings};
pub use types::{
    ActiveTournament, MatchPairing, SwissStanding, TournamentFormat, TournamentStage,
    SINGLE_ELIM_TOTAL_ROUNDS, SWISS_LOSSES_TO_ELIMINATE, SWISS_TOTAL_ROUNDS,
    SWISS_WINS_TO_QUALIFY,
};

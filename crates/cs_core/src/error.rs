use std::fmt;

use uuid::Uuid;

#[derive(Debug)]
pub enum SimError {
    /// A team entered simulation with fewer than five starters.
    InvalidLineup { team: String, found: usize },
    /// A lineup references a player id that is not in the roster.
    UnknownLineupPlayer { team: String, player: Uuid },
}

#[derive(Debug, PartialEq)]
pub enum TournamentError {
    /// A reported result references a team id absent from the standings.
    UnknownTeam(Uuid),
    /// A stage received the wrong number of participants.
    InvalidParticipantCount { expected: usize, found: usize },
    /// Results were reported for a stage that cannot accept them.
    StageClosed(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::InvalidLineup { team, found } => {
                write!(f, "Invalid lineup for {}: expected 5 starters, found {}", team, found)
            }
            SimError::UnknownLineupPlayer { team, player } => {
                write!(f, "Lineup of {} references unknown player {}", team, player)
            }
        }
    }
}

impl std::error::Error for SimError {}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TournamentError::UnknownTeam(id) => {
                write!(f, "Result references team {} absent from standings", id)
            }
            TournamentError::InvalidParticipantCount { expected, found } => {
                write!(f, "Invalid participant count: expected {}, found {}", expected, found)
            }
            TournamentError::StageClosed(stage) => {
                write!(f, "Stage does not accept results: {}", stage)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

pub type Result<T> = std::result::Result<T, SimError>;

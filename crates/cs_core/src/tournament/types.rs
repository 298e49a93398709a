use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::MatchResult;

pub const SWISS_TOTAL_ROUNDS: u8 = 5;
pub const SINGLE_ELIM_TOTAL_ROUNDS: u8 = 3;
/// Swiss record thresholds: three wins qualifies, three losses eliminates.
pub const SWISS_WINS_TO_QUALIFY: u8 = 3;
pub const SWISS_LOSSES_TO_ELIMINATE: u8 = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentFormat {
    Swiss,
    GslGroups,
    SingleElimination,
}

impl TournamentFormat {
    pub fn total_rounds(&self) -> u8 {
        match self {
            TournamentFormat::Swiss => SWISS_TOTAL_ROUNDS,
            TournamentFormat::GslGroups => 3,
            TournamentFormat::SingleElimination => SINGLE_ELIM_TOTAL_ROUNDS,
        }
    }
}

/// One team's Swiss record.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SwissStanding {
    pub wins: u8,
    pub losses: u8,
    /// Opponents already faced, in order. Only ever grows.
    pub played: Vec<Uuid>,
}

impl SwissStanding {
    pub fn is_qualified(&self) -> bool {
        self.wins >= SWISS_WINS_TO_QUALIFY
    }

    pub fn is_eliminated(&self) -> bool {
        self.losses >= SWISS_LOSSES_TO_ELIMINATE
    }

    /// Still playing Swiss rounds.
    pub fn is_live(&self) -> bool {
        !self.is_qualified() && !self.is_eliminated()
    }

    /// Record bucket key, e.g. "2-1".
    pub fn record_key(&self) -> (u8, u8) {
        (self.wins, self.losses)
    }
}

/// A scheduled head-to-head, produced by pairing generation and consumed by
/// the scheduler (which runs the match engine on it).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchPairing {
    pub team_a: Uuid,
    pub team_b: Uuid,
    /// Display label, e.g. "Swiss Round (2-1)" or "Semi-Final".
    pub stage: String,
}

/// Named stages of tournament progression.
///
/// Transitions only happen in `process_round`; an advancement the format
/// does not implement lands in the explicit `NotImplemented` terminal state
/// instead of silently force-finishing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TournamentStage {
    SwissRound { round: u8 },
    GroupOpening,
    BracketRound { round: u8, field: Vec<Uuid> },
    Finished { champion: Option<Uuid> },
    NotImplemented { context: String },
}

impl TournamentStage {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TournamentStage::Finished { .. } | TournamentStage::NotImplemented { .. }
        )
    }
}

/// A running tournament: participants, stage, Swiss bookkeeping and history.
///
/// Owned by the scheduler; standings mutate in place as rounds resolve and
/// the whole object is dropped once the stage is terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTournament {
    pub id: Uuid,
    pub name: String,
    pub format: TournamentFormat,
    pub stage: TournamentStage,
    pub current_round: u8,
    pub total_rounds: u8,
    /// Seed-ordered participant ids.
    pub participants: Vec<Uuid>,
    pub swiss_standings: HashMap<Uuid, SwissStanding>,
    pub match_history: Vec<MatchResult>,
}

impl ActiveTournament {
    pub fn new(name: impl Into<String>, format: TournamentFormat, participants: Vec<Uuid>) -> Self {
        let stage = match format {
            TournamentFormat::Swiss => TournamentStage::SwissRound { round: 1 },
            TournamentFormat::GslGroups => TournamentStage::GroupOpening,
            TournamentFormat::SingleElimination => TournamentStage::BracketRound {
                round: 1,
                field: participants.clone(),
            },
        };
        let swiss_standings = if format == TournamentFormat::Swiss {
            participants
                .iter()
                .map(|id| (*id, SwissStanding::default()))
                .collect()
        } else {
            HashMap::new()
        };
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            stage,
            current_round: 1,
            total_rounds: format.total_rounds(),
            participants,
            swiss_standings,
            match_history: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stage.is_terminal()
    }
}

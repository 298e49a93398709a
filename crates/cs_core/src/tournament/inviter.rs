//! Participant selection for a scheduled event.
//!
//! Builds the invite list the scheduler hands to `ActiveTournament::new`:
//! the user's team when it accepted and qualifies, then the best eligible
//! teams by tier, topped up from lower tiers so a bracket never starts
//! under-filled.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Team, TeamTier};

/// Player-facing status of a calendar event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Pending,
    Accepted,
    Declined,
    Completed,
}

/// Tier gate on the invite list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TierRequirement {
    /// Teams at or above this tier.
    Min(TeamTier),
    /// Open qualifier: everyone is eligible.
    Open,
}

impl TierRequirement {
    pub fn eligible(&self, tier: TeamTier) -> bool {
        match self {
            TierRequirement::Min(min) => tier.rank() >= min.rank(),
            TierRequirement::Open => true,
        }
    }
}

/// The slice of a calendar event the inviter cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteEvent {
    pub name: String,
    pub total_teams: usize,
    pub min_tier: TierRequirement,
    pub status: EventStatus,
}

/// Assemble the participant list for an event.
///
/// The user's team takes a guaranteed slot when the event was accepted and
/// the team is eligible; a declined event never includes it. Bots are ranked
/// by tier (prestige breaking ties) and the field is padded from lower tiers
/// when the eligible pool runs short.
pub fn get_participants<'a>(
    all_teams: &'a [Team],
    event: &InviteEvent,
    user_team_id: Uuid,
) -> Vec<&'a Team> {
    let mut participants: Vec<&Team> = Vec::with_capacity(event.total_teams);

    // An accepted invite is a guaranteed slot; the tier gate only filters
    // the bot pool.
    if event.status == EventStatus::Accepted {
        if let Some(user_team) = all_teams.iter().find(|t| t.id == user_team_id) {
            participants.push(user_team);
        }
    }

    fn rank(team: &Team) -> (std::cmp::Reverse<u8>, std::cmp::Reverse<u8>) {
        (std::cmp::Reverse(team.tier.rank()), std::cmp::Reverse(team.prestige))
    }

    let mut candidates: Vec<&Team> = all_teams
        .iter()
        .filter(|t| t.id != user_team_id)
        .filter(|t| event.min_tier.eligible(t.tier))
        .collect();
    candidates.sort_by_key(|t| rank(t));

    let open_slots = event.total_teams.saturating_sub(participants.len());
    participants.extend(candidates.into_iter().take(open_slots));

    // Short field: pad with the best remaining teams regardless of tier.
    if participants.len() < event.total_teams {
        let mut fillers: Vec<&Team> = all_teams
            .iter()
            .filter(|t| t.id != user_team_id)
            .filter(|t| !participants.iter().any(|p| p.id == t.id))
            .collect();
        fillers.sort_by_key(|t| rank(t));
        let missing = event.total_teams - participants.len();
        participants.extend(fillers.into_iter().take(missing));
    }

    participants
}

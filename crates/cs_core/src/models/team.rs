use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::Player;
use crate::error::SimError;

pub const ROSTER_CAP: usize = 10;
pub const LINEUP_SIZE: usize = 5;

/// Organization tier. Drives economy and skill generation ranges and
/// tournament invite ranking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TeamTier {
    S,
    A,
    B,
    C,
}

impl TeamTier {
    /// Numeric weight used for invite ranking (S highest).
    pub fn rank(&self) -> u8 {
        match self {
            TeamTier::S => 4,
            TeamTier::A => 3,
            TeamTier::B => 2,
            TeamTier::C => 1,
        }
    }
}

impl FromStr for TeamTier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "S" => Ok(TeamTier::S),
            "A" => Ok(TeamTier::A),
            "B" => Ok(TeamTier::B),
            "C" => Ok(TeamTier::C),
            other => Err(format!("Unknown team tier: {}", other)),
        }
    }
}

/// Roster-building identity tag. Not read by the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TeamStrategy {
    Superteam,
    Moneyball,
    Academy,
    Balanced,
}

impl FromStr for TeamStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Superteam" => Ok(TeamStrategy::Superteam),
            "Moneyball" => Ok(TeamStrategy::Moneyball),
            "Academy" => Ok(TeamStrategy::Academy),
            "Balanced" => Ok(TeamStrategy::Balanced),
            other => Err(format!("Unknown team strategy: {}", other)),
        }
    }
}

/// Playing-personality identity tag. Not read by the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TeamPlayStyle {
    Aggressive,
    Tactical,
    Chaos,
    #[serde(rename = "Clutch Kings")]
    ClutchKings,
}

impl FromStr for TeamPlayStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Aggressive" => Ok(TeamPlayStyle::Aggressive),
            "Tactical" => Ok(TeamPlayStyle::Tactical),
            "Chaos" => Ok(TeamPlayStyle::Chaos),
            "Clutch Kings" => Ok(TeamPlayStyle::ClutchKings),
            other => Err(format!("Unknown play style: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamColors {
    pub primary: String,
    pub secondary: String,
}

/// Map id -> proficiency in `[0, 100]`.
pub type MapPoolKnowledge = HashMap<String, u8>;

/// An organization and its squad.
///
/// Invariant: `active_lineup` is a subset of `roster`; simulation only ever
/// reads the active lineup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub short_name: String,
    pub region: String,
    pub colors: TeamColors,
    pub tier: TeamTier,
    pub strategy: TeamStrategy,
    pub play_style: TeamPlayStyle,
    pub budget: u32,
    pub prestige: u8,
    pub map_pool: MapPoolKnowledge,
    pub roster: Vec<Player>,
    /// Player ids of the five starters.
    pub active_lineup: Vec<Uuid>,
}

/// Identity fields supplied by the caller (the cosmetic generators live in
/// the presentation layer).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamIdentity {
    pub name: String,
    pub short_name: String,
    pub region: String,
    pub colors: TeamColors,
}

impl Team {
    pub fn new(
        identity: TeamIdentity,
        tier: TeamTier,
        strategy: TeamStrategy,
        play_style: TeamPlayStyle,
        budget: u32,
        prestige: u8,
        map_pool: MapPoolKnowledge,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: identity.name,
            short_name: identity.short_name,
            region: identity.region,
            colors: identity.colors,
            tier,
            strategy,
            play_style,
            budget,
            prestige,
            map_pool,
            roster: Vec::new(),
            active_lineup: Vec::new(),
        }
    }

    /// Add a player to the roster. Silently refuses past the roster cap;
    /// auto-fills the starting lineup up to five.
    pub fn add_player(&mut self, player: Player) {
        if self.roster.len() >= ROSTER_CAP {
            return;
        }
        if self.active_lineup.len() < LINEUP_SIZE {
            self.active_lineup.push(player.id);
        }
        self.roster.push(player);
    }

    /// Map proficiency for a map id, 0 when the team never practiced it.
    pub fn map_proficiency(&self, map_id: &str) -> u8 {
        self.map_pool.get(map_id).copied().unwrap_or(0)
    }

    /// Resolve the active lineup to player references.
    ///
    /// Fails fast when the lineup has fewer than five starters or references
    /// a player missing from the roster -- simulating short-handed is a
    /// precondition violation, not a degradation case.
    pub fn lineup(&self) -> crate::error::Result<Vec<&Player>> {
        if self.active_lineup.len() != LINEUP_SIZE {
            return Err(SimError::InvalidLineup {
                team: self.name.clone(),
                found: self.active_lineup.len(),
            });
        }
        let mut starters = Vec::with_capacity(LINEUP_SIZE);
        for id in &self.active_lineup {
            match self.roster.iter().find(|p| p.id == *id) {
                Some(player) => starters.push(player),
                None => {
                    return Err(SimError::UnknownLineupPlayer {
                        team: self.name.clone(),
                        player: *id,
                    })
                }
            }
        }
        Ok(starters)
    }

    /// Rounded mean overall of the starters (0 for an empty lineup).
    pub fn average_overall(&self) -> u8 {
        let starters: Vec<&Player> = self
            .roster
            .iter()
            .filter(|p| self.active_lineup.contains(&p.id))
            .collect();
        if starters.is_empty() {
            return 0;
        }
        let sum: u32 = starters.iter().map(|p| p.overall as u32).sum();
        ((sum as f32) / (starters.len() as f32)).round() as u8
    }
}

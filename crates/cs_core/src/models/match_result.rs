//! Match output data structures.
//!
//! Everything the simulation produces flows into [`MatchResult`]: the final
//! score, one [`RoundLog`] per round (plus a synthetic SYSTEM entry at
//! halftime), the kill/utility feed, and per-player aggregates. The result is
//! immutable once produced; tournament progression and presentation consume
//! it as-is.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Sides & loadouts
// ============================================================================

/// The two asymmetric roles in a round. CT defends, TR attacks the sites.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Side {
    CT,
    TR,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::CT => Side::TR,
            Side::TR => Side::CT,
        }
    }
}

/// How much of the bank a team committed before the round.
///
/// `HalfBuy` exists in the economy vocabulary but is never emitted by the
/// loadout policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LoadoutKind {
    Pistol,
    Eco,
    #[serde(rename = "Force Buy")]
    ForceBuy,
    #[serde(rename = "Half Buy")]
    HalfBuy,
    #[serde(rename = "Full Buy")]
    FullBuy,
}

impl LoadoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadoutKind::Pistol => "Pistol",
            LoadoutKind::Eco => "Eco",
            LoadoutKind::ForceBuy => "Force Buy",
            LoadoutKind::HalfBuy => "Half Buy",
            LoadoutKind::FullBuy => "Full Buy",
        }
    }
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundEndReason {
    /// One side was wiped before any objective resolved.
    Elimination,
    /// The bomb timer ran out (or no defender was left to defuse).
    BombExploded,
    /// Defenders retook the site and defused in time.
    BombDefused,
    /// The clock ran out with no plant; defenders win.
    TimeExpired,
}

// ============================================================================
// Kill & utility feed
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeaponClass {
    Rifle,
    Smg,
    Pistol,
    Sniper,
    Shotgun,
    Knife,
}

/// Where in the round a kill happened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KillContext {
    Opening,
    Execute,
    Retake,
    Clutch,
    Postplant,
    Mid,
}

/// Lightweight player reference carried by feed entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerBrief {
    pub id: Uuid,
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KillEvent {
    pub killer: PlayerBrief,
    pub victim: PlayerBrief,
    /// Side the killer was playing when the kill happened.
    pub killer_side: Side,
    pub weapon: WeaponClass,
    pub is_headshot: bool,
    pub is_trade_kill: bool,
    /// Seconds since the previous death when this was a trade, else 0.
    pub trade_time: f32,
    pub was_flashed: bool,
    pub through_smoke: bool,
    /// Engagement distance in meters (simulated).
    pub distance: f32,
    /// Seconds elapsed in the round when the kill landed.
    pub time_in_round: u16,
    pub context: KillContext,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UtilityKind {
    Smoke,
    Flash,
    Molotov,
    He,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UtilityImpact {
    AssistedKill,
    DeniedPosition,
    IntelGained,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UtilityEvent {
    pub player: PlayerBrief,
    pub kind: UtilityKind,
    pub impact: UtilityImpact,
    /// Impact score in `[0, 100]`.
    pub value: u8,
}

// ============================================================================
// Round log & match result
// ============================================================================

/// One entry per simulated round.
///
/// Synthetic SYSTEM entries (halftime) carry `round_number == 0` and no
/// winner or loadout data; the presentation layer renders them as banners.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoundLog {
    pub round_number: u8,
    pub winner_id: Option<Uuid>,
    pub winning_side: Option<Side>,
    /// Team defending this round; `None` on system entries.
    pub ct_id: Option<Uuid>,
    pub message: String,
    pub loadout_a: Option<LoadoutKind>,
    pub loadout_b: Option<LoadoutKind>,
    pub money_a: i32,
    pub money_b: i32,
    pub reason: Option<RoundEndReason>,
    pub kill_feed: Vec<KillEvent>,
    pub utility_events: Vec<UtilityEvent>,
}

impl RoundLog {
    /// Synthetic system banner (halftime transition).
    pub fn system(message: impl Into<String>, money_a: i32, money_b: i32) -> Self {
        Self {
            round_number: 0,
            winner_id: None,
            winning_side: None,
            ct_id: None,
            message: message.into(),
            loadout_a: None,
            loadout_b: None,
            money_a,
            money_b,
            reason: None,
            kill_feed: Vec::new(),
            utility_events: Vec::new(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.round_number == 0
    }
}

/// Per-player aggregates over one match, derived from the kill feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMatchStats {
    pub player_id: Uuid,
    pub nickname: String,
    pub team_id: Uuid,
    pub kills: u32,
    pub deaths: u32,
    pub headshots: u32,
    pub opening_kills: u32,
    pub clutch_rounds: u32,
}

/// Final snapshot of one simulated match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub winner_id: Uuid,
    pub loser_id: Uuid,
    pub team_a_id: Uuid,
    pub team_b_id: Uuid,
    pub score_a: u8,
    pub score_b: u8,
    pub map_name: String,
    pub rounds: Vec<RoundLog>,
    pub player_stats: Vec<PlayerMatchStats>,
}

impl MatchResult {
    /// Rounds actually played (system entries excluded).
    pub fn rounds_played(&self) -> usize {
        self.rounds.iter().filter(|r| !r.is_system()).count()
    }

    pub fn final_score(&self) -> (u8, u8) {
        (self.score_a, self.score_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::CT.opposite(), Side::TR);
        assert_eq!(Side::TR.opposite(), Side::CT);
    }

    #[test]
    fn test_loadout_serde_matches_display_strings() {
        let json = serde_json::to_string(&LoadoutKind::ForceBuy).unwrap();
        assert_eq!(json, "\"Force Buy\"");
        let back: LoadoutKind = serde_json::from_str("\"Full Buy\"").unwrap();
        assert_eq!(back, LoadoutKind::FullBuy);
    }

    #[test]
    fn test_system_round_log() {
        let log = RoundLog::system("-- HALFTIME --", 800, 800);
        assert!(log.is_system());
        assert!(log.winner_id.is_none());
        assert!(log.loadout_a.is_none());
        assert!(log.kill_feed.is_empty());
    }
}

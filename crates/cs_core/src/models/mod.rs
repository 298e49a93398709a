pub mod map;
pub mod match_result;
pub mod player;
pub mod team;

pub use map::{lookup as lookup_map, MapInfo, NEUTRAL_CT_BIAS};
pub use match_result::{
    KillContext, KillEvent, LoadoutKind, MatchResult, PlayerBrief, PlayerMatchStats,
    RoundEndReason, RoundLog, Side, UtilityEvent, UtilityImpact, UtilityKind, WeaponClass,
};
pub use player::{Player, PlayerAttributes, PlayerRole, PlayerStats, ATTRIBUTE_MAX, ATTRIBUTE_MIN};
pub use team::{
    MapPoolKnowledge, Team, TeamColors, TeamIdentity, TeamPlayStyle, TeamStrategy, TeamTier,
    LINEUP_SIZE, ROSTER_CAP,
};

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// In-game role of a player. Role drives duel selection (Entry opens,
/// IGL/Rifle anchors the defense) and weapon-class inference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerRole {
    AWPer,
    Entry,
    Support,
    #[serde(rename = "IGL")]
    Igl,
    Lurker,
    Rifle,
}

impl PlayerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerRole::AWPer => "AWPer",
            PlayerRole::Entry => "Entry",
            PlayerRole::Support => "Support",
            PlayerRole::Igl => "IGL",
            PlayerRole::Lurker => "Lurker",
            PlayerRole::Rifle => "Rifle",
        }
    }
}

impl FromStr for PlayerRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "AWPer" => Ok(PlayerRole::AWPer),
            "Entry" => Ok(PlayerRole::Entry),
            "Support" => Ok(PlayerRole::Support),
            "IGL" => Ok(PlayerRole::Igl),
            "Lurker" => Ok(PlayerRole::Lurker),
            "Rifle" => Ok(PlayerRole::Rifle),
            other => Err(format!("Unknown player role: {}", other)),
        }
    }
}

pub const ATTRIBUTE_MIN: u8 = 1;
pub const ATTRIBUTE_MAX: u8 = 99;

/// The six skill attributes, each in `[1, 99]`.
///
/// Mechanical: aim, reflexes, spray control.
/// Mental: game sense, utility, discipline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAttributes {
    pub aim: u8,
    pub reflexes: u8,
    pub spray_control: u8,
    pub game_sense: u8,
    pub utility: u8,
    pub discipline: u8,
}

/// Clamp a raw attribute roll into the legal range.
pub fn clamp_attribute(value: i16) -> u8 {
    value.clamp(ATTRIBUTE_MIN as i16, ATTRIBUTE_MAX as i16) as u8
}

impl PlayerAttributes {
    /// Build from raw rolls, saturating each attribute into `[1, 99]`.
    pub fn from_raw(
        aim: i16,
        reflexes: i16,
        spray_control: i16,
        game_sense: i16,
        utility: i16,
        discipline: i16,
    ) -> Self {
        Self {
            aim: clamp_attribute(aim),
            reflexes: clamp_attribute(reflexes),
            spray_control: clamp_attribute(spray_control),
            game_sense: clamp_attribute(game_sense),
            utility: clamp_attribute(utility),
            discipline: clamp_attribute(discipline),
        }
    }

    pub fn as_array(&self) -> [u8; 6] {
        [
            self.aim,
            self.reflexes,
            self.spray_control,
            self.game_sense,
            self.utility,
            self.discipline,
        ]
    }

    /// Rounded mean of the six attributes.
    pub fn overall(&self) -> u8 {
        let sum: u16 = self.as_array().iter().map(|&v| v as u16).sum();
        ((sum as f32) / 6.0).round() as u8
    }

    pub fn in_range(&self) -> bool {
        self.as_array()
            .iter()
            .all(|&v| (ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&v))
    }
}

/// Per-match accumulators, owned by the presentation layer between matches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct PlayerStats {
    pub kills: u32,
    pub deaths: u32,
    pub rating: f32,
}

/// A rostered player. Immutable after creation except for stat overwrites
/// during data-driven construction (see `data::loader`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub nickname: String,
    pub country: String,
    pub age: u8,
    pub role: PlayerRole,
    pub attributes: PlayerAttributes,
    pub overall: u8,
    pub potential: u8,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(
        nickname: String,
        country: String,
        age: u8,
        role: PlayerRole,
        attributes: PlayerAttributes,
        potential: u8,
    ) -> Self {
        let overall = attributes.overall();
        Self {
            id: Uuid::new_v4(),
            nickname,
            country,
            age,
            role,
            attributes,
            overall,
            potential: potential.max(overall),
            stats: PlayerStats::default(),
        }
    }

    /// Recompute the derived overall after a data-driven attribute overwrite.
    pub fn refresh_overall(&mut self) {
        self.overall = self.attributes.overall();
        self.potential = self.potential.max(self.overall);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            PlayerRole::AWPer,
            PlayerRole::Entry,
            PlayerRole::Support,
            PlayerRole::Igl,
            PlayerRole::Lurker,
            PlayerRole::Rifle,
        ] {
            assert_eq!(PlayerRole::from_str(role.as_str()).unwrap(), role);
        }
        assert!(PlayerRole::from_str("Coach").is_err());
    }

    #[test]
    fn test_attributes_clamp() {
        let attrs = PlayerAttributes::from_raw(120, -4, 70, 0, 100, 55);
        assert_eq!(attrs.aim, 99);
        assert_eq!(attrs.reflexes, 1);
        assert_eq!(attrs.game_sense, 1);
        assert_eq!(attrs.utility, 99);
        assert!(attrs.in_range());
    }

    #[test]
    fn test_overall_is_rounded_mean() {
        let attrs = PlayerAttributes::from_raw(70, 70, 70, 70, 70, 70);
        assert_eq!(attrs.overall(), 70);
        // 70*5 + 71 = 421, mean 70.16 -> 70
        let attrs = PlayerAttributes::from_raw(70, 70, 70, 70, 70, 71);
        assert_eq!(attrs.overall(), 70);
        // 70*3 + 73*3 = 429, mean 71.5 -> 72
        let attrs = PlayerAttributes::from_raw(70, 70, 70, 73, 73, 73);
        assert_eq!(attrs.overall(), 72);
    }

    #[test]
    fn test_potential_never_below_overall() {
        let attrs = PlayerAttributes::from_raw(90, 90, 90, 90, 90, 90);
        let player = Player::new("smoke".into(), "DE".into(), 30, PlayerRole::Support, attrs, 10);
        assert_eq!(player.potential, player.overall);
    }
}

//! Roster loading boundary.
//!
//! External roster definitions arrive as loosely-shaped JSON. Everything is
//! validated and mapped onto entities here; a shape mismatch, unknown enum
//! string or out-of-range stat fails loudly instead of being cast through.

use rand::Rng;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

use super::generator;
use crate::models::{
    Player, PlayerAttributes, PlayerRole, Team, TeamColors, TeamIdentity, TeamPlayStyle,
    TeamStrategy, TeamTier, ATTRIBUTE_MAX, ATTRIBUTE_MIN, ROSTER_CAP,
};

#[derive(Error, Debug)]
pub enum DataError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Team '{team}': unknown {field} '{value}'")]
    UnknownVariant { team: String, field: &'static str, value: String },

    #[error("Player '{nickname}': {attribute} = {value} outside [1, 99]")]
    AttributeOutOfRange { nickname: String, attribute: &'static str, value: u8 },

    #[error("Team '{team}': {found} players exceeds the roster cap of 10")]
    RosterTooLarge { team: String, found: usize },
}

// ============================================================================
// Wire DTOs (shape of the external roster file)
// ============================================================================

#[derive(Debug, Deserialize)]
struct RosterPlayerStats {
    aim: u8,
    reflexes: u8,
    spray: u8,
    sense: u8,
    util: u8,
    disc: u8,
}

#[derive(Debug, Deserialize)]
struct RosterPlayerRecord {
    nickname: String,
    country: String,
    role: String,
    age: u8,
    stats: RosterPlayerStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RosterTeamRecord {
    name: String,
    short_name: String,
    region: String,
    tier: String,
    colors: TeamColors,
    strategy: String,
    play_style: String,
    roster: Vec<RosterPlayerRecord>,
}

// ============================================================================
// Mapping
// ============================================================================

fn check_attribute(
    nickname: &str,
    attribute: &'static str,
    value: u8,
) -> Result<u8, DataError> {
    if (ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(DataError::AttributeOutOfRange {
            nickname: nickname.to_string(),
            attribute,
            value,
        })
    }
}

fn map_player(record: RosterPlayerRecord, team: &str, rng: &mut impl Rng) -> Result<Player, DataError> {
    let role = PlayerRole::from_str(&record.role).map_err(|_| DataError::UnknownVariant {
        team: team.to_string(),
        field: "role",
        value: record.role.clone(),
    })?;

    let nick = &record.nickname;
    let attributes = PlayerAttributes {
        aim: check_attribute(nick, "aim", record.stats.aim)?,
        reflexes: check_attribute(nick, "reflexes", record.stats.reflexes)?,
        spray_control: check_attribute(nick, "spray", record.stats.spray)?,
        game_sense: check_attribute(nick, "sense", record.stats.sense)?,
        utility: check_attribute(nick, "util", record.stats.util)?,
        discipline: check_attribute(nick, "disc", record.stats.disc)?,
    };

    let potential = generator::roll_potential(record.age, attributes.overall(), rng);
    Ok(Player::new(
        record.nickname,
        record.country,
        record.age,
        role,
        attributes,
        potential,
    ))
}

fn map_team(record: RosterTeamRecord, rng: &mut impl Rng) -> Result<Team, DataError> {
    let unknown = |field: &'static str, value: &str| DataError::UnknownVariant {
        team: record.name.clone(),
        field,
        value: value.to_string(),
    };

    let tier = TeamTier::from_str(&record.tier).map_err(|_| unknown("tier", &record.tier))?;
    let strategy = TeamStrategy::from_str(&record.strategy)
        .map_err(|_| unknown("strategy", &record.strategy))?;
    let play_style = TeamPlayStyle::from_str(&record.play_style)
        .map_err(|_| unknown("playStyle", &record.play_style))?;

    if record.roster.len() > ROSTER_CAP {
        return Err(DataError::RosterTooLarge {
            team: record.name.clone(),
            found: record.roster.len(),
        });
    }

    // Tier still drives the economic profile; the file only carries identity
    // and player data.
    let (budget, prestige) = generator::tier_economy(tier, rng);
    let map_pool = generator::generate_map_pool(tier, rng);

    let mut team = Team::new(
        TeamIdentity {
            name: record.name.clone(),
            short_name: record.short_name,
            region: record.region,
            colors: record.colors,
        },
        tier,
        strategy,
        play_style,
        budget,
        prestige,
        map_pool,
    );
    for player_record in record.roster {
        let player = map_player(player_record, &record.name, rng)?;
        team.add_player(player);
    }
    Ok(team)
}

/// Parse and validate a roster file into teams.
pub fn load_teams(json: &str, rng: &mut impl Rng) -> Result<Vec<Team>, DataError> {
    let records: Vec<RosterTeamRecord> = serde_json::from_str(json)?;
    let teams = records
        .into_iter()
        .map(|record| map_team(record, rng))
        .collect::<Result<Vec<_>, _>>()?;
    info!("Loaded {} teams from roster data", teams.len());
    Ok(teams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_json() -> String {
        r##"[
            {
                "name": "Navi Flow",
                "shortName": "NVF",
                "region": "Europe",
                "tier": "S",
                "colors": { "primary": "#ffee00", "secondary": "#111111" },
                "strategy": "Superteam",
                "playStyle": "Aggressive",
                "roster": [
                    { "nickname": "s1mple2", "country": "UA", "role": "AWPer", "age": 27,
                      "stats": { "aim": 95, "reflexes": 93, "spray": 88, "sense": 90, "util": 82, "disc": 78 } },
                    { "nickname": "flameZ2", "country": "IL", "role": "Entry", "age": 21,
                      "stats": { "aim": 86, "reflexes": 90, "spray": 84, "sense": 74, "util": 70, "disc": 65 } },
                    { "nickname": "karrigan2", "country": "DK", "role": "IGL", "age": 34,
                      "stats": { "aim": 70, "reflexes": 68, "spray": 72, "sense": 96, "util": 92, "disc": 95 } },
                    { "nickname": "ropz2", "country": "EE", "role": "Lurker", "age": 25,
                      "stats": { "aim": 90, "reflexes": 88, "spray": 87, "sense": 89, "util": 80, "disc": 88 } },
                    { "nickname": "Grim2", "country": "US", "role": "Support", "age": 24,
                      "stats": { "aim": 84, "reflexes": 83, "spray": 85, "sense": 80, "util": 88, "disc": 82 } }
                ]
            }
        ]"##
        .to_string()
    }

    #[test]
    fn test_load_valid_roster() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let teams = load_teams(&sample_json(), &mut rng).unwrap();
        assert_eq!(teams.len(), 1);

        let team = &teams[0];
        assert_eq!(team.name, "Navi Flow");
        assert_eq!(team.tier, TeamTier::S);
        assert_eq!(team.play_style, TeamPlayStyle::Aggressive);
        assert_eq!(team.roster.len(), 5);
        assert!((85..=100).contains(&team.prestige));

        let awper = team.roster.iter().find(|p| p.nickname == "s1mple2").unwrap();
        assert_eq!(awper.role, PlayerRole::AWPer);
        assert_eq!(awper.attributes.spray_control, 88);
        // (95+93+88+90+82+78)/6 = 87.67 -> 88
        assert_eq!(awper.overall, 88);
        assert!(awper.potential >= awper.overall);

        // Five players: all starters.
        assert_eq!(team.lineup().unwrap().len(), 5);
    }

    #[test]
    fn test_unknown_role_fails_loudly() {
        let json = sample_json().replace("\"AWPer\"", "\"Coach\"");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = load_teams(&json, &mut rng).unwrap_err();
        assert!(matches!(err, DataError::UnknownVariant { field: "role", .. }), "{:?}", err);
    }

    #[test]
    fn test_unknown_tier_fails_loudly() {
        let json = sample_json().replace("\"tier\": \"S\"", "\"tier\": \"SS\"");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = load_teams(&json, &mut rng).unwrap_err();
        assert!(matches!(err, DataError::UnknownVariant { field: "tier", .. }), "{:?}", err);
    }

    #[test]
    fn test_out_of_range_stat_fails_loudly() {
        let json = sample_json().replace("\"aim\": 95", "\"aim\": 0");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = load_teams(&json, &mut rng).unwrap_err();
        assert!(
            matches!(err, DataError::AttributeOutOfRange { attribute: "aim", value: 0, .. }),
            "{:?}",
            err
        );
    }

    #[test]
    fn test_malformed_json_fails_loudly() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            load_teams("{ not json", &mut rng),
            Err(DataError::Json(_))
        ));
        // A shape mismatch (object instead of array) is also a JSON error.
        assert!(matches!(
            load_teams("{}", &mut rng),
            Err(DataError::Json(_))
        ));
    }
}

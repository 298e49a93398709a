//! Random squad generation.
//!
//! Age drives the attribute profile: young players peak mechanically while
//! the mental game lags, veterans trade reflexes for game sense. Identity
//! fields (nicknames, countries, team names, colors) are caller-supplied;
//! the cosmetic generators live in the presentation layer.

use rand::Rng;

use crate::models::{
    map, MapPoolKnowledge, Player, PlayerAttributes, PlayerRole, Team, TeamIdentity,
    TeamPlayStyle, TeamStrategy, TeamTier, LINEUP_SIZE,
};

/// Identity fields for one generated player.
#[derive(Debug, Clone)]
pub struct PlayerIdentity {
    pub nickname: String,
    pub country: String,
}

/// Career-stage age bands: wonderkids are rare, the 19-23 peak is the bulk
/// of the market.
pub fn generate_age(rng: &mut impl Rng) -> u8 {
    let roll: f32 = rng.gen();
    if roll < 0.20 {
        rng.gen_range(16..=18)
    } else if roll < 0.50 {
        rng.gen_range(19..=23)
    } else if roll < 0.75 {
        rng.gen_range(24..=27)
    } else if roll < 0.90 {
        rng.gen_range(28..=31)
    } else {
        rng.gen_range(32..=36)
    }
}

/// Market role distribution: IGLs and dedicated AWPers are scarce, pure
/// riflers are the leftovers.
pub fn generate_role(rng: &mut impl Rng) -> PlayerRole {
    let roll: f32 = rng.gen();
    if roll < 0.15 {
        PlayerRole::Igl
    } else if roll < 0.30 {
        PlayerRole::AWPer
    } else if roll < 0.50 {
        PlayerRole::Entry
    } else if roll < 0.70 {
        PlayerRole::Support
    } else if roll < 0.90 {
        PlayerRole::Lurker
    } else {
        PlayerRole::Rifle
    }
}

/// Roll the six attributes for a given age.
pub fn generate_attributes_for_age(age: u8, rng: &mut impl Rng) -> PlayerAttributes {
    // Natural talent, before the age curve.
    let mut aim: i16 = rng.gen_range(50..=85);
    let mut reflexes: i16 = rng.gen_range(50..=85);
    let spray: i16 = rng.gen_range(50..=85);
    let mut sense: i16 = rng.gen_range(40..=80);
    let mut utility: i16 = rng.gen_range(40..=80);
    let mut discipline: i16 = rng.gen_range(30..=75);

    if age <= 18 {
        // Wonderkid: raw mechanics, no brain yet.
        reflexes += rng.gen_range(15..=25);
        aim += rng.gen_range(5..=15);
        sense -= rng.gen_range(15..=30);
        utility -= rng.gen_range(10..=20);
        discipline -= rng.gen_range(20..=30);
    } else if age <= 23 {
        // Mechanical peak.
        reflexes += rng.gen_range(10..=20);
        aim += rng.gen_range(10..=25);
        sense -= rng.gen_range(5..=15);
        discipline -= rng.gen_range(5..=15);
    } else if age <= 27 {
        // Prime: mechanics hold, the mental game arrives.
        reflexes += rng.gen_range(0..=5);
        aim += rng.gen_range(5..=10);
        sense += rng.gen_range(5..=15);
        discipline += rng.gen_range(5..=15);
    } else if age <= 31 {
        // Mechanical decline, veteran brain.
        reflexes -= rng.gen_range(10..=20);
        aim -= rng.gen_range(0..=10);
        sense += rng.gen_range(15..=25);
        utility += rng.gen_range(10..=20);
        discipline += rng.gen_range(15..=25);
    } else {
        // The professor.
        reflexes -= rng.gen_range(20..=35);
        aim -= rng.gen_range(10..=20);
        sense += rng.gen_range(25..=40);
        utility += rng.gen_range(20..=30);
        discipline += rng.gen_range(25..=35);
    }

    PlayerAttributes::from_raw(aim, reflexes, spray, sense, utility, discipline)
}

/// Age-dependent ceiling over the current overall.
pub fn roll_potential(age: u8, overall: u8, rng: &mut impl Rng) -> u8 {
    let volatility: u8 = rng.gen_range(0..=10);
    let headroom: u8 = if age < 19 {
        rng.gen_range(15..=25) + volatility
    } else if age <= 23 {
        rng.gen_range(5..=15) + volatility
    } else if age <= 27 {
        rng.gen_range(0..=5)
    } else {
        0
    };
    overall.saturating_add(headroom).min(99)
}

/// Generate a free-agent player from an identity and the market curves.
pub fn generate_player(identity: PlayerIdentity, rng: &mut impl Rng) -> Player {
    let age = generate_age(rng);
    let role = generate_role(rng);
    let attributes = generate_attributes_for_age(age, rng);
    let potential = roll_potential(age, attributes.overall(), rng);
    Player::new(identity.nickname, identity.country, age, role, attributes, potential)
}

/// Budget and prestige ranges per organization tier.
pub fn tier_economy(tier: TeamTier, rng: &mut impl Rng) -> (u32, u8) {
    match tier {
        TeamTier::S => (rng.gen_range(15_000_000..=25_000_000), rng.gen_range(85..=100)),
        TeamTier::A => (rng.gen_range(8_000_000..=14_000_000), rng.gen_range(70..=84)),
        TeamTier::B => (rng.gen_range(2_000_000..=7_000_000), rng.gen_range(50..=69)),
        TeamTier::C => (rng.gen_range(100_000..=1_000_000), rng.gen_range(10..=49)),
    }
}

/// How an organization of this tier builds rosters.
pub fn strategy_for_tier(tier: TeamTier, rng: &mut impl Rng) -> TeamStrategy {
    match tier {
        TeamTier::S => {
            if rng.gen_bool(0.3) {
                TeamStrategy::Superteam
            } else {
                TeamStrategy::Balanced
            }
        }
        TeamTier::B => TeamStrategy::Moneyball,
        TeamTier::C => {
            if rng.gen_bool(0.5) {
                TeamStrategy::Academy
            } else {
                TeamStrategy::Balanced
            }
        }
        TeamTier::A => TeamStrategy::Balanced,
    }
}

fn play_style(rng: &mut impl Rng) -> TeamPlayStyle {
    match rng.gen_range(0..4) {
        0 => TeamPlayStyle::Aggressive,
        1 => TeamPlayStyle::Tactical,
        2 => TeamPlayStyle::Chaos,
        _ => TeamPlayStyle::ClutchKings,
    }
}

/// Initial proficiency over the active map pool, banded by tier.
pub fn generate_map_pool(tier: TeamTier, rng: &mut impl Rng) -> MapPoolKnowledge {
    let (min_base, max_base) = match tier {
        TeamTier::S => (60, 90),
        TeamTier::A => (50, 80),
        TeamTier::B => (30, 70),
        TeamTier::C => (10, 50),
    };
    map::pool_ids()
        .into_iter()
        .map(|id| {
            let base: i16 = rng.gen_range(min_base..=max_base);
            let variance: i16 = rng.gen_range(-10..=10);
            (id.to_string(), (base + variance).clamp(0, 100) as u8)
        })
        .collect()
}

/// Generate a playable team: tier-banded economy and map pool plus five
/// generated starters. Panics if fewer than five player identities are
/// supplied -- the caller owns the cosmetic name pools.
pub fn generate_team(
    identity: TeamIdentity,
    player_identities: Vec<PlayerIdentity>,
    tier: TeamTier,
    rng: &mut impl Rng,
) -> Team {
    assert!(
        player_identities.len() >= LINEUP_SIZE,
        "need at least {} player identities, got {}",
        LINEUP_SIZE,
        player_identities.len()
    );
    let (budget, prestige) = tier_economy(tier, rng);
    let strategy = strategy_for_tier(tier, rng);
    let style = play_style(rng);
    let map_pool = generate_map_pool(tier, rng);
    let mut team = Team::new(identity, tier, strategy, style, budget, prestige, map_pool);
    for player_identity in player_identities {
        team.add_player(generate_player(player_identity, rng));
    }
    team
}

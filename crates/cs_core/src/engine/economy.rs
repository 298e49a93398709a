//! Buy-decision policy.
//!
//! Pure mapping from a team's economic situation to a loadout, except for the
//! single randomized "hero buy" branch. Cost is deducted by the match engine,
//! not here.

use rand::Rng;

use crate::models::LoadoutKind;

// ============================================================================
// Economy constants
// ============================================================================

/// Bank needed to guarantee a full rifle setup.
pub const FULL_BUY_THRESHOLD: i32 = 4100;
/// A full buy never spends more than this (rifle + armor + kit + nades).
pub const FULL_BUY_SPEND_CAP: i32 = 5500;
/// Below this a forced buy is not worth the broken economy.
pub const FORCE_FLOOR: i32 = 2000;
/// Minimum bank for the randomized hero buy.
pub const HERO_BUY_FLOOR: i32 = 3300;
/// Match-point buys at full power only above this bank.
pub const MATCH_POINT_FULL_POWER_FLOOR: i32 = 3500;

pub const LOSS_BONUS_BASE: i32 = 1400;
pub const LOSS_BONUS_STEP: i32 = 500;
pub const LOSS_BONUS_MAX_STACKS: u8 = 4;

pub const ECO_POWER: f32 = 0.20;

/// First round of each half is a pistol round.
pub fn is_pistol_round(round_number: u8) -> bool {
    round_number == 1 || round_number == 13
}

/// Loss-bonus income a team collects for a loss at the given streak.
/// The ladder runs 1400, 1900, ... 3400, capped at four stacks.
pub fn loss_bonus(loss_bonus_streak: u8) -> i32 {
    let stacks = loss_bonus_streak.min(LOSS_BONUS_MAX_STACKS);
    LOSS_BONUS_BASE + LOSS_BONUS_STEP * stacks as i32
}

/// The outcome of the buy phase for one team.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadoutDecision {
    pub kind: LoadoutKind,
    /// Amount the match engine deducts. Never exceeds the available money.
    pub cost: i32,
    pub power_multiplier: f32,
}

/// Decide what a team buys this round.
///
/// Rules are evaluated in priority order:
/// 1. Pistol rounds and match-point-against rounds spend everything.
/// 2. Post-pistol rounds (2 and 14) below the full-buy threshold force at
///    0.80 power to break the winner's momentum.
/// 3. A bank above the threshold always full-buys.
/// 4. If saving still yields a full buy next round, eco -- with a 30% hero
///    force-buy when the bank allows it.
/// 5. Otherwise force above the floor, eco below it.
pub fn decide_loadout(
    money: i32,
    loss_bonus_streak: u8,
    _my_score: u8,
    enemy_score: u8,
    round_number: u8,
    rng: &mut impl Rng,
) -> LoadoutDecision {
    let pistol = is_pistol_round(round_number);

    // 1. Pistol round or the enemy sits on match point: everything goes.
    if pistol || enemy_score == 12 {
        let kind = if pistol {
            LoadoutKind::Pistol
        } else if money >= FULL_BUY_THRESHOLD {
            LoadoutKind::FullBuy
        } else {
            LoadoutKind::ForceBuy
        };
        let power = if pistol || money >= MATCH_POINT_FULL_POWER_FLOOR {
            1.0
        } else {
            0.85
        };
        return LoadoutDecision { kind, cost: money, power_multiplier: power };
    }

    // 2. Anti-eco breaker straight after a lost pistol.
    if (round_number == 2 || round_number == 14) && money < FULL_BUY_THRESHOLD {
        return LoadoutDecision {
            kind: LoadoutKind::ForceBuy,
            cost: money,
            power_multiplier: 0.80,
        };
    }

    // 3. Healthy bank: full buy.
    if money >= FULL_BUY_THRESHOLD {
        return LoadoutDecision {
            kind: LoadoutKind::FullBuy,
            cost: money.min(FULL_BUY_SPEND_CAP),
            power_multiplier: 1.0,
        };
    }

    // 4. Saving reaches a full buy next round.
    if money + loss_bonus(loss_bonus_streak) >= FULL_BUY_THRESHOLD {
        // Hero buy: sometimes the team refuses to save.
        if money >= HERO_BUY_FLOOR && rng.gen_bool(0.30) {
            return LoadoutDecision {
                kind: LoadoutKind::ForceBuy,
                cost: money,
                power_multiplier: 0.85,
            };
        }
        return LoadoutDecision { kind: LoadoutKind::Eco, cost: 0, power_multiplier: ECO_POWER };
    }

    // 5. Saving does not get there either: force if it buys anything at all.
    if money > FORCE_FLOOR {
        LoadoutDecision { kind: LoadoutKind::ForceBuy, cost: money, power_multiplier: 0.75 }
    } else {
        LoadoutDecision { kind: LoadoutKind::Eco, cost: 0, power_multiplier: ECO_POWER }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_pistol_rounds_spend_everything_at_full_power() {
        let mut rng = rng();
        for round in [1, 13] {
            let d = decide_loadout(800, 0, 0, 0, round, &mut rng);
            assert_eq!(d.kind, LoadoutKind::Pistol);
            assert_eq!(d.cost, 800);
            assert_eq!(d.power_multiplier, 1.0);
        }
    }

    #[test]
    fn test_match_point_against_forces_all_in() {
        let mut rng = rng();
        let rich = decide_loadout(6000, 0, 10, 12, 23, &mut rng);
        assert_eq!(rich.kind, LoadoutKind::FullBuy);
        assert_eq!(rich.cost, 6000);
        assert_eq!(rich.power_multiplier, 1.0);

        let poor = decide_loadout(2500, 2, 10, 12, 23, &mut rng);
        assert_eq!(poor.kind, LoadoutKind::ForceBuy);
        assert_eq!(poor.cost, 2500);
        assert_eq!(poor.power_multiplier, 0.85);
    }

    #[test]
    fn test_post_pistol_force() {
        let mut rng = rng();
        for round in [2, 14] {
            let d = decide_loadout(2200, 1, 0, 1, round, &mut rng);
            assert_eq!(d.kind, LoadoutKind::ForceBuy);
            assert_eq!(d.cost, 2200);
            assert_eq!(d.power_multiplier, 0.80);
        }
        // A won pistol leaves enough for a real buy instead.
        let d = decide_loadout(4300, 0, 1, 0, 2, &mut rng);
        assert_eq!(d.kind, LoadoutKind::FullBuy);
    }

    #[test]
    fn test_full_buy_caps_spend() {
        let mut rng = rng();
        let d = decide_loadout(9000, 0, 5, 5, 10, &mut rng);
        assert_eq!(d.kind, LoadoutKind::FullBuy);
        assert_eq!(d.cost, FULL_BUY_SPEND_CAP);
        assert_eq!(d.power_multiplier, 1.0);
    }

    #[test]
    fn test_save_for_full_buy_ecos() {
        let mut rng = rng();
        // 2500 + 1900 (one loss already banked) = 4400 >= 4100: saving works.
        let d = decide_loadout(2500, 1, 4, 6, 8, &mut rng);
        assert_eq!(d.kind, LoadoutKind::Eco);
        assert_eq!(d.cost, 0);
        assert_eq!(d.power_multiplier, ECO_POWER);
    }

    #[test]
    fn test_hero_buy_fires_roughly_thirty_percent() {
        let mut rng = rng();
        let mut heroes = 0;
        for _ in 0..1000 {
            let d = decide_loadout(3400, 2, 4, 6, 8, &mut rng);
            match d.kind {
                LoadoutKind::ForceBuy => {
                    heroes += 1;
                    assert_eq!(d.cost, 3400);
                    assert_eq!(d.power_multiplier, 0.85);
                }
                LoadoutKind::Eco => assert_eq!(d.cost, 0),
                other => panic!("unexpected loadout {:?}", other),
            }
        }
        assert!((200..=400).contains(&heroes), "hero buys: {}", heroes);
    }

    #[test]
    fn test_broke_team_ecos() {
        let mut rng = rng();
        // 1000 + 1400 < 4100 and 1000 <= force floor: nothing to buy.
        let d = decide_loadout(1000, 0, 3, 7, 9, &mut rng);
        assert_eq!(d.kind, LoadoutKind::Eco);
        assert_eq!(d.cost, 0);
    }

    #[test]
    fn test_desperate_force() {
        let mut rng = rng();
        // 2100 + 1400 = 3500 < 4100: saving never reaches a full buy, and
        // the bank clears the force floor.
        let d = decide_loadout(2100, 0, 2, 9, 12, &mut rng);
        assert_eq!(d.kind, LoadoutKind::ForceBuy);
        assert_eq!(d.cost, 2100);
        assert_eq!(d.power_multiplier, 0.75);
        // Same bank with a loss streak: the bigger bonus makes saving viable.
        let d = decide_loadout(2100, 3, 2, 9, 12, &mut rng);
        assert_eq!(d.kind, LoadoutKind::Eco);
    }

    #[test]
    fn test_loss_bonus_ladder() {
        assert_eq!(loss_bonus(0), 1400);
        assert_eq!(loss_bonus(1), 1900);
        assert_eq!(loss_bonus(4), 3400);
        // Stacks saturate.
        assert_eq!(loss_bonus(9), 3400);
    }

    #[test]
    fn test_cost_never_exceeds_money() {
        let mut rng = rng();
        for money in [0, 1, 799, 800, 2000, 3300, 4100, 5499, 16000] {
            for round in 1..=24u8 {
                for enemy in [0u8, 5, 12] {
                    let d = decide_loadout(money, 1, 4, enemy, round, &mut rng);
                    assert!(d.cost <= money, "cost {} > money {}", d.cost, money);
                    assert!(d.cost >= 0);
                }
            }
        }
    }
}

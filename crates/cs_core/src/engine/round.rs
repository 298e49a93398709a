//! Per-round combat resolution.
//!
//! One round is a small state machine over two alive lists, a countdown
//! clock and a bomb timer. Each tick advances the clock by 4-8 seconds,
//! checks the objective state (plant, detonation, expiry) and resolves one
//! duel. The round ends when a side is wiped or an objective resolves.
//!
//! All randomness is drawn from the injected RNG; the round state itself is
//! created here and discarded on return.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::side::{SideAssignment, TeamSlot};
use crate::models::{
    KillContext, KillEvent, LoadoutKind, Player, PlayerBrief, PlayerRole, RoundEndReason, Side,
    UtilityEvent, UtilityImpact, UtilityKind, WeaponClass,
};

// ============================================================================
// Round constants
// ============================================================================

pub const ROUND_CLOCK_SECONDS: i32 = 115;
pub const BOMB_TIMER_SECONDS: i32 = 40;
const TICK_MIN_SECONDS: i32 = 4;
const TICK_MAX_SECONDS: i32 = 8;

const PLANT_BASE_CHANCE: f32 = 10.0;
const PLANT_LATE_BONUS: f32 = 40.0;
const PLANT_LATE_CLOCK: i32 = 25;
const PLANT_MAN_ADVANTAGE_WEIGHT: f32 = 15.0;
const PLANT_SENSE_WEIGHT: f32 = 0.5;

/// Defenders lose this much map control for the rest of a post-plant round.
const RETAKE_BIAS_PENALTY: f32 = 0.15;
const DEFENDER_BIAS_WEIGHT: f32 = 20.0;
const MOMENTUM_WEIGHT: f32 = 15.0;
const DUEL_NOISE: f32 = 20.0;

const UTILITY_POWER_GATE: f32 = 0.8;
const UTILITY_PROC_CHANCE: f64 = 0.30;

const TRADE_WINDOW_SECONDS: i32 = 5;
const HEADSHOT_AIM_SCALE: f32 = 0.5;

const DEFUSE_SECONDS_WITH_KIT: i32 = 5;
const DEFUSE_SECONDS_NO_KIT: i32 = 10;

/// Everything the resolver needs for one round, relative to team slots A/B.
#[derive(Debug, Clone, Copy)]
pub struct RoundInput<'a> {
    pub squad_a: &'a [&'a Player],
    pub squad_b: &'a [&'a Player],
    pub sides: SideAssignment,
    pub map_ct_bias: f32,
    pub power_a: f32,
    pub power_b: f32,
    pub loadout_a: LoadoutKind,
    pub loadout_b: LoadoutKind,
    pub momentum_a: f32,
    pub momentum_b: f32,
}

/// What one resolved round reports back to the match engine.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub winner_slot: TeamSlot,
    pub winning_side: Side,
    pub reason: RoundEndReason,
    pub bomb_planted: bool,
    pub kill_events: Vec<KillEvent>,
    pub utility_events: Vec<UtilityEvent>,
    /// Last player standing of the winning side, when the round was won from
    /// a 1-versus-many disadvantage.
    pub clutch: Option<PlayerBrief>,
}

struct SquadState<'a> {
    slot: TeamSlot,
    alive: Vec<&'a Player>,
    power: f32,
    loadout: LoadoutKind,
    momentum: f32,
}

impl<'a> SquadState<'a> {
    fn max_game_sense(&self) -> u8 {
        self.alive.iter().map(|p| p.attributes.game_sense).max().unwrap_or(0)
    }
}

fn brief(player: &Player) -> PlayerBrief {
    PlayerBrief { id: player.id, nickname: player.nickname.clone() }
}

/// Weapon class a combatant carries, inferred from buy depth and role.
fn weapon_for(role: PlayerRole, loadout: LoadoutKind) -> WeaponClass {
    match loadout {
        LoadoutKind::FullBuy => {
            if role == PlayerRole::AWPer {
                WeaponClass::Sniper
            } else {
                WeaponClass::Rifle
            }
        }
        LoadoutKind::ForceBuy | LoadoutKind::HalfBuy => WeaponClass::Smg,
        LoadoutKind::Eco | LoadoutKind::Pistol => WeaponClass::Pistol,
    }
}

/// Chance (0-100) that the attackers get the bomb down this tick.
fn plant_chance(clock: i32, attackers: usize, defenders: usize, max_sense: u8) -> f32 {
    let mut chance = PLANT_BASE_CHANCE;
    if clock < PLANT_LATE_CLOCK {
        chance += PLANT_LATE_BONUS;
    }
    chance += PLANT_MAN_ADVANTAGE_WEIGHT * (attackers as f32 - defenders as f32);
    chance += PLANT_SENSE_WEIGHT * max_sense as f32;
    chance.clamp(0.0, 100.0)
}

/// Raw duel score for one combatant before side bonuses.
fn duel_score(player: &Player, power: f32, momentum: f32, rng: &mut ChaCha8Rng) -> f32 {
    let mechanics =
        player.attributes.aim as f32 * 0.6 + player.attributes.reflexes as f32 * 0.4;
    mechanics * power + momentum * MOMENTUM_WEIGHT + rng.gen_range(-DUEL_NOISE..=DUEL_NOISE)
}

/// Pick the attacker-side combatant for an opening duel: the Entry fragger,
/// falling back to whoever is listed first.
fn opening_attacker<'a>(alive: &[&'a Player]) -> &'a Player {
    alive
        .iter()
        .find(|p| p.role == PlayerRole::Entry)
        .copied()
        .unwrap_or(alive[0])
}

/// Pick the defender-side anchor for an opening duel: IGL, then a rifler,
/// then whoever is listed last.
fn opening_defender<'a>(alive: &[&'a Player]) -> &'a Player {
    alive
        .iter()
        .find(|p| p.role == PlayerRole::Igl)
        .or_else(|| alive.iter().find(|p| p.role == PlayerRole::Rifle))
        .copied()
        .unwrap_or(alive[alive.len() - 1])
}

/// Simulate one round.
///
/// Preconditions: both squads hold exactly five players (enforced upstream by
/// `Team::lineup`). Terminates in a bounded number of ticks: the clock or the
/// bomb timer shrinks by at least 4 seconds per iteration and every duel
/// removes a player.
pub fn resolve_round(input: &RoundInput, rng: &mut ChaCha8Rng) -> RoundOutcome {
    let tr_slot = input.sides.tr_slot();
    let (atk_source, atk_power, atk_loadout, atk_momentum) = match tr_slot {
        TeamSlot::A => (input.squad_a, input.power_a, input.loadout_a, input.momentum_a),
        TeamSlot::B => (input.squad_b, input.power_b, input.loadout_b, input.momentum_b),
    };
    let (def_source, def_power, def_loadout, def_momentum) = match tr_slot.other() {
        TeamSlot::A => (input.squad_a, input.power_a, input.loadout_a, input.momentum_a),
        TeamSlot::B => (input.squad_b, input.power_b, input.loadout_b, input.momentum_b),
    };

    let mut attackers = SquadState {
        slot: tr_slot,
        alive: atk_source.to_vec(),
        power: atk_power,
        loadout: atk_loadout,
        momentum: atk_momentum,
    };
    let mut defenders = SquadState {
        slot: tr_slot.other(),
        alive: def_source.to_vec(),
        power: def_power,
        loadout: def_loadout,
        momentum: def_momentum,
    };

    let mut clock = ROUND_CLOCK_SECONDS;
    let mut bomb_timer = BOMB_TIMER_SECONDS;
    let mut planted = false;
    let mut elapsed: i32 = 0;
    let mut opening_duel = true;
    let mut last_death_at: Option<i32> = None;
    let mut kill_events: Vec<KillEvent> = Vec::new();
    let mut utility_events: Vec<UtilityEvent> = Vec::new();
    // (slot of the side down to one, survivor) - set once, checked at the end
    let mut clutch_candidate: Option<(TeamSlot, PlayerBrief)> = None;

    let finish = |winning_side: Side,
                  reason: RoundEndReason,
                  planted: bool,
                  kill_events: Vec<KillEvent>,
                  utility_events: Vec<UtilityEvent>,
                  clutch_candidate: Option<(TeamSlot, PlayerBrief)>,
                  sides: SideAssignment| {
        let winner_slot = sides.slot_on(winning_side);
        let clutch = clutch_candidate
            .filter(|(slot, _)| *slot == winner_slot)
            .map(|(_, player)| player);
        RoundOutcome {
            winner_slot,
            winning_side,
            reason,
            bomb_planted: planted,
            kill_events,
            utility_events,
            clutch,
        }
    };

    loop {
        let step = rng.gen_range(TICK_MIN_SECONDS..=TICK_MAX_SECONDS);
        elapsed += step;

        if !planted {
            clock -= step;
            if clock <= 0 {
                return finish(
                    Side::CT,
                    RoundEndReason::TimeExpired,
                    false,
                    kill_events,
                    utility_events,
                    clutch_candidate,
                    input.sides,
                );
            }
            let chance = plant_chance(
                clock,
                attackers.alive.len(),
                defenders.alive.len(),
                attackers.max_game_sense(),
            );
            if rng.gen_range(0.0..100.0) < chance {
                planted = true;
                bomb_timer = BOMB_TIMER_SECONDS;
                // Site is taken: duel selection resets to an opening pick.
                opening_duel = true;
            }
        } else {
            bomb_timer -= step;
            if bomb_timer <= 0 {
                return finish(
                    Side::TR,
                    RoundEndReason::BombExploded,
                    true,
                    kill_events,
                    utility_events,
                    clutch_candidate,
                    input.sides,
                );
            }
        }

        // Map control favors the defense; a planted bomb erodes it.
        let ct_bias = if planted {
            input.map_ct_bias - RETAKE_BIAS_PENALTY
        } else {
            input.map_ct_bias
        };

        // ------------------------------------------------------------------
        // One duel per tick
        // ------------------------------------------------------------------
        let (atk_player, def_player) = if opening_duel {
            (opening_attacker(&attackers.alive), opening_defender(&defenders.alive))
        } else {
            (
                attackers.alive[rng.gen_range(0..attackers.alive.len())],
                defenders.alive[rng.gen_range(0..defenders.alive.len())],
            )
        };
        opening_duel = false;

        let atk_score = duel_score(atk_player, attackers.power, attackers.momentum, rng);
        let mut def_score = duel_score(def_player, defenders.power, defenders.momentum, rng);
        def_score += (ct_bias - 0.5) * DEFENDER_BIAS_WEIGHT;

        // Entry utility: only worth rolling behind a serious buy.
        let mut flash_landed = false;
        let mut smoke_cover = false;
        if attackers.power > UTILITY_POWER_GATE && rng.gen_bool(UTILITY_PROC_CHANCE) {
            let resisted = (rng.gen_range(0..100) as u8) < def_player.attributes.game_sense;
            if !resisted {
                if rng.gen_bool(0.5) {
                    def_score *= 0.5;
                    flash_landed = true;
                } else {
                    smoke_cover = true;
                }
            }
        }

        let attacker_won = atk_score > def_score;
        let (killer, victim, killer_side, killer_loadout) = if attacker_won {
            (atk_player, def_player, Side::TR, attackers.loadout)
        } else {
            (def_player, atk_player, Side::CT, defenders.loadout)
        };

        if flash_landed {
            utility_events.push(UtilityEvent {
                player: brief(atk_player),
                kind: UtilityKind::Flash,
                impact: if attacker_won {
                    UtilityImpact::AssistedKill
                } else {
                    UtilityImpact::DeniedPosition
                },
                value: rng.gen_range(40..=90),
            });
        } else if smoke_cover {
            utility_events.push(UtilityEvent {
                player: brief(atk_player),
                kind: UtilityKind::Smoke,
                impact: UtilityImpact::DeniedPosition,
                value: rng.gen_range(30..=80),
            });
        }

        let trade_gap = last_death_at.map(|t| elapsed - t);
        let is_trade = trade_gap.map(|gap| gap < TRADE_WINDOW_SECONDS).unwrap_or(false);
        let killer_alive_count = if attacker_won {
            attackers.alive.len()
        } else {
            defenders.alive.len()
        };
        let enemy_alive_count = if attacker_won {
            defenders.alive.len()
        } else {
            attackers.alive.len()
        };
        let context = if kill_events.is_empty() && !planted {
            KillContext::Opening
        } else if killer_alive_count == 1 && enemy_alive_count >= 2 {
            KillContext::Clutch
        } else if planted {
            if attacker_won {
                KillContext::Postplant
            } else {
                KillContext::Retake
            }
        } else {
            KillContext::Mid
        };

        let headshot =
            rng.gen_range(0.0..1.0) < (killer.attributes.aim as f32 / 100.0) * HEADSHOT_AIM_SCALE;

        kill_events.push(KillEvent {
            killer: brief(killer),
            victim: brief(victim),
            killer_side,
            weapon: weapon_for(killer.role, killer_loadout),
            is_headshot: headshot,
            is_trade_kill: is_trade,
            trade_time: trade_gap.filter(|_| is_trade).unwrap_or(0) as f32,
            was_flashed: flash_landed && attacker_won,
            through_smoke: smoke_cover && attacker_won,
            distance: rng.gen_range(5.0..40.0),
            time_in_round: elapsed.max(0) as u16,
            context,
        });
        last_death_at = Some(elapsed);

        let losers = if attacker_won { &mut defenders } else { &mut attackers };
        losers.alive.retain(|p| p.id != victim.id);

        if clutch_candidate.is_none() {
            for (squad, enemies) in [
                (&attackers, defenders.alive.len()),
                (&defenders, attackers.alive.len()),
            ] {
                if squad.alive.len() == 1 && enemies >= 2 {
                    clutch_candidate = Some((squad.slot, brief(squad.alive[0])));
                }
            }
        }

        // ------------------------------------------------------------------
        // Wipe terminations
        // ------------------------------------------------------------------
        if attackers.alive.is_empty() {
            if !planted {
                return finish(
                    Side::CT,
                    RoundEndReason::Elimination,
                    false,
                    kill_events,
                    utility_events,
                    clutch_candidate,
                    input.sides,
                );
            }
            // Retake complete; the survivors still have to beat the timer.
            let kit_chance = match defenders.loadout {
                LoadoutKind::FullBuy => 0.85,
                LoadoutKind::ForceBuy | LoadoutKind::HalfBuy => 0.45,
                LoadoutKind::Eco | LoadoutKind::Pistol => 0.10,
            };
            let needed = if rng.gen_bool(kit_chance) {
                DEFUSE_SECONDS_WITH_KIT
            } else {
                DEFUSE_SECONDS_NO_KIT
            };
            let (side, reason) = if bomb_timer < needed {
                (Side::TR, RoundEndReason::BombExploded)
            } else {
                (Side::CT, RoundEndReason::BombDefused)
            };
            return finish(
                side,
                reason,
                true,
                kill_events,
                utility_events,
                clutch_candidate,
                input.sides,
            );
        }
        if defenders.alive.is_empty() {
            let reason = if planted {
                // Nobody left to defuse.
                RoundEndReason::BombExploded
            } else {
                RoundEndReason::Elimination
            };
            return finish(
                Side::TR,
                reason,
                planted,
                kill_events,
                utility_events,
                clutch_candidate,
                input.sides,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerAttributes, Side};
    use rand::SeedableRng;

    fn squad(prefix: &str, skill: u8) -> Vec<Player> {
        let roles = [
            PlayerRole::Entry,
            PlayerRole::AWPer,
            PlayerRole::Support,
            PlayerRole::Igl,
            PlayerRole::Lurker,
        ];
        roles
            .iter()
            .enumerate()
            .map(|(i, &role)| {
                Player::new(
                    format!("{}{}", prefix, i),
                    "SE".into(),
                    24,
                    role,
                    PlayerAttributes::from_raw(
                        skill as i16,
                        skill as i16,
                        skill as i16,
                        skill as i16,
                        skill as i16,
                        skill as i16,
                    ),
                    skill,
                )
            })
            .collect()
    }

    fn input<'a>(
        squad_a: &'a [&'a Player],
        squad_b: &'a [&'a Player],
        side_a: Side,
    ) -> RoundInput<'a> {
        RoundInput {
            squad_a,
            squad_b,
            sides: SideAssignment::new(side_a),
            map_ct_bias: 0.5,
            power_a: 1.0,
            power_b: 1.0,
            loadout_a: LoadoutKind::FullBuy,
            loadout_b: LoadoutKind::FullBuy,
            momentum_a: 0.0,
            momentum_b: 0.0,
        }
    }

    #[test]
    fn test_round_always_terminates_with_consistent_outcome() {
        let a = squad("a", 70);
        let b = squad("b", 70);
        let refs_a: Vec<&Player> = a.iter().collect();
        let refs_b: Vec<&Player> = b.iter().collect();

        for seed in 0..500u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let side_a = if seed % 2 == 0 { Side::CT } else { Side::TR };
            let inp = input(&refs_a, &refs_b, side_a);
            let outcome = resolve_round(&inp, &mut rng);

            // Winner slot and winning side agree with the assignment.
            assert_eq!(inp.sides.side_of(outcome.winner_slot), outcome.winning_side);
            // At most 9 deaths (one side keeps at least one player... unless
            // the bomb ends it first, which kills nobody extra).
            assert!(outcome.kill_events.len() <= 9);
            match outcome.reason {
                RoundEndReason::TimeExpired => {
                    assert_eq!(outcome.winning_side, Side::CT);
                    assert!(!outcome.bomb_planted);
                }
                RoundEndReason::BombExploded => {
                    assert_eq!(outcome.winning_side, Side::TR);
                    assert!(outcome.bomb_planted);
                }
                RoundEndReason::BombDefused => {
                    assert_eq!(outcome.winning_side, Side::CT);
                    assert!(outcome.bomb_planted);
                }
                RoundEndReason::Elimination => {}
            }
        }
    }

    #[test]
    fn test_opening_kill_is_first_and_tagged() {
        let a = squad("a", 70);
        let b = squad("b", 70);
        let refs_a: Vec<&Player> = a.iter().collect();
        let refs_b: Vec<&Player> = b.iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let outcome = resolve_round(&input(&refs_a, &refs_b, Side::TR), &mut rng);

        if let Some(first) = outcome.kill_events.first() {
            // The very first engagement involves the Entry fragger and the
            // anchor when it happens before the plant.
            if first.context == KillContext::Opening {
                let names = [&first.killer.nickname, &first.victim.nickname];
                assert!(names.iter().any(|n| n.as_str() == "a0" || n.as_str() == "b3"));
            }
        }
        for kill in outcome.kill_events.iter().skip(1) {
            assert_ne!(kill.context, KillContext::Opening);
        }
    }

    #[test]
    fn test_stronger_side_wins_more() {
        let strong = squad("s", 90);
        let weak = squad("w", 40);
        let refs_s: Vec<&Player> = strong.iter().collect();
        let refs_w: Vec<&Player> = weak.iter().collect();

        let mut strong_wins = 0;
        for seed in 0..300u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let side_a = if seed % 2 == 0 { Side::CT } else { Side::TR };
            let outcome = resolve_round(&input(&refs_s, &refs_w, side_a), &mut rng);
            if outcome.winner_slot == TeamSlot::A {
                strong_wins += 1;
            }
        }
        assert!(strong_wins > 240, "strong side won only {}/300", strong_wins);
    }

    #[test]
    fn test_deterministic_given_seed() {
        let a = squad("a", 75);
        let b = squad("b", 65);
        let refs_a: Vec<&Player> = a.iter().collect();
        let refs_b: Vec<&Player> = b.iter().collect();

        let run = || {
            let mut rng = ChaCha8Rng::seed_from_u64(99);
            resolve_round(&input(&refs_a, &refs_b, Side::CT), &mut rng)
        };
        let first = run();
        let second = run();
        assert_eq!(first.winner_slot, second.winner_slot);
        assert_eq!(first.reason, second.reason);
        assert_eq!(first.kill_events, second.kill_events);
    }

    #[test]
    fn test_eco_against_full_buy_rarely_wins() {
        let a = squad("a", 70);
        let b = squad("b", 70);
        let refs_a: Vec<&Player> = a.iter().collect();
        let refs_b: Vec<&Player> = b.iter().collect();

        let mut eco_wins = 0;
        for seed in 0..300u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut inp = input(&refs_a, &refs_b, Side::CT);
            inp.power_b = 0.20;
            inp.loadout_b = LoadoutKind::Eco;
            let outcome = resolve_round(&inp, &mut rng);
            if outcome.winner_slot == TeamSlot::B {
                eco_wins += 1;
            }
        }
        assert!(eco_wins < 60, "eco side won {}/300", eco_wins);
    }
}

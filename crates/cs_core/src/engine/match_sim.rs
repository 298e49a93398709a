//! Match orchestration.
//!
//! Drives the round loop: queries the loadout policy for both teams, deducts
//! the spend, resolves the round, applies the post-round economy and
//! momentum, and assembles the final [`MatchResult`]. Fully deterministic
//! given the injected RNG; `simulate_match_seeded` pins a match to a `u64`
//! seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::economy::{self, decide_loadout};
use super::narrative::{round_message, StatsTracker};
use super::round::{resolve_round, RoundInput};
use super::side::{SideAssignment, TeamSlot};
use crate::error::Result;
use crate::models::{map, MatchResult, RoundLog, Team};

// ============================================================================
// Match constants
// ============================================================================

pub const START_MONEY: i32 = 800;
pub const WIN_REWARD: i32 = 3250;
pub const MONEY_CAP: i32 = 16000;
pub const MATCH_WIN_SCORE: u8 = 13;
/// First round of the second half; money, bonuses and sides reset here.
pub const HALFTIME_ROUND: u8 = 13;

const MOMENTUM_GAIN: f32 = 0.05;
const MOMENTUM_CAP: f32 = 0.25;
const MOMENTUM_LOSS: f32 = 0.10;

/// Mutable per-team economy state, round to round.
#[derive(Debug, Clone, Copy)]
struct TeamEconomy {
    money: i32,
    loss_streak: u8,
    momentum: f32,
}

impl TeamEconomy {
    fn fresh() -> Self {
        Self { money: START_MONEY, loss_streak: 0, momentum: 0.0 }
    }

    fn award_win(&mut self) {
        self.money = (self.money + WIN_REWARD).min(MONEY_CAP);
        self.loss_streak = self.loss_streak.saturating_sub(1);
        self.momentum = (self.momentum + MOMENTUM_GAIN).min(MOMENTUM_CAP);
    }

    fn award_loss(&mut self) {
        self.money = (self.money + economy::loss_bonus(self.loss_streak)).min(MONEY_CAP);
        self.loss_streak = (self.loss_streak + 1).min(economy::LOSS_BONUS_MAX_STACKS);
        self.momentum = (self.momentum - MOMENTUM_LOSS).max(0.0);
    }
}

/// Simulate a full map between two teams.
///
/// Both teams are read-only inputs; aggregate updates (prestige, ranking,
/// standings) are the orchestrator's job once results are collected.
pub fn simulate_match(
    team_a: &Team,
    team_b: &Team,
    map_id: &str,
    rng: &mut ChaCha8Rng,
) -> Result<MatchResult> {
    let lineup_a = team_a.lineup()?;
    let lineup_b = team_b.lineup()?;
    let map_info = map::lookup(map_id);

    debug!(
        "simulating {} vs {} on {} (ct bias {:.2})",
        team_a.name, team_b.name, map_info.display_name, map_info.ct_bias
    );

    let mut sides = SideAssignment::random(rng);
    let mut econ_a = TeamEconomy::fresh();
    let mut econ_b = TeamEconomy::fresh();
    let mut score_a: u8 = 0;
    let mut score_b: u8 = 0;
    let mut round: u8 = 1;
    let mut rounds: Vec<RoundLog> = Vec::new();
    let mut tracker = StatsTracker::new(team_a.id, &lineup_a, team_b.id, &lineup_b);

    while score_a < MATCH_WIN_SCORE && score_b < MATCH_WIN_SCORE {
        if round == HALFTIME_ROUND {
            econ_a = TeamEconomy::fresh();
            econ_b = TeamEconomy::fresh();
            sides = sides.swapped();
            rounds.push(RoundLog::system(
                "-- HALFTIME: teams swap sides --",
                START_MONEY,
                START_MONEY,
            ));
        }

        let decision_a =
            decide_loadout(econ_a.money, econ_a.loss_streak, score_a, score_b, round, rng);
        let decision_b =
            decide_loadout(econ_b.money, econ_b.loss_streak, score_b, score_a, round, rng);
        econ_a.money -= decision_a.cost;
        econ_b.money -= decision_b.cost;

        let outcome = resolve_round(
            &RoundInput {
                squad_a: &lineup_a,
                squad_b: &lineup_b,
                sides,
                map_ct_bias: map_info.ct_bias,
                power_a: decision_a.power_multiplier,
                power_b: decision_b.power_multiplier,
                loadout_a: decision_a.kind,
                loadout_b: decision_b.kind,
                momentum_a: econ_a.momentum,
                momentum_b: econ_b.momentum,
            },
            rng,
        );

        let (winner_team, winner_decision, loser_decision) = match outcome.winner_slot {
            TeamSlot::A => {
                score_a += 1;
                econ_a.award_win();
                econ_b.award_loss();
                (team_a, decision_a, decision_b)
            }
            TeamSlot::B => {
                score_b += 1;
                econ_b.award_win();
                econ_a.award_loss();
                (team_b, decision_b, decision_a)
            }
        };

        tracker.record_round(&outcome);
        let message = round_message(
            round,
            &outcome,
            &winner_team.name,
            winner_decision.kind,
            loser_decision.kind,
        );

        let ct_team = match sides.ct_slot() {
            TeamSlot::A => team_a,
            TeamSlot::B => team_b,
        };
        rounds.push(RoundLog {
            round_number: round,
            winner_id: Some(winner_team.id),
            winning_side: Some(outcome.winning_side),
            ct_id: Some(ct_team.id),
            message,
            loadout_a: Some(decision_a.kind),
            loadout_b: Some(decision_b.kind),
            money_a: econ_a.money,
            money_b: econ_b.money,
            reason: Some(outcome.reason),
            kill_feed: outcome.kill_events,
            utility_events: outcome.utility_events,
        });

        round += 1;
    }

    let (winner_id, loser_id) = if score_a >= MATCH_WIN_SCORE {
        (team_a.id, team_b.id)
    } else {
        (team_b.id, team_a.id)
    };
    debug!(
        "{} {} - {} {} on {}",
        team_a.name, score_a, score_b, team_b.name, map_info.display_name
    );

    Ok(MatchResult {
        winner_id,
        loser_id,
        team_a_id: team_a.id,
        team_b_id: team_b.id,
        score_a,
        score_b,
        map_name: map_info.display_name,
        rounds,
        player_stats: tracker.into_stats(),
    })
}

/// Deterministic entry point: same seed, same teams, same map, same result.
pub fn simulate_match_seeded(
    team_a: &Team,
    team_b: &Team,
    map_id: &str,
    seed: u64,
) -> Result<MatchResult> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    simulate_match(team_a, team_b, map_id, &mut rng)
}

/// Derive a fresh match seed from a coarser RNG (e.g. one seed per round of
/// a tournament).
pub fn draw_seed(rng: &mut impl Rng) -> u64 {
    rng.gen()
}

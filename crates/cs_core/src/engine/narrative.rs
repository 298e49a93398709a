//! Round narrative and per-player bookkeeping.
//!
//! Turns a resolved round into the one-line message carried by the round log
//! and accumulates the kill feed into per-player match stats. Phrasing is
//! deliberately plain; presentation layers that want drama build their own
//! text from the structured feed.

use std::collections::HashMap;

use uuid::Uuid;

use super::round::RoundOutcome;
use crate::models::{KillContext, LoadoutKind, Player, PlayerMatchStats, RoundEndReason};

/// A winner on a broken bank against full rifles is the upset worth calling
/// out.
fn is_eco_win(winner_loadout: LoadoutKind, loser_loadout: LoadoutKind) -> bool {
    matches!(winner_loadout, LoadoutKind::Eco | LoadoutKind::Pistol)
        && loser_loadout == LoadoutKind::FullBuy
}

/// Largest kill count by a single player this round, with the player's name.
fn top_fragger(outcome: &RoundOutcome) -> Option<(String, usize)> {
    let mut counts: HashMap<Uuid, (String, usize)> = HashMap::new();
    for kill in &outcome.kill_events {
        let entry = counts
            .entry(kill.killer.id)
            .or_insert_with(|| (kill.killer.nickname.clone(), 0));
        entry.1 += 1;
    }
    counts.into_values().max_by_key(|(_, count)| *count)
}

fn closer(reason: RoundEndReason) -> &'static str {
    match reason {
        RoundEndReason::Elimination => "clean sweep",
        RoundEndReason::BombExploded => "the bomb detonates",
        RoundEndReason::BombDefused => "defused in time",
        RoundEndReason::TimeExpired => "the clock runs out",
    }
}

/// Build the round-log message for one resolved round.
pub fn round_message(
    round_number: u8,
    outcome: &RoundOutcome,
    winner_name: &str,
    winner_loadout: LoadoutKind,
    loser_loadout: LoadoutKind,
) -> String {
    if let Some(player) = &outcome.clutch {
        return format!(
            "{} clutches the round for {} ({})",
            player.nickname,
            winner_name,
            closer(outcome.reason)
        );
    }
    if let Some((nickname, count)) = top_fragger(outcome) {
        if count >= 3 {
            let label = match count {
                5 => "an ACE",
                4 => "a quad kill",
                _ => "a triple kill",
            };
            return format!("{} drops {} as {} take round {}", nickname, label, winner_name, round_number);
        }
    }
    if is_eco_win(winner_loadout, loser_loadout) {
        return format!("ECO WIN! {} beat full rifles on a broken bank", winner_name);
    }
    if let Some(first) = outcome.kill_events.first() {
        if first.context == KillContext::Opening && first.killer_side == outcome.winning_side {
            let hs = if first.is_headshot { " (HS)" } else { "" };
            return format!(
                "{} wins the opening duel{} and {} close it out: {}",
                first.killer.nickname,
                hs,
                winner_name,
                closer(outcome.reason)
            );
        }
    }
    format!("{} take round {}: {}", winner_name, round_number, closer(outcome.reason))
}

/// Accumulates the kill feed of every round into per-player match stats.
pub struct StatsTracker {
    entries: HashMap<Uuid, PlayerMatchStats>,
    order: Vec<Uuid>,
}

impl StatsTracker {
    pub fn new(
        team_a_id: Uuid,
        lineup_a: &[&Player],
        team_b_id: Uuid,
        lineup_b: &[&Player],
    ) -> Self {
        let mut entries = HashMap::new();
        let mut order = Vec::new();
        for (team_id, lineup) in [(team_a_id, lineup_a), (team_b_id, lineup_b)] {
            for player in lineup {
                entries.insert(
                    player.id,
                    PlayerMatchStats {
                        player_id: player.id,
                        nickname: player.nickname.clone(),
                        team_id,
                        kills: 0,
                        deaths: 0,
                        headshots: 0,
                        opening_kills: 0,
                        clutch_rounds: 0,
                    },
                );
                order.push(player.id);
            }
        }
        Self { entries, order }
    }

    pub fn record_round(&mut self, outcome: &RoundOutcome) {
        for kill in &outcome.kill_events {
            if let Some(killer) = self.entries.get_mut(&kill.killer.id) {
                killer.kills += 1;
                if kill.is_headshot {
                    killer.headshots += 1;
                }
                if kill.context == KillContext::Opening {
                    killer.opening_kills += 1;
                }
            }
            if let Some(victim) = self.entries.get_mut(&kill.victim.id) {
                victim.deaths += 1;
            }
        }
        // The resolver only reports a clutch for the winning side.
        if let Some(player) = &outcome.clutch {
            if let Some(entry) = self.entries.get_mut(&player.id) {
                entry.clutch_rounds += 1;
            }
        }
    }

    /// Stats in lineup order (team A first).
    pub fn into_stats(mut self) -> Vec<PlayerMatchStats> {
        self.order
            .iter()
            .filter_map(|id| self.entries.remove(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::side::TeamSlot;
    use crate::models::{KillEvent, PlayerBrief, Side, WeaponClass};

    fn kill(killer: (&str, Uuid), victim: (&str, Uuid), context: KillContext) -> KillEvent {
        KillEvent {
            killer: PlayerBrief { id: killer.1, nickname: killer.0.into() },
            victim: PlayerBrief { id: victim.1, nickname: victim.0.into() },
            killer_side: Side::TR,
            weapon: WeaponClass::Rifle,
            is_headshot: true,
            is_trade_kill: false,
            trade_time: 0.0,
            was_flashed: false,
            through_smoke: false,
            distance: 12.0,
            time_in_round: 30,
            context,
        }
    }

    fn outcome_with(kills: Vec<KillEvent>) -> RoundOutcome {
        RoundOutcome {
            winner_slot: TeamSlot::A,
            winning_side: Side::TR,
            reason: RoundEndReason::Elimination,
            bomb_planted: false,
            kill_events: kills,
            utility_events: Vec::new(),
            clutch: None,
        }
    }

    #[test]
    fn test_ace_message() {
        let ace = Uuid::new_v4();
        let kills = (0..5)
            .map(|i| kill(("hero", ace), ("victim", Uuid::new_v4()), if i == 0 { KillContext::Opening } else { KillContext::Mid }))
            .collect();
        let msg = round_message(7, &outcome_with(kills), "Alpha", LoadoutKind::FullBuy, LoadoutKind::FullBuy);
        assert!(msg.contains("ACE"), "{}", msg);
        assert!(msg.contains("hero"), "{}", msg);
    }

    #[test]
    fn test_eco_win_message() {
        let kills = vec![kill(("x", Uuid::new_v4()), ("y", Uuid::new_v4()), KillContext::Mid)];
        let msg = round_message(5, &outcome_with(kills), "Alpha", LoadoutKind::Eco, LoadoutKind::FullBuy);
        assert!(msg.contains("ECO WIN"), "{}", msg);
    }

    #[test]
    fn test_clutch_takes_priority() {
        let clutcher = Uuid::new_v4();
        let mut outcome = outcome_with(vec![kill(("cold", clutcher), ("y", Uuid::new_v4()), KillContext::Clutch)]);
        outcome.clutch = Some(PlayerBrief { id: clutcher, nickname: "cold".into() });
        let msg = round_message(20, &outcome, "Alpha", LoadoutKind::Eco, LoadoutKind::FullBuy);
        assert!(msg.contains("clutches"), "{}", msg);
    }

    #[test]
    fn test_stats_tracker_counts() {
        use crate::models::{PlayerAttributes, PlayerRole};
        let mk = |nick: &str| {
            Player::new(
                nick.into(),
                "BR".into(),
                22,
                PlayerRole::Rifle,
                PlayerAttributes::from_raw(70, 70, 70, 70, 70, 70),
                80,
            )
        };
        let a: Vec<Player> = (0..5).map(|i| mk(&format!("a{}", i))).collect();
        let b: Vec<Player> = (0..5).map(|i| mk(&format!("b{}", i))).collect();
        let refs_a: Vec<&Player> = a.iter().collect();
        let refs_b: Vec<&Player> = b.iter().collect();
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();

        let mut tracker = StatsTracker::new(team_a, &refs_a, team_b, &refs_b);
        let outcome = outcome_with(vec![
            kill((&a[0].nickname, a[0].id), (&b[0].nickname, b[0].id), KillContext::Opening),
            kill((&a[0].nickname, a[0].id), (&b[1].nickname, b[1].id), KillContext::Mid),
        ]);
        tracker.record_round(&outcome);
        let stats = tracker.into_stats();

        assert_eq!(stats.len(), 10);
        let a0 = stats.iter().find(|s| s.player_id == a[0].id).unwrap();
        assert_eq!(a0.kills, 2);
        assert_eq!(a0.opening_kills, 1);
        assert_eq!(a0.headshots, 2);
        assert_eq!(a0.team_id, team_a);
        let b0 = stats.iter().find(|s| s.player_id == b[0].id).unwrap();
        assert_eq!(b0.deaths, 1);
    }
}

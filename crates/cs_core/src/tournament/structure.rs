//! Pairing generation.
//!
//! Pure functions over a seed-ordered participant list (plus standings where
//! the format needs them). The scheduler owns match execution; these only
//! decide who plays whom.

use std::collections::{BTreeMap, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use super::types::{MatchPairing, SwissStanding};
use crate::error::TournamentError;

/// Swiss pairings for one round.
///
/// Teams are bucketed by current record (already-qualified and eliminated
/// teams sit out), shuffled within each bucket and paired off sequentially.
/// An odd leftover in a bucket receives a bye for the round.
pub fn generate_swiss_pairings(
    teams: &[Uuid],
    standings: &HashMap<Uuid, SwissStanding>,
    rng: &mut impl Rng,
) -> Vec<MatchPairing> {
    let mut groups: BTreeMap<(u8, u8), Vec<Uuid>> = BTreeMap::new();
    for id in teams {
        let record = standings.get(id).cloned().unwrap_or_default();
        if !record.is_live() {
            continue;
        }
        groups.entry(record.record_key()).or_default().push(*id);
    }

    let mut pairings = Vec::new();
    for ((wins, losses), mut group) in groups {
        group.shuffle(rng);
        for pair in group.chunks(2) {
            match pair {
                [a, b] => pairings.push(MatchPairing {
                    team_a: *a,
                    team_b: *b,
                    stage: format!("Swiss Round ({}-{})", wins, losses),
                }),
                [lone] => {
                    // Odd bucket: free win, not modeled as a match.
                    info!("Swiss bye for team {} at record {}-{}", lone, wins, losses);
                }
                _ => unreachable!("chunks(2) yields 1 or 2 items"),
            }
        }
    }
    pairings
}

/// GSL-style opening round for a four-team group: 1v4 and 2v3.
pub fn generate_gsl_opening(
    group: &[Uuid],
) -> std::result::Result<Vec<MatchPairing>, TournamentError> {
    if group.len() != 4 {
        return Err(TournamentError::InvalidParticipantCount {
            expected: 4,
            found: group.len(),
        });
    }
    Ok(vec![
        MatchPairing {
            team_a: group[0],
            team_b: group[3],
            stage: "Opening Match A".to_string(),
        },
        MatchPairing {
            team_a: group[1],
            team_b: group[2],
            stage: "Opening Match B".to_string(),
        },
    ])
}

fn bracket_stage_label(field_size: usize) -> String {
    match field_size {
        2 => "Grand Final".to_string(),
        4 => "Semi-Final".to_string(),
        8 => "Quarter-Final".to_string(),
        _ => "Playoff Round".to_string(),
    }
}

/// One round of a seeded bracket: position `i` against `n - 1 - i`.
///
/// Assumes the slice is already seed-sorted (1st vs last, 2nd vs
/// second-to-last, ...).
pub fn generate_playoffs(seeded: &[Uuid]) -> Vec<MatchPairing> {
    let n = seeded.len();
    let stage = bracket_stage_label(n);
    (0..n / 2)
        .map(|i| MatchPairing {
            team_a: seeded[i],
            team_b: seeded[n - 1 - i],
            stage: stage.clone(),
        })
        .collect()
}

//! Tournament progression.
//!
//! Results flow in once per round (the scheduler simulates every match of a
//! round, then reports the batch atomically); standings and the stage state
//! machine advance here. Unknown team ids in a reported result are a hard
//! error: dropping them silently would corrupt the bracket.

use rand::Rng;
use tracing::{debug, warn};
use uuid::Uuid;

use super::structure::{generate_gsl_opening, generate_playoffs, generate_swiss_pairings};
use super::types::{ActiveTournament, MatchPairing, TournamentFormat, TournamentStage};
use crate::error::TournamentError;
use crate::models::MatchResult;

type Result<T> = std::result::Result<T, TournamentError>;

impl ActiveTournament {
    /// Pairings for the current stage. Terminal stages produce nothing.
    pub fn next_pairings(&self, rng: &mut impl Rng) -> Result<Vec<MatchPairing>> {
        match &self.stage {
            TournamentStage::SwissRound { .. } => Ok(generate_swiss_pairings(
                &self.participants,
                &self.swiss_standings,
                rng,
            )),
            TournamentStage::GroupOpening => {
                let group = if self.participants.len() >= 4 {
                    &self.participants[..4]
                } else {
                    &self.participants[..]
                };
                generate_gsl_opening(group)
            }
            TournamentStage::BracketRound { field, .. } => Ok(generate_playoffs(field)),
            TournamentStage::Finished { .. } | TournamentStage::NotImplemented { .. } => {
                Ok(Vec::new())
            }
        }
    }

    /// Fold one round of results into standings and advance the stage.
    pub fn process_round(&mut self, results: &[MatchResult]) -> Result<()> {
        match self.stage.clone() {
            TournamentStage::SwissRound { .. } => self.process_swiss_round(results),
            TournamentStage::BracketRound { round, field } => {
                self.process_bracket_round(results, round, &field)
            }
            TournamentStage::GroupOpening => {
                self.match_history.extend(results.iter().cloned());
                warn!(
                    "{}: GSL group advancement is not implemented; tournament halted",
                    self.name
                );
                self.stage = TournamentStage::NotImplemented {
                    context: "GSL group advancement past the opening round".to_string(),
                };
                Ok(())
            }
            TournamentStage::Finished { .. } | TournamentStage::NotImplemented { .. } => {
                Err(TournamentError::StageClosed(format!("{:?}", self.stage)))
            }
        }
    }

    fn process_swiss_round(&mut self, results: &[MatchResult]) -> Result<()> {
        // Validate the whole batch before mutating anything.
        for result in results {
            for id in [result.winner_id, result.loser_id] {
                if !self.swiss_standings.contains_key(&id) {
                    return Err(TournamentError::UnknownTeam(id));
                }
            }
        }
        for result in results {
            let winner = self
                .swiss_standings
                .get_mut(&result.winner_id)
                .expect("validated above");
            winner.wins += 1;
            winner.played.push(result.loser_id);
            let loser = self
                .swiss_standings
                .get_mut(&result.loser_id)
                .expect("validated above");
            loser.losses += 1;
            loser.played.push(result.winner_id);
        }
        self.match_history.extend(results.iter().cloned());
        self.current_round += 1;

        let all_decided = self.swiss_standings.values().all(|s| !s.is_live());
        if self.current_round > self.total_rounds || all_decided {
            self.finish_swiss_stage();
        } else {
            self.stage = TournamentStage::SwissRound { round: self.current_round };
        }
        Ok(())
    }

    /// Swiss is over: promote the qualified field to a bracket, or end the
    /// tournament when there is nothing left to bracket.
    fn finish_swiss_stage(&mut self) {
        let mut qualified: Vec<Uuid> = self
            .participants
            .iter()
            .copied()
            .filter(|id| {
                self.swiss_standings
                    .get(id)
                    .map(|s| s.is_qualified())
                    .unwrap_or(false)
            })
            .collect();
        // Seed by record: more wins first, fewer losses breaking ties.
        qualified.sort_by_key(|id| {
            let s = &self.swiss_standings[id];
            (std::cmp::Reverse(s.wins), s.losses)
        });

        if qualified.len() < 2 {
            debug!(
                "{}: only {} team(s) qualified, finishing without a bracket",
                self.name,
                qualified.len()
            );
            self.stage = TournamentStage::Finished { champion: qualified.first().copied() };
            return;
        }

        debug!("{}: Swiss complete, {} teams advance", self.name, qualified.len());
        self.format = TournamentFormat::SingleElimination;
        self.current_round = 1;
        self.total_rounds = bracket_rounds(qualified.len());
        self.stage = TournamentStage::BracketRound { round: 1, field: qualified };
    }

    fn process_bracket_round(
        &mut self,
        results: &[MatchResult],
        round: u8,
        field: &[Uuid],
    ) -> Result<()> {
        let expected = field.len() / 2;
        if results.len() != expected {
            return Err(TournamentError::InvalidParticipantCount {
                expected,
                found: results.len(),
            });
        }
        for result in results {
            for id in [result.winner_id, result.loser_id] {
                if !field.contains(&id) {
                    return Err(TournamentError::UnknownTeam(id));
                }
            }
        }

        let survivors: Vec<Uuid> = field
            .iter()
            .copied()
            .filter(|id| results.iter().any(|r| r.winner_id == *id))
            .collect();
        self.match_history.extend(results.iter().cloned());
        self.current_round += 1;

        if survivors.len() <= 1 {
            self.stage = TournamentStage::Finished { champion: survivors.first().copied() };
        } else {
            self.stage = TournamentStage::BracketRound { round: round + 1, field: survivors };
        }
        Ok(())
    }
}

/// Rounds a single-elimination bracket needs for a field of this size.
fn bracket_rounds(field_size: usize) -> u8 {
    let mut rounds = 0u8;
    let mut size = field_size.max(1);
    while size > 1 {
        size = (size + 1) / 2;
        rounds += 1;
    }
    rounds
}

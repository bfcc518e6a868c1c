//! Knockout bracket progression.
//!
//! A round only ever moves forward: results fill in, the round completes,
//! and either the champion is decided or the winners are drawn into a new
//! round. Polling an incomplete round is a no-op, so callers can try after
//! every week without tracking readiness themselves.

use crate::models::{CupRound, CupState, MatchResult, TeamId};
use crate::schedule::draw_round;
use rand_chacha::ChaCha8Rng;

/// What a progression attempt did.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Current round still has unresolved fixtures (or the cup is already
    /// decided). Nothing changed.
    NotReady,
    /// The last tie resolved and the cup has a winner.
    ChampionDecided { champion: TeamId },
    /// Winners were drawn into a freshly scheduled round.
    NextRoundDrawn { name: String, fixture_count: usize },
}

/// Name a round from its tie count, counting "Round N" from the front of the
/// cup when the bracket is not a clean power of two.
pub fn round_name(fixture_count: usize, round_number: usize) -> String {
    match fixture_count {
        1 => "Final".to_string(),
        2 => "Semi-Final".to_string(),
        4 => "Quarter-Final".to_string(),
        8 => "Round of 16".to_string(),
        16 => "Round of 32".to_string(),
        _ => format!("Round {}", round_number),
    }
}

/// Write a result into the active round and feed its goals to the scorer
/// ledger. Returns false when the slot does not exist or already has a
/// result; results are write-once.
pub fn apply_result(cup: &mut CupState, fixture_index: usize, result: MatchResult) -> bool {
    let round_index = cup.current_round;
    let Some(round) = cup.rounds.get_mut(round_index) else {
        return false;
    };
    let Some(fixture) = round.fixtures.get_mut(fixture_index) else {
        return false;
    };
    if fixture.is_resolved() {
        return false;
    }
    for event in result.events.iter().filter(|e| e.is_goal()) {
        if let Some(scorer) = event.player {
            cup.stats.record_goal(scorer);
        }
    }
    fixture.result = Some(result);
    true
}

/// Advance the bracket if the active round is fully resolved.
///
/// On completion the winners either crown a champion or get drawn into the
/// next round, pinned to `next_week`. Ties that somehow carry a level result
/// with no shootout produce no winner and drop out of the draw.
pub fn try_advance(
    cup: &mut CupState,
    season: u32,
    next_week: u32,
    rng: &mut ChaCha8Rng,
) -> AdvanceOutcome {
    if cup.is_decided() {
        return AdvanceOutcome::NotReady;
    }
    let round_index = cup.current_round;
    let Some(round) = cup.rounds.get(round_index) else {
        return AdvanceOutcome::NotReady;
    };
    if round.completed || !round.all_resolved() {
        return AdvanceOutcome::NotReady;
    }

    let mut winners: Vec<TeamId> = Vec::with_capacity(round.fixtures.len());
    for fixture in &round.fixtures {
        let decided = fixture
            .result
            .as_ref()
            .and_then(|r| r.winner(fixture.home, fixture.away));
        match decided {
            Some(team) => winners.push(team),
            None => log::warn!(
                "{} tie {} v {} completed without a winner",
                cup.competition.display_name(),
                fixture.home,
                fixture.away
            ),
        }
    }

    cup.rounds[round_index].completed = true;

    match winners.len() {
        0 => {
            log::warn!("{} round produced no winners", cup.competition.display_name());
            AdvanceOutcome::NotReady
        }
        1 => {
            let champion = winners[0];
            cup.champion = Some(champion);
            cup.stats.champions.push((season, champion));
            log::info!(
                "{} champion decided: {}",
                cup.competition.display_name(),
                champion
            );
            AdvanceOutcome::ChampionDecided { champion }
        }
        _ => {
            let fixtures = draw_round(&winners, cup.competition, next_week, rng);
            let name = round_name(fixtures.len(), cup.rounds.len() + 1);
            let fixture_count = fixtures.len();
            cup.rounds.push(CupRound::new(name.clone(), fixtures));
            cup.current_round += 1;
            AdvanceOutcome::NextRoundDrawn { name, fixture_count }
        }
    }
}

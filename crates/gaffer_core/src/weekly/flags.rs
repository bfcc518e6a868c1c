//! Notable-week detection.
//!
//! Flags fire once per season: the fired set rides in the world snapshot and
//! a candidate already present there stays silent. No trigger state lives in
//! the engine.

use super::ResolvedFixture;
use crate::models::{Division, EventFlag, TeamId, TeamTier, WorldState};
use std::collections::BTreeSet;

/// Goals across the week, all competitions, that make a goal rush.
const GOAL_RUSH_GOALS: u32 = 10;
/// Single-match winning margin that makes a thrashing.
const THRASHING_MARGIN: i32 = 4;

/// Detect this week's candidates, fold the new ones into the world's fired
/// set, and report only those that actually fired now.
pub fn evaluate(
    world: &mut WorldState,
    resolved: &[ResolvedFixture],
    user_team: TeamId,
) -> Vec<EventFlag> {
    let mut fired = Vec::new();
    for flag in detect(world, resolved, user_team) {
        if world.triggered_events.insert(flag) {
            log::info!("event flag: {}", flag.display_name());
            fired.push(flag);
        }
    }
    fired
}

/// Pure detection over one week's resolved fixtures.
pub fn detect(
    world: &WorldState,
    resolved: &[ResolvedFixture],
    user_team: TeamId,
) -> BTreeSet<EventFlag> {
    let mut flags = BTreeSet::new();

    let total_goals: u32 = resolved
        .iter()
        .map(|r| r.result.home_score as u32 + r.result.away_score as u32)
        .sum();
    if total_goals >= GOAL_RUSH_GOALS {
        flags.insert(EventFlag::GoalRush);
    }

    let mut user_played = 0usize;
    let mut user_won = 0usize;

    for entry in resolved {
        let margin =
            (entry.result.home_score as i32 - entry.result.away_score as i32).abs();
        if margin >= THRASHING_MARGIN {
            flags.insert(EventFlag::Thrashing);
        }

        let winner = entry.result.winner(entry.home, entry.away);
        if entry.home == user_team || entry.away == user_team {
            user_played += 1;
            if winner == Some(user_team) {
                user_won += 1;
            }
        }
        let Some(winner) = winner else {
            continue;
        };
        let loser = if winner == entry.home { entry.away } else { entry.home };

        if tier_of(world, winner) == Some(TeamTier::Lower)
            && tier_of(world, loser) == Some(TeamTier::Top)
        {
            flags.insert(EventFlag::UpsetWin);
        }
        if entry.competition.is_cup()
            && world.division_of(winner) == Some(Division::Second)
            && world.division_of(loser) == Some(Division::First)
        {
            flags.insert(EventFlag::CupShock);
        }
    }

    if user_played > 0 && user_played == user_won {
        flags.insert(EventFlag::CleanSweepWeek);
    }

    flags
}

fn tier_of(world: &WorldState, id: TeamId) -> Option<TeamTier> {
    world.team(id).map(|t| t.tier)
}

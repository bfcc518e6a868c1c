//! Weekly resolution: one call plays out every fixture due in the snapshot's
//! current week and hands back the advanced world.

pub mod flags;

use crate::config::SimParams;
use crate::cup::{self, AdvanceOutcome};
use crate::engine::{simulate_match, MatchSide};
use crate::error::{EngineError, Result};
use crate::league;
use crate::models::{
    Competition, EventFlag, FinanceSnapshot, MatchResult, TableRow, Team, TeamId, WorldState,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// One request to play a week. Carries the whole world; the engine holds no
/// state of its own between calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub user_team_id: TeamId,
    #[serde(default)]
    pub finance: FinanceSnapshot,
    pub world: WorldState,
}

/// A fixture resolved this week, in resolution order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedFixture {
    pub competition: Competition,
    pub week: u32,
    pub home: TeamId,
    pub away: TeamId,
    pub result: MatchResult,
}

/// A cup round that finished this week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletedRound {
    pub competition: Competition,
    pub round_name: String,
    /// Set when the finished round was the final.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub champion: Option<TeamId>,
    /// Name of the freshly drawn round, when one followed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_round: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekOutcome {
    pub world: WorldState,
    pub resolved: Vec<ResolvedFixture>,
    pub completed_rounds: Vec<CompletedRound>,
    pub new_flags: Vec<EventFlag>,
    pub confidence_delta: f32,
}

/// Play every unresolved fixture scheduled for the snapshot's current week,
/// update standings, brackets, morale and flags, and advance the week.
///
/// Fixtures naming a team the world does not know are skipped with a warning
/// and stay unresolved. Replaying the same request reproduces the same
/// outcome; feeding a week whose fixtures are already resolved changes
/// nothing but the week counter.
pub fn simulate_week(request: WeekRequest, params: &SimParams) -> Result<WeekOutcome> {
    let WeekRequest { seed, user_team_id, finance, mut world, .. } = request;
    if world.team(user_team_id).is_none() {
        return Err(EngineError::UnknownTeam(user_team_id));
    }

    let week = world.week;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut resolved: Vec<ResolvedFixture> = Vec::new();

    resolve_league(&mut world, week, params, &mut rng, &mut resolved);
    let completed_rounds = resolve_cups(&mut world, week, params, &mut rng, &mut resolved);

    for division in [&mut world.tables.first, &mut world.tables.second] {
        league::sort_table(division, &world.teams);
    }

    shift_morale(&mut world, &resolved);
    let new_flags = flags::evaluate(&mut world, &resolved, user_team_id);
    let confidence_delta = confidence_delta(&resolved, user_team_id, finance, params);

    log::info!(
        "week {}: {} fixtures resolved, {} rounds completed",
        week,
        resolved.len(),
        completed_rounds.len()
    );
    world.week = week + 1;

    Ok(WeekOutcome { world, resolved, completed_rounds, new_flags, confidence_delta })
}

fn find_team(teams: &[Team], id: TeamId) -> Option<&Team> {
    teams.iter().find(|t| t.id == id)
}

/// League row for a side, or a neutral stand-in when the table has none.
fn league_row(world: &WorldState, id: TeamId) -> TableRow {
    let row = world
        .division_of(id)
        .and_then(|d| world.tables.for_division(d).row(id))
        .cloned();
    match row {
        Some(row) => row,
        None => {
            log::warn!("no table row for {}, using a neutral one", id);
            TableRow::neutral(id)
        }
    }
}

fn resolve_league(
    world: &mut WorldState,
    week: u32,
    params: &SimParams,
    rng: &mut ChaCha8Rng,
    resolved: &mut Vec<ResolvedFixture>,
) {
    let due: Vec<usize> = world
        .fixtures
        .iter()
        .enumerate()
        .filter(|(_, f)| f.week == week && !f.is_resolved())
        .map(|(i, _)| i)
        .collect();

    for index in due {
        let (home_id, away_id) = (world.fixtures[index].home, world.fixtures[index].away);
        let result = {
            let Some(home_team) = find_team(&world.teams, home_id) else {
                log::warn!("skipping fixture with unknown home team {}", home_id);
                continue;
            };
            let Some(away_team) = find_team(&world.teams, away_id) else {
                log::warn!("skipping fixture with unknown away team {}", away_id);
                continue;
            };
            let home_row = league_row(world, home_id);
            let away_row = league_row(world, away_id);
            simulate_match(
                MatchSide { team: home_team, row: &home_row },
                MatchSide { team: away_team, row: &away_row },
                false,
                params,
                rng,
            )
        };

        world.fixtures[index].result = Some(result.clone());
        if let Some(division) = world.division_of(home_id) {
            league::fold_result(world.tables.for_division_mut(division), &world.fixtures[index]);
        }
        resolved.push(ResolvedFixture {
            competition: Competition::League,
            week,
            home: home_id,
            away: away_id,
            result,
        });
    }
}

fn resolve_cups(
    world: &mut WorldState,
    week: u32,
    params: &SimParams,
    rng: &mut ChaCha8Rng,
    resolved: &mut Vec<ResolvedFixture>,
) -> Vec<CompletedRound> {
    let mut completed = Vec::new();

    for ci in 0..world.cups.len() {
        let due: Vec<usize> = {
            let cup = &world.cups[ci];
            match cup.rounds.get(cup.current_round) {
                Some(round) => round
                    .fixtures
                    .iter()
                    .enumerate()
                    .filter(|(_, f)| f.week == week && !f.is_resolved())
                    .map(|(i, _)| i)
                    .collect(),
                None => Vec::new(),
            }
        };

        for fi in due {
            let (home_id, away_id, competition) = {
                let cup = &world.cups[ci];
                let fixture = &cup.rounds[cup.current_round].fixtures[fi];
                (fixture.home, fixture.away, fixture.competition)
            };
            let Some(home_team) = find_team(&world.teams, home_id) else {
                log::warn!("skipping cup tie with unknown home team {}", home_id);
                continue;
            };
            let Some(away_team) = find_team(&world.teams, away_id) else {
                log::warn!("skipping cup tie with unknown away team {}", away_id);
                continue;
            };
            let home_row = TableRow::neutral(home_id);
            let away_row = TableRow::neutral(away_id);
            let result = simulate_match(
                MatchSide { team: home_team, row: &home_row },
                MatchSide { team: away_team, row: &away_row },
                true,
                params,
                rng,
            );
            cup::apply_result(&mut world.cups[ci], fi, result.clone());
            resolved.push(ResolvedFixture {
                competition,
                week,
                home: home_id,
                away: away_id,
                result,
            });
        }

        let round_name = {
            let cup = &world.cups[ci];
            cup.rounds.get(cup.current_round).map(|r| r.name.clone())
        };
        let season = world.season;
        match cup::try_advance(&mut world.cups[ci], season, week + params.cup_round_gap, rng) {
            AdvanceOutcome::NotReady => {}
            AdvanceOutcome::ChampionDecided { champion } => {
                completed.push(CompletedRound {
                    competition: world.cups[ci].competition,
                    round_name: round_name.unwrap_or_default(),
                    champion: Some(champion),
                    next_round: None,
                });
            }
            AdvanceOutcome::NextRoundDrawn { name, .. } => {
                completed.push(CompletedRound {
                    competition: world.cups[ci].competition,
                    round_name: round_name.unwrap_or_default(),
                    champion: None,
                    next_round: Some(name),
                });
            }
        }
    }

    completed
}

/// Winners cheer up a step, losers sour a step, both the club mood and every
/// squad member's.
fn shift_morale(world: &mut WorldState, resolved: &[ResolvedFixture]) {
    for entry in resolved {
        let Some(winner) = entry.result.winner(entry.home, entry.away) else {
            continue;
        };
        let loser = if winner == entry.home { entry.away } else { entry.home };
        if let Some(team) = world.team_mut(winner) {
            team.morale = team.morale.raised();
            for player in &mut team.squad {
                player.morale = player.morale.raised();
            }
        }
        if let Some(team) = world.team_mut(loser) {
            team.morale = team.morale.lowered();
            for player in &mut team.squad {
                player.morale = player.morale.lowered();
            }
        }
    }
}

/// Weekly confidence swing from the user's perspective: results first, then
/// the financial term.
fn confidence_delta(
    resolved: &[ResolvedFixture],
    user_team: TeamId,
    finance: FinanceSnapshot,
    params: &SimParams,
) -> f32 {
    let mut delta = 0.0;
    for entry in resolved {
        if entry.home != user_team && entry.away != user_team {
            continue;
        }
        let winner = entry.result.winner(entry.home, entry.away);
        delta += match (entry.competition, winner) {
            (Competition::League, Some(w)) if w == user_team => params.confidence_league_win,
            (Competition::League, Some(_)) => params.confidence_league_loss,
            (Competition::League, None) => params.confidence_league_draw,
            (_, Some(w)) if w == user_team => params.confidence_cup_win,
            (_, Some(_)) => params.confidence_cup_loss,
            (_, None) => 0.0,
        };
    }

    let net = finance.weekly_income as f32 - finance.weekly_wages as f32;
    delta
        + (net / params.confidence_income_scale)
            .clamp(-params.confidence_income_clamp, params.confidence_income_clamp)
}

// ============================================================================
// Tests
// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fixture, Morale};
    use crate::world::generate_world;

    fn request(world: WorldState, seed: u64) -> WeekRequest {
        let user_team_id = world.teams[0].id;
        WeekRequest {
            schema_version: crate::SCHEMA_VERSION,
            seed,
            user_team_id,
            finance: FinanceSnapshot::default(),
            world,
        }
    }

    fn world(seed: u64) -> WorldState {
        generate_world(seed, 6, &SimParams::default()).unwrap()
    }

    #[test]
    fn resolves_every_league_fixture_of_the_week() {
        let outcome = simulate_week(request(world(1), 5), &SimParams::default()).unwrap();
        assert_eq!(outcome.world.week, 2);
        // 3 fixtures per division in week 1.
        assert_eq!(outcome.resolved.len(), 6);
        for fixture in outcome.world.fixtures.iter().filter(|f| f.week == 1) {
            assert!(fixture.is_resolved());
        }
        for table in [&outcome.world.tables.first, &outcome.world.tables.second] {
            for row in &table.rows {
                assert_eq!(row.played, 1);
            }
        }
    }

    #[test]
    fn same_request_gives_the_same_outcome() {
        let w = world(2);
        let a = simulate_week(request(w.clone(), 9), &SimParams::default()).unwrap();
        let b = simulate_week(request(w, 9), &SimParams::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tables_are_sorted_with_positions_after_the_week() {
        let outcome = simulate_week(request(world(3), 7), &SimParams::default()).unwrap();
        for table in [&outcome.world.tables.first, &outcome.world.tables.second] {
            for (i, row) in table.rows.iter().enumerate() {
                assert_eq!(row.position, i as u32 + 1);
            }
            for pair in table.rows.windows(2) {
                assert!(pair[0].points >= pair[1].points);
            }
        }
    }

    #[test]
    fn rejects_an_unknown_user_team() {
        let mut req = request(world(4), 1);
        req.user_team_id = TeamId(999);
        let err = simulate_week(req, &SimParams::default()).unwrap_err();
        assert!(matches!(err, EngineError::UnknownTeam(TeamId(999))));
    }

    #[test]
    fn unknown_fixture_team_is_skipped_not_fatal() {
        let mut w = world(5);
        w.fixtures.push(Fixture::new(1, Competition::League, TeamId(998), TeamId(999)));
        let outcome = simulate_week(request(w, 3), &SimParams::default()).unwrap();
        assert_eq!(outcome.resolved.len(), 6);
        let ghost = outcome
            .world
            .fixtures
            .iter()
            .find(|f| f.home == TeamId(998))
            .unwrap();
        assert!(!ghost.is_resolved());
    }

    #[test]
    fn replaying_a_resolved_week_changes_no_results() {
        let first = simulate_week(request(world(6), 11), &SimParams::default()).unwrap();
        let mut rewound = first.world.clone();
        rewound.week = 1;
        let second = simulate_week(request(rewound, 11), &SimParams::default()).unwrap();
        assert!(second.resolved.is_empty());
        assert_eq!(second.world.tables, first.world.tables);
        assert_eq!(second.world.fixtures, first.world.fixtures);
        assert_eq!(second.world.week, 2);
    }

    #[test]
    fn cup_week_resolves_ties_and_draws_the_next_round() {
        let params = SimParams::default();
        let mut w = world(7);
        w.week = params.cup_a_first_week;
        let outcome = simulate_week(request(w, 13), &params).unwrap();

        let cup = &outcome.world.cups[0];
        assert_eq!(cup.rounds.len(), 2, "first round should complete in one week");
        assert!(cup.rounds[0].completed);
        assert!(cup.rounds[0].fixtures.iter().all(|f| f.is_resolved()));
        // 12 entrants: 6 ties then 3.
        assert_eq!(cup.rounds[1].fixtures.len(), 3);
        assert!(cup.rounds[1]
            .fixtures
            .iter()
            .all(|f| f.week == params.cup_a_first_week + params.cup_round_gap));

        let entry = outcome
            .completed_rounds
            .iter()
            .find(|c| c.competition == Competition::CupA)
            .unwrap();
        assert!(entry.champion.is_none());
        assert!(entry.next_round.is_some());
    }

    #[test]
    fn cup_ties_never_end_level() {
        let params = SimParams::default();
        let mut w = world(8);
        w.week = params.cup_b_first_week;
        let outcome = simulate_week(request(w, 17), &params).unwrap();
        for entry in outcome.resolved.iter().filter(|r| r.competition.is_cup()) {
            assert!(entry.result.winner(entry.home, entry.away).is_some());
        }
    }

    #[test]
    fn winners_cheer_up_and_losers_sour() {
        let w = world(9);
        let outcome = simulate_week(request(w.clone(), 19), &SimParams::default()).unwrap();
        let decided = outcome
            .resolved
            .iter()
            .find_map(|r| r.result.winner(r.home, r.away).map(|win| (r, win)));
        let Some((entry, winner)) = decided else {
            // All six draws is possible in principle; the seed above does not
            // produce it.
            panic!("no decided fixture in the week");
        };
        let loser = if winner == entry.home { entry.away } else { entry.home };
        assert_eq!(outcome.world.team(winner).unwrap().morale, Morale::Content);
        assert_eq!(outcome.world.team(loser).unwrap().morale, Morale::Unhappy);
        assert!(outcome
            .world
            .team(winner)
            .unwrap()
            .squad
            .iter()
            .all(|p| p.morale == Morale::Content));
    }

    #[test]
    fn confidence_is_financial_only_when_the_user_rests() {
        let mut w = world(10);
        w.week = 99;
        let mut req = request(w, 23);
        req.finance = FinanceSnapshot { weekly_income: 25_000, weekly_wages: 5_000 };
        let outcome = simulate_week(req, &SimParams::default()).unwrap();
        assert!(outcome.resolved.is_empty());
        assert_eq!(outcome.confidence_delta, 2.0);
    }

    #[test]
    fn confidence_tracks_the_user_result() {
        let params = SimParams::default();
        let w = world(11);
        let req = request(w, 29);
        let user = req.user_team_id;
        let outcome = simulate_week(req, &params).unwrap();
        let entry = outcome
            .resolved
            .iter()
            .find(|r| r.home == user || r.away == user)
            .unwrap();
        let expected = match entry.result.winner(entry.home, entry.away) {
            Some(w) if w == user => params.confidence_league_win,
            Some(_) => params.confidence_league_loss,
            None => params.confidence_league_draw,
        };
        assert_eq!(outcome.confidence_delta, expected);
    }

    #[test]
    fn flags_report_matches_the_world_set() {
        let mut w = world(12);
        w.week = 2;
        let outcome = simulate_week(request(w, 31), &SimParams::default()).unwrap();
        for flag in &outcome.new_flags {
            assert!(outcome.world.triggered_events.contains(flag));
        }
    }
}

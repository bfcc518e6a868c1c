//! Season turnover: roster aging, retirements, youth regeneration,
//! promotion and relegation, and the rebuild of the next season's calendar.

use crate::config::SimParams;
use crate::league;
use crate::models::{Division, DivisionTables, PlayerId, Team, TeamId, WorldState};
use crate::world::{self, gen};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

/// Roll the world into the next season and return the fresh state.
///
/// The input is untouched; callers decide whether to adopt the result.
/// Contract years run down but expiry is not acted on here, the engine does
/// not negotiate.
pub fn transition_season(
    world: &WorldState,
    params: &SimParams,
    rng: &mut ChaCha8Rng,
) -> WorldState {
    let mut teams = world.teams.clone();
    let mut next_player_id = world.next_player_id;

    for team in &mut teams {
        turnover_roster(team, params, &mut next_player_id, rng);
    }

    exchange_divisions(&mut teams, &world.tables, params);

    let (fixtures, tables, mut cups) = world::build_calendar(&teams, params, rng);
    for cup in &mut cups {
        if let Some(prev) = world.cups.iter().find(|c| c.competition == cup.competition) {
            cup.stats.champions = prev.stats.champions.clone();
        }
    }

    log::info!(
        "season {} -> {}: {} teams carried over",
        world.season,
        world.season + 1,
        teams.len()
    );

    WorldState {
        season: world.season + 1,
        week: 1,
        teams,
        fixtures,
        tables,
        cups,
        triggered_events: BTreeSet::new(),
        next_player_id,
    }
}

/// Age a squad one year, retire the old guard, and regenerate from the
/// academy up to the squad floor.
fn turnover_roster(
    team: &mut Team,
    params: &SimParams,
    next_player_id: &mut u32,
    rng: &mut ChaCha8Rng,
) {
    for player in &mut team.squad {
        player.age = player.age.saturating_add(1);
        player.contract_years = player.contract_years.saturating_sub(1);
    }

    let before = team.squad.len();
    team.squad.retain(|p| {
        if p.age > params.forced_retirement_age {
            return false;
        }
        if p.age > params.retirement_roll_age {
            return !rng.gen_bool(params.retirement_chance);
        }
        true
    });
    let retired = before - team.squad.len();
    if retired > 0 {
        log::debug!("{}: {} retirements", team.name, retired);
    }

    for prospect in &mut team.academy {
        prospect.age = prospect.age.saturating_add(1);
    }
    team.academy.retain(|p| p.age <= params.academy_age_cap);

    // Promote the best academy players first, mint fresh youth only once the
    // pool runs dry.
    team.academy.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
    while team.squad.len() < params.squad_floor && !team.academy.is_empty() {
        team.squad.push(team.academy.remove(0));
    }
    while team.squad.len() < params.squad_floor {
        team.squad.push(gen::academy_prospect(PlayerId(*next_player_id), team.tier, rng));
        *next_player_id += 1;
    }

    let intake = rng.gen_range(params.academy_intake_min..=params.academy_intake_max);
    for _ in 0..intake {
        team.academy.push(gen::academy_prospect(PlayerId(*next_player_id), team.tier, rng));
        *next_player_id += 1;
    }

    gen::order_squad(&mut team.squad);
}

/// Swap the bottom of the first division with the top of the second, judged
/// by the final sorted standings.
fn exchange_divisions(teams: &mut [Team], final_tables: &DivisionTables, params: &SimParams) {
    let mut first = final_tables.first.clone();
    let mut second = final_tables.second.clone();
    league::sort_table(&mut first, teams);
    league::sort_table(&mut second, teams);

    let count = params.exchange_count.min(first.rows.len()).min(second.rows.len());
    let relegated: Vec<TeamId> = first.rows.iter().rev().take(count).map(|r| r.team).collect();
    let promoted: Vec<TeamId> = second.rows.iter().take(count).map(|r| r.team).collect();

    for team in teams.iter_mut() {
        if relegated.contains(&team.id) {
            team.division = Division::Second;
            log::info!("{} relegated to the second division", team.name);
        } else if promoted.contains(&team.id) {
            team.division = Division::First;
            log::info!("{} promoted to the first division", team.name);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Competition, Morale, Player, Position};
    use crate::world::generate_world;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn base_world(seed: u64) -> WorldState {
        generate_world(seed, 6, &SimParams::default()).unwrap()
    }

    fn veteran(id: u32, age: u8) -> Player {
        Player {
            id: PlayerId(id),
            name: format!("Veteran {}", id),
            position: Position::DF,
            rating: 70,
            age,
            value: 10_000,
            wage: 400,
            morale: Morale::Neutral,
            contract_years: 1,
            transfer_listed: false,
        }
    }

    #[test]
    fn players_age_one_year() {
        let world = base_world(1);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let next = transition_season(&world, &SimParams::default(), &mut rng);

        let young: Vec<(PlayerId, u8)> = world.teams[0]
            .squad
            .iter()
            .filter(|p| p.age < 30)
            .map(|p| (p.id, p.age))
            .collect();
        assert!(!young.is_empty());
        let after = next.team(world.teams[0].id).unwrap();
        for (id, age) in young {
            let aged = after
                .squad
                .iter()
                .chain(after.academy.iter())
                .find(|p| p.id == id)
                .unwrap();
            assert_eq!(aged.age, age + 1);
        }
    }

    #[test]
    fn past_forced_age_always_retires() {
        let mut world = base_world(3);
        world.teams[0].squad.push(veteran(9000, 40));
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let next = transition_season(&world, &SimParams::default(), &mut rng);
        let after = next.team(world.teams[0].id).unwrap();
        assert!(after.squad.iter().all(|p| p.id != PlayerId(9000)));
        assert!(after.squad.iter().all(|p| p.age <= 39));
    }

    #[test]
    fn late_career_retirement_is_a_chance_not_a_rule() {
        let mut world = base_world(5);
        for i in 0..30 {
            world.teams[0].squad.push(veteran(9100 + i, 36));
        }
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let next = transition_season(&world, &SimParams::default(), &mut rng);
        let survivors = next
            .team(world.teams[0].id)
            .unwrap()
            .squad
            .iter()
            .filter(|p| p.id.0 >= 9100)
            .count();
        assert!(survivors > 0, "every veteran retired");
        assert!(survivors < 30, "no veteran retired");
    }

    #[test]
    fn thin_squads_regenerate_to_the_floor() {
        let mut world = base_world(7);
        world.teams[0].squad.truncate(6);
        world.teams[0].academy.clear();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let params = SimParams::default();
        let next = transition_season(&world, &params, &mut rng);
        let after = next.team(world.teams[0].id).unwrap();
        assert!(after.squad.len() >= params.squad_floor);
    }

    #[test]
    fn youth_regeneration_respects_the_tier_floor() {
        let mut world = base_world(9);
        let team = &mut world.teams[0];
        team.squad.truncate(4);
        team.academy.clear();
        let tier = team.tier;
        let id = team.id;
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let next = transition_season(&world, &SimParams::default(), &mut rng);
        let floor = *gen::youth_rating_range(tier).start();
        for p in next.team(id).unwrap().squad.iter().filter(|p| p.age <= 19) {
            assert!(p.rating >= floor, "{} below tier floor", p.rating);
        }
    }

    #[test]
    fn academy_drops_overage_prospects() {
        let mut world = base_world(11);
        let mut old_prospect = veteran(9200, 19);
        old_prospect.age = 19;
        world.teams[0].academy.push(old_prospect);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let next = transition_season(&world, &SimParams::default(), &mut rng);
        let after = next.team(world.teams[0].id).unwrap();
        assert!(after.academy.iter().all(|p| p.age <= 19));
        assert!(after.academy.iter().all(|p| p.id != PlayerId(9200)));
    }

    #[test]
    fn academy_receives_a_fresh_intake() {
        let world = base_world(13);
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let params = SimParams::default();
        let next = transition_season(&world, &params, &mut rng);
        for team in &next.teams {
            assert!(
                team.academy.len() >= params.academy_intake_min,
                "{} academy too small",
                team.name
            );
        }
    }

    #[test]
    fn division_exchange_is_symmetric() {
        let mut world = base_world(15);
        // Hand the top of the second division a dominant record.
        let climber = world.tables.second.rows[0].team;
        world.tables.second.row_mut(climber).unwrap().record(4, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let next = transition_season(&world, &SimParams::default(), &mut rng);

        let first: Vec<TeamId> = next
            .teams
            .iter()
            .filter(|t| t.division == Division::First)
            .map(|t| t.id)
            .collect();
        let second: Vec<TeamId> = next
            .teams
            .iter()
            .filter(|t| t.division == Division::Second)
            .map(|t| t.id)
            .collect();
        assert_eq!(first.len(), 6);
        assert_eq!(second.len(), 6);
        assert!(first.contains(&climber));

        let before: HashSet<TeamId> = world.teams.iter().map(|t| t.id).collect();
        let after: HashSet<TeamId> = first.into_iter().chain(second).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn exchange_moves_exactly_the_configured_count() {
        let world = base_world(17);
        let mut rng = ChaCha8Rng::seed_from_u64(18);
        let params = SimParams::default();
        let next = transition_season(&world, &params, &mut rng);

        let moved_up = next
            .teams
            .iter()
            .filter(|t| {
                t.division == Division::First
                    && world.team(t.id).unwrap().division == Division::Second
            })
            .count();
        let moved_down = next
            .teams
            .iter()
            .filter(|t| {
                t.division == Division::Second
                    && world.team(t.id).unwrap().division == Division::First
            })
            .count();
        assert_eq!(moved_up, params.exchange_count);
        assert_eq!(moved_down, params.exchange_count);
    }

    #[test]
    fn next_season_starts_clean() {
        let mut world = base_world(19);
        world.triggered_events.insert(crate::models::EventFlag::GoalRush);
        world.week = 30;
        let mut rng = ChaCha8Rng::seed_from_u64(20);
        let next = transition_season(&world, &SimParams::default(), &mut rng);

        assert_eq!(next.season, world.season + 1);
        assert_eq!(next.week, 1);
        assert!(next.triggered_events.is_empty());
        assert!(next.fixtures.iter().all(|f| !f.is_resolved()));
        for table in [&next.tables.first, &next.tables.second] {
            assert!(table.rows.iter().all(|r| r.played == 0 && r.points == 0));
        }
        for cup in &next.cups {
            assert_eq!(cup.rounds.len(), 1);
            assert!(cup.champion.is_none());
        }
        assert!(next.next_player_id >= world.next_player_id);
    }

    #[test]
    fn champions_history_survives_the_turnover() {
        let mut world = base_world(21);
        let holder = world.teams[2].id;
        world.cups[0].stats.champions.push((world.season, holder));
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let next = transition_season(&world, &SimParams::default(), &mut rng);
        let cup_a =
            next.cups.iter().find(|c| c.competition == Competition::CupA).unwrap();
        assert_eq!(cup_a.stats.champions, vec![(world.season, holder)]);
        // Per-season tallies reset with the redraw.
        assert!(cup_a.stats.top_scorers.is_empty());
    }

    #[test]
    fn source_world_is_left_untouched() {
        let world = base_world(23);
        let snapshot = world.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(24);
        let _ = transition_season(&world, &SimParams::default(), &mut rng);
        assert_eq!(world, snapshot);
    }
}

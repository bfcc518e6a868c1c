//! World generation: two divisions of generated clubs, their squads and
//! academies, plus the opening season calendar.

use super::{gen, names};
use crate::config::SimParams;
use crate::cup::round_name;
use crate::error::{EngineError, Result};
use crate::models::{
    Competition, CupRound, CupState, Division, DivisionTables, Fixture, LeagueTable, Morale,
    PlayerId, Position, TableRow, TacticalStance, Team, TeamId, TeamTier, WorldState,
};
use crate::schedule::{double_round_robin, draw_round};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

/// Senior squad shape at generation: 20 players.
const SQUAD_QUOTAS: [(Position, usize); 4] =
    [(Position::GK, 2), (Position::DF, 7), (Position::MF, 6), (Position::FW, 5)];

/// Build a fresh world from a seed.
///
/// `teams_per_division` must be even (the round-robin pairs everyone each
/// week) and at least 4 so relegation still leaves a league behind.
pub fn generate_world(seed: u64, teams_per_division: u32, params: &SimParams) -> Result<WorldState> {
    if teams_per_division < 4 || teams_per_division % 2 != 0 {
        return Err(EngineError::UnsupportedConfig(format!(
            "teams_per_division must be even and >= 4, got {}",
            teams_per_division
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let total = (teams_per_division * 2) as usize;
    let club_names = names::club_names(total, &mut rng);
    if club_names.len() < total {
        return Err(EngineError::UnsupportedConfig(format!(
            "club name pool supports at most {} teams",
            club_names.len()
        )));
    }

    let mut next_player_id: u32 = 1;
    let mut teams = Vec::with_capacity(total);
    for (index, name) in club_names.into_iter().enumerate() {
        let division =
            if (index as u32) < teams_per_division { Division::First } else { Division::Second };
        let half = (index as u32) % teams_per_division < teams_per_division / 2;
        let tier = match (division, half) {
            (Division::First, true) => TeamTier::Top,
            (Division::First, false) => TeamTier::Mid,
            (Division::Second, true) => TeamTier::Mid,
            (Division::Second, false) => TeamTier::Lower,
        };
        let stance = match rng.gen_range(0u8..4) {
            0 => TacticalStance::Attacking,
            3 => TacticalStance::Defensive,
            _ => TacticalStance::Balanced,
        };

        let mut squad = Vec::with_capacity(20);
        for (position, quota) in SQUAD_QUOTAS {
            for _ in 0..quota {
                squad.push(gen::senior_player(
                    PlayerId(next_player_id),
                    position,
                    tier,
                    &mut rng,
                ));
                next_player_id += 1;
            }
        }
        gen::order_squad(&mut squad);

        let intake = rng.gen_range(params.academy_intake_min..=params.academy_intake_max);
        let mut academy = Vec::with_capacity(intake);
        for _ in 0..intake {
            academy.push(gen::academy_prospect(PlayerId(next_player_id), tier, &mut rng));
            next_player_id += 1;
        }

        teams.push(Team {
            id: TeamId(index as u32),
            name,
            tier,
            division,
            morale: Morale::Neutral,
            stance,
            squad,
            academy,
        });
    }

    let (fixtures, tables, cups) = build_calendar(&teams, params, &mut rng);
    log::info!(
        "generated world: {} teams, {} league fixtures, seed {}",
        teams.len(),
        fixtures.len(),
        seed
    );

    Ok(WorldState {
        season: 1,
        week: 1,
        teams,
        fixtures,
        tables,
        cups,
        triggered_events: BTreeSet::new(),
        next_player_id,
    })
}

/// Assemble the season calendar for an existing set of teams: league
/// schedules starting at week 1, zeroed standings in alphabetical order, and
/// opening cup rounds over every club at their fixed weeks.
pub fn build_calendar(
    teams: &[Team],
    params: &SimParams,
    rng: &mut ChaCha8Rng,
) -> (Vec<Fixture>, DivisionTables, Vec<CupState>) {
    let first_ids: Vec<TeamId> =
        teams.iter().filter(|t| t.division == Division::First).map(|t| t.id).collect();
    let second_ids: Vec<TeamId> =
        teams.iter().filter(|t| t.division == Division::Second).map(|t| t.id).collect();

    let mut fixtures = double_round_robin(&first_ids, 1);
    fixtures.extend(double_round_robin(&second_ids, 1));

    let tables = DivisionTables {
        first: zero_table(teams, Division::First),
        second: zero_table(teams, Division::Second),
    };

    let everyone: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let cups = vec![
        opening_cup(Competition::CupA, &everyone, params.cup_a_first_week, rng),
        opening_cup(Competition::CupB, &everyone, params.cup_b_first_week, rng),
    ];

    (fixtures, tables, cups)
}

fn zero_table(teams: &[Team], division: Division) -> LeagueTable {
    let mut members: Vec<&Team> = teams.iter().filter(|t| t.division == division).collect();
    members.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    LeagueTable::new(members.into_iter().map(|t| TableRow::new(t.id)).collect())
}

fn opening_cup(
    competition: Competition,
    pool: &[TeamId],
    week: u32,
    rng: &mut ChaCha8Rng,
) -> CupState {
    let fixtures = draw_round(pool, competition, week, rng);
    let name = round_name(fixtures.len(), 1);
    CupState::new(competition, CupRound::new(name, fixtures))
}

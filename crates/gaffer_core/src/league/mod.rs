//! League table maintenance.
//!
//! Results fold into rows as they arrive; the table re-sorts once per week
//! after the fold. Cup fixtures never come through here.

use crate::models::{Fixture, LeagueTable, Team, TeamId};
use std::collections::BTreeMap;

/// Fold one resolved league fixture into both of its rows.
///
/// A missing row means the fixture references a team outside this division;
/// the fixture is counted for whichever side is present and the gap is
/// logged, mirroring the skip policy for unknown teams.
pub fn fold_result(table: &mut LeagueTable, fixture: &Fixture) {
    let Some(result) = &fixture.result else {
        return;
    };
    let (home_goals, away_goals) = (result.home_score as u32, result.away_score as u32);
    match table.row_mut(fixture.home) {
        Some(row) => row.record(home_goals, away_goals),
        None => log::warn!("no table row for home side {}", fixture.home),
    }
    match table.row_mut(fixture.away) {
        Some(row) => row.record(away_goals, home_goals),
        None => log::warn!("no table row for away side {}", fixture.away),
    }
}

/// Sort the table and reassign 1-based positions.
///
/// Cascade: points, then goal difference, then goals for, all descending,
/// then team name ascending. Ids break a full tie between identically named
/// teams so the order is total.
pub fn sort_table(table: &mut LeagueTable, teams: &[Team]) {
    let names: BTreeMap<TeamId, &str> =
        teams.iter().map(|t| (t.id, t.name.as_str())).collect();
    let name_of = |id: TeamId| names.get(&id).copied().unwrap_or("");

    table.rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
            .then(name_of(a.team).cmp(name_of(b.team)))
            .then(a.team.cmp(&b.team))
    });
    for (index, row) in table.rows.iter_mut().enumerate() {
        row.position = index as u32 + 1;
    }
}

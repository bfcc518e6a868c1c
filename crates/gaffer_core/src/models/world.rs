use super::{CupState, Division, Fixture, LeagueTable, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Notable-week markers, each firing at most once per season.
///
/// The set of already-fired flags travels inside the snapshot so the engine
/// never keeps trigger state of its own; the season transition clears it.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventFlag {
    /// Ten or more goals across one week's resolved fixtures.
    GoalRush,
    /// A single match won by four or more goals.
    Thrashing,
    /// A lower-tier side beating a top-tier side.
    UpsetWin,
    /// A second-division side knocking a first-division side out of a cup.
    CupShock,
    /// The user team won every match it played this week.
    CleanSweepWeek,
}

impl EventFlag {
    pub fn display_name(&self) -> &'static str {
        match self {
            EventFlag::GoalRush => "Goal Rush",
            EventFlag::Thrashing => "Thrashing",
            EventFlag::UpsetWin => "Upset Win",
            EventFlag::CupShock => "Cup Shock",
            EventFlag::CleanSweepWeek => "Clean Sweep Week",
        }
    }
}

/// League standings for both flights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DivisionTables {
    pub first: LeagueTable,
    pub second: LeagueTable,
}

impl DivisionTables {
    pub fn for_division(&self, division: Division) -> &LeagueTable {
        match division {
            Division::First => &self.first,
            Division::Second => &self.second,
        }
    }

    pub fn for_division_mut(&mut self, division: Division) -> &mut LeagueTable {
        match division {
            Division::First => &mut self.first,
            Division::Second => &mut self.second,
        }
    }
}

/// Weekly money picture, used only by the confidence model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FinanceSnapshot {
    pub weekly_income: u32,
    pub weekly_wages: u32,
}

/// The whole simulated world as one self-contained value.
///
/// Requests to the worker carry a copy of this; the worker never holds state
/// between calls, so a failed or timed-out request leaves the caller's copy
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldState {
    pub season: u32,
    /// Week about to be played. Advanced by 1 after each weekly resolution.
    pub week: u32,
    pub teams: Vec<Team>,
    /// League schedule for the running season. Cup fixtures live inside
    /// their rounds.
    pub fixtures: Vec<Fixture>,
    pub tables: DivisionTables,
    /// Both knockout competitions, CupA first.
    pub cups: Vec<CupState>,
    /// Once-per-season flags that have already fired.
    #[serde(default)]
    pub triggered_events: BTreeSet<EventFlag>,
    /// Next id handed to a generated player. Monotone within a world.
    pub next_player_id: u32,
}

impl WorldState {
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn team_name(&self, id: TeamId) -> &str {
        self.team(id).map(|t| t.name.as_str()).unwrap_or("Unknown")
    }

    pub fn division_of(&self, id: TeamId) -> Option<Division> {
        self.team(id).map(|t| t.division)
    }

    /// Mint a fresh player id.
    pub fn allocate_player_id(&mut self) -> super::PlayerId {
        let id = super::PlayerId(self.next_player_id);
        self.next_player_id += 1;
        id
    }

    /// True once every league fixture has a result and both cups are
    /// decided.
    pub fn season_finished(&self) -> bool {
        self.fixtures.iter().all(|f| f.is_resolved())
            && self.cups.iter().all(|c| c.is_decided())
    }
}

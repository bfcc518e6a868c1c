use super::TeamId;
use serde::{Deserialize, Serialize};

/// Most recent results first. The buffer on a table row keeps the last
/// `FORM_WINDOW` of these.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FormResult {
    W,
    D,
    L,
}

impl FormResult {
    pub fn letter(&self) -> char {
        match self {
            FormResult::W => 'W',
            FormResult::D => 'D',
            FormResult::L => 'L',
        }
    }
}

/// How many recent results a row remembers.
pub const FORM_WINDOW: usize = 5;

/// One line of a league table.
///
/// Invariants kept by the fold in `league`:
/// - `points == 3 * won + drawn`
/// - `played == won + drawn + lost`
/// - `goal_difference == goals_for - goals_against`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableRow {
    pub team: TeamId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    /// 1-based after a sort; 0 on a freshly built table.
    pub position: u32,
    /// Most recent first, capped at `FORM_WINDOW`.
    #[serde(default)]
    pub form: Vec<FormResult>,
}

impl TableRow {
    pub fn new(team: TeamId) -> Self {
        Self {
            team,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            position: 0,
            form: Vec::new(),
        }
    }

    /// Context row for a side with no league standing this week, e.g. a cup
    /// opponent from the other division in a neutral pairing.
    pub fn neutral(team: TeamId) -> Self {
        Self::new(team)
    }

    /// Record one match from this row's perspective.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        let outcome = if scored > conceded {
            self.won += 1;
            FormResult::W
        } else if scored < conceded {
            self.lost += 1;
            FormResult::L
        } else {
            self.drawn += 1;
            FormResult::D
        };
        self.points = 3 * self.won + self.drawn;
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;
        self.form.insert(0, outcome);
        self.form.truncate(FORM_WINDOW);
    }

    /// Momentum contribution from the last three results: +1 per win, -1 per
    /// loss.
    pub fn form_bonus(&self) -> f32 {
        self.form
            .iter()
            .take(3)
            .map(|r| match r {
                FormResult::W => 1.0,
                FormResult::D => 0.0,
                FormResult::L => -1.0,
            })
            .sum()
    }

    pub fn form_string(&self) -> String {
        self.form.iter().map(|r| r.letter()).collect()
    }
}

/// Standings of one division. Row order is the table order once sorted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LeagueTable {
    pub rows: Vec<TableRow>,
}

impl LeagueTable {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    pub fn row(&self, team: TeamId) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.team == team)
    }

    pub fn row_mut(&mut self, team: TeamId) -> Option<&mut TableRow> {
        self.rows.iter_mut().find(|r| r.team == team)
    }

    pub fn contains(&self, team: TeamId) -> bool {
        self.rows.iter().any(|r| r.team == team)
    }
}

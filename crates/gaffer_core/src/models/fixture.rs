use super::{PlayerId, TeamId};
use serde::{Deserialize, Serialize};

/// Closed set of competitions a fixture can belong to.
///
/// Match on this exhaustively; new competitions are a schema change, not a
/// string convention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Competition {
    League,
    CupA,
    CupB,
}

impl Competition {
    pub fn is_cup(&self) -> bool {
        matches!(self, Competition::CupA | Competition::CupB)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Competition::League => "League",
            Competition::CupA => "National Cup",
            Competition::CupB => "League Cup",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    Caution,
}

/// Timeline entry within a simulated match. Minutes run 1..=90, or up to 120
/// when extra time was played.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub minute: u8,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub team: TeamId,
    /// Scorer for goal events. Cautions carry no player attribution at this
    /// simulation level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerId>,
}

impl MatchEvent {
    pub fn goal(minute: u8, team: TeamId, scorer: PlayerId) -> Self {
        Self { minute, kind: EventKind::Goal, team, player: Some(scorer) }
    }

    pub fn caution(minute: u8, team: TeamId) -> Self {
        Self { minute, kind: EventKind::Caution, team, player: None }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self.kind, EventKind::Goal)
    }
}

/// Converted-kick tallies of a penalty shootout. The tallies are never equal;
/// sudden death continues until they differ.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShootoutScore {
    pub home: u8,
    pub away: u8,
}

impl ShootoutScore {
    pub fn winner_is_home(&self) -> bool {
        self.home > self.away
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub home_score: u8,
    pub away_score: u8,
    /// Timeline sorted by minute.
    #[serde(default)]
    pub events: Vec<MatchEvent>,
    /// Present only when a knockout tie was decided from the spot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shootout: Option<ShootoutScore>,
}

impl MatchResult {
    pub fn is_draw(&self) -> bool {
        self.home_score == self.away_score
    }

    /// Winning side of a knockout tie, by score then shootout. `None` for a
    /// drawn league result.
    pub fn winner(&self, home: TeamId, away: TeamId) -> Option<TeamId> {
        use std::cmp::Ordering;
        match self.home_score.cmp(&self.away_score) {
            Ordering::Greater => Some(home),
            Ordering::Less => Some(away),
            Ordering::Equal => self
                .shootout
                .map(|s| if s.winner_is_home() { home } else { away }),
        }
    }
}

/// One scheduled match. `result` is written exactly once when the fixture's
/// week is simulated; resolved fixtures are never re-simulated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fixture {
    pub week: u32,
    pub competition: Competition,
    pub home: TeamId,
    pub away: TeamId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
}

impl Fixture {
    pub fn new(week: u32, competition: Competition, home: TeamId, away: TeamId) -> Self {
        Self { week, competition, home, away, result: None }
    }

    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }
}

use super::{Competition, Fixture, PlayerId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One knockout round. Completed rounds are never reopened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CupRound {
    pub name: String,
    pub fixtures: Vec<Fixture>,
    #[serde(default)]
    pub completed: bool,
}

impl CupRound {
    pub fn new(name: impl Into<String>, fixtures: Vec<Fixture>) -> Self {
        Self { name: name.into(), fixtures, completed: false }
    }

    pub fn all_resolved(&self) -> bool {
        self.fixtures.iter().all(|f| f.is_resolved())
    }
}

/// Season-spanning cup bookkeeping: goalscorer tallies for the current
/// edition and the roll of past winners.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CupStats {
    /// Goals per player in this cup edition. BTreeMap keeps iteration stable
    /// for deterministic serialization.
    #[serde(default)]
    pub top_scorers: BTreeMap<PlayerId, u32>,
    /// (season, winner) pairs, oldest first.
    #[serde(default)]
    pub champions: Vec<(u32, TeamId)>,
}

impl CupStats {
    pub fn record_goal(&mut self, scorer: PlayerId) {
        *self.top_scorers.entry(scorer).or_insert(0) += 1;
    }

    /// Highest tally first, ties broken by player id for stable output.
    pub fn leading_scorers(&self, limit: usize) -> Vec<(PlayerId, u32)> {
        let mut entries: Vec<(PlayerId, u32)> =
            self.top_scorers.iter().map(|(p, g)| (*p, *g)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }
}

/// Knockout competition state.
///
/// The progression is strictly forward: a round fills with results, the round
/// completes, and either a champion is decided or the next round is drawn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CupState {
    pub competition: Competition,
    pub rounds: Vec<CupRound>,
    /// Index into `rounds` of the round currently being played.
    pub current_round: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub champion: Option<TeamId>,
    #[serde(default)]
    pub stats: CupStats,
}

impl CupState {
    pub fn new(competition: Competition, first_round: CupRound) -> Self {
        Self {
            competition,
            rounds: vec![first_round],
            current_round: 0,
            champion: None,
            stats: CupStats::default(),
        }
    }

    pub fn is_decided(&self) -> bool {
        self.champion.is_some()
    }

    pub fn active_round(&self) -> Option<&CupRound> {
        self.rounds.get(self.current_round)
    }
}

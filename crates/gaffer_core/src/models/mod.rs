pub mod cup;
pub mod fixture;
pub mod player;
pub mod table;
pub mod team;
pub mod world;

pub use cup::{CupRound, CupState, CupStats};
pub use fixture::{
    Competition, EventKind, Fixture, MatchEvent, MatchResult, ShootoutScore,
};
pub use player::{Morale, Player, PlayerId, Position};
pub use table::{FormResult, LeagueTable, TableRow, FORM_WINDOW};
pub use team::{Division, TacticalStance, Team, TeamId, TeamTier};
pub use world::{DivisionTables, EventFlag, FinanceSnapshot, WorldState};

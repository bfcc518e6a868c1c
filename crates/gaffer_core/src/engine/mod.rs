pub mod match_sim;
pub mod strength;
pub mod tactics;

pub use match_sim::{simulate_match, MatchSide};
pub use strength::{team_strength, TeamStrength};
pub use tactics::{stance_chance_adjustment, stance_modifier};

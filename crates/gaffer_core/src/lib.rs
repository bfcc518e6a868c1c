//! # gaffer_core - Deterministic Football Season Simulation Engine
//!
//! This library simulates whole seasons for a single-player football
//! management game: fixture scheduling, weekly match resolution, league
//! tables, cup brackets, and end-of-season squad turnover, all behind a
//! JSON API for easy host integration.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same season)
//! - Two-division league with promotion and relegation
//! - Knockout cups with extra time and penalty shootouts
//! - Background worker thread for off-main-thread simulation

pub mod api;
pub mod config;
pub mod cup;
pub mod engine;
pub mod error;
pub mod league;
pub mod models;
pub mod schedule;
pub mod season;
pub mod weekly;
pub mod worker;
pub mod world;

// Re-export the JSON seam
pub use api::{advance_week_json, new_world_json, transition_season_json, ApiResponse};

// Re-export simulation entry points
pub use config::SimParams;
pub use error::{EngineError, Result};
pub use season::transition_season;
pub use weekly::{simulate_week, WeekOutcome, WeekRequest};
pub use worker::{spawn_worker, WorkerHandle};
pub use world::{build_calendar, generate_world};

// Re-export model types
pub use models::{
    Competition, CupState, Division, DivisionTables, EventFlag, FinanceSnapshot, Fixture,
    LeagueTable, MatchResult, Player, PlayerId, Position, TableRow, TacticalStance, Team, TeamId,
    TeamTier, WorldState,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

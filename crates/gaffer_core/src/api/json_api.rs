//! JSON seam for host embedding.
//!
//! Entry points take a request JSON string and return a response JSON
//! string. Requests that cannot be parsed or carry the wrong schema version
//! come back as `Err` strings with a stable code prefix; everything else is
//! an [`ApiResponse`] envelope, errors included.

use crate::config::SimParams;
use crate::error::EngineError;
use crate::models::WorldState;
use crate::season::transition_season;
use crate::weekly::{simulate_week, WeekOutcome, WeekRequest};
use crate::world::generate_world;
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Stable error code prefixes.
pub mod error_codes {
    pub const MALFORMED_REQUEST: &str = "MALFORMED_REQUEST";
    pub const SCHEMA_MISMATCH: &str = "SCHEMA_MISMATCH";
    pub const UNKNOWN_TEAM: &str = "UNKNOWN_TEAM";
    pub const UNSUPPORTED_CONFIG: &str = "UNSUPPORTED_CONFIG";
    pub const ENGINE_BUSY: &str = "ENGINE_BUSY";
    pub const WORKER_FAILURE: &str = "WORKER_FAILURE";
    pub const SERIALIZE_FAILED: &str = "SERIALIZE_FAILED";
}

/// Standard response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: u8,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: crate::SCHEMA_VERSION,
            timestamp: Utc::now(),
        }
    }

    pub fn error(code: &str, message: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError { code: code.to_string(), message: message.to_string() }),
            schema_version: crate::SCHEMA_VERSION,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewWorldRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub teams_per_division: u32,
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub world: WorldState,
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

fn engine_error_code(error: &EngineError) -> &'static str {
    match error {
        EngineError::MalformedRequest(_) => error_codes::MALFORMED_REQUEST,
        EngineError::SchemaMismatch { .. } => error_codes::SCHEMA_MISMATCH,
        EngineError::UnknownTeam(_) => error_codes::UNKNOWN_TEAM,
        EngineError::UnsupportedConfig(_) => error_codes::UNSUPPORTED_CONFIG,
        EngineError::Busy => error_codes::ENGINE_BUSY,
        EngineError::WorkerTimeout { .. } | EngineError::WorkerGone => {
            error_codes::WORKER_FAILURE
        }
    }
}

fn parse_request<'a, T: Deserialize<'a>>(request_json: &'a str) -> Result<T, String> {
    serde_json::from_str(request_json).map_err(|e| err_code(error_codes::MALFORMED_REQUEST, e))
}

fn check_schema(found: u8) -> Result<(), String> {
    if found != crate::SCHEMA_VERSION {
        return Err(err_code(
            error_codes::SCHEMA_MISMATCH,
            format!("expected {}, got {}", crate::SCHEMA_VERSION, found),
        ));
    }
    Ok(())
}

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> Result<String, String> {
    serde_json::to_string(response).map_err(|e| err_code(error_codes::SERIALIZE_FAILED, e))
}

/// Play out the snapshot's current week.
pub fn advance_week_json(request_json: &str) -> Result<String, String> {
    let request: WeekRequest = parse_request(request_json)?;
    check_schema(request.schema_version)?;

    let week = request.world.week;
    match simulate_week(request, &SimParams::default()) {
        Ok(outcome) => {
            info!(week, resolved = outcome.resolved.len(), "week advanced");
            to_json(&ApiResponse::success(outcome))
        }
        Err(e) => {
            warn!(week, error = %e, "week advance failed");
            to_json(&ApiResponse::<WeekOutcome>::error(engine_error_code(&e), e))
        }
    }
}

/// Generate a fresh world from a seed.
pub fn new_world_json(request_json: &str) -> Result<String, String> {
    let request: NewWorldRequest = parse_request(request_json)?;
    check_schema(request.schema_version)?;

    match generate_world(request.seed, request.teams_per_division, &SimParams::default()) {
        Ok(world) => {
            info!(seed = request.seed, teams = world.teams.len(), "world generated");
            to_json(&ApiResponse::success(world))
        }
        Err(e) => {
            warn!(seed = request.seed, error = %e, "world generation failed");
            to_json(&ApiResponse::<WorldState>::error(engine_error_code(&e), e))
        }
    }
}

/// Roll the supplied world into the next season.
pub fn transition_season_json(request_json: &str) -> Result<String, String> {
    let request: TransitionRequest = parse_request(request_json)?;
    check_schema(request.schema_version)?;

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let next = transition_season(&request.world, &SimParams::default(), &mut rng);
    info!(season = next.season, "season transitioned");
    to_json(&ApiResponse::success(next))
}

pub mod json_api;

pub use json_api::{
    advance_week_json, new_world_json, transition_season_json, ApiError, ApiResponse,
    NewWorldRequest, TransitionRequest,
};

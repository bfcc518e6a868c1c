//! Tunable model constants.
//!
//! Everything the behavioral model can be tuned by lives in [`SimParams`];
//! simulation functions take it by reference and read nothing ambient.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimParams {
    // === Chance generation ===
    /// Baseline expected chances per side per match (default: 4.0)
    pub base_chances: f32,
    /// Weight of possession share in expected chances (default: 3.0)
    pub possession_chance_weight: f32,
    /// Divisor on (attack - opposing defense) in expected chances (default: 5.0)
    pub strength_chance_divisor: f32,
    /// Uniform jitter added to expected chances, 0..this (default: 1.5)
    pub chance_jitter: f32,
    /// Added chances for an attacking stance, subtracted for a defensive one
    /// (default: 2.0)
    pub stance_chance_adjust: f32,
    /// Form contribution per win/loss in the last three results (default: 1.0)
    pub form_step: f32,

    // === Possession ===
    /// Divisor on the midfield gap feeding possession share (default: 200.0)
    pub possession_midfield_divisor: f32,
    /// Half-width of the possession jitter band (default: 0.05)
    pub possession_jitter: f32,
    /// Multiplier on the home side's possession share (default: 1.1)
    pub home_possession_factor: f32,
    /// Possession share clamp band (defaults: 0.25, 0.75)
    pub possession_floor: f32,
    pub possession_ceiling: f32,

    // === Conversion ===
    /// Base probability a chance becomes a goal (default: 0.15)
    pub conversion_base: f32,
    /// Divisor on (attack - opposing defense) added to conversion
    /// (default: 200.0)
    pub conversion_strength_divisor: f32,
    /// Conversion clamp band (defaults: 0.02, 0.6)
    pub conversion_floor: f32,
    pub conversion_ceiling: f32,
    /// Probability a chance also produces a caution (default: 0.05)
    pub caution_rate: f32,
    /// Hard ceiling on either side's score (default: 8)
    pub score_cap: u8,

    // === Knockout resolution ===
    /// Expected-chance divisor during extra time (default: 4.0)
    pub extra_time_divisor: f32,
    /// Kicks per side in the regulation shootout (default: 5)
    pub shootout_kicks: u8,
    /// Probability a shootout kick converts (default: 0.8)
    pub shootout_conversion: f64,

    // === Strength model ===
    /// Rating used when a line has no players at all (default: 60.0)
    pub neutral_line_rating: f32,
    /// How many of a line's best ratings feed its average (default: 3)
    pub line_sample: usize,

    // === Season turnover ===
    /// Age beyond which retirement is certain (default: 38)
    pub forced_retirement_age: u8,
    /// Age beyond which retirement is rolled (default: 34)
    pub retirement_roll_age: u8,
    /// Retirement probability for the roll band (default: 0.3)
    pub retirement_chance: f64,
    /// Minimum senior squad size after turnover (default: 18)
    pub squad_floor: usize,
    /// Academy players older than this leave the pool (default: 19)
    pub academy_age_cap: u8,
    /// Fresh prospects injected per academy per season (defaults: 3, 5)
    pub academy_intake_min: usize,
    pub academy_intake_max: usize,
    /// Teams exchanged between divisions each season (default: 3)
    pub exchange_count: usize,

    // === Confidence ===
    /// League win / draw / loss deltas (defaults: 4.0, 1.0, -4.0)
    pub confidence_league_win: f32,
    pub confidence_league_draw: f32,
    pub confidence_league_loss: f32,
    /// Cup win / loss deltas (defaults: 3.0, -3.0)
    pub confidence_cup_win: f32,
    pub confidence_cup_loss: f32,
    /// Divisor on (income - wages) in the financial term (default: 10_000.0)
    pub confidence_income_scale: f32,
    /// Clamp band of the financial term (default: 2.0)
    pub confidence_income_clamp: f32,

    // === Calendar ===
    /// Week the first cup's opening round is pinned to (default: 2)
    pub cup_a_first_week: u32,
    /// Week the second cup's opening round is pinned to (default: 4)
    pub cup_b_first_week: u32,
    /// Weeks between a round completing and the next round playing
    /// (default: 3)
    pub cup_round_gap: u32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            base_chances: 4.0,
            possession_chance_weight: 3.0,
            strength_chance_divisor: 5.0,
            chance_jitter: 1.5,
            stance_chance_adjust: 2.0,
            form_step: 1.0,

            possession_midfield_divisor: 200.0,
            possession_jitter: 0.05,
            home_possession_factor: 1.1,
            possession_floor: 0.25,
            possession_ceiling: 0.75,

            conversion_base: 0.15,
            conversion_strength_divisor: 200.0,
            conversion_floor: 0.02,
            conversion_ceiling: 0.6,
            caution_rate: 0.05,
            score_cap: 8,

            extra_time_divisor: 4.0,
            shootout_kicks: 5,
            shootout_conversion: 0.8,

            neutral_line_rating: 60.0,
            line_sample: 3,

            forced_retirement_age: 38,
            retirement_roll_age: 34,
            retirement_chance: 0.3,
            squad_floor: 18,
            academy_age_cap: 19,
            academy_intake_min: 3,
            academy_intake_max: 5,
            exchange_count: 3,

            confidence_league_win: 4.0,
            confidence_league_draw: 1.0,
            confidence_league_loss: -4.0,
            confidence_cup_win: 3.0,
            confidence_cup_loss: -3.0,
            confidence_income_scale: 10_000.0,
            confidence_income_clamp: 2.0,

            cup_a_first_week: 2,
            cup_b_first_week: 4,
            cup_round_gap: 3,
        }
    }
}

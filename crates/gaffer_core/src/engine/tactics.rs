//! Stance matchup table.
//!
//! One table drives every tactical adjustment in the engine. The matrix is
//! asymmetric: what Attacking gains against Balanced is not what Balanced
//! loses against Attacking.

use crate::config::SimParams;
use crate::models::TacticalStance;

/// Possession-share modifier for `own` against `opponent`.
///
/// Identical stances always read 0. The cycle runs Attacking over Balanced,
/// Balanced over Defensive, Defensive over Attacking.
pub fn stance_modifier(own: TacticalStance, opponent: TacticalStance) -> f32 {
    use TacticalStance::*;
    match (own, opponent) {
        (Attacking, Attacking) | (Balanced, Balanced) | (Defensive, Defensive) => 0.0,
        (Attacking, Balanced) => 0.05,
        (Attacking, Defensive) => -0.03,
        (Balanced, Attacking) => 0.0,
        (Balanced, Defensive) => 0.03,
        (Defensive, Attacking) => 0.05,
        (Defensive, Balanced) => -0.02,
    }
}

/// Flat adjustment to a side's expected chances from its own stance.
pub fn stance_chance_adjustment(stance: TacticalStance, params: &SimParams) -> f32 {
    match stance {
        TacticalStance::Attacking => params.stance_chance_adjust,
        TacticalStance::Balanced => 0.0,
        TacticalStance::Defensive => -params.stance_chance_adjust,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_stances_cancel() {
        for stance in
            [TacticalStance::Attacking, TacticalStance::Balanced, TacticalStance::Defensive]
        {
            assert_eq!(stance_modifier(stance, stance), 0.0);
        }
    }

    #[test]
    fn matrix_is_asymmetric() {
        let ab = stance_modifier(TacticalStance::Attacking, TacticalStance::Balanced);
        let ba = stance_modifier(TacticalStance::Balanced, TacticalStance::Attacking);
        assert_ne!(ab, -ba);
    }

    #[test]
    fn defensive_counters_attacking() {
        let def = stance_modifier(TacticalStance::Defensive, TacticalStance::Attacking);
        let atk = stance_modifier(TacticalStance::Attacking, TacticalStance::Defensive);
        assert!(def > 0.0);
        assert!(atk < 0.0);
    }

    #[test]
    fn chance_adjustment_signs() {
        let params = SimParams::default();
        assert!(stance_chance_adjustment(TacticalStance::Attacking, &params) > 0.0);
        assert_eq!(stance_chance_adjustment(TacticalStance::Balanced, &params), 0.0);
        assert!(stance_chance_adjustment(TacticalStance::Defensive, &params) < 0.0);
    }
}

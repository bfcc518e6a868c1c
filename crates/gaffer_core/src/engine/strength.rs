//! Line-strength aggregation.
//!
//! Derived fresh from the squad on every call; roster edits show up in the
//! very next simulated match without any cache to invalidate.

use crate::config::SimParams;
use crate::models::{Player, Position};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamStrength {
    pub attack: f32,
    pub midfield: f32,
    pub defense: f32,
}

/// Compute line strengths from a squad.
///
/// Forwards feed attack, midfielders feed midfield, defenders and
/// goalkeepers pool into defense. Each line averages its best
/// `params.line_sample` ratings, fewer when the line is thin, and an empty
/// line falls back to `params.neutral_line_rating`.
pub fn team_strength(squad: &[Player], params: &SimParams) -> TeamStrength {
    TeamStrength {
        attack: line_strength(squad, |p| p.is_forward(), params),
        midfield: line_strength(squad, |p| p.is_midfielder(), params),
        defense: line_strength(squad, |p| p.is_defender() || p.is_goalkeeper(), params),
    }
}

fn line_strength(
    squad: &[Player],
    belongs: impl Fn(&Position) -> bool,
    params: &SimParams,
) -> f32 {
    let mut ratings: Vec<u8> = squad
        .iter()
        .filter(|p| belongs(&p.position))
        .map(|p| p.effective_rating())
        .collect();
    if ratings.is_empty() {
        return params.neutral_line_rating;
    }
    ratings.sort_unstable_by(|a, b| b.cmp(a));
    ratings.truncate(params.line_sample);
    let sum: u32 = ratings.iter().map(|r| *r as u32).sum();
    sum as f32 / ratings.len() as f32
}

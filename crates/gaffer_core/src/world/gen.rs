//! Player factories shared by world generation and the season turnover.

use super::names;
use crate::models::{Morale, Player, PlayerId, Position, TeamTier};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::ops::RangeInclusive;

/// Youth intake never rolls below these, so weak squads regenerate toward
/// their pedigree instead of collapsing.
const YOUTH_FLOOR_TOP: u8 = 55;
const YOUTH_FLOOR_MID: u8 = 45;
const YOUTH_FLOOR_LOWER: u8 = 35;
const YOUTH_BAND_SPAN: u8 = 30;
const YOUTH_RATING_CAP: u8 = 90;

/// Rating band senior players are rolled from at world generation.
pub fn tier_rating_range(tier: TeamTier) -> RangeInclusive<u8> {
    match tier {
        TeamTier::Top => 62..=88,
        TeamTier::Mid => 52..=78,
        TeamTier::Lower => 42..=68,
    }
}

/// Rating band for academy prospects: tier floor up to floor + 30, capped.
pub fn youth_rating_range(tier: TeamTier) -> RangeInclusive<u8> {
    let floor = match tier {
        TeamTier::Top => YOUTH_FLOOR_TOP,
        TeamTier::Mid => YOUTH_FLOOR_MID,
        TeamTier::Lower => YOUTH_FLOOR_LOWER,
    };
    floor..=(floor + YOUTH_BAND_SPAN).min(YOUTH_RATING_CAP)
}

/// Transfer market value, quadratic in rating with a tier premium.
pub fn market_value(rating: u8, tier: TeamTier) -> u32 {
    (rating as u32).pow(2) * 25 * tier_fifths(tier) / 5
}

/// Weekly wage, quadratic in rating with the same tier premium.
pub fn weekly_wage(rating: u8, tier: TeamTier) -> u32 {
    ((rating as u32).pow(2) / 4 + 200) * tier_fifths(tier) / 5
}

fn tier_fifths(tier: TeamTier) -> u32 {
    match tier {
        TeamTier::Top => 6,
        TeamTier::Mid => 5,
        TeamTier::Lower => 4,
    }
}

pub fn senior_player(
    id: PlayerId,
    position: Position,
    tier: TeamTier,
    rng: &mut ChaCha8Rng,
) -> Player {
    let rating = rng.gen_range(tier_rating_range(tier));
    Player {
        id,
        name: names::player_name(rng),
        position,
        rating,
        age: rng.gen_range(18..=34),
        value: market_value(rating, tier),
        wage: weekly_wage(rating, tier),
        morale: Morale::Neutral,
        contract_years: rng.gen_range(1..=4),
        transfer_listed: false,
    }
}

pub fn academy_prospect(id: PlayerId, tier: TeamTier, rng: &mut ChaCha8Rng) -> Player {
    let rating = rng.gen_range(youth_rating_range(tier));
    let position = match rng.gen_range(0u8..10) {
        0 => Position::GK,
        1..=3 => Position::DF,
        4..=6 => Position::MF,
        _ => Position::FW,
    };
    Player {
        id,
        name: names::player_name(rng),
        position,
        rating,
        age: rng.gen_range(15..=18),
        value: market_value(rating, tier),
        wage: weekly_wage(rating, tier),
        morale: Morale::Neutral,
        contract_years: 3,
        transfer_listed: false,
    }
}

/// Reorder a squad so the first eleven slots hold a playable side: the best
/// goalkeeper, then the best four defenders, four midfielders and two
/// forwards, with everyone else behind them by rating. Positions a squad is
/// short on simply leave the eleven to fill up with the best of the rest.
pub fn order_squad(squad: &mut Vec<Player>) {
    let mut rest = std::mem::take(squad);
    rest.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));

    let mut eleven: Vec<Player> = Vec::with_capacity(11);
    for (want, quota) in [
        (Position::GK, 1usize),
        (Position::DF, 4),
        (Position::MF, 4),
        (Position::FW, 2),
    ] {
        let mut taken = 0;
        let mut i = 0;
        while i < rest.len() && taken < quota {
            if rest[i].position == want {
                eleven.push(rest.remove(i));
                taken += 1;
            } else {
                i += 1;
            }
        }
    }
    while eleven.len() < 11 && !rest.is_empty() {
        eleven.push(rest.remove(0));
    }

    eleven.append(&mut rest);
    *squad = eleven;
}

//! League calendar construction.
//!
//! Circle method: one team sits pinned while the rest rotate a step per
//! round, which covers every pairing in N-1 rounds. The second half of the
//! season mirrors the first with home and away swapped, so each ordered pair
//! appears exactly once across the N*(N-1) fixtures.

use crate::models::{Competition, Fixture, TeamId};

/// Build a full double round-robin for an even-sized division, one round per
/// week starting at `origin_week`.
///
/// An odd or degenerate team count yields an empty schedule; a division like
/// that is a world-construction bug, not something to paper over here.
pub fn double_round_robin(team_ids: &[TeamId], origin_week: u32) -> Vec<Fixture> {
    let n = team_ids.len();
    if n < 2 || n % 2 != 0 {
        log::warn!("round robin needs an even team count of at least 2, got {}", n);
        return Vec::new();
    }

    let rounds = n - 1;
    let half = n / 2;
    let rest = &team_ids[1..];

    let mut fixtures: Vec<Fixture> = Vec::with_capacity(n * (n - 1));
    for round in 0..rounds {
        let week = origin_week + round as u32;
        // Slot 0 is pinned; rotating slots pull from `rest` shifted by round.
        let ring_at = |slot: usize| -> TeamId {
            if slot == 0 {
                team_ids[0]
            } else {
                rest[(slot - 1 + round) % (n - 1)]
            }
        };
        for i in 0..half {
            let mut home = ring_at(i);
            let mut away = ring_at(n - 1 - i);
            // Alternate the pinned team's venue so it does not host every
            // round of the half.
            if i == 0 && round % 2 == 1 {
                std::mem::swap(&mut home, &mut away);
            }
            fixtures.push(Fixture::new(week, Competition::League, home, away));
        }
    }

    let mirrored: Vec<Fixture> = fixtures
        .iter()
        .map(|f| Fixture::new(f.week + rounds as u32, Competition::League, f.away, f.home))
        .collect();
    fixtures.extend(mirrored);
    fixtures
}

//! Knockout round draws.

use crate::models::{Competition, Fixture, TeamId};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Draw one knockout round: shuffle the pool, pair consecutive entries, pin
/// every tie to `week`.
///
/// An odd pool drops its last post-shuffle entry from the competition.
/// Longstanding behavior; the dropped team simply has no cup run that
/// season, and the log line is the only trace.
pub fn draw_round(
    pool: &[TeamId],
    competition: Competition,
    week: u32,
    rng: &mut ChaCha8Rng,
) -> Vec<Fixture> {
    let mut pool: Vec<TeamId> = pool.to_vec();
    pool.shuffle(rng);
    if pool.len() % 2 != 0 {
        if let Some(dropped) = pool.pop() {
            log::warn!(
                "{} draw received an odd pool of {}, dropping {}",
                competition.display_name(),
                pool.len() + 1,
                dropped
            );
        }
    }
    pool.chunks(2)
        .map(|pair| Fixture::new(week, competition, pair[0], pair[1]))
        .collect()
}

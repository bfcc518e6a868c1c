//! Name pools embedded at compile time. World generation draws from these
//! instead of shipping a data file.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

pub const FIRST_NAMES: &[&str] = &[
    "Alex", "Ben", "Callum", "Dan", "Eddie", "Finn", "Gareth", "Harry", "Isaac", "Jack",
    "Kieran", "Liam", "Marcus", "Nathan", "Owen", "Patrick", "Quinn", "Rhys", "Sam", "Tom",
    "Umar", "Victor", "Will", "Xavier", "Yusuf", "Zack", "Andre", "Bruno", "Carlos", "Diego",
    "Emil", "Felipe", "Goran", "Hugo", "Ivan", "Jonas", "Karim", "Luka", "Mateo", "Nico",
];

pub const LAST_NAMES: &[&str] = &[
    "Adams", "Barnes", "Clarke", "Dawson", "Ellis", "Foster", "Graham", "Hughes", "Irwin",
    "Jennings", "Kerr", "Lawson", "Mason", "Noble", "Osborne", "Parker", "Quigley", "Reid",
    "Shaw", "Turner", "Underwood", "Vance", "Walsh", "Young", "Zidane", "Almeida", "Becker",
    "Costa", "Dimitrov", "Eriksen", "Ferreira", "Gomez", "Horvat", "Ibrahim", "Jansen",
    "Kovac", "Lindgren", "Moreau", "Novak", "Petrov",
];

pub const CLUB_STEMS: &[&str] = &[
    "Ashford", "Blackmere", "Caldwell", "Dunmore", "Eastvale", "Fernhill", "Glenbrook",
    "Harrowgate", "Ironbridge", "Kingsport", "Larkfield", "Millhaven", "Northgate",
    "Oakmont", "Pennbrook", "Queensferry", "Ravenswood", "Stonebridge", "Thornbury",
    "Underhill", "Valemont", "Westcliff", "Yarrowdale", "Redmoor", "Saltmarsh", "Brackenford",
    "Coldwater", "Highfield",
];

pub const CLUB_SUFFIXES: &[&str] =
    &["United", "City", "Rovers", "Athletic", "Town", "Wanderers", "County", "Albion"];

/// Random "First Last" player name.
pub fn player_name(rng: &mut ChaCha8Rng) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{} {}", first, last)
}

/// Draw `count` distinct club names from the stem x suffix cross product.
///
/// The pool holds `CLUB_STEMS.len() * CLUB_SUFFIXES.len()` combinations;
/// asking for more than that truncates to the pool size.
pub fn club_names(count: usize, rng: &mut ChaCha8Rng) -> Vec<String> {
    let mut pool: Vec<String> = CLUB_STEMS
        .iter()
        .flat_map(|stem| CLUB_SUFFIXES.iter().map(move |suffix| format!("{} {}", stem, suffix)))
        .collect();
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

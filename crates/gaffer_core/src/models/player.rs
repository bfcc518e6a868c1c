use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable numeric player identity.
///
/// Ids are handed out by world generation and youth intake from the
/// `next_player_id` counter carried in the snapshot, so squads built from the
/// same seed always carry the same ids.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    DF,
    MF,
    FW,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    pub fn is_defender(&self) -> bool {
        matches!(self, Position::DF)
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(self, Position::MF)
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::FW)
    }

    /// Get position display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Position::GK => "Goalkeeper",
            Position::DF => "Defender",
            Position::MF => "Midfielder",
            Position::FW => "Forward",
        }
    }

    /// Get position abbreviation for compact display
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::DF => "DEF",
            Position::MF => "MID",
            Position::FW => "FWD",
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GK" => Ok(Position::GK),
            "DF" | "DEF" => Ok(Position::DF),
            "MF" | "MID" => Ok(Position::MF),
            "FW" | "FWD" => Ok(Position::FW),
            _ => Err(format!("Invalid position: {}", s)),
        }
    }
}

/// Five-step morale ladder, ordered worst to best.
///
/// Variant order drives the derived `Ord`; `raised`/`lowered` saturate at the
/// ends instead of wrapping.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Morale {
    Angry,
    Unhappy,
    #[default]
    Neutral,
    Content,
    Happy,
}

impl Morale {
    pub fn raised(self) -> Morale {
        match self {
            Morale::Angry => Morale::Unhappy,
            Morale::Unhappy => Morale::Neutral,
            Morale::Neutral => Morale::Content,
            Morale::Content => Morale::Happy,
            Morale::Happy => Morale::Happy,
        }
    }

    pub fn lowered(self) -> Morale {
        match self {
            Morale::Angry => Morale::Angry,
            Morale::Unhappy => Morale::Angry,
            Morale::Neutral => Morale::Unhappy,
            Morale::Content => Morale::Neutral,
            Morale::Happy => Morale::Content,
        }
    }

    /// Contribution to the expected-chances momentum term.
    pub fn momentum_bonus(&self) -> f32 {
        match self {
            Morale::Happy => 3.0,
            Morale::Content => 1.0,
            Morale::Neutral => 0.0,
            Morale::Unhappy => -2.0,
            Morale::Angry => -5.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Morale::Angry => "Angry",
            Morale::Unhappy => "Unhappy",
            Morale::Neutral => "Neutral",
            Morale::Content => "Content",
            Morale::Happy => "Happy",
        }
    }
}

/// One squad member, at season-engine granularity.
///
/// Ratings live on a 1..=100 scale. Value and wage are derived from rating at
/// generation time and only matter to the confidence model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub rating: u8,
    pub age: u8,
    /// Market value in whole currency units.
    pub value: u32,
    /// Weekly wage in whole currency units.
    pub wage: u32,
    #[serde(default)]
    pub morale: Morale,
    pub contract_years: u8,
    #[serde(default)]
    pub transfer_listed: bool,
}

impl Player {
    /// Rating clamped into the legal band. External rosters occasionally
    /// carry zeroes from partial edits.
    pub fn effective_rating(&self) -> u8 {
        self.rating.clamp(1, 100)
    }
}

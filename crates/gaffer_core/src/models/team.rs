use super::{Morale, Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric team identity, assigned at world generation and never
/// reused within a world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Rough pedigree band. Drives world-generation rating ranges and the
/// quality floor of youth intake.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamTier {
    Top,
    Mid,
    Lower,
}

impl TeamTier {
    pub fn display_name(&self) -> &'static str {
        match self {
            TeamTier::Top => "Top",
            TeamTier::Mid => "Mid",
            TeamTier::Lower => "Lower",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TacticalStance {
    Attacking,
    #[default]
    Balanced,
    Defensive,
}

impl TacticalStance {
    pub fn display_name(&self) -> &'static str {
        match self {
            TacticalStance::Attacking => "Attacking",
            TacticalStance::Balanced => "Balanced",
            TacticalStance::Defensive => "Defensive",
        }
    }
}

/// League membership. Two flights, promotion and relegation between them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Division {
    First,
    Second,
}

impl Division {
    pub fn display_name(&self) -> &'static str {
        match self {
            Division::First => "First Division",
            Division::Second => "Second Division",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub tier: TeamTier,
    pub division: Division,
    #[serde(default)]
    pub morale: Morale,
    #[serde(default)]
    pub stance: TacticalStance,
    /// Senior squad. Ordered best-first at generation time; the first 11
    /// slots are the starting eleven.
    pub squad: Vec<Player>,
    /// Youth academy pool, kept outside the senior squad until promotion at
    /// the season turnover.
    #[serde(default)]
    pub academy: Vec<Player>,
}

impl Team {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Team name must not be empty".to_string());
        }
        if self.squad.is_empty() {
            return Err(format!("Team {} has an empty squad", self.name));
        }
        let gk_count = self.squad.iter().filter(|p| p.position.is_goalkeeper()).count();
        if gk_count == 0 {
            return Err(format!("Team {} has no goalkeeper", self.name));
        }
        Ok(())
    }

    /// First 11 squad slots, or the whole squad when it is thinner than that.
    pub fn starting_eleven(&self) -> &[Player] {
        let n = self.squad.len().min(11);
        &self.squad[..n]
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.squad.iter().find(|p| p.id == id)
    }

    pub fn wage_bill(&self) -> u32 {
        self.squad.iter().map(|p| p.wage).sum()
    }

    pub fn average_rating(&self) -> f32 {
        if self.squad.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.squad.iter().map(|p| p.effective_rating() as u32).sum();
        sum as f32 / self.squad.len() as f32
    }
}

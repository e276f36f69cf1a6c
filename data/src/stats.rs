//! Stat axes and species base-stat records

use serde::{Deserialize, Serialize};

/// The seven stat axes a stage modifier can apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl StatKind {
    /// Parse a lower-case short name; unknown names yield `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "atk" | "attack" => Some(StatKind::Attack),
            "def" | "defense" => Some(StatKind::Defense),
            "spa" | "sp_attack" => Some(StatKind::SpAttack),
            "spd" | "sp_defense" => Some(StatKind::SpDefense),
            "spe" | "speed" => Some(StatKind::Speed),
            "accuracy" => Some(StatKind::Accuracy),
            "evasion" => Some(StatKind::Evasion),
            _ => None,
        }
    }

    /// Display name
    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::SpAttack => "Sp. Attack",
            StatKind::SpDefense => "Sp. Defense",
            StatKind::Speed => "Speed",
            StatKind::Accuracy => "Accuracy",
            StatKind::Evasion => "Evasion",
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Species-derived base stats, already resolved by the reference-data
/// provider before a battle starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn new(hp: u16, attack: u16, defense: u16, sp_attack: u16, sp_defense: u16, speed: u16) -> Self {
        Self {
            hp,
            attack,
            defense,
            sp_attack,
            sp_defense,
            speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_kind_from_name() {
        assert_eq!(StatKind::from_name("atk"), Some(StatKind::Attack));
        assert_eq!(StatKind::from_name("speed"), Some(StatKind::Speed));
        assert_eq!(StatKind::from_name("evasion"), Some(StatKind::Evasion));
        assert_eq!(StatKind::from_name("luck"), None);
    }

    #[test]
    fn test_base_stats_new() {
        let stats = BaseStats::new(70, 110, 70, 115, 70, 90);
        assert_eq!(stats.hp, 70);
        assert_eq!(stats.sp_attack, 115);
    }
}

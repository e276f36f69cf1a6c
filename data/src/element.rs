//! Element catalog and the matchup matrix

use serde::{Deserialize, Serialize};

/// The 18 elements a combatant or move can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Element {
    Normal = 0,
    Fire = 1,
    Water = 2,
    Electric = 3,
    Grass = 4,
    Ice = 5,
    Fighting = 6,
    Poison = 7,
    Ground = 8,
    Flying = 9,
    Psychic = 10,
    Bug = 11,
    Rock = 12,
    Ghost = 13,
    Dragon = 14,
    Dark = 15,
    Steel = 16,
    Fairy = 17,
}

impl Element {
    /// Every element, in matrix order
    pub const ALL: [Element; 18] = [
        Element::Normal,
        Element::Fire,
        Element::Water,
        Element::Electric,
        Element::Grass,
        Element::Ice,
        Element::Fighting,
        Element::Poison,
        Element::Ground,
        Element::Flying,
        Element::Psychic,
        Element::Bug,
        Element::Rock,
        Element::Ghost,
        Element::Dragon,
        Element::Dark,
        Element::Steel,
        Element::Fairy,
    ];

    /// Matchup multiplier of this element attacking one defending element
    pub fn matchup(self, defender: Element) -> f32 {
        MATCHUP[self as usize][defender as usize]
    }

    /// Matchup multiplier against a multi-element defender (product over all
    /// defending elements; any immunity zeroes the whole product)
    pub fn matchup_all(self, defenders: &[Element]) -> f32 {
        defenders.iter().map(|d| self.matchup(*d)).product()
    }

    /// Parse a lower- or mixed-case element name; unknown names yield `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "normal" => Some(Element::Normal),
            "fire" => Some(Element::Fire),
            "water" => Some(Element::Water),
            "electric" => Some(Element::Electric),
            "grass" => Some(Element::Grass),
            "ice" => Some(Element::Ice),
            "fighting" => Some(Element::Fighting),
            "poison" => Some(Element::Poison),
            "ground" => Some(Element::Ground),
            "flying" => Some(Element::Flying),
            "psychic" => Some(Element::Psychic),
            "bug" => Some(Element::Bug),
            "rock" => Some(Element::Rock),
            "ghost" => Some(Element::Ghost),
            "dragon" => Some(Element::Dragon),
            "dark" => Some(Element::Dark),
            "steel" => Some(Element::Steel),
            "fairy" => Some(Element::Fairy),
            _ => None,
        }
    }

    /// Canonical display name
    pub fn as_str(self) -> &'static str {
        match self {
            Element::Normal => "Normal",
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Electric => "Electric",
            Element::Grass => "Grass",
            Element::Ice => "Ice",
            Element::Fighting => "Fighting",
            Element::Poison => "Poison",
            Element::Ground => "Ground",
            Element::Flying => "Flying",
            Element::Psychic => "Psychic",
            Element::Bug => "Bug",
            Element::Rock => "Rock",
            Element::Ghost => "Ghost",
            Element::Dragon => "Dragon",
            Element::Dark => "Dark",
            Element::Steel => "Steel",
            Element::Fairy => "Fairy",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 18x18 matchup matrix. Row = attacking element, column = defending element.
/// 0.0 = no effect, 0.5 = resisted, 1.0 = neutral, 2.0 = weak.
///
/// Column order matches [`Element::ALL`].
#[rustfmt::skip]
pub static MATCHUP: [[f32; 18]; 18] = [
    // Normal
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 0.0, 1.0, 1.0, 0.5, 1.0],
    // Fire
    [1.0, 0.5, 0.5, 1.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 0.5, 1.0, 2.0, 1.0],
    // Water
    [1.0, 2.0, 0.5, 1.0, 0.5, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 1.0, 1.0],
    // Electric
    [1.0, 1.0, 2.0, 0.5, 0.5, 1.0, 1.0, 1.0, 0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0],
    // Grass
    [1.0, 0.5, 2.0, 1.0, 0.5, 1.0, 1.0, 0.5, 2.0, 0.5, 1.0, 0.5, 2.0, 1.0, 0.5, 1.0, 0.5, 1.0],
    // Ice
    [1.0, 0.5, 0.5, 1.0, 2.0, 0.5, 1.0, 1.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0],
    // Fighting
    [2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 0.5, 0.5, 0.5, 2.0, 0.0, 1.0, 2.0, 2.0, 0.5],
    // Poison
    [1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 0.5, 0.5, 1.0, 1.0, 1.0, 0.5, 0.5, 1.0, 1.0, 0.0, 2.0],
    // Ground
    [1.0, 2.0, 1.0, 2.0, 0.5, 1.0, 1.0, 2.0, 1.0, 0.0, 1.0, 0.5, 2.0, 1.0, 1.0, 1.0, 2.0, 1.0],
    // Flying
    [1.0, 1.0, 1.0, 0.5, 2.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 1.0, 1.0, 0.5, 1.0],
    // Psychic
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 1.0, 0.0, 0.5, 1.0],
    // Bug
    [1.0, 0.5, 1.0, 1.0, 2.0, 1.0, 0.5, 0.5, 1.0, 0.5, 2.0, 1.0, 1.0, 0.5, 1.0, 2.0, 0.5, 0.5],
    // Rock
    [1.0, 2.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 0.5, 2.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0],
    // Ghost
    [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 1.0],
    // Dragon
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.5, 0.0],
    // Dark
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 1.0, 0.5, 1.0, 0.5],
    // Steel
    [1.0, 0.5, 0.5, 0.5, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 0.5, 2.0],
    // Fairy
    [1.0, 0.5, 1.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 0.5, 1.0],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_matchups() {
        assert_eq!(Element::Fire.matchup(Element::Grass), 2.0);
        assert_eq!(Element::Water.matchup(Element::Fire), 2.0);
        assert_eq!(Element::Fighting.matchup(Element::Steel), 2.0);
        assert_eq!(Element::Fighting.matchup(Element::Rock), 2.0);
    }

    #[test]
    fn test_resisted_matchups() {
        assert_eq!(Element::Fire.matchup(Element::Water), 0.5);
        assert_eq!(Element::Grass.matchup(Element::Fire), 0.5);
        assert_eq!(Element::Normal.matchup(Element::Steel), 0.5);
    }

    #[test]
    fn test_immunities() {
        assert_eq!(Element::Ground.matchup(Element::Flying), 0.0);
        assert_eq!(Element::Electric.matchup(Element::Ground), 0.0);
        assert_eq!(Element::Normal.matchup(Element::Ghost), 0.0);
        assert_eq!(Element::Dragon.matchup(Element::Fairy), 0.0);
    }

    #[test]
    fn test_matchup_all_products() {
        // Fighting vs Steel/Rock compounds to 4x
        assert_eq!(
            Element::Fighting.matchup_all(&[Element::Steel, Element::Rock]),
            4.0
        );
        // Ground vs Fire/Flying is zeroed by the Flying immunity
        assert_eq!(
            Element::Ground.matchup_all(&[Element::Fire, Element::Flying]),
            0.0
        );
        // Fire vs Water/Rock stacks resistances
        assert_eq!(
            Element::Fire.matchup_all(&[Element::Water, Element::Rock]),
            0.25
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Element::from_name("ground"), Some(Element::Ground));
        assert_eq!(Element::from_name("Flying"), Some(Element::Flying));
        assert_eq!(Element::from_name("STEEL"), Some(Element::Steel));
        assert_eq!(Element::from_name("plasma"), None);
    }

    #[test]
    fn test_all_covers_matrix() {
        assert_eq!(Element::ALL.len(), 18);
        for (i, e) in Element::ALL.iter().enumerate() {
            assert_eq!(*e as usize, i);
        }
    }
}

//! Ability identifier catalog
//!
//! A closed enum instead of string keys so the hook registry stays
//! exhaustive. Unknown names parse to `None` and are treated as "no special
//! effect" by the engine.

use serde::{Deserialize, Serialize};

/// Every ability the rule tables know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityId {
    Levitate,
    MoldBreaker,
    Unaware,
    Sniper,
    ShellArmor,
    TintedLens,
    Multiscale,
    LightningRod,
    StormDrain,
    Stalwart,
    MagicBounce,
    NeutralizingGas,
    Unnerve,
    SwiftSwim,
    Stall,
    Prankster,
    Intimidate,
    Drizzle,
    Drought,
    SpeedBoost,
    Moody,
    MagicGuard,
    PoisonHeal,
    Heatproof,
    Overcoat,
    RoughSkin,
    Mummy,
    Sturdy,
    Defiant,
    ClearBody,
    Moxie,
    Forecast,
    ZenMode,
    Technician,
    Guts,
}

impl AbilityId {
    /// Number of catalogued abilities; sizes the engine's hook registry
    pub const COUNT: usize = 35;

    /// Parse a lower-cased, separator-free ability name.
    /// Unknown identifiers yield `None` ("no special effect").
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "levitate" => Some(AbilityId::Levitate),
            "moldbreaker" => Some(AbilityId::MoldBreaker),
            "unaware" => Some(AbilityId::Unaware),
            "sniper" => Some(AbilityId::Sniper),
            "shellarmor" => Some(AbilityId::ShellArmor),
            "tintedlens" => Some(AbilityId::TintedLens),
            "multiscale" => Some(AbilityId::Multiscale),
            "lightningrod" => Some(AbilityId::LightningRod),
            "stormdrain" => Some(AbilityId::StormDrain),
            "stalwart" => Some(AbilityId::Stalwart),
            "magicbounce" => Some(AbilityId::MagicBounce),
            "neutralizinggas" => Some(AbilityId::NeutralizingGas),
            "unnerve" => Some(AbilityId::Unnerve),
            "swiftswim" => Some(AbilityId::SwiftSwim),
            "stall" => Some(AbilityId::Stall),
            "prankster" => Some(AbilityId::Prankster),
            "intimidate" => Some(AbilityId::Intimidate),
            "drizzle" => Some(AbilityId::Drizzle),
            "drought" => Some(AbilityId::Drought),
            "speedboost" => Some(AbilityId::SpeedBoost),
            "moody" => Some(AbilityId::Moody),
            "magicguard" => Some(AbilityId::MagicGuard),
            "poisonheal" => Some(AbilityId::PoisonHeal),
            "heatproof" => Some(AbilityId::Heatproof),
            "overcoat" => Some(AbilityId::Overcoat),
            "roughskin" => Some(AbilityId::RoughSkin),
            "mummy" => Some(AbilityId::Mummy),
            "sturdy" => Some(AbilityId::Sturdy),
            "defiant" => Some(AbilityId::Defiant),
            "clearbody" => Some(AbilityId::ClearBody),
            "moxie" => Some(AbilityId::Moxie),
            "forecast" => Some(AbilityId::Forecast),
            "zenmode" => Some(AbilityId::ZenMode),
            "technician" => Some(AbilityId::Technician),
            "guts" => Some(AbilityId::Guts),
            _ => None,
        }
    }

    /// Display name
    pub fn as_str(self) -> &'static str {
        match self {
            AbilityId::Levitate => "Levitate",
            AbilityId::MoldBreaker => "Mold Breaker",
            AbilityId::Unaware => "Unaware",
            AbilityId::Sniper => "Sniper",
            AbilityId::ShellArmor => "Shell Armor",
            AbilityId::TintedLens => "Tinted Lens",
            AbilityId::Multiscale => "Multiscale",
            AbilityId::LightningRod => "Lightning Rod",
            AbilityId::StormDrain => "Storm Drain",
            AbilityId::Stalwart => "Stalwart",
            AbilityId::MagicBounce => "Magic Bounce",
            AbilityId::NeutralizingGas => "Neutralizing Gas",
            AbilityId::Unnerve => "Unnerve",
            AbilityId::SwiftSwim => "Swift Swim",
            AbilityId::Stall => "Stall",
            AbilityId::Prankster => "Prankster",
            AbilityId::Intimidate => "Intimidate",
            AbilityId::Drizzle => "Drizzle",
            AbilityId::Drought => "Drought",
            AbilityId::SpeedBoost => "Speed Boost",
            AbilityId::Moody => "Moody",
            AbilityId::MagicGuard => "Magic Guard",
            AbilityId::PoisonHeal => "Poison Heal",
            AbilityId::Heatproof => "Heatproof",
            AbilityId::Overcoat => "Overcoat",
            AbilityId::RoughSkin => "Rough Skin",
            AbilityId::Mummy => "Mummy",
            AbilityId::Sturdy => "Sturdy",
            AbilityId::Defiant => "Defiant",
            AbilityId::ClearBody => "Clear Body",
            AbilityId::Moxie => "Moxie",
            AbilityId::Forecast => "Forecast",
            AbilityId::ZenMode => "Zen Mode",
            AbilityId::Technician => "Technician",
            AbilityId::Guts => "Guts",
        }
    }

    // Marker capabilities. These abilities have no entry (or only a partial
    // entry) in the hook registry because their effect needs cross-cutting
    // knowledge; the named component checks the capability directly.

    /// Attacker-side: defender ability hooks (immunity, damage reduction,
    /// bounce) are skipped. Checked by the damage calculator.
    pub fn bypasses_defender_ability(self) -> bool {
        matches!(self, AbilityId::MoldBreaker)
    }

    /// Attacker-side: redirection checks never move this combatant's
    /// single-target hits. Checked by the turn engine.
    pub fn ignores_redirection(self) -> bool {
        matches!(self, AbilityId::Stalwart)
    }

    /// While a holder is active, every *other* combatant's effective ability
    /// resolves to none. Checked by the effective-ability resolver.
    pub fn suppresses_other_abilities(self) -> bool {
        matches!(self, AbilityId::NeutralizingGas)
    }

    /// While a holder is active, opposing end-of-turn item hooks are
    /// skipped. Checked by the status/field manager.
    pub fn unnerves_opponents(self) -> bool {
        matches!(self, AbilityId::Unnerve)
    }

    /// A lethal hit from full HP leaves the holder at 1 HP. Checked by the
    /// damage application path, before the equivalent item.
    pub fn survives_lethal(self) -> bool {
        matches!(self, AbilityId::Sturdy)
    }

    /// Effective speed becomes the always-moves-last sentinel. Checked by
    /// the ordering module.
    pub fn always_last(self) -> bool {
        matches!(self, AbilityId::Stall)
    }

    /// Immune to every indirect (non-move) damage source. Checked by the
    /// status/field manager and the hazard pipeline.
    pub fn blocks_indirect_damage(self) -> bool {
        matches!(self, AbilityId::MagicGuard)
    }

    /// Status-category moves gain one priority tier. Checked by the
    /// ordering module, which needs it before any hook context exists.
    pub fn boosts_status_priority(self) -> bool {
        matches!(self, AbilityId::Prankster)
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_normalizes() {
        assert_eq!(AbilityId::from_name("Mold Breaker"), Some(AbilityId::MoldBreaker));
        assert_eq!(AbilityId::from_name("swift-swim"), Some(AbilityId::SwiftSwim));
        assert_eq!(AbilityId::from_name("LEVITATE"), Some(AbilityId::Levitate));
    }

    #[test]
    fn test_unknown_name_is_none() {
        assert_eq!(AbilityId::from_name("adaptive camouflage"), None);
    }

    #[test]
    fn test_markers() {
        assert!(AbilityId::MoldBreaker.bypasses_defender_ability());
        assert!(AbilityId::Stalwart.ignores_redirection());
        assert!(AbilityId::NeutralizingGas.suppresses_other_abilities());
        assert!(AbilityId::Sturdy.survives_lethal());
        assert!(AbilityId::Stall.always_last());
        assert!(AbilityId::MagicGuard.blocks_indirect_damage());
        assert!(!AbilityId::Levitate.bypasses_defender_ability());
    }

    #[test]
    fn test_count_matches_round_trip() {
        // Every display name must parse back to the same variant, and the
        // registry size constant must cover the catalog.
        let mut seen = 0;
        for name in [
            "levitate", "moldbreaker", "unaware", "sniper", "shellarmor", "tintedlens",
            "multiscale", "lightningrod", "stormdrain", "stalwart", "magicbounce",
            "neutralizinggas", "unnerve", "swiftswim", "stall", "prankster", "intimidate",
            "drizzle", "drought", "speedboost", "moody", "magicguard", "poisonheal",
            "heatproof", "overcoat", "roughskin", "mummy", "sturdy", "defiant", "clearbody",
            "moxie", "forecast", "zenmode", "technician", "guts",
        ] {
            let id = AbilityId::from_name(name).expect(name);
            assert_eq!(AbilityId::from_name(id.as_str()), Some(id));
            seen += 1;
        }
        assert_eq!(seen, AbilityId::COUNT);
    }
}

//! Item identifier catalog

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// Every held or usable item the rule tables know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemId {
    FocusSash,
    LifeOrb,
    ChoiceBand,
    ChoiceSpecs,
    ChoiceScarf,
    ExpertBelt,
    MuscleBand,
    OccaBerry,
    ChopleBerry,
    Leftovers,
    BigRoot,
    LaggingTail,
    QuickClaw,
    RingTarget,
    CovertCloak,
    HeavyDutyBoots,
    EjectButton,
    SitrusBerry,
    BlunderPolicy,
    BoosterEnergy,
    Potion,
    SuperPotion,
    FullHeal,
}

impl ItemId {
    /// Number of catalogued items; sizes the engine's hook registry
    pub const COUNT: usize = 23;

    /// Parse a lower-cased, separator-free item name.
    /// Unknown identifiers yield `None` ("no special effect").
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "focussash" => Some(ItemId::FocusSash),
            "lifeorb" => Some(ItemId::LifeOrb),
            "choiceband" => Some(ItemId::ChoiceBand),
            "choicespecs" => Some(ItemId::ChoiceSpecs),
            "choicescarf" => Some(ItemId::ChoiceScarf),
            "expertbelt" => Some(ItemId::ExpertBelt),
            "muscleband" => Some(ItemId::MuscleBand),
            "occaberry" => Some(ItemId::OccaBerry),
            "chopleberry" => Some(ItemId::ChopleBerry),
            "leftovers" => Some(ItemId::Leftovers),
            "bigroot" => Some(ItemId::BigRoot),
            "laggingtail" => Some(ItemId::LaggingTail),
            "quickclaw" => Some(ItemId::QuickClaw),
            "ringtarget" => Some(ItemId::RingTarget),
            "covertcloak" => Some(ItemId::CovertCloak),
            "heavydutyboots" => Some(ItemId::HeavyDutyBoots),
            "ejectbutton" => Some(ItemId::EjectButton),
            "sitrusberry" => Some(ItemId::SitrusBerry),
            "blunderpolicy" => Some(ItemId::BlunderPolicy),
            "boosterenergy" => Some(ItemId::BoosterEnergy),
            "potion" => Some(ItemId::Potion),
            "superpotion" => Some(ItemId::SuperPotion),
            "fullheal" => Some(ItemId::FullHeal),
            _ => None,
        }
    }

    /// Display name
    pub fn as_str(self) -> &'static str {
        match self {
            ItemId::FocusSash => "Focus Sash",
            ItemId::LifeOrb => "Life Orb",
            ItemId::ChoiceBand => "Choice Band",
            ItemId::ChoiceSpecs => "Choice Specs",
            ItemId::ChoiceScarf => "Choice Scarf",
            ItemId::ExpertBelt => "Expert Belt",
            ItemId::MuscleBand => "Muscle Band",
            ItemId::OccaBerry => "Occa Berry",
            ItemId::ChopleBerry => "Chople Berry",
            ItemId::Leftovers => "Leftovers",
            ItemId::BigRoot => "Big Root",
            ItemId::LaggingTail => "Lagging Tail",
            ItemId::QuickClaw => "Quick Claw",
            ItemId::RingTarget => "Ring Target",
            ItemId::CovertCloak => "Covert Cloak",
            ItemId::HeavyDutyBoots => "Heavy-Duty Boots",
            ItemId::EjectButton => "Eject Button",
            ItemId::SitrusBerry => "Sitrus Berry",
            ItemId::BlunderPolicy => "Blunder Policy",
            ItemId::BoosterEnergy => "Booster Energy",
            ItemId::Potion => "Potion",
            ItemId::SuperPotion => "Super Potion",
            ItemId::FullHeal => "Full Heal",
        }
    }

    // Marker capabilities, checked directly by the named component (same
    // scheme as the ability markers).

    /// A lethal hit from full HP leaves the holder at 1 HP and consumes the
    /// item. Checked by the damage application path, after the equivalent
    /// ability.
    pub fn survives_lethal(self) -> bool {
        matches!(self, ItemId::FocusSash)
    }

    /// Effective speed becomes the always-moves-last sentinel. Checked by
    /// the ordering module.
    pub fn always_last(self) -> bool {
        matches!(self, ItemId::LaggingTail)
    }

    /// Zero-effectiveness hits against the holder are treated as neutral.
    /// Checked by the damage calculator.
    pub fn negates_immunities(self) -> bool {
        matches!(self, ItemId::RingTarget)
    }

    /// Secondary effects of hits against the holder are short-circuited.
    /// Checked by the per-hit loop.
    pub fn blocks_secondary_effects(self) -> bool {
        matches!(self, ItemId::CovertCloak)
    }

    /// The holder skips entry-hazard processing. Checked by the switch-in
    /// pipeline.
    pub fn blocks_hazards(self) -> bool {
        matches!(self, ItemId::HeavyDutyBoots)
    }

    /// Locks the holder into its first chosen move until it switches out
    pub fn choice_locks(self) -> bool {
        matches!(self, ItemId::ChoiceBand | ItemId::ChoiceSpecs | ItemId::ChoiceScarf)
    }

    /// Externally adjudicated priority bump ("accelerated decision")
    pub fn accelerates_decision(self) -> bool {
        matches!(self, ItemId::QuickClaw)
    }

    /// Boosts drain and leech healing received by the holder's effects
    pub fn boosts_drain(self) -> bool {
        matches!(self, ItemId::BigRoot)
    }

    /// Usable from the bag as a turn action
    pub fn usable(self) -> bool {
        matches!(self, ItemId::Potion | ItemId::SuperPotion | ItemId::FullHeal)
    }

    /// Element guarded by a resistance berry, if this is one
    pub fn resist_berry_element(self) -> Option<Element> {
        match self {
            ItemId::OccaBerry => Some(Element::Fire),
            ItemId::ChopleBerry => Some(Element::Fighting),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_normalizes() {
        assert_eq!(ItemId::from_name("Focus Sash"), Some(ItemId::FocusSash));
        assert_eq!(ItemId::from_name("heavy-duty boots"), Some(ItemId::HeavyDutyBoots));
        assert_eq!(ItemId::from_name("LIFE ORB"), Some(ItemId::LifeOrb));
        assert_eq!(ItemId::from_name("mystery orb"), None);
    }

    #[test]
    fn test_choice_family() {
        assert!(ItemId::ChoiceBand.choice_locks());
        assert!(ItemId::ChoiceSpecs.choice_locks());
        assert!(ItemId::ChoiceScarf.choice_locks());
        assert!(!ItemId::ExpertBelt.choice_locks());
    }

    #[test]
    fn test_resist_berries() {
        assert_eq!(ItemId::OccaBerry.resist_berry_element(), Some(Element::Fire));
        assert_eq!(ItemId::ChopleBerry.resist_berry_element(), Some(Element::Fighting));
        assert_eq!(ItemId::Leftovers.resist_berry_element(), None);
    }

    #[test]
    fn test_usable_items() {
        assert!(ItemId::Potion.usable());
        assert!(ItemId::FullHeal.usable());
        assert!(!ItemId::FocusSash.usable());
    }
}

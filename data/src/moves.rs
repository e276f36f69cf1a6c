//! Move metadata records
//!
//! A [`MoveData`] record is fully resolved by the reference-data provider
//! before battle; the engine reads it and never looks anything up by name.

use serde::{Deserialize, Serialize};

use crate::abilities::AbilityId;
use crate::conditions::{HazardKind, RoomKind, ScreenKind, Status, Terrain, VolatileKind, Weather};
use crate::element::Element;
use crate::stats::StatKind;

/// Damage category of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveCategory::Physical => "Physical",
            MoveCategory::Special => "Special",
            MoveCategory::Status => "Status",
        }
    }
}

impl std::fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side a secondary effect lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    User,
    Target,
}

/// Field- or status-shaping effects resolved by the turn engine's
/// interception step before any hit is computed. A move with one of these
/// fully resolves there and never enters the per-hit loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveEffect {
    SetWeather(Weather),
    SetTerrain(Terrain),
    ToggleRoom(RoomKind),
    SetScreen(ScreenKind),
    SetHazard(HazardKind),
    /// User pays half its max HP; target is cursed
    Curse,
    /// Fails unless the target is asleep
    Nightmare,
    /// Locks the target into repeating its last move
    Encore,
    /// Target cannot use status-category moves while taunted
    Taunt,
    /// Target is infatuated with the user
    Infatuate,
    /// Target's effective ability resolves to none
    SuppressAbility,
    /// Target's effective ability is replaced
    ReplaceAbility(AbilityId),
    /// Two-turn move: charge this turn, strike next turn
    Charge,
    /// Every active combatant receives a perish counter
    PerishSong,
    /// Target is dragged out for the first eligible bench member
    ForceSwitch,
}

/// Secondary payload of a damaging (or plain status) hit, applied only on
/// the first hit of a sequence and only when the submitted action's
/// apply-effect decision is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryEffect {
    pub kind: SecondaryKind,
    pub target: EffectTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SecondaryKind {
    InflictStatus(Status),
    /// Stage deltas, e.g. `[(Attack, -1)]`
    StatStages(Vec<(StatKind, i8)>),
    ApplyVolatile(VolatileKind),
    /// Binding trap with an end-of-turn damage counter
    Bind,
    /// Leech seed toward the user
    Seed,
}

/// Immutable move metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub element: Element,
    pub category: MoveCategory,
    /// Base power; zero for status moves
    pub power: u16,
    /// Percent accuracy; 0 means the move cannot miss
    pub accuracy: u8,
    /// Base priority, before item/ability overrides
    pub priority: i8,
    pub max_uses: u8,
    /// Whether hits make contact
    pub contact: bool,
    /// Recoil to the user: damage dealt divided by this
    pub recoil_divisor: Option<u8>,
    /// Healing to the user: damage dealt divided by this
    pub drain_divisor: Option<u8>,
    /// Whether the action may carry a multi-entry hit list
    pub multi_hit: bool,
    /// Locks the user into repeating this move
    pub rampage: bool,
    /// Interceptable field/status effect; see [`MoveEffect`]
    pub effect: Option<MoveEffect>,
    pub secondary: Option<SecondaryEffect>,
}

impl MoveData {
    /// Create a plain damaging move; tune the remaining fields directly
    pub fn new(
        name: impl Into<String>,
        element: Element,
        category: MoveCategory,
        power: u16,
    ) -> Self {
        Self {
            name: name.into(),
            element,
            category,
            power,
            accuracy: 100,
            priority: 0,
            max_uses: 16,
            contact: category == MoveCategory::Physical,
            recoil_divisor: None,
            drain_divisor: None,
            multi_hit: false,
            rampage: false,
            effect: None,
            secondary: None,
        }
    }

    /// Create a status move carrying an interceptable effect
    pub fn status(name: impl Into<String>, element: Element, effect: MoveEffect) -> Self {
        let mut data = Self::new(name, element, MoveCategory::Status, 0);
        data.contact = false;
        data.effect = Some(effect);
        data
    }
}

/// Power tier for a surged special action, keyed by the base move's power.
/// A surge consumes the team's once-per-battle flag.
pub fn surge_power(base_power: u16) -> u16 {
    match base_power {
        0..=55 => 100,
        56..=65 => 120,
        66..=75 => 140,
        76..=85 => 160,
        86..=95 => 175,
        96..=100 => 180,
        101..=110 => 185,
        111..=125 => 190,
        126..=130 => 195,
        _ => 200,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_damaging_move() {
        let tackle = MoveData::new("Tackle", Element::Normal, MoveCategory::Physical, 40);
        assert_eq!(tackle.power, 40);
        assert!(tackle.contact);
        assert_eq!(tackle.accuracy, 100);
        assert!(tackle.effect.is_none());
    }

    #[test]
    fn test_special_moves_do_not_contact() {
        let flamethrower = MoveData::new("Flamethrower", Element::Fire, MoveCategory::Special, 90);
        assert!(!flamethrower.contact);
    }

    #[test]
    fn test_status_constructor() {
        let rain = MoveData::status("Rain Dance", Element::Water, MoveEffect::SetWeather(Weather::Rain));
        assert_eq!(rain.category, MoveCategory::Status);
        assert_eq!(rain.power, 0);
        assert_eq!(rain.effect, Some(MoveEffect::SetWeather(Weather::Rain)));
    }

    #[test]
    fn test_surge_power_tiers() {
        assert_eq!(surge_power(40), 100);
        assert_eq!(surge_power(60), 120);
        assert_eq!(surge_power(90), 175);
        assert_eq!(surge_power(100), 180);
        assert_eq!(surge_power(120), 190);
        assert_eq!(surge_power(150), 200);
    }
}

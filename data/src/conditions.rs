//! Status and field-condition catalogs

use serde::{Deserialize, Serialize};

use crate::abilities::AbilityId;

/// Non-volatile status conditions (persist through switching; at most one
/// per combatant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Burn,
    Poison,
    BadPoison,
    Paralysis,
    Sleep,
    Freeze,
}

impl Status {
    /// Parse a short status name; unknown names yield `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "brn" | "burn" => Some(Status::Burn),
            "psn" | "poison" => Some(Status::Poison),
            "tox" | "badpoison" => Some(Status::BadPoison),
            "par" | "paralysis" => Some(Status::Paralysis),
            "slp" | "sleep" => Some(Status::Sleep),
            "frz" | "freeze" => Some(Status::Freeze),
            _ => None,
        }
    }

    /// Display name
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Burn => "Burn",
            Status::Poison => "Poison",
            Status::BadPoison => "Bad Poison",
            Status::Paralysis => "Paralysis",
            Status::Sleep => "Sleep",
            Status::Freeze => "Freeze",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Volatile-condition kinds (cleared on switch-out). Some variants carry
/// payloads; equality on the *kind* of condition goes through
/// [`VolatileKind::same_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatileKind {
    Confusion,
    Infatuated,
    /// Binding trap damage each end of turn while the counter runs
    Bound,
    /// Leech seed; drains toward the source each end of turn
    Seeded,
    Cursed,
    Nightmare,
    /// Perish counter; faints the holder when it reaches zero
    PerishCount,
    /// Locked into repeating the stored move index
    Encore(u8),
    Taunted,
    /// Effective ability resolves to "none"
    AbilitySuppressed,
    /// Effective ability resolves to the stored ability
    AbilityReplaced(AbilityId),
}

impl VolatileKind {
    /// Whether two values are the same condition, ignoring payloads.
    /// Tag-only conditions must not be duplicated in a volatile list.
    pub fn same_kind(self, other: VolatileKind) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }

    /// Display name
    pub fn as_str(self) -> &'static str {
        match self {
            VolatileKind::Confusion => "Confusion",
            VolatileKind::Infatuated => "Infatuation",
            VolatileKind::Bound => "Bound",
            VolatileKind::Seeded => "Leech Seed",
            VolatileKind::Cursed => "Curse",
            VolatileKind::Nightmare => "Nightmare",
            VolatileKind::PerishCount => "Perish Count",
            VolatileKind::Encore(_) => "Encore",
            VolatileKind::Taunted => "Taunt",
            VolatileKind::AbilitySuppressed => "Ability Suppressed",
            VolatileKind::AbilityReplaced(_) => "Ability Replaced",
        }
    }
}

impl std::fmt::Display for VolatileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weather kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sun,
    Rain,
    Sandstorm,
    Hail,
}

impl Weather {
    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Sun => "Harsh Sunlight",
            Weather::Rain => "Rain",
            Weather::Sandstorm => "Sandstorm",
            Weather::Hail => "Hail",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terrain kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl Terrain {
    pub fn as_str(self) -> &'static str {
        match self {
            Terrain::Electric => "Electric Terrain",
            Terrain::Grassy => "Grassy Terrain",
            Terrain::Misty => "Misty Terrain",
            Terrain::Psychic => "Psychic Terrain",
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four independent room effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    /// Same-tier speed comparisons are inverted
    TurnReversal,
    /// Held items have no effect
    ItemSuppression,
    /// Airborne exemptions are lifted
    Gravity,
    /// Physical hits strike special defense and vice versa
    DefenseSwap,
}

impl RoomKind {
    pub const ALL: [RoomKind; 4] = [
        RoomKind::TurnReversal,
        RoomKind::ItemSuppression,
        RoomKind::Gravity,
        RoomKind::DefenseSwap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoomKind::TurnReversal => "Reversal Room",
            RoomKind::ItemSuppression => "Null Room",
            RoomKind::Gravity => "Gravity Well",
            RoomKind::DefenseSwap => "Mirror Room",
        }
    }
}

impl std::fmt::Display for RoomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entry hazard kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Rock-scaled percentage damage on entry
    PointedStones,
    /// Stackable damage layers against grounded entrants
    Spikes,
    /// Stackable poison layers against grounded entrants
    ToxicSpikes,
    /// Speed drop against grounded entrants
    StickyWeb,
}

impl HazardKind {
    pub const ALL: [HazardKind; 4] = [
        HazardKind::PointedStones,
        HazardKind::Spikes,
        HazardKind::ToxicSpikes,
        HazardKind::StickyWeb,
    ];

    /// Maximum number of layers this hazard can stack to
    pub fn max_layers(self) -> u8 {
        match self {
            HazardKind::Spikes => 3,
            HazardKind::ToxicSpikes => 2,
            HazardKind::PointedStones | HazardKind::StickyWeb => 1,
        }
    }

    /// Whether this hazard only affects grounded entrants
    pub fn grounded_only(self) -> bool {
        !matches!(self, HazardKind::PointedStones)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HazardKind::PointedStones => "Pointed Stones",
            HazardKind::Spikes => "Spikes",
            HazardKind::ToxicSpikes => "Toxic Spikes",
            HazardKind::StickyWeb => "Sticky Web",
        }
    }
}

impl std::fmt::Display for HazardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Team-scoped timed screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenKind {
    /// Halves physical damage
    Reflect,
    /// Halves special damage
    LightScreen,
    /// Halves both
    AuroraVeil,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 3] = [
        ScreenKind::Reflect,
        ScreenKind::LightScreen,
        ScreenKind::AuroraVeil,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScreenKind::Reflect => "Reflect",
            ScreenKind::LightScreen => "Light Screen",
            ScreenKind::AuroraVeil => "Aurora Veil",
        }
    }
}

impl std::fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Combatant state

use fracas_data::{AbilityId, BaseStats, Element, ItemId, MoveData, StatKind, Status, VolatileKind};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::stats::{ComputedStats, StatStages};
use super::CombatantId;
use crate::formula;

/// One known move with remaining uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSlot {
    pub data: MoveData,
    pub uses_left: u8,
}

impl MoveSlot {
    pub fn new(data: MoveData) -> Self {
        let uses = data.max_uses;
        Self {
            data,
            uses_left: uses,
        }
    }
}

/// A volatile condition: a bare tag, or a record with a source combatant
/// and/or a remaining-turns counter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volatile {
    pub kind: VolatileKind,
    pub source: Option<CombatantId>,
    pub turns_left: Option<u8>,
}

impl Volatile {
    pub fn tag(kind: VolatileKind) -> Self {
        Self {
            kind,
            source: None,
            turns_left: None,
        }
    }
}

/// In-flight two-turn move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargingMove {
    pub move_index: usize,
    pub target: Option<CombatantId>,
}

/// Alternate-form reference data, resolved by the data provider before
/// battle and applied by the form-change resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    pub name: String,
    pub base_stats: BaseStats,
    pub elements: Vec<Element>,
}

/// Transient scratch fields, cleared on switch-out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scratch {
    /// Most recently consumed item
    pub consumed_item: Option<ItemId>,
    /// Booster-style one-time stat override: (stat, multiplier)
    pub stat_override: Option<(StatKind, f32)>,
    /// Total damage dealt by the move currently resolving
    pub damage_dealt: u32,
    /// Index of the last move this combatant used
    pub last_move: Option<u8>,
}

/// One creature instance participating in battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub level: u8,
    pub base_stats: BaseStats,
    pub stats: ComputedStats,
    pub hp: u32,
    pub max_hp: u32,
    pub fainted: bool,
    pub elements: Vec<Element>,
    pub status: Option<Status>,
    /// Ordered volatile-condition list; no duplicate kinds
    pub volatiles: Vec<Volatile>,
    pub stages: StatStages,
    pub ability: Option<AbilityId>,
    pub item: Option<ItemId>,
    pub moves: Vec<MoveSlot>,
    /// Choice-item / rampage lock: index of the only usable move
    pub locked_move: Option<usize>,
    /// Remaining forced uses of a rampage lock (0 for a choice lock)
    pub rampage_turns: u8,
    pub charging: Option<ChargingMove>,
    /// Alternate form this combatant can assume, if any
    pub alt_form: Option<FormData>,
    /// Original form snapshot, present while transformed
    pub form_snapshot: Option<FormData>,
    pub transformed: bool,
    /// Turns since bad poison was applied
    pub toxic_counter: u8,
    pub scratch: Scratch,
}

impl Combatant {
    /// Create a combatant from resolved reference data at full HP
    pub fn new(
        name: impl Into<String>,
        level: u8,
        base_stats: BaseStats,
        elements: Vec<Element>,
    ) -> Self {
        let stats = ComputedStats::from_base(&base_stats, level);
        let max_hp = formula::hp_value(base_stats.hp, level);
        Self {
            name: name.into(),
            level,
            base_stats,
            stats,
            hp: max_hp,
            max_hp,
            fainted: false,
            elements,
            status: None,
            volatiles: Vec::new(),
            stages: StatStages::new(),
            ability: None,
            item: None,
            moves: Vec::new(),
            locked_move: None,
            rampage_turns: 0,
            charging: None,
            alt_form: None,
            form_snapshot: None,
            transformed: false,
            toxic_counter: 0,
            scratch: Scratch::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.fainted && self.hp > 0
    }

    pub fn has_element(&self, element: Element) -> bool {
        self.elements.contains(&element)
    }

    /// Check for a volatile condition by kind (payloads ignored)
    pub fn has_volatile(&self, kind: VolatileKind) -> bool {
        self.volatiles.iter().any(|v| v.kind.same_kind(kind))
    }

    pub fn volatile(&self, kind: VolatileKind) -> Option<&Volatile> {
        self.volatiles.iter().find(|v| v.kind.same_kind(kind))
    }

    pub fn volatile_mut(&mut self, kind: VolatileKind) -> Option<&mut Volatile> {
        self.volatiles.iter_mut().find(|v| v.kind.same_kind(kind))
    }

    /// Add a volatile condition; an existing condition of the same kind is
    /// replaced so the list never holds duplicate tags
    pub fn add_volatile(&mut self, volatile: Volatile) {
        if let Some(existing) = self.volatile_mut(volatile.kind) {
            *existing = volatile;
        } else {
            self.volatiles.push(volatile);
        }
    }

    pub fn remove_volatile(&mut self, kind: VolatileKind) -> bool {
        let before = self.volatiles.len();
        self.volatiles.retain(|v| !v.kind.same_kind(kind));
        self.volatiles.len() != before
    }

    /// Set HP, clamping into [0, max_hp]. Out-of-range values indicate a
    /// caller bug; they are clamped and logged rather than panicking.
    pub fn set_hp(&mut self, hp: i64) {
        if hp < 0 || hp > self.max_hp as i64 {
            warn!(name = %self.name, hp, max_hp = self.max_hp, "clamping out-of-range HP");
        }
        self.hp = hp.clamp(0, self.max_hp as i64) as u32;
        if self.hp == 0 {
            self.fainted = true;
        }
    }

    /// Reduce HP by `amount`, returning the damage actually applied
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.hp);
        self.hp -= applied;
        if self.hp == 0 {
            self.fainted = true;
        }
        applied
    }

    /// Restore HP, returning the amount actually healed
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.fainted {
            return 0;
        }
        let healed = amount.min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    /// Clear everything that does not survive leaving the field
    pub fn on_switch_out(&mut self) {
        self.stages.clear();
        self.volatiles.clear();
        self.locked_move = None;
        self.rampage_turns = 0;
        self.charging = None;
        self.toxic_counter = 0;
        self.scratch = Scratch::default();
    }
}

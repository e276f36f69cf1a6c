//! Battle state types

pub mod combatant;
pub mod field;
pub mod state;
pub mod stats;
pub mod team;

pub use combatant::{ChargingMove, Combatant, FormData, MoveSlot, Scratch, Volatile};
pub use field::{Field, HazardLayers, RoomTimers};
pub use state::{BattleState, Phase, ReplacementRequest};
pub use stats::{ComputedStats, StatStages};
pub use team::{ScreenTimers, Team};

use serde::{Deserialize, Serialize};

/// Identifies one combatant within a battle: team index plus roster index.
/// Stable for the whole battle; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId {
    pub team: u8,
    pub index: u8,
}

impl CombatantId {
    pub fn new(team: u8, index: u8) -> Self {
        Self { team, index }
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.team, self.index)
    }
}

//! The battle aggregate root

use fracas_data::{ItemId, RoomKind};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::combatant::Combatant;
use super::field::Field;
use super::team::Team;
use super::CombatantId;
use crate::forms::FormChange;

/// Battle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for every active combatant's action
    ActionSelection,
    /// A slot needs refilling; exactly one request is exposed at a time
    Replacement,
    /// Terminal. `winner` is the surviving team index, or `None` for a draw.
    GameOver { winner: Option<u8> },
}

/// A slot waiting for a benched replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRequest {
    pub team: u8,
    pub slot: usize,
}

/// Full battle state. Created once per battle, mutated only inside one
/// turn-resolution call; callers must treat a resolution as atomic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub teams: Vec<Team>,
    pub field: Field,
    pub turn: u32,
    pub phase: Phase,
    pub pending_replacement: Option<ReplacementRequest>,
    /// Transient: combatants ejected by item effects this turn
    pub ejects: Vec<CombatantId>,
    /// Transient: deferred form changes, drained after end of turn
    pub form_changes: Vec<FormChange>,
    /// Transient: combatants dragged out by move effects this turn
    pub forced_switches: Vec<CombatantId>,
}

impl BattleState {
    /// Assemble a battle. Slots start empty; seat initial actives and run
    /// their entry effects with `turn::start_battle`.
    pub fn new(teams: Vec<Team>) -> Self {
        let field = Field::new(teams.len());
        Self {
            teams,
            field,
            turn: 0,
            phase: Phase::ActionSelection,
            pending_replacement: None,
            ejects: Vec::new(),
            form_changes: Vec::new(),
            forced_switches: Vec::new(),
        }
    }

    pub fn team(&self, team: u8) -> Option<&Team> {
        self.teams.get(team as usize)
    }

    pub fn team_mut(&mut self, team: u8) -> Option<&mut Team> {
        self.teams.get_mut(team as usize)
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.team(id.team)?.roster.get(id.index as usize)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.team_mut(id.team)?.roster.get_mut(id.index as usize)
    }

    /// Whether the combatant occupies an active slot
    pub fn is_active(&self, id: CombatantId) -> bool {
        self.team(id.team)
            .is_some_and(|t| t.is_active(id.index as usize))
    }

    /// All occupied active slots in team order, slot order
    pub fn active_ids(&self) -> Vec<CombatantId> {
        let mut ids = Vec::new();
        for (t, team) in self.teams.iter().enumerate() {
            for idx in team.active.iter().flatten() {
                ids.push(CombatantId::new(t as u8, *idx as u8));
            }
        }
        ids
    }

    /// Active combatants on every other team
    pub fn opponents_of(&self, id: CombatantId) -> Vec<CombatantId> {
        self.active_ids()
            .into_iter()
            .filter(|other| other.team != id.team)
            .collect()
    }

    /// The held item as the battle currently sees it: `None` while the
    /// item-suppression room is up
    pub fn held_item(&self, id: CombatantId) -> Option<ItemId> {
        if self.field.room_active(RoomKind::ItemSuppression) {
            return None;
        }
        self.combatant(id)?.item
    }

    /// Display name for log entries; tolerates unknown ids
    pub fn display_name(&self, id: CombatantId) -> String {
        self.combatant(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("combatant {id}"))
    }

    /// Clamp any out-of-range numeric state back into its invariant range.
    /// Violations indicate an engine or caller bug and are logged.
    pub fn enforce_invariants(&mut self) {
        for (t, team) in self.teams.iter_mut().enumerate() {
            for c in &mut team.roster {
                if c.hp > c.max_hp {
                    warn!(team = t, name = %c.name, hp = c.hp, "HP above max; clamping");
                    c.hp = c.max_hp;
                }
                if c.hp == 0 && !c.fainted {
                    warn!(team = t, name = %c.name, "zero HP without faint flag; fixing");
                    c.fainted = true;
                }
            }
            // Duplicate occupancy of one roster index across slots
            let mut seen = Vec::new();
            for slot in team.active.iter_mut() {
                if let Some(idx) = *slot {
                    if seen.contains(&idx) {
                        warn!(team = t, index = idx, "roster index active in two slots; clearing");
                        *slot = None;
                    } else {
                        seen.push(idx);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fracas_data::{BaseStats, Element};

    fn state() -> BattleState {
        let base = BaseStats::new(60, 80, 70, 60, 70, 90);
        let mut teams = Vec::new();
        for (name, members) in [("Reds", ["Ash", "Briar"]), ("Blues", ["Cove", "Dune"])] {
            let roster = members
                .iter()
                .map(|n| Combatant::new(*n, 50, base, vec![Element::Normal]))
                .collect();
            let mut team = Team::new(name, roster);
            team.set_active(0, Some(0));
            teams.push(team);
        }
        BattleState::new(teams)
    }

    #[test]
    fn test_accessors() {
        let s = state();
        let id = CombatantId::new(0, 0);
        assert_eq!(s.combatant(id).unwrap().name, "Ash");
        assert!(s.is_active(id));
        assert!(!s.is_active(CombatantId::new(0, 1)));
        assert!(s.combatant(CombatantId::new(5, 0)).is_none());
    }

    #[test]
    fn test_active_and_opponents() {
        let s = state();
        let ids = s.active_ids();
        assert_eq!(ids.len(), 2);

        let opps = s.opponents_of(CombatantId::new(0, 0));
        assert_eq!(opps, vec![CombatantId::new(1, 0)]);
    }

    #[test]
    fn test_held_item_suppressed_by_room() {
        let mut s = state();
        let id = CombatantId::new(0, 0);
        s.combatant_mut(id).unwrap().item = Some(ItemId::Leftovers);
        assert_eq!(s.held_item(id), Some(ItemId::Leftovers));

        s.field.rooms.set(RoomKind::ItemSuppression, 5);
        assert_eq!(s.held_item(id), None);
    }

    #[test]
    fn test_enforce_invariants_clamps() {
        let mut s = state();
        let id = CombatantId::new(0, 0);
        {
            let c = s.combatant_mut(id).unwrap();
            c.hp = c.max_hp + 50;
        }
        // Duplicate slot occupancy
        s.teams[0].active = vec![Some(0), Some(0)];

        s.enforce_invariants();

        let c = s.combatant(id).unwrap();
        assert_eq!(c.hp, c.max_hp);
        assert_eq!(s.teams[0].active, vec![Some(0), None]);
    }

    #[test]
    fn test_serde_round_trip() {
        let s = state();
        let json = serde_json::to_string(&s).unwrap();
        let back: BattleState = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}

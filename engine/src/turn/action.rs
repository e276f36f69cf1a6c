//! Submitted actions and the chance-outcome oracle
//!
//! The action source resolves every probabilistic decision before
//! submission: per-hit crit/miss flags ride on the hit list, and gating
//! decisions (confusion, paralysis, infatuation, wake/thaw) ride in
//! [`ChanceOutcomes`]. The engine itself never rolls anything.

use fracas_data::{ItemId, StatKind};
use serde::{Deserialize, Serialize};

use crate::types::CombatantId;

/// One hit of a fight action, with its chance outcomes already decided.
/// A missing or invalid target degrades to a logged no-op.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRecord {
    pub target: Option<CombatantId>,
    pub crit: bool,
    pub miss: bool,
}

impl HitRecord {
    /// A plain decided hit: lands, no crit
    pub fn plain(target: CombatantId) -> Self {
        Self {
            target: Some(target),
            crit: false,
            miss: false,
        }
    }

    pub fn crit(target: CombatantId) -> Self {
        Self {
            target: Some(target),
            crit: true,
            miss: false,
        }
    }

    pub fn miss(target: CombatantId) -> Self {
        Self {
            target: Some(target),
            crit: false,
            miss: true,
        }
    }
}

/// One submitted action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Fight {
        move_index: usize,
        /// One entry per hit; multi-hit moves carry an explicit,
        /// externally decided hit list
        hits: Vec<HitRecord>,
        /// Whether the adjudicator triggered the move's secondary effect
        apply_effect: bool,
    },
    Switch {
        roster_index: usize,
    },
    UseItem {
        item: ItemId,
        target: CombatantId,
    },
    /// Once-per-battle surged variant of a known move
    Surge {
        move_index: usize,
        hits: Vec<HitRecord>,
        apply_effect: bool,
    },
}

/// Mapping from combatant id to its submitted action, in submission order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionSet {
    entries: Vec<(CombatantId, Action)>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit an action; a resubmission for the same combatant replaces the
    /// earlier one
    pub fn submit(&mut self, id: CombatantId, action: Action) {
        if let Some(entry) = self.entries.iter_mut().find(|(other, _)| *other == id) {
            entry.1 = action;
        } else {
            self.entries.push((id, action));
        }
    }

    pub fn get(&self, id: CombatantId) -> Option<&Action> {
        self.entries
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, action)| action)
    }

    /// Submission position, used as the final ordering tiebreak
    pub fn position(&self, id: CombatantId) -> usize {
        self.entries
            .iter()
            .position(|(other, _)| *other == id)
            .unwrap_or(usize::MAX)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Externally decided outcomes for one combatant's probabilistic events
/// this turn. Defaults are the "nothing unusual happens" decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatantOutcomes {
    /// Confused combatant hits itself instead of acting
    pub confusion_self_hit: bool,
    /// Confusion ends before the action
    pub confusion_snaps_out: bool,
    /// Infatuation prevents the action
    pub infatuation_immobilized: bool,
    /// Full paralysis prevents the action
    pub fully_paralyzed: bool,
    /// Sleep ends before the action
    pub wakes_up: bool,
    /// Freeze ends before the action
    pub thaws_out: bool,
    /// The accelerated-decision item triggers this turn
    pub accelerated_decision: bool,
    /// Random stat picks for an erratic end-of-turn ability: (raise, lower)
    pub erratic_stats: Option<(StatKind, StatKind)>,
}

/// The oracle record: per-combatant decided outcomes for one turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChanceOutcomes {
    entries: Vec<(CombatantId, CombatantOutcomes)>,
}

impl ChanceOutcomes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: CombatantId, outcomes: CombatantOutcomes) {
        if let Some(entry) = self.entries.iter_mut().find(|(other, _)| *other == id) {
            entry.1 = outcomes;
        } else {
            self.entries.push((id, outcomes));
        }
    }

    /// Decided outcomes for a combatant; defaults when none were supplied
    pub fn for_combatant(&self, id: CombatantId) -> CombatantOutcomes {
        self.entries
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, o)| *o)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_set_submit_and_replace() {
        let id = CombatantId::new(0, 0);
        let mut set = ActionSet::new();
        set.submit(id, Action::Switch { roster_index: 1 });
        set.submit(id, Action::Switch { roster_index: 2 });

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(id), Some(&Action::Switch { roster_index: 2 }));
    }

    #[test]
    fn test_action_set_position() {
        let a = CombatantId::new(0, 0);
        let b = CombatantId::new(1, 0);
        let mut set = ActionSet::new();
        set.submit(a, Action::Switch { roster_index: 1 });
        set.submit(b, Action::Switch { roster_index: 1 });

        assert_eq!(set.position(a), 0);
        assert_eq!(set.position(b), 1);
        assert_eq!(set.position(CombatantId::new(3, 3)), usize::MAX);
    }

    #[test]
    fn test_outcomes_default_when_missing() {
        let oracle = ChanceOutcomes::new();
        let o = oracle.for_combatant(CombatantId::new(0, 0));
        assert!(!o.fully_paralyzed);
        assert!(!o.confusion_self_hit);
        assert!(o.erratic_stats.is_none());
    }

    #[test]
    fn test_outcomes_set_and_get() {
        let id = CombatantId::new(0, 1);
        let mut oracle = ChanceOutcomes::new();
        oracle.set(
            id,
            CombatantOutcomes {
                fully_paralyzed: true,
                ..Default::default()
            },
        );
        assert!(oracle.for_combatant(id).fully_paralyzed);
    }
}

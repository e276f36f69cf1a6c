//! Deferred form-change resolver
//!
//! Hooks queue changes while an action or the end-of-turn pass is still in
//! flight; nothing mutates a form mid-hook. The queue drains at one point
//! only, after forced switches and before phase management.

use serde::{Deserialize, Serialize};

use crate::formula;
use crate::log::EventLog;
use crate::types::stats::ComputedStats;
use crate::types::{BattleState, CombatantId, FormData};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormChangeKind {
    Assume(FormData),
    Revert,
}

/// One queued change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormChange {
    pub combatant: CombatantId,
    pub change: FormChangeKind,
}

/// Queue a change for the post-loop drain
pub fn queue(state: &mut BattleState, change: FormChange) {
    state.form_changes.push(change);
}

/// Drain the queue in order
pub fn apply_queued(state: &mut BattleState, log: &mut EventLog) {
    let queued = std::mem::take(&mut state.form_changes);
    for entry in queued {
        match entry.change {
            FormChangeKind::Assume(form) => assume(state, entry.combatant, form, log),
            FormChangeKind::Revert => revert(state, entry.combatant, log),
        }
    }
}

fn assume(state: &mut BattleState, id: CombatantId, form: FormData, log: &mut EventLog) {
    let Some(c) = state.combatant_mut(id) else { return };
    if !c.is_alive() {
        return;
    }
    // First transformation snapshots the original for later reverts
    if c.form_snapshot.is_none() {
        c.form_snapshot = Some(FormData {
            name: c.name.clone(),
            base_stats: c.base_stats,
            elements: c.elements.clone(),
        });
    }
    let new_name = form.name.clone();
    apply_form(c, form);
    c.transformed = true;
    log.narrate(format!("{new_name} changed form!"));
}

fn revert(state: &mut BattleState, id: CombatantId, log: &mut EventLog) {
    let Some(c) = state.combatant_mut(id) else { return };
    if !c.is_alive() {
        return;
    }
    let Some(snapshot) = c.form_snapshot.take() else {
        return;
    };
    apply_form(c, snapshot);
    c.transformed = false;
    log.narrate(format!("{} returned to its original form!", c.name.clone()));
}

/// Swap in form data, recomputing max HP while preserving the HP fraction
fn apply_form(c: &mut crate::types::Combatant, form: FormData) {
    let old_max = c.max_hp.max(1);
    let old_hp = c.hp;

    c.name = form.name;
    c.base_stats = form.base_stats;
    c.elements = form.elements;
    c.stats = ComputedStats::from_base(&c.base_stats, c.level);
    c.max_hp = formula::hp_value(c.base_stats.hp, c.level);

    let scaled = (c.max_hp as u64 * old_hp as u64 / old_max as u64) as u32;
    c.hp = if old_hp > 0 { scaled.clamp(1, c.max_hp) } else { 0 };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Combatant, Team};
    use fracas_data::{BaseStats, Element};

    fn state_with_one() -> (BattleState, CombatantId) {
        let mut c = Combatant::new(
            "Shift",
            50,
            BaseStats::new(60, 80, 70, 60, 70, 90),
            vec![Element::Normal],
        );
        c.alt_form = Some(FormData {
            name: "Shift-Fury".into(),
            base_stats: BaseStats::new(60, 140, 40, 100, 40, 110),
            elements: vec![Element::Normal, Element::Fighting],
        });
        let mut team = Team::new("Solo", vec![c]);
        team.set_active(0, Some(0));
        (BattleState::new(vec![team]), CombatantId::new(0, 0))
    }

    #[test]
    fn test_assume_and_revert_round_trip() {
        let (mut state, id) = state_with_one();
        let mut log = EventLog::new();
        let form = state.combatant(id).unwrap().alt_form.clone().unwrap();

        queue(
            &mut state,
            FormChange {
                combatant: id,
                change: FormChangeKind::Assume(form),
            },
        );
        apply_queued(&mut state, &mut log);

        {
            let c = state.combatant(id).unwrap();
            assert!(c.transformed);
            assert_eq!(c.name, "Shift-Fury");
            assert_eq!(c.stats.attack, formula::stat_value(140, 50));
            assert!(c.has_element(Element::Fighting));
        }

        queue(
            &mut state,
            FormChange {
                combatant: id,
                change: FormChangeKind::Revert,
            },
        );
        apply_queued(&mut state, &mut log);

        let c = state.combatant(id).unwrap();
        assert!(!c.transformed);
        assert_eq!(c.name, "Shift");
        assert!(c.form_snapshot.is_none());
        assert_eq!(c.stats.attack, formula::stat_value(80, 50));
    }

    #[test]
    fn test_hp_fraction_preserved() {
        let (mut state, id) = state_with_one();
        let mut log = EventLog::new();
        let (old_hp, old_max) = {
            let c = state.combatant_mut(id).unwrap();
            let hp = c.max_hp;
            c.take_damage(hp - hp / 2);
            (c.hp, c.max_hp)
        };
        let form = FormData {
            name: "Shift-Bulk".into(),
            // Doubled HP base
            base_stats: BaseStats::new(120, 80, 70, 60, 70, 90),
            elements: vec![Element::Normal],
        };
        queue(
            &mut state,
            FormChange {
                combatant: id,
                change: FormChangeKind::Assume(form),
            },
        );
        apply_queued(&mut state, &mut log);

        let c = state.combatant(id).unwrap();
        assert!(c.max_hp > old_max);
        let expected = (c.max_hp as u64 * old_hp as u64 / old_max as u64) as u32;
        assert_eq!(c.hp, expected);
    }

    #[test]
    fn test_queue_is_deferred() {
        let (mut state, id) = state_with_one();
        let form = state.combatant(id).unwrap().alt_form.clone().unwrap();
        queue(
            &mut state,
            FormChange {
                combatant: id,
                change: FormChangeKind::Assume(form),
            },
        );
        // Nothing applied until the drain point
        assert!(!state.combatant(id).unwrap().transformed);
        assert_eq!(state.form_changes.len(), 1);
    }
}

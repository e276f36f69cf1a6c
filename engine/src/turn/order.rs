//! Action ordering: priority tiers, then effective speed
//!
//! Two levels, compared in this order and never mixed: the priority tier
//! (switch/item high, fight from move priority plus overrides), then
//! effective speed. The turn-reversal room inverts only the speed
//! comparison; tiers always order the same way.

use fracas_data::{MoveCategory, RoomKind, Status};

use super::action::{Action, ChanceOutcomes};
use crate::formula;
use crate::hooks;
use crate::types::{BattleState, CombatantId};

/// Sentinel effective speed: sorts to the back of its priority tier. As a
/// plain speed value it takes part in the inverted comparison too, so a
/// holder moves first in its tier while the reversal room is up.
pub const ALWAYS_LAST: i32 = -1;

/// Priority tier for switch and bag-item actions, above any move priority
const SWITCH_ITEM_PRIORITY: i8 = 12;

/// Effective speed: stage-modified speed with paralysis, ability, and item
/// modifiers applied in that order
pub fn effective_speed(state: &BattleState, id: CombatantId) -> i32 {
    let Some(c) = state.combatant(id) else {
        return ALWAYS_LAST;
    };
    if hooks::effective_ability(state, id).is_some_and(|a| a.always_last())
        || state.held_item(id).is_some_and(|i| i.always_last())
    {
        return ALWAYS_LAST;
    }

    let mut speed = formula::apply_stage(c.stats.speed, c.stages.speed);
    if c.status == Some(Status::Paralysis) {
        speed /= 2;
    }
    if let Some(hook) =
        hooks::effective_ability_hooks(state, id).and_then(|h| h.on_modify_stat)
    {
        speed = hook(state, id, fracas_data::StatKind::Speed, speed);
    }
    if let Some(hook) = hooks::held_item_hooks(state, id).and_then(|h| h.on_modify_stat) {
        speed = hook(state, id, fracas_data::StatKind::Speed, speed);
    }
    speed.min(i32::MAX as u32) as i32
}

/// Effective priority of one submitted action
pub fn action_priority(
    state: &BattleState,
    id: CombatantId,
    action: &Action,
    outcomes: &ChanceOutcomes,
) -> i8 {
    match action {
        Action::Switch { .. } | Action::UseItem { .. } => SWITCH_ITEM_PRIORITY,
        Action::Fight { move_index, .. } | Action::Surge { move_index, .. } => {
            let Some(slot) = state
                .combatant(id)
                .and_then(|c| c.moves.get(*move_index))
            else {
                return 0;
            };
            let mut priority = slot.data.priority;
            if slot.data.category == MoveCategory::Status
                && hooks::effective_ability(state, id)
                    .is_some_and(|a| a.boosts_status_priority())
            {
                priority += 1;
            }
            if outcomes.for_combatant(id).accelerated_decision
                && state
                    .held_item(id)
                    .is_some_and(|i| i.accelerates_decision())
            {
                priority += 1;
            }
            priority
        }
    }
}

/// Order the turn's actions. Ties inside a tier break on effective speed
/// (inverted under the reversal room), then on submission order.
pub fn order_actions(
    state: &BattleState,
    entries: &[(CombatantId, Action)],
    outcomes: &ChanceOutcomes,
) -> Vec<CombatantId> {
    let reversed = state.field.room_active(RoomKind::TurnReversal);

    let mut keyed: Vec<(usize, i8, i32, CombatantId)> = entries
        .iter()
        .enumerate()
        .map(|(pos, (id, action))| {
            (
                pos,
                action_priority(state, *id, action, outcomes),
                effective_speed(state, *id),
                *id,
            )
        })
        .collect();

    keyed.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| if reversed { a.2.cmp(&b.2) } else { b.2.cmp(&a.2) })
            .then_with(|| a.0.cmp(&b.0))
    });

    keyed.into_iter().map(|(_, _, _, id)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Combatant, MoveSlot, Team};
    use fracas_data::{AbilityId, BaseStats, Element, ItemId, MoveData};

    fn duel(red_speed: u16, blue_speed: u16) -> BattleState {
        let mut teams = Vec::new();
        for (name, speed) in [("Red", red_speed), ("Blue", blue_speed)] {
            let base = BaseStats::new(60, 80, 70, 60, 70, speed);
            let mut c = Combatant::new(name, 50, base, vec![Element::Normal]);
            c.moves.push(MoveSlot::new(MoveData::new(
                "Lunge",
                Element::Normal,
                MoveCategory::Physical,
                80,
            )));
            let mut jab = MoveData::new("First Jab", Element::Normal, MoveCategory::Physical, 40);
            jab.priority = 1;
            c.moves.push(MoveSlot::new(jab));
            let mut team = Team::new(name, vec![c]);
            team.set_active(0, Some(0));
            teams.push(team);
        }
        BattleState::new(teams)
    }

    const RED: CombatantId = CombatantId { team: 0, index: 0 };
    const BLUE: CombatantId = CombatantId { team: 1, index: 0 };

    fn fight(move_index: usize) -> Action {
        Action::Fight {
            move_index,
            hits: Vec::new(),
            apply_effect: false,
        }
    }

    #[test]
    fn test_faster_acts_first() {
        let state = duel(100, 60);
        let entries = vec![(BLUE, fight(0)), (RED, fight(0))];
        let order = order_actions(&state, &entries, &ChanceOutcomes::new());
        assert_eq!(order, vec![RED, BLUE]);
    }

    #[test]
    fn test_priority_beats_speed() {
        let state = duel(60, 100);
        let entries = vec![(RED, fight(1)), (BLUE, fight(0))];
        let order = order_actions(&state, &entries, &ChanceOutcomes::new());
        assert_eq!(order, vec![RED, BLUE]);
    }

    #[test]
    fn test_switch_outruns_priority_moves() {
        let state = duel(60, 100);
        let entries = vec![
            (BLUE, fight(1)),
            (RED, Action::Switch { roster_index: 0 }),
        ];
        let order = order_actions(&state, &entries, &ChanceOutcomes::new());
        assert_eq!(order, vec![RED, BLUE]);
    }

    #[test]
    fn test_reversal_room_inverts_speed_only() {
        let mut state = duel(60, 100);
        state.field.rooms.set(RoomKind::TurnReversal, 5);

        // Same tier: slower now moves first
        let entries = vec![(BLUE, fight(0)), (RED, fight(0))];
        let order = order_actions(&state, &entries, &ChanceOutcomes::new());
        assert_eq!(order, vec![RED, BLUE]);

        // Different tiers: the priority move still leads from the slower side
        let entries = vec![(BLUE, fight(0)), (RED, fight(1))];
        let order = order_actions(&state, &entries, &ChanceOutcomes::new());
        assert_eq!(order, vec![RED, BLUE]);
    }

    #[test]
    fn test_paralysis_halves_speed() {
        let mut state = duel(100, 60);
        state.combatant_mut(RED).unwrap().status = Some(Status::Paralysis);
        // 100-base speed at 50 is 112; halved to 56 under 65
        assert!(effective_speed(&state, RED) < effective_speed(&state, BLUE));
    }

    #[test]
    fn test_always_last_sentinel() {
        let mut state = duel(140, 20);
        state.combatant_mut(RED).unwrap().item = Some(ItemId::LaggingTail);
        assert_eq!(effective_speed(&state, RED), ALWAYS_LAST);

        let entries = vec![(RED, fight(0)), (BLUE, fight(0))];
        let order = order_actions(&state, &entries, &ChanceOutcomes::new());
        assert_eq!(order, vec![BLUE, RED]);

        // The sentinel is a speed value, so the reversal room flips it to
        // the front of its tier
        state.field.rooms.set(RoomKind::TurnReversal, 5);
        let order = order_actions(&state, &entries, &ChanceOutcomes::new());
        assert_eq!(order, vec![RED, BLUE]);
    }

    #[test]
    fn test_always_last_ability() {
        let mut state = duel(140, 20);
        state.combatant_mut(RED).unwrap().ability = Some(AbilityId::Stall);
        assert_eq!(effective_speed(&state, RED), ALWAYS_LAST);
    }

    #[test]
    fn test_status_priority_boost_ability() {
        let mut state = duel(60, 100);
        {
            let c = state.combatant_mut(RED).unwrap();
            c.ability = Some(AbilityId::Prankster);
            c.moves.push(MoveSlot::new(MoveData::status(
                "Jinx",
                Element::Dark,
                fracas_data::MoveEffect::Taunt,
            )));
        }
        let entries = vec![(BLUE, fight(0)), (RED, fight(2))];
        let order = order_actions(&state, &entries, &ChanceOutcomes::new());
        assert_eq!(order, vec![RED, BLUE]);
    }

    #[test]
    fn test_accelerated_decision_item() {
        let mut state = duel(60, 100);
        state.combatant_mut(RED).unwrap().item = Some(ItemId::QuickClaw);
        let mut outcomes = ChanceOutcomes::new();
        outcomes.set(
            RED,
            super::super::action::CombatantOutcomes {
                accelerated_decision: true,
                ..Default::default()
            },
        );

        let entries = vec![(BLUE, fight(0)), (RED, fight(0))];
        let order = order_actions(&state, &entries, &outcomes);
        assert_eq!(order, vec![RED, BLUE]);
    }

    #[test]
    fn test_speed_tie_breaks_on_submission_order() {
        let state = duel(80, 80);
        let entries = vec![(BLUE, fight(0)), (RED, fight(0))];
        let order = order_actions(&state, &entries, &ChanceOutcomes::new());
        assert_eq!(order, vec![BLUE, RED]);
    }
}

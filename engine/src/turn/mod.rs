//! Turn resolution engine and phase machine
//!
//! One `resolve_turn` call takes the battle through a full round: ordering,
//! the per-action loop, the end-of-turn pass, then the fixed queue drain —
//! forced switches, form changes, phase management. That drain order is an
//! invariant other components rely on.

pub mod action;
pub mod execute;
pub mod order;

#[cfg(test)]
mod tests;

use action::{Action, ActionSet, ChanceOutcomes, HitRecord};

use crate::effects;
use crate::error::EngineError;
use crate::forms;
use crate::log::EventLog;
use crate::types::{BattleState, CombatantId, Phase, ReplacementRequest};

/// Seat the initial actives and run their entry effects. Call once, after
/// assembling the state with every team's slot assignments.
pub fn start_battle(state: &mut BattleState) -> EventLog {
    let mut log = EventLog::new();
    state.turn = 1;
    state.phase = Phase::ActionSelection;
    log.narrate("The battle begins!");
    let ids = state.active_ids();
    effects::run_switch_in(state, &ids, &mut log);
    forms::apply_queued(state, &mut log);
    state.enforce_invariants();
    log
}

/// Resolve one full round. The state is mutated in place; on `Err` the
/// caller must discard it — a resolution is atomic or void.
pub fn resolve_turn(
    state: &mut BattleState,
    actions: &ActionSet,
    outcomes: &ChanceOutcomes,
) -> Result<EventLog, EngineError> {
    if state.phase != Phase::ActionSelection {
        return Err(EngineError::WrongPhase {
            expected: "action-selection",
        });
    }
    let mut log = EventLog::new();

    // Every living active needs an action; forced continuations (lock-in,
    // charging) synthesize theirs
    let mut entries: Vec<(CombatantId, Action)> = Vec::new();
    for id in state.active_ids() {
        if state.combatant(id).is_none_or(|c| !c.is_alive()) {
            continue;
        }
        match actions.get(id) {
            Some(a) => entries.push((id, a.clone())),
            None => match synthesize_continuation(state, id) {
                Some(a) => entries.push((id, a)),
                None => return Err(EngineError::MissingAction(state.display_name(id))),
            },
        }
    }

    let ordering = order::order_actions(state, &entries, outcomes);
    for id in ordering {
        let Some((_, chosen)) = entries.iter().find(|(entry, _)| *entry == id) else {
            continue;
        };
        execute::execute_action(state, id, chosen, outcomes, &mut log);
    }

    effects::run_end_of_turn(state, outcomes, &mut log);

    // Fixed drain order; reordering these changes observable behavior
    drain_forced_switches(state, &mut log);
    forms::apply_queued(state, &mut log);
    phase_management(state, &mut log);

    state.enforce_invariants();
    Ok(log)
}

/// Fill the one pending replacement request, re-running the full switch-in
/// pipeline, then advance the phase machine.
pub fn resolve_replacement(
    state: &mut BattleState,
    team: u8,
    roster_index: usize,
) -> Result<EventLog, EngineError> {
    if state.phase != Phase::Replacement {
        return Err(EngineError::WrongPhase {
            expected: "replacement",
        });
    }
    let Some(pending) = state.pending_replacement else {
        return Err(EngineError::WrongPhase {
            expected: "replacement",
        });
    };
    if pending.team != team {
        return Err(EngineError::InvalidReplacement(format!(
            "team {team} has no slot waiting"
        )));
    }
    let Some(team_ref) = state.team(team) else {
        return Err(EngineError::NoSuchCombatant(format!("team {team}")));
    };
    let eligible = team_ref
        .roster
        .get(roster_index)
        .is_some_and(|c| c.is_alive())
        && !team_ref.is_active(roster_index);
    if !eligible {
        return Err(EngineError::InvalidReplacement(format!(
            "roster index {roster_index} cannot enter"
        )));
    }

    let mut log = EventLog::new();
    let team_name = team_ref.name.clone();
    state
        .team_mut(team)
        .expect("validated above")
        .set_active(pending.slot, Some(roster_index));
    let incoming = CombatantId::new(team, roster_index as u8);
    log.narrate(format!("{team_name} sent out {}!", state.display_name(incoming)));
    effects::run_switch_in(state, &[incoming], &mut log);
    forms::apply_queued(state, &mut log);

    state.pending_replacement = next_replacement(state);
    if state.pending_replacement.is_some() {
        state.phase = Phase::Replacement;
    } else {
        finish_or_advance(state, &mut log);
    }
    state.enforce_invariants();
    Ok(log)
}

/// A lock-in or charging combatant keeps going without a submitted action
fn synthesize_continuation(state: &BattleState, id: CombatantId) -> Option<Action> {
    let c = state.combatant(id)?;
    if let Some(charge) = c.charging {
        return Some(Action::Fight {
            move_index: charge.move_index,
            hits: vec![HitRecord {
                target: charge.target,
                crit: false,
                miss: false,
            }],
            apply_effect: false,
        });
    }
    if let Some(locked) = c.locked_move {
        let target = state.opponents_of(id).into_iter().next();
        return Some(Action::Fight {
            move_index: locked,
            hits: vec![HitRecord {
                target,
                crit: false,
                miss: false,
            }],
            apply_effect: false,
        });
    }
    None
}

/// Move-driven drags: each victim is replaced by its team's first eligible
/// bench member
fn drain_forced_switches(state: &mut BattleState, log: &mut EventLog) {
    let queue = std::mem::take(&mut state.forced_switches);
    for id in queue {
        if state.combatant(id).is_none_or(|c| !c.is_alive()) || !state.is_active(id) {
            continue;
        }
        let Some(team) = state.team(id.team) else { continue };
        let Some(slot) = team.slot_of(id.index as usize) else {
            continue;
        };
        let Some(replacement) = team.first_replacement() else {
            log.narrate(format!("{} has no one left to drag out!", team.name.clone()));
            continue;
        };
        let victim = state.display_name(id);
        state
            .team_mut(id.team)
            .expect("validated above")
            .set_active(slot, Some(replacement));
        let incoming = CombatantId::new(id.team, replacement as u8);
        log.narrate(format!(
            "{victim} was dragged out and {} took its place!",
            state.display_name(incoming)
        ));
        effects::run_switch_in(state, &[incoming], log);
    }
}

/// Item-driven ejects vacate their slots, then the scan either raises a
/// replacement request, ends the battle, or starts the next round
fn phase_management(state: &mut BattleState, log: &mut EventLog) {
    let ejects = std::mem::take(&mut state.ejects);
    for id in ejects {
        if !state.is_active(id) {
            continue;
        }
        if let Some(slot) = state.team(id.team).and_then(|t| t.slot_of(id.index as usize)) {
            state
                .team_mut(id.team)
                .expect("slot located above")
                .set_active(slot, None);
        }
    }

    state.pending_replacement = next_replacement(state);
    if state.pending_replacement.is_some() {
        state.phase = Phase::Replacement;
        return;
    }
    finish_or_advance(state, log);
}

/// First slot that is empty or holds a fainted occupant, on a team that
/// still has bench to send
fn next_replacement(state: &BattleState) -> Option<ReplacementRequest> {
    for (t, team) in state.teams.iter().enumerate() {
        if team.first_replacement().is_none() {
            continue;
        }
        for (slot, occupant) in team.active.iter().enumerate() {
            let vacant = match occupant {
                None => true,
                Some(idx) => team.roster.get(*idx).is_none_or(|c| !c.is_alive()),
            };
            if vacant {
                return Some(ReplacementRequest {
                    team: t as u8,
                    slot,
                });
            }
        }
    }
    None
}

fn finish_or_advance(state: &mut BattleState, log: &mut EventLog) {
    let standing: Vec<usize> = state
        .teams
        .iter()
        .enumerate()
        .filter(|(_, team)| !team.all_fainted())
        .map(|(t, _)| t)
        .collect();
    if standing.len() <= 1 {
        let winner = standing.first().map(|t| *t as u8);
        state.phase = Phase::GameOver { winner };
        match winner {
            Some(t) => log.narrate(format!(
                "{} wins the battle!",
                state.teams[t as usize].name.clone()
            )),
            None => log.narrate("The battle ended in a draw!"),
        }
        return;
    }
    state.turn += 1;
    state.phase = Phase::ActionSelection;
}

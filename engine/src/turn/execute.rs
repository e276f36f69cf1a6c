//! Per-action execution: gating, interception, redirection, the per-hit
//! loop, and post-move bookkeeping

use fracas_data::{
    surge_power, EffectTarget, ItemId, MoveCategory, MoveData, MoveEffect, SecondaryEffect,
    SecondaryKind, Status, VolatileKind,
};

use super::action::{Action, ChanceOutcomes, HitRecord};
use crate::damage::{self, DamageOutcome};
use crate::effects;
use crate::hooks::{self, MoveContext};
use crate::log::{EventLog, LogEntry};
use crate::types::{BattleState, ChargingMove, CombatantId, Volatile};

/// Execute one ordered action. Fainted or benched actors are skipped
/// silently; they can lose their slot between ordering and execution.
pub fn execute_action(
    state: &mut BattleState,
    actor: CombatantId,
    action: &Action,
    outcomes: &ChanceOutcomes,
    log: &mut EventLog,
) {
    if state.combatant(actor).is_none_or(|c| !c.is_alive()) || !state.is_active(actor) {
        return;
    }
    match action {
        Action::Switch { roster_index } => perform_switch(state, actor, *roster_index, log),
        Action::UseItem { item, target } => use_bag_item(state, actor, *item, *target, log),
        Action::Fight {
            move_index,
            hits,
            apply_effect,
        } => perform_fight(state, actor, *move_index, hits, *apply_effect, false, outcomes, log),
        Action::Surge {
            move_index,
            hits,
            apply_effect,
        } => perform_fight(state, actor, *move_index, hits, *apply_effect, true, outcomes, log),
    }
}

/// Voluntary switch: out-hook, seat the replacement, full entry pipeline
pub fn perform_switch(
    state: &mut BattleState,
    actor: CombatantId,
    roster_index: usize,
    log: &mut EventLog,
) {
    let team_index = actor.team;
    let Some(team) = state.team(team_index) else { return };
    let Some(slot) = team.slot_of(actor.index as usize) else {
        return;
    };
    let valid = team
        .roster
        .get(roster_index)
        .is_some_and(|c| c.is_alive())
        && !team.is_active(roster_index);
    if !valid {
        log.narrate(format!(
            "{} has nothing fit to switch in!",
            team.name.clone()
        ));
        return;
    }

    if let Some(hook) = hooks::effective_ability_hooks(state, actor).and_then(|h| h.on_switch_out)
    {
        hook(state, actor, log);
    }
    if let Some(hook) = hooks::held_item_hooks(state, actor).and_then(|h| h.on_switch_out) {
        hook(state, actor, log);
    }

    let outgoing = state.display_name(actor);
    let team = state.team_mut(team_index).expect("validated above");
    let team_name = team.name.clone();
    team.set_active(slot, Some(roster_index));
    let incoming = CombatantId::new(team_index, roster_index as u8);
    log.narrate(format!(
        "{team_name} withdrew {outgoing} and sent out {}!",
        state.display_name(incoming)
    ));
    effects::run_switch_in(state, &[incoming], log);
}

/// Bag-item action. Non-usable items and invalid targets degrade to logged
/// no-ops.
fn use_bag_item(
    state: &mut BattleState,
    actor: CombatantId,
    item: ItemId,
    target: CombatantId,
    log: &mut EventLog,
) {
    let user = state.display_name(actor);
    if !item.usable() {
        log.narrate(format!("{user} fumbled with the {item}, but nothing happened."));
        return;
    }
    let Some(c) = state.combatant_mut(target) else {
        log.narrate(format!("{user} used a {item}, but there was no target."));
        return;
    };
    if !c.is_alive() {
        log.narrate(format!("{user} used a {item}, but it had no target."));
        return;
    }
    let name = c.name.clone();
    match item {
        ItemId::Potion => {
            let healed = c.heal(20);
            log.narrate(format!("{name} recovered {healed} HP from the Potion."));
        }
        ItemId::SuperPotion => {
            let healed = c.heal(50);
            log.narrate(format!("{name} recovered {healed} HP from the Super Potion."));
        }
        ItemId::FullHeal => {
            c.status = None;
            c.toxic_counter = 0;
            log.narrate(format!("{name} was cured of its condition."));
        }
        _ => unreachable!("usable() gates the catalog"),
    }
}

#[allow(clippy::too_many_arguments)]
fn perform_fight(
    state: &mut BattleState,
    actor: CombatantId,
    move_index: usize,
    hits: &[HitRecord],
    apply_effect: bool,
    surge: bool,
    outcomes: &ChanceOutcomes,
    log: &mut EventLog,
) {
    let per = outcomes.for_combatant(actor);
    let name = state.display_name(actor);

    // (a) pre-move gating: confusion, infatuation, then sleep/freeze/paralysis
    if state
        .combatant(actor)
        .is_some_and(|c| c.has_volatile(VolatileKind::Confusion))
    {
        if per.confusion_snaps_out {
            state
                .combatant_mut(actor)
                .expect("gated above")
                .remove_volatile(VolatileKind::Confusion);
            log.narrate(format!("{name} snapped out of its confusion!"));
        } else {
            log.narrate(format!("{name} is confused!"));
            if per.confusion_self_hit {
                let c = state.combatant_mut(actor).expect("gated above");
                let hurt = damage::confusion_self_damage(c);
                c.take_damage(hurt);
                log.narrate("It hurt itself in its confusion!");
                if !state.combatant(actor).expect("gated above").is_alive() {
                    log.narrate(format!("{name} fainted!"));
                }
                return;
            }
        }
    }
    if state
        .combatant(actor)
        .is_some_and(|c| c.has_volatile(VolatileKind::Infatuated))
        && per.infatuation_immobilized
    {
        log.narrate(format!("{name} is immobilized by love!"));
        return;
    }
    match state.combatant(actor).and_then(|c| c.status) {
        Some(Status::Sleep) => {
            if per.wakes_up {
                state.combatant_mut(actor).expect("gated above").status = None;
                log.narrate(format!("{name} woke up!"));
            } else {
                log.narrate(format!("{name} is fast asleep."));
                return;
            }
        }
        Some(Status::Freeze) => {
            if per.thaws_out {
                state.combatant_mut(actor).expect("gated above").status = None;
                log.narrate(format!("{name} thawed out!"));
            } else {
                log.narrate(format!("{name} is frozen solid!"));
                return;
            }
        }
        Some(Status::Paralysis) if per.fully_paralyzed => {
            log.narrate(format!("{name} is paralyzed and can't move!"));
            return;
        }
        _ => {}
    }

    // Forced continuations override the submitted move index
    let mut move_index = move_index;
    if let Some(VolatileKind::Encore(encored)) = state
        .combatant(actor)
        .and_then(|c| c.volatile(VolatileKind::Encore(0)))
        .map(|v| v.kind)
    {
        move_index = encored as usize;
    }
    if let Some(locked) = state.combatant(actor).and_then(|c| c.locked_move) {
        move_index = locked;
    }

    let Some(move_data) = state
        .combatant(actor)
        .and_then(|c| c.moves.get(move_index))
        .map(|slot| slot.data.clone())
    else {
        log.narrate(format!("{name} fumbled its attack!"));
        return;
    };

    if move_data.category == MoveCategory::Status
        && state
            .combatant(actor)
            .is_some_and(|c| c.has_volatile(VolatileKind::Taunted))
    {
        log.narrate(format!(
            "{name} can't use {} after the taunt!",
            move_data.name
        ));
        return;
    }

    // Surge consumes the team's once-per-battle flag before anything lands
    let mut surged_power = None;
    if surge {
        let team = &mut state.teams[actor.team as usize];
        if team.surge_used {
            log.narrate(format!("{name} tried to surge, but the spark was spent!"));
            return;
        }
        team.surge_used = true;
        surged_power = Some(surge_power(move_data.power));
        log.narrate(format!("{name} unleashed a surge of power!"));
    }

    // Use accounting and lock bookkeeping
    {
        let c = state.combatant_mut(actor).expect("gated above");
        if let Some(slot) = c.moves.get_mut(move_index) {
            slot.uses_left = slot.uses_left.saturating_sub(1);
        }
        c.scratch.last_move = Some(move_index as u8);
        c.scratch.damage_dealt = 0;
    }
    if state.held_item(actor).is_some_and(|i| i.choice_locks()) {
        state.combatant_mut(actor).expect("gated above").locked_move = Some(move_index);
    }
    if move_data.rampage {
        let c = state.combatant_mut(actor).expect("gated above");
        if c.locked_move.is_none() {
            c.locked_move = Some(move_index);
            c.rampage_turns = 2;
        }
    }

    // Before-move hooks get the last word on whether the action proceeds
    {
        let before_ctx = MoveContext::from(&move_data);
        if let Some(hook) =
            hooks::effective_ability_hooks(state, actor).and_then(|h| h.on_before_move)
        {
            if !hook(state, actor, &before_ctx, log) {
                return;
            }
        }
        if let Some(hook) = hooks::held_item_hooks(state, actor).and_then(|h| h.on_before_move) {
            if !hook(state, actor, &before_ctx, log) {
                return;
            }
        }
    }

    log.narrate(format!("{name} used {}!", move_data.name));

    // A charging move releases on its second turn and skips interception
    let releasing = state
        .combatant(actor)
        .and_then(|c| c.charging)
        .is_some_and(|ch| ch.move_index == move_index);
    if releasing {
        state.combatant_mut(actor).expect("gated above").charging = None;
    }

    // (b) field/status interception: fully resolves and short-circuits
    if !surge && !releasing {
        if let Some(effect) = move_data.effect {
            if effect == MoveEffect::Charge {
                let target = hits.first().and_then(|h| h.target);
                state.combatant_mut(actor).expect("gated above").charging =
                    Some(ChargingMove { move_index, target });
                log.narrate(format!("{name} began gathering power!"));
            } else {
                intercept_effect(state, actor, effect, hits, log);
            }
            post_move(state, actor, &move_data, log);
            return;
        }
    }

    // (c) redirection for single-target moves
    let mut hits: Vec<HitRecord> = hits.to_vec();
    if hits.is_empty() {
        log.narrate("But there was no target...");
        post_move(state, actor, &move_data, log);
        return;
    }
    if hits.len() == 1 {
        if let Some(declared) = hits[0].target {
            hits[0].target = Some(resolve_redirection(state, actor, declared, &move_data, log));
        }
    }

    // (d) per-hit loop
    for (index, hit) in hits.iter().enumerate() {
        if state.combatant(actor).is_none_or(|c| !c.is_alive()) {
            break;
        }
        run_one_hit(
            state,
            actor,
            &move_data,
            surged_power,
            hit,
            index == 0,
            apply_effect,
            log,
        );
    }

    // (e) post-move hooks and counters
    post_move(state, actor, &move_data, log);
}

#[allow(clippy::too_many_arguments)]
fn run_one_hit(
    state: &mut BattleState,
    actor: CombatantId,
    move_data: &MoveData,
    surged_power: Option<u16>,
    hit: &HitRecord,
    first_hit: bool,
    apply_effect: bool,
    log: &mut EventLog,
) {
    let attacker_name = state.display_name(actor);
    let Some(mut target) = hit.target else {
        log.narrate(format!("{attacker_name}'s strike had no target."));
        return;
    };
    if state.combatant(target).is_none_or(|c| !c.is_alive()) || !state.is_active(target) {
        log.narrate(format!("{attacker_name}'s strike had no target."));
        return;
    }

    let bypass = hooks::effective_ability(state, actor)
        .is_some_and(|a| a.bypasses_defender_ability());

    // Bounce-capable defenders reflect status moves back at the user
    if move_data.category == MoveCategory::Status && target != actor && !bypass {
        let bounces = hooks::effective_ability_hooks(state, target)
            .and_then(|h| h.on_bounce)
            .is_some_and(|hook| hook(state, target));
        if bounces {
            log.narrate(format!(
                "{} bounced the {} back!",
                state.display_name(target),
                move_data.name
            ));
            target = actor;
        }
    }

    if hit.miss {
        log.narrate(format!("{attacker_name}'s attack missed!"));
        if let Some(hook) = hooks::effective_ability_hooks(state, actor).and_then(|h| h.on_miss) {
            hook(state, actor, &MoveContext::from(move_data), log);
        }
        if let Some(hook) = hooks::held_item_hooks(state, actor).and_then(|h| h.on_miss) {
            hook(state, actor, &MoveContext::from(move_data), log);
        }
        return;
    }

    // Crit immunity is an ability hook, so a bypass attacker ignores it
    let mut crit = hit.crit;
    if crit && !bypass {
        let immune = hooks::effective_ability_hooks(state, target)
            .and_then(|h| h.on_crit_immunity)
            .is_some_and(|hook| hook(state, target));
        if immune {
            crit = false;
        }
    }

    let mut move_ctx = MoveContext::from(move_data);
    if let Some(power) = surged_power {
        move_ctx.power = power;
    }
    let outcome = damage::compute_damage(state, actor, target, &mut move_ctx, crit);
    let defender_name = state.display_name(target);

    if outcome.effectiveness == 0.0 {
        log.push(attack_entry(&attacker_name, &defender_name, &move_ctx, &outcome, 0, false));
        log.narrate(format!("It had no effect on {defender_name}."));
        return;
    }

    // A zero-power move deals nothing and logs nothing beyond its use; only
    // its secondary payload matters
    if move_ctx.power == 0 {
        if first_hit && apply_effect {
            if let Some(secondary) = &move_data.secondary {
                apply_secondary(state, actor, target, secondary, log);
            }
        }
        return;
    }

    let applied = apply_move_damage(state, target, outcome.damage, log);
    let fainted = state.combatant(target).is_none_or(|c| !c.is_alive());
    log.push(attack_entry(
        &attacker_name,
        &defender_name,
        &move_ctx,
        &outcome,
        applied,
        fainted,
    ));
    if outcome.effectiveness > 1.0 {
        log.narrate("It's super effective!");
    } else if outcome.effectiveness < 1.0 {
        log.narrate("It's not very effective...");
    }

    if applied > 0 {
        if let Some(c) = state.combatant_mut(actor) {
            c.scratch.damage_dealt += applied;
        }
        // A matching resistance berry spent itself softening this hit
        if outcome.effectiveness > 1.0
            && state
                .held_item(target)
                .and_then(|i| i.resist_berry_element())
                == Some(move_ctx.element)
        {
            effects::consume_held_item(state, target, log);
            log.narrate(format!("{defender_name}'s berry weakened the blow!"));
        }
        // Post-damage hooks on the defender, ability before item
        if let Some(hook) = hooks::effective_ability_hooks(state, target)
            .and_then(|h| h.on_take_damage)
        {
            hook(state, target, applied, log);
        }
        if let Some(hook) = hooks::held_item_hooks(state, target).and_then(|h| h.on_take_damage) {
            hook(state, target, applied, log);
        }
        // Contact aftermath
        if move_ctx.contact {
            if let Some(hook) = hooks::effective_ability_hooks(state, target)
                .and_then(|h| h.on_damaged_by_contact)
            {
                hook(state, target, actor, log);
            }
            if let Some(hook) =
                hooks::held_item_hooks(state, target).and_then(|h| h.on_damaged_by_contact)
            {
                hook(state, target, actor, log);
            }
        }
        if let Some(hook) = hooks::effective_ability_hooks(state, actor)
            .and_then(|h| h.on_after_damage_dealt)
        {
            hook(state, actor, target, applied, log);
        }
        if let Some(hook) =
            hooks::held_item_hooks(state, actor).and_then(|h| h.on_after_damage_dealt)
        {
            hook(state, actor, target, applied, log);
        }
    }

    if fainted {
        log.narrate(format!("{defender_name} fainted!"));
        if let Some(hook) =
            hooks::effective_ability_hooks(state, actor).and_then(|h| h.on_after_ko)
        {
            hook(state, actor, log);
        }
    }

    // Secondary effects ride only the first hit of the sequence
    if first_hit && apply_effect {
        if let Some(secondary) = &move_data.secondary {
            apply_secondary(state, actor, target, secondary, log);
        }
    }
}

fn attack_entry(
    attacker: &str,
    defender: &str,
    move_ctx: &MoveContext,
    outcome: &DamageOutcome,
    applied: u32,
    faint: bool,
) -> LogEntry {
    LogEntry::Attack {
        attacker: attacker.to_string(),
        defender: defender.to_string(),
        move_name: move_ctx.name.clone(),
        damage: applied,
        effectiveness: outcome.effectiveness,
        crit: outcome.crit,
        faint,
        breakdown: outcome.breakdown,
    }
}

/// Apply computed move damage, honoring the survive-lethal markers: the
/// robust ability holds first; the last-stand item only triggers (and is
/// only consumed) when no ability already held the line. Both require full
/// HP.
fn apply_move_damage(
    state: &mut BattleState,
    defender: CombatantId,
    amount: u32,
    log: &mut EventLog,
) -> u32 {
    let ability_holds = hooks::effective_ability(state, defender).is_some_and(|a| a.survives_lethal());
    let item_holds = state.held_item(defender).is_some_and(|i| i.survives_lethal());
    let Some(c) = state.combatant_mut(defender) else {
        return 0;
    };
    if !c.is_alive() {
        return 0;
    }
    let mut amount = amount;
    if amount >= c.hp && c.hp == c.max_hp {
        if ability_holds {
            amount = c.hp - 1;
            log.narrate(format!("{} endured the hit!", c.name.clone()));
        } else if item_holds {
            amount = c.hp - 1;
            c.scratch.consumed_item = c.item.take();
            log.narrate(format!("{} hung on using its Focus Sash!", c.name.clone()));
        }
    }
    c.take_damage(amount)
}

/// Redirection: the first other active combatant whose ability declares
/// interest in this element pulls the hit, scanned in team order then slot
/// order. An attacker whose ability ignores redirection is exempt.
fn resolve_redirection(
    state: &BattleState,
    actor: CombatantId,
    declared: CombatantId,
    move_data: &MoveData,
    log: &mut EventLog,
) -> CombatantId {
    if hooks::effective_ability(state, actor).is_some_and(|a| a.ignores_redirection()) {
        return declared;
    }
    for candidate in state.active_ids() {
        if candidate == actor || candidate == declared {
            continue;
        }
        let interested = hooks::effective_ability_hooks(state, candidate)
            .and_then(|h| h.on_redirect)
            .is_some_and(|hook| hook(state, candidate, move_data.element));
        if interested {
            log.narrate(format!("{} drew in the attack!", state.display_name(candidate)));
            return candidate;
        }
    }
    declared
}

fn apply_secondary(
    state: &mut BattleState,
    user: CombatantId,
    target: CombatantId,
    secondary: &SecondaryEffect,
    log: &mut EventLog,
) {
    let recipient = match secondary.target {
        EffectTarget::User => user,
        EffectTarget::Target => {
            if state
                .held_item(target)
                .is_some_and(|i| i.blocks_secondary_effects())
            {
                log.narrate(format!(
                    "{}'s Covert Cloak blocked the added effect!",
                    state.display_name(target)
                ));
                return;
            }
            target
        }
    };

    match &secondary.kind {
        SecondaryKind::InflictStatus(status) => {
            effects::apply_status(state, recipient, *status, log);
        }
        SecondaryKind::StatStages(changes) => {
            for (stat, delta) in changes {
                effects::change_stat_stage(state, recipient, *stat, *delta, Some(user), log);
            }
        }
        SecondaryKind::ApplyVolatile(kind) => {
            let alive = state.combatant(recipient).is_some_and(|c| c.is_alive());
            if alive {
                let name = state.display_name(recipient);
                state
                    .combatant_mut(recipient)
                    .expect("checked above")
                    .add_volatile(Volatile::tag(*kind));
                log.narrate(format!("{name} was afflicted by {kind}!"));
            }
        }
        SecondaryKind::Bind => {
            let alive = state.combatant(recipient).is_some_and(|c| c.is_alive());
            if alive {
                let name = state.display_name(recipient);
                state.combatant_mut(recipient).expect("checked above").add_volatile(Volatile {
                    kind: VolatileKind::Bound,
                    source: Some(user),
                    turns_left: Some(4),
                });
                log.narrate(format!("{name} was trapped!"));
            }
        }
        SecondaryKind::Seed => {
            let Some(c) = state.combatant(recipient) else { return };
            if !c.is_alive() {
                return;
            }
            if c.has_element(fracas_data::Element::Grass) {
                log.narrate(format!("It doesn't affect {}...", c.name));
                return;
            }
            let name = c.name.clone();
            state.combatant_mut(recipient).expect("checked above").add_volatile(Volatile {
                kind: VolatileKind::Seeded,
                source: Some(user),
                // Dormant until the end of the following turn
                turns_left: Some(1),
            });
            log.narrate(format!("{name} was seeded!"));
        }
    }
}

/// Interceptable field/status effects: each fully resolves here
fn intercept_effect(
    state: &mut BattleState,
    actor: CombatantId,
    effect: MoveEffect,
    hits: &[HitRecord],
    log: &mut EventLog,
) {
    use crate::hooks::FieldEffect;

    let target = hits
        .first()
        .and_then(|h| h.target)
        .filter(|t| state.combatant(*t).is_some_and(|c| c.is_alive()) && state.is_active(*t));

    match effect {
        MoveEffect::SetWeather(weather) => {
            effects::set_weather(state, weather, 5, log);
        }
        MoveEffect::SetTerrain(terrain) => {
            effects::set_terrain(state, terrain, 5, log);
        }
        MoveEffect::ToggleRoom(room) => {
            if state.field.room_active(room) {
                state.field.rooms.set(room, 0);
                log.narrate(format!("The {room} dissipated!"));
            } else {
                state.field.rooms.set(room, 5);
                log.narrate(format!("The {room} warped the battlefield!"));
                effects::broadcast_field_start(state, FieldEffect::Room(room), log);
            }
        }
        MoveEffect::SetScreen(screen) => {
            let team = &mut state.teams[actor.team as usize];
            if team.screens.get(screen) > 0 {
                log.narrate("But it failed!");
            } else {
                team.screens.set(screen, 5);
                log.narrate(format!("{screen} shielded {}!", team.name.clone()));
            }
        }
        MoveEffect::SetHazard(hazard) => {
            // Lands on the target's side, or the first opposing side
            let side = target
                .map(|t| t.team)
                .filter(|t| *t != actor.team)
                .or_else(|| {
                    (0..state.teams.len() as u8).find(|t| *t != actor.team)
                });
            let Some(side) = side else { return };
            if state.field.hazards[side as usize].add(hazard) {
                log.narrate(format!(
                    "{hazard} scattered around {}!",
                    state.teams[side as usize].name.clone()
                ));
            } else {
                log.narrate("But it failed!");
            }
        }
        MoveEffect::Curse => {
            let Some(target) = target else {
                log.narrate("But there was no target...");
                return;
            };
            let name = {
                let c = state.combatant_mut(actor).expect("actor is acting");
                let cost = c.max_hp / 2;
                c.take_damage(cost);
                c.name.clone()
            };
            state.combatant_mut(target).expect("validated above").add_volatile(Volatile {
                kind: VolatileKind::Cursed,
                source: Some(actor),
                turns_left: None,
            });
            log.narrate(format!(
                "{name} cut its own HP to lay a curse on {}!",
                state.display_name(target)
            ));
            if state.combatant(actor).is_none_or(|c| !c.is_alive()) {
                log.narrate(format!("{name} fainted!"));
            }
        }
        MoveEffect::Nightmare => {
            let Some(target) = target else {
                log.narrate("But there was no target...");
                return;
            };
            if state.combatant(target).and_then(|c| c.status) != Some(Status::Sleep) {
                log.narrate("But it failed!");
                return;
            }
            state.combatant_mut(target).expect("validated above").add_volatile(Volatile {
                kind: VolatileKind::Nightmare,
                source: Some(actor),
                turns_left: None,
            });
            log.narrate(format!("{} sank into a nightmare!", state.display_name(target)));
        }
        MoveEffect::Encore => {
            let Some(target) = target else {
                log.narrate("But there was no target...");
                return;
            };
            let Some(last) = state.combatant(target).and_then(|c| c.scratch.last_move) else {
                log.narrate("But it failed!");
                return;
            };
            state.combatant_mut(target).expect("validated above").add_volatile(Volatile {
                kind: VolatileKind::Encore(last),
                source: Some(actor),
                turns_left: Some(3),
            });
            log.narrate(format!("{} received an encore!", state.display_name(target)));
        }
        MoveEffect::Taunt => {
            let Some(target) = target else {
                log.narrate("But there was no target...");
                return;
            };
            state.combatant_mut(target).expect("validated above").add_volatile(Volatile {
                kind: VolatileKind::Taunted,
                source: Some(actor),
                turns_left: Some(3),
            });
            log.narrate(format!("{} fell for the taunt!", state.display_name(target)));
        }
        MoveEffect::Infatuate => {
            let Some(target) = target else {
                log.narrate("But there was no target...");
                return;
            };
            state.combatant_mut(target).expect("validated above").add_volatile(Volatile {
                kind: VolatileKind::Infatuated,
                source: Some(actor),
                turns_left: None,
            });
            log.narrate(format!("{} fell in love!", state.display_name(target)));
        }
        MoveEffect::SuppressAbility => {
            let Some(target) = target else {
                log.narrate("But there was no target...");
                return;
            };
            state
                .combatant_mut(target)
                .expect("validated above")
                .add_volatile(Volatile::tag(VolatileKind::AbilitySuppressed));
            log.narrate(format!("{}'s ability was suppressed!", state.display_name(target)));
        }
        MoveEffect::ReplaceAbility(ability) => {
            let Some(target) = target else {
                log.narrate("But there was no target...");
                return;
            };
            state
                .combatant_mut(target)
                .expect("validated above")
                .add_volatile(Volatile::tag(VolatileKind::AbilityReplaced(ability)));
            log.narrate(format!(
                "{}'s ability became {ability}!",
                state.display_name(target)
            ));
        }
        MoveEffect::PerishSong => {
            log.narrate("A dirge echoed over the battlefield!");
            for id in state.active_ids() {
                let c = state.combatant_mut(id).expect("active combatant");
                if c.is_alive() && !c.has_volatile(VolatileKind::PerishCount) {
                    c.add_volatile(Volatile {
                        kind: VolatileKind::PerishCount,
                        source: Some(actor),
                        turns_left: Some(3),
                    });
                }
            }
        }
        MoveEffect::ForceSwitch => {
            let Some(target) = target else {
                log.narrate("But there was no target...");
                return;
            };
            state.forced_switches.push(target);
        }
        MoveEffect::Charge => {
            // Normally consumed before interception; keep the flag coherent
            let target = hits.first().and_then(|h| h.target);
            if let Some(c) = state.combatant_mut(actor) {
                c.charging = Some(ChargingMove {
                    move_index: c.scratch.last_move.unwrap_or(0) as usize,
                    target,
                });
            }
        }
    }
}

/// Post-move bookkeeping: recoil, drain, after-move hooks, lock countdown,
/// and the actor's own encore/taunt counters
fn post_move(state: &mut BattleState, actor: CombatantId, move_data: &MoveData, log: &mut EventLog) {
    let dealt = state
        .combatant(actor)
        .map(|c| c.scratch.damage_dealt)
        .unwrap_or(0);

    if dealt > 0 {
        if let Some(divisor) = move_data.recoil_divisor {
            let c = state.combatant_mut(actor).expect("actor exists");
            if c.is_alive() {
                let recoil = (dealt / divisor as u32).max(1);
                let name = c.name.clone();
                c.take_damage(recoil);
                log.narrate(format!("{name} is damaged by recoil!"));
                if !c.is_alive() {
                    log.narrate(format!("{name} fainted!"));
                }
            }
        }
        if let Some(divisor) = move_data.drain_divisor {
            let boosted = state.held_item(actor).is_some_and(|i| i.boosts_drain());
            let c = state.combatant_mut(actor).expect("actor exists");
            if c.is_alive() {
                let mut heal = (dealt / divisor as u32).max(1);
                if boosted {
                    heal = heal * 13 / 10;
                }
                let name = c.name.clone();
                c.heal(heal);
                log.narrate(format!("{name} drained the energy back!"));
            }
        }
    }

    let move_ctx = MoveContext::from(move_data);
    if let Some(hook) = hooks::effective_ability_hooks(state, actor).and_then(|h| h.on_after_move) {
        hook(state, actor, &move_ctx, log);
    }
    if let Some(hook) = hooks::held_item_hooks(state, actor).and_then(|h| h.on_after_move) {
        hook(state, actor, &move_ctx, log);
    }

    let choice_locked = state.held_item(actor).is_some_and(|i| i.choice_locks());
    let name = state.display_name(actor);
    if let Some(c) = state.combatant_mut(actor) {
        // Rampage countdown; choice locks persist until switch-out
        if c.rampage_turns > 0 {
            c.rampage_turns -= 1;
            if c.rampage_turns == 0 && !choice_locked {
                c.locked_move = None;
            }
        }
        // The actor's own encore/taunt counters tick after it moves
        for kind in [VolatileKind::Encore(0), VolatileKind::Taunted] {
            let expired = match c.volatile_mut(kind) {
                Some(v) => {
                    let remaining = v.turns_left.unwrap_or(1).saturating_sub(1);
                    v.turns_left = Some(remaining);
                    remaining == 0
                }
                None => false,
            };
            if expired {
                c.remove_volatile(kind);
                match kind {
                    VolatileKind::Taunted => log.narrate(format!("{name}'s taunt wore off!")),
                    _ => log.narrate(format!("{name}'s encore ended!")),
                }
            }
        }
        c.scratch.damage_dealt = 0;
    }
}

//! Status & field manager: stage changes, status application, switch-in
//! entry effects, and the end-of-turn pass

use fracas_data::{AbilityId, Element, HazardKind, RoomKind, ScreenKind, StatKind, Status, Terrain,
    VolatileKind, Weather};

use crate::hooks::{self, FieldEffect};
use crate::log::EventLog;
use crate::turn::action::ChanceOutcomes;
use crate::turn::order;
use crate::types::{BattleState, CombatantId};

/// Move a combatant's held item into its consumed-item scratch slot
pub fn consume_held_item(state: &mut BattleState, id: CombatantId, _log: &mut EventLog) {
    if let Some(c) = state.combatant_mut(id) {
        c.scratch.consumed_item = c.item.take();
    }
}

/// Apply a stage delta, routing it through the target's stage-modifier hook
/// and firing the stat-lowered hook when an opponent drops a stage.
/// Returns the change actually applied.
pub fn change_stat_stage(
    state: &mut BattleState,
    target: CombatantId,
    stat: StatKind,
    delta: i8,
    source: Option<CombatantId>,
    log: &mut EventLog,
) -> i8 {
    if delta == 0 || state.combatant(target).is_none_or(|c| !c.is_alive()) {
        return 0;
    }

    let adjusted = match hooks::effective_ability_hooks(state, target)
        .and_then(|h| h.on_modify_stat_stage)
    {
        Some(hook) => hook(state, target, stat, delta, source),
        None => delta,
    };
    if adjusted == 0 {
        if delta < 0 {
            log.narrate(format!(
                "{}'s {} was not lowered!",
                state.display_name(target),
                stat
            ));
        }
        return 0;
    }

    let name = state.display_name(target);
    let actual = state
        .combatant_mut(target)
        .map(|c| c.stages.boost(stat, adjusted))
        .unwrap_or(0);

    match actual {
        0 if adjusted > 0 => log.narrate(format!("{name}'s {stat} won't go any higher!")),
        0 => log.narrate(format!("{name}'s {stat} won't go any lower!")),
        1 => log.narrate(format!("{name}'s {stat} rose!")),
        -1 => log.narrate(format!("{name}'s {stat} fell!")),
        d if d > 1 => log.narrate(format!("{name}'s {stat} rose sharply!")),
        _ => log.narrate(format!("{name}'s {stat} fell harshly!")),
    }

    if actual < 0 {
        if let Some(hook) =
            hooks::effective_ability_hooks(state, target).and_then(|h| h.on_stat_lowered)
        {
            hook(state, target, source, log);
        }
    }
    actual
}

/// Try to inflict a non-volatile status. Fails against an existing status
/// or an element-based immunity.
pub fn apply_status(
    state: &mut BattleState,
    target: CombatantId,
    status: Status,
    log: &mut EventLog,
) -> bool {
    let Some(c) = state.combatant(target) else {
        return false;
    };
    if !c.is_alive() || c.status.is_some() {
        return false;
    }
    let immune = match status {
        Status::Burn => c.has_element(Element::Fire),
        Status::Poison | Status::BadPoison => {
            c.has_element(Element::Poison) || c.has_element(Element::Steel)
        }
        Status::Paralysis => c.has_element(Element::Electric),
        Status::Freeze => c.has_element(Element::Ice),
        Status::Sleep => false,
    };
    if immune {
        log.narrate(format!("It doesn't affect {}...", c.name));
        return false;
    }

    let name = c.name.clone();
    let c = state.combatant_mut(target).expect("checked above");
    c.status = Some(status);
    if status == Status::BadPoison {
        c.toxic_counter = 0;
    }
    let phrase = match status {
        Status::Burn => "was burned!",
        Status::Poison => "was poisoned!",
        Status::BadPoison => "was badly poisoned!",
        Status::Paralysis => "was paralyzed!",
        Status::Sleep => "fell asleep!",
        Status::Freeze => "was frozen solid!",
    };
    log.narrate(format!("{name} {phrase}"));
    true
}

/// Whether hazards and terrain reach this combatant
pub fn is_grounded(state: &BattleState, id: CombatantId) -> bool {
    if state.field.room_active(RoomKind::Gravity) {
        return true;
    }
    let Some(c) = state.combatant(id) else {
        return true;
    };
    if c.has_element(Element::Flying) {
        return false;
    }
    !hooks::has_ability(state, id, AbilityId::Levitate)
}

/// Start weather; fails if that weather is already up
pub fn set_weather(state: &mut BattleState, weather: Weather, turns: u8, log: &mut EventLog) -> bool {
    if state.field.weather_is(weather) {
        log.narrate("But it failed!");
        return false;
    }
    state.field.weather = Some((weather, turns));
    let line = match weather {
        Weather::Sun => "The sunlight turned harsh!",
        Weather::Rain => "It started to rain!",
        Weather::Sandstorm => "A sandstorm kicked up!",
        Weather::Hail => "It started to hail!",
    };
    log.narrate(line);
    broadcast_field_start(state, FieldEffect::Weather(weather), log);
    true
}

/// Start terrain; fails if that terrain is already up
pub fn set_terrain(state: &mut BattleState, terrain: Terrain, turns: u8, log: &mut EventLog) -> bool {
    if state.field.terrain_is(terrain) {
        log.narrate("But it failed!");
        return false;
    }
    state.field.terrain = Some((terrain, turns));
    log.narrate(format!("{terrain} spread across the battlefield!"));
    broadcast_field_start(state, FieldEffect::Terrain(terrain), log);
    true
}

/// Let every active combatant's ability and item react to a starting field
/// effect
pub fn broadcast_field_start(state: &mut BattleState, effect: FieldEffect, log: &mut EventLog) {
    for id in state.active_ids() {
        if let Some(hook) =
            hooks::effective_ability_hooks(state, id).and_then(|h| h.on_field_effect_start)
        {
            hook(state, id, effect, log);
        }
        if let Some(hook) =
            hooks::held_item_hooks(state, id).and_then(|h| h.on_field_effect_start)
        {
            hook(state, id, effect, log);
        }
    }
}

/// Full switch-in pipeline: ability and item entry hooks, then entry
/// hazards in fixed order. A faint mid-hazard halts that combatant's
/// remaining hazard steps.
pub fn run_switch_in(state: &mut BattleState, ids: &[CombatantId], log: &mut EventLog) {
    for &id in ids {
        if state.combatant(id).is_none_or(|c| !c.is_alive()) {
            continue;
        }
        if let Some(hook) = hooks::effective_ability_hooks(state, id).and_then(|h| h.on_switch_in) {
            hook(state, id, log);
        }
        if let Some(hook) = hooks::held_item_hooks(state, id).and_then(|h| h.on_switch_in) {
            hook(state, id, log);
        }
        apply_entry_hazards(state, id, log);
    }
}

fn apply_entry_hazards(state: &mut BattleState, id: CombatantId, log: &mut EventLog) {
    if hooks::effective_ability(state, id).is_some_and(|a| a.blocks_indirect_damage()) {
        return;
    }
    if state.held_item(id).is_some_and(|i| i.blocks_hazards()) {
        return;
    }
    let team = id.team as usize;
    let layers = state.field.hazards[team];

    // Pointed hazard: percentage damage scaled by the rock matchup
    if layers.get(HazardKind::PointedStones) > 0 {
        let (name, elements, max_hp) = {
            let c = state.combatant(id).expect("active combatant");
            (c.name.clone(), c.elements.clone(), c.max_hp)
        };
        let eff = Element::Rock.matchup_all(&elements);
        let damage = ((max_hp as f32 * eff / 8.0) as u32).max(1);
        let c = state.combatant_mut(id).expect("active combatant");
        c.take_damage(damage);
        log.narrate(format!("{name} was hurt by the pointed stones!"));
        if faint_check(state, id, log) {
            return;
        }
    }

    // Layered hazard: damage fraction indexed by layer count
    let spikes = layers.get(HazardKind::Spikes);
    if spikes > 0 && is_grounded(state, id) {
        let divisor = match spikes {
            1 => 8,
            2 => 6,
            _ => 4,
        };
        let c = state.combatant_mut(id).expect("active combatant");
        let damage = (c.max_hp / divisor).max(1);
        let name = c.name.clone();
        c.take_damage(damage);
        log.narrate(format!("{name} was hurt by the spikes!"));
        if faint_check(state, id, log) {
            return;
        }
    }

    // Poison absorption, then application
    let toxic = layers.get(HazardKind::ToxicSpikes);
    if toxic > 0 && is_grounded(state, id) {
        let c = state.combatant(id).expect("active combatant");
        if c.has_element(Element::Poison) {
            let name = c.name.clone();
            state.field.hazards[team].clear(HazardKind::ToxicSpikes);
            log.narrate(format!("{name} absorbed the toxic spikes!"));
        } else if !c.has_element(Element::Steel) {
            let status = if toxic >= 2 {
                Status::BadPoison
            } else {
                Status::Poison
            };
            apply_status(state, id, status, log);
        }
    }

    // Speed-lowering web
    if layers.get(HazardKind::StickyWeb) > 0 && is_grounded(state, id) {
        log.narrate(format!("{} was caught in a sticky web!", state.display_name(id)));
        change_stat_stage(state, id, StatKind::Speed, -1, None, log);
    }
}

/// Log a faint if it just happened; returns whether the combatant is down
fn faint_check(state: &BattleState, id: CombatantId, log: &mut EventLog) -> bool {
    match state.combatant(id) {
        Some(c) if !c.is_alive() => {
            log.narrate(format!("{} fainted!", c.name));
            true
        }
        _ => false,
    }
}

/// End-of-turn pass: every active combatant in descending effective-speed
/// order, then field-counter expiry
pub fn run_end_of_turn(state: &mut BattleState, outcomes: &ChanceOutcomes, log: &mut EventLog) {
    let mut ids = state.active_ids();
    ids.sort_by_key(|id| std::cmp::Reverse(order::effective_speed(state, *id)));

    for id in ids {
        if state.combatant(id).is_none_or(|c| !c.is_alive()) {
            continue;
        }
        let per = outcomes.for_combatant(id);

        if let Some(hook) =
            hooks::effective_ability_hooks(state, id).and_then(|h| h.on_end_of_turn)
        {
            hook(state, id, &per, log);
        }

        let unnerved = state.opponents_of(id).into_iter().any(|opp| {
            hooks::effective_ability(state, opp).is_some_and(|a| a.unnerves_opponents())
        });
        if !unnerved {
            if let Some(hook) = hooks::held_item_hooks(state, id).and_then(|h| h.on_end_of_turn) {
                hook(state, id, &per, log);
            }
        }

        let guarded =
            hooks::effective_ability(state, id).is_some_and(|a| a.blocks_indirect_damage());
        if !guarded {
            tick_bound(state, id, log);
            tick_seed(state, id, log);
            tick_curse(state, id, log);
            tick_nightmare(state, id, log);
            tick_status_damage(state, id, log);
            tick_weather_damage(state, id, log);
        }
        // The perish counter runs regardless of damage immunities
        tick_perish(state, id, log);
    }

    tick_field_counters(state, log);
}

fn tick_bound(state: &mut BattleState, id: CombatantId, log: &mut EventLog) {
    let Some(c) = state.combatant_mut(id) else { return };
    if !c.is_alive() {
        return;
    }
    let Some(v) = c.volatile_mut(VolatileKind::Bound) else {
        return;
    };
    let remaining = v.turns_left.unwrap_or(1).saturating_sub(1);
    v.turns_left = Some(remaining);
    let name = c.name.clone();
    let damage = (c.max_hp / 8).max(1);
    c.take_damage(damage);
    log.narrate(format!("{name} is hurt by the trap!"));
    if remaining == 0 {
        c.remove_volatile(VolatileKind::Bound);
        log.narrate(format!("{name} was freed from the trap!"));
    }
    faint_check(state, id, log);
}

fn tick_seed(state: &mut BattleState, id: CombatantId, log: &mut EventLog) {
    // A seed planted this turn lies dormant until the following end of turn
    if let Some(v) = state
        .combatant_mut(id)
        .and_then(|c| c.volatile_mut(VolatileKind::Seeded))
    {
        if v.turns_left == Some(1) {
            v.turns_left = None;
            return;
        }
    }
    let Some(c) = state.combatant(id) else { return };
    if !c.is_alive() {
        return;
    }
    let Some(source) = c.volatile(VolatileKind::Seeded).and_then(|v| v.source) else {
        return;
    };
    // The seed only drains while its planter is still on the field
    if state.combatant(source).is_none_or(|s| !s.is_alive()) || !state.is_active(source) {
        return;
    }
    let c = state.combatant_mut(id).expect("checked above");
    let name = c.name.clone();
    let drained = c.take_damage((c.max_hp / 8).max(1));
    log.narrate(format!("{name}'s health is sapped by the leech seed!"));

    let mut healed = drained;
    if state.held_item(source).is_some_and(|i| i.boosts_drain()) {
        healed = healed * 13 / 10;
    }
    if let Some(planter) = state.combatant_mut(source) {
        planter.heal(healed);
    }
    faint_check(state, id, log);
}

fn tick_curse(state: &mut BattleState, id: CombatantId, log: &mut EventLog) {
    let Some(c) = state.combatant_mut(id) else { return };
    if !c.is_alive() || !c.has_volatile(VolatileKind::Cursed) {
        return;
    }
    let name = c.name.clone();
    let damage = (c.max_hp / 4).max(1);
    c.take_damage(damage);
    log.narrate(format!("{name} is afflicted by the curse!"));
    faint_check(state, id, log);
}

fn tick_nightmare(state: &mut BattleState, id: CombatantId, log: &mut EventLog) {
    let Some(c) = state.combatant_mut(id) else { return };
    if !c.is_alive() || !c.has_volatile(VolatileKind::Nightmare) {
        return;
    }
    if c.status != Some(Status::Sleep) {
        // Nightmares end with the sleep that hosted them
        c.remove_volatile(VolatileKind::Nightmare);
        return;
    }
    let name = c.name.clone();
    let damage = (c.max_hp / 4).max(1);
    c.take_damage(damage);
    log.narrate(format!("{name} is locked in a nightmare!"));
    faint_check(state, id, log);
}

fn tick_status_damage(state: &mut BattleState, id: CombatantId, log: &mut EventLog) {
    let ability = hooks::effective_ability(state, id);
    let Some(c) = state.combatant_mut(id) else { return };
    if !c.is_alive() {
        return;
    }
    let name = c.name.clone();
    match c.status {
        Some(Status::Poison) => {
            if ability == Some(AbilityId::PoisonHeal) {
                let amount = (c.max_hp / 8).max(1);
                c.heal(amount);
                log.narrate(format!("{name}'s Poison Heal restored its HP!"));
            } else {
                let damage = (c.max_hp / 8).max(1);
                c.take_damage(damage);
                log.narrate(format!("{name} is hurt by poison!"));
            }
        }
        Some(Status::BadPoison) => {
            if ability == Some(AbilityId::PoisonHeal) {
                let amount = (c.max_hp / 8).max(1);
                c.heal(amount);
                log.narrate(format!("{name}'s Poison Heal restored its HP!"));
            } else {
                c.toxic_counter = c.toxic_counter.saturating_add(1);
                let damage = (c.max_hp * c.toxic_counter as u32 / 16).max(1);
                c.take_damage(damage);
                log.narrate(format!("{name} is hurt by the worsening poison!"));
            }
        }
        Some(Status::Burn) => {
            // Heatproof shrugs off the chip damage entirely
            if ability != Some(AbilityId::Heatproof) {
                let damage = (c.max_hp / 16).max(1);
                c.take_damage(damage);
                log.narrate(format!("{name} is hurt by its burn!"));
            }
        }
        _ => {}
    }
    faint_check(state, id, log);
}

fn tick_weather_damage(state: &mut BattleState, id: CombatantId, log: &mut EventLog) {
    let Some((weather, _)) = state.field.weather else {
        return;
    };
    let ability = hooks::effective_ability(state, id);
    if ability == Some(AbilityId::Overcoat) {
        return;
    }
    let Some(c) = state.combatant_mut(id) else { return };
    if !c.is_alive() {
        return;
    }
    let immune = match weather {
        Weather::Sandstorm => {
            c.has_element(Element::Rock)
                || c.has_element(Element::Ground)
                || c.has_element(Element::Steel)
        }
        Weather::Hail => c.has_element(Element::Ice),
        Weather::Sun | Weather::Rain => true,
    };
    if immune {
        return;
    }
    let name = c.name.clone();
    let damage = (c.max_hp / 16).max(1);
    c.take_damage(damage);
    let source = match weather {
        Weather::Sandstorm => "the sandstorm",
        _ => "the hail",
    };
    log.narrate(format!("{name} is buffeted by {source}!"));
    faint_check(state, id, log);
}

fn tick_perish(state: &mut BattleState, id: CombatantId, log: &mut EventLog) {
    let Some(c) = state.combatant_mut(id) else { return };
    if !c.is_alive() {
        return;
    }
    let Some(v) = c.volatile_mut(VolatileKind::PerishCount) else {
        return;
    };
    let remaining = v.turns_left.unwrap_or(0).saturating_sub(1);
    v.turns_left = Some(remaining);
    let name = c.name.clone();
    log.narrate(format!("{name}'s perish count fell to {remaining}!"));
    if remaining == 0 {
        c.set_hp(0);
        log.narrate(format!("{name} fainted!"));
    }
}

fn tick_field_counters(state: &mut BattleState, log: &mut EventLog) {
    if let Some((weather, turns)) = state.field.weather {
        if turns <= 1 {
            state.field.weather = None;
            log.narrate(format!("The {weather} subsided."));
        } else {
            state.field.weather = Some((weather, turns - 1));
        }
    }
    if let Some((terrain, turns)) = state.field.terrain {
        if turns <= 1 {
            state.field.terrain = None;
            log.narrate(format!("The {terrain} faded."));
        } else {
            state.field.terrain = Some((terrain, turns - 1));
        }
    }
    for room in RoomKind::ALL {
        let turns = state.field.rooms.get(room);
        if turns > 0 {
            state.field.rooms.set(room, turns - 1);
            if turns == 1 {
                log.narrate(format!("The {room} wore off!"));
            }
        }
    }
    for team_index in 0..state.teams.len() {
        for screen in ScreenKind::ALL {
            let turns = state.teams[team_index].screens.get(screen);
            if turns > 0 {
                state.teams[team_index].screens.set(screen, turns - 1);
                if turns == 1 {
                    let name = state.teams[team_index].name.clone();
                    log.narrate(format!("{name}'s {screen} wore off!"));
                }
            }
        }
    }
}

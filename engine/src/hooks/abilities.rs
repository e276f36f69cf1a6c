//! Ability hook implementations and registry

use fracas_data::{AbilityId, Element, StatKind, VolatileKind, Weather};

use super::{DamageHookCtx, FieldEffect, Hooks, MoveContext};
use crate::effects;
use crate::forms::{self, FormChange, FormChangeKind};
use crate::log::EventLog;
use crate::turn::action::CombatantOutcomes;
use crate::types::{BattleState, CombatantId, FormData, Volatile};

/// Ability hook registry, indexed by `AbilityId as usize`.
/// Marker abilities (Mold Breaker, Stalwart, Neutralizing Gas, Unnerve,
/// Sturdy, Stall, Magic Guard, Prankster) have no entry here; their
/// capability methods are checked by the owning component. Unaware, Sniper,
/// Heatproof, Poison Heal and Overcoat are likewise read inline where the
/// relevant rule lives.
pub static ABILITY_REGISTRY: [Hooks; AbilityId::COUNT] = {
    let mut r = [Hooks::NONE; AbilityId::COUNT];

    r[AbilityId::Levitate as usize] = Hooks {
        on_check_immunity: Some(levitate_immunity),
        ..Hooks::NONE
    };
    r[AbilityId::LightningRod as usize] = Hooks {
        on_check_immunity: Some(lightning_rod_immunity),
        on_redirect: Some(lightning_rod_redirect),
        ..Hooks::NONE
    };
    r[AbilityId::StormDrain as usize] = Hooks {
        on_check_immunity: Some(storm_drain_immunity),
        on_redirect: Some(storm_drain_redirect),
        ..Hooks::NONE
    };
    r[AbilityId::ShellArmor as usize] = Hooks {
        on_crit_immunity: Some(shell_armor_crit_immunity),
        ..Hooks::NONE
    };
    r[AbilityId::TintedLens as usize] = Hooks {
        on_modify_damage: Some(tinted_lens_damage),
        ..Hooks::NONE
    };
    r[AbilityId::Multiscale as usize] = Hooks {
        on_modify_damage: Some(multiscale_damage),
        ..Hooks::NONE
    };
    r[AbilityId::Technician as usize] = Hooks {
        on_modify_move: Some(technician_modify_move),
        ..Hooks::NONE
    };
    r[AbilityId::Guts as usize] = Hooks {
        on_modify_stat: Some(guts_modify_stat),
        ..Hooks::NONE
    };
    r[AbilityId::SwiftSwim as usize] = Hooks {
        on_modify_stat: Some(swift_swim_modify_stat),
        ..Hooks::NONE
    };
    r[AbilityId::Intimidate as usize] = Hooks {
        on_switch_in: Some(intimidate_switch_in),
        ..Hooks::NONE
    };
    r[AbilityId::Drizzle as usize] = Hooks {
        on_switch_in: Some(drizzle_switch_in),
        ..Hooks::NONE
    };
    r[AbilityId::Drought as usize] = Hooks {
        on_switch_in: Some(drought_switch_in),
        ..Hooks::NONE
    };
    r[AbilityId::SpeedBoost as usize] = Hooks {
        on_end_of_turn: Some(speed_boost_end_of_turn),
        ..Hooks::NONE
    };
    r[AbilityId::Moody as usize] = Hooks {
        on_end_of_turn: Some(moody_end_of_turn),
        ..Hooks::NONE
    };
    r[AbilityId::RoughSkin as usize] = Hooks {
        on_damaged_by_contact: Some(rough_skin_contact),
        ..Hooks::NONE
    };
    r[AbilityId::Mummy as usize] = Hooks {
        on_damaged_by_contact: Some(mummy_contact),
        ..Hooks::NONE
    };
    r[AbilityId::Defiant as usize] = Hooks {
        on_stat_lowered: Some(defiant_stat_lowered),
        ..Hooks::NONE
    };
    r[AbilityId::ClearBody as usize] = Hooks {
        on_modify_stat_stage: Some(clear_body_modify_stage),
        ..Hooks::NONE
    };
    r[AbilityId::Moxie as usize] = Hooks {
        on_after_ko: Some(moxie_after_ko),
        ..Hooks::NONE
    };
    r[AbilityId::MagicBounce as usize] = Hooks {
        on_bounce: Some(magic_bounce),
        ..Hooks::NONE
    };
    r[AbilityId::Forecast as usize] = Hooks {
        on_switch_in: Some(forecast_switch_in),
        on_field_effect_start: Some(forecast_field_start),
        ..Hooks::NONE
    };
    r[AbilityId::ZenMode as usize] = Hooks {
        on_end_of_turn: Some(zen_mode_end_of_turn),
        ..Hooks::NONE
    };

    r
};

fn levitate_immunity(_state: &BattleState, _owner: CombatantId, element: Element) -> bool {
    element == Element::Ground
}

fn lightning_rod_immunity(_state: &BattleState, _owner: CombatantId, element: Element) -> bool {
    element == Element::Electric
}

fn lightning_rod_redirect(_state: &BattleState, _owner: CombatantId, element: Element) -> bool {
    element == Element::Electric
}

fn storm_drain_immunity(_state: &BattleState, _owner: CombatantId, element: Element) -> bool {
    element == Element::Water
}

fn storm_drain_redirect(_state: &BattleState, _owner: CombatantId, element: Element) -> bool {
    element == Element::Water
}

fn shell_armor_crit_immunity(_state: &BattleState, _owner: CombatantId) -> bool {
    true
}

fn tinted_lens_damage(_state: &BattleState, _owner: CombatantId, ctx: &DamageHookCtx) -> f32 {
    if ctx.effectiveness > 0.0 && ctx.effectiveness < 1.0 {
        2.0
    } else {
        1.0
    }
}

fn multiscale_damage(state: &BattleState, owner: CombatantId, _ctx: &DamageHookCtx) -> f32 {
    match state.combatant(owner) {
        Some(c) if c.hp == c.max_hp => 0.5,
        _ => 1.0,
    }
}

fn technician_modify_move(_state: &BattleState, _owner: CombatantId, move_ctx: &mut MoveContext) {
    if move_ctx.power > 0 && move_ctx.power <= 60 {
        move_ctx.power = move_ctx.power * 3 / 2;
    }
}

fn guts_modify_stat(
    state: &BattleState,
    owner: CombatantId,
    stat: StatKind,
    value: u32,
) -> u32 {
    let statused = state
        .combatant(owner)
        .is_some_and(|c| c.status.is_some());
    if stat == StatKind::Attack && statused {
        value * 3 / 2
    } else {
        value
    }
}

fn swift_swim_modify_stat(
    state: &BattleState,
    _owner: CombatantId,
    stat: StatKind,
    value: u32,
) -> u32 {
    if stat == StatKind::Speed && state.field.weather_is(Weather::Rain) {
        value * 2
    } else {
        value
    }
}

fn intimidate_switch_in(state: &mut BattleState, owner: CombatantId, log: &mut EventLog) {
    log.narrate(format!("{}'s Intimidate cuts into the opposition!", state.display_name(owner)));
    for opponent in state.opponents_of(owner) {
        effects::change_stat_stage(state, opponent, StatKind::Attack, -1, Some(owner), log);
    }
}

fn drizzle_switch_in(state: &mut BattleState, _owner: CombatantId, log: &mut EventLog) {
    effects::set_weather(state, Weather::Rain, 5, log);
}

fn drought_switch_in(state: &mut BattleState, _owner: CombatantId, log: &mut EventLog) {
    effects::set_weather(state, Weather::Sun, 5, log);
}

fn speed_boost_end_of_turn(
    state: &mut BattleState,
    owner: CombatantId,
    _outcomes: &CombatantOutcomes,
    log: &mut EventLog,
) {
    effects::change_stat_stage(state, owner, StatKind::Speed, 1, None, log);
}

/// Erratic stat picks arrive pre-decided from the adjudicator
fn moody_end_of_turn(
    state: &mut BattleState,
    owner: CombatantId,
    outcomes: &CombatantOutcomes,
    log: &mut EventLog,
) {
    if let Some((raise, lower)) = outcomes.erratic_stats {
        effects::change_stat_stage(state, owner, raise, 2, None, log);
        effects::change_stat_stage(state, owner, lower, -1, None, log);
    }
}

fn rough_skin_contact(
    state: &mut BattleState,
    owner: CombatantId,
    attacker: CombatantId,
    log: &mut EventLog,
) {
    let owner_name = state.display_name(owner);
    let Some(c) = state.combatant_mut(attacker) else {
        return;
    };
    if !c.is_alive() {
        return;
    }
    let chip = (c.max_hp / 8).max(1);
    c.take_damage(chip);
    log.narrate(format!("{} was hurt by {owner_name}'s Rough Skin!", c.name.clone()));
}

fn mummy_contact(
    state: &mut BattleState,
    owner: CombatantId,
    attacker: CombatantId,
    log: &mut EventLog,
) {
    if super::has_ability(state, attacker, AbilityId::Mummy) {
        return;
    }
    let owner_name = state.display_name(owner);
    let Some(c) = state.combatant_mut(attacker) else {
        return;
    };
    if !c.is_alive() {
        return;
    }
    c.add_volatile(Volatile::tag(VolatileKind::AbilityReplaced(AbilityId::Mummy)));
    log.narrate(format!("{}'s ability became Mummy from touching {owner_name}!", c.name.clone()));
}

fn defiant_stat_lowered(
    state: &mut BattleState,
    owner: CombatantId,
    source: Option<CombatantId>,
    log: &mut EventLog,
) {
    // Only opposing interference sets it off
    let Some(source) = source else { return };
    if source.team == owner.team {
        return;
    }
    log.narrate(format!("{}'s Defiant sharply raised its Attack!", state.display_name(owner)));
    effects::change_stat_stage(state, owner, StatKind::Attack, 2, None, log);
}

fn clear_body_modify_stage(
    _state: &BattleState,
    owner: CombatantId,
    _stat: StatKind,
    delta: i8,
    source: Option<CombatantId>,
) -> i8 {
    // Blocks drops inflicted by anything other than the owner itself
    if delta < 0 && source != Some(owner) {
        0
    } else {
        delta
    }
}

fn moxie_after_ko(state: &mut BattleState, owner: CombatantId, log: &mut EventLog) {
    log.narrate(format!("{}'s Moxie boosted its Attack!", state.display_name(owner)));
    effects::change_stat_stage(state, owner, StatKind::Attack, 1, None, log);
}

fn magic_bounce(_state: &BattleState, _owner: CombatantId) -> bool {
    true
}

/// Element the forecast form takes under each weather
fn forecast_element(weather: Weather) -> Element {
    match weather {
        Weather::Sun => Element::Fire,
        Weather::Rain => Element::Water,
        Weather::Hail => Element::Ice,
        Weather::Sandstorm => Element::Rock,
    }
}

fn forecast_queue(state: &mut BattleState, owner: CombatantId, weather: Weather) {
    let Some(c) = state.combatant(owner) else { return };
    let form = FormData {
        name: format!("{} ({})", c.name, weather),
        base_stats: c.base_stats,
        elements: vec![forecast_element(weather)],
    };
    forms::queue(
        state,
        FormChange {
            combatant: owner,
            change: FormChangeKind::Assume(form),
        },
    );
}

fn forecast_switch_in(state: &mut BattleState, owner: CombatantId, _log: &mut EventLog) {
    if let Some((weather, _)) = state.field.weather {
        forecast_queue(state, owner, weather);
    }
}

fn forecast_field_start(
    state: &mut BattleState,
    owner: CombatantId,
    effect: FieldEffect,
    _log: &mut EventLog,
) {
    if let FieldEffect::Weather(weather) = effect {
        forecast_queue(state, owner, weather);
    }
}

/// Assumes the alternate form at half HP or below, reverts above
fn zen_mode_end_of_turn(
    state: &mut BattleState,
    owner: CombatantId,
    _outcomes: &CombatantOutcomes,
    _log: &mut EventLog,
) {
    let Some(c) = state.combatant(owner) else { return };
    if !c.is_alive() {
        return;
    }
    if c.hp <= c.max_hp / 2 && !c.transformed {
        if let Some(form) = c.alt_form.clone() {
            forms::queue(
                state,
                FormChange {
                    combatant: owner,
                    change: FormChangeKind::Assume(form),
                },
            );
        }
    } else if c.hp > c.max_hp / 2 && c.transformed {
        forms::queue(
            state,
            FormChange {
                combatant: owner,
                change: FormChangeKind::Revert,
            },
        );
    }
}

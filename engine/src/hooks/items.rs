//! Item hook implementations and registry

use fracas_data::{ItemId, MoveCategory, StatKind};

use super::{DamageHookCtx, Hooks, MoveContext};
use crate::effects;
use crate::log::EventLog;
use crate::turn::action::CombatantOutcomes;
use crate::types::{BattleState, CombatantId};

/// Item hook registry, indexed by `ItemId as usize`.
/// Marker items (Focus Sash, Lagging Tail, Quick Claw, Ring Target, Covert
/// Cloak, Heavy-Duty Boots, Big Root and the bag consumables) are checked
/// by capability method at their call sites.
pub static ITEM_REGISTRY: [Hooks; ItemId::COUNT] = {
    let mut r = [Hooks::NONE; ItemId::COUNT];

    r[ItemId::Leftovers as usize] = Hooks {
        on_end_of_turn: Some(leftovers_end_of_turn),
        ..Hooks::NONE
    };
    r[ItemId::LifeOrb as usize] = Hooks {
        on_modify_damage: Some(life_orb_damage),
        on_after_move: Some(life_orb_after_move),
        ..Hooks::NONE
    };
    r[ItemId::MuscleBand as usize] = Hooks {
        on_modify_move: Some(muscle_band_modify_move),
        ..Hooks::NONE
    };
    r[ItemId::ExpertBelt as usize] = Hooks {
        on_modify_damage: Some(expert_belt_damage),
        ..Hooks::NONE
    };
    r[ItemId::OccaBerry as usize] = Hooks {
        on_modify_damage: Some(resist_berry_damage),
        ..Hooks::NONE
    };
    r[ItemId::ChopleBerry as usize] = Hooks {
        on_modify_damage: Some(resist_berry_damage),
        ..Hooks::NONE
    };
    r[ItemId::ChoiceBand as usize] = Hooks {
        on_modify_stat: Some(choice_band_stat),
        ..Hooks::NONE
    };
    r[ItemId::ChoiceSpecs as usize] = Hooks {
        on_modify_stat: Some(choice_specs_stat),
        ..Hooks::NONE
    };
    r[ItemId::ChoiceScarf as usize] = Hooks {
        on_modify_stat: Some(choice_scarf_stat),
        ..Hooks::NONE
    };
    r[ItemId::SitrusBerry as usize] = Hooks {
        on_take_damage: Some(sitrus_berry_take_damage),
        ..Hooks::NONE
    };
    r[ItemId::EjectButton as usize] = Hooks {
        on_take_damage: Some(eject_button_take_damage),
        ..Hooks::NONE
    };
    r[ItemId::BlunderPolicy as usize] = Hooks {
        on_miss: Some(blunder_policy_miss),
        ..Hooks::NONE
    };
    r[ItemId::BoosterEnergy as usize] = Hooks {
        on_switch_in: Some(booster_energy_switch_in),
        ..Hooks::NONE
    };

    r
};

fn leftovers_end_of_turn(
    state: &mut BattleState,
    owner: CombatantId,
    _outcomes: &CombatantOutcomes,
    log: &mut EventLog,
) {
    let Some(c) = state.combatant_mut(owner) else { return };
    if !c.is_alive() || c.hp == c.max_hp {
        return;
    }
    let amount = (c.max_hp / 16).max(1);
    c.heal(amount);
    log.narrate(format!("{} restored a little HP with its Leftovers.", c.name.clone()));
}

fn life_orb_damage(_state: &BattleState, owner: CombatantId, ctx: &DamageHookCtx) -> f32 {
    if owner == ctx.attacker {
        1.3
    } else {
        1.0
    }
}

fn life_orb_after_move(
    state: &mut BattleState,
    owner: CombatantId,
    _move_ctx: &MoveContext,
    log: &mut EventLog,
) {
    let Some(c) = state.combatant_mut(owner) else { return };
    if !c.is_alive() || c.scratch.damage_dealt == 0 {
        return;
    }
    let recoil = (c.max_hp / 10).max(1);
    c.take_damage(recoil);
    log.narrate(format!("{} lost some HP to its Life Orb!", c.name.clone()));
}

fn muscle_band_modify_move(
    _state: &BattleState,
    _owner: CombatantId,
    move_ctx: &mut MoveContext,
) {
    if move_ctx.category == MoveCategory::Physical && move_ctx.power > 0 {
        move_ctx.power = move_ctx.power * 11 / 10;
    }
}

fn expert_belt_damage(_state: &BattleState, owner: CombatantId, ctx: &DamageHookCtx) -> f32 {
    if owner == ctx.attacker && ctx.effectiveness > 1.0 {
        1.2
    } else {
        1.0
    }
}

/// Shared by every resistance berry; the matching element comes from the
/// holder's actual item. Consumption happens in the per-hit loop after the
/// damage is applied.
fn resist_berry_damage(state: &BattleState, owner: CombatantId, ctx: &DamageHookCtx) -> f32 {
    if owner != ctx.defender || ctx.effectiveness <= 1.0 {
        return 1.0;
    }
    let guarded = state
        .held_item(owner)
        .and_then(|item| item.resist_berry_element());
    if guarded == Some(ctx.move_ctx.element) {
        0.5
    } else {
        1.0
    }
}

fn choice_band_stat(_state: &BattleState, _owner: CombatantId, stat: StatKind, value: u32) -> u32 {
    if stat == StatKind::Attack {
        value * 3 / 2
    } else {
        value
    }
}

fn choice_specs_stat(_state: &BattleState, _owner: CombatantId, stat: StatKind, value: u32) -> u32 {
    if stat == StatKind::SpAttack {
        value * 3 / 2
    } else {
        value
    }
}

fn choice_scarf_stat(_state: &BattleState, _owner: CombatantId, stat: StatKind, value: u32) -> u32 {
    if stat == StatKind::Speed {
        value * 3 / 2
    } else {
        value
    }
}

fn sitrus_berry_take_damage(
    state: &mut BattleState,
    owner: CombatantId,
    _applied: u32,
    log: &mut EventLog,
) {
    let Some(c) = state.combatant(owner) else { return };
    if !c.is_alive() || c.hp > c.max_hp / 2 {
        return;
    }
    effects::consume_held_item(state, owner, log);
    let Some(c) = state.combatant_mut(owner) else { return };
    let amount = c.max_hp / 4;
    c.heal(amount);
    log.narrate(format!("{} ate its Sitrus Berry and recovered HP!", c.name.clone()));
}

fn eject_button_take_damage(
    state: &mut BattleState,
    owner: CombatantId,
    _applied: u32,
    log: &mut EventLog,
) {
    let alive = state.combatant(owner).is_some_and(|c| c.is_alive());
    if !alive {
        return;
    }
    effects::consume_held_item(state, owner, log);
    state.ejects.push(owner);
    log.narrate(format!("{} is switched out by its Eject Button!", state.display_name(owner)));
}

fn blunder_policy_miss(
    state: &mut BattleState,
    owner: CombatantId,
    _move_ctx: &MoveContext,
    log: &mut EventLog,
) {
    effects::consume_held_item(state, owner, log);
    log.narrate(format!("{}'s Blunder Policy kicked in!", state.display_name(owner)));
    effects::change_stat_stage(state, owner, StatKind::Speed, 2, None, log);
}

fn booster_energy_switch_in(state: &mut BattleState, owner: CombatantId, log: &mut EventLog) {
    effects::consume_held_item(state, owner, log);
    let Some(c) = state.combatant_mut(owner) else { return };
    let stat = c.stats.highest();
    c.scratch.stat_override = Some((stat, 1.3));
    log.narrate(format!("{}'s Booster Energy surged its {}!", c.name.clone(), stat));
}

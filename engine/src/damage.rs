//! Single-hit damage calculator
//!
//! The nine-step order here is a contract, not a convenience: ability hooks
//! run before item hooks at both the move-modifier stage and the
//! final-multiplier stage, and reordering them changes output whenever a
//! combatant carries both.

use fracas_data::{AbilityId, MoveCategory, RoomKind, StatKind, Status};
use serde::{Deserialize, Serialize};

use crate::formula;
use crate::hooks::{self, DamageHookCtx, MoveContext};
use crate::types::{BattleState, Combatant, CombatantId};

/// Multiplier record for one computed hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    /// Base damage before any multiplier
    pub base: u32,
    pub stab: f32,
    pub crit: f32,
    pub effectiveness: f32,
    /// Product of ability and item final multipliers
    pub modifier: f32,
}

impl Default for DamageBreakdown {
    fn default() -> Self {
        Self {
            base: 0,
            stab: 1.0,
            crit: 1.0,
            effectiveness: 1.0,
            modifier: 1.0,
        }
    }
}

/// Result of one hit's damage computation. Damage here is the computed
/// value; application separately caps it at the defender's remaining HP.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u32,
    pub effectiveness: f32,
    pub crit: bool,
    pub breakdown: DamageBreakdown,
}

impl DamageOutcome {
    fn immune() -> Self {
        Self {
            damage: 0,
            effectiveness: 0.0,
            crit: false,
            breakdown: DamageBreakdown {
                effectiveness: 0.0,
                ..DamageBreakdown::default()
            },
        }
    }

    fn inert() -> Self {
        Self {
            damage: 0,
            effectiveness: 1.0,
            crit: false,
            breakdown: DamageBreakdown::default(),
        }
    }
}

/// Compute one hit. `move_ctx` is the action's working copy; ability and
/// item move-modifier hooks mutate it in place.
pub fn compute_damage(
    state: &BattleState,
    attacker: CombatantId,
    defender: CombatantId,
    move_ctx: &mut MoveContext,
    crit: bool,
) -> DamageOutcome {
    let (Some(atk_c), Some(def_c)) = (state.combatant(attacker), state.combatant(defender)) else {
        return DamageOutcome::inert();
    };

    let attacker_ability = hooks::effective_ability(state, attacker);
    let bypass = attacker_ability.is_some_and(|a| a.bypasses_defender_ability());
    // Under a bypass ability the defender's ability never enters the
    // computation at all
    let defender_ability = if bypass {
        None
    } else {
        hooks::effective_ability(state, defender)
    };

    // (1) ability-based immunity
    if let Some(hook) = defender_ability
        .map(hooks::ability_hooks)
        .and_then(|h| h.on_check_immunity)
    {
        if hook(state, defender, move_ctx.element) {
            return DamageOutcome::immune();
        }
    }

    // (2) matchup matrix over every defending element
    let mut effectiveness = move_ctx.element.matchup_all(&def_c.elements);
    if effectiveness == 0.0 {
        if state
            .held_item(defender)
            .is_some_and(|item| item.negates_immunities())
        {
            effectiveness = 1.0;
        } else {
            return DamageOutcome::immune();
        }
    }

    // (3) a zero-power move deals nothing, neutrally
    if move_ctx.power == 0 {
        return DamageOutcome::inert();
    }

    // (4) attack and defense with stage rules
    let physical = move_ctx.category == MoveCategory::Physical;
    let atk_kind = if physical {
        StatKind::Attack
    } else {
        StatKind::SpAttack
    };
    let def_kind = match (physical, state.field.room_active(RoomKind::DefenseSwap)) {
        (true, false) | (false, true) => StatKind::Defense,
        (false, false) | (true, true) => StatKind::SpDefense,
    };

    let mut atk_stage = atk_c.stages.get(atk_kind);
    if crit && atk_stage < 0 {
        atk_stage = 0;
    }
    // Unaware on the defender discards the attacker's stages, and vice versa
    if defender_ability == Some(AbilityId::Unaware) {
        atk_stage = 0;
    }
    let mut def_stage = def_c.stages.get(def_kind);
    if crit && def_stage > 0 {
        def_stage = 0;
    }
    if attacker_ability == Some(AbilityId::Unaware) {
        def_stage = 0;
    }

    let mut atk = formula::apply_stage(atk_c.stats.get(atk_kind), atk_stage);
    let mut def = formula::apply_stage(def_c.stats.get(def_kind), def_stage);

    // stat hooks, ability before item, each side
    if let Some(hook) = attacker_ability
        .map(hooks::ability_hooks)
        .and_then(|h| h.on_modify_stat)
    {
        atk = hook(state, attacker, atk_kind, atk);
    }
    if let Some(hook) = hooks::held_item_hooks(state, attacker).and_then(|h| h.on_modify_stat) {
        atk = hook(state, attacker, atk_kind, atk);
    }
    if let Some(hook) = defender_ability
        .map(hooks::ability_hooks)
        .and_then(|h| h.on_modify_stat)
    {
        def = hook(state, defender, def_kind, def);
    }
    if let Some(hook) = hooks::held_item_hooks(state, defender).and_then(|h| h.on_modify_stat) {
        def = hook(state, defender, def_kind, def);
    }

    // (5) booster-style one-time overrides
    if let Some((kind, mult)) = atk_c.scratch.stat_override {
        if kind == atk_kind {
            atk = (atk as f32 * mult).floor() as u32;
        }
    }
    if let Some((kind, mult)) = def_c.scratch.stat_override {
        if kind == def_kind {
            def = (def as f32 * mult).floor() as u32;
        }
    }

    // (6) move modifiers: ability writes the move before items read it
    if let Some(hook) = attacker_ability
        .map(hooks::ability_hooks)
        .and_then(|h| h.on_modify_move)
    {
        hook(state, attacker, move_ctx);
    }
    if let Some(hook) = hooks::held_item_hooks(state, attacker).and_then(|h| h.on_modify_move) {
        hook(state, attacker, move_ctx);
    }

    // (7) same-element bonus, crit multiplier, effectiveness
    let stab = if atk_c.has_element(move_ctx.element) {
        1.5
    } else {
        1.0
    };
    let crit_mult = if crit {
        if attacker_ability == Some(AbilityId::Sniper) {
            2.25
        } else {
            1.5
        }
    } else {
        1.0
    };

    // (8) final multipliers: ability before item; the defender side is
    // already nulled under a bypass ability
    let hook_ctx = DamageHookCtx {
        attacker,
        defender,
        move_ctx: &*move_ctx,
        effectiveness,
        crit,
    };
    let mut modifier = 1.0f32;
    if let Some(hook) = attacker_ability
        .map(hooks::ability_hooks)
        .and_then(|h| h.on_modify_damage)
    {
        modifier *= hook(state, attacker, &hook_ctx);
    }
    if let Some(hook) = defender_ability
        .map(hooks::ability_hooks)
        .and_then(|h| h.on_modify_damage)
    {
        modifier *= hook(state, defender, &hook_ctx);
    }
    if let Some(hook) = hooks::held_item_hooks(state, attacker).and_then(|h| h.on_modify_damage) {
        modifier *= hook(state, attacker, &hook_ctx);
    }
    if let Some(hook) = hooks::held_item_hooks(state, defender).and_then(|h| h.on_modify_damage) {
        modifier *= hook(state, defender, &hook_ctx);
    }

    // (9) base formula, one floor of the multiplier product, burn, floor of 1
    let base = formula::base_damage(atk_c.level, move_ctx.power, atk, def);
    let total = stab * crit_mult * effectiveness * modifier;
    let mut damage = (base as f32 * total).floor() as u32;

    if atk_c.status == Some(Status::Burn) && physical && attacker_ability != Some(AbilityId::Guts) {
        damage /= 2;
    }
    if damage == 0 {
        damage = 1;
    }

    DamageOutcome {
        damage,
        effectiveness,
        crit,
        breakdown: DamageBreakdown {
            base,
            stab,
            crit: crit_mult,
            effectiveness,
            modifier,
        },
    }
}

/// Damage a confused combatant deals itself: a fixed 40-power typeless
/// physical hit against its own defense, with no other modifiers
pub fn confusion_self_damage(combatant: &Combatant) -> u32 {
    let atk = formula::apply_stage(combatant.stats.attack, combatant.stages.attack);
    let def = formula::apply_stage(combatant.stats.defense, combatant.stages.defense);
    formula::base_damage(combatant.level, 40, atk, def).max(1)
}

//! Hook dispatch system
//!
//! Abilities and items declare behavior as optional callbacks for named
//! lifecycle points. The registries are plain static arrays indexed by the
//! closed identifier enums, so adding a variant without wiring its hooks is
//! a compile-time-visible gap rather than a silent string miss.
//!
//! A handful of abilities and items are *markers* instead: their effect
//! needs cross-cutting knowledge (suppressing everyone else's ability,
//! negating redirection, surviving lethal hits), so the owning component
//! checks a capability method on the identifier enum directly. Those
//! methods are documented in `fracas-data`.

pub mod abilities;
pub mod items;

use fracas_data::{
    AbilityId, Element, ItemId, MoveCategory, MoveData, RoomKind, StatKind, Terrain, VolatileKind,
    Weather,
};

use crate::log::EventLog;
use crate::turn::action::CombatantOutcomes;
use crate::types::{BattleState, CombatantId};

pub use abilities::ABILITY_REGISTRY;
pub use items::ITEM_REGISTRY;

/// Working copy of a move for one action. Ability hooks modify it in place
/// before item hooks read it; the original move slot is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveContext {
    pub name: String,
    pub element: Element,
    pub category: MoveCategory,
    pub power: u16,
    pub contact: bool,
    pub priority: i8,
}

impl From<&MoveData> for MoveContext {
    fn from(data: &MoveData) -> Self {
        Self {
            name: data.name.clone(),
            element: data.element,
            category: data.category,
            power: data.power,
            contact: data.contact,
            priority: data.priority,
        }
    }
}

/// A field effect coming up, for on-field-effect-start hooks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEffect {
    Weather(Weather),
    Terrain(Terrain),
    Room(RoomKind),
}

/// Context for damage-multiplier hooks
#[derive(Debug)]
pub struct DamageHookCtx<'a> {
    pub attacker: CombatantId,
    pub defender: CombatantId,
    pub move_ctx: &'a MoveContext,
    pub effectiveness: f32,
    pub crit: bool,
}

pub type SwitchInHook = fn(&mut BattleState, CombatantId, &mut EventLog);
pub type SwitchOutHook = fn(&mut BattleState, CombatantId, &mut EventLog);
/// Returns false to cancel the action entirely
pub type BeforeMoveHook = fn(&mut BattleState, CombatantId, &MoveContext, &mut EventLog) -> bool;
pub type ModifyMoveHook = fn(&BattleState, CombatantId, &mut MoveContext);
pub type ModifyStatHook = fn(&BattleState, CombatantId, StatKind, u32) -> u32;
/// Returns a damage multiplier; 1.0 for no change
pub type ModifyDamageHook = fn(&BattleState, CombatantId, &DamageHookCtx) -> f32;
/// Returns true if the owner is immune to the incoming element
pub type CheckImmunityHook = fn(&BattleState, CombatantId, Element) -> bool;
/// Invoked after damage is applied to the owner
pub type TakeDamageHook = fn(&mut BattleState, CombatantId, u32, &mut EventLog);
/// Owner was struck by a contact move; second id is the attacker
pub type ContactHook = fn(&mut BattleState, CombatantId, CombatantId, &mut EventLog);
pub type AfterMoveHook = fn(&mut BattleState, CombatantId, &MoveContext, &mut EventLog);
/// Owner dealt damage; ids are attacker, defender
pub type AfterDamageDealtHook = fn(&mut BattleState, CombatantId, CombatantId, u32, &mut EventLog);
pub type EndOfTurnHook = fn(&mut BattleState, CombatantId, &CombatantOutcomes, &mut EventLog);
/// One of the owner's stages was lowered; second id is the source
pub type StatLoweredHook = fn(&mut BattleState, CombatantId, Option<CombatantId>, &mut EventLog);
pub type CritImmunityHook = fn(&BattleState, CombatantId) -> bool;
/// Returns true if the owner pulls single-target hits of this element
pub type RedirectHook = fn(&BattleState, CombatantId, Element) -> bool;
/// May adjust an incoming stage delta; returns the delta to apply
pub type ModifyStatStageHook =
    fn(&BattleState, CombatantId, StatKind, i8, Option<CombatantId>) -> i8;
pub type MissHook = fn(&mut BattleState, CombatantId, &MoveContext, &mut EventLog);
pub type FieldEffectStartHook = fn(&mut BattleState, CombatantId, FieldEffect, &mut EventLog);
/// The owner knocked out its target
pub type AfterKoHook = fn(&mut BattleState, CombatantId, &mut EventLog);
/// Returns true if the owner reflects status moves back at their user
pub type BounceHook = fn(&BattleState, CombatantId) -> bool;

/// Lifecycle callbacks an ability or item may define
#[derive(Clone, Copy)]
pub struct Hooks {
    pub on_switch_in: Option<SwitchInHook>,
    pub on_switch_out: Option<SwitchOutHook>,
    pub on_before_move: Option<BeforeMoveHook>,
    pub on_modify_move: Option<ModifyMoveHook>,
    pub on_modify_stat: Option<ModifyStatHook>,
    pub on_modify_damage: Option<ModifyDamageHook>,
    pub on_check_immunity: Option<CheckImmunityHook>,
    pub on_take_damage: Option<TakeDamageHook>,
    pub on_damaged_by_contact: Option<ContactHook>,
    pub on_after_move: Option<AfterMoveHook>,
    pub on_after_damage_dealt: Option<AfterDamageDealtHook>,
    pub on_end_of_turn: Option<EndOfTurnHook>,
    pub on_stat_lowered: Option<StatLoweredHook>,
    pub on_crit_immunity: Option<CritImmunityHook>,
    pub on_redirect: Option<RedirectHook>,
    pub on_modify_stat_stage: Option<ModifyStatStageHook>,
    pub on_miss: Option<MissHook>,
    pub on_field_effect_start: Option<FieldEffectStartHook>,
    pub on_after_ko: Option<AfterKoHook>,
    pub on_bounce: Option<BounceHook>,
}

impl Hooks {
    /// No callbacks at all
    pub const NONE: Self = Self {
        on_switch_in: None,
        on_switch_out: None,
        on_before_move: None,
        on_modify_move: None,
        on_modify_stat: None,
        on_modify_damage: None,
        on_check_immunity: None,
        on_take_damage: None,
        on_damaged_by_contact: None,
        on_after_move: None,
        on_after_damage_dealt: None,
        on_end_of_turn: None,
        on_stat_lowered: None,
        on_crit_immunity: None,
        on_redirect: None,
        on_modify_stat_stage: None,
        on_miss: None,
        on_field_effect_start: None,
        on_after_ko: None,
        on_bounce: None,
    };
}

/// Hook table for an ability id
pub fn ability_hooks(id: AbilityId) -> &'static Hooks {
    &ABILITY_REGISTRY[id as usize]
}

/// Hook table for an item id
pub fn item_hooks(id: ItemId) -> &'static Hooks {
    &ITEM_REGISTRY[id as usize]
}

/// Resolve the ability actually active for a combatant.
///
/// Consulted at every hook site, not just by the ability owner: the
/// resolution order is the global suppression effect (a neutralizing-gas
/// holder anywhere on the field), then per-combatant replacement and
/// suppression volatiles, then the combatant's own ability.
pub fn effective_ability(state: &BattleState, id: CombatantId) -> Option<AbilityId> {
    let combatant = state.combatant(id)?;

    let own = own_resolved_ability(combatant);
    // The gas source keeps its own ability; everyone else loses theirs
    if own == Some(AbilityId::NeutralizingGas) {
        return own;
    }
    if suppression_active_besides(state, id) {
        return None;
    }
    own
}

/// A combatant's ability after its own replacement/suppression volatiles
fn own_resolved_ability(combatant: &crate::types::Combatant) -> Option<AbilityId> {
    for volatile in &combatant.volatiles {
        match volatile.kind {
            VolatileKind::AbilitySuppressed => return None,
            VolatileKind::AbilityReplaced(ability) => return Some(ability),
            _ => {}
        }
    }
    combatant.ability
}

/// Whether any *other* active combatant projects global ability suppression
fn suppression_active_besides(state: &BattleState, id: CombatantId) -> bool {
    state.active_ids().into_iter().any(|other| {
        other != id
            && state
                .combatant(other)
                .filter(|c| c.is_alive())
                .and_then(own_resolved_ability)
                .is_some_and(|a| a.suppresses_other_abilities())
    })
}

/// Whether a combatant's effective ability is exactly `ability`
pub fn has_ability(state: &BattleState, id: CombatantId, ability: AbilityId) -> bool {
    effective_ability(state, id) == Some(ability)
}

/// Effective ability's hook table, if any
pub fn effective_ability_hooks(state: &BattleState, id: CombatantId) -> Option<&'static Hooks> {
    effective_ability(state, id).map(ability_hooks)
}

/// Held item's hook table; the item-suppression room hides it
pub fn held_item_hooks(state: &BattleState, id: CombatantId) -> Option<&'static Hooks> {
    state.held_item(id).map(item_hooks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Combatant, Team, Volatile};
    use fracas_data::BaseStats;

    fn state_with_abilities(a: Option<AbilityId>, b: Option<AbilityId>) -> BattleState {
        let base = BaseStats::new(60, 80, 70, 60, 70, 90);
        let mut teams = Vec::new();
        for (name, ability) in [("Reds", a), ("Blues", b)] {
            let mut c = Combatant::new(name, 50, base, vec![Element::Normal]);
            c.ability = ability;
            let mut team = Team::new(name, vec![c]);
            team.set_active(0, Some(0));
            teams.push(team);
        }
        BattleState::new(teams)
    }

    #[test]
    fn test_effective_ability_own() {
        let state = state_with_abilities(Some(AbilityId::Levitate), None);
        assert_eq!(
            effective_ability(&state, CombatantId::new(0, 0)),
            Some(AbilityId::Levitate)
        );
        assert_eq!(effective_ability(&state, CombatantId::new(1, 0)), None);
    }

    #[test]
    fn test_suppression_volatile() {
        let mut state = state_with_abilities(Some(AbilityId::Levitate), None);
        let id = CombatantId::new(0, 0);
        state
            .combatant_mut(id)
            .unwrap()
            .add_volatile(Volatile::tag(VolatileKind::AbilitySuppressed));
        assert_eq!(effective_ability(&state, id), None);
    }

    #[test]
    fn test_replacement_volatile() {
        let mut state = state_with_abilities(Some(AbilityId::Levitate), None);
        let id = CombatantId::new(0, 0);
        state.combatant_mut(id).unwrap().add_volatile(Volatile::tag(
            VolatileKind::AbilityReplaced(AbilityId::Mummy),
        ));
        assert_eq!(effective_ability(&state, id), Some(AbilityId::Mummy));
    }

    #[test]
    fn test_global_suppression() {
        let state = state_with_abilities(
            Some(AbilityId::Levitate),
            Some(AbilityId::NeutralizingGas),
        );
        // The opposing gas wipes out Levitate, but the gas holder keeps its own
        assert_eq!(effective_ability(&state, CombatantId::new(0, 0)), None);
        assert_eq!(
            effective_ability(&state, CombatantId::new(1, 0)),
            Some(AbilityId::NeutralizingGas)
        );
    }

    #[test]
    fn test_suppressed_gas_does_not_project() {
        let mut state = state_with_abilities(
            Some(AbilityId::Levitate),
            Some(AbilityId::NeutralizingGas),
        );
        state
            .combatant_mut(CombatantId::new(1, 0))
            .unwrap()
            .add_volatile(Volatile::tag(VolatileKind::AbilitySuppressed));
        assert_eq!(
            effective_ability(&state, CombatantId::new(0, 0)),
            Some(AbilityId::Levitate)
        );
    }

    #[test]
    fn test_registries_cover_every_id() {
        // Indexing by any variant must stay in bounds
        assert_eq!(ABILITY_REGISTRY.len(), AbilityId::COUNT);
        assert_eq!(ITEM_REGISTRY.len(), ItemId::COUNT);
        let _ = ability_hooks(AbilityId::Guts);
        let _ = item_hooks(ItemId::FullHeal);
    }
}

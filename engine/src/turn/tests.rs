//! End-to-end turn-resolution scenarios

use fracas_data::{
    AbilityId, BaseStats, EffectTarget, Element, HazardKind, ItemId, MoveCategory, MoveData,
    MoveEffect, RoomKind, SecondaryEffect, SecondaryKind, Status, VolatileKind,
};

use super::action::{Action, ActionSet, ChanceOutcomes, CombatantOutcomes, HitRecord};
use super::{resolve_replacement, resolve_turn, start_battle};
use crate::error::EngineError;
use crate::formula;
use crate::log::{EventLog, LogEntry};
use crate::types::{BattleState, Combatant, CombatantId, MoveSlot, Phase, Team};

const RED0: CombatantId = CombatantId { team: 0, index: 0 };
const BLUE0: CombatantId = CombatantId { team: 1, index: 0 };
const BLUE1: CombatantId = CombatantId { team: 1, index: 1 };

fn standard(name: &str) -> Combatant {
    Combatant::new(
        name,
        50,
        BaseStats::new(80, 100, 80, 90, 80, 95),
        vec![Element::Normal],
    )
}

fn with_move(mut c: Combatant, data: MoveData) -> Combatant {
    c.moves.push(MoveSlot::new(data));
    c
}

fn lunge() -> MoveData {
    MoveData::new("Lunge", Element::Normal, MoveCategory::Physical, 80)
}

fn idle() -> MoveData {
    // A status move with no effect and no secondary: resolves to nothing
    let mut data = MoveData::new("Focus", Element::Normal, MoveCategory::Status, 0);
    data.contact = false;
    data
}

fn duel(red: Vec<Combatant>, blue: Vec<Combatant>) -> BattleState {
    let mut red_team = Team::new("Reds", red);
    red_team.set_active(0, Some(0));
    let mut blue_team = Team::new("Blues", blue);
    blue_team.set_active(0, Some(0));
    BattleState::new(vec![red_team, blue_team])
}

fn fight(move_index: usize, target: CombatantId) -> Action {
    Action::Fight {
        move_index,
        hits: vec![HitRecord::plain(target)],
        apply_effect: false,
    }
}

fn fight_with_effect(move_index: usize, target: CombatantId) -> Action {
    Action::Fight {
        move_index,
        hits: vec![HitRecord::plain(target)],
        apply_effect: true,
    }
}

fn attack_entries(log: &EventLog) -> Vec<&LogEntry> {
    log.entries()
        .iter()
        .filter(|e| matches!(e, LogEntry::Attack { .. }))
        .collect()
}

#[test]
fn test_missing_action_is_an_error() {
    let mut state = duel(
        vec![with_move(standard("Ash"), lunge())],
        vec![with_move(standard("Cove"), lunge())],
    );
    state.turn = 1;
    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));

    let err = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap_err();
    assert!(matches!(err, EngineError::MissingAction(_)));
}

#[test]
fn test_wrong_phase_is_an_error() {
    let mut state = duel(
        vec![with_move(standard("Ash"), lunge())],
        vec![with_move(standard("Cove"), lunge())],
    );
    state.phase = Phase::GameOver { winner: None };
    let err = resolve_turn(&mut state, &ActionSet::new(), &ChanceOutcomes::new()).unwrap_err();
    assert!(matches!(err, EngineError::WrongPhase { .. }));
}

#[test]
fn test_basic_exchange_damages_both() {
    let mut state = duel(
        vec![with_move(standard("Ash"), lunge())],
        vec![with_move(standard("Cove"), lunge())],
    );
    state.turn = 1;
    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));

    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    assert_eq!(attack_entries(&log).len(), 2);
    assert!(state.combatant(RED0).unwrap().hp < state.combatant(RED0).unwrap().max_hp);
    assert!(state.combatant(BLUE0).unwrap().hp < state.combatant(BLUE0).unwrap().max_hp);
    assert_eq!(state.turn, 2);
    assert_eq!(state.phase, Phase::ActionSelection);
}

#[test]
fn test_ground_move_has_no_effect_on_flier() {
    let haxorus = with_move(
        Combatant::new(
            "Haxorus",
            50,
            BaseStats::new(76, 147, 90, 60, 70, 97),
            vec![Element::Dragon],
        ),
        MoveData::new("Quake", Element::Ground, MoveCategory::Physical, 100),
    );
    let charizard = with_move(
        Combatant::new(
            "Charizard",
            50,
            BaseStats::new(78, 84, 78, 109, 85, 100),
            vec![Element::Fire, Element::Flying],
        ),
        idle(),
    );
    let mut state = duel(vec![haxorus], vec![charizard]);
    state.turn = 1;
    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));

    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    let max_hp = state.combatant(BLUE0).unwrap().max_hp;
    assert_eq!(state.combatant(BLUE0).unwrap().hp, max_hp);
    assert!(log.mentions("no effect"));
    let Some(LogEntry::Attack { damage, effectiveness, .. }) = attack_entries(&log).first() else {
        panic!("expected an attack entry");
    };
    assert_eq!(*damage, 0);
    assert_eq!(*effectiveness, 0.0);
}

#[test]
fn test_multi_hit_distribution_across_two_targets() {
    let mut fury = MoveData::new("Fury Swipes", Element::Normal, MoveCategory::Physical, 18);
    fury.multi_hit = true;
    let red = with_move(standard("Ash"), fury);

    let mut blue_team = Team::new(
        "Blues",
        vec![standard("Cove"), standard("Dune")],
    );
    blue_team.set_active_slots(2);
    blue_team.set_active(0, Some(0));
    blue_team.set_active(1, Some(1));
    let mut red_team = Team::new("Reds", vec![red]);
    red_team.set_active(0, Some(0));
    let mut state = BattleState::new(vec![red_team, blue_team]);
    state.turn = 1;

    // 3 hits on Cove, 2 on Dune, decided externally
    let hits = vec![
        HitRecord::plain(BLUE0),
        HitRecord::plain(BLUE1),
        HitRecord::plain(BLUE0),
        HitRecord::plain(BLUE0),
        HitRecord::plain(BLUE1),
    ];
    let mut actions = ActionSet::new();
    actions.submit(
        RED0,
        Action::Fight {
            move_index: 0,
            hits,
            apply_effect: false,
        },
    );
    for id in [BLUE0, BLUE1] {
        let c = state.combatant_mut(id).unwrap();
        c.moves.push(MoveSlot::new(idle()));
        actions.submit(id, fight(0, RED0));
    }

    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    assert_eq!(log.attacks_against("Cove").count(), 3);
    assert_eq!(log.attacks_against("Dune").count(), 2);
}

#[test]
fn test_reversal_room_never_reverses_priority_tiers() {
    let mut jab = MoveData::new("First Jab", Element::Normal, MoveCategory::Physical, 40);
    jab.priority = 1;
    // Red is much slower but carries the priority move
    let mut red = with_move(standard("Ash"), jab);
    red.stats.speed = 40;
    let mut blue = with_move(standard("Cove"), lunge());
    blue.stats.speed = 160;

    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;
    state.field.rooms.set(RoomKind::TurnReversal, 5);

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));

    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();
    let entries = attack_entries(&log);
    let LogEntry::Attack { attacker, .. } = entries[0] else {
        panic!("expected an attack entry");
    };
    assert_eq!(attacker, "Ash");
}

#[test]
fn test_survive_lethal_item_leaves_one_hp_and_consumes() {
    let nuke = MoveData::new("Meteor", Element::Normal, MoveCategory::Physical, 250);
    let red = with_move(
        Combatant::new(
            "Ash",
            50,
            BaseStats::new(80, 200, 80, 90, 80, 120),
            vec![Element::Normal],
        ),
        nuke,
    );
    let mut blue = with_move(standard("Cove"), idle());
    blue.item = Some(ItemId::FocusSash);
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    let survivor = state.combatant(BLUE0).unwrap();
    assert_eq!(survivor.hp, 1);
    assert!(survivor.item.is_none());
    assert_eq!(survivor.scratch.consumed_item, Some(ItemId::FocusSash));
    assert!(log.mentions("hung on"));
}

#[test]
fn test_survive_lethal_item_requires_full_hp() {
    let nuke = MoveData::new("Meteor", Element::Normal, MoveCategory::Physical, 250);
    let red = with_move(
        Combatant::new(
            "Ash",
            50,
            BaseStats::new(80, 200, 80, 90, 80, 120),
            vec![Element::Normal],
        ),
        nuke,
    );
    let mut blue = with_move(standard("Cove"), idle());
    blue.item = Some(ItemId::FocusSash);
    blue.hp -= 1;
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    let fallen = state.combatant(BLUE0).unwrap();
    assert!(!fallen.is_alive());
    // The sash only spends itself when it actually held the line
    assert_eq!(fallen.item, Some(ItemId::FocusSash));
}

#[test]
fn test_robust_ability_preempts_the_item() {
    let nuke = MoveData::new("Meteor", Element::Normal, MoveCategory::Physical, 250);
    let red = with_move(
        Combatant::new(
            "Ash",
            50,
            BaseStats::new(80, 200, 80, 90, 80, 120),
            vec![Element::Normal],
        ),
        nuke,
    );
    let mut blue = with_move(standard("Cove"), idle());
    blue.ability = Some(AbilityId::Sturdy);
    blue.item = Some(ItemId::FocusSash);
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    // Chosen precedence: the ability holds first and the sash stays
    let survivor = state.combatant(BLUE0).unwrap();
    assert_eq!(survivor.hp, 1);
    assert_eq!(survivor.item, Some(ItemId::FocusSash));
}

#[test]
fn test_life_orb_boost_and_fixed_recoil() {
    let mut red = with_move(standard("Ash"), lunge());
    red.item = Some(ItemId::LifeOrb);
    let blue = with_move(standard("Cove"), idle());
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    let Some(LogEntry::Attack { breakdown, .. }) = attack_entries(&log).first() else {
        panic!("expected an attack entry");
    };
    assert_eq!(breakdown.modifier, 1.3);

    let orb_holder = state.combatant(RED0).unwrap();
    let recoil = (orb_holder.max_hp / 10).max(1);
    assert_eq!(orb_holder.hp, orb_holder.max_hp - recoil);
    assert!(log.mentions("Life Orb"));
}

#[test]
fn test_leech_seed_waits_one_turn_then_transfers() {
    let mut seed = MoveData::new("Sap Seed", Element::Grass, MoveCategory::Status, 0);
    seed.contact = false;
    seed.secondary = Some(SecondaryEffect {
        kind: SecondaryKind::Seed,
        target: EffectTarget::Target,
    });
    let red = with_move(with_move(standard("Ash"), seed), idle());
    let blue = with_move(standard("Cove"), idle());
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight_with_effect(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    // Application turn: seeded, but undrained
    let blue_max = state.combatant(BLUE0).unwrap().max_hp;
    assert!(state.combatant(BLUE0).unwrap().has_volatile(VolatileKind::Seeded));
    assert_eq!(state.combatant(BLUE0).unwrap().hp, blue_max);

    // Pre-damage the seeder so the incoming heal is visible
    let red_max = state.combatant(RED0).unwrap().max_hp;
    state.combatant_mut(RED0).unwrap().take_damage(40);

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(1, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    let drained = (blue_max / 8).max(1);
    assert_eq!(state.combatant(BLUE0).unwrap().hp, blue_max - drained);
    assert_eq!(state.combatant(RED0).unwrap().hp, red_max - 40 + drained);
}

#[test]
fn test_perish_song_faints_both_on_the_third_tick() {
    let dirge = MoveData::status("Dirge", Element::Ghost, MoveEffect::PerishSong);
    let red = with_move(with_move(standard("Ash"), dirge), idle());
    let blue = with_move(standard("Cove"), idle());
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    for _ in 0..2 {
        assert!(state.combatant(RED0).unwrap().is_alive());
        assert!(state.combatant(BLUE0).unwrap().is_alive());
        let mut actions = ActionSet::new();
        actions.submit(RED0, fight(1, BLUE0));
        actions.submit(BLUE0, fight(0, RED0));
        resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();
    }

    assert!(!state.combatant(RED0).unwrap().is_alive());
    assert!(!state.combatant(BLUE0).unwrap().is_alive());
    assert_eq!(state.phase, Phase::GameOver { winner: None });
}

#[test]
fn test_choice_lock_synthesizes_continuation() {
    let mut red = with_move(with_move(standard("Ash"), lunge()), idle());
    red.item = Some(ItemId::ChoiceBand);
    let blue = with_move(standard("Cove"), idle());
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();
    assert_eq!(state.combatant(RED0).unwrap().locked_move, Some(0));

    // No action submitted for the locked combatant: the engine continues it
    let mut actions = ActionSet::new();
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();
    assert_eq!(attack_entries(&log).len(), 1);
}

#[test]
fn test_charge_move_strikes_on_the_second_turn() {
    let mut beam = MoveData::new("Sky Lance", Element::Flying, MoveCategory::Physical, 120);
    beam.effect = Some(MoveEffect::Charge);
    let red = with_move(standard("Ash"), beam);
    let blue = with_move(standard("Cove"), idle());
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();
    assert!(log.mentions("gathering power"));
    assert!(attack_entries(&log).is_empty());
    assert!(state.combatant(RED0).unwrap().charging.is_some());

    let mut actions = ActionSet::new();
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();
    assert_eq!(attack_entries(&log).len(), 1);
    assert!(state.combatant(RED0).unwrap().charging.is_none());
}

#[test]
fn test_replacement_phase_walk() {
    let nuke = MoveData::new("Meteor", Element::Normal, MoveCategory::Physical, 250);
    let red = with_move(
        Combatant::new(
            "Ash",
            50,
            BaseStats::new(80, 200, 80, 90, 80, 120),
            vec![Element::Normal],
        ),
        nuke,
    );
    let blue_team = vec![with_move(standard("Cove"), idle()), with_move(standard("Dune"), idle())];
    let mut state = duel(vec![red], blue_team);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    assert_eq!(state.phase, Phase::Replacement);
    assert_eq!(
        state.pending_replacement,
        Some(crate::types::ReplacementRequest { team: 1, slot: 0 })
    );
    // Turn number holds until the replacement resolves
    assert_eq!(state.turn, 1);

    let log = resolve_replacement(&mut state, 1, 1).unwrap();
    assert!(log.mentions("sent out"));
    assert_eq!(state.phase, Phase::ActionSelection);
    assert_eq!(state.turn, 2);
    assert!(state.is_active(BLUE1));
}

#[test]
fn test_replacement_runs_switch_in_pipeline() {
    let nuke = MoveData::new("Meteor", Element::Normal, MoveCategory::Physical, 250);
    let red = with_move(
        Combatant::new(
            "Ash",
            50,
            BaseStats::new(80, 200, 80, 90, 80, 120),
            vec![Element::Normal],
        ),
        nuke,
    );
    let blue_team = vec![with_move(standard("Cove"), idle()), with_move(standard("Dune"), idle())];
    let mut state = duel(vec![red], blue_team);
    state.turn = 1;
    state.field.hazards[1].add(HazardKind::Spikes);

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    let log = resolve_replacement(&mut state, 1, 1).unwrap();
    assert!(log.mentions("spikes"));
    let entrant = state.combatant(BLUE1).unwrap();
    assert_eq!(entrant.hp, entrant.max_hp - (entrant.max_hp / 8).max(1));
}

#[test]
fn test_game_over_names_the_winner() {
    let nuke = MoveData::new("Meteor", Element::Normal, MoveCategory::Physical, 250);
    let red = with_move(
        Combatant::new(
            "Ash",
            50,
            BaseStats::new(80, 200, 80, 90, 80, 120),
            vec![Element::Normal],
        ),
        nuke,
    );
    let blue = with_move(standard("Cove"), idle());
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    assert_eq!(state.phase, Phase::GameOver { winner: Some(0) });
    assert!(log.mentions("wins the battle"));
}

#[test]
fn test_redirection_pulls_single_target_hits() {
    let bolt = MoveData::new("Bolt", Element::Electric, MoveCategory::Special, 90);
    let red = with_move(standard("Ash"), bolt);
    let mut rod = standard("Dune");
    rod.ability = Some(AbilityId::LightningRod);

    let mut red_team = Team::new("Reds", vec![red]);
    red_team.set_active(0, Some(0));
    let mut blue_team = Team::new("Blues", vec![with_move(standard("Cove"), idle()), rod]);
    blue_team.set_active_slots(2);
    blue_team.set_active(0, Some(0));
    blue_team.set_active(1, Some(1));
    let mut state = BattleState::new(vec![red_team, blue_team]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    for id in [BLUE0, BLUE1] {
        let c = state.combatant_mut(id).unwrap();
        if c.moves.is_empty() {
            c.moves.push(MoveSlot::new(idle()));
        }
        actions.submit(id, fight(0, RED0));
    }

    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    assert!(log.mentions("drew in the attack"));
    // The declared target was never struck; the rod holder absorbed nothing
    assert_eq!(log.attacks_against("Cove").count(), 0);
    assert_eq!(log.attacks_against("Dune").count(), 1);
    let max_hp = state.combatant(BLUE0).unwrap().max_hp;
    assert_eq!(state.combatant(BLUE0).unwrap().hp, max_hp);
}

#[test]
fn test_redirection_ignored_by_marker_ability() {
    let bolt = MoveData::new("Bolt", Element::Electric, MoveCategory::Special, 90);
    let mut red = with_move(standard("Ash"), bolt);
    red.ability = Some(AbilityId::Stalwart);
    let mut rod = standard("Dune");
    rod.ability = Some(AbilityId::LightningRod);

    let mut red_team = Team::new("Reds", vec![red]);
    red_team.set_active(0, Some(0));
    let mut blue_team = Team::new("Blues", vec![with_move(standard("Cove"), idle()), rod]);
    blue_team.set_active_slots(2);
    blue_team.set_active(0, Some(0));
    blue_team.set_active(1, Some(1));
    let mut state = BattleState::new(vec![red_team, blue_team]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    for id in [BLUE0, BLUE1] {
        let c = state.combatant_mut(id).unwrap();
        if c.moves.is_empty() {
            c.moves.push(MoveSlot::new(idle()));
        }
        actions.submit(id, fight(0, RED0));
    }

    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();
    assert_eq!(log.attacks_against("Cove").count(), 1);
}

#[test]
fn test_magic_bounce_reflects_status_back() {
    let mut jinx = MoveData::new("Numb Wave", Element::Electric, MoveCategory::Status, 0);
    jinx.contact = false;
    jinx.secondary = Some(SecondaryEffect {
        kind: SecondaryKind::InflictStatus(Status::Paralysis),
        target: EffectTarget::Target,
    });
    let red = with_move(standard("Ash"), jinx);
    let mut blue = with_move(standard("Cove"), idle());
    blue.ability = Some(AbilityId::MagicBounce);
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight_with_effect(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    assert!(log.mentions("bounced"));
    assert_eq!(state.combatant(RED0).unwrap().status, Some(Status::Paralysis));
    assert!(state.combatant(BLUE0).unwrap().status.is_none());
}

#[test]
fn test_start_battle_runs_entry_abilities() {
    let mut red = with_move(standard("Ash"), lunge());
    red.ability = Some(AbilityId::Intimidate);
    let blue = with_move(standard("Cove"), idle());
    let mut state = duel(vec![red], vec![blue]);

    let log = start_battle(&mut state);

    assert!(log.mentions("Intimidate"));
    assert_eq!(state.combatant(BLUE0).unwrap().stages.attack, -1);
    assert_eq!(state.turn, 1);
}

#[test]
fn test_taunt_blocks_status_moves() {
    let gibe = MoveData::status("Gibe", Element::Dark, MoveEffect::Taunt);
    let red = with_move(with_move(standard("Ash"), gibe), idle());
    let blue = with_move(standard("Cove"), idle());
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();
    assert!(log.mentions("fell for the taunt"));

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(1, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();
    assert!(log.mentions("can't use"));
}

#[test]
fn test_surge_uses_tier_power_and_team_flag() {
    let red = with_move(with_move(standard("Ash"), lunge()), idle());
    let blue = with_move(standard("Cove"), idle());
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(
        RED0,
        Action::Surge {
            move_index: 0,
            hits: vec![HitRecord::plain(BLUE0)],
            apply_effect: false,
        },
    );
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    assert!(state.teams[0].surge_used);
    let Some(LogEntry::Attack { breakdown, .. }) = attack_entries(&log).first() else {
        panic!("expected an attack entry");
    };
    // 80 base power surges to the 160 tier
    let attacker = state.combatant(RED0).unwrap();
    let defender = state.combatant(BLUE0).unwrap();
    let expected = formula::base_damage(50, 160, attacker.stats.attack, defender.stats.defense);
    assert_eq!(breakdown.base, expected);

    // The spark is spent for the whole team
    let mut actions = ActionSet::new();
    actions.submit(
        RED0,
        Action::Surge {
            move_index: 0,
            hits: vec![HitRecord::plain(BLUE0)],
            apply_effect: false,
        },
    );
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();
    assert!(log.mentions("spark was spent"));
}

#[test]
fn test_eject_button_raises_replacement_request() {
    let red = with_move(standard("Ash"), lunge());
    let mut blue = with_move(standard("Cove"), idle());
    blue.item = Some(ItemId::EjectButton);
    let blue_bench = with_move(standard("Dune"), idle());
    let mut state = duel(vec![red], vec![blue, blue_bench]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    assert!(log.mentions("Eject Button"));
    assert_eq!(state.phase, Phase::Replacement);
    assert_eq!(
        state.pending_replacement,
        Some(crate::types::ReplacementRequest { team: 1, slot: 0 })
    );
}

#[test]
fn test_forced_switch_drags_in_the_first_bench_member() {
    let gale = MoveData::status("Gale Howl", Element::Normal, MoveEffect::ForceSwitch);
    let red = with_move(standard("Ash"), gale);
    let blue = with_move(standard("Cove"), idle());
    let blue_bench = with_move(standard("Dune"), idle());
    let mut state = duel(vec![red], vec![blue, blue_bench]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    assert!(log.mentions("dragged out"));
    assert!(state.is_active(BLUE1));
    assert!(!state.is_active(BLUE0));
    assert_eq!(state.phase, Phase::ActionSelection);
}

#[test]
fn test_confusion_self_hit_cancels_the_action() {
    let red = with_move(standard("Ash"), lunge());
    let blue = with_move(standard("Cove"), lunge());
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;
    state
        .combatant_mut(BLUE0)
        .unwrap()
        .add_volatile(crate::types::Volatile::tag(VolatileKind::Confusion));

    let mut outcomes = ChanceOutcomes::new();
    outcomes.set(
        BLUE0,
        CombatantOutcomes {
            confusion_self_hit: true,
            ..Default::default()
        },
    );
    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    let log = resolve_turn(&mut state, &actions, &outcomes).unwrap();

    // Only the uncontested attacker produced an attack entry
    let entries = attack_entries(&log);
    assert_eq!(entries.len(), 1);
    assert!(log.mentions("hurt itself"));
    assert_eq!(
        state.combatant(RED0).unwrap().hp,
        state.combatant(RED0).unwrap().max_hp
    );
}

#[test]
fn test_mid_battle_state_round_trips_through_serde() {
    let red = with_move(standard("Ash"), lunge());
    let blue = with_move(standard("Cove"), lunge());
    let mut state = duel(vec![red], vec![blue]);
    state.turn = 1;

    let mut actions = ActionSet::new();
    actions.submit(RED0, fight(0, BLUE0));
    actions.submit(BLUE0, fight(0, RED0));
    resolve_turn(&mut state, &actions, &ChanceOutcomes::new()).unwrap();

    let json = serde_json::to_string(&state).unwrap();
    let back: BattleState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, back);
}

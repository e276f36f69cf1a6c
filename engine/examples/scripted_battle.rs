//! Scripted two-team battle driven entirely by pre-decided actions.
//!
//! Run with: cargo run --example scripted_battle

use anyhow::Result;

use fracas_engine::data::{
    BaseStats, Element, ItemId, MoveCategory, MoveData, MoveEffect, RoomKind, Weather,
};
use fracas_engine::{
    resolve_replacement, resolve_turn, start_battle, Action, ActionSet, BattleState,
    ChanceOutcomes, Combatant, CombatantId, HitRecord, LogEntry, MoveSlot, Phase, Team,
};

fn roster_member(
    name: &str,
    base: BaseStats,
    elements: Vec<Element>,
    moves: Vec<MoveData>,
) -> Combatant {
    let mut c = Combatant::new(name, 50, base, elements);
    c.moves = moves.into_iter().map(MoveSlot::new).collect();
    c
}

fn build_battle() -> BattleState {
    let ember = roster_member(
        "Ember",
        BaseStats::new(78, 84, 78, 109, 85, 100),
        vec![Element::Fire, Element::Flying],
        vec![
            MoveData::new("Flame Burst", Element::Fire, MoveCategory::Special, 90),
            MoveData::status("Sun Call", Element::Fire, MoveEffect::SetWeather(Weather::Sun)),
        ],
    );
    let mut bruiser = roster_member(
        "Bruiser",
        BaseStats::new(70, 110, 180, 60, 60, 50),
        vec![Element::Steel, Element::Rock],
        vec![MoveData::new("Iron Ram", Element::Steel, MoveCategory::Physical, 80)],
    );
    bruiser.item = Some(ItemId::Leftovers);

    let mut swift = roster_member(
        "Swift",
        BaseStats::new(70, 110, 70, 115, 70, 90),
        vec![Element::Fighting, Element::Steel],
        vec![
            MoveData::new("Palm Strike", Element::Fighting, MoveCategory::Physical, 120),
            MoveData::status(
                "Warp Field",
                Element::Psychic,
                MoveEffect::ToggleRoom(RoomKind::TurnReversal),
            ),
        ],
    );
    swift.item = Some(ItemId::FocusSash);
    let tide = roster_member(
        "Tide",
        BaseStats::new(80, 85, 100, 95, 95, 60),
        vec![Element::Water],
        vec![MoveData::new("Rip Current", Element::Water, MoveCategory::Special, 90)],
    );

    let mut gold = Team::new("Gold", vec![ember, bruiser]);
    gold.set_active(0, Some(0));
    let mut slate = Team::new("Slate", vec![swift, tide]);
    slate.set_active(0, Some(0));
    BattleState::new(vec![gold, slate])
}

fn print_log(entries: impl IntoIterator<Item = LogEntry>) {
    for entry in entries {
        match entry {
            LogEntry::Narrative(line) => println!("  {line}"),
            LogEntry::Attack {
                attacker,
                defender,
                move_name,
                damage,
                effectiveness,
                crit,
                ..
            } => {
                let crit_note = if crit { ", critical" } else { "" };
                println!(
                    "  {attacker} hit {defender} with {move_name} for {damage} (x{effectiveness}{crit_note})"
                );
            }
        }
    }
}

fn main() -> Result<()> {
    let mut state = build_battle();
    let gold_lead = CombatantId::new(0, 0);
    let slate_lead = CombatantId::new(1, 0);

    println!("== setup ==");
    print_log(start_battle(&mut state));

    // Every probabilistic outcome is decided up front; the engine just
    // replays the script
    let turns: Vec<Vec<(CombatantId, Action)>> = vec![
        vec![
            (
                gold_lead,
                Action::Fight {
                    move_index: 1,
                    hits: vec![],
                    apply_effect: false,
                },
            ),
            (
                slate_lead,
                Action::Fight {
                    move_index: 0,
                    hits: vec![HitRecord::crit(gold_lead)],
                    apply_effect: false,
                },
            ),
        ],
        vec![
            (
                gold_lead,
                Action::Fight {
                    move_index: 0,
                    hits: vec![HitRecord::plain(slate_lead)],
                    apply_effect: false,
                },
            ),
            (
                slate_lead,
                Action::Fight {
                    move_index: 0,
                    hits: vec![HitRecord::plain(gold_lead)],
                    apply_effect: false,
                },
            ),
        ],
    ];

    for (number, scripted) in turns.into_iter().enumerate() {
        if state.phase != Phase::ActionSelection {
            break;
        }
        println!("== turn {} ==", number + 1);
        let mut actions = ActionSet::new();
        for (id, action) in scripted {
            actions.submit(id, action);
        }
        print_log(resolve_turn(&mut state, &actions, &ChanceOutcomes::new())?);

        // Fill any vacated slot with the first bench member
        while state.phase == Phase::Replacement {
            let request = state.pending_replacement.expect("replacement pending");
            let bench = state.teams[request.team as usize]
                .first_replacement()
                .expect("replacement phase implies bench");
            print_log(resolve_replacement(&mut state, request.team, bench)?);
        }
    }

    match state.phase {
        Phase::GameOver { winner: Some(t) } => {
            println!("winner: {}", state.teams[t as usize].name)
        }
        Phase::GameOver { winner: None } => println!("the battle ended in a draw"),
        _ => println!("the battle rages on (turn {})", state.turn),
    }
    Ok(())
}

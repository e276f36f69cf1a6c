//! Deterministic turn-resolution engine for a monster-battling tabletop
//! adaptation.
//!
//! The engine is a pure function over plain data: given the prior
//! [`BattleState`], one submitted [`Action`] per active combatant, and the
//! externally decided [`ChanceOutcomes`], `resolve_turn` produces the next
//! state and a structured [`EventLog`]. Nothing here performs I/O, rolls
//! dice, or suspends; an adjudicator (human or RNG) owns every
//! probabilistic decision, which makes a resolution replayable bit for bit.
//!
//! ```text
//! fracas-data (rule tables)
//!        │
//!        ▼
//! fracas-engine ← THIS CRATE
//!        │
//!        ├─> turn     (ordering, per-action loop, phase machine)
//!        ├─> damage   (single-hit calculator)
//!        ├─> hooks    (ability/item lifecycle dispatch)
//!        ├─> effects  (status & field manager)
//!        └─> forms    (deferred form changes)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use fracas_engine::{resolve_turn, start_battle, Action, ActionSet, ChanceOutcomes};
//!
//! let mut state = assemble_battle();
//! let opening = start_battle(&mut state);
//!
//! let mut actions = ActionSet::new();
//! actions.submit(attacker, Action::Fight {
//!     move_index: 0,
//!     hits: vec![HitRecord::plain(defender)],
//!     apply_effect: false,
//! });
//! actions.submit(defender, Action::Switch { roster_index: 1 });
//!
//! let log = resolve_turn(&mut state, &actions, &ChanceOutcomes::new())?;
//! for entry in log {
//!     println!("{entry:?}");
//! }
//! ```
//!
//! Callers must treat a resolution as atomic: mutate nothing concurrently,
//! and discard the state if `resolve_turn` returns an error.

pub mod damage;
pub mod effects;
pub mod error;
pub mod formula;
pub mod forms;
pub mod hooks;
pub mod log;
pub mod turn;
pub mod types;

pub use damage::{compute_damage, DamageBreakdown, DamageOutcome};
pub use error::EngineError;
pub use log::{EventLog, LogEntry};
pub use turn::action::{Action, ActionSet, ChanceOutcomes, CombatantOutcomes, HitRecord};
pub use turn::{resolve_replacement, resolve_turn, start_battle};
pub use types::{
    BattleState, Combatant, CombatantId, Field, MoveSlot, Phase, ReplacementRequest, Team,
};

// Re-export the rule-table crate; callers build Combatant/MoveSlot records
// from it before a battle starts
pub use fracas_data as data;

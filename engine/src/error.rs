//! Engine error taxonomy
//!
//! Only caller-contract violations surface as errors; everything that can
//! be recovered inside a turn degrades to a log entry instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no action submitted for eligible combatant {0}")]
    MissingAction(String),

    #[error("operation requires the {expected} phase")]
    WrongPhase { expected: &'static str },

    #[error("no combatant with id {0}")]
    NoSuchCombatant(String),

    #[error("invalid replacement: {0}")]
    InvalidReplacement(String),
}

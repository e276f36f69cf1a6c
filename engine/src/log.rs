//! Structured event log
//!
//! The log is the engine's primary observable output besides the new state.
//! Downstream presentation renders entries verbatim.

use serde::{Deserialize, Serialize};

use crate::damage::DamageBreakdown;

/// One log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogEntry {
    /// Plain narrative line
    Narrative(String),
    /// A resolved hit
    Attack {
        attacker: String,
        defender: String,
        move_name: String,
        /// Damage actually applied to the defender
        damage: u32,
        effectiveness: f32,
        crit: bool,
        /// Whether the defender fainted from this hit
        faint: bool,
        breakdown: DamageBreakdown,
    },
}

/// Ordered sequence of log entries for one resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Append a narrative line
    pub fn narrate(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::Narrative(text.into()));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any narrative line contains the given text
    pub fn mentions(&self, text: &str) -> bool {
        self.entries.iter().any(|e| match e {
            LogEntry::Narrative(line) => line.contains(text),
            LogEntry::Attack { .. } => false,
        })
    }

    /// Attack entries where the named combatant was the defender
    pub fn attacks_against<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a LogEntry> {
        self.entries.iter().filter(move |e| match e {
            LogEntry::Attack { defender, .. } => defender == name,
            LogEntry::Narrative(_) => false,
        })
    }
}

impl IntoIterator for EventLog {
    type Item = LogEntry;
    type IntoIter = std::vec::IntoIter<LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

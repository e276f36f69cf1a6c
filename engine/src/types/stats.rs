//! Stat stages and computed stats

use fracas_data::{BaseStats, StatKind};
use serde::{Deserialize, Serialize};

use crate::formula;

/// Stat stages (-6 to +6) for the five combat stats plus accuracy/evasion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages {
    pub attack: i8,
    pub defense: i8,
    pub sp_attack: i8,
    pub sp_defense: i8,
    pub speed: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl StatStages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stage for a stat
    pub fn get(&self, stat: StatKind) -> i8 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpAttack => self.sp_attack,
            StatKind::SpDefense => self.sp_defense,
            StatKind::Speed => self.speed,
            StatKind::Accuracy => self.accuracy,
            StatKind::Evasion => self.evasion,
        }
    }

    /// Set the stage for a stat, clamped to -6..+6
    pub fn set(&mut self, stat: StatKind, value: i8) {
        let clamped = value.clamp(-6, 6);
        match stat {
            StatKind::Attack => self.attack = clamped,
            StatKind::Defense => self.defense = clamped,
            StatKind::SpAttack => self.sp_attack = clamped,
            StatKind::SpDefense => self.sp_defense = clamped,
            StatKind::Speed => self.speed = clamped,
            StatKind::Accuracy => self.accuracy = clamped,
            StatKind::Evasion => self.evasion = clamped,
        }
    }

    /// Shift a stage and return the change actually applied after clamping
    pub fn boost(&mut self, stat: StatKind, amount: i8) -> i8 {
        let current = self.get(stat);
        let next = (current + amount).clamp(-6, 6);
        self.set(stat, next);
        next - current
    }

    /// Reset every stage to 0
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether every stage is at 0
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }
}

/// Computed combat stats (HP is tracked separately on the combatant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedStats {
    pub attack: u32,
    pub defense: u32,
    pub sp_attack: u32,
    pub sp_defense: u32,
    pub speed: u32,
}

impl ComputedStats {
    /// Derive combat stats from species base stats at a level
    pub fn from_base(base: &BaseStats, level: u8) -> Self {
        Self {
            attack: formula::stat_value(base.attack, level),
            defense: formula::stat_value(base.defense, level),
            sp_attack: formula::stat_value(base.sp_attack, level),
            sp_defense: formula::stat_value(base.sp_defense, level),
            speed: formula::stat_value(base.speed, level),
        }
    }

    /// Get a stat by kind; accuracy/evasion have no computed value and
    /// return 0
    pub fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpAttack => self.sp_attack,
            StatKind::SpDefense => self.sp_defense,
            StatKind::Speed => self.speed,
            StatKind::Accuracy | StatKind::Evasion => 0,
        }
    }

    /// The highest combat stat, for booster-style item effects
    pub fn highest(&self) -> StatKind {
        let mut best = (StatKind::Attack, self.attack);
        for (kind, value) in [
            (StatKind::Defense, self.defense),
            (StatKind::SpAttack, self.sp_attack),
            (StatKind::SpDefense, self.sp_defense),
            (StatKind::Speed, self.speed),
        ] {
            if value > best.1 {
                best = (kind, value);
            }
        }
        best.0
    }
}

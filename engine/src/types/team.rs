//! Team state

use fracas_data::ScreenKind;
use serde::{Deserialize, Serialize};

use super::combatant::Combatant;

/// Team-scoped timed screens, in remaining turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenTimers {
    pub reflect: u8,
    pub light_screen: u8,
    pub aurora_veil: u8,
}

impl ScreenTimers {
    pub fn get(&self, kind: ScreenKind) -> u8 {
        match kind {
            ScreenKind::Reflect => self.reflect,
            ScreenKind::LightScreen => self.light_screen,
            ScreenKind::AuroraVeil => self.aurora_veil,
        }
    }

    pub fn set(&mut self, kind: ScreenKind, turns: u8) {
        match kind {
            ScreenKind::Reflect => self.reflect = turns,
            ScreenKind::LightScreen => self.light_screen = turns,
            ScreenKind::AuroraVeil => self.aurora_veil = turns,
        }
    }
}

/// One team: an ordered roster with a set of active slots into it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub roster: Vec<Combatant>,
    /// Active roster indices, one per slot; `None` while a slot awaits a
    /// replacement
    pub active: Vec<Option<usize>>,
    pub screens: ScreenTimers,
    /// Whether the once-per-battle surge has been spent
    pub surge_used: bool,
}

impl Team {
    /// Create a team with one active slot
    pub fn new(name: impl Into<String>, roster: Vec<Combatant>) -> Self {
        Self {
            name: name.into(),
            roster,
            active: vec![None],
            screens: ScreenTimers::default(),
            surge_used: false,
        }
    }

    /// Resize to `count` active slots (1 for singles, 2 for pairs, ...)
    pub fn set_active_slots(&mut self, count: usize) {
        self.active.resize(count, None);
    }

    /// The combatant occupying a slot
    pub fn active(&self, slot: usize) -> Option<&Combatant> {
        self.active
            .get(slot)
            .and_then(|idx| idx.as_ref())
            .and_then(|&idx| self.roster.get(idx))
    }

    pub fn active_mut(&mut self, slot: usize) -> Option<&mut Combatant> {
        if let Some(Some(idx)) = self.active.get(slot) {
            let idx = *idx;
            self.roster.get_mut(idx)
        } else {
            None
        }
    }

    /// Roster indices currently on the field
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.active.iter().filter_map(|idx| *idx)
    }

    /// Whether the roster index is in an active slot
    pub fn is_active(&self, index: usize) -> bool {
        self.active.iter().any(|idx| *idx == Some(index))
    }

    /// The slot holding a roster index, if any
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        self.active.iter().position(|idx| *idx == Some(index))
    }

    /// Benched, living roster indices in roster order
    pub fn bench(&self) -> impl Iterator<Item = usize> + '_ {
        self.roster
            .iter()
            .enumerate()
            .filter(|(idx, c)| !self.is_active(*idx) && c.is_alive())
            .map(|(idx, _)| idx)
    }

    /// First benched, living roster index, for forced switches and
    /// replacement scans
    pub fn first_replacement(&self) -> Option<usize> {
        self.bench().next()
    }

    pub fn alive_count(&self) -> usize {
        self.roster.iter().filter(|c| c.is_alive()).count()
    }

    pub fn all_fainted(&self) -> bool {
        !self.roster.is_empty() && self.roster.iter().all(|c| !c.is_alive())
    }

    /// Place a roster index into a slot. Runs switch-out bookkeeping for the
    /// previous occupant; switch-in effects are the status/field manager's
    /// job.
    pub fn set_active(&mut self, slot: usize, index: Option<usize>) {
        if slot >= self.active.len() {
            return;
        }
        if let Some(old) = self.active[slot] {
            if let Some(occupant) = self.roster.get_mut(old) {
                occupant.on_switch_out();
            }
        }
        self.active[slot] = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fracas_data::{BaseStats, Element};

    fn team() -> Team {
        let base = BaseStats::new(60, 80, 70, 60, 70, 90);
        let mut roster = Vec::new();
        for name in ["Ash", "Briar", "Cinder"] {
            roster.push(Combatant::new(name, 50, base, vec![Element::Normal]));
        }
        Team::new("Reds", roster)
    }

    #[test]
    fn test_new_team_has_one_empty_slot() {
        let t = team();
        assert_eq!(t.active.len(), 1);
        assert!(t.active(0).is_none());
    }

    #[test]
    fn test_set_active_and_bench() {
        let mut t = team();
        t.set_active(0, Some(0));
        assert_eq!(t.active(0).unwrap().name, "Ash");

        let bench: Vec<usize> = t.bench().collect();
        assert_eq!(bench, vec![1, 2]);
    }

    #[test]
    fn test_set_active_switches_out_previous() {
        let mut t = team();
        t.set_active(0, Some(0));
        t.roster[0].stages.boost(fracas_data::StatKind::Attack, 2);

        t.set_active(0, Some(1));
        assert!(t.roster[0].stages.is_clear());
        assert_eq!(t.active(0).unwrap().name, "Briar");
    }

    #[test]
    fn test_first_replacement_skips_fainted() {
        let mut t = team();
        t.set_active(0, Some(0));
        let hp = t.roster[1].max_hp;
        t.roster[1].take_damage(hp);
        assert_eq!(t.first_replacement(), Some(2));
    }

    #[test]
    fn test_all_fainted() {
        let mut t = team();
        assert!(!t.all_fainted());
        for c in &mut t.roster {
            let hp = c.max_hp;
            c.take_damage(hp);
        }
        assert!(t.all_fainted());
    }

    #[test]
    fn test_screen_timers() {
        let mut t = team();
        t.screens.set(ScreenKind::Reflect, 5);
        assert_eq!(t.screens.get(ScreenKind::Reflect), 5);
        assert_eq!(t.screens.get(ScreenKind::LightScreen), 0);
    }
}

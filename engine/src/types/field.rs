//! Shared field state

use fracas_data::{HazardKind, RoomKind, Terrain, Weather};
use serde::{Deserialize, Serialize};

/// The four independent room counters, in remaining turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTimers {
    pub turn_reversal: u8,
    pub item_suppression: u8,
    pub gravity: u8,
    pub defense_swap: u8,
}

impl RoomTimers {
    pub fn get(&self, kind: RoomKind) -> u8 {
        match kind {
            RoomKind::TurnReversal => self.turn_reversal,
            RoomKind::ItemSuppression => self.item_suppression,
            RoomKind::Gravity => self.gravity,
            RoomKind::DefenseSwap => self.defense_swap,
        }
    }

    pub fn set(&mut self, kind: RoomKind, turns: u8) {
        match kind {
            RoomKind::TurnReversal => self.turn_reversal = turns,
            RoomKind::ItemSuppression => self.item_suppression = turns,
            RoomKind::Gravity => self.gravity = turns,
            RoomKind::DefenseSwap => self.defense_swap = turns,
        }
    }
}

/// Hazard layers on one team's side of the field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardLayers {
    pub pointed_stones: u8,
    pub spikes: u8,
    pub toxic_spikes: u8,
    pub sticky_web: u8,
}

impl HazardLayers {
    pub fn get(&self, kind: HazardKind) -> u8 {
        match kind {
            HazardKind::PointedStones => self.pointed_stones,
            HazardKind::Spikes => self.spikes,
            HazardKind::ToxicSpikes => self.toxic_spikes,
            HazardKind::StickyWeb => self.sticky_web,
        }
    }

    fn set(&mut self, kind: HazardKind, layers: u8) {
        match kind {
            HazardKind::PointedStones => self.pointed_stones = layers,
            HazardKind::Spikes => self.spikes = layers,
            HazardKind::ToxicSpikes => self.toxic_spikes = layers,
            HazardKind::StickyWeb => self.sticky_web = layers,
        }
    }

    /// Add one layer; returns false if the kind is already at its cap
    pub fn add(&mut self, kind: HazardKind) -> bool {
        let current = self.get(kind);
        if current >= kind.max_layers() {
            return false;
        }
        self.set(kind, current + 1);
        true
    }

    pub fn clear(&mut self, kind: HazardKind) {
        self.set(kind, 0);
    }
}

/// Shared mutable field record: weather, terrain, rooms, and per-team
/// hazard layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Weather kind and remaining turns
    pub weather: Option<(Weather, u8)>,
    /// Terrain kind and remaining turns
    pub terrain: Option<(Terrain, u8)>,
    pub rooms: RoomTimers,
    /// Hazards indexed by team
    pub hazards: Vec<HazardLayers>,
}

impl Field {
    pub fn new(team_count: usize) -> Self {
        Self {
            weather: None,
            terrain: None,
            rooms: RoomTimers::default(),
            hazards: vec![HazardLayers::default(); team_count],
        }
    }

    pub fn weather_is(&self, kind: Weather) -> bool {
        matches!(self.weather, Some((w, _)) if w == kind)
    }

    pub fn terrain_is(&self, kind: Terrain) -> bool {
        matches!(self.terrain, Some((t, _)) if t == kind)
    }

    pub fn room_active(&self, kind: RoomKind) -> bool {
        self.rooms.get(kind) > 0
    }

    pub fn hazards_for(&mut self, team: usize) -> &mut HazardLayers {
        &mut self.hazards[team]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_clear() {
        let field = Field::new(2);
        assert!(field.weather.is_none());
        assert!(field.terrain.is_none());
        assert!(!field.room_active(RoomKind::TurnReversal));
        assert_eq!(field.hazards.len(), 2);
    }

    #[test]
    fn test_weather_is() {
        let mut field = Field::new(2);
        field.weather = Some((Weather::Rain, 5));
        assert!(field.weather_is(Weather::Rain));
        assert!(!field.weather_is(Weather::Sun));
    }

    #[test]
    fn test_room_timers() {
        let mut field = Field::new(2);
        field.rooms.set(RoomKind::DefenseSwap, 5);
        assert!(field.room_active(RoomKind::DefenseSwap));
        assert!(!field.room_active(RoomKind::Gravity));
    }

    #[test]
    fn test_hazard_layer_caps() {
        let mut layers = HazardLayers::default();
        assert!(layers.add(HazardKind::Spikes));
        assert!(layers.add(HazardKind::Spikes));
        assert!(layers.add(HazardKind::Spikes));
        assert!(!layers.add(HazardKind::Spikes));
        assert_eq!(layers.get(HazardKind::Spikes), 3);

        assert!(layers.add(HazardKind::PointedStones));
        assert!(!layers.add(HazardKind::PointedStones));
    }

    #[test]
    fn test_hazard_clear() {
        let mut layers = HazardLayers::default();
        layers.add(HazardKind::ToxicSpikes);
        layers.add(HazardKind::ToxicSpikes);
        layers.clear(HazardKind::ToxicSpikes);
        assert_eq!(layers.get(HazardKind::ToxicSpikes), 0);
    }
}

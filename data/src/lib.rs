//! Rule tables and reference data types for the Fracas combat engine.
//!
//! Everything in this crate is immutable lookup data: the element matchup
//! matrix, move metadata records, ability and item identifier catalogs, and
//! the status/condition catalogs. The engine never fetches reference data
//! itself — the external data provider resolves names into these records
//! before a battle starts, and the engine only reads them.
//!
//! ```text
//! fracas-data (rule tables)  ← THIS CRATE
//!        │
//!        ▼
//! fracas-engine (turn resolution)
//! ```
//!
//! # Main Types
//!
//! - [`Element`] — the 18-element axis with its matchup matrix
//! - [`MoveData`], [`MoveCategory`], [`MoveEffect`], [`SecondaryEffect`] — move metadata
//! - [`AbilityId`], [`ItemId`] — closed identifier catalogs with marker capabilities
//! - [`Status`], [`VolatileKind`], [`Weather`], [`Terrain`], [`RoomKind`],
//!   [`HazardKind`], [`ScreenKind`] — status and condition catalogs
//! - [`BaseStats`], [`StatKind`] — species-derived numbers and stat axes

pub mod abilities;
pub mod conditions;
pub mod element;
pub mod items;
pub mod moves;
pub mod stats;

pub use abilities::AbilityId;
pub use conditions::{HazardKind, RoomKind, ScreenKind, Status, Terrain, VolatileKind, Weather};
pub use element::{Element, MATCHUP};
pub use items::ItemId;
pub use moves::{
    surge_power, EffectTarget, MoveCategory, MoveData, MoveEffect, SecondaryEffect, SecondaryKind,
};
pub use stats::{BaseStats, StatKind};

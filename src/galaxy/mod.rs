//! Starmap state: systems, proximity connections, fuel costs
//!
//! The `Galaxy` owns every `StarSystem` for the whole session. Other
//! components mutate parts of it (markets, mission boards, active events)
//! but systems are never destroyed.

pub mod builder;

pub use builder::build_galaxy;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{EconomyType, GridPos};
use crate::market::{ActiveEvent, GoodState};
use crate::missions::Mission;

/// A single star system on the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarSystem {
    pub name: String,
    pub position: GridPos,
    pub economy: EconomyType,
    pub faction: String,
    pub has_shipyard: bool,
    pub has_black_market: bool,
    /// Per-good market state, keyed by good name. BTreeMap so the daily
    /// tick iterates goods in a stable order.
    pub market: BTreeMap<String, GoodState>,
    /// Mission board, capped by the mission generator
    pub available_missions: Vec<Mission>,
}

impl StarSystem {
    pub fn new(
        name: impl Into<String>,
        position: GridPos,
        economy: EconomyType,
        faction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            economy,
            faction: faction.into(),
            has_shipyard: false,
            has_black_market: false,
            market: BTreeMap::new(),
            available_missions: Vec::new(),
        }
    }

    pub fn with_shipyard(mut self) -> Self {
        self.has_shipyard = true;
        self
    }

    pub fn with_black_market(mut self) -> Self {
        self.has_black_market = true;
        self
    }
}

/// The complete starmap
///
/// `systems` keeps placement order, which doubles as the deterministic
/// iteration order for every RNG-consuming pass over the galaxy.
#[derive(Debug, Clone)]
pub struct Galaxy {
    pub systems: Vec<StarSystem>,
    /// Adjacency lists, symmetric by construction. Every system has an
    /// entry; an empty list is a valid isolated system, not an error.
    pub connections: BTreeMap<String, Vec<String>>,
    /// Fuel cost per ordered pair. Both directions carry the same value
    /// since distance is symmetric; callers index by ordered pair.
    pub fuel_costs: BTreeMap<(String, String), u32>,
    /// At most one active market event per system, enforced by the map key
    pub active_events: BTreeMap<String, ActiveEvent>,
}

impl Galaxy {
    pub fn get_system(&self, name: &str) -> Option<&StarSystem> {
        self.systems.iter().find(|s| s.name == name)
    }

    pub fn get_system_mut(&mut self, name: &str) -> Option<&mut StarSystem> {
        self.systems.iter_mut().find(|s| s.name == name)
    }

    /// Neighboring system names; empty for isolated or unknown systems
    pub fn neighbors(&self, name: &str) -> &[String] {
        self.connections.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fuel_cost(&self, from: &str, to: &str) -> Option<u32> {
        self.fuel_costs
            .get(&(from.to_string(), to.to_string()))
            .copied()
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }
}

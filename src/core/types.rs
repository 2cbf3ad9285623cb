//! Core type definitions used throughout the simulation

use serde::{Deserialize, Serialize};

/// In-game day counter (simulation time unit)
pub type Day = u32;

/// Credit balance / amount
pub type Credits = i64;

/// Unique identifier for missions (deterministic counter, not random)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissionId(pub u32);

impl MissionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Integer grid position of a star system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance; 1 means the two cells are
    /// 8-neighbors on the grid.
    pub fn chebyshev_distance(&self, other: &Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn euclidean_distance(&self, other: &Self) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Economy category of a star system, driving price multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EconomyType {
    Agricultural,
    Industrial,
    Mining,
    HighTech,
}

impl EconomyType {
    pub const ALL: [EconomyType; 4] = [
        EconomyType::Agricultural,
        EconomyType::Industrial,
        EconomyType::Mining,
        EconomyType::HighTech,
    ];
}

/// Hull class of the player's ship, read by event eligibility checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    Freighter,
    Explorer,
    Fighter,
    Corvette,
}

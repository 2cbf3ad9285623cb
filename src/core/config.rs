//! Simulation configuration with documented constants
//!
//! All tuning knobs are collected here with explanations of their purpose.
//! These values reproduce the classic StarTrader pacing; changing them
//! changes economy and encounter feel, not correctness.

use crate::core::error::{Result, SimError};

/// Top-level configuration for the simulation core
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub galaxy: GalaxyConfig,
    pub market: MarketConfig,
    pub missions: MissionConfig,
}

/// Starmap generation parameters
#[derive(Debug, Clone)]
pub struct GalaxyConfig {
    /// Grid width in cells
    pub width: i32,
    /// Grid height in cells
    pub height: i32,

    /// Probability that an empty (non-anchor) cell spawns a system
    ///
    /// At 0.15 on a 10x10 grid the galaxy averages ~15 procedural systems
    /// on top of the anchors. Isolated pockets are expected and valid.
    pub system_density: f64,

    /// Probability that a procedural system has a shipyard
    pub shipyard_chance: f64,

    /// Probability that a procedural system hosts a black market
    pub black_market_chance: f64,

    /// Fuel cost per unit of euclidean distance (cost = floor(dist * this))
    pub fuel_cost_per_distance: f64,
}

/// Market initialization and drift parameters
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Integer divisor controlling how fast a price moves toward its
    /// target each day: `price += (target - price) / drift_factor`
    /// with truncating division.
    ///
    /// Because the division truncates, a price whose gap to target is
    /// smaller than the factor stops moving. Prices approach but never
    /// exactly reach target. That behavior is intentional.
    pub drift_factor: i64,

    /// Multiplicative noise range applied to legal-good prices at
    /// initialization. Tests pin both ends to 1.0 to get exact targets.
    pub init_noise: (f64, f64),

    /// Initial quantity range for legal goods (inclusive)
    pub init_quantity: (u32, u32),

    /// Price noise range for black-market goods at initialization
    pub black_market_noise: (f64, f64),

    /// Initial quantity range for black-market goods (inclusive)
    pub black_market_quantity: (u32, u32),
}

/// Mission board parameters
#[derive(Debug, Clone)]
pub struct MissionConfig {
    /// Hard cap on missions per system board
    pub max_missions_per_system: usize,

    /// Cargo quantity range for DELIVER/PROCURE missions (inclusive)
    pub quantity_range: (u32, u32),

    /// Credit reward = floor(base_price * quantity * this) + distance bonus
    pub reward_value_fraction: f64,

    /// Flat bonus multiplied by the route-distance placeholder.
    ///
    /// The placeholder is a constant 1, not a real path distance. The
    /// original shipped that way and save compatibility keeps it.
    pub reward_distance_bonus: i64,

    /// Reputation reward for cargo missions
    pub cargo_reputation: i32,

    /// Fixed credit reward for bounty missions
    pub bounty_reward: i64,

    /// Reputation reward for bounty missions
    pub bounty_reputation: i32,

    /// Days before an accepted mission expires
    pub time_limit_days: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            galaxy: GalaxyConfig {
                width: 10,
                height: 10,
                system_density: 0.15,
                shipyard_chance: 0.2,
                black_market_chance: 0.1,
                fuel_cost_per_distance: 5.0,
            },
            market: MarketConfig {
                drift_factor: 10,
                init_noise: (0.9, 1.1),
                init_quantity: (50, 200),
                black_market_noise: (1.2, 1.8),
                black_market_quantity: (5, 25),
            },
            missions: MissionConfig {
                max_missions_per_system: 5,
                quantity_range: (5, 20),
                reward_value_fraction: 0.5,
                reward_distance_bonus: 100,
                cargo_reputation: 10,
                bounty_reward: 5000,
                bounty_reputation: 25,
                time_limit_days: 15,
            },
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.galaxy.width <= 0 || self.galaxy.height <= 0 {
            return Err(SimError::InvalidConfig(format!(
                "galaxy dimensions must be positive, got {}x{}",
                self.galaxy.width, self.galaxy.height
            )));
        }
        if !(0.0..=1.0).contains(&self.galaxy.system_density) {
            return Err(SimError::InvalidConfig(format!(
                "system_density must be in [0, 1], got {}",
                self.galaxy.system_density
            )));
        }
        if self.market.drift_factor <= 0 {
            return Err(SimError::InvalidConfig(format!(
                "drift_factor must be positive, got {}",
                self.market.drift_factor
            )));
        }
        if self.market.init_noise.0 > self.market.init_noise.1 {
            return Err(SimError::InvalidConfig(
                "init_noise range is inverted".into(),
            ));
        }
        if self.missions.max_missions_per_system == 0 {
            return Err(SimError::InvalidConfig(
                "max_missions_per_system must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_drift_factor_rejected() {
        let mut config = SimulationConfig::default();
        config.market.drift_factor = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_density_rejected() {
        let mut config = SimulationConfig::default();
        config.galaxy.system_density = 1.5;
        assert!(config.validate().is_err());
    }
}

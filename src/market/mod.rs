//! Per-system market state and the daily price-drift tick
//!
//! Prices drift toward `base_price * economy_multiplier` (times any active
//! event multiplier) by `(target - price) / drift_factor` with truncating
//! integer division. When the remaining gap is smaller than the drift
//! factor the price stops moving, so prices approach but never exactly
//! reach their target. That is long-standing intended behavior.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalogs;
use crate::core::config::MarketConfig;
use crate::core::types::Credits;
use crate::galaxy::Galaxy;

/// Price and stock of one good in one system's market
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodState {
    pub price: Credits,
    pub quantity: u32,
}

/// Closed set of temporary market distortions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveEventKind {
    Famine,
    Plague,
    MiningStrike,
    TradeBoom,
    PirateBlockade,
}

impl ActiveEventKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Famine => "famine",
            Self::Plague => "plague",
            Self::MiningStrike => "mining strike",
            Self::TradeBoom => "trade boom",
            Self::PirateBlockade => "pirate blockade",
        }
    }
}

/// A temporary, system-scoped price distortion with a countdown duration.
///
/// `good = None` distorts every good in the system (blockades); otherwise
/// only the named good is affected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub kind: ActiveEventKind,
    pub good: Option<String>,
    pub multiplier: f64,
    pub remaining_days: u32,
}

/// Seed every system's market.
///
/// Legal goods exist everywhere; restricted goods only where a black
/// market operates. Prices take the economy multiplier plus uniform noise.
pub fn initialize_markets(
    galaxy: &mut Galaxy,
    catalogs: &Catalogs,
    config: &MarketConfig,
    rng: &mut ChaCha8Rng,
) {
    for system in &mut galaxy.systems {
        for good in catalogs.legal_goods() {
            let multiplier = catalogs.economy_multiplier(system.economy, &good.name);
            let noise = rng.gen_range(config.init_noise.0..=config.init_noise.1);
            let price = (good.base_price as f64 * multiplier * noise).round() as Credits;
            let quantity = rng.gen_range(config.init_quantity.0..=config.init_quantity.1);
            system
                .market
                .insert(good.name.clone(), GoodState { price, quantity });
        }

        if system.has_black_market {
            for good in catalogs.restricted_goods() {
                let noise =
                    rng.gen_range(config.black_market_noise.0..=config.black_market_noise.1);
                let price = (good.base_price as f64 * noise).round() as Credits;
                let quantity = rng
                    .gen_range(config.black_market_quantity.0..=config.black_market_quantity.1);
                system
                    .market
                    .insert(good.name.clone(), GoodState { price, quantity });
            }
        }
    }
}

/// Advance every market by one day.
///
/// Per system: first age out the active event (emitting an "ended" notice
/// once it expires), then drift each present good toward its target.
/// Goods missing from a market are skipped. Quantities are only touched by
/// trade operations, never by the tick.
pub fn run_market_tick(
    galaxy: &mut Galaxy,
    catalogs: &Catalogs,
    config: &MarketConfig,
) -> Vec<String> {
    let mut lines = Vec::new();

    for system in &mut galaxy.systems {
        if let Some(event) = galaxy.active_events.get_mut(&system.name) {
            event.remaining_days = event.remaining_days.saturating_sub(1);
            if event.remaining_days == 0 {
                lines.push(format!(
                    "The {} in {} has run its course.",
                    event.kind.label(),
                    system.name
                ));
                tracing::debug!(system = %system.name, "market event expired");
                galaxy.active_events.remove(&system.name);
            }
        }

        let event = galaxy.active_events.get(&system.name);
        for (good_name, state) in &mut system.market {
            let Some(good) = catalogs.get_good(good_name) else {
                continue;
            };
            let multiplier = catalogs.economy_multiplier(system.economy, good_name);
            let mut target = good.base_price as f64 * multiplier;
            if let Some(event) = event {
                let affected = match &event.good {
                    Some(g) => g == good_name,
                    None => true,
                };
                if affected {
                    target *= event.multiplier;
                }
            }
            let target = target.round() as Credits;
            state.price += (target - state.price) / config.drift_factor;
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::{EconomyType, GridPos};
    use crate::galaxy::StarSystem;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn tiny_galaxy() -> Galaxy {
        let agri = StarSystem::new(
            "Greenhold",
            GridPos::new(0, 0),
            EconomyType::Agricultural,
            "Federation",
        );
        let tech = StarSystem::new(
            "Chipfall",
            GridPos::new(1, 0),
            EconomyType::HighTech,
            "Consortium",
        )
        .with_black_market();
        let mut connections = BTreeMap::new();
        connections.insert("Greenhold".to_string(), vec!["Chipfall".to_string()]);
        connections.insert("Chipfall".to_string(), vec!["Greenhold".to_string()]);
        let mut fuel_costs = BTreeMap::new();
        fuel_costs.insert(("Greenhold".to_string(), "Chipfall".to_string()), 5);
        fuel_costs.insert(("Chipfall".to_string(), "Greenhold".to_string()), 5);
        Galaxy {
            systems: vec![agri, tech],
            connections,
            fuel_costs,
            active_events: BTreeMap::new(),
        }
    }

    fn no_noise_config() -> MarketConfig {
        let mut config = SimulationConfig::default().market;
        config.init_noise = (1.0, 1.0);
        config
    }

    #[test]
    fn test_initialization_seeds_legal_goods_everywhere() {
        let mut galaxy = tiny_galaxy();
        let catalogs = Catalogs::default();
        let config = no_noise_config();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        initialize_markets(&mut galaxy, &catalogs, &config, &mut rng);

        for system in &galaxy.systems {
            for good in catalogs.legal_goods() {
                assert!(system.market.contains_key(&good.name));
            }
        }
    }

    #[test]
    fn test_restricted_goods_only_on_black_markets() {
        let mut galaxy = tiny_galaxy();
        let catalogs = Catalogs::default();
        let config = no_noise_config();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        initialize_markets(&mut galaxy, &catalogs, &config, &mut rng);

        assert!(!galaxy.get_system("Greenhold").unwrap().market.contains_key("Weapons"));
        assert!(galaxy.get_system("Chipfall").unwrap().market.contains_key("Weapons"));
        assert!(galaxy.get_system("Chipfall").unwrap().market.contains_key("Narcotics"));
    }

    #[test]
    fn test_agricultural_food_cheaper_than_hightech_food() {
        // Noise pinned to 1.0, so prices equal their economy targets
        let mut galaxy = tiny_galaxy();
        let catalogs = Catalogs::default();
        let config = no_noise_config();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        initialize_markets(&mut galaxy, &catalogs, &config, &mut rng);

        let agri_food = galaxy.get_system("Greenhold").unwrap().market["Food"].price;
        let tech_food = galaxy.get_system("Chipfall").unwrap().market["Food"].price;
        assert!(agri_food < tech_food, "{agri_food} !< {tech_food}");
    }

    #[test]
    fn test_drift_moves_toward_target_but_never_lands() {
        let mut galaxy = tiny_galaxy();
        let catalogs = Catalogs::default();
        let config = no_noise_config();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        initialize_markets(&mut galaxy, &catalogs, &config, &mut rng);

        // Knock Food far off target, then let it drift back
        let target = {
            let system = galaxy.get_system("Greenhold").unwrap();
            let mult = catalogs.economy_multiplier(system.economy, "Food");
            (catalogs.base_price("Food").unwrap() as f64 * mult).round() as Credits
        };
        galaxy
            .get_system_mut("Greenhold")
            .unwrap()
            .market
            .get_mut("Food")
            .unwrap()
            .price = target + 100;

        let mut last_gap = 100;
        for _ in 0..50 {
            run_market_tick(&mut galaxy, &catalogs, &config);
            let price = galaxy.get_system("Greenhold").unwrap().market["Food"].price;
            let gap = price - target;
            assert!(gap >= 0);
            assert!(gap <= last_gap);
            last_gap = gap;
        }
        // Truncating division stalls once the gap drops under drift_factor
        assert!(last_gap > 0 && last_gap < config.drift_factor);
    }

    #[test]
    fn test_famine_expires_after_exact_duration() {
        let mut galaxy = tiny_galaxy();
        let catalogs = Catalogs::default();
        let config = no_noise_config();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        initialize_markets(&mut galaxy, &catalogs, &config, &mut rng);

        galaxy.active_events.insert(
            "Greenhold".to_string(),
            ActiveEvent {
                kind: ActiveEventKind::Famine,
                good: Some("Food".to_string()),
                multiplier: 3.0,
                remaining_days: 10,
            },
        );

        for day in 0..9 {
            let lines = run_market_tick(&mut galaxy, &catalogs, &config);
            assert!(
                galaxy.active_events.contains_key("Greenhold"),
                "event vanished early on tick {day}"
            );
            assert!(lines.is_empty());
        }
        let lines = run_market_tick(&mut galaxy, &catalogs, &config);
        assert!(!galaxy.active_events.contains_key("Greenhold"));
        assert!(lines.iter().any(|l| l.contains("famine")));
    }

    #[test]
    fn test_famine_raises_food_price_while_active() {
        let mut galaxy = tiny_galaxy();
        let catalogs = Catalogs::default();
        let config = no_noise_config();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        initialize_markets(&mut galaxy, &catalogs, &config, &mut rng);

        let before = galaxy.get_system("Greenhold").unwrap().market["Food"].price;
        galaxy.active_events.insert(
            "Greenhold".to_string(),
            ActiveEvent {
                kind: ActiveEventKind::Famine,
                good: Some("Food".to_string()),
                multiplier: 3.0,
                remaining_days: 5,
            },
        );
        run_market_tick(&mut galaxy, &catalogs, &config);
        let after = galaxy.get_system("Greenhold").unwrap().market["Food"].price;
        assert!(after > before, "{after} !> {before}");
    }

    #[test]
    fn test_tick_skips_goods_missing_from_market() {
        let mut galaxy = tiny_galaxy();
        let catalogs = Catalogs::default();
        let config = no_noise_config();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        initialize_markets(&mut galaxy, &catalogs, &config, &mut rng);

        galaxy
            .get_system_mut("Greenhold")
            .unwrap()
            .market
            .remove("Food");
        // Must not panic or re-create the good
        run_market_tick(&mut galaxy, &catalogs, &config);
        assert!(!galaxy.get_system("Greenhold").unwrap().market.contains_key("Food"));
    }

    #[test]
    fn test_tick_leaves_quantity_untouched() {
        let mut galaxy = tiny_galaxy();
        let catalogs = Catalogs::default();
        let config = no_noise_config();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        initialize_markets(&mut galaxy, &catalogs, &config, &mut rng);

        let before: Vec<u32> = galaxy.systems[0].market.values().map(|s| s.quantity).collect();
        for _ in 0..10 {
            run_market_tick(&mut galaxy, &catalogs, &config);
        }
        let after: Vec<u32> = galaxy.systems[0].market.values().map(|s| s.quantity).collect();
        assert_eq!(before, after);
    }
}

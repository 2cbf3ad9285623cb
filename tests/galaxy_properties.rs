//! Structural properties of generated galaxies and markets
//!
//! These hold for every seed, not just the defaults, so they run under
//! proptest across a spread of seeds and grid sizes.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use startrader::catalog::Catalogs;
use startrader::core::config::SimulationConfig;
use startrader::galaxy::{build_galaxy, Galaxy};
use startrader::market::{initialize_markets, run_market_tick};

fn build_seeded(seed: u64, width: i32, height: i32) -> Galaxy {
    let mut config = SimulationConfig::default().galaxy;
    config.width = width;
    config.height = height;
    let catalogs = Catalogs::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    build_galaxy(&config, &catalogs, &mut rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_connections_symmetric(seed in 0u64..10_000, width in 4i32..14, height in 4i32..14) {
        let galaxy = build_seeded(seed, width, height);
        for (name, neighbors) in &galaxy.connections {
            for neighbor in neighbors {
                prop_assert!(
                    galaxy.neighbors(neighbor).contains(name),
                    "{name} -> {neighbor} missing reverse edge"
                );
            }
        }
    }

    #[test]
    fn prop_connected_pairs_are_grid_adjacent(seed in 0u64..10_000) {
        let galaxy = build_seeded(seed, 10, 10);
        for (name, neighbors) in &galaxy.connections {
            let a = galaxy.get_system(name).unwrap().position;
            for neighbor in neighbors {
                let b = galaxy.get_system(neighbor).unwrap().position;
                prop_assert_eq!(a.chebyshev_distance(&b), 1);
            }
        }
    }

    #[test]
    fn prop_fuel_costs_symmetric(seed in 0u64..10_000) {
        let galaxy = build_seeded(seed, 10, 10);
        for ((a, b), cost) in &galaxy.fuel_costs {
            prop_assert_eq!(galaxy.fuel_cost(b, a), Some(*cost));
        }
    }

    #[test]
    fn prop_prices_stay_non_negative(seed in 0u64..10_000, days in 1u32..80) {
        let config = SimulationConfig::default();
        let catalogs = Catalogs::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut galaxy = build_galaxy(&config.galaxy, &catalogs, &mut rng);
        initialize_markets(&mut galaxy, &catalogs, &config.market, &mut rng);

        for _ in 0..days {
            run_market_tick(&mut galaxy, &catalogs, &config.market);
        }
        for system in &galaxy.systems {
            for (good, state) in &system.market {
                prop_assert!(state.price >= 0, "{}: {} went negative", system.name, good);
            }
        }
    }
}

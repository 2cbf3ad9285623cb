//! Starmap construction: fixed anchors plus procedural fill
//!
//! Construction is total: any valid dimensions produce a galaxy, possibly
//! with isolated systems. Connectivity is purely proximity-based (the 8
//! grid neighbors), so disconnected pockets are an expected outcome.

use std::collections::BTreeMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::Catalogs;
use crate::core::config::GalaxyConfig;
use crate::core::types::{EconomyType, GridPos};
use crate::galaxy::{Galaxy, StarSystem};

/// Hand-authored core systems, always present when they fit the grid.
/// These guarantee a stable trading core regardless of the seed.
fn anchor_systems() -> Vec<StarSystem> {
    vec![
        StarSystem::new("Sol", GridPos::new(5, 5), EconomyType::Industrial, "Federation")
            .with_shipyard(),
        StarSystem::new(
            "Alpha Centauri",
            GridPos::new(4, 5),
            EconomyType::Agricultural,
            "Federation",
        ),
        StarSystem::new(
            "Vega Prime",
            GridPos::new(2, 7),
            EconomyType::HighTech,
            "Consortium",
        )
        .with_shipyard(),
        StarSystem::new(
            "Kharon's Rest",
            GridPos::new(8, 2),
            EconomyType::Mining,
            "Crimson Banner",
        )
        .with_black_market(),
    ]
}

/// Build the starmap: anchors first, then one density roll per empty cell,
/// then the proximity graph with per-edge fuel costs.
pub fn build_galaxy(config: &GalaxyConfig, catalogs: &Catalogs, rng: &mut ChaCha8Rng) -> Galaxy {
    let mut systems: Vec<StarSystem> = anchor_systems()
        .into_iter()
        .filter(|s| s.position.x < config.width && s.position.y < config.height)
        .collect();

    for x in 0..config.width {
        for y in 0..config.height {
            let pos = GridPos::new(x, y);
            if systems.iter().any(|s| s.position == pos) {
                continue;
            }
            if !rng.gen_bool(config.system_density) {
                continue;
            }

            let name = roll_system_name(catalogs, &systems, rng);
            let economy = EconomyType::ALL[rng.gen_range(0..EconomyType::ALL.len())];
            let factions = catalogs.factions.spawnable();
            let faction = factions[rng.gen_range(0..factions.len())].clone();

            let mut system = StarSystem::new(name, pos, economy, faction);
            system.has_shipyard = rng.gen_bool(config.shipyard_chance);
            system.has_black_market = rng.gen_bool(config.black_market_chance);
            systems.push(system);
        }
    }

    let (connections, fuel_costs) = connect_systems(&systems, config);

    tracing::info!(
        systems = systems.len(),
        edges = fuel_costs.len() / 2,
        "galaxy built"
    );

    Galaxy {
        systems,
        connections,
        fuel_costs,
        active_events: BTreeMap::new(),
    }
}

/// Concatenate a prefix and suffix from the word banks. Collisions retry a
/// few times, then fall back to a numbered variant so construction stays
/// total.
fn roll_system_name(
    catalogs: &Catalogs,
    existing: &[StarSystem],
    rng: &mut ChaCha8Rng,
) -> String {
    let banks = &catalogs.name_banks;
    let mut candidate = String::new();
    for _ in 0..10 {
        let prefix = &banks.prefixes[rng.gen_range(0..banks.prefixes.len())];
        let suffix = &banks.suffixes[rng.gen_range(0..banks.suffixes.len())];
        candidate = format!("{}{}", prefix, suffix);
        if !existing.iter().any(|s| s.name == candidate) {
            return candidate;
        }
    }
    format!("{} {}", candidate, existing.len())
}

/// Link every placed system to every other placed system in its 8-cell
/// neighborhood and record the fuel cost under both ordered pairs.
fn connect_systems(
    systems: &[StarSystem],
    config: &GalaxyConfig,
) -> (BTreeMap<String, Vec<String>>, BTreeMap<(String, String), u32>) {
    let mut connections: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut fuel_costs: BTreeMap<(String, String), u32> = BTreeMap::new();

    for system in systems {
        connections.entry(system.name.clone()).or_default();
    }

    for (i, a) in systems.iter().enumerate() {
        for b in systems.iter().skip(i + 1) {
            if a.position.chebyshev_distance(&b.position) != 1 {
                continue;
            }
            let cost =
                (a.position.euclidean_distance(&b.position) * config.fuel_cost_per_distance)
                    .floor() as u32;

            connections
                .get_mut(&a.name)
                .expect("every system has an adjacency entry")
                .push(b.name.clone());
            connections
                .get_mut(&b.name)
                .expect("every system has an adjacency entry")
                .push(a.name.clone());
            fuel_costs.insert((a.name.clone(), b.name.clone()), cost);
            fuel_costs.insert((b.name.clone(), a.name.clone()), cost);
        }
    }

    (connections, fuel_costs)
}

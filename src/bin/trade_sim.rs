//! Headless seeded simulation runner
//!
//! Builds a galaxy, then advances a number of days while rolling the
//! travel/trade/explore gates, printing every output line the core
//! returns. Useful for eyeballing pacing and for reproducing seeds.

use std::collections::BTreeMap;

use startrader::catalog::Catalogs;
use startrader::core::config::SimulationConfig;
use startrader::events::Trigger;
use startrader::sim::GameState;

fn main() -> startrader::core::error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("startrader=info")
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);
    let days: u32 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(30);

    let config = SimulationConfig::default();
    let mut game = GameState::new(config, Catalogs::default(), seed)?;

    println!("StarTrader headless run");
    println!("=======================");
    println!("Seed: {seed}");
    println!("Systems: {}", game.galaxy.system_count());
    println!("Starting at: {}", game.player.current_system);
    println!();

    for _ in 0..days {
        let mut lines = game.advance_day();
        lines.extend(game.trigger_event(Trigger::OnTravel, BTreeMap::new()));
        lines.extend(game.trigger_event(Trigger::Random, BTreeMap::new()));

        if !lines.is_empty() {
            println!("--- Day {} ---", game.current_day);
            for line in lines {
                println!("{line}");
            }
        }
    }

    println!();
    println!("Final day: {}", game.current_day);
    println!(
        "Active market events: {}",
        game.galaxy.active_events.len()
    );
    let boards: usize = game
        .galaxy
        .systems
        .iter()
        .map(|s| s.available_missions.len())
        .sum();
    println!("Missions on boards: {boards}");

    let json = game.snapshot_json()?;
    std::fs::write("startrader_save.json", &json)?;
    println!("Save snapshot written to startrader_save.json");

    Ok(())
}

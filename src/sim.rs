//! Simulation facade driven synchronously by the UI layer
//!
//! The whole engine advances in discrete day steps; every mutation happens
//! inside the synchronous call that advances a day or fires an event. The
//! simulation never prints — all human-readable output comes back as
//! `Vec<String>` for the caller to display.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::Catalogs;
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{Credits, Day, MissionId, ShipClass};
use crate::events::library::register_default_events;
use crate::events::{EventContext, EventRegistry, FiredEvent, Trigger, TriggerOutcome};
use crate::galaxy::{build_galaxy, Galaxy};
use crate::market::{initialize_markets, run_market_tick};
use crate::missions::MissionGenerator;

/// Player-side state read by event eligibility and mission acceptance
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub current_system: String,
    pub credits: Credits,
    pub faction_reputation: BTreeMap<String, i32>,
    pub cargo: BTreeMap<String, u32>,
    pub ship_class: ShipClass,
    pub wanted_level: u8,
    pub active_missions: Vec<crate::missions::Mission>,
}

/// Owns every piece of mutable simulation state plus the single RNG
/// stream. Two instances built with the same seed and fed the same call
/// sequence end up byte-identical.
pub struct GameState {
    pub config: SimulationConfig,
    pub catalogs: Catalogs,
    pub galaxy: Galaxy,
    pub player: PlayerState,
    pub current_day: Day,
    registry: EventRegistry,
    missions: MissionGenerator,
    rng: ChaCha8Rng,
}

impl GameState {
    /// Build a fresh session: galaxy, markets, event library, first
    /// mission boards.
    pub fn new(config: SimulationConfig, catalogs: Catalogs, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut galaxy = build_galaxy(&config.galaxy, &catalogs, &mut rng);
        initialize_markets(&mut galaxy, &catalogs, &config.market, &mut rng);

        let mut registry = EventRegistry::new();
        register_default_events(&mut registry);

        let mut missions = MissionGenerator::new();
        missions.refill(&mut galaxy, &catalogs, &config.missions, &mut rng);

        let start_system = galaxy
            .get_system("Sol")
            .map(|s| s.name.clone())
            .or_else(|| galaxy.systems.first().map(|s| s.name.clone()))
            .unwrap_or_default();

        Ok(Self {
            config,
            catalogs,
            galaxy,
            player: PlayerState {
                current_system: start_system,
                credits: 1000,
                faction_reputation: BTreeMap::new(),
                cargo: BTreeMap::new(),
                ship_class: ShipClass::Freighter,
                wanted_level: 0,
                active_missions: Vec::new(),
            },
            current_day: 1,
            registry,
            missions,
            rng,
        })
    }

    /// Advance one in-game day: market drift, mission refill, player
    /// mission expiry, scheduled-event sweep. Returns display lines.
    pub fn advance_day(&mut self) -> Vec<String> {
        self.current_day += 1;
        tracing::debug!(day = self.current_day, "advancing day");

        let mut lines = run_market_tick(&mut self.galaxy, &self.catalogs, &self.config.market);

        self.missions.refill(
            &mut self.galaxy,
            &self.catalogs,
            &self.config.missions,
            &mut self.rng,
        );

        let day = self.current_day;
        let mut expired = Vec::new();
        self.player.active_missions.retain(|mission| {
            if mission.is_expired(day) {
                expired.push(format!(
                    "Mission failed: the contract from {} expired.",
                    mission.origin_system_name
                ));
                false
            } else {
                true
            }
        });
        lines.extend(expired);

        let mut context = self.event_context(BTreeMap::new());
        let fired = self.registry.run_scheduled(&mut context, day);
        for event in fired {
            self.apply_fired(event, &mut lines);
        }

        lines
    }

    /// Run the weighted event gate for a player action (travel, explore,
    /// trade). `extras` carries caller-supplied context keys such as
    /// `activity` or `combat_skill`.
    pub fn trigger_event(
        &mut self,
        trigger: Trigger,
        extras: BTreeMap<String, String>,
    ) -> Vec<String> {
        let mut context = self.event_context(extras);
        let mut lines = Vec::new();
        if let Some(fired) =
            self.registry
                .trigger_random(trigger, &mut context, self.current_day, &mut self.rng)
        {
            self.apply_fired(fired, &mut lines);
        }
        lines
    }

    /// Fire a specific event by id, enforcing eligibility only.
    /// `Ok(None)` means the event was not eligible this call.
    pub fn trigger_specific_event(
        &mut self,
        id: &str,
        extras: BTreeMap<String, String>,
    ) -> Result<Option<Vec<String>>> {
        let mut context = self.event_context(extras);
        match self
            .registry
            .trigger_specific(id, &mut context, self.current_day)?
        {
            TriggerOutcome::NotEligible => Ok(None),
            TriggerOutcome::Fired(fired) => {
                let mut lines = Vec::new();
                self.apply_fired(fired, &mut lines);
                Ok(Some(lines))
            }
        }
    }

    /// Move a mission from the current system's board to the player's
    /// active list, starting its expiration clock. Returns false when the
    /// id is not on the local board.
    pub fn accept_mission(&mut self, id: MissionId) -> bool {
        let day = self.current_day;
        let current = self.player.current_system.clone();
        let Some(system) = self.galaxy.get_system_mut(&current) else {
            return false;
        };
        let Some(index) = system.available_missions.iter().position(|m| m.id == id) else {
            return false;
        };
        let mut mission = system.available_missions.remove(index);
        mission.accept(day);
        tracing::info!(mission = mission.id.0, day, "mission accepted");
        self.player.active_missions.push(mission);
        true
    }

    /// Snapshot of the player's surroundings for event evaluation
    pub fn event_context(&self, extras: BTreeMap<String, String>) -> EventContext {
        let system = self.galaxy.get_system(&self.player.current_system);
        let mut context = EventContext {
            system_name: self.player.current_system.clone(),
            system_faction: system.map(|s| s.faction.clone()).unwrap_or_default(),
            system_economy: system
                .map(|s| s.economy)
                .unwrap_or(crate::core::types::EconomyType::Industrial),
            credits: self.player.credits,
            faction_reputation: self.player.faction_reputation.clone(),
            cargo: self.player.cargo.clone(),
            ship_class: self.player.ship_class,
            wanted_level: self.player.wanted_level,
            extras,
        };
        if system.map(|s| s.has_black_market).unwrap_or(false) {
            context.set_extra("black_market", "true");
        }
        context
    }

    pub(crate) fn mission_generator_mut(&mut self) -> &mut MissionGenerator {
        &mut self.missions
    }

    fn apply_fired(&mut self, fired: FiredEvent, lines: &mut Vec<String>) {
        lines.extend(fired.lines);
        if let Some(event) = fired.market_event {
            self.galaxy
                .active_events
                .insert(self.player.current_system.clone(), event);
        }
    }
}

//! Mission boards: DELIVER / PROCURE / BOUNTY generation
//!
//! Every faction-aligned, connected system keeps its board topped up to a
//! hard cap. A system with no connections, or no lawless neighbor for
//! bounties, simply offers fewer mission types; the refill loop is bounded
//! by the cap, never by the success of a particular draw.

use std::collections::BTreeMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalogs;
use crate::core::config::MissionConfig;
use crate::core::types::{Credits, Day, MissionId};
use crate::galaxy::Galaxy;

/// Route-distance term of the credit reward formula.
///
/// The original engine never wired a real path distance in here; it ships
/// as a constant 1 and save compatibility keeps it that way.
const ROUTE_DISTANCE_PLACEHOLDER: Credits = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionType {
    Deliver,
    Procure,
    Bounty,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A mission, owned by exactly one of: a system's board or the player's
/// active list. Serialized field names match the save format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    #[serde(rename = "type")]
    pub mission_type: MissionType,
    pub origin_system_name: String,
    pub destination_system_name: String,
    pub faction: String,
    /// Cargo good; None for bounties
    pub good: Option<String>,
    /// Cargo quantity; None for bounties
    pub quantity: Option<u32>,
    /// Bounty target; None for cargo missions
    pub target_name: Option<String>,
    pub reward_credits: Credits,
    pub reward_reputation: i32,
    pub time_limit: u32,
    /// Set on acceptance, never at generation time
    pub expiration_day: Option<Day>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub completed: bool,
}

impl Mission {
    /// Start the clock: expiration = acceptance day + time limit
    pub fn accept(&mut self, current_day: Day) {
        self.expiration_day = Some(current_day + self.time_limit);
    }

    /// Expired strictly after the expiration day; unaccepted missions
    /// never expire.
    pub fn is_expired(&self, current_day: Day) -> bool {
        self.expiration_day.map_or(false, |day| current_day > day)
    }
}

/// Fills mission boards. Ids come from a counter so runs with equal seeds
/// produce identical missions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionGenerator {
    next_id: u32,
}

impl Default for MissionGenerator {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl MissionGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> MissionId {
        let id = MissionId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Advance the counter past ids seen in restored state so new
    /// missions never collide with loaded ones.
    pub fn ensure_ids_above(&mut self, max_seen: u32) {
        if self.next_id <= max_seen {
            self.next_id = max_seen + 1;
        }
    }

    /// Top up every eligible system's board to the configured cap.
    ///
    /// Skips neutral-faction systems and systems with zero connections.
    /// Prunes completed missions before refilling.
    pub fn refill(
        &mut self,
        galaxy: &mut Galaxy,
        catalogs: &Catalogs,
        config: &MissionConfig,
        rng: &mut ChaCha8Rng,
    ) {
        let faction_of: BTreeMap<String, String> = galaxy
            .systems
            .iter()
            .map(|s| (s.name.clone(), s.faction.clone()))
            .collect();

        let Galaxy {
            systems,
            connections,
            ..
        } = galaxy;

        for system in systems.iter_mut() {
            if system.faction == catalogs.factions.neutral {
                continue;
            }
            let neighbors = connections
                .get(&system.name)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            if neighbors.is_empty() {
                continue;
            }

            system.available_missions.retain(|m| !m.completed);

            // Bounties only lead into territory the protector does not hold
            let bounty_destinations: Vec<&String> = neighbors
                .iter()
                .filter(|n| {
                    faction_of
                        .get(*n)
                        .map(|f| f != &catalogs.factions.protector)
                        .unwrap_or(false)
                })
                .collect();

            while system.available_missions.len() < config.max_missions_per_system {
                let mut kinds = vec![MissionType::Deliver, MissionType::Procure];
                if !bounty_destinations.is_empty() {
                    kinds.push(MissionType::Bounty);
                }
                let kind = kinds[rng.gen_range(0..kinds.len())];

                let mission = match kind {
                    MissionType::Deliver | MissionType::Procure => {
                        let destination = neighbors[rng.gen_range(0..neighbors.len())].clone();
                        let goods: Vec<_> = catalogs.legal_goods().collect();
                        let good = goods[rng.gen_range(0..goods.len())];
                        let quantity =
                            rng.gen_range(config.quantity_range.0..=config.quantity_range.1);
                        let reward_credits = (good.base_price as f64
                            * quantity as f64
                            * config.reward_value_fraction)
                            .floor() as Credits
                            + ROUTE_DISTANCE_PLACEHOLDER * config.reward_distance_bonus;

                        Mission {
                            id: self.next_id(),
                            mission_type: kind,
                            origin_system_name: system.name.clone(),
                            destination_system_name: destination,
                            faction: system.faction.clone(),
                            good: Some(good.name.clone()),
                            quantity: Some(quantity),
                            target_name: None,
                            reward_credits,
                            reward_reputation: config.cargo_reputation,
                            time_limit: config.time_limit_days,
                            expiration_day: None,
                            completed: false,
                        }
                    }
                    MissionType::Bounty => {
                        let pick = rng.gen_range(0..bounty_destinations.len());
                        let destination = bounty_destinations[pick].clone();
                        let target =
                            catalogs.pirate_names[rng.gen_range(0..catalogs.pirate_names.len())]
                                .clone();

                        Mission {
                            id: self.next_id(),
                            mission_type: kind,
                            origin_system_name: system.name.clone(),
                            destination_system_name: destination,
                            faction: system.faction.clone(),
                            good: None,
                            quantity: None,
                            target_name: Some(target),
                            reward_credits: config.bounty_reward,
                            reward_reputation: config.bounty_reputation,
                            time_limit: config.time_limit_days,
                            expiration_day: None,
                            completed: false,
                        }
                    }
                };

                system.available_missions.push(mission);
            }
        }
    }
}

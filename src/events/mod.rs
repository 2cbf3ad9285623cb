//! Data-driven random encounters: definitions, eligibility, scheduling
//!
//! Event definitions are immutable descriptions registered once at startup;
//! the registry pairs each with a mutable instance counter and selects at
//! most one eligible event per invocation.

pub mod library;
pub mod registry;

pub use registry::{EventRegistry, FiredEvent, TriggerOutcome};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{Credits, Day, EconomyType, ShipClass};
use crate::market::ActiveEvent;

/// Game-action category under which an event may be considered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    OnTravel,
    OnExplore,
    OnTrade,
    Random,
    Scheduled,
    Conditional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Combat,
    Trade,
    Exploration,
    Story,
    Economic,
}

/// Closed set of requirement clauses. Absent clauses are vacuously true;
/// configured clauses must all pass (logical AND).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRequirements {
    /// Current system must be one of these
    pub locations: Option<Vec<String>>,
    /// Current system's faction must be one of these
    pub factions: Option<Vec<String>>,
    /// Current system's economy must be one of these
    pub economies: Option<Vec<EconomyType>>,
    pub min_credits: Option<Credits>,
    /// Per-faction reputation floors; missing reputation counts as 0
    pub min_reputation: BTreeMap<String, i32>,
    pub min_wanted_level: Option<u8>,
    /// Each listed good must be present in cargo with quantity > 0
    pub cargo_goods: Vec<String>,
    pub ship_classes: Option<Vec<ShipClass>>,
    /// Exact string matches against caller-supplied context extras
    pub context_equals: BTreeMap<String, String>,
}

/// Immutable description of a possible occurrence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: EventCategory,
    pub trigger: Trigger,
    /// Base fire probability in [0, 1], before contextual modifiers
    pub base_chance: f64,
    pub requirements: EventRequirements,
    /// Relative selection weight among eligible events (positive)
    pub weight: u32,
    pub cooldown_days: u32,
    pub max_occurrences: Option<u32>,
    /// Exact firing day for Scheduled-trigger events
    pub target_day: Option<Day>,
}

/// Mutable runtime counters paired 1:1 with a definition.
///
/// `last_fired_day: None` means never fired, which satisfies any cooldown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventInstance {
    pub occurrences: u32,
    pub last_fired_day: Option<Day>,
}

/// Read-only snapshot handed to eligibility checks and effects, plus a
/// mutable bag of named string extras the caller and effects both use.
#[derive(Debug, Clone)]
pub struct EventContext {
    pub system_name: String,
    pub system_faction: String,
    pub system_economy: EconomyType,
    pub credits: Credits,
    pub faction_reputation: BTreeMap<String, i32>,
    pub cargo: BTreeMap<String, u32>,
    pub ship_class: ShipClass,
    pub wanted_level: u8,
    pub extras: BTreeMap<String, String>,
}

impl EventContext {
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }

    pub fn extra_f64(&self, key: &str) -> Option<f64> {
        self.extra(key).and_then(|v| v.parse().ok())
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extras.insert(key.into(), value.into());
    }
}

/// What an effect callback hands back: display lines, an optional market
/// distortion for the context's system, and context updates to apply.
#[derive(Debug, Default)]
pub struct EventEffectOutput {
    pub lines: Vec<String>,
    pub market_event: Option<ActiveEvent>,
    pub context_updates: Vec<(String, String)>,
}

/// Opaque effect callback invoked when an event fires
pub type EventEffect = Box<dyn Fn(&EventContext) -> EventEffectOutput>;

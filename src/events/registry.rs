//! Weighted event scheduler with a two-stage probability gate
//!
//! Selection is a deliberate double-filter: a weighted draw over eligible
//! events picks a candidate, then an independent uniform re-roll against
//! that candidate's own dynamic chance decides whether it actually fires.
//! The effective fire rate is therefore lower than the configured chance
//! alone would suggest. That matches the original engine and is kept
//! as-is; do not collapse the two stages.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::{Result, SimError};
use crate::core::types::{Day, ShipClass};
use crate::events::{
    EventCategory, EventContext, EventDefinition, EventEffect, EventEffectOutput, EventInstance,
    Trigger,
};
use crate::market::ActiveEvent;

/// Chance multiplier for exploration-specialized hulls on explore actions
const EXPLORER_CHANCE_BONUS: f64 = 1.5;

/// Floor for the combat-skill scaling of Combat-category events
const COMBAT_CHANCE_FLOOR: f64 = 0.5;

struct Registered {
    definition: EventDefinition,
    effect: EventEffect,
    instance: EventInstance,
}

/// Result of a successful firing
#[derive(Debug)]
pub struct FiredEvent {
    pub id: String,
    pub lines: Vec<String>,
    /// Market distortion to place on the context's system, if any
    pub market_event: Option<ActiveEvent>,
}

/// Outcome of a directly requested firing
#[derive(Debug)]
pub enum TriggerOutcome {
    Fired(FiredEvent),
    NotEligible,
}

/// Registry of event definitions and their runtime counters.
///
/// Registration order is the deterministic iteration order for selection,
/// so identical seeds replay identical draws.
#[derive(Default)]
pub struct EventRegistry {
    events: Vec<Registered>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: EventDefinition, effect: EventEffect) {
        tracing::debug!(id = %definition.id, trigger = ?definition.trigger, "event registered");
        self.events.push(Registered {
            definition,
            effect,
            instance: EventInstance::default(),
        });
    }

    pub fn definition(&self, id: &str) -> Option<&EventDefinition> {
        self.events
            .iter()
            .find(|r| r.definition.id == id)
            .map(|r| &r.definition)
    }

    pub fn instance(&self, id: &str) -> Option<&EventInstance> {
        self.events
            .iter()
            .find(|r| r.definition.id == id)
            .map(|r| &r.instance)
    }

    /// Select and possibly fire one event registered under `trigger`.
    ///
    /// Stage one: weighted draw over eligible events, weight =
    /// `dynamic_chance * configured_weight`. Stage two: independent
    /// uniform re-roll against the selected event's dynamic chance.
    /// Returns `None` when nothing fires, which is the common case.
    pub fn trigger_random(
        &mut self,
        trigger: Trigger,
        context: &mut EventContext,
        current_day: Day,
        rng: &mut ChaCha8Rng,
    ) -> Option<FiredEvent> {
        let candidates: Vec<(usize, f64)> = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, r)| r.definition.trigger == trigger)
            .filter(|(_, r)| is_eligible(&r.definition, &r.instance, context, current_day))
            .map(|(i, r)| (i, dynamic_chance(&r.definition, context)))
            .collect();

        if candidates.is_empty() {
            return None;
        }

        let total: f64 = candidates
            .iter()
            .map(|(i, chance)| chance * self.events[*i].definition.weight as f64)
            .sum();
        if total <= 0.0 {
            return None;
        }

        let mut roll = rng.gen_range(0.0..total);
        let mut selected = candidates[candidates.len() - 1];
        for (i, chance) in &candidates {
            let weight = chance * self.events[*i].definition.weight as f64;
            if roll < weight {
                selected = (*i, *chance);
                break;
            }
            roll -= weight;
        }

        // Stage two: the independent re-roll. A selected event still
        // fizzles when this roll lands above its dynamic chance.
        let (index, chance) = selected;
        if rng.gen_range(0.0..1.0) >= chance {
            return None;
        }

        Some(self.fire(index, context, current_day))
    }

    /// Fire a specific event by id, bypassing weighted selection and the
    /// chance re-roll but still enforcing eligibility.
    pub fn trigger_specific(
        &mut self,
        id: &str,
        context: &mut EventContext,
        current_day: Day,
    ) -> Result<TriggerOutcome> {
        let index = self
            .events
            .iter()
            .position(|r| r.definition.id == id)
            .ok_or_else(|| SimError::UnknownEvent(id.to_string()))?;

        let r = &self.events[index];
        if !is_eligible(&r.definition, &r.instance, context, current_day) {
            return Ok(TriggerOutcome::NotEligible);
        }
        Ok(TriggerOutcome::Fired(self.fire(index, context, current_day)))
    }

    /// Fire every eligible Scheduled event whose target day is exactly
    /// `current_day`.
    pub fn run_scheduled(
        &mut self,
        context: &mut EventContext,
        current_day: Day,
    ) -> Vec<FiredEvent> {
        let due: Vec<usize> = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, r)| r.definition.trigger == Trigger::Scheduled)
            .filter(|(_, r)| r.definition.target_day == Some(current_day))
            .filter(|(_, r)| is_eligible(&r.definition, &r.instance, context, current_day))
            .map(|(i, _)| i)
            .collect();

        due.into_iter()
            .map(|i| self.fire(i, context, current_day))
            .collect()
    }

    fn fire(&mut self, index: usize, context: &mut EventContext, current_day: Day) -> FiredEvent {
        let r = &mut self.events[index];
        r.instance.occurrences += 1;
        r.instance.last_fired_day = Some(current_day);
        tracing::info!(id = %r.definition.id, day = current_day, "event fired");

        let output: EventEffectOutput = (r.effect)(context);
        for (key, value) in output.context_updates {
            context.set_extra(key, value);
        }

        FiredEvent {
            id: r.definition.id.clone(),
            lines: output.lines,
            market_event: output.market_event,
        }
    }
}

/// Cooldown, occurrence cap, and every configured requirement clause.
/// Recomputed from scratch on every invocation; nothing but the counters
/// persists between calls.
fn is_eligible(
    definition: &EventDefinition,
    instance: &EventInstance,
    context: &EventContext,
    current_day: Day,
) -> bool {
    if let Some(last) = instance.last_fired_day {
        if current_day.saturating_sub(last) < definition.cooldown_days {
            return false;
        }
    }
    if let Some(max) = definition.max_occurrences {
        if instance.occurrences >= max {
            return false;
        }
    }

    let req = &definition.requirements;
    if let Some(locations) = &req.locations {
        if !locations.contains(&context.system_name) {
            return false;
        }
    }
    if let Some(factions) = &req.factions {
        if !factions.contains(&context.system_faction) {
            return false;
        }
    }
    if let Some(economies) = &req.economies {
        if !economies.contains(&context.system_economy) {
            return false;
        }
    }
    if let Some(min) = req.min_credits {
        if context.credits < min {
            return false;
        }
    }
    for (faction, min) in &req.min_reputation {
        if context.faction_reputation.get(faction).copied().unwrap_or(0) < *min {
            return false;
        }
    }
    if let Some(min) = req.min_wanted_level {
        if context.wanted_level < min {
            return false;
        }
    }
    for good in &req.cargo_goods {
        if context.cargo.get(good).copied().unwrap_or(0) == 0 {
            return false;
        }
    }
    if let Some(classes) = &req.ship_classes {
        if !classes.contains(&context.ship_class) {
            return false;
        }
    }
    for (key, expected) in &req.context_equals {
        if context.extra(key) != Some(expected.as_str()) {
            return false;
        }
    }

    true
}

/// Contextual chance modifiers on top of base_chance, clamped to [0, 1]
fn dynamic_chance(definition: &EventDefinition, context: &EventContext) -> f64 {
    let mut chance = definition.base_chance;

    if context.extra("activity") == Some("explore") && context.ship_class == ShipClass::Explorer {
        chance *= EXPLORER_CHANCE_BONUS;
    }

    if definition.category == EventCategory::Combat {
        if let Some(skill) = context.extra_f64("combat_skill") {
            chance *= (1.0 - skill).max(COMBAT_CHANCE_FLOOR);
        }
    }

    chance.clamp(0.0, 1.0)
}

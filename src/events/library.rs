//! Built-in event definitions supplied to the registry at startup
//!
//! Economic events place `ActiveEvent` distortions on the market of the
//! system they fire in; the rest only return narrative lines and context
//! flags for the UI layer to act on.

use std::collections::BTreeMap;

use crate::events::{
    EventCategory, EventDefinition, EventEffectOutput, EventRegistry, EventRequirements, Trigger,
};
use crate::market::{ActiveEvent, ActiveEventKind};

/// Register the stock event set
pub fn register_default_events(registry: &mut EventRegistry) {
    registry.register(
        EventDefinition {
            id: "pirate_ambush".to_string(),
            name: "Pirate Ambush".to_string(),
            description: "Raiders intercept the ship mid-route".to_string(),
            category: EventCategory::Combat,
            trigger: Trigger::OnTravel,
            base_chance: 0.25,
            requirements: EventRequirements::default(),
            weight: 10,
            cooldown_days: 3,
            max_occurrences: None,
            target_day: None,
        },
        Box::new(|ctx| EventEffectOutput {
            lines: vec![format!(
                "Alarms blare: pirate raiders drop out of warp on approach to {}!",
                ctx.system_name
            )],
            market_event: None,
            context_updates: vec![("last_encounter".to_string(), "pirate_ambush".to_string())],
        }),
    );

    registry.register(
        EventDefinition {
            id: "customs_inspection".to_string(),
            name: "Customs Inspection".to_string(),
            description: "Federation customs pulls the ship over".to_string(),
            category: EventCategory::Trade,
            trigger: Trigger::OnTrade,
            base_chance: 0.2,
            requirements: EventRequirements {
                min_wanted_level: Some(1),
                factions: Some(vec!["Federation".to_string()]),
                ..Default::default()
            },
            weight: 8,
            cooldown_days: 5,
            max_occurrences: None,
            target_day: None,
        },
        Box::new(|ctx| EventEffectOutput {
            lines: vec![format!(
                "A customs corvette hails you in {}: \"Prepare for inspection.\"",
                ctx.system_name
            )],
            market_event: None,
            context_updates: vec![("last_encounter".to_string(), "customs".to_string())],
        }),
    );

    registry.register(
        EventDefinition {
            id: "derelict_freighter".to_string(),
            name: "Derelict Freighter".to_string(),
            description: "A dead ship drifts at the edge of the system".to_string(),
            category: EventCategory::Exploration,
            trigger: Trigger::OnExplore,
            base_chance: 0.15,
            requirements: EventRequirements::default(),
            weight: 6,
            cooldown_days: 7,
            max_occurrences: Some(5),
            target_day: None,
        },
        Box::new(|ctx| EventEffectOutput {
            lines: vec![format!(
                "Long-range sensors in {} pick up a derelict freighter, hull cold.",
                ctx.system_name
            )],
            market_event: None,
            context_updates: vec![("last_encounter".to_string(), "derelict".to_string())],
        }),
    );

    registry.register(
        EventDefinition {
            id: "famine_outbreak".to_string(),
            name: "Famine".to_string(),
            description: "Crop failure sends food prices soaring".to_string(),
            category: EventCategory::Economic,
            trigger: Trigger::Random,
            base_chance: 0.1,
            requirements: EventRequirements::default(),
            weight: 5,
            cooldown_days: 20,
            max_occurrences: None,
            target_day: None,
        },
        Box::new(|ctx| EventEffectOutput {
            lines: vec![format!(
                "Harvest collapse on {}. Food prices are spiking.",
                ctx.system_name
            )],
            market_event: Some(ActiveEvent {
                kind: ActiveEventKind::Famine,
                good: Some("Food".to_string()),
                multiplier: 3.0,
                remaining_days: 10,
            }),
            context_updates: Vec::new(),
        }),
    );

    registry.register(
        EventDefinition {
            id: "mining_strike".to_string(),
            name: "Mining Strike".to_string(),
            description: "Ore extraction halts over a labor dispute".to_string(),
            category: EventCategory::Economic,
            trigger: Trigger::Random,
            base_chance: 0.1,
            requirements: EventRequirements {
                economies: Some(vec![crate::core::types::EconomyType::Mining]),
                ..Default::default()
            },
            weight: 5,
            cooldown_days: 15,
            max_occurrences: None,
            target_day: None,
        },
        Box::new(|ctx| EventEffectOutput {
            lines: vec![format!(
                "The miners' guild of {} walks out. Ore shipments stall.",
                ctx.system_name
            )],
            market_event: Some(ActiveEvent {
                kind: ActiveEventKind::MiningStrike,
                good: Some("Ore".to_string()),
                multiplier: 2.5,
                remaining_days: 7,
            }),
            context_updates: Vec::new(),
        }),
    );

    registry.register(
        EventDefinition {
            id: "trade_boom".to_string(),
            name: "Trade Boom".to_string(),
            description: "A convoy glut floods the local market".to_string(),
            category: EventCategory::Economic,
            trigger: Trigger::Random,
            base_chance: 0.12,
            requirements: EventRequirements::default(),
            weight: 5,
            cooldown_days: 15,
            max_occurrences: None,
            target_day: None,
        },
        Box::new(|ctx| EventEffectOutput {
            lines: vec![format!(
                "A freight convoy floods {} with cheap goods.",
                ctx.system_name
            )],
            market_event: Some(ActiveEvent {
                kind: ActiveEventKind::TradeBoom,
                good: None,
                multiplier: 0.5,
                remaining_days: 5,
            }),
            context_updates: Vec::new(),
        }),
    );

    registry.register(
        EventDefinition {
            id: "smugglers_offer".to_string(),
            name: "Smuggler's Offer".to_string(),
            description: "A back-alley contact offers restricted cargo".to_string(),
            category: EventCategory::Trade,
            trigger: Trigger::OnTrade,
            base_chance: 0.18,
            requirements: EventRequirements {
                context_equals: {
                    let mut map = BTreeMap::new();
                    map.insert("black_market".to_string(), "true".to_string());
                    map
                },
                ..Default::default()
            },
            weight: 7,
            cooldown_days: 4,
            max_occurrences: None,
            target_day: None,
        },
        Box::new(|ctx| EventEffectOutput {
            lines: vec![format!(
                "In a dim corner of {}'s docks, a smuggler slides you a manifest.",
                ctx.system_name
            )],
            market_event: None,
            context_updates: vec![("last_encounter".to_string(), "smuggler".to_string())],
        }),
    );

    registry.register(
        EventDefinition {
            id: "federation_amnesty".to_string(),
            name: "Federation Amnesty Day".to_string(),
            description: "A one-day pardon for minor offenses".to_string(),
            category: EventCategory::Story,
            trigger: Trigger::Scheduled,
            base_chance: 1.0,
            requirements: EventRequirements {
                min_wanted_level: Some(1),
                ..Default::default()
            },
            weight: 1,
            cooldown_days: 0,
            max_occurrences: Some(1),
            target_day: Some(30),
        },
        Box::new(|_| EventEffectOutput {
            lines: vec![
                "Federation broadcast: amnesty declared for minor offenses. Report to any \
                 customs office today."
                    .to_string(),
            ],
            market_event: None,
            context_updates: vec![("amnesty".to_string(), "granted".to_string())],
        }),
    );
}

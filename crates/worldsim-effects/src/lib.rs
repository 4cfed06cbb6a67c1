//! Pure event-effect application (spec §4.3).
//!
//! `apply_event` reads an event's flat `effects` map and returns the
//! post-effect population and factor values. Unknown keys are ignored
//! silently, which keeps the effect schema forward-compatible: new effect
//! types can be authored without touching this function until support for
//! them is added here.

use worldsim_types::{Event, PopulationState};

/// The mutable pieces of simulation state an event's effects can touch.
/// Location factor, species/habitat identities, and base carrying capacity
/// are never mutated by effects (spec §4.3).
#[derive(Debug, Clone, PartialEq)]
pub struct EffectOutcome {
    pub population: PopulationState,
    pub environmental_factor: f64,
    pub infrastructure_factor: f64,
}

/// Applies one event's effects. Multiple events on the same day must be
/// threaded through this function in ascending event-id order by the
/// caller (the engine); this function itself is order-agnostic given a
/// single event.
pub fn apply_event(
    population: &PopulationState,
    environmental_factor: f64,
    infrastructure_factor: f64,
    event: &Event,
) -> EffectOutcome {
    let mut population = population.clone();
    let mut environmental_factor = environmental_factor;
    let mut infrastructure_factor = infrastructure_factor;

    if let Some(&multiplier) = event.effects.get("shock_multiplier") {
        let multiplier = multiplier.clamp(0.0, 1.0);
        population = population.apply_shock(multiplier);
    }

    if let Some(&damage) = event.effects.get("infrastructure_damage") {
        let damage = damage.clamp(0.0, 1.0);
        infrastructure_factor = (infrastructure_factor * damage).max(0.1);
    }

    if let Some(&boost) = event.effects.get("infrastructure_boost") {
        let boost = boost.clamp(-0.5, 1.0);
        infrastructure_factor = (infrastructure_factor + boost).clamp(0.1, 3.0);
    }

    if let Some(&change) = event.effects.get("environmental_change") {
        let change = change.clamp(-0.5, 0.5);
        environmental_factor = (environmental_factor + change).clamp(0.1, 2.0);
    }

    EffectOutcome {
        population,
        environmental_factor,
        infrastructure_factor,
    }
}

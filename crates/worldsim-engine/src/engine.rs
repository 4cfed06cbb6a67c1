//! The simulation orchestrator (spec §4.4, §4.5).
//!
//! Grounded on the original `SimulationEngine.run`/`_run_chunk`/`_step`,
//! rewritten around the workspace's trait-based collaborators instead of
//! service classes, and its `print`-based progress reporting replaced with
//! `tracing` spans and events the way the teacher instruments `director`.

use crate::chunk::calculate_chunks;
use crate::collaborators::{EntityResolver, EventSource};
use crate::config::SimulationConfig;
use crate::validation::{validate_chunk, ValidationWarning};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use worldsim_effects::apply_event;
use worldsim_formulas::carrying_capacity;
use worldsim_store::SnapshotStore;
use worldsim_types::{
    EntityRef, Granularity, NewSnapshot, PopulationState, TemporalDay, SNAPSHOT_TYPE_SIMULATION,
};

/// The live state of one run. Owned exclusively by the [`SimulationEngine`]
/// for the run's duration (spec §4.4 "Ownership").
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub entity: EntityRef,
    pub entity_name: String,
    pub current_day: i64,
    pub population: PopulationState,
    pub base_carrying_capacity: i64,
    pub environmental_factor: f64,
    pub infrastructure_factor: f64,
    pub location_factor: f64,
}

impl SimulationState {
    /// `K = floor(K_base * f_env * f_infra * f_loc)` (spec §3).
    pub fn effective_capacity(&self) -> i64 {
        carrying_capacity(
            self.base_carrying_capacity,
            self.environmental_factor,
            self.infrastructure_factor,
            self.location_factor,
        )
    }
}

/// Equality over everything except RNG position: two runs that reach the
/// same demographic outcome are "equal" states for resumption tests (spec
/// §8 scenario E) even though their RNGs have advanced by different amounts.
impl PartialEq for SimulationState {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
            && self.entity_name == other.entity_name
            && self.current_day == other.current_day
            && self.population == other.population
            && self.base_carrying_capacity == other.base_carrying_capacity
            && self.environmental_factor == other.environmental_factor
            && self.infrastructure_factor == other.infrastructure_factor
            && self.location_factor == other.location_factor
    }
}

/// Summary emitted after each chunk (spec §4.5 step 5).
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkReport {
    pub start_day: i64,
    pub end_day: i64,
    pub final_population: i64,
    pub effective_capacity: i64,
    pub population_by_species: HashMap<String, i64>,
    pub environmental_factor: f64,
    pub infrastructure_factor: f64,
    pub location_factor: f64,
    pub warnings: Vec<ValidationWarning>,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] worldsim_types::Error),
}

/// Orchestrates one simulation run for one entity (spec §4.5).
pub struct SimulationEngine<'a> {
    entity: EntityRef,
    config: SimulationConfig,
    resolver: &'a dyn EntityResolver,
    event_source: &'a dyn EventSource,
    store: &'a dyn SnapshotStore,
    rng: SmallRng,
    state: Option<SimulationState>,
}

impl<'a> SimulationEngine<'a> {
    pub fn new(
        entity: EntityRef,
        config: SimulationConfig,
        resolver: &'a dyn EntityResolver,
        event_source: &'a dyn EventSource,
        store: &'a dyn SnapshotStore,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            entity,
            config,
            resolver,
            event_source,
            store,
            rng,
            state: None,
        }
    }

    /// The current live state, if a run has started.
    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    /// Runs `[start_day, end_day]` in chunks of at most
    /// `config.chunk_size_days`, writing snapshots at `granularity`'s
    /// cadence (spec §4.5).
    pub fn run(
        &mut self,
        start_day: i64,
        end_day: i64,
        granularity: Granularity,
    ) -> Result<Vec<ChunkReport>, EngineError> {
        if start_day < 0 || start_day >= end_day {
            return Err(EngineError::InvalidArgument(format!(
                "start_day ({start_day}) must be >= 0 and < end_day ({end_day})"
            )));
        }

        if self.resolver.resolve(self.entity).is_none() {
            return Err(EngineError::NotFound(format!(
                "entity {} does not exist",
                self.entity
            )));
        }

        let chunks = calculate_chunks(start_day, end_day, self.config.chunk_size_days);
        tracing::info!(entity = %self.entity, chunks = chunks.len(), seed = ?self.config.seed, "starting run");

        let mut reports = Vec::with_capacity(chunks.len());
        for (chunk_start, chunk_end) in chunks {
            let report = self.run_chunk(chunk_start, chunk_end, granularity)?;
            tracing::info!(
                chunk_start,
                chunk_end,
                final_population = report.final_population,
                warnings = report.warnings.len(),
                "chunk complete"
            );
            reports.push(report);
        }

        Ok(reports)
    }

    fn run_chunk(
        &mut self,
        start_day: i64,
        end_day: i64,
        granularity: Granularity,
    ) -> Result<ChunkReport, EngineError> {
        if self.state.is_none() {
            let initial = self.load_initial_state(start_day)?;
            self.state = Some(initial);
        }

        let events =
            self.event_source
                .list_active_events(self.entity.kind, self.entity.id, start_day, end_day);
        let mut events_by_day: HashMap<i64, Vec<worldsim_types::Event>> = HashMap::new();
        for event in events {
            events_by_day
                .entry(event.astro_day.value())
                .or_default()
                .push(event);
        }
        for day_events in events_by_day.values_mut() {
            day_events.sort_by_key(|e| e.id);
        }

        let snapshot_interval = granularity.interval_days();
        let growth_rates = self.config.growth_rates.clone();
        let mut worst_growth_ratio: f64 = 0.0;

        for day in start_day..=end_day {
            if let Some(day_events) = events_by_day.get(&day) {
                for event in day_events {
                    tracing::debug!(day, event_id = event.id, kind = %event.kind, "applying event");
                    let state = self.state.as_mut().expect("state initialized above");
                    let outcome = apply_event(
                        &state.population,
                        state.environmental_factor,
                        state.infrastructure_factor,
                        event,
                    );
                    state.population = outcome.population;
                    state.environmental_factor = outcome.environmental_factor;
                    state.infrastructure_factor = outcome.infrastructure_factor;
                }
            }

            let total_before;
            {
                let state = self.state.as_mut().expect("state initialized above");
                let k = state.effective_capacity();
                total_before = state.population.total;
                state.population = state.population.apply_growth(&growth_rates, k, 1.0);
                state.current_day = day;
            }

            if total_before > 0 {
                let state = self.state.as_ref().expect("state initialized above");
                let ratio = (state.population.total - total_before) as f64 / total_before as f64;
                if ratio.abs() > worst_growth_ratio.abs() {
                    worst_growth_ratio = ratio;
                }
            }

            if (day - start_day) % snapshot_interval == 0 || day == end_day {
                self.write_snapshot(day, granularity)?;
            }
        }

        let state = self.state.as_ref().expect("state initialized above");
        let warnings = validate_chunk(
            state.population.total,
            state.infrastructure_factor,
            state.environmental_factor,
            state.effective_capacity(),
            worst_growth_ratio,
            self.config.max_growth_rate_per_step,
        );
        for warning in &warnings {
            tracing::warn!(%warning, "validation warning");
        }

        Ok(ChunkReport {
            start_day,
            end_day,
            final_population: state.population.total,
            effective_capacity: state.effective_capacity(),
            population_by_species: state.population.by_species.clone(),
            environmental_factor: state.environmental_factor,
            infrastructure_factor: state.infrastructure_factor,
            location_factor: state.location_factor,
            warnings,
        })
    }

    fn load_initial_state(&mut self, start_day: i64) -> Result<SimulationState, EngineError> {
        let record = self
            .resolver
            .resolve(self.entity)
            .expect("caller already checked entity exists");

        let interpolated = self.store.interpolate(self.entity, TemporalDay(start_day))?;
        let population = match interpolated {
            Some(snapshot) => PopulationState::new(
                snapshot.population_total,
                snapshot.population_by_species.unwrap_or_default(),
                snapshot.population_by_habitat.unwrap_or_default(),
            ),
            None => PopulationState::zero(),
        };

        let (env_low, env_high) = self.config.environmental_factor_range;
        let (loc_low, loc_high) = self.config.location_factor_range;
        let f_env = self.rng.gen_range(env_low..=env_high);
        let f_loc = self.rng.gen_range(loc_low..=loc_high);

        let base_carrying_capacity = record
            .base_carrying_capacity_override
            .unwrap_or_else(|| self.config.base_capacity_for(self.entity.kind));

        tracing::info!(
            entity = %self.entity,
            population = population.total,
            f_env,
            f_loc,
            "initial state loaded"
        );

        Ok(SimulationState {
            entity: self.entity,
            entity_name: record.name,
            current_day: start_day,
            population,
            base_carrying_capacity,
            environmental_factor: f_env,
            infrastructure_factor: self.config.infrastructure_factor_initial,
            location_factor: f_loc,
        })
    }

    fn write_snapshot(&self, day: i64, granularity: Granularity) -> Result<(), EngineError> {
        let state = self.state.as_ref().expect("state initialized above");
        let day_td = TemporalDay(day);

        // Pre-write existence check: safe resumption across chunk
        // boundaries and re-runs with the same seed (spec §4.2, §5).
        if self.store.get_at(self.entity, day_td)?.is_some() {
            return Ok(());
        }

        let new_snapshot = NewSnapshot {
            entity: self.entity,
            astro_day: day_td,
            snapshot_type: SNAPSHOT_TYPE_SIMULATION.to_string(),
            granularity: granularity.as_str().to_string(),
            population_total: state.population.total,
            population_by_species: Some(state.population.by_species.clone()),
            population_by_habitat: Some(state.population.by_habitat.clone()),
            cultural_composition: None,
            economic_data: None,
            metadata: None,
        };
        self.store.create(new_snapshot)?;
        tracing::debug!(entity = %self.entity, day, "snapshot written");
        Ok(())
    }
}

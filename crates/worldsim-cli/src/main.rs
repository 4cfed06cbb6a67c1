//! Ambient CLI binary wiring an in-memory store and a single-entity
//! resolver/event source to the simulation engine (SPEC_FULL §A).
//!
//! This binary, its argument parsing, its config-file loading, and its
//! progress printing are explicitly outside the core's design (spec.md §1
//! "Explicitly out of scope"); it exists because the teacher always ships a
//! runnable binary alongside its library crates.

use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use worldsim_engine::{EntityResolver, EventSource, SimulationConfig, SimulationEngine};
use worldsim_store::{MemoryStore, SnapshotStore};
use worldsim_types::{EntityKind, EntityRecord, EntityRef, Event, Granularity, NewSnapshot};

#[derive(Parser, Debug)]
#[command(name = "worldsim")]
#[command(about = "Macro-scale demographic simulation engine")]
struct Args {
    /// "region" or "province"
    #[arg(long, value_enum, default_value_t = EntityKindArg::Region)]
    entity_kind: EntityKindArg,

    /// Entity id to simulate
    #[arg(long, default_value_t = 1)]
    entity_id: u64,

    /// Display name for the entity (no resolver backend in this binary)
    #[arg(long, default_value = "Unnamed")]
    entity_name: String,

    /// First day of the run, inclusive
    #[arg(long, default_value_t = 0)]
    start_day: i64,

    /// Last day of the run, inclusive
    #[arg(long)]
    end_day: i64,

    /// Snapshot cadence
    #[arg(long, value_enum, default_value_t = GranularityArg::Year)]
    granularity: GranularityArg,

    /// Path to a TOML configuration file (see `SimulationConfig`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides `config.seed`
    #[arg(long)]
    seed: Option<u64>,

    /// Seeds a census snapshot at day 0 with this total population, when
    /// the store has no existing data for the entity
    #[arg(long)]
    seed_population: Option<i64>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum EntityKindArg {
    Region,
    Province,
}

impl From<EntityKindArg> for EntityKind {
    fn from(value: EntityKindArg) -> Self {
        match value {
            EntityKindArg::Region => EntityKind::Region,
            EntityKindArg::Province => EntityKind::Province,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum GranularityArg {
    Year,
    Decade,
    Century,
}

impl From<GranularityArg> for Granularity {
    fn from(value: GranularityArg) -> Self {
        match value {
            GranularityArg::Year => Granularity::Year,
            GranularityArg::Decade => Granularity::Decade,
            GranularityArg::Century => Granularity::Century,
        }
    }
}

/// Resolves exactly one entity, the one named on the command line.
struct SingleEntityResolver(EntityRecord);

impl EntityResolver for SingleEntityResolver {
    fn resolve(&self, entity: EntityRef) -> Option<EntityRecord> {
        if entity == self.0.entity {
            Some(self.0.clone())
        } else {
            None
        }
    }
}

/// No human-authored events in this binary; wiring a real timeline editor
/// is outside the core's scope (spec.md §1).
struct NoEvents;

impl EventSource for NoEvents {
    fn list_active_events(
        &self,
        _entity_kind: EntityKind,
        _entity_id: u64,
        _start_day: i64,
        _end_day: i64,
    ) -> Vec<Event> {
        Vec::new()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path).unwrap_or_else(|e| {
            eprintln!("failed to load config from {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let entity_kind: EntityKind = args.entity_kind.into();
    let entity = EntityRef::new(entity_kind, args.entity_id);
    let granularity: Granularity = args.granularity.into();

    let resolver = SingleEntityResolver(EntityRecord {
        entity,
        name: args.entity_name.clone(),
        base_carrying_capacity_override: None,
    });
    let events = NoEvents;
    let store = MemoryStore::new();

    if let Some(total) = args.seed_population {
        if store
            .get_at(entity, worldsim_types::TemporalDay(args.start_day))
            .unwrap()
            .is_none()
        {
            store
                .create(NewSnapshot {
                    entity,
                    astro_day: worldsim_types::TemporalDay(args.start_day),
                    snapshot_type: worldsim_types::SNAPSHOT_TYPE_CENSUS.to_string(),
                    granularity: granularity.as_str().to_string(),
                    population_total: total,
                    population_by_species: Some(HashMap::new()),
                    population_by_habitat: None,
                    cultural_composition: None,
                    economic_data: None,
                    metadata: None,
                })
                .expect("seeding initial census snapshot");
        }
    }

    println!("Simulating {entity} from day {} to {}", args.start_day, args.end_day);
    println!(
        "Chunk size: {} days, granularity: {}, seed: {:?}",
        config.chunk_size_days,
        granularity,
        config.seed
    );

    let mut engine = SimulationEngine::new(entity, config, &resolver, &events, &store);
    match engine.run(args.start_day, args.end_day, granularity) {
        Ok(reports) => {
            for (i, report) in reports.iter().enumerate() {
                println!(
                    "Chunk {}/{}: days {}-{}, population {}, capacity {}",
                    i + 1,
                    reports.len(),
                    report.start_day,
                    report.end_day,
                    report.final_population,
                    report.effective_capacity
                );
                for warning in &report.warnings {
                    println!("  warning: {warning}");
                }
            }
            println!("Simulation complete.");
        }
        Err(e) => {
            eprintln!("simulation failed: {e}");
            std::process::exit(1);
        }
    }
}

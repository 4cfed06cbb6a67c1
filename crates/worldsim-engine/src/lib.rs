//! The simulation orchestrator: configuration, collaborator contracts,
//! chunking, validation, and the engine itself (spec §4.4, §4.5, §6, §7).

pub mod chunk;
pub mod collaborators;
pub mod config;
pub mod engine;
pub mod validation;

pub use collaborators::{EntityResolver, EventSource};
pub use config::{BaseCapacityConfig, ConfigError, SimulationConfig};
pub use engine::{ChunkReport, EngineError, SimulationEngine, SimulationState};
pub use validation::ValidationWarning;

// --- File: lib.rs ---
// Closed 2D arena of multi-species individuals whose collisions drive infection, predation,
// reproduction and natural death. Produces per-tick population time series.

pub mod collision;
pub mod config;
pub mod constants;
pub mod control;
pub mod error;
pub mod export;
pub mod individual;
pub mod interaction;
pub mod ledger;
pub mod neighbor;
pub mod physics;
pub mod random;
pub mod render;
pub mod simulation;
pub mod species;
pub mod utils;

pub use config::{MortalityGrowth, SimulationConfig, SpeciesConfig};
pub use control::{StopSignal, run};
pub use error::{ConfigError, ExportError};
pub use export::{ProgressLog, SnapshotSink, TimeSeries};
pub use individual::{Health, Individual, IndividualId};
pub use interaction::{InteractionResolver, Outcome};
pub use ledger::{PopulationLedger, Snapshot, SpeciesCounts, SpeciesSnapshot};
pub use random::{RandomSource, ScriptedDraws, SimRng};
pub use simulation::Simulation;
pub use species::{SpeciesCatalog, SpeciesId, SpeciesProfile};
// --- End of File: lib.rs ---

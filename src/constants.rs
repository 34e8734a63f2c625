// --- File: constants.rs ---
// --- Global Simulation Defaults ---
pub const DEFAULT_TIMESTEP: f32 = 1e-3; // Time advanced per tick
pub const DEFAULT_HALF_WIDTH: f32 = 10.0; // Arena spans [-half_width, half_width] on both axes
pub const DEFAULT_INITIAL_SPEED: f32 = 40.0; // Bound on each initial velocity component

// Slack added to an individual's radius when collecting neighbours. This is a detection
// range, not the physical contact distance used by the collision predictor.
pub const DEFAULT_NEIGHBOR_MARGIN: f32 = 2.5;

// Seeded individuals keep this distance from the walls.
pub const SPAWN_WALL_CLEARANCE: f32 = 1.0;

pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000;
pub const DEFAULT_EXPORT_DIR: &str = "data";
pub const POPULATION_TABLE_FILE: &str = "population.csv";
pub const INFECTED_TABLE_FILE: &str = "infected.csv";
// --- End of File: constants.rs ---

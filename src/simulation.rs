// --- File: simulation.rs ---
use crate::collision::{pair_collides, reflect_walls};
use crate::config::{ArenaParams, MortalityGrowth, SimulationConfig};
use crate::constants::*;
use crate::error::ConfigError;
use crate::individual::{Health, Individual, IndividualId};
use crate::interaction::InteractionResolver;
use crate::ledger::{PopulationLedger, Snapshot};
use crate::neighbor::NeighborIndex;
use crate::random::{RandomSource, SimRng};
use crate::species::{SpeciesCatalog, SpeciesId};
use crate::utils::pair_mut;
use glam::Vec2;
use rand::{Rng, SeedableRng};

/// Simulation context: owns the species table, the live set, the ledger and the random source.
/// Advances one tick at a time; nothing outside observes a half-finished tick.
pub struct Simulation {
    catalog: SpeciesCatalog,
    arena: ArenaParams,
    individuals: Vec<Individual>,
    ledger: PopulationLedger,
    neighbors: NeighborIndex,
    neighbor_buffer: Vec<usize>, // Reused across individuals and ticks
    rng: SimRng,
    seed: u64,
    tick: u64,
}

impl Simulation {
    /// Validates `config` and seeds the initial populations. Uses the configured seed, or a
    /// fresh one when none is set.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let seed = config.arena.seed.unwrap_or_else(rand::random);
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: &SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut simulation = Self::empty(config, seed)?;
        simulation.seed_population();
        log::info!(
            "seeded {} individuals across {} species (seed {seed:#x})",
            simulation.individuals.len(),
            simulation.catalog.len()
        );
        Ok(simulation)
    }

    /// A validated arena with no individuals; populate it with [`Simulation::add_individual`].
    pub fn empty(config: &SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        let (catalog, arena) = config.validate()?;
        let neighbors = NeighborIndex::new(catalog.max_radius(), arena.neighbor_margin);
        Ok(Self {
            ledger: PopulationLedger::new(catalog.len()),
            catalog,
            arena,
            individuals: Vec::new(),
            neighbors,
            neighbor_buffer: Vec::new(),
            rng: SimRng::seed_from_u64(seed),
            seed,
            tick: 0,
        })
    }

    fn seed_population(&mut self) {
        let total: usize = self.catalog.iter().map(|(_, p)| p.initial_count).sum();
        self.individuals.reserve(total);

        let half_width = self.arena.half_width;
        let speed = self.arena.initial_speed;
        for species in self.catalog.ids().collect::<Vec<_>>() {
            let profile = self.catalog.get(species);
            let bound = (half_width - SPAWN_WALL_CLEARANCE.max(profile.radius)).max(0.0);
            let (count, risk, infected_fraction) = (
                profile.initial_count,
                profile.mortality_risk,
                profile.initial_infected_fraction,
            );
            for _ in 0..count {
                let position = Vec2::new(
                    self.rng.gen_range(-bound..=bound),
                    self.rng.gen_range(-bound..=bound),
                );
                let velocity = Vec2::new(
                    self.rng.gen_range(-speed..=speed),
                    self.rng.gen_range(-speed..=speed),
                );
                let mut individual =
                    Individual::new(self.ledger.allocate_id(), species, position, velocity, risk);
                if self.rng.chance(infected_fraction) {
                    individual.infect();
                }
                self.ledger.register(&individual);
                self.individuals.push(individual);
            }
        }
    }

    /// Places an individual directly into the live set. Only valid between ticks. Returns
    /// `None` when `species` is not part of this simulation's catalog.
    pub fn add_individual(
        &mut self,
        species: SpeciesId,
        position: Vec2,
        velocity: Vec2,
        health: Health,
    ) -> Option<IndividualId> {
        if !self.catalog.contains(species) {
            log::warn!("ignoring individual of unknown species #{}", species.0);
            return None;
        }
        let risk = self.catalog.get(species).mortality_risk;
        let mut individual =
            Individual::new(self.ledger.allocate_id(), species, position, velocity, risk);
        if health == Health::Infected {
            individual.infect();
        }
        self.ledger.register(&individual);
        let id = individual.id;
        self.individuals.push(individual);
        Some(id)
    }

    /// Advances exactly one tick and returns the snapshot taken at its start.
    pub fn step(&mut self) -> Snapshot {
        // --- Tick boundary: settle last tick's deaths and births ---
        let removed = self.ledger.flush_deaths(&mut self.individuals);
        let added = self.ledger.commit_births(&mut self.individuals);
        if removed > 0 || added > 0 {
            log::debug!("tick {}: {removed} removed, {added} added", self.tick);
        }
        self.ledger.refresh(&self.individuals);
        let snapshot = self.ledger.snapshot(self.tick);

        // --- Sweep ---
        let dt = self.arena.dt;
        let margin = self.arena.neighbor_margin;
        let half_width = self.arena.half_width;
        let resolver = InteractionResolver::new(&self.catalog);
        let mut neighbors = std::mem::take(&mut self.neighbor_buffer);
        self.neighbors.rebuild(&self.individuals);

        for i in 0..self.individuals.len() {
            let radius_i = self.catalog.get(self.individuals[i].species).radius;
            {
                let individual = &mut self.individuals[i];
                individual.position += individual.velocity * dt;
                self.neighbors.relocate(i, individual.position);
            }

            if !self.ledger.is_marked_dead(self.individuals[i].id) {
                self.neighbors
                    .neighbors_of(&self.individuals, i, radius_i, margin, &mut neighbors);
                for &j in &neighbors {
                    if self.ledger.is_marked_dead(self.individuals[i].id) {
                        break;
                    }
                    if self.ledger.is_marked_dead(self.individuals[j].id) {
                        continue;
                    }
                    let radius_j = self.catalog.get(self.individuals[j].species).radius;
                    let (a, b) = pair_mut(&mut self.individuals, i, j);
                    if !pair_collides(a, radius_i, b, radius_j, dt) {
                        continue;
                    }
                    resolver.resolve(a, b, &mut self.ledger, &mut self.rng);
                    // Predation moves the predator to the midpoint.
                    self.neighbors.relocate(i, self.individuals[i].position);
                    self.neighbors.relocate(j, self.individuals[j].position);
                }
            }

            reflect_walls(&mut self.individuals[i], radius_i, half_width, dt);
        }
        self.neighbor_buffer = neighbors;

        // --- Passive mortality growth ---
        let growth = self.arena.mortality_growth;
        for individual in &mut self.individuals {
            if self.ledger.is_marked_dead(individual.id) {
                continue;
            }
            if growth == MortalityGrowth::All || individual.is_infected() {
                let coefficient = self.catalog.get(individual.species).mortality_risk;
                individual.grow_mortality_risk(coefficient);
            }
        }

        self.tick += 1;
        snapshot
    }

    /// Counts as they stand now (pending deaths still included, pending births already counted).
    pub fn snapshot(&self) -> Snapshot {
        self.ledger.snapshot(self.tick)
    }

    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn individual(&self, id: IndividualId) -> Option<&Individual> {
        self.individuals.iter().find(|i| i.id == id)
    }

    #[inline]
    pub fn catalog(&self) -> &SpeciesCatalog {
        &self.catalog
    }

    #[inline]
    pub fn arena(&self) -> &ArenaParams {
        &self.arena
    }

    #[inline]
    pub fn ledger(&self) -> &PopulationLedger {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpeciesConfig;

    fn lone_species(tweak: impl FnOnce(&mut SpeciesConfig)) -> SimulationConfig {
        let mut species = SpeciesConfig {
            name: "dot".into(),
            ..Default::default()
        };
        tweak(&mut species);
        let mut config = SimulationConfig::new();
        config.species = vec![species];
        config
    }

    #[test]
    fn seeding_respects_counts_and_bounds() {
        let config = SimulationConfig::new();
        let sim = Simulation::with_seed(&config, 1).unwrap();
        let expected: usize = config.species.iter().map(|s| s.initial_count).sum();
        assert_eq!(sim.individuals().len(), expected);

        let half_width = config.arena.half_width;
        for individual in sim.individuals() {
            assert!(individual.position.x.abs() <= half_width - 1.0);
            assert!(individual.position.y.abs() <= half_width - 1.0);
            assert!(individual.velocity.x.abs() <= config.arena.initial_speed);
        }
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.total_live(), expected);
        let infected = sim.individuals().iter().filter(|i| i.is_infected()).count();
        assert_eq!(snapshot.total_infected(), infected);
    }

    #[test]
    fn free_flight_advances_by_velocity_times_dt() {
        let config = lone_species(|_| {});
        let mut sim = Simulation::empty(&config, 0).unwrap();
        let id = sim.add_individual(SpeciesId(0), Vec2::new(1.0, 2.0), Vec2::new(10.0, -5.0), Health::Healthy).unwrap();
        let snapshot = sim.step();
        assert_eq!(snapshot.tick, 0);
        assert_eq!(sim.tick(), 1);
        let moved = sim.individual(id).unwrap();
        let dt = config.arena.dt;
        assert!((moved.position - Vec2::new(1.0 + 10.0 * dt, 2.0 - 5.0 * dt)).length() < 1e-6);
    }

    #[test]
    fn wall_reflection_happens_inside_the_sweep() {
        let config = lone_species(|s| s.radius = 0.2);
        let mut sim = Simulation::empty(&config, 0).unwrap();
        let id = sim.add_individual(SpeciesId(0), Vec2::new(9.79, 0.0), Vec2::new(30.0, 4.0), Health::Healthy).unwrap();
        sim.step();
        let individual = sim.individual(id).unwrap();
        assert_eq!(individual.velocity, Vec2::new(-30.0, 4.0));
    }

    #[test]
    fn infected_risk_grows_only_with_interactions() {
        let config = lone_species(|s| s.mortality_risk = 0.1);
        let mut sim = Simulation::empty(&config, 0).unwrap();
        let sick = sim.add_individual(SpeciesId(0), Vec2::new(-5.0, 0.0), Vec2::ZERO, Health::Infected).unwrap();
        let well = sim.add_individual(SpeciesId(0), Vec2::new(5.0, 0.0), Vec2::ZERO, Health::Healthy).unwrap();
        sim.individuals[0].interactions = 2;
        sim.individuals[1].interactions = 2;
        sim.step();
        assert!((sim.individual(sick).unwrap().mortality_risk - 0.12).abs() < 1e-6);
        assert_eq!(sim.individual(well).unwrap().mortality_risk, 0.1);
    }

    #[test]
    fn foreign_species_id_is_refused() {
        let config = lone_species(|_| {});
        let mut sim = Simulation::empty(&config, 0).unwrap();
        let placed = sim.add_individual(SpeciesId(3), Vec2::ZERO, Vec2::ZERO, Health::Infected);
        assert!(placed.is_none());
        assert!(sim.individuals().is_empty());
        assert_eq!(sim.snapshot().total_live(), 0);
        assert_eq!(sim.snapshot().total_infected(), 0);
    }

    #[test]
    fn unbounded_arena_fails_before_seeding() {
        let mut config = SimulationConfig::new();
        config.arena.initial_speed = f32::INFINITY;
        assert!(matches!(
            Simulation::with_seed(&config, 1),
            Err(ConfigError::InvalidArena(_))
        ));

        let mut config = SimulationConfig::new();
        config.arena.half_width = f32::INFINITY;
        assert!(matches!(
            Simulation::with_seed(&config, 1),
            Err(ConfigError::InvalidArena(_))
        ));
    }

    #[test]
    fn all_mode_grows_every_live_individual() {
        let mut config = lone_species(|s| s.mortality_risk = 0.1);
        config.arena.mortality_growth = MortalityGrowth::All;
        let mut sim = Simulation::empty(&config, 0).unwrap();
        let well = sim.add_individual(SpeciesId(0), Vec2::ZERO, Vec2::ZERO, Health::Healthy).unwrap();
        sim.individuals[0].interactions = 1;
        sim.step();
        assert!((sim.individual(well).unwrap().mortality_risk - 0.11).abs() < 1e-6);
    }
}
// --- End of File: simulation.rs ---

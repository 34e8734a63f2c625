use arenasim::config::ArenaConfig;
use arenasim::{
    Health, ProgressLog, Simulation, SimulationConfig, Snapshot, SnapshotSink, SpeciesConfig,
    SpeciesId, StopSignal, TimeSeries,
};
use glam::Vec2;
use std::collections::HashSet;

/// Species with every stochastic rate at zero unless `tweak` says otherwise.
fn species(name: &str, tweak: impl FnOnce(&mut SpeciesConfig)) -> SpeciesConfig {
    let mut config = SpeciesConfig {
        name: name.into(),
        ..Default::default()
    };
    tweak(&mut config);
    config
}

fn scenario(species: Vec<SpeciesConfig>) -> SimulationConfig {
    SimulationConfig {
        arena: ArenaConfig::default(),
        species,
    }
}

/// Default food web with rates raised so every kind of event shows up within a short run.
fn busy_food_web() -> SimulationConfig {
    let mut config = SimulationConfig::new();
    for species in &mut config.species {
        species.birth_probability = (species.birth_probability * 4.0).min(1.0);
        species.mortality_risk = (species.mortality_risk * 10.0).min(1.0);
        species.infection_probability = (species.infection_probability * 3.0).min(1.0);
    }
    config
}

#[derive(Default)]
struct Recorder(Vec<Snapshot>);

impl SnapshotSink for Recorder {
    fn record(&mut self, snapshot: &Snapshot) {
        self.0.push(snapshot.clone());
    }
}

// ==================================================================================
// Scenarios
// ==================================================================================

#[test]
fn certain_infection_converts_the_healthy_partner() {
    let config = scenario(vec![species("host", |s| {
        s.radius = 0.2;
        s.infection_probability = 1.0;
    })]);
    let mut sim = Simulation::empty(&config, 1).unwrap();
    let host = SpeciesId(0);
    let sick = sim.add_individual(host, Vec2::new(-0.1, 0.0), Vec2::new(1.0, 0.0), Health::Infected).unwrap();
    let well = sim.add_individual(host, Vec2::new(0.1, 0.0), Vec2::new(-1.0, 0.0), Health::Healthy).unwrap();

    let first = sim.step();
    assert_eq!(first.species[0].infected, 1);

    assert!(sim.individual(well).unwrap().is_infected());
    assert!(sim.individual(sick).unwrap().is_infected());
    assert_eq!(sim.ledger().pending_deaths(), 0);

    let second = sim.step();
    assert_eq!(second.species[0].live, 2);
    assert_eq!(second.species[0].infected, 2);
}

#[test]
fn certain_predation_removes_prey_by_next_flush() {
    let config = scenario(vec![
        species("fox", |s| {
            s.radius = 0.3;
            s.mass = 3.0;
            s.preys_on = vec!["hen".into()];
        }),
        species("hen", |s| {
            s.radius = 0.15;
            s.predation_probability = 1.0;
        }),
    ]);
    let mut sim = Simulation::empty(&config, 1).unwrap();
    let (fox, hen) = (SpeciesId(0), SpeciesId(1));
    let hunter = sim.add_individual(fox, Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Health::Healthy).unwrap();
    let meal = sim.add_individual(hen, Vec2::new(0.4, 0.0), Vec2::new(-2.0, 0.0), Health::Healthy).unwrap();

    let first = sim.step();
    assert_eq!(first.species[1].live, 1, "prey is still counted during the tick it is eaten");
    assert!(sim.ledger().is_marked_dead(meal));
    assert_eq!(sim.individual(hunter).unwrap().interactions, 0);

    let second = sim.step();
    assert_eq!(second.species[0].live, 1);
    assert_eq!(second.species[1].live, 0);
    assert!(sim.individual(meal).is_none());
    assert_eq!(sim.ledger().counts(hen).died, 1, "prey removed exactly once");
}

#[test]
fn reverse_direction_never_preys() {
    let config = scenario(vec![
        species("fox", |s| {
            s.predation_probability = 1.0;
            s.preys_on = vec!["hen".into()];
        }),
        species("hen", |_| {}),
    ]);
    let mut sim = Simulation::empty(&config, 1).unwrap();
    sim.add_individual(SpeciesId(0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Health::Healthy).unwrap();
    sim.add_individual(SpeciesId(1), Vec2::new(0.3, 0.0), Vec2::new(-1.0, 0.0), Health::Healthy).unwrap();
    for _ in 0..5 {
        let snapshot = sim.step();
        assert_eq!(snapshot.total_live(), 2);
    }
}

#[test]
fn successful_birth_adds_one_individual() {
    let config = scenario(vec![species("rabbit", |s| {
        s.radius = 0.2;
        s.birth_probability = 1.0;
    })]);
    let mut sim = Simulation::empty(&config, 1).unwrap();
    let rabbit = SpeciesId(0);
    sim.add_individual(rabbit, Vec2::new(-0.15, 0.0), Vec2::new(1.0, 0.0), Health::Healthy).unwrap();
    sim.add_individual(rabbit, Vec2::new(0.15, 0.0), Vec2::new(-1.0, 0.0), Health::Healthy).unwrap();

    sim.step();
    let counts = sim.ledger().counts(rabbit);
    assert!(counts.born >= 1);
    assert_eq!(counts.live, 2 + counts.born);
    assert_eq!(sim.individuals().len(), 2, "newborns wait for the tick boundary");

    let snapshot = sim.step();
    assert_eq!(snapshot.species[0].live, 2 + counts.born);
    let newborn = &sim.individuals()[2];
    assert!(!newborn.is_infected());
    assert_eq!(newborn.species, rabbit);
}

// ==================================================================================
// Whole-run properties
// ==================================================================================

#[test]
fn identical_seeds_replay_identically() {
    let config = busy_food_web();
    let mut left = Simulation::with_seed(&config, 42).unwrap();
    let mut right = Simulation::with_seed(&config, 42).unwrap();
    for _ in 0..400 {
        assert_eq!(left.step(), right.step());
    }
    let positions = |sim: &Simulation| -> Vec<Vec2> { sim.individuals().iter().map(|i| i.position).collect() };
    assert_eq!(positions(&left), positions(&right));
}

#[test]
fn ledger_matches_live_set_at_every_boundary() {
    let config = busy_food_web();
    let mut sim = Simulation::with_seed(&config, 7).unwrap();
    let species_count = sim.catalog().len();
    let mut ever_infected: HashSet<u64> = HashSet::new();

    for _ in 0..1_500 {
        sim.step();
        for s in 0..species_count {
            let id = SpeciesId(s);
            let in_set = sim.individuals().iter().filter(|i| i.species == id).count();
            let waiting = sim.ledger().newborns().iter().filter(|i| i.species == id).count();
            let infected = sim
                .individuals()
                .iter()
                .filter(|i| i.species == id && i.is_infected())
                .count();
            let counts = sim.ledger().counts(id);
            assert_eq!(counts.live, in_set + waiting, "live drift for species {s}");
            assert_eq!(counts.infected, infected, "infected drift for species {s}");
        }
        for individual in sim.individuals() {
            if ever_infected.contains(&individual.id.0) {
                assert!(individual.is_infected(), "individual #{} recovered", individual.id.0);
            }
            if individual.is_infected() {
                ever_infected.insert(individual.id.0);
            }
            assert!((0.0..=1.0).contains(&individual.mortality_risk));
        }
    }
    let total_died: usize = (0..species_count).map(|s| sim.ledger().counts(SpeciesId(s)).died).sum();
    assert!(total_died > 0, "a busy run should see some deaths");
}

fn kinetic_energy(sim: &Simulation) -> f64 {
    sim.individuals()
        .iter()
        .map(|i| 0.5 * sim.catalog().get(i.species).mass as f64 * i.velocity.length_squared() as f64)
        .sum()
}

#[test]
fn neutral_gas_stays_boxed_and_keeps_its_energy() {
    // Every stochastic rate off: collisions reduce to the neutral elastic bounce.
    let mut config = SimulationConfig::new();
    for species in &mut config.species {
        species.infection_probability = 0.0;
        species.predation_probability = 0.0;
        species.birth_probability = 0.0;
        species.mortality_risk = 0.0;
    }
    let mut sim = Simulation::with_seed(&config, 11).unwrap();
    let start = kinetic_energy(&sim);
    let limit = config.arena.half_width + 1.0;
    for _ in 0..2_000 {
        let snapshot = sim.step();
        assert_eq!(snapshot.total_live(), 160);
        for individual in sim.individuals() {
            assert!(individual.position.x.abs() <= limit, "escaped: {:?}", individual.position);
            assert!(individual.position.y.abs() <= limit, "escaped: {:?}", individual.position);
        }
    }
    let end = kinetic_energy(&sim);
    assert!(((end - start) / start).abs() < 1e-2, "energy drifted from {start} to {end}");
}

#[test]
fn run_feeds_sinks_and_exports_tables() {
    let config = SimulationConfig::new();
    let mut sim = Simulation::with_seed(&config, 5).unwrap();
    let stop = StopSignal::new();
    let mut series = TimeSeries::new(sim.catalog().names());
    let mut progress = ProgressLog::new(sim.catalog().names(), 4);
    let mut recorder = Recorder::default();

    let ran = arenasim::run(&mut sim, &stop, Some(10), &mut [&mut series, &mut progress, &mut recorder]);
    assert_eq!(ran, 10);
    assert_eq!(recorder.0.len(), 10);
    assert_eq!(series.len(), 10);
    for (row, snapshot) in recorder.0.iter().enumerate() {
        let live: Vec<usize> = snapshot.species.iter().map(|s| s.live).collect();
        assert_eq!(series.live_row(row), live.as_slice());
        assert_eq!(series.ticks()[row], snapshot.tick);
    }

    let dir = std::env::temp_dir().join(format!("arenasim-run-{}", std::process::id()));
    let (population, infected) = series.export_csv(&dir).unwrap();
    let population = std::fs::read_to_string(population).unwrap();
    let infected = std::fs::read_to_string(infected).unwrap();
    assert_eq!(population.lines().count(), 11);
    assert_eq!(infected.lines().next(), Some("tick,mouse,rabbit,cat,lion"));
    assert!(population.lines().nth(1).unwrap().starts_with("0,50,60,30,20"));
    std::fs::remove_dir_all(&dir).ok();
}

// --- File: config.rs ---
use crate::constants::*;
use crate::error::ConfigError;
use crate::species::{SpeciesCatalog, SpeciesId, SpeciesProfile};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Which individuals receive the once-per-tick mortality risk growth.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MortalityGrowth {
    #[default]
    Infected,
    All,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub half_width: f32,
    pub dt: f32,
    pub initial_speed: f32,
    pub neighbor_margin: f32,
    pub seed: Option<u64>,
    pub mortality_growth: MortalityGrowth,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_width: DEFAULT_HALF_WIDTH,
            dt: DEFAULT_TIMESTEP,
            initial_speed: DEFAULT_INITIAL_SPEED,
            neighbor_margin: DEFAULT_NEIGHBOR_MARGIN,
            seed: None,
            mortality_growth: MortalityGrowth::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeciesConfig {
    pub name: String,
    pub radius: f32,
    pub mass: f32,
    pub infection_probability: f32,
    pub predation_probability: f32,
    pub birth_probability: f32,
    pub mortality_risk: f32,
    pub initial_infected_fraction: f32,
    pub initial_count: usize,
    pub preys_on: Vec<String>,
    pub color: [f32; 4],
    pub infected_color: Option<[f32; 4]>, // Falls back to `color`
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            radius: 0.2,
            mass: 1.0,
            infection_probability: 0.0,
            predation_probability: 0.0,
            birth_probability: 0.0,
            mortality_risk: 0.0,
            initial_infected_fraction: 0.0,
            initial_count: 0,
            preys_on: Vec::new(),
            color: [1.0, 1.0, 1.0, 1.0],
            infected_color: None,
        }
    }
}

/// Validated global parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaParams {
    pub half_width: f32,
    pub dt: f32,
    pub initial_speed: f32,
    pub neighbor_margin: f32,
    pub mortality_growth: MortalityGrowth,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub arena: ArenaConfig,
    pub species: Vec<SpeciesConfig>,
}

impl SimulationConfig {
    /// The built-in food web: cats hunt mice and rabbits, lions hunt cats.
    pub fn new() -> Self {
        let mut mouse = SpeciesConfig {
            name: "mouse".into(),
            ..Default::default()
        };
        mouse.radius = 0.15;
        mouse.mass = 1.0;
        mouse.infection_probability = 0.15;
        mouse.predation_probability = 0.6;
        mouse.birth_probability = 0.08;
        mouse.mortality_risk = 0.002;
        mouse.initial_infected_fraction = 0.15;
        mouse.initial_count = 50;
        mouse.color = [0.5, 0.5, 0.5, 1.0]; // Grey
        mouse.infected_color = Some([0.0, 1.0, 0.0, 1.0]);

        let mut rabbit = SpeciesConfig {
            name: "rabbit".into(),
            ..Default::default()
        };
        rabbit.radius = 0.2;
        rabbit.mass = 2.0;
        rabbit.infection_probability = 0.0; // Immune
        rabbit.predation_probability = 0.5;
        rabbit.birth_probability = 0.06;
        rabbit.mortality_risk = 0.002;
        rabbit.initial_count = 60;
        rabbit.color = [1.0, 1.0, 1.0, 1.0]; // White

        let mut cat = SpeciesConfig {
            name: "cat".into(),
            ..Default::default()
        };
        cat.radius = 0.25;
        cat.mass = 3.0;
        cat.infection_probability = 0.1;
        cat.predation_probability = 0.4;
        cat.birth_probability = 0.03;
        cat.mortality_risk = 0.003;
        cat.initial_infected_fraction = 0.1;
        cat.initial_count = 30;
        cat.preys_on = vec!["mouse".into(), "rabbit".into()];
        cat.color = [1.0, 0.5, 0.0, 1.0]; // Orange
        cat.infected_color = Some([0.0, 0.5, 0.0, 1.0]);

        let mut lion = SpeciesConfig {
            name: "lion".into(),
            ..Default::default()
        };
        lion.radius = 0.4;
        lion.mass = 5.0;
        lion.infection_probability = 0.05;
        lion.predation_probability = 0.0; // Apex
        lion.birth_probability = 0.02;
        lion.mortality_risk = 0.004;
        lion.initial_infected_fraction = 0.05;
        lion.initial_count = 20;
        lion.preys_on = vec!["cat".into()];
        lion.color = [1.0, 1.0, 0.0, 1.0]; // Yellow
        lion.infected_color = Some([0.0, 0.2, 0.0, 1.0]);

        Self {
            arena: ArenaConfig::default(),
            species: vec![mouse, rabbit, cat, lion],
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Checks every parameter and resolves predator/prey names into species ids.
    pub fn validate(&self) -> Result<(SpeciesCatalog, ArenaParams), ConfigError> {
        let arena = self.validate_arena()?;
        if self.species.is_empty() {
            return Err(ConfigError::NoSpecies);
        }

        let mut ids: HashMap<&str, SpeciesId> = HashMap::with_capacity(self.species.len());
        for (index, species) in self.species.iter().enumerate() {
            if ids.insert(species.name.as_str(), SpeciesId(index)).is_some() {
                return Err(ConfigError::DuplicateSpecies(species.name.clone()));
            }
        }

        let mut profiles = Vec::with_capacity(self.species.len());
        for species in &self.species {
            profiles.push(species.validate(&ids, arena.half_width)?);
        }
        Ok((SpeciesCatalog::from_profiles(profiles), arena))
    }

    fn validate_arena(&self) -> Result<ArenaParams, ConfigError> {
        let arena = &self.arena;
        // Seeding samples from [-x, x] for these two, so the full span must stay finite.
        for (value, message) in [
            (arena.half_width, "half_width must be finite"),
            (arena.initial_speed, "initial_speed must be finite"),
        ] {
            if !(2.0 * value).is_finite() {
                return Err(ConfigError::InvalidArena(message));
            }
        }
        if !arena.dt.is_finite() {
            return Err(ConfigError::InvalidArena("dt must be finite"));
        }
        if !arena.neighbor_margin.is_finite() {
            return Err(ConfigError::InvalidArena("neighbor_margin must be finite"));
        }
        if !(arena.half_width > 0.0) {
            return Err(ConfigError::InvalidArena("half_width must be positive"));
        }
        if !(arena.dt > 0.0) {
            return Err(ConfigError::InvalidArena("dt must be positive"));
        }
        if !(arena.neighbor_margin >= 0.0) {
            return Err(ConfigError::InvalidArena("neighbor_margin must not be negative"));
        }
        if !(arena.initial_speed >= 0.0) {
            return Err(ConfigError::InvalidArena("initial_speed must not be negative"));
        }
        Ok(ArenaParams {
            half_width: arena.half_width,
            dt: arena.dt,
            initial_speed: arena.initial_speed,
            neighbor_margin: arena.neighbor_margin,
            mortality_growth: arena.mortality_growth,
        })
    }
}

impl SpeciesConfig {
    fn validate(
        &self,
        ids: &HashMap<&str, SpeciesId>,
        half_width: f32,
    ) -> Result<SpeciesProfile, ConfigError> {
        for (field, value) in [("radius", self.radius), ("mass", self.mass)] {
            // Negated comparison also rejects NaN.
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositive {
                    species: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        if self.radius >= half_width {
            return Err(ConfigError::ArenaTooSmall {
                species: self.name.clone(),
                radius: self.radius,
                half_width,
            });
        }
        for (field, value) in [
            ("infection_probability", self.infection_probability),
            ("predation_probability", self.predation_probability),
            ("birth_probability", self.birth_probability),
            ("mortality_risk", self.mortality_risk),
            ("initial_infected_fraction", self.initial_infected_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange {
                    species: self.name.clone(),
                    field,
                    value,
                });
            }
        }

        let preys_on = self
            .preys_on
            .iter()
            .map(|prey| {
                ids.get(prey.as_str())
                    .copied()
                    .ok_or_else(|| ConfigError::UnknownPrey {
                        predator: self.name.clone(),
                        prey: prey.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SpeciesProfile {
            name: self.name.clone(),
            radius: self.radius,
            mass: self.mass,
            infection_probability: self.infection_probability,
            predation_probability: self.predation_probability,
            birth_probability: self.birth_probability,
            mortality_risk: self.mortality_risk,
            initial_infected_fraction: self.initial_infected_fraction,
            initial_count: self.initial_count,
            preys_on,
            color: self.color,
            infected_color: self.infected_color.unwrap_or(self.color),
        })
    }
}

// --- End of File: config.rs ---

// --- File: species.rs ---
// Read-only species table consulted by every interaction.

use std::collections::HashMap;

/// Index of a species inside its [`SpeciesCatalog`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesId(pub usize);

/// Immutable per-species parameters. Probabilities are fractions in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesProfile {
    pub name: String,
    pub radius: f32,
    pub mass: f32,
    pub infection_probability: f32,
    /// Chance that this species is eaten when a configured predator catches it.
    pub predation_probability: f32,
    pub birth_probability: f32,
    /// Starting mortality risk of every individual, also the passive growth coefficient.
    pub mortality_risk: f32,
    pub initial_infected_fraction: f32,
    pub initial_count: usize,
    pub preys_on: Vec<SpeciesId>,
    pub color: [f32; 4],
    pub infected_color: [f32; 4],
}

impl SpeciesProfile {
    #[inline]
    pub fn can_eat(&self, prey: SpeciesId) -> bool {
        self.preys_on.contains(&prey)
    }

    #[inline]
    pub fn display_color(&self, infected: bool) -> [f32; 4] {
        if infected {
            self.infected_color
        } else {
            self.color
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpeciesCatalog {
    profiles: Vec<SpeciesProfile>,
    by_name: HashMap<String, SpeciesId>,
}

impl SpeciesCatalog {
    /// Builds a catalog from already validated profiles (see `SimulationConfig::validate`).
    pub(crate) fn from_profiles(profiles: Vec<SpeciesProfile>) -> Self {
        let by_name = profiles
            .iter()
            .enumerate()
            .map(|(index, profile)| (profile.name.clone(), SpeciesId(index)))
            .collect();
        Self { profiles, by_name }
    }

    #[inline]
    pub fn get(&self, id: SpeciesId) -> &SpeciesProfile {
        &self.profiles[id.0]
    }

    /// Whether `id` names a species of this catalog.
    pub fn contains(&self, id: SpeciesId) -> bool {
        id.0 < self.profiles.len()
    }

    pub fn id_of(&self, name: &str) -> Option<SpeciesId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = SpeciesId> + '_ {
        (0..self.profiles.len()).map(SpeciesId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &SpeciesProfile)> {
        self.profiles
            .iter()
            .enumerate()
            .map(|(index, profile)| (SpeciesId(index), profile))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    /// Largest radius in the table; sizes the neighbour grid.
    pub fn max_radius(&self) -> f32 {
        self.profiles
            .iter()
            .map(|p| p.radius)
            .fold(0.0, f32::max)
    }

    /// Returns `(predator, prey)` if either ordering of the pair is a configured relation.
    /// When both directions are configured the first argument is treated as the predator.
    pub fn predation_roles(&self, a: SpeciesId, b: SpeciesId) -> Option<(SpeciesId, SpeciesId)> {
        if self.get(a).can_eat(b) {
            Some((a, b))
        } else if self.get(b).can_eat(a) {
            Some((b, a))
        } else {
            None
        }
    }
}
// --- End of File: species.rs ---

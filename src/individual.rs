// --- File: individual.rs ---
use crate::species::SpeciesId;
use glam::Vec2;

/// Stable identity of an individual; never reused within a run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualId(pub u64);

/// Health only ever moves from `Healthy` to `Infected`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Health {
    Healthy,
    Infected,
}

/// Pure simulation state of one agent. Mass, radius and colors live in the species table.
#[derive(Debug, Clone)]
pub struct Individual {
    pub id: IndividualId,
    pub species: SpeciesId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub health: Health,
    pub mortality_risk: f32,
    pub interactions: u32,
}

impl Individual {
    pub fn new(
        id: IndividualId,
        species: SpeciesId,
        position: Vec2,
        velocity: Vec2,
        mortality_risk: f32,
    ) -> Self {
        Self {
            id,
            species,
            position,
            velocity,
            health: Health::Healthy,
            mortality_risk,
            interactions: 0,
        }
    }

    #[inline]
    pub fn is_infected(&self) -> bool {
        self.health == Health::Infected
    }

    /// Marks the individual infected. Returns `true` only on the healthy -> infected transition.
    pub fn infect(&mut self) -> bool {
        if self.is_infected() {
            return false;
        }
        self.health = Health::Infected;
        true
    }

    /// Position after `dt` of free flight.
    #[inline]
    pub fn extrapolate(&self, dt: f32) -> Vec2 {
        self.position + self.velocity * dt
    }

    /// Compounding risk growth: proportional to both the interaction count and the current risk.
    pub fn grow_mortality_risk(&mut self, coefficient: f32) {
        let growth = coefficient * self.interactions as f32 * self.mortality_risk;
        self.mortality_risk = (self.mortality_risk + growth).clamp(0.0, 1.0);
    }
}

// --- End of File: individual.rs ---

// --- File: interaction.rs ---
// Outcome resolution for one predicted individual-individual collision.
//
// Outcomes are gated independently and evaluated in a fixed order: infection, predation
// (followed by transmission through consumption), reproduction, natural death, and finally a
// neutral elastic bounce when nobody died. A draw is only taken for a gate whose structural
// preconditions hold, so the number of draws per collision depends on the pair.

use crate::individual::{Individual, IndividualId};
use crate::ledger::PopulationLedger;
use crate::physics::{Body, elastic_collision, inelastic_merge};
use crate::random::RandomSource;
use crate::species::SpeciesCatalog;

/// What a single call to [`InteractionResolver::resolve`] did.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Either side was already marked dead; nothing happened.
    pub skipped: bool,
    pub infected: Option<IndividualId>,
    pub eaten: Option<IndividualId>,
    /// The predator caught the disease from its prey.
    pub infected_by_prey: bool,
    pub born: Option<IndividualId>,
    pub died_first: bool,
    pub died_second: bool,
    pub neutral: bool,
}

pub struct InteractionResolver<'a> {
    catalog: &'a SpeciesCatalog,
}

impl<'a> InteractionResolver<'a> {
    pub fn new(catalog: &'a SpeciesCatalog) -> Self {
        Self { catalog }
    }

    #[inline]
    fn body(&self, individual: &Individual) -> Body {
        Body {
            position: individual.position,
            velocity: individual.velocity,
            mass: self.catalog.get(individual.species).mass,
        }
    }

    fn bounce(&self, a: &mut Individual, b: &mut Individual) {
        let (va, vb) = elastic_collision(self.body(a), self.body(b));
        a.velocity = va;
        b.velocity = vb;
    }

    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        a: &mut Individual,
        b: &mut Individual,
        ledger: &mut PopulationLedger,
        rng: &mut R,
    ) -> Outcome {
        let mut outcome = Outcome::default();
        if ledger.is_marked_dead(a.id) || ledger.is_marked_dead(b.id) {
            outcome.skipped = true;
            return outcome;
        }
        a.interactions += 1;
        b.interactions += 1;

        let name_a = self.catalog.get(a.species).name.as_str();
        let name_b = self.catalog.get(b.species).name.as_str();
        log::trace!("collision between {name_a} #{} and {name_b} #{}", a.id.0, b.id.0);

        // --- Infection ---
        if a.species == b.species
            && a.is_infected() != b.is_infected()
            && rng.chance(self.catalog.get(a.species).infection_probability)
        {
            self.bounce(a, b);
            let susceptible = if a.is_infected() { &mut *b } else { &mut *a };
            if susceptible.infect() {
                ledger.record_infection(susceptible.species);
                outcome.infected = Some(susceptible.id);
                log::debug!("{name_a} #{} infected", susceptible.id.0);
            }
        }

        // --- Predation ---
        if let Some((predator_species, prey_species)) =
            self.catalog.predation_roles(a.species, b.species)
        {
            if rng.chance(self.catalog.get(prey_species).predation_probability) {
                let (predator, prey) = if a.species == predator_species {
                    (&mut *a, &mut *b)
                } else {
                    (&mut *b, &mut *a)
                };
                let (position, velocity) = inelastic_merge(self.body(predator), self.body(prey));
                predator.position = position;
                predator.velocity = velocity;
                predator.interactions = 0;
                ledger.enqueue_death(prey);
                outcome.eaten = Some(prey.id);
                log::debug!(
                    "{} #{} eaten by {} #{}",
                    self.catalog.get(prey_species).name,
                    prey.id.0,
                    self.catalog.get(predator_species).name,
                    predator.id.0
                );

                // Transmission through consumption still needs a shared species.
                if predator.species == prey.species
                    && prey.is_infected()
                    && !predator.is_infected()
                    && rng.chance(self.catalog.get(predator.species).infection_probability)
                    && predator.infect()
                {
                    ledger.record_infection(predator.species);
                    outcome.infected_by_prey = true;
                    log::debug!("predator #{} infected by its prey", predator.id.0);
                }
            }
        }

        // --- Reproduction ---
        if a.species == b.species
            && !ledger.is_marked_dead(a.id)
            && !ledger.is_marked_dead(b.id)
            && rng.chance(self.catalog.get(a.species).birth_probability)
        {
            self.bounce(a, b);
            let (position, velocity) = inelastic_merge(self.body(a), self.body(b));
            let child = ledger.spawn(self.catalog, a.species, position, velocity);
            outcome.born = Some(child);
            log::debug!("{name_a} #{} born to #{} and #{}", child.0, a.id.0, b.id.0);
        }

        // --- Natural death ---
        if !ledger.is_marked_dead(a.id) && rng.chance(a.mortality_risk) {
            outcome.died_first = ledger.enqueue_death(a);
            log::debug!("{name_a} #{} died (risk {:.4})", a.id.0, a.mortality_risk);
        }
        if !ledger.is_marked_dead(b.id) && rng.chance(b.mortality_risk) {
            outcome.died_second = ledger.enqueue_death(b);
            log::debug!("{name_b} #{} died (risk {:.4})", b.id.0, b.mortality_risk);
        }

        // --- Neutral bounce ---
        if !ledger.is_marked_dead(a.id) && !ledger.is_marked_dead(b.id) {
            self.bounce(a, b);
            outcome.neutral = true;
        }
        outcome
    }
}

// --- End of File: interaction.rs ---

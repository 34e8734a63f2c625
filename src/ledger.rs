// --- File: ledger.rs ---
// Per-species population bookkeeping with deferred deaths and births.
//
// Nothing here touches the live set while a sweep is running: deaths are only marked and
// newborns wait in a buffer until the next tick boundary.

use crate::individual::{Individual, IndividualId};
use crate::species::{SpeciesCatalog, SpeciesId};
use glam::Vec2;
use std::collections::HashSet;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SpeciesCounts {
    pub live: usize,
    pub infected: usize,
    pub born: usize,
    pub died: usize,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SpeciesSnapshot {
    pub live: usize,
    pub infected: usize,
}

/// Read-only per-tick projection handed to plotting and export collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub tick: u64,
    pub species: Vec<SpeciesSnapshot>,
}

impl Snapshot {
    pub fn total_live(&self) -> usize {
        self.species.iter().map(|s| s.live).sum()
    }

    pub fn total_infected(&self) -> usize {
        self.species.iter().map(|s| s.infected).sum()
    }
}

#[derive(Debug, Clone)]
pub struct PopulationLedger {
    counts: Vec<SpeciesCounts>,
    marked_dead: HashSet<IndividualId>,
    newborns: Vec<Individual>,
    next_id: u64,
}

impl PopulationLedger {
    pub fn new(species_count: usize) -> Self {
        Self {
            counts: vec![SpeciesCounts::default(); species_count],
            marked_dead: HashSet::new(),
            newborns: Vec::new(),
            next_id: 0,
        }
    }

    pub fn allocate_id(&mut self) -> IndividualId {
        let id = IndividualId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Counts an individual created by initial seeding (not a birth).
    pub fn register(&mut self, individual: &Individual) {
        let counts = &mut self.counts[individual.species.0];
        counts.live += 1;
        if individual.is_infected() {
            counts.infected += 1;
        }
    }

    /// Marks an individual dead. Repeated calls for the same individual are no-ops; returns
    /// whether this call did the marking.
    pub fn enqueue_death(&mut self, individual: &Individual) -> bool {
        self.marked_dead.insert(individual.id)
    }

    #[inline]
    pub fn is_marked_dead(&self, id: IndividualId) -> bool {
        self.marked_dead.contains(&id)
    }

    pub fn pending_deaths(&self) -> usize {
        self.marked_dead.len()
    }

    /// Removes every marked individual from the live set and settles its counters.
    pub fn flush_deaths(&mut self, individuals: &mut Vec<Individual>) -> usize {
        if self.marked_dead.is_empty() {
            return 0;
        }
        let before = individuals.len();
        let marked = &self.marked_dead;
        let counts = &mut self.counts;
        individuals.retain(|individual| {
            if !marked.contains(&individual.id) {
                return true;
            }
            let entry = &mut counts[individual.species.0];
            entry.live = decrement(entry.live, "live");
            if individual.is_infected() {
                entry.infected = decrement(entry.infected, "infected");
            }
            entry.died += 1;
            false
        });
        self.marked_dead.clear();
        before - individuals.len()
    }

    /// Creates a healthy newborn of `species`. It joins the live set at the next tick boundary
    /// but is counted as live and born immediately.
    pub fn spawn(
        &mut self,
        catalog: &SpeciesCatalog,
        species: SpeciesId,
        position: Vec2,
        velocity: Vec2,
    ) -> IndividualId {
        let id = self.allocate_id();
        let risk = catalog.get(species).mortality_risk;
        self.newborns
            .push(Individual::new(id, species, position, velocity, risk));
        let counts = &mut self.counts[species.0];
        counts.live += 1;
        counts.born += 1;
        id
    }

    pub fn pending_births(&self) -> usize {
        self.newborns.len()
    }

    /// Newborns waiting for the next tick boundary.
    pub fn newborns(&self) -> &[Individual] {
        &self.newborns
    }

    /// Appends buffered newborns to the live set.
    pub fn commit_births(&mut self, individuals: &mut Vec<Individual>) -> usize {
        let added = self.newborns.len();
        individuals.append(&mut self.newborns);
        added
    }

    pub fn record_infection(&mut self, species: SpeciesId) {
        self.counts[species.0].infected += 1;
    }

    /// Re-derives live and infected counts from the live set. Drift means a bookkeeping bug, so
    /// it is logged before the counters are corrected.
    pub fn refresh(&mut self, individuals: &[Individual]) {
        let mut live = vec![0usize; self.counts.len()];
        let mut infected = vec![0usize; self.counts.len()];
        // Marked individuals still count until `flush_deaths` settles them.
        for individual in individuals {
            live[individual.species.0] += 1;
            if individual.is_infected() {
                infected[individual.species.0] += 1;
            }
        }
        for individual in &self.newborns {
            live[individual.species.0] += 1;
        }
        for (index, counts) in self.counts.iter_mut().enumerate() {
            if counts.live != live[index] || counts.infected != infected[index] {
                log::warn!(
                    "ledger drift for species #{index}: live {} -> {}, infected {} -> {}",
                    counts.live,
                    live[index],
                    counts.infected,
                    infected[index]
                );
                counts.live = live[index];
                counts.infected = infected[index];
            }
        }
    }

    #[inline]
    pub fn counts(&self, species: SpeciesId) -> SpeciesCounts {
        self.counts[species.0]
    }

    pub fn snapshot(&self, tick: u64) -> Snapshot {
        Snapshot {
            tick,
            species: self
                .counts
                .iter()
                .map(|c| SpeciesSnapshot {
                    live: c.live,
                    infected: c.infected,
                })
                .collect(),
        }
    }
}

fn decrement(value: usize, what: &str) -> usize {
    if value == 0 {
        log::warn!("{what} counter would go negative; clamping at zero");
    }
    value.saturating_sub(1)
}

// --- End of File: ledger.rs ---

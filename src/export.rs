// --- File: export.rs ---
// Snapshot consumers: the accumulated time series written on stop, and a periodic progress log.

use crate::constants::{INFECTED_TABLE_FILE, POPULATION_TABLE_FILE};
use crate::error::ExportError;
use crate::ledger::{Snapshot, SpeciesSnapshot};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Receives every per-tick snapshot in tick order.
pub trait SnapshotSink {
    fn record(&mut self, snapshot: &Snapshot);
}

/// Both time-ordered tables, keyed by tick: live counts and infected counts per species.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    species: Vec<String>,
    ticks: Vec<u64>,
    live: Vec<Vec<usize>>,
    infected: Vec<Vec<usize>>,
}

impl TimeSeries {
    pub fn new<S: Into<String>>(species: impl IntoIterator<Item = S>) -> Self {
        Self {
            species: species.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn ticks(&self) -> &[u64] {
        &self.ticks
    }

    /// Live counts per species at row `row`.
    pub fn live_row(&self, row: usize) -> &[usize] {
        &self.live[row]
    }

    pub fn infected_row(&self, row: usize) -> &[usize] {
        &self.infected[row]
    }

    /// Writes `population.csv` and `infected.csv` into `dir`, creating it if needed.
    pub fn export_csv(&self, dir: &Path) -> Result<(PathBuf, PathBuf), ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let population = dir.join(POPULATION_TABLE_FILE);
        let infected = dir.join(INFECTED_TABLE_FILE);
        self.write_table(&population, &self.live)?;
        self.write_table(&infected, &self.infected)?;
        log::info!(
            "exported {} ticks to {} and {}",
            self.len(),
            population.display(),
            infected.display()
        );
        Ok((population, infected))
    }

    fn write_table(&self, path: &Path, rows: &[Vec<usize>]) -> Result<(), ExportError> {
        let io_error = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
        write!(writer, "tick").map_err(io_error)?;
        for name in &self.species {
            write!(writer, ",{name}").map_err(io_error)?;
        }
        writeln!(writer).map_err(io_error)?;
        for (tick, row) in self.ticks.iter().zip(rows) {
            write!(writer, "{tick}").map_err(io_error)?;
            for value in row {
                write!(writer, ",{value}").map_err(io_error)?;
            }
            writeln!(writer).map_err(io_error)?;
        }
        writer.flush().map_err(io_error)
    }
}

impl SnapshotSink for TimeSeries {
    fn record(&mut self, snapshot: &Snapshot) {
        self.ticks.push(snapshot.tick);
        self.live
            .push(snapshot.species.iter().map(|s: &SpeciesSnapshot| s.live).collect());
        self.infected
            .push(snapshot.species.iter().map(|s| s.infected).collect());
    }
}

/// Logs a one-line population summary every `interval` ticks.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    species: Vec<String>,
    interval: u64,
}

impl ProgressLog {
    pub fn new<S: Into<String>>(species: impl IntoIterator<Item = S>, interval: u64) -> Self {
        Self {
            species: species.into_iter().map(Into::into).collect(),
            interval: interval.max(1),
        }
    }

    pub fn summary(&self, snapshot: &Snapshot) -> String {
        let parts: Vec<String> = self
            .species
            .iter()
            .zip(&snapshot.species)
            .map(|(name, s)| format!("{name}={} ({} inf)", s.live, s.infected))
            .collect();
        format!("tick {}: {}", snapshot.tick, parts.join(", "))
    }
}

impl SnapshotSink for ProgressLog {
    fn record(&mut self, snapshot: &Snapshot) {
        if snapshot.tick % self.interval == 0 {
            log::info!("{}", self.summary(snapshot));
        }
    }
}

// --- End of File: export.rs ---

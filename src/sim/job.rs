use std::{fs::File, io::BufReader, path::Path};

use rand::{Rng, SeedableRng, rngs::StdRng};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

pub use crate::core::state::Job;
use crate::core::state::{Priority, Ticks};

/// Raw process description as supplied by the caller. Fields are signed so
/// that bad input can be reported rather than failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub id: String,
    pub arrival: i64,
    pub burst: i64,
    pub priority: Priority,
}

impl ProcessSpec {
    pub fn new(id: impl Into<String>, arrival: i64, burst: i64, priority: Priority) -> Self {
        Self {
            id: id.into(),
            arrival,
            burst,
            priority,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("process at position {index} has an empty id")]
    EmptyId { index: usize },

    #[error("process {id}: burst must be positive, got {burst}")]
    NonPositiveBurst { id: String, burst: i64 },

    #[error("process {id}: arrival must not be negative, got {arrival}")]
    NegativeArrival { id: String, arrival: i64 },

    #[error("duplicate process id {id}")]
    DuplicateId { id: String },
}

/// Check every spec and convert to [`Job`]s, preserving order. The first
/// offending spec aborts validation.
pub fn validate(specs: &[ProcessSpec]) -> Result<Vec<Job>, SpecError> {
    let mut seen = FxHashSet::default();
    let mut jobs = Vec::with_capacity(specs.len());

    for (index, spec) in specs.iter().enumerate() {
        if spec.id.trim().is_empty() {
            return Err(SpecError::EmptyId { index });
        }
        let burst = Ticks::try_from(spec.burst)
            .ok()
            .filter(|&burst| burst > 0)
            .ok_or_else(|| SpecError::NonPositiveBurst {
                id: spec.id.clone(),
                burst: spec.burst,
            })?;
        let arrival = Ticks::try_from(spec.arrival).map_err(|_| SpecError::NegativeArrival {
            id: spec.id.clone(),
            arrival: spec.arrival,
        })?;
        if !seen.insert(spec.id.as_str()) {
            return Err(SpecError::DuplicateId {
                id: spec.id.clone(),
            });
        }

        jobs.push(Job {
            id: spec.id.clone(),
            arrival,
            burst,
            priority: spec.priority,
        });
    }

    Ok(jobs)
}

/// The classroom workload used when no input is given.
pub fn default_workload() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new("P1", 0, 5, 2),
        ProcessSpec::new("P2", 2, 3, 1),
        ProcessSpec::new("P3", 4, 8, 3),
        ProcessSpec::new("P4", 5, 6, 2),
        ProcessSpec::new("P5", 11, 8, 1),
    ]
}

/// Read a JSON array of process specs.
pub fn load_json(path: &Path) -> Result<Vec<ProcessSpec>, serde_json::Error> {
    let file = File::open(path).map_err(serde_json::Error::io)?;
    serde_json::from_reader(BufReader::new(file))
}

/// Random workload: on each of `ticks` time units a process arrives with
/// probability `p_arrival`; it is short with probability `p_short`.
/// Priorities are drawn uniformly from `1..=4`.
pub fn bernoulli_jobs(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: u64,
    long_ticks: u64,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut specs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            specs.push(ProcessSpec {
                id: format!("P{}", specs.len() + 1),
                arrival: t as i64,
                burst: burst as i64,
                priority: rng.random_range(1..=4),
            });
        }
    }

    specs
}

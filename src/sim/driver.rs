use std::thread;

use tracing::{info, warn};

use super::{
    config::SimConfig,
    job::{Job, ProcessSpec, SpecError, validate},
};
use crate::{
    core::{RunOutcome, SchedCore},
    scheduler::{
        FifoScheduler, LotteryScheduler, MultiQueueScheduler, Policy, PriorityScheduler,
        RoundRobinScheduler, SchedError, SeededDraws, SjfScheduler,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid process spec: {0}")]
    InvalidSpec(#[from] SpecError),

    #[error("{policy} run failed: {source}")]
    Run {
        policy: Policy,
        #[source]
        source: SchedError,
    },

    #[error("invalid configuration: {0}")]
    Config(#[source] SchedError),

    #[error("{policy} worker panicked")]
    WorkerPanicked { policy: Policy },
}

/// Runs each configured policy over the same input. Every run gets its own
/// copy of the process records.
#[derive(Debug, Clone)]
pub struct Sim {
    config: SimConfig,
    seed: u64,
}

impl Sim {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate().map_err(SimError::Config)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self { config, seed })
    }

    /// Lottery seed in effect; log it to reproduce a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validate `specs` once, then run every policy. Fails as a whole if any
    /// run fails.
    pub fn run(&self, specs: &[ProcessSpec]) -> Result<Vec<RunOutcome>, SimError> {
        let jobs = validate(specs).inspect_err(|err| warn!(%err, "rejecting input"))?;
        info!(
            processes = jobs.len(),
            policies = self.config.policies.len(),
            seed = self.seed,
            parallel = self.config.parallel,
            "starting simulation"
        );

        if self.config.parallel {
            self.run_parallel(&jobs)
        } else {
            self.config
                .policies
                .iter()
                .map(|&policy| self.run_policy(policy, &jobs))
                .collect()
        }
    }

    fn run_parallel(&self, jobs: &[Job]) -> Result<Vec<RunOutcome>, SimError> {
        thread::scope(|scope| {
            let handles: Vec<_> = self
                .config
                .policies
                .iter()
                .map(|&policy| (policy, scope.spawn(move || self.run_policy(policy, jobs))))
                .collect();

            // Join in policy order, not completion order
            handles
                .into_iter()
                .map(|(policy, handle)| {
                    handle
                        .join()
                        .map_err(|_| SimError::WorkerPanicked { policy })?
                })
                .collect()
        })
    }

    pub fn run_policy(&self, policy: Policy, jobs: &[Job]) -> Result<RunOutcome, SimError> {
        let result = match policy {
            Policy::Fcfs => SchedCore::new(jobs, FifoScheduler).run(),
            Policy::Sjf => SchedCore::new(jobs, SjfScheduler).run(),
            Policy::RoundRobin => RoundRobinScheduler::new(self.config.round_robin_quantum)
                .and_then(|scheduler| SchedCore::new(jobs, scheduler).run()),
            Policy::Priority => SchedCore::new(jobs, PriorityScheduler).run(),
            Policy::MultiQueue => MultiQueueScheduler::new(self.config.multi_queue_quantum)
                .and_then(|scheduler| SchedCore::new(jobs, scheduler).run()),
            Policy::Lottery => {
                let source = SeededDraws::from_seed(self.seed);
                SchedCore::new(jobs, LotteryScheduler::new(source)).run()
            }
        };
        result.map_err(|source| SimError::Run { policy, source })
    }
}

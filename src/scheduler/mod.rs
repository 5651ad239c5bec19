pub mod fcfs;
pub mod lottery;
pub mod multi_queue;
pub mod priority;
pub mod round_robin;
pub mod sjf;
pub mod tickets;

use std::{fmt, str::FromStr};

use crate::core::{Ticks, state::SchedCtx};
pub use fcfs::FifoScheduler;
pub use lottery::LotteryScheduler;
pub use multi_queue::MultiQueueScheduler;
pub use priority::PriorityScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;
pub use tickets::{ScriptedDraws, SeededDraws, TicketSource};

pub const DEFAULT_QUANTUM: Ticks = 4;

#[derive(Debug, thiserror::Error)]
pub enum SchedError {
    #[error("quantum must be greater than zero")]
    ZeroQuantum,

    #[error("ticket source failed: {reason}")]
    TicketSource { reason: String },

    /// Nothing ready, nothing left to arrive, yet the run is not complete.
    #[error("scheduler stalled at t={now} with unfinished processes")]
    Stalled { now: Ticks },

    #[error("run violated a timing invariant: {detail}")]
    Invariant { detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Policy {
    Fcfs,
    Sjf,
    RoundRobin,
    Priority,
    MultiQueue,
    Lottery,
}

impl Policy {
    /// Every policy, in report order.
    pub const ALL: [Policy; 6] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::RoundRobin,
        Policy::Priority,
        Policy::MultiQueue,
        Policy::Lottery,
    ];

    pub fn is_preemptive(self) -> bool {
        !matches!(self, Policy::Fcfs | Policy::Sjf)
    }

    pub fn is_deterministic(self) -> bool {
        self != Policy::Lottery
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Fcfs => "fcfs",
            Policy::Sjf => "sjf",
            Policy::RoundRobin => "round-robin",
            Policy::Priority => "priority",
            Policy::MultiQueue => "multi-queue",
            Policy::Lottery => "lottery",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown policy '{0}' (expected one of fcfs, sjf, round-robin, priority, multi-queue, lottery)")]
pub struct UnknownPolicy(pub String);

impl FromStr for Policy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "rr" | "round-robin" => Ok(Policy::RoundRobin),
            "priority" | "prio" => Ok(Policy::Priority),
            "mq" | "multi-queue" => Ok(Policy::MultiQueue),
            "lottery" => Ok(Policy::Lottery),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// A dispatch policy. Each implementation owns one complete run over the
/// arena it is handed and must leave every record finished.
pub trait Scheduler {
    fn policy(&self) -> Policy;

    /// Human-readable name used in report headers.
    fn name(&self) -> String;

    fn run(&mut self, ctx: &mut SchedCtx) -> Result<(), SchedError>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::{Job, Priority, RunOutcome, SchedCore, Ticks};

    use super::Scheduler;

    pub fn job(id: &str, arrival: Ticks, burst: Ticks, priority: Priority) -> Job {
        Job {
            id: id.to_string(),
            arrival,
            burst,
            priority,
        }
    }

    /// The five-process workload the simulator ships with.
    pub fn classroom() -> Vec<Job> {
        vec![
            job("P1", 0, 5, 2),
            job("P2", 2, 3, 1),
            job("P3", 4, 8, 3),
            job("P4", 5, 6, 2),
            job("P5", 11, 8, 1),
        ]
    }

    pub fn run<S: Scheduler>(jobs: &[Job], scheduler: S) -> RunOutcome {
        SchedCore::new(jobs, scheduler).run().unwrap()
    }

    /// (id, waiting, turnaround) sorted by id.
    pub fn metrics(outcome: &RunOutcome) -> Vec<(String, u64, u64)> {
        let mut rows: Vec<_> = outcome
            .finished
            .iter()
            .map(|r| (r.id.clone(), r.waiting, r.turnaround))
            .collect();
        rows.sort();
        rows
    }

    pub fn trace(outcome: &RunOutcome) -> Vec<&str> {
        outcome.trace.iter().collect()
    }
}

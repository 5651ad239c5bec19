use std::collections::VecDeque;

use tracing::debug;

use super::{DEFAULT_QUANTUM, Policy, SchedError, Scheduler};
use crate::core::{ProcKey, SchedCtx, Ticks};

/// Round robin over a FIFO ready queue with a fixed quantum.
///
/// A slice is executed in one step. Processes that arrived during the slice
/// are queued ahead of the preempted process.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    quantum: Ticks,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Ticks) -> Result<Self, SchedError> {
        if quantum == 0 {
            return Err(SchedError::ZeroQuantum);
        }
        Ok(Self { quantum })
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn name(&self) -> String {
        format!("Round Robin (Quantum={})", self.quantum)
    }

    fn run(&mut self, ctx: &mut SchedCtx) -> Result<(), SchedError> {
        let mut queue: VecDeque<ProcKey> = VecDeque::with_capacity(ctx.len());

        loop {
            ctx.admit_arrivals(|key, _| queue.push_back(key));

            let Some(key) = queue.pop_front() else {
                if ctx.all_completed() {
                    break;
                }
                ctx.jump_to_next_arrival()?;
                continue;
            };

            let slice = self.quantum.min(ctx.record(key).remaining);
            debug!(id = %ctx.record(key).id, now = ctx.now, slice, "dispatch");
            ctx.dispatch(key);
            let completed = ctx.run_for(key, slice);

            ctx.admit_arrivals(|key, _| queue.push_back(key));
            if !completed {
                queue.push_back(key);
            }
        }
        Ok(())
    }
}

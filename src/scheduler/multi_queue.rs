use std::collections::VecDeque;

use tracing::debug;

use super::{DEFAULT_QUANTUM, Policy, SchedError, Scheduler};
use crate::core::{ProcKey, SchedCtx, Ticks};

/// Priority tiers with round robin inside a tier.
///
/// Before every dispatch the ready queue is stable-sorted by priority, so
/// within one priority value processes keep their FIFO rotation. A
/// dispatched process keeps the CPU for its whole slice: arrivals during the
/// slice are queued one tick at a time but only compete at the next
/// decision point.
#[derive(Debug)]
pub struct MultiQueueScheduler {
    quantum: Ticks,
}

impl MultiQueueScheduler {
    pub fn new(quantum: Ticks) -> Result<Self, SchedError> {
        if quantum == 0 {
            return Err(SchedError::ZeroQuantum);
        }
        Ok(Self { quantum })
    }
}

impl Default for MultiQueueScheduler {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl Scheduler for MultiQueueScheduler {
    fn policy(&self) -> Policy {
        Policy::MultiQueue
    }

    fn name(&self) -> String {
        format!(
            "Priority Scheduling - Multiple Queues (RR with Quantum={})",
            self.quantum
        )
    }

    fn run(&mut self, ctx: &mut SchedCtx) -> Result<(), SchedError> {
        let mut queue: VecDeque<ProcKey> = VecDeque::with_capacity(ctx.len());

        loop {
            ctx.admit_arrivals(|key, _| queue.push_back(key));

            if queue.is_empty() {
                if ctx.all_completed() {
                    break;
                }
                ctx.jump_to_next_arrival()?;
                continue;
            }

            queue
                .make_contiguous()
                .sort_by_key(|&key| ctx.record(key).priority);
            let Some(key) = queue.pop_front() else {
                continue;
            };

            let slice = self.quantum.min(ctx.record(key).remaining);
            if ctx.dispatch(key) {
                debug!(id = %ctx.record(key).id, now = ctx.now, slice, "dispatch");
            }

            let mut completed = false;
            for _ in 0..slice {
                completed = ctx.run_for(key, 1);
                ctx.admit_arrivals(|key, _| queue.push_back(key));
                if completed {
                    break;
                }
            }

            if !completed {
                queue.push_back(key);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::test_support::{classroom, job, metrics, run, trace};
    use pretty_assertions::assert_eq;

    #[test]
    fn classroom_workload() {
        let outcome = run(&classroom(), MultiQueueScheduler::default());

        assert_eq!(
            trace(&outcome),
            vec!["P1", "P2", "P1", "P4", "P5", "P4", "P3"]
        );
        assert_eq!(metrics(&outcome), vec![
            ("P1".to_string(), 3, 8),
            ("P2".to_string(), 2, 5),
            ("P3".to_string(), 18, 26),
            ("P4".to_string(), 11, 17),
            ("P5".to_string(), 1, 9),
        ]);
    }

    #[test]
    fn same_tier_rotates() {
        let outcome = run(
            &[job("A", 0, 4, 1), job("B", 0, 4, 1)],
            MultiQueueScheduler::new(2).unwrap(),
        );
        assert_eq!(trace(&outcome), vec!["A", "B", "A", "B"]);
    }

    #[test]
    fn higher_priority_arrival_waits_for_slice_end() {
        let outcome = run(
            &[job("Low", 0, 6, 5), job("High", 1, 1, 0)],
            MultiQueueScheduler::new(4).unwrap(),
        );

        assert_eq!(trace(&outcome), vec!["Low", "High", "Low"]);
        assert_eq!(outcome.record("High").unwrap().completion, Some(5));
        assert_eq!(outcome.record("High").unwrap().waiting, 3);
    }

    #[test]
    fn lower_tier_starves_until_upper_tier_drains() {
        let outcome = run(
            &[job("Low", 0, 1, 3), job("Hi1", 0, 3, 1), job("Hi2", 0, 3, 1)],
            MultiQueueScheduler::new(1).unwrap(),
        );
        assert_eq!(
            trace(&outcome),
            vec!["Hi1", "Hi2", "Hi1", "Hi2", "Hi1", "Hi2", "Low"]
        );
    }
}

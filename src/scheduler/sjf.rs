use keyed_priority_queue::KeyedPriorityQueue;
use tracing::debug;

use super::{Policy, SchedError, Scheduler};
use crate::core::{ProcKey, Rank, SchedCtx, Ticks};

// (burst, arrival, input position)
type SjfRank = Rank<(Ticks, Ticks, usize)>;

/// Non-preemptive shortest job first.
///
/// At every decision point the ready process with the smallest burst runs to
/// completion. Equal bursts go to the earlier arrival, then to the earlier
/// input position.
#[derive(Debug, Default)]
pub struct SjfScheduler;

impl Scheduler for SjfScheduler {
    fn policy(&self) -> Policy {
        Policy::Sjf
    }

    fn name(&self) -> String {
        "SJF (Shortest Job First)".to_string()
    }

    fn run(&mut self, ctx: &mut SchedCtx) -> Result<(), SchedError> {
        let mut ready: KeyedPriorityQueue<ProcKey, SjfRank> = KeyedPriorityQueue::new();

        while !ctx.all_completed() {
            ctx.admit_arrivals(|key, record| {
                ready.push(key, Rank((record.burst, record.arrival, record.seq)));
            });

            let Some((key, _)) = ready.pop() else {
                ctx.jump_to_next_arrival()?;
                continue;
            };

            let remaining = ctx.record(key).remaining;
            debug!(id = %ctx.record(key).id, now = ctx.now, remaining, "dispatch");
            ctx.dispatch(key);
            ctx.run_for(key, remaining);
        }
        Ok(())
    }
}

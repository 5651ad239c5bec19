use keyed_priority_queue::KeyedPriorityQueue;
use tracing::debug;

use super::{Policy, SchedError, Scheduler};
use crate::core::{Priority, ProcKey, Rank, SchedCtx, Ticks};

// (priority, arrival, input position)
type PrioRank = Rank<(Priority, Ticks, usize)>;

/// Preemptive static priority, re-evaluated every tick. Lower value wins;
/// ties go to the earlier arrival, then the earlier input position.
#[derive(Debug, Default)]
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    fn policy(&self) -> Policy {
        Policy::Priority
    }

    fn name(&self) -> String {
        "Priority Scheduling (Preemptive)".to_string()
    }

    fn run(&mut self, ctx: &mut SchedCtx) -> Result<(), SchedError> {
        let mut ready: KeyedPriorityQueue<ProcKey, PrioRank> = KeyedPriorityQueue::new();

        while !ctx.all_completed() {
            ctx.admit_arrivals(|key, record| {
                ready.push(key, Rank((record.priority, record.arrival, record.seq)));
            });

            let Some(key) = ready.peek().map(|(&key, _)| key) else {
                ctx.jump_to_next_arrival()?;
                continue;
            };

            if ctx.dispatch(key) {
                debug!(id = %ctx.record(key).id, now = ctx.now, "dispatch");
            }
            if ctx.run_for(key, 1) {
                ready.remove(&key);
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
        let outcome = run(&classroom(), PriorityScheduler);

        assert_eq!(
            trace(&outcome),
            vec!["P1", "P2", "P1", "P4", "P5", "P4", "P3"]
        );
        assert_eq!(metrics(&outcome), vec![
            ("P1".to_string(), 3, 8),
            ("P2".to_string(), 0, 3),
            ("P3".to_string(), 18, 26),
            ("P4".to_string(), 11, 17),
            ("P5".to_string(), 0, 8),
        ]);
    }

    #[test]
    fn higher_priority_arrival_preempts_immediately() {
        let outcome = run(&[job("Low", 0, 5, 9), job("High", 2, 1, 0)], PriorityScheduler);

        assert_eq!(trace(&outcome), vec!["Low", "High", "Low"]);
        assert_eq!(outcome.record("High").unwrap().completion, Some(3));
        assert_eq!(outcome.record("Low").unwrap().completion, Some(6));
    }

    #[test]
    fn equal_priority_never_alternates() {
        let outcome = run(&[job("A", 0, 3, 1), job("B", 0, 3, 1)], PriorityScheduler);

        assert_eq!(trace(&outcome), vec!["A", "B"]);
        assert_eq!(outcome.record("A").unwrap().completion, Some(3));
    }

    #[test]
    fn equal_priority_breaks_on_arrival_before_input_position() {
        let outcome = run(
            &[job("Hold", 0, 4, 0), job("X", 3, 1, 5), job("Y", 1, 1, 5)],
            PriorityScheduler,
        );

        assert_eq!(trace(&outcome), vec!["Hold", "Y", "X"]);
        assert_eq!(outcome.record("Y").unwrap().completion, Some(5));
        assert_eq!(outcome.record("X").unwrap().completion, Some(6));
    }

    #[test]
    fn negative_priorities_are_allowed() {
        let outcome = run(&[job("A", 0, 2, 0), job("B", 1, 1, -5)], PriorityScheduler);
        assert_eq!(trace(&outcome), vec!["A", "B", "A"]);
    }
}

use tracing::debug;

use super::{Policy, SchedError, Scheduler};
use crate::core::SchedCtx;

/// First-come, first-served. Runs each process to completion in arrival
/// order; ties keep input order.
#[derive(Debug, Default)]
pub struct FifoScheduler;

impl Scheduler for FifoScheduler {
    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    fn name(&self) -> String {
        "FCFS (First-Come, First-Served)".to_string()
    }

    fn run(&mut self, ctx: &mut SchedCtx) -> Result<(), SchedError> {
        for key in ctx.arrival_order().to_vec() {
            let record = ctx.record(key);
            let (arrival, burst) = (record.arrival, record.burst);
            ctx.advance_to(arrival);

            debug!(id = %ctx.record(key).id, now = ctx.now, "dispatch");
            ctx.dispatch(key);
            ctx.run_for(key, burst);
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
    fn two_process_example() {
        let outcome = run(&[job("P1", 0, 5, 2), job("P2", 2, 3, 1)], FifoScheduler);

        assert_eq!(trace(&outcome), vec!["P1", "P2"]);
        let p2 = outcome.record("P2").unwrap();
        assert_eq!(p2.completion, Some(8));
        assert_eq!(metrics(&outcome), vec![
            ("P1".to_string(), 0, 5),
            ("P2".to_string(), 3, 6),
        ]);
    }

    #[test]
    fn classroom_workload() {
        let outcome = run(&classroom(), FifoScheduler);

        assert_eq!(trace(&outcome), vec!["P1", "P2", "P3", "P4", "P5"]);
        assert_eq!(metrics(&outcome), vec![
            ("P1".to_string(), 0, 5),
            ("P2".to_string(), 3, 6),
            ("P3".to_string(), 4, 12),
            ("P4".to_string(), 11, 17),
            ("P5".to_string(), 11, 19),
        ]);
    }

    #[test]
    fn idle_gap_is_skipped() {
        let outcome = run(&[job("A", 3, 2, 0), job("B", 10, 1, 0)], FifoScheduler);

        assert_eq!(outcome.record("A").unwrap().completion, Some(5));
        assert_eq!(outcome.record("B").unwrap().completion, Some(11));
        assert_eq!(outcome.record("B").unwrap().waiting, 0);
    }

    #[test]
    fn equal_arrivals_keep_input_order() {
        let outcome = run(
            &[job("Z", 0, 1, 0), job("A", 0, 1, 0), job("M", 0, 1, 0)],
            FifoScheduler,
        );
        assert_eq!(trace(&outcome), vec!["Z", "A", "M"]);
    }

    #[test]
    fn empty_input_yields_empty_run() {
        let outcome = run(&[], FifoScheduler);
        assert!(outcome.finished.is_empty());
        assert!(outcome.trace.is_empty());
    }
}

use tracing::{debug, info};

use super::{
    observer,
    state::{Job, ProcessRecord, SchedCtx},
    trace::{ExecutionTrace, Timeline},
};
use crate::scheduler::{Policy, SchedError, Scheduler};

/// Everything a finished run hands to the reporting side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub policy: Policy,
    pub name: String,
    /// In completion order.
    pub finished: Vec<ProcessRecord>,
    pub trace: ExecutionTrace,
    pub timeline: Timeline,
}

impl RunOutcome {
    pub fn record(&self, id: &str) -> Option<&ProcessRecord> {
        self.finished.iter().find(|record| record.id == id)
    }
}

/// One simulation run: a fresh arena driven to completion by `S`.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SchedCtx,
    pub scheduler: S,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(jobs: &[Job], scheduler: S) -> Self {
        Self {
            ctx: SchedCtx::new(jobs),
            scheduler,
        }
    }

    pub fn run(mut self) -> Result<RunOutcome, SchedError> {
        let name = self.scheduler.name();
        debug!(policy = %name, processes = self.ctx.len(), "starting run");

        self.scheduler.run(&mut self.ctx)?;
        observer::observe(&self.ctx)?;

        let policy = self.scheduler.policy();
        let (finished, trace, timeline) = self.ctx.into_parts();
        info!(
            policy = %name,
            dispatches = trace.len(),
            makespan = timeline.makespan(),
            "run complete"
        );

        Ok(RunOutcome {
            policy,
            name,
            finished,
            trace,
            timeline,
        })
    }
}

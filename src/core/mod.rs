pub mod driver;
pub mod observer;
pub mod state;
pub mod trace;

pub use driver::{RunOutcome, SchedCore};
pub use state::{Job, Priority, ProcKey, ProcessRecord, Rank, SchedCtx, Ticks};
pub use trace::{ExecutionTrace, Slice, Timeline};

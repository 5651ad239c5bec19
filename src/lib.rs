//! Single-CPU scheduling simulator.
//!
//! A fixed set of CPU-bound processes is run under six dispatch policies
//! (FCFS, SJF, round robin, preemptive priority, multi-queue priority and
//! lottery). Each run works on its own copy of the processes and yields the
//! finished records together with the execution trace.
//!
//! ```
//! use sched_sim::{Sim, SimConfig, sim::job::default_workload};
//!
//! let sim = Sim::new(SimConfig::new().with_seed(42)).unwrap();
//! let outcomes = sim.run(&default_workload()).unwrap();
//! assert_eq!(outcomes.len(), 6);
//! assert_eq!(outcomes[0].trace.to_string(), "P1 -> P2 -> P3 -> P4 -> P5");
//! ```

pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{ExecutionTrace, RunOutcome};
pub use scheduler::{Policy, Scheduler};
pub use sim::{ProcessSpec, Sim, SimConfig, SimError};

pub mod config;
pub mod driver;
pub mod job;
pub mod report;

pub use config::SimConfig;
pub use driver::{Sim, SimError};
pub use job::{ProcessSpec, SpecError};

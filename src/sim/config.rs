use crate::{
    core::Ticks,
    scheduler::{DEFAULT_QUANTUM, Policy, SchedError},
};

/// Settings shared by every run of one simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub round_robin_quantum: Ticks,
    pub multi_queue_quantum: Ticks,
    /// Lottery seed. `None` picks one at random when the simulator is built.
    pub seed: Option<u64>,
    /// Policies to run. Results always come back in [`Policy::ALL`] order.
    pub policies: Vec<Policy>,
    /// Run policies on separate threads.
    pub parallel: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            round_robin_quantum: DEFAULT_QUANTUM,
            multi_queue_quantum: DEFAULT_QUANTUM,
            seed: None,
            policies: Policy::ALL.to_vec(),
            parallel: false,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_round_robin_quantum(mut self, quantum: Ticks) -> Self {
        self.round_robin_quantum = quantum;
        self
    }

    pub fn with_multi_queue_quantum(mut self, quantum: Ticks) -> Self {
        self.multi_queue_quantum = quantum;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_policies(mut self, policies: impl IntoIterator<Item = Policy>) -> Self {
        let mut policies: Vec<_> = policies.into_iter().collect();
        policies.sort();
        policies.dedup();
        self.policies = policies;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), SchedError> {
        if self.round_robin_quantum == 0 || self.multi_queue_quantum == 0 {
            return Err(SchedError::ZeroQuantum);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_run_everything() {
        let config = SimConfig::new();
        assert_eq!(config.policies, Policy::ALL.to_vec());
        assert_eq!(config.round_robin_quantum, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn policies_are_put_in_report_order() {
        let config = SimConfig::new().with_policies([Policy::Lottery, Policy::Fcfs, Policy::Lottery]);
        assert_eq!(config.policies, vec![Policy::Fcfs, Policy::Lottery]);
    }

    #[test]
    fn zero_quantum_is_rejected() {
        assert!(SimConfig::new().with_multi_queue_quantum(0).validate().is_err());
    }
}

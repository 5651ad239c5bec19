use std::collections::VecDeque;

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::SchedError;

/// Uniform source of lottery draws.
pub trait TicketSource {
    /// Return an index in `[0, bound)`.
    fn draw(&mut self, bound: u64) -> Result<u64, SchedError>;
}

/// Draws backed by a seeded `StdRng`. The same seed reproduces the same
/// sequence.
#[derive(Debug, Clone)]
pub struct SeededDraws {
    rng: StdRng,
}

impl SeededDraws {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TicketSource for SeededDraws {
    fn draw(&mut self, bound: u64) -> Result<u64, SchedError> {
        if bound == 0 {
            return Err(SchedError::TicketSource {
                reason: "cannot draw from an empty pool".to_string(),
            });
        }
        Ok(self.rng.random_range(0..bound))
    }
}

/// Replays a fixed list of draws. Running out, or a draw outside the pool,
/// is an error rather than a silent wrap.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    draws: VecDeque<u64>,
}

impl ScriptedDraws {
    pub fn new(draws: impl IntoIterator<Item = u64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }
}

impl TicketSource for ScriptedDraws {
    fn draw(&mut self, bound: u64) -> Result<u64, SchedError> {
        let draw = self.draws.pop_front().ok_or_else(|| SchedError::TicketSource {
            reason: "scripted draws exhausted".to_string(),
        })?;
        if draw >= bound {
            return Err(SchedError::TicketSource {
                reason: format!("scripted draw {draw} outside pool of {bound}"),
            });
        }
        Ok(draw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_draws_repeat() {
        let mut a = SeededDraws::from_seed(7);
        let mut b = SeededDraws::from_seed(7);
        for bound in 1..50 {
            let x = a.draw(bound).unwrap();
            assert_eq!(x, b.draw(bound).unwrap());
            assert!(x < bound);
        }
    }

    #[test]
    fn seeded_rejects_empty_pool() {
        assert!(SeededDraws::from_seed(1).draw(0).is_err());
    }

    #[test]
    fn scripted_replays_then_fails() {
        let mut draws = ScriptedDraws::new([2, 0]);
        assert_eq!(draws.draw(3).unwrap(), 2);
        assert_eq!(draws.draw(3).unwrap(), 0);
        assert!(draws.draw(3).is_err());
    }

    #[test]
    fn scripted_out_of_range_fails() {
        let mut draws = ScriptedDraws::new([5]);
        assert!(matches!(
            draws.draw(5),
            Err(SchedError::TicketSource { .. })
        ));
    }
}

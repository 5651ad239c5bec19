use tracing::debug;

use super::{Policy, SchedError, Scheduler, tickets::TicketSource};
use crate::core::{Priority, ProcKey, SchedCtx};

/// Ticket count ceiling; priority 3 and above get the floor of one ticket.
pub const TICKET_BASE: Priority = 4;

/// Tickets held by a ready process: `max(1, 4 - priority)`.
pub fn tickets(priority: Priority) -> u64 {
    let tickets = TICKET_BASE.saturating_sub(priority).max(1);
    u64::try_from(tickets).unwrap_or(u64::MAX)
}

/// Proportional-share lottery, one tick per draw.
pub struct LotteryScheduler<T: TicketSource> {
    source: T,
}

impl<T: TicketSource> LotteryScheduler<T> {
    pub fn new(source: T) -> Self {
        Self { source }
    }

    fn pick(&mut self, ctx: &SchedCtx, ready: &[ProcKey]) -> Result<ProcKey, SchedError> {
        let pool = ready
            .iter()
            .map(|&key| tickets(ctx.record(key).priority))
            .fold(0u64, u64::saturating_add);

        // Walking the ready set in arrival order is the same as indexing a
        // ticket list built in that order.
        let mut draw = self.source.draw(pool)?;
        for &key in ready {
            let held = tickets(ctx.record(key).priority);
            if draw < held {
                return Ok(key);
            }
            draw -= held;
        }

        Err(SchedError::TicketSource {
            reason: format!("draw fell outside pool of {pool}"),
        })
    }
}

impl<T: TicketSource> Scheduler for LotteryScheduler<T> {
    fn policy(&self) -> Policy {
        Policy::Lottery
    }

    fn name(&self) -> String {
        "Lottery Scheduling".to_string()
    }

    fn run(&mut self, ctx: &mut SchedCtx) -> Result<(), SchedError> {
        let mut ready: Vec<ProcKey> = Vec::with_capacity(ctx.len());

        while !ctx.all_completed() {
            ready.clear();
            ready.extend(ctx.ready());
            if ready.is_empty() {
                ctx.jump_to_next_arrival()?;
                continue;
            }

            let winner = self.pick(ctx, &ready)?;
            if ctx.dispatch(winner) {
                debug!(
                    id = %ctx.record(winner).id,
                    now = ctx.now,
                    contenders = ready.len(),
                    "dispatch"
                );
            }
            ctx.run_for(winner, 1);
        }
        Ok(())
    }
}

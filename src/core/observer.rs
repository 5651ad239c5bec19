use super::state::SchedCtx;
use crate::scheduler::SchedError;

/// Checks a finished run before its results leave the core.
pub fn observe(ctx: &SchedCtx) -> Result<(), SchedError> {
    if !ctx.all_completed() {
        return Err(invariant(format!(
            "{} of {} processes finished",
            ctx.finished_count(),
            ctx.len()
        )));
    }

    for record in ctx.records() {
        let id = &record.id;
        let completion = record
            .completion
            .ok_or_else(|| invariant(format!("process {id} has no completion time")))?;

        if record.remaining != 0 {
            return Err(invariant(format!(
                "process {id} finished with {} ticks remaining",
                record.remaining
            )));
        }
        if completion < record.arrival {
            return Err(invariant(format!(
                "process {id} completed at {completion} before arriving at {}",
                record.arrival
            )));
        }
        if record.turnaround != completion - record.arrival {
            return Err(invariant(format!(
                "process {id} turnaround {} != completion {completion} - arrival {}",
                record.turnaround, record.arrival
            )));
        }
        if record.waiting + record.burst != record.turnaround {
            return Err(invariant(format!(
                "process {id} waiting {} != turnaround {} - burst {}",
                record.waiting, record.turnaround, record.burst
            )));
        }

        // Conservation, counted twice: on the record and on the timeline
        let busy = ctx.timeline().busy_time(id);
        if record.consumed != record.burst || busy != record.burst {
            return Err(invariant(format!(
                "process {id} ran {} ticks ({busy} on timeline), burst is {}",
                record.consumed, record.burst
            )));
        }
    }

    let entries = ctx.trace().entries();
    if let Some(pair) = entries.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(invariant(format!("trace repeats {} back to back", pair[0])));
    }

    Ok(())
}

fn invariant(detail: String) -> SchedError {
    SchedError::Invariant { detail }
}

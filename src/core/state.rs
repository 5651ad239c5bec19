use slotmap::{SlotMap, new_key_type};
use tracing::trace;

use super::trace::{ExecutionTrace, Timeline};
use crate::scheduler::SchedError;

pub type Ticks = u64;
pub type Priority = i64;
new_key_type! {
    pub struct ProcKey;
}

/// Validated, immutable description of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: Priority,
}

/// Mutable per-run copy of a [`Job`].
///
/// Timing metrics are only meaningful once `remaining` has reached zero, at
/// which point `completion` is set and the record is frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub id: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: Priority,
    // Position in the caller's input; last component of every tie-break
    pub seq: usize,
    pub remaining: Ticks,
    pub consumed: Ticks,
    pub waiting: Ticks,
    pub turnaround: Ticks,
    pub completion: Option<Ticks>,
}

impl ProcessRecord {
    fn new(job: &Job, seq: usize) -> Self {
        Self {
            id: job.id.clone(),
            arrival: job.arrival,
            burst: job.burst,
            priority: job.priority,
            seq,
            remaining: job.burst,
            consumed: 0,
            waiting: 0,
            turnaround: 0,
            completion: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

/// Ordering key for ready-set selection.
///
/// KeyedPriorityQueue is a max-heap, so the comparison is reversed: the
/// smallest key wins.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Rank<K>(pub K);

impl<K: Ord> PartialOrd for Rank<K> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Rank<K> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.0.cmp(&self.0)
    }
}

/// Per-run arena: the clock, the exclusively owned process records, and the
/// trace being accumulated.
#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    records: SlotMap<ProcKey, ProcessRecord>,
    // Stable-sorted by arrival
    arrival_order: Vec<ProcKey>,
    // Index into arrival_order of the next record not yet admitted
    admit_cursor: usize,
    finished: Vec<ProcKey>,
    trace: ExecutionTrace,
    timeline: Timeline,
}

impl SchedCtx {
    pub fn new(jobs: &[Job]) -> Self {
        let mut records = SlotMap::with_capacity_and_key(jobs.len());
        let mut arrival_order: Vec<ProcKey> = jobs
            .iter()
            .enumerate()
            .map(|(seq, job)| records.insert(ProcessRecord::new(job, seq)))
            .collect();
        arrival_order.sort_by_key(|&key| records[key].arrival);

        Self {
            now: 0,
            records,
            arrival_order,
            admit_cursor: 0,
            finished: Vec::with_capacity(jobs.len()),
            trace: ExecutionTrace::new(),
            timeline: Timeline::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, key: ProcKey) -> &ProcessRecord {
        &self.records[key]
    }

    pub fn records(&self) -> impl Iterator<Item = &ProcessRecord> + '_ {
        self.arrival_order.iter().map(|&key| &self.records[key])
    }

    pub fn arrival_order(&self) -> &[ProcKey] {
        &self.arrival_order
    }

    pub fn trace(&self) -> &ExecutionTrace {
        &self.trace
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Records that have arrived and still need CPU time, in arrival order.
    pub fn ready(&self) -> impl Iterator<Item = ProcKey> + '_ {
        self.arrival_order.iter().copied().filter(|&key| {
            let record = &self.records[key];
            record.arrival <= self.now && !record.is_finished()
        })
    }

    /// Hand every record whose arrival is due to `admit`, each exactly once
    /// per run, in arrival order.
    pub fn admit_arrivals(&mut self, mut admit: impl FnMut(ProcKey, &ProcessRecord)) {
        while let Some(&key) = self.arrival_order.get(self.admit_cursor) {
            let record = &self.records[key];
            if record.arrival > self.now {
                break;
            }
            admit(key, record);
            self.admit_cursor += 1;
        }
    }

    /// Earliest arrival among unfinished records.
    pub fn next_arrival(&self) -> Option<Ticks> {
        self.records()
            .filter(|record| !record.is_finished())
            .map(|record| record.arrival)
            .min()
    }

    /// Skip an idle gap. Only valid when nothing is ready at `now`.
    pub fn jump_to_next_arrival(&mut self) -> Result<(), SchedError> {
        match self.next_arrival() {
            Some(arrival) if arrival > self.now => {
                trace!(from = self.now, to = arrival, "cpu idle, advancing clock");
                self.now = arrival;
                Ok(())
            }
            _ => Err(SchedError::Stalled { now: self.now }),
        }
    }

    pub fn advance_to(&mut self, time: Ticks) {
        self.now = self.now.max(time);
    }

    /// Note that `key` was picked to run next. Returns true if this changed
    /// the running process.
    pub fn dispatch(&mut self, key: ProcKey) -> bool {
        self.trace.record(&self.records[key].id)
    }

    /// Run `key` for `ticks` units starting now. Returns true if the record
    /// completed.
    pub fn run_for(&mut self, key: ProcKey, ticks: Ticks) -> bool {
        let start = self.now;
        let record = &mut self.records[key];
        debug_assert!(
            ticks <= record.remaining,
            "Process {} asked to run {ticks} ticks with {} remaining",
            record.id,
            record.remaining
        );

        let ticks = ticks.min(record.remaining);
        record.remaining -= ticks;
        record.consumed = record.consumed.saturating_add(ticks);
        self.now = self.now.saturating_add(ticks);
        self.timeline.record(&record.id, start, self.now);

        if record.is_finished() {
            self.mark_completed(key);
            true
        } else {
            false
        }
    }

    fn mark_completed(&mut self, key: ProcKey) {
        let now = self.now;
        let record = &mut self.records[key];
        debug_assert!(
            record.completion.is_none(),
            "Process {} completed twice",
            record.id
        );

        record.completion = Some(now);
        record.turnaround = now - record.arrival;
        record.waiting = record.turnaround - record.burst;
        self.finished.push(key);
    }

    pub fn finished_count(&self) -> usize {
        self.finished.len()
    }

    pub fn all_completed(&self) -> bool {
        self.finished.len() == self.records.len()
    }

    /// Finished records in completion order, plus the trace and timeline.
    pub fn into_parts(mut self) -> (Vec<ProcessRecord>, ExecutionTrace, Timeline) {
        let finished = self
            .finished
            .iter()
            .filter_map(|&key| self.records.remove(key))
            .collect();
        (finished, self.trace, self.timeline)
    }
}

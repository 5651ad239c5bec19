use std::fmt;

use super::state::Ticks;

/// Ordered log of dispatch events.
///
/// One entry per change of running process; re-dispatching the process that
/// is already at the tail does not add an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionTrace {
    entries: Vec<String>,
}

impl ExecutionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a new entry was appended.
    pub fn record(&mut self, id: &str) -> bool {
        if self.entries.last().is_some_and(|last| last == id) {
            return false;
        }
        self.entries.push(id.to_string());
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ExecutionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entries.join(" -> "))
    }
}

/// A contiguous stretch of CPU time given to one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    pub id: String,
    pub start: Ticks,
    pub end: Ticks,
}

impl Slice {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Per-tick occupancy, run-length encoded. Unlike [`ExecutionTrace`] this
/// keeps timestamps, so idle gaps are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    slices: Vec<Slice>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: &str, start: Ticks, end: Ticks) {
        if start == end {
            return;
        }
        if let Some(last) = self.slices.last_mut() {
            if last.id == id && last.end == start {
                last.end = end;
                return;
            }
        }
        self.slices.push(Slice {
            id: id.to_string(),
            start,
            end,
        });
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Total CPU time given to `id`.
    pub fn busy_time(&self, id: &str) -> Ticks {
        self.slices
            .iter()
            .filter(|slice| slice.id == id)
            .map(Slice::duration)
            .sum()
    }

    /// Time at which the last slice ends.
    pub fn makespan(&self) -> Ticks {
        self.slices.last().map_or(0, |slice| slice.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trace_collapses_repeats() {
        let mut trace = ExecutionTrace::new();
        assert!(trace.record("P1"));
        assert!(!trace.record("P1"));
        assert!(trace.record("P2"));
        assert!(trace.record("P1"));
        assert_eq!(trace.to_string(), "P1 -> P2 -> P1");
    }

    #[test]
    fn empty_trace_renders_empty() {
        assert_eq!(ExecutionTrace::new().to_string(), "");
    }

    #[test]
    fn timeline_merges_adjacent_slices() {
        let mut timeline = Timeline::new();
        timeline.record("P1", 0, 1);
        timeline.record("P1", 1, 2);
        timeline.record("P2", 4, 6);
        timeline.record("P1", 6, 7);

        assert_eq!(timeline.slices().len(), 3);
        assert_eq!(timeline.busy_time("P1"), 3);
        assert_eq!(timeline.busy_time("P2"), 2);
        assert_eq!(timeline.makespan(), 7);
    }

    #[test]
    fn timeline_keeps_gap_between_same_process() {
        let mut timeline = Timeline::new();
        timeline.record("P1", 0, 2);
        timeline.record("P1", 5, 6);
        assert_eq!(timeline.slices().len(), 2);
    }
}

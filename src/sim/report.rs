use std::fmt::Write;

use average::{Estimate, Mean};

use crate::core::{ProcessRecord, RunOutcome};

pub const POLICY_SEPARATOR: &str =
    "------------------------------------------------------------\n";

/// Mean waiting and turnaround time; both zero for an empty set.
pub fn averages(finished: &[ProcessRecord]) -> (f64, f64) {
    let waiting = avg(finished.iter().map(|r| r.waiting as f64));
    let turnaround = avg(finished.iter().map(|r| r.turnaround as f64));
    (waiting, turnaround)
}

/// Render one run: execution order, per-process table sorted by id, and
/// averages.
pub fn render(outcome: &RunOutcome) -> String {
    let mut rows: Vec<&ProcessRecord> = outcome.finished.iter().collect();
    rows.sort_by(|a, b| a.id.cmp(&b.id));
    let (avg_waiting, avg_turnaround) = averages(&outcome.finished);

    // Writing to a String cannot fail
    let mut out = String::new();
    let _ = writeln!(out, "Results for algorithm: {}", outcome.name);
    let _ = writeln!(out, "{}", "-".repeat(30));
    let _ = writeln!(out, "Execution order: {}", outcome.trace);
    let _ = writeln!(out);
    let _ = writeln!(out, "Per-process metrics:");
    let _ = writeln!(
        out,
        "{:<10}| {:<18}| {}",
        "Process", "Waiting time", "Turnaround time"
    );
    let _ = writeln!(out, "{}", "-".repeat(50));
    for record in rows {
        let _ = writeln!(
            out,
            "{:<10}| {:<18}| {}",
            record.id, record.waiting, record.turnaround
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Average metrics:");
    let _ = writeln!(out, "Average waiting time: {avg_waiting:.2}");
    let _ = writeln!(out, "Average turnaround time: {avg_turnaround:.2}");
    let _ = writeln!(out);
    out
}

/// Render every run in the order given, separated by a dashed line.
pub fn render_all(outcomes: &[RunOutcome]) -> String {
    outcomes
        .iter()
        .map(render)
        .collect::<Vec<_>>()
        .join(POLICY_SEPARATOR)
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

//! Derived views: pure read-only projections of the task sequence
//!
//! These functions are recomputed on every render; none of them mutate or
//! cache anything.

use std::cmp::Ordering;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::task::Task;

/// Total order used to display tasks after a prioritization pass.
///
/// Done tasks sort after all non-done tasks regardless of priority; among
/// the rest, ascending priority with "unprioritized" treated as +infinity;
/// ties broken by ascending deadline.
pub fn priority_cmp(a: &Task, b: &Task) -> Ordering {
    match (a.status.is_complete(), b.status.is_complete()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => {
            let pa = a.priority.map(u64::from).unwrap_or(u64::MAX);
            let pb = b.priority.map(u64::from).unwrap_or(u64::MAX);
            pa.cmp(&pb).then_with(|| a.deadline.cmp(&b.deadline))
        }
    }
}

/// Estimated workload for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayLoad {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Sums estimated hours of upcoming tasks over the next 7 calendar days
/// starting at `today` (inclusive).
///
/// Only non-done tasks with a deadline strictly after `today` contribute;
/// tasks without an estimate contribute 0. Days with no matching tasks are
/// zero-filled, so the result always has exactly 7 points.
pub fn daily_workload(tasks: &[Task], today: NaiveDate) -> Vec<DayLoad> {
    (0..7u64)
        .map(|offset| {
            let date = today
                .checked_add_days(Days::new(offset))
                .unwrap_or(today);
            let hours: f64 = tasks
                .iter()
                .filter(|t| !t.status.is_complete() && t.deadline > today && t.deadline == date)
                .filter_map(|t| t.estimate.map(|e| e.as_hours()))
                .sum();
            DayLoad { date, hours }
        })
        .collect()
}

/// Completion summary of the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub done: usize,
    pub total: usize,
    /// round(done / total * 100); 0 when there are no tasks
    pub percent: u32,
}

/// Counts done tasks against the total
pub fn completion(tasks: &[Task]) -> Completion {
    let total = tasks.len();
    let done = tasks.iter().filter(|t| t.status.is_complete()).count();
    let percent = if total == 0 {
        0
    } else {
        (done as f64 / total as f64 * 100.0).round() as u32
    };

    Completion {
        done,
        total,
        percent,
    }
}

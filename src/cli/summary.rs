//! `planwise summary`: workload and completion snapshots without the TUI

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use super::output::Output;
use crate::domain::views::{completion, daily_workload, Completion, DayLoad};
use crate::domain::TaskStore;

#[derive(Serialize)]
struct Summary {
    workload: Vec<DayLoad>,
    completion: Completion,
}

/// Prints the 7-day workload and completion summary
pub fn run(output: &Output, store: &TaskStore, today: NaiveDate) -> Result<()> {
    output.verbose_ctx("summary", &format!("Summarizing {} tasks", store.len()));

    let summary = Summary {
        workload: daily_workload(store.tasks(), today),
        completion: completion(store.tasks()),
    };

    if output.is_json() {
        output.data(&summary);
        return Ok(());
    }

    println!("Daily time summary (next 7 days):");
    for day in &summary.workload {
        let bar_len = (day.hours * 4.0).round() as usize;
        println!(
            "  {}  {:>5.1}h  {}",
            day.date.format("%a %Y-%m-%d"),
            day.hours,
            "#".repeat(bar_len.min(60))
        );
    }

    output.blank();
    println!(
        "Progress: {}/{} tasks done ({}%)",
        summary.completion.done, summary.completion.total, summary.completion.percent
    );

    Ok(())
}

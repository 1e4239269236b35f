//! Demo seed data
//!
//! A session starts empty; `--demo` loads this sample list so the views
//! have something to show. Deadlines are relative to the launch day.

use chrono::{Days, NaiveDate};

use crate::domain::{Category, Estimate, TaskDraft, TaskStatus, TaskStore};

/// Builds a store holding the sample task list, ordered by deadline
pub fn sample_store(today: NaiveDate) -> TaskStore {
    let mut store = TaskStore::new();

    let samples: [(&str, &str, u64, Category, TaskStatus, Estimate); 5] = [
        (
            "Draft Q3 marketing strategy",
            "Outline the main channels, budget, and KPIs for the next quarter's marketing plan.",
            2,
            Category::Work,
            TaskStatus::Todo,
            Estimate::hours(3.0),
        ),
        (
            "Schedule annual check-up",
            "Call Dr. Smith's office to schedule an appointment for the yearly physical exam.",
            7,
            Category::Personal,
            TaskStatus::Todo,
            Estimate::minutes(15.0),
        ),
        (
            "Finish UI/UX course module",
            "Complete the section on responsive design and accessibility.",
            1,
            Category::Study,
            TaskStatus::InProgress,
            Estimate::hours(2.0),
        ),
        (
            "Return library books",
            "Drop off overdue books at the downtown library branch.",
            0,
            Category::Errands,
            TaskStatus::Done,
            Estimate::minutes(30.0),
        ),
        (
            "Plan weekend trip",
            "Research destinations and book accommodation.",
            10,
            Category::Personal,
            TaskStatus::InProgress,
            Estimate::hours(4.0),
        ),
    ];

    for (name, description, offset, category, status, estimate) in samples {
        let deadline = today.checked_add_days(Days::new(offset)).unwrap_or(today);
        let task = store.add(TaskDraft {
            name: name.to_string(),
            description: description.to_string(),
            deadline,
            category,
            estimate: Some(estimate),
        });
        store.set_status(&task.id, status);
    }

    store
}

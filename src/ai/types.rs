//! Request and response types for the AI flows
//!
//! The structured flows (estimate, prioritize) ask the model for JSON and
//! deserialize it into these types; field names are camelCase on the wire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Task};

/// Input to the time-estimation flow
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateRequest {
    pub name: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub category: Category,
}

impl From<&Task> for EstimateRequest {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            deadline: task.deadline,
            category: task.category,
        }
    }
}

/// A suggested time allocation with the model's reasoning
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateSuggestion {
    /// Free text like "30 minutes" or "2 hours"; parsed into a structured
    /// estimate at the point it is applied to a task
    pub estimated_time: String,
    pub reasoning: String,
}

/// One task as presented to the prioritization flow
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskBrief {
    pub id: String,
    pub name: String,
    pub deadline: NaiveDate,
    pub category: Category,
}

impl From<&Task> for TaskBrief {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            name: task.name.clone(),
            deadline: task.deadline,
            category: task.category,
        }
    }
}

/// One prioritized task as returned by the model; tasks are matched back
/// to the store by `id`, never by name
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrioritizedTask {
    pub id: String,
    /// 1 is the highest priority
    pub priority: u32,
    pub reason: String,
}

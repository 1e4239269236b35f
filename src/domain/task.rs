//! Task domain model
//!
//! Tasks are the sole domain entity: a unit of work with a deadline, a
//! category, a board status, and optional AI-suggested annotations
//! (priority and time estimate).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::estimate::Estimate;
use super::id::TaskId;

/// Status of a task; doubles as the kanban column key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// All statuses in board column order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Returns true if this status represents completion
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    /// Returns true if this task is not yet started
    pub fn is_pending(&self) -> bool {
        matches!(self, TaskStatus::Todo)
    }

    /// Returns true if this task is currently being worked on
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::InProgress)
    }

    /// Returns the column title for this status
    pub fn title(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Done => "done",
        };
        write!(f, "{}", s)
    }
}

/// Category of a task — a closed enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Work,
    Personal,
    Errands,
    Study,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Errands => "Errands",
            Category::Study => "Study",
        }
    }

    /// All categories, for cycling through in forms
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Errands,
        Category::Study,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work" => Ok(Category::Work),
            "personal" => Ok(Category::Personal),
            "errands" => Ok(Category::Errands),
            "study" => Ok(Category::Study),
            _ => Err(format!(
                "Unknown category '{}'. Expected one of: Work, Personal, Errands, Study",
                s
            )),
        }
    }
}

/// A tracked unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable after creation
    pub id: TaskId,

    /// Display name (non-empty; validated before reaching the store)
    pub name: String,

    /// Free-text description, may be empty
    #[serde(default)]
    pub description: String,

    /// Deadline date (no time-of-day precision)
    pub deadline: NaiveDate,

    /// Category
    pub category: Category,

    /// Priority assigned by the prioritization flow; 1 is highest,
    /// None means unprioritized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,

    /// Current board status
    pub status: TaskStatus,

    /// Estimated time to complete, if one has been set or suggested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Estimate>,
}

impl Task {
    /// Creates a new task from a draft; status starts as Todo and no
    /// priority is assigned
    pub fn new(id: TaskId, draft: TaskDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            deadline: draft.deadline,
            category: draft.category,
            priority: None,
            status: TaskStatus::Todo,
            estimate: draft.estimate,
        }
    }
}

/// Input for creating a task
///
/// The id and status are assigned by the store; drafts with an empty name
/// must be rejected by the form layer before they get here.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub category: Category,
    pub estimate: Option<Estimate>,
}

/// Full replacement for every mutable field of a task (everything but id)
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub name: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub category: Category,
    pub priority: Option<u32>,
    pub status: TaskStatus,
    pub estimate: Option<Estimate>,
}

impl From<Task> for TaskFields {
    fn from(task: Task) -> Self {
        Self {
            name: task.name,
            description: task.description,
            deadline: task.deadline,
            category: task.category,
            priority: task.priority,
            status: task.status,
            estimate: task.estimate,
        }
    }
}

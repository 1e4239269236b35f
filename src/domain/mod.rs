//! Domain models for PlanWise
//!
//! Contains the core business logic without any I/O concerns.

mod drag;
mod estimate;
mod id;
mod store;
mod task;
pub mod views;

pub use drag::DragSession;
pub use estimate::{Estimate, EstimateUnit, ParseEstimateError};
pub use id::{IdError, TaskId};
pub use store::TaskStore;
pub use task::{Category, Task, TaskDraft, TaskFields, TaskStatus};
pub use views::{completion, daily_workload, priority_cmp, Completion, DayLoad};

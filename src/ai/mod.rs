//! AI assistance for PlanWise
//!
//! Three flows sit behind the [`Assistant`] trait: time estimation for a
//! single task, prioritization of the whole list, and free-form chat with
//! the task list as context. The trait keeps the TUI and the one-shot
//! commands independent of the concrete backend.

use std::sync::Arc;

use chrono::NaiveDate;

mod error;
mod gemini;
pub mod prompts;
mod types;

pub use error::AiError;
pub use gemini::GeminiClient;
pub use types::{EstimateRequest, EstimateSuggestion, PrioritizedTask, TaskBrief};

use crate::config::AiConfig;
use crate::domain::Task;

/// An AI backend capable of the three assistance flows
pub trait Assistant: Send + Sync {
    /// Suggests a time allocation for one task
    fn estimate(&self, request: &EstimateRequest) -> Result<EstimateSuggestion, AiError>;

    /// Assigns a priority (1 is highest) to every submitted task
    fn prioritize(&self, tasks: &[TaskBrief]) -> Result<Vec<PrioritizedTask>, AiError>;

    /// Answers a free-form message with the current task list as context
    fn chat(&self, message: &str, tasks: &[Task], today: NaiveDate) -> Result<String, AiError>;
}

/// Creates the configured AI backend
///
/// Returned behind an Arc so the TUI can hand clones to worker threads.
pub fn create_assistant(config: &AiConfig) -> Result<Arc<dyn Assistant>, AiError> {
    Ok(Arc::new(GeminiClient::from_config(config)?))
}

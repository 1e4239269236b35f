//! Prompt construction for the AI flows
//!
//! Each structured flow states the exact JSON shape it expects back; the
//! client requests a JSON response and deserializes against that shape.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::domain::Task;

use super::types::{EstimateRequest, TaskBrief};
use super::AiError;

/// Prompt for the time-estimation flow
pub fn estimate(request: &EstimateRequest) -> String {
    format!(
        "You are a time management expert. Analyze the task details and suggest \
         an estimated time needed to complete the task.\n\
         \n\
         Task Name: {}\n\
         Description: {}\n\
         Deadline: {}\n\
         Category: {}\n\
         \n\
         Consider the task's complexity and category when determining the time \
         allocation. Provide a brief reasoning for your suggestion.\n\
         \n\
         Respond with a JSON object of this exact shape:\n\
         {{\"estimatedTime\": \"<duration in minutes or hours, e.g. \\\"30 minutes\\\" or \\\"2 hours\\\">\", \
         \"reasoning\": \"<explanation for the time allocation>\"}}",
        request.name, request.description, request.deadline, request.category
    )
}

/// Prompt for the prioritization flow
///
/// Every task carries its id; the model must echo ids unchanged so results
/// can be matched back without relying on names.
pub fn prioritize(tasks: &[TaskBrief]) -> Result<String, AiError> {
    let mut listing = String::new();
    for task in tasks {
        writeln!(
            listing,
            "- Id: {}, Name: {}, Deadline: {}, Category: {}",
            task.id, task.name, task.deadline, task.category
        )
        .map_err(|e| AiError::InvalidResponse(e.to_string()))?;
    }

    Ok(format!(
        "You are an AI assistant helping users prioritize their tasks.\n\
         \n\
         Given the following list of tasks with their deadlines and categories, \
         determine a priority for each task and provide a reason for the assigned \
         priority. The priority should be a number, with 1 being the highest \
         priority. Consider deadlines and categories when assigning priorities.\n\
         \n\
         Tasks:\n\
         {}\n\
         Respond with a JSON array where each element has this exact shape, \
         echoing each task's id unchanged:\n\
         [{{\"id\": \"<the task id, copied verbatim>\", \
         \"priority\": <number, 1 is highest>, \
         \"reason\": \"<explanation based on deadline and category>\"}}]",
        listing
    ))
}

/// Prompt for the conversational flow; the current task list is inlined so
/// the model can answer schedule questions
pub fn chat(message: &str, tasks: &[Task], today: NaiveDate) -> String {
    let listing = if tasks.is_empty() {
        "The user has no tasks.".to_string()
    } else {
        let mut listing = String::new();
        for task in tasks {
            let _ = writeln!(
                listing,
                "- Task: {} (Status: {})\n  Description: {}\n  Deadline: {}\n  Category: {}",
                task.name, task.status, task.description, task.deadline, task.category
            );
        }
        listing
    };

    format!(
        "You are a helpful AI assistant for the PlanWise application. Your goal \
         is to help users manage their tasks and plans.\n\
         \n\
         You have access to the user's current task list. Use this information to \
         answer questions about their schedule, suggest what to work on, or help \
         them plan their day.\n\
         \n\
         Today's date is: {}\n\
         \n\
         Here is the user's current task list:\n\
         {}\n\
         User message: {}\n\
         \n\
         Provide a helpful and concise response based on the user's tasks and \
         their message.",
        today, listing, message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, TaskDraft, TaskId};
    use chrono::Utc;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, day).unwrap()
    }

    #[test]
    fn estimate_prompt_includes_task_details() {
        let prompt = estimate(&EstimateRequest {
            name: "Write quarterly report".to_string(),
            description: "Include revenue figures".to_string(),
            deadline: date(5),
            category: Category::Work,
        });

        assert!(prompt.contains("Write quarterly report"));
        assert!(prompt.contains("Include revenue figures"));
        assert!(prompt.contains("2026-09-05"));
        assert!(prompt.contains("estimatedTime"));
    }

    #[test]
    fn prioritize_prompt_lists_ids() {
        let briefs = vec![
            TaskBrief {
                id: "t-1a2b3c4".to_string(),
                name: "a".to_string(),
                deadline: date(1),
                category: Category::Work,
            },
            TaskBrief {
                id: "t-5d6e7f8".to_string(),
                name: "b".to_string(),
                deadline: date(2),
                category: Category::Study,
            },
        ];

        let prompt = prioritize(&briefs).unwrap();
        assert!(prompt.contains("t-1a2b3c4"));
        assert!(prompt.contains("t-5d6e7f8"));
        assert!(prompt.contains("copied verbatim"));
    }

    #[test]
    fn chat_prompt_handles_empty_task_list() {
        let prompt = chat("What should I do today?", &[], date(1));
        assert!(prompt.contains("The user has no tasks."));
        assert!(prompt.contains("What should I do today?"));
    }

    #[test]
    fn chat_prompt_inlines_tasks() {
        let task = Task::new(
            TaskId::new("Buy groceries", Utc::now()),
            TaskDraft {
                name: "Buy groceries".to_string(),
                description: "Milk and eggs".to_string(),
                deadline: date(2),
                category: Category::Errands,
                estimate: None,
            },
        );

        let prompt = chat("When is my shopping due?", &[task], date(1));
        assert!(prompt.contains("Buy groceries"));
        assert!(prompt.contains("Errands"));
        assert!(prompt.contains("Status: todo"));
    }
}

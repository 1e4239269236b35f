//! One-shot AI commands: `planwise estimate` and `planwise chat`

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use super::output::Output;
use crate::ai::{self, EstimateRequest};
use crate::config::Config;
use crate::domain::{Category, Estimate, TaskStore};

/// Asks the backend for a time estimate and prints the suggestion
pub fn estimate(
    output: &Output,
    config: &Config,
    name: &str,
    description: &str,
    deadline: NaiveDate,
    category: Category,
) -> Result<()> {
    let assistant = ai::create_assistant(&config.ai)?;

    let request = EstimateRequest {
        name: name.to_string(),
        description: description.to_string(),
        deadline,
        category,
    };

    output.verbose_ctx("estimate", &format!("Requesting estimate for: {}", name));
    let suggestion = assistant.estimate(&request)?;

    // Surface the parse outcome so callers know whether the suggestion is
    // usable as a structured estimate.
    let parsed = suggestion.estimated_time.parse::<Estimate>();

    if output.is_json() {
        output.data(&json!({
            "estimated_time": suggestion.estimated_time,
            "reasoning": suggestion.reasoning,
            "parseable": parsed.is_ok(),
        }));
        return Ok(());
    }

    println!("Estimated time: {}", suggestion.estimated_time);
    println!("Reasoning: {}", suggestion.reasoning);
    if let Err(e) = parsed {
        println!("Note: {}", e);
    }

    Ok(())
}

/// Sends one chat message with the task list as context
pub fn chat(
    output: &Output,
    config: &Config,
    store: &TaskStore,
    message: &str,
    today: NaiveDate,
) -> Result<()> {
    let assistant = ai::create_assistant(&config.ai)?;

    output.verbose_ctx("chat", &format!("Sending message ({} chars)", message.len()));
    let response = assistant.chat(message, store.tasks(), today)?;

    if output.is_json() {
        output.data(&json!({ "response": response }));
    } else {
        println!("{}", response);
    }

    Ok(())
}

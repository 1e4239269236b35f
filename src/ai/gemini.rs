//! Gemini API client
//!
//! Talks to the generateContent endpoint with a blocking HTTP client; the
//! application runs AI calls on worker threads, so blocking here is fine.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::AiConfig;
use crate::domain::Task;

use super::prompts;
use super::types::{EstimateRequest, EstimateSuggestion, PrioritizedTask, TaskBrief};
use super::{AiError, Assistant};

/// Gemini generateContent client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let api_key = config.get_api_key()?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(AiError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    /// Sends one prompt and returns the model's text
    ///
    /// `json` asks the API for an application/json response, used by the
    /// structured flows.
    fn generate(&self, prompt: &str, json: bool) -> Result<String, AiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
            "generationConfig": {
                "maxOutputTokens": self.max_tokens,
                "responseMimeType": if json { "application/json" } else { "text/plain" },
            },
        });

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", self.api_key.clone())
            .header("content-type", "application/json")
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json()?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| AiError::InvalidResponse("Response contained no text".to_string()))?;

        Ok(text)
    }
}

impl Assistant for GeminiClient {
    fn estimate(&self, request: &EstimateRequest) -> Result<EstimateSuggestion, AiError> {
        let text = self.generate(&prompts::estimate(request), true)?;
        serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| AiError::InvalidResponse(format!("Bad estimate payload: {}", e)))
    }

    fn prioritize(&self, tasks: &[TaskBrief]) -> Result<Vec<PrioritizedTask>, AiError> {
        let text = self.generate(&prompts::prioritize(tasks)?, true)?;
        serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| AiError::InvalidResponse(format!("Bad prioritize payload: {}", e)))
    }

    fn chat(&self, message: &str, tasks: &[Task], today: NaiveDate) -> Result<String, AiError> {
        let text = self.generate(&prompts::chat(message, tasks, today), false)?;
        Ok(text.trim().to_string())
    }
}

/// Models sometimes wrap JSON in a markdown code fence despite the
/// requested mime type; strip it before deserializing
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conversation::domain::response_generator::ResponseGenerator;
use crate::shared::constants::DEFAULT_CHAT_MODEL;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request to {model} failed: {source}")]
    Request {
        model: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{model} returned {status}: {body}")]
    Status {
        model: String,
        status: u16,
        body: String,
    },
    #[error("{model} returned no text")]
    EmptyResponse { model: String },
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Text generation through the Gemini `generateContent` REST endpoint.
pub struct GeminiResponseGenerator {
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl GeminiResponseGenerator {
    pub fn new(api_key: &str, model: Option<&str>) -> Result<Self, GenerationError> {
        if api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }
        let model = model.unwrap_or(DEFAULT_CHAT_MODEL).to_string();
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| GenerationError::Request {
                model: model.clone(),
                source,
            })?;
        Ok(Self {
            api_key: api_key.to_string(),
            model,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/{}:generateContent", self.model)
    }
}

/// Concatenated text of the first candidate, if it has any.
fn first_candidate_text(response: GenerateResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl ResponseGenerator for GeminiResponseGenerator {
    fn generate(&mut self, prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        log::debug!("Requesting reply from {}", self.model);
        let request_error = |source| GenerationError::Request {
            model: self.model.clone(),
            source,
        };
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Status {
                model: self.model.clone(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: GenerateResponse = response.json().map_err(request_error)?;
        first_candidate_text(parsed).ok_or_else(|| {
            GenerationError::EmptyResponse {
                model: self.model.clone(),
            }
            .into()
        })
    }
}

//! OpenAI chat-completions client used by `lg chat --rephrase`.

use std::time::Duration;

use lg_dialogue::{Rephrase, RephraseError, RephraseResult};
use serde::Deserialize;

const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const TIMEOUT: Duration = Duration::from_secs(10);

const SYSTEM_PROMPT: &str = "You reword answers given by a campus history guide so they sound \
    conversational. Keep every name, date, and fact exactly as given and add no new facts. \
    Reply with the reworded answer only.";

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

impl ApiResponse {
    fn into_text(self) -> RephraseResult<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(RephraseError::Empty)
    }
}

/// Blocking OpenAI client.
pub struct OpenAiRephraser {
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl OpenAiRephraser {
    /// Create a client for `model`.
    pub fn new(api_key: String, model: String) -> RephraseResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| RephraseError::Unavailable(e.to_string()))?;
        Ok(Self {
            api_key,
            model,
            client,
        })
    }

    /// Configure from `OPENAI_API_KEY` and `OPENAI_MODEL`.
    pub fn from_env() -> RephraseResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                RephraseError::Unavailable("OPENAI_API_KEY environment variable not set".into())
            })?;
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, model)
    }
}

impl Rephrase for OpenAiRephraser {
    fn rephrase(&self, factual: &str) -> RephraseResult<String> {
        let body = serde_json::json!({
            "model": &self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": factual}
            ],
            "temperature": 0.3
        });

        let response = self
            .client
            .post(ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| RephraseError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(RephraseError::Failed(format!("OpenAI API error {status}: {body}")));
        }

        let parsed: ApiResponse = response
            .json()
            .map_err(|e| RephraseError::Failed(e.to_string()))?;
        tracing::debug!(model = %self.model, "answer rephrased");
        parsed.into_text()
    }
}

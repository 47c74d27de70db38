//! Google Generative Language API client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::{api_key, Advisor, BossSuggestion};
use crate::assignments::Assignment;
use crate::error::AdvisorError;
use crate::storage::Config;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiAdvisor {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiAdvisor {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build from config, looking up the credential in the keyring (or the
    /// GEMINI_API_KEY environment variable).
    ///
    /// # Errors
    /// Returns `MissingCredentials` when no key is stored anywhere.
    pub fn from_config(config: &Config) -> Result<Self, AdvisorError> {
        let key = api_key().ok_or(AdvisorError::MissingCredentials)?;
        Ok(Self::new(key, config.advisor.model.clone()))
    }

    /// Point the client at a different endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// POST a generateContent request and pull out the first candidate's text.
    async fn generate(&self, body: serde_json::Value) -> Result<String, AdvisorError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let resp = self.client.post(&url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: serde_json::Value = resp.json().await?;
        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                AdvisorError::MalformedResponse("no candidate text in response".into())
            })
    }
}

#[async_trait]
impl Advisor for GeminiAdvisor {
    async fn motivational_message(&self, name: &str, level: u32) -> Result<String, AdvisorError> {
        let prompt = format!(
            "You are a high-end RPG game narrator. The player {name} is currently Level {level}. \
             Give them a short, 1-sentence epic motivational message to start their school day. \
             Use gaming terminology like 'quests', 'buffs', 'XP', 'boss level'."
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        let text = self.generate(body).await?;
        Ok(text.trim().to_string())
    }

    async fn daily_boss(
        &self,
        assignments: &[Assignment],
    ) -> Result<Option<BossSuggestion>, AdvisorError> {
        if assignments.is_empty() {
            return Ok(None);
        }

        let listing = serde_json::to_string(assignments)
            .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;
        let prompt = format!(
            "Analyze these school assignments: {listing}. \
             Which one should be the 'Daily Boss' (highest priority)? \
             Return the answer in JSON format with fields: 'title', 'reason', 'strategy'."
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "reason": { "type": "STRING" },
                        "strategy": { "type": "STRING" }
                    },
                    "required": ["title", "reason", "strategy"]
                }
            }
        });

        let text = self.generate(body).await?;
        let suggestion: BossSuggestion = serde_json::from_str(&text)
            .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;
        Ok(Some(suggestion))
    }
}

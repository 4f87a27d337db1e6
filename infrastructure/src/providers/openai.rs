//! OpenAI-compatible opinion gateway
//!
//! Adapter for any chat-completions endpoint speaking the OpenAI wire
//! format (OpenAI itself, Groq, local gateways). Each call renders the
//! role's prompt template, requests JSON mode, and parses the reply into
//! a structured opinion; the backend is never asked to arbitrate.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::debug;
use triage_application::{OpinionGateway, ProviderError, ProviderErrorKind};
use triage_domain::{
    CaseInput, Opinion, PromptTemplate, ReviewFindings, Role, parse_opinion, parse_review,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

/// Connection settings for the chat-completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl OpenAiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

/// Gateway backed by an OpenAI-compatible chat-completions API
pub struct OpenAiOpinionGateway {
    client: reqwest::Client,
    settings: OpenAiSettings,
}

impl OpenAiOpinionGateway {
    pub fn new(settings: OpenAiSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    async fn complete(
        &self,
        role: Role,
        system: &str,
        user: &str,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        );
        let body = json!({
            "model": self.settings.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "response_format": {"type": "json_object"},
        });

        debug!("requesting {} opinion from {}", role, self.settings.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let kind = if e.is_timeout() {
                    ProviderErrorKind::Timeout
                } else {
                    ProviderErrorKind::Unreachable
                };
                ProviderError::new(role, kind, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(
                role,
                ProviderErrorKind::Rejected,
                format!("{}: {}", status, detail),
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed(role, e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::malformed(role, "response carried no choices"))
    }
}

#[async_trait]
impl OpinionGateway for OpenAiOpinionGateway {
    async fn classify(&self, role: Role, case: &CaseInput) -> Result<Opinion, ProviderError> {
        let content = self
            .complete(
                role,
                PromptTemplate::classify_system(role),
                &PromptTemplate::classify_user(role, case),
            )
            .await?;
        parse_opinion(role, &content).map_err(|e| ProviderError::malformed(role, e.to_string()))
    }

    async fn review(
        &self,
        role: Role,
        round1: &BTreeMap<Role, Opinion>,
    ) -> Result<ReviewFindings, ProviderError> {
        let content = self
            .complete(
                role,
                PromptTemplate::review_system(role),
                &PromptTemplate::review_user(round1),
            )
            .await?;
        parse_review(role, &content).map_err(|e| ProviderError::malformed(role, e.to_string()))
    }
}

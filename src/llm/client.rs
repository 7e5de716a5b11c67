//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::ChatMessage;
use super::ChatModel;
use super::Completion;
use super::CompletionParams;
use crate::config::AppConfig;
use crate::errors::OlgaGptError;
use crate::errors::Result;

/// Client for `{endpoint}/chat/completions`
#[derive(Clone)]
pub struct LlmService {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    defaults: CompletionParams,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u32,
}

impl LlmService {
    /// Create a new LLM service from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| OlgaGptError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.llm.endpoint.trim_end_matches('/').to_string(),
            api_key: config.llm.api_key.clone(),
            model: config.llm.model.clone(),
            defaults: CompletionParams {
                max_tokens: config.llm.max_tokens,
                temperature: config.llm.temperature,
            },
        })
    }

    /// Single-prompt convenience wrapper around [`ChatModel::complete`]
    pub async fn generate_with_params(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let completion = self
            .complete(
                &[ChatMessage::user(prompt)],
                CompletionParams {
                    max_tokens,
                    temperature,
                },
            )
            .await?;
        Ok(completion.content)
    }

    /// Sampling parameters from configuration
    #[must_use]
    pub const fn default_params(&self) -> CompletionParams {
        self.defaults
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for LlmService {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: CompletionParams,
    ) -> Result<Completion> {
        let url = format!("{}/chat/completions", self.endpoint);
        debug!(
            "Calling chat completions API: model={}, messages={}",
            self.model,
            messages.len()
        );

        let request = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request);
        if !self.api_key.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OlgaGptError::LlmError(format!(
                "Chat API error ({status}): {error_text}"
            )));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| OlgaGptError::LlmError(format!("Failed to parse response: {e}")))?;

        parse_completion(body)
    }
}

fn parse_completion(body: CompletionResponse) -> Result<Completion> {
    let tokens_used = body.usage.map_or(0, |u| u.total_tokens);
    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| OlgaGptError::LlmError("No choices in response".to_string()))?;

    Ok(Completion {
        content,
        tokens_used,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_parse_completion_with_usage() {
        let body: CompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "Hi!"}}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}}"#,
        )
        .unwrap();

        let completion = parse_completion(body).unwrap();
        assert_eq!(completion.content, "Hi!");
        assert_eq!(completion.tokens_used, 12);
    }

    #[test]
    fn test_parse_completion_without_usage() {
        let body: CompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "ok"}}]}"#).unwrap();
        assert_eq!(parse_completion(body).unwrap().tokens_used, 0);
    }

    #[test]
    fn test_parse_completion_without_choices() {
        let body: CompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            parse_completion(body),
            Err(OlgaGptError::LlmError(_))
        ));
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![
            ChatMessage::system("persona"),
            ChatMessage::new(Role::Assistant, "earlier"),
            ChatMessage::user("question"),
        ];
        let request = CompletionRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            max_tokens: 300,
            temperature: 0.5,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "assistant");
        assert_eq!(json["messages"][2]["content"], "question");
    }

    #[test]
    fn test_defaults_from_config() {
        let mut config = AppConfig::default();
        config.llm.endpoint = "http://localhost:11434/v1/".to_string();
        config.llm.max_tokens = 512;

        let service = LlmService::new(&config).unwrap();
        assert_eq!(service.endpoint, "http://localhost:11434/v1");
        assert_eq!(service.default_params().max_tokens, 512);
        assert_eq!(service.model(), "gpt-3.5-turbo");
    }
}

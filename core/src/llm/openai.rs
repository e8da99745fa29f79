//! OpenAI-compatible chat completions client

use crate::config::{ModelParams, ResolvedLlmConfig};
use crate::error::{ConfigError, LlmError, Result};
use crate::llm::{ChatOptions, FinishReason, LlmClient, LlmMessage, LlmResponse, Usage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Client for `/chat/completions` on OpenAI or any compatible endpoint
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    params: ModelParams,
    headers: HashMap<String, String>,
}

impl OpenAiClient {
    /// Create a new client from resolved LLM config
    pub fn new(config: &ResolvedLlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::Authentication {
                message: "No API key found for OpenAI".to_string(),
            }
            .into());
        }

        config.validate().map_err(|message| ConfigError::InvalidValue {
            field: "llm".to_string(),
            value: message,
        })?;

        Ok(Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            params: config.params.clone(),
            headers: config.headers.clone(),
        })
    }

    fn build_request(
        &self,
        messages: Vec<LlmMessage>,
        options: Option<ChatOptions>,
    ) -> ChatRequest {
        let options = options.unwrap_or_default();
        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: options.max_tokens.or(self.params.max_tokens),
            temperature: options.temperature.or(self.params.temperature),
            top_p: options.top_p.or(self.params.top_p),
        }
    }

    fn convert_response(&self, response: ChatResponse) -> Result<LlmResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;
        let content = choice.message.content.unwrap_or_default();
        if content.is_empty() {
            return Err(LlmError::EmptyResponse.into());
        }

        Ok(LlmResponse {
            message: LlmMessage::assistant(content),
            usage: response.usage,
            model: response.model.unwrap_or_else(|| self.model.clone()),
            finish_reason: choice.finish_reason.as_deref().map(FinishReason::parse),
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat_completion(
        &self,
        messages: Vec<LlmMessage>,
        options: Option<ChatOptions>,
    ) -> Result<LlmResponse> {
        let request = self.build_request(messages, options);
        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, model = %self.model, "Sending chat completion request");

        let mut builder = self.client.post(&url).bearer_auth(&self.api_key).json(&request);
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        let response = builder.send().await.map_err(|e| LlmError::Network {
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED => LlmError::Authentication {
                    message: error_text,
                },
                StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimit,
                _ => LlmError::ApiError {
                    status: status.as_u16(),
                    message: error_text,
                },
            }
            .into());
        }

        let body: ChatResponse = response.json().await.map_err(|e| LlmError::Network {
            message: format!("Failed to parse response: {}", e),
        })?;

        self.convert_response(body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<LlmMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Protocol;
    use crate::error::Error;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAiClient {
        let config = ResolvedLlmConfig::new(
            Protocol::OpenAICompat,
            format!("{}/v1/", server.uri()),
            "sk-test".to_string(),
            "gpt-4o".to_string(),
        )
        .with_header("OpenAI-Project".to_string(), "illie".to_string());
        OpenAiClient::new(&config).unwrap()
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = ResolvedLlmConfig::new(
            Protocol::OpenAICompat,
            "https://api.openai.com/v1".to_string(),
            String::new(),
            "gpt-4o".to_string(),
        );
        assert!(matches!(
            OpenAiClient::new(&config),
            Err(Error::Llm(LlmError::Authentication { .. }))
        ));
    }

    #[tokio::test]
    async fn test_chat_completion_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(header("openai-project", "illie"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "model": "gpt-4o-2024-08-06",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "hi"},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 5, "completion_tokens": 1, "total_tokens": 6}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client
            .chat_completion(
                vec![LlmMessage::system("be brief"), LlmMessage::user("hello")],
                None,
            )
            .await
            .unwrap();

        assert_eq!(response.message.content, "hi");
        assert_eq!(response.model, "gpt-4o-2024-08-06");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.unwrap().total_tokens, 6);
    }

    #[tokio::test]
    async fn test_chat_completion_maps_status_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .chat_completion(vec![LlmMessage::user("hello")], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Llm(LlmError::RateLimit)));
    }

    #[tokio::test]
    async fn test_chat_completion_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .chat_completion(vec![LlmMessage::user("hello")], None)
            .await
            .unwrap_err();
        match err {
            Error::Llm(LlmError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_chat_completion_without_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .chat_completion(vec![LlmMessage::user("hello")], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Llm(LlmError::EmptyResponse)));
    }
}

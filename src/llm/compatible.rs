use super::client::CompletionClient;
use super::types::ChatMessage;
use crate::error::LlmError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Client for any endpoint speaking the OpenAI-compatible
/// `/chat/completions` format (Together, Groq, OpenAI, Mistral, local
/// servers, …). The structured-output flag is always set: the assistant
/// protocol is JSON-only.
pub struct OpenAiCompatibleClient {
    model: String,
    temperature: f64,
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    /// Pre-computed chat completions URL (avoids `format!` per request).
    cached_chat_url: String,
    /// Env var named in the missing-key error.
    api_key_env: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Cap on error-body text carried into error messages.
const ERROR_BODY_LIMIT: usize = 600;

impl OpenAiCompatibleClient {
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        model: &str,
        temperature: f64,
        api_key_env: &str,
    ) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let cached_chat_url = if base_url.contains("chat/completions") {
            base_url.to_string()
        } else {
            format!("{base_url}/chat/completions")
        };

        Self {
            model: model.to_string(),
            temperature,
            cached_auth_header: api_key.map(|k| format!("Bearer {k}")),
            cached_chat_url,
            api_key_env: api_key_env.to_string(),
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(10))
                .tcp_keepalive(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn chat_completions_url(&self) -> &str {
        &self.cached_chat_url
    }

    async fn call_api(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let auth_header =
            self.cached_auth_header
                .as_ref()
                .ok_or_else(|| LlmError::MissingApiKey {
                    env_var: self.api_key_env.clone(),
                })?;

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            response_format: ResponseFormat {
                r#type: "json_object",
            },
        };

        let response = self
            .client
            .post(self.chat_completions_url())
            .header("Authorization", auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|err| LlmError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|err| LlmError::Decode(err.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}

impl CompletionClient for OpenAiCompatibleClient {
    fn complete<'a>(
        &'a self,
        messages: &'a [ChatMessage],
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move { Ok(self.call_api(messages).await?) })
    }
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        text.to_string()
    } else {
        let mut end = max_len;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &text[..end])
    }
}

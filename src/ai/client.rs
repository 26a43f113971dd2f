//! Chat provider (`OpenAI`) client
//!
//! Relays a conversation to the chat-completions API and returns the
//! assistant's text.

use openai_api_rs::v1::api::OpenAIClient;
use openai_api_rs::v1::chat_completion::{
    self as chat_completion, ChatCompletionRequest, Content, MessageRole,
};
use tracing::info;

use crate::core::models::ChatMessage;
use crate::errors::RelayError;

const MAX_TOKENS: i64 = 150;
const TEMPERATURE: f64 = 0.7;

/// Reply used when the provider answers without any message content.
pub const EMPTY_REPLY: &str = "[no reply]";

/// Chat provider client for relaying conversations.
#[derive(Clone)]
pub struct LlmClient {
    api_key: String,
    model_name: String,
    endpoint: Option<String>,
}

impl LlmClient {
    #[must_use]
    pub fn new(api_key: String, model_name: String) -> Self {
        Self {
            api_key,
            model_name,
            endpoint: None,
        }
    }

    /// Client against a non-default API endpoint.
    #[must_use]
    pub fn with_endpoint(api_key: String, model_name: String, endpoint: String) -> Self {
        Self {
            api_key,
            model_name,
            endpoint: Some(endpoint),
        }
    }

    /// Map the request history onto provider messages, in conversation order,
    /// with the current prompt appended last as a user message. A sender of
    /// `"user"` becomes the `user` role; every other sender is `assistant`.
    #[must_use]
    pub fn build_messages(
        history: &[ChatMessage],
        prompt: &str,
    ) -> Vec<chat_completion::ChatCompletionMessage> {
        let mut chat: Vec<chat_completion::ChatCompletionMessage> = history
            .iter()
            .map(|msg| {
                let role = if msg.sender == "user" {
                    MessageRole::user
                } else {
                    MessageRole::assistant
                };
                chat_completion::ChatCompletionMessage {
                    role,
                    content: Content::Text(msg.text.clone()),
                    name: None,
                    tool_calls: None,
                    tool_call_id: None,
                }
            })
            .collect();

        chat.push(chat_completion::ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(prompt.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        });

        chat
    }

    /// # Errors
    ///
    /// Returns an error if the provider client cannot be built or the
    /// chat-completion call fails.
    pub async fn complete(
        &self,
        history: &[ChatMessage],
        prompt: &str,
    ) -> Result<String, RelayError> {
        let messages = Self::build_messages(history, prompt);

        #[cfg(feature = "debug-logs")]
        info!("Relaying chat prompt:\n{:?}", messages);

        #[cfg(not(feature = "debug-logs"))]
        info!("Relaying chat with {} messages", messages.len());

        let mut builder = OpenAIClient::builder().with_api_key(self.api_key.clone());
        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_endpoint(endpoint.clone());
        }
        let mut client = builder
            .build()
            .map_err(|e| RelayError::ProviderError(format!("client setup: {e}")))?;

        let chat_req = ChatCompletionRequest::new(self.model_name.clone(), messages)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS);

        let result = client.chat_completion(chat_req).await?;

        let reply = result
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_else(|| EMPTY_REPLY.to_string());

        Ok(reply)
    }
}

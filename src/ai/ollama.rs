//! Ollama HTTP client for chat completion.

use crate::errors::{AIError, AppResult};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender (system, user, assistant)
    pub role: String,
    /// The content of the message
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Message,
}

/// Client for the Ollama chat API.
pub struct OllamaClient {
    base_url: String,
    client: Client,
}

impl OllamaClient {
    /// Creates a new Ollama client.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Sends a non-streaming chat completion request and returns the reply text.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Ollama API is not reachable
    /// - Model is not found (HTTP 404)
    /// - API returns another error status or an unparsable body
    pub fn chat(&self, model: &str, messages: &[Message]) -> AppResult<String> {
        debug!(
            "Sending chat request with model {} ({} messages)",
            model,
            messages.len()
        );

        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model,
            messages,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(AIError::OllamaOffline)?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 404 {
                return Err(AIError::ModelNotFound(model.to_string()).into());
            }
            let error_text = response.text().unwrap_or_default();
            return Err(
                AIError::InvalidResponse(format!("HTTP {}: {}", status, error_text)).into(),
            );
        }

        let chat_response: ChatResponse = response.json().map_err(|e| {
            AIError::InvalidResponse(format!("Failed to parse chat response: {}", e))
        })?;

        debug!("Received chat response");
        Ok(chat_response.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use mockito::{Matcher, Server};

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("x").role, "system");
        assert_eq!(Message::user("x").role, "user");
        let assistant = Message::assistant("Hi there!");
        assert_eq!(assistant.role, "assistant");
        assert_eq!(assistant.content, "Hi there!");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/");
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_chat_returns_reply_content() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "llama3.2:3b",
                "stream": false,
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":{"role":"assistant","content":"Hi, I'm here."},"done":true}"#)
            .create();

        let client = OllamaClient::new(server.url());
        let reply = client
            .chat("llama3.2:3b", &[Message::user("hello")])
            .unwrap();

        assert_eq!(reply, "Hi, I'm here.");
        mock.assert();
    }

    #[test]
    fn test_chat_model_not_found() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body(r#"{"error":"model not found"}"#)
            .create();

        let client = OllamaClient::new(server.url());
        match client.chat("missing", &[Message::user("hi")]) {
            Err(AppError::AI(AIError::ModelNotFound(model))) => assert_eq!(model, "missing"),
            other => panic!("Expected ModelNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_chat_server_error() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body("boom")
            .create();

        let client = OllamaClient::new(server.url());
        match client.chat("llama3.2:3b", &[Message::user("hi")]) {
            Err(AppError::AI(AIError::InvalidResponse(msg))) => assert!(msg.contains("500")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_chat_unparsable_body() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body("not json")
            .create();

        let client = OllamaClient::new(server.url());
        assert!(matches!(
            client.chat("llama3.2:3b", &[Message::user("hi")]),
            Err(AppError::AI(AIError::InvalidResponse(_)))
        ));
    }

    #[test]
    fn test_chat_offline() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let client = OllamaClient::new("http://127.0.0.1:9");
        assert!(matches!(
            client.chat("llama3.2:3b", &[Message::user("hi")]),
            Err(AppError::AI(AIError::OllamaOffline(_)))
        ));
    }
}

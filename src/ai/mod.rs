//! Local LLM integration for the support chat.
//!
//! # Module Structure
//!
//! - `ollama`: HTTP client for the Ollama chat API
//! - `prompts`: Persona prompt, canned lines and rolling chat history
//!
//! # Example
//!
//! ```no_run
//! use moodlens::ai::{Message, OllamaClient};
//!
//! let client = OllamaClient::new("http://127.0.0.1:11434");
//! let reply = client.chat("llama3.2:3b", &[Message::user("Hello")])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ollama;
pub mod prompts;

pub use ollama::{Message, OllamaClient};
pub use prompts::{ChatHistory, APOLOGY_MESSAGE, SYSTEM_PROMPT, WELCOME_MESSAGE};

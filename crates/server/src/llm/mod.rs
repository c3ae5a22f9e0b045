//! Chat-completion model client.
//!
//! A thin, typed adapter over an OpenAI-style `/chat/completions` API. The
//! rest of the server treats the model as a black-box text-completion
//! service: prompt in, raw text out.

pub mod client;
pub mod error;
pub mod types;

pub use client::ChatClient;
pub use error::ChatError;
pub use types::{ChatMessage, ChatRequest, ChatResponse};

//! Generation backend seam.
//!
//! The coordinator never talks to a concrete text-generation backend; it
//! consumes the two traits defined here. A provider is a cheap, long-lived
//! handle with a pure availability probe; a session is one generation
//! attempt's worth of backend state. Session creation is not assumed to be
//! cheap, and the coordinator creates exactly one session per attempt.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`GenerationProvider`] | Capability probe and session factory |
//! | [`GenerationSession`] | Run one prompt, to completion or as a chunk stream |
//! | [`http::HttpGenerationProvider`] | OpenAI-compatible HTTP backend |

pub mod http;

use crate::{BoxStream, Result};
use async_trait::async_trait;

/// Factory for generation sessions, plus a synchronous capability probe.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Whether the backend can be used in this environment. Pure, no side
    /// effects, safe to call on every view re-evaluation.
    fn is_available(&self) -> bool;

    /// Opens a session for one generation attempt. Fails with
    /// [`Error::ProviderUnavailable`](crate::Error::ProviderUnavailable) when
    /// the backend cannot be initialized.
    async fn create_session(&self) -> Result<Box<dyn GenerationSession>>;
}

/// One generation attempt's backend handle.
#[async_trait]
pub trait GenerationSession: Send + std::fmt::Debug {
    /// Runs the prompt to completion and returns the full text.
    async fn complete_prompt(&mut self, prompt: &str) -> Result<String>;

    /// Runs the prompt as a lazy, finite, non-restartable sequence of text
    /// fragments whose in-order concatenation equals the full text. If the
    /// backend errors after partial output, the stream yields a
    /// [`Error::Generation`](crate::Error::Generation) item and ends; chunks
    /// already emitted remain valid.
    async fn stream_prompt(&mut self, prompt: &str) -> Result<BoxStream<'static, String>>;
}

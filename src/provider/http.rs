//! OpenAI-compatible HTTP generation backend.
//!
//! Speaks the `/chat/completions` shape: single-shot posts `stream: false`
//! and reads `choices[0].message.content`; streaming posts `stream: true` and
//! decodes the SSE response (`data: ` frames, `[DONE]` sentinel) into ordered
//! text chunks from `choices[0].delta.content`.

use crate::provider::{GenerationProvider, GenerationSession};
use crate::{BoxStream, Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, StreamExt, TryStreamExt};
use std::env;
use std::time::Duration;
use tracing::debug;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl HttpProviderConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Reads `ANALYSIS_BASE_URL`, `ANALYSIS_API_KEY` and `ANALYSIS_MODEL`,
    /// falling back to the OpenAI defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("ANALYSIS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            api_key: env::var("ANALYSIS_API_KEY").ok(),
            model: env::var("ANALYSIS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
        }
    }
}

pub struct HttpGenerationProvider {
    client: reqwest::Client,
    config: HttpProviderConfig,
}

impl HttpGenerationProvider {
    pub fn new(config: HttpProviderConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| Error::configuration(format!("invalid base URL: {e}")))?;

        // Minimal production-friendly defaults (env-overridable).
        let timeout_secs = env::var("ANALYSIS_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl GenerationProvider for HttpGenerationProvider {
    fn is_available(&self) -> bool {
        self.config.api_key.is_some() && !self.config.base_url.is_empty()
    }

    async fn create_session(&self) -> Result<Box<dyn GenerationSession>> {
        if !self.is_available() {
            return Err(Error::provider_unavailable(
                "no API key configured for the generation backend",
            ));
        }
        Ok(Box::new(HttpGenerationSession {
            client: self.client.clone(),
            config: self.config.clone(),
            request_id: uuid::Uuid::new_v4().to_string(),
        }))
    }
}

#[derive(Debug)]
struct HttpGenerationSession {
    client: reqwest::Client,
    config: HttpProviderConfig,
    request_id: String,
}

impl HttpGenerationSession {
    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn request_body(&self, prompt: &str, streaming: bool) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "stream": streaming,
        })
    }

    async fn post(&self, body: &serde_json::Value, sse: bool) -> Result<reqwest::Response> {
        let mut req = self
            .client
            .post(self.endpoint())
            .json(body)
            .header("x-request-id", &self.request_id);
        if sse {
            req = req.header("accept", "text/event-stream");
        }
        if let Some(key) = &self.config.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(Error::generation(format!(
                "backend returned HTTP {status}: {}",
                detail.trim()
            )));
        }
        Ok(resp)
    }
}

#[async_trait]
impl GenerationSession for HttpGenerationSession {
    async fn complete_prompt(&mut self, prompt: &str) -> Result<String> {
        debug!(request_id = %self.request_id, "single-shot generation request");
        let resp = self.post(&self.request_body(prompt, false), false).await?;
        let value: serde_json::Value = resp.json().await?;
        value["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::generation("backend response carried no message content"))
    }

    async fn stream_prompt(&mut self, prompt: &str) -> Result<BoxStream<'static, String>> {
        debug!(request_id = %self.request_id, "streaming generation request");
        let resp = self.post(&self.request_body(prompt, true), true).await?;
        let bytes = resp.bytes_stream().map_err(Error::Transport);
        Ok(decode_sse_chunks(Box::pin(bytes)))
    }
}

enum FrameOutcome {
    Chunk(String),
    Skip,
    Done,
}

/// Classifies one SSE frame: strip the `data:` prefix, stop on `[DONE]`,
/// extract the delta content, skip comments and contentless frames.
fn parse_sse_frame(frame: &str) -> FrameOutcome {
    let trimmed = frame.trim();
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return FrameOutcome::Skip;
    }
    let payload = trimmed
        .strip_prefix("data:")
        .map(str::trim_start)
        .unwrap_or(trimmed);
    if payload == "[DONE]" {
        return FrameOutcome::Done;
    }
    let Ok(value) = serde_json::from_str::<serde_json::Value>(payload) else {
        return FrameOutcome::Skip;
    };
    match value["choices"][0]["delta"]["content"].as_str() {
        Some(text) if !text.is_empty() => FrameOutcome::Chunk(text.to_string()),
        _ => FrameOutcome::Skip,
    }
}

/// Incrementally buffers raw bytes and emits full `\n\n`-delimited frames as
/// text chunks. A transport error mid-stream is surfaced as one
/// `Error::Generation` item, after which the stream ends; earlier chunks
/// stand.
fn decode_sse_chunks(input: BoxStream<'static, Bytes>) -> BoxStream<'static, String> {
    let stream = stream::unfold(
        (input, String::new(), false),
        |(mut input, mut buf, done)| async move {
            if done {
                return None;
            }
            loop {
                if let Some(idx) = buf.find("\n\n") {
                    let frame = buf[..idx].to_string();
                    buf = buf[idx + 2..].to_string();
                    match parse_sse_frame(&frame) {
                        FrameOutcome::Done => return None,
                        FrameOutcome::Chunk(text) => return Some((Ok(text), (input, buf, false))),
                        FrameOutcome::Skip => continue,
                    }
                }

                match input.next().await {
                    Some(Ok(bytes)) => buf.push_str(&String::from_utf8_lossy(&bytes)),
                    Some(Err(e)) => {
                        return Some((Err(Error::generation(e.to_string())), (input, buf, true)))
                    }
                    None => {
                        // Flush a trailing frame that arrived without its delimiter.
                        if buf.is_empty() {
                            return None;
                        }
                        let frame = std::mem::take(&mut buf);
                        return match parse_sse_frame(&frame) {
                            FrameOutcome::Chunk(text) => Some((Ok(text), (input, buf, true))),
                            _ => None,
                        };
                    }
                }
            }
        },
    );
    Box::pin(stream)
}

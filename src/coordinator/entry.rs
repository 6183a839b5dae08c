//! Cache entry lifecycle and the read model exposed to the view layer.

use serde::{Deserialize, Serialize};

/// Lifecycle of one key's analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// Attempt created, no output yet.
    Pending,
    /// At least one chunk applied; more may follow.
    Streaming,
    /// Terminal: `final_text` is set.
    Complete,
    /// Terminal: `error_detail` is set; accumulated partials are kept.
    Failed,
}

/// The mutable record tracking one key's generation status and text.
///
/// Exactly one entry exists per distinct key within a coordinator's lifetime.
/// It is mutated only by the single attempt task bound to that key, so the
/// per-field invariants here (append-only accumulation, set-once final text)
/// are enforced locally without cross-task coordination.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    status: AnalysisStatus,
    accumulated_text: String,
    final_text: Option<String>,
    error_detail: Option<String>,
}

impl CacheEntry {
    pub fn new() -> Self {
        Self {
            status: AnalysisStatus::Pending,
            accumulated_text: String::new(),
            final_text: None,
            error_detail: None,
        }
    }

    /// An externally supplied, already-complete result. Starts directly in
    /// `Complete` and is never regenerated.
    pub fn seeded(text: impl Into<String>) -> Self {
        Self {
            status: AnalysisStatus::Complete,
            accumulated_text: String::new(),
            final_text: Some(text.into()),
            error_detail: None,
        }
    }

    /// Appends one streamed chunk in emission order. Ignored once the entry
    /// reached a terminal status.
    pub fn append_chunk(&mut self, chunk: &str) {
        if matches!(
            self.status,
            AnalysisStatus::Pending | AnalysisStatus::Streaming
        ) {
            self.status = AnalysisStatus::Streaming;
            self.accumulated_text.push_str(chunk);
        }
    }

    /// Completes a streaming attempt: the final text is the accumulation so
    /// far. Set-once; returns the final text for the completion callback.
    pub fn complete_streamed(&mut self) -> String {
        if self.final_text.is_none() {
            self.status = AnalysisStatus::Complete;
            self.final_text = Some(self.accumulated_text.clone());
        }
        self.final_text.clone().unwrap_or_default()
    }

    /// Completes a single-shot attempt with the backend's full result.
    pub fn complete_with(&mut self, text: impl Into<String>) {
        if self.final_text.is_none() {
            self.status = AnalysisStatus::Complete;
            self.final_text = Some(text.into());
        }
    }

    /// Marks the attempt failed. Accumulated partial text is retained. A
    /// completed entry cannot be demoted to failed.
    pub fn fail(&mut self, detail: impl Into<String>) {
        if self.status == AnalysisStatus::Complete {
            return;
        }
        self.status = AnalysisStatus::Failed;
        self.error_detail = Some(detail.into());
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn accumulated_text(&self) -> &str {
        &self.accumulated_text
    }

    pub fn final_text(&self) -> Option<&str> {
        self.final_text.as_deref()
    }

    pub fn error_detail(&self) -> Option<&str> {
        self.error_detail.as_deref()
    }

    /// Snapshot for the view layer.
    pub fn view(&self) -> AnalysisView {
        let status_text = match self.status {
            AnalysisStatus::Pending => "waiting",
            AnalysisStatus::Streaming => "in progress",
            AnalysisStatus::Complete => "done",
            AnalysisStatus::Failed => "error",
        };
        let visible_text = match (&self.status, &self.final_text) {
            (AnalysisStatus::Complete, Some(text)) => text.clone(),
            _ => self.accumulated_text.clone(),
        };
        AnalysisView {
            status_text: status_text.to_string(),
            visible_text,
            error_message: self.error_detail.clone(),
        }
    }
}

impl Default for CacheEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only per-key projection for the caller. Failures surface only
/// through `error_message`; partial output stays in `visible_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisView {
    pub status_text: String,
    pub visible_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AnalysisView {
    /// The view for a key no attempt has touched yet.
    pub fn waiting() -> Self {
        Self {
            status_text: "waiting".to_string(),
            visible_text: String::new(),
            error_message: None,
        }
    }
}

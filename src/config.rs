//! Coordinator configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How a generation attempt is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    /// Chunked accumulation with incremental progress surfaced to readers.
    #[default]
    Streaming,
    /// Run to completion; a single update transitions straight to `done`.
    SingleShot,
}

impl ExecutionMode {
    /// Interprets the ambient `streaming` request parameter.
    ///
    /// Absent or `"true"` selects streaming; `"false"` or `"single-shot"`
    /// selects single-shot. An unrecognized value is a caller-input error and
    /// keeps the streaming default rather than failing.
    pub fn from_query_param(value: Option<&str>) -> Self {
        match value {
            None => ExecutionMode::Streaming,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "streaming" => ExecutionMode::Streaming,
                "false" | "single-shot" => ExecutionMode::SingleShot,
                other => {
                    warn!(mode = other, "unrecognized execution mode, keeping streaming default");
                    ExecutionMode::Streaming
                }
            },
        }
    }
}

/// Configuration for an [`AnalysisCoordinator`](crate::AnalysisCoordinator).
#[derive(Debug, Clone, Default)]
pub struct CoordinatorConfig {
    pub mode: ExecutionMode,
}

impl CoordinatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streaming_is_the_default() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Streaming);
        assert_eq!(CoordinatorConfig::new().mode, ExecutionMode::Streaming);
    }

    #[test]
    fn query_param_recognition() {
        assert_eq!(
            ExecutionMode::from_query_param(None),
            ExecutionMode::Streaming
        );
        assert_eq!(
            ExecutionMode::from_query_param(Some("true")),
            ExecutionMode::Streaming
        );
        assert_eq!(
            ExecutionMode::from_query_param(Some("streaming")),
            ExecutionMode::Streaming
        );
        assert_eq!(
            ExecutionMode::from_query_param(Some("false")),
            ExecutionMode::SingleShot
        );
        assert_eq!(
            ExecutionMode::from_query_param(Some("single-shot")),
            ExecutionMode::SingleShot
        );
    }

    #[test]
    fn malformed_mode_keeps_default() {
        assert_eq!(
            ExecutionMode::from_query_param(Some("banana")),
            ExecutionMode::Streaming
        );
    }
}

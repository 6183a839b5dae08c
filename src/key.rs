//! Cache key normalization.
//!
//! An [`AnalysisKey`] is the identity under which one analysis is cached: a
//! comma-joined batch of ticker symbols, uppercased and trimmed. A batch is a
//! single key; its members are not cached individually.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisKey(String);

impl AnalysisKey {
    /// Normalizes a raw symbol string into a key: each comma-separated
    /// component is trimmed and uppercased, empty components are dropped.
    ///
    /// `"aapl, msft ,"` becomes `"AAPL,MSFT"`.
    pub fn normalize(raw: &str) -> Self {
        let joined = raw
            .split(',')
            .map(|symbol| symbol.trim().to_uppercase())
            .filter(|symbol| !symbol.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty key never starts an attempt and never creates an entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The individual symbols making up this key, in key order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.0.split(',').filter(|s| !s.is_empty())
    }
}

impl std::fmt::Display for AnalysisKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AnalysisKey {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl From<String> for AnalysisKey {
    fn from(s: String) -> Self {
        Self::normalize(&s)
    }
}

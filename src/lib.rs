//! # earnings-insight
//!
//! Per-symbol AI analysis coordination for an earnings dashboard.
//!
//! The crate owns the one piece of the dashboard with a real concurrency
//! contract: deciding, for each stock symbol a user expands, whether to start,
//! ignore, or reuse an AI text generation, accumulating the streamed result
//! exactly once, and memoizing it so repeated expansions never re-trigger the
//! backend.
//!
//! ## Key Features
//!
//! - **Single-flight per key**: [`AnalysisCoordinator`] starts at most one
//!   generation attempt per symbol key for its lifetime, no matter how often
//!   the view layer re-evaluates its inputs
//! - **Streaming-first**: partial text is surfaced chunk by chunk as it
//!   arrives, in strict emission order
//! - **Seeded results**: an externally cached result short-circuits
//!   generation entirely
//! - **Partial-failure reporting**: a mid-stream backend failure keeps the
//!   chunks already accumulated and surfaces them next to the error
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use earnings_insight::{
//!     AnalysisCoordinator, AnalysisKey, CoordinatorConfig, SymbolDirectory,
//!     provider::http::{HttpGenerationProvider, HttpProviderConfig},
//! };
//!
//! #[tokio::main]
//! async fn main() -> earnings_insight::Result<()> {
//!     let provider = HttpGenerationProvider::new(HttpProviderConfig::from_env())?;
//!     let coordinator = AnalysisCoordinator::new(
//!         Arc::new(provider),
//!         Arc::new(SymbolDirectory::sp500().clone()),
//!         CoordinatorConfig::default(),
//!     );
//!
//!     let handle = coordinator.evaluate(
//!         "AAPL",
//!         true,
//!         None,
//!         Arc::new(|key: &AnalysisKey, text: &str| println!("{key}: {text}")),
//!     );
//!     if let Some(handle) = handle {
//!         let _ = handle.await;
//!     }
//!     println!("{:?}", coordinator.snapshot("AAPL"));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`coordinator`] | Single-flight analysis state machine and read model |
//! | [`provider`] | Generation backend seam and the HTTP implementation |
//! | [`key`] | Normalized symbol-batch cache keys |
//! | [`symbols`] | Ticker to company-name resolution |
//! | [`prompt`] | Analysis prompt composition |
//! | [`config`] | Execution mode and coordinator configuration |
//! | [`earnings`] | Canonical earnings-calendar data model |

pub mod config;
pub mod coordinator;
pub mod earnings;
pub mod key;
pub mod prompt;
pub mod provider;
pub mod symbols;

// Re-export main types for convenience
pub use config::{CoordinatorConfig, ExecutionMode};
pub use coordinator::{
    AnalysisCoordinator, AnalysisStatus, AnalysisView, CacheEntry, CompletionCallback,
};
pub use key::AnalysisKey;
pub use provider::{GenerationProvider, GenerationSession};
pub use symbols::SymbolDirectory;

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::Error;

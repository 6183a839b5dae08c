//! Single-flight analysis coordination.
//!
//! The coordinator owns, per normalized symbol key, the lifecycle
//! not-started → in-flight → completed | failed. Its inputs mirror the
//! view layer's declarative contract: a key, a trigger flag, an optional
//! pre-seeded cached result, and a completion callback. [`evaluate`] is
//! designed to be re-run on every view re-evaluation; a run-once guard,
//! independent of entry status, keeps each key at a single generation
//! attempt for the coordinator's lifetime.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`AnalysisCoordinator`] | Per-key state machine and attempt spawner |
//! | [`CacheEntry`] | One key's status and accumulated/final text |
//! | [`AnalysisView`] | Read model polled by the view layer |
//!
//! [`evaluate`]: AnalysisCoordinator::evaluate
//!
//! Entries are never evicted; the coordinator is scoped to one session and
//! its instance lifetime bounds the cache.

mod entry;

pub use entry::{AnalysisStatus, AnalysisView, CacheEntry};

use crate::config::{CoordinatorConfig, ExecutionMode};
use crate::key::AnalysisKey;
use crate::prompt::compose_analysis_prompt;
use crate::provider::GenerationProvider;
use crate::symbols::SymbolDirectory;
use futures::StreamExt;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Invoked exactly once per successful attempt with the key and final text.
/// Never invoked for seeded entries or failed attempts.
pub type CompletionCallback = Arc<dyn Fn(&AnalysisKey, &str) + Send + Sync>;

struct CoordinatorState {
    entries: HashMap<AnalysisKey, Arc<Mutex<CacheEntry>>>,
    // Run-once guard, deliberately separate from entry status: a key that
    // failed stays suppressed, and a re-evaluation arriving between entry
    // creation and the first chunk cannot slip a second attempt through.
    started: HashSet<AnalysisKey>,
}

pub struct AnalysisCoordinator {
    provider: Arc<dyn GenerationProvider>,
    directory: Arc<SymbolDirectory>,
    config: CoordinatorConfig,
    state: Mutex<CoordinatorState>,
}

impl AnalysisCoordinator {
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        directory: Arc<SymbolDirectory>,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            provider,
            directory,
            config,
            state: Mutex::new(CoordinatorState {
                entries: HashMap::new(),
                started: HashSet::new(),
            }),
        }
    }

    /// Pure capability probe forwarded from the provider.
    pub fn provider_available(&self) -> bool {
        self.provider.is_available()
    }

    /// Re-evaluates the caller's declared inputs for one key.
    ///
    /// - A present `seed` installs a completed entry and never generates;
    ///   `on_complete` is not invoked (the caller already owns that value).
    /// - `trigger == false` or an empty key is a no-op.
    /// - Otherwise exactly one attempt is started per key per coordinator
    ///   lifetime; repeats return `None`. A different key starts its own
    ///   independent attempt.
    ///
    /// Returns the attempt task's handle when an attempt was started, so
    /// callers can await settlement. The entry is mutated only by that task.
    pub fn evaluate(
        &self,
        raw_key: &str,
        trigger: bool,
        seed: Option<&str>,
        on_complete: CompletionCallback,
    ) -> Option<JoinHandle<()>> {
        let key = AnalysisKey::normalize(raw_key);
        if key.is_empty() {
            return None;
        }

        if let Some(seed) = seed {
            let mut state = self.state.lock().ok()?;
            // Seeding marks the key as started so a later seedless trigger
            // cannot regenerate a value the caller already holds.
            state.started.insert(key.clone());
            state
                .entries
                .entry(key)
                .or_insert_with(|| Arc::new(Mutex::new(CacheEntry::seeded(seed))));
            return None;
        }

        if !trigger {
            return None;
        }

        let entry = {
            let mut state = self.state.lock().ok()?;
            if !state.started.insert(key.clone()) {
                return None;
            }
            Arc::clone(
                state
                    .entries
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(CacheEntry::new()))),
            )
        };

        debug!(key = %key, mode = ?self.config.mode, "starting analysis attempt");
        Some(tokio::spawn(run_attempt(
            Arc::clone(&self.provider),
            Arc::clone(&self.directory),
            self.config.mode,
            key,
            entry,
            on_complete,
        )))
    }

    /// Read model for one key. Keys no attempt has touched read as waiting.
    pub fn snapshot(&self, raw_key: &str) -> AnalysisView {
        let key = AnalysisKey::normalize(raw_key);
        let Ok(state) = self.state.lock() else {
            return AnalysisView::waiting();
        };
        match state.entries.get(&key) {
            Some(entry) => match entry.lock() {
                Ok(entry) => entry.view(),
                Err(_) => AnalysisView::waiting(),
            },
            None => AnalysisView::waiting(),
        }
    }

    /// The terminal/in-flight status for one key, if an entry exists.
    pub fn status(&self, raw_key: &str) -> Option<AnalysisStatus> {
        let key = AnalysisKey::normalize(raw_key);
        let state = self.state.lock().ok()?;
        let entry = state.entries.get(&key)?;
        entry.lock().ok().map(|e| e.status())
    }
}

/// One generation attempt, from session creation to terminal status. Owns
/// the only mutable reference path into its entry.
async fn run_attempt(
    provider: Arc<dyn GenerationProvider>,
    directory: Arc<SymbolDirectory>,
    mode: ExecutionMode,
    key: AnalysisKey,
    entry: Arc<Mutex<CacheEntry>>,
    on_complete: CompletionCallback,
) {
    let prompt = compose_analysis_prompt(&key, &directory);

    // Exactly one session per attempt.
    let mut session = match provider.create_session().await {
        Ok(session) => session,
        Err(e) => {
            warn!(key = %key, error = %e, "could not open generation session");
            fail_entry(&entry, e.to_string());
            return;
        }
    };

    match mode {
        ExecutionMode::Streaming => {
            let mut chunks = match session.stream_prompt(&prompt).await {
                Ok(chunks) => chunks,
                Err(e) => {
                    warn!(key = %key, error = %e, "streaming request failed");
                    fail_entry(&entry, e.to_string());
                    return;
                }
            };

            while let Some(item) = chunks.next().await {
                match item {
                    Ok(chunk) => {
                        if let Ok(mut entry) = entry.lock() {
                            entry.append_chunk(&chunk);
                        }
                    }
                    Err(e) => {
                        // Partial output accumulated so far stays visible.
                        warn!(key = %key, error = %e, "stream failed mid-attempt");
                        fail_entry(&entry, e.to_string());
                        return;
                    }
                }
            }

            let final_text = match entry.lock() {
                Ok(mut entry) => entry.complete_streamed(),
                Err(_) => return,
            };
            debug!(key = %key, chars = final_text.len(), "analysis complete");
            on_complete(&key, &final_text);
        }
        ExecutionMode::SingleShot => match session.complete_prompt(&prompt).await {
            Ok(text) => {
                if let Ok(mut entry) = entry.lock() {
                    entry.complete_with(text.clone());
                }
                debug!(key = %key, chars = text.len(), "analysis complete");
                on_complete(&key, &text);
            }
            Err(e) => {
                warn!(key = %key, error = %e, "single-shot generation failed");
                fail_entry(&entry, e.to_string());
            }
        },
    }
}

fn fail_entry(entry: &Arc<Mutex<CacheEntry>>, detail: String) {
    if let Ok(mut entry) = entry.lock() {
        entry.fail(detail);
    }
}

//! Shared application state for the Axum server.
//!
//! Sessions live in memory, keyed by id. Each session has its own lock so a
//! slow extraction on one conversation never blocks another. Sessions idle
//! longer than the configured TTL are swept away.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tokio::time;
use uuid::Uuid;

use ec_intake::inference::rules::RuleBasedExtractor;
use ec_intake::{
    DialogueConfig, DialogueEngine, ExtractionEngine, Session, Translator, TranslatorConfig,
};

/// One session behind its own lock.
pub type SharedSession = Arc<Mutex<Session>>;

/// Shared application state, wrapped in `Arc` for Axum handler sharing.
#[derive(Clone)]
pub struct AppState {
    /// Open intake sessions.
    pub sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
    /// Dialogue engine driving session turns.
    pub dialogue: Arc<DialogueEngine>,
    /// Free-text translator for the stateless endpoint.
    pub translator: Arc<Translator>,
}

impl AppState {
    /// State over the given extraction provider.
    pub fn with_extractor(
        extractor: Arc<dyn ExtractionEngine>,
        dialogue: DialogueConfig,
        translator: TranslatorConfig,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            dialogue: Arc::new(DialogueEngine::new(extractor.clone(), dialogue)),
            translator: Arc::new(Translator::new(extractor, translator)),
        }
    }

    /// Rule-based extraction only (tests and offline development).
    pub fn new() -> Self {
        Self::with_extractor(
            Arc::new(RuleBasedExtractor::new()),
            DialogueConfig::default(),
            TranslatorConfig::default(),
        )
    }

    /// Register a fresh session and return it.
    pub async fn open_session(&self) -> (Uuid, SharedSession) {
        let session = Session::new();
        let id = session.id;
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, shared.clone());
        (id, shared)
    }

    pub async fn session(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drop a session. Returns false if it did not exist.
    pub async fn close_session(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drop sessions untouched for longer than `ttl`. A session whose lock
    /// is held is mid-turn and stays. Returns the number evicted.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return 0;
        };
        let cutoff = Utc::now() - ttl;

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(session) => session.updated_at >= cutoff,
            Err(_) => true,
        });
        before - sessions.len()
    }
}

/// Evict idle sessions every `interval`.
///
/// Runs until the task is cancelled. Intended to be spawned as a
/// background tokio task.
pub async fn sweep_idle_sessions(state: AppState, ttl: Duration, interval: Duration) {
    let mut ticker = time::interval(interval);
    // Skip the first tick (fires immediately).
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let evicted = state.evict_idle(ttl).await;
        if evicted > 0 {
            tracing::info!(evicted, ttl_secs = ttl.as_secs(), "evicted idle sessions");
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

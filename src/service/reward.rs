//! Reward Service
//!
//! Async entry point for the presentation layer. A draw is resolved at once
//! but only revealed after the configured minimum latency, so the caller can
//! render a rolling state. Reveal runs on its own task: dropping the
//! caller's future does not strand the session in `Rolling`.
//!
//! History writes go through the blocking thread pool, so a store backed by
//! the filesystem never stalls a runtime worker.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::draw::{DrawEngine, DrawPhase, DrawResult, DrawSession, SessionError};
use crate::history::{HistoryItem, HistoryStore};
use crate::prize::TierTable;
use crate::service::config::ServiceConfig;
use crate::storage::KeyValueStore;

/// Service errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rejected or aborted by the session.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A reveal or history task did not complete.
    #[error("session task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

type SharedSession = Arc<Mutex<DrawSession<'static>>>;

/// Run `f` against the session on the blocking pool.
///
/// Used for every operation that writes history through the store.
async fn with_session_blocking<T, F>(session: SharedSession, f: F) -> Result<T, ServiceError>
where
    F: FnOnce(&mut DrawSession<'static>) -> T + Send + 'static,
    T: Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || {
        let mut guard = session.blocking_lock();
        f(&mut guard)
    })
    .await?;
    Ok(outcome)
}

/// Collaborator interface over a single draw session.
///
/// Construction reads the persisted history synchronously; call it before
/// entering latency-sensitive async code.
#[derive(Clone)]
pub struct RewardService {
    session: SharedSession,
    table: &'static TierTable,
    config: ServiceConfig,
}

impl RewardService {
    /// Create a service over the standard table, an entropy-seeded engine
    /// and whatever history `store` already holds.
    pub fn new(store: impl KeyValueStore + 'static, config: ServiceConfig) -> Self {
        Self::with_engine(DrawEngine::with_entropy(TierTable::standard()), store, config)
    }

    /// Create a service with an explicit engine.
    pub fn with_engine(
        engine: DrawEngine<'static>,
        store: impl KeyValueStore + 'static,
        config: ServiceConfig,
    ) -> Self {
        let mut history = HistoryStore::new(store)
            .with_key(config.history_key.clone())
            .with_capacity(config.history_capacity);
        history.load();
        info!("Reward service ready with {} history entries", history.len());

        let table = engine.table();
        Self {
            session: Arc::new(Mutex::new(DrawSession::new(engine, history))),
            table,
            config,
        }
    }

    /// Draw at `now`, waiting out the minimum reveal latency.
    ///
    /// Fails with [`SessionError::DrawInProgress`] if another draw is rolling.
    #[instrument(skip_all)]
    pub async fn draw<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<DrawResult, ServiceError> {
        self.session.lock().await.begin_draw(now)?;

        let session = Arc::clone(&self.session);
        let latency = self.config.min_reveal_latency;
        let reveal = tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let revealed = with_session_blocking(session, |s| s.reveal()).await?;
            Ok::<_, ServiceError>(revealed?)
        });

        let item = reveal.await??;
        debug!("Revealed roll {} ({})", item.result.roll, item.result.tier.kind);
        Ok(item.result)
    }

    /// Draw using the local clock.
    pub async fn draw_now(&self) -> Result<DrawResult, ServiceError> {
        self.draw(&Local::now()).await
    }

    /// Current presentation phase.
    pub async fn phase(&self) -> DrawPhase {
        self.session.lock().await.phase()
    }

    /// Leave the result screen.
    pub async fn dismiss(&self) -> Result<(), ServiceError> {
        Ok(self.session.lock().await.dismiss()?)
    }

    /// History, most recent first.
    pub async fn history(&self) -> Vec<HistoryItem> {
        self.session.lock().await.history().items().to_vec()
    }

    /// Delete one history entry. Returns whether it existed; unknown ids
    /// are ignored.
    pub async fn delete_history_item(&self, id: &str) -> Result<bool, ServiceError> {
        let id = id.to_string();
        with_session_blocking(Arc::clone(&self.session), move |s| s.history_mut().delete(&id)).await
    }

    /// Delete all history.
    pub async fn clear_history(&self) -> Result<(), ServiceError> {
        with_session_blocking(Arc::clone(&self.session), |s| s.history_mut().clear()).await
    }

    /// Whether the last history write failed.
    pub async fn persistence_degraded(&self) -> bool {
        self.session.lock().await.history().persistence_degraded()
    }

    /// Prize table for display.
    pub fn tier_table(&self) -> &'static TierTable {
        self.table
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StoreError};
    use crate::HISTORY_STORAGE_KEY;
    use chrono::Utc;
    use std::thread::{self, ThreadId};
    use std::time::{Duration, Instant};

    /// Store that remembers which threads wrote to it.
    #[derive(Default)]
    struct ThreadTrackingStore {
        inner: MemoryStore,
        writers: std::sync::Mutex<Vec<ThreadId>>,
    }

    impl KeyValueStore for ThreadTrackingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.writers
                .lock()
                .map_err(|_| StoreError::Unavailable("poisoned".into()))?
                .push(thread::current().id());
            self.inner.set(key, value)
        }
    }

    fn fast_config() -> ServiceConfig {
        ServiceConfig::default().with_min_reveal_latency(Duration::from_millis(20))
    }

    fn service(store: Arc<MemoryStore>) -> RewardService {
        RewardService::with_engine(
            DrawEngine::seeded(TierTable::standard(), 31),
            store,
            fast_config(),
        )
    }

    #[tokio::test]
    async fn test_draw_records_history() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());

        let result = service.draw(&Utc::now()).await.unwrap();

        assert_eq!(service.phase().await, DrawPhase::ShowingResult);
        let history = service.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].result, result);
        assert!(store.get(HISTORY_STORAGE_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_draw_waits_minimum_latency() {
        let service = RewardService::with_engine(
            DrawEngine::seeded(TierTable::standard(), 1),
            MemoryStore::new(),
            ServiceConfig::default().with_min_reveal_latency(Duration::from_millis(120)),
        );

        let started = Instant::now();
        service.draw_now().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(120));
    }

    #[tokio::test]
    async fn test_concurrent_draw_is_rejected_not_queued() {
        let service = service(Arc::new(MemoryStore::new()));
        let now = Utc::now();

        let (first, second) = tokio::join!(service.draw(&now), service.draw(&now));

        assert!(first.is_ok());
        assert!(matches!(second, Err(ServiceError::Session(SessionError::DrawInProgress))));
        assert_eq!(service.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_draw_still_reveals() {
        let service = service(Arc::new(MemoryStore::new()));

        let pending = service.draw_now();
        // Poll once so the draw begins, then abandon it.
        let _ = tokio::time::timeout(Duration::from_millis(1), pending).await;

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(service.phase().await, DrawPhase::ShowingResult);
        assert_eq!(service.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_history_operations() {
        let service = service(Arc::new(MemoryStore::new()));
        for _ in 0..3 {
            service.draw_now().await.unwrap();
            service.dismiss().await.unwrap();
        }

        let history = service.history().await;
        assert_eq!(history.len(), 3);

        assert!(service.delete_history_item(&history[1].id).await.unwrap());
        assert!(!service.delete_history_item("missing").await.unwrap());
        let after = service.history().await;
        assert_eq!(after, vec![history[0].clone(), history[2].clone()]);

        service.clear_history().await.unwrap();
        assert!(service.history().await.is_empty());
        assert!(!service.persistence_degraded().await);
    }

    #[tokio::test]
    async fn test_history_survives_restart() {
        let store = Arc::new(MemoryStore::new());
        let first = service(store.clone());
        first.draw_now().await.unwrap();
        let before = first.history().await;

        let second = service(store);
        assert_eq!(second.history().await, before);
        assert_eq!(second.phase().await, DrawPhase::Idle);
    }

    #[tokio::test]
    async fn test_dismiss_requires_result() {
        let service = service(Arc::new(MemoryStore::new()));
        assert!(matches!(
            service.dismiss().await,
            Err(ServiceError::Session(SessionError::InvalidTransition { .. }))
        ));
    }

    #[tokio::test]
    async fn test_history_writes_leave_runtime_thread() {
        let store = Arc::new(ThreadTrackingStore::default());
        let service = RewardService::with_engine(
            DrawEngine::seeded(TierTable::standard(), 5),
            store.clone(),
            fast_config(),
        );
        let runtime_thread = thread::current().id();

        let result = service.draw_now().await.unwrap();
        service.dismiss().await.unwrap();
        let id = service.history().await[0].id.clone();
        assert!(service.delete_history_item(&id).await.unwrap());
        service.clear_history().await.unwrap();

        let writers = store.writers.lock().unwrap().clone();
        assert_eq!(writers.len(), 3, "reveal, delete and clear each persist");
        assert!(writers.iter().all(|w| *w != runtime_thread));
        assert!((1..=100).contains(&result.roll));
    }

    #[test]
    fn test_tier_table_is_standard() {
        let service = service(Arc::new(MemoryStore::new()));
        assert!(std::ptr::eq(service.tier_table(), TierTable::standard()));
        assert_eq!(service.tier_table().len(), 4);
    }
}

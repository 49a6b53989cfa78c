// Session state: what one user has scraped and categorized so far.
//
// Each step gates the next: categorize needs a non-empty scrape, download
// needs a categorization. Scraping again discards the previous results.
// Nothing is persisted. A session lives in memory until it has gone
// SESSION_TTL without an update, then the store evicts it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::output::table::ResultTable;

/// How long a session survives without an update: 24 hours, the same as
/// the session cookie.
pub const SESSION_TTL: Duration = Duration::from_secs(86_400);

#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    /// Titles from the last successful scrape (None = never scraped)
    pub titles: Option<Vec<String>>,
    /// Results of the last categorization of `titles`
    pub results: Option<ResultTable>,
    pub scraped_at: Option<DateTime<Utc>>,
    pub categorized_at: Option<DateTime<Utc>>,
    /// Readable message from the last failed action, cleared on success
    pub last_error: Option<String>,
}

impl Session {
    /// Store freshly scraped titles, dropping any earlier results.
    pub fn record_scrape(&mut self, titles: Vec<String>) {
        self.titles = Some(titles);
        self.results = None;
        self.scraped_at = Some(Utc::now());
        self.categorized_at = None;
        self.last_error = None;
    }

    pub fn record_results(&mut self, results: ResultTable) {
        self.results = Some(results);
        self.categorized_at = Some(Utc::now());
        self.last_error = None;
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Categorize is available once a scrape found at least one title.
    pub fn can_categorize(&self) -> bool {
        self.titles.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Download is available once the current titles have been categorized.
    pub fn can_download(&self) -> bool {
        self.results.is_some()
    }
}

struct Entry {
    session: Session,
    touched: Instant,
}

/// In-memory sessions keyed by session id, evicted after `ttl` idle.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Snapshot of a session; unknown or expired ids get a fresh, empty session.
    pub async fn get(&self, id: &str) -> Session {
        self.inner
            .read()
            .await
            .get(id)
            .filter(|e| e.touched.elapsed() < self.ttl)
            .map(|e| e.session.clone())
            .unwrap_or_default()
    }

    /// Mutate a session in place, creating it if needed. Expired sessions
    /// are evicted first, so an expired id starts over empty.
    pub async fn update<F, R>(&self, id: &str, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut sessions = self.inner.write().await;
        evict_expired(&mut sessions, self.ttl);

        let entry = sessions.entry(id.to_string()).or_insert_with(|| Entry {
            session: Session::default(),
            touched: Instant::now(),
        });
        entry.touched = Instant::now();
        f(&mut entry.session)
    }

    /// Drop every session idle for longer than the TTL. Returns how many
    /// were removed.
    pub async fn prune_expired(&self) -> usize {
        let mut sessions = self.inner.write().await;
        let removed = evict_expired(&mut sessions, self.ttl);
        if removed > 0 {
            debug!(removed, remaining = sessions.len(), "Evicted expired sessions");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

fn evict_expired(sessions: &mut HashMap<String, Entry>, ttl: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, e| e.touched.elapsed() < ttl);
    before - sessions.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::labels::Category;

    #[test]
    fn test_fresh_session_gates_everything() {
        let s = Session::default();
        assert!(!s.can_categorize());
        assert!(!s.can_download());
    }

    #[test]
    fn test_empty_scrape_never_enables_categorize() {
        let mut s = Session::default();
        s.record_scrape(vec![]);
        assert!(s.titles.is_some());
        assert!(!s.can_categorize());
    }

    #[test]
    fn test_rescrape_discards_results() {
        let mut s = Session::default();
        s.record_scrape(vec!["one".into()]);
        s.record_results(
            ResultTable::from_pairs(vec!["one".into()], vec![Category::Uncategorized]).unwrap(),
        );
        assert!(s.can_download());

        s.record_scrape(vec!["two".into()]);
        assert!(s.can_categorize());
        assert!(!s.can_download());
        assert!(s.categorized_at.is_none());
    }

    #[test]
    fn test_success_clears_error() {
        let mut s = Session::default();
        s.record_error("boom");
        s.record_scrape(vec!["x".into()]);
        assert!(s.last_error.is_none());
    }

    #[tokio::test]
    async fn test_store_isolates_sessions() {
        let store = SessionStore::new();
        store
            .update("a", |s| s.record_scrape(vec!["t".into()]))
            .await;
        assert!(store.get("a").await.can_categorize());
        assert!(!store.get("b").await.can_categorize());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_evicted() {
        let store = SessionStore::with_ttl(Duration::from_millis(50));
        store
            .update("old", |s| s.record_scrape(vec!["t".into()]))
            .await;
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(!store.get("old").await.can_categorize());
        store.update("new", |_| ()).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_prune_keeps_active_sessions() {
        let store = SessionStore::with_ttl(Duration::from_secs(60));
        store.update("a", |_| ()).await;
        assert_eq!(store.prune_expired().await, 0);
        assert_eq!(store.len().await, 1);
    }
}

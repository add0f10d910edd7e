//! Session store module
//!
//! In-memory store mapping opaque session ids to per-client sessions. The
//! only shared mutable state in the program; guarded by an async `RwLock`
//! because reads (resolution) far outnumber writes (commit).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use ulid::Ulid;

use super::cookie;
use crate::config::SessionConfig;

/// One client's session: an id plus string attributes.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    attributes: HashMap<String, String>,
    last_seen: Instant,
}

impl Session {
    /// Create a fresh session with a newly minted id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Ulid::new().to_string(),
            attributes: HashMap::new(),
            last_seen: Instant::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() >= ttl
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory session store with lazy idle expiry.
pub struct SessionStore {
    cookie_name: String,
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            ttl: Duration::from_secs(config.ttl_secs),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve the session for a request.
    ///
    /// A valid cookie pointing at a live session yields a copy of it;
    /// anything else (no cookie, unknown id, expired session) yields a fresh
    /// one. The boolean is true when the session is new and the response
    /// must carry a `Set-Cookie`.
    pub async fn resolve(&self, cookie_header: Option<&str>) -> (Session, bool) {
        if let Some(id) = cookie_header.and_then(|h| cookie::session_id(h, &self.cookie_name)) {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(&id) {
                if !session.is_expired(self.ttl) {
                    return (session.clone(), false);
                }
            }
        }
        (Session::new(), true)
    }

    /// Write a session back after its request completes.
    ///
    /// Refreshes the idle timer and sweeps expired sessions while the write
    /// lock is held anyway.
    pub async fn commit(&self, mut session: Session) {
        session.touch();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired(self.ttl));
        sessions.insert(session.id.clone(), session);
    }

    /// `Set-Cookie` value handing this session's id to the client.
    #[must_use]
    pub fn set_cookie(&self, session: &Session) -> String {
        cookie::format_set_cookie(&self.cookie_name, session.id())
    }

    /// Number of live sessions currently stored.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_ttl(ttl_secs: u64) -> SessionStore {
        SessionStore::new(&SessionConfig {
            cookie_name: "tour_session".to_string(),
            ttl_secs,
        })
    }

    #[tokio::test]
    async fn test_resolve_without_cookie_creates_session() {
        let store = store_with_ttl(60);
        let (session, is_new) = store.resolve(None).await;
        assert!(is_new);
        assert!(!session.id().is_empty());
        // Not stored until committed.
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_commit_then_resolve_round_trip() {
        let store = store_with_ttl(60);
        let (mut session, _) = store.resolve(None).await;
        session.set("sessionData", "Hello Session");
        let header = format!("tour_session={}", session.id());
        store.commit(session).await;

        let (found, is_new) = store.resolve(Some(&header)).await;
        assert!(!is_new);
        assert_eq!(found.get("sessionData"), Some("Hello Session"));
    }

    #[tokio::test]
    async fn test_unknown_id_yields_fresh_session() {
        let store = store_with_ttl(60);
        let (session, is_new) = store.resolve(Some("tour_session=01UNKNOWN")).await;
        assert!(is_new);
        assert_ne!(session.id(), "01UNKNOWN");
    }

    #[tokio::test]
    async fn test_expired_session_is_replaced() {
        let store = store_with_ttl(0);
        let (session, _) = store.resolve(None).await;
        let id = session.id().to_string();
        let header = format!("tour_session={id}");
        store.commit(session).await;

        let (found, is_new) = store.resolve(Some(&header)).await;
        assert!(is_new);
        assert_ne!(found.id(), id);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated_per_client() {
        let store = store_with_ttl(60);
        let (mut first, _) = store.resolve(None).await;
        let (second, _) = store.resolve(None).await;
        first.set("sessionData", "Hello Session");

        let second_header = format!("tour_session={}", second.id());
        store.commit(first).await;
        store.commit(second).await;

        let (found, _) = store.resolve(Some(&second_header)).await;
        assert_eq!(found.get("sessionData"), None);
    }
}

//! Cookie sessions and the user directory behind the login form.
//!
//! A session maps an opaque, unguessable token (UUIDv4) to the signed-in
//! user. Every session carries an expiry: lookups treat an expired entry as
//! absent and evict it, and [`SessionStore::spawn_sweeper`] purges the rest
//! on an interval so abandoned sessions do not accumulate.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// The identity attached to a request once its session cookie resolves.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug)]
struct Session {
    user: SessionUser,
    expires_at: Instant,
}

impl Session {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Token → user map with a fixed time-to-live per session.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self { sessions: RwLock::new(HashMap::new()), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a fresh token for `user`.
    pub async fn create(&self, user: SessionUser) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session { user, expires_at: Instant::now() + self.ttl };
        debug!(user_id = %session.user.id, "session created");
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    /// Returns the user behind `token`, or `None` when the token is unknown
    /// or expired. Expired entries are evicted on the way out.
    pub async fn resolve(&self, token: &str) -> Option<SessionUser> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return None,
                Some(s) if !s.is_expired(now) => return Some(s.user.clone()),
                Some(_) => {}
            }
        }

        let mut sessions = self.sessions.write().await;
        // Re-check under the write lock; another request may have replaced it.
        if sessions.get(token).is_some_and(|s| s.is_expired(now)) {
            sessions.remove(token);
            debug!("expired session evicted on lookup");
        }
        None
    }

    /// Removes `token`. Unknown tokens are ignored.
    pub async fn delete(&self, token: &str) {
        if self.sessions.write().await.remove(token).is_some() {
            debug!("session deleted");
        }
    }

    /// Evicts every expired session and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Runs [`purge_expired`](Self::purge_expired) every `every` until the
    /// returned task is aborted or the runtime shuts down.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let purged = store.purge_expired().await;
                if purged > 0 {
                    info!(purged, "expired sessions purged");
                }
            }
        })
    }
}

// ── Users ─────────────────────────────────────────────────────────────────────

/// A login-capable account.
#[derive(Clone, Debug)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Static accounts checked by the login form.
///
/// Passwords are compared as plain strings. This directory backs demo
/// applications only.
#[derive(Clone, Debug)]
pub struct UserDirectory {
    users: Vec<UserRecord>,
}

impl UserDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    /// The single demo account: `hong@test.com` / `password123`.
    pub fn seeded() -> Self {
        Self::new(vec![UserRecord {
            id: "1".into(),
            name: "Hong Gildong".into(),
            email: "hong@test.com".into(),
            password: "password123".into(),
        }])
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Option<SessionUser> {
        self.users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(|u| SessionUser { id: u.id.clone(), name: u.name.clone(), email: u.email.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hong() -> SessionUser {
        SessionUser { id: "1".into(), name: "Hong Gildong".into(), email: "hong@test.com".into() }
    }

    #[tokio::test]
    async fn created_token_resolves_to_user() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.create(hong()).await;
        assert_eq!(store.resolve(&token).await, Some(hong()));
        assert_eq!(store.resolve("not-a-token").await, None);
    }

    #[tokio::test]
    async fn tokens_are_distinct() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = store.create(hong()).await;
        let b = store.create(hong()).await;
        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.create(hong()).await;
        store.delete(&token).await;
        store.delete(&token).await;
        assert_eq!(store.resolve(&token).await, None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn expired_session_is_evicted_on_lookup() {
        let store = SessionStore::new(Duration::ZERO);
        let token = store.create(hong()).await;
        assert_eq!(store.resolve(&token).await, None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let live = SessionStore::new(Duration::from_secs(60));
        live.create(hong()).await;
        assert_eq!(live.purge_expired().await, 0);

        let dead = SessionStore::new(Duration::ZERO);
        dead.create(hong()).await;
        dead.create(hong()).await;
        assert_eq!(dead.purge_expired().await, 2);
        assert!(dead.is_empty().await);
    }

    #[tokio::test]
    async fn sweeper_purges_without_lookups() {
        let store = Arc::new(SessionStore::new(Duration::from_millis(20)));
        store.create(hong()).await;
        store.create(hong()).await;

        let sweeper = store.spawn_sweeper(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(150)).await;
        sweeper.abort();

        assert_eq!(store.len().await, 0);
    }

    #[test]
    fn authenticate_requires_matching_pair() {
        let users = UserDirectory::seeded();
        assert_eq!(users.authenticate("hong@test.com", "password123"), Some(hong()));
        assert_eq!(users.authenticate("hong@test.com", "wrong"), None);
        assert_eq!(users.authenticate("nobody@test.com", "password123"), None);
    }
}

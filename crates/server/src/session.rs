//! Per-browser sessions.
//!
//! Each browser gets a UUID cookie. The registry maps it to a [`Session`]
//! holding that browser's content, credential and model choice. A session is
//! behind its own async mutex; handlers hold the lock for the whole action, so
//! one session runs one action at a time while other sessions proceed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use overview_core::{ContentStore, ModelClient, ModelSelection, Readiness};
use time::OffsetDateTime;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "overview_session";

#[derive(Debug)]
pub struct Session {
    pub content: ContentStore,
    pub client: ModelClient,
    pub model: ModelSelection,
}

impl Session {
    pub fn readiness(&self) -> Readiness {
        Readiness::of(&self.client, self.content.get(), Some(self.model.id()))
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

struct Entry {
    session: SessionHandle,
    last_seen: OffsetDateTime,
}

pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    /// Unconfigured client cloned into every new session.
    client: ModelClient,
    default_model: ModelSelection,
    idle: Duration,
}

impl SessionRegistry {
    pub fn new(client: ModelClient, default_model: ModelSelection, idle: Duration) -> Self {
        Self { sessions: RwLock::new(HashMap::new()), client, default_model, idle }
    }

    /// Finds the session named by the cookie, or starts a new one and sets
    /// the cookie on the returned jar.
    pub async fn resolve(&self, jar: CookieJar) -> (CookieJar, SessionHandle) {
        let known = jar.get(SESSION_COOKIE).and_then(|c| Uuid::parse_str(c.value()).ok());
        let now = OffsetDateTime::now_utc();
        let mut sessions = self.sessions.write().await;

        if let Some(id) = known
            && let Some(entry) = sessions.get_mut(&id)
        {
            entry.last_seen = now;
            return (jar, entry.session.clone());
        }

        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session {
            content: ContentStore::new(),
            client: self.client.clone(),
            model: self.default_model.clone(),
        }));
        sessions.insert(id, Entry { session: session.clone(), last_seen: now });
        debug!(session = %id, active = sessions.len(), "session started");

        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        (jar.add(cookie), session)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drops sessions idle for longer than the configured period. An idle
    /// period reaching past the earliest representable time evicts nothing.
    pub async fn evict_idle(&self) -> usize {
        let cutoff = time::Duration::try_from(self.idle)
            .ok()
            .and_then(|idle| OffsetDateTime::now_utc().checked_sub(idle));
        let Some(cutoff) = cutoff else {
            return 0;
        };
        self.evict_before(cutoff).await
    }

    /// Drops sessions last seen before `cutoff`. Sessions with an action in
    /// flight are kept.
    pub async fn evict_before(&self, cutoff: OffsetDateTime) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen >= cutoff || Arc::strong_count(&entry.session) > 1);
        before - sessions.len()
    }

    /// Runs [`evict_idle`](Self::evict_idle) every `every` until the task is aborted.
    pub fn spawn_eviction(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = self.evict_idle().await;
                if evicted > 0 {
                    info!(evicted, "evicted idle sessions");
                }
            }
        })
    }
}

//! Session service: per-browser chat transcripts held in memory.
//!
//! DESIGN
//! ======
//! Each browser session owns two append-only transcripts: the corporate
//! assistant and the data analyst. Both start with a fixed greeting.
//! Nothing is persisted; an idle session is evicted by a background sweep
//! and a process restart forgets everything.
//!
//! The store lock is never held across an LLM call. Services snapshot the
//! transcript, release the lock, call the model, then append the reply.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use uuid::Uuid;

use crate::llm::types::Message;
use crate::services::{analytics, assistant};
use crate::state::AppState;

pub const COOKIE_NAME: &str = "portfolio_session";

// =============================================================================
// COOKIE
// =============================================================================

/// Resolve the browser session id from the cookie jar.
///
/// An absent or malformed cookie yields a fresh id, and the returned jar
/// carries the new cookie so the handler can send it back.
#[must_use]
pub fn session_id(jar: CookieJar) -> (CookieJar, Uuid) {
    if let Some(id) = jar
        .get(COOKIE_NAME)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        return (jar, id);
    }
    let id = Uuid::new_v4();
    let cookie = Cookie::build((COOKIE_NAME, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), id)
}

// =============================================================================
// TRANSCRIPT
// =============================================================================

/// Which of the two session chats a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Assistant,
    Analyst,
}

impl Channel {
    fn greeting(self) -> &'static str {
        match self {
            Self::Assistant => assistant::GREETING,
            Self::Analyst => analytics::GREETING,
        }
    }
}

/// Ordered chat turns. Turns are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Message>,
}

impl Transcript {
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self { turns: vec![Message::assistant(channel.greeting())] }
    }

    #[must_use]
    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn push(&mut self, message: Message) {
        self.turns.push(message);
    }
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug)]
pub struct Session {
    pub assistant: Transcript,
    pub analyst: Transcript,
    last_seen: Instant,
}

impl Session {
    fn new(now: Instant) -> Self {
        Self {
            assistant: Transcript::new(Channel::Assistant),
            analyst: Transcript::new(Channel::Analyst),
            last_seen: now,
        }
    }

    fn transcript(&self, channel: Channel) -> &Transcript {
        match channel {
            Channel::Assistant => &self.assistant,
            Channel::Analyst => &self.analyst,
        }
    }

    fn transcript_mut(&mut self, channel: Channel) -> &mut Transcript {
        match channel {
            Channel::Assistant => &mut self.assistant,
            Channel::Analyst => &mut self.analyst,
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    /// Run `f` against the session, creating it on first use.
    async fn with_session<R>(&self, session_id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        let session = sessions
            .entry(session_id)
            .or_insert_with(|| Session::new(now));
        session.last_seen = now;
        f(session)
    }

    /// Snapshot a transcript's turns.
    ///
    /// Read-only: an unknown id gets the greeting-only transcript and is not
    /// inserted. Only `append` and `reset` create sessions.
    pub async fn transcript(&self, session_id: Uuid, channel: Channel) -> Vec<Message> {
        match self.inner.read().await.get(&session_id) {
            Some(session) => session.transcript(channel).turns().to_vec(),
            None => Transcript::new(channel).turns().to_vec(),
        }
    }

    /// Append one turn and return the transcript length afterwards.
    pub async fn append(&self, session_id: Uuid, channel: Channel, message: Message) -> usize {
        self.with_session(session_id, |s| {
            let transcript = s.transcript_mut(channel);
            transcript.push(message);
            transcript.turns().len()
        })
        .await
    }

    /// Replace a transcript with a fresh greeting-only one.
    pub async fn reset(&self, session_id: Uuid, channel: Channel) {
        self.with_session(session_id, |s| *s.transcript_mut(channel) = Transcript::new(channel))
            .await;
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Evict sessions idle for longer than the TTL. Returns the evicted ids.
    pub async fn sweep_expired(&self) -> Vec<Uuid> {
        self.sweep_expired_at(Instant::now()).await
    }

    async fn sweep_expired_at(&self, now: Instant) -> Vec<Uuid> {
        let mut sessions = self.inner.write().await;
        let expired: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, s)| now.saturating_duration_since(s.last_seen) > self.ttl)
            .map(|(id, _)| *id)
            .collect();
        for id in &expired {
            sessions.remove(id);
        }
        expired
    }
}

// =============================================================================
// SWEEPER
// =============================================================================

/// Spawn the background eviction task. Returns a handle for shutdown.
pub fn spawn_sweeper_task(state: AppState) -> JoinHandle<()> {
    let interval = state.config.session_sweep_interval;
    info!(
        sweep_secs = interval.as_secs(),
        ttl_secs = state.config.session_ttl.as_secs(),
        "session sweeper configured"
    );
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if state.sessions.is_empty().await {
                continue;
            }
            let expired = state.sessions.sweep_expired().await;
            if expired.is_empty() {
                continue;
            }
            for id in &expired {
                state.rate_limiter.forget(*id);
            }
            let remaining = state.sessions.len().await;
            debug!(evicted = expired.len(), remaining, "session: idle sessions evicted");
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

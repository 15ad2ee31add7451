use super::*;
use crate::llm::types::Role;

fn store() -> SessionStore {
    SessionStore::new(Duration::from_secs(60))
}

#[tokio::test]
async fn new_session_starts_with_greetings() {
    let store = store();
    let id = Uuid::new_v4();

    let assistant = store.transcript(id, Channel::Assistant).await;
    let analyst = store.transcript(id, Channel::Analyst).await;

    assert_eq!(assistant, vec![Message::assistant(assistant::GREETING)]);
    assert_eq!(analyst, vec![Message::assistant(analytics::GREETING)]);
    assert!(store.is_empty().await, "reading must not create a session");
}

#[tokio::test]
async fn append_keeps_insertion_order() {
    let store = store();
    let id = Uuid::new_v4();

    store.append(id, Channel::Assistant, Message::user("uno")).await;
    let len = store
        .append(id, Channel::Assistant, Message::assistant("dos"))
        .await;

    assert_eq!(len, 3);
    let turns = store.transcript(id, Channel::Assistant).await;
    assert_eq!(turns[1], Message::user("uno"));
    assert_eq!(turns[2].role, Role::Assistant);
    assert_eq!(turns[2].content, "dos");
}

#[tokio::test]
async fn channels_are_independent() {
    let store = store();
    let id = Uuid::new_v4();

    store.append(id, Channel::Analyst, Message::user("¿tendencia?")).await;

    assert_eq!(store.transcript(id, Channel::Assistant).await.len(), 1);
    assert_eq!(store.transcript(id, Channel::Analyst).await.len(), 2);
}

#[tokio::test]
async fn sessions_are_isolated() {
    let store = store();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    store.append(a, Channel::Assistant, Message::user("hola")).await;

    assert_eq!(store.transcript(b, Channel::Assistant).await.len(), 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn reset_restores_greeting_only() {
    let store = store();
    let id = Uuid::new_v4();
    store.append(id, Channel::Assistant, Message::user("hola")).await;

    store.reset(id, Channel::Assistant).await;

    assert_eq!(
        store.transcript(id, Channel::Assistant).await,
        vec![Message::assistant(assistant::GREETING)]
    );
}

#[tokio::test]
async fn sweep_evicts_only_idle_sessions() {
    let store = store();
    let id = Uuid::new_v4();
    store.reset(id, Channel::Assistant).await;

    assert!(store.sweep_expired_at(Instant::now()).await.is_empty());

    let later = Instant::now() + Duration::from_secs(61);
    assert_eq!(store.sweep_expired_at(later).await, vec![id]);
    assert!(store.is_empty().await);
}

// =========================================================================
// cookie
// =========================================================================

#[test]
fn session_id_reuses_valid_cookie() {
    let id = Uuid::new_v4();
    let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, id.to_string()));

    let (jar, resolved) = session_id(jar);

    assert_eq!(resolved, id);
    assert_eq!(jar.iter().count(), 1);
}

#[test]
fn session_id_issues_cookie_when_missing() {
    let (jar, id) = session_id(CookieJar::new());

    let cookie = jar.get(COOKIE_NAME).unwrap();
    assert_eq!(cookie.value(), id.to_string());
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
    assert!(cookie.max_age().is_none());
}

#[test]
fn session_id_replaces_malformed_cookie() {
    let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, "not-a-uuid"));

    let (jar, id) = session_id(jar);

    assert_eq!(jar.get(COOKIE_NAME).unwrap().value(), id.to_string());
}

// =========================================================================
// sweeper
// =========================================================================

#[tokio::test]
async fn sweeper_task_evicts_idle_sessions() {
    let config = crate::config::SiteConfig {
        session_ttl: Duration::from_millis(20),
        session_sweep_interval: Duration::from_millis(10),
        ..crate::config::SiteConfig::default()
    };
    let state = crate::state::test_helpers::test_app_state_with_config(config);
    state.sessions.append(Uuid::new_v4(), Channel::Assistant, Message::user("hola")).await;

    let sweeper = spawn_sweeper_task(state.clone());
    tokio::time::sleep(Duration::from_millis(200)).await;
    sweeper.abort();

    assert!(state.sessions.is_empty().await);
}

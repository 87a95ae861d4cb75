use std::{collections::HashMap, sync::Arc};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tokio::sync::Mutex;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "filmshelf_session";

/// In-process session state: one anti-forgery token per session plus the
/// pending one-time notice shown after a successful add.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Session>>>,
}

#[derive(Default)]
struct Session {
    csrf_token: String,
    notice: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the caller's session, creating one (and adding the
    /// cookie to the jar) when the cookie is missing or no longer known.
    pub async fn ensure(&self, jar: CookieJar) -> (String, CookieJar) {
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            let id = cookie.value().to_string();
            if self.inner.lock().await.contains_key(&id) {
                return (id, jar);
            }
        }

        let id = Uuid::new_v4().to_string();
        self.inner.lock().await.insert(
            id.clone(),
            Session { csrf_token: Uuid::new_v4().to_string(), notice: None },
        );

        let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::days(1));

        (id, jar.add(cookie))
    }

    pub async fn csrf_token(&self, session_id: &str) -> Option<String> {
        self.inner.lock().await.get(session_id).map(|s| s.csrf_token.clone())
    }

    /// True only for a non-empty token matching the one issued to this
    /// session. Unknown sessions never verify.
    pub async fn verify_token(&self, session_id: &str, token: &str) -> bool {
        !token.is_empty()
            && self
                .inner
                .lock()
                .await
                .get(session_id)
                .is_some_and(|s| s.csrf_token == token)
    }

    pub async fn set_notice(&self, session_id: &str, notice: String) {
        if let Some(session) = self.inner.lock().await.get_mut(session_id) {
            session.notice = Some(notice);
        }
    }

    /// Returns and clears the pending notice in one step, so it is shown to
    /// exactly one request.
    pub async fn take_notice(&self, session_id: &str) -> Option<String> {
        self.inner.lock().await.get_mut(session_id).and_then(|s| s.notice.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_issues_a_cookie_and_reuses_the_session() {
        let sessions = SessionStore::new();

        let (id, jar) = sessions.ensure(CookieJar::new()).await;
        let cookie = jar.get(SESSION_COOKIE).expect("session cookie");
        assert_eq!(cookie.value(), id);

        let (again, _) = sessions.ensure(jar).await;
        assert_eq!(again, id);
    }

    #[tokio::test]
    async fn unknown_cookie_gets_a_fresh_session() {
        let sessions = SessionStore::new();
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "stale"));

        let (id, jar) = sessions.ensure(jar).await;
        assert_ne!(id, "stale");
        assert_eq!(jar.get(SESSION_COOKIE).expect("cookie").value(), id);
    }

    #[tokio::test]
    async fn tokens_verify_only_for_their_session() {
        let sessions = SessionStore::new();
        let (id, _) = sessions.ensure(CookieJar::new()).await;
        let token = sessions.csrf_token(&id).await.expect("token");

        assert!(sessions.verify_token(&id, &token).await);
        assert!(!sessions.verify_token(&id, "forged").await);
        assert!(!sessions.verify_token(&id, "").await);
        assert!(!sessions.verify_token("missing", &token).await);
    }

    #[tokio::test]
    async fn notice_is_single_read() {
        let sessions = SessionStore::new();
        let (id, _) = sessions.ensure(CookieJar::new()).await;

        sessions.set_notice(&id, "added".to_string()).await;
        assert_eq!(sessions.take_notice(&id).await.as_deref(), Some("added"));
        assert_eq!(sessions.take_notice(&id).await, None);
    }
}

//! Server-side session registry

use std::collections::HashMap;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{session::SessionClaims, Session, User},
};

/// Live sessions keyed by id. A bearer token is valid only while its
/// session is held here and unexpired.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    secret: String,
    lifetime: Duration,
}

impl SessionStore {
    pub fn new(secret: &str, session_hours: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            secret: secret.to_string(),
            lifetime: Duration::hours(session_hours as i64),
        }
    }

    /// Open a session for the user and sign its token
    pub async fn open(&self, user: User) -> AppResult<(Session, String)> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user,
            created_at: now,
            expires_at: now + self.lifetime,
        };
        let token = SessionClaims::for_session(&session)
            .create_token(&self.secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired(now));
        sessions.insert(session.id, session.clone());
        Ok((session, token))
    }

    /// Session behind a bearer token, if it is still live
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        let claims = SessionClaims::from_token(token, &self.secret).ok()?;
        let sessions = self.sessions.read().await;
        sessions
            .get(&claims.sid)
            .filter(|s| !s.is_expired(Utc::now()))
            .cloned()
    }

    /// Remove the session behind a token; unknown or invalid tokens are ignored
    pub async fn close(&self, token: &str) -> Option<Session> {
        let claims = SessionClaims::from_token(token, &self.secret).ok()?;
        self.sessions.write().await.remove(&claims.sid)
    }

    /// Remove every session of a user, returning how many were dropped
    pub async fn revoke_user(&self, user_id: &str) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id() != user_id);
        before - sessions.len()
    }
}

//! Auth session service
//!
//! Owns the session table for the whole view layer: a UUID token issued at
//! sign-in maps to the signed-in identity (user id, profile, backend
//! tokens). In live mode credentials are verified by the hosted backend;
//! in demo mode any credentials are accepted and the demo identity is
//! activated without contacting anything.
//!
//! Absence of a session means "not authenticated"; handlers answer 401 and
//! the frontend decides about redirects, never this service.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::{BackendError, Client};
use crate::config::{BackendConfig, DataMode};
use crate::datasource::{DataSource, DataSourceError, UserScope};
use crate::fixtures;
use crate::models::{Profile, ProfileUpdate};

/// Errors surfaced by session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Credentials rejected by the backend
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No session for the presented token
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Invalid input (empty email, short password)
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// Backend failure that is not an auth rejection
    #[error(transparent)]
    Backend(BackendError),
}

impl From<BackendError> for SessionError {
    fn from(err: BackendError) -> Self {
        if err.is_unauthorized() {
            SessionError::Authentication("Invalid email or password".to_string())
        } else {
            SessionError::Backend(err)
        }
    }
}

/// A signed-in identity held for the lifetime of the tab/process
#[derive(Debug, Clone)]
pub struct Session {
    /// Token the client presents on subsequent requests
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub profile: Profile,
    /// Backend access token; `None` in demo mode
    pub access_token: Option<String>,
    pub is_demo: bool,
}

impl Session {
    /// Scope handle for data source operations on this user's rows
    pub fn scope(&self) -> UserScope {
        UserScope {
            user_id: self.user_id.clone(),
            access_token: self.access_token.clone(),
        }
    }
}

/// Process-scoped session store and auth operations
pub struct SessionService {
    mode: DataMode,
    backend: Client,
    data: Arc<dyn DataSource>,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionService {
    pub fn new(config: &BackendConfig, data: Arc<dyn DataSource>) -> Self {
        Self {
            mode: config.mode(),
            backend: Client::new(config),
            data,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn is_demo(&self) -> bool {
        self.mode == DataMode::Demo
    }

    fn validate_credentials(email: &str, password: &str) -> Result<(), SessionError> {
        if email.trim().is_empty() || !email.contains('@') {
            return Err(SessionError::Validation(
                "A valid email address is required".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(SessionError::Validation(
                "A password is required".to_string(),
            ));
        }
        Ok(())
    }

    async fn store(&self, session: Session) -> Session {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        session
    }

    /// Activate the demo identity. Used for any demo-mode sign-in/sign-up.
    async fn demo_session(&self) -> Result<Session, SessionError> {
        let scope = UserScope {
            user_id: fixtures::DEMO_USER_ID.to_string(),
            access_token: None,
        };
        let profile = self
            .data
            .get_profile(&scope)
            .await?
            .unwrap_or_else(fixtures::demo_profile);
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: profile.id.clone(),
            email: profile.email.clone(),
            profile,
            access_token: None,
            is_demo: true,
        };
        Ok(self.store(session).await)
    }

    /// Sign in. Live mode verifies against the backend; demo mode accepts
    /// any credentials.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        Self::validate_credentials(email, password)?;

        if self.is_demo() {
            return self.demo_session().await;
        }

        let auth = self.backend.sign_in(email, password).await?;
        let scope = UserScope {
            user_id: auth.user.id.clone(),
            access_token: Some(auth.access_token.clone()),
        };
        let profile = self
            .data
            .get_profile(&scope)
            .await?
            .ok_or(DataSourceError::NotFound("profile"))?;

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: auth.user.id,
            email: auth.user.email.unwrap_or_else(|| email.to_string()),
            profile,
            access_token: Some(auth.access_token),
            is_demo: false,
        };
        Ok(self.store(session).await)
    }

    /// Sign up. Live mode registers with the backend and creates the
    /// profile row; demo mode synthesizes success.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Session, SessionError> {
        Self::validate_credentials(email, password)?;
        if password.len() < 6 {
            return Err(SessionError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        if self.is_demo() {
            return self.demo_session().await;
        }

        let auth = self.backend.sign_up(email, password).await?;

        let profile_row = json!({
            "id": auth.user.id,
            "email": email,
            "first_name": first_name,
            "last_name": last_name,
            "user_type": "user",
        });
        let mut created: Vec<Profile> = self
            .backend
            .insert("profiles", &[profile_row], Some(&auth.access_token))
            .await?;
        let profile = created
            .pop()
            .ok_or(DataSourceError::NotFound("profile"))?;

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: auth.user.id,
            email: email.to_string(),
            profile,
            access_token: Some(auth.access_token),
            is_demo: false,
        };
        Ok(self.store(session).await)
    }

    /// Rebuild a session from a still-valid backend access token, as a
    /// returning client does on load. Demo mode activates the demo identity.
    pub async fn restore(&self, access_token: &str) -> Result<Session, SessionError> {
        if self.is_demo() {
            return self.demo_session().await;
        }

        let user = self.backend.get_user(access_token).await?;
        let scope = UserScope {
            user_id: user.id.clone(),
            access_token: Some(access_token.to_string()),
        };
        let profile = self
            .data
            .get_profile(&scope)
            .await?
            .ok_or(DataSourceError::NotFound("profile"))?;

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user.id,
            email: user.email.unwrap_or_else(|| profile.email.clone()),
            profile,
            access_token: Some(access_token.to_string()),
            is_demo: false,
        };
        Ok(self.store(session).await)
    }

    /// Sign out: revoke the backend session when there is one, then drop
    /// the local session. Teardown is unconditional even if the backend
    /// revocation fails.
    pub async fn sign_out(&self, token: &str) -> Result<(), SessionError> {
        let session = self.sessions.write().await.remove(token);
        if let Some(session) = session {
            if let Some(ref access_token) = session.access_token {
                if let Err(err) = self.backend.sign_out(access_token).await {
                    tracing::warn!("Backend sign-out failed: {}", err);
                }
            }
        }
        Ok(())
    }

    /// Session behind a token, if any
    pub async fn current(&self, token: &str) -> Option<Session> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Request a password-recovery email. Demo mode synthesizes success.
    pub async fn reset_password(&self, email: &str) -> Result<(), SessionError> {
        if email.trim().is_empty() {
            return Err(SessionError::Validation(
                "An email address is required".to_string(),
            ));
        }
        if self.is_demo() {
            return Ok(());
        }
        self.backend.reset_password(email).await?;
        Ok(())
    }

    /// Set a new password for the signed-in user. Demo mode synthesizes
    /// success.
    pub async fn update_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), SessionError> {
        if new_password.len() < 6 {
            return Err(SessionError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        let session = self
            .current(token)
            .await
            .ok_or(SessionError::NotAuthenticated)?;
        if session.is_demo {
            return Ok(());
        }
        let access_token = session
            .access_token
            .as_deref()
            .ok_or(SessionError::NotAuthenticated)?;
        self.backend
            .update_password(access_token, new_password)
            .await?;
        Ok(())
    }

    /// Persist changed profile fields and refresh the cached copy.
    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, SessionError> {
        if update.is_empty() {
            return Err(SessionError::Validation("Nothing to update".to_string()));
        }
        let session = self
            .current(token)
            .await
            .ok_or(SessionError::NotAuthenticated)?;
        let profile = self.data.update_profile(&session.scope(), update).await?;

        if let Some(stored) = self.sessions.write().await.get_mut(token) {
            stored.profile = profile.clone();
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::FixtureSource;

    fn demo_service() -> SessionService {
        let data: Arc<dyn DataSource> = Arc::new(FixtureSource::new());
        SessionService::new(&BackendConfig::default(), data)
    }

    #[tokio::test]
    async fn test_demo_sign_in_accepts_any_credentials() {
        let service = demo_service();
        let session = service.sign_in("anyone@example.com", "anything").await.unwrap();
        assert!(session.is_demo);
        assert_eq!(session.user_id, fixtures::DEMO_USER_ID);
        assert!(session.access_token.is_none());

        let found = service.current(&session.token).await.unwrap();
        assert_eq!(found.email, fixtures::DEMO_EMAIL);
    }

    #[tokio::test]
    async fn test_sign_in_rejects_malformed_email() {
        let service = demo_service();
        let result = service.sign_in("not-an-email", "pw").await;
        assert!(matches!(result, Err(SessionError::Validation(_))));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_short_password() {
        let service = demo_service();
        let result = service.sign_up("a@b.com", "short", "A", "B").await;
        assert!(matches!(result, Err(SessionError::Validation(_))));
    }

    #[tokio::test]
    async fn test_demo_restore_activates_demo_identity() {
        let service = demo_service();
        let session = service.restore("stale-backend-token").await.unwrap();
        assert!(session.is_demo);
        assert_eq!(session.user_id, fixtures::DEMO_USER_ID);
    }

    #[tokio::test]
    async fn test_sign_out_tears_down_session() {
        let service = demo_service();
        let session = service.sign_in("a@b.com", "pw").await.unwrap();
        service.sign_out(&session.token).await.unwrap();
        assert!(service.current(&session.token).await.is_none());
    }

    #[tokio::test]
    async fn test_sign_out_unknown_token_is_quiet() {
        let service = demo_service();
        assert!(service.sign_out("no-such-token").await.is_ok());
    }

    #[tokio::test]
    async fn test_demo_reset_password_synthesizes_success() {
        let service = demo_service();
        assert!(service.reset_password("a@b.com").await.is_ok());
        assert!(service.reset_password("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_update_profile_refreshes_cached_session() {
        let service = demo_service();
        let session = service.sign_in("a@b.com", "pw").await.unwrap();
        let update = ProfileUpdate {
            first_name: Some("Ada".to_string()),
            ..Default::default()
        };
        let profile = service.update_profile(&session.token, &update).await.unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));

        let cached = service.current(&session.token).await.unwrap();
        assert_eq!(cached.profile.first_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_update_profile_requires_session() {
        let service = demo_service();
        let update = ProfileUpdate {
            first_name: Some("Ada".to_string()),
            ..Default::default()
        };
        let result = service.update_profile("bogus", &update).await;
        assert!(matches!(result, Err(SessionError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_empty_update_rejected() {
        let service = demo_service();
        let session = service.sign_in("a@b.com", "pw").await.unwrap();
        let result = service
            .update_profile(&session.token, &ProfileUpdate::default())
            .await;
        assert!(matches!(result, Err(SessionError::Validation(_))));
    }
}

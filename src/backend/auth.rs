//! Backend auth operations
//!
//! GoTrue-style endpoints under `/auth/v1/`: password-grant sign-in,
//! sign-up, sign-out, current-user lookup, password recovery and password
//! update. The backend owns credential storage and validation; this module
//! only relays.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{BackendError, Client};

/// User identity as returned by the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// Token pair plus identity returned from sign-in/sign-up
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl Client {
    /// Exchange email/password for a session (password grant)
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        let request = self
            .http()
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password });
        let response = self.authorize(request, None).send().await?;
        Self::decode(response).await
    }

    /// Register a new account. Depending on backend settings this returns
    /// a session directly or requires email confirmation first.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        let request = self
            .http()
            .post(self.auth_url("signup"))
            .json(&Credentials { email, password });
        let response = self.authorize(request, None).send().await?;
        Self::decode(response).await
    }

    /// Revoke the backend session behind an access token
    pub async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let request = self.http().post(self.auth_url("logout"));
        let response = self.authorize(request, Some(access_token)).send().await?;
        Self::check(response).await
    }

    /// Look up the user behind an access token
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        let request = self.http().get(self.auth_url("user"));
        let response = self.authorize(request, Some(access_token)).send().await?;
        Self::decode(response).await
    }

    /// Ask the backend to send a password-recovery email
    pub async fn reset_password(&self, email: &str) -> Result<(), BackendError> {
        let request = self
            .http()
            .post(self.auth_url("recover"))
            .json(&json!({ "email": email }));
        let response = self.authorize(request, None).send().await?;
        Self::check(response).await
    }

    /// Set a new password for the signed-in user
    pub async fn update_password(
        &self,
        access_token: &str,
        new_password: &str,
    ) -> Result<(), BackendError> {
        let request = self
            .http()
            .put(self.auth_url("user"))
            .json(&json!({ "password": new_password }));
        let response = self.authorize(request, Some(access_token)).send().await?;
        Self::check(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_session_decodes_minimal_payload() {
        let payload = r#"{
            "access_token": "jwt-abc",
            "user": { "id": "u-1", "email": "jan@example.com" }
        }"#;
        let session: AuthSession = serde_json::from_str(payload).unwrap();
        assert_eq!(session.access_token, "jwt-abc");
        assert!(session.refresh_token.is_none());
        assert_eq!(session.user.id, "u-1");
    }
}

//! Auth flows: login, register, session refresh, logout.
//!
//! Successful login/register persists the token and user through the
//! injected session store; logout clears it. Required-field checks run
//! before any request leaves the client.

use std::sync::Arc;

use crate::api::Api;
use crate::error::{ApiError, PageError};
use crate::session::SessionStore;
use crate::types::{LoginPayload, RegisterPayload, User};

pub struct AuthFlow {
    api: Arc<dyn Api>,
    session: Arc<SessionStore>,
}

impl AuthFlow {
    pub fn new(api: Arc<dyn Api>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, PageError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            )
            .into());
        }

        let payload = LoginPayload {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&payload).await?;
        self.session.save(&response.access_token, &response.user)?;
        log::info!("Signed in as {}", response.user.email);
        Ok(response.user)
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<User, PageError> {
        validate_registration(payload)?;
        let response = self.api.register(payload).await?;
        self.session.save(&response.access_token, &response.user)?;
        Ok(response.user)
    }

    /// Re-fetch `/auth/me` and refresh the stored user.
    pub async fn refresh_user(&self) -> Result<User, PageError> {
        let user = self.api.current_user().await?;
        self.session.update_user(&user)?;
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), PageError> {
        log::info!("Signing out");
        self.session.clear().map_err(Into::into)
    }

    pub fn user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

/// Mirrors the backend's account rules: username ≥ 3 chars, password ≥ 8.
fn validate_registration(payload: &RegisterPayload) -> Result<(), ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::Validation("Email is required".to_string()));
    }
    if payload.username.trim().len() < 3 {
        return Err(ApiError::Validation(
            "Username must be at least 3 characters".to_string(),
        ));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

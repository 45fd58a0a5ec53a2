//! HTTP core for the CareOps backend.
//!
//! Uses reqwest with Bearer token auth supplied by the injected session
//! store. One attempt per call — no retry, no backoff, no client-side
//! timeout (the transport default applies).

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::ApiError;
use crate::session::SessionStore;

pub struct HttpApi {
    base_url: Url,
    http: reqwest::Client,
    session: Arc<SessionStore>,
}

impl HttpApi {
    /// Build a client against `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Network(format!("Invalid base URL {base_url}: {e}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            session,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        action: &str,
    ) -> Result<T, ApiError> {
        let req = self.http.get(self.endpoint(path));
        self.send(req, true, action).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        action: &str,
    ) -> Result<T, ApiError> {
        let req = self.http.post(self.endpoint(path)).json(body);
        self.send(req, true, action).await
    }

    /// POST without the bearer header — login and register only.
    pub(crate) async fn post_public<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        action: &str,
    ) -> Result<T, ApiError> {
        let req = self.http.post(self.endpoint(path)).json(body);
        self.send(req, false, action).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        action: &str,
    ) -> Result<T, ApiError> {
        let req = self.http.patch(self.endpoint(path)).json(body);
        self.send(req, true, action).await
    }

    pub(crate) async fn delete(&self, path: &str, action: &str) -> Result<(), ApiError> {
        let req = self.http.delete(self.endpoint(path));
        // The backend answers deletes with a small JSON message; drop it.
        let _: serde_json::Value = self.send(req, true, action).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        auth: bool,
        action: &str,
    ) -> Result<T, ApiError> {
        let req = if auth {
            match self.session.token() {
                Some(token) => req.bearer_auth(token),
                // No stored session: the backend would answer 401 anyway,
                // so fail with the same error kind without a round trip.
                None => return Err(ApiError::Unauthorized),
            }
        } else {
            req
        };

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        // A rejected bearer token is its own error kind. On the public
        // endpoints a 401 is an ordinary failure (bad credentials) and the
        // body's detail message is worth keeping.
        if auth && status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            log::warn!("{} -> HTTP {}", action, status);
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(&body, action),
            });
        }

        serde_json::from_str(&body).map_err(ApiError::from)
    }
}

/// Human-readable message for a non-2xx response: the backend's `detail`
/// field when present, else a generic "Failed to <action>".
pub(crate) fn error_message(body: &str, action: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            if !detail.is_empty() {
                return detail.to_string();
            }
        }
    }
    format!("Failed to {action}")
}

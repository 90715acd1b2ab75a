use std::sync::Arc;

use http::StatusCode;
use url::Url;

use crate::client::errors::ApiError;
use crate::client::types::{ApiRequest, ApiResponse, MultipartField, RequestBody};
use crate::store::{PersistedSession, SessionStore};
use crate::utils::http_client;

use super::refresh::RefreshController;

pub(crate) const API_KEY_HEADER: &str = "key";
pub(crate) const ADMIN_UID_HEADER: &str = "x-admin-uid";

/// 401 bodies matching any of these (case-insensitive substring) are treated
/// as session expiry. Any other 401 passes through untouched.
const EXPIRY_VOCABULARY: &[&str] = &["expired", "invalid or expired token", "authorization failed"];

pub(crate) fn is_expiry_message(body: &str) -> bool {
    let lowered = body.to_lowercase();
    EXPIRY_VOCABULARY.iter().any(|needle| lowered.contains(needle))
}

/// Attaches the session credentials to every outgoing API call and handles
/// expiry-driven 401s before the caller sees them.
///
/// Replaces the per-view "read token from storage and build headers" helpers
/// the console used to duplicate: every call site goes through here.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    store: Arc<dyn SessionStore>,
    refresh: Arc<RefreshController>,
}

impl ApiClient {
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        store: Arc<dyn SessionStore>,
        refresh: Arc<RefreshController>,
    ) -> Self {
        Self {
            http: http_client(),
            base_url,
            api_key: api_key.into(),
            store,
            refresh,
        }
    }

    /// Dispatch an authorized request.
    ///
    /// Fails fast with [`ApiError::Unauthenticated`] when no session is
    /// persisted: an unauthenticated request must never reach the backend
    /// where it could be misinterpreted. On a 401 whose body matches the
    /// expiry vocabulary the session is renewed (single-flight) and the
    /// request replayed exactly once; the caller never sees the
    /// intermediate 401.
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        // Generation first, store second: a caller that observes a renewed
        // generation is then guaranteed to read the renewed session.
        let generation = self.refresh.generation();
        let session = self.store.get()?.ok_or(ApiError::Unauthenticated)?;

        let response = self.dispatch(request, &session).await?;
        if response.status != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }
        if !is_expiry_message(&response.body) {
            return Err(ApiError::Unauthorized(response.body));
        }

        tracing::debug!("Session token expired on {}; renewing", request.path);
        self.refresh.refresh(generation).await?;

        let session = self.store.get()?.ok_or(ApiError::SessionExpired)?;
        let replay = self.dispatch(request, &session).await?;
        if replay.status == StatusCode::UNAUTHORIZED {
            // One replay only. A renewed token that is still refused is
            // terminal for this call.
            return Err(ApiError::Unauthorized(replay.body));
        }
        Ok(replay)
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        session: &PersistedSession,
    ) -> Result<ApiResponse, ApiError> {
        let url = self
            .base_url
            .join(&request.path)
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ADMIN_UID_HEADER, &session.uid)
            .bearer_auth(&session.admin_token);

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(fields) => builder.multipart(build_multipart(fields)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

fn build_multipart(fields: &[MultipartField]) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for field in fields {
        let mut part = reqwest::multipart::Part::bytes(field.data.clone());
        if let Some(file_name) = &field.file_name {
            part = part.file_name(file_name.clone());
        }
        if let Some(mime) = &field.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| ApiError::Network(e.to_string()))?;
        }
        form = form.part(field.name.clone(), part);
    }
    Ok(form)
}

use url::Url;

use crate::exchange::errors::ExchangeError;
use crate::exchange::types::{BackendSession, LoginCredentials, LoginResponse};
use crate::utils::http_client;

use super::claims::decode_display_claims;

/// Path of the backend login exchange endpoint.
pub(crate) const LOGIN_PATH: &str = "/api/admin/admin/adminLogin";

/// Exchanges a provider-issued identity token for an opaque backend session
/// token.
pub struct SessionExchanger {
    client: reqwest::Client,
    login_url: Url,
    api_key: String,
}

impl SessionExchanger {
    pub fn new(base_url: &Url, api_key: impl Into<String>) -> Self {
        let login_url = base_url
            .join(LOGIN_PATH)
            .expect("login path must join onto the backend base URL");
        Self {
            client: http_client(),
            login_url,
            api_key: api_key.into(),
        }
    }

    /// Exchange the provider token and UID for a backend session.
    ///
    /// Idempotent: backend sessions are stateless bearer tokens, so two
    /// exchanges with the same provider token yield two independent valid
    /// sessions.
    pub async fn exchange(
        &self,
        provider_token: &str,
        provider_uid: &str,
        credentials: &LoginCredentials,
    ) -> Result<BackendSession, ExchangeError> {
        let response = self
            .client
            .post(self.login_url.clone())
            .header("key", &self.api_key)
            .header("x-admin-uid", provider_uid)
            .bearer_auth(provider_token)
            .json(credentials)
            .send()
            .await
            .map_err(|e| ExchangeError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!("Login exchange refused with status {}", status);
            let reason = serde_json::from_str::<LoginResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| status.to_string());
            return Err(ExchangeError::LoginRejected(reason));
        }

        let parsed: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| ExchangeError::LoginRejected(format!("malformed login response: {e}")))?;

        if !parsed.status {
            let reason = parsed
                .message
                .unwrap_or_else(|| "login refused by backend".to_string());
            return Err(ExchangeError::LoginRejected(reason));
        }

        let token = match parsed.data {
            Some(token) if !token.is_empty() => token,
            _ => {
                return Err(ExchangeError::LoginRejected(
                    "login response missing session token".to_string(),
                ));
            }
        };

        let display = decode_display_claims(&token);
        tracing::debug!("Login exchange succeeded for uid {}", provider_uid);

        Ok(BackendSession {
            token,
            issued_for_uid: provider_uid.to_string(),
            display,
        })
    }
}

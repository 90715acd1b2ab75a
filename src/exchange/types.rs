use serde::{Deserialize, Serialize};

/// Credentials presented to the login exchange.
///
/// The silent-renewal path carries the identity email with no password; the
/// provider bearer token authenticates the renewal.
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Some(password.into()),
        }
    }

    /// Credentials for a silent token renewal.
    pub fn renewal(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: None,
        }
    }
}

/// Display-convenience fields decoded from the session token payload.
///
/// Never used for authorization decisions; the token stays opaque to the
/// client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DisplayClaims {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// An opaque backend-issued bearer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSession {
    pub token: String,
    pub issued_for_uid: String,
    pub display: Option<DisplayClaims>,
}

/// Wire shape of the login exchange response.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

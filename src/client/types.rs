use http::{Method, StatusCode};
use serde::de::DeserializeOwned;

/// One part of a multipart payload, buffered in memory so the request can be
/// replayed after a token renewal.
#[derive(Debug, Clone)]
pub struct MultipartField {
    pub name: String,
    pub data: Vec<u8>,
    pub file_name: Option<String>,
    pub mime: Option<String>,
}

impl MultipartField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: value.into().into_bytes(),
            file_name: None,
            mime: None,
        }
    }

    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            data,
            file_name: Some(file_name.into()),
            mime: Some(mime.into()),
        }
    }
}

/// Body of an outgoing API request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Multipart form data. No content-type is set by the authorizer; the
    /// transport computes the boundary.
    Multipart(Vec<MultipartField>),
}

/// A replayable description of an outgoing API request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: RequestBody::Json(body),
        }
    }

    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            body: RequestBody::Json(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn post_multipart(path: impl Into<String>, fields: Vec<MultipartField>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: RequestBody::Multipart(fields),
        }
    }
}

/// Response passed through to the caller. Statuses other than a handled 401
/// arrive here untouched, to be interpreted by the calling view.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

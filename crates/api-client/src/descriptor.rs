//! Outbound request descriptors.

use crate::ApiResult;
use reqwest::Method;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

/// Everything needed to (re)issue one logical request.
///
/// A descriptor is replayed at most once: `retried` is set before the replay
/// so a second 401 is returned to the caller instead of renewing again.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Set on the replay that follows a renewal.
    pub retried: bool,
    /// `false` for login, signup and refresh: no bearer, no renewal.
    pub authenticated: bool,
    /// Correlates the first attempt and the replay in logs.
    pub request_id: Uuid,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            retried: false,
            authenticated: true,
            request_id: Uuid::new_v4(),
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: Url) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: Url) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append a query parameter when a value is present.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Mark as an unauthenticated endpoint.
    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

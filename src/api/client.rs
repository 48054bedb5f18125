use std::sync::Arc;

use log::{debug, error};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::error::ApiError;
use crate::api::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::session::Session;

/// Per-call options for [`ApiClient::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { method: Method::GET, headers: Vec::new(), body: None }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::method(Method::POST)
    }

    pub fn put() -> Self {
        Self::method(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::method(Method::DELETE)
    }

    pub fn method(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(bytes);
        Ok(self)
    }
}

/// Single entry point for every backend call.
///
/// Holds the base address, the session the bearer token is read from and the
/// transport that actually moves bytes. Cloning is cheap and clones share the
/// session.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Session,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session) -> Self {
        Self::with_transport(base_url, session, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(base_url: &str, session: Session, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url_for(&self, endpoint: &str) -> Result<String, ApiError> {
        let url = if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        };
        Url::parse(&url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;
        Ok(url)
    }

    /// Defaults first, then caller headers replacing same-named defaults.
    fn merge_headers(&self, overrides: Vec<(String, String)>) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        for (name, value) in overrides {
            match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
                Some(slot) => slot.1 = value,
                None => headers.push((name, value)),
            }
        }
        headers
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let result = self.dispatch(endpoint, options).await;
        if let Err(e) = &result {
            error!("API request failed: {} ({})", e, endpoint);
        }
        result
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let request = HttpRequest {
            url: self.url_for(endpoint)?,
            headers: self.merge_headers(options.headers),
            method: options.method,
            body: options.body,
        };
        debug!("{} {}", request.method, request.url);

        let resp = self.transport.send(request).await?;
        if !resp.is_success() {
            return Err(ApiError::from_error_body(resp.status, &resp.body));
        }
        if resp.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&resp.body)?)
    }
}

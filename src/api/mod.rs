//! HTTP client for the BuJo REST API.
//!
//! [`ApiClient`] wraps a [`reqwest::Client`] holding the session cookie
//! jar. Every call makes a single attempt; a failure of any kind is
//! normalized into [`BujoError::Api`] carrying the upstream message.

pub mod myself;
pub mod projects;
pub mod tasks;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{BujoError, Result};

/// User-Agent sent when the configuration does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("bujo/", env!("CARGO_PKG_VERSION"));

/// Shared REST client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`BujoError::Config`] if the base URL is invalid or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let ua = config
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(ua)
            .build()
            .map_err(|e| BujoError::Config(format!("failed to build HTTP client: {e}")))?;
        Self::with_client(http, &config.base_url)
    }

    /// Wrap an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`BujoError::Config`] if `base_url` cannot be parsed.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BujoError::Config(format!("invalid base_url {base_url:?}: {e}")))?;
        Ok(Self { http, base_url })
    }

    /// Server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client, shared with the search backend so both
    /// use the same session cookies.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BujoError::Config(format!("invalid API path {path:?}: {e}")))
    }

    /// Start a request for `path` relative to the base URL.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        Ok(self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    /// Send a request, turning transport failures and error statuses into
    /// [`BujoError::Api`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| BujoError::network(e.to_string()))?;
        let status = response.status();
        tracing::debug!(url = %response.url(), %status, "API response");

        if status.is_success() || status == StatusCode::NOT_MODIFIED {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = bujo_search::query::upstream_message(&body, status);
        tracing::warn!(%status, %message, "API request failed");
        Err(BujoError::Api {
            status: Some(status.as_u16()),
            message,
        })
    }

    /// `GET path`.
    pub(crate) async fn do_fetch(&self, path: &str) -> Result<Response> {
        self.send(self.request(Method::GET, path)?).await
    }

    /// `POST path` with an optional JSON body.
    pub(crate) async fn do_post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response> {
        let mut request = self.request(Method::POST, path)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request).await
    }

    /// `PATCH path` with a JSON body.
    pub(crate) async fn do_patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        self.send(self.request(Method::PATCH, path)?.json(body)).await
    }

    /// `PUT path` with a JSON body.
    pub(crate) async fn do_put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        self.send(self.request(Method::PUT, path)?.json(body)).await
    }

    /// `DELETE path`.
    pub(crate) async fn do_delete(&self, path: &str) -> Result<Response> {
        self.send(self.request(Method::DELETE, path)?).await
    }
}

/// Decode a JSON response body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    response.json::<T>().await.map_err(|e| BujoError::Api {
        status: Some(status.as_u16()),
        message: format!("invalid response body: {e}"),
    })
}

//
// (C) Copyright IBM 2026
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.
//
// Any modifications or derivative works of this code must retain this
// copyright notice, and modified files need to carry a notice indicating
// that they have been altered from the originals.

//! ML Engine v1 API Client

use crate::error::{ApiError, Result};
use crate::models::ListVersionsRequest;
use log::debug;
use reqwest::header;
use reqwest_middleware::ClientBuilder as ReqwestClientBuilder;
use reqwest_retry::{policies::ExponentialBackoff, Jitter, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://ml.googleapis.com/v1";

const DEFAULT_RETRIES: u32 = 5;
const DEFAULT_INITIAL_RETRY_INTERVAL: f64 = 1.0;
const DEFAULT_MAX_RETRY_INTERVAL: f64 = 10.0;
const DEFAULT_EXPONENTIAL_BASE: u32 = 2;

/// An asynchronous `Client` to make Requests with.
///
/// Every method takes fully-qualified resource names (`projects/{project}/...`) and returns the
/// raw JSON body of the response.
///
/// Transient failures are retried except on the `create` methods. A create that reached the
/// server but failed in transit would otherwise be retried into a 409 for a resource this
/// client created itself.
#[derive(Debug, Clone)]
pub struct Client {
    /// The base URL this client sends requests to
    pub(crate) base_url: String,
    /// HTTP client to interact with ML Engine
    pub(crate) client: reqwest_middleware::ClientWithMiddleware,
    /// HTTP client without the retry layer, for non-idempotent creates
    pub(crate) create_client: reqwest_middleware::ClientWithMiddleware,
}

impl Client {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `projects.models.create`: `parent` is `projects/{project}`.
    pub async fn create_model(&self, parent: &str, model: &Value) -> Result<Value> {
        let url = format!("{}/{}/models", self.base_url, parent);
        self.create(&url, model).await
    }

    /// `projects.models.get`
    pub async fn get_model(&self, name: &str) -> Result<Value> {
        self.get(&self.resource_url(name)).await
    }

    /// `projects.models.delete`, returns a long-running operation.
    pub async fn delete_model(&self, name: &str) -> Result<Value> {
        self.delete(&self.resource_url(name)).await
    }

    /// `projects.models.versions.create`: `parent` is the model path. Returns a long-running
    /// operation.
    pub async fn create_version(&self, parent: &str, version: &Value) -> Result<Value> {
        let url = format!("{}/{}/versions", self.base_url, parent);
        self.create(&url, version).await
    }

    /// `projects.models.versions.setDefault`
    pub async fn set_default_version(&self, name: &str, body: &Value) -> Result<Value> {
        let url = format!("{}/{}:setDefault", self.base_url, name);
        self.post(&url, body).await
    }

    /// One page of `projects.models.versions.list`.
    pub async fn list_versions(&self, request: &ListVersionsRequest) -> Result<Value> {
        let url = format!("{}/{}/versions", self.base_url, request.parent);
        let mut query = vec![("pageSize", request.page_size.to_string())];
        if let Some(token) = &request.page_token {
            query.push(("pageToken", token.clone()));
        }
        let resp = self.client.get(&url).query(&query).send().await?;
        self.handle_request(resp).await
    }

    /// `projects.models.versions.delete`, returns a long-running operation.
    pub async fn delete_version(&self, name: &str) -> Result<Value> {
        self.delete(&self.resource_url(name)).await
    }

    /// `projects.operations.get`: `name` is the operation name as returned by the API.
    pub async fn get_operation(&self, name: &str) -> Result<Value> {
        self.get(&self.resource_url(name)).await
    }

    /// `projects.jobs.create`: `parent` is `projects/{project}`.
    pub async fn create_job(&self, parent: &str, job: &Value) -> Result<Value> {
        let url = format!("{}/{}/jobs", self.base_url, parent);
        self.create(&url, job).await
    }

    /// `projects.jobs.get`
    pub async fn get_job(&self, name: &str) -> Result<Value> {
        self.get(&self.resource_url(name)).await
    }

    /// `projects.jobs.cancel`
    pub async fn cancel_job(&self, name: &str) -> Result<Value> {
        let url = format!("{}/{}:cancel", self.base_url, name);
        self.post(&url, &Value::Object(Default::default())).await
    }

    fn resource_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.client.get(url).send().await?;
        self.handle_request(resp).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.client.delete(url).send().await?;
        self.handle_request(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, U: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &U,
    ) -> Result<T> {
        let resp = self.client.post(url).json(body).send().await?;
        self.handle_request(resp).await
    }

    /// POST sent exactly once.
    pub(crate) async fn create<T: DeserializeOwned, U: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &U,
    ) -> Result<T> {
        let resp = self.create_client.post(url).json(body).send().await?;
        self.handle_request(resp).await
    }

    async fn handle_request<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let json_text = resp.text().await?;
        if status.is_success() {
            debug!("{}", json_text);
            // empty bodies decode as `{}`
            let json_text = if json_text.trim().is_empty() {
                "{}"
            } else {
                json_text.as_str()
            };
            Ok(serde_json::from_str(json_text)?)
        } else {
            debug!("Status: {}, Fail {}", status, json_text);
            Err(ApiError::from_status(
                status.as_u16(),
                error_message(&json_text),
            ))
        }
    }
}

/// Pulls `error.message` out of a Google API error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

/// A [`ClientBuilder`] can be used to create a [`Client`] with custom configuration.
#[must_use]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    /// The base URL this client sends requests to
    base_url: String,
    access_token: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry_policy: Option<ExponentialBackoff>,
    retries_enabled: bool,
}

impl ClientBuilder {
    /// Construct a new [`ClientBuilder`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use ml_engine_api::ClientBuilder;
    ///
    /// let _builder = ClientBuilder::new("ya29.token".to_string());
    /// ```
    pub fn new(access_token: String) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token,
            timeout: None,
            connect_timeout: None,
            retry_policy: None,
            retries_enabled: true,
        }
    }

    /// Overrides the API endpoint, e.g. a regional endpoint or a local test server.
    pub fn with_base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Retry policy applied to transient failures (connection errors, 5xx, 408, 429).
    /// Model, version and job creation are never retried.
    pub fn with_retry_policy(&mut self, policy: ExponentialBackoff) -> &mut Self {
        self.retry_policy = Some(policy);
        self.retries_enabled = true;
        self
    }

    pub fn without_retries(&mut self) -> &mut Self {
        self.retries_enabled = false;
        self
    }

    /// Returns a [`Client`] that uses this [`ClientBuilder`] configuration.
    ///
    /// The retry policy covers every request except the `create_*` calls, which are sent once.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ml_engine_api::ClientBuilder;
    ///
    /// let _client = ClientBuilder::new("ya29.token".to_string())
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn build(&mut self) -> anyhow::Result<Client> {
        let mut reqwest_client_builder = reqwest::Client::builder();
        reqwest_client_builder = reqwest_client_builder.connection_verbose(true);
        if let Some(v) = self.timeout {
            reqwest_client_builder = reqwest_client_builder.timeout(v)
        }
        if let Some(v) = self.connect_timeout {
            reqwest_client_builder = reqwest_client_builder.connect_timeout(v)
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let mut auth_val =
            header::HeaderValue::from_str(&format!("Bearer {}", self.access_token))?;
        auth_val.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_val);
        reqwest_client_builder = reqwest_client_builder.default_headers(headers);

        let http_client = reqwest_client_builder.build()?;
        let create_client = ReqwestClientBuilder::new(http_client.clone()).build();
        let mut reqwest_builder = ReqwestClientBuilder::new(http_client);
        if self.retries_enabled {
            let policy = self.retry_policy.clone().unwrap_or_else(|| {
                ExponentialBackoff::builder()
                    .retry_bounds(
                        Duration::from_secs_f64(DEFAULT_INITIAL_RETRY_INTERVAL),
                        Duration::from_secs_f64(DEFAULT_MAX_RETRY_INTERVAL),
                    )
                    .jitter(Jitter::Bounded)
                    .base(DEFAULT_EXPONENTIAL_BASE)
                    .build_with_max_retries(DEFAULT_RETRIES)
            });
            reqwest_builder =
                reqwest_builder.with(RetryTransientMiddleware::new_with_policy(policy));
        }

        Ok(Client {
            base_url: self.base_url.clone(),
            client: reqwest_builder.build(),
            create_client,
        })
    }
}

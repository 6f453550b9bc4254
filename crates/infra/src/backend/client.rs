//! PostgREST-style backend client
//!
//! Owns its transport: the API key rides on every request, and reads are
//! replayed on server errors, rate limiting and transient transport
//! failures with a doubling backoff.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use opsdeck_domain::{OpsDeckError, Result};

use crate::config::BackendConfig;
use crate::errors::InfraError;

/// Retry budget for backend requests
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, first try included
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each further retry
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, base_backoff: Duration::from_millis(200) }
    }
}

impl RetryPolicy {
    fn delay(&self, completed_attempts: u32) -> Duration {
        let exponent = completed_attempts.saturating_sub(1).min(6);
        self.base_backoff.saturating_mul(2u32.pow(exponent))
    }
}

/// Client for the hosted backend's REST interface.
///
/// Tables are exposed under `/rest/v1/{table}` with filters, ordering and
/// limits as query parameters; named server-side functions live under
/// `/rest/v1/rpc/{function}`.
#[derive(Clone)]
pub struct BackendClient {
    http: ReqwestClient,
    base_url: Url,
    retry: RetryPolicy,
}

impl BackendClient {
    /// Build a client from configuration. The API key is attached to every
    /// request as both the `apikey` header and a bearer token.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| OpsDeckError::Config(format!("Invalid backend URL: {e}")))?;

        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(&config.api_key)
            .map_err(|_| OpsDeckError::Config("API key contains invalid characters".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| OpsDeckError::Config("API key contains invalid characters".into()))?;
        headers.insert("apikey", key_value);
        headers.insert(AUTHORIZATION, bearer);

        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .no_proxy()
            .build()
            .map_err(InfraError::from)?;

        Ok(Self { http, base_url, retry: RetryPolicy::default() })
    }

    /// Replace the default retry budget
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Start a read query against a table
    pub fn table(&self, name: &str) -> Query<'_> {
        Query { client: self, table: name.to_owned(), params: Vec::new() }
    }

    /// Invoke a named server-side function with a JSON argument object
    pub async fn rpc<T: DeserializeOwned>(
        &self,
        function: &str,
        args: serde_json::Value,
    ) -> Result<T> {
        let url = self
            .endpoint(&format!("rpc/{function}"))
            .map_err(|e| OpsDeckError::Config(format!("Invalid rpc URL: {e}")))?;
        debug!(%function, "invoking backend function");

        let response = self.execute(self.http.post(url).json(&args)).await?;
        let response = response.error_for_status().map_err(InfraError::from)?;
        let value = response.json::<T>().await.map_err(InfraError::from)?;
        Ok(value)
    }

    /// Send a request within the retry budget.
    ///
    /// Server errors and rate limiting get the request replayed after a
    /// backoff; other statuses and non-transient transport errors surface
    /// immediately. The auth headers are client defaults, so every attempt
    /// carries them.
    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let mut attempt = 1;
        loop {
            let prepared = request.try_clone().ok_or_else(|| {
                OpsDeckError::Internal("backend request body is not replayable".into())
            })?;

            let outcome = prepared.send().await;
            let transient = match &outcome {
                Ok(response) => retryable_status(response.status()),
                Err(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            };

            if transient && attempt < self.retry.max_attempts {
                let delay = self.retry.delay(attempt);
                debug!(attempt, ?delay, "retrying backend request");
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return outcome.map_err(|err| OpsDeckError::from(InfraError::from(err)));
        }
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, url::ParseError> {
        self.base_url.join(&format!("rest/v1/{path}"))
    }
}

fn retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Builder for one table read.
///
/// Filters follow the PostgREST operator syntax (`eq.`, `in.(..)`,
/// `is.null`); the builder only exposes the operators the repositories use.
pub struct Query<'a> {
    client: &'a BackendClient,
    table: String,
    params: Vec<(String, String)>,
}

impl Query<'_> {
    /// Columns to return, including embedded relations
    /// (e.g. `package:design_packages(name)`)
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.to_owned()));
        self
    }

    /// Equality filter
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.to_owned(), format!("eq.{value}")));
        self
    }

    /// Membership filter
    pub fn in_list(mut self, column: &str, values: &[String]) -> Self {
        let quoted: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
        self.params.push((column.to_owned(), format!("in.({})", quoted.join(","))));
        self
    }

    /// Null filter
    pub fn is_null(mut self, column: &str) -> Self {
        self.params.push((column.to_owned(), "is.null".into()));
        self
    }

    /// Ascending order
    pub fn order_asc(mut self, column: &str) -> Self {
        self.params.push(("order".into(), format!("{column}.asc")));
        self
    }

    /// Descending order
    pub fn order_desc(mut self, column: &str) -> Self {
        self.params.push(("order".into(), format!("{column}.desc")));
        self
    }

    /// Row cap
    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".into(), limit.to_string()));
        self
    }

    /// Execute, expecting a list of rows
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let mut url = self
            .client
            .endpoint(&self.table)
            .map_err(|e| OpsDeckError::Config(format!("Invalid table URL: {e}")))?;
        url.query_pairs_mut().extend_pairs(self.params.iter());
        debug!(table = %self.table, "fetching backend rows");

        let response = self.client.execute(self.client.http.get(url)).await?;
        let response = response.error_for_status().map_err(InfraError::from)?;
        let rows = response.json::<Vec<T>>().await.map_err(InfraError::from)?;
        Ok(rows)
    }

    /// Execute, expecting zero or one row
    pub async fn maybe_single<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let mut rows = self.limit(1).fetch::<T>().await?;
        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }
}

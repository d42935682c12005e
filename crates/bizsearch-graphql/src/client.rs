//! HTTP transport for the business directory's GraphQL endpoint.
//!
//! Wraps `reqwest` with bearer-token auth and GraphQL envelope handling.
//! Partial results are accepted: when the endpoint returns both `data` and
//! `errors` (e.g. one id in a batch no longer exists), the errors are logged
//! and the data is returned.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::error::GraphqlError;
use crate::query::GraphqlQuery;

/// Anything that can execute a GraphQL query and hand back its `data`.
pub trait RpcClient {
    fn send(
        &self,
        query: &GraphqlQuery,
    ) -> impl Future<Output = Result<Value, GraphqlError>> + Send;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

/// Builds the shared `reqwest` client used by every directory client.
pub(crate) fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, GraphqlError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

pub(crate) fn parse_url(raw: &str) -> Result<Url, GraphqlError> {
    Url::parse(raw).map_err(|e| GraphqlError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Client for the directory's GraphQL endpoint.
pub struct GraphqlClient {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl GraphqlClient {
    /// # Errors
    ///
    /// Returns [`GraphqlError::InvalidUrl`] if `endpoint` does not parse, or
    /// [`GraphqlError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn new(
        endpoint: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GraphqlError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            endpoint: parse_url(endpoint)?,
            api_key: api_key.map(str::to_owned),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Splits a GraphQL envelope into its `data`, or an error when there is
    /// nothing usable.
    fn unwrap_envelope(envelope: Envelope) -> Result<Value, GraphqlError> {
        let messages = envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        match envelope.data {
            Some(data) if !data.is_null() => {
                if !messages.is_empty() {
                    tracing::warn!(errors = %messages, "graphql response carried partial errors");
                }
                Ok(data)
            }
            _ if !messages.is_empty() => Err(GraphqlError::Api(messages)),
            _ => Err(GraphqlError::Api("response contained no data".to_string())),
        }
    }
}

impl RpcClient for GraphqlClient {
    async fn send(&self, query: &GraphqlQuery) -> Result<Value, GraphqlError> {
        let mut request = self.client.post(self.endpoint.clone()).json(query);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(endpoint = %self.endpoint, variables = query.variables.len(), "sending graphql query");
        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| GraphqlError::Deserialize {
                context: self.endpoint.to_string(),
                source: e,
            })?;

        Self::unwrap_envelope(envelope)
    }
}

//! # HTTP Implementation
//!
//! Production reqwest client for the invoicing backend, implementing
//! both adapter traits. Wraps a `reqwest::Client` with the backend base
//! URL, bearer authentication, and per-request timeout.
//!
//! The session/authorization context is passed in explicitly through
//! [`HttpConfig`] — nothing here reads ambient storage.

use std::time::Duration;

use async_trait::async_trait;
use faktur_core::{InvoiceId, ItemRef};

use crate::adapter::{InvoiceStore, ItemLookup};
use crate::error::ClientError;
use crate::types::{
    CreatedInvoice, InvoiceRecord, InvoiceSummary, InvoiceUpdate, ItemRecord, NewInvoice,
};

/// Configuration for the invoicing backend HTTP client.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL of the backend (e.g. `https://billing.example.com/api`).
    pub base_url: String,
    /// Bearer token for the current session, if authenticated.
    pub bearer_token: Option<String>,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl HttpConfig {
    /// Create a new configuration with default timeout and no auth.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
            timeout_secs: 30,
        }
    }

    /// Attach the session's bearer token.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// Typed HTTP client for the invoicing backend.
///
/// One instance implements both [`ItemLookup`] and [`InvoiceStore`];
/// share it via `Arc` and hand the same client to both seams.
#[derive(Debug)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    /// Build a client from configuration.
    pub fn new(config: HttpConfig) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = &config.bearer_token {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ClientError::Config {
                    reason: "invalid bearer token characters".to_string(),
                })?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Config {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| ClientError::Config {
            reason: format!("invalid base URL {base_url:?}: {e}"),
        })?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request; transport failures and non-2xx statuses become
    /// [`ClientError`] with the endpoint and a body excerpt attached.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::debug!(endpoint, "calling invoicing backend");
        let resp = request.send().await.map_err(|source| ClientError::Http {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
        endpoint: &str,
    ) -> Result<T, ClientError> {
        resp.json()
            .await
            .map_err(|source| ClientError::Deserialization {
                endpoint: endpoint.to_string(),
                source,
            })
    }
}

#[async_trait]
impl ItemLookup for HttpApiClient {
    async fn resolve(&self, item: ItemRef) -> Result<Option<ItemRecord>, ClientError> {
        let endpoint = format!("/Item/{item}");
        let resp = self
            .client
            .get(self.url(&endpoint))
            .send()
            .await
            .map_err(|source| ClientError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        // An unknown reference is not an error for the editor.
        if resp.status().as_u16() == 404 {
            return Ok(None);
        }
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        Self::decode(resp, &endpoint).await.map(Some)
    }
}

#[async_trait]
impl InvoiceStore for HttpApiClient {
    async fn list(&self) -> Result<Vec<InvoiceSummary>, ClientError> {
        let endpoint = "/Invoice/GetList";
        let resp = self.send(self.client.get(self.url(endpoint)), endpoint).await?;
        Self::decode(resp, endpoint).await
    }

    async fn fetch(&self, id: InvoiceId) -> Result<InvoiceRecord, ClientError> {
        let endpoint = format!("/Invoice/{id}");
        let resp = self.send(self.client.get(self.url(&endpoint)), &endpoint).await?;
        Self::decode(resp, &endpoint).await
    }

    async fn create(&self, invoice: &NewInvoice) -> Result<CreatedInvoice, ClientError> {
        let endpoint = "/Invoice";
        let resp = self
            .send(self.client.post(self.url(endpoint)).json(invoice), endpoint)
            .await?;
        Self::decode(resp, endpoint).await
    }

    async fn update(&self, invoice: &InvoiceUpdate) -> Result<(), ClientError> {
        let endpoint = "/Invoice";
        self.send(self.client.put(self.url(endpoint)).json(invoice), endpoint)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: InvoiceId) -> Result<(), ClientError> {
        let endpoint = format!("/Invoice/{id}");
        self.send(self.client.delete(self.url(&endpoint)), &endpoint)
            .await?;
        Ok(())
    }
}

//! HTTP client for the Packagist API

use std::collections::HashMap;
use std::time::Duration;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::{form_urlencoded, Url};

use packagist_core::error::PackagistError;
use crate::api::{PackageListResult, PackageResult};
use crate::RegistryResult;

/// Production Packagist host
pub const PACKAGIST_HOST: &str = "https://packagist.org";

/// Transport configuration applied when the client builds its own HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base registry URL, without a trailing slash
    pub host: String,
    /// Whole-request timeout; `None` leaves the transport default
    pub timeout: Option<Duration>,
    /// User agent header; `None` leaves the transport default
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: PACKAGIST_HOST.to_string(),
            timeout: None,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Client for the Packagist registry API
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client, shared across calls
    client: Client,
    /// Base registry URL
    host: String,
}

impl RegistryClient {
    /// Create a client for packagist.org with a default transport
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client whose transport is built from `config`
    pub fn with_config(config: ClientConfig) -> RegistryResult<Self> {
        let mut builder = ClientBuilder::new();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build()
            .map_err(|e| PackagistError::network(
                format!("Failed to create HTTP client: {}", e),
                e,
            ))?;

        Ok(Self::with_http_client(config.host, client))
    }

    /// Create a client around an already configured transport
    pub fn with_http_client(host: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            host: host.into(),
        }
    }

    /// Base registry URL requests are issued against
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Redirect subsequent requests to another registry host
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    /// List package names, optionally narrowed by filters such as `type` or `vendor`
    pub async fn list_packages(&self, filters: &HashMap<String, String>) -> RegistryResult<PackageListResult> {
        let uri = self.make_uri("/packages/list.json", filters)?;
        self.fetch_json(&uri).await
    }

    /// Fetch metadata for a single package by its `vendor/name`
    pub async fn get_package(&self, name: &str) -> RegistryResult<PackageResult> {
        // Package names are inserted verbatim; the vendor slash is a path separator
        let uri = self.make_uri(&format!("/packages/{}.json", name), &HashMap::new())?;
        self.fetch_json(&uri).await
    }

    /// Build an absolute API URI for `path`, with `params` as the query string.
    ///
    /// `host + path` is kept exactly as given; it is only parsed to reject a
    /// malformed host. Parameters are form-encoded and sorted by key, and any
    /// query already present is replaced. An empty map produces no `?` at all.
    pub fn make_uri(&self, path: &str, params: &HashMap<String, String>) -> RegistryResult<String> {
        let raw = format!("{}{}", self.host, path);
        Url::parse(&raw).map_err(|source| {
            error!("Malformed registry URL {}: {}", raw, source);
            PackagistError::InvalidUrl {
                url: raw.clone(),
                source,
            }
        })?;

        let base = raw.split_once('?').map_or(raw.as_str(), |(base, _)| base);
        if params.is_empty() {
            return Ok(base.to_string());
        }

        let mut pairs: Vec<(&String, &String)> = params.iter().collect();
        pairs.sort();
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();

        Ok(format!("{}?{}", base, query))
    }

    /// Issue a GET and decode the whole body, whatever the status code
    async fn fetch_json<T: DeserializeOwned>(&self, uri: &str) -> RegistryResult<T> {
        debug!("GET {}", uri);

        let response = self.client
            .get(uri)
            .send()
            .await
            .map_err(|e| PackagistError::network(
                format!("Failed to fetch {}: {}", uri, e),
                e,
            ))?;

        debug!("{} responded with status {}", uri, response.status());

        let body = response.bytes()
            .await
            .map_err(|e| PackagistError::network(
                format!("Failed to read response from {}: {}", uri, e),
                e,
            ))?;

        // Only the first JSON value counts; anything after it is ignored
        match serde_json::Deserializer::from_slice(&body).into_iter::<T>().next() {
            Some(decoded) => decoded.map_err(PackagistError::decode),
            None => serde_json::from_slice(&body).map_err(PackagistError::decode),
        }
    }
}

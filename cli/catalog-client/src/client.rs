//! Catalog client for the remote character API.

use std::fmt::Debug;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use enum_dispatch::enum_dispatch;
use reqwest::header::{self, HeaderMap};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::{CatalogClientError, GatewayError, LookupError};
use crate::mock::MockClient;
use crate::types::{ApiCharacterPage, EntityRecord, SearchOutcome};

const CHARACTER_ENDPOINT: &str = "character";

/// Either a client for the actual catalog service,
/// or a mock client for testing.
#[derive(Debug)]
#[enum_dispatch(ClientTrait)]
pub enum Client {
    Catalog(CatalogClient),
    Mock(MockClient),
}

/// The gateway to the remote catalog.
///
/// Neither operation retries; a single failed attempt is final.
#[enum_dispatch]
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// Search for entities whose name matches `search_term`.
    ///
    /// An empty `search_term` lists every entity.
    /// Any failure is absorbed into [SearchOutcome::Degraded].
    async fn search_entities(&self, search_term: &str, page_number: NonZeroU32) -> SearchOutcome;

    /// Look up a single entity.
    ///
    /// Non-positive ids are rejected with [LookupError::InvalidRequest]
    /// before any request is sent.
    async fn fetch_entity_by_id(&self, id: i64) -> Result<EntityRecord, LookupError>;
}

/// A client for the catalog service.
///
/// Wraps a [reqwest::Client] configured with timeouts, user agent and extra
/// headers, and the base url all endpoints are resolved against.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
    config: CatalogClientConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("catalog_url", &self.config.catalog_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogClientError> {
        let base_url =
            Url::parse(&config.catalog_url).map_err(|err| CatalogClientError::InvalidUrl {
                url: config.catalog_url.clone(),
                err,
            })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogClientError::Other(format!(
                "catalog url '{}' cannot be used as a base url",
                config.catalog_url
            )));
        }

        let client = build_http_client(&config)?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Get the configured catalog URL.
    pub fn catalog_url(&self) -> &str {
        &self.config.catalog_url
    }

    /// Resolve `segments` below the base url.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a GET request and decode a successful JSON response.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        debug!(%url, "sending catalog request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::RemoteRejection(status));
        }

        let body = response.bytes().await.map_err(GatewayError::Transport)?;
        serde_json::from_slice(&body).map_err(GatewayError::Decode)
    }
}

impl ClientTrait for CatalogClient {
    #[instrument(skip(self), fields(catalog_url = %self.config.catalog_url))]
    async fn search_entities(&self, search_term: &str, page_number: NonZeroU32) -> SearchOutcome {
        let mut url = self.endpoint(&[CHARACTER_ENDPOINT]);
        {
            let mut query = url.query_pairs_mut();
            if !search_term.is_empty() {
                query.append_pair("name", search_term);
            }
            query.append_pair("page", &page_number.to_string());
        }

        match self.get_json::<ApiCharacterPage>(url).await {
            Ok(page) => {
                debug!(n_results = page.results.len(), "received catalog page");
                SearchOutcome::Found(page.into())
            },
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "catalog search degraded to an empty page");
                SearchOutcome::Degraded
            },
        }
    }

    #[instrument(skip(self), fields(catalog_url = %self.config.catalog_url))]
    async fn fetch_entity_by_id(&self, id: i64) -> Result<EntityRecord, LookupError> {
        if id <= 0 {
            return Err(LookupError::InvalidRequest(id));
        }

        let url = self.endpoint(&[CHARACTER_ENDPOINT, &id.to_string()]);
        self.get_json::<EntityRecord>(url).await.map_err(|err| {
            warn!(kind = err.kind(), error = %err, "catalog lookup failed");
            LookupError::NotFound(err)
        })
    }
}

/// Build the HTTP client used for all catalog requests.
fn build_http_client(config: &CatalogClientConfig) -> Result<reqwest::Client, CatalogClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );

    for (key, value) in &config.extra_headers {
        headers.insert(
            header::HeaderName::from_str(key).map_err(
                |e: reqwest::header::InvalidHeaderName| CatalogClientError::Other(e.to_string()),
            )?,
            header::HeaderValue::from_str(value).map_err(
                |e: reqwest::header::InvalidHeaderValue| CatalogClientError::Other(e.to_string()),
            )?,
        );
    }

    debug!(
        catalog_url = %config.catalog_url,
        extra_headers = config.extra_headers.len(),
        "building catalog HTTP client"
    );

    let client_builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(60));

    let client_builder = if let Some(ref user_agent) = config.user_agent {
        client_builder.user_agent(user_agent)
    } else {
        client_builder
    };

    client_builder
        .build()
        .map_err(|e| CatalogClientError::Other(e.to_string()))
}

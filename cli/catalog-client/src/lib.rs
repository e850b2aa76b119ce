//! HTTP client for the remote character catalog API.
//!
//! This crate provides:
//! - HTTP client construction with timeouts and extra headers
//! - Strictly typed records decoded from the remote payloads
//! - Failure normalization: list searches degrade to an empty page,
//!   detail lookups collapse to [`LookupError::NotFound`]
//! - A mock client replaying canned responses for tests
//!
//! ## Usage
//!
//! ```ignore
//! use catalog_client::{CatalogClient, CatalogClientConfig, ClientTrait};
//!
//! let config = CatalogClientConfig {
//!     catalog_url: "https://rickandmortyapi.com/api".to_string(),
//!     extra_headers: BTreeMap::new(),
//!     user_agent: None,
//! };
//!
//! let client = CatalogClient::new(config)?;
//! let page = client.search_entities("Rick", 1).await.into_page();
//! ```

mod client;
mod config;
mod error;
mod mock;
mod types;

pub use client::{CatalogClient, Client, ClientTrait};
pub use config::{CatalogClientConfig, DEFAULT_CATALOG_URL};
pub use error::{CatalogClientError, GatewayError, LookupError};
pub use mock::{CATALOG_MOCK_DATA_VAR, MockClient, MockDataError, Response};
pub use types::{CatalogPage, EntityRecord, NamedLocation, PageInfo, SearchOutcome};

use std::path::PathBuf;

use anyhow::{Context, bail};
use catalog_client::{
    CATALOG_MOCK_DATA_VAR,
    CatalogClient,
    CatalogClientConfig,
    Client,
    MockClient,
};
use tracing::debug;

use crate::config::Config;

/// Initialize the Catalog API client
///
/// - Initialize a mock client if `$_CATALOG_WEB_USE_CATALOG_MOCK` points to mock data
/// - Initialize a real client otherwise
pub fn init_catalog_client(config: &Config) -> Result<Client, anyhow::Error> {
    if let Ok(path_str) = std::env::var(CATALOG_MOCK_DATA_VAR) {
        let path = PathBuf::from(path_str);
        if !path.exists() {
            bail!("path to mock data file doesn't exist: {}", path.display());
        }

        debug!(mock_data_path = %path.display(), "using mock catalog client");
        return Ok(MockClient::new(Some(&path))
            .context("could not load mock catalog data")?
            .into());
    }

    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| format!("catalog-web/{}", env!("CARGO_PKG_VERSION")));

    let client_config = CatalogClientConfig {
        catalog_url: config.catalog_url.clone(),
        user_agent: Some(user_agent),
        ..Default::default()
    };

    debug!(catalog_url = %client_config.catalog_url, "using catalog client");
    Ok(CatalogClient::new(client_config)
        .context("could not create catalog client")?
        .into())
}

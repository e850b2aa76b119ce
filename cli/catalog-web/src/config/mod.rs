use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog_client::DEFAULT_CATALOG_URL;
use config::{Config as HierarchicalConfig, Environment};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;
use xdg::BaseDirectories;

/// Name of the directory holding the config file
const CONFIG_DIR_NAME: &str = "catalog-web";
pub const CONFIG_FILE: &str = "catalog-web.toml";
/// Path to an additional config file, read last
const CONFIG_FILE_VAR: &str = "CATALOG_WEB_CONFIG_FILE";
const ENV_PREFIX: &str = "CATALOG_WEB_";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,

    /// Base URL of the remote catalog API
    // Using a URL here adds an extra trailing slash,
    // so just use a String.
    pub catalog_url: String,

    /// Absolute URL under which the index page is reachable
    pub public_url: Url,

    /// User agent sent with catalog requests
    pub user_agent: Option<String>,
}

impl Config {
    /// Assemble the layered configuration.
    ///
    /// Later sources override earlier ones:
    /// defaults, `/etc`, XDG config dirs, `$CATALOG_WEB_CONFIG_FILE`,
    /// then `CATALOG_WEB_*` variables from `env_vars`.
    fn raw_config(
        env_vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<HierarchicalConfig> {
        let env_vars: HashMap<String, String> = env_vars
            .into_iter()
            .filter_map(|(k, v)| k.strip_prefix(ENV_PREFIX).map(|k| (k.to_lowercase(), v)))
            .collect();

        let mut builder = HierarchicalConfig::builder()
            .set_default("listen_addr", "127.0.0.1:8000")?
            .set_default("catalog_url", DEFAULT_CATALOG_URL)?
            .set_default("public_url", "http://localhost:8000/")?;

        // read from /etc
        builder = builder.add_source(
            config::File::from(PathBuf::from("/etc").join(CONFIG_DIR_NAME).join(CONFIG_FILE))
                .format(config::FileFormat::Toml)
                .required(false),
        );

        // look for files in XDG_CONFIG_DIRS locations
        let dirs = BaseDirectories::with_prefix(CONFIG_DIR_NAME);
        for file in dirs.find_config_files(CONFIG_FILE) {
            debug!(?file, "adding config file");
            builder = builder.add_source(config::File::from(file).format(config::FileFormat::Toml));
        }

        // explicitly requested file must exist
        if let Some(file) = env_vars.get("config_file") {
            debug!(%file, "adding config file from `${CONFIG_FILE_VAR}`");
            builder = builder.add_source(
                config::File::from(PathBuf::from(file)).format(config::FileFormat::Toml),
            );
        }

        let overrides = env_vars
            .into_iter()
            .filter(|(k, _)| k != "config_file")
            .collect::<HashMap<_, _>>();
        let builder = builder.add_source(Environment::default().source(Some(overrides)));

        Ok(builder.build()?)
    }

    /// Creates a [Config] from the config files and environment
    pub fn parse() -> Result<Config> {
        Self::parse_from(env::vars())
    }

    fn parse_from(env_vars: impl IntoIterator<Item = (String, String)>) -> Result<Config> {
        let config = Self::raw_config(env_vars)?
            .try_deserialize()
            .context("Could not parse config")?;
        Ok(config)
    }
}

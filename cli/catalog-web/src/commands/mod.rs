use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use bpaf::Bpaf;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::routes::{AppState, router};
use crate::utils::init::init_catalog_client;

const DESCRIPTION: &str = "Serve a searchable catalog of Rick and Morty characters";

fn vec_len<T>(x: Vec<T>) -> usize {
    Vec::len(&x)
}

#[derive(Bpaf, Clone, Copy, Debug)]
pub enum Verbosity {
    Verbose(
        /// Increase logging verbosity
        ///
        /// Invoke multiple times for increasing detail.
        #[bpaf(short('v'), long("verbose"), req_flag(()), many, map(vec_len))]
        usize,
    ),

    /// Silence logs except for errors
    #[bpaf(short, long)]
    Quiet,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Verbose(0)
    }
}

#[derive(Debug, Bpaf)]
#[bpaf(options, version, descr(DESCRIPTION))]
pub struct WebArgs {
    #[bpaf(external, fallback(Default::default()))]
    pub verbosity: Verbosity,

    /// Address to listen on, overrides `listen_addr` from the config
    #[bpaf(long, argument("ADDR"))]
    pub listen: Option<SocketAddr>,
}

impl WebArgs {
    /// Run the web server until it receives Ctrl-C.
    pub async fn handle(self, config: Config) -> Result<()> {
        let listen_addr = self.listen.unwrap_or(config.listen_addr);
        let client = init_catalog_client(&config)?;

        let app = router(AppState {
            client: Arc::new(client),
            public_url: config.public_url.clone(),
        });

        let listener = TcpListener::bind(listen_addr)
            .await
            .with_context(|| format!("failed to bind to {listen_addr}"))?;

        info!(addr = %listen_addr, catalog_url = %config.catalog_url, "catalog server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("catalog server error")?;

        info!("catalog server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use bpaf::Args;

    use super::*;

    #[test]
    fn parses_verbosity_and_listen() {
        let args = web_args()
            .run_inner(Args::from(&["-vv", "--listen", "0.0.0.0:9000"]))
            .unwrap();
        assert!(matches!(args.verbosity, Verbosity::Verbose(2)));
        assert_eq!(args.listen, Some("0.0.0.0:9000".parse().unwrap()));
    }

    #[test]
    fn defaults() {
        let args = web_args().run_inner(Args::from(&[] as &[&str])).unwrap();
        assert!(matches!(args.verbosity, Verbosity::Verbose(0)));
        assert_eq!(args.listen, None);
    }

    #[test]
    fn quiet() {
        let args = web_args().run_inner(Args::from(&["--quiet"])).unwrap();
        assert!(matches!(args.verbosity, Verbosity::Quiet));
    }
}

use std::sync::OnceLock;

use tracing::{debug, error};
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload::Handle;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::commands::Verbosity;

static LOGGER_HANDLE: OnceLock<Handle<EnvFilter, Registry>> = OnceLock::new();

/// Map verbosity flags to a log filter.
///
/// `RUST_LOG` takes precedence if it is set.
pub fn log_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        // Show only errors
        Verbosity::Quiet => "off,catalog_web=error,catalog_client=error",
        // Only show warnings, including degraded catalog responses
        Verbosity::Verbose(0) => "off,catalog_web=warn,catalog_client=warn",
        // Show our own info logs
        Verbosity::Verbose(1) => "off,catalog_web=info,catalog_client=info",
        // Also show debug from our libraries
        Verbosity::Verbose(2) => "off,catalog_web=debug,catalog_client=debug",
        // Also show trace from our libraries
        Verbosity::Verbose(3) => "off,catalog_web=trace,catalog_client=trace",
        // Also show debug from dependencies
        Verbosity::Verbose(4) => "debug,catalog_web=trace,catalog_client=trace",
        Verbosity::Verbose(_) => "trace",
    }
}

/// Install the global subscriber on first use, then update its filter.
///
/// Cheap enough to call again whenever more is known about the desired
/// verbosity.
pub(crate) fn init_logger(verbosity: Option<Verbosity>) {
    let verbosity = verbosity.unwrap_or_default();

    let filter_handle = LOGGER_HANDLE.get_or_init(|| {
        let (subscriber, reload_handle) = create_registry_and_filter_reload_handle();
        subscriber.init();
        reload_handle
    });

    update_filters(filter_handle, log_filter(verbosity));
}

pub fn update_filters(filter_handle: &Handle<EnvFilter, Registry>, log_filter: &str) {
    let result = filter_handle.modify(|layer| {
        match EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_filter)) {
            Ok(new_filter) => *layer = new_filter,
            Err(err) => {
                error!("Updating logger filter failed: {}", err);
            },
        };
    });
    if let Err(err) = result {
        error!("Updating logger filter failed: {}", err);
    }
}

pub fn create_registry_and_filter_reload_handle() -> (
    impl tracing_subscriber::layer::SubscriberExt,
    Handle<EnvFilter, Registry>,
) {
    debug!("Initializing logger (how are you seeing this?)");
    // Start wide open, the actual level is set through the reload handle.
    let filter = EnvFilter::new("trace");
    let (filter, filter_reload_handle) = tracing_subscriber::reload::Layer::new(filter);
    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    let registry = tracing_subscriber::registry().with(log_layer);

    (registry, filter_reload_handle)
}

use std::process::ExitCode;

use anyhow::Result;
use commands::WebArgs;
use tracing::debug;
use utils::init::init_logger;

mod commands;
mod config;
mod navigation;
mod query;
mod render;
mod routes;
mod search_control;
mod utils;

async fn run(args: WebArgs) -> Result<()> {
    init_logger(Some(args.verbosity));
    let config = config::Config::parse()?;
    debug!(?config, "parsed config");
    args.handle(config).await?;
    Ok(())
}

fn main() -> ExitCode {
    // initialize logger with "best guess" defaults
    // updating the logger conf is cheap, so we reinitialize whenever we get more information
    init_logger(None);

    // Exits on parse failure or `--help`/`--version`
    let args = commands::web_args().run();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("ERROR: could not start async runtime: {err}");
            return ExitCode::from(1);
        },
    };

    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            debug!("{:#}", e);

            let err_str = e
                .chain()
                .skip(1)
                .fold(e.to_string(), |acc, cause| format!("{}: {}", acc, cause));

            eprintln!("ERROR: {err_str}");
            ExitCode::from(1)
        },
    }
}

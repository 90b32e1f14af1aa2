mod app;
mod config;
mod logging;

use std::process::ExitCode;

use engine_logging::engine_critical;

use crate::config::{ConfigError, Credentials, LOG_DESTINATION};
use crate::logging::LogDestination;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::initialize(LogDestination::from_setting(
        std::env::var(LOG_DESTINATION).ok().as_deref(),
    ));

    let credentials = match startup(|name| std::env::var(name).ok()) {
        Ok(credentials) => credentials,
        Err(code) => return code,
    };

    match app::run(credentials).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            engine_critical!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Check configuration before any client exists. A missing credential logs
/// one critical line per variable and yields the process exit code.
fn startup(lookup: impl Fn(&str) -> Option<String>) -> Result<Credentials, ExitCode> {
    Credentials::from_lookup(lookup).map_err(|ConfigError::Missing(names)| {
        for name in names {
            engine_critical!("Missing required environment variable: {name}");
        }
        ExitCode::FAILURE
    })
}

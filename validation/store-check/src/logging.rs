//! Log filter setup for the command line.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Parse a `--log-level` value, rejecting anything that is not a level name.
pub fn parse_log_level(log_level: &str) -> Result<Level> {
    log_level
        .parse()
        .with_context(|| format!("Unknown log level: {}", log_level))
}

/// `RUST_LOG` when set, otherwise everything at `log_level` and above.
pub fn log_filter(log_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::default().add_directive(parse_log_level(log_level)?.into())),
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let filter = log_filter(log_level)?;
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

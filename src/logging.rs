use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "warn";

/// Pick the log filter: `RUST_LOG` wins, then `--verbose`, then the
/// configured level.
fn filter_directive(env: Option<String>, verbose: bool, configured: Option<&str>) -> String {
    if let Some(env) = env.filter(|e| !e.trim().is_empty()) {
        return env;
    }
    if verbose {
        return "debug".to_string();
    }
    configured.unwrap_or(DEFAULT_LEVEL).to_string()
}

/// Install the global subscriber. Logs go to stderr so agenda output stays
/// pipeable.
pub fn init(verbose: bool, configured: Option<&str>) -> Result<()> {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), verbose, configured);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log level '{directive}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

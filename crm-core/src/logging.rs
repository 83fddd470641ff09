//! Tracing subscriber setup for binaries and test harnesses embedding the CRM.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::config::CrmConfigSnapshot;

/// Filter used when neither `RUST_LOG` nor `log.filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a global `fmt` subscriber.
///
/// Filter precedence: `RUST_LOG`, then the `log.filter` config key, then
/// [`DEFAULT_LOG_FILTER`]. Fails if a global subscriber is already set.
pub fn init_tracing(config: &CrmConfigSnapshot) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = config.get("log.filter").unwrap_or(DEFAULT_LOG_FILTER);
            EnvFilter::try_new(directive)
                .map_err(|e| anyhow!("invalid log.filter '{directive}': {e}"))?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize tracing subscriber: {e}"))?;

    tracing::info!(target: "crm", "tracing initialized");
    Ok(())
}

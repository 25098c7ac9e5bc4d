use std::env;
use std::time::Duration;

use crate::error::{InvalidTimeoutSnafu, Result};
use crate::storage::FilerConfig;
use crate::storage::constants::DEFAULT_FILER_ENDPOINT;

// Read the first of several environment variables that is set.
fn get_env_var(primary_key: &str, secondary_key: &str) -> Option<String> {
    env::var(primary_key)
        .or_else(|_| env::var(secondary_key))
        .ok()
}

/// Load filer configuration from environment variables.
///
/// - `FILER_ENDPOINT` (or `SEAWEEDFS_FILER_URL`), defaults to the local filer
/// - `FILER_TIMEOUT_SECS`, optional per-request timeout
pub fn load_filer_config() -> Result<FilerConfig> {
    let endpoint = get_env_var("FILER_ENDPOINT", "SEAWEEDFS_FILER_URL")
        .unwrap_or_else(|| DEFAULT_FILER_ENDPOINT.to_string());

    let mut config = FilerConfig::new(endpoint)?;
    if let Ok(raw) = env::var("FILER_TIMEOUT_SECS") {
        config = config.with_timeout(parse_timeout(&raw)?);
    }
    Ok(config)
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => InvalidTimeoutSnafu {
            value: raw.to_string(),
        }
        .fail(),
    }
}

//! Argument helpers for the `sage-worker` binary.

use sage_core::config::SageConfig;
use sage_core::errors::ConfigError;
use serde_json::Value;

/// Environment override for `worker.max_workers`.
pub const MAX_WORKERS_ENV: &str = "SAGE_WORKER_MAX_WORKERS";

/// Parse `key=value`. The value is read as JSON when it parses (numbers,
/// booleans, quoted strings), otherwise taken as a plain string.
pub fn parse_filter(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("filter key is empty in '{raw}'"));
    }
    let value = serde_json::from_str(value.trim())
        .unwrap_or_else(|_| Value::String(value.trim().to_string()));
    Ok((key.to_string(), value))
}

/// Apply `SAGE_WORKER_MAX_WORKERS` when set. Zero or garbage is rejected.
pub fn apply_env_overrides(
    config: &mut SageConfig,
    max_workers: Option<&str>,
) -> Result<(), ConfigError> {
    if let Some(raw) = max_workers {
        match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => config.worker.max_workers = n,
            _ => {
                return Err(ConfigError::InvalidEnv {
                    name: MAX_WORKERS_ENV.to_string(),
                    value: raw.to_string(),
                })
            }
        }
    }
    Ok(())
}

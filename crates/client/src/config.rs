use std::path::PathBuf;
use std::time::Duration;

use crate::backend::simulated::SimulationConfig;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a backend running locally.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
    /// Timeout for a single backend call.
    pub request_timeout: Duration,
    /// Timeout for the connectivity probe that picks live or demo mode.
    pub probe_timeout: Duration,
    /// Directory holding the persisted session slot.
    pub session_dir: PathBuf,
    /// Artificial latency of the simulated backend.
    pub simulation: SimulationConfig,
    /// Counter animation length; zero prints final values immediately.
    pub animation: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `API_URL`              | `http://localhost:8000`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `PROBE_TIMEOUT_MS`     | `1500`                   |
    /// | `SESSION_DIR`          | `.fraudshield`           |
    /// | `DEMO_PAY_DELAY_MS`    | `1000`                   |
    /// | `DEMO_UPLOAD_DELAY_MS` | `1500`                   |
    /// | `ANIMATION_MS`         | `1000`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from an arbitrary
    /// lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("API_URL")
            .unwrap_or_else(|| "http://localhost:8000".into())
            .trim_end_matches('/')
            .to_string();

        let request_timeout =
            Duration::from_secs(parse_u64(&lookup, "REQUEST_TIMEOUT_SECS", 30)?);
        let probe_timeout = Duration::from_millis(parse_u64(&lookup, "PROBE_TIMEOUT_MS", 1500)?);

        let session_dir = lookup("SESSION_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".fraudshield"));

        let simulation = SimulationConfig {
            pay_delay: Duration::from_millis(parse_u64(&lookup, "DEMO_PAY_DELAY_MS", 1000)?),
            upload_delay: Duration::from_millis(parse_u64(
                &lookup,
                "DEMO_UPLOAD_DELAY_MS",
                1500,
            )?),
        };

        let animation = Duration::from_millis(parse_u64(&lookup, "ANIMATION_MS", 1000)?);

        Ok(Self {
            api_url,
            request_timeout,
            probe_timeout,
            session_dir,
            simulation,
            animation,
        })
    }
}

fn parse_u64<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected: "unsigned integer",
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.probe_timeout, Duration::from_millis(1500));
        assert_eq!(config.session_dir, PathBuf::from(".fraudshield"));
        assert_eq!(config.simulation.pay_delay, Duration::from_secs(1));
        assert_eq!(config.simulation.upload_delay, Duration::from_millis(1500));
        assert_eq!(config.animation, Duration::from_secs(1));
    }

    #[test]
    fn overrides_and_trims_trailing_slash() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("API_URL", "https://shield.example.com/"),
            ("DEMO_PAY_DELAY_MS", "0"),
            ("SESSION_DIR", "/tmp/fs"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://shield.example.com");
        assert_eq!(config.simulation.pay_delay, Duration::ZERO);
        assert_eq!(config.session_dir, PathBuf::from("/tmp/fs"));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
    }
}

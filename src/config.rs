use std::time::Duration;

use ammowatch_shared::DEFAULT_API_BASE;
use tracing::warn;

// =========================================================
// Defaults
// =========================================================

pub const DEFAULT_POLL_SECS: u64 = 5;
pub const DEFAULT_ACTIVITY_LOG_LIMIT: u32 = 100;
pub const DEFAULT_TOKEN_KEY: &str = "authToken";
pub const DEFAULT_IDENTITY_KEY: &str = "userInfo";

pub const VAR_API_URL: &str = "AMMOWATCH_API_URL";
pub const VAR_POLL_SECS: &str = "AMMOWATCH_POLL_SECS";
pub const VAR_ACTIVITY_LOG_LIMIT: &str = "AMMOWATCH_ACTIVITY_LOG_LIMIT";

/// Where named settings come from: build-time env in the browser, a map in tests.
pub trait ConfigSource {
    fn var(&self, name: &str) -> Option<String>;
}

impl<F> ConfigSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Option<String> {
        self(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without trailing slash.
    pub api_base: String,
    pub poll_interval: Duration,
    pub activity_log_limit: u32,
    /// Persistent storage key of the bearer token.
    pub token_key: String,
    /// Persistent storage key of the JSON identity.
    pub identity_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            activity_log_limit: DEFAULT_ACTIVITY_LOG_LIMIT,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            identity_key: DEFAULT_IDENTITY_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads every known variable, falling back to the default for
    /// anything missing or unparsable.
    pub fn from_source(source: &impl ConfigSource) -> Self {
        let defaults = Self::default();

        let api_base = source
            .var(VAR_API_URL)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base);

        let poll_interval = parse_var::<u64>(source, VAR_POLL_SECS)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.poll_interval);

        let activity_log_limit = parse_var::<u32>(source, VAR_ACTIVITY_LOG_LIMIT)
            .unwrap_or(defaults.activity_log_limit);

        Self {
            api_base,
            poll_interval,
            activity_log_limit,
            ..defaults
        }
    }

    pub fn with_api_base(mut self, base: &str) -> Self {
        let base = base.trim().trim_end_matches('/');
        if !base.is_empty() {
            self.api_base = base.to_string();
        }
        self
    }
}

fn parse_var<T: std::str::FromStr>(source: &impl ConfigSource, name: &str) -> Option<T> {
    let raw = source.var(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(name, value = %raw, "ignoring unparsable config value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_source(&source(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base, "http://localhost:5000");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.token_key, "authToken");
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_source(&source(&[
            (VAR_API_URL, "https://api.ammowatch.dev/"),
            (VAR_POLL_SECS, "10"),
            (VAR_ACTIVITY_LOG_LIMIT, "25"),
        ]));
        assert_eq!(config.api_base, "https://api.ammowatch.dev");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.activity_log_limit, 25);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = ClientConfig::from_source(&source(&[
            (VAR_POLL_SECS, "soon"),
            (VAR_ACTIVITY_LOG_LIMIT, "-1"),
            (VAR_API_URL, "   "),
        ]));
        assert_eq!(config, ClientConfig::default());

        let zero = ClientConfig::from_source(&source(&[(VAR_POLL_SECS, "0")]));
        assert_eq!(zero.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_with_api_base() {
        let config = ClientConfig::default().with_api_base("http://10.0.0.2:5000//");
        assert_eq!(config.api_base, "http://10.0.0.2:5000");
        let unchanged = ClientConfig::default().with_api_base("");
        assert_eq!(unchanged.api_base, DEFAULT_API_BASE);
    }
}

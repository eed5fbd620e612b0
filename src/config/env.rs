//! Configuration loading from environment variables.

use std::time::Duration;

use super::{PermitConfig, PermitConfigBuilder};
use crate::Error;

/// Environment variable holding the bearer token.
pub const ENV_TOKEN: &str = "PERMIT_TOKEN";
/// Environment variable holding the PDP URL.
pub const ENV_PDP_URL: &str = "PERMIT_PDP_URL";
/// Environment variable holding the cloud API URL.
pub const ENV_API_URL: &str = "PERMIT_API_URL";
/// Environment variable holding the cloud API timeout, in seconds.
pub const ENV_API_TIMEOUT: &str = "PERMIT_API_TIMEOUT";
/// Environment variable holding the PDP timeout, in seconds.
pub const ENV_PDP_TIMEOUT: &str = "PERMIT_PDP_TIMEOUT";
/// Environment variable enabling fact proxying through the PDP.
pub const ENV_PROXY_FACTS_VIA_PDP: &str = "PERMIT_PROXY_FACTS_VIA_PDP";
/// Environment variable enabling synced facts.
pub const ENV_SYNCED_FACTS: &str = "PERMIT_SYNCED_FACTS";
/// Environment variable enabling debug logging of actions.
pub const ENV_DEBUG: &str = "PERMIT_DEBUG";

impl PermitConfig {
    /// Builds a configuration from `PERMIT_*` environment variables.
    ///
    /// Unset variables keep their defaults. See [`from_lookup`](Self::from_lookup)
    /// for the accepted formats.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if a
    /// variable cannot be parsed or the resulting configuration is invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration by resolving `PERMIT_*` keys through `lookup`.
    ///
    /// - Timeouts are seconds and may be fractional (`"0.5"`).
    /// - Booleans accept `1/true/yes/on` and `0/false/no/off`, case-insensitive.
    ///
    /// ```rust
    /// use permit::PermitConfig;
    /// use std::time::Duration;
    ///
    /// let config = PermitConfig::from_lookup(|key| match key {
    ///     "PERMIT_TOKEN" => Some("permit_key_abc".into()),
    ///     "PERMIT_API_TIMEOUT" => Some("1.5".into()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.api_timeout(), Some(Duration::from_millis(1500)));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut builder = PermitConfigBuilder::new();
        if let Some(token) = get(ENV_TOKEN) {
            builder = builder.token(token);
        }
        if let Some(url) = get(ENV_PDP_URL) {
            builder = builder.pdp_url(url);
        }
        if let Some(url) = get(ENV_API_URL) {
            builder = builder.api_url(url);
        }
        if let Some(raw) = get(ENV_API_TIMEOUT) {
            builder = builder.api_timeout(parse_seconds(ENV_API_TIMEOUT, &raw)?);
        }
        if let Some(raw) = get(ENV_PDP_TIMEOUT) {
            builder = builder.pdp_timeout(parse_seconds(ENV_PDP_TIMEOUT, &raw)?);
        }
        if let Some(raw) = get(ENV_PROXY_FACTS_VIA_PDP) {
            builder = builder.proxy_facts_via_pdp(parse_bool(ENV_PROXY_FACTS_VIA_PDP, &raw)?);
        }
        if let Some(raw) = get(ENV_SYNCED_FACTS) {
            builder = builder.synced_facts(parse_bool(ENV_SYNCED_FACTS, &raw)?);
        }
        if let Some(raw) = get(ENV_DEBUG) {
            builder = builder.debug_mode(parse_bool(ENV_DEBUG, &raw)?);
        }
        builder.build()
    }
}

fn parse_seconds(key: &str, raw: &str) -> Result<Duration, Error> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| {
            Error::configuration(format!("{} must be a number of seconds, got {:?}", key, raw))
        })?;
    Duration::try_from_secs_f64(secs)
        .map_err(|e| Error::configuration(format!("{} is out of range: {}", key, e)).with_source(e))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, Error> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::configuration(format!("{} must be a boolean, got {:?}", key, raw))),
    }
}

//! The validated client configuration and its builder.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use super::MultiTenancyConfig;
use crate::Error;

/// Default URL of the policy decision point.
pub const DEFAULT_PDP_URL: &str = "http://localhost:7766";

/// Default URL of the cloud management API.
pub const DEFAULT_API_URL: &str = "https://api.permit.io";

const SYNCED_FACTS_WARNING: &str =
    "synced_facts can only be set to true when proxy_facts_via_pdp is true, ignoring";

/// One of the two backends an operation can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The policy decision point: real-time checks and proxied facts.
    Pdp,
    /// The cloud management API for the authorization data model.
    Api,
}

impl Endpoint {
    /// Returns a short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Pdp => "pdp",
            Endpoint::Api => "api",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, immutable client configuration.
///
/// Built once with [`PermitConfig::builder()`] (or
/// [`PermitConfig::from_env()`]) and never mutated afterwards. Every planned
/// [`Operation`](crate::Operation) copies what it needs from this snapshot.
///
/// ## Example
///
/// ```rust
/// use permit::PermitConfig;
/// use std::time::Duration;
///
/// let config = PermitConfig::builder()
///     .token("permit_key_...")
///     .pdp_url("http://localhost:7766")
///     .api_timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_timeout(), Some(Duration::from_secs(5)));
/// assert_eq!(config.pdp_timeout(), None);
/// ```
#[derive(Clone)]
pub struct PermitConfig {
    token: Arc<str>,
    pdp_url: Url,
    api_url: Url,
    api_timeout: Option<Duration>,
    pdp_timeout: Option<Duration>,
    proxy_facts_via_pdp: bool,
    synced_facts: bool,
    multi_tenancy: MultiTenancyConfig,
    debug_mode: bool,
    warnings: Vec<String>,
}

impl PermitConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> PermitConfigBuilder {
        PermitConfigBuilder::new()
    }

    /// Returns the bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the policy decision point URL.
    pub fn pdp_url(&self) -> &Url {
        &self.pdp_url
    }

    /// Returns the cloud API URL.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Returns the timeout for cloud API calls, if set.
    pub fn api_timeout(&self) -> Option<Duration> {
        self.api_timeout
    }

    /// Returns the timeout for PDP calls, if set.
    pub fn pdp_timeout(&self) -> Option<Duration> {
        self.pdp_timeout
    }

    /// Returns `true` if fact writes are routed through the PDP.
    pub fn proxy_facts_via_pdp(&self) -> bool {
        self.proxy_facts_via_pdp
    }

    /// Returns the resolved synced-facts flag.
    ///
    /// Always `false` unless [`proxy_facts_via_pdp`](Self::proxy_facts_via_pdp)
    /// is set.
    pub fn synced_facts(&self) -> bool {
        self.synced_facts
    }

    /// Returns the default tenant policy.
    pub fn multi_tenancy(&self) -> &MultiTenancyConfig {
        &self.multi_tenancy
    }

    /// Returns `true` if every executed action is logged.
    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Returns warnings recorded while the configuration was validated.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns the base URL of the given endpoint.
    pub fn base_url(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::Pdp => &self.pdp_url,
            Endpoint::Api => &self.api_url,
        }
    }

    /// Returns the timeout that applies to the given endpoint.
    ///
    /// `None` means the transport's default applies.
    pub fn timeout_for(&self, endpoint: Endpoint) -> Option<Duration> {
        match endpoint {
            Endpoint::Pdp => self.pdp_timeout,
            Endpoint::Api => self.api_timeout,
        }
    }
}

impl fmt::Debug for PermitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermitConfig")
            .field("token", &"[REDACTED]")
            .field("pdp_url", &self.pdp_url.as_str())
            .field("api_url", &self.api_url.as_str())
            .field("api_timeout", &self.api_timeout)
            .field("pdp_timeout", &self.pdp_timeout)
            .field("proxy_facts_via_pdp", &self.proxy_facts_via_pdp)
            .field("synced_facts", &self.synced_facts)
            .field("multi_tenancy", &self.multi_tenancy)
            .field("debug_mode", &self.debug_mode)
            .finish()
    }
}

/// Builder for [`PermitConfig`].
///
/// ## Required Configuration
///
/// - `token()`: the API key used against both the PDP and the cloud API
///
/// ## Optional Configuration
///
/// - `pdp_url()`, `api_url()`: endpoint roots (defaults to
///   [`DEFAULT_PDP_URL`] and [`DEFAULT_API_URL`])
/// - `api_timeout()`, `pdp_timeout()`: per-endpoint timeouts
/// - `proxy_facts_via_pdp()`, `synced_facts()`: fact routing
/// - `multi_tenancy()`: default tenant policy
/// - `debug_mode()`: log every executed action
#[derive(Clone, Default)]
pub struct PermitConfigBuilder {
    token: Option<String>,
    pdp_url: Option<String>,
    api_url: Option<String>,
    api_timeout: Option<Duration>,
    pdp_timeout: Option<Duration>,
    proxy_facts_via_pdp: bool,
    synced_facts: bool,
    multi_tenancy: MultiTenancyConfig,
    debug_mode: bool,
}

impl PermitConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bearer token (API key).
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the policy decision point URL.
    #[must_use]
    pub fn pdp_url(mut self, url: impl Into<String>) -> Self {
        self.pdp_url = Some(url.into());
        self
    }

    /// Sets the cloud API URL.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Sets the timeout for cloud API calls.
    #[must_use]
    pub fn api_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout = Some(timeout);
        self
    }

    /// Sets the timeout for PDP calls.
    #[must_use]
    pub fn pdp_timeout(mut self, timeout: Duration) -> Self {
        self.pdp_timeout = Some(timeout);
        self
    }

    /// Routes fact writes through the PDP instead of the cloud API.
    #[must_use]
    pub fn proxy_facts_via_pdp(mut self, enabled: bool) -> Self {
        self.proxy_facts_via_pdp = enabled;
        self
    }

    /// Requests that fact writes wait until the facts are available.
    ///
    /// Only honored together with [`proxy_facts_via_pdp`](Self::proxy_facts_via_pdp);
    /// otherwise it is downgraded to `false` with a warning.
    #[must_use]
    pub fn synced_facts(mut self, enabled: bool) -> Self {
        self.synced_facts = enabled;
        self
    }

    /// Sets the default tenant policy.
    #[must_use]
    pub fn multi_tenancy(mut self, config: MultiTenancyConfig) -> Self {
        self.multi_tenancy = config;
        self
    }

    /// Enables logging of every executed action.
    #[must_use]
    pub fn debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// Validates the settings and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if:
    /// - The token is missing, empty, or not a valid header value
    /// - A URL is invalid or not `http`/`https`
    /// - A timeout is zero
    /// - The default tenant policy is inconsistent
    pub fn build(self) -> Result<PermitConfig, Error> {
        let token = validate_token(self.token)?;
        let pdp_url =
            parse_base_url("pdp_url", self.pdp_url.as_deref().unwrap_or(DEFAULT_PDP_URL))?;
        let api_url =
            parse_base_url("api_url", self.api_url.as_deref().unwrap_or(DEFAULT_API_URL))?;
        let api_timeout = validate_timeout("api_timeout", self.api_timeout)?;
        let pdp_timeout = validate_timeout("pdp_timeout", self.pdp_timeout)?;
        self.multi_tenancy.validate()?;

        let mut warnings = Vec::new();
        let synced_facts =
            resolve_synced_facts(self.proxy_facts_via_pdp, self.synced_facts, &mut warnings);

        Ok(PermitConfig {
            token: Arc::from(token),
            pdp_url,
            api_url,
            api_timeout,
            pdp_timeout,
            proxy_facts_via_pdp: self.proxy_facts_via_pdp,
            synced_facts,
            multi_tenancy: self.multi_tenancy,
            debug_mode: self.debug_mode,
            warnings,
        })
    }
}

impl fmt::Debug for PermitConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermitConfigBuilder")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("pdp_url", &self.pdp_url)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

fn validate_token(token: Option<String>) -> Result<String, Error> {
    let token = token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::configuration("token is required"))?;
    if token.chars().any(char::is_control) {
        return Err(Error::configuration("token contains control characters"));
    }
    Ok(token)
}

fn parse_base_url(field: &'static str, raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw)
        .map_err(|e| Error::configuration(format!("invalid {}: {}", field, e)).with_source(e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration(format!(
            "{} must use http or https, got {}",
            field,
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(Error::configuration(format!("{} cannot be used as a base URL", field)));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::configuration(format!(
            "{} must not carry a query or fragment",
            field
        )));
    }
    Ok(url)
}

fn validate_timeout(
    field: &'static str,
    timeout: Option<Duration>,
) -> Result<Option<Duration>, Error> {
    match timeout {
        Some(t) if t.is_zero() => Err(Error::configuration(format!("{} must be positive", field))),
        other => Ok(other),
    }
}

/// Downgrades `synced_facts` when facts are not proxied.
///
/// Soft failure: the value is coerced and a warning is recorded, never an error.
fn resolve_synced_facts(
    proxy_facts_via_pdp: bool,
    requested: bool,
    warnings: &mut Vec<String>,
) -> bool {
    if proxy_facts_via_pdp {
        return requested;
    }
    if requested {
        tracing::warn!(target: "permit::config", "{}", SYNCED_FACTS_WARNING);
        warnings.push(SYNCED_FACTS_WARNING.to_string());
    }
    false
}

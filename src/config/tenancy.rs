//! Default-tenant policy for multi-tenant applications.

use crate::Error;

/// Key of the tenant used when none is given.
pub const DEFAULT_TENANT: &str = "default";

/// Configuration of default tenant assignment.
///
/// The dispatch core only carries this policy; it is applied by the layer that
/// builds permission checks ([`Client::check`](crate::Client::check)), which
/// fills in `default_tenant` for resources that were not associated with a
/// tenant.
///
/// ## Example
///
/// ```rust
/// use permit::MultiTenancyConfig;
///
/// let config = MultiTenancyConfig::builder()
///     .default_tenant("acme")
///     .build();
/// assert_eq!(config.resolve_tenant(None), Some("acme"));
/// assert_eq!(config.resolve_tenant(Some("t1")), Some("t1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct MultiTenancyConfig {
    /// Key of the default tenant.
    #[builder(into, default = DEFAULT_TENANT.to_string())]
    pub default_tenant: String,

    /// Whether resources without a tenant fall back to `default_tenant`.
    #[builder(default = true)]
    pub use_default_tenant_if_empty: bool,
}

impl Default for MultiTenancyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MultiTenancyConfig {
    /// Creates a policy that never fills in a tenant.
    pub fn disabled() -> Self {
        Self::builder().use_default_tenant_if_empty(false).build()
    }

    /// Returns the tenant a resource should be checked against.
    pub fn resolve_tenant<'a>(&'a self, tenant: Option<&'a str>) -> Option<&'a str> {
        match tenant {
            Some(tenant) => Some(tenant),
            None if self.use_default_tenant_if_empty => Some(self.default_tenant.as_str()),
            None => None,
        }
    }

    /// Validates the fallback flag against the default tenant key.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.use_default_tenant_if_empty && self.default_tenant.trim().is_empty() {
            return Err(Error::configuration(
                "default_tenant cannot be empty when use_default_tenant_if_empty is set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = MultiTenancyConfig::default();
        assert_eq!(config.default_tenant, "default");
        assert!(config.use_default_tenant_if_empty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_tenant() {
        let config = MultiTenancyConfig::default();
        assert_eq!(config.resolve_tenant(None), Some("default"));
        assert_eq!(config.resolve_tenant(Some("t1")), Some("t1"));
    }

    #[test]
    fn test_disabled_leaves_tenant_empty() {
        let config = MultiTenancyConfig::disabled();
        assert_eq!(config.resolve_tenant(None), None);
        assert_eq!(config.resolve_tenant(Some("t1")), Some("t1"));
    }

    #[test]
    fn test_empty_default_tenant_rejected() {
        let config = MultiTenancyConfig::builder().default_tenant("  ").build();
        assert!(config.validate().is_err());

        // Fine when the fallback is off.
        let config = MultiTenancyConfig::builder()
            .default_tenant("")
            .use_default_tenant_if_empty(false)
            .build();
        assert!(config.validate().is_ok());
    }
}

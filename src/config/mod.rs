//! Configuration types for the Permit client.
//!
//! This module provides:
//! - [`PermitConfig`]: Validated endpoints, credential, timeouts and flags
//! - [`MultiTenancyConfig`]: Default tenant policy for permission checks
//! - [`Endpoint`]: The two backends an operation can target

mod env;
mod permit_config;
mod tenancy;

pub use env::{
    ENV_API_TIMEOUT, ENV_API_URL, ENV_DEBUG, ENV_PDP_TIMEOUT, ENV_PDP_URL,
    ENV_PROXY_FACTS_VIA_PDP, ENV_SYNCED_FACTS, ENV_TOKEN,
};
pub use permit_config::{
    DEFAULT_API_URL, DEFAULT_PDP_URL, Endpoint, PermitConfig, PermitConfigBuilder,
};
pub use tenancy::{DEFAULT_TENANT, MultiTenancyConfig};

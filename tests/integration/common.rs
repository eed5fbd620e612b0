//! Common test harness for Permit client integration tests.
//!
//! Provides a pair of mock servers (PDP and cloud API) and a client wired to
//! them through the REST transport.

use std::time::Duration;

use anyhow::{Context, Result};
use permit::{Client, PermitConfig, PermitConfigBuilder};
use wiremock::MockServer;

/// Token used by every test client.
pub const TEST_TOKEN: &str = "permit_key_test";

/// Two mock servers standing in for the PDP and the cloud API.
pub struct TestFixture {
    pub pdp: MockServer,
    pub api: MockServer,
}

impl TestFixture {
    /// Starts both servers.
    pub async fn start() -> Self {
        init_tracing();
        Self {
            pdp: MockServer::start().await,
            api: MockServer::start().await,
        }
    }

    /// Returns a config builder pointed at both servers.
    pub fn config(&self) -> PermitConfigBuilder {
        PermitConfig::builder()
            .token(TEST_TOKEN)
            .pdp_url(self.pdp.uri())
            .api_url(self.api.uri())
    }

    /// Builds a REST-backed client from `builder`.
    pub fn client_with(&self, builder: PermitConfigBuilder) -> Result<Client> {
        let config = builder.build().context("invalid test configuration")?;
        Client::new(config).context("failed to create client")
    }

    /// Builds a REST-backed client with default settings.
    pub fn client(&self) -> Result<Client> {
        self.client_with(self.config())
    }

    /// Builds a client whose cloud API calls time out after `timeout`.
    #[allow(dead_code)]
    pub fn client_with_api_timeout(&self, timeout: Duration) -> Result<Client> {
        self.client_with(self.config().api_timeout(timeout))
    }
}

/// Installs a test subscriber honoring `RUST_LOG`, once per process.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

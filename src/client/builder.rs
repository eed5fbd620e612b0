//! Client builder with typestate pattern.

use std::{marker::PhantomData, sync::Arc};

use super::inner::ClientInner;
#[cfg(feature = "rest")]
use crate::transport::RestTransport;
use crate::{Client, Dispatcher, Error, config::PermitConfig, transport::Transport};

/// Marker type: configuration not yet provided.
pub struct NoConfig;

/// Marker type: configuration has been provided.
pub struct HasConfig;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern so that `build()` is only available once a
/// configuration has been supplied.
///
/// ## Required Configuration
///
/// - `config()`: A validated [`PermitConfig`]
///
/// ## Optional Configuration
///
/// - `transport()`: A custom [`Transport`] (defaults to
///   [`RestTransport`](crate::transport::RestTransport) with the `rest` feature)
///
/// ## Example
///
/// ```rust
/// use permit::{Client, PermitConfig};
/// use permit::testing::MockTransport;
///
/// let config = PermitConfig::builder().token("permit_key_...").build().unwrap();
/// let client = Client::builder()
///     .config(config)
///     .transport(MockTransport::new())
///     .build()
///     .unwrap();
/// assert!(!client.config().proxy_facts_via_pdp());
/// ```
pub struct ClientBuilder<ConfigState> {
    config: Option<PermitConfig>,
    transport: Option<Arc<dyn Transport>>,
    _config_state: PhantomData<ConfigState>,
}

impl ClientBuilder<NoConfig> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config: None,
            transport: None,
            _config_state: PhantomData,
        }
    }

    /// Sets the client configuration.
    pub fn config(self, config: PermitConfig) -> ClientBuilder<HasConfig> {
        ClientBuilder {
            config: Some(config),
            transport: self.transport,
            _config_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoConfig> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ClientBuilder<S> {
    /// Sets the transport used to execute operations.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets an already shared transport.
    #[must_use]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

impl ClientBuilder<HasConfig> {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if no
    /// transport was supplied and none can be created.
    pub fn build(self) -> Result<Client, Error> {
        let config = self
            .config
            .ok_or_else(|| Error::configuration("configuration is required"))?;
        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport()?,
        };

        tracing::debug!(
            target: "permit::client",
            pdp_url = %config.pdp_url(),
            api_url = %config.api_url(),
            transport = transport.name(),
            "client created"
        );

        Ok(Client::from_inner(ClientInner {
            dispatcher: Dispatcher::new(config),
            transport,
        }))
    }
}

#[cfg(feature = "rest")]
fn default_transport() -> Result<Arc<dyn Transport>, Error> {
    Ok(Arc::new(RestTransport::new()?))
}

#[cfg(not(feature = "rest"))]
fn default_transport() -> Result<Arc<dyn Transport>, Error> {
    Err(Error::configuration(
        "no transport supplied and the 'rest' feature is not enabled",
    ))
}

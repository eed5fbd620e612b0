//! REST transport implementation using reqwest.

use std::time::Duration;

use super::traits::{Transport, TransportRequest, TransportResponse};
use crate::Error;
use crate::operation::HttpMethod;
use crate::user_agent;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP transport using reqwest.
///
/// Keeps no idle connections: every connection is released as soon as its
/// exchange completes, fails or times out.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    default_timeout: Option<Duration>,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("default_timeout", &self.default_timeout)
            .finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Creates a REST transport with default settings.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Creates a new REST transport builder.
    pub fn builder() -> RestTransportBuilder {
        RestTransportBuilder::new()
    }
}

/// Builder for [`RestTransport`].
#[derive(Debug, Clone)]
pub struct RestTransportBuilder {
    default_timeout: Option<Duration>,
    connect_timeout: Duration,
    accept_invalid_certs: bool,
}

impl RestTransportBuilder {
    fn new() -> Self {
        Self {
            default_timeout: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    /// Sets the timeout used when an operation carries none.
    #[must_use]
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Sets the TCP/TLS connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Skips certificate verification. Local development only.
    #[must_use]
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Builds the REST transport.
    pub fn build(self) -> Result<RestTransport, Error> {
        #[allow(unused_mut)]
        let mut client_builder = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .pool_max_idle_per_host(0)
            .user_agent(user_agent::user_agent());

        #[cfg(any(feature = "rustls", feature = "native-tls"))]
        {
            if self.accept_invalid_certs {
                client_builder = client_builder.danger_accept_invalid_certs(true);
            }
        }

        let client = client_builder.build().map_err(|e| {
            Error::configuration(format!("failed to create HTTP client: {}", e)).with_source(e)
        })?;

        Ok(RestTransport {
            client,
            default_timeout: self.default_timeout,
        })
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait::async_trait]
impl Transport for RestTransport {
    async fn send(&self, request: TransportRequest<'_>) -> Result<TransportResponse, Error> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone());
        for (name, value) in request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout.or(self.default_timeout) {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(
            target: "permit::transport",
            method = %request.method,
            url = %request.url,
            timeout = ?request.timeout,
            "sending request"
        );

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        tracing::debug!(
            target: "permit::transport",
            method = %request.method,
            url = %request.url,
            status,
            bytes = body.len(),
            "response received"
        );

        Ok(TransportResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}

/// Maps reqwest errors onto the client error taxonomy.
pub(crate) fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(format!("request timed out: {}", e)).with_source(e)
    } else if e.is_connect() {
        Error::connection(format!("connection failed: {}", e)).with_source(e)
    } else if e.is_body() || e.is_decode() {
        Error::invalid_response(format!("failed to read response: {}", e)).with_source(e)
    } else {
        Error::transport(format!("HTTP error: {}", e)).with_source(e)
    }
}

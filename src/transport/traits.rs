//! Transport trait definitions and common types.

use std::time::Duration;

use bytes::Bytes;
use url::Url;

use crate::Error;
use crate::operation::HttpMethod;

/// One outbound HTTP exchange, borrowed from an [`Operation`](crate::Operation).
#[derive(Debug, Clone, Copy)]
pub struct TransportRequest<'a> {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Full target URL, query included.
    pub url: &'a Url,
    /// Headers to send, in order.
    pub headers: &'a [(String, String)],
    /// JSON payload, if any.
    pub body: Option<&'a serde_json::Value>,
    /// Timeout for the whole exchange; `None` means the transport default.
    pub timeout: Option<Duration>,
}

/// Raw result of an exchange: status code and unparsed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Bytes,
}

impl TransportResponse {
    /// Creates a response from a status and raw body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a response carrying a JSON body.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Creates a response with an empty body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, Bytes::new())
    }

    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP exchanges on behalf of the dispatch core.
///
/// Implementations must:
/// - honor [`TransportRequest::timeout`] and report expiry as
///   [`ErrorKind::Timeout`](crate::ErrorKind::Timeout)
/// - return every received status as a [`TransportResponse`], never as an error
/// - classify their own failures into [`ErrorKind`](crate::ErrorKind)
/// - release the connection before returning, on every path
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the raw response.
    async fn send(&self, request: TransportRequest<'_>) -> Result<TransportResponse, Error>;

    /// Returns a short name for logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: TransportRequest<'_>) -> Result<TransportResponse, Error> {
        (**self).send(request).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_constructors() {
        let response = TransportResponse::json(200, &serde_json::json!({ "ok": true }));
        assert!(response.is_success());
        assert_eq!(response.body, Bytes::from_static(br#"{"ok":true}"#));

        let response = TransportResponse::empty(404);
        assert!(!response.is_success());
        assert!(response.body.is_empty());
    }
}

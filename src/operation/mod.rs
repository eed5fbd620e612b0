//! Deferred operations.
//!
//! An [`Operation`] is a fully resolved, inert description of one remote call:
//! target URL, verb, headers, payload and timeout. Planning an operation never
//! touches the network. Executing it ([`crate::dispatch::execute`]) performs
//! exactly one exchange, and executing it again performs another.
//!
//! ```rust
//! use permit::{Dispatcher, HttpMethod, OperationKind, PermitConfig, ReadApi};
//!
//! let config = PermitConfig::builder().token("t").build().unwrap();
//! let dispatcher = Dispatcher::new(config);
//!
//! let op = dispatcher.get_user("u1").unwrap();
//! assert_eq!(op.kind(), OperationKind::Read);
//! assert_eq!(op.method(), HttpMethod::Get);
//! assert_eq!(op.url().path(), "/cloud/users/u1");
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Endpoint;
use crate::dispatch::Action;
use crate::transport::TransportRequest;

/// Whether an operation observes or mutates remote state.
///
/// A semantic tag only; it does not change how the operation is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Observes remote state.
    Read,
    /// Mutates remote state.
    Write,
}

impl OperationKind {
    /// Returns a short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Read => "read",
            OperationKind::Write => "write",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP verb of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Returns the verb as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the response of an operation is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseShape {
    /// The body is parsed as JSON and returned verbatim.
    Json,
    /// Only the status code is reported; the body is not read as JSON.
    Status,
}

/// Status code of an operation whose body is not interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusResult {
    /// HTTP status code.
    pub status: u16,
}

impl StatusResult {
    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Result of executing an operation.
///
/// Any status code produces an outcome; a 404 or a 409 is data here, not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Parsed JSON body.
    Body(serde_json::Value),
    /// Status-only result of a single-entity delete.
    Status(StatusResult),
}

impl Outcome {
    /// Returns the JSON body, if this outcome carries one.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            Outcome::Body(value) => Some(value),
            Outcome::Status(_) => None,
        }
    }

    /// Consumes the outcome and returns the JSON body, if any.
    pub fn into_body(self) -> Option<serde_json::Value> {
        match self {
            Outcome::Body(value) => Some(value),
            Outcome::Status(_) => None,
        }
    }

    /// Returns the status result, if this outcome carries one.
    pub fn status(&self) -> Option<StatusResult> {
        match self {
            Outcome::Status(status) => Some(*status),
            Outcome::Body(_) => None,
        }
    }
}

/// A planned, not yet executed, remote call.
///
/// Plain data: cloneable, shareable across tasks, and free of captured
/// closures. Built by [`Dispatcher::plan`](crate::Dispatcher::plan).
#[derive(Clone, PartialEq)]
pub struct Operation {
    pub(crate) action: Action,
    pub(crate) kind: OperationKind,
    pub(crate) endpoint: Endpoint,
    pub(crate) method: HttpMethod,
    pub(crate) url: Url,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) response: ResponseShape,
    pub(crate) params: String,
    pub(crate) debug: bool,
}

impl Operation {
    /// Returns the logical action this operation performs.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Returns the read/write tag.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Returns `true` for read operations.
    pub fn is_read(&self) -> bool {
        self.kind == OperationKind::Read
    }

    /// Returns `true` for write operations.
    pub fn is_write(&self) -> bool {
        self.kind == OperationKind::Write
    }

    /// Returns the resolved endpoint.
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Returns the HTTP verb.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the full target URL, query included.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the request headers.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the JSON payload, if any.
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Returns the timeout for this call; `None` means the transport default.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns how the response is interpreted.
    pub fn response_shape(&self) -> ResponseShape {
        self.response
    }

    /// Returns the loggable summary of the bound inputs.
    pub fn params(&self) -> &str {
        &self.params
    }

    /// Returns `true` if executing this operation emits a debug event.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Borrows this operation as a transport request.
    pub fn to_transport_request(&self) -> TransportRequest<'_> {
        TransportRequest {
            method: self.method,
            url: &self.url,
            headers: &self.headers,
            body: self.body.as_ref(),
            timeout: self.timeout,
        }
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("action", &self.action)
            .field("kind", &self.kind)
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("body", &self.body)
            .field("timeout", &self.timeout)
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

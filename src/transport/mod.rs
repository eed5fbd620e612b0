//! Transport layer for the dispatch core.
//!
//! The dispatch core talks to the network only through the [`Transport`]
//! trait. This module provides:
//!
//! - [`RestTransport`] (via reqwest, feature `rest`): the production adapter
//! - [`MockTransport`]: in-memory transport for testing without network
//!
//! A transport receives a borrowed [`TransportRequest`] and returns the raw
//! status and body; interpreting the body is left to the dispatch core.

pub(crate) mod traits;

#[cfg(feature = "rest")]
pub(crate) mod rest;

pub(crate) mod mock;

pub use mock::{MockTransport, RecordedRequest};
#[cfg(feature = "rest")]
pub use rest::{RestTransport, RestTransportBuilder};
pub use traits::{Transport, TransportRequest, TransportResponse};

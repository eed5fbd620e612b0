//! Testing utilities for applications built on the Permit client.
//!
//! - [`MockTransport`]: scripted in-memory transport that records requests
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use permit::{Client, PermitConfig, WriteApi};
//! use permit::testing::{MockTransport, TransportResponse};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = Arc::new(MockTransport::new());
//! mock.push_response(TransportResponse::empty(204));
//!
//! let client = Client::builder()
//!     .config(PermitConfig::builder().token("t").build().unwrap())
//!     .shared_transport(mock.clone())
//!     .build()
//!     .unwrap();
//!
//! let op = client.api().delete_user("u1").unwrap();
//! let outcome = client.execute(&op).await.unwrap();
//! assert_eq!(outcome.status().map(|s| s.status), Some(204));
//! assert_eq!(mock.last_request().unwrap().url.path(), "/cloud/users/u1");
//! # }
//! ```

pub use crate::transport::{MockTransport, RecordedRequest, TransportResponse};

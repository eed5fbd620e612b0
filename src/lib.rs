//! # Permit Rust Client
//!
//! Request-dispatch client for a two-endpoint authorization backend:
//!
//! - the **PDP** (policy decision point) answers permission checks and can
//!   proxy fact writes
//! - the **cloud API** manages users, roles, tenants and role assignments
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use permit::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), permit::Error> {
//!     let config = PermitConfig::builder()
//!         .token("permit_key_...")
//!         .api_timeout(std::time::Duration::from_secs(5))
//!         .build()?;
//!     let client = Client::new(config)?;
//!
//!     // Plan now, execute later
//!     let op = client.api().assign_role("alice", "viewer", "acme")?;
//!     let outcome = client.execute(&op).await?;
//!     println!("{:?}", outcome);
//!
//!     let allowed = client.check("alice", "read", "document:readme").await?;
//!     println!("Allowed: {}", allowed);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Deferred operations**: every remote call is planned as an [`Operation`]
//!   first; nothing is sent until it is executed
//! - **Status ≠ Error**: a 404 or 409 comes back as data in [`Outcome`]; only
//!   transport failures are errors
//! - **Per-endpoint timeouts**: `pdp_timeout` for the PDP, `api_timeout` for
//!   the cloud API
//!
//! ## Features
//!
//! - `rest` (default): Enable the reqwest transport
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod operation;

// Transport layer
pub mod transport;

// Testing utilities
pub mod testing;

mod user_agent;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorKind, Result};

pub use config::{Endpoint, MultiTenancyConfig, PermitConfig, PermitConfigBuilder};

pub use dispatch::{
    Action, ActionRequest, CheckQuery, CheckResource, CheckUser, DecisionApi, Dispatcher,
    PermitApi, ReadApi, RoleAssignment, RoleInput, RoleUpdate, TenantInput, TenantUpdate,
    UserInput, WriteApi,
};

pub use operation::{HttpMethod, Operation, OperationKind, Outcome, ResponseShape, StatusResult};

pub use transport::Transport;
#[cfg(feature = "rest")]
pub use transport::RestTransport;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_shared_types_are_send_sync() {
        assert_send_sync::<PermitConfig>();
        assert_send_sync::<Operation>();
        assert_send_sync::<Client>();
        assert_send_sync::<Error>();
    }
}
